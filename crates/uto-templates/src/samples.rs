//! Sample source files

use uto_project::{ParsedTextFile, TextFile, TextFileContents};

/// File name handed to the parser for the sample app
pub const SAMPLE_CODE_FILENAME: &str = "code.tsx";

/// Default storyboard and app source
pub const SAMPLE_CODE: &str = r"/** @jsx jsx */
import * as React from 'react'
import { Scene, Storyboard, jsx } from 'utopia-api'
export var App = (props) => {
  return (
    <div
      style={{ width: '100%', height: '100%', backgroundColor: '#FFFFFF' }}
      layout={{ layoutSystem: 'pinSystem' }}
    />
  )
}
export var storyboard = (
  <Storyboard layout={{ layoutSystem: 'pinSystem' }}>
    <Scene
      component={App}
      props={{}}
      style={{ position: 'absolute', left: 0, top: 0, width: 375, height: 812 }}
    />
  </Storyboard>
)

";

/// Entry point rendering the sample app into `#root`
pub const SAMPLE_PREVIEW_CODE: &str = r#"import * as React from "react";
import * as ReactDOM from "react-dom";
import { App } from "../src/app";

const root = document.getElementById("root");
if (root != null) {
  ReactDOM.render(<App />, root);
}"#;

/// Opening marker of the generated external links block
pub const GENERATED_EXTERNAL_RESOURCES_LINKS_OPEN: &str =
    "<!-- Begin Generated Utopia External Links -->";

/// Closing marker of the generated external links block
pub const GENERATED_EXTERNAL_RESOURCES_LINKS_CLOSE: &str =
    "<!-- End Generated Utopia External Links -->";

/// Parser seam for the sample app
pub trait SourceParser {
    /// Parse `code`, reporting failures in the result
    fn parse(&self, filename: &str, code: &str) -> ParsedTextFile;
}

/// Parser that leaves every file unparsed
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopParser;

impl SourceParser for NoopParser {
    fn parse(&self, _filename: &str, _code: &str) -> ParsedTextFile {
        ParsedTextFile::Unparsed
    }
}

/// Preview HTML page with an empty generated links block
#[must_use]
pub fn preview_html() -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>Utopia React App</title>
    {GENERATED_EXTERNAL_RESOURCES_LINKS_OPEN}
    {GENERATED_EXTERNAL_RESOURCES_LINKS_CLOSE}
  </head>
  <body>
    <div id="root"></div>
  </body>
</html>"#
    )
}

/// The sample app, parsed by `parser`, revised at `now_ms`
#[must_use]
pub fn default_ui_js_file(parser: &dyn SourceParser, now_ms: u64) -> TextFile {
    let parsed = parser.parse(SAMPLE_CODE_FILENAME, SAMPLE_CODE);
    if let ParsedTextFile::ParseFailure(failure) = &parsed {
        tracing::warn!(details = ?failure.details, "sample app failed to parse");
    }
    TextFile::new(TextFileContents::both_match(SAMPLE_CODE, parsed), None, now_ms)
}

/// The preview entry point as a plain code file
#[must_use]
pub fn sample_preview_file() -> TextFile {
    TextFile::code_file(SAMPLE_PREVIEW_CODE, None)
}

/// The preview page as a plain code file
#[must_use]
pub fn sample_preview_html_file() -> TextFile {
    TextFile::code_file(preview_html(), None)
}

/// Current time in milliseconds since the epoch
#[must_use]
pub fn current_time_ms() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default()
}
