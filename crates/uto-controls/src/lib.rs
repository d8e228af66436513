//! Uto Controls
//!
//! Bridge between user components and the editor's inspector.
//!
//! # Core Concepts
//!
//! - [`RegisterComponentFn`]: The `registerComponent` function handed to evaluated code
//! - [`parse_property_controls`]: Per-prop parsing of a controls description
//! - [`third_party_controls_intrinsic`]: Controls registered by packages the project depends on

#![warn(unreachable_pub)]

// Core modules
pub mod controls;
pub mod intrinsic;
pub mod registry;

// Re-exports
pub use controls::{
    parse_property_controls, ControlParseError, ControlType, ParsedControl, ParsedPropertyControls,
};
pub use intrinsic::{combined_dependencies, third_party_controls_intrinsic, PACKAGE_JSON_PATH};
pub use registry::{
    ComponentDescriptor, ControlsDispatch, ControlsStateSource, PropertyControlsInfo,
    RegisterComponentFn, RegisterOptions, RegisterOutcome, RegistrationError,
    UpdatePropertyControlsInfo,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
