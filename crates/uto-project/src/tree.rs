//! Project contents tree
//!
//! Hierarchical representation of project contents used from document version 5 on. Children are
//! persistent maps, so transforming one file only copies the directories above it.

use std::str::FromStr;

use im::OrdMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::ModelError;
use crate::file::DIRECTORY_TYPE;
use crate::path::ProjectPath;

/// Entries that can sit in a flat contents map next to directory markers
pub trait ContentEntry: Clone {
    /// Directory marker carried by this entry, if it is a directory
    fn directory_marker(&self) -> Option<Value>;

    /// Entry standing for a directory when a tree is flattened
    fn from_directory_marker(marker: Value) -> Self;
}

/// A node of the contents tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProjectContentsTree<F: Clone> {
    /// Directory with its children keyed by name
    #[serde(rename = "PROJECT_CONTENT_DIRECTORY", rename_all = "camelCase")]
    Directory {
        /// Absolute path
        full_path: String,
        /// Directory marker as persisted
        directory: Value,
        /// Children keyed by file name
        children: OrdMap<String, ProjectContentsTree<F>>,
    },
    /// File node
    #[serde(rename = "PROJECT_CONTENT_FILE", rename_all = "camelCase")]
    File {
        /// Absolute path
        full_path: String,
        /// File content
        content: F,
    },
}

/// Top level of the contents tree, keyed by name
pub type ProjectContentTreeRoot<F> = OrdMap<String, ProjectContentsTree<F>>;

/// Marker of a directory synthesized for an intermediate path
#[must_use]
pub fn default_directory_marker() -> Value {
    json!({ "type": DIRECTORY_TYPE })
}

impl<F: Clone> ProjectContentsTree<F> {
    /// Absolute path of the node
    #[inline]
    #[must_use]
    pub fn full_path(&self) -> &str {
        match self {
            Self::Directory { full_path, .. } | Self::File { full_path, .. } => full_path,
        }
    }

    /// File content, if this is a file node
    #[inline]
    #[must_use]
    pub fn file(&self) -> Option<&F> {
        match self {
            Self::File { content, .. } => Some(content),
            Self::Directory { .. } => None,
        }
    }

    fn empty_directory(path: &ProjectPath, marker: Value) -> Self {
        Self::Directory {
            full_path: path.to_string(),
            directory: marker,
            children: OrdMap::new(),
        }
    }
}

/// Build a tree from a flat path → entry map
///
/// Intermediate directories missing from the map are synthesized. Entries whose
/// [`ContentEntry::directory_marker`] is set become directory nodes.
///
/// # Errors
/// Returns error if a key is not a valid path, names the root, or nests under a file
pub fn contents_to_tree<F: ContentEntry>(
    contents: &OrdMap<String, F>,
) -> Result<ProjectContentTreeRoot<F>, ModelError> {
    let (root, rejected) = contents_to_tree_lenient(contents);
    match rejected.into_iter().next() {
        Some(rejected) => Err(rejected.error),
        None => Ok(root),
    }
}

/// Entry left out of a contents tree
#[derive(Debug)]
pub struct RejectedEntry {
    /// Key of the entry in the flat map
    pub path: String,
    /// Why it could not be placed
    pub error: ModelError,
}

/// Build a tree from a flat map, leaving out the entries it cannot hold
///
/// Entries are placed in key order, so of two clashing entries the later key is rejected.
#[must_use]
pub fn contents_to_tree_lenient<F: ContentEntry>(
    contents: &OrdMap<String, F>,
) -> (ProjectContentTreeRoot<F>, Vec<RejectedEntry>) {
    let mut root = OrdMap::new();
    let mut rejected = Vec::new();
    for (key, entry) in contents {
        if let Err(error) = place_entry(&mut root, key, entry) {
            rejected.push(RejectedEntry {
                path: key.clone(),
                error,
            });
        }
    }
    (root, rejected)
}

// A failed insert leaves the tree untouched: conflicts are only found at nodes that already exist.
fn place_entry<F: ContentEntry>(
    root: &mut ProjectContentTreeRoot<F>,
    key: &str,
    entry: &F,
) -> Result<(), ModelError> {
    let path = ProjectPath::from_str(key)?;
    if path.is_root() {
        return Err(ModelError::RootEntry);
    }
    insert_entry(root, &path, 0, entry)
}

fn insert_entry<F: ContentEntry>(
    children: &mut OrdMap<String, ProjectContentsTree<F>>,
    path: &ProjectPath,
    depth: usize,
    entry: &F,
) -> Result<(), ModelError> {
    let segments = path.segments();
    let name = &segments[depth];
    let here = ProjectPath::new(segments[..=depth].to_vec());

    if depth + 1 == segments.len() {
        return place_leaf(children, name, &here, entry);
    }

    if !children.contains_key(name) {
        children.insert(
            name.clone(),
            ProjectContentsTree::empty_directory(&here, default_directory_marker()),
        );
    }
    match children.get_mut(name) {
        Some(ProjectContentsTree::Directory {
            children: nested, ..
        }) => insert_entry(nested, path, depth + 1, entry),
        _ => Err(ModelError::PathConflict {
            path: here.to_string(),
        }),
    }
}

fn place_leaf<F: ContentEntry>(
    children: &mut OrdMap<String, ProjectContentsTree<F>>,
    name: &str,
    here: &ProjectPath,
    entry: &F,
) -> Result<(), ModelError> {
    let marker = entry.directory_marker();
    if let Some(existing) = children.get_mut(name) {
        // Only a synthesized directory may be claimed by a later directory entry
        return match (marker, existing) {
            (Some(marker), ProjectContentsTree::Directory { directory, .. }) => {
                *directory = marker;
                Ok(())
            }
            _ => Err(ModelError::PathConflict {
                path: here.to_string(),
            }),
        };
    }

    let node = match marker {
        Some(marker) => ProjectContentsTree::empty_directory(here, marker),
        None => ProjectContentsTree::File {
            full_path: here.to_string(),
            content: entry.clone(),
        },
    };
    children.insert(name.to_string(), node);
    Ok(())
}

/// Flatten a tree back into a path → entry map, directories included
#[must_use]
pub fn tree_to_contents<F: ContentEntry>(root: &ProjectContentTreeRoot<F>) -> OrdMap<String, F> {
    fold_contents_tree(root, OrdMap::new(), |mut flat, node| {
        let entry = match node {
            ProjectContentsTree::Directory { directory, .. } => {
                F::from_directory_marker(directory.clone())
            }
            ProjectContentsTree::File { content, .. } => content.clone(),
        };
        flat.insert(node.full_path().to_string(), entry);
        flat
    })
}

/// Map every node bottom-up, keeping the shape of the tree
///
/// Children of a directory are transformed before the directory itself is handed to `transform`.
#[must_use]
pub fn transform_contents_tree<F, T>(
    root: &ProjectContentTreeRoot<F>,
    transform: &mut T,
) -> ProjectContentTreeRoot<F>
where
    F: Clone,
    T: FnMut(ProjectContentsTree<F>) -> ProjectContentsTree<F>,
{
    root.iter()
        .map(|(name, node)| (name.clone(), transform_node(node, transform)))
        .collect()
}

fn transform_node<F, T>(node: &ProjectContentsTree<F>, transform: &mut T) -> ProjectContentsTree<F>
where
    F: Clone,
    T: FnMut(ProjectContentsTree<F>) -> ProjectContentsTree<F>,
{
    match node {
        ProjectContentsTree::Directory {
            full_path,
            directory,
            children,
        } => {
            let children = transform_contents_tree(children, transform);
            transform(ProjectContentsTree::Directory {
                full_path: full_path.clone(),
                directory: directory.clone(),
                children,
            })
        }
        ProjectContentsTree::File { .. } => transform(node.clone()),
    }
}

/// Re-type every file node, stopping at the first error
///
/// `map` receives the node's full path and its content.
///
/// # Errors
/// Returns the first error produced by `map`
pub fn try_map_tree_files<F, G, E, M>(
    root: &ProjectContentTreeRoot<F>,
    map: &mut M,
) -> Result<ProjectContentTreeRoot<G>, E>
where
    F: Clone,
    G: Clone,
    M: FnMut(&str, &F) -> Result<G, E>,
{
    let mut mapped = OrdMap::new();
    for (name, node) in root {
        let node = match node {
            ProjectContentsTree::Directory {
                full_path,
                directory,
                children,
            } => ProjectContentsTree::Directory {
                full_path: full_path.clone(),
                directory: directory.clone(),
                children: try_map_tree_files(children, map)?,
            },
            ProjectContentsTree::File { full_path, content } => ProjectContentsTree::File {
                full_path: full_path.clone(),
                content: map(full_path, content)?,
            },
        };
        mapped.insert(name.clone(), node);
    }
    Ok(mapped)
}

/// Pre-order fold over every node
pub fn fold_contents_tree<F, A, R>(root: &ProjectContentTreeRoot<F>, init: A, mut fold: R) -> A
where
    F: Clone,
    R: FnMut(A, &ProjectContentsTree<F>) -> A,
{
    fold_inner(root, init, &mut fold)
}

fn fold_inner<F, A, R>(root: &ProjectContentTreeRoot<F>, init: A, fold: &mut R) -> A
where
    F: Clone,
    R: FnMut(A, &ProjectContentsTree<F>) -> A,
{
    root.values().fold(init, |acc, node| {
        let acc = fold(acc, node);
        match node {
            ProjectContentsTree::Directory { children, .. } => fold_inner(children, acc, fold),
            ProjectContentsTree::File { .. } => acc,
        }
    })
}

/// Look up a node by path
#[must_use]
pub fn get_contents_tree<'a, F: Clone>(
    root: &'a ProjectContentTreeRoot<F>,
    path: &str,
) -> Option<&'a ProjectContentsTree<F>> {
    let path = ProjectPath::from_str(path).ok()?;
    let (first, rest) = path.segments().split_first()?;
    rest.iter().try_fold(root.get(first)?, |node, segment| match node {
        ProjectContentsTree::Directory { children, .. } => children.get(segment),
        ProjectContentsTree::File { .. } => None,
    })
}

/// Look up a file's content by path
#[must_use]
pub fn get_contents_tree_file<'a, F: Clone>(
    root: &'a ProjectContentTreeRoot<F>,
    path: &str,
) -> Option<&'a F> {
    get_contents_tree(root, path).and_then(ProjectContentsTree::file)
}
