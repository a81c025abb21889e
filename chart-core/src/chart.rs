//! The on-disk chart format and tree construction.
//!
//! A chart file is a single JSON object. Every key is a node id mapping
//! to an entry with `name`, `description`, the id of its `parent`
//! (`"root"` for top-level nodes) and an optional `image` resource name.
//! The distinguished `"root"` entry carries the root node's own fields
//! and declares no parent.
//!
//! The source collection is keyed, not ordered, so sibling order is
//! defined here as order of appearance in the file (`serde_json` is built
//! with `preserve_order`). That order is part of the contract: it is the
//! left-to-right order the layout pass produces.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{ChartError, ChartResult};
use crate::tree::Tree;
use crate::types::{NodeId, ROOT};

/// Key of the distinguished root entry.
pub const ROOT_KEY: &str = "root";

/// One entry of a chart file.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartEntry {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// A parsed chart: the root entry plus all remaining entries in source
/// order.
#[derive(Debug, Clone)]
pub struct ChartSource {
    root: ChartEntry,
    entries: Vec<(String, ChartEntry)>,
}

impl ChartSource {
    /// Parses a chart document.
    ///
    /// Field errors are reported per entry with the offending id; a
    /// missing `"root"` entry is rejected here rather than at build time.
    pub fn parse(text: &str) -> ChartResult<Self> {
        let value: Value = serde_json::from_str(text)?;
        let object = value.as_object().ok_or(ChartError::NotAnObject)?;

        let mut root = None;
        let mut entries = Vec::with_capacity(object.len());
        for (id, entry) in object {
            let entry: ChartEntry =
                serde_json::from_value(entry.clone()).map_err(|source| {
                    ChartError::InvalidEntry {
                        id: id.clone(),
                        source,
                    }
                })?;
            if id.as_str() == ROOT_KEY {
                root = Some(entry);
            } else {
                entries.push((id.clone(), entry));
            }
        }

        let root = root.ok_or(ChartError::MissingRoot)?;
        Ok(Self { root, entries })
    }

    /// Reads and parses `path`.
    pub fn load(path: &Path) -> ChartResult<Self> {
        Self::parse(&fs::read_to_string(path)?)
    }

    /// The chart shown when no file could be loaded: a lone root node.
    pub fn placeholder() -> Self {
        Self {
            root: ChartEntry {
                name: "Root".to_owned(),
                description: "Welcome to Tree Charter".to_owned(),
                parent: None,
                image: None,
            },
            entries: Vec::new(),
        }
    }

    /// Builds the node tree.
    ///
    /// Children attach depth-first by parent-id match, scanning the full
    /// entry list per node. Quadratic over the entry count, which is fine
    /// at hand-authored chart scale.
    ///
    /// An entry whose parent chain never reaches the root (an unknown
    /// parent id, or a cycle among entries) can never attach. Such
    /// leftovers are collected and rejected as
    /// [`ChartError::Unreachable`] instead of being dropped silently.
    pub fn build(&self) -> ChartResult<Tree> {
        let mut tree = Tree::new(
            ROOT_KEY,
            &self.root.name,
            &self.root.description,
            self.root.image.as_deref(),
        );

        let mut attached = vec![false; self.entries.len()];
        self.attach_children(&mut tree, &mut attached, ROOT);

        let unattached: Vec<String> = self
            .entries
            .iter()
            .zip(&attached)
            .filter(|&(_, &done)| !done)
            .map(|((id, _), _)| id.clone())
            .collect();
        if !unattached.is_empty() {
            return Err(ChartError::Unreachable { ids: unattached });
        }

        Ok(tree)
    }

    fn attach_children(&self, tree: &mut Tree, attached: &mut [bool], parent: NodeId) {
        for i in 0..self.entries.len() {
            if attached[i] {
                continue;
            }
            let (id, entry) = &self.entries[i];
            if entry.parent.as_deref() == Some(tree.nodes[parent].key.as_str()) {
                attached[i] = true;
                let child = tree.add_child(
                    parent,
                    id,
                    &entry.name,
                    &entry.description,
                    entry.image.as_deref(),
                );
                self.attach_children(tree, attached, child);
            }
        }
    }
}
