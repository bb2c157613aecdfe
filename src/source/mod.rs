//! Tree description input.
//!
//! Reads a JSON document of the form `{"nodes": [...]}` into a [`TreeModel`].
//! A node without a `children` key has not been loaded yet; an empty array
//! means it is loaded and has no children.

use crate::model::error::SourceError;
use crate::model::{NodeId, Pixels, TreeModel, TreeOptions};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Top-level JSON document.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TreeFile {
    /// Top-level nodes in display order.
    pub nodes: Vec<NodeSpec>,
}

/// One node in the JSON document.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct NodeSpec {
    /// Display name, also used by `--reveal`.
    pub name: String,
    /// Intrinsic row height; the configured default when absent.
    #[serde(default)]
    pub height: Option<Pixels>,
    /// Start expanded.
    #[serde(default)]
    pub expanded: bool,
    /// Start hidden.
    #[serde(default)]
    pub hidden: bool,
    /// `None` leaves the node unloaded.
    #[serde(default)]
    pub children: Option<Vec<NodeSpec>>,
}

/// Read and build a tree from a JSON file.
///
/// # Errors
///
/// - [`SourceError::FileNotFound`] if `path` does not exist
/// - [`SourceError::Io`] if it cannot be read
/// - [`SourceError::Json`] if it is not a valid tree document
/// - [`SourceError::EmptyTree`] if it has no top-level nodes
pub fn load_tree(
    path: &Path,
    default_height: Pixels,
    options: TreeOptions,
) -> Result<TreeModel, SourceError> {
    if !path.exists() {
        return Err(SourceError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let contents = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let file: TreeFile = serde_json::from_str(&contents).map_err(|source| SourceError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let tree = build_tree(&file, default_height, options)?;
    debug!(path = %path.display(), nodes = tree.len(), "tree loaded");
    Ok(tree)
}

/// Build a tree from an already-parsed document.
///
/// # Errors
///
/// Returns [`SourceError::EmptyTree`] if the document has no top-level nodes.
pub fn build_tree(
    file: &TreeFile,
    default_height: Pixels,
    options: TreeOptions,
) -> Result<TreeModel, SourceError> {
    if file.nodes.is_empty() {
        return Err(SourceError::EmptyTree);
    }

    let mut tree = TreeModel::new(options);
    for spec in &file.nodes {
        let id = tree.add_root(&spec.name, spec.height.unwrap_or(default_height));
        populate(&mut tree, id, spec, default_height);
    }
    Ok(tree)
}

/// Load `spec`'s children under `id`, recursively, then apply its flags.
fn populate(tree: &mut TreeModel, id: NodeId, spec: &NodeSpec, default_height: Pixels) {
    if let Some(children) = &spec.children {
        let rows: Vec<(&str, Pixels)> = children
            .iter()
            .map(|c| (c.name.as_str(), c.height.unwrap_or(default_height)))
            .collect();
        let ids = tree.load_children(id, &rows);
        for (child_id, child_spec) in ids.into_iter().zip(children) {
            populate(tree, child_id, child_spec, default_height);
        }
    }

    if spec.expanded {
        tree.set_expanded(id, true);
    }
    if spec.hidden {
        tree.set_hidden(id, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TreeState;

    fn parse(json: &str) -> TreeFile {
        serde_json::from_str(json).expect("valid tree json")
    }

    mod parsing {
        use super::*;

        #[test]
        fn optional_fields_default() {
            let file = parse(r#"{"nodes":[{"name":"a"}]}"#);
            let spec = &file.nodes[0];
            assert_eq!(spec.height, None);
            assert!(!spec.expanded);
            assert!(!spec.hidden);
            assert_eq!(spec.children, None);
        }

        #[test]
        fn unknown_fields_are_rejected() {
            let result: Result<TreeFile, _> =
                serde_json::from_str(r#"{"nodes":[{"name":"a","colour":"red"}]}"#);
            assert!(result.is_err());
        }
    }

    mod building {
        use super::*;

        #[test]
        fn empty_document_is_an_error() {
            let file = parse(r#"{"nodes":[]}"#);
            let result = build_tree(&file, 22.0, TreeOptions::default());
            assert!(matches!(result, Err(SourceError::EmptyTree)));
        }

        #[test]
        fn missing_heights_use_default() {
            let file = parse(r#"{"nodes":[{"name":"a"},{"name":"b","height":40}]}"#);
            let tree = build_tree(&file, 22.0, TreeOptions::default()).unwrap();

            let a = tree.find_by_name("a").unwrap();
            let b = tree.find_by_name("b").unwrap();
            assert_eq!(tree.node(a).unwrap().self_height(), 22.0);
            assert_eq!(tree.node(b).unwrap().self_height(), 40.0);
            assert_eq!(tree.roots(), &[a, b]);
        }

        #[test]
        fn absent_children_stay_unloaded() {
            let file = parse(r#"{"nodes":[{"name":"lazy","expanded":true},{"name":"leaf","children":[]}]}"#);
            let tree = build_tree(&file, 10.0, TreeOptions::default()).unwrap();

            let lazy = tree.node(tree.find_by_name("lazy").unwrap()).unwrap();
            let leaf = tree.node(tree.find_by_name("leaf").unwrap()).unwrap();
            assert!(lazy.children().is_none());
            assert!(lazy.is_expanded());
            assert_eq!(leaf.children(), Some(&[][..]));
        }

        #[test]
        fn nested_children_and_flags_are_applied() {
            let file = parse(
                r#"{"nodes":[{"name":"p","expanded":true,"children":[
                    {"name":"c1"},
                    {"name":"c2","hidden":true},
                    {"name":"c3","children":[{"name":"g"}]}
                ]}]}"#,
            );
            let tree = build_tree(&file, 10.0, TreeOptions::default()).unwrap();

            let p = tree.find_by_name("p").unwrap();
            let c1 = tree.find_by_name("c1").unwrap();
            let c2 = tree.find_by_name("c2").unwrap();
            let c3 = tree.find_by_name("c3").unwrap();
            let g = tree.find_by_name("g").unwrap();

            let parent = tree.node(p).unwrap();
            assert_eq!(parent.children(), Some(&[c1, c2, c3][..]));
            assert_eq!(parent.visible_children(), &[c1, c3]);
            assert!(tree.node(c2).unwrap().is_hidden());
            assert_eq!(tree.node(g).unwrap().parent(), Some(c3));
            assert!(tree.expanded_ids().contains(&p));
        }

        #[test]
        fn options_are_carried_into_the_model() {
            let file = parse(r#"{"nodes":[{"name":"a"}]}"#);
            let tree = build_tree(
                &file,
                10.0,
                TreeOptions {
                    use_virtual_scroll: false,
                },
            )
            .unwrap();
            assert!(!tree.use_virtual_scroll());
        }
    }

    mod loading {
        use super::*;
        use std::fs;

        #[test]
        fn missing_file_reports_not_found() {
            let result = load_tree(
                Path::new("/nonexistent/treescroll/tree.json"),
                22.0,
                TreeOptions::default(),
            );
            assert!(matches!(result, Err(SourceError::FileNotFound { .. })));
        }

        #[test]
        fn invalid_json_reports_path() {
            let path = std::env::temp_dir().join("treescroll_source_invalid.json");
            fs::write(&path, "{not json").unwrap();

            let result = load_tree(&path, 22.0, TreeOptions::default());
            fs::remove_file(&path).ok();

            match result {
                Err(SourceError::Json { path: p, .. }) => assert_eq!(p, path),
                other => panic!("expected Json error, got {:?}", other),
            }
        }

        #[test]
        fn valid_file_loads() {
            let path = std::env::temp_dir().join("treescroll_source_valid.json");
            fs::write(&path, r#"{"nodes":[{"name":"a","height":5}]}"#).unwrap();

            let result = load_tree(&path, 22.0, TreeOptions::default());
            fs::remove_file(&path).ok();

            let tree = result.unwrap();
            assert_eq!(tree.len(), 1);
        }
    }
}
