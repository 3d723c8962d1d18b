// File tree data models
// Converts the flat generated file list into a hierarchical tree for
// navigation, and flattens it back for deployment

use serde::{Deserialize, Serialize};

use super::artifact::CodeFile;

/// Tree node kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    File,
    Folder,
}

/// A node in the file navigation tree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FileNode {
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Full path from the tree root; for file nodes this matches the
    /// CodeFile name exactly
    pub path: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub children: Vec<FileNode>,
    pub is_new: bool,
    /// Change-size hint: line count of the file's content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additions: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deletions: Option<usize>,
}

impl FileNode {
    fn folder(name: &str, path: String) -> Self {
        Self {
            name: name.to_string(),
            node_type: NodeType::Folder,
            path,
            children: Vec::new(),
            is_new: true,
            additions: None,
            deletions: None,
        }
    }

    fn file(name: &str, path: String, content: &str) -> Self {
        Self {
            name: name.to_string(),
            node_type: NodeType::File,
            path,
            children: Vec::new(),
            is_new: true,
            additions: Some(content.lines().count()),
            deletions: None,
        }
    }

    pub fn is_file(&self) -> bool {
        self.node_type == NodeType::File
    }

    pub fn is_folder(&self) -> bool {
        self.node_type == NodeType::Folder
    }
}

/// Build a navigation tree from a flat file list.
///
/// Each name is split on '/' and inserted segment by segment, creating
/// folder nodes on demand. Children keep first-seen insertion order, so
/// the same input list always yields the same tree. A folder node and a
/// file node are distinct identities even when their names collide at the
/// same level: a segment only reuses an existing node of the same kind.
pub fn build_file_tree(files: &[CodeFile]) -> Vec<FileNode> {
    let mut roots: Vec<FileNode> = Vec::new();

    for file in files {
        let segments: Vec<&str> = file.name.split('/').collect();
        let mut level = &mut roots;

        for (index, segment) in segments.iter().enumerate() {
            let terminal = index == segments.len() - 1;
            let wanted = if terminal {
                NodeType::File
            } else {
                NodeType::Folder
            };

            let position = level
                .iter()
                .position(|n| n.name == *segment && n.node_type == wanted);

            let position = match position {
                Some(p) => p,
                None => {
                    let path = segments[..=index].join("/");
                    let node = if terminal {
                        FileNode::file(segment, path, &file.content)
                    } else {
                        FileNode::folder(segment, path)
                    };
                    level.push(node);
                    level.len() - 1
                }
            };

            level = &mut level[position].children;
        }
    }

    roots
}

/// Flatten a tree back into (path, content) pairs for deployment.
///
/// Depth-first leaf walk; content is resolved from the canonical file list
/// by the leaf's full path. A leaf with no matching canonical file flattens
/// to empty content rather than failing.
pub fn flatten_file_tree(nodes: &[FileNode], files: &[CodeFile]) -> Vec<(String, String)> {
    let mut result = Vec::new();
    flatten_into(nodes, files, &mut result);
    result
}

fn flatten_into(nodes: &[FileNode], files: &[CodeFile], out: &mut Vec<(String, String)>) {
    for node in nodes {
        match node.node_type {
            NodeType::File => {
                let content = files
                    .iter()
                    .find(|f| f.name == node.path)
                    .map(|f| f.content.clone())
                    .unwrap_or_default();
                out.push((node.path.clone(), content));
            }
            NodeType::Folder => flatten_into(&node.children, files, out),
        }
    }
}
