//! Folder hierarchy of archetype paths for browsing

use std::collections::BTreeMap;

/// A node in the archetype browser tree. Folders have `is_tree` set; leaves
/// are archetype names.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArchetypeTreeNode {
    pub name: String,
    pub is_tree: bool,
    pub children: Vec<ArchetypeTreeNode>,
}

impl ArchetypeTreeNode {
    /// Build a tree from slash-separated paths such as `"walls/stone/big"`.
    ///
    /// The returned root is an unnamed folder. Children are sorted by name.
    /// Empty segments are ignored. A name used both as an archetype and as a
    /// folder yields a leaf followed by a folder of the same name.
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        // name -> (is an archetype itself, paths below it)
        let mut buckets: BTreeMap<String, (bool, Vec<String>)> = BTreeMap::new();
        for path in paths {
            let path = path.as_ref().trim_matches('/');
            if path.is_empty() {
                continue;
            }
            let (head, rest) = match path.split_once('/') {
                Some((head, rest)) => (head, rest.trim_start_matches('/')),
                None => (path, ""),
            };
            let bucket = buckets.entry(head.to_string()).or_default();
            if rest.is_empty() {
                bucket.0 = true;
            } else {
                bucket.1.push(rest.to_string());
            }
        }

        let mut children = Vec::new();
        for (name, (is_leaf, rest)) in buckets {
            if is_leaf {
                children.push(ArchetypeTreeNode {
                    name: name.clone(),
                    ..Default::default()
                });
            }
            if !rest.is_empty() {
                let mut folder = ArchetypeTreeNode::from_paths(rest);
                folder.name = name;
                children.push(folder);
            }
        }

        Self {
            name: String::new(),
            is_tree: true,
            children,
        }
    }

    /// Find a direct child by name, preferring a folder over a leaf
    pub fn child(&self, name: &str) -> Option<&ArchetypeTreeNode> {
        let mut matches = self.children.iter().filter(|c| c.name == name);
        let first = matches.next()?;
        Some(matches.next().unwrap_or(first))
    }
}
