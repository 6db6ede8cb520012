// src/core/trie.rs

use crate::models::CommandRecord;
use std::collections::BTreeMap;
use std::ops::Bound;

/// One node of the routing trie.
///
/// `records` holds the commands whose route ends exactly here (several of them
/// are overloads); `children` maps the next route segment to the child node.
/// Children are kept sorted, so suggestions come out in a stable order.
#[derive(Debug, Default)]
pub struct CommandNode {
    children: BTreeMap<String, CommandNode>,
    records: Vec<CommandRecord>,
}

impl CommandNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the child for `segment`, creating it if needed.
    pub fn get_or_create(&mut self, segment: &str) -> &mut CommandNode {
        debug_assert!(!segment.is_empty(), "route segments are never empty");
        self.children.entry(segment.to_owned()).or_default()
    }

    pub fn try_get(&self, segment: &str) -> Option<&CommandNode> {
        self.children.get(segment)
    }

    /// Lazily yields the child keys that start with `prefix`. An empty prefix yields every child.
    pub fn keys_starting_with<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.children
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .map(|(key, _)| key.as_str())
            .take_while(move |key| key.starts_with(prefix))
    }

    pub fn children(&self) -> impl Iterator<Item = &CommandNode> {
        self.children.values()
    }

    pub(crate) fn children_mut(&mut self) -> impl Iterator<Item = &mut CommandNode> {
        self.children.values_mut()
    }

    pub fn records(&self) -> &[CommandRecord] {
        &self.records
    }

    pub(crate) fn records_mut(&mut self) -> &mut Vec<CommandRecord> {
        &mut self.records
    }

    /// Walks `segments` from this node, creating nodes as needed, and stores the record at the end.
    pub(crate) fn insert<S: AsRef<str>>(&mut self, segments: &[S], record: CommandRecord) {
        let mut node = self;
        for segment in segments {
            node = node.get_or_create(segment.as_ref());
        }
        node.records.push(record);
    }

    /// Every record in this subtree, depth-first in key order.
    pub fn all_records(&self) -> Vec<&CommandRecord> {
        let mut collected = Vec::new();
        self.collect_records(&mut collected);
        collected
    }

    fn collect_records<'a>(&'a self, collected: &mut Vec<&'a CommandRecord>) {
        collected.extend(self.records.iter());
        for child in self.children.values() {
            child.collect_records(collected);
        }
    }
}
