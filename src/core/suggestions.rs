// src/core/suggestions.rs

use crate::core::trie::CommandNode;
use crate::models::{ArgumentDescriptor, CommandRecord};

/// Full candidate lines for a partially typed, already tokenized, input.
///
/// All segments but the last must match exactly. If the last one names a
/// node too, that node's children are offered one level deeper; otherwise the
/// siblings starting with it are offered in its place.
pub fn suggest(root: &CommandNode, tokens: &[String]) -> Vec<String> {
    let Some((last, leading)) = tokens.split_last() else {
        return Vec::new();
    };

    let mut node = root;
    for segment in leading {
        match node.try_get(segment) {
            Some(child) => node = child,
            None => return Vec::new(),
        }
    }

    if let Some(found) = node.try_get(last) {
        let typed = tokens.join(" ");
        return found
            .keys_starting_with("")
            .map(|key| format!("{typed} {key}"))
            .collect();
    }

    if leading.is_empty() {
        node.keys_starting_with(last).map(str::to_owned).collect()
    } else {
        let typed = leading.join(" ");
        node.keys_starting_with(last)
            .map(|key| format!("{typed} {key}"))
            .collect()
    }
}

/// The deepest command reachable by the typed route, for argument hints.
#[derive(Debug, Clone, Copy)]
pub struct ClosestCommand<'a> {
    /// The first record (in resolved order) at the deepest node that has any.
    pub record: &'a CommandRecord,
    /// How many leading tokens the record's route consumed.
    pub used_segments: usize,
    /// How many tokens the input had in total.
    pub total_segments: usize,
}

impl<'a> ClosestCommand<'a> {
    /// Tokens typed after the route, i.e. arguments already supplied.
    pub fn typed_arguments(&self) -> usize {
        self.total_segments.saturating_sub(self.used_segments)
    }

    /// The simple arguments not yet typed.
    pub fn remaining_arguments(&self) -> impl Iterator<Item = &'a ArgumentDescriptor> + use<'a> {
        self.record.simple_arguments().skip(self.typed_arguments())
    }
}

/// Walks the trie greedily and remembers the deepest node carrying a record.
pub fn closest_fitting_command<'a>(root: &'a CommandNode, tokens: &[String]) -> Option<ClosestCommand<'a>> {
    let mut closest = None;
    let mut node = root;

    for (index, segment) in tokens.iter().enumerate() {
        let Some(child) = node.try_get(segment) else {
            break;
        };
        node = child;

        if let Some(record) = node.records().first() {
            closest = Some(ClosestCommand {
                record,
                used_segments: index + 1,
                total_segments: tokens.len(),
            });
        }
    }

    closest
}

/// `"<typed line> <a> [b]"`: the typed text followed by the arguments still to come.
pub fn argument_hint(closest: &ClosestCommand<'_>, input: &str) -> String {
    let remaining: Vec<String> = closest
        .remaining_arguments()
        .map(ArgumentDescriptor::hint_fragment)
        .collect();

    let typed = input.trim();
    if remaining.is_empty() {
        typed.to_owned()
    } else {
        format!("{} {}", typed, remaining.join(" "))
    }
}
