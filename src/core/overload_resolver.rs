// src/core/overload_resolver.rs

use crate::core::trie::CommandNode;
use crate::models::CommandRecord;
use std::cmp::Reverse;

/// Sorts every overload list in the subtree and infers which trailing simple
/// arguments are optional.
///
/// At a node with several records, the records are stably sorted by
/// descending argument count. The longest prefix of simple-argument names
/// shared by all of them is kept required; every simple argument past that
/// prefix is marked optional on every record. So `roll <v1>`, `roll <v1> <v2>`
/// and `roll <v1> <v2> <v3>` become `roll <v1> [v2] [v3]`.
///
/// This only recognises "same leading parameters, more trailing parameters".
/// Overloads that rename or reorder parameters just end up with a shorter
/// common prefix.
pub fn resolve_overloads(node: &mut CommandNode) {
    if node.records().len() > 1 {
        resolve_node(node.records_mut());
    }

    for child in node.children_mut() {
        resolve_overloads(child);
    }
}

fn resolve_node(records: &mut [CommandRecord]) {
    records.sort_by_key(|record| Reverse(record.argument_count()));

    let common = common_simple_prefix_len(records);
    log::debug!(
        "Resolved {} overloads of '{}': {} leading simple argument(s) required",
        records.len(),
        records.first().map_or("", CommandRecord::path),
        common
    );

    for record in records.iter_mut() {
        mark_optional_from(record, common);
    }
}

/// Length of the longest simple-argument name sequence that is a prefix of every record's.
fn common_simple_prefix_len(records: &[CommandRecord]) -> usize {
    let Some((first, rest)) = records.split_first() else {
        return 0;
    };

    let mut chain: Vec<&str> = first.simple_argument_names().collect();
    for record in rest {
        let matching = chain
            .iter()
            .zip(record.simple_argument_names())
            .take_while(|(expected, name)| **expected == *name)
            .count();
        chain.truncate(matching);
    }
    chain.len()
}

fn mark_optional_from(record: &mut CommandRecord, required: usize) {
    record
        .arguments_mut()
        .iter_mut()
        .filter(|argument| argument.is_user_suppliable())
        .skip(required)
        .for_each(|argument| argument.mark_optional());
}
