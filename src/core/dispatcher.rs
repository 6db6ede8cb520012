// src/core/dispatcher.rs

use crate::core::binder::{self, BindContext, BindError};
use crate::core::trie::CommandNode;

/// The result of dispatching one console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A handler ran. `overload` is the record's index at its node, in resolved order.
    Matched { path: String, overload: usize },
    /// A record on the descended path could never be bound; dispatch stopped there.
    Unsupported(BindError),
    /// No record along the descended path consumed the remaining tokens.
    Exhausted,
}

impl DispatchOutcome {
    pub fn is_matched(&self) -> bool {
        matches!(self, Self::Matched { .. })
    }
}

/// Descends the trie along `tokens` and invokes the first record that binds.
///
/// After each matched segment, every record at the new node is tried against
/// the tokens that follow it. A record that fails to parse gives way to the
/// next one; once all have failed, descent continues. A segment with no
/// matching child ends the dispatch: shallower nodes are not retried.
/// An unsupported record stops the dispatch at once.
pub fn dispatch(root: &CommandNode, tokens: &[String], context: &BindContext<'_>) -> DispatchOutcome {
    let mut node = root;

    for (index, segment) in tokens.iter().enumerate() {
        let Some(child) = node.try_get(segment) else {
            break;
        };
        node = child;

        let remainder = tokens.get(index + 1..).unwrap_or_default();
        for (overload, record) in node.records().iter().enumerate() {
            match binder::bind(record, remainder, context) {
                Ok(values) => {
                    log::debug!("Dispatching '{}' (overload {}) with {:?}", record.path(), overload, values);
                    record.invoke(values);
                    return DispatchOutcome::Matched {
                        path: record.path().to_owned(),
                        overload,
                    };
                }
                Err(BindError::FailedToParse) => continue,
                Err(unsupported) => {
                    log::debug!("Dispatch stopped: {}", unsupported);
                    return DispatchOutcome::Unsupported(unsupported);
                }
            }
        }
    }

    DispatchOutcome::Exhausted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::context::Logger;
    use crate::core::overload_resolver::resolve_overloads;
    use crate::core::tokenizer::tokenize;
    use crate::models::{ArgumentDescriptor, CommandRecord, SemanticType, Value};
    use std::cell::RefCell;
    use std::rc::Rc;

    type Calls = Rc<RefCell<Vec<(String, Vec<Value>)>>>;

    fn recording(calls: &Calls, tag: &str, args: &[SemanticType]) -> CommandRecord {
        let calls = Rc::clone(calls);
        let tag = tag.to_owned();
        let arguments = args
            .iter()
            .enumerate()
            .map(|(i, ty)| ArgumentDescriptor::new(*ty, format!("v{}", i + 1)))
            .collect();
        CommandRecord::new(
            tag.clone(),
            arguments,
            Box::new(move |values| calls.borrow_mut().push((tag.clone(), values))),
        )
    }

    fn run(root: &CommandNode, line: &str) -> DispatchOutcome {
        let logger = Logger::fallback();
        let context = BindContext { logger: &logger, services: None };
        dispatch(root, &tokenize(line), &context)
    }

    const INT: SemanticType = SemanticType::Integer;

    fn dice_tree(calls: &Calls) -> CommandNode {
        let mut root = CommandNode::new();
        root.insert(&["dice", "roll"], recording(calls, "roll1", &[INT]));
        root.insert(&["dice", "roll"], recording(calls, "roll2", &[INT, INT]));
        root.insert(&["dice", "roll"], recording(calls, "roll3", &[INT, INT, INT]));
        resolve_overloads(&mut root);
        root
    }

    #[test]
    fn test_dispatch_picks_the_overload_matching_the_token_count() {
        let calls = Calls::default();
        let root = dice_tree(&calls);

        let outcome = run(&root, "dice roll 4 4");
        assert!(outcome.is_matched());
        assert_eq!(
            calls.borrow().as_slice(),
            &[("roll2".to_string(), vec![Value::Integer(4), Value::Integer(4)])]
        );
    }

    #[test]
    fn test_too_many_tokens_exhausts() {
        let calls = Calls::default();
        let root = dice_tree(&calls);

        assert_eq!(run(&root, "dice roll 4 4 4 4 4"), DispatchOutcome::Exhausted);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_blank_and_unknown_lines_exhaust() {
        let calls = Calls::default();
        let root = dice_tree(&calls);

        assert_eq!(run(&root, ""), DispatchOutcome::Exhausted);
        assert_eq!(run(&root, "coin flip"), DispatchOutcome::Exhausted);
        assert_eq!(run(&root, "dice"), DispatchOutcome::Exhausted);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_shallow_record_wins_before_descending() {
        let calls = Calls::default();
        let mut root = CommandNode::new();
        root.insert(&["say"], recording(&calls, "say", &[SemanticType::String]));
        root.insert(&["say", "loud"], recording(&calls, "say loud", &[SemanticType::String]));

        // "loud" binds as the string argument of `say` before `say loud` is reached.
        run(&root, "say loud");
        run(&root, "say loud hello");

        let tags: Vec<String> = calls.borrow().iter().map(|(tag, _)| tag.clone()).collect();
        assert_eq!(tags, vec!["say", "say loud"]);
    }

    #[test]
    fn test_no_backtracking_after_a_wrong_branch() {
        let calls = Calls::default();
        let mut root = CommandNode::new();
        root.insert(&["logger"], recording(&calls, "logger", &[SemanticType::String]));
        root.insert(&["logger", "level"], recording(&calls, "logger level", &[INT]));

        // `level` is a child, and the shallow record fails on the two tokens left.
        assert_eq!(run(&root, "logger level high"), DispatchOutcome::Exhausted);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_unsupported_record_stops_dispatch() {
        let calls = Calls::default();
        let mut root = CommandNode::new();
        root.insert(&["key"], recording(&calls, "char", &[SemanticType::Primitive("char")]));
        root.insert(&["key"], recording(&calls, "string", &[SemanticType::String]));

        assert!(matches!(run(&root, "key a"), DispatchOutcome::Unsupported(_)));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_execute_is_repeatable() {
        let calls = Calls::default();
        let root = dice_tree(&calls);

        run(&root, "dice roll 1 2 3");
        run(&root, "dice roll 1 2 3");

        let calls = calls.borrow();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], calls[1]);
        assert_eq!(calls[0].0, "roll3");
    }
}
