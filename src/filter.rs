//! Membership filter — decide whether a conversation is under observation
//!
//! Pure predicate with no I/O, so scope decisions are independently
//! testable from persistence and event handling.

/// Whether an inbound conversation is in scope for observation
///
/// An empty watch list means global observation mode: every conversation
/// is in scope. A non-empty watch list matches by exact string equality —
/// no normalization, no wildcards.
pub fn is_in_scope(watch_list: &[String], conversation_id: &str) -> bool {
    watch_list.is_empty() || watch_list.iter().any(|id| id == conversation_id)
}
