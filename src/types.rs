//! Core types for the chat-audit system
//!
//! Serializable types use camelCase JSON serialization for wire compatibility.

use chrono::Local;
use serde::{Deserialize, Serialize};

/// An inbound group-chat message delivered by the host runtime
///
/// The core depends only on this shape, not on the host's full event
/// interface. Events are read-only and not retained beyond the handling
/// of a single message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundEvent {
    /// Stable identifier of the conversation/group the message arrived in
    pub conversation_id: String,

    /// Display name of the sender at the time of sending
    pub sender_display_name: String,

    /// Stable identifier of the sender
    pub sender_id: String,

    /// Plain-text message content
    pub text: String,
}

impl InboundEvent {
    /// Create a new inbound event
    pub fn new(
        conversation_id: impl Into<String>,
        sender_display_name: impl Into<String>,
        sender_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            sender_display_name: sender_display_name.into(),
            sender_id: sender_id.into(),
            text: text.into(),
        }
    }

    /// Console-echo line for this event (no timestamp)
    pub fn echo_line(&self) -> String {
        format!(
            "conversation:{} | sender:{}({}) | message:{}",
            self.conversation_id, self.sender_display_name, self.sender_id, self.text
        )
    }
}

/// A single audit record, immutable once written
///
/// Records are appended in arrival order of the events they were built
/// from; the log is never rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Local datetime with second precision (`%Y-%m-%d %H:%M:%S`)
    pub timestamp: String,

    /// Conversation the message arrived in
    pub conversation_id: String,

    /// Sender display name
    pub sender_display_name: String,

    /// Sender identifier
    pub sender_id: String,

    /// Message content
    pub text: String,
}

impl LogRecord {
    /// Build a record from an event, stamping the current local time
    pub fn from_event(event: &InboundEvent) -> Self {
        Self {
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            conversation_id: event.conversation_id.clone(),
            sender_display_name: event.sender_display_name.clone(),
            sender_id: event.sender_id.clone(),
            text: event.text.clone(),
        }
    }

    /// The fixed single-line log format (without trailing newline)
    pub fn log_line(&self) -> String {
        format!(
            "[{}] conversation:{} | sender:{}({}) | message:{}",
            self.timestamp,
            self.conversation_id,
            self.sender_display_name,
            self.sender_id,
            self.text
        )
    }
}

/// Outcome of adding a conversation to the watch list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The conversation was appended and the change persisted
    Added,
    /// The conversation was already on the watch list; nothing changed
    AlreadyPresent,
}

/// Outcome of removing a conversation from the watch list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The conversation was removed and the change persisted
    Removed,
    /// The conversation was not on the watch list; nothing changed
    NotPresent,
}

/// Current watch-list view
///
/// `ObserveAll` is deliberately distinct from `Watched(vec![])`: an
/// empty watch list means every conversation is in scope, and callers
/// should present it that way rather than as an empty listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchListing {
    /// No watch list configured — every conversation is observed
    ObserveAll,
    /// Explicit watch list, in insertion order
    Watched(Vec<String>),
}
