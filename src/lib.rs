//! # chat-audit
//!
//! Conversation watch-list filtering and append-only audit logging for
//! chat runtimes.
//!
//! ## Overview
//!
//! `chat-audit` observes inbound group-chat messages delivered by a
//! host messaging runtime, decides whether each conversation is under
//! observation, and durably records in-scope messages to a plain-text
//! audit log while mirroring them to the console. An administrative
//! command surface manages the watch list. Swap the file-backed
//! collaborators for the in-memory ones to test without touching disk.
//!
//! ## Quick Start
//!
//! ```rust
//! use chat_audit::{
//!     FileAuditLog, FileConfigStore, InboundEvent, ObservationController, StaticAuthorizer,
//!     StdoutConsole,
//! };
//!
//! # async fn example() {
//! let controller = ObservationController::new(
//!     FileConfigStore::new("config.json"),
//!     FileAuditLog::new("message_log.txt"),
//!     StdoutConsole,
//!     StaticAuthorizer::new(["admin-1"]),
//! );
//!
//! // Watch a conversation (replies go back through the host's channel)
//! let replies = controller.dispatch_command("admin-1", "add_monitor G1").await;
//! println!("{}", replies[0]);
//!
//! // In-scope messages are echoed and appended to the audit log
//! let event = InboundEvent::new("G1", "Alice", "u-100", "hello");
//! controller.handle_inbound_event(&event).await;
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **`is_in_scope`** — pure membership predicate; an empty watch list
//!   means every conversation is observed
//! - **`ConfigStore`** trait — durable observation settings (file or
//!   in-memory), persisted in full after every mutation
//! - **`AuditSink`** trait — append-only record sink (file or in-memory)
//! - **`ConsoleSink`** trait — live console mirroring seam
//! - **`Authorizer`** trait — external superuser oracle gating the
//!   administrative commands
//! - **`ObservationController`** — composes the above per inbound event
//!   or command

pub mod audit;
pub mod config;
pub mod console;
pub mod controller;
pub mod error;
pub mod filter;
pub mod types;

// Re-export core types
pub use audit::{AuditSink, FileAuditLog, MemoryAuditLog};
pub use config::{ConfigStore, FileConfigStore, MemoryConfigStore, ObservationConfig};
pub use console::{ConsoleSink, MemoryConsole, StdoutConsole};
pub use controller::{
    Authorizer, ObservationController, StaticAuthorizer, REPLY_INSUFFICIENT_PERMISSION,
};
pub use error::{AuditError, Result};
pub use filter::is_in_scope;
pub use types::{AddOutcome, InboundEvent, LogRecord, RemoveOutcome, WatchListing};
