//! Observation controller — composes filtering, echo, and audit logging
//!
//! `ObservationController` receives each inbound event, applies the
//! membership filter against the current configuration, and mirrors
//! in-scope messages to the console and the audit log. It also exposes
//! the administrative command surface that manages the watch list.
//!
//! Collaborators are injected as trait objects so the controller can be
//! exercised in isolation with the in-memory implementations.

use crate::audit::AuditSink;
use crate::config::{ConfigStore, ObservationConfig};
use crate::console::ConsoleSink;
use crate::filter::is_in_scope;
use crate::types::{AddOutcome, InboundEvent, LogRecord, RemoveOutcome, WatchListing};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Fixed rejection reply for callers that fail the superuser check
pub const REPLY_INSUFFICIENT_PERMISSION: &str = "insufficient permission";

/// Trait for the external superuser authorization oracle
///
/// Consulted before any administrative command executes. The host
/// platform owns the actual identity model; the controller only needs
/// the yes/no answer.
#[async_trait]
pub trait Authorizer: Send + Sync {
    /// Whether the caller may run administrative commands
    async fn is_superuser(&self, caller_id: &str) -> bool;
}

#[async_trait]
impl<T: Authorizer + ?Sized> Authorizer for Arc<T> {
    async fn is_superuser(&self, caller_id: &str) -> bool {
        (**self).is_superuser(caller_id).await
    }
}

/// Authorizer backed by a fixed superuser list
pub struct StaticAuthorizer {
    superusers: Vec<String>,
}

impl StaticAuthorizer {
    /// Create an authorizer that accepts exactly the given caller IDs
    pub fn new<I, S>(superusers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            superusers: superusers.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl Authorizer for StaticAuthorizer {
    async fn is_superuser(&self, caller_id: &str) -> bool {
        self.superusers.iter().any(|id| id == caller_id)
    }
}

/// Observation pipeline and administrative control surface
///
/// Holds the current configuration under a lock, auto-loads it from the
/// config store on creation, and persists it after every watch-list
/// mutation. Each operation runs to completion, including its durable
/// writes, before returning.
pub struct ObservationController {
    config_store: Box<dyn ConfigStore>,
    audit: Box<dyn AuditSink>,
    console: Box<dyn ConsoleSink>,
    authorizer: Box<dyn Authorizer>,

    /// Current configuration (mirrors the persisted copy)
    config: RwLock<ObservationConfig>,
}

impl ObservationController {
    /// Create a controller, loading configuration from the store
    pub fn new(
        config_store: impl ConfigStore + 'static,
        audit: impl AuditSink + 'static,
        console: impl ConsoleSink + 'static,
        authorizer: impl Authorizer + 'static,
    ) -> Self {
        let config = config_store.load();
        tracing::info!(
            watched = config.watch_list.len(),
            log_enabled = config.log_enabled,
            console_echo_enabled = config.console_echo_enabled,
            "Observation controller started"
        );
        Self {
            config_store: Box::new(config_store),
            audit: Box::new(audit),
            console: Box::new(console),
            authorizer: Box::new(authorizer),
            config: RwLock::new(config),
        }
    }

    /// Snapshot of the current configuration
    pub async fn config(&self) -> ObservationConfig {
        self.config.read().await.clone()
    }

    /// Handle one inbound message from the host runtime
    ///
    /// Out-of-scope events return with no observable effect. In-scope
    /// events are echoed to the console (when enabled) and appended to
    /// the audit log (when enabled). Produces no reply; an audit write
    /// failure is reported and swallowed rather than surfaced to the
    /// event source.
    pub async fn handle_inbound_event(&self, event: &InboundEvent) {
        let config = self.config.read().await;

        if !is_in_scope(&config.watch_list, &event.conversation_id) {
            return;
        }

        if config.console_echo_enabled {
            self.console.emit(&event.echo_line());
        }

        if config.log_enabled {
            let record = LogRecord::from_event(event);
            if let Err(e) = self.audit.append(&record) {
                tracing::error!(
                    conversation = %event.conversation_id,
                    error = %e,
                    "Failed to append audit record, message not recorded"
                );
            }
        }
    }

    /// Add a conversation to the watch list
    ///
    /// Authorization is the dispatch layer's concern; callers of the
    /// typed operation are assumed to have already passed it.
    pub async fn add_monitor(&self, conversation_id: &str) -> AddOutcome {
        let mut config = self.config.write().await;

        if config.watch_list.iter().any(|id| id == conversation_id) {
            return AddOutcome::AlreadyPresent;
        }

        config.watch_list.push(conversation_id.to_string());
        self.persist(&config);
        tracing::info!(conversation = %conversation_id, "Conversation added to watch list");
        AddOutcome::Added
    }

    /// Remove a conversation from the watch list
    pub async fn remove_monitor(&self, conversation_id: &str) -> RemoveOutcome {
        let mut config = self.config.write().await;

        let Some(position) = config.watch_list.iter().position(|id| id == conversation_id)
        else {
            return RemoveOutcome::NotPresent;
        };

        config.watch_list.remove(position);
        self.persist(&config);
        tracing::info!(conversation = %conversation_id, "Conversation removed from watch list");
        RemoveOutcome::Removed
    }

    /// Current watch list, with the empty sentinel made explicit
    pub async fn list_monitors(&self) -> WatchListing {
        let config = self.config.read().await;
        if config.watch_list.is_empty() {
            WatchListing::ObserveAll
        } else {
            WatchListing::Watched(config.watch_list.clone())
        }
    }

    /// Dispatch one administrative command line, yielding reply messages
    ///
    /// The line carries the command name followed by its arguments
    /// (`add_monitor G1`). Unauthorized callers get the fixed rejection
    /// reply; malformed arguments get a usage reply. Unrecognized
    /// command names yield no replies — the host only routes the known
    /// commands here.
    pub async fn dispatch_command(&self, caller_id: &str, line: &str) -> Vec<String> {
        let mut parts = line.split_whitespace();
        let Some(name) = parts.next() else {
            return Vec::new();
        };

        if !matches!(name, "add_monitor" | "remove_monitor" | "list_monitors") {
            tracing::debug!(command = %name, "Ignoring unrecognized command");
            return Vec::new();
        }

        if !self.authorizer.is_superuser(caller_id).await {
            tracing::warn!(caller = %caller_id, command = %name, "Command rejected");
            return vec![REPLY_INSUFFICIENT_PERMISSION.to_string()];
        }

        match name {
            "add_monitor" => {
                let Some(conversation_id) = parts.next() else {
                    return vec!["usage: add_monitor <conversation_id>".to_string()];
                };
                match self.add_monitor(conversation_id).await {
                    AddOutcome::Added => {
                        vec![format!("added {} to the watch list", conversation_id)]
                    }
                    AddOutcome::AlreadyPresent => {
                        vec![format!("{} is already on the watch list", conversation_id)]
                    }
                }
            }
            "remove_monitor" => {
                let Some(conversation_id) = parts.next() else {
                    return vec!["usage: remove_monitor <conversation_id>".to_string()];
                };
                match self.remove_monitor(conversation_id).await {
                    RemoveOutcome::Removed => {
                        vec![format!("removed {} from the watch list", conversation_id)]
                    }
                    RemoveOutcome::NotPresent => {
                        vec![format!("{} is not on the watch list", conversation_id)]
                    }
                }
            }
            "list_monitors" => match self.list_monitors().await {
                WatchListing::ObserveAll => {
                    vec!["watch list is empty (observing all conversations)".to_string()]
                }
                WatchListing::Watched(ids) => {
                    vec![format!("watched conversations:\n{}", ids.join("\n"))]
                }
            },
            _ => unreachable!("command name already validated"),
        }
    }

    /// Teardown hook invoked by the host on unload
    ///
    /// Writes are synchronous and immediate, so there is no pending
    /// state to drain.
    pub async fn shutdown(&self) {
        tracing::info!("Observation controller shut down");
    }

    /// Persist the configuration, reporting and swallowing write errors
    ///
    /// The in-memory state stands either way; an unpersisted change is
    /// an accepted degradation, not a reason to abort the command.
    fn persist(&self, config: &ObservationConfig) {
        if let Err(e) = self.config_store.save(config) {
            tracing::error!(error = %e, "Failed to persist configuration");
        }
    }
}
