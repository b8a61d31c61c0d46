//! Turns inbound `action/user[/number]` paths into store updates and chat messages

use std::sync::Arc;
use tracing::debug;
use crate::alias::AliasTable;
use crate::error::{Result, StatusError};
use crate::status::{CallStatus, PhoneStatus};
use crate::store::StatusStore;

/// A classified inbound event, with aliases already applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusEvent {
    /// `action/user`: the phone of `user` changed state
    Phone { status: PhoneStatus, user: String },
    /// `action/user/number`: a call for `user` from `number`
    Call {
        status: CallStatus,
        user: String,
        number: String,
    },
}

impl StatusEvent {
    /// Classify already split path segments
    pub fn from_segments(segments: &[&str], aliases: &AliasTable) -> Result<Self> {
        match segments {
            [action, user] => Ok(StatusEvent::Phone {
                status: PhoneStatus::parse(action),
                user: aliases.resolve(user).to_string(),
            }),
            [action, user, number] => Ok(StatusEvent::Call {
                status: CallStatus::parse(action),
                user: aliases.resolve(user).to_string(),
                number: aliases.resolve(number).to_string(),
            }),
            _ => Err(StatusError::MalformedRequest {
                segments: segments.len(),
            }),
        }
    }

    pub fn message(&self) -> String {
        match self {
            StatusEvent::Phone { status, user } => status.message(user),
            StatusEvent::Call { status, user, number } => status.message(user, number),
        }
    }
}

/// Which messages are kept out of the channel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuppressionPolicy {
    /// Drop offhook/onhook notifications
    pub hide_connection_messages: bool,
}

impl SuppressionPolicy {
    pub fn new(hide_connection_messages: bool) -> Self {
        Self {
            hide_connection_messages,
        }
    }

    pub fn suppresses(&self, status: PhoneStatus) -> bool {
        self.hide_connection_messages && status.is_connection_change()
    }
}

/// What the caller should do after an event was applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// Post this message to the channel
    Notify(String),
    /// The store was updated but the message stays out of the channel
    Suppressed { message: String },
}

impl EventOutcome {
    /// Message to forward, if any
    pub fn notification(&self) -> Option<&str> {
        match self {
            EventOutcome::Notify(message) => Some(message),
            EventOutcome::Suppressed { .. } => None,
        }
    }

    pub fn is_suppressed(&self) -> bool {
        matches!(self, EventOutcome::Suppressed { .. })
    }
}

pub struct EventInterpreter {
    store: Arc<StatusStore>,
    aliases: Arc<AliasTable>,
    policy: SuppressionPolicy,
}

impl EventInterpreter {
    pub fn new(store: Arc<StatusStore>, aliases: Arc<AliasTable>, policy: SuppressionPolicy) -> Self {
        Self {
            store,
            aliases,
            policy,
        }
    }

    pub fn store(&self) -> &Arc<StatusStore> {
        &self.store
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn policy(&self) -> SuppressionPolicy {
        self.policy
    }

    /// Handle a decoded request path such as `dnd-on/alice` or `/incoming-call/alice/100`
    pub fn handle_path(&self, path: &str) -> Result<EventOutcome> {
        let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
        debug!(?segments, "request url parts");
        self.handle_segments(&segments)
    }

    /// Apply one event.
    ///
    /// Phone events always update the store, even when the resulting message
    /// is suppressed. Call events never touch the store. A malformed path
    /// changes nothing.
    pub fn handle_segments(&self, segments: &[&str]) -> Result<EventOutcome> {
        let event = StatusEvent::from_segments(segments, &self.aliases)?;
        let message = event.message();

        match event {
            StatusEvent::Phone { status, user } => {
                let previous = self.store.set(user.as_str(), status);
                debug!(%user, %status, ?previous, "phone status updated");

                if self.policy.suppresses(status) {
                    debug!(%user, %status, "connection message suppressed");
                    return Ok(EventOutcome::Suppressed { message });
                }
            }
            StatusEvent::Call { status, user, number } => {
                debug!(%user, %number, %status, "call event");
            }
        }

        Ok(EventOutcome::Notify(message))
    }
}
