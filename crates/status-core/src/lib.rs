//! # SIP Relay Status Core
//!
//! Interpretation and presentation of SIP endpoint status events.
//!
//! This crate provides:
//! - The phone and call status vocabulary with icons, colors and messages
//! - An alias table mapping extension numbers to display names
//! - A lock-guarded store of the last known phone status per user
//! - An interpreter turning `action/user[/number]` paths into store updates
//!   and chat messages
//! - HTML dashboard and markdown renderers over store snapshots
//!
//! ## Architecture
//!
//! The core performs no I/O. The server crate owns the HTTP routes, the chat
//! host client and configuration, and hands the core a shared
//! [`StatusStore`] and [`AliasTable`] at startup.
//!
//! ```
//! use std::sync::Arc;
//! use siprelay_status_core::{AliasTable, EventInterpreter, StatusStore, SuppressionPolicy};
//!
//! let store = Arc::new(StatusStore::new());
//! let aliases = Arc::new(AliasTable::parse("100:alice"));
//! let interpreter = EventInterpreter::new(store.clone(), aliases, SuppressionPolicy::default());
//!
//! let outcome = interpreter.handle_path("dnd-on/100").unwrap();
//! assert_eq!(outcome.notification(), Some("alice DND on"));
//! assert_eq!(siprelay_status_core::render_markdown(&store.snapshot()), "|alice|\n|---|\n|🚫|\n");
//! ```

pub mod error;
pub mod status;
pub mod alias;
pub mod store;
pub mod interpreter;
pub mod render;

pub use error::{StatusError, Result};
pub use status::{CallStatus, ColorClass, PhoneStatus};
pub use alias::AliasTable;
pub use store::{StatusEntry, StatusStore};
pub use interpreter::{EventInterpreter, EventOutcome, StatusEvent, SuppressionPolicy};
pub use render::{render_dashboard, render_html_table, render_markdown, DASHBOARD_REFRESH_SECS};
