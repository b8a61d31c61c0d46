//! # SIP Relay Server
//!
//! HTTP front end for the SIP status relay.
//!
//! This crate provides:
//! - The `/sip/...` event endpoint the PBX calls on every status change
//! - The secret-protected dashboard and the `/sip-status`, `/sip-dashboard`
//!   slash commands
//! - A Mattermost REST client resolving the target channel at startup and
//!   posting notifications
//! - Configuration loading and logging setup
//!
//! ## Architecture
//!
//! Status interpretation, the status store and rendering live in
//! `siprelay-status-core`; this crate only moves requests in and messages out.

pub mod error;
pub mod config;
pub mod logging;
pub mod host;
pub mod notify;
pub mod commands;
pub mod api;

pub use error::{RelayError, Result};
pub use config::RelayConfig;
pub use host::{resolve_target, ChannelTarget, HostDirectory, MattermostClient};
pub use notify::{ChannelNotifier, Notifier};
pub use api::{create_router, AppState};
