//! Slash commands: `/sip-status` and `/sip-dashboard`

use serde::Serialize;
use siprelay_status_core::{render_markdown, StatusStore};
use url::Url;

use crate::error::{RelayError, Result};

pub const DASHBOARD_TRIGGER: &str = "sip-dashboard";
pub const STATUS_TRIGGER: &str = "sip-status";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlashCommand {
    /// Link to the HTML dashboard
    Dashboard,
    /// Markdown status table
    Status,
}

impl SlashCommand {
    pub const ALL: [SlashCommand; 2] = [SlashCommand::Dashboard, SlashCommand::Status];

    /// Match the command line against the known triggers
    pub fn parse(command: &str) -> Option<Self> {
        if command.contains(DASHBOARD_TRIGGER) {
            Some(SlashCommand::Dashboard)
        } else if command.contains(STATUS_TRIGGER) {
            Some(SlashCommand::Status)
        } else {
            None
        }
    }

    pub fn trigger(&self) -> &'static str {
        match self {
            SlashCommand::Dashboard => DASHBOARD_TRIGGER,
            SlashCommand::Status => STATUS_TRIGGER,
        }
    }

    /// Autocomplete hint shown by the chat client
    pub fn description(&self) -> &'static str {
        match self {
            SlashCommand::Dashboard => "Get link to SIP dashboard",
            SlashCommand::Status => "Show status of SIP clients",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    /// Only visible to the user who ran the command
    Ephemeral,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CommandResponse {
    pub response_type: ResponseType,
    pub text: String,
}

impl CommandResponse {
    pub fn ephemeral(text: impl Into<String>) -> Self {
        Self {
            response_type: ResponseType::Ephemeral,
            text: text.into(),
        }
    }
}

/// What the commands need to know about the deployment
#[derive(Debug, Clone)]
pub struct CommandSettings {
    pub site_url: String,
    pub plugin_id: String,
    pub secret: String,
    /// Token command requests must carry, when set
    pub token: Option<String>,
}

/// Run `command` against the current store contents
pub fn execute(command: SlashCommand, settings: &CommandSettings, store: &StatusStore) -> Result<CommandResponse> {
    match command {
        SlashCommand::Dashboard => {
            let url = dashboard_url(&settings.site_url, &settings.plugin_id, &settings.secret)?;
            Ok(CommandResponse::ephemeral(format!("[SIP Dashboard]({})", url)))
        }
        SlashCommand::Status => Ok(CommandResponse::ephemeral(render_markdown(&store.snapshot()))),
    }
}

/// `https://<site>/plugins/<plugin_id>/dashboard?secret=<secret>`
///
/// The scheme is always forced to https. Query parameters already on the site
/// URL are kept; `secret` replaces any existing one.
pub fn dashboard_url(site_url: &str, plugin_id: &str, secret: &str) -> Result<Url> {
    let mut url = Url::parse(site_url)?;
    url.set_scheme("https")
        .map_err(|_| RelayError::InvalidUrl(format!("cannot use https for {}", site_url)))?;

    let path = format!("{}/plugins/{}/dashboard", url.path().trim_end_matches('/'), plugin_id);
    url.set_path(&path);

    let mut query: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != "secret")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    query.push(("secret".to_string(), secret.to_string()));
    query.sort_by(|a, b| a.0.cmp(&b.0));
    url.query_pairs_mut().clear().extend_pairs(query);

    Ok(url)
}
