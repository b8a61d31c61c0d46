//! Request handlers

use axum::{
    extract::{Form, Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    Json,
};
use serde::Deserialize;
use siprelay_status_core::{render_dashboard, EventOutcome};
use tracing::{debug, warn};

use super::AppState;
use crate::commands::{self, CommandResponse, SlashCommand};
use crate::error::{RelayError, Result};

/// `/sip/{action}/{user}[/{number}]`
///
/// The store update is kept even when posting the message fails.
pub async fn status_event(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<StatusCode> {
    let outcome = state.interpreter.handle_path(&path).map_err(|e| {
        warn!(%path, error = %e, "rejected status event");
        RelayError::from(e)
    })?;

    match outcome {
        EventOutcome::Notify(message) => {
            state.notifier.notify(&message).await?;
        }
        EventOutcome::Suppressed { message } => {
            debug!(%message, "not posting connection message");
        }
    }

    Ok(StatusCode::OK)
}

pub async fn health() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain")], "OK")
}

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub secret: Option<String>,
}

pub async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Html<String>> {
    if query.secret.as_deref() != Some(state.commands.secret.as_str()) {
        return Err(RelayError::Unauthorized);
    }

    Ok(Html(render_dashboard(&state.store().snapshot())))
}

/// Slash command request as posted by the chat host
#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    pub command: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub token: Option<String>,
}

pub async fn command(
    State(state): State<AppState>,
    Form(request): Form<CommandRequest>,
) -> Result<Json<CommandResponse>> {
    if let Some(expected) = &state.commands.token {
        if request.token.as_ref() != Some(expected) {
            return Err(RelayError::Unauthorized);
        }
    }

    let command = SlashCommand::parse(&request.command)
        .ok_or_else(|| RelayError::UnknownCommand(request.command.clone()))?;
    debug!(trigger = command.trigger(), text = %request.text, "slash command");

    let response = commands::execute(command, &state.commands, state.store())?;
    Ok(Json(response))
}
