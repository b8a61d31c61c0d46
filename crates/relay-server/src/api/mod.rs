//! HTTP API of the relay
//!
//! | Route | Purpose |
//! |---|---|
//! | `/sip/{action}/{user}[/{number}]` | status events from the PBX |
//! | `GET /dashboard?secret=…` | auto-refreshing HTML status table |
//! | `POST /command` | `/sip-status` and `/sip-dashboard` slash commands |
//! | `GET /status` | liveness check |

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{any, get, post},
    Router,
};
use siprelay_status_core::{EventInterpreter, StatusStore};
use tower_http::trace::TraceLayer;
use tracing::Span;

use crate::commands::CommandSettings;
use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::notify::Notifier;

pub mod handlers;
pub mod security_headers;

pub use security_headers::security_headers_middleware;

/// Shared by every request handler
#[derive(Clone)]
pub struct AppState {
    pub interpreter: Arc<EventInterpreter>,
    pub notifier: Arc<dyn Notifier>,
    pub commands: Arc<CommandSettings>,
}

impl AppState {
    pub fn new(
        interpreter: Arc<EventInterpreter>,
        notifier: Arc<dyn Notifier>,
        commands: CommandSettings,
    ) -> Self {
        Self {
            interpreter,
            notifier,
            commands: Arc::new(commands),
        }
    }

    /// Fresh, empty status store wired up from `config`
    pub fn from_config(config: &RelayConfig, notifier: Arc<dyn Notifier>) -> Self {
        let interpreter = EventInterpreter::new(
            Arc::new(StatusStore::new()),
            Arc::new(config.aliases()),
            config.suppression_policy(),
        );
        let commands = CommandSettings {
            site_url: config.site_url().to_string(),
            plugin_id: config.plugin_id.clone(),
            secret: config.secret.clone(),
            token: config.command_token.clone(),
        };
        Self::new(Arc::new(interpreter), notifier, commands)
    }

    pub fn store(&self) -> &StatusStore {
        self.interpreter.store()
    }
}

/// Create the router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/sip/{*path}", any(handlers::status_event))
        .route("/status", get(handlers::health))
        .route("/dashboard", get(handlers::dashboard))
        .route("/command", post(handlers::command))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .with_state(state)
}

// Path only: the dashboard query carries the secret.
fn request_span(request: &Request<Body>) -> Span {
    tracing::debug_span!("request", method = %request.method(), path = %request.uri().path())
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            RelayError::Status(e) if e.is_client_error() => {
                (StatusCode::BAD_REQUEST, "malformed request".to_string())
            }
            RelayError::UnknownCommand(_) => (StatusCode::BAD_REQUEST, "unknown command".to_string()),
            RelayError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };
        (status, body).into_response()
    }
}
