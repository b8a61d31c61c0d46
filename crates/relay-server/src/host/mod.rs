//! Chat host identity resolution
//!
//! The relay posts as one user into one channel of one team. Those are
//! configured by name and resolved to ids once at startup; if any of them
//! cannot be found the server must not start.

use async_trait::async_trait;
use tracing::{error, info};

use crate::config::RelayConfig;
use crate::error::{RelayError, Result};

pub mod mattermost;

pub use mattermost::MattermostClient;

/// Where and as whom notifications are posted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelTarget {
    pub team_id: String,
    pub channel_id: String,
    pub user_id: String,
}

/// Name → id lookups on the chat host
#[async_trait]
pub trait HostDirectory: Send + Sync {
    /// Id of the team called `name`
    async fn team_id(&self, name: &str) -> Result<String>;

    /// Id of the channel called `name` in team `team_id`
    async fn channel_id(&self, team_id: &str, name: &str) -> Result<String>;

    /// Id of the user with `email`
    async fn user_id_by_email(&self, email: &str) -> Result<String>;
}

/// Resolve the configured team, channel and user
pub async fn resolve_target(directory: &dyn HostDirectory, config: &RelayConfig) -> Result<ChannelTarget> {
    let team_id = directory.team_id(&config.team_name).await.map_err(|e| {
        error!(team_name = %config.team_name, error = %e, "failed to find team");
        lookup_error("team", &config.team_name, e)
    })?;

    let channel_id = directory
        .channel_id(&team_id, &config.channel_name)
        .await
        .map_err(|e| {
            error!(channel_name = %config.channel_name, error = %e, "failed to find channel");
            lookup_error("channel", &config.channel_name, e)
        })?;

    let user_id = directory.user_id_by_email(&config.user_email).await.map_err(|e| {
        error!(user_mail = %config.user_email, error = %e, "failed to find user");
        lookup_error("user", &config.user_email, e)
    })?;

    info!(%team_id, %channel_id, %user_id, "chat target resolved");

    Ok(ChannelTarget {
        team_id,
        channel_id,
        user_id,
    })
}

// Only a 404 means the name is unknown; auth, server and transport errors pass through.
fn lookup_error(kind: &'static str, name: &str, err: RelayError) -> RelayError {
    match err {
        RelayError::HostApi { status: 404, .. } => RelayError::HostLookup {
            kind,
            name: name.to_string(),
        },
        _ => err,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct StaticDirectory {
        teams: HashMap<&'static str, &'static str>,
        channels: HashMap<(&'static str, &'static str), &'static str>,
        users: HashMap<&'static str, &'static str>,
    }

    fn not_found(what: &str) -> RelayError {
        RelayError::HostApi {
            status: 404,
            message: format!("{} not found", what),
        }
    }

    #[async_trait]
    impl HostDirectory for StaticDirectory {
        async fn team_id(&self, name: &str) -> Result<String> {
            self.teams.get(name).map(|id| id.to_string()).ok_or_else(|| not_found(name))
        }

        async fn channel_id(&self, team_id: &str, name: &str) -> Result<String> {
            self.channels
                .iter()
                .find(|((team, channel), _)| *team == team_id && *channel == name)
                .map(|(_, id)| id.to_string())
                .ok_or_else(|| not_found(name))
        }

        async fn user_id_by_email(&self, email: &str) -> Result<String> {
            self.users.get(email).map(|id| id.to_string()).ok_or_else(|| not_found(email))
        }
    }

    fn directory() -> StaticDirectory {
        StaticDirectory {
            teams: HashMap::from([("ops", "team-1")]),
            channels: HashMap::from([(("team-1", "phones"), "channel-1")]),
            users: HashMap::from([("pbx@example.com", "user-1")]),
        }
    }

    fn config(team: &str, channel: &str, email: &str) -> RelayConfig {
        RelayConfig::from_toml(&format!(
            r#"
            team_name = "{}"
            channel_name = "{}"
            user_email = "{}"
            secret = "s"
            [host]
            base_url = "https://chat.example.com"
            access_token = "t"
            "#,
            team, channel, email
        ))
        .unwrap()
    }

    #[tokio::test]
    async fn test_resolve_target() {
        let target = resolve_target(&directory(), &config("ops", "phones", "pbx@example.com"))
            .await
            .unwrap();
        assert_eq!(
            target,
            ChannelTarget {
                team_id: "team-1".to_string(),
                channel_id: "channel-1".to_string(),
                user_id: "user-1".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_unknown_names_fail() {
        let err = resolve_target(&directory(), &config("sales", "phones", "pbx@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "failed to find team: sales");

        let err = resolve_target(&directory(), &config("ops", "random", "pbx@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "failed to find channel: random");

        let err = resolve_target(&directory(), &config("ops", "phones", "nobody@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "failed to find user: nobody@example.com");
    }

    /// Rejects every request the way the host does for a bad token
    struct RejectingDirectory {
        status: u16,
    }

    #[async_trait]
    impl HostDirectory for RejectingDirectory {
        async fn team_id(&self, _name: &str) -> Result<String> {
            Err(RelayError::HostApi {
                status: self.status,
                message: "Invalid or expired session, please login again.".to_string(),
            })
        }

        async fn channel_id(&self, _team_id: &str, _name: &str) -> Result<String> {
            unreachable!("team lookup fails first")
        }

        async fn user_id_by_email(&self, _email: &str) -> Result<String> {
            unreachable!("team lookup fails first")
        }
    }

    #[tokio::test]
    async fn test_host_errors_other_than_not_found_pass_through() {
        let config = config("ops", "phones", "pbx@example.com");
        for status in [401, 500] {
            let err = resolve_target(&RejectingDirectory { status }, &config)
                .await
                .unwrap_err();
            assert!(
                matches!(err, RelayError::HostApi { status: s, .. } if s == status),
                "{:?}",
                err
            );
        }

        let err = resolve_target(&RejectingDirectory { status: 404 }, &config)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "failed to find team: ops");
    }
}
