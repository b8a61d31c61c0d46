//! Mattermost REST API client

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use url::Url;

use super::HostDirectory;
use crate::config::HostConfig;
use crate::error::{RelayError, Result};

/// Post created by the relay
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OutgoingPost {
    pub channel_id: String,
    pub user_id: String,
    pub message: String,
    pub props: PostProps,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PostProps {
    pub sent_by_plugin: bool,
}

impl OutgoingPost {
    pub fn new(channel_id: impl Into<String>, user_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.into(),
            user_id: user_id.into(),
            message: message.into(),
            props: PostProps { sent_by_plugin: true },
        }
    }
}

/// Every object we look up only matters for its id
#[derive(Debug, Deserialize)]
struct IdOnly {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
}

#[derive(Clone)]
pub struct MattermostClient {
    http: Client,
    base_url: Url,
    access_token: String,
}

impl MattermostClient {
    pub fn new(config: &HostConfig) -> Result<Self> {
        Ok(Self {
            http: Client::builder().build()?,
            base_url: Url::parse(&config.base_url)?,
            access_token: config.access_token.clone(),
        })
    }

    /// `<base>/api/v4/<segments...>`, each segment percent-encoded
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| RelayError::InvalidUrl(format!("{} cannot be a base", self.base_url)))?;
            path.pop_if_empty().extend(["api", "v4"]).extend(segments);
        }
        Ok(url)
    }

    async fn get_id(&self, segments: &[&str]) -> Result<String> {
        let response = self
            .http
            .get(self.endpoint(segments)?)
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        let found: IdOnly = check(response).await?.json().await?;
        Ok(found.id)
    }

    pub async fn create_post(&self, post: &OutgoingPost) -> Result<()> {
        let response = self
            .http
            .post(self.endpoint(&["posts"])?)
            .bearer_auth(&self.access_token)
            .json(post)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}

#[async_trait]
impl HostDirectory for MattermostClient {
    async fn team_id(&self, name: &str) -> Result<String> {
        self.get_id(&["teams", "name", name]).await
    }

    async fn channel_id(&self, team_id: &str, name: &str) -> Result<String> {
        self.get_id(&["teams", team_id, "channels", "name", name]).await
    }

    async fn user_id_by_email(&self, email: &str) -> Result<String> {
        self.get_id(&["users", "email", email]).await
    }
}

async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiError>(&body)
        .map(|e| e.message)
        .unwrap_or(body);
    Err(RelayError::HostApi {
        status: status.as_u16(),
        message,
    })
}
