//! Notification sink

use async_trait::async_trait;
use tracing::{error, info};

use crate::error::{RelayError, Result};
use crate::host::{ChannelTarget, MattermostClient};
use crate::host::mattermost::OutgoingPost;

/// Delivers one chat message. A single attempt; callers report failures and
/// never retry.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &str) -> Result<()>;
}

/// Posts into the resolved channel as the resolved user
pub struct ChannelNotifier {
    client: MattermostClient,
    target: ChannelTarget,
}

impl ChannelNotifier {
    pub fn new(client: MattermostClient, target: ChannelTarget) -> Self {
        Self { client, target }
    }

    pub fn target(&self) -> &ChannelTarget {
        &self.target
    }
}

#[async_trait]
impl Notifier for ChannelNotifier {
    async fn notify(&self, message: &str) -> Result<()> {
        let post = OutgoingPost::new(&self.target.channel_id, &self.target.user_id, message);

        if let Err(e) = self.client.create_post(&post).await {
            error!(error = %e, "can't send message to channel");
            return Err(RelayError::Notification(e.to_string()));
        }

        info!(channel = %self.target.channel_id, "message posted");
        Ok(())
    }
}
