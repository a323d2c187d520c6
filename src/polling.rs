//! Legacy polling agent.
//!
//! Instead of exposing a webhook, a polling agent repeatedly fetches pending
//! messages from the platform and posts a reply per message. Handler failures
//! are delivered back to the platform as error replies; they never end the
//! polling loop. There is no retry or backoff, just a fixed interval and the
//! shared request timeout.

use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::config::FunctionConfig;
use crate::constants::defaults;
use crate::errors::ConfigError;
use crate::handler::HandlerSlot;
use crate::http::PlatformClient;
use crate::shutdown::wait_for_termination_signal;

/// Agent using the legacy poll/respond model.
#[derive(Debug)]
pub struct PollingAgent {
    name: String,
    platform: PlatformClient,
    handler: HandlerSlot,
    poll_interval: Duration,
}

impl PollingAgent {
    pub fn new(config: FunctionConfig) -> Result<Self, ConfigError> {
        if config.name.trim().is_empty() {
            return Err(ConfigError::MissingName);
        }

        Ok(Self {
            name: config.name,
            platform: PlatformClient::new(config.runtime.platform_url),
            handler: HandlerSlot::new(),
            poll_interval: defaults::POLL_INTERVAL,
        })
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attaches the message handler, replacing any previous one.
    pub fn attach_handler<F, Fut>(&self, handler: F)
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        self.handler.attach(handler);
    }

    pub fn attach_sync_handler<F>(&self, handler: F)
    where
        F: Fn(Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.handler.attach_sync(handler);
    }

    /// Fetches pending messages once and replies to each of them.
    ///
    /// Returns the number of messages handled. Messages without an `id`
    /// cannot be replied to and are skipped with a warning.
    pub async fn poll_once(&self) -> Result<usize> {
        let handler = self
            .handler
            .get()
            .ok_or_else(|| ConfigError::MissingHandler)?;

        let messages = self.platform.fetch_pending_messages(&self.name).await?;
        if messages.is_empty() {
            return Ok(0);
        }

        debug!("Agent '{}' received {} messages", self.name, messages.len());

        let mut handled = 0;
        for message in messages {
            let Some(id) = message.get("id").and_then(Value::as_str).map(String::from) else {
                warn!("Agent '{}' received a message without an id; skipped", self.name);
                continue;
            };

            let input = message.get("content").cloned().unwrap_or(message);

            let reply = match handler(input).await {
                Ok(result) => result,
                Err(e) => {
                    warn!("Agent '{}' handler failed for message {}: {}", self.name, id, e);
                    json!({ "error": format!("Function execution failed: {}", e) })
                }
            };

            self.platform
                .respond_to_message(&self.name, &id, &reply)
                .await?;
            handled += 1;
        }

        Ok(handled)
    }

    /// Polls at a fixed interval until a termination signal arrives.
    ///
    /// Poll failures are logged and the loop continues with the next tick.
    pub async fn run(&self) -> Result<()> {
        if !self.handler.is_attached() {
            return Err(ConfigError::MissingHandler.into());
        }

        info!(
            "Polling agent '{}' started against {} (interval {:?})",
            self.name,
            self.platform.base_url(),
            self.poll_interval
        );

        let mut interval = tokio::time::interval(self.poll_interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        let shutdown = wait_for_termination_signal();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Err(e) = self.poll_once().await {
                        warn!("Agent '{}' poll cycle failed: {}", self.name, e);
                    }
                }
                _ = &mut shutdown => {
                    info!("Polling agent '{}' shutting down", self.name);
                    return Ok(());
                }
            }
        }
    }
}
