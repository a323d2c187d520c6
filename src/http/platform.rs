use anyhow::Result;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::config::FunctionIdentity;
use crate::constants::{http, platform};
use crate::errors::RegistrationError;

/// Parsed outcome of a successful registration call.
#[derive(Debug, Clone)]
pub struct RegisterResponse {
    /// Platform-assigned function identifier
    pub function_id: String,
    /// Full response body, returned verbatim to the caller
    pub body: Value,
}

/// Outbound HTTP client for the orchestration platform.
///
/// Every request is bounded by the shared request timeout; there is no retry
/// or backoff anywhere in this client. The caller decides how to proceed on
/// failure.
#[derive(Debug, Clone)]
pub struct PlatformClient {
    base_url: String,
    client: Client,
}

impl PlatformClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(http::REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            base_url: base_url.into(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Registers a function endpoint with the platform.
    ///
    /// Success is strictly HTTP 201 with a body carrying `success: true` and
    /// a `data` object holding the assigned `id`. Anything else is a
    /// registration error with the underlying cause attached.
    pub async fn register(
        &self,
        identity: &FunctionIdentity,
        endpoint: &str,
    ) -> Result<RegisterResponse, RegistrationError> {
        let url = format!("{}{}", self.base_url, platform::FUNCTIONS_PATH);
        let payload = json!({
            "name": identity.name,
            "description": identity.description,
            "endpoint": endpoint,
            "capabilities": identity.capabilities,
        });

        debug!("Registering function '{}' at {}", identity.name, url);

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| Self::transport_error(&url, e))?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| RegistrationError::MalformedResponse {
                reason: format!("response body is not JSON: {}", e),
            })?;

        if status != StatusCode::CREATED {
            return Err(RegistrationError::UnexpectedStatus {
                status: status.as_u16(),
                body: body.to_string(),
            });
        }

        if !body.get("success").and_then(Value::as_bool).unwrap_or(false) {
            return Err(RegistrationError::MalformedResponse {
                reason: "missing or false 'success' field".to_string(),
            });
        }

        let function_id = body
            .get("data")
            .and_then(|data| data.get("id"))
            .and_then(Value::as_str)
            .ok_or_else(|| RegistrationError::MalformedResponse {
                reason: "missing 'data.id' field".to_string(),
            })?
            .to_string();

        info!(
            "Function '{}' registered with platform as {}",
            identity.name, function_id
        );

        Ok(RegisterResponse { function_id, body })
    }

    /// Removes a registered function from the platform.
    ///
    /// Deregistration is best-effort during shutdown: any outcome other than
    /// HTTP 200 is logged and reported as `false`, never raised.
    pub async fn unregister(&self, function_id: &str) -> bool {
        let url = format!(
            "{}{}/{}",
            self.base_url,
            platform::FUNCTIONS_PATH,
            function_id
        );

        match self.client.delete(&url).send().await {
            Ok(response) if response.status() == StatusCode::OK => {
                info!("Function {} unregistered from platform", function_id);
                true
            }
            Ok(response) => {
                warn!(
                    "Failed to unregister function {}: platform returned {}",
                    function_id,
                    response.status()
                );
                false
            }
            Err(e) => {
                warn!("Failed to unregister function {}: {}", function_id, e);
                false
            }
        }
    }

    // === Legacy polling model ===

    /// Fetches pending messages for a polling agent.
    pub async fn fetch_pending_messages(&self, agent_name: &str) -> Result<Vec<Value>> {
        let url = format!(
            "{}{}/{}/messages",
            self.base_url,
            platform::AGENTS_PATH,
            agent_name
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to poll messages from {}: {}", url, e))?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "Polling failed with status {}",
                response.status()
            ));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to parse poll response: {}", e))?;

        let messages = body
            .get("data")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        Ok(messages)
    }

    /// Posts a reply to one pending message.
    pub async fn respond_to_message(
        &self,
        agent_name: &str,
        message_id: &str,
        reply: &Value,
    ) -> Result<()> {
        let url = format!(
            "{}{}/{}/messages/{}/response",
            self.base_url,
            platform::AGENTS_PATH,
            agent_name,
            message_id
        );

        let response = self
            .client
            .post(&url)
            .json(&json!({ "response": reply }))
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to post response to {}: {}", url, e))?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "Response delivery failed with status {}",
                response.status()
            ));
        }

        Ok(())
    }

    fn transport_error(url: &str, err: reqwest::Error) -> RegistrationError {
        if err.is_timeout() {
            RegistrationError::Timeout {
                url: url.to_string(),
            }
        } else {
            RegistrationError::ConnectionFailed {
                url: url.to_string(),
                reason: err.to_string(),
            }
        }
    }
}
