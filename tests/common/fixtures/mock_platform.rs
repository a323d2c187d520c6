//! Mock orchestration platform for testing
//!
//! Provides a fake platform that responds to the registration, deregistration
//! and legacy polling endpoints without requiring a real platform running.

use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Mock platform server simulating platform HTTP responses
pub struct MockPlatformServer {
    pub server: MockServer,
    pub base_url: String,
}

impl MockPlatformServer {
    /// Create a new mock platform server
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let base_url = server.uri();
        Self { server, base_url }
    }

    /// Mock successful function registration with the given assigned id
    pub async fn mock_register_success(&self, function_id: &str) {
        Mock::given(method("POST"))
            .and(path("/api/agent-functions"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "success": true,
                "data": { "id": function_id }
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock registration failure with an arbitrary status code
    pub async fn mock_register_failure(&self, status_code: u16, error_msg: &str) {
        Mock::given(method("POST"))
            .and(path("/api/agent-functions"))
            .respond_with(ResponseTemplate::new(status_code).set_body_json(json!({
                "success": false,
                "error": error_msg
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock a 201 response whose body is missing the data/id contract
    pub async fn mock_register_malformed(&self) {
        Mock::given(method("POST"))
            .and(path("/api/agent-functions"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "success": true
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock successful deregistration for the given id
    pub async fn mock_unregister_success(&self, function_id: &str) {
        Mock::given(method("DELETE"))
            .and(path(format!("/api/agent-functions/{}", function_id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock deregistration failure for the given id
    pub async fn mock_unregister_failure(&self, function_id: &str, status_code: u16) {
        Mock::given(method("DELETE"))
            .and(path(format!("/api/agent-functions/{}", function_id)))
            .respond_with(ResponseTemplate::new(status_code))
            .mount(&self.server)
            .await;
    }

    /// Mock one failing deregistration followed by successes
    pub async fn mock_unregister_fails_then_succeeds(&self, function_id: &str) {
        Mock::given(method("DELETE"))
            .and(path(format!("/api/agent-functions/{}", function_id)))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(1)
            .mount(&self.server)
            .await;

        self.mock_unregister_success(function_id).await;
    }

    /// Mock pending messages for a legacy polling agent
    pub async fn mock_pending_messages(&self, agent_name: &str, messages: Vec<Value>) {
        Mock::given(method("GET"))
            .and(path(format!("/api/agents/{}/messages", agent_name)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": messages
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock the message response endpoint for a legacy polling agent
    pub async fn mock_message_response(&self, agent_name: &str, message_id: &str) {
        Mock::given(method("POST"))
            .and(path(format!(
                "/api/agents/{}/messages/{}/response",
                agent_name, message_id
            )))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true
            })))
            .mount(&self.server)
            .await;
    }
}
