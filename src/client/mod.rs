use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::error::{ErrorBody, FieldError};
use crate::schema::{AnalysisRequestPayload, ContactPayload};

/// Server acknowledgement for a stored submission.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub message: String,
    pub request_id: i32,
}

#[derive(Debug, Clone, Deserialize)]
struct Acknowledgement {
    message: String,
}

/// How a submission attempt can fail, split by who can fix it: the user
/// (Rejected), the operator (Server), or the connection (Network).
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("{message}")]
    Rejected {
        message: String,
        errors: Vec<FieldError>,
    },

    #[error("Server error: {0}")]
    Server(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// HTTP client for the intake API.
pub struct SubmissionClient {
    client: reqwest::Client,
    base_url: String,
}

impl SubmissionClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Posts an analysis request and returns the receipt on 201.
    pub async fn create_analysis_request(
        &self,
        payload: &AnalysisRequestPayload,
    ) -> Result<SubmissionReceipt, SubmitError> {
        let url = format!("{}/api/analysis-requests", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| SubmitError::Network(format!("Request failed: {}", e)))?;

        let status = response.status();
        match status {
            StatusCode::CREATED => response
                .json::<SubmissionReceipt>()
                .await
                .map_err(|e| SubmitError::Server(format!("Unreadable acknowledgement: {}", e))),
            StatusCode::BAD_REQUEST => Err(rejection(response).await),
            _ => Err(SubmitError::Server(server_message(response, status).await)),
        }
    }

    /// Posts a contact message and returns the confirmation text. The
    /// stricter form rules run locally first; nothing is sent when they fail.
    pub async fn send_contact_message(
        &self,
        payload: &ContactPayload,
    ) -> Result<String, SubmitError> {
        if let Err(errors) = payload.check() {
            return Err(SubmitError::Rejected {
                message: "Validation failed".to_string(),
                errors,
            });
        }

        let url = format!("{}/api/contact", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| SubmitError::Network(format!("Request failed: {}", e)))?;

        let status = response.status();
        match status {
            StatusCode::OK => response
                .json::<Acknowledgement>()
                .await
                .map(|ack| ack.message)
                .map_err(|e| SubmitError::Server(format!("Unreadable acknowledgement: {}", e))),
            StatusCode::BAD_REQUEST => Err(rejection(response).await),
            _ => Err(SubmitError::Server(server_message(response, status).await)),
        }
    }
}

async fn rejection(response: reqwest::Response) -> SubmitError {
    match response.json::<ErrorBody>().await {
        Ok(body) => SubmitError::Rejected {
            message: body.message,
            errors: body.errors.unwrap_or_default(),
        },
        Err(e) => SubmitError::Server(format!("Unreadable rejection: {}", e)),
    }
}

async fn server_message(response: reqwest::Response, status: StatusCode) -> String {
    response
        .json::<ErrorBody>()
        .await
        .map(|body| body.message)
        .unwrap_or_else(|_| format!("Unexpected status {}", status))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};

    use super::*;
    use crate::api::{self, AppState};
    use crate::db::entity::analysis_request;
    use crate::db::AnalysisRequestRepository;
    use crate::schema::HoldingPayload;
    use crate::services::AnalysisRequestService;

    fn state_with(db: DatabaseConnection) -> AppState {
        let repository = Arc::new(AnalysisRequestRepository::new(db));
        AppState::new(Arc::new(AnalysisRequestService::new(repository)))
    }

    async fn serve(state: AppState) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, api::router(state)).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn valid_payload() -> AnalysisRequestPayload {
        AnalysisRequestPayload {
            name: Some("Ada".to_string()),
            email: Some("a@b.com".to_string()),
            investment_goals: Some("growth".to_string()),
            risk_appetite: Some("moderate".to_string()),
            timeframe: Some("long".to_string()),
            holdings: Some(vec![HoldingPayload {
                id: "x".to_string(),
                coin: "BTC".to_string(),
                quantity: 1.0,
                avg_buy_price: 50000.0,
            }]),
            tx_hash: None,
        }
    }

    fn stored_row(id: i32) -> analysis_request::Model {
        analysis_request::Model {
            id,
            name: Some("Ada".to_string()),
            email: "a@b.com".to_string(),
            investment_goals: "growth".to_string(),
            risk_appetite: "moderate".to_string(),
            timeframe: "long".to_string(),
            holdings: serde_json::json!([
                { "coin": "BTC", "quantity": 1.0, "avgBuyPrice": 50000.0 }
            ]),
            tx_hash: None,
            created_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_submission_returns_receipt() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 11,
                rows_affected: 1,
            }])
            .append_query_results([vec![stored_row(11)]])
            .into_connection();
        let base_url = serve(state_with(db)).await;

        let client = SubmissionClient::new(base_url);
        let receipt = client
            .create_analysis_request(&valid_payload())
            .await
            .unwrap();

        assert_eq!(receipt.message, "Analysis request created successfully");
        assert_eq!(receipt.request_id, 11);
    }

    #[tokio::test]
    async fn test_rejection_carries_field_errors() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let base_url = serve(state_with(db)).await;

        let mut payload = valid_payload();
        payload.email = None;
        payload.holdings = Some(vec![]);

        let client = SubmissionClient::new(base_url);
        match client.create_analysis_request(&payload).await.unwrap_err() {
            SubmitError::Rejected { message, errors } => {
                assert_eq!(message, "Validation failed");
                assert!(errors.iter().any(|e| e.field == "email"));
                assert!(errors.iter().any(|e| e.field == "holdings"));
            }
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_storage_failure_surfaces_public_message() {
        // No queued results, so the insert itself fails.
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let base_url = serve(state_with(db)).await;

        let client = SubmissionClient::new(base_url);
        match client.create_analysis_request(&valid_payload()).await.unwrap_err() {
            SubmitError::Server(message) => {
                assert_eq!(message, "Failed to create analysis request");
            }
            other => panic!("expected Server, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_contact_message_confirmed() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let base_url = serve(state_with(db)).await;

        let payload = ContactPayload {
            name: "Ada".to_string(),
            email: "a@b.com".to_string(),
            message: "Please review my portfolio".to_string(),
        };

        let client = SubmissionClient::new(base_url);
        let message = client.send_contact_message(&payload).await.unwrap();
        assert_eq!(message, "Contact form submitted successfully");
    }

    #[tokio::test]
    async fn test_contact_rules_run_before_any_request() {
        // Nothing is listening on this address, so reaching the network
        // would come back as a Network error instead.
        let client = SubmissionClient::new("http://127.0.0.1:1");

        let payload = ContactPayload {
            name: "Ada".to_string(),
            email: "a@b.com".to_string(),
            message: "hi".to_string(),
        };

        match client.send_contact_message(&payload).await.unwrap_err() {
            SubmitError::Rejected { errors, .. } => {
                assert_eq!(errors[0].field, "message");
            }
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_network_error() {
        let client = SubmissionClient::new("http://127.0.0.1:1");
        match client.create_analysis_request(&valid_payload()).await.unwrap_err() {
            SubmitError::Network(_) => {}
            other => panic!("expected Network, got {:?}", other),
        }
    }
}
