use std::sync::Arc;

use crate::db::{entity::analysis_request, AnalysisRequestRepository};
use crate::error::{AppError, Result};
use crate::schema::AnalysisRequestPayload;

pub struct AnalysisRequestService {
    repository: Arc<AnalysisRequestRepository>,
}

impl AnalysisRequestService {
    pub fn new(repository: Arc<AnalysisRequestRepository>) -> Self {
        Self { repository }
    }

    /// Validates a submission and persists it. Nothing is written when
    /// validation fails.
    pub async fn submit(&self, payload: AnalysisRequestPayload) -> Result<analysis_request::Model> {
        let request = payload.into_new_request().map_err(AppError::Validation)?;

        let row = self.repository.create(request).await?;
        tracing::info!("Stored analysis request {} for {}", row.id, row.email);

        Ok(row)
    }

    pub async fn get(&self, id: i32) -> Result<analysis_request::Model> {
        self.repository.find_by_id(id).await
    }

    pub async fn list(&self) -> Result<Vec<analysis_request::Model>> {
        self.repository.find_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    use crate::schema::HoldingPayload;

    fn payload() -> AnalysisRequestPayload {
        AnalysisRequestPayload {
            name: None,
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

    fn service_with(db: sea_orm::DatabaseConnection) -> AnalysisRequestService {
        AnalysisRequestService::new(Arc::new(AnalysisRequestRepository::new(db)))
    }

    #[tokio::test]
    async fn test_submit_persists_valid_payload() {
        let stored = analysis_request::Model {
            id: 1,
            name: None,
            email: "a@b.com".to_string(),
            investment_goals: "growth".to_string(),
            risk_appetite: "moderate".to_string(),
            timeframe: "long".to_string(),
            holdings: serde_json::json!([
                { "coin": "BTC", "quantity": 1.0, "avgBuyPrice": 50000.0 }
            ]),
            tx_hash: None,
            created_at: chrono::Utc::now(),
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 1,
                rows_affected: 1,
            }])
            .append_query_results([vec![stored]])
            .into_connection();

        let row = service_with(db).submit(payload()).await.unwrap();
        assert_eq!(row.id, 1);
    }

    #[tokio::test]
    async fn test_submit_rejects_invalid_payload_without_touching_store() {
        // A mock with no prepared results errors on any statement, so an
        // insert attempt would surface as a Database error instead.
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let mut bad = payload();
        bad.email = Some("not-an-email".to_string());

        let err = service_with(db).submit(bad).await.unwrap_err();
        match err {
            AppError::Validation(errors) => {
                assert_eq!(errors[0].field, "email");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
