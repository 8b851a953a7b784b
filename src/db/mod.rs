use sea_orm::{entity::prelude::*, DatabaseConnection, NotSet, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::enums::{InvestmentGoal, RiskAppetite, Timeframe};
use crate::error::{AppError, Result};

pub mod entity;
pub use entity::*;

/// One holding as it is persisted inside the request row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingRecord {
    pub coin: String,
    pub quantity: f64,
    pub avg_buy_price: f64,
}

/// Fully validated input for a new analysis request. The repository accepts
/// nothing looser than this.
#[derive(Debug, Clone)]
pub struct NewAnalysisRequest {
    pub name: Option<String>,
    pub email: String,
    pub investment_goals: InvestmentGoal,
    pub risk_appetite: RiskAppetite,
    pub timeframe: Timeframe,
    pub holdings: Vec<HoldingRecord>,
    pub tx_hash: Option<String>,
}

pub struct AnalysisRequestRepository {
    db: DatabaseConnection,
}

impl AnalysisRequestRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        request: NewAnalysisRequest,
    ) -> Result<entity::analysis_request::Model> {
        let holdings = serde_json::to_value(&request.holdings)
            .map_err(|e| AppError::Internal(format!("Failed to encode holdings: {}", e)))?;

        let row = entity::analysis_request::ActiveModel {
            id: NotSet,
            name: Set(request.name),
            email: Set(request.email),
            investment_goals: Set(request.investment_goals.as_str().to_string()),
            risk_appetite: Set(request.risk_appetite.as_str().to_string()),
            timeframe: Set(request.timeframe.as_str().to_string()),
            holdings: Set(holdings),
            tx_hash: Set(request.tx_hash),
            created_at: Set(chrono::Utc::now()),
        };

        let row = entity::analysis_request::Entity::insert(row)
            .exec_with_returning(&self.db)
            .await?;

        Ok(row)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<entity::analysis_request::Model> {
        entity::analysis_request::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::RequestNotFound)
    }

    pub async fn find_all(&self) -> Result<Vec<entity::analysis_request::Model>> {
        let rows = entity::analysis_request::Entity::find()
            .order_by_asc(entity::analysis_request::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows)
    }
}

pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, username: String, password: String) -> Result<entity::user::Model> {
        let row = entity::user::ActiveModel {
            id: NotSet,
            username: Set(username),
            password: Set(password),
        };

        let row = entity::user::Entity::insert(row)
            .exec_with_returning(&self.db)
            .await?;

        Ok(row)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::user::Model>> {
        let user = entity::user::Entity::find_by_id(id).one(&self.db).await?;
        Ok(user)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<entity::user::Model>> {
        let user = entity::user::Entity::find()
            .filter(entity::user::Column::Username.eq(username))
            .one(&self.db)
            .await?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn sample_request() -> NewAnalysisRequest {
        NewAnalysisRequest {
            name: Some("Ada".to_string()),
            email: "a@b.com".to_string(),
            investment_goals: InvestmentGoal::Growth,
            risk_appetite: RiskAppetite::Moderate,
            timeframe: Timeframe::Long,
            holdings: vec![HoldingRecord {
                coin: "BTC".to_string(),
                quantity: 1.0,
                avg_buy_price: 50000.0,
            }],
            tx_hash: None,
        }
    }

    fn stored_row(id: i32) -> entity::analysis_request::Model {
        entity::analysis_request::Model {
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
    async fn test_create_returns_row_with_assigned_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 7,
                rows_affected: 1,
            }])
            .append_query_results([vec![stored_row(7)]])
            .into_connection();

        let repo = AnalysisRequestRepository::new(db);
        let created = repo.create(sample_request()).await.unwrap();

        assert_eq!(created.id, 7);
        assert_eq!(created.email, "a@b.com");
        assert_eq!(created.investment_goals, "growth");
    }

    #[tokio::test]
    async fn test_find_by_id_missing_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::analysis_request::Model>::new()])
            .into_connection();

        let repo = AnalysisRequestRepository::new(db);
        let err = repo.find_by_id(42).await.unwrap_err();

        assert!(matches!(err, AppError::RequestNotFound));
    }

    #[tokio::test]
    async fn test_find_all_preserves_row_order() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored_row(1), stored_row(2), stored_row(3)]])
            .into_connection();

        let repo = AnalysisRequestRepository::new(db);
        let rows = repo.find_all().await.unwrap();

        let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_user_create_and_fetch() {
        let row = entity::user::Model {
            id: 3,
            username: "admin".to_string(),
            password: "hunter2".to_string(),
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 3,
                rows_affected: 1,
            }])
            .append_query_results([vec![row.clone()], vec![row]])
            .into_connection();

        let repo = UserRepository::new(db);

        let created = repo
            .create("admin".to_string(), "hunter2".to_string())
            .await
            .unwrap();
        assert_eq!(created.id, 3);

        let fetched = repo.find_by_id(3).await.unwrap();
        assert_eq!(fetched.map(|u| u.username), Some("admin".to_string()));
    }

    #[tokio::test]
    async fn test_user_lookup_by_username() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![entity::user::Model {
                id: 1,
                username: "admin".to_string(),
                password: "hunter2".to_string(),
            }]])
            .append_query_results([Vec::<entity::user::Model>::new()])
            .into_connection();

        let repo = UserRepository::new(db);

        let found = repo.find_by_username("admin").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(1));

        let missing = repo.find_by_username("nobody").await.unwrap();
        assert!(missing.is_none());
    }
}
