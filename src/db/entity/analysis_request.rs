use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "analysis_requests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: Option<String>,
    pub email: String,
    pub investment_goals: String,
    pub risk_appetite: String,
    pub timeframe: String,
    /// Holdings as submitted, an array of `{coin, quantity, avgBuyPrice}`.
    #[sea_orm(column_type = "JsonBinary")]
    pub holdings: Json,
    pub tx_hash: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
