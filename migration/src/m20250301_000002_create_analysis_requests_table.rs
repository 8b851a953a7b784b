use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AnalysisRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AnalysisRequests::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AnalysisRequests::Name).string().null())
                    .col(ColumnDef::new(AnalysisRequests::Email).string().not_null())
                    .col(ColumnDef::new(AnalysisRequests::InvestmentGoals).string().not_null())
                    .col(ColumnDef::new(AnalysisRequests::RiskAppetite).string().not_null())
                    .col(ColumnDef::new(AnalysisRequests::Timeframe).string().not_null())
                    .col(ColumnDef::new(AnalysisRequests::Holdings).json_binary().not_null())
                    .col(ColumnDef::new(AnalysisRequests::TxHash).string().null())
                    .col(
                        ColumnDef::new(AnalysisRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .extra("DEFAULT NOW()".to_string()),
                    )
                    .to_owned(),
            )
            .await?;

        // Queue reports filter on submission time.
        manager
            .create_index(
                Index::create()
                    .name("idx_analysis_requests_created_at")
                    .table(AnalysisRequests::Table)
                    .col(AnalysisRequests::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AnalysisRequests::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AnalysisRequests {
    Table,
    Id,
    Name,
    Email,
    InvestmentGoals,
    RiskAppetite,
    Timeframe,
    Holdings,
    TxHash,
    CreatedAt,
}
