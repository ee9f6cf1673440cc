//! Create `report` table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Report::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Report::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Report::Title).string_len(256).not_null())
                    .col(ColumnDef::new(Report::Description).text().not_null())
                    .col(ColumnDef::new(Report::Category).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Report::Priority)
                            .string_len(16)
                            .not_null()
                            .default("medium"),
                    )
                    .col(ColumnDef::new(Report::Area).string_len(128).not_null())
                    .col(ColumnDef::new(Report::Lga).string_len(128).not_null().default(""))
                    .col(ColumnDef::new(Report::State).string_len(64).not_null())
                    .col(ColumnDef::new(Report::Latitude).double())
                    .col(ColumnDef::new(Report::Longitude).double())
                    .col(ColumnDef::new(Report::Image).string_len(1024))
                    .col(
                        ColumnDef::new(Report::Status)
                            .string_len(32)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Report::Userid).string_len(128).not_null())
                    .col(ColumnDef::new(Report::AssignedTo).string_len(128))
                    .col(ColumnDef::new(Report::ResolutionNotes).text())
                    .col(ColumnDef::new(Report::EstimatedResolutionDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(Report::Votes).integer().not_null().default(0))
                    .col(ColumnDef::new(Report::IsUrgent).boolean().not_null().default(false))
                    .col(
                        ColumnDef::new(Report::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Report::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Single-column indexes for the common filters
        for (name, col) in [
            ("idx_report_status", Report::Status),
            ("idx_report_category", Report::Category),
            ("idx_report_state", Report::State),
            ("idx_report_lga", Report::Lga),
            ("idx_report_created_at", Report::CreatedAt),
            ("idx_report_userid", Report::Userid),
            ("idx_report_priority", Report::Priority),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Report::Table)
                        .col(col)
                        .to_owned(),
                )
                .await?;
        }

        // Compound indexes for the common filter combinations
        manager
            .create_index(
                Index::create()
                    .name("idx_report_category_status")
                    .table(Report::Table)
                    .col(Report::Category)
                    .col(Report::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_report_state_status")
                    .table(Report::Table)
                    .col(Report::State)
                    .col(Report::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_report_state_category")
                    .table(Report::Table)
                    .col(Report::State)
                    .col(Report::Category)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Report::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Report {
    Table,
    Id,
    Title,
    Description,
    Category,
    Priority,
    Area,
    Lga,
    State,
    Latitude,
    Longitude,
    Image,
    Status,
    Userid,
    AssignedTo,
    ResolutionNotes,
    EstimatedResolutionDate,
    Votes,
    IsUrgent,
    CreatedAt,
    UpdatedAt,
}
