use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ========== OUTAGES ==========
        manager
            .create_table(
                Table::create()
                    .table(Outages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Outages::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Outages::StartTime).text().not_null())
                    .col(ColumnDef::new(Outages::EndTime).text())
                    .col(ColumnDef::new(Outages::Date).text().not_null())
                    .col(ColumnDef::new(Outages::Status).text().not_null())
                    .col(ColumnDef::new(Outages::VoltageBefore).double().not_null())
                    .col(ColumnDef::new(Outages::VoltageAfter).double())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_outages_date")
                    .table(Outages::Table)
                    .col(Outages::Date)
                    .to_owned(),
            )
            .await?;

        // ========== MEASUREMENTS ==========
        manager
            .create_table(
                Table::create()
                    .table(Measurements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Measurements::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Measurements::Timestamp).text().not_null())
                    .col(ColumnDef::new(Measurements::Voltage).double().not_null())
                    .col(ColumnDef::new(Measurements::Current).double().not_null())
                    .col(ColumnDef::new(Measurements::Power).double().not_null())
                    .col(ColumnDef::new(Measurements::Energy).double().not_null())
                    .col(ColumnDef::new(Measurements::Pf).double().not_null())
                    .to_owned(),
            )
            .await?;

        // Trailing-window queries filter on timestamp
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_measurements_timestamp")
                    .table(Measurements::Table)
                    .col(Measurements::Timestamp)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Measurements::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Outages::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Outages {
    Table,
    Id,
    StartTime,
    EndTime,
    Date,
    Status,
    VoltageBefore,
    VoltageAfter,
}

#[derive(DeriveIden)]
pub enum Measurements {
    Table,
    Id,
    Timestamp,
    Voltage,
    Current,
    Power,
    Energy,
    Pf,
}
