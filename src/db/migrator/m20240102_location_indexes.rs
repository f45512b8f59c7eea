use crate::domain::Domain;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    // Every domain table is read and evicted by `location_id`.
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in Domain::ALL.map(Domain::table) {
            manager
                .create_index(
                    Index::create()
                        .name(format!("idx_{table}_location_id"))
                        .table(Alias::new(table))
                        .col(LocationRef::LocationId)
                        .if_not_exists()
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in Domain::ALL.map(Domain::table) {
            manager
                .drop_index(
                    Index::drop()
                        .name(format!("idx_{table}_location_id"))
                        .table(Alias::new(table))
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }
}

#[derive(DeriveIden)]
enum LocationRef {
    LocationId,
}
