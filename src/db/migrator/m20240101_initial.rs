use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        // Parent table first so the domain tables can reference it.
        manager
            .create_table(
                schema
                    .create_table_from_entity(Locations)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Weathers)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Foods)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Movies)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Meetups)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Trails)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Trails).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Meetups).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Movies).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Foods).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Weathers).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Locations).if_exists().to_owned())
            .await?;
        Ok(())
    }
}
