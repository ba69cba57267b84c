use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Documents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Documents::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Documents::Kind).string().not_null())
                    .col(ColumnDef::new(Documents::Username).string().not_null())
                    .col(ColumnDef::new(Documents::Message).text().null())
                    .col(ColumnDef::new(Documents::Latitude).double().null())
                    .col(ColumnDef::new(Documents::Longitude).double().null())
                    .col(ColumnDef::new(Documents::Url).string().null())
                    .col(ColumnDef::new(Documents::Password).string().null())
                    .col(ColumnDef::new(Documents::Age).integer().null())
                    .col(ColumnDef::new(Documents::Gender).string().null())
                    .col(
                        ColumnDef::new(Documents::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Login lookups
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_documents_kind_username")
                    .table(Documents::Table)
                    .col(Documents::Kind)
                    .col(Documents::Username)
                    .to_owned(),
            )
            .await?;

        // Narrows the haversine scan in geo queries
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_documents_lat_lon")
                    .table(Documents::Table)
                    .col(Documents::Latitude)
                    .col(Documents::Longitude)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Documents::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Documents {
    Table,
    Id,
    Kind,
    Username,
    Message,
    Latitude,
    Longitude,
    Url,
    Password,
    Age,
    Gender,
    CreatedAt,
}
