//! Starter category set.

use chrono::{SubsecRound, Utc};
use sea_orm_migration::prelude::*;
use uuid::Uuid;

/// Categories present on a fresh install.
pub const SEED_CATEGORIES: [&str; 8] = [
    "Bricolage",
    "Ménage",
    "Cours particuliers",
    "Informatique",
    "Livraison",
    "Beauté",
    "Santé",
    "Déménagement",
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let now = Utc::now().trunc_subsecs(0);

        let mut insert = Query::insert();
        insert
            .into_table(Categories::Table)
            .columns([Categories::Id, Categories::Name, Categories::CreatedAt]);
        for name in SEED_CATEGORIES {
            insert
                .values([Uuid::new_v4().into(), name.into(), now.into()])
                .map_err(|e| DbErr::Migration(e.to_string()))?;
        }

        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let delete = Query::delete()
            .from_table(Categories::Table)
            .and_where(Expr::col(Categories::Name).is_in(SEED_CATEGORIES))
            .to_owned();

        manager.exec_stmt(delete).await
    }
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
    Name,
    CreatedAt,
}
