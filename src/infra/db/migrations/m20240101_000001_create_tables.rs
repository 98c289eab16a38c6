//! Migration: Create users, tweets, and subscriptions tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Nickname)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::DisplayName).string().not_null())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tweets::Table)
                    .col(
                        ColumnDef::new(Tweets::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tweets::AuthorId).integer().not_null())
                    .col(
                        ColumnDef::new(Tweets::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Tweets::Text).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tweets_author")
                            .from(Tweets::Table, Tweets::AuthorId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Feed pages filter by author and id; cover both.
        manager
            .create_index(
                Index::create()
                    .name("idx_tweets_author_id")
                    .table(Tweets::Table)
                    .col(Tweets::AuthorId)
                    .col(Tweets::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Subscriptions::Table)
                    .col(
                        ColumnDef::new(Subscriptions::FollowerId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Subscriptions::FolloweeId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .name("pk_subscriptions")
                            .col(Subscriptions::FollowerId)
                            .col(Subscriptions::FolloweeId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subscriptions_follower")
                            .from(Subscriptions::Table, Subscriptions::FollowerId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subscriptions_followee")
                            .from(Subscriptions::Table, Subscriptions::FolloweeId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Subscribers view scans by followee.
        manager
            .create_index(
                Index::create()
                    .name("idx_subscriptions_followee")
                    .table(Subscriptions::Table)
                    .col(Subscriptions::FolloweeId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Subscriptions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tweets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Nickname,
    DisplayName,
    PasswordHash,
}

#[derive(Iden)]
enum Tweets {
    Table,
    Id,
    AuthorId,
    CreatedAt,
    Text,
}

#[derive(Iden)]
enum Subscriptions {
    Table,
    FollowerId,
    FolloweeId,
}
