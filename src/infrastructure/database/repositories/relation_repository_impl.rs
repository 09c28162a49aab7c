use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use tokio::task;

use crate::domain::entities::{RelationPatch, RelationUpsert};
use crate::domain::repositories::RelationRepository;
use crate::infrastructure::database::models::{NewRelationModel, RelationModel};
use crate::schema::user_book_relations;
use crate::shared::database::Database;
use crate::shared::errors::{AppError, AppResult};

pub struct RelationRepositoryImpl {
    db: Arc<Database>,
}

impl RelationRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RelationRepository for RelationRepositoryImpl {
    async fn upsert(
        &self,
        user_id: i32,
        book_id: i32,
        patch: RelationPatch,
    ) -> AppResult<RelationUpsert> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<RelationUpsert> {
            let mut conn = db.get_connection()?;

            conn.transaction::<_, AppError, _>(|conn| {
                let existing: Option<RelationModel> = user_book_relations::table
                    .filter(user_book_relations::user_id.eq(user_id))
                    .filter(user_book_relations::book_id.eq(book_id))
                    .first(conn)
                    .optional()?;

                match existing {
                    Some(current) => {
                        let updated: RelationModel =
                            diesel::update(user_book_relations::table.find(current.id))
                                .set((
                                    user_book_relations::is_liked
                                        .eq(patch.is_liked.unwrap_or(current.is_liked)),
                                    user_book_relations::is_bookmarked
                                        .eq(patch.is_bookmarked.unwrap_or(current.is_bookmarked)),
                                    user_book_relations::rate.eq(patch.rate_after(current.rate)),
                                    user_book_relations::updated_at.eq(Utc::now()),
                                ))
                                .get_result(conn)?;

                        Ok(RelationUpsert {
                            relation: updated.into(),
                            previous_rate: current.rate,
                            created: false,
                        })
                    }
                    None => {
                        let inserted: RelationModel =
                            diesel::insert_into(user_book_relations::table)
                                .values(NewRelationModel {
                                    user_id,
                                    book_id,
                                    is_liked: patch.is_liked.unwrap_or(false),
                                    is_bookmarked: patch.is_bookmarked.unwrap_or(false),
                                    rate: patch.rate_after(None),
                                })
                                .get_result(conn)?;

                        Ok(RelationUpsert {
                            relation: inserted.into(),
                            previous_rate: None,
                            created: true,
                        })
                    }
                }
            })
        })
        .await?
    }

    async fn rates_for_book(&self, book_id: i32) -> AppResult<Vec<i16>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<Vec<i16>> {
            let mut conn = db.get_connection()?;
            let rates: Vec<Option<i16>> = user_book_relations::table
                .filter(user_book_relations::book_id.eq(book_id))
                .filter(user_book_relations::rate.is_not_null())
                .select(user_book_relations::rate)
                .load(&mut conn)?;
            Ok(rates.into_iter().flatten().collect())
        })
        .await?
    }
}
