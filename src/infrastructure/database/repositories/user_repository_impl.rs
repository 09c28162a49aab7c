use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use tokio::task;

use crate::domain::entities::User;
use crate::domain::repositories::UserRepository;
use crate::infrastructure::database::models::UserModel;
use crate::schema::users;
use crate::shared::database::Database;
use crate::shared::errors::AppResult;

pub struct UserRepositoryImpl {
    db: Arc<Database>,
}

impl UserRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let db = Arc::clone(&self.db);

        let model = task::spawn_blocking(move || -> AppResult<Option<UserModel>> {
            let mut conn = db.get_connection()?;
            let row = users::table
                .find(id)
                .first::<UserModel>(&mut conn)
                .optional()?;
            Ok(row)
        })
        .await??;

        Ok(model.map(User::from))
    }
}
