use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QuerySelect,
};

use crate::{
    entity,
    error::UserResult,
    models::{NewUser, User},
    repository::UserRepository,
};

/// Sequence backing the `users.user_id` BIGSERIAL column
const USER_ID_SEQUENCE: &str = "users_user_id_seq";

/// Statement moving the id sequence forward to at least `id`, never backwards.
fn advance_id_sequence_sql(id: i64) -> String {
    format!(
        "SELECT setval('{seq}', GREATEST(last_value, {id})) FROM {seq}",
        seq = USER_ID_SEQUENCE,
        id = id
    )
}

/// PostgreSQL implementation of UserRepository using SeaORM
#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: i64) -> UserResult<Option<User>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(|m| m.into()))
    }

    async fn find_by_name(&self, name: &str) -> UserResult<Option<User>> {
        // Two rows are enough to tell "exactly one" from "ambiguous"
        let mut models = entity::Entity::find()
            .filter(entity::Column::Name.eq(name))
            .limit(2)
            .all(&self.db)
            .await?;

        if models.len() != 1 {
            if !models.is_empty() {
                tracing::debug!(name, "Ambiguous user name lookup");
            }
            return Ok(None);
        }

        Ok(models.pop().map(|m| m.into()))
    }

    async fn save(&self, user: User) -> UserResult<User> {
        let user_id = user.id;
        let active_model: entity::ActiveModel = user.into();

        let model = entity::Entity::insert(active_model)
            .on_conflict(
                OnConflict::column(entity::Column::Id)
                    .update_columns([entity::Column::Name, entity::Column::Passwd])
                    .to_owned(),
            )
            .exec_with_returning(&self.db)
            .await?;

        // An explicit id bypasses nextval; keep `create` from reusing it
        self.db
            .execute_unprepared(&advance_id_sequence_sql(model.id))
            .await?;

        tracing::info!(user_id, "Saved user");
        Ok(model.into())
    }

    async fn create(&self, input: NewUser) -> UserResult<User> {
        let active_model: entity::ActiveModel = input.into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(user_id = model.id, "Created user");
        Ok(model.into())
    }
}
