//! PostgreSQL content index.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ColumnTrait, ConnectionTrait, DbConn, EntityTrait, QueryFilter};
use uuid::Uuid;

use around_core::domain::{EARTH_RADIUS_KM, Location, Post, User};
use around_core::error::RepoError;
use around_core::ports::ContentIndex;

use super::entity::document::{self, ActiveModel, Entity as DocumentEntity, KIND_POST, KIND_USER};

/// Haversine distance from the bound point `($1, $2)` compared against the
/// bound radius `$3`. `LEAST` guards `ASIN` from rounding past 1.
fn within_radius_sql() -> String {
    format!(
        "{EARTH_RADIUS_KM} * 2 * ASIN(LEAST(1.0, SQRT(\
            POWER(SIN(RADIANS(latitude - $1) / 2), 2) \
            + COS(RADIANS($1)) * COS(RADIANS(latitude)) \
            * POWER(SIN(RADIANS(longitude - $2) / 2), 2)\
        ))) <= $3"
    )
}

/// Content index over the `documents` table.
///
/// Every statement runs on its own autocommit connection, so a write is
/// visible to the next query as soon as it returns.
pub struct PostgresContentIndex {
    pub(crate) db: DbConn,
}

impl PostgresContentIndex {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ContentIndex for PostgresContentIndex {
    async fn index_post(&self, id: Uuid, post: Post) -> Result<(), RepoError> {
        let model = ActiveModel::from_post(id, post);

        DocumentEntity::insert(model)
            .on_conflict(
                OnConflict::column(document::Column::Id)
                    .update_columns([
                        document::Column::Username,
                        document::Column::Message,
                        document::Column::Latitude,
                        document::Column::Longitude,
                        document::Column::Url,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        tracing::debug!(post_id = %id, "Post indexed");
        Ok(())
    }

    async fn geo_search(&self, center: Location, radius_km: f64) -> Result<Vec<Post>, RepoError> {
        let within = Expr::cust_with_values(
            within_radius_sql(),
            [center.latitude, center.longitude, radius_km],
        );

        let rows = DocumentEntity::find()
            .filter(document::Column::Kind.eq(KIND_POST))
            .filter(within)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        rows.into_iter().map(Post::try_from).collect()
    }

    async fn find_user_by_name(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(%username, "Finding user by username");

        let row = DocumentEntity::find()
            .filter(document::Column::Kind.eq(KIND_USER))
            .filter(document::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        row.map(User::try_from).transpose()
    }

    async fn create_user_if_absent(&self, user: User) -> Result<bool, RepoError> {
        // ON CONFLICT DO NOTHING makes the existence check and the write one statement.
        let inserted = DocumentEntity::insert(ActiveModel::from_user(user))
            .on_conflict(
                OnConflict::column(document::Column::Id)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(inserted == 1)
    }

    async fn ping(&self) -> Result<(), RepoError> {
        self.db
            .execute_unprepared("SELECT 1")
            .await
            .map(|_| ())
            .map_err(|e| RepoError::Connection(e.to_string()))
    }
}
