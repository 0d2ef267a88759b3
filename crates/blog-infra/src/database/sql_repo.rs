//! SeaORM repository over the `posts` table (SQLite or PostgreSQL).

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveValue::Set, ColumnTrait, DbConn, DbErr, EntityTrait, QueryFilter, QueryOrder};

use blog_core::domain::{Post, PostDraft, PostId};
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};

/// Relational post repository.
pub struct SqlPostRepository {
    db: DbConn,
}

impl SqlPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

fn map_db_err(err: DbErr) -> RepoError {
    match err {
        DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
        DbErr::Conn(e) => RepoError::Connection(e.to_string()),
        other => RepoError::Query(other.to_string()),
    }
}

/// Ids outside the column's range can never match a row.
fn row_id(id: PostId) -> Option<i32> {
    i32::try_from(id).ok()
}

#[async_trait]
impl PostRepository for SqlPostRepository {
    async fn list_newest_first(&self) -> Result<Vec<Post>, RepoError> {
        let rows = PostEntity::find()
            .order_by_desc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        let Some(row_id) = row_id(id) else {
            return Ok(None);
        };

        let row = PostEntity::find_by_id(row_id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(row.map(Into::into))
    }

    async fn insert(&self, draft: PostDraft) -> Result<Post, RepoError> {
        let (title, content) = draft.into_parts();
        let now = Utc::now();

        let row = post::ActiveModel {
            title: Set(title),
            content: Set(content),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let inserted = PostEntity::insert(row)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        // Read back so generated columns come from the database, not from us.
        self.find_by_id(i64::from(inserted.last_insert_id))
            .await?
            .ok_or_else(|| RepoError::Query("Inserted post could not be read back".to_string()))
    }

    async fn update(&self, id: PostId, draft: PostDraft) -> Result<Post, RepoError> {
        let row_id = row_id(id).ok_or(RepoError::NotFound)?;
        let (title, content) = draft.into_parts();

        let result = PostEntity::update_many()
            .col_expr(post::Column::Title, Expr::value(title))
            .col_expr(post::Column::Content, Expr::value(content))
            .col_expr(post::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(post::Column::Id.eq(row_id))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        // A concurrent delete between the two statements reads as not found.
        self.find_by_id(id).await?.ok_or(RepoError::NotFound)
    }

    async fn delete(&self, id: PostId) -> Result<(), RepoError> {
        let row_id = row_id(id).ok_or(RepoError::NotFound)?;

        let result = PostEntity::delete_by_id(row_id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
