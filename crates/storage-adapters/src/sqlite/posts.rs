use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domains::{
    AuthorSummary, DomainError, NewPost, PageWindow, Post, PostId, PostRepository, PostSummary,
    Result, UserId,
};
use sqlx::sqlite::SqlitePool;
use uuid::Uuid;

use super::{now, storage_error, timestamp};

pub struct SqlitePostRepository {
    pool: SqlitePool,
}

impl SqlitePostRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// A post joined with its author.
#[derive(sqlx::FromRow)]
struct PostSummaryRow {
    id: Uuid,
    content: String,
    created_at: DateTime<Utc>,
    author_id: Uuid,
    author_username: String,
    author_email: String,
}

impl PostSummaryRow {
    fn into_summary(self) -> PostSummary {
        PostSummary {
            id: PostId(self.id),
            content: self.content,
            created_at: self.created_at,
            author: AuthorSummary {
                id: UserId(self.author_id),
                username: self.author_username,
                email: self.author_email,
            },
        }
    }
}

#[async_trait]
impl PostRepository for SqlitePostRepository {
    #[tracing::instrument(skip_all, fields(author = %post.user_id))]
    async fn create(&self, post: NewPost) -> Result<Post> {
        let id = PostId::new();
        let created_at = now();

        sqlx::query("INSERT INTO posts (id, content, user_id, created_at) VALUES (?, ?, ?, ?)")
            .bind(id.as_uuid())
            .bind(&post.content)
            .bind(post.user_id.as_uuid())
            .bind(timestamp(created_at))
            .execute(&self.pool)
            .await
            .map_err(|err| match err {
                sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                    DomainError::not_found("User", post.user_id)
                }
                other => storage_error(other),
            })?;

        Ok(Post {
            id,
            content: post.content,
            user_id: post.user_id,
            created_at,
        })
    }

    /// Newest first; equal timestamps fall back to the later insert first.
    #[tracing::instrument(skip(self))]
    async fn list_with_authors(&self, window: PageWindow) -> Result<Vec<PostSummary>> {
        // Values past i64::MAX are past any real table anyway.
        let offset = i64::try_from(window.offset).unwrap_or(i64::MAX);
        let limit = i64::try_from(window.limit).unwrap_or(i64::MAX);

        let rows = sqlx::query_as::<_, PostSummaryRow>(
            "SELECT p.id, p.content, p.created_at,
                    u.id AS author_id, u.username AS author_username, u.email AS author_email
             FROM posts p
             JOIN users u ON u.id = p.user_id
             ORDER BY p.created_at DESC, p.rowid DESC
             LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(rows.into_iter().map(PostSummaryRow::into_summary).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn count(&self) -> Result<u64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(u64::try_from(total).unwrap_or_default())
    }
}
