//! Persistence of posts and their comments.
//!
//! Localized fields are stored verbatim as JSON objects, so every locale
//! survives a save no matter which one is active. Every load hydrates with the
//! default locale and then runs the registered post-load listeners.

use crate::listener::PostLoadListener;
use crate::locale::{LocalizedField, DEFAULT_LOCALE};
use crate::request::RequestContext;
use crate::types::{Comment, Entity, Post};
use anyhow::{Context, Result};
use sqlx::{any::AnyRow, Any, Pool, Row};
use std::sync::Arc;
use time::OffsetDateTime;
use uuid::Uuid;

const POST_COLUMNS: &str = "id, title, slug, summary, content, author_email, published_at";

#[derive(Clone)]
pub struct PostRepository {
    pool: Pool<Any>,
    listeners: Vec<Arc<dyn PostLoadListener>>,
}

impl std::fmt::Debug for PostRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostRepository")
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl PostRepository {
    pub fn new(pool: Pool<Any>) -> Self {
        Self {
            pool,
            listeners: Vec::new(),
        }
    }

    /// Register a listener fired for every entity this repository loads.
    pub fn with_listener(mut self, listener: impl PostLoadListener + 'static) -> Self {
        self.listeners.push(Arc::new(listener));
        self
    }

    /// Insert or update the post and replace its comments.
    ///
    /// Comments no longer attached to the post are deleted. A comment moved
    /// here from another post is re-parented.
    pub async fn save(&self, post: &Post) -> Result<()> {
        let post_id = post.id.to_string();
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")?;

        sqlx::query(
            r#"
            insert into posts (id, title, slug, summary, content, author_email, published_at)
            values ($1, $2, $3, $4, $5, $6, $7)
            on conflict (id) do update set
                title = excluded.title,
                slug = excluded.slug,
                summary = excluded.summary,
                content = excluded.content,
                author_email = excluded.author_email,
                published_at = excluded.published_at
            "#,
        )
        .bind(&post_id)
        .bind(encode_localized(&post.title)?)
        .bind(&post.slug)
        .bind(encode_localized(&post.summary)?)
        .bind(encode_localized(&post.content)?)
        .bind(&post.author_email)
        .bind(encode_timestamp(post.published_at)?)
        .execute(&mut *tx)
        .await
        .context("Failed to save post")?;

        sqlx::query("delete from comments where post_id = $1")
            .bind(&post_id)
            .execute(&mut *tx)
            .await
            .context("Failed to clear comments")?;

        for comment in &post.comments {
            sqlx::query(
                r#"
                insert into comments (id, post_id, content, author_email, published_at)
                values ($1, $2, $3, $4, $5)
                on conflict (id) do update set
                    post_id = excluded.post_id,
                    content = excluded.content,
                    author_email = excluded.author_email,
                    published_at = excluded.published_at
                "#,
            )
            .bind(comment.id.to_string())
            .bind(&post_id)
            .bind(&comment.content)
            .bind(&comment.author_email)
            .bind(encode_timestamp(comment.published_at)?)
            .execute(&mut *tx)
            .await
            .context("Failed to save comment")?;
        }

        tx.commit().await.context("Failed to commit post")?;

        tracing::debug!(
            "posts.save: id={} locales={} comments={}",
            post.id,
            post.title.len(),
            post.comments.len()
        );
        Ok(())
    }

    pub async fn find(&self, id: Uuid, request: &dyn RequestContext) -> Result<Option<Post>> {
        let sql = format!("select {POST_COLUMNS} from posts where id = $1");
        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .context("Failed to load post")?;

        match row {
            Some(row) => {
                let post = post_from_row(&row)?;
                Ok(Some(self.finish_load(post, request).await?))
            }
            None => Ok(None),
        }
    }

    pub async fn find_by_slug(
        &self,
        slug: &str,
        request: &dyn RequestContext,
    ) -> Result<Option<Post>> {
        let sql = format!(
            "select {POST_COLUMNS} from posts where slug = $1 order by published_at desc limit 1"
        );
        let row = sqlx::query(&sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to load post by slug")?;

        match row {
            Some(row) => {
                let post = post_from_row(&row)?;
                Ok(Some(self.finish_load(post, request).await?))
            }
            None => Ok(None),
        }
    }

    /// Already-published posts, newest first, at most [`Post::NUM_ITEMS`].
    pub async fn find_latest(&self, request: &dyn RequestContext) -> Result<Vec<Post>> {
        let sql = format!(
            "select {POST_COLUMNS} from posts where published_at <= $1 order by published_at desc limit $2"
        );
        let rows = sqlx::query(&sql)
            .bind(encode_timestamp(OffsetDateTime::now_utc())?)
            .bind(Post::NUM_ITEMS as i64)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list latest posts")?;

        let posts = rows
            .iter()
            .map(post_from_row)
            .collect::<Result<Vec<_>>>()?;

        let mut loaded = Vec::with_capacity(posts.len());
        for post in posts {
            loaded.push(self.finish_load(post, request).await?);
        }
        Ok(loaded)
    }

    /// Delete the post and its comments. Returns whether a post was removed.
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let post_id = id.to_string();
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")?;

        sqlx::query("delete from comments where post_id = $1")
            .bind(&post_id)
            .execute(&mut *tx)
            .await
            .context("Failed to delete comments")?;

        let result = sqlx::query("delete from posts where id = $1")
            .bind(&post_id)
            .execute(&mut *tx)
            .await
            .context("Failed to delete post")?;

        tx.commit().await.context("Failed to commit delete")?;

        let removed = result.rows_affected() > 0;
        tracing::debug!("posts.delete: id={} removed={}", id, removed);
        Ok(removed)
    }

    async fn finish_load(&self, mut post: Post, request: &dyn RequestContext) -> Result<Post> {
        post.comments = self.load_comments(post.id).await?;

        for comment in post.comments.iter_mut() {
            self.fire_post_load(comment, request);
        }
        self.fire_post_load(&mut post, request);

        tracing::debug!(
            "posts.load: id={} locale={} comments={}",
            post.id,
            post.locale,
            post.comments.len()
        );
        Ok(post)
    }

    async fn load_comments(&self, post_id: Uuid) -> Result<Vec<Comment>> {
        let rows = sqlx::query(
            r#"
            select id, post_id, content, author_email, published_at
            from comments
            where post_id = $1
            order by published_at desc
            "#,
        )
        .bind(post_id.to_string())
        .fetch_all(&self.pool)
        .await
        .context("Failed to load comments")?;

        rows.iter().map(comment_from_row).collect()
    }

    fn fire_post_load(&self, entity: &mut dyn Entity, request: &dyn RequestContext) {
        for listener in &self.listeners {
            listener.post_load(entity, request);
        }
    }
}

fn post_from_row(row: &AnyRow) -> Result<Post> {
    Ok(Post {
        id: decode_uuid(row.try_get("id")?)?,
        title: decode_localized(row, "title")?,
        slug: row.try_get("slug")?,
        summary: decode_localized(row, "summary")?,
        content: decode_localized(row, "content")?,
        author_email: row.try_get("author_email")?,
        published_at: decode_timestamp(row.try_get("published_at")?)?,
        comments: Vec::new(),
        locale: DEFAULT_LOCALE.to_string(),
    })
}

fn comment_from_row(row: &AnyRow) -> Result<Comment> {
    Ok(Comment {
        id: decode_uuid(row.try_get("id")?)?,
        post_id: decode_uuid(row.try_get("post_id")?)?,
        content: row.try_get("content")?,
        author_email: row.try_get("author_email")?,
        published_at: decode_timestamp(row.try_get("published_at")?)?,
    })
}

fn decode_uuid(raw: String) -> Result<Uuid> {
    Uuid::parse_str(&raw).with_context(|| format!("invalid id in database: {raw}"))
}

fn encode_localized(field: &LocalizedField) -> Result<String> {
    serde_json::to_string(field).context("Failed to encode localized field")
}

fn decode_localized(row: &AnyRow, column: &str) -> Result<LocalizedField> {
    let raw: String = row.try_get(column)?;
    serde_json::from_str(&raw).with_context(|| format!("invalid localized value in posts.{column}"))
}

fn encode_timestamp(at: OffsetDateTime) -> Result<i64> {
    i64::try_from(at.unix_timestamp_nanos()).context("timestamp out of range")
}

fn decode_timestamp(nanos: i64) -> Result<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(nanos)).context("invalid timestamp in database")
}
