//! Repository for the `prompts` archive.
//!
//! Every read and delete is scoped by owner; there is no unscoped lookup.

use promptsmith_core::types::{DbId, UserId};
use sqlx::{PgExecutor, PgPool};

use crate::models::prompt::{CreatePrompt, PromptRecord};

/// Column list for `prompts` queries.
const COLUMNS: &str = "id, user_id, platform, subject, subject_details, style, artist, \
    composition, aspect_ratio, mood, quality, lighting, camera, creativity_level, \
    negative_prompt, advanced_mode, generated_prompt, created_at";

/// Archive of generated prompts.
pub struct PromptRepo;

impl PromptRepo {
    /// Insert a prompt snapshot. Returns the created row.
    pub async fn create<'e, E>(
        executor: E,
        input: &CreatePrompt<'_>,
    ) -> Result<PromptRecord, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let config = input.config;
        let query = format!(
            "INSERT INTO prompts \
                (user_id, platform, subject, subject_details, style, artist, composition, \
                 aspect_ratio, mood, quality, lighting, camera, creativity_level, \
                 negative_prompt, advanced_mode, generated_prompt) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PromptRecord>(&query)
            .bind(input.user_id)
            .bind(config.platform.id())
            .bind(&config.subject)
            .bind(&config.custom_details)
            .bind(&config.style)
            .bind(&config.artist)
            .bind(&config.composition)
            .bind(&config.aspect_ratio)
            .bind(&config.mood)
            .bind(&config.quality)
            .bind(&config.lighting)
            .bind(&config.camera)
            .bind(i16::from(config.creativity))
            .bind(&config.negative_prompt)
            .bind(config.advanced_mode)
            .bind(input.generated_prompt)
            .fetch_one(executor)
            .await
    }

    /// A user's archive, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: UserId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PromptRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM prompts \
             WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, PromptRecord>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Find one of the user's prompts. Other users' prompts are not found.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: UserId,
    ) -> Result<Option<PromptRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM prompts WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, PromptRecord>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete one of the user's prompts. Returns `true` if a row was deleted;
    /// `false` when it does not exist or belongs to someone else.
    pub async fn delete_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: UserId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM prompts WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of prompts archived by a user.
    pub async fn count_for_user(pool: &PgPool, user_id: UserId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM prompts WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
    }
}
