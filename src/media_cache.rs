// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Approved Media Cache
//!
//! Opaque key-value storage for exercise media (images, videos) that an
//! external generation service produced and the athlete approved. Keys are
//! derived from the exercise name; values are stored verbatim.
//!
//! The analytics engines never read from this cache.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::collections::HashMap;
use std::str::FromStr;
use std::time::Instant;
use tokio::sync::RwLock;

use crate::constants::media::{KEY_PREFIX, TABLE_APPROVED_MEDIA};
use crate::errors::CapabilityResult;
use crate::intelligence::muscle_map::normalize_name;
use crate::logging::AppLogger;

/// Cache key for an exercise, e.g. `exercise-media:bench-press`
pub fn media_cache_key(exercise_name: &str) -> String {
    let normalized = normalize_name(exercise_name);
    let mut slug = String::with_capacity(normalized.len());
    for c in normalized.chars() {
        if c.is_alphanumeric() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    format!("{KEY_PREFIX}{slug}")
}

/// Storage for approved media values
#[async_trait]
pub trait MediaCache: Send + Sync {
    async fn get(&self, key: &str) -> CapabilityResult<Option<String>>;

    /// Insert or replace
    async fn put(&self, key: &str, value: &str) -> CapabilityResult<()>;

    /// Returns whether an entry was removed
    async fn remove(&self, key: &str) -> CapabilityResult<bool>;
}

/// Process-local cache, mainly for tests and one-shot tools
#[derive(Debug, Default)]
pub struct InMemoryMediaCache {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryMediaCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MediaCache for InMemoryMediaCache {
    async fn get(&self, key: &str) -> CapabilityResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> CapabilityResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> CapabilityResult<bool> {
        Ok(self.entries.write().await.remove(key).is_some())
    }
}

/// SQLite-backed cache
#[derive(Clone)]
pub struct SqliteMediaCache {
    pool: SqlitePool,
}

impl SqliteMediaCache {
    /// Connect, creating the database file if needed, and run migrations
    pub async fn new(database_url: &str) -> CapabilityResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let in_memory = database_url.contains(":memory:");

        if !in_memory {
            if let Some(parent) = options.get_filename().parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
        }

        // Each in-memory connection would otherwise see its own empty database
        let max_connections = if in_memory { 1 } else { 5 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let cache = Self { pool };
        cache.migrate().await?;
        Ok(cache)
    }

    pub async fn migrate(&self) -> CapabilityResult<()> {
        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {TABLE_APPROVED_MEDIA} (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#
        ))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Number of cached entries
    pub async fn count(&self) -> CapabilityResult<i64> {
        let row = sqlx::query(&format!("SELECT COUNT(*) AS count FROM {TABLE_APPROVED_MEDIA}"))
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("count")?)
    }
}

#[async_trait]
impl MediaCache for SqliteMediaCache {
    async fn get(&self, key: &str) -> CapabilityResult<Option<String>> {
        let started = Instant::now();
        let row = sqlx::query(&format!("SELECT value FROM {TABLE_APPROVED_MEDIA} WHERE key = ?1"))
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        let value = row.map(|row| row.try_get::<String, _>("value")).transpose()?;
        AppLogger::log_media_cache_operation("get", key, value.is_some(), started.elapsed().as_millis() as u64);
        Ok(value)
    }

    async fn put(&self, key: &str, value: &str) -> CapabilityResult<()> {
        let started = Instant::now();
        sqlx::query(&format!(
            r#"
            INSERT INTO {TABLE_APPROVED_MEDIA} (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#
        ))
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        AppLogger::log_media_cache_operation("put", key, true, started.elapsed().as_millis() as u64);
        Ok(())
    }

    async fn remove(&self, key: &str) -> CapabilityResult<bool> {
        let started = Instant::now();
        let result = sqlx::query(&format!("DELETE FROM {TABLE_APPROVED_MEDIA} WHERE key = ?1"))
            .bind(key)
            .execute(&self.pool)
            .await?;

        let removed = result.rows_affected() > 0;
        AppLogger::log_media_cache_operation("remove", key, removed, started.elapsed().as_millis() as u64);
        Ok(removed)
    }
}
