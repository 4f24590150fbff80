// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! SQLite media cache tests, in memory and on disk

use anyhow::Result;
use std::fs;
use strength_capabilities::media_cache::{media_cache_key, MediaCache, SqliteMediaCache};
use tempfile::TempDir;

#[tokio::test]
async fn test_memory_cache_no_physical_files() -> Result<()> {
    let cache = SqliteMediaCache::new("sqlite::memory:").await?;

    for entry in fs::read_dir(std::env::current_dir()?)? {
        let filename = entry?.file_name();
        let filename = filename.to_string_lossy();
        assert!(
            !filename.starts_with("sqlite::memory:") && !filename.starts_with(":memory:"),
            "Found physical file for in-memory cache: {filename}"
        );
    }

    let key = media_cache_key("Bench Press");
    cache.put(&key, r#"{"imageUrl":"https://cdn.example/bench.png"}"#).await?;

    assert_eq!(
        cache.get(&key).await?.as_deref(),
        Some(r#"{"imageUrl":"https://cdn.example/bench.png"}"#)
    );
    assert_eq!(cache.count().await?, 1);

    Ok(())
}

#[tokio::test]
async fn test_put_replaces_existing_value() -> Result<()> {
    let cache = SqliteMediaCache::new("sqlite::memory:").await?;
    let key = media_cache_key("Squat");

    cache.put(&key, "v1").await?;
    cache.put(&key, "v2").await?;

    assert_eq!(cache.get(&key).await?.as_deref(), Some("v2"));
    assert_eq!(cache.count().await?, 1);

    assert!(cache.remove(&key).await?);
    assert!(!cache.remove(&key).await?);
    assert_eq!(cache.get(&key).await?, None);

    Ok(())
}

#[tokio::test]
async fn test_multiple_memory_caches_isolated() -> Result<()> {
    let first = SqliteMediaCache::new("sqlite::memory:").await?;
    let second = SqliteMediaCache::new("sqlite::memory:").await?;
    let key = media_cache_key("Deadlift");

    first.put(&key, "first").await?;

    assert_eq!(first.get(&key).await?.as_deref(), Some("first"));
    assert_eq!(second.get(&key).await?, None);

    Ok(())
}

#[tokio::test]
async fn test_file_cache_persists_and_creates_directories() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("nested").join("media.db");
    let url = format!("sqlite:{}", db_path.display());
    let key = media_cache_key("Pull-Up");

    {
        let cache = SqliteMediaCache::new(&url).await?;
        cache.put(&key, "https://cdn.example/pullup.mp4").await?;
    }

    assert!(db_path.exists());

    let reopened = SqliteMediaCache::new(&url).await?;
    assert_eq!(
        reopened.get(&key).await?.as_deref(),
        Some("https://cdn.example/pullup.mp4")
    );

    Ok(())
}
