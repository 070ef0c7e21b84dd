//! SQLite tweet store
//!
//! One connection behind a mutex; every query runs on the blocking pool.
//! Tweets are unique per `(tweet_id, keyword)` and re-fetching replaces the
//! stored row.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OpenFlags, Row};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::error::{StorageError, StorageResult};
use super::types::{Engagement, KeywordStats, TweetRecord};
use crate::sentiment::{SentimentLabel, SentimentScore, SentimentSummary};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS tweets (
        tweet_id TEXT NOT NULL,
        keyword TEXT NOT NULL,
        text TEXT NOT NULL,
        created_at TEXT NOT NULL,
        fetched_at TEXT NOT NULL,
        label TEXT NOT NULL,
        compound REAL NOT NULL,
        pos REAL NOT NULL,
        neg REAL NOT NULL,
        neu REAL NOT NULL,
        likes INTEGER NOT NULL DEFAULT 0,
        retweets INTEGER NOT NULL DEFAULT 0,
        replies INTEGER NOT NULL DEFAULT 0,
        PRIMARY KEY (tweet_id, keyword)
    );

    CREATE INDEX IF NOT EXISTS idx_tweets_keyword_created
        ON tweets(keyword, created_at DESC);

    CREATE TABLE IF NOT EXISTS keywords (
        keyword TEXT PRIMARY KEY,
        last_updated TEXT NOT NULL,
        total_tweets INTEGER NOT NULL,
        positive INTEGER NOT NULL,
        negative INTEGER NOT NULL,
        neutral INTEGER NOT NULL
    );
";

/// Persistent store for scored tweets and keyword statistics
#[derive(Clone)]
pub struct TweetStore {
    conn: Arc<Mutex<Connection>>,
    path: Option<PathBuf>,
}

impl TweetStore {
    /// Open or create the database at `path`
    pub fn open(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            ",
        )?;

        Self::init(conn, Some(path.to_path_buf()))
    }

    /// Open a private in-memory database
    pub fn in_memory() -> StorageResult<Self> {
        Self::init(Connection::open_in_memory()?, None)
    }

    fn init(conn: Connection, path: Option<PathBuf>) -> StorageResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            path,
        })
    }

    /// Database file, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Run `f` against the connection on the blocking pool
    async fn with_conn<F, T>(&self, f: F) -> StorageResult<T>
    where
        F: FnOnce(&mut Connection) -> StorageResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|e| StorageError::Lock(e.to_string()))?;
            f(&mut *guard)
        })
        .await?
    }

    /// Insert or replace tweets. Returns the number of rows written.
    pub async fn insert_tweets(&self, tweets: Vec<TweetRecord>) -> StorageResult<usize> {
        if tweets.is_empty() {
            return Ok(0);
        }

        self.with_conn(move |conn| {
            let tx = conn.transaction()?;
            let mut written = 0;
            {
                let mut stmt = tx.prepare_cached(
                    "INSERT OR REPLACE INTO tweets (
                        tweet_id, keyword, text, created_at, fetched_at,
                        label, compound, pos, neg, neu, likes, retweets, replies
                     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                )?;

                for tweet in &tweets {
                    written += stmt.execute(params![
                        tweet.tweet_id,
                        tweet.keyword,
                        tweet.text,
                        format_time(&tweet.created_at),
                        format_time(&tweet.fetched_at),
                        tweet.sentiment.label.as_str(),
                        tweet.sentiment.compound,
                        tweet.sentiment.positive,
                        tweet.sentiment.negative,
                        tweet.sentiment.neutral,
                        tweet.engagement.likes as i64,
                        tweet.engagement.retweets as i64,
                        tweet.engagement.replies as i64,
                    ])?;
                }
            }
            tx.commit()?;
            Ok(written)
        })
        .await
    }

    /// Record the latest search summary for a keyword
    pub async fn upsert_keyword_stats(
        &self,
        keyword: &str,
        total_tweets: u32,
        summary: SentimentSummary,
    ) -> StorageResult<()> {
        let keyword = keyword.to_string();
        let now = format_time(&Utc::now());

        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO keywords (keyword, last_updated, total_tweets, positive, negative, neutral)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 ON CONFLICT(keyword) DO UPDATE SET
                    last_updated = excluded.last_updated,
                    total_tweets = excluded.total_tweets,
                    positive = excluded.positive,
                    negative = excluded.negative,
                    neutral = excluded.neutral",
                params![
                    keyword,
                    now,
                    total_tweets,
                    summary.positive,
                    summary.negative,
                    summary.neutral
                ],
            )?;
            Ok(())
        })
        .await
    }

    /// Most recent stored tweets for a keyword, newest first
    pub async fn recent_tweets(&self, keyword: &str, limit: usize) -> StorageResult<Vec<TweetRecord>> {
        let keyword = keyword.to_string();

        self.with_conn(move |conn| {
            let mut stmt = conn.prepare_cached(
                "SELECT tweet_id, keyword, text, created_at, fetched_at,
                        label, compound, pos, neg, neu, likes, retweets, replies
                 FROM tweets
                 WHERE keyword = ?1
                 ORDER BY created_at DESC
                 LIMIT ?2",
            )?;

            let rows = stmt
                .query_map(params![keyword, limit as i64], TweetRow::from_row)?
                .collect::<Result<Vec<_>, _>>()?;

            rows.into_iter().map(TweetRow::into_record).collect()
        })
        .await
    }

    /// All tracked keywords, most recently searched first
    pub async fn list_keywords(&self) -> StorageResult<Vec<KeywordStats>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare_cached(
                "SELECT keyword, last_updated, total_tweets, positive, negative, neutral
                 FROM keywords
                 ORDER BY last_updated DESC",
            )?;

            let rows = stmt
                .query_map([], |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, u32>(2)?,
                        SentimentSummary {
                            positive: row.get(3)?,
                            negative: row.get(4)?,
                            neutral: row.get(5)?,
                        },
                    ))
                })?
                .collect::<Result<Vec<_>, _>>()?;

            rows.into_iter()
                .map(|(keyword, last_updated, total_tweets, sentiment_summary)| {
                    Ok(KeywordStats {
                        keyword,
                        last_updated: parse_time(&last_updated)?,
                        total_tweets,
                        sentiment_summary,
                    })
                })
                .collect()
        })
        .await
    }

    /// Total number of stored tweets
    pub async fn tweet_count(&self) -> StorageResult<u64> {
        self.with_conn(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM tweets", [], |row| row.get(0))?;
            Ok(count as u64)
        })
        .await
    }
}

/// Raw column values of a `tweets` row
struct TweetRow {
    tweet_id: String,
    keyword: String,
    text: String,
    created_at: String,
    fetched_at: String,
    label: String,
    compound: f64,
    pos: f64,
    neg: f64,
    neu: f64,
    likes: i64,
    retweets: i64,
    replies: i64,
}

impl TweetRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            tweet_id: row.get(0)?,
            keyword: row.get(1)?,
            text: row.get(2)?,
            created_at: row.get(3)?,
            fetched_at: row.get(4)?,
            label: row.get(5)?,
            compound: row.get(6)?,
            pos: row.get(7)?,
            neg: row.get(8)?,
            neu: row.get(9)?,
            likes: row.get(10)?,
            retweets: row.get(11)?,
            replies: row.get(12)?,
        })
    }

    fn into_record(self) -> StorageResult<TweetRecord> {
        let label: SentimentLabel = self.label.parse().map_err(StorageError::Corruption)?;

        Ok(TweetRecord {
            tweet_id: self.tweet_id,
            keyword: self.keyword,
            text: self.text,
            created_at: parse_time(&self.created_at)?,
            fetched_at: parse_time(&self.fetched_at)?,
            sentiment: SentimentScore {
                label,
                compound: self.compound,
                positive: self.pos,
                negative: self.neg,
                neutral: self.neu,
            },
            engagement: Engagement {
                likes: self.likes.max(0) as u64,
                retweets: self.retweets.max(0) as u64,
                replies: self.replies.max(0) as u64,
            },
        })
    }
}

// Fixed-width UTC timestamps so text ordering matches time ordering
fn format_time(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_time(value: &str) -> StorageResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StorageError::Corruption(format!("invalid timestamp {:?}: {}", value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use tempfile::TempDir;

    fn record(id: &str, keyword: &str, minutes: i64, label: SentimentLabel) -> TweetRecord {
        let base = Utc.with_ymd_and_hms(2024, 5, 13, 9, 0, 0).unwrap();
        TweetRecord {
            tweet_id: id.to_string(),
            text: format!("tweet {}", id),
            keyword: keyword.to_string(),
            created_at: base + Duration::minutes(minutes),
            fetched_at: base + Duration::hours(2),
            sentiment: SentimentScore {
                label,
                compound: 0.5,
                positive: 0.4,
                negative: 0.0,
                neutral: 0.6,
            },
            engagement: Engagement {
                likes: 3,
                retweets: 2,
                replies: 1,
            },
        }
    }

    #[tokio::test]
    async fn test_insert_and_fetch_newest_first() {
        let store = TweetStore::in_memory().unwrap();
        store
            .insert_tweets(vec![
                record("1", "rust", 10, SentimentLabel::Positive),
                record("2", "rust", 30, SentimentLabel::Negative),
                record("3", "rust", 20, SentimentLabel::Neutral),
                record("4", "go", 40, SentimentLabel::Neutral),
            ])
            .await
            .unwrap();

        let tweets = store.recent_tweets("rust", 50).await.unwrap();
        let ids: Vec<&str> = tweets.iter().map(|t| t.tweet_id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3", "1"]);
        assert_eq!(tweets[0].sentiment.label, SentimentLabel::Negative);
        assert_eq!(tweets[0].engagement.likes, 3);

        let limited = store.recent_tweets("rust", 2).await.unwrap();
        assert_eq!(limited.len(), 2);

        assert!(store.recent_tweets("python", 50).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_tweet_replaces_row() {
        let store = TweetStore::in_memory().unwrap();
        store
            .insert_tweets(vec![record("1", "rust", 10, SentimentLabel::Positive)])
            .await
            .unwrap();

        let mut updated = record("1", "rust", 10, SentimentLabel::Positive);
        updated.engagement.likes = 99;
        store.insert_tweets(vec![updated]).await.unwrap();

        // Same tweet under another keyword is a separate row
        store
            .insert_tweets(vec![record("1", "go", 10, SentimentLabel::Positive)])
            .await
            .unwrap();

        let tweets = store.recent_tweets("rust", 50).await.unwrap();
        assert_eq!(tweets.len(), 1);
        assert_eq!(tweets[0].engagement.likes, 99);
        assert_eq!(store.tweet_count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_keyword_stats_upsert() {
        let store = TweetStore::in_memory().unwrap();
        let summary = SentimentSummary {
            positive: 3,
            negative: 1,
            neutral: 6,
        };
        store.upsert_keyword_stats("rust", 10, summary).await.unwrap();

        let replaced = SentimentSummary {
            positive: 1,
            negative: 0,
            neutral: 1,
        };
        store.upsert_keyword_stats("rust", 2, replaced).await.unwrap();

        let keywords = store.list_keywords().await.unwrap();
        assert_eq!(keywords.len(), 1);
        assert_eq!(keywords[0].keyword, "rust");
        assert_eq!(keywords[0].total_tweets, 2);
        assert_eq!(keywords[0].sentiment_summary, replaced);
    }

    #[tokio::test]
    async fn test_on_disk_store_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("pulsetrack.db");

        {
            let store = TweetStore::open(&path).unwrap();
            store
                .insert_tweets(vec![record("7", "rust", 5, SentimentLabel::Positive)])
                .await
                .unwrap();
        }

        let reopened = TweetStore::open(&path).unwrap();
        assert_eq!(reopened.path(), Some(path.as_path()));
        let tweets = reopened.recent_tweets("rust", 50).await.unwrap();
        assert_eq!(tweets.len(), 1);
        assert_eq!(tweets[0].tweet_id, "7");
        assert_eq!(tweets[0].created_at, Utc.with_ymd_and_hms(2024, 5, 13, 9, 5, 0).unwrap());
    }

    #[test]
    fn test_time_format_is_fixed_width() {
        let t = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(format_time(&t), "2024-01-02T03:04:05.000Z");
        assert_eq!(parse_time(&format_time(&t)).unwrap(), t);
        assert!(parse_time("yesterday").is_err());
    }
}
