//! Tweet Storage
//!
//! SQLite persistence for scored tweets and per-keyword statistics:
//!
//! - **types**: `TweetRecord`, `Engagement`, `KeywordStats`
//! - **store**: `TweetStore`, the rusqlite-backed store
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust,no_run
//! use pulsetrack::storage::TweetStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = TweetStore::open(std::path::Path::new("./pulsetrack.db"))?;
//!     let tweets = store.recent_tweets("rust", 50).await?;
//!     println!("{} stored tweets", tweets.len());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod store;
pub mod types;

pub use error::{StorageError, StorageResult};
pub use store::TweetStore;
pub use types::{Engagement, KeywordStats, TweetRecord};
