//! Dashboard Analytics
//!
//! Pure functions deriving the dashboard panels from the current result set.
//! Nothing here touches the DOM, so everything is testable natively.

pub mod engagement;
pub mod export;
pub mod history;
pub mod score;
pub mod sequence;
pub mod timeline;
pub mod trending;

pub use engagement::engagement_stats;
pub use export::{export_file_name, tweets_to_csv};
pub use score::{bar_width_percent, overall_score, ScoreLabel};
pub use timeline::{hourly_buckets, HourBucket};
pub use trending::trending_words;
