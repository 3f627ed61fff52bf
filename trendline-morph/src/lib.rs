mod cancel;
mod detect;
mod error;
mod extremum;
mod group;
mod pivot;
mod score;
mod search;
mod shape;
mod threshold;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
pub use cancel::CancelToken;
pub use detect::*;
pub use extremum::*;
pub use group::{group_id_base, mark_duplicates, DuplicateThresholds, GroupingStrategy};
pub use pivot::{find_pivots, MAX_CONTINUOUS_PIVOTS};
pub use score::*;
pub use search::{SearchOptions, TrendlineShaper};
pub use shape::*;
pub use threshold::*;
pub use trendline_utils::Interval;
