//! Support and resistance trendline detection over OHLC candles
//!
//! The detection engine lives in `trendline-morph` and is re-exported here;
//! `report` turns its results into rows and text summaries.

pub mod report;

pub use trendline_morph::*;
pub use trendline_utils::parse_ts_from_str;
