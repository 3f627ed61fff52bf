mod error;
pub mod interval;
pub mod timestamp;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;

pub use interval::Interval;
pub use timestamp::parse_ts_from_str;
