use derive_more::Display;

#[derive(Debug, Display, Clone, PartialEq)]
pub enum Error {
    #[display(fmt = "invalid input: {}", _0)]
    InvalidInput(String),
    #[display(fmt = "detection cancelled")]
    Cancelled,
    #[display(fmt = "detection deadline exceeded")]
    DeadlineExceeded,
}

impl Error {
    pub fn invalid<S: Into<String>>(msg: S) -> Self {
        Error::InvalidInput(msg.into())
    }
}

impl std::error::Error for Error {}

impl From<trendline_utils::Error> for Error {
    fn from(err: trendline_utils::Error) -> Error {
        Error::InvalidInput(err.0)
    }
}
