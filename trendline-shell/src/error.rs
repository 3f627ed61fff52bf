use std::fmt;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
    Detect(trendline_morph::Error),
    Input(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Io(ref err) => write!(f, "IO error: {}", err),
            Error::Csv(ref err) => write!(f, "CSV error: {}", err),
            Error::Json(ref err) => write!(f, "JSON error: {}", err),
            Error::Detect(ref err) => write!(f, "Detect error: {}", err),
            Error::Input(ref s) => write!(f, "Input error: {}", s),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::Io(ref err) => Some(err),
            Error::Csv(ref err) => Some(err),
            Error::Json(ref err) => Some(err),
            Error::Detect(ref err) => Some(err),
            Error::Input(..) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Error {
        Error::Csv(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::Json(err)
    }
}

impl From<trendline_morph::Error> for Error {
    fn from(err: trendline_morph::Error) -> Error {
        Error::Detect(err)
    }
}

impl From<trendline_utils::Error> for Error {
    fn from(err: trendline_utils::Error) -> Error {
        Error::Input(err.0)
    }
}
