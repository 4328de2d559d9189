use std::convert::From;
use std::error;
use std::fmt;
use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: Option<String>,
}

#[derive(Debug)]
pub enum ErrorKind {
    SourceUnavailable,
    InvalidInput,
    Config,
    Download,
    IOError(io::Error),
}

impl Error {
    pub fn new(kind: ErrorKind, msg: &str) -> Self {
        Error {
            kind,
            message: Some(msg.to_owned()),
        }
    }

    pub fn with_msg(mut self, message: &str) -> Self {
        self.message = Some(message.to_owned());
        self
    }

    pub fn is_source_unavailable(&self) -> bool {
        matches!(self.kind, ErrorKind::SourceUnavailable)
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            kind,
            message: None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(io_error: io::Error) -> Error {
        Error::from(ErrorKind::IOError(io_error))
    }
}

impl From<toml::de::Error> for Error {
    fn from(toml_error: toml::de::Error) -> Error {
        Error::new(
            ErrorKind::Config,
            &format!("Could not parse configuration: {}", toml_error),
        )
    }
}

impl From<reqwest::Error> for Error {
    fn from(http_error: reqwest::Error) -> Error {
        Error::new(ErrorKind::Download, &http_error.to_string())
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        match err.kind {
            ErrorKind::IOError(err) => err,
            ErrorKind::SourceUnavailable => io::Error::new(
                io::ErrorKind::NotFound,
                err.message.unwrap_or_else(|| "source unavailable".to_owned()),
            ),
            _ => io::Error::new(
                io::ErrorKind::InvalidInput,
                err.message.unwrap_or_else(|| "invalid input".to_owned()),
            ),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(msg) => write!(f, "{}: {}", self.kind.as_str(), msg),
            None => write!(f, "{}", self.kind.as_str()),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &self.kind {
            ErrorKind::IOError(err) => Some(err),
            _ => None,
        }
    }
}

impl ErrorKind {
    pub fn as_str(&self) -> String {
        match self {
            ErrorKind::SourceUnavailable => "holiday source unavailable".to_owned(),
            ErrorKind::InvalidInput => "invalid input".to_owned(),
            ErrorKind::Config => "invalid configuration".to_owned(),
            ErrorKind::Download => "could not download holiday data".to_owned(),
            ErrorKind::IOError(err) => err.to_string(),
        }
    }
}
