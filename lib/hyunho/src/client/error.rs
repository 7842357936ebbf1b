#[derive(Debug)]
pub enum Error {
    Json(serde_json::Error),
    UrlParse(chipp_http::UrlParseError),
    HttpError(chipp_http::Error),
    UnexpectedBody(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<chipp_http::UrlParseError> for Error {
    fn from(err: chipp_http::UrlParseError) -> Self {
        Self::UrlParse(err)
    }
}

impl From<chipp_http::Error> for Error {
    fn from(err: chipp_http::Error) -> Self {
        Self::HttpError(err)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "JSON error: {err}"),
            Self::UrlParse(err) => write!(f, "URL parse error: {err}"),
            Self::HttpError(err) => write!(f, "HTTP error: {err}"),
            Self::UnexpectedBody(body) => write!(f, "Unexpected body: {body}"),
        }
    }
}

impl std::error::Error for Error {}
