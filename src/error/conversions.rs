use super::HyperwalletError;

impl From<reqwest::Error> for HyperwalletError {
    fn from(err: reqwest::Error) -> Self {
        HyperwalletError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for HyperwalletError {
    fn from(err: serde_json::Error) -> Self {
        HyperwalletError::ParseError(err.to_string())
    }
}
