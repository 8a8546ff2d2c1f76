use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Required environment variable [{0}] not configured")]
    MissingVar(&'static str),
}

/// Failures surfaced by the holiday fetcher to its direct caller.
///
/// The higher layers deliberately swallow these: the leave calculator counts
/// zero holidays and the holiday accessor returns an empty list.
#[derive(Debug, Error)]
pub enum HolidayFetchError {
    #[error("the calendar API key could not be resolved from secret [{name}]")]
    SecretUnavailable { name: String },
    #[error("there was an error making the call to the calendar API: [{0}]")]
    Transport(#[from] reqwest::Error),
    #[error("received an unexpected response code: [{status}] [{status_text}] - {body}")]
    UnexpectedStatus {
        status: u16,
        status_text: String,
        body: String,
    },
    #[error("there was an error parsing the calendar API response: [{0}]")]
    ResponseParse(#[from] serde_json::Error),
}
