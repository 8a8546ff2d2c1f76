use std::env;

use crate::error::ConfigError;

/// Names the stored secret that holds the calendar API key.
pub const SECRET_NAME_VAR: &str = "HOLIDAY_API_KEY_SECRET_NAME";
/// Names the field inside the secret's JSON payload that holds the key.
pub const SECRET_FIELD_VAR: &str = "HOLIDAY_API_KEY_SECRET_FIELD";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key_secret_name: String,
    pub api_key_secret_field: String,
}

impl Config {
    pub fn new(
        api_key_secret_name: impl Into<String>,
        api_key_secret_field: impl Into<String>,
    ) -> Self {
        Self {
            api_key_secret_name: api_key_secret_name.into(),
            api_key_secret_field: api_key_secret_field.into(),
        }
    }

    /// Loads the configuration from the environment (and `.env`, if present).
    ///
    /// Both variables are required; an unset or empty value is a
    /// configuration error rather than something to degrade around.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            api_key_secret_name: required_var(SECRET_NAME_VAR)?,
            api_key_secret_field: required_var(SECRET_FIELD_VAR)?,
        })
    }
}

fn required_var(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(name)),
    }
}
