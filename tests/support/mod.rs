#![allow(dead_code)]
use std::sync::{Arc, Mutex, OnceLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use leave_days::{HolidayFetchError, HolidaySource, SecretStore};

/// Installs a test subscriber once so degradation paths log under RUST_LOG.
pub fn init_tracing() {
    static INIT: OnceLock<()> = OnceLock::new();
    INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Holiday source that serves a fixed set of raw date strings and records
/// every range it is queried with.
pub struct FixedHolidaySource {
    dates: Vec<String>,
    calls: Mutex<Vec<(DateTime<Utc>, DateTime<Utc>)>>,
}

impl FixedHolidaySource {
    pub fn new(dates: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            dates: dates.iter().map(|d| d.to_string()).collect(),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
        self.calls.lock().expect("lock calls").clone()
    }
}

#[async_trait]
impl HolidaySource for FixedHolidaySource {
    async fn fetch_holidays(
        &self,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> Result<Vec<String>, HolidayFetchError> {
        self.calls
            .lock()
            .expect("lock calls")
            .push((time_min, time_max));
        Ok(self.dates.clone())
    }
}

/// Holiday source whose every fetch fails with a server error.
pub struct FailingHolidaySource;

#[async_trait]
impl HolidaySource for FailingHolidaySource {
    async fn fetch_holidays(
        &self,
        _time_min: DateTime<Utc>,
        _time_max: DateTime<Utc>,
    ) -> Result<Vec<String>, HolidayFetchError> {
        Err(HolidayFetchError::UnexpectedStatus {
            status: 500,
            status_text: "Internal Server Error".to_string(),
            body: "calendar unavailable".to_string(),
        })
    }
}

/// Secret store that serves one fixed payload, or fails when built with
/// `unavailable()`.
pub struct StaticSecretStore {
    payload: Option<String>,
}

impl StaticSecretStore {
    pub fn with_payload(payload: &str) -> Arc<Self> {
        Arc::new(Self {
            payload: Some(payload.to_string()),
        })
    }

    pub fn unavailable() -> Arc<Self> {
        Arc::new(Self { payload: None })
    }
}

#[async_trait]
impl SecretStore for StaticSecretStore {
    async fn fetch_secret(&self, name: &str) -> anyhow::Result<String> {
        self.payload
            .clone()
            .ok_or_else(|| anyhow::anyhow!("secret [{name}] not found"))
    }
}
