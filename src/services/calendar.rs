use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use url::Url;

use crate::{config::Config, error::HolidayFetchError, services::secrets::SecretResolver};

const BASE_URL: &str = "https://www.googleapis.com/calendar/v3/calendars";
const CALENDAR_ID: &str = "holiday@group.v.calendar.google.com";
const REGION: &str = "en.sa";
const QUERY_FILTER: &str = "public holiday";
const USER_AGENT: &str = "leave-days/0.1";

/// Capability to fetch raw public-holiday date strings for a time range.
///
/// Implementations return ISO `YYYY-MM-DD` strings exactly as the provider
/// reported them; interpretation is left to the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HolidaySource: Send + Sync {
    async fn fetch_holidays(
        &self,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> Result<Vec<String>, HolidayFetchError>;
}

/// [`HolidaySource`] backed by the Google Calendar events API.
///
/// The calendar id, region and query filter are fixed; only the time range
/// varies per call. The API key is resolved from the secret store on every
/// fetch, never cached.
pub struct GoogleCalendarSource {
    client: Client,
    resolver: SecretResolver,
    api_key_secret_name: String,
    events_url: Url,
}

impl GoogleCalendarSource {
    pub fn new(resolver: SecretResolver, config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to initialize HTTP client: {}", e))?;

        // The calendar path segment is "<region>#<calendar id>" with the
        // separator percent-encoded.
        let events_url = Url::parse(&format!("{}/{}%23{}/events", BASE_URL, REGION, CALENDAR_ID))
            .map_err(|e| anyhow::anyhow!("Failed to build calendar events URL: {}", e))?;

        Ok(Self {
            client,
            resolver,
            api_key_secret_name: config.api_key_secret_name.clone(),
            events_url,
        })
    }

    fn request_url(&self, api_key: &str, time_min: DateTime<Utc>, time_max: DateTime<Utc>) -> Url {
        let mut url = self.events_url.clone();
        url.query_pairs_mut()
            .append_pair("key", api_key)
            .append_pair(
                "timeMin",
                &time_min.to_rfc3339_opts(SecondsFormat::Millis, true),
            )
            .append_pair(
                "timeMax",
                &time_max.to_rfc3339_opts(SecondsFormat::Millis, true),
            )
            .append_pair("q", QUERY_FILTER);
        url
    }
}

#[async_trait]
impl HolidaySource for GoogleCalendarSource {
    async fn fetch_holidays(
        &self,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> Result<Vec<String>, HolidayFetchError> {
        let api_key = self
            .resolver
            .resolve(&self.api_key_secret_name)
            .await
            .ok_or_else(|| HolidayFetchError::SecretUnavailable {
                name: self.api_key_secret_name.clone(),
            })?;

        let url = self.request_url(&api_key, time_min, time_max);
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status != StatusCode::OK {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("the response body could not be read: [{e}]"));
            return Err(HolidayFetchError::UnexpectedStatus {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("unknown").to_owned(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: EventsResponse = serde_json::from_str(&body)?;

        let mut dates = Vec::with_capacity(parsed.items.len());
        for item in parsed.items {
            match item.start.and_then(|start| start.date) {
                Some(date) => dates.push(date),
                None => tracing::debug!("skipping calendar event without an all-day start date"),
            }
        }

        Ok(dates)
    }
}

#[derive(Debug, Deserialize)]
struct EventsResponse {
    #[serde(default)]
    items: Vec<EventItem>,
}

#[derive(Debug, Deserialize)]
struct EventItem {
    #[serde(default)]
    start: Option<EventStart>,
}

#[derive(Debug, Deserialize)]
struct EventStart {
    #[serde(default)]
    date: Option<String>,
}
