//! Leave-day calculation against an external public-holiday calendar.
//!
//! An absence between two dates consumes one leave day per weekday that is
//! not a public holiday. Holiday data comes from the Google Calendar events
//! API; the API key for that call is resolved at call time from a secret
//! store. Both externals sit behind narrow traits ([`HolidaySource`],
//! [`SecretStore`]) so the calculation logic can be exercised with fakes.

pub mod config;
pub mod error;
pub mod services;
pub mod utils;

pub use config::Config;
pub use error::{ConfigError, HolidayFetchError};
pub use services::calendar::{GoogleCalendarSource, HolidaySource};
pub use services::holidays::HolidayCalendar;
pub use services::leave::LeaveCalculator;
pub use services::secrets::{SecretResolver, SecretStore, SecretsManagerStore};
pub use utils::time::{calculate_total_days, calculate_weekend_days, is_weekend};
