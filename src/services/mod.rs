pub mod calendar;
pub mod holidays;
pub mod leave;
pub mod secrets;
