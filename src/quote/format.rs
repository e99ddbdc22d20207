//! Presentation helpers. The engine never produces strings; renderers call these.

use super::units::{Distance, Money, TravelTime};
use chrono::{DateTime, Local, Utc};

/// `HH:MM:SS`, hours not wrapped into days
pub fn format_hms(duration: TravelTime) -> String {
    let (hours, minutes, seconds) = duration.hms();
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

pub fn format_km(distance: Distance) -> String {
    format!("{:.2} km", distance.km())
}

/// Two-decimal currency string, e.g. `R$ 35.50`
pub fn format_money(amount: Money, symbol: &str) -> String {
    let cents = amount.cents();
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}{} {}.{:02}", sign, symbol, abs / 100, abs % 100)
}

pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%d/%m/%Y %H:%M:%S")
        .to_string()
}
