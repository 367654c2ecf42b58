use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::env;
use tracing::warn;

use crate::models::parse_date;

/// Whether a slot can be booked by more than one appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingPolicy {
    /// A slot holds at most one appointment.
    #[default]
    Exclusive,
    /// Any number of appointments may reference the same slot.
    Shared,
}

impl BookingPolicy {
    pub fn from_string(value: &str) -> Result<Self, String> {
        match value.to_lowercase().trim() {
            "exclusive" => Ok(BookingPolicy::Exclusive),
            "shared" => Ok(BookingPolicy::Shared),
            _ => Err(format!(
                "Invalid booking policy: '{}'. Must be one of: exclusive, shared",
                value
            )),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CenterConfig {
    pub booking_policy: BookingPolicy,
    pub current_date: Option<NaiveDate>,
}

impl CenterConfig {
    pub fn from_env() -> Self {
        let booking_policy = match env::var("MEDCENTER_BOOKING_POLICY") {
            Ok(value) => BookingPolicy::from_string(&value).unwrap_or_else(|e| {
                warn!("{}, using exclusive", e);
                BookingPolicy::Exclusive
            }),
            Err(_) => BookingPolicy::default(),
        };

        let current_date = env::var("MEDCENTER_CURRENT_DATE")
            .ok()
            .and_then(|value| match parse_date(&value) {
                Ok(date) => Some(date),
                Err(e) => {
                    warn!("MEDCENTER_CURRENT_DATE ignored: {}", e);
                    None
                }
            });

        if current_date.is_none() {
            warn!("MEDCENTER_CURRENT_DATE not set, queue and completion stay closed until a date is set");
        }

        Self {
            booking_policy,
            current_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_policy_names() {
        assert_eq!(BookingPolicy::from_string(" Shared "), Ok(BookingPolicy::Shared));
        assert_eq!(BookingPolicy::from_string("exclusive"), Ok(BookingPolicy::Exclusive));
        assert!(BookingPolicy::from_string("overbook").is_err());
    }

    #[test]
    fn default_is_exclusive_without_date() {
        let config = CenterConfig::default();
        assert_eq!(config.booking_policy, BookingPolicy::Exclusive);
        assert_eq!(config.current_date, None);
    }

    #[test]
    fn deserializes_from_json() {
        let config: CenterConfig =
            serde_json::from_str(r#"{"booking_policy":"shared","current_date":"2023-06-27"}"#).unwrap();
        assert_eq!(config.booking_policy, BookingPolicy::Shared);
        assert_eq!(config.current_date, NaiveDate::from_ymd_opt(2023, 6, 27));
    }
}
