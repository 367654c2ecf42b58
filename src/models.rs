/// Data models for the medical centre scheduling engine.
///
/// This module defines the core data structures used throughout the system:
/// - AppointmentId: sequential appointment token ("A0", "A1", ...)
/// - SlotRange: a "HH:MM-HH:MM" wall-clock interval
/// - Slot: a bookable interval in a doctor's calendar
/// - Patient: patient information and reception state
/// - Appointment: a booking of one patient into one slot

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::{MedError, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

/// Parse a "YYYY-MM-DD" date.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| MedError::InvalidInput(format!("'{}' is not a YYYY-MM-DD date", value)))
}

/// Parse a "HH:MM" wall-clock time on a 24-hour scale.
pub fn parse_time(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT)
        .map_err(|_| MedError::InvalidInput(format!("'{}' is not a HH:MM time", value)))
}

/// Render a time as "HH:MM".
pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Minutes elapsed since midnight.
pub fn minutes_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Inverse of [`minutes_of_day`]; `None` past 23:59.
pub fn time_from_minutes(minutes: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
}

/// Identifier of an appointment, allocated in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AppointmentId(u64);

impl AppointmentId {
    pub fn new(sequence: u64) -> Self {
        AppointmentId(sequence)
    }

    pub fn sequence(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for AppointmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A{}", self.0)
    }
}

impl FromStr for AppointmentId {
    type Err = MedError;

    fn from_str(value: &str) -> Result<Self> {
        value
            .strip_prefix('A')
            .and_then(|digits| digits.parse::<u64>().ok())
            .map(AppointmentId)
            .ok_or_else(|| MedError::InvalidInput(format!("'{}' is not an appointment id", value)))
    }
}

impl Serialize for AppointmentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A wall-clock interval written as "HH:MM-HH:MM".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl SlotRange {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        SlotRange { start, end }
    }
}

impl FromStr for SlotRange {
    type Err = MedError;

    fn from_str(value: &str) -> Result<Self> {
        let (start, end) = value
            .split_once('-')
            .ok_or_else(|| MedError::InvalidInput(format!("'{}' is not a HH:MM-HH:MM range", value)))?;
        Ok(SlotRange {
            start: parse_time(start)?,
            end: parse_time(end)?,
        })
    }
}

impl fmt::Display for SlotRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", format_time(self.start), format_time(self.end))
    }
}

/// A bookable interval in a doctor's calendar.
///
/// Identity is (doctor, date, start); the end time and duration are
/// informational once the slot exists.
#[derive(Debug, Clone, Serialize)]
pub struct Slot {
    pub doctor_code: String,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub duration_minutes: u32,
}

impl Slot {
    pub fn new(doctor_code: &str, date: NaiveDate, start: NaiveTime, end: NaiveTime, duration_minutes: u32) -> Self {
        Slot {
            doctor_code: doctor_code.to_string(),
            date,
            start,
            end,
            duration_minutes,
        }
    }

    pub fn range(&self) -> SlotRange {
        SlotRange::new(self.start, self.end)
    }

    /// Range lookup ignores the duration.
    pub fn matches(&self, date: NaiveDate, range: &SlotRange) -> bool {
        self.date == date && self.start == range.start && self.end == range.end
    }
}

impl PartialEq for Slot {
    fn eq(&self, other: &Self) -> bool {
        self.doctor_code == other.doctor_code && self.date == other.date && self.start == other.start
    }
}

impl Eq for Slot {}

impl Hash for Slot {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.doctor_code.hash(state);
        self.date.hash(state);
        self.start.hash(state);
    }
}

/// Represents a patient known to the centre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Patient {
    pub ssn: String,
    pub name: String,
    pub surname: String,
    pub accepted: bool,
}

impl Patient {
    pub fn new(ssn: &str, name: &str, surname: &str) -> Result<Self> {
        if ssn.trim().is_empty() {
            return Err(MedError::InvalidInput("Patient SSN cannot be empty".to_string()));
        }

        Ok(Patient {
            ssn: ssn.to_string(),
            name: name.to_string(),
            surname: surname.to_string(),
            accepted: false,
        })
    }
}

/// A booking of one patient into one slot of one doctor.
#[derive(Debug, Clone, Serialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub patient_ssn: String,
    pub doctor_code: String,
    pub slot: Slot,
    pub completed: bool,
}

impl Appointment {
    pub fn new(id: AppointmentId, patient_ssn: &str, slot: Slot) -> Self {
        Appointment {
            id,
            patient_ssn: patient_ssn.to_string(),
            doctor_code: slot.doctor_code.clone(),
            slot,
            completed: false,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.slot.date
    }

    /// Daily roster form, "HH:MM=SSN".
    pub fn roster_entry(&self) -> String {
        format!("{}={}", format_time(self.slot.start), self.patient_ssn)
    }
}
