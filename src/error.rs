use chrono::NaiveDate;
use thiserror::Error;

use crate::models::AppointmentId;

/// Broad failure classes reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidInput,
    StateConflict,
    Internal,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MedError {
    #[error("Doctor not found: {0}")]
    DoctorNotFound(String),

    #[error("Appointment not found: {0}")]
    AppointmentNotFound(String),

    #[error("Specialty not found: {0}")]
    SpecialtyNotFound(String),

    #[error("No slot {range} on {date} in the schedule of doctor {doctor}")]
    InvalidSlot {
        doctor: String,
        date: NaiveDate,
        range: String,
    },

    #[error("Doctor code already registered: {0}")]
    DuplicateDoctor(String),

    #[error("Slot already booked by appointment {0}")]
    SlotTaken(AppointmentId),

    #[error("Appointment {appointment} is with doctor {booked_with}, not {requested}")]
    WrongDoctor {
        appointment: AppointmentId,
        booked_with: String,
        requested: String,
    },

    #[error("Patient {0} has not been accepted at the reception")]
    NotAccepted(String),

    #[error("Appointment {appointment} is on {date}, not on the current date")]
    WrongDate {
        appointment: AppointmentId,
        date: NaiveDate,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Schedule state lock poisoned")]
    LockPoisoned,
}

impl MedError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MedError::DoctorNotFound(_)
            | MedError::AppointmentNotFound(_)
            | MedError::SpecialtyNotFound(_)
            | MedError::InvalidSlot { .. } => ErrorKind::NotFound,
            MedError::InvalidInput(_) => ErrorKind::InvalidInput,
            MedError::DuplicateDoctor(_)
            | MedError::SlotTaken(_)
            | MedError::WrongDoctor { .. }
            | MedError::NotAccepted(_)
            | MedError::WrongDate { .. } => ErrorKind::StateConflict,
            MedError::LockPoisoned => ErrorKind::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, MedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(
            MedError::DoctorNotFound("D1".into()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            MedError::NotAccepted("SSN1".into()).kind(),
            ErrorKind::StateConflict
        );
        assert_eq!(
            MedError::InvalidInput("25:00".into()).kind(),
            ErrorKind::InvalidInput
        );
    }

    #[test]
    fn messages_name_the_offender() {
        let err = MedError::WrongDoctor {
            appointment: AppointmentId::new(3),
            booked_with: "D1".into(),
            requested: "D2".into(),
        };
        assert_eq!(err.to_string(), "Appointment A3 is with doctor D1, not D2");
    }
}
