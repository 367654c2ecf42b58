//! Medical centre scheduling engine.
//!
//! Doctors get daily slot calendars, patients are booked into those slots,
//! the reception accepts arriving patients, and each doctor pulls the next
//! accepted appointment of the day. Show rate and schedule completeness are
//! computed on demand from the same state.

pub mod calendar;
pub mod center;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod queue;
pub mod registry;
pub mod stats;

pub use calendar::DoctorCalendar;
pub use center::{MedCenter, SharedMedCenter};
pub use config::{BookingPolicy, CenterConfig};
pub use error::{ErrorKind, MedError, Result};
pub use ledger::AppointmentLedger;
pub use models::{Appointment, AppointmentId, Patient, Slot, SlotRange};
pub use registry::{Doctor, Registry};
pub use stats::DailyReport;
