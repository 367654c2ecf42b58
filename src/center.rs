/// The medical centre: registry, ledger and current date behind one API.
///
/// Operations take dates, times and ids in their textual forms
/// ("YYYY-MM-DD", "HH:MM", "HH:MM-HH:MM", "A<n>") and parse them once.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};
use tracing::info;

use crate::config::CenterConfig;
use crate::error::{MedError, Result};
use crate::ledger::AppointmentLedger;
use crate::models::{format_time, parse_date, parse_time, AppointmentId, SlotRange};
use crate::registry::Registry;
use crate::stats::{self, DailyReport};

#[derive(Debug, Clone)]
pub struct MedCenter {
    registry: Registry,
    ledger: AppointmentLedger,
    current_date: Option<NaiveDate>,
}

impl MedCenter {
    pub fn new(config: CenterConfig) -> Self {
        MedCenter {
            registry: Registry::new(),
            ledger: AppointmentLedger::new(config.booking_policy),
            current_date: config.current_date,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn ledger(&self) -> &AppointmentLedger {
        &self.ledger
    }

    pub fn current_date(&self) -> Option<NaiveDate> {
        self.current_date
    }

    pub fn add_specialties(&mut self, names: &[&str]) {
        self.registry.add_specialties(names.iter().copied());
    }

    pub fn specialties(&self) -> Vec<String> {
        self.registry.specialties()
    }

    pub fn add_doctor(&mut self, code: &str, name: &str, surname: &str, specialty: &str) -> Result<()> {
        self.registry.add_doctor(code, name, surname, specialty)
    }

    pub fn specialists(&self, specialty: &str) -> Vec<String> {
        self.registry.specialists(specialty)
    }

    pub fn doctor_name(&self, code: &str) -> Option<String> {
        self.registry.doctor_name(code).map(str::to_string)
    }

    pub fn doctor_surname(&self, code: &str) -> Option<String> {
        self.registry.doctor_surname(code).map(str::to_string)
    }

    /// Define slots of `duration` minutes between `start` and `end`.
    pub fn add_daily_schedule(&mut self, code: &str, date: &str, start: &str, end: &str, duration: u32) -> Result<usize> {
        let date = parse_date(date)?;
        let start = parse_time(start)?;
        let end = parse_time(end)?;
        self.registry
            .add_daily_schedule(code, date, start, end, duration)
    }

    pub fn find_slots(&self, date: &str, specialty: &str) -> Result<BTreeMap<String, Vec<String>>> {
        Ok(self.registry.find_slots(parse_date(date)?, specialty))
    }

    pub fn book_appointment(
        &mut self,
        ssn: &str,
        name: &str,
        surname: &str,
        code: &str,
        date: &str,
        slot: &str,
    ) -> Result<String> {
        if !self.registry.contains_doctor(code) {
            return Err(MedError::DoctorNotFound(code.to_string()));
        }
        let date = parse_date(date)?;
        let range: SlotRange = slot.parse()?;
        self.ledger
            .book(&self.registry, ssn, name, surname, code, date, &range)
            .map(|id| id.to_string())
    }

    pub fn appointment_doctor(&self, id: &str) -> Option<String> {
        let id = id.parse().ok()?;
        self.ledger.appointment_doctor(id).map(str::to_string)
    }

    pub fn appointment_patient(&self, id: &str) -> Option<String> {
        let id = id.parse().ok()?;
        self.ledger.appointment_patient(id).map(str::to_string)
    }

    pub fn appointment_time(&self, id: &str) -> Option<String> {
        let id = id.parse().ok()?;
        self.ledger.appointment_time(id).map(format_time)
    }

    pub fn appointment_date(&self, id: &str) -> Option<String> {
        let id = id.parse().ok()?;
        self.ledger
            .appointment_date(id)
            .map(|date| date.format("%Y-%m-%d").to_string())
    }

    pub fn list_appointments(&self, code: &str, date: &str) -> Result<Vec<String>> {
        Ok(self.ledger.list_appointments(code, parse_date(date)?))
    }

    /// Set the day the reception works on. Returns that day's appointment count.
    pub fn set_current_date(&mut self, date: &str) -> Result<usize> {
        let date = parse_date(date)?;
        self.current_date = Some(date);
        let count = self.ledger.count_on(date);
        info!(%date, appointments = count, "Current date set");
        Ok(count)
    }

    pub fn accept(&mut self, ssn: &str) {
        self.ledger.accept_patient(ssn);
    }

    /// Next appointment a doctor should serve today, if any.
    pub fn next_appointment(&self, code: &str) -> Option<String> {
        let today = self.current_date?;
        self.ledger
            .next_appointment(code, today)
            .map(|id| id.to_string())
    }

    pub fn complete_appointment(&mut self, code: &str, appointment: &str) -> Result<()> {
        let id: AppointmentId = appointment
            .parse()
            .map_err(|_| MedError::AppointmentNotFound(appointment.to_string()))?;
        self.ledger
            .complete(&self.registry, code, id, self.current_date)
    }

    pub fn show_rate(&self, code: &str, date: &str) -> Result<Option<f64>> {
        Ok(stats::show_rate(&self.ledger, code, parse_date(date)?))
    }

    pub fn schedule_completeness(&self) -> BTreeMap<String, Option<f64>> {
        stats::schedule_completeness(&self.registry, &self.ledger)
    }

    pub fn doctor_completeness(&self, code: &str) -> Result<Option<f64>> {
        stats::doctor_completeness(&self.registry, &self.ledger, code)
    }

    pub fn daily_report(&self, code: &str, date: &str) -> Result<DailyReport> {
        DailyReport::calculate(&self.registry, &self.ledger, code, parse_date(date)?)
    }
}

impl Default for MedCenter {
    fn default() -> Self {
        Self::new(CenterConfig::default())
    }
}

/// A [`MedCenter`] shared between threads.
///
/// Mutations hold the write lock; lookups and statistics share the read
/// lock and always see a whole operation's effects or none of them.
#[derive(Debug, Clone, Default)]
pub struct SharedMedCenter {
    inner: Arc<RwLock<MedCenter>>,
}

impl SharedMedCenter {
    pub fn new(center: MedCenter) -> Self {
        SharedMedCenter {
            inner: Arc::new(RwLock::new(center)),
        }
    }

    pub fn read<T>(&self, f: impl FnOnce(&MedCenter) -> T) -> Result<T> {
        let guard = self.inner.read().map_err(|_| MedError::LockPoisoned)?;
        Ok(f(&guard))
    }

    pub fn write<T>(&self, f: impl FnOnce(&mut MedCenter) -> T) -> Result<T> {
        let mut guard = self.inner.write().map_err(|_| MedError::LockPoisoned)?;
        Ok(f(&mut guard))
    }
}
