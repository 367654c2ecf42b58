//! Specialties and doctors of the centre, each doctor owning a calendar.

use chrono::{NaiveDate, NaiveTime};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, info, warn};

use crate::calendar::DoctorCalendar;
use crate::error::{MedError, Result};

#[derive(Debug, Clone)]
pub struct Doctor {
    pub code: String,
    pub name: String,
    pub surname: String,
    pub specialty: String,
    pub calendar: DoctorCalendar,
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    specialties: BTreeSet<String>,
    doctors: HashMap<String, Doctor>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register specialties. Duplicates are ignored.
    pub fn add_specialties<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.specialties.insert(name.into());
        }
    }

    pub fn specialties(&self) -> Vec<String> {
        self.specialties.iter().cloned().collect()
    }

    pub fn add_doctor(&mut self, code: &str, name: &str, surname: &str, specialty: &str) -> Result<()> {
        if self.doctors.contains_key(code) {
            warn!(doctor = code, "Rejected duplicate doctor code");
            return Err(MedError::DuplicateDoctor(code.to_string()));
        }
        if !self.specialties.contains(specialty) {
            warn!(doctor = code, specialty, "Rejected doctor with unknown specialty");
            return Err(MedError::SpecialtyNotFound(specialty.to_string()));
        }

        self.doctors.insert(
            code.to_string(),
            Doctor {
                code: code.to_string(),
                name: name.to_string(),
                surname: surname.to_string(),
                specialty: specialty.to_string(),
                calendar: DoctorCalendar::new(code),
            },
        );
        info!(doctor = code, specialty, "Doctor registered");
        Ok(())
    }

    pub fn doctor(&self, code: &str) -> Option<&Doctor> {
        self.doctors.get(code)
    }

    pub fn doctors(&self) -> impl Iterator<Item = &Doctor> {
        self.doctors.values()
    }

    pub fn contains_doctor(&self, code: &str) -> bool {
        self.doctors.contains_key(code)
    }

    /// Codes of doctors practising a specialty, sorted.
    pub fn specialists(&self, specialty: &str) -> Vec<String> {
        let mut codes: Vec<String> = self
            .doctors
            .values()
            .filter(|doctor| doctor.specialty == specialty)
            .map(|doctor| doctor.code.clone())
            .collect();
        codes.sort();
        codes
    }

    pub fn doctor_name(&self, code: &str) -> Option<&str> {
        self.doctors.get(code).map(|doctor| doctor.name.as_str())
    }

    pub fn doctor_surname(&self, code: &str) -> Option<&str> {
        self.doctors.get(code).map(|doctor| doctor.surname.as_str())
    }

    /// Define a day of slots for a doctor. Returns the number generated.
    pub fn add_daily_schedule(
        &mut self,
        code: &str,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        duration_minutes: u32,
    ) -> Result<usize> {
        let doctor = self
            .doctors
            .get_mut(code)
            .ok_or_else(|| MedError::DoctorNotFound(code.to_string()))?;
        Ok(doctor
            .calendar
            .generate_daily_slots(date, start, end, duration_minutes))
    }

    /// Slots on `date` per doctor of `specialty`.
    ///
    /// A doctor is listed as soon as it has any slot at all, so a doctor
    /// whose slots are all on other dates appears with an empty list.
    pub fn find_slots(&self, date: NaiveDate, specialty: &str) -> BTreeMap<String, Vec<String>> {
        debug!(%date, specialty, "Looking up slots");
        self.doctors
            .values()
            .filter(|doctor| doctor.calendar.has_slots() && doctor.specialty == specialty)
            .map(|doctor| (doctor.code.clone(), doctor.calendar.slot_ranges_on(date)))
            .collect()
    }
}
