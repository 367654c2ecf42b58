/// Appointment ledger for the medical centre.
///
/// This module provides the AppointmentLedger struct, which books patients
/// into doctor slots, tracks completion, and answers lookups by appointment id.

use chrono::{NaiveDate, NaiveTime};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info, warn};

use crate::config::BookingPolicy;
use crate::error::{MedError, Result};
use crate::models::{Appointment, AppointmentId, Patient, Slot, SlotRange};
use crate::registry::Registry;

#[derive(Debug, Clone)]
pub struct AppointmentLedger {
    policy: BookingPolicy,
    pub(crate) patients: HashMap<String, Patient>,
    pub(crate) appointments: BTreeMap<AppointmentId, Appointment>,
    booked_slots: HashMap<Slot, AppointmentId>,
    next_sequence: u64,
}

impl AppointmentLedger {
    pub fn new(policy: BookingPolicy) -> Self {
        AppointmentLedger {
            policy,
            patients: HashMap::new(),
            appointments: BTreeMap::new(),
            booked_slots: HashMap::new(),
            next_sequence: 0,
        }
    }

    pub fn policy(&self) -> BookingPolicy {
        self.policy
    }

    /// Book a patient into an existing slot of a doctor's calendar.
    ///
    /// The patient record is created on first booking; for a known SSN the
    /// stored name and surname are kept.
    #[allow(clippy::too_many_arguments)]
    pub fn book(
        &mut self,
        registry: &Registry,
        ssn: &str,
        name: &str,
        surname: &str,
        doctor_code: &str,
        date: NaiveDate,
        range: &SlotRange,
    ) -> Result<AppointmentId> {
        let doctor = registry
            .doctor(doctor_code)
            .ok_or_else(|| MedError::DoctorNotFound(doctor_code.to_string()))?;

        let slot = doctor.calendar.find_slot(date, range).ok_or_else(|| {
            warn!(doctor = doctor_code, %date, %range, "Booking rejected, no such slot");
            MedError::InvalidSlot {
                doctor: doctor_code.to_string(),
                date,
                range: range.to_string(),
            }
        })?;

        if self.policy == BookingPolicy::Exclusive {
            if let Some(existing) = self.booked_slots.get(slot) {
                warn!(doctor = doctor_code, %date, %range, %existing, "Booking rejected, slot taken");
                return Err(MedError::SlotTaken(*existing));
            }
        }

        match self.patients.get(ssn) {
            Some(known) => {
                if known.name != name || known.surname != surname {
                    warn!(ssn, "Patient already known under another name, keeping stored record");
                }
            }
            None => {
                let patient = Patient::new(ssn, name, surname)?;
                debug!(ssn, "Patient record created");
                self.patients.insert(ssn.to_string(), patient);
            }
        }

        let id = AppointmentId::new(self.next_sequence);
        self.next_sequence += 1;

        self.booked_slots.entry(slot.clone()).or_insert(id);
        self.appointments
            .insert(id, Appointment::new(id, ssn, slot.clone()));

        info!(%id, doctor = doctor_code, %date, %range, ssn, "Appointment booked");
        Ok(id)
    }

    /// Mark an appointment as carried out.
    ///
    /// `today` is the date completions are allowed for; `None` means no
    /// date has been set and every appointment is out of date.
    /// Completing an already completed appointment succeeds again.
    pub fn complete(
        &mut self,
        registry: &Registry,
        doctor_code: &str,
        id: AppointmentId,
        today: Option<NaiveDate>,
    ) -> Result<()> {
        if !self.appointments.contains_key(&id) {
            return Err(MedError::AppointmentNotFound(id.to_string()));
        }
        if !registry.contains_doctor(doctor_code) {
            return Err(MedError::DoctorNotFound(doctor_code.to_string()));
        }

        let accepted = self.is_accepted_patient_of(id);
        let appointment = self
            .appointments
            .get_mut(&id)
            .ok_or_else(|| MedError::AppointmentNotFound(id.to_string()))?;

        if appointment.doctor_code != doctor_code {
            return Err(MedError::WrongDoctor {
                appointment: id,
                booked_with: appointment.doctor_code.clone(),
                requested: doctor_code.to_string(),
            });
        }
        if !accepted {
            return Err(MedError::NotAccepted(appointment.patient_ssn.clone()));
        }
        if today != Some(appointment.date()) {
            return Err(MedError::WrongDate {
                appointment: id,
                date: appointment.date(),
            });
        }

        appointment.completed = true;
        info!(%id, doctor = doctor_code, "Appointment completed");
        Ok(())
    }

    fn is_accepted_patient_of(&self, id: AppointmentId) -> bool {
        self.appointments
            .get(&id)
            .and_then(|appointment| self.patients.get(&appointment.patient_ssn))
            .map(|patient| patient.accepted)
            .unwrap_or(false)
    }

    pub fn appointment(&self, id: AppointmentId) -> Option<&Appointment> {
        self.appointments.get(&id)
    }

    /// All appointments in creation order.
    pub fn appointments(&self) -> impl Iterator<Item = &Appointment> {
        self.appointments.values()
    }

    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }

    pub fn patient(&self, ssn: &str) -> Option<&Patient> {
        self.patients.get(ssn)
    }

    pub fn appointment_doctor(&self, id: AppointmentId) -> Option<&str> {
        self.appointment(id).map(|a| a.doctor_code.as_str())
    }

    pub fn appointment_patient(&self, id: AppointmentId) -> Option<&str> {
        self.appointment(id).map(|a| a.patient_ssn.as_str())
    }

    pub fn appointment_time(&self, id: AppointmentId) -> Option<NaiveTime> {
        self.appointment(id).map(|a| a.slot.start)
    }

    pub fn appointment_date(&self, id: AppointmentId) -> Option<NaiveDate> {
        self.appointment(id).map(|a| a.date())
    }

    /// Appointments of a doctor on a date, in creation order.
    pub fn appointments_of(&self, doctor_code: &str, date: NaiveDate) -> impl Iterator<Item = &Appointment> {
        let doctor_code = doctor_code.to_string();
        self.appointments
            .values()
            .filter(move |a| a.doctor_code == doctor_code && a.date() == date)
    }

    /// Daily roster of a doctor as "HH:MM=SSN" entries.
    pub fn list_appointments(&self, doctor_code: &str, date: NaiveDate) -> Vec<String> {
        self.appointments_of(doctor_code, date)
            .map(Appointment::roster_entry)
            .collect()
    }

    /// Number of appointments, across all doctors, on a date.
    pub fn count_on(&self, date: NaiveDate) -> usize {
        self.appointments.values().filter(|a| a.date() == date).count()
    }

    /// Number of appointments ever booked with a doctor.
    pub fn count_for_doctor(&self, doctor_code: &str) -> usize {
        self.appointments
            .values()
            .filter(|a| a.doctor_code == doctor_code)
            .count()
    }
}

impl Default for AppointmentLedger {
    fn default() -> Self {
        Self::new(BookingPolicy::default())
    }
}
