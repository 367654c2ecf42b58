/// Arrival queue operations on the appointment ledger.
///
/// The queue is not stored: it is derived from ledger state on every call,
/// so accepting a patient or completing an appointment changes the next
/// result without any explicit queue mutation.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::ledger::AppointmentLedger;
use crate::models::{Appointment, AppointmentId};

impl AppointmentLedger {
    /// Mark a patient as arrived at the reception.
    ///
    /// Unknown SSNs are ignored; returns whether a patient was found.
    pub fn accept_patient(&mut self, ssn: &str) -> bool {
        match self.patients.get_mut(ssn) {
            Some(patient) => {
                patient.accepted = true;
                info!(ssn, "Patient accepted");
                true
            }
            None => {
                debug!(ssn, "Acceptance ignored for unknown patient");
                false
            }
        }
    }

    fn is_waiting(&self, appointment: &Appointment) -> bool {
        !appointment.completed
            && self
                .patients
                .get(&appointment.patient_ssn)
                .map(|patient| patient.accepted)
                .unwrap_or(false)
    }

    /// Appointments a doctor still has to serve on `date`, in service order.
    pub fn waiting_list(&self, doctor_code: &str, date: NaiveDate) -> Vec<AppointmentId> {
        self.appointments_of(doctor_code, date)
            .filter(|appointment| self.is_waiting(appointment))
            .map(|appointment| appointment.id)
            .collect()
    }

    /// Earliest created appointment on `date` whose patient has been
    /// accepted and which is not completed yet.
    pub fn next_appointment(&self, doctor_code: &str, date: NaiveDate) -> Option<AppointmentId> {
        let next = self
            .appointments_of(doctor_code, date)
            .find(|appointment| self.is_waiting(appointment))
            .map(|appointment| appointment.id);
        debug!(doctor = doctor_code, %date, next = ?next.map(|id| id.to_string()), "Next appointment");
        next
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use crate::config::BookingPolicy;
    use crate::registry::Registry;

    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 6, day).unwrap()
    }

    fn setup() -> (Registry, AppointmentLedger) {
        let mut registry = Registry::new();
        registry.add_specialties(["Cardiology"]);
        registry.add_doctor("D1", "Mario", "Rossi", "Cardiology").unwrap();
        let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        for day in [27, 28] {
            registry.add_daily_schedule("D1", date(day), nine, noon, 15).unwrap();
        }
        (registry, AppointmentLedger::new(BookingPolicy::Exclusive))
    }

    #[test]
    fn accepting_unknown_patient_is_a_no_op() {
        let (_, mut ledger) = setup();
        assert!(!ledger.accept_patient("nobody"));
    }

    #[test]
    fn serves_by_creation_order_not_string_order() {
        let (registry, mut ledger) = setup();
        let slots = registry.doctor("D1").unwrap().calendar.slots_on(date(27));

        // Book twelve appointments so ids run past A9.
        let mut ids = Vec::new();
        for (n, slot) in slots.iter().take(12).enumerate() {
            let ssn = format!("S{}", n);
            ids.push(
                ledger
                    .book(&registry, &ssn, "P", "Q", "D1", date(27), &slot.range())
                    .unwrap(),
            );
        }
        ledger.accept_patient("S10");
        ledger.accept_patient("S2");

        assert_eq!(ledger.next_appointment("D1", date(27)), Some(ids[2]));
        assert_eq!(ledger.waiting_list("D1", date(27)), vec![ids[2], ids[10]]);
    }

    #[test]
    fn skips_completed_and_other_dates() {
        let (registry, mut ledger) = setup();
        let first = ledger
            .book(&registry, "S1", "P", "Q", "D1", date(28), &"09:00-09:15".parse().unwrap())
            .unwrap();
        let second = ledger
            .book(&registry, "S2", "P", "Q", "D1", date(27), &"09:15-09:30".parse().unwrap())
            .unwrap();
        ledger.accept_patient("S1");
        ledger.accept_patient("S2");

        assert_eq!(ledger.next_appointment("D1", date(27)), Some(second));
        assert_eq!(ledger.next_appointment("D1", date(28)), Some(first));

        ledger.complete(&registry, "D1", second, Some(date(27))).unwrap();
        assert_eq!(ledger.next_appointment("D1", date(27)), None);
        assert_eq!(ledger.next_appointment("D2", date(27)), None);
    }
}
