//! Operational statistics over ledger and calendar state.
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Show rate | accepted / booked, for one doctor on one date |
//! | Schedule completeness | appointments ever booked / slots ever generated, per doctor |
//!
//! A ratio with a zero denominator is undefined and reported as `None`.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::{MedError, Result};
use crate::ledger::AppointmentLedger;
use crate::models::AppointmentId;
use crate::registry::Registry;

fn ratio(numerator: usize, denominator: usize) -> Option<f64> {
    if denominator == 0 {
        None
    } else {
        Some(numerator as f64 / denominator as f64)
    }
}

/// Ratio of appointments whose patient was accepted, for a doctor on a date.
pub fn show_rate(ledger: &AppointmentLedger, doctor_code: &str, date: NaiveDate) -> Option<f64> {
    let mut booked = 0;
    let mut accepted = 0;
    for appointment in ledger.appointments_of(doctor_code, date) {
        booked += 1;
        if ledger
            .patient(&appointment.patient_ssn)
            .is_some_and(|patient| patient.accepted)
        {
            accepted += 1;
        }
    }
    ratio(accepted, booked)
}

/// Completeness of one doctor's schedule.
pub fn doctor_completeness(registry: &Registry, ledger: &AppointmentLedger, doctor_code: &str) -> Result<Option<f64>> {
    let doctor = registry
        .doctor(doctor_code)
        .ok_or_else(|| MedError::DoctorNotFound(doctor_code.to_string()))?;
    Ok(ratio(
        ledger.count_for_doctor(doctor_code),
        doctor.calendar.slot_count(),
    ))
}

/// Completeness for every registered doctor, keyed by doctor code.
pub fn schedule_completeness(registry: &Registry, ledger: &AppointmentLedger) -> BTreeMap<String, Option<f64>> {
    registry
        .doctors()
        .map(|doctor| {
            (
                doctor.code.clone(),
                ratio(
                    ledger.count_for_doctor(&doctor.code),
                    doctor.calendar.slot_count(),
                ),
            )
        })
        .collect()
}

/// One doctor's day at a glance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyReport {
    pub doctor_code: String,
    pub date: NaiveDate,
    pub slots: usize,
    pub booked: usize,
    pub accepted: usize,
    pub completed: usize,
    pub show_rate: Option<f64>,
    pub waiting: Vec<AppointmentId>,
}

impl DailyReport {
    pub fn calculate(registry: &Registry, ledger: &AppointmentLedger, doctor_code: &str, date: NaiveDate) -> Result<Self> {
        let doctor = registry
            .doctor(doctor_code)
            .ok_or_else(|| MedError::DoctorNotFound(doctor_code.to_string()))?;

        let mut booked = 0;
        let mut accepted = 0;
        let mut completed = 0;
        for appointment in ledger.appointments_of(doctor_code, date) {
            booked += 1;
            if appointment.completed {
                completed += 1;
            }
            if ledger
                .patient(&appointment.patient_ssn)
                .is_some_and(|patient| patient.accepted)
            {
                accepted += 1;
            }
        }

        Ok(Self {
            doctor_code: doctor_code.to_string(),
            date,
            slots: doctor.calendar.slots_on(date).len(),
            booked,
            accepted,
            completed,
            show_rate: ratio(accepted, booked),
            waiting: ledger.waiting_list(doctor_code, date),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::*;
    use crate::config::BookingPolicy;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 6, day).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn setup() -> (Registry, AppointmentLedger) {
        let mut registry = Registry::new();
        registry.add_specialties(["Cardiology"]);
        registry.add_doctor("D1", "Mario", "Rossi", "Cardiology").unwrap();
        registry.add_doctor("D2", "Anna", "Bianchi", "Cardiology").unwrap();
        // Ten 30-minute slots.
        registry
            .add_daily_schedule("D1", date(27), time(9, 0), time(14, 0), 30)
            .unwrap();
        (registry, AppointmentLedger::new(BookingPolicy::Exclusive))
    }

    #[test]
    fn show_rate_is_half_with_one_of_two_accepted() {
        let (registry, mut ledger) = setup();
        ledger
            .book(&registry, "S1", "P", "Q", "D1", date(27), &"09:00-09:30".parse().unwrap())
            .unwrap();
        ledger
            .book(&registry, "S2", "P", "Q", "D1", date(27), &"09:30-10:00".parse().unwrap())
            .unwrap();
        ledger.accept_patient("S2");

        assert_eq!(show_rate(&ledger, "D1", date(27)), Some(0.5));
    }

    #[test]
    fn show_rate_undefined_without_appointments() {
        let (_, ledger) = setup();
        assert_eq!(show_rate(&ledger, "D1", date(27)), None);
        assert_eq!(show_rate(&ledger, "D9", date(27)), None);
    }

    #[test]
    fn completeness_counts_every_date() {
        let (mut registry, mut ledger) = setup();
        for range in ["09:00-09:30", "10:00-10:30", "13:30-14:00"] {
            ledger
                .book(&registry, "S1", "P", "Q", "D1", date(27), &range.parse().unwrap())
                .unwrap();
        }

        let completeness = schedule_completeness(&registry, &ledger);
        assert_eq!(completeness["D1"], Some(0.3));
        assert_eq!(completeness["D2"], None);
        assert_eq!(doctor_completeness(&registry, &ledger, "D1"), Ok(Some(0.3)));
        assert_eq!(
            doctor_completeness(&registry, &ledger, "D9"),
            Err(MedError::DoctorNotFound("D9".into()))
        );

        // Slots on another date still count towards the denominator.
        registry
            .add_daily_schedule("D1", date(28), time(9, 0), time(14, 0), 30)
            .unwrap();
        assert_eq!(doctor_completeness(&registry, &ledger, "D1"), Ok(Some(0.15)));
    }

    #[test]
    fn daily_report_summarises_the_day() {
        let (registry, mut ledger) = setup();
        let a0 = ledger
            .book(&registry, "S1", "P", "Q", "D1", date(27), &"09:00-09:30".parse().unwrap())
            .unwrap();
        let a1 = ledger
            .book(&registry, "S2", "P", "Q", "D1", date(27), &"09:30-10:00".parse().unwrap())
            .unwrap();
        ledger.accept_patient("S1");
        ledger.accept_patient("S2");
        ledger.complete(&registry, "D1", a0, Some(date(27))).unwrap();

        let report = DailyReport::calculate(&registry, &ledger, "D1", date(27)).unwrap();
        assert_eq!(report.slots, 10);
        assert_eq!(report.booked, 2);
        assert_eq!(report.accepted, 2);
        assert_eq!(report.completed, 1);
        assert_eq!(report.show_rate, Some(1.0));
        assert_eq!(report.waiting, vec![a1]);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["waiting"][0], "A1");
        assert_eq!(json["date"], "2023-06-27");
    }
}
