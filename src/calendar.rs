/// Calendar management for the medical centre.
///
/// This module provides the slot generator and the DoctorCalendar struct,
/// which holds one doctor's bookable slots across all dates.

use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, info, warn};

use crate::models::{minutes_of_day, time_from_minutes, Slot, SlotRange};

#[derive(Debug, Clone)]
pub struct DoctorCalendar {
    doctor_code: String,
    slots: Vec<Slot>,
}

impl DoctorCalendar {
    pub fn new(doctor_code: &str) -> Self {
        DoctorCalendar {
            doctor_code: doctor_code.to_string(),
            slots: Vec::new(),
        }
    }

    pub fn doctor_code(&self) -> &str {
        &self.doctor_code
    }

    /// All slots in generation order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Whether any slot exists, on any date.
    pub fn has_slots(&self) -> bool {
        !self.slots.is_empty()
    }

    /// Generate consecutive slots of `duration_minutes` for a single day.
    ///
    /// Slots start at `start` and stop before the first one that would end
    /// after `end`; a trailing partial slot is never emitted. Returns the
    /// number of slots appended.
    pub fn generate_daily_slots(
        &mut self,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        duration_minutes: u32,
    ) -> usize {
        if duration_minutes == 0 {
            warn!(doctor = %self.doctor_code, %date, "Zero slot duration, no slots generated");
            return 0;
        }

        let end_minutes = minutes_of_day(end);
        let mut cursor = minutes_of_day(start);
        let mut generated = 0;

        while let Some(slot_end) = cursor
            .checked_add(duration_minutes)
            .filter(|slot_end| *slot_end <= end_minutes)
        {
            // Both bounds are at most `end`, so they stay inside the day.
            if let (Some(slot_start), Some(slot_end)) = (time_from_minutes(cursor), time_from_minutes(slot_end)) {
                self.slots
                    .push(Slot::new(&self.doctor_code, date, slot_start, slot_end, duration_minutes));
                generated += 1;
            }
            cursor = slot_end;
        }

        info!(
            doctor = %self.doctor_code,
            %date,
            generated,
            "Daily schedule defined"
        );
        generated
    }

    /// Find all slots on a specific date, in generation order.
    pub fn slots_on(&self, date: NaiveDate) -> Vec<&Slot> {
        self.slots.iter().filter(|slot| slot.date == date).collect()
    }

    /// Slots on a date rendered as "HH:MM-HH:MM".
    pub fn slot_ranges_on(&self, date: NaiveDate) -> Vec<String> {
        self.slots_on(date)
            .into_iter()
            .map(|slot| slot.range().to_string())
            .collect()
    }

    /// Look a slot up by date and exact start/end.
    pub fn find_slot(&self, date: NaiveDate, range: &SlotRange) -> Option<&Slot> {
        let slot = self.slots.iter().find(|slot| slot.matches(date, range));
        if slot.is_none() {
            debug!(doctor = %self.doctor_code, %date, %range, "No matching slot");
        }
        slot
    }
}

impl std::fmt::Display for DoctorCalendar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DoctorCalendar({}, slots={})",
            self.doctor_code,
            self.slots.len()
        )
    }
}
