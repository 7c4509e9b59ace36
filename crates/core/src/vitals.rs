//! Canonical vital-type matching and series access.
//!
//! Vital types arrive as free text ("hbA1c", "blood_pressure_systolic",
//! "Weight (kg)"). The engine recognises a fixed set of canonical kinds and
//! matches them with one strategy everywhere: case-insensitive substring
//! against the canonical needle. Every consumer goes through [`series`] or
//! [`latest`], which sort by observation date, so callers may pass vitals in
//! any order.

use chrono::{Datelike, NaiveDate};

use crate::record::{PatientRecord, Vital};

/// The vital kinds the knowledge base and risk scorer understand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VitalKind {
    HbA1c,
    SystolicBp,
    WeightKg,
}

impl VitalKind {
    /// Canonical lowercase needle for substring matching.
    fn needle(&self) -> &'static str {
        match self {
            VitalKind::HbA1c => "hba1c",
            VitalKind::SystolicBp => "systolic",
            VitalKind::WeightKg => "weight",
        }
    }

    /// Whether a free-text vital type denotes this kind.
    pub fn matches(&self, vital_type: &str) -> bool {
        vital_type.to_lowercase().contains(self.needle())
    }
}

/// All vitals whose type contains `needle` case-insensitively, sorted by
/// date ascending. The sort is stable, so same-date observations keep
/// their input order.
pub fn series_matching<'a>(record: &'a PatientRecord, needle: &str) -> Vec<&'a Vital> {
    let needle = needle.to_lowercase();
    let mut matching: Vec<&Vital> = record
        .vitals
        .iter()
        .filter(|v| v.vital_type.to_lowercase().contains(&needle))
        .collect();
    matching.sort_by_key(|v| v.date);
    matching
}

/// The most recent vital matching `needle`, if any.
pub fn latest_matching<'a>(record: &'a PatientRecord, needle: &str) -> Option<&'a Vital> {
    series_matching(record, needle).pop()
}

/// All vitals of `kind`, sorted by date ascending.
pub fn series<'a>(record: &'a PatientRecord, kind: VitalKind) -> Vec<&'a Vital> {
    series_matching(record, kind.needle())
}

/// The most recent vital of `kind`, if any.
pub fn latest<'a>(record: &'a PatientRecord, kind: VitalKind) -> Option<&'a Vital> {
    series(record, kind).pop()
}

/// Coarse elapsed months between two dates: the absolute difference in
/// (year * 12 + month). Day-of-month is deliberately ignored, so Jan 31 to
/// Mar 1 counts as 2 months. Preserved for compatibility with the source
/// rule set.
pub fn months_between(a: NaiveDate, b: NaiveDate) -> u32 {
    let a_months = a.year() * 12 + a.month() as i32;
    let b_months = b.year() * 12 + b.month() as i32;
    (b_months - a_months).unsigned_abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cre_types::NonEmptyText;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("date")
    }

    fn record_with_vitals(vitals: Vec<Vital>) -> PatientRecord {
        PatientRecord {
            name: NonEmptyText::new("Test Patient").expect("name"),
            date_of_birth: None,
            gender: "male".into(),
            notes: String::new(),
            conditions: vec![],
            medications: vec![],
            smoker: false,
            visits: vec![],
            vitals,
        }
    }

    fn vital(vital_type: &str, value: f64, unit: &str, d: NaiveDate) -> Vital {
        Vital {
            vital_type: vital_type.into(),
            value,
            unit: unit.into(),
            date: d,
        }
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        assert!(VitalKind::HbA1c.matches("hbA1c"));
        assert!(VitalKind::HbA1c.matches("HbA1c (%)"));
        assert!(VitalKind::SystolicBp.matches("blood_pressure_systolic"));
        assert!(VitalKind::SystolicBp.matches("Systolic BP"));
        assert!(VitalKind::WeightKg.matches("weight_kg"));
        assert!(VitalKind::WeightKg.matches("Weight"));
        assert!(!VitalKind::HbA1c.matches("glucose"));
    }

    #[test]
    fn series_sorts_by_date_regardless_of_input_order() {
        let record = record_with_vitals(vec![
            vital("weight_kg", 78.0, "kg", date(2024, 3, 1)),
            vital("hbA1c", 8.0, "%", date(2024, 2, 1)),
            vital("weight_kg", 70.0, "kg", date(2024, 1, 1)),
        ]);
        let weights = series(&record, VitalKind::WeightKg);
        assert_eq!(weights.len(), 2);
        assert_eq!(weights[0].value, 70.0);
        assert_eq!(weights[1].value, 78.0);
        assert_eq!(
            latest(&record, VitalKind::WeightKg).map(|v| v.value),
            Some(78.0)
        );
    }

    #[test]
    fn needle_lookup_returns_latest_by_date() {
        let record = record_with_vitals(vec![
            vital("Fasting Glucose", 150.0, "mg/dL", date(2024, 4, 1)),
            vital("fasting_glucose", 120.0, "mg/dL", date(2024, 1, 1)),
        ]);
        assert_eq!(
            latest_matching(&record, "glucose").map(|v| v.value),
            Some(150.0)
        );
        assert!(latest_matching(&record, "diastolic").is_none());
    }

    #[test]
    fn coarse_months_ignore_day_of_month() {
        assert_eq!(months_between(date(2024, 1, 31), date(2024, 3, 1)), 2);
        assert_eq!(months_between(date(2024, 3, 1), date(2024, 1, 31)), 2);
        assert_eq!(months_between(date(2023, 11, 15), date(2024, 2, 15)), 3);
        assert_eq!(months_between(date(2024, 5, 1), date(2024, 5, 30)), 0);
    }
}
