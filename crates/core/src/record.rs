//! Patient record wire model.
//!
//! A [`PatientRecord`] is the engine's sole input: an immutable snapshot the
//! caller assembles from whatever storage it owns. The engine validates the
//! snapshot once at the boundary and treats it as read-only afterwards.

use chrono::{Datelike, NaiveDate};
use cre_types::NonEmptyText;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::thresholds;

/// A single dated, typed, numeric clinical measurement.
///
/// `vital_type` is free text; consumers match it case-insensitively by
/// substring against the canonical names in [`crate::vitals::VitalKind`].
/// Entries are not required to arrive date-sorted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Vital {
    #[serde(rename = "type")]
    pub vital_type: String,
    pub value: f64,
    pub unit: String,
    pub date: NaiveDate,
}

/// One clinical encounter. Insertion order is visit order; the most recent
/// visit is the last element.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Visit {
    pub date: NaiveDate,
    pub chief_complaint: String,
    #[serde(default)]
    pub notes: String,
}

/// Immutable patient snapshot evaluated by the engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatientRecord {
    pub name: NonEmptyText,

    /// Used only to derive age. When absent, consumers fall back to
    /// [`thresholds::DEFAULT_AGE`].
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,

    /// Carried through verbatim; lowercased where quoted in composed text.
    pub gender: String,

    /// Free-text medical history, scanned case-insensitively for
    /// interaction patterns.
    #[serde(default)]
    pub notes: String,

    /// Free-text condition labels, matched case-insensitively by substring.
    #[serde(default)]
    pub conditions: Vec<String>,

    /// Medication names, checked by exact membership.
    #[serde(default)]
    pub medications: Vec<String>,

    #[serde(default)]
    pub smoker: bool,

    #[serde(default)]
    pub visits: Vec<Visit>,

    #[serde(default)]
    pub vitals: Vec<Vital>,
}

impl PatientRecord {
    /// Boundary validation: rejects malformed numeric values before any
    /// computation begins. Missing data is never an error; it only reduces
    /// what the engine can report.
    pub fn validate(&self) -> EngineResult<()> {
        for (index, vital) in self.vitals.iter().enumerate() {
            if !vital.value.is_finite() {
                tracing::warn!(
                    vital_type = %vital.vital_type,
                    index,
                    "rejecting record with non-finite vital value"
                );
                return Err(EngineError::NonFiniteVital {
                    vital_type: vital.vital_type.clone(),
                    index,
                });
            }
        }
        Ok(())
    }

    /// Age in whole years on `today`, or `None` when no date of birth was
    /// supplied. Floor of elapsed time, decremented when the birthday has
    /// not yet occurred this year.
    pub fn age_on(&self, today: NaiveDate) -> Option<i32> {
        let dob = self.date_of_birth?;
        let mut age = today.year() - dob.year();
        if (today.month(), today.day()) < (dob.month(), dob.day()) {
            age -= 1;
        }
        Some(age)
    }

    /// Age on `today`, falling back to the documented population-average
    /// default when no date of birth was supplied.
    pub fn age_or_default(&self, today: NaiveDate) -> i32 {
        self.age_on(today).unwrap_or(thresholds::DEFAULT_AGE)
    }

    /// The most recent visit, if any.
    pub fn most_recent_visit(&self) -> Option<&Visit> {
        self.visits.last()
    }

    /// Case-insensitive substring match against the condition labels.
    pub fn has_condition(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.conditions
            .iter()
            .any(|c| c.to_lowercase().contains(&needle))
    }

    /// Exact-name membership check against the medication list.
    pub fn takes_medication(&self, name: &str) -> bool {
        self.medications.iter().any(|m| m == name)
    }

    /// Case-insensitive substring scan over the free-text history.
    pub fn notes_mention(&self, needle: &str) -> bool {
        self.notes.to_lowercase().contains(&needle.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> PatientRecord {
        PatientRecord {
            name: NonEmptyText::new("Test Patient").expect("name"),
            date_of_birth: Some(NaiveDate::from_ymd_opt(1980, 6, 15).expect("date")),
            gender: "Female".into(),
            notes: String::new(),
            conditions: vec![],
            medications: vec![],
            smoker: false,
            visits: vec![],
            vitals: vec![],
        }
    }

    #[test]
    fn age_decrements_before_birthday() {
        let r = record();
        let before = NaiveDate::from_ymd_opt(2024, 6, 14).expect("date");
        let on = NaiveDate::from_ymd_opt(2024, 6, 15).expect("date");
        assert_eq!(r.age_on(before), Some(43));
        assert_eq!(r.age_on(on), Some(44));
    }

    #[test]
    fn age_falls_back_when_dob_absent() {
        let mut r = record();
        r.date_of_birth = None;
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).expect("date");
        assert_eq!(r.age_on(today), None);
        assert_eq!(r.age_or_default(today), thresholds::DEFAULT_AGE);
    }

    #[test]
    fn validate_rejects_non_finite_vitals() {
        let mut r = record();
        r.vitals.push(Vital {
            vital_type: "hbA1c".into(),
            value: f64::NAN,
            unit: "%".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).expect("date"),
        });
        let err = r.validate().unwrap_err();
        assert!(matches!(
            err,
            EngineError::NonFiniteVital { ref vital_type, index: 0 } if vital_type == "hbA1c"
        ));
    }

    #[test]
    fn condition_matching_is_substring_and_case_insensitive() {
        let mut r = record();
        r.conditions.push("Type 2 Diabetes".into());
        assert!(r.has_condition("diabetes"));
        assert!(!r.has_condition("hypertension"));
    }

    #[test]
    fn medication_matching_is_exact() {
        let mut r = record();
        r.medications.push("Metformin".into());
        assert!(r.takes_medication("Metformin"));
        assert!(!r.takes_medication("metformin"));
    }
}
