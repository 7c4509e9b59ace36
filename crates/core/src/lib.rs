//! # CRE Core
//!
//! Deterministic clinical rule evaluation over an in-memory patient record.
//!
//! The engine is a pure function pipeline: a [`record::PatientRecord`]
//! snapshot goes in, and derived values come out: a composed
//! [`summary::ClinicalSummary`] with knowledge-base alerts, bounded
//! [`risk::RiskPrediction`]s, and structured care advisories. Nothing is
//! cached or mutated; repeated evaluations of value-equal records return
//! value-equal results, and independent evaluations may run in parallel
//! without coordination.
//!
//! **No storage or API concerns**: persistence, authentication, and
//! rendering belong to the caller. The engine performs no I/O.

pub mod error;
pub mod knowledge;
pub mod modules;
pub mod prompt;
pub mod recommend;
pub mod record;
pub mod risk;
pub mod summary;
pub mod thresholds;
pub mod trend;
pub mod vitals;

pub use error::{EngineError, EngineResult};
pub use knowledge::{Alert, AlertLevel, KnowledgeBase, RuleId};
pub use modules::DiseaseModule;
pub use record::{PatientRecord, Visit, Vital};
pub use risk::RiskPrediction;
pub use summary::ClinicalSummary;

use chrono::NaiveDate;

fn today_utc() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

/// Evaluates the knowledge base against the record and composes the
/// clinical summary, deriving the patient's age from the current date.
///
/// Validates the record once at the boundary; for a validated record this
/// is a total function with no failure mode.
pub fn evaluate(record: &PatientRecord) -> EngineResult<ClinicalSummary> {
    evaluate_at(record, today_utc())
}

/// As [`evaluate`], with an explicit evaluation date for deterministic
/// age derivation.
pub fn evaluate_at(record: &PatientRecord, today: NaiveDate) -> EngineResult<ClinicalSummary> {
    record.validate()?;
    Ok(summary::compose_at(record, today))
}

/// Computes risk predictions for the fixed condition set, deriving the
/// patient's age from the current date.
pub fn predict_risks(record: &PatientRecord) -> EngineResult<Vec<RiskPrediction>> {
    predict_risks_at(record, today_utc())
}

/// As [`predict_risks`], with an explicit evaluation date.
pub fn predict_risks_at(
    record: &PatientRecord,
    today: NaiveDate,
) -> EngineResult<Vec<RiskPrediction>> {
    record.validate()?;
    Ok(risk::predict_risks_at(record, today))
}
