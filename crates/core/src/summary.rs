//! Clinical summary composition.
//!
//! Builds one paragraph with a fixed sentence order: demographics and
//! presenting complaint, significant vital trends, critical findings,
//! medium-priority findings, then a closing recommendation. Phrasing and
//! ordering are deterministic; the composer never reorders or deduplicates
//! what the rule evaluator produced.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::knowledge::{Alert, AlertLevel, KnowledgeBase};
use crate::record::PatientRecord;
use crate::trend;

/// The canonical output of an evaluation: the composed paragraph plus the
/// alerts it was built from, in rule-evaluator order. Value-equal inputs
/// produce value-equal summaries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClinicalSummary {
    pub summary: String,
    pub alerts: Vec<Alert>,
}

impl ClinicalSummary {
    /// Serializes to the wire contract consumed by external tooling:
    /// `{"summary": string, "alerts": [{"id","level","message","evidence"}]}`
    /// with alerts in rule-evaluator order.
    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Evaluates the knowledge base against the record and composes the
/// summary paragraph, using `today` to derive the patient's age.
pub fn compose_at(record: &PatientRecord, today: NaiveDate) -> ClinicalSummary {
    let alerts = KnowledgeBase::standard().evaluate(record);
    let summary = compose_paragraph(record, &alerts, today);
    ClinicalSummary { summary, alerts }
}

fn compose_paragraph(record: &PatientRecord, alerts: &[Alert], today: NaiveDate) -> String {
    let mut paragraph = format!(
        "{}, {}-year-old {}",
        record.name,
        record.age_or_default(today),
        record.gender.to_lowercase()
    );

    if !record.notes.is_empty() {
        paragraph.push_str(&format!(
            " with medical history of {}",
            record.notes.to_lowercase()
        ));
    }

    if let Some(visit) = record.most_recent_visit() {
        paragraph.push_str(&format!(
            ", presents for {}",
            visit.chief_complaint.to_lowercase()
        ));
    }
    paragraph.push_str(". ");

    let trends = trend::significant_trends(record);
    if !trends.is_empty() {
        paragraph.push_str(&format!(
            "Current vital trends show {}. ",
            trends.join(" and ")
        ));
    }

    let critical: Vec<String> = alerts
        .iter()
        .filter(|a| a.level == AlertLevel::High)
        .map(|a| a.message.to_lowercase())
        .collect();
    if !critical.is_empty() {
        paragraph.push_str(&format!(
            "Critical clinical findings include {}. ",
            critical.join(" and ")
        ));
    }

    let monitoring: Vec<String> = alerts
        .iter()
        .filter(|a| a.level == AlertLevel::Medium)
        .map(|a| a.message.to_lowercase())
        .collect();
    if !monitoring.is_empty() {
        paragraph.push_str(&format!(
            "Additional monitoring required for {}. ",
            monitoring.join(" and ")
        ));
    }

    if alerts.is_empty() {
        paragraph.push_str("Patient appears stable with current management plan.");
    } else {
        paragraph.push_str(
            "Immediate clinical review and therapy optimization recommended based on current indicators.",
        );
    }

    paragraph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Visit, Vital};
    use cre_types::NonEmptyText;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("date")
    }

    fn today() -> NaiveDate {
        date(2024, 7, 1)
    }

    fn base_record() -> PatientRecord {
        PatientRecord {
            name: NonEmptyText::new("Maria Lopez").expect("name"),
            date_of_birth: Some(date(1994, 7, 1)),
            gender: "Female".into(),
            notes: String::new(),
            conditions: vec![],
            medications: vec![],
            smoker: false,
            visits: vec![],
            vitals: vec![],
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
    fn quiet_record_reads_as_stable() {
        let summary = compose_at(&base_record(), today());
        assert!(summary.alerts.is_empty());
        assert!(summary.summary.starts_with("Maria Lopez, 30-year-old female. "));
        assert!(summary
            .summary
            .ends_with("Patient appears stable with current management plan."));
    }

    #[test]
    fn history_and_visit_are_lowercased_into_the_opening_sentence() {
        let mut record = base_record();
        record.notes = "Type 2 Diabetes".into();
        record.visits.push(Visit {
            date: date(2024, 6, 1),
            chief_complaint: "Routine Follow-Up".into(),
            notes: String::new(),
        });

        let summary = compose_at(&record, today());
        assert!(summary.summary.starts_with(
            "Maria Lopez, 30-year-old female with medical history of type 2 diabetes, presents for routine follow-up. "
        ));
    }

    #[test]
    fn medium_alerts_feed_the_monitoring_sentence() {
        let mut record = base_record();
        record.vitals.push(vital("hbA1c", 8.5, "%", date(2024, 1, 1)));

        let summary = compose_at(&record, today());
        assert!(summary
            .summary
            .contains("Additional monitoring required for hba1c 8.5% indicates suboptimal diabetes control. "));
        assert!(summary.summary.ends_with(
            "Immediate clinical review and therapy optimization recommended based on current indicators."
        ));
    }

    #[test]
    fn high_alerts_feed_the_critical_sentence() {
        let mut record = base_record();
        record.vitals.push(vital(
            "blood_pressure_systolic",
            172.0,
            "mmHg",
            date(2024, 2, 1),
        ));

        let summary = compose_at(&record, today());
        assert!(summary
            .summary
            .contains("Critical clinical findings include systolic bp 172 mmhg indicates severe hypertension. "));
    }

    #[test]
    fn significant_trends_are_surfaced_between_demographics_and_findings() {
        let mut record = base_record();
        record.vitals.push(vital("hbA1c", 7.2, "%", date(2024, 1, 1)));
        record.vitals.push(vital("hbA1c", 6.5, "%", date(2024, 5, 1)));

        let summary = compose_at(&record, today());
        assert!(summary
            .summary
            .contains("Current vital trends show HbA1c improving by 0.7%. "));
    }

    #[test]
    fn evaluation_is_deterministic() {
        let mut record = base_record();
        record.notes = "ace inhibitor plus potassium".into();
        record.vitals.push(vital("hbA1c", 9.4, "%", date(2024, 3, 1)));

        assert_eq!(compose_at(&record, today()), compose_at(&record, today()));
    }

    #[test]
    fn json_contract_round_trips_with_alert_order_preserved() {
        let mut record = base_record();
        record.notes = "ace inhibitor plus potassium".into();
        record.vitals.push(vital("hbA1c", 9.4, "%", date(2024, 3, 1)));

        let summary = compose_at(&record, today());
        let json = summary.to_json().expect("serialize");
        let parsed: ClinicalSummary = serde_json::from_str(&json).expect("parse");
        assert_eq!(parsed.alerts.len(), summary.alerts.len());
        assert_eq!(parsed, summary);

        let raw: serde_json::Value = serde_json::from_str(&json).expect("raw");
        let first = &raw["alerts"][0];
        assert_eq!(first["id"], "KB_A1C");
        assert_eq!(first["level"], "high");
        assert!(first["message"].is_string());
        assert!(first["evidence"].is_string());
    }
}
