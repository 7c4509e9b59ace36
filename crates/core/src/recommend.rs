//! Care recommendations and clinical alerts.
//!
//! Restates the shared threshold table as advisory prose: structured
//! recommendations with priority, evidence citation, and alternatives, plus
//! clinical alerts graded critical/warning/info. Both lists always contain
//! at least one fixed entry so a caller never renders an empty panel.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::record::PatientRecord;
use crate::risk::ScoreInputs;
use crate::thresholds;

/// Category of a care recommendation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Medication,
    Lifestyle,
    Monitoring,
    Referral,
    Diagnostic,
}

/// Priority of a care recommendation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// A structured advisory derived from the patient's current state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClinicalRecommendation {
    pub id: String,
    pub kind: RecommendationKind,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    /// Guideline or study the advisory cites.
    pub evidence: String,
    pub rationale: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contraindications: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternatives: Option<Vec<String>>,
    pub timeline: String,
}

/// Severity of a clinical alert.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Critical,
    Warning,
    Info,
}

/// A graded alert with a concrete recommended action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClinicalAlert {
    pub id: String,
    pub severity: AlertSeverity,
    pub category: String,
    pub message: String,
    pub action: String,
    pub evidence: String,
}

/// Care recommendations for the record, using `today` to derive age.
/// Always includes the structured exercise program and the specialist
/// referral regardless of inputs.
pub fn recommendations_at(
    record: &PatientRecord,
    today: NaiveDate,
) -> Vec<ClinicalRecommendation> {
    let inputs = ScoreInputs::resolve(record, today);
    let mut recs = Vec::new();

    if record.has_condition(thresholds::DIABETES_CONDITION) {
        if inputs.hba1c > thresholds::HBA1C_ELEVATED {
            recs.push(ClinicalRecommendation {
                id: "diabetes-intensify".into(),
                kind: RecommendationKind::Medication,
                priority: Priority::High,
                title: "Intensify Diabetes Therapy".into(),
                description: format!(
                    "Current HbA1c of {}% is above target. Consider medication adjustment or addition.",
                    inputs.hba1c
                ),
                evidence: "ADA 2024 Guidelines recommend HbA1c <7% for most adults".into(),
                rationale:
                    "Elevated HbA1c increases risk of microvascular and macrovascular complications"
                        .into(),
                contraindications: None,
                alternatives: Some(vec![
                    "Add SGLT2 inhibitor".into(),
                    "Increase metformin dose".into(),
                    "Add GLP-1 agonist".into(),
                ]),
                timeline: "Within 2-4 weeks".into(),
            });
        }

        recs.push(ClinicalRecommendation {
            id: "diabetes-monitoring".into(),
            kind: RecommendationKind::Monitoring,
            priority: Priority::Medium,
            title: "Continuous Glucose Monitoring".into(),
            description: "Consider CGM for better glucose pattern recognition and management"
                .into(),
            evidence: "Studies show CGM improves HbA1c by 0.3-0.5%".into(),
            rationale: "Real-time glucose data helps optimize therapy and reduce hypoglycemia"
                .into(),
            contraindications: None,
            alternatives: None,
            timeline: "Next appointment".into(),
        });
    }

    if inputs.systolic > thresholds::SYSTOLIC_ELEVATED {
        recs.push(ClinicalRecommendation {
            id: "bp-medication".into(),
            kind: RecommendationKind::Medication,
            priority: Priority::High,
            title: "Optimize Blood Pressure Control".into(),
            description: format!(
                "Current BP {} mmHg is above target. Consider ACE inhibitor adjustment.",
                inputs.systolic
            ),
            evidence: "ACC/AHA 2017 Guidelines recommend BP <130/80 mmHg".into(),
            rationale: "Each 10 mmHg reduction in systolic BP reduces cardiovascular events by 20%"
                .into(),
            contraindications: Some(vec![
                "Hyperkalemia".into(),
                "Acute kidney injury".into(),
                "Angioedema history".into(),
            ]),
            alternatives: Some(vec![
                "Increase current dose".into(),
                "Add thiazide diuretic".into(),
                "Switch to ARB".into(),
            ]),
            timeline: "Within 1-2 weeks".into(),
        });
    }

    recs.push(ClinicalRecommendation {
        id: "lifestyle-exercise".into(),
        kind: RecommendationKind::Lifestyle,
        priority: Priority::Medium,
        title: "Structured Exercise Program".into(),
        description: "Implement 150 minutes of moderate-intensity aerobic exercise per week"
            .into(),
        evidence: "Exercise reduces HbA1c by 0.6% and systolic BP by 5-7 mmHg".into(),
        rationale: "Physical activity improves insulin sensitivity and cardiovascular health"
            .into(),
        contraindications: None,
        alternatives: None,
        timeline: "Start immediately, gradual progression".into(),
    });

    if inputs.age > thresholds::AGE_STATIN_REVIEW {
        recs.push(ClinicalRecommendation {
            id: "statin-therapy".into(),
            kind: RecommendationKind::Medication,
            priority: Priority::Medium,
            title: "Consider Statin Therapy".into(),
            description: "Evaluate for primary prevention statin based on cardiovascular risk"
                .into(),
            evidence: "2018 AHA/ACC Cholesterol Guidelines".into(),
            rationale: "Diabetes and hypertension increase cardiovascular risk significantly"
                .into(),
            contraindications: Some(vec![
                "Active liver disease".into(),
                "Pregnancy".into(),
                "Myopathy".into(),
            ]),
            alternatives: None,
            timeline: "Next visit after lipid panel".into(),
        });
    }

    recs.push(ClinicalRecommendation {
        id: "endo-referral".into(),
        kind: RecommendationKind::Referral,
        priority: Priority::Medium,
        title: "Endocrinology Consultation".into(),
        description: "Refer for complex diabetes management and optimization".into(),
        evidence: "Specialist care improves diabetes outcomes".into(),
        rationale: "Multiple comorbidities and suboptimal control warrant specialist input".into(),
        contraindications: None,
        alternatives: None,
        timeline: "Within 4-6 weeks".into(),
    });

    recs
}

/// Clinical alerts for the record. The preventive-care reminder is always
/// present so the list is never empty.
pub fn clinical_alerts_at(record: &PatientRecord, today: NaiveDate) -> Vec<ClinicalAlert> {
    let inputs = ScoreInputs::resolve(record, today);
    let mut alerts = Vec::new();

    if inputs.hba1c > thresholds::HBA1C_CRITICAL {
        alerts.push(ClinicalAlert {
            id: "hba1c-critical".into(),
            severity: AlertSeverity::Critical,
            category: "Diabetes".into(),
            message: format!("HbA1c significantly elevated at {}%", inputs.hba1c),
            action: "Urgent diabetes management review required".into(),
            evidence: "HbA1c >9% associated with high complication risk".into(),
        });
    }

    if inputs.systolic > thresholds::SYSTOLIC_CRITICAL {
        alerts.push(ClinicalAlert {
            id: "bp-critical".into(),
            severity: AlertSeverity::Critical,
            category: "Hypertension".into(),
            message: "Blood pressure critically elevated".into(),
            action: "Consider immediate antihypertensive therapy".into(),
            evidence: "Systolic BP >160 mmHg requires prompt treatment".into(),
        });
    }

    if record.takes_medication("Metformin") && record.takes_medication("Lisinopril") {
        alerts.push(ClinicalAlert {
            id: "drug-interaction".into(),
            severity: AlertSeverity::Warning,
            category: "Drug Interaction".into(),
            message: "Monitor kidney function with ACE inhibitor + Metformin".into(),
            action: "Check creatinine and eGFR regularly".into(),
            evidence: "Both drugs can affect kidney function".into(),
        });
    }

    alerts.push(ClinicalAlert {
        id: "eye-exam".into(),
        severity: AlertSeverity::Info,
        category: "Preventive Care".into(),
        message: "Annual diabetic eye exam due".into(),
        action: "Schedule ophthalmology appointment".into(),
        evidence: "Annual screening recommended for diabetic retinopathy".into(),
    });

    alerts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Vital;
    use cre_types::NonEmptyText;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("date")
    }

    fn today() -> NaiveDate {
        date(2024, 7, 1)
    }

    fn empty_record() -> PatientRecord {
        PatientRecord {
            name: NonEmptyText::new("Test Patient").expect("name"),
            date_of_birth: None,
            gender: "male".into(),
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

    fn ids<T>(items: &[T], id: impl Fn(&T) -> &str) -> Vec<String> {
        items.iter().map(|i| id(i).to_string()).collect()
    }

    #[test]
    fn fixed_entries_keep_outputs_non_empty() {
        // Default age is 45 > 40, so the statin review also appears.
        let recs = recommendations_at(&empty_record(), today());
        assert_eq!(
            ids(&recs, |r| &r.id),
            vec!["lifestyle-exercise", "statin-therapy", "endo-referral"]
        );

        let alerts = clinical_alerts_at(&empty_record(), today());
        assert_eq!(ids(&alerts, |a| &a.id), vec!["eye-exam"]);
        assert_eq!(alerts[0].severity, AlertSeverity::Info);
    }

    #[test]
    fn poorly_controlled_diabetes_intensifies_therapy() {
        let mut record = empty_record();
        record.conditions.push("Type 2 Diabetes".into());
        record.vitals.push(vital("hbA1c", 8.6, "%", date(2024, 5, 1)));

        let recs = recommendations_at(&record, today());
        let intensify = recs
            .iter()
            .find(|r| r.id == "diabetes-intensify")
            .expect("intensify present");
        assert_eq!(intensify.priority, Priority::High);
        assert_eq!(intensify.kind, RecommendationKind::Medication);
        assert!(intensify.description.contains("8.6%"));
        assert!(recs.iter().any(|r| r.id == "diabetes-monitoring"));
    }

    #[test]
    fn elevated_bp_recommends_medication_with_alternatives() {
        let mut record = empty_record();
        record.vitals.push(vital(
            "blood_pressure_systolic",
            152.0,
            "mmHg",
            date(2024, 5, 1),
        ));

        let recs = recommendations_at(&record, today());
        let bp = recs.iter().find(|r| r.id == "bp-medication").expect("bp rec");
        assert!(bp.description.contains("152 mmHg"));
        assert_eq!(
            bp.alternatives.as_deref().map(|a| a.len()),
            Some(3)
        );
    }

    #[test]
    fn critical_values_raise_critical_alerts() {
        let mut record = empty_record();
        record.vitals.push(vital("hbA1c", 9.6, "%", date(2024, 5, 1)));
        record.vitals.push(vital(
            "blood_pressure_systolic",
            168.0,
            "mmHg",
            date(2024, 5, 1),
        ));

        let alerts = clinical_alerts_at(&record, today());
        assert_eq!(
            ids(&alerts, |a| &a.id),
            vec!["hba1c-critical", "bp-critical", "eye-exam"]
        );
        assert_eq!(alerts[0].severity, AlertSeverity::Critical);
        assert!(alerts[0].message.contains("9.6%"));
    }

    #[test]
    fn metformin_lisinopril_combination_warns_on_kidney_function() {
        let mut record = empty_record();
        record.medications.push("Metformin".into());
        record.medications.push("Lisinopril".into());

        let alerts = clinical_alerts_at(&record, today());
        let interaction = alerts
            .iter()
            .find(|a| a.id == "drug-interaction")
            .expect("interaction alert");
        assert_eq!(interaction.severity, AlertSeverity::Warning);
    }

    #[test]
    fn statin_review_is_gated_on_age() {
        let mut record = empty_record();
        record.date_of_birth = Some(date(1990, 1, 1));

        let recs = recommendations_at(&record, today());
        assert!(!recs.iter().any(|r| r.id == "statin-therapy"));
    }
}
