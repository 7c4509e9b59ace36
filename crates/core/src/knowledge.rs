//! Clinical knowledge base and rule evaluator.
//!
//! The knowledge base is a static, registered table of rules. Each rule
//! carries its catalog metadata plus a predicate capability over the whole
//! patient record; adding a rule means adding a table entry, not touching
//! evaluator control flow. Evaluation applies every rule in registration
//! order and collects the fired alerts, so downstream consumers see a
//! deterministic alert order regardless of severity.
//!
//! Absent data never errors: a rule whose inputs are missing simply does
//! not fire.

use serde::{Deserialize, Serialize};

use crate::record::PatientRecord;
use crate::thresholds;
use crate::trend;
use crate::vitals::{self, VitalKind};

/// Identifier of a knowledge-base rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleId {
    #[serde(rename = "KB_A1C")]
    A1c,
    #[serde(rename = "KB_BP")]
    Bp,
    #[serde(rename = "KB_WEIGHT")]
    Weight,
    #[serde(rename = "KB_INTERACTIONS")]
    Interactions,
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RuleId::A1c => "KB_A1C",
            RuleId::Bp => "KB_BP",
            RuleId::Weight => "KB_WEIGHT",
            RuleId::Interactions => "KB_INTERACTIONS",
        };
        write!(f, "{}", s)
    }
}

/// Alert severity. Ordered so that a higher threshold crossing always
/// compares greater.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AlertLevel::Low => "low",
            AlertLevel::Medium => "medium",
            AlertLevel::High => "high",
        };
        write!(f, "{}", s)
    }
}

/// A structured warning produced when a rule's predicate matches.
///
/// `evidence` always cites the literal data point (value, unit or date) and
/// the rule that fired. Alerts are recomputed on every evaluation and never
/// persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: RuleId,
    pub level: AlertLevel,
    pub message: String,
    pub evidence: String,
}

type Predicate = fn(&PatientRecord) -> Option<Alert>;

/// One registered rule: catalog metadata plus its predicate capability.
pub struct KnowledgeBaseRule {
    pub id: RuleId,
    /// Human-readable trigger condition, e.g. "HbA1c > 7.0%".
    pub condition: &'static str,
    /// Catalog description of why the rule matters.
    pub description: &'static str,
    /// Severity the catalog attributes to the rule before any
    /// value-dependent escalation.
    pub default_level: AlertLevel,
    /// Shorthand cited in alert evidence and rendered prompts.
    pub citation: &'static str,
    predicate: Predicate,
}

impl KnowledgeBaseRule {
    /// One-line catalog rendering of the rule's metadata, e.g.
    /// `KB_A1C [high] HbA1c > 7.0%: HbA1c > 7.0% indicates suboptimal
    /// diabetes control.`
    pub fn catalog_line(&self) -> String {
        format!(
            "{} [{}] {}: {}",
            self.id, self.default_level, self.condition, self.description
        )
    }
}

/// The fixed catalog of clinical rules driving alert generation.
pub struct KnowledgeBase {
    rules: Vec<KnowledgeBaseRule>,
}

impl KnowledgeBase {
    /// The standard rule set, registered in the order alerts must be
    /// reported: A1C, BP, WEIGHT, INTERACTIONS.
    pub fn standard() -> Self {
        Self {
            rules: vec![
                KnowledgeBaseRule {
                    id: RuleId::A1c,
                    condition: "HbA1c > 7.0%",
                    description: "HbA1c > 7.0% indicates suboptimal diabetes control.",
                    default_level: AlertLevel::High,
                    citation: "HbA1c > 7% = poor diabetes control",
                    predicate: a1c_rule,
                },
                KnowledgeBaseRule {
                    id: RuleId::Bp,
                    condition: "Systolic BP > 140 mmHg",
                    description: "Systolic blood pressure > 140 mmHg is considered high.",
                    default_level: AlertLevel::High,
                    citation: "Systolic BP > 140 = high blood pressure",
                    predicate: bp_rule,
                },
                KnowledgeBaseRule {
                    id: RuleId::Weight,
                    condition: "Weight gain >5kg in 3 months",
                    description:
                        "Unintentional weight gain >5kg in 3 months may suggest lifestyle or fluid issues.",
                    default_level: AlertLevel::Medium,
                    citation: ">5kg gain in 3 months = abnormal",
                    predicate: weight_rule,
                },
                KnowledgeBaseRule {
                    id: RuleId::Interactions,
                    condition: "ACE inhibitor + potassium-sparing diuretic",
                    description:
                        "ACE inhibitor + potassium-sparing diuretic may increase hyperkalemia risk.",
                    default_level: AlertLevel::Medium,
                    citation: "ACE inhibitor + Potassium-sparing diuretic = hyperkalemia risk",
                    predicate: interactions_rule,
                },
            ],
        }
    }

    /// The registered rules, in registration order.
    pub fn rules(&self) -> &[KnowledgeBaseRule] {
        &self.rules
    }

    /// Applies every rule to the record, collecting fired alerts in
    /// registration order. An empty result means no rule fired.
    pub fn evaluate(&self, record: &PatientRecord) -> Vec<Alert> {
        self.rules
            .iter()
            .filter_map(|rule| {
                let alert = (rule.predicate)(record);
                if let Some(alert) = &alert {
                    tracing::debug!(rule = %rule.id, level = ?alert.level, "rule fired");
                }
                alert
            })
            .collect()
    }
}

fn a1c_rule(record: &PatientRecord) -> Option<Alert> {
    let vital = vitals::latest(record, VitalKind::HbA1c)?;
    if vital.value <= thresholds::HBA1C_TARGET {
        return None;
    }
    let critical = vital.value > thresholds::HBA1C_CRITICAL;
    let control = if critical { "poor" } else { "suboptimal" };
    Some(Alert {
        id: RuleId::A1c,
        level: if critical { AlertLevel::High } else { AlertLevel::Medium },
        message: format!(
            "HbA1c {}% indicates {} diabetes control",
            vital.value, control
        ),
        evidence: format!(
            "HbA1c={}% on {} (KB_A1C: HbA1c > 7% = poor diabetes control)",
            vital.value, vital.date
        ),
    })
}

fn bp_rule(record: &PatientRecord) -> Option<Alert> {
    let vital = vitals::latest(record, VitalKind::SystolicBp)?;
    if vital.value <= thresholds::SYSTOLIC_ELEVATED {
        return None;
    }
    let severe = vital.value > thresholds::SYSTOLIC_CRITICAL;
    let grade = if severe { "severe" } else { "moderate" };
    Some(Alert {
        id: RuleId::Bp,
        level: if severe { AlertLevel::High } else { AlertLevel::Medium },
        message: format!(
            "Systolic BP {} mmHg indicates {} hypertension",
            vital.value, grade
        ),
        evidence: format!(
            "blood_pressure_systolic={} mmHg on {} (KB_BP: Systolic BP > 140 = high blood pressure)",
            vital.value, vital.date
        ),
    })
}

fn weight_rule(record: &PatientRecord) -> Option<Alert> {
    let trend = trend::analyze(record, VitalKind::WeightKg)?;
    let gain = trend.delta;
    if gain <= thresholds::WEIGHT_GAIN_ALERT_KG
        || trend.elapsed_months > thresholds::WEIGHT_GAIN_WINDOW_MONTHS
    {
        return None;
    }
    let rapid = gain > thresholds::WEIGHT_GAIN_CRITICAL_KG;
    Some(Alert {
        id: RuleId::Weight,
        level: if rapid { AlertLevel::High } else { AlertLevel::Medium },
        message: format!(
            "Weight gain {:.1}kg in {} months exceeds normal parameters",
            gain, trend.elapsed_months
        ),
        evidence: format!(
            "weight_kg: {}\u{2192}{}kg between {} and {} (KB_WEIGHT: >5kg gain in 3 months = abnormal)",
            trend.first_value, trend.last_value, trend.first_date, trend.last_date
        ),
    })
}

fn interactions_rule(record: &PatientRecord) -> Option<Alert> {
    if !(record.notes_mention("ace inhibitor") && record.notes_mention("potassium")) {
        return None;
    }
    Some(Alert {
        id: RuleId::Interactions,
        level: AlertLevel::Medium,
        message: "Potential drug interaction: ACE inhibitor with potassium supplementation".into(),
        evidence: "Patient notes mention ACE inhibitor and potassium (KB_INTERACTIONS: ACE inhibitor + Potassium-sparing diuretic = hyperkalemia risk)".into(),
    })
}
