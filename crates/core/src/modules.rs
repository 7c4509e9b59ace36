//! Condition-specific disease management modules.
//!
//! Each module restates the shared threshold table for one chronic
//! condition: a graded risk level, current-vs-target metrics, insight
//! sentences, and fixed recommendation and follow-up lists. Modules are
//! gated on the record's condition labels (weight management is gated on
//! BMI instead) and emitted in a fixed order: diabetes, hypertension,
//! weight, cardiac. A record matching nothing yields an empty list.

use serde::{Deserialize, Serialize};

use crate::record::PatientRecord;
use crate::thresholds;
use crate::vitals;

/// Graded risk level attributed to a module.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

/// Band a metric's current value falls in relative to its thresholds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricStatus {
    Good,
    Warning,
    Danger,
}

/// One tracked measurement with its target value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModuleMetric {
    pub name: String,
    pub value: f64,
    pub target: f64,
    pub unit: String,
    pub status: MetricStatus,
}

/// A per-condition management summary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseModule {
    pub id: String,
    pub name: String,
    pub risk_level: RiskLevel,
    pub recommendations: Vec<String>,
    pub metrics: Vec<ModuleMetric>,
    pub insights: Vec<String>,
    pub next_actions: Vec<String>,
}

/// Generates the modules applicable to the record, in fixed order.
pub fn disease_modules(record: &PatientRecord) -> Vec<DiseaseModule> {
    let mut modules = Vec::new();

    if record.has_condition(thresholds::DIABETES_CONDITION) {
        modules.push(diabetes_module(record));
    }

    if record.has_condition("hypertension") || record.has_condition("blood pressure") {
        modules.push(hypertension_module(record));
    }

    if let Some(module) = weight_module(record) {
        modules.push(module);
    }

    if record.has_condition("cardiac") || record.has_condition("heart") {
        modules.push(cardiac_module(record));
    }

    for module in &modules {
        tracing::debug!(module = %module.id, level = ?module.risk_level, "module generated");
    }

    modules
}

fn latest_value(record: &PatientRecord, needle: &str, default: f64) -> f64 {
    vitals::latest_matching(record, needle).map_or(default, |v| v.value)
}

fn diabetes_module(record: &PatientRecord) -> DiseaseModule {
    let hba1c = latest_value(record, "hba1c", thresholds::MODULE_DEFAULT_HBA1C);
    let glucose = latest_value(record, "glucose", thresholds::DEFAULT_GLUCOSE);

    let risk_level = if hba1c > thresholds::HBA1C_ELEVATED {
        RiskLevel::High
    } else if hba1c > thresholds::HBA1C_TARGET {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    };
    let control = if hba1c > thresholds::HBA1C_TARGET {
        "suboptimal"
    } else {
        "good"
    };

    DiseaseModule {
        id: "diabetes".into(),
        name: "Diabetes Management".into(),
        risk_level,
        recommendations: vec![
            "Monitor blood glucose 2-3 times daily".into(),
            "Follow carbohydrate counting guidelines".into(),
            "Maintain regular exercise routine (150 min/week)".into(),
            "Take medications as prescribed".into(),
            "Schedule quarterly HbA1c tests".into(),
        ],
        metrics: vec![
            ModuleMetric {
                name: "HbA1c".into(),
                value: hba1c,
                target: thresholds::HBA1C_TARGET,
                unit: "%".into(),
                status: if hba1c > thresholds::HBA1C_ELEVATED {
                    MetricStatus::Danger
                } else if hba1c > thresholds::HBA1C_TARGET {
                    MetricStatus::Warning
                } else {
                    MetricStatus::Good
                },
            },
            ModuleMetric {
                name: "Fasting Glucose".into(),
                value: glucose,
                target: thresholds::GLUCOSE_TARGET,
                unit: "mg/dL".into(),
                status: if glucose > thresholds::GLUCOSE_CRITICAL {
                    MetricStatus::Danger
                } else if glucose > thresholds::GLUCOSE_ELEVATED {
                    MetricStatus::Warning
                } else {
                    MetricStatus::Good
                },
            },
        ],
        insights: vec![
            format!(
                "Your HbA1c of {}% indicates {} glucose control",
                hba1c, control
            ),
            "Regular monitoring helps prevent complications".into(),
            "Diet and exercise are key to management".into(),
        ],
        next_actions: vec![
            "Schedule endocrinologist appointment".into(),
            "Review medication timing".into(),
            "Consider continuous glucose monitoring".into(),
        ],
    }
}

fn hypertension_module(record: &PatientRecord) -> DiseaseModule {
    let systolic = latest_value(record, "systolic", thresholds::DEFAULT_SYSTOLIC);
    let diastolic = latest_value(record, "diastolic", thresholds::DEFAULT_DIASTOLIC);

    let risk_level = if systolic > thresholds::SYSTOLIC_CRITICAL
        || diastolic > thresholds::DIASTOLIC_CRITICAL
    {
        RiskLevel::High
    } else if systolic > thresholds::SYSTOLIC_ELEVATED
        || diastolic > thresholds::DIASTOLIC_ELEVATED
    {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    };
    let reading = if systolic > thresholds::SYSTOLIC_ELEVATED {
        "elevated"
    } else {
        "within target"
    };

    DiseaseModule {
        id: "hypertension".into(),
        name: "Blood Pressure Control".into(),
        risk_level,
        recommendations: vec![
            "Monitor blood pressure daily".into(),
            "Reduce sodium intake (<2300mg/day)".into(),
            "Maintain healthy weight".into(),
            "Exercise regularly (30 min/day)".into(),
            "Limit alcohol consumption".into(),
        ],
        metrics: vec![
            ModuleMetric {
                name: "Systolic BP".into(),
                value: systolic,
                target: thresholds::SYSTOLIC_TARGET,
                unit: "mmHg".into(),
                status: if systolic > thresholds::SYSTOLIC_CRITICAL {
                    MetricStatus::Danger
                } else if systolic > thresholds::SYSTOLIC_ELEVATED {
                    MetricStatus::Warning
                } else {
                    MetricStatus::Good
                },
            },
            ModuleMetric {
                name: "Diastolic BP".into(),
                value: diastolic,
                target: thresholds::DIASTOLIC_TARGET,
                unit: "mmHg".into(),
                status: if diastolic > thresholds::DIASTOLIC_CRITICAL {
                    MetricStatus::Danger
                } else if diastolic > thresholds::DIASTOLIC_ELEVATED {
                    MetricStatus::Warning
                } else {
                    MetricStatus::Good
                },
            },
        ],
        insights: vec![
            format!(
                "Blood pressure {}/{} is {}",
                systolic, diastolic, reading
            ),
            "Lifestyle modifications can reduce BP by 10-20 mmHg".into(),
            "Medication adherence is crucial for control".into(),
        ],
        next_actions: vec![
            "Check BP medication timing".into(),
            "Review dietary sodium intake".into(),
            "Consider home BP monitoring".into(),
        ],
    }
}

fn weight_module(record: &PatientRecord) -> Option<DiseaseModule> {
    let weight = latest_value(record, "weight", thresholds::MODULE_DEFAULT_WEIGHT_KG);
    let height_m = thresholds::ASSUMED_HEIGHT_CM / 100.0;
    let bmi = weight / (height_m * height_m);

    if bmi <= thresholds::BMI_OVERWEIGHT {
        return None;
    }

    let risk_level = if bmi > thresholds::BMI_SEVERE {
        RiskLevel::High
    } else if bmi > thresholds::BMI_OBESE {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    };
    let band = if bmi > thresholds::BMI_OBESE {
        "obesity"
    } else {
        "overweight"
    };

    Some(DiseaseModule {
        id: "weight".into(),
        name: "Weight Management".into(),
        risk_level,
        recommendations: vec![
            "Create caloric deficit of 500-750 calories/day".into(),
            "Focus on whole foods and portion control".into(),
            "Increase physical activity gradually".into(),
            "Track food intake and weight weekly".into(),
            "Consider nutritionist consultation".into(),
        ],
        metrics: vec![
            ModuleMetric {
                name: "BMI".into(),
                value: (bmi * 10.0).round() / 10.0,
                target: thresholds::BMI_TARGET,
                unit: "kg/m\u{b2}".into(),
                status: if bmi > thresholds::BMI_SEVERE {
                    MetricStatus::Danger
                } else if bmi > thresholds::BMI_OBESE {
                    MetricStatus::Warning
                } else {
                    MetricStatus::Good
                },
            },
            ModuleMetric {
                name: "Weight".into(),
                value: weight,
                // 10% loss target
                target: weight * 0.9,
                unit: "kg".into(),
                status: if bmi > thresholds::BMI_OBESE {
                    MetricStatus::Warning
                } else {
                    MetricStatus::Good
                },
            },
        ],
        insights: vec![
            format!("BMI of {:.1} indicates {}", bmi, band),
            "Even 5-10% weight loss improves health outcomes".into(),
            "Sustainable lifestyle changes are key".into(),
        ],
        next_actions: vec![
            "Set realistic weight loss goals".into(),
            "Plan balanced meal schedule".into(),
            "Start with 150 minutes exercise/week".into(),
        ],
    })
}

fn cardiac_module(record: &PatientRecord) -> DiseaseModule {
    let heart_rate = latest_value(record, "heart rate", thresholds::DEFAULT_HEART_RATE);
    let out_of_band =
        heart_rate > thresholds::HEART_RATE_HIGH || heart_rate < thresholds::HEART_RATE_LOW;

    let reading = if heart_rate > thresholds::HEART_RATE_HIGH {
        "elevated"
    } else if heart_rate < thresholds::HEART_RATE_LOW {
        "low"
    } else {
        "normal"
    };

    DiseaseModule {
        id: "cardiac".into(),
        name: "Cardiac Health".into(),
        risk_level: if out_of_band {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        },
        recommendations: vec![
            "Follow heart-healthy diet (Mediterranean style)".into(),
            "Take prescribed cardiac medications".into(),
            "Monitor symptoms (chest pain, shortness of breath)".into(),
            "Regular cardiology follow-ups".into(),
            "Manage stress and get adequate sleep".into(),
        ],
        metrics: vec![ModuleMetric {
            name: "Resting HR".into(),
            value: heart_rate,
            target: thresholds::HEART_RATE_TARGET,
            unit: "bpm".into(),
            status: if out_of_band {
                MetricStatus::Warning
            } else {
                MetricStatus::Good
            },
        }],
        insights: vec![
            format!("Resting heart rate of {} bpm is {}", heart_rate, reading),
            "Regular exercise strengthens heart muscle".into(),
            "Stress management reduces cardiac risk".into(),
        ],
        next_actions: vec![
            "Schedule echocardiogram if due".into(),
            "Review cardiac medications".into(),
            "Monitor daily symptoms".into(),
        ],
    }
}
