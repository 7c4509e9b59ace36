//! Heuristic condition risk scoring.
//!
//! Scores are additive integer contributions from age, vitals, and flags,
//! weighted per condition and clamped to a per-condition cap. They are
//! bounded 0-100 heuristics built from the shared threshold table, not
//! calibrated statistical models; confidence values are fixed per-condition
//! constants, not intervals.
//!
//! Missing inputs fall back to the documented population-average defaults so
//! a sparse record still yields an estimate.

use chrono::NaiveDate;
use cre_types::BoundedScore;
use serde::{Deserialize, Serialize};

use crate::record::PatientRecord;
use crate::thresholds;
use crate::vitals::{self, VitalKind};

/// How strongly one input drives a prediction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Low,
    Moderate,
    High,
}

/// One contributing input to a risk prediction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub name: String,
    pub value: f64,
    pub impact: Impact,
    pub description: String,
}

/// A bounded heuristic estimate of future condition likelihood.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskPrediction {
    pub condition: String,
    pub risk_score: BoundedScore,
    pub timeframe: String,
    pub confidence: BoundedScore,
    pub factors: Vec<RiskFactor>,
    pub recommendations: Vec<String>,
    pub explanation: String,
}

/// Scoring inputs resolved once per evaluation: latest vital of each kind,
/// or the documented default when absent.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ScoreInputs {
    pub age: i32,
    pub systolic: f64,
    pub hba1c: f64,
    pub weight: f64,
}

impl ScoreInputs {
    pub(crate) fn resolve(record: &PatientRecord, today: NaiveDate) -> Self {
        let latest = |kind: VitalKind, default: f64| {
            vitals::latest(record, kind).map_or(default, |v| v.value)
        };
        Self {
            age: record.age_or_default(today),
            systolic: latest(VitalKind::SystolicBp, thresholds::DEFAULT_SYSTOLIC),
            hba1c: latest(VitalKind::HbA1c, thresholds::DEFAULT_HBA1C),
            weight: latest(VitalKind::WeightKg, thresholds::DEFAULT_WEIGHT_KG),
        }
    }
}

/// Risk predictions for the fixed condition set: cardiovascular disease
/// always, diabetic complications when a diabetes condition is recorded,
/// stroke always, in that order.
pub fn predict_risks_at(record: &PatientRecord, today: NaiveDate) -> Vec<RiskPrediction> {
    let inputs = ScoreInputs::resolve(record, today);
    let diabetic = record.has_condition(thresholds::DIABETES_CONDITION);

    let mut predictions = vec![cardiovascular(record, &inputs)];
    if diabetic {
        predictions.push(diabetic_complications(&inputs));
    }
    predictions.push(stroke(&inputs, diabetic));

    for prediction in &predictions {
        tracing::debug!(
            condition = %prediction.condition,
            score = %prediction.risk_score,
            "risk scored"
        );
    }

    predictions
}

fn cardiovascular(record: &PatientRecord, i: &ScoreInputs) -> RiskPrediction {
    let mut score = 0i32;
    score += if i.age > thresholds::AGE_CARDIOVASCULAR_HIGH {
        20
    } else if i.age > thresholds::AGE_CARDIOVASCULAR_MODERATE {
        10
    } else {
        5
    };
    score += if i.systolic > thresholds::SYSTOLIC_CRITICAL {
        25
    } else if i.systolic > thresholds::SYSTOLIC_ELEVATED {
        15
    } else {
        5
    };
    score += if i.hba1c > thresholds::HBA1C_ELEVATED {
        20
    } else if i.hba1c > thresholds::HBA1C_TARGET {
        10
    } else {
        0
    };
    score += if i.weight > thresholds::WEIGHT_HIGH_KG {
        15
    } else if i.weight > thresholds::WEIGHT_ELEVATED_KG {
        10
    } else {
        0
    };
    if record.smoker {
        score += 25;
    }

    RiskPrediction {
        condition: "Cardiovascular Disease".into(),
        risk_score: BoundedScore::clamped(score, Some(thresholds::CARDIOVASCULAR_SCORE_CAP)),
        timeframe: "10 years".into(),
        confidence: BoundedScore::clamped(
            thresholds::CARDIOVASCULAR_CONFIDENCE.into(),
            None,
        ),
        factors: vec![
            RiskFactor {
                name: "Age".into(),
                value: i.age.into(),
                impact: if i.age > thresholds::AGE_CARDIOVASCULAR_HIGH {
                    Impact::High
                } else {
                    Impact::Moderate
                },
                description: "Age is a non-modifiable risk factor".into(),
            },
            RiskFactor {
                name: "Blood Pressure".into(),
                value: i.systolic,
                impact: if i.systolic > thresholds::SYSTOLIC_CRITICAL {
                    Impact::High
                } else if i.systolic > thresholds::SYSTOLIC_ELEVATED {
                    Impact::Moderate
                } else {
                    Impact::Low
                },
                description: "Elevated BP increases cardiovascular risk".into(),
            },
            RiskFactor {
                name: "Diabetes Control".into(),
                value: i.hba1c,
                impact: if i.hba1c > thresholds::HBA1C_ELEVATED {
                    Impact::High
                } else if i.hba1c > thresholds::HBA1C_TARGET {
                    Impact::Moderate
                } else {
                    Impact::Low
                },
                description: "Poor glucose control damages blood vessels".into(),
            },
        ],
        recommendations: vec![
            "Optimize blood pressure control (target <130/80)".into(),
            "Improve diabetes management (HbA1c <7%)".into(),
            "Start statin therapy if indicated".into(),
            "Increase physical activity to 150 min/week".into(),
            "Consider cardiology consultation".into(),
        ],
        explanation: "Based on your current risk factors including age, blood pressure, and diabetes control, you have an elevated risk of developing cardiovascular disease. This prediction uses established clinical risk calculators.".into(),
    }
}

fn diabetic_complications(i: &ScoreInputs) -> RiskPrediction {
    let mut score = 0i32;
    score += if i.hba1c > thresholds::HBA1C_CRITICAL {
        40
    } else if i.hba1c > thresholds::HBA1C_ELEVATED {
        25
    } else if i.hba1c > thresholds::HBA1C_TARGET {
        15
    } else {
        5
    };
    score += if i.systolic > thresholds::SYSTOLIC_ELEVATED {
        20
    } else {
        10
    };
    score += if i.age > thresholds::AGE_CARDIOVASCULAR_HIGH {
        15
    } else {
        5
    };

    RiskPrediction {
        condition: "Diabetic Complications".into(),
        risk_score: BoundedScore::clamped(score, Some(thresholds::DIABETIC_SCORE_CAP)),
        timeframe: "5 years".into(),
        confidence: BoundedScore::clamped(thresholds::DIABETIC_CONFIDENCE.into(), None),
        factors: vec![
            RiskFactor {
                name: "HbA1c Level".into(),
                value: i.hba1c,
                impact: if i.hba1c > thresholds::HBA1C_ELEVATED {
                    Impact::High
                } else {
                    Impact::Moderate
                },
                description: "Primary predictor of diabetic complications".into(),
            },
            RiskFactor {
                name: "Blood Pressure".into(),
                value: i.systolic,
                impact: if i.systolic > thresholds::SYSTOLIC_ELEVATED {
                    Impact::Moderate
                } else {
                    Impact::Low
                },
                description: "Hypertension accelerates diabetic complications".into(),
            },
        ],
        recommendations: vec![
            "Intensive glucose control (HbA1c <7%)".into(),
            "Annual eye exams for retinopathy screening".into(),
            "Regular kidney function monitoring".into(),
            "Foot care and daily inspection".into(),
            "Blood pressure optimization".into(),
        ],
        explanation: "Your current HbA1c level indicates increased risk for diabetic complications including retinopathy, nephropathy, and neuropathy. Early intervention can significantly reduce this risk.".into(),
    }
}

fn stroke(i: &ScoreInputs, diabetic: bool) -> RiskPrediction {
    let mut score = 0i32;
    score += if i.age > thresholds::AGE_STROKE_HIGH {
        25
    } else if i.age > thresholds::AGE_STROKE_MODERATE {
        15
    } else {
        5
    };
    score += if i.systolic > thresholds::SYSTOLIC_CRITICAL {
        20
    } else if i.systolic > thresholds::SYSTOLIC_ELEVATED {
        10
    } else {
        0
    };
    if diabetic {
        score += 15;
    }

    RiskPrediction {
        condition: "Stroke".into(),
        risk_score: BoundedScore::clamped(score, Some(thresholds::STROKE_SCORE_CAP)),
        timeframe: "10 years".into(),
        confidence: BoundedScore::clamped(thresholds::STROKE_CONFIDENCE.into(), None),
        factors: vec![
            RiskFactor {
                name: "Age".into(),
                value: i.age.into(),
                impact: if i.age > thresholds::AGE_STROKE_HIGH {
                    Impact::High
                } else {
                    Impact::Moderate
                },
                description: "Stroke risk doubles every decade after 55".into(),
            },
            RiskFactor {
                name: "Hypertension".into(),
                value: i.systolic,
                impact: if i.systolic > thresholds::SYSTOLIC_CRITICAL {
                    Impact::High
                } else {
                    Impact::Moderate
                },
                description: "Most important modifiable stroke risk factor".into(),
            },
        ],
        recommendations: vec![
            "Aggressive blood pressure management".into(),
            "Consider antiplatelet therapy".into(),
            "Lifestyle modifications (diet, exercise)".into(),
            "Regular monitoring and follow-up".into(),
            "Smoking cessation if applicable".into(),
        ],
        explanation: "Your stroke risk is calculated based on established clinical factors. Blood pressure control is the most effective way to reduce this risk.".into(),
    }
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

    #[test]
    fn sparse_diabetic_record_scores_from_defaults() {
        // No vitals and no date of birth: age 45, systolic 140, HbA1c 7.8,
        // weight 85. Cardiovascular: 10 (age) + 5 (bp) + 10 (a1c) +
        // 10 (weight) = 35.
        let mut record = empty_record();
        record.conditions.push("Type 2 Diabetes".into());

        let predictions = predict_risks_at(&record, today());
        assert_eq!(predictions.len(), 3);
        assert_eq!(predictions[0].condition, "Cardiovascular Disease");
        assert_eq!(predictions[0].risk_score.value(), 35);
        assert_eq!(predictions[1].condition, "Diabetic Complications");
        // 15 (a1c 7.8) + 10 (bp 140) + 5 (age 45) = 30.
        assert_eq!(predictions[1].risk_score.value(), 30);
        assert_eq!(predictions[2].condition, "Stroke");
        // 5 (age 45) + 0 (bp 140) + 15 (diabetes) = 20.
        assert_eq!(predictions[2].risk_score.value(), 20);
    }

    #[test]
    fn non_diabetic_record_skips_complication_prediction() {
        let predictions = predict_risks_at(&empty_record(), today());
        assert_eq!(predictions.len(), 2);
        assert_eq!(predictions[0].condition, "Cardiovascular Disease");
        assert_eq!(predictions[1].condition, "Stroke");
    }

    #[test]
    fn maximised_inputs_are_clamped_to_condition_caps() {
        let mut record = empty_record();
        record.date_of_birth = Some(date(1940, 1, 1));
        record.smoker = true;
        record.conditions.push("Type 2 Diabetes".into());
        record.vitals.push(vital("hbA1c", 12.0, "%", date(2024, 1, 1)));
        record.vitals.push(vital(
            "blood_pressure_systolic",
            190.0,
            "mmHg",
            date(2024, 1, 1),
        ));
        record.vitals.push(vital("weight_kg", 120.0, "kg", date(2024, 1, 1)));

        let predictions = predict_risks_at(&record, today());
        assert_eq!(predictions[0].risk_score.value(), 85);
        assert_eq!(predictions[1].risk_score.value(), 80);
        assert_eq!(predictions[2].risk_score.value(), 75);
    }

    #[test]
    fn factor_impacts_follow_score_thresholds() {
        let mut record = empty_record();
        record.date_of_birth = Some(date(1960, 1, 1));
        record.vitals.push(vital(
            "blood_pressure_systolic",
            165.0,
            "mmHg",
            date(2024, 1, 1),
        ));

        let cv = &predict_risks_at(&record, today())[0];
        let age_factor = &cv.factors[0];
        let bp_factor = &cv.factors[1];
        assert_eq!(age_factor.impact, Impact::High);
        assert_eq!(bp_factor.impact, Impact::High);
        assert_eq!(bp_factor.value, 165.0);
    }

    #[test]
    fn confidence_values_are_fixed_constants() {
        let mut record = empty_record();
        record.conditions.push("diabetes".into());
        let predictions = predict_risks_at(&record, today());
        assert_eq!(predictions[0].confidence.value(), 87);
        assert_eq!(predictions[1].confidence.value(), 82);
        assert_eq!(predictions[2].confidence.value(), 79);
    }
}
