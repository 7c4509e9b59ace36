//! Clinical thresholds, scoring weights, and fallback values.
//!
//! Every threshold the engine applies lives here so the knowledge base, the
//! risk scorer, and the recommendation generator can never disagree about
//! when a value counts as elevated. Callers compare against these constants
//! rather than repeating literals.

/// HbA1c above this (%) counts as suboptimal diabetes control.
pub const HBA1C_TARGET: f64 = 7.0;

/// HbA1c above this (%) warrants therapy intensification.
pub const HBA1C_ELEVATED: f64 = 8.0;

/// HbA1c above this (%) counts as poor control and escalates alerts.
pub const HBA1C_CRITICAL: f64 = 9.0;

/// Systolic blood pressure above this (mmHg) counts as hypertension.
pub const SYSTOLIC_ELEVATED: f64 = 140.0;

/// Systolic blood pressure above this (mmHg) counts as severe hypertension.
pub const SYSTOLIC_CRITICAL: f64 = 160.0;

/// Body weight above this (kg) contributes to cardiovascular scoring.
pub const WEIGHT_ELEVATED_KG: f64 = 80.0;

/// Body weight above this (kg) contributes at the higher weight band.
pub const WEIGHT_HIGH_KG: f64 = 90.0;

/// Diastolic blood pressure above this (mmHg) counts as elevated.
pub const DIASTOLIC_ELEVATED: f64 = 90.0;

/// Diastolic blood pressure above this (mmHg) counts as critically elevated.
pub const DIASTOLIC_CRITICAL: f64 = 100.0;

/// Fasting glucose above this (mg/dL) counts as elevated.
pub const GLUCOSE_ELEVATED: f64 = 110.0;

/// Fasting glucose above this (mg/dL) counts as critically elevated.
pub const GLUCOSE_CRITICAL: f64 = 140.0;

// BMI bands used by the weight-management module.
pub const BMI_OVERWEIGHT: f64 = 25.0;
pub const BMI_OBESE: f64 = 30.0;
pub const BMI_SEVERE: f64 = 35.0;

// Resting heart rate outside this band flags the cardiac module.
pub const HEART_RATE_HIGH: f64 = 100.0;
pub const HEART_RATE_LOW: f64 = 50.0;

/// Weight gain above this (kg) within the alert window is abnormal.
pub const WEIGHT_GAIN_ALERT_KG: f64 = 5.0;

/// Weight gain above this (kg) escalates the weight alert to high.
pub const WEIGHT_GAIN_CRITICAL_KG: f64 = 10.0;

/// Window (coarse months) within which a weight gain is alert-worthy.
pub const WEIGHT_GAIN_WINDOW_MONTHS: u32 = 3;

// Trend deltas below these magnitudes are computed but not surfaced.
pub const TREND_HBA1C_SIGNIFICANT: f64 = 0.3;
pub const TREND_SYSTOLIC_SIGNIFICANT: f64 = 10.0;
pub const TREND_WEIGHT_SIGNIFICANT: f64 = 2.0;

// Age bands used by the risk scorer and recommendation generator.
pub const AGE_CARDIOVASCULAR_HIGH: i32 = 50;
pub const AGE_CARDIOVASCULAR_MODERATE: i32 = 40;
pub const AGE_STROKE_HIGH: i32 = 65;
pub const AGE_STROKE_MODERATE: i32 = 55;
pub const AGE_STATIN_REVIEW: i32 = 40;

// Fallback values applied per missing input so a sparse record still yields
// a risk estimate, biased toward these population averages. They are
// placeholders carried for compatibility, not clinically validated priors.
pub const DEFAULT_AGE: i32 = 45;
pub const DEFAULT_SYSTOLIC: f64 = 140.0;
pub const DEFAULT_HBA1C: f64 = 7.8;
pub const DEFAULT_WEIGHT_KG: f64 = 85.0;

// Fallbacks used by the disease-module generator. Its HbA1c and weight
// fallbacks differ from the risk scorer's; both sets are preserved.
pub const MODULE_DEFAULT_HBA1C: f64 = 7.2;
pub const MODULE_DEFAULT_WEIGHT_KG: f64 = 80.0;
pub const DEFAULT_GLUCOSE: f64 = 140.0;
pub const DEFAULT_DIASTOLIC: f64 = 90.0;
pub const DEFAULT_HEART_RATE: f64 = 75.0;

/// Height (cm) assumed for BMI when no height measurement exists.
pub const ASSUMED_HEIGHT_CM: f64 = 170.0;

// Per-metric targets shown alongside current values in module output.
pub const GLUCOSE_TARGET: f64 = 100.0;
pub const SYSTOLIC_TARGET: f64 = 120.0;
pub const DIASTOLIC_TARGET: f64 = 80.0;
pub const HEART_RATE_TARGET: f64 = 70.0;
pub const BMI_TARGET: f64 = 24.9;

// Per-condition score ceilings. Additive contributions are clamped here and
// never reported above the cap.
pub const CARDIOVASCULAR_SCORE_CAP: u8 = 85;
pub const DIABETIC_SCORE_CAP: u8 = 80;
pub const STROKE_SCORE_CAP: u8 = 75;

// Fixed per-condition confidence constants. These are static approximations
// carried through from the source model, not statistical intervals.
pub const CARDIOVASCULAR_CONFIDENCE: u8 = 87;
pub const DIABETIC_CONFIDENCE: u8 = 82;
pub const STROKE_CONFIDENCE: u8 = 79;

/// Case-insensitive substring that marks a condition label as diabetes.
pub const DIABETES_CONDITION: &str = "diabetes";
