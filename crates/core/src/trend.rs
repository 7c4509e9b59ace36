//! Directional trend analysis over a vital series.
//!
//! A trend compares the earliest and latest observation of one vital kind.
//! Fewer than two observations means insufficient data and no trend. Deltas
//! are always computed; they are only surfaced in the composed summary when
//! they exceed the per-kind significance threshold.

use serde::{Deserialize, Serialize};

use crate::record::PatientRecord;
use crate::thresholds;
use crate::vitals::{self, VitalKind};

/// Direction of change between the earliest and latest observation.
///
/// HbA1c trends read clinically (improving/deteriorating); blood pressure
/// and weight trends read numerically (increasing/decreasing).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Deteriorating,
    Increasing,
    Decreasing,
    Stable,
}

/// Change between the earliest and latest observation of one vital kind.
#[derive(Clone, Debug, PartialEq)]
pub struct VitalTrend {
    pub kind: VitalKind,
    pub first_value: f64,
    pub last_value: f64,
    pub first_date: chrono::NaiveDate,
    pub last_date: chrono::NaiveDate,
    pub delta: f64,
    pub direction: TrendDirection,
    pub elapsed_months: u32,
}

impl VitalTrend {
    /// Whether the delta magnitude exceeds the kind-specific threshold for
    /// surfacing in the summary.
    pub fn is_significant(&self) -> bool {
        let threshold = match self.kind {
            VitalKind::HbA1c => thresholds::TREND_HBA1C_SIGNIFICANT,
            VitalKind::SystolicBp => thresholds::TREND_SYSTOLIC_SIGNIFICANT,
            VitalKind::WeightKg => thresholds::TREND_WEIGHT_SIGNIFICANT,
        };
        self.delta.abs() > threshold
    }

    /// Summary wording for this trend, e.g. "HbA1c deteriorating by 0.5%".
    pub fn phrase(&self) -> String {
        let magnitude = self.delta.abs();
        match self.kind {
            VitalKind::HbA1c => {
                let word = if self.delta > 0.0 { "deteriorating" } else { "improving" };
                format!("HbA1c {} by {:.1}%", word, magnitude)
            }
            VitalKind::SystolicBp => {
                let word = if self.delta > 0.0 { "increasing" } else { "decreasing" };
                format!("blood pressure {} by {}mmHg", word, magnitude)
            }
            VitalKind::WeightKg => {
                let word = if self.delta > 0.0 { "gain" } else { "loss" };
                format!("{:.1}kg weight {}", magnitude, word)
            }
        }
    }
}

/// Analyzes the trend for one vital kind, or returns `None` when fewer than
/// two observations of that kind exist.
pub fn analyze(record: &PatientRecord, kind: VitalKind) -> Option<VitalTrend> {
    let series = vitals::series(record, kind);
    if series.len() < 2 {
        return None;
    }

    let first = series[0];
    let last = series[series.len() - 1];
    let delta = last.value - first.value;

    let direction = if delta == 0.0 {
        TrendDirection::Stable
    } else {
        match kind {
            VitalKind::HbA1c => {
                if delta > 0.0 {
                    TrendDirection::Deteriorating
                } else {
                    TrendDirection::Improving
                }
            }
            VitalKind::SystolicBp | VitalKind::WeightKg => {
                if delta > 0.0 {
                    TrendDirection::Increasing
                } else {
                    TrendDirection::Decreasing
                }
            }
        }
    };

    Some(VitalTrend {
        kind,
        first_value: first.value,
        last_value: last.value,
        first_date: first.date,
        last_date: last.date,
        delta,
        direction,
        elapsed_months: vitals::months_between(first.date, last.date),
    })
}

/// Phrases for every significant trend, in fixed kind order (HbA1c, then
/// systolic blood pressure, then weight).
pub fn significant_trends(record: &PatientRecord) -> Vec<String> {
    [VitalKind::HbA1c, VitalKind::SystolicBp, VitalKind::WeightKg]
        .into_iter()
        .filter_map(|kind| analyze(record, kind))
        .filter(VitalTrend::is_significant)
        .map(|trend| trend.phrase())
        .collect()
}
