//! Fields that are deterministic functions of a point's other fields
//!
//! - ATM level: `atm = atm_raw + offset`
//! - Smile series: five (strike label, volatility) pairs for display

use serde::{Deserialize, Serialize};
use std::fmt;

use super::point::TenorPoint;

/// Recompute the derived ATM level of a point.
pub fn recompute_atm(point: &TenorPoint) -> TenorPoint {
    let mut next = point.clone();
    next.set_atm(point.atm_raw() + point.offset());
    next
}

/// Strike buckets of the displayed smile, in plotting order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrikeLabel {
    #[serde(rename = "25DPut")]
    Put25,
    #[serde(rename = "10DPut")]
    Put10,
    #[serde(rename = "ATM")]
    Atm,
    #[serde(rename = "10DCall")]
    Call10,
    #[serde(rename = "25DCall")]
    Call25,
}

impl StrikeLabel {
    pub const ORDER: [StrikeLabel; 5] = [
        StrikeLabel::Put25,
        StrikeLabel::Put10,
        StrikeLabel::Atm,
        StrikeLabel::Call10,
        StrikeLabel::Call25,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StrikeLabel::Put25 => "25DPut",
            StrikeLabel::Put10 => "10DPut",
            StrikeLabel::Atm => "ATM",
            StrikeLabel::Call10 => "10DCall",
            StrikeLabel::Call25 => "25DCall",
        }
    }
}

impl fmt::Display for StrikeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmilePoint {
    pub strike: StrikeLabel,
    pub volatility: f64,
}

/// Smile of one tenor, ordered as [`StrikeLabel::ORDER`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmileSeries {
    pub tenor_label: String,
    pub months: u32,
    pub points: Vec<SmilePoint>,
}

impl SmileSeries {
    /// Volatility at a strike bucket
    pub fn volatility(&self, strike: StrikeLabel) -> Option<f64> {
        self.points
            .iter()
            .find(|p| p.strike == strike)
            .map(|p| p.volatility)
    }
}

/// Project a point onto its five-strike smile.
///
/// The puts read the strangle quotes directly and the calls add the risk
/// reversals to the ATM level:
///
/// ```text
/// 25DPut  = strangle25
/// 10DPut  = strangle10
/// ATM     = atm
/// 10DCall = atm + riskReversal10
/// 25DCall = atm + riskReversal25
/// ```
pub fn project_smile(point: &TenorPoint) -> SmileSeries {
    let atm = point.atm();
    let volatility = |strike: StrikeLabel| match strike {
        StrikeLabel::Put25 => point.strangle_25(),
        StrikeLabel::Put10 => point.strangle_10(),
        StrikeLabel::Atm => atm,
        StrikeLabel::Call10 => atm + point.risk_reversal_10(),
        StrikeLabel::Call25 => atm + point.risk_reversal_25(),
    };

    SmileSeries {
        tenor_label: point.tenor_label().to_string(),
        months: point.months(),
        points: StrikeLabel::ORDER
            .iter()
            .map(|&strike| SmilePoint {
                strike,
                volatility: volatility(strike),
            })
            .collect(),
    }
}
