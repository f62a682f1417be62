use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{GridError, GridResult};
use crate::models::confidence::{MIN_CONFIDENCE, QUOTED_CONFIDENCE};
use crate::models::tenor::{canonical_label, format_tenor};

/// Editable numeric fields of a tenor point
///
/// `atm`, `confidence`, `extrapolated` and the horizon are derived or set at
/// creation and are deliberately absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuoteField {
    /// Operator adjustment added to the raw ATM level
    Offset,
    /// Quoted or interpolated ATM level before the offset
    AtmRaw,
    /// 10-delta risk reversal
    #[serde(rename = "riskReversal10", alias = "10RR")]
    RiskReversal10,
    /// 10-delta strangle
    #[serde(rename = "strangle10", alias = "10STR")]
    Strangle10,
    /// 25-delta risk reversal
    #[serde(rename = "riskReversal25", alias = "25RR")]
    RiskReversal25,
    /// 25-delta strangle
    #[serde(rename = "strangle25", alias = "25STR")]
    Strangle25,
}

impl QuoteField {
    /// Fields synthesized by term interpolation when a tenor is inserted
    pub const INTERPOLATED: [QuoteField; 5] = [
        QuoteField::AtmRaw,
        QuoteField::RiskReversal10,
        QuoteField::Strangle10,
        QuoteField::RiskReversal25,
        QuoteField::Strangle25,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            QuoteField::Offset => "offset",
            QuoteField::AtmRaw => "atmRaw",
            QuoteField::RiskReversal10 => "riskReversal10",
            QuoteField::Strangle10 => "strangle10",
            QuoteField::RiskReversal25 => "riskReversal25",
            QuoteField::Strangle25 => "strangle25",
        }
    }

    /// Whether editing this field changes the derived ATM level
    pub fn drives_atm(&self) -> bool {
        matches!(self, QuoteField::Offset | QuoteField::AtmRaw)
    }
}

impl fmt::Display for QuoteField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for QuoteField {
    type Err = GridError;

    /// Accepts the camelCase field names and the skew-matrix column headers
    /// (`ATM`, `10RR`, `10STR`, `25RR`, `25STR`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "offset" => Ok(QuoteField::Offset),
            "atmRaw" | "ATM" => Ok(QuoteField::AtmRaw),
            "riskReversal10" | "10RR" => Ok(QuoteField::RiskReversal10),
            "strangle10" | "10STR" => Ok(QuoteField::Strangle10),
            "riskReversal25" | "25RR" => Ok(QuoteField::RiskReversal25),
            "strangle25" | "25STR" => Ok(QuoteField::Strangle25),
            other => Err(GridError::UnknownField(other.to_string())),
        }
    }
}

/// The five quote values of one tenor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSet {
    pub atm_raw: f64,
    pub risk_reversal_10: f64,
    pub strangle_10: f64,
    pub risk_reversal_25: f64,
    pub strangle_25: f64,
}

impl QuoteSet {
    pub fn new(
        atm_raw: f64,
        risk_reversal_10: f64,
        strangle_10: f64,
        risk_reversal_25: f64,
        strangle_25: f64,
    ) -> Self {
        Self {
            atm_raw,
            risk_reversal_10,
            strangle_10,
            risk_reversal_25,
            strangle_25,
        }
    }

    /// Value of an interpolated field. `Offset` is not part of a quote set.
    pub fn get(&self, field: QuoteField) -> Option<f64> {
        match field {
            QuoteField::Offset => None,
            QuoteField::AtmRaw => Some(self.atm_raw),
            QuoteField::RiskReversal10 => Some(self.risk_reversal_10),
            QuoteField::Strangle10 => Some(self.strangle_10),
            QuoteField::RiskReversal25 => Some(self.risk_reversal_25),
            QuoteField::Strangle25 => Some(self.strangle_25),
        }
    }

    pub(crate) fn set(&mut self, field: QuoteField, value: f64) {
        match field {
            QuoteField::Offset => {}
            QuoteField::AtmRaw => self.atm_raw = value,
            QuoteField::RiskReversal10 => self.risk_reversal_10 = value,
            QuoteField::Strangle10 => self.strangle_10 = value,
            QuoteField::RiskReversal25 => self.risk_reversal_25 = value,
            QuoteField::Strangle25 => self.strangle_25 = value,
        }
    }

    fn validate(&self) -> GridResult<()> {
        for field in QuoteField::INTERPOLATED {
            if let Some(value) = self.get(field).filter(|v| !v.is_finite()) {
                return Err(GridError::invalid_quote(field.name(), value));
            }
        }
        Ok(())
    }
}

/// One quoted or synthesized horizon of an instrument's grid
///
/// Fields are private so that the label/horizon pair and the derived ATM level
/// can only change together through the crate's mutation paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "TenorRecord", try_from = "TenorRecord")]
pub struct TenorPoint {
    tenor_label: String,
    months: u32,
    offset: f64,
    quotes: QuoteSet,
    atm: f64,
    confidence: f64,
    extrapolated: bool,
}

impl TenorPoint {
    /// A directly quoted point: zero offset, full confidence, not extrapolated.
    ///
    /// # Example
    ///
    /// ```rust
    /// use surface_grid::{QuoteSet, TenorPoint};
    ///
    /// let point = TenorPoint::quoted("12M", QuoteSet::new(8.2, -0.3, 7.5, -0.2, 7.6)).unwrap();
    /// assert_eq!(point.tenor_label(), "1Y");
    /// assert_eq!(point.months(), 12);
    /// assert_eq!(point.atm(), 8.2);
    /// ```
    pub fn quoted(label: &str, quotes: QuoteSet) -> GridResult<Self> {
        let (tenor_label, months) = canonical_label(label)?;
        quotes.validate()?;
        Ok(Self {
            tenor_label,
            months,
            offset: 0.0,
            atm: quotes.atm_raw,
            quotes,
            confidence: QUOTED_CONFIDENCE,
            extrapolated: false,
        })
    }

    /// A point synthesized by tenor insertion
    pub(crate) fn synthesized(
        months: u32,
        quotes: QuoteSet,
        confidence: f64,
        extrapolated: bool,
    ) -> Self {
        Self {
            tenor_label: format_tenor(months),
            months,
            offset: 0.0,
            atm: quotes.atm_raw,
            quotes,
            confidence,
            extrapolated,
        }
    }

    pub fn tenor_label(&self) -> &str {
        &self.tenor_label
    }

    pub fn months(&self) -> u32 {
        self.months
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn atm_raw(&self) -> f64 {
        self.quotes.atm_raw
    }

    /// Derived ATM level, always `atm_raw + offset`
    pub fn atm(&self) -> f64 {
        self.atm
    }

    pub fn risk_reversal_10(&self) -> f64 {
        self.quotes.risk_reversal_10
    }

    pub fn strangle_10(&self) -> f64 {
        self.quotes.strangle_10
    }

    pub fn risk_reversal_25(&self) -> f64 {
        self.quotes.risk_reversal_25
    }

    pub fn strangle_25(&self) -> f64 {
        self.quotes.strangle_25
    }

    pub fn quotes(&self) -> &QuoteSet {
        &self.quotes
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn extrapolated(&self) -> bool {
        self.extrapolated
    }

    /// Whether the point is a direct quote rather than a synthesized one
    pub fn is_quoted(&self) -> bool {
        self.confidence >= QUOTED_CONFIDENCE
    }

    /// Current value of an editable field
    pub fn field(&self, field: QuoteField) -> f64 {
        match field {
            QuoteField::Offset => self.offset,
            other => self.quotes.get(other).unwrap_or(f64::NAN),
        }
    }

    /// Copy with one field replaced. The derived ATM level is left for the
    /// caller to recompute.
    pub(crate) fn with_field(&self, field: QuoteField, value: f64) -> Self {
        let mut next = self.clone();
        match field {
            QuoteField::Offset => next.offset = value,
            other => next.quotes.set(other, value),
        }
        next
    }

    pub(crate) fn set_atm(&mut self, atm: f64) {
        self.atm = atm;
    }
}

/// External record shape of a tenor point, as exchanged with the display layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenorRecord {
    pub tenor_label: String,
    #[serde(default)]
    pub offset: f64,
    pub atm_raw: f64,
    pub risk_reversal_10: f64,
    pub strangle_10: f64,
    pub risk_reversal_25: f64,
    pub strangle_25: f64,
    #[serde(default = "quoted_confidence")]
    pub confidence: f64,
    #[serde(default)]
    pub extrapolated: bool,
    /// Output only; recomputed from `atm_raw + offset` when read
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atm: Option<f64>,
}

fn quoted_confidence() -> f64 {
    QUOTED_CONFIDENCE
}

impl From<TenorPoint> for TenorRecord {
    fn from(point: TenorPoint) -> Self {
        Self {
            tenor_label: point.tenor_label,
            offset: point.offset,
            atm_raw: point.quotes.atm_raw,
            risk_reversal_10: point.quotes.risk_reversal_10,
            strangle_10: point.quotes.strangle_10,
            risk_reversal_25: point.quotes.risk_reversal_25,
            strangle_25: point.quotes.strangle_25,
            confidence: point.confidence,
            extrapolated: point.extrapolated,
            atm: Some(point.atm),
        }
    }
}

impl TryFrom<TenorRecord> for TenorPoint {
    type Error = GridError;

    /// Rebuilds the horizon from the label and the ATM level from its operands;
    /// any supplied `atm` is ignored.
    fn try_from(record: TenorRecord) -> Result<Self, Self::Error> {
        let (tenor_label, months) = canonical_label(&record.tenor_label)?;

        let quotes = QuoteSet::new(
            record.atm_raw,
            record.risk_reversal_10,
            record.strangle_10,
            record.risk_reversal_25,
            record.strangle_25,
        );
        quotes.validate()?;

        if !record.offset.is_finite() {
            return Err(GridError::invalid_quote("offset", record.offset));
        }
        if !(MIN_CONFIDENCE..=QUOTED_CONFIDENCE).contains(&record.confidence) {
            return Err(GridError::invalid_quote("confidence", record.confidence));
        }
        // Full confidence belongs to quoted points only
        if record.extrapolated && record.confidence >= QUOTED_CONFIDENCE {
            return Err(GridError::invalid_quote("confidence", record.confidence));
        }

        Ok(Self {
            tenor_label,
            months,
            offset: record.offset,
            atm: quotes.atm_raw + record.offset,
            quotes,
            confidence: record.confidence,
            extrapolated: record.extrapolated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quotes() -> QuoteSet {
        QuoteSet::new(8.0, -0.35, 7.6, -0.2, 7.4)
    }

    #[test]
    fn test_quoted_point_defaults() {
        let point = TenorPoint::quoted("3M", quotes()).unwrap();
        assert_eq!(point.months(), 3);
        assert_eq!(point.offset(), 0.0);
        assert_eq!(point.atm(), 8.0);
        assert_eq!(point.confidence(), 1.0);
        assert!(!point.extrapolated());
        assert!(point.is_quoted());
    }

    #[test]
    fn test_quoted_point_rejects_bad_input() {
        assert!(matches!(
            TenorPoint::quoted("3W", quotes()),
            Err(GridError::UnsupportedTenorFormat { .. })
        ));
        let mut bad = quotes();
        bad.strangle_25 = f64::NAN;
        assert!(matches!(
            TenorPoint::quoted("3M", bad),
            Err(GridError::InvalidQuote { ref field, .. }) if field == "strangle25"
        ));
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in QuoteField::INTERPOLATED
            .iter()
            .chain(std::iter::once(&QuoteField::Offset))
        {
            assert_eq!(field.name().parse::<QuoteField>().unwrap(), *field);
        }
        assert_eq!("10RR".parse::<QuoteField>().unwrap(), QuoteField::RiskReversal10);
        assert_eq!("ATM".parse::<QuoteField>().unwrap(), QuoteField::AtmRaw);
        assert_eq!(
            "atm".parse::<QuoteField>(),
            Err(GridError::UnknownField("atm".into()))
        );
        assert!("confidence".parse::<QuoteField>().is_err());
    }

    #[test]
    fn test_record_conversion_recomputes_derived_fields() {
        let record = TenorRecord {
            tenor_label: "24M".into(),
            offset: 0.25,
            atm_raw: 8.0,
            risk_reversal_10: -0.4,
            strangle_10: 7.8,
            risk_reversal_25: -0.2,
            strangle_25: 7.5,
            confidence: 0.73,
            extrapolated: false,
            atm: Some(99.0),
        };
        let point = TenorPoint::try_from(record).unwrap();
        assert_eq!(point.tenor_label(), "2Y");
        assert_eq!(point.months(), 24);
        assert_eq!(point.atm(), 8.25);
        assert_eq!(point.confidence(), 0.73);
    }

    #[test]
    fn test_record_rejects_out_of_range_confidence() {
        let record = TenorRecord {
            tenor_label: "1M".into(),
            offset: 0.0,
            atm_raw: 8.0,
            risk_reversal_10: -0.4,
            strangle_10: 7.8,
            risk_reversal_25: -0.2,
            strangle_25: 7.5,
            confidence: 0.1,
            extrapolated: true,
            atm: None,
        };
        assert!(matches!(
            TenorPoint::try_from(record),
            Err(GridError::InvalidQuote { ref field, .. }) if field == "confidence"
        ));
    }

    #[test]
    fn test_record_rejects_extrapolated_full_confidence() {
        let record = TenorRecord {
            tenor_label: "18M".into(),
            offset: 0.0,
            atm_raw: 8.3,
            risk_reversal_10: -0.27,
            strangle_10: 8.05,
            risk_reversal_25: -0.145,
            strangle_25: 7.75,
            confidence: 1.0,
            extrapolated: true,
            atm: None,
        };
        assert!(matches!(
            TenorPoint::try_from(record.clone()),
            Err(GridError::InvalidQuote { ref field, .. }) if field == "confidence"
        ));

        let point = TenorPoint::try_from(TenorRecord {
            confidence: 0.2,
            ..record
        })
        .unwrap();
        assert!(point.extrapolated());
        assert!(!point.is_quoted());
    }
}
