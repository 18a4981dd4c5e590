//! Mortgage document: the raw-terms JSON shape used for import and export
//!
//! Only loan inputs are carried, never computed results:
//! `{ "principal": 200000, "interestRate": 5, "duration": 30, "startDate": "2024-01-15" }`

use std::io::{Read, Write};

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use super::LoanTerms;
use crate::error::{InputConstraint, MortgageError, MortgageResult};

/// Numeric fields every imported document must carry
const REQUIRED_NUMBERS: [&str; 3] = ["principal", "interestRate", "duration"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MortgageDocument {
    pub principal: f64,
    pub interest_rate: f64,
    pub duration: f64,
    #[serde(default, with = "start_date_format")]
    pub start_date: Option<NaiveDate>,
}

impl MortgageDocument {
    /// Document exported when nothing has been stored yet
    pub fn empty() -> Self {
        Self {
            principal: 0.0,
            interest_rate: 0.0,
            duration: 0.0,
            start_date: None,
        }
    }

    pub fn from_terms(terms: &LoanTerms, start_date: Option<NaiveDate>) -> Self {
        Self {
            principal: terms.principal,
            interest_rate: terms.annual_rate_percent,
            duration: f64::from(terms.years),
            start_date,
        }
    }

    /// Parse a document, rejecting any whose loan inputs are missing or not numbers
    pub fn from_json(json: &str) -> MortgageResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    pub fn from_reader<R: Read>(reader: R) -> MortgageResult<Self> {
        let value: serde_json::Value = serde_json::from_reader(reader)?;
        Self::from_value(value)
    }

    fn from_value(value: serde_json::Value) -> MortgageResult<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| MortgageError::InvalidDocument("expected a JSON object".to_string()))?;

        for field in REQUIRED_NUMBERS {
            match object.get(field) {
                Some(v) if v.is_number() => {}
                Some(v) => {
                    log::warn!("Rejecting mortgage document: {} is {}", field, v);
                    return Err(MortgageError::InvalidDocument(format!(
                        "field '{}' must be a number",
                        field
                    )));
                }
                None => {
                    log::warn!("Rejecting mortgage document: {} is missing", field);
                    return Err(MortgageError::InvalidDocument(format!(
                        "missing field '{}'",
                        field
                    )));
                }
            }
        }

        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json(&self) -> MortgageResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> MortgageResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_writer<W: Write>(&self, writer: W) -> MortgageResult<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Convert to validated loan terms
    ///
    /// Durations are whole years; a fractional duration is an input error.
    pub fn to_terms(&self) -> MortgageResult<LoanTerms> {
        if !self.duration.is_finite() {
            return Err(InputConstraint::NonFinite {
                field: "duration",
                value: self.duration,
            }
            .into());
        }
        if self.duration.fract() != 0.0 {
            return Err(InputConstraint::FractionalDuration(self.duration).into());
        }
        if self.duration <= 0.0 {
            return Err(InputConstraint::NonPositiveDuration(self.duration as i64).into());
        }
        if self.duration > f64::from(i32::MAX) {
            return Err(MortgageError::InvalidDocument(format!(
                "duration {} is out of range",
                self.duration
            )));
        }

        let terms = LoanTerms::new(self.principal, self.interest_rate, self.duration as i32);
        terms.validate()?;
        Ok(terms)
    }
}

impl Default for MortgageDocument {
    fn default() -> Self {
        Self::empty()
    }
}

/// Start dates are written as `YYYY-MM-DD`; full RFC 3339 timestamps are
/// accepted on read and truncated to their date.
mod start_date_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => serializer.serialize_str(&d.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(s) if s.is_empty() => Ok(None),
            Some(s) => super::parse_start_date(&s).map(Some).map_err(serde::de::Error::custom),
        }
    }
}

/// Parse either a calendar date or an RFC 3339 timestamp
pub fn parse_start_date(s: &str) -> Result<NaiveDate, String> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.date_naive())
        .map_err(|_| format!("invalid start date '{}'", s))
}
