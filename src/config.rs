//! Resolution of loan terms from command-line flags, a mortgage document,
//! environment variables and built-in defaults (in that order of precedence)

use std::env;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::{InputConstraint, MortgageResult};
use crate::loan::document::parse_start_date;
use crate::loan::{LoanTerms, MortgageDocument};

pub const ENV_PRINCIPAL: &str = "MORTGAGE_PRINCIPAL";
pub const ENV_RATE: &str = "MORTGAGE_RATE";
pub const ENV_YEARS: &str = "MORTGAGE_YEARS";
pub const ENV_START_DATE: &str = "MORTGAGE_START_DATE";

/// Longest term accepted before a schedule is generated
pub const MAX_YEARS: i32 = 100;

/// One layer of optional loan settings
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TermsOverrides {
    pub principal: Option<f64>,
    pub annual_rate_percent: Option<f64>,
    pub years: Option<i32>,
    pub start_date: Option<NaiveDate>,
}

impl TermsOverrides {
    /// Read the `MORTGAGE_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unparsable values are logged and skipped
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        Self {
            principal: parse_var(&lookup, ENV_PRINCIPAL),
            annual_rate_percent: parse_var(&lookup, ENV_RATE),
            years: parse_var(&lookup, ENV_YEARS),
            start_date: lookup(ENV_START_DATE).and_then(|s| match parse_start_date(&s) {
                Ok(date) => Some(date),
                Err(e) => {
                    log::warn!("Ignoring {}: {}", ENV_START_DATE, e);
                    None
                }
            }),
        }
    }

    /// Settings carried by an imported document
    ///
    /// # Errors
    /// The document's terms must be valid on their own.
    pub fn from_document(document: &MortgageDocument) -> MortgageResult<Self> {
        let terms = document.to_terms()?;
        Ok(Self {
            principal: Some(terms.principal),
            annual_rate_percent: Some(terms.annual_rate_percent),
            years: Some(terms.years),
            start_date: document.start_date,
        })
    }

    /// Fill unset fields from a lower-precedence layer
    pub fn or(self, fallback: Self) -> Self {
        Self {
            principal: self.principal.or(fallback.principal),
            annual_rate_percent: self.annual_rate_percent.or(fallback.annual_rate_percent),
            years: self.years.or(fallback.years),
            start_date: self.start_date.or(fallback.start_date),
        }
    }

    /// Apply built-in defaults and validate
    pub fn resolve(self) -> MortgageResult<ResolvedTerms> {
        let defaults = LoanTerms::default();
        let terms = LoanTerms::new(
            self.principal.unwrap_or(defaults.principal),
            self.annual_rate_percent.unwrap_or(defaults.annual_rate_percent),
            self.years.unwrap_or(defaults.years),
        );

        terms.validate()?;
        if terms.years > MAX_YEARS {
            return Err(InputConstraint::DurationTooLong {
                years: terms.years,
                max: MAX_YEARS,
            }
            .into());
        }

        log::info!(
            "Loan terms: principal={} rate={}% years={}",
            terms.principal,
            terms.annual_rate_percent,
            terms.years
        );

        Ok(ResolvedTerms {
            terms,
            start_date: self.start_date,
        })
    }
}

/// Validated terms plus an optional first payment date
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedTerms {
    pub terms: LoanTerms,
    pub start_date: Option<NaiveDate>,
}

fn parse_var<T: FromStr, F: Fn(&str) -> Option<String>>(lookup: &F, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("Ignoring {}={:?}: not a valid number", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let resolved = TermsOverrides::default().resolve().unwrap();
        assert_eq!(resolved.terms, LoanTerms::default());
        assert_eq!(resolved.start_date, None);
    }

    #[test]
    fn test_env_values_parsed() {
        let overrides = TermsOverrides::from_lookup(lookup(&[
            (ENV_PRINCIPAL, "150000"),
            (ENV_RATE, " 4.25 "),
            (ENV_YEARS, "20"),
            (ENV_START_DATE, "2025-06-01"),
        ]));

        assert_eq!(overrides.principal, Some(150_000.0));
        assert_eq!(overrides.annual_rate_percent, Some(4.25));
        assert_eq!(overrides.years, Some(20));
        assert_eq!(overrides.start_date, NaiveDate::from_ymd_opt(2025, 6, 1));
    }

    #[test]
    fn test_bad_env_values_ignored() {
        let overrides = TermsOverrides::from_lookup(lookup(&[
            (ENV_PRINCIPAL, "lots"),
            (ENV_YEARS, "12.5"),
            (ENV_START_DATE, "someday"),
        ]));
        assert_eq!(overrides, TermsOverrides::default());
    }

    #[test]
    fn test_precedence() {
        let cli = TermsOverrides {
            principal: Some(90_000.0),
            ..Default::default()
        };
        let document = MortgageDocument {
            principal: 120_000.0,
            interest_rate: 3.5,
            duration: 15.0,
            start_date: None,
        };
        let env = TermsOverrides {
            annual_rate_percent: Some(7.0),
            start_date: NaiveDate::from_ymd_opt(2030, 1, 1),
            ..Default::default()
        };

        let resolved = cli
            .or(TermsOverrides::from_document(&document).unwrap())
            .or(env)
            .resolve()
            .unwrap();

        assert_eq!(resolved.terms, LoanTerms::new(90_000.0, 3.5, 15));
        assert_eq!(resolved.start_date, NaiveDate::from_ymd_opt(2030, 1, 1));
    }

    #[test]
    fn test_resolve_rejects_invalid_and_overlong_terms() {
        let negative = TermsOverrides {
            annual_rate_percent: Some(-2.0),
            ..Default::default()
        };
        assert_eq!(
            negative.resolve().unwrap_err().constraint(),
            Some(InputConstraint::NegativeRate(-2.0))
        );

        let overlong = TermsOverrides {
            years: Some(MAX_YEARS + 1),
            ..Default::default()
        };
        let err = overlong.resolve().unwrap_err();
        assert_eq!(
            err.constraint(),
            Some(InputConstraint::DurationTooLong {
                years: MAX_YEARS + 1,
                max: MAX_YEARS
            })
        );
        assert_eq!(
            err.to_string(),
            "Invalid input: duration of 101 years exceeds the 100-year limit"
        );

        let at_limit = TermsOverrides {
            years: Some(MAX_YEARS),
            ..Default::default()
        };
        assert_eq!(at_limit.resolve().unwrap().terms.years, MAX_YEARS);
    }
}
