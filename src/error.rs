//! Error types shared by the engine, document handling and reports

use thiserror::Error;

/// The constraint a set of loan terms violated
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputConstraint {
    /// Principal must be strictly positive
    NonPositivePrincipal(f64),
    /// Annual rate must not be negative
    NegativeRate(f64),
    /// Duration in years must be strictly positive
    NonPositiveDuration(i64),
    /// `years * 12` must be strictly positive
    NonPositiveTotalPayments(i64),
    /// A numeric input was NaN or infinite
    NonFinite { field: &'static str, value: f64 },
    /// Durations are whole years
    FractionalDuration(f64),
    /// More periods than a schedule can index
    TooManyPayments(i64),
    /// Term longer than the configured limit
    DurationTooLong { years: i32, max: i32 },
}

impl std::fmt::Display for InputConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositivePrincipal(v) => write!(f, "principal must be positive, got {}", v),
            Self::NegativeRate(v) => write!(f, "annual rate must not be negative, got {}%", v),
            Self::NonPositiveDuration(v) => write!(f, "duration must be positive, got {} years", v),
            Self::NonPositiveTotalPayments(v) => {
                write!(f, "total number of payments must be positive, got {}", v)
            }
            Self::NonFinite { field, value } => write!(f, "{} must be finite, got {}", field, value),
            Self::FractionalDuration(v) => {
                write!(f, "duration must be a whole number of years, got {}", v)
            }
            Self::TooManyPayments(v) => write!(f, "{} payments exceed the schedule limit", v),
            Self::DurationTooLong { years, max } => {
                write!(f, "duration of {} years exceeds the {}-year limit", years, max)
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum MortgageError {
    #[error("Invalid input: {0}")]
    InvalidInput(InputConstraint),

    #[error("Invalid mortgage document: {0}")]
    InvalidDocument(String),

    #[error("Payment {month} falls outside the supported calendar range from {start}")]
    DateOutOfRange { start: chrono::NaiveDate, month: u32 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MortgageError {
    /// The violated constraint, if this is an input error
    pub fn constraint(&self) -> Option<InputConstraint> {
        match self {
            Self::InvalidInput(c) => Some(*c),
            _ => None,
        }
    }
}

impl From<InputConstraint> for MortgageError {
    fn from(constraint: InputConstraint) -> Self {
        Self::InvalidInput(constraint)
    }
}

pub type MortgageResult<T> = Result<T, MortgageError>;
