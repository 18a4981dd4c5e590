//! Loan terms and the mortgage document exchanged on import/export

mod terms;
pub mod document;

pub use terms::LoanTerms;
pub use document::MortgageDocument;
