pub mod allowance;
pub mod brackets;
pub mod calculate;
pub mod config;
pub mod error;
pub mod withholding;

pub use allowance::{resolve, Allowance, AllowanceKind, ResolvedDeductions};
pub use brackets::{apportion, progressive_tax, TaxLevel, BRACKETS};
pub use calculate::{calculate, CalculationResult};
pub use config::{AdminBounds, Deductions, TaxSettings};
pub use error::TaxError;
