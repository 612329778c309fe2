//! Personal income tax engine: capped allowances, a personal deduction floor,
//! progressive brackets and withholding credit.

pub mod api;
pub mod batch;
pub mod tax;

pub use tax::{
    calculate, AdminBounds, Allowance, AllowanceKind, CalculationResult, Deductions, TaxError,
    TaxLevel, TaxSettings,
};
