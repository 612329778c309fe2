use super::allowance::{resolve, Allowance, ResolvedDeductions};
use super::brackets::{apportion, total, TaxLevel};
use super::config::Deductions;
use super::error::TaxError;
use super::withholding::{adjust, check_withholding, withholding_credit};
use rust_decimal::Decimal;

/// Outcome of a single income tax calculation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculationResult {
    /// Tax still owed after withholding, never negative
    pub tax_due: Decimal,
    /// Per-bracket breakdown, low to high
    pub levels: [TaxLevel; 5],
    pub deductions: ResolvedDeductions,
    pub taxable_income: Decimal,
    /// Sum of `levels`
    pub tax_before_withholding: Decimal,
    /// Withholding actually credited: `tax_before_withholding - tax_due`
    pub withholding_credit: Decimal,
}

/// Calculate income tax owed.
///
/// Withholding is validated before any deduction work is done. The
/// configuration is read once, from the snapshot passed in.
pub fn calculate(
    total_income: Decimal,
    wht: Decimal,
    allowances: &[Allowance],
    config: &Deductions,
) -> Result<CalculationResult, TaxError> {
    check_withholding(wht, total_income)?;

    let deductions = resolve(allowances, config);
    let taxable_income = (total_income - deductions.total()).max(Decimal::ZERO);
    log::debug!(
        "income={} deductions={:?} taxable={}",
        total_income,
        deductions,
        taxable_income
    );

    let levels = apportion(taxable_income);
    let tax_before_withholding = total(&levels);
    let tax_due = adjust(tax_before_withholding, wht, total_income)?;

    Ok(CalculationResult {
        tax_due,
        levels,
        deductions,
        taxable_income,
        tax_before_withholding,
        withholding_credit: withholding_credit(tax_before_withholding, wht),
    })
}
