use super::error::TaxError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Most withholding tax that can be credited against the computed liability
pub const WITHHOLDING_CAP: Decimal = dec!(100000);

/// Reject withholding that is negative or larger than the income it was
/// withheld from. Unlike allowances, this is never clamped.
pub fn check_withholding(wht: Decimal, total_income: Decimal) -> Result<(), TaxError> {
    if wht < Decimal::ZERO || wht > total_income {
        return Err(TaxError::InvalidWithholding { wht, total_income });
    }
    Ok(())
}

/// Credit withholding against the bracket total. Never goes below zero.
pub fn adjust(
    tax_before_withholding: Decimal,
    wht: Decimal,
    total_income: Decimal,
) -> Result<Decimal, TaxError> {
    check_withholding(wht, total_income)?;
    let capped = wht.min(WITHHOLDING_CAP);
    Ok((tax_before_withholding - capped).max(Decimal::ZERO))
}

/// Portion of the (capped) withholding actually used up by the liability
pub fn withholding_credit(tax_before_withholding: Decimal, wht: Decimal) -> Decimal {
    wht.max(Decimal::ZERO)
        .min(WITHHOLDING_CAP)
        .min(tax_before_withholding.max(Decimal::ZERO))
}
