use rust_decimal::Decimal;

/// Caller-correctable failures. None of them leave a partial result behind
/// or touch the shared configuration.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TaxError {
    #[error("invalid withholding tax {wht}: must be between 0 and total income {total_income}")]
    InvalidWithholding { wht: Decimal, total_income: Decimal },
    #[error("deduction amount {amount} outside the allowed range {min}-{max}")]
    InvalidDeductionAmount {
        amount: Decimal,
        min: Decimal,
        max: Decimal,
    },
    #[error("malformed batch row at line {line}: {reason}")]
    MalformedBatchRow { line: u64, reason: String },
}
