//! JSON request and response shapes exchanged with callers.

use crate::tax::{Allowance, AllowanceKind, CalculationResult, Deductions};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Single calculation request
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRequest {
    /// Total annual income
    #[schemars(with = "f64")]
    pub total_income: Decimal,
    /// Withholding tax already paid, between 0 and total income
    #[serde(default)]
    #[schemars(with = "f64")]
    pub wht: Decimal,
    #[serde(default)]
    pub allowances: Vec<AllowanceRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AllowanceRequest {
    /// "donation" or "k-receipt"
    pub allowance_type: String,
    #[schemars(with = "f64")]
    pub amount: Decimal,
}

impl CalculationRequest {
    /// Allowances the engine understands. Unknown types are skipped.
    pub fn allowances(&self) -> Vec<Allowance> {
        self.allowances
            .iter()
            .filter_map(|a| match AllowanceKind::from_str(&a.allowance_type) {
                Some(kind) => Some(Allowance::new(kind, a.amount)),
                None => {
                    log::warn!("Ignoring unknown allowance type: {}", a.allowance_type);
                    None
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResponse {
    #[serde(with = "rust_decimal::serde::float")]
    #[schemars(with = "f64")]
    pub tax: Decimal,
    pub tax_level: Vec<TaxLevelResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TaxLevelResponse {
    pub level: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schemars(with = "f64")]
    pub tax: Decimal,
}

impl From<&CalculationResult> for CalculationResponse {
    fn from(result: &CalculationResult) -> Self {
        CalculationResponse {
            tax: result.tax_due,
            tax_level: result
                .levels
                .iter()
                .map(|level| TaxLevelResponse {
                    level: level.label.to_string(),
                    tax: level.amount,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BatchResponse {
    pub taxes: Vec<BatchTax>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchTax {
    #[serde(with = "rust_decimal::serde::float")]
    #[schemars(with = "f64")]
    pub total_income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schemars(with = "f64")]
    pub tax: Decimal,
}

/// Admin update of a deduction setting
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AdminRequest {
    #[schemars(with = "f64")]
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonalDeductionResponse {
    #[serde(with = "rust_decimal::serde::float")]
    #[schemars(with = "f64")]
    pub personal_deduction: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KReceiptResponse {
    #[serde(with = "rust_decimal::serde::float")]
    #[schemars(with = "f64")]
    pub k_receipt_limit_deduction: Decimal,
}

/// Current deduction settings
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DetailsResponse {
    #[serde(with = "rust_decimal::serde::float")]
    #[schemars(with = "f64")]
    pub personal_deduction: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schemars(with = "f64")]
    pub k_receipt_limit_deduction: Decimal,
}

impl From<Deductions> for DetailsResponse {
    fn from(deductions: Deductions) -> Self {
        DetailsResponse {
            personal_deduction: deductions.personal_deduction,
            k_receipt_limit_deduction: deductions.k_receipt_cap,
        }
    }
}
