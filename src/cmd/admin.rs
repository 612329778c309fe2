//! Admin command - validate a deduction update and report the result
//!
//! The update is applied to this process's settings only, so nothing carries
//! over to a later invocation. Pass `--personal-deduction` or
//! `--k-receipt-cap` to calculate against a different setting.

use crate::cmd::read_input;
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;
use taxcalc::api::{AdminRequest, KReceiptResponse, PersonalDeductionResponse};
use taxcalc::TaxSettings;

#[derive(Args, Debug)]
pub struct AdminCommand {
    /// Setting to update
    #[arg(value_enum)]
    setting: AdminSetting,

    /// New amount. Read from a JSON `{ "amount": N }` request when omitted.
    #[arg(short, long, allow_negative_numbers = true)]
    amount: Option<Decimal>,

    /// JSON admin request ("-" for stdin)
    #[arg(short, long, default_value = "-", conflicts_with = "amount")]
    request: PathBuf,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum AdminSetting {
    /// Personal deduction
    Personal,
    /// K-receipt deduction cap
    KReceipt,
}

impl AdminCommand {
    pub fn exec(&self, settings: &TaxSettings) -> anyhow::Result<()> {
        let amount = match self.amount {
            Some(amount) => amount,
            None => {
                let input = read_input(&self.request)?;
                let request: AdminRequest = serde_json::from_slice(&input)?;
                request.amount
            }
        };

        let json = match self.setting {
            AdminSetting::Personal => {
                let updated = settings.set_personal_deduction(amount)?;
                serde_json::to_string_pretty(&PersonalDeductionResponse {
                    personal_deduction: updated.personal_deduction,
                })?
            }
            AdminSetting::KReceipt => {
                let updated = settings.set_k_receipt_cap(amount)?;
                serde_json::to_string_pretty(&KReceiptResponse {
                    k_receipt_limit_deduction: updated.k_receipt_cap,
                })?
            }
        };
        println!("{}", json);
        Ok(())
    }
}
