//! Calculate command - single request with per-bracket breakdown

use crate::cmd::read_input;
use clap::Args;
use rust_decimal::Decimal;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};
use taxcalc::api::{CalculationRequest, CalculationResponse};
use taxcalc::{CalculationResult, TaxSettings};

#[derive(Args, Debug)]
pub struct CalculateCommand {
    /// JSON calculation request ("-" for stdin)
    #[arg(short, long, default_value = "-")]
    request: PathBuf,

    /// Output as JSON instead of formatted table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Tabled)]
struct LevelRow {
    #[tabled(rename = "Level")]
    level: String,
    #[tabled(rename = "Tax")]
    tax: String,
}

impl CalculateCommand {
    pub fn exec(&self, settings: &TaxSettings) -> anyhow::Result<()> {
        let input = read_input(&self.request)?;
        let request: CalculationRequest = serde_json::from_slice(&input)?;
        let result = settings.calculate(request.total_income, request.wht, &request.allowances())?;

        if self.json {
            let response = CalculationResponse::from(&result);
            println!("{}", serde_json::to_string_pretty(&response)?);
        } else {
            print_result(&request, &result);
        }
        Ok(())
    }
}

fn print_result(request: &CalculationRequest, result: &CalculationResult) {
    let rows: Vec<_> = result
        .levels
        .iter()
        .map(|level| LevelRow {
            level: level.label.to_string(),
            tax: format_amount(level.amount),
        })
        .collect();
    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string();

    let d = &result.deductions;
    println!();
    println!("INCOME TAX");
    println!(
        "  Income: {} | WHT: {}",
        format_amount(request.total_income),
        format_amount(request.wht)
    );
    println!(
        "  Deductions: personal {} | donation {} | k-receipt {}",
        format_amount(d.personal),
        format_amount(d.donation),
        format_amount(d.k_receipt)
    );
    println!("  Taxable: {}", format_amount(result.taxable_income));
    println!();
    println!("{}", table);
    println!();
    println!(
        "  Tax: {} | Withholding credit: {}",
        format_amount(result.tax_before_withholding),
        format_amount(result.withholding_credit)
    );
    println!("TAX DUE: {}", format_amount(result.tax_due));
    println!();
}

pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount)
}
