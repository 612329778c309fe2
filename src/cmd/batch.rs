//! Batch command - tax for every row of a CSV upload

use crate::cmd::calculate::format_amount;
use crate::cmd::read_input;
use clap::Args;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};
use taxcalc::api::{BatchResponse, BatchTax};
use taxcalc::batch::{calculate_batch, read_batch, BatchResult};
use taxcalc::TaxSettings;

#[derive(Args, Debug)]
pub struct BatchCommand {
    /// CSV file with a totalIncome,wht,donation header ("-" for stdin)
    #[arg(short, long)]
    file: PathBuf,

    /// Output as JSON instead of formatted table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Tabled)]
struct TaxRow {
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "WHT")]
    wht: String,
    #[tabled(rename = "Donation")]
    donation: String,
    #[tabled(rename = "Taxable")]
    taxable: String,
    #[tabled(rename = "Tax")]
    tax: String,
}

impl BatchCommand {
    pub fn exec(&self, settings: &TaxSettings) -> anyhow::Result<()> {
        let input = read_input(&self.file)?;
        let entries = read_batch(input.as_slice())?;
        let results = calculate_batch(&entries, &settings.snapshot())?;

        if self.json {
            let response = BatchResponse {
                taxes: results
                    .iter()
                    .map(|r| BatchTax {
                        total_income: r.row.total_income,
                        tax: r.result.tax_due,
                    })
                    .collect(),
            };
            println!("{}", serde_json::to_string_pretty(&response)?);
        } else {
            print_table(&results);
        }
        Ok(())
    }
}

fn print_table(results: &[BatchResult]) {
    if results.is_empty() {
        println!("No rows found");
        return;
    }

    let rows: Vec<_> = results
        .iter()
        .map(|r| TaxRow {
            income: format_amount(r.row.total_income),
            wht: format_amount(r.row.wht),
            donation: format_amount(r.row.donation),
            taxable: format_amount(r.result.taxable_income),
            tax: format_amount(r.result.tax_due),
        })
        .collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{}", table);
}
