//! Schema command - print expected input and output formats

use clap::Args;
use schemars::schema_for;
use taxcalc::api::{AdminRequest, BatchResponse, CalculationRequest, CalculationResponse};
use taxcalc::batch::BatchRow;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Format to print
    #[arg(value_enum, default_value = "request")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for a calculation request
    Request,
    /// JSON Schema for a calculation response
    Response,
    /// JSON Schema for a batch response
    BatchResponse,
    /// JSON Schema for an admin request
    Admin,
    /// CSV header row for batch input
    BatchHeader,
    /// CSV column descriptions for batch input
    BatchFields,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let schema = match self.format {
            SchemaFormat::Request => schema_for!(CalculationRequest),
            SchemaFormat::Response => schema_for!(CalculationResponse),
            SchemaFormat::BatchResponse => schema_for!(BatchResponse),
            SchemaFormat::Admin => schema_for!(AdminRequest),
            SchemaFormat::BatchHeader => {
                println!("{}", BatchRow::csv_header());
                return Ok(());
            }
            SchemaFormat::BatchFields => {
                print_batch_fields();
                return Ok(());
            }
        };
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }
}

fn print_batch_fields() {
    println!("CSV Batch Format");
    println!("================");
    println!();
    for column in BatchRow::csv_columns() {
        println!("{:12} (required)  {}", column.name, column.description);
    }
    println!();
    println!("Decimal commas are accepted in quoted fields, e.g. \"1234,50\"");
}
