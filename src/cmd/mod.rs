pub mod admin;
pub mod batch;
pub mod calculate;
pub mod details;
pub mod schema;

use anyhow::Context;
use clap::Args;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use taxcalc::{AdminBounds, Deductions, TaxSettings};

/// Start-up deduction settings. Overrides go through the same admin checks
/// as a runtime update.
#[derive(Args, Debug)]
pub struct SettingsArgs {
    /// Personal deduction (must be within the admin bounds)
    #[arg(long, global = true, env = "TAXCALC_PERSONAL_DEDUCTION")]
    personal_deduction: Option<Decimal>,

    /// K-receipt deduction cap (must be within the admin bounds)
    #[arg(long, global = true, env = "TAXCALC_K_RECEIPT_CAP")]
    k_receipt_cap: Option<Decimal>,

    /// Lowest amount an admin update may set
    #[arg(long, global = true, default_value = "10000")]
    admin_min: Decimal,

    /// Highest amount an admin update may set
    #[arg(long, global = true, default_value = "100000")]
    admin_max: Decimal,
}

impl SettingsArgs {
    pub fn build(&self) -> anyhow::Result<TaxSettings> {
        if self.admin_min > self.admin_max {
            anyhow::bail!(
                "--admin-min {} is greater than --admin-max {}",
                self.admin_min,
                self.admin_max
            );
        }
        let bounds = AdminBounds {
            min: self.admin_min,
            max: self.admin_max,
        };
        let settings = TaxSettings::new(Deductions::default(), bounds);
        if let Some(amount) = self.personal_deduction {
            settings.set_personal_deduction(amount)?;
        }
        if let Some(amount) = self.k_receipt_cap {
            settings.set_k_receipt_cap(amount)?;
        }
        Ok(settings)
    }
}

/// Read a whole input file, or stdin when the path is "-"
pub fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    if path.as_os_str() == "-" {
        let stdin = io::stdin();
        BufReader::new(stdin.lock()).read_to_end(&mut buffer)?;
        if buffer.is_empty() {
            anyhow::bail!("No input received. Provide a file or pipe data to stdin.");
        }
    } else {
        let file = File::open(path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        BufReader::new(file).read_to_end(&mut buffer)?;
    }
    Ok(buffer)
}
