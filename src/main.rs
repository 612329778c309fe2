use clap::{Parser, Subcommand};

mod cmd;

use cmd::{
    admin::AdminCommand, batch::BatchCommand, calculate::CalculateCommand,
    details::DetailsCommand, schema::SchemaCommand, SettingsArgs,
};

#[derive(Parser, Debug)]
#[command(name = "taxcalc", version, about = "Calculate personal income tax")]
struct Cli {
    #[command(flatten)]
    settings: SettingsArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate tax for a single JSON request
    Calculate(CalculateCommand),
    /// Calculate tax for every row of a CSV file
    Batch(BatchCommand),
    /// Validate a deduction update and report the resulting setting.
    /// Settings do not outlive the process; use --personal-deduction or
    /// --k-receipt-cap to apply one to a calculation.
    Admin(AdminCommand),
    /// Show the current deduction settings
    Details(DetailsCommand),
    /// Print expected input and output formats
    Schema(SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    let settings = cli.settings.build()?;

    match cli.command {
        Command::Calculate(command) => command.exec(&settings),
        Command::Batch(command) => command.exec(&settings),
        Command::Admin(command) => command.exec(&settings),
        Command::Details(command) => command.exec(&settings),
        Command::Schema(command) => command.exec(),
    }
}
