use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser, Debug)]
#[command(name = "takehome", version, author)]
#[command(about = "Calculate UK take-home pay after Income Tax and National Insurance")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate tax, National Insurance and take-home pay for an income
    Calculate(cmd::calculate::CalculateCommand),
    /// Show the rate tables in use for a tax year
    Rates(cmd::rates::RatesCommand),
    /// Print the JSON schema of a rate table file
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Calculate(command) => command.exec(),
        Command::Rates(command) => command.exec(),
        Command::Schema(command) => command.exec(),
    }
}
