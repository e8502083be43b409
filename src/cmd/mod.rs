pub mod calculate;
pub mod rates;
pub mod schema;

use clap::Args;
use std::path::PathBuf;
use takehome::config::{self, RateSources};
use takehome::tax::{RateTables, TaxYear};
use takehome::Money;

/// Rate table selection shared by the commands that calculate or display rates
#[derive(Args, Debug)]
pub struct RateArgs {
    /// Tax year (e.g., 2025 or 2024/25); defaults to the current tax year
    #[arg(short, long)]
    year: Option<TaxYear>,

    /// JSON file with income tax rates, replacing the built-in table
    #[arg(long, value_name = "FILE")]
    income_tax_rates: Option<PathBuf>,

    /// JSON file with National Insurance rates, replacing the built-in table
    #[arg(long, value_name = "FILE")]
    ni_rates: Option<PathBuf>,
}

impl RateArgs {
    /// Requested year, or the current one. Falls back to the latest built-in
    /// year when no year was asked for and a built-in table is needed.
    fn year(&self) -> TaxYear {
        if let Some(year) = self.year {
            return year;
        }
        let current = TaxYear::current();
        let needs_builtin = self.income_tax_rates.is_none() || self.ni_rates.is_none();
        if needs_builtin && !config::builtin_years().any(|y| y == current) {
            let latest = config::latest_builtin_year();
            log::warn!("No built-in rates for {current}, using {latest}");
            return latest;
        }
        current
    }

    /// Load the tables for the selected year, applying any file overrides.
    pub fn load(&self) -> anyhow::Result<(TaxYear, RateTables)> {
        let sources = RateSources {
            year: self.year(),
            income_tax: self.income_tax_rates.clone(),
            national_insurance: self.ni_rates.clone(),
        };
        let rates = sources.load()?;
        Ok((sources.year, rates))
    }
}

/// Amount in pounds with two decimal places, e.g. "£46604.88".
pub fn format_gbp(amount: Money) -> String {
    format!("£{}", amount.format(2))
}

/// Fractional rate as a percentage without trailing zeros, e.g. "1.85%".
pub fn format_rate(rate: f64) -> String {
    let s = format!("{:.2}", rate * 100.0);
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    format!("{}%", trimmed)
}
