//! Schema command - print the expected shape of rate table files

use clap::Args;
use schemars::schema_for;
use takehome::tax::{IncomeTaxRates, NationalInsuranceRates};

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Which rate table to describe
    #[arg(value_enum, default_value = "income-tax")]
    table: RateTable,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum RateTable {
    /// Personal allowance, taper threshold and the three income tax bands
    IncomeTax,
    /// Weekly National Insurance bands keyed by category letter
    NationalInsurance,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        println!("{}", schema_json(self.table)?);
        Ok(())
    }
}

fn schema_json(table: RateTable) -> anyhow::Result<String> {
    let schema = match table {
        RateTable::IncomeTax => schema_for!(IncomeTaxRates),
        RateTable::NationalInsurance => schema_for!(NationalInsuranceRates),
    };
    Ok(serde_json::to_string_pretty(&schema)?)
}
