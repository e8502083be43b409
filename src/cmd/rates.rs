//! Rates command - show the income tax and National Insurance tables in use

use crate::cmd::{format_gbp, format_rate, RateArgs};
use clap::Args;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};
use takehome::tax::{Band, IncomeTaxRates, NationalInsuranceRates};
use takehome::Money;

#[derive(Args, Debug)]
pub struct RatesCommand {
    #[command(flatten)]
    rates: RateArgs,
}

#[derive(Debug, Tabled)]
struct IncomeTaxRow {
    #[tabled(rename = "Band")]
    band: String,
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "To")]
    to: String,
    #[tabled(rename = "Rate")]
    rate: String,
}

#[derive(Debug, Tabled)]
struct NationalInsuranceRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Free up to")]
    free_up_to: String,
    #[tabled(rename = "Main rate")]
    main_rate: String,
    #[tabled(rename = "Upper limit")]
    upper_limit: String,
    #[tabled(rename = "Upper rate")]
    upper_rate: String,
}

impl RatesCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let (tax_year, rates) = self.rates.load()?;

        println!();
        println!("INCOME TAX ({})", tax_year);
        println!(
            "  Personal allowance {}, reduced by £1 for every £2 over {}",
            format_gbp(rates.income_tax.personal_allowance),
            format_gbp(rates.income_tax.personal_allowance_threshold)
        );
        println!("{}", render(income_tax_rows(&rates.income_tax)));
        println!();
        println!("NATIONAL INSURANCE ({}, weekly)", tax_year);
        println!("{}", render(national_insurance_rows(&rates.national_insurance)));
        Ok(())
    }
}

fn render<T: Tabled>(rows: Vec<T>) -> String {
    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string()
}

fn format_limit(limit: Option<Money>) -> String {
    limit.map_or_else(|| "-".to_string(), format_gbp)
}

fn income_tax_rows(rates: &IncomeTaxRates) -> Vec<IncomeTaxRow> {
    let row = |name: &str, band: &Band| IncomeTaxRow {
        band: name.to_string(),
        from: format_gbp(band.min),
        to: format_limit(band.max),
        rate: format_rate(band.rate),
    };
    vec![
        row("Basic", &rates.basic),
        row("Higher", &rates.higher),
        row("Additional", &rates.additional),
    ]
}

fn national_insurance_rows(rates: &NationalInsuranceRates) -> Vec<NationalInsuranceRow> {
    rates
        .iter()
        .map(|(code, category)| NationalInsuranceRow {
            category: code.to_string(),
            free_up_to: format_limit(category.free.max),
            main_rate: format_rate(category.standard.rate),
            upper_limit: format_limit(category.standard.max),
            upper_rate: format_rate(category.upper.rate),
        })
        .collect()
}
