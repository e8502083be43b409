//! Calculate command - take-home pay for a gross income

use crate::cmd::{format_gbp, RateArgs};
use anyhow::Context;
use clap::{Args, ValueEnum};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};
use takehome::tax::{calculate_take_home, IncomeTaxBreakdown, Period, TaxYear};
use takehome::Money;

const INVALID_INCOME: &str = "The value must be a valid number.";

#[derive(Args, Debug)]
pub struct CalculateCommand {
    /// Gross income; prompted for when omitted
    #[arg(short, long)]
    income: Option<String>,

    /// Period the income is paid over
    #[arg(short, long, value_enum, default_value_t = PeriodArg::Year)]
    period: PeriodArg,

    /// National Insurance category letter
    #[arg(short, long, default_value = "A")]
    category: String,

    #[command(flatten)]
    rates: RateArgs,

    /// Output as JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum PeriodArg {
    #[default]
    Year,
    Month,
    Week,
}

impl From<PeriodArg> for Period {
    fn from(arg: PeriodArg) -> Self {
        match arg {
            PeriodArg::Year => Period::Year,
            PeriodArg::Month => Period::Month,
            PeriodArg::Week => Period::Week,
        }
    }
}

/// Breakdown for JSON output
#[derive(Debug, Serialize)]
struct TakeHomeSummary {
    tax_year: String,
    category: String,
    gross_income: String,
    personal_allowance: String,
    taxable_income: String,
    basic_rate_tax: String,
    higher_rate_tax: String,
    additional_rate_tax: String,
    total_tax: String,
    national_insurance: String,
    take_home: String,
}

/// Row for the breakdown table
#[derive(Debug, Tabled)]
struct BreakdownRow {
    #[tabled(rename = "")]
    item: String,
    #[tabled(rename = "Year")]
    year: String,
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Week")]
    week: String,
}

impl CalculateCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let input = match &self.income {
            Some(income) => income.clone(),
            None => prompt_income(io::stdin().lock(), io::stdout())?,
        };
        let annual_income = annual_income(&input, self.period.into())?;

        let (tax_year, rates) = self.rates.load()?;
        let breakdown = calculate_take_home(annual_income, &self.category, &rates)?;

        if self.json {
            self.print_json(&breakdown, tax_year)
        } else {
            self.print_table(&breakdown, tax_year);
            Ok(())
        }
    }

    fn print_table(&self, breakdown: &IncomeTaxBreakdown, tax_year: TaxYear) {
        println!();
        println!(
            "TAKE HOME ({}, category {}) for a gross income of {}",
            tax_year,
            self.category,
            format_gbp(breakdown.gross_income)
        );
        println!();

        let table = Table::new(breakdown_rows(breakdown))
            .with(Style::rounded())
            .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
    }

    fn print_json(&self, breakdown: &IncomeTaxBreakdown, tax_year: TaxYear) -> anyhow::Result<()> {
        let summary = TakeHomeSummary {
            tax_year: tax_year.display(),
            category: self.category.clone(),
            gross_income: breakdown.gross_income.format(2),
            personal_allowance: breakdown.allowance.format(2),
            taxable_income: breakdown.taxable.format(2),
            basic_rate_tax: breakdown.basic_rate.format(2),
            higher_rate_tax: breakdown.higher_rate.format(2),
            additional_rate_tax: breakdown.additional_rate.format(2),
            total_tax: breakdown.taxed.format(2),
            national_insurance: breakdown.national_insurance.format(2),
            take_home: breakdown.take_home.format(2),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
        Ok(())
    }
}

fn breakdown_rows(breakdown: &IncomeTaxBreakdown) -> Vec<BreakdownRow> {
    let row = |item: &str, annual: Money| BreakdownRow {
        item: item.to_string(),
        year: format_gbp(annual),
        month: format_gbp(Period::Month.per_period(annual)),
        week: format_gbp(Period::Week.per_period(annual)),
    };

    let mut rows = vec![
        row("Gross income", breakdown.gross_income),
        row("Personal allowance", breakdown.allowance),
        row("Taxable income", breakdown.taxable),
        row("Basic rate tax", breakdown.basic_rate),
    ];
    if breakdown.higher_rate > Money::ZERO {
        rows.push(row("Higher rate tax", breakdown.higher_rate));
    }
    if breakdown.additional_rate > Money::ZERO {
        rows.push(row("Additional rate tax", breakdown.additional_rate));
    }
    rows.push(row("Total tax", breakdown.taxed));
    rows.push(row("National Insurance", breakdown.national_insurance));
    rows.push(row("Take home", breakdown.take_home));
    rows
}

/// Parse an income figure for `period` and convert it to a yearly amount.
fn annual_income(input: &str, period: Period) -> anyhow::Result<Money> {
    let income: Money = input.parse().context(INVALID_INCOME)?;
    if income < Money::ZERO {
        anyhow::bail!(INVALID_INCOME);
    }
    period
        .annualise(income)
        .with_context(|| format!("The income {input} is too large to annualise."))
}

/// Ask for the income on `output` and read one line from `input`.
fn prompt_income<R: BufRead, W: Write>(mut input: R, mut output: W) -> anyhow::Result<String> {
    write!(output, "Enter income: ")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        anyhow::bail!("No input received. Provide --income or type an amount.");
    }
    Ok(line.trim().to_string())
}
