//! Loading and checking the rate tables fed into the calculator.
//!
//! Tables for recent tax years are compiled into the binary; either table can
//! be replaced with a JSON file of the same shape.

use crate::money::Money;
use crate::tax::{Band, IncomeTaxRates, NationalInsuranceRates, RateTables, TaxYear};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read rates file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {origin}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("no built-in rates for tax year {0}")]
    UnsupportedYear(TaxYear),
    #[error("invalid rates in {origin}: {reason}")]
    InvalidRates { origin: String, reason: String },
}

struct BuiltinRates {
    year: TaxYear,
    income_tax: &'static str,
    national_insurance: &'static str,
}

macro_rules! builtin {
    ($year:expr, $stem:literal) => {
        BuiltinRates {
            year: TaxYear($year),
            income_tax: include_str!(concat!("../assets/config/income_tax/", $stem, ".json")),
            national_insurance: include_str!(concat!(
                "../assets/config/national_insurance/",
                $stem,
                ".json"
            )),
        }
    };
}

// Ordered by year.
const BUILTIN: &[BuiltinRates] = &[
    builtin!(2024, "2023_2024"),
    builtin!(2025, "2024_2025"),
    builtin!(2026, "2025_2026"),
    builtin!(2027, "2026_2027"),
];

/// Tax years with compiled-in rate tables, oldest first.
pub fn builtin_years() -> impl Iterator<Item = TaxYear> {
    BUILTIN.iter().map(|b| b.year)
}

/// Newest tax year with a compiled-in table.
pub fn latest_builtin_year() -> TaxYear {
    BUILTIN[BUILTIN.len() - 1].year
}

fn builtin(year: TaxYear) -> Result<&'static BuiltinRates, ConfigError> {
    BUILTIN
        .iter()
        .find(|b| b.year == year)
        .ok_or(ConfigError::UnsupportedYear(year))
}

/// Where each table comes from. Paths override the built-in table for `year`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateSources {
    pub year: TaxYear,
    pub income_tax: Option<PathBuf>,
    pub national_insurance: Option<PathBuf>,
}

impl RateSources {
    pub fn builtin(year: TaxYear) -> Self {
        RateSources {
            year,
            income_tax: None,
            national_insurance: None,
        }
    }

    /// Load, parse and validate both tables.
    pub fn load(&self) -> Result<RateTables, ConfigError> {
        let income_tax = match &self.income_tax {
            Some(path) => load_income_tax_rates(path)?,
            None => {
                log::info!("Using built-in income tax rates for {}", self.year);
                parse_builtin(
                    builtin(self.year)?.income_tax,
                    &format!("built-in income tax rates for {}", self.year),
                )?
            }
        };
        let national_insurance = match &self.national_insurance {
            Some(path) => load_national_insurance_rates(path)?,
            None => {
                log::info!("Using built-in National Insurance rates for {}", self.year);
                parse_builtin(
                    builtin(self.year)?.national_insurance,
                    &format!("built-in National Insurance rates for {}", self.year),
                )?
            }
        };

        validate_income_tax(&income_tax, &self.income_tax_origin())?;
        validate_national_insurance(&national_insurance, &self.national_insurance_origin())?;

        Ok(RateTables {
            income_tax,
            national_insurance,
        })
    }

    fn income_tax_origin(&self) -> String {
        origin(self.income_tax.as_deref(), "income tax", self.year)
    }

    fn national_insurance_origin(&self) -> String {
        origin(self.national_insurance.as_deref(), "National Insurance", self.year)
    }
}

fn origin(path: Option<&Path>, table: &str, year: TaxYear) -> String {
    match path {
        Some(path) => path.display().to_string(),
        None => format!("built-in {table} rates for {year}"),
    }
}

fn parse_builtin<T: serde::de::DeserializeOwned>(json: &str, origin: &str) -> Result<T, ConfigError> {
    serde_json::from_str(json).map_err(|source| ConfigError::Parse {
        origin: origin.to_string(),
        source,
    })
}

/// Parse an income tax table from any JSON reader. No validation.
pub fn read_income_tax_rates<R: Read>(reader: R) -> Result<IncomeTaxRates, serde_json::Error> {
    serde_json::from_reader(reader)
}

/// Parse a National Insurance table from any JSON reader. No validation.
pub fn read_national_insurance_rates<R: Read>(
    reader: R,
) -> Result<NationalInsuranceRates, serde_json::Error> {
    serde_json::from_reader(reader)
}

/// Read and parse an income tax table file.
pub fn load_income_tax_rates(path: &Path) -> Result<IncomeTaxRates, ConfigError> {
    log::info!("Loading income tax rates from {}", path.display());
    read_income_tax_rates(open(path)?).map_err(|source| ConfigError::Parse {
        origin: path.display().to_string(),
        source,
    })
}

/// Read and parse a National Insurance table file.
pub fn load_national_insurance_rates(path: &Path) -> Result<NationalInsuranceRates, ConfigError> {
    log::info!("Loading National Insurance rates from {}", path.display());
    read_national_insurance_rates(open(path)?).map_err(|source| ConfigError::Parse {
        origin: path.display().to_string(),
        source,
    })
}

fn open(path: &Path) -> Result<BufReader<File>, ConfigError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
}

fn check_rate(band: &Band, name: &str) -> Result<(), String> {
    if !(0.0..=1.0).contains(&band.rate) {
        return Err(format!("{name} rate {} is outside 0..=1", band.rate));
    }
    Ok(())
}

/// Band order and rate range. The calculator assumes these hold.
pub fn validate_income_tax(rates: &IncomeTaxRates, origin: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidRates {
        origin: origin.to_string(),
        reason,
    };

    check_rate(&rates.basic, "basic").map_err(invalid)?;
    check_rate(&rates.higher, "higher").map_err(invalid)?;
    check_rate(&rates.additional, "additional").map_err(invalid)?;

    if rates.personal_allowance < Money::ZERO {
        return Err(invalid("personal allowance is negative".to_string()));
    }
    if rates.basic.min > rates.higher.min || rates.higher.min > rates.additional.min {
        return Err(invalid("band thresholds are not in ascending order".to_string()));
    }
    Ok(())
}

/// Every category has in-range rates and a free band ending at or below
/// the standard band.
pub fn validate_national_insurance(
    rates: &NationalInsuranceRates,
    origin: &str,
) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidRates {
        origin: origin.to_string(),
        reason,
    };

    if rates.is_empty() {
        return Err(invalid("no categories defined".to_string()));
    }
    for (code, category) in rates.iter() {
        check_rate(&category.free, &format!("category {code} free")).map_err(invalid)?;
        check_rate(&category.standard, &format!("category {code} standard")).map_err(invalid)?;
        check_rate(&category.upper, &format!("category {code} upper")).map_err(invalid)?;

        if let (Some(free), Some(standard)) = (category.free.max, category.standard.max) {
            if free > standard {
                return Err(invalid(format!(
                    "category {code} free band ends above the standard band"
                )));
            }
        }
    }
    Ok(())
}
