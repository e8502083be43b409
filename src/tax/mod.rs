pub mod income;
pub mod national_insurance;
pub mod period;
pub mod rates;
pub mod take_home;
pub mod year;

pub use income::{calculate_income_tax, calculate_tax_allowance, IncomeTaxBreakdown};
pub use national_insurance::calculate_national_insurance;
pub use period::Period;
pub use rates::{Band, IncomeTaxRates, NationalInsuranceCategory, NationalInsuranceRates, RateTables};
pub use take_home::calculate_take_home;
pub use year::TaxYear;

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TaxError {
    #[error("the requested National Insurance category '{0}' does not exist")]
    UnknownCategory(String),
}
