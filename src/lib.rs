pub mod config;
pub mod money;
pub mod tax;

pub use money::{Money, MoneyError};
pub use tax::{calculate_take_home, IncomeTaxBreakdown, RateTables, TaxError};
