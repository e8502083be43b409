use crate::money::Money;
use crate::tax::rates::NationalInsuranceRates;
use crate::tax::TaxError;

/// Weekly employee National Insurance for a category letter.
///
/// Earnings above the standard band ceiling pay the upper rate; what is left
/// above the free band ceiling pays the main rate. A band without a ceiling
/// never hands earnings on to the next band.
pub fn calculate_national_insurance(
    weekly_income: Money,
    category: &str,
    rates: &NationalInsuranceRates,
) -> Result<Money, TaxError> {
    let cat = rates
        .get(category)
        .ok_or_else(|| TaxError::UnknownCategory(category.to_string()))?;

    let upper = cat
        .standard
        .max
        .map_or(Money::ZERO, |max| (weekly_income - max).max(Money::ZERO));
    let main = cat
        .free
        .max
        .map_or(Money::ZERO, |max| (weekly_income - upper - max).max(Money::ZERO));

    log::debug!("Category {category} weekly {weekly_income}: main {main}, upper {upper}");

    Ok(upper * cat.upper.rate + main * cat.standard.rate)
}
