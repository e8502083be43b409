use crate::money::Money;
use crate::tax::income::{calculate_income_tax, calculate_tax_allowance, IncomeTaxBreakdown};
use crate::tax::national_insurance::calculate_national_insurance;
use crate::tax::rates::RateTables;
use crate::tax::TaxError;

const WEEKS_PER_YEAR: f64 = 52.0;

/// Income tax and National Insurance on a yearly gross income.
///
/// National Insurance is worked out on the weekly equivalent and scaled back
/// up. An unknown category fails the whole calculation; no partial breakdown
/// is returned.
pub fn calculate_take_home(
    annual_income: Money,
    category: &str,
    rates: &RateTables,
) -> Result<IncomeTaxBreakdown, TaxError> {
    let allowance = calculate_tax_allowance(annual_income, &rates.income_tax);
    let weekly_ni = calculate_national_insurance(
        annual_income / WEEKS_PER_YEAR,
        category,
        &rates.national_insurance,
    )?;

    let mut breakdown = calculate_income_tax(annual_income, allowance, &rates.income_tax);
    breakdown.national_insurance = weekly_ni * WEEKS_PER_YEAR;
    breakdown.take_home = annual_income - breakdown.taxed - breakdown.national_insurance;

    log::debug!(
        "Take home on {annual_income}: tax {}, NI {}, take home {}",
        breakdown.taxed,
        breakdown.national_insurance,
        breakdown.take_home
    );

    Ok(breakdown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tax::rates::fixtures;
    use rust_decimal_macros::dec;

    fn take_home(income: i64) -> IncomeTaxBreakdown {
        calculate_take_home(Money::from_int(income), "A", &fixtures::rate_tables()).unwrap()
    }

    #[test]
    fn below_all_thresholds() {
        let breakdown = take_home(7543);
        assert_eq!(breakdown.taxable, Money::ZERO);
        assert_eq!(breakdown.taxed.format(2), "0.00");
        assert_eq!(breakdown.national_insurance.format(2), "0.00");
        assert_eq!(breakdown.take_home, Money::from_int(7543));
    }

    #[test]
    fn basic_rate_payer() {
        let breakdown = take_home(35000);
        assert_eq!(breakdown.basic_rate.format(2), "4486.00");
        assert_eq!(breakdown.taxable.format(2), "22430.00");
        assert_eq!(breakdown.taxed.format(2), "4486.00");
    }

    #[test]
    fn higher_rate_payer() {
        let breakdown = take_home(63450);
        assert_eq!(breakdown.gross_income, Money::from_int(63450));
        assert_eq!(breakdown.allowance, Money::from_int(12570));
        assert_eq!(breakdown.basic_rate.format(2), "7540.20");
        assert_eq!(breakdown.higher_rate.format(2), "5271.60");
        assert_eq!(breakdown.taxable.format(2), "50880.00");
        assert_eq!(breakdown.taxed.format(2), "12811.80");
        assert_eq!(breakdown.national_insurance.format(2), "4033.32");
        assert_eq!(breakdown.take_home.format(2), "46604.88");
    }

    #[test]
    fn weekly_rounding_carries_into_annual_figures() {
        let breakdown = take_home(63450);
        assert_eq!(breakdown.national_insurance.to_decimal(), dec!(4033.319992));
        assert_eq!(breakdown.take_home.to_decimal(), dec!(46604.880008));
    }

    #[test]
    fn additional_rate_payer_loses_allowance() {
        let breakdown = take_home(143_000);
        assert_eq!(breakdown.allowance, Money::ZERO);
        assert_eq!(breakdown.basic_rate.format(2), "7540.20");
        assert_eq!(breakdown.higher_rate.format(2), "34976.00");
        assert_eq!(breakdown.additional_rate.format(2), "8036.55");
        assert_eq!(breakdown.taxable.format(2), "143000.00");
        assert_eq!(breakdown.taxed.format(2), "50552.75");
        assert_eq!(
            breakdown.take_home,
            breakdown.gross_income - breakdown.taxed - breakdown.national_insurance
        );
    }

    #[test]
    fn zero_income_is_a_valid_result() {
        let breakdown = take_home(0);
        assert_eq!(breakdown.allowance, Money::from_int(12570));
        assert_eq!(breakdown.taxed, Money::ZERO);
        assert_eq!(breakdown.national_insurance, Money::ZERO);
        assert_eq!(breakdown.take_home, Money::ZERO);
    }

    #[test]
    fn shared_rates_across_threads() {
        let rates = fixtures::rate_tables();
        let results: Vec<_> = std::thread::scope(|s| {
            let handles: Vec<_> = [7543, 35000, 63450, 143_000]
                .into_iter()
                .map(|income| {
                    let rates = &rates;
                    s.spawn(move || calculate_take_home(Money::from_int(income), "A", rates))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap().unwrap()).collect()
        });
        assert_eq!(results[2], take_home(63450));
        assert_eq!(results[3].taxed.format(2), "50552.75");
    }

    #[test]
    fn unknown_category_aborts() {
        let result = calculate_take_home(Money::from_int(63450), "Q", &fixtures::rate_tables());
        assert_eq!(result, Err(TaxError::UnknownCategory("Q".to_string())));
    }
}
