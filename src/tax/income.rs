use crate::money::Money;
use crate::tax::rates::IncomeTaxRates;

/// Result of a take-home calculation. All figures are annual.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IncomeTaxBreakdown {
    pub gross_income: Money,
    /// Personal allowance after tapering
    pub allowance: Money,
    /// Tax due at the basic rate
    pub basic_rate: Money,
    /// Tax due at the higher rate
    pub higher_rate: Money,
    /// Tax due at the additional rate
    pub additional_rate: Money,
    pub taxable: Money,
    pub taxed: Money,
    pub national_insurance: Money,
    pub take_home: Money,
}

/// Personal allowance for a yearly income: reduced by £1 for every £2 above
/// the threshold, never below zero.
pub fn calculate_tax_allowance(annual_income: Money, rates: &IncomeTaxRates) -> Money {
    let over = ((annual_income - rates.personal_allowance_threshold) * 0.5).max(Money::ZERO);
    (rates.personal_allowance - over).max(Money::ZERO)
}

/// Split yearly income across the bands, taking the additional-rate slice
/// first, then higher, then basic, so each pound lands in exactly one band.
///
/// The higher band starts earlier by however much the allowance has been
/// tapered.
pub fn calculate_income_tax(
    income: Money,
    allowance: Money,
    rates: &IncomeTaxRates,
) -> IncomeTaxBreakdown {
    let higher_limit = rates.higher.min + (allowance - rates.personal_allowance);

    let additional_taxable = (income - rates.additional.min).max(Money::ZERO);
    let higher_taxable = (income - additional_taxable - higher_limit).max(Money::ZERO);
    let basic_taxable =
        (income - additional_taxable - higher_taxable - allowance).max(Money::ZERO);

    log::debug!(
        "Income {income}: basic {basic_taxable}, higher {higher_taxable}, additional {additional_taxable}"
    );

    let basic_rate = basic_taxable * rates.basic.rate;
    let higher_rate = higher_taxable * rates.higher.rate;
    let additional_rate = additional_taxable * rates.additional.rate;

    IncomeTaxBreakdown {
        gross_income: income,
        allowance,
        basic_rate,
        higher_rate,
        additional_rate,
        taxable: (income - allowance).max(Money::ZERO),
        taxed: basic_rate + higher_rate + additional_rate,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tax::rates::fixtures;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    fn pounds(amount: f64) -> Money {
        Money::from_float(amount)
    }

    fn income_tax(income: i64, allowance: i64) -> IncomeTaxBreakdown {
        calculate_income_tax(
            Money::from_int(income),
            Money::from_int(allowance),
            &fixtures::income_tax(),
        )
    }

    #[test]
    fn allowance_full_below_threshold() {
        let allowance = calculate_tax_allowance(Money::from_int(65000), &fixtures::income_tax());
        assert_eq!(allowance.format(2), "12570.00");
    }

    #[test]
    fn allowance_partially_tapered() {
        let allowance = calculate_tax_allowance(Money::from_int(112_000), &fixtures::income_tax());
        assert_eq!(allowance.format(2), "6570.00");
    }

    #[test]
    fn allowance_fully_withdrawn() {
        let allowance = calculate_tax_allowance(Money::from_int(145_000), &fixtures::income_tax());
        assert_eq!(allowance.format(2), "0.00");
    }

    #[test]
    fn allowance_at_threshold_is_untouched() {
        let allowance = calculate_tax_allowance(Money::from_int(100_000), &fixtures::income_tax());
        assert_eq!(allowance, Money::from_int(12570));
    }

    #[test]
    fn no_tax_below_allowance() {
        let breakdown = income_tax(7543, 12570);
        assert_eq!(breakdown.taxable, Money::ZERO);
        assert_eq!(breakdown.taxed.format(2), "0.00");
        assert_eq!(breakdown.basic_rate, Money::ZERO);
    }

    #[test]
    fn basic_rate_only() {
        assert_eq!(
            income_tax(35000, 12570),
            IncomeTaxBreakdown {
                gross_income: Money::from_int(35000),
                allowance: Money::from_int(12570),
                basic_rate: Money::from_int(4486),
                taxable: Money::from_int(22430),
                taxed: Money::from_int(4486),
                ..Default::default()
            }
        );
    }

    #[test]
    fn higher_rate() {
        let breakdown = income_tax(63450, 12570);
        assert_eq!(breakdown.basic_rate, pounds(7540.20));
        assert_eq!(breakdown.higher_rate, pounds(5271.60));
        assert_eq!(breakdown.additional_rate, Money::ZERO);
        assert_eq!(breakdown.taxable, Money::from_int(50880));
        assert_eq!(breakdown.taxed, pounds(12811.80));
    }

    #[test]
    fn additional_rate_without_allowance() {
        let breakdown = income_tax(143_000, 0);
        assert_eq!(breakdown.basic_rate, pounds(7540.20));
        assert_eq!(breakdown.higher_rate, Money::from_int(34976));
        assert_eq!(breakdown.additional_rate, pounds(8036.55));
        assert_eq!(breakdown.taxable, Money::from_int(143_000));
        assert_eq!(breakdown.taxed, pounds(50552.75));
    }

    #[test]
    fn tapered_allowance_feeds_income_tax() {
        let rates = fixtures::income_tax();
        let income = Money::from_int(143_000);
        let allowance = calculate_tax_allowance(income, &rates);
        assert_eq!(allowance, Money::ZERO);
        assert_eq!(calculate_income_tax(income, allowance, &rates).taxed, pounds(50552.75));
    }

    #[test]
    fn national_insurance_and_take_home_left_unset() {
        let breakdown = income_tax(63450, 12570);
        assert_eq!(breakdown.national_insurance, Money::ZERO);
        assert_eq!(breakdown.take_home, Money::ZERO);
    }

    proptest! {
        #[test]
        fn prop_allowance_bounded_and_non_increasing(a in 0i64..300_000, b in 0i64..300_000) {
            let rates = fixtures::income_tax();
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            let low_allowance = calculate_tax_allowance(Money::from_int(low), &rates);
            let high_allowance = calculate_tax_allowance(Money::from_int(high), &rates);
            prop_assert!(high_allowance <= low_allowance);
            prop_assert!(low_allowance <= rates.personal_allowance);
            prop_assert!(high_allowance >= Money::ZERO);
        }

        #[test]
        fn prop_bands_partition_taxable_income(micros in 0i64..500_000_000_000) {
            // At 100% in every band the tax per band equals its slice.
            let mut rates = fixtures::income_tax();
            rates.basic.rate = 1.0;
            rates.higher.rate = 1.0;
            rates.additional.rate = 1.0;

            let income = Money::from_micros(micros);
            let allowance = calculate_tax_allowance(income, &rates);
            let breakdown = calculate_income_tax(income, allowance, &rates);

            prop_assert_eq!(breakdown.taxable, (income - allowance).max(Money::ZERO));
            prop_assert_eq!(
                breakdown.basic_rate + breakdown.higher_rate + breakdown.additional_rate,
                breakdown.taxable
            );
        }
    }
}
