use crate::money::Money;

/// Pay period an income figure is quoted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    #[default]
    Year,
    Month,
    Week,
}

impl Period {
    /// Number of these periods in a year.
    pub fn per_year(self) -> f64 {
        match self {
            Period::Year => 1.0,
            Period::Month => 12.0,
            Period::Week => 52.0,
        }
    }

    /// Convert an amount for this period to a yearly figure. `None` if the
    /// yearly figure does not fit in [`Money`].
    pub fn annualise(self, amount: Money) -> Option<Money> {
        match self {
            Period::Year => Some(amount),
            _ => amount.checked_mul(self.per_year()),
        }
    }

    /// Share of a yearly figure falling in one of these periods.
    pub fn per_period(self, annual: Money) -> Money {
        annual / self.per_year()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annualise_each_period() {
        let amount = Money::from_float(2500.5);
        assert_eq!(Period::Year.annualise(amount), Some(amount));
        assert_eq!(Period::Month.annualise(amount), Some(Money::from_int(30006)));
        assert_eq!(Period::Week.annualise(amount), Some(Money::from_int(130_026)));
    }

    #[test]
    fn annualise_out_of_range() {
        let weekly = Money::from_int(200_000_000_000);
        assert_eq!(Period::Week.annualise(weekly), None);
        assert_eq!(Period::Month.annualise(weekly), Some(Money::from_int(2_400_000_000_000)));
        assert_eq!(Period::Year.annualise(Money::MAX), Some(Money::MAX));
    }

    #[test]
    fn per_period_divides_yearly_amount() {
        let annual = Money::from_int(63450);
        assert_eq!(Period::Year.per_period(annual), annual);
        assert_eq!(Period::Month.per_period(annual).format(2), "5287.50");
        assert_eq!(Period::Week.per_period(annual).micros(), 1_220_192_308);
    }
}
