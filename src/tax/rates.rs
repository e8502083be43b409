use crate::money::Money;
use schemars::JsonSchema;
use serde::Deserialize;
use std::collections::BTreeMap;

/// One tier of a progressive scale.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Band {
    /// Lower threshold of the band
    #[serde(alias = "Min")]
    #[schemars(with = "f64")]
    pub min: Money,
    /// Upper threshold of the band, absent for an unbounded top band
    #[serde(default, alias = "Max")]
    #[schemars(with = "Option<f64>")]
    pub max: Option<Money>,
    /// Rate as a fraction, e.g. 0.2 for 20%
    #[serde(alias = "Rate")]
    pub rate: f64,
}

/// Annual income tax rates.
#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct IncomeTaxRates {
    /// Tax-free personal allowance
    #[serde(alias = "PersonalAllowance")]
    #[schemars(with = "f64")]
    pub personal_allowance: Money,
    /// Income above which the allowance is withdrawn at £1 for every £2
    #[serde(alias = "PersonalAllowanceThreshold")]
    #[schemars(with = "f64")]
    pub personal_allowance_threshold: Money,
    #[serde(alias = "Basic")]
    pub basic: Band,
    #[serde(alias = "Higher")]
    pub higher: Band,
    #[serde(alias = "Additional")]
    pub additional: Band,
}

/// Weekly National Insurance bands for one category letter.
#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct NationalInsuranceCategory {
    /// Earnings up to `max` pay nothing
    #[serde(alias = "Band1", alias = "band1")]
    pub free: Band,
    /// Earnings above `free.max` up to `max` pay the main rate
    #[serde(alias = "Band2", alias = "band2")]
    pub standard: Band,
    /// Earnings above `standard.max` pay the upper rate
    #[serde(alias = "Band3", alias = "band3")]
    pub upper: Band,
}

/// National Insurance categories keyed by letter, e.g. "A".
#[derive(Debug, Clone, Default, PartialEq, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct NationalInsuranceRates(BTreeMap<String, NationalInsuranceCategory>);

impl NationalInsuranceRates {
    /// Bands for a category letter. Lookup is case-sensitive.
    pub fn get(&self, category: &str) -> Option<&NationalInsuranceCategory> {
        self.0.get(category)
    }

    /// Categories in letter order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &NationalInsuranceCategory)> {
        self.0.iter().map(|(code, rates)| (code.as_str(), rates))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, NationalInsuranceCategory)> for NationalInsuranceRates {
    fn from_iter<I: IntoIterator<Item = (String, NationalInsuranceCategory)>>(iter: I) -> Self {
        NationalInsuranceRates(iter.into_iter().collect())
    }
}

/// Everything a take-home calculation reads. Loaded once and shared
/// read-only between calculations.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTables {
    pub income_tax: IncomeTaxRates,
    pub national_insurance: NationalInsuranceRates,
}
