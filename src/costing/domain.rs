use serde::{Deserialize, Serialize};

/// Upper bound on projection length; anything longer is treated as a typo.
pub const MAX_CONTRACT_YEARS: u32 = 100;

pub const UNNAMED_GROUP: &str = "Unnamed Group";

/// One of the three raise proposals compared by the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Proposal {
    Union,
    Management,
    LastContract,
}

impl Proposal {
    pub const fn ordered() -> [Self; 3] {
        [Self::Union, Self::Management, Self::LastContract]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Union => "Union",
            Self::Management => "Mgmt",
            Self::LastContract => "Last Contract",
        }
    }
}

/// Opaque identifier assigned to a group by whoever collects the input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupKey(pub String);

impl GroupKey {
    pub(crate) fn positional(index: usize) -> Self {
        Self(format!("group-{}", index + 1))
    }
}

/// Controls which projection year receives the first raise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaiseTiming {
    /// Year 1 is current pay; the first raise lands in year 2.
    #[default]
    FromSecondYear,
    /// Year 1 already includes the first raise.
    FromFirstYear,
}

impl RaiseTiming {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "second_year" | "from_second_year" => Some(Self::FromSecondYear),
            "first_year" | "from_first_year" => Some(Self::FromFirstYear),
            _ => None,
        }
    }

    /// Schedule index of the raise applied on entering `year` (zero-based),
    /// or `None` when that year is paid at the base rate.
    pub(crate) fn raise_index(self, year: usize) -> Option<usize> {
        match self {
            Self::FromSecondYear => year.checked_sub(1),
            Self::FromFirstYear => Some(year),
        }
    }
}

/// Column layout expected in pasted step rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepLayout {
    /// `headcount<TAB>union<TAB>mgmt`
    #[default]
    Standard,
    /// `step<TAB>headcount<TAB>union<TAB>mgmt`, as exported by older salary sheets.
    Numbered,
}

impl StepLayout {
    pub const fn field_count(self) -> usize {
        match self {
            Self::Standard => 3,
            Self::Numbered => 4,
        }
    }
}

/// Per-year raise percentages; the final entry holds for any remaining years.
#[derive(Debug, Clone, PartialEq)]
pub struct RaiseSchedule {
    rates: Vec<f64>,
}

impl RaiseSchedule {
    pub fn flat(percent: f64) -> Result<Self, CostingError> {
        Self::new(vec![percent])
    }

    pub fn new(rates: Vec<f64>) -> Result<Self, CostingError> {
        if rates.is_empty() {
            return Err(CostingError::invalid("raise schedule", "at least one rate is required"));
        }
        if let Some(rate) = rates.iter().find(|rate| !rate.is_finite() || **rate < 0.0) {
            return Err(CostingError::invalid(
                "raise schedule",
                format!("{rate} is not a non-negative percentage"),
            ));
        }
        Ok(Self { rates })
    }

    /// Parses `"3, 2, 2"` style input. Every entry must be numeric.
    pub fn parse(field: &'static str, raw: &str) -> Result<Self, CostingError> {
        let rates = raw
            .split(',')
            .map(|entry| {
                let cleaned = entry.trim().trim_end_matches('%').trim();
                cleaned.parse::<f64>().map_err(|_| {
                    CostingError::invalid(field, format!("'{}' is not a percentage", entry.trim()))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(rates).map_err(|err| match err {
            CostingError::InvalidConfiguration { reason, .. } => {
                CostingError::InvalidConfiguration { field, reason }
            }
            other => other,
        })
    }

    pub fn rates(&self) -> &[f64] {
        &self.rates
    }

    pub fn rate_for(&self, index: usize) -> f64 {
        self.rates
            .get(index)
            .or_else(|| self.rates.last())
            .copied()
            .unwrap_or(0.0)
    }
}

/// Global inputs shared by every group in one calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractParameters {
    years: u32,
    last_contract_raise: RaiseSchedule,
}

impl ContractParameters {
    pub fn new(years: u32, last_contract_raise: f64) -> Result<Self, CostingError> {
        if years == 0 || years > MAX_CONTRACT_YEARS {
            return Err(CostingError::invalid(
                "years",
                format!("must be between 1 and {MAX_CONTRACT_YEARS}, got {years}"),
            ));
        }
        let last_contract_raise = RaiseSchedule::flat(last_contract_raise).map_err(|_| {
            CostingError::invalid(
                "last_contract_raise",
                format!("{last_contract_raise} is not a non-negative percentage"),
            )
        })?;

        Ok(Self {
            years,
            last_contract_raise,
        })
    }

    /// Builds parameters from raw form values; absent or non-numeric input is rejected.
    pub fn parse(years: Option<&str>, last_contract_raise: Option<&str>) -> Result<Self, CostingError> {
        let years_raw = years
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| CostingError::invalid("years", "value is required"))?;
        let years = years_raw.parse::<u32>().map_err(|_| {
            CostingError::invalid("years", format!("'{years_raw}' is not a whole number of years"))
        })?;

        let raise_raw = last_contract_raise
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| CostingError::invalid("last_contract_raise", "value is required"))?;
        let raise = raise_raw
            .trim_end_matches('%')
            .trim()
            .parse::<f64>()
            .map_err(|_| {
                CostingError::invalid(
                    "last_contract_raise",
                    format!("'{raise_raw}' is not a percentage"),
                )
            })?;

        Self::new(years, raise)
    }

    pub fn years(&self) -> u32 {
        self.years
    }

    pub fn last_contract_raise(&self) -> &RaiseSchedule {
        &self.last_contract_raise
    }
}

/// One salary tier: how many people sit on it and what each side proposes to pay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub headcount: f64,
    pub union_salary: f64,
    pub mgmt_salary: f64,
}

/// Parallel per-step columns in source row order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepTable {
    pub headcounts: Vec<f64>,
    pub union_steps: Vec<f64>,
    pub mgmt_steps: Vec<f64>,
}

impl StepTable {
    pub fn push(&mut self, step: Step) {
        self.headcounts.push(step.headcount);
        self.union_steps.push(step.union_salary);
        self.mgmt_steps.push(step.mgmt_salary);
    }

    pub fn len(&self) -> usize {
        self.headcounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headcounts.is_empty()
    }
}

/// Raw input for one employee group, re-parsed on every calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupInput {
    pub key: Option<GroupKey>,
    pub name: String,
    pub steps_text: String,
    pub union_raises: RaiseSchedule,
    pub mgmt_raises: RaiseSchedule,
}

impl GroupInput {
    pub fn display_name(&self) -> &str {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            UNNAMED_GROUP
        } else {
            trimmed
        }
    }
}

/// Presentation switches that do not change the underlying arithmetic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportOptions {
    pub include_grand_total: bool,
    pub raise_timing: RaiseTiming,
    pub step_layout: StepLayout,
}

/// Everything one calculation needs.
#[derive(Debug, Clone, PartialEq)]
pub struct CostingRequest {
    pub parameters: ContractParameters,
    pub groups: Vec<GroupInput>,
    pub options: ReportOptions,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CostingError {
    #[error("invalid configuration for {field}: {reason}")]
    InvalidConfiguration { field: &'static str, reason: String },
    #[error("no groups were supplied")]
    EmptyInput,
}

impl CostingError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field,
            reason: reason.into(),
        }
    }

    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidConfiguration { .. } => "invalid_configuration",
            Self::EmptyInput => "empty_input",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raise_schedule_holds_last_rate() {
        let schedule = RaiseSchedule::parse("union_raises", "3, 2,1.5%").expect("valid schedule");
        assert_eq!(schedule.rates(), &[3.0, 2.0, 1.5]);
        assert_eq!(schedule.rate_for(0), 3.0);
        assert_eq!(schedule.rate_for(2), 1.5);
        assert_eq!(schedule.rate_for(7), 1.5);
    }

    #[test]
    fn raise_schedule_rejects_non_numeric_entries() {
        let err = RaiseSchedule::parse("mgmt_raises", "2,abc").expect_err("should reject");
        assert_eq!(err.kind(), "invalid_configuration");
        match err {
            CostingError::InvalidConfiguration { field, .. } => assert_eq!(field, "mgmt_raises"),
            other => panic!("unexpected error {other:?}"),
        }

        assert!(RaiseSchedule::parse("mgmt_raises", "").is_err());
        assert!(RaiseSchedule::parse("mgmt_raises", "-1").is_err());
        assert!(RaiseSchedule::flat(f64::NAN).is_err());
    }

    #[test]
    fn contract_parameters_reject_bad_years() {
        for raw in [None, Some(""), Some("abc"), Some("0"), Some("2.5"), Some("101")] {
            let err = ContractParameters::parse(raw, Some("2")).expect_err("years rejected");
            assert!(matches!(
                err,
                CostingError::InvalidConfiguration { field: "years", .. }
            ));
        }
    }

    #[test]
    fn contract_parameters_reject_bad_last_raise() {
        for raw in [None, Some("  "), Some("n/a"), Some("-2")] {
            let err = ContractParameters::parse(Some("3"), raw).expect_err("raise rejected");
            assert!(matches!(
                err,
                CostingError::InvalidConfiguration {
                    field: "last_contract_raise",
                    ..
                }
            ));
        }

        let params = ContractParameters::parse(Some(" 3 "), Some("2.5%")).expect("valid");
        assert_eq!(params.years(), 3);
        assert_eq!(params.last_contract_raise().rates(), &[2.5]);
    }

    #[test]
    fn blank_group_name_falls_back() {
        let group = GroupInput {
            key: None,
            name: "   ".to_string(),
            steps_text: String::new(),
            union_raises: RaiseSchedule::flat(0.0).expect("flat"),
            mgmt_raises: RaiseSchedule::flat(0.0).expect("flat"),
        };
        assert_eq!(group.display_name(), UNNAMED_GROUP);
    }

    #[test]
    fn raise_timing_parses_config_values() {
        assert_eq!(RaiseTiming::parse("first-year"), Some(RaiseTiming::FromFirstYear));
        assert_eq!(RaiseTiming::parse("SECOND_YEAR"), Some(RaiseTiming::FromSecondYear));
        assert_eq!(RaiseTiming::parse("sometimes"), None);
        assert_eq!(RaiseTiming::FromSecondYear.raise_index(0), None);
        assert_eq!(RaiseTiming::FromSecondYear.raise_index(2), Some(1));
        assert_eq!(RaiseTiming::FromFirstYear.raise_index(0), Some(0));
    }
}
