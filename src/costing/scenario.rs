//! Serialized calculator input as supplied by the command line and HTTP front-ends.
//!
//! Numeric fields accept either JSON numbers or strings so that form values can be
//! forwarded untouched; conversion and validation happen here, not in the caller.

use super::domain::{
    ContractParameters, CostingError, CostingRequest, GroupInput, GroupKey, RaiseSchedule,
    RaiseTiming, ReportOptions, StepLayout,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_raw(&self) -> String {
        match self {
            Self::Number(value) => value.to_string(),
            Self::Text(value) => value.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub years: Option<FieldValue>,
    #[serde(default)]
    pub last_contract_raise: Option<FieldValue>,
    #[serde(default)]
    pub groups: Vec<ScenarioGroup>,
    #[serde(default)]
    pub include_grand_total: Option<bool>,
    #[serde(default)]
    pub raise_timing: Option<RaiseTiming>,
    #[serde(default)]
    pub step_layout: Option<StepLayout>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScenarioGroup {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub name: String,
    /// Tab-separated step rows.
    #[serde(default)]
    pub steps: Option<String>,
    /// File holding the step rows; resolved by [`Scenario::load_step_files`].
    #[serde(default)]
    pub steps_path: Option<PathBuf>,
    #[serde(default)]
    pub union_raises: Option<FieldValue>,
    #[serde(default)]
    pub mgmt_raises: Option<FieldValue>,
}

impl Scenario {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Inlines every `steps_path` relative to `base_dir`.
    pub fn load_step_files(&mut self, base_dir: &Path) -> Result<(), std::io::Error> {
        for group in &mut self.groups {
            if let Some(path) = group.steps_path.take() {
                let path = if path.is_absolute() {
                    path
                } else {
                    base_dir.join(path)
                };
                group.steps = Some(std::fs::read_to_string(path)?);
            }
        }
        Ok(())
    }

    /// Validates the raw values; fields left unset fall back to `defaults`.
    pub fn into_request(self, defaults: ReportOptions) -> Result<CostingRequest, CostingError> {
        let years = self.years.as_ref().map(FieldValue::as_raw);
        let last_contract_raise = self.last_contract_raise.as_ref().map(FieldValue::as_raw);
        let parameters =
            ContractParameters::parse(years.as_deref(), last_contract_raise.as_deref())?;

        let groups = self
            .groups
            .into_iter()
            .map(ScenarioGroup::into_input)
            .collect::<Result<Vec<_>, _>>()?;

        let options = ReportOptions {
            include_grand_total: self
                .include_grand_total
                .unwrap_or(defaults.include_grand_total),
            raise_timing: self.raise_timing.unwrap_or(defaults.raise_timing),
            step_layout: self.step_layout.unwrap_or(defaults.step_layout),
        };

        Ok(CostingRequest {
            parameters,
            groups,
            options,
        })
    }
}

impl ScenarioGroup {
    fn into_input(self) -> Result<GroupInput, CostingError> {
        if self.steps.is_none() && self.steps_path.is_some() {
            return Err(CostingError::invalid(
                "steps_path",
                "step files must be inlined before calculation",
            ));
        }

        Ok(GroupInput {
            key: self.key.filter(|key| !key.trim().is_empty()).map(GroupKey),
            name: self.name,
            steps_text: self.steps.unwrap_or_default(),
            union_raises: schedule("union_raises", self.union_raises)?,
            mgmt_raises: schedule("mgmt_raises", self.mgmt_raises)?,
        })
    }
}

fn schedule(field: &'static str, value: Option<FieldValue>) -> Result<RaiseSchedule, CostingError> {
    let raw = value
        .map(|value| value.as_raw())
        .ok_or_else(|| CostingError::invalid(field, "value is required"))?;
    RaiseSchedule::parse(field, &raw)
}
