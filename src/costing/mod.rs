pub mod aggregate;
mod calculator;
pub mod domain;
pub mod export;
pub mod parser;
pub mod progression;
pub mod report;
pub mod scenario;

pub use calculator::calculate;
pub use domain::{
    ContractParameters, CostingError, CostingRequest, GroupInput, GroupKey, Proposal,
    RaiseSchedule, RaiseTiming, ReportOptions, Step, StepLayout, StepTable,
};
pub use export::ExportError;
pub use report::CostReport;
pub use scenario::Scenario;

/// Validates a scenario and runs it through the calculator.
pub fn calculate_scenario(
    scenario: Scenario,
    defaults: ReportOptions,
) -> Result<CostReport, CostingError> {
    let request = scenario.into_request(defaults).inspect_err(|err| {
        tracing::warn!(kind = err.kind(), %err, "rejected contract scenario");
    })?;
    calculate(&request)
}
