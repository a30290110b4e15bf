mod summary;
pub mod tables;
pub mod views;

pub use summary::{
    CostReport, CostReportSummary, GroupProjection, GroupSummaryView, ProposalTotalView,
    StepProgressions,
};
pub use views::{Cell, Row, RowKind, Table};

use serde::Deserialize;

/// Selects one of the two tables a report carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportTable {
    #[default]
    Cost,
    Steps,
}

impl ReportTable {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "cost" | "costs" | "comparison" => Some(Self::Cost),
            "steps" | "step" | "progression" => Some(Self::Steps),
            _ => None,
        }
    }

    pub fn select(self, report: &CostReport) -> &Table {
        match self {
            Self::Cost => &report.cost_comparison,
            Self::Steps => &report.step_progression,
        }
    }
}
