use super::super::aggregate::ProposalTotals;
use super::super::domain::{GroupKey, Proposal, ReportOptions};
use super::views::{round_cents, Table};
use serde::Serialize;

/// Per-step projections kept for the progression table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StepProgressions {
    pub union: Vec<Vec<f64>>,
    pub management: Vec<Vec<f64>>,
    pub last_contract: Vec<Vec<f64>>,
}

/// Everything computed for one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupProjection {
    pub key: GroupKey,
    pub name: String,
    pub headcounts: Vec<f64>,
    pub dropped_rows: usize,
    pub steps: StepProgressions,
    pub totals: ProposalTotals,
}

impl GroupProjection {
    pub fn step_count(&self) -> usize {
        self.headcounts.len()
    }

    pub fn total_headcount(&self) -> f64 {
        self.headcounts.iter().sum()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProposalTotalView {
    pub proposal: Proposal,
    pub label: &'static str,
    pub yearly: Vec<f64>,
    pub contract_total: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupSummaryView {
    pub key: GroupKey,
    pub name: String,
    pub step_count: usize,
    pub dropped_rows: usize,
    pub total_headcount: f64,
    pub proposals: Vec<ProposalTotalView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CostReportSummary {
    pub years: u32,
    pub groups: Vec<GroupSummaryView>,
    pub grand_total: Vec<ProposalTotalView>,
}

/// Output of one calculation: raw series plus both display tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostReport {
    pub years: u32,
    pub options: ReportOptions,
    pub groups: Vec<GroupProjection>,
    pub grand_total: ProposalTotals,
    pub cost_comparison: Table,
    pub step_progression: Table,
}

impl CostReport {
    pub fn group(&self, key: &GroupKey) -> Option<&GroupProjection> {
        self.groups.iter().find(|group| &group.key == key)
    }

    pub fn summary(&self) -> CostReportSummary {
        let groups = self
            .groups
            .iter()
            .map(|group| GroupSummaryView {
                key: group.key.clone(),
                name: group.name.clone(),
                step_count: group.step_count(),
                dropped_rows: group.dropped_rows,
                total_headcount: group.total_headcount(),
                proposals: proposal_views(&group.totals),
            })
            .collect();

        CostReportSummary {
            years: self.years,
            groups,
            grand_total: proposal_views(&self.grand_total),
        }
    }
}

fn proposal_views(totals: &ProposalTotals) -> Vec<ProposalTotalView> {
    Proposal::ordered()
        .into_iter()
        .map(|proposal| ProposalTotalView {
            proposal,
            label: proposal.label(),
            yearly: totals
                .series(proposal)
                .iter()
                .copied()
                .map(round_cents)
                .collect(),
            contract_total: round_cents(totals.contract_total(proposal)),
        })
        .collect()
}
