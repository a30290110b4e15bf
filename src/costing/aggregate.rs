use super::domain::Proposal;
use serde::Serialize;

/// Headcount-weighted cost per year for one group under one proposal.
///
/// `progressions` and `headcounts` are parallel; callers build both from the same
/// step table so their lengths always agree.
pub fn weighted_totals(progressions: &[Vec<f64>], headcounts: &[f64], years: usize) -> Vec<f64> {
    debug_assert_eq!(progressions.len(), headcounts.len());

    let mut totals = vec![0.0; years];
    for (series, headcount) in progressions.iter().zip(headcounts) {
        for (total, value) in totals.iter_mut().zip(series) {
            *total += value * headcount;
        }
    }
    totals
}

/// Element-wise sum of per-group yearly series.
pub fn sum_across_groups<'a, I>(series: I, years: usize) -> Vec<f64>
where
    I: IntoIterator<Item = &'a [f64]>,
{
    let mut totals = vec![0.0; years];
    for group in series {
        for (total, value) in totals.iter_mut().zip(group) {
            *total += value;
        }
    }
    totals
}

/// Yearly weighted totals for all three proposals.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProposalTotals {
    pub union: Vec<f64>,
    pub management: Vec<f64>,
    pub last_contract: Vec<f64>,
}

impl ProposalTotals {
    pub fn series(&self, proposal: Proposal) -> &[f64] {
        match proposal {
            Proposal::Union => &self.union,
            Proposal::Management => &self.management,
            Proposal::LastContract => &self.last_contract,
        }
    }

    /// Cost over the whole contract term.
    pub fn contract_total(&self, proposal: Proposal) -> f64 {
        self.series(proposal).iter().sum()
    }

    pub fn years(&self) -> usize {
        self.union.len()
    }

    pub fn sum<'a, I>(groups: I, years: usize) -> Self
    where
        I: IntoIterator<Item = &'a ProposalTotals>,
        I::IntoIter: Clone,
    {
        let groups = groups.into_iter();
        Self {
            union: sum_across_groups(groups.clone().map(|totals| totals.union.as_slice()), years),
            management: sum_across_groups(
                groups.clone().map(|totals| totals.management.as_slice()),
                years,
            ),
            last_contract: sum_across_groups(
                groups.map(|totals| totals.last_contract.as_slice()),
                years,
            ),
        }
    }
}
