use super::aggregate::{weighted_totals, ProposalTotals};
use super::domain::{ContractParameters, CostingError, CostingRequest, GroupInput, GroupKey, ReportOptions};
use super::parser::parse_steps;
use super::progression::project;
use super::report::tables::{cost_comparison_table, step_progression_table};
use super::report::{CostReport, GroupProjection, StepProgressions};
use tracing::{debug, info};

/// Runs parse, projection, aggregation, and report assembly in one pass.
/// Nothing is cached; identical requests produce identical reports.
pub fn calculate(request: &CostingRequest) -> Result<CostReport, CostingError> {
    if request.groups.is_empty() {
        return Err(CostingError::EmptyInput);
    }

    let CostingRequest {
        parameters,
        groups,
        options,
    } = request;
    let years = parameters.years() as usize;

    let projections: Vec<GroupProjection> = groups
        .iter()
        .enumerate()
        .map(|(index, group)| project_group(index, group, parameters, options))
        .collect();

    let grand_total = ProposalTotals::sum(projections.iter().map(|group| &group.totals), years);

    let cost_comparison = cost_comparison_table(
        &projections,
        options.include_grand_total.then_some(&grand_total),
    );
    let step_progression = step_progression_table(&projections, years);

    info!(
        groups = projections.len(),
        years,
        grand_total = options.include_grand_total,
        "contract cost projection complete"
    );

    Ok(CostReport {
        years: parameters.years(),
        options: *options,
        groups: projections,
        grand_total,
        cost_comparison,
        step_progression,
    })
}

fn project_group(
    index: usize,
    group: &GroupInput,
    parameters: &ContractParameters,
    options: &ReportOptions,
) -> GroupProjection {
    let parsed = parse_steps(&group.steps_text, options.step_layout);
    let table = parsed.table;
    let years = parameters.years();
    let timing = options.raise_timing;

    let steps = StepProgressions {
        union: project(&table.union_steps, &group.union_raises, years, timing),
        management: project(&table.mgmt_steps, &group.mgmt_raises, years, timing),
        last_contract: project(
            &table.mgmt_steps,
            parameters.last_contract_raise(),
            years,
            timing,
        ),
    };

    let years = years as usize;
    let totals = ProposalTotals {
        union: weighted_totals(&steps.union, &table.headcounts, years),
        management: weighted_totals(&steps.management, &table.headcounts, years),
        last_contract: weighted_totals(&steps.last_contract, &table.headcounts, years),
    };

    let key = group
        .key
        .clone()
        .unwrap_or_else(|| GroupKey::positional(index));

    debug!(
        group = %key.0,
        accepted = table.len(),
        dropped = parsed.dropped,
        "parsed group steps"
    );

    GroupProjection {
        key,
        name: group.display_name().to_string(),
        headcounts: table.headcounts,
        dropped_rows: parsed.dropped,
        steps,
        totals,
    }
}
