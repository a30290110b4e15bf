use super::super::aggregate::ProposalTotals;
use super::summary::GroupProjection;
use super::views::{Cell, Row, Table};

pub const GRAND_TOTAL_TITLE: &str = "Grand Total";

const COST_COLUMNS: [&str; 6] = [
    "Year",
    "Union Total",
    "Mgmt Total",
    "Last Contract Total",
    "Union - Mgmt",
    "Union - Last",
];

pub fn year_label(year: usize) -> String {
    format!("Year {}", year + 1)
}

/// Per-group yearly comparison, optionally closed by a grand-total block.
pub fn cost_comparison_table(groups: &[GroupProjection], grand_total: Option<&ProposalTotals>) -> Table {
    let mut table = Table::default();

    for group in groups {
        push_cost_section(&mut table, &group.name, &group.totals);
    }

    if let Some(totals) = grand_total {
        push_cost_section(&mut table, GRAND_TOTAL_TITLE, totals);
    }

    table
}

fn push_cost_section(table: &mut Table, title: &str, totals: &ProposalTotals) {
    table.push(Row::section(title));
    table.push(Row::columns(COST_COLUMNS));

    for year in 0..totals.years() {
        let union = totals.union[year];
        let management = totals.management[year];
        let last = totals.last_contract[year];

        table.push(Row::data(vec![
            Cell::text(year_label(year)),
            Cell::money(union),
            Cell::money(management),
            Cell::money(last),
            Cell::money(union - management),
            Cell::money(union - last),
        ]));
    }
}

/// Salary of every step in every year, union rows first then management rows.
pub fn step_progression_table(groups: &[GroupProjection], years: usize) -> Table {
    let mut table = Table::default();

    for group in groups {
        table.push(Row::section(format!(
            "{} Salary Progression Per Step",
            group.name
        )));
        table.push(Row::columns(
            std::iter::once("Step".to_string())
                .chain((0..years).map(year_label))
                .chain(std::iter::once("Type".to_string())),
        ));

        push_step_rows(&mut table, &group.steps.union, "Union");
        push_step_rows(&mut table, &group.steps.management, "Mgmt");
    }

    table
}

fn push_step_rows(table: &mut Table, progressions: &[Vec<f64>], kind: &str) {
    for (index, series) in progressions.iter().enumerate() {
        let mut cells = Vec::with_capacity(series.len() + 2);
        cells.push(Cell::Count(index + 1));
        cells.extend(series.iter().copied().map(Cell::money));
        cells.push(Cell::text(kind));
        table.push(Row::data(cells));
    }
}

#[cfg(test)]
mod tests {
    use super::super::summary::StepProgressions;
    use super::super::views::RowKind;
    use super::*;
    use crate::costing::domain::GroupKey;

    fn group(name: &str) -> GroupProjection {
        GroupProjection {
            key: GroupKey(name.to_ascii_lowercase()),
            name: name.to_string(),
            headcounts: vec![2.0, 0.0],
            dropped_rows: 0,
            steps: StepProgressions {
                union: vec![vec![100.0, 110.0], vec![200.0, 220.0]],
                management: vec![vec![90.0, 94.5], vec![180.0, 189.0]],
                last_contract: vec![vec![90.0, 90.0], vec![180.0, 180.0]],
            },
            totals: ProposalTotals {
                union: vec![200.0, 220.0],
                management: vec![180.0, 189.0],
                last_contract: vec![180.0, 180.0],
            },
        }
    }

    #[test]
    fn cost_table_has_header_columns_and_year_rows_per_group() {
        let groups = vec![group("Attorneys"), group("Clerks")];
        let table = cost_comparison_table(&groups, None);

        assert_eq!(table.rows.len(), 2 * (2 + 2));
        assert_eq!(table.section_titles(), vec!["Attorneys", "Clerks"]);
        assert_eq!(table.rows[1].kind, RowKind::ColumnHeader);
        assert_eq!(table.rows[1].cells.len(), 6);

        let year_two = table.rows[3].display_cells();
        assert_eq!(
            year_two,
            vec!["Year 2", "220.00", "189.00", "180.00", "31.00", "40.00"]
        );
    }

    #[test]
    fn grand_total_section_is_appended_when_requested() {
        let groups = vec![group("Attorneys")];
        let grand = ProposalTotals::sum(groups.iter().map(|group| &group.totals), 2);
        let table = cost_comparison_table(&groups, Some(&grand));

        assert_eq!(table.section_titles(), vec!["Attorneys", GRAND_TOTAL_TITLE]);
        assert_eq!(table.rows.last().expect("row").cells[1].as_money(), Some(220.0));
    }

    #[test]
    fn step_table_lists_union_then_mgmt_rows() {
        let table = step_progression_table(&[group("Attorneys")], 2);

        assert_eq!(
            table.section_titles(),
            vec!["Attorneys Salary Progression Per Step"]
        );
        assert_eq!(
            table.rows[1].display_cells(),
            vec!["Step", "Year 1", "Year 2", "Type"]
        );

        let data: Vec<Vec<String>> = table.data_rows().map(|row| row.display_cells()).collect();
        assert_eq!(data.len(), 4);
        assert_eq!(data[0], vec!["1", "100.00", "110.00", "Union"]);
        assert_eq!(data[1], vec!["2", "200.00", "220.00", "Union"]);
        assert_eq!(data[2], vec!["1", "90.00", "94.50", "Mgmt"]);
        assert_eq!(data[3], vec!["2", "180.00", "189.00", "Mgmt"]);
    }
}
