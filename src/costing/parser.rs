use super::domain::{Step, StepLayout, StepTable};
use tracing::debug;

/// Accepted rows plus a count of the rows that were thrown away.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedSteps {
    pub table: StepTable,
    pub dropped: usize,
}

/// Reads tab-separated step rows. Rows with the wrong number of fields, or any
/// field that is not a finite non-negative amount, are dropped whole.
pub fn parse_steps(raw: &str, layout: StepLayout) -> ParsedSteps {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(raw.as_bytes());

    let mut parsed = ParsedSteps::default();

    for record in reader.records() {
        let step = match record {
            Ok(record) => parse_record(&record, layout),
            Err(err) => {
                debug!(%err, "unreadable step row");
                None
            }
        };

        match step {
            Some(step) => parsed.table.push(step),
            None => parsed.dropped += 1,
        }
    }

    parsed
}

fn parse_record(record: &csv::StringRecord, layout: StepLayout) -> Option<Step> {
    if record.len() != layout.field_count() {
        return None;
    }

    let mut fields = record.iter();
    if layout == StepLayout::Numbered {
        parse_amount(fields.next()?)?;
    }

    let headcount = parse_amount(fields.next()?)?;
    let union_salary = parse_amount(fields.next()?)?;
    let mgmt_salary = parse_amount(fields.next()?)?;

    Some(Step {
        headcount,
        union_salary,
        mgmt_salary,
    })
}

/// Strips `$` and `,` decoration, then requires a finite, non-negative number.
pub(crate) fn parse_amount(field: &str) -> Option<f64> {
    let cleaned: String = field
        .trim()
        .chars()
        .filter(|ch| !matches!(ch, '$' | ','))
        .collect();

    cleaned
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_currency_decorated_row() {
        let parsed = parse_steps("5\t$80,000\t$75,500.25", StepLayout::Standard);
        assert_eq!(parsed.table.headcounts, vec![5.0]);
        assert_eq!(parsed.table.union_steps, vec![80_000.0]);
        assert_eq!(parsed.table.mgmt_steps, vec![75_500.25]);
        assert_eq!(parsed.dropped, 0);
    }

    #[test]
    fn drops_rows_with_wrong_field_count() {
        let input = "3\t$83,500\t$80,659.71\n\
                     2\t$85,500\n\
                     1\t2\t$88,666\t$84,904.96\n\
                     4\t$88,666\t$84,904.96\t\n\
                     0\t$90,000\t$86,000";
        let parsed = parse_steps(input, StepLayout::Standard);

        assert_eq!(parsed.table.len(), 2);
        assert_eq!(parsed.table.headcounts, vec![3.0, 0.0]);
        assert_eq!(parsed.table.union_steps, vec![83_500.0, 90_000.0]);
        assert_eq!(parsed.table.mgmt_steps, vec![80_659.71, 86_000.0]);
        assert_eq!(parsed.dropped, 3);
    }

    #[test]
    fn drops_rows_with_any_non_numeric_field() {
        let input = "x\t$1\t$2\n1\tTBD\t$2\n1\t$1\tnan\n1\t$1\t-5\n 2 \t $10 \t $20 \r\n";
        let parsed = parse_steps(input, StepLayout::Standard);

        assert_eq!(parsed.table.len(), 1);
        assert_eq!(parsed.table.headcounts, vec![2.0]);
        assert_eq!(parsed.table.union_steps, vec![10.0]);
        assert_eq!(parsed.table.mgmt_steps, vec![20.0]);
        assert_eq!(parsed.table.headcounts.len(), parsed.table.union_steps.len());
        assert_eq!(parsed.table.union_steps.len(), parsed.table.mgmt_steps.len());
    }

    #[test]
    fn blank_input_yields_no_steps() {
        let parsed = parse_steps("", StepLayout::Standard);
        assert!(parsed.table.is_empty());

        let parsed = parse_steps("\n\n", StepLayout::Standard);
        assert!(parsed.table.is_empty());
    }

    #[test]
    fn numbered_layout_skips_leading_step_column() {
        let input = "1\t3\t$83,500\t$80,659.71\n2\t0\t$85,500\t$82,782.34\nstep\t4\t$1\t$1\n";
        let parsed = parse_steps(input, StepLayout::Numbered);

        assert_eq!(parsed.table.headcounts, vec![3.0, 0.0]);
        assert_eq!(parsed.table.union_steps, vec![83_500.0, 85_500.0]);
        assert_eq!(parsed.table.mgmt_steps, vec![80_659.71, 82_782.34]);
        assert_eq!(parsed.dropped, 1);

        let standard = parse_steps(input, StepLayout::Standard);
        assert!(standard.table.is_empty());
    }

    #[test]
    fn parse_amount_handles_decoration() {
        assert_eq!(parse_amount(" $1,234.50 "), Some(1_234.5));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("$"), None);
        assert_eq!(parse_amount("inf"), None);
    }
}
