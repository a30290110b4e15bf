use super::domain::{RaiseSchedule, RaiseTiming};

/// Projects each base value forward `years` times, compounding the scheduled raise.
pub fn project(
    base_values: &[f64],
    schedule: &RaiseSchedule,
    years: u32,
    timing: RaiseTiming,
) -> Vec<Vec<f64>> {
    base_values
        .iter()
        .map(|base| project_value(*base, schedule, years, timing))
        .collect()
}

pub fn project_value(base: f64, schedule: &RaiseSchedule, years: u32, timing: RaiseTiming) -> Vec<f64> {
    let mut value = base;
    (0..years as usize)
        .map(|year| {
            if let Some(index) = timing.raise_index(year) {
                value *= 1.0 + schedule.rate_for(index) / 100.0;
            }
            value
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(percent: f64) -> RaiseSchedule {
        RaiseSchedule::flat(percent).expect("valid rate")
    }

    #[test]
    fn first_year_is_base_and_later_years_compound() {
        let series = project(&[50_000.0, 61_250.5], &flat(3.0), 5, RaiseTiming::FromSecondYear);
        assert_eq!(series.len(), 2);

        for (base, values) in [50_000.0, 61_250.5].iter().zip(&series) {
            assert_eq!(values.len(), 5);
            assert_eq!(values[0], *base);
            for year in 1..values.len() {
                assert_eq!(values[year], values[year - 1] * (1.0 + 3.0 / 100.0));
            }
        }
    }

    #[test]
    fn zero_raise_is_constant() {
        let series = project_value(72_000.0, &flat(0.0), 4, RaiseTiming::FromSecondYear);
        assert_eq!(series, vec![72_000.0; 4]);
    }

    #[test]
    fn single_year_has_one_entry() {
        let series = project_value(10.0, &flat(50.0), 1, RaiseTiming::FromSecondYear);
        assert_eq!(series, vec![10.0]);
    }

    #[test]
    fn variable_schedule_holds_last_rate() {
        let schedule = RaiseSchedule::new(vec![10.0, 0.0, 50.0]).expect("valid schedule");
        let series = project_value(100.0, &schedule, 5, RaiseTiming::FromSecondYear);
        assert_eq!(series[0], 100.0);
        assert!((series[1] - 110.0).abs() < 1e-9);
        assert!((series[2] - 110.0).abs() < 1e-9);
        assert!((series[3] - 165.0).abs() < 1e-9);
        assert!((series[4] - 247.5).abs() < 1e-9);
    }

    #[test]
    fn first_year_timing_raises_immediately() {
        let schedule = RaiseSchedule::new(vec![3.0, 2.0, 2.0]).expect("valid schedule");
        let series = project_value(100.0, &schedule, 3, RaiseTiming::FromFirstYear);
        assert!((series[0] - 103.0).abs() < 1e-9);
        assert!((series[1] - 105.06).abs() < 1e-9);
        assert!((series[2] - 107.1612).abs() < 1e-9);
    }

    #[test]
    fn empty_base_values_project_nothing() {
        assert!(project(&[], &flat(5.0), 3, RaiseTiming::FromSecondYear).is_empty());
    }
}
