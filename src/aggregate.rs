use std::collections::BTreeMap;

use crate::forecast::{ForecastDate, Sample};

/// Sums sample values per valid date, in calendar order.
pub fn pluviosity_by_date(samples: &[Sample]) -> Vec<(ForecastDate, f64)> {
    let mut totals: BTreeMap<ForecastDate, f64> = BTreeMap::new();
    for s in samples {
        *totals.entry(s.date).or_insert(0.0) += s.value;
    }
    totals.into_iter().collect()
}

/// Running sum over a per-date series.
pub fn cumulative(series: &[(ForecastDate, f64)]) -> Vec<(ForecastDate, f64)> {
    let mut acc = 0.0;
    series
        .iter()
        .map(|&(date, v)| {
            acc += v;
            (date, acc)
        })
        .collect()
}

pub fn total(series: &[(ForecastDate, f64)]) -> f64 {
    series.iter().map(|&(_, v)| v).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poly::Point;

    fn sample(date: &str, value: f64) -> Sample {
        Sample {
            point: Point::new(0.0, 0.0),
            value,
            date: ForecastDate::parse_ddmmyy(date).unwrap(),
        }
    }

    #[test]
    fn sums_per_date_in_calendar_order() {
        let samples = vec![
            sample("021221", 2.0),
            sample("011221", 1.0),
            sample("021221", 3.0),
            sample("301121", 0.5),
        ];
        let series = pluviosity_by_date(&samples);
        let days: Vec<String> = series.iter().map(|(d, _)| d.to_string()).collect();
        assert_eq!(days, vec!["30-11-21", "01-12-21", "02-12-21"]);
        assert_eq!(series[0].1, 0.5);
        assert_eq!(series[1].1, 1.0);
        assert_eq!(series[2].1, 5.0);
    }

    #[test]
    fn cumulative_and_total() {
        let series = pluviosity_by_date(&[
            sample("011221", 1.0),
            sample("021221", 2.0),
            sample("031221", 4.0),
        ]);
        let cum = cumulative(&series);
        assert_eq!(cum[0].1, 1.0);
        assert_eq!(cum[1].1, 3.0);
        assert_eq!(cum[2].1, 7.0);
        assert_eq!(total(&series), 7.0);
    }

    #[test]
    fn empty_input() {
        let series = pluviosity_by_date(&[]);
        assert!(series.is_empty());
        assert_eq!(total(&series), 0.0);
    }
}
