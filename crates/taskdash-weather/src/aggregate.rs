use chrono::NaiveDate;

use crate::types::{DailyAverage, ForecastSample};

/// The panel never shows more than a week of days.
pub const MAX_FORECAST_DAYS: usize = 7;

/// Bucket samples by calendar date and average each bucket.
///
/// Dates keep the order in which they are first seen; only the first
/// [`MAX_FORECAST_DAYS`] dates are returned. Means are rounded to one decimal.
pub fn daily_averages(samples: &[ForecastSample]) -> Vec<DailyAverage> {
    let mut buckets: Vec<(NaiveDate, f64, u32)> = Vec::new();

    for sample in samples {
        let date = sample.timestamp.date();
        match buckets.iter_mut().find(|(d, _, _)| *d == date) {
            Some((_, sum, count)) => {
                *sum += sample.temperature;
                *count += 1;
            }
            None => buckets.push((date, sample.temperature, 1)),
        }
    }

    buckets
        .into_iter()
        .take(MAX_FORECAST_DAYS)
        .map(|(date, sum, count)| DailyAverage {
            date,
            avg_temp_celsius: round_one_decimal(sum / f64::from(count)),
        })
        .collect()
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
