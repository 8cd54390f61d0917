//! Task Progress Chart
//!
//! Builds the dashboard progress series from task metrics and lays it out
//! as SVG polyline points. Without usable metrics a fixed 30-day sample
//! series is drawn instead, flagged so the view can label it.

use chrono::{Duration, NaiveDate};

use crate::models::TaskMetrics;

pub const CHART_WIDTH: f64 = 600.0;
pub const CHART_HEIGHT: f64 = 220.0;
const SAMPLE_DAYS: i64 = 30;

/// Status keys counted as finished
const DONE_KEYS: &[&str] = &["Done", "completed"];

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSeries {
    pub dates: Vec<String>,
    /// Cumulative task count; None for sample data
    pub totals: Option<Vec<u32>>,
    /// Completion percentage per date
    pub completion: Vec<u32>,
    /// Straight line from 0 to 100
    pub ideal: Vec<u32>,
    pub sample: bool,
}

impl ProgressSeries {
    pub fn latest_completion(&self) -> u32 {
        self.completion.last().copied().unwrap_or(0)
    }
}

fn fraction(i: usize, n: usize) -> f64 {
    if n <= 1 {
        1.0
    } else {
        i as f64 / (n - 1) as f64
    }
}

/// Real series, or None when the timeline is empty
pub fn progress_from_metrics(metrics: &TaskMetrics) -> Option<ProgressSeries> {
    if metrics.timeline_data.is_empty() {
        return None;
    }
    let mut timeline = metrics.timeline_data.clone();
    timeline.sort_by(|a, b| {
        let key = |d: &str| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok();
        key(&a.date).cmp(&key(&b.date)).then_with(|| a.date.cmp(&b.date))
    });

    let total: u32 = metrics.status_counts.values().sum();
    let done: u32 = DONE_KEYS.iter().filter_map(|k| metrics.status_counts.get(*k)).sum();
    let done_ratio = if total == 0 { 0.0 } else { f64::from(done) / f64::from(total) };

    let n = timeline.len();
    let mut running = 0;
    let totals = timeline
        .iter()
        .map(|point| {
            running += point.count;
            running
        })
        .collect();
    let completion = (0..n)
        .map(|i| ((fraction(i, n) * done_ratio * 100.0).round() as u32).min(100))
        .collect();
    let ideal = (0..n).map(|i| (fraction(i, n) * 100.0).round() as u32).collect();

    Some(ProgressSeries {
        dates: timeline.into_iter().map(|p| p.date).collect(),
        totals: Some(totals),
        completion,
        ideal,
        sample: false,
    })
}

/// Thirty days ending `today`, stepping up from about 20% to about 80%
pub fn sample_progress(today: NaiveDate) -> ProgressSeries {
    let mut series = ProgressSeries { dates: Vec::new(), totals: None, completion: Vec::new(), ideal: Vec::new(), sample: true };
    for back in (0..SAMPLE_DAYS).rev() {
        let date = today - Duration::days(back);
        let step = (SAMPLE_DAYS - 1 - back) as u32;
        let progress = match back {
            b if b > 20 => 20 + step,
            b if b > 10 => 30 + 2 * (step - 9),
            _ => 50 + (3 * (step - 19)).min(29),
        };
        series.dates.push(date.format("%Y-%m-%d").to_string());
        series.completion.push(progress);
        series.ideal.push((100 * (SAMPLE_DAYS - back) / SAMPLE_DAYS).min(100) as u32);
    }
    series
}

/// Series for the dashboard: real when possible, sample otherwise
pub fn dashboard_series(metrics: Option<&TaskMetrics>, today: NaiveDate) -> ProgressSeries {
    metrics
        .and_then(progress_from_metrics)
        .unwrap_or_else(|| sample_progress(today))
}

/// `x,y` pairs scaled into the chart box, `max` at the top edge
pub fn svg_points(values: &[u32], max: u32) -> String {
    let n = values.len();
    let max = f64::from(max.max(1));
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let x = if n <= 1 { CHART_WIDTH / 2.0 } else { fraction(i, n) * CHART_WIDTH };
            let y = CHART_HEIGHT - f64::from(*v).min(max) / max * CHART_HEIGHT;
            format!("{x:.1},{y:.1}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimelinePoint;
    use std::collections::BTreeMap;

    fn metrics(points: &[(&str, u32)], counts: &[(&str, u32)]) -> TaskMetrics {
        TaskMetrics {
            status_counts: counts.iter().map(|(k, v)| (k.to_string(), *v)).collect::<BTreeMap<_, _>>(),
            timeline_data: points.iter().map(|(d, c)| TimelinePoint { date: d.to_string(), count: *c }).collect(),
        }
    }

    #[test]
    fn series_is_sorted_and_cumulative() {
        let m = metrics(
            &[("2024-01-03", 1), ("2024-01-01", 2), ("2024-01-02", 3)],
            &[("Done", 1), ("Backlog", 1)],
        );
        let series = progress_from_metrics(&m).unwrap();
        assert_eq!(series.dates, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
        assert_eq!(series.totals, Some(vec![2, 5, 6]));
        assert_eq!(series.completion, vec![0, 25, 50]);
        assert_eq!(series.ideal, vec![0, 50, 100]);
        assert!(!series.sample);
    }

    #[test]
    fn single_point_is_complete_ideal() {
        let m = metrics(&[("2024-01-01", 4)], &[("completed", 4)]);
        let series = progress_from_metrics(&m).unwrap();
        assert_eq!(series.completion, vec![100]);
        assert_eq!(series.ideal, vec![100]);
    }

    #[test]
    fn empty_timeline_falls_back_to_sample() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 30).unwrap();
        let m = metrics(&[], &[("Done", 3)]);
        let series = dashboard_series(Some(&m), today);
        assert!(series.sample);
        assert_eq!(series.dates.len(), 30);
        assert_eq!(series.dates.last().map(String::as_str), Some("2024-03-30"));
        assert_eq!(series, dashboard_series(None, today));
    }

    #[test]
    fn sample_rises_through_bands() {
        let series = sample_progress(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        assert_eq!(series.completion[0], 20);
        assert!(series.completion.windows(2).all(|w| w[0] <= w[1]));
        assert!(series.completion.iter().all(|v| (20..80).contains(v)));
        assert_eq!(series.ideal[0], 3);
        assert_eq!(series.ideal[29], 100);
    }

    #[test]
    fn points_span_the_box() {
        assert_eq!(svg_points(&[0, 100], 100), "0.0,220.0 600.0,0.0");
        assert_eq!(svg_points(&[50], 100), "300.0,110.0");
    }
}
