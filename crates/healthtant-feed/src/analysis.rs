//! Analysis Pages
//!
//! Date-range selection and the data behind the category bar chart and
//! the calorie line chart. Rendering is left to the page bindings.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{FeedError, FeedResult};

/// Bars shown on the category chart
pub const MAX_CATEGORY_BARS: usize = 6;
/// Placeholder bars when there is no data
pub const EMPTY_CATEGORY_BARS: usize = 5;
/// Smallest visible bar, in percent of the track
const MIN_BAR_PERCENT: u32 = 8;
/// Default range length ending today
const DEFAULT_RANGE_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// The week ending today
    pub fn last_week(today: NaiveDate) -> Self {
        Self { start: today - Duration::days(DEFAULT_RANGE_DAYS), end: today }
    }

    /// Both ends must be real dates, in order, and not in the future
    pub fn parse(start: &str, end: &str, today: NaiveDate) -> FeedResult<Self> {
        let start = parse_date("start_date", start)?;
        let end = parse_date("end_date", end)?;
        if start > end {
            return Err(FeedError::InvalidField {
                field: "start_date".to_string(),
                reason: "The start date is after the end date.".to_string(),
            });
        }
        if end > today {
            return Err(FeedError::InvalidField {
                field: "end_date".to_string(),
                reason: "Future dates can't be analyzed.".to_string(),
            });
        }
        Ok(Self { start, end })
    }
}

fn parse_date(field: &str, raw: &str) -> FeedResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| FeedError::MissingField(field.to_string()))
}

/// Server row for the category chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    #[serde(default)]
    pub food_category: Option<String>,
    #[serde(default)]
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bar {
    pub label: String,
    pub count: u32,
    /// Height in percent of the track
    pub percent: u32,
}

/// Top categories by count, scaled to the largest. No data gives empty
/// placeholder bars.
pub fn category_bars(data: &[CategoryCount]) -> Vec<Bar> {
    if data.is_empty() {
        return (0..EMPTY_CATEGORY_BARS)
            .map(|_| Bar { label: String::new(), count: 0, percent: 0 })
            .collect();
    }

    let mut rows: Vec<&CategoryCount> = data.iter().collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows.truncate(MAX_CATEGORY_BARS);
    let max = rows.iter().map(|r| r.count).max().unwrap_or(0).max(1);

    rows.into_iter()
        .map(|row| {
            let scaled = (f64::from(row.count) / f64::from(max) * 100.0).round() as u32;
            Bar {
                label: row
                    .food_category
                    .clone()
                    .filter(|c| !c.trim().is_empty())
                    .unwrap_or_else(|| "기타".to_string()),
                count: row.count,
                percent: scaled.max(MIN_BAR_PERCENT),
            }
        })
        .collect()
}

/// Daily calorie intake as templated by the diet analysis page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalorieSeries {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointMark {
    Normal,
    Lowest,
    Highest,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
    pub x: f64,
    pub y: f64,
    pub mark: PointMark,
}

impl CalorieSeries {
    /// Points laid out in a `width` x `height` box, y growing downwards.
    /// Extra labels or values without a partner are ignored.
    pub fn points(&self, width: f64, height: f64) -> Vec<ChartPoint> {
        let values: Vec<f64> = self.data.iter().copied().take(self.labels.len()).collect();
        if values.is_empty() {
            return Vec::new();
        }
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let span = if max > min { max - min } else { 1.0 };
        let step = if values.len() > 1 { width / (values.len() - 1) as f64 } else { 0.0 };

        values
            .iter()
            .zip(&self.labels)
            .enumerate()
            .map(|(i, (&value, label))| {
                let mark = if max > min && value == max {
                    PointMark::Highest
                } else if max > min && value == min {
                    PointMark::Lowest
                } else {
                    PointMark::Normal
                };
                ChartPoint {
                    label: label.clone(),
                    value,
                    x: step * i as f64,
                    y: height - (value - min) / span * height,
                    mark,
                }
            })
            .collect()
    }
}

/// SVG `points` attribute for a polyline through `points`
pub fn polyline(points: &[ChartPoint]) -> String {
    points
        .iter()
        .map(|p| format!("{:.1},{:.1}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_last_week() {
        let range = DateRange::last_week(date(2025, 3, 3));
        assert_eq!(range.start, date(2025, 2, 24));
        assert_eq!(range.end, date(2025, 3, 3));
    }

    #[test]
    fn test_range_checks() {
        let today = date(2025, 3, 3);
        assert!(DateRange::parse("2025-03-01", "2025-03-03", today).is_ok());

        let err = DateRange::parse("2025-03-03", "2025-03-01", today).unwrap_err();
        assert!(matches!(err, FeedError::InvalidField { ref field, .. } if field == "start_date"));

        let err = DateRange::parse("2025-03-01", "2025-03-04", today).unwrap_err();
        assert!(matches!(err, FeedError::InvalidField { ref field, .. } if field == "end_date"));

        assert_eq!(
            DateRange::parse("", "2025-03-01", today),
            Err(FeedError::MissingField("start_date".into()))
        );
    }

    #[test]
    fn test_category_bars_top_six_scaled() {
        let data: Vec<CategoryCount> = (1..=8)
            .map(|n| CategoryCount { food_category: Some(format!("C{}", n)), count: n * 10 })
            .chain(std::iter::once(CategoryCount { food_category: None, count: 1 }))
            .collect();

        let bars = category_bars(&data);

        assert_eq!(bars.len(), MAX_CATEGORY_BARS);
        assert_eq!(bars[0], Bar { label: "C8".into(), count: 80, percent: 100 });
        assert_eq!(bars[5].label, "C3");
        assert_eq!(bars[5].percent, 38);
    }

    #[test]
    fn test_small_bars_stay_visible() {
        let data = vec![
            CategoryCount { food_category: Some("Snacks".into()), count: 100 },
            CategoryCount { food_category: Some(" ".into()), count: 1 },
        ];
        let bars = category_bars(&data);
        assert_eq!(bars[1].percent, 8);
        assert_eq!(bars[1].label, "기타");
    }

    #[test]
    fn test_empty_categories_give_placeholders() {
        let bars = category_bars(&[]);
        assert_eq!(bars.len(), EMPTY_CATEGORY_BARS);
        assert!(bars.iter().all(|b| b.percent == 0 && b.label.is_empty()));
    }

    #[test]
    fn test_calorie_points() {
        let series = CalorieSeries {
            labels: vec!["Mon".into(), "Tue".into(), "Wed".into()],
            data: vec![1500.0, 2500.0, 2000.0],
        };
        let points = series.points(200.0, 100.0);

        assert_eq!(points.len(), 3);
        assert_eq!((points[0].x, points[0].y), (0.0, 100.0));
        assert_eq!((points[1].x, points[1].y), (100.0, 0.0));
        assert_eq!((points[2].x, points[2].y), (200.0, 50.0));
        assert_eq!(points[0].mark, PointMark::Lowest);
        assert_eq!(points[1].mark, PointMark::Highest);
        assert_eq!(points[2].mark, PointMark::Normal);
        assert_eq!(polyline(&points), "0.0,100.0 100.0,0.0 200.0,50.0");
    }

    #[test]
    fn test_flat_or_empty_series() {
        assert!(CalorieSeries::default().points(100.0, 50.0).is_empty());

        let flat = CalorieSeries { labels: vec!["a".into(), "b".into()], data: vec![900.0, 900.0] };
        let points = flat.points(100.0, 50.0);
        assert!(points.iter().all(|p| p.mark == PointMark::Normal && p.y == 50.0));
    }
}
