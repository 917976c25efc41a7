//! SVG line chart for the daily summary window.
//!
//! Only geometry lives here. The template draws the axes, grid and
//! polylines from the coordinates computed below.

use crate::models::SummaryRow;

pub const CHART_WIDTH: f64 = 720.0;
pub const CHART_HEIGHT: f64 = 320.0;

const MARGIN_LEFT: f64 = 40.0;
const MARGIN_RIGHT: f64 = 16.0;
const MARGIN_TOP: f64 = 16.0;
const MARGIN_BOTTOM: f64 = 48.0;
const Y_TICKS: u64 = 4;
/// Roughly how many date labels fit under the x axis.
const MAX_X_LABELS: usize = 8;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub name: &'static str,
    pub color: &'static str,
    /// `x,y` pairs joined by spaces, ready for `<polyline points>`.
    pub points: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabel {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendChart {
    pub width: f64,
    pub height: f64,
    pub plot_left: f64,
    pub plot_right: f64,
    pub plot_top: f64,
    pub plot_bottom: f64,
    pub series: Vec<ChartSeries>,
    pub x_labels: Vec<AxisLabel>,
    pub y_ticks: Vec<AxisLabel>,
}

impl TrendChart {
    /// `None` when there is nothing to plot.
    pub fn build(rows: &[SummaryRow]) -> Option<Self> {
        if rows.is_empty() {
            return None;
        }

        let plot_left = MARGIN_LEFT;
        let plot_right = CHART_WIDTH - MARGIN_RIGHT;
        let plot_top = MARGIN_TOP;
        let plot_bottom = CHART_HEIGHT - MARGIN_BOTTOM;

        let peak = rows
            .iter()
            .flat_map(|r| [r.checked_count, r.issue_count])
            .max()
            .unwrap_or(0);
        let y_max = nice_ceiling(peak);

        let step = if rows.len() > 1 {
            (plot_right - plot_left) / (rows.len() - 1) as f64
        } else {
            0.0
        };
        let x_at = |i: usize| {
            if rows.len() > 1 {
                plot_left + step * i as f64
            } else {
                (plot_left + plot_right) / 2.0
            }
        };
        let y_at = |v: u64| plot_bottom - (v as f64 / y_max as f64) * (plot_bottom - plot_top);

        let polyline = |value: fn(&SummaryRow) -> u64| {
            rows.iter()
                .enumerate()
                .map(|(i, r)| format!("{:.1},{:.1}", x_at(i), y_at(value(r))))
                .collect::<Vec<_>>()
                .join(" ")
        };

        let series = vec![
            ChartSeries {
                name: "Số xe checklist",
                color: "#2563eb",
                points: polyline(|r| r.checked_count),
            },
            ChartSeries {
                name: "Số sự cố",
                color: "#ea580c",
                points: polyline(|r| r.issue_count),
            },
        ];

        let label_every = rows.len().div_ceil(MAX_X_LABELS).max(1);
        let x_labels = rows
            .iter()
            .enumerate()
            .filter(|(i, _)| i % label_every == 0 || *i == rows.len() - 1)
            .map(|(i, r)| AxisLabel {
                x: x_at(i),
                y: plot_bottom + 18.0,
                text: short_date(&r.date),
            })
            .collect();

        let y_ticks = (0..=Y_TICKS)
            .map(|t| {
                let value = y_max * t / Y_TICKS;
                AxisLabel {
                    x: plot_left - 6.0,
                    y: y_at(value),
                    text: value.to_string(),
                }
            })
            .collect();

        Some(Self {
            width: CHART_WIDTH,
            height: CHART_HEIGHT,
            plot_left,
            plot_right,
            plot_top,
            plot_bottom,
            series,
            x_labels,
            y_ticks,
        })
    }
}

/// Smallest multiple of the tick count that is >= `peak`, never zero.
fn nice_ceiling(peak: u64) -> u64 {
    let peak = peak.max(1);
    peak.div_ceil(Y_TICKS) * Y_TICKS
}

/// `2024-05-02` becomes `05-02`; anything else is shown as given.
fn short_date(date: &str) -> String {
    let date = date.trim();
    match date.split_once('-') {
        Some((year, rest)) if year.len() == 4 && rest.len() >= 5 => rest.chars().take(5).collect(),
        _ => date.to_string(),
    }
}
