//! Date-indexed line chart widget.
//!
//! Renders a [`ChartSpec`] with dates mapped to day offsets on the X axis.
//! Solid strokes draw with braille, dashed strokes with dots.

use btc_dashboard_core::{ChartSpec, SeriesColor, Stroke};
use chrono::NaiveDate;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Widget},
};

pub struct DateChart<'a> {
    spec: &'a ChartSpec,
    /// Highlighted date (the lookup selection), drawn as a marker on every series
    highlight: Option<NaiveDate>,
}

impl<'a> DateChart<'a> {
    pub fn new(spec: &'a ChartSpec) -> Self {
        Self {
            spec,
            highlight: None,
        }
    }

    pub fn highlight(mut self, date: Option<NaiveDate>) -> Self {
        self.highlight = date;
        self
    }
}

pub const fn series_color(color: SeriesColor) -> Color {
    match color {
        SeriesColor::SteelBlue => Color::Rgb(70, 130, 180),
        SeriesColor::RoyalBlue => Color::Rgb(65, 105, 225),
        // Black draws in the terminal's default foreground so it stays visible on dark themes
        SeriesColor::Black => Color::Reset,
    }
}

const fn stroke_marker(stroke: Stroke) -> Marker {
    match stroke {
        Stroke::Solid => Marker::Braille,
        Stroke::Dashed => Marker::Dot,
    }
}

/// Pads a value range so flat series still get a visible band.
fn y_bounds(min: f64, max: f64) -> [f64; 2] {
    let range = max - min;
    let padding = if range > 0.0 {
        range * 0.1
    } else {
        (min.abs() * 0.01).max(0.5)
    };
    [min - padding, max + padding]
}

impl Widget for DateChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(self.spec.title.as_str())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White));

        let (Some((first, last)), Some((min, max))) =
            (self.spec.date_range(), self.spec.value_range())
        else {
            Paragraph::new("No data")
                .block(block.border_style(Style::default().fg(Color::DarkGray)))
                .render(area, buf);
            return;
        };

        let x_of = |date: NaiveDate| (date - first).num_days() as f64;

        let lines: Vec<Vec<(f64, f64)>> = self
            .spec
            .series
            .iter()
            .map(|s| s.points.iter().map(|&(d, v)| (x_of(d), v)).collect())
            .collect();
        let highlighted: Vec<Vec<(f64, f64)>> = self
            .spec
            .series
            .iter()
            .map(|s| {
                s.points
                    .iter()
                    .filter(|(d, _)| Some(*d) == self.highlight)
                    .map(|&(d, v)| (x_of(d), v))
                    .collect()
            })
            .collect();

        let mut datasets = Vec::new();
        for ((series, line), marks) in self.spec.series.iter().zip(&lines).zip(&highlighted) {
            let style = Style::default().fg(series_color(series.color));
            datasets.push(
                Dataset::default()
                    .name(series.label.as_str())
                    .marker(stroke_marker(series.stroke))
                    .graph_type(GraphType::Line)
                    .style(style)
                    .data(line),
            );
            if series.markers {
                datasets.push(
                    Dataset::default()
                        .marker(Marker::Dot)
                        .graph_type(GraphType::Scatter)
                        .style(style)
                        .data(line),
                );
            }
            if !marks.is_empty() {
                datasets.push(
                    Dataset::default()
                        .marker(Marker::Block)
                        .graph_type(GraphType::Scatter)
                        .style(Style::default().fg(Color::Yellow))
                        .data(marks),
                );
            }
        }

        let x_max = x_of(last).max(1.0);
        let mid = first + chrono::Duration::days((x_of(last) / 2.0) as i64);
        let x_labels = vec![
            Span::raw(first.format("%Y-%m-%d").to_string()),
            Span::raw(mid.format("%m-%d").to_string()),
            Span::raw(last.format("%Y-%m-%d").to_string()),
        ];

        let [y_min, y_max] = y_bounds(min, max);
        let y_labels = vec![
            Span::raw(format!("{y_min:.2}")),
            Span::raw(format!("{:.2}", (y_min + y_max) / 2.0)),
            Span::raw(format!("{y_max:.2}")),
        ];

        Chart::new(datasets)
            .block(block)
            .x_axis(
                Axis::default()
                    .title(self.spec.x_label.as_str())
                    .style(Style::default().fg(Color::Gray))
                    .bounds([0.0, x_max])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .title(self.spec.y_label.as_str())
                    .style(Style::default().fg(Color::Gray))
                    .bounds([y_min, y_max])
                    .labels(y_labels),
            )
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use btc_dashboard_core::SeriesSpec;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn spec(points: Vec<(NaiveDate, f64)>) -> ChartSpec {
        ChartSpec {
            title: "30-Day BTC Price Forecast".to_string(),
            x_label: "Date".to_string(),
            y_label: "Predicted Price (USD)".to_string(),
            series: vec![SeriesSpec {
                label: "Predicted Price".to_string(),
                color: SeriesColor::RoyalBlue,
                stroke: Stroke::Dashed,
                markers: true,
                points,
            }],
        }
    }

    fn rendered_text(buf: &Buffer) -> String {
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_chart_empty_shows_placeholder() {
        let spec = spec(vec![]);
        let area = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(area);
        DateChart::new(&spec).render(area, &mut buf);

        let text = rendered_text(&buf);
        assert!(text.contains("No data"));
        assert!(text.contains("30-Day BTC Price Forecast"));
    }

    #[test]
    fn test_chart_with_data_and_highlight() {
        let spec = spec((1..=30).map(|d| (date(d), 40_000.0 + f64::from(d))).collect());
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        DateChart::new(&spec).highlight(Some(date(15))).render(area, &mut buf);

        let text = rendered_text(&buf);
        assert!(text.contains("30-Day BTC Price Forecast"));
        assert!(text.contains("Predicted Price"));
    }

    #[test]
    fn test_chart_single_flat_point() {
        let spec = spec(vec![(date(1), 0.0)]);
        let area = Rect::new(0, 0, 60, 15);
        let mut buf = Buffer::empty(area);
        DateChart::new(&spec).render(area, &mut buf);
    }

    #[test]
    fn test_y_bounds_padding() {
        assert_eq!(y_bounds(0.0, 10.0), [-1.0, 11.0]);
        assert_eq!(y_bounds(0.0, 0.0), [-0.5, 0.5]);
        assert_eq!(y_bounds(40_000.0, 40_000.0), [39_600.0, 40_400.0]);
    }
}
