#![allow(clippy::format_push_string)]

use crate::comparison::ComparisonView;
use crate::format::format_usd;
use crate::lookup::LookupOutcome;
use crate::view::{
    DashboardView, COMPARISON_HEADING, FORECAST_HEADING, LOOKUP_HEADING, SENTIMENT_HEADING,
    SUMMARIES_HEADING,
};

const RULE: &str = "═══════════════════════════════════════════════════════════════\n";
const THIN_RULE: &str = "───────────────────────────────────────────────────────────────\n";

pub struct ReportFormatter;

impl ReportFormatter {
    /// Renders one dashboard pass as plain text.
    #[must_use]
    pub fn format(view: &DashboardView) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str(RULE);
        output.push_str(&format!("  {}\n", view.title));
        output.push_str(&format!("  {}\n", view.caption));
        output.push_str(RULE);
        output.push_str(&format!("{}\n\n", view.model_status));

        // News summaries
        section(&mut output, SUMMARIES_HEADING);
        if view.summaries.is_empty() {
            output.push_str("No news summaries available.\n");
        }
        for block in &view.summaries {
            output.push_str(&format!("{}\n", block.title));
            output.push_str(&format!("{}\n", block.summary));
            output.push_str(&format!(
                "Sentiment: {} ({})\n",
                block.sentiment, block.published_date
            ));
            output.push_str("---\n");
        }
        output.push('\n');

        // Daily sentiment
        section(&mut output, SENTIMENT_HEADING);
        for score in &view.sentiment_scores {
            match score.sentiment_score {
                Some(value) => output.push_str(&format!(
                    "{}   {:>6.2}\n",
                    score.published_date, value
                )),
                None => output.push_str(&format!("{}      n/a\n", score.published_date)),
            }
        }
        output.push('\n');

        // Forecast
        section(&mut output, FORECAST_HEADING);
        for series in &view.forecast_chart.series {
            for (date, price) in &series.points {
                output.push_str(&format!("{date}   {:>14}\n", format_usd(*price)));
            }
        }
        output.push('\n');

        // Comparison
        match &view.comparison {
            ComparisonView::Available { records } => {
                section(&mut output, COMPARISON_HEADING);
                output.push_str(&format!(
                    "{:<10}   {:>14}   {:>14}\n",
                    "Date", "Actual", "Predicted"
                ));
                for record in records {
                    output.push_str(&format!(
                        "{}   {:>14}   {:>14}\n",
                        record.forecast_date,
                        format_usd(record.actual_price),
                        format_usd(record.predicted_price)
                    ));
                }
            }
            ComparisonView::Unavailable { notice } => {
                output.push_str(&format!("ℹ️  {notice}\n"));
            }
        }
        output.push('\n');

        // Date lookup
        section(&mut output, LOOKUP_HEADING);
        match &view.lookup {
            LookupOutcome::Price { date, display, .. } => {
                output.push_str(&format!("Predicted BTC Price on {date}: {display}\n"));
            }
            LookupOutcome::NoForecast { notice } => {
                output.push_str(&format!("⚠️  {notice}\n"));
            }
        }

        output.push('\n');
        output.push_str(RULE);

        output
    }
}

fn section(output: &mut String, heading: &str) {
    output.push_str(heading);
    output.push('\n');
    output.push_str(THIN_RULE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::NO_COMPARISON_NOTICE;
    use crate::config::DashboardConfig;
    use crate::lookup::{DateLookup, NO_FORECAST_NOTICE};
    use crate::view::tests::{day, sample_data};

    fn report(actual_days: Option<i64>, select: Option<i64>) -> String {
        let data = sample_data(actual_days);
        let mut lookup = DateLookup::new(&data.forecast);
        if let Some(offset) = select {
            lookup.select(day(offset));
        }
        let view = DashboardView::build(&data, &DashboardConfig::default(), &lookup).unwrap();
        ReportFormatter::format(&view)
    }

    #[test]
    fn test_report_without_actual_prices_shows_notice() {
        let text = report(None, None);

        assert!(text.contains("Bitcoin News Sentiment Dashboard"));
        assert!(text.contains(SUMMARIES_HEADING));
        assert!(text.contains("Sentiment: POSITIVE (2024-01-03)"));
        assert!(text.contains(NO_COMPARISON_NOTICE));
        assert!(!text.contains(COMPARISON_HEADING));
        assert!(text.contains("Predicted BTC Price on 2024-01-01: $40,000.00"));
    }

    #[test]
    fn test_report_with_actual_prices_lists_joined_rows() {
        let text = report(Some(10), Some(14));

        assert!(text.contains(COMPARISON_HEADING));
        assert!(!text.contains(NO_COMPARISON_NOTICE));
        assert!(text.contains(&format!("2024-01-10   {:>14}", "$39,909.00")));
        assert!(text.contains("Predicted BTC Price on 2024-01-15: $40,014.00"));
    }

    #[test]
    fn test_report_with_empty_forecast_warns() {
        let mut data = sample_data(None);
        data.forecast.clear();
        let lookup = DateLookup::new(&data.forecast);
        let view = DashboardView::build(&data, &DashboardConfig::default(), &lookup).unwrap();
        let text = ReportFormatter::format(&view);

        assert!(text.contains(NO_FORECAST_NOTICE));
    }
}
