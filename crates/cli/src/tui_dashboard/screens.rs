use super::chart::DateChart;
use super::{App, StatusMessage};
use btc_dashboard_core::view::{
    COMPARISON_HEADING, FORECAST_HEADING, LOOKUP_HEADING, SENTIMENT_HEADING, SUMMARIES_HEADING,
};
use btc_dashboard_core::{ComparisonView, LookupOutcome, SentimentLabel};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Title
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Status + instructions
        ])
        .split(f.area());

    render_title(f, app, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(38), Constraint::Percentage(62)])
        .split(chunks[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(12)])
        .split(columns[0]);
    render_summaries(f, app, left[0]);
    render_lookup(f, app, left[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Ratio(1, 3), // Sentiment
            Constraint::Ratio(1, 3), // Forecast
            Constraint::Ratio(1, 3), // Comparison
        ])
        .split(columns[1]);
    let sentiment_area = section_area(f, SENTIMENT_HEADING, right[0]);
    f.render_widget(DateChart::new(&app.view.sentiment_chart), sentiment_area);
    let forecast_area = section_area(f, FORECAST_HEADING, right[1]);
    f.render_widget(
        DateChart::new(&app.view.forecast_chart).highlight(app.view.selected_date),
        forecast_area,
    );
    render_comparison(f, app, right[2]);

    render_footer(f, app, chunks[2]);
}

/// Draws a section heading on the first row of `area` and returns the rest.
fn section_area(f: &mut Frame, heading: &str, area: Rect) -> Rect {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);
    let heading = Paragraph::new(heading)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    f.render_widget(heading, rows[0]);
    rows[1]
}

fn render_title(f: &mut Frame, app: &App, area: Rect) {
    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            app.view.title.as_str(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            app.view.caption.as_str(),
            Style::default().fg(Color::Gray),
        )),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn sentiment_style(label: &SentimentLabel) -> Style {
    match label {
        SentimentLabel::Positive => Style::default().fg(Color::Green),
        SentimentLabel::Negative => Style::default().fg(Color::Red),
        SentimentLabel::Neutral => Style::default().fg(Color::Gray),
        SentimentLabel::Unrecognized(_) => Style::default().fg(Color::Yellow),
    }
}

fn render_summaries(f: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();
    if app.view.summaries.is_empty() {
        lines.push(Line::from("No news summaries available."));
    }
    for block in &app.view.summaries {
        lines.push(Line::from(Span::styled(
            block.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(block.summary.as_str()));
        lines.push(Line::from(vec![
            Span::raw("Sentiment: "),
            Span::styled(block.sentiment.as_str(), sentiment_style(&block.sentiment)),
            Span::styled(
                format!("  {}", block.published_date),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        lines.push(Line::from("---"));
    }

    let summaries = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(SUMMARIES_HEADING));
    f.render_widget(summaries, area);
}

fn render_lookup(f: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let items: Vec<ListItem> = app
        .view
        .lookup_options
        .iter()
        .map(|date| ListItem::new(date.format("%Y-%m-%d").to_string()))
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(LOOKUP_HEADING))
        .highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
        .highlight_symbol("● ");
    let mut state = ListState::default().with_selected(app.lookup.selected_index());
    f.render_stateful_widget(list, rows[0], &mut state);

    let metric = match &app.view.lookup {
        LookupOutcome::Price { date, display, .. } => Paragraph::new(Line::from(vec![
            Span::raw(format!("Predicted BTC Price on {date}: ")),
            Span::styled(
                display.as_str(),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
        ])),
        LookupOutcome::NoForecast { notice } => {
            Paragraph::new(notice.as_str()).style(Style::default().fg(Color::Yellow))
        }
    };
    f.render_widget(metric.block(Block::default().borders(Borders::ALL)), rows[1]);
}

fn render_comparison(f: &mut Frame, app: &App, area: Rect) {
    match (&app.view.comparison, &app.view.comparison_chart) {
        (ComparisonView::Available { .. }, Some(chart)) => {
            let chart_area = section_area(f, COMPARISON_HEADING, area);
            f.render_widget(
                DateChart::new(chart).highlight(app.view.selected_date),
                chart_area,
            );
        }
        (ComparisonView::Unavailable { notice }, _) => {
            let info = Paragraph::new(notice.as_str())
                .style(Style::default().fg(Color::LightBlue))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(info, area);
        }
        (ComparisonView::Available { .. }, None) => {}
    }
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let status = match &app.status {
        Some(StatusMessage::Info(message)) => {
            Span::styled(message.as_str(), Style::default().fg(Color::Green))
        }
        Some(StatusMessage::Error(message)) => {
            Span::styled(message.as_str(), Style::default().fg(Color::Red))
        }
        None => Span::styled(
            app.view.model_status.as_str(),
            Style::default().fg(Color::DarkGray),
        ),
    };

    let footer = Paragraph::new(Line::from(vec![
        status,
        Span::raw("  |  ↑↓/jk: Date | Home/End: First/Last | r: Reload | q: Quit"),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}
