// Overview panel - headline metrics, hourly sales curve, ranked products
//
// The five metric cards adapt to terminal width (one, three, or five per
// row). The sales curve plots today against yesterday; both series are
// cumulative so the lines only rise.

use super::{formatters::format_delta, product_table};
use crate::data::overview::MetricCard;
use crate::tui::app::{App, RankedTab};
use crate::tui::layout::Breakpoint;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let bp = Breakpoint::from_width(area.width);
    let card_rows = app.dashboard.metric_cards.len().div_ceil(bp.card_columns());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((card_rows * 4) as u16),
            Constraint::Min(8),
            Constraint::Length(10),
        ])
        .split(area);

    render_metric_cards(frame, chunks[0], app, bp);
    render_sales_curve(frame, chunks[1], app);
    render_ranked_table(frame, chunks[2], app);
}

fn render_metric_cards(frame: &mut Frame, area: Rect, app: &App, bp: Breakpoint) {
    let columns = bp.card_columns();
    let cards = &app.dashboard.metric_cards;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(4); cards.len().div_ceil(columns)])
        .split(area);

    for (row_idx, chunk) in cards.chunks(columns).enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
            .split(rows[row_idx]);
        for (col_idx, card) in chunk.iter().enumerate() {
            render_card(frame, cols[col_idx], card, app);
        }
    }
}

fn render_card(frame: &mut Frame, area: Rect, card: &MetricCard, app: &App) {
    let theme = &app.theme;
    let arrow = if card.dod_percent >= 0.0 { "▲" } else { "▼" };

    let lines = vec![
        Line::from(Span::styled(
            card.value.clone(),
            theme.text().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(format!("昨日 {} ", card.sub_value), theme.dim()),
            Span::styled(
                format!("{} {}", arrow, format_delta(card.dod_percent)),
                theme.delta_style(card.dod_percent),
            ),
        ]),
    ];

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", card.title))
            .title_style(Style::new().fg(theme.faint))
            .border_style(theme.frame_style(false)),
    );
    frame.render_widget(widget, area);
}

fn render_sales_curve(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let series = &app.dashboard.overview_series;

    let today: Vec<(f64, f64)> = series
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.today))
        .collect();
    let yesterday: Vec<(f64, f64)> = series
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.yesterday))
        .collect();

    let y_max = series
        .iter()
        .map(|p| p.today.max(p.yesterday))
        .fold(0.0_f64, f64::max)
        .max(1.0);

    let datasets = vec![
        Dataset::default()
            .name("今日")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::new().fg(theme.chart_today))
            .data(&today),
        Dataset::default()
            .name("昨日")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::new().fg(theme.chart_yesterday))
            .data(&yesterday),
    ];

    let x_labels: Vec<Span> = series
        .iter()
        .map(|p| Span::styled(p.time, theme.dim()))
        .collect();

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" 实时销售曲线 (今日 vs 昨日) ")
                .title_style(theme.panel_title())
                .border_style(theme.frame_style(false)),
        )
        .x_axis(
            Axis::default()
                .bounds([0.0, (series.len().saturating_sub(1)) as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .bounds([0.0, y_max * 1.1])
                .labels(vec![
                    Span::styled("0", theme.dim()),
                    Span::styled(format!("{:.0}", y_max * 1.1), theme.dim()),
                ]),
        );

    frame.render_widget(chart, area);
}

fn render_ranked_table(frame: &mut Frame, area: Rect, app: &App) {
    let (products, pager) = match app.ranked_tab {
        RankedTab::Top => (&app.dashboard.top_products, &app.top_pager),
        RankedTab::Rising => (&app.dashboard.rising_products, &app.rising_pager),
    };

    let title = format!(
        "{} (Tab 切换到 {})",
        app.ranked_tab.name(),
        app.ranked_tab.toggle().name()
    );
    product_table::render(frame, area, &title, products, pager, &app.theme);
}
