// Refund panel - headline refund figures, reason distribution, and the
// refund-heavy product list

use super::{
    formatters::{format_delta, format_yuan},
    product_table,
};
use crate::data::overview::refund_reasons;
use crate::tui::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(6),
            Constraint::Length(10),
        ])
        .split(area);

    render_summary(frame, chunks[0], app);
    render_reasons(frame, chunks[1], app);
    product_table::render(
        frame,
        chunks[2],
        "退款重灾商品",
        &app.dashboard.refund_products,
        &app.refund_pager,
        &app.theme,
    );
}

fn render_summary(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let summary = &app.dashboard.refund_summary;

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    // For refunds, growth is bad: invert the delta before styling
    let amount_lines = vec![Line::from(vec![
        Span::styled(
            format_yuan(summary.amount),
            theme.text().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", format_delta(summary.amount_dod)),
            theme.delta_style(-summary.amount_dod),
        ),
    ])];
    let amount = Paragraph::new(amount_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" 今日退款金额 ")
            .title_style(Style::new().fg(theme.faint))
            .border_style(theme.frame_style(false)),
    );
    frame.render_widget(amount, cols[0]);

    let orders_lines = vec![Line::from(vec![
        Span::styled(
            format!("{} 单", summary.orders),
            theme.text().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", format_delta(summary.orders_dod)),
            theme.delta_style(-summary.orders_dod),
        ),
    ])];
    let orders = Paragraph::new(orders_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" 今日退款订单 ")
            .title_style(Style::new().fg(theme.faint))
            .border_style(theme.frame_style(false)),
    );
    frame.render_widget(orders, cols[1]);
}

/// Reason distribution as proportional bars (percentages sum to 100)
fn render_reasons(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" 退款原因分布 ")
        .title_style(theme.panel_title())
        .border_style(theme.frame_style(false));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let bar_width = (inner.width as usize).saturating_sub(26).max(10);
    let mut lines = Vec::new();
    for reason in refund_reasons() {
        let filled = (bar_width * reason.value as usize / 100).max(1);
        lines.push(Line::from(vec![
            Span::styled(format!("{:<12}", reason.name), theme.text()),
            Span::styled("█".repeat(filled), Style::new().fg(theme.trend_down)),
            Span::styled(format!(" {}%", reason.value), theme.dim()),
        ]));
        lines.push(Line::default());
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
