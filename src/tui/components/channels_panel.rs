// Channels panel - per-channel funnel, weekly trend, core products
//
// One channel is active at a time; switching regenerates nothing, the
// three datasets are built up front and only the product pager resets.

use super::{
    formatters::{format_delta, format_yuan},
    product_table,
};
use crate::data::channel::{Channel, FunnelStage};
use crate::data::overview::group_thousands;
use crate::tui::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Tabs},
    Frame,
};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(10),
        ])
        .split(area);

    render_channel_tabs(frame, chunks[0], app);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    render_funnel(frame, middle[0], app);
    render_weekly_trend(frame, middle[1], app);

    let dataset = app.dashboard.channel(app.active_channel);
    product_table::render(
        frame,
        chunks[2],
        "核心商品贡献",
        &dataset.products,
        &app.channel_pager,
        &app.theme,
    );
}

fn render_channel_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let titles: Vec<Line> = Channel::all()
        .iter()
        .map(|c| {
            let summary = &app.dashboard.channel(*c).summary;
            Line::from(format!(
                " {} {} ({}) 占比{}% ",
                c.name(),
                format_yuan(summary.gmv),
                format_delta(summary.dod_percent),
                summary.share_percent
            ))
        })
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.active_channel.index())
        .style(theme.dim())
        .highlight_style(theme.highlight())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" 销售增长因素 ")
                .title_style(theme.panel_title())
                .border_style(theme.frame_style(false)),
        );

    frame.render_widget(tabs, area);
}

/// Conversion funnel as proportional bars. Each bar is scaled against
/// the first stage, with the retained percentage on the right.
fn render_funnel(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let dataset = app.dashboard.channel(app.active_channel);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" 转化漏斗 ")
        .title_style(theme.panel_title())
        .border_style(theme.frame_style(false));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = funnel_lines(&dataset.funnel, inner.width as usize, theme);
    frame.render_widget(Paragraph::new(lines), inner);
}

fn funnel_lines(
    funnel: &[FunnelStage],
    width: usize,
    theme: &crate::theme::Theme,
) -> Vec<Line<'static>> {
    let Some(first) = funnel.first().map(|s| s.value).filter(|v| *v > 0) else {
        return Vec::new();
    };
    // Label column, then the bar fills what is left
    let bar_width = width.saturating_sub(30).max(10);

    let mut lines = Vec::new();
    for stage in funnel {
        let ratio = stage.value as f64 / first as f64;
        let filled = ((bar_width as f64) * ratio).round().max(1.0) as usize;

        lines.push(Line::from(vec![
            Span::styled(format!("{:<12}", stage.name), theme.text()),
            Span::styled(format!("{:>7} ", group_thousands(stage.value as u64)), theme.dim()),
            Span::styled("█".repeat(filled), Style::new().fg(theme.chart_bar)),
            Span::styled(format!(" {:.0}%", ratio * 100.0), theme.dim()),
        ]));
        lines.push(Line::default());
    }
    lines
}

fn render_weekly_trend(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let dataset = app.dashboard.channel(app.active_channel);

    let clicks: Vec<(f64, f64)> = dataset
        .trend
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.clicks as f64))
        .collect();
    let pays: Vec<(f64, f64)> = dataset
        .trend
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.pays as f64))
        .collect();

    let y_max = dataset
        .trend
        .iter()
        .map(|p| p.clicks)
        .max()
        .unwrap_or(1)
        .max(1) as f64;

    let datasets = vec![
        Dataset::default()
            .name("点击")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::new().fg(theme.chart_today))
            .data(&clicks),
        Dataset::default()
            .name("支付")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::new().fg(theme.chart_bar))
            .data(&pays),
    ];

    let x_labels: Vec<Span> = dataset
        .trend
        .iter()
        .map(|p| Span::styled(p.day, theme.dim()))
        .collect();

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" 近7日 点击/支付 趋势 ")
                .title_style(theme.panel_title())
                .border_style(theme.frame_style(false)),
        )
        .x_axis(
            Axis::default()
                .bounds([0.0, (dataset.trend.len().saturating_sub(1)) as f64])
                .labels(x_labels),
        )
        .y_axis(Axis::default().bounds([0.0, y_max * 1.1]).labels(vec![
            Span::styled("0", theme.dim()),
            Span::styled(format!("{:.0}", y_max * 1.1), theme.dim()),
        ]));

    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;

    #[test]
    fn funnel_bars_shrink_with_values() {
        let theme = Theme::dark();
        let funnel = vec![
            FunnelStage { name: "访客数 (UV)", value: 1000 },
            FunnelStage { name: "加购人数", value: 500 },
            FunnelStage { name: "支付成功", value: 100 },
        ];
        let lines = funnel_lines(&funnel, 80, &theme);
        // One bar line + one spacer per stage
        assert_eq!(lines.len(), 6);

        let bar_len = |line: &Line| {
            line.spans
                .iter()
                .find(|s| s.content.starts_with('█'))
                .map(|s| s.content.chars().count())
                .unwrap_or(0)
        };
        assert!(bar_len(&lines[0]) > bar_len(&lines[2]));
        assert!(bar_len(&lines[2]) > bar_len(&lines[4]));
        // Smallest stage still draws at least one block
        assert!(bar_len(&lines[4]) >= 1);
    }

    #[test]
    fn empty_funnel_renders_nothing() {
        let theme = Theme::dark();
        assert!(funnel_lines(&[], 80, &theme).is_empty());
    }
}
