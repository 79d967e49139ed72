// Category panel - category tabs and sub-category sales bars
//
// Six fixed category tabs; switching one regenerates the sub-category
// breakdown and both ranked product lists. Bars are pre-sorted
// descending by the generator.

use crate::data::overview::{NamedValue, CATEGORIES};
use crate::data::overview::group_thousands;
use crate::tui::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(8)])
        .split(area);

    render_category_tabs(frame, chunks[0], app);
    render_subcategory_bars(frame, chunks[1], app);
}

fn render_category_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let titles: Vec<Line> = CATEGORIES.iter().map(|c| Line::from(format!(" {} ", c))).collect();

    let tabs = Tabs::new(titles)
        .select(app.active_category)
        .style(theme.dim())
        .highlight_style(theme.highlight())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" 品类分析 ")
                .title_style(theme.panel_title())
                .border_style(theme.frame_style(false)),
        );

    frame.render_widget(tabs, area);
}

fn render_subcategory_bars(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} · 子品类销售额 ", CATEGORIES[app.active_category]))
        .title_style(theme.panel_title())
        .border_style(theme.frame_style(false));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = bar_lines(&app.subcategories, inner.width as usize, theme);
    frame.render_widget(Paragraph::new(lines), inner);
}

/// Horizontal bars scaled against the largest sub-category
fn bar_lines(
    subcategories: &[NamedValue],
    width: usize,
    theme: &crate::theme::Theme,
) -> Vec<Line<'static>> {
    let Some(max) = subcategories.iter().map(|s| s.value).max().filter(|v| *v > 0) else {
        return Vec::new();
    };
    let bar_width = width.saturating_sub(26).max(10);

    let mut lines = Vec::new();
    for sub in subcategories {
        let ratio = sub.value as f64 / max as f64;
        let filled = ((bar_width as f64) * ratio).round().max(1.0) as usize;

        lines.push(Line::from(vec![
            Span::styled(format!("{:<12}", sub.name), theme.text()),
            Span::styled("█".repeat(filled), Style::new().fg(theme.chart_bar)),
            Span::styled(
                format!(" ¥ {}", group_thousands(sub.value as u64)),
                theme.dim(),
            ),
        ]));
        lines.push(Line::default());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;

    #[test]
    fn widest_bar_belongs_to_largest_value() {
        let theme = Theme::dark();
        let subs = vec![
            NamedValue { name: "食用油", value: 9000 },
            NamedValue { name: "大米杂粮", value: 4500 },
            NamedValue { name: "厨房调味", value: 1500 },
        ];
        let lines = bar_lines(&subs, 80, &theme);
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
    }
}
