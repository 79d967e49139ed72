// Paginated product table
//
// Shared by the overview ranked lists, the channel contribution list,
// and the refund-heavy list. Renders a fixed-page-size table plus the
// pagination control row driven by a Pager.

use super::formatters::{format_yuan, truncate_width};
use crate::data::product::{Product, Trend};
use crate::pager::Pager;
use crate::theme::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

/// Render a paginated product table with its control row
pub fn render(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    products: &[Product],
    pager: &Pager,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
        .title_style(theme.panel_title())
        .border_style(theme.frame_style(false));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Reserve one row for pagination when there is more than one page
    let chunks = if pager.has_controls(products.len()) {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(inner)
    } else {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0)])
            .split(inner)
    };

    render_table(frame, chunks[0], products, pager, theme);
    if pager.has_controls(products.len()) {
        render_controls(frame, chunks[1], products.len(), pager, theme);
    }
}

fn render_table(frame: &mut Frame, area: Rect, products: &[Product], pager: &Pager, theme: &Theme) {
    let header = Row::new(vec!["排名", "商品名称", "销量(单)", "销售额", "趋势"])
        .style(theme.dim())
        .bottom_margin(1);

    let rows: Vec<Row> = pager
        .slice(products)
        .iter()
        .map(|p| {
            let trend_style = match p.trend {
                Trend::Up => Style::new().fg(theme.trend_up),
                Trend::Down => Style::new().fg(theme.trend_down),
            };
            Row::new(vec![
                Cell::from(format!("{}", p.rank)),
                Cell::from(truncate_width(&p.name, 28)),
                Cell::from(format!("{}", p.orders)),
                Cell::from(format_yuan(p.gmv)),
                Cell::from(Span::styled(p.trend.arrow(), trend_style)),
            ])
            .style(theme.text())
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Min(20),
            Constraint::Length(9),
            Constraint::Length(11),
            Constraint::Length(4),
        ],
    )
    .header(header);

    frame.render_widget(table, area);
}

/// Pagination row: ‹ 1 2 [3] 4 5 › with boundary arrows dimmed when
/// disabled. Every page number is shown - lists are capped at 50 items.
fn render_controls(frame: &mut Frame, area: Rect, total: usize, pager: &Pager, theme: &Theme) {
    let mut spans: Vec<Span> = Vec::new();

    let prev_style = if pager.at_first() {
        theme.dim()
    } else {
        theme.text()
    };
    spans.push(Span::styled("‹ 上一页 ", prev_style));

    for page in pager.page_numbers(total) {
        if page == pager.current() {
            spans.push(Span::styled(format!(" {} ", page), theme.highlight()));
        } else {
            spans.push(Span::styled(format!(" {} ", page), theme.dim()));
        }
    }

    let next_style = if pager.at_last(total) {
        theme.dim()
    } else {
        theme.text()
    };
    spans.push(Span::styled(" 下一页 ›", next_style));

    let controls = Paragraph::new(Line::from(spans)).centered();
    frame.render_widget(controls, area);
}
