// Top-level UI composition
//
// Splits the frame into title bar, view tab bar, body, and status bar,
// then dispatches the body to the active view's panel.

use super::app::{App, View};
use super::components;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    text::Line,
    widgets::{Block, Tabs},
    Frame,
};

/// Draw the whole UI for one frame
pub fn draw(f: &mut Frame, app: &App) {
    // Paint the theme background first
    let background = Block::default().style(ratatui::style::Style::new().bg(app.theme.bg));
    f.render_widget(background, f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(1), // View tabs
            Constraint::Min(10),   // Body
            Constraint::Length(2), // Status bar
        ])
        .split(f.area());

    components::title_bar::render(f, chunks[0], app);
    render_view_tabs(f, chunks[1], app);

    match app.view {
        View::Overview => components::overview_panel::render(f, chunks[2], app),
        View::Channels => components::channels_panel::render(f, chunks[2], app),
        View::Categories => components::category_panel::render(f, chunks[2], app),
        View::Refunds => components::refund_panel::render(f, chunks[2], app),
        View::Chat => components::chat_panel::render(f, chunks[2], app),
    }

    components::status_bar::render(f, chunks[3], app);
}

fn render_view_tabs(f: &mut Frame, area: ratatui::layout::Rect, app: &App) {
    let theme = &app.theme;
    let titles: Vec<Line> = View::all()
        .iter()
        .enumerate()
        .map(|(i, v)| Line::from(format!(" F{} {} ", i + 1, v.name())))
        .collect();

    let selected = View::all()
        .iter()
        .position(|v| *v == app.view)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(theme.dim())
        .highlight_style(theme.highlight());

    f.render_widget(tabs, area);
}
