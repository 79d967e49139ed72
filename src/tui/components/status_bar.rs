// Status bar component
//
// Renders uptime, keybinding hints for the current view, and the most
// recent log line at the bottom of the screen.

use crate::theme::Theme;
use crate::tui::app::{App, View};
use crate::tui::layout::Breakpoint;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the status bar with hints for the active view
///
/// Adapts to terminal width: narrow terminals drop the log tail.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let hints = match app.view {
        View::Overview => "Tab 热销/飙升 │ ←/→ 翻页 │ 1-9 跳页",
        View::Channels => "Tab 切换渠道 │ ←/→ 翻页",
        View::Categories => "Tab 切换品类",
        View::Refunds => "←/→ 翻页",
        View::Chat => "Enter 发送 │ Esc 返回总览",
    };

    let text = format!(
        " {} │ {} │ {} │ PgUp/PgDn 视图 t 主题 r 刷新 q 退出",
        app.uptime(),
        app.view.name(),
        hints
    );
    let mut spans = vec![Span::styled(text, app.theme.hint_style())];

    // Append the latest log line when there is room
    let bp = Breakpoint::from_width(area.width);
    if bp.at_least(Breakpoint::Wide) {
        if let Some(entry) = app.log_buffer.latest() {
            let clock = entry.timestamp.with_timezone(&chrono::Local).format("%H:%M:%S");
            spans.push(Span::styled(
                format!(" │ {} [{}]", clock, entry.level),
                Style::new().fg(log_color(&app.theme, entry.level)),
            ));
            spans.push(Span::styled(
                format!(" {}", entry.message),
                app.theme.dim(),
            ));
        }
    }

    let status =
        Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::TOP));

    f.render_widget(status, area);
}

fn log_color(theme: &Theme, level: tracing::Level) -> ratatui::style::Color {
    use tracing::Level;
    if level == Level::ERROR {
        theme.log_error
    } else if level == Level::WARN {
        theme.log_warn
    } else if level == Level::INFO {
        theme.log_info
    } else if level == Level::DEBUG {
        theme.log_debug
    } else {
        theme.log_trace
    }
}
