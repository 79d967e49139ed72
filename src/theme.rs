// Color themes
//
// Three palettes switchable at runtime with the `t` key. A Theme is a
// flat bag of colors plus small style constructors so panels never
// assemble Styles from raw colors.

use ratatui::style::{Color, Modifier, Style};

/// Selectable palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
    Nord,
}

impl ThemeKind {
    /// Resolve a config string; unknown names fall back to the default
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => ThemeKind::Light,
            "nord" => ThemeKind::Nord,
            _ => ThemeKind::Dark,
        }
    }

    /// Cycle order: Dark → Light → Nord → Dark
    pub fn next(self) -> Self {
        match self {
            ThemeKind::Dark => ThemeKind::Light,
            ThemeKind::Light => ThemeKind::Nord,
            ThemeKind::Nord => ThemeKind::Dark,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ThemeKind::Dark => "Dark",
            ThemeKind::Light => "Light",
            ThemeKind::Nord => "Nord",
        }
    }

    pub fn theme(self) -> Theme {
        match self {
            ThemeKind::Dark => Theme::dark(),
            ThemeKind::Light => Theme::light(),
            ThemeKind::Nord => Theme::nord(),
        }
    }
}

/// All colors one palette defines
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub frame: Color,
    pub frame_active: Color,
    pub accent: Color,
    pub hint: Color,
    pub highlight_bg: Color,
    pub highlight_fg: Color,

    // Metric direction (day-over-day deltas, product trends)
    pub trend_up: Color,
    pub trend_down: Color,

    // Charts and bars
    pub chart_today: Color,
    pub chart_yesterday: Color,
    pub chart_bar: Color,

    // Chat transcript speakers
    pub chat_user: Color,
    pub chat_assistant: Color,

    pub error: Color,
    pub faint: Color,

    // Status-bar log tail
    pub log_error: Color,
    pub log_warn: Color,
    pub log_info: Color,
    pub log_debug: Color,
    pub log_trace: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            bg: Color::Reset,
            fg: Color::White,
            frame: Color::Gray,
            frame_active: Color::Cyan,
            accent: Color::Cyan,
            hint: Color::Green,
            highlight_bg: Color::DarkGray,
            highlight_fg: Color::Yellow,
            trend_up: Color::Green,
            trend_down: Color::Red,
            chart_today: Color::Cyan,
            chart_yesterday: Color::DarkGray,
            chart_bar: Color::Blue,
            chat_user: Color::Yellow,
            chat_assistant: Color::Cyan,
            error: Color::Red,
            faint: Color::DarkGray,
            log_error: Color::Red,
            log_warn: Color::Yellow,
            log_info: Color::Blue,
            log_debug: Color::Gray,
            log_trace: Color::DarkGray,
        }
    }

    pub fn light() -> Self {
        Self {
            bg: Color::White,
            fg: Color::Black,
            frame: Color::DarkGray,
            frame_active: Color::Blue,
            accent: Color::Blue,
            hint: Color::DarkGray,
            highlight_bg: Color::LightBlue,
            highlight_fg: Color::Black,
            trend_up: Color::Green,
            trend_down: Color::Red,
            chart_today: Color::Blue,
            chart_yesterday: Color::Gray,
            chart_bar: Color::Magenta,
            chat_user: Color::Rgb(184, 134, 11), // dark goldenrod
            chat_assistant: Color::Blue,
            error: Color::Red,
            faint: Color::Gray,
            log_error: Color::Red,
            log_warn: Color::Rgb(184, 134, 11),
            log_info: Color::Blue,
            log_debug: Color::DarkGray,
            log_trace: Color::Gray,
        }
    }

    pub fn nord() -> Self {
        Self {
            bg: Color::Rgb(46, 52, 64),
            fg: Color::Rgb(236, 239, 244),
            frame: Color::Rgb(76, 86, 106),
            frame_active: Color::Rgb(136, 192, 208),
            accent: Color::Rgb(136, 192, 208),
            hint: Color::Rgb(163, 190, 140),
            highlight_bg: Color::Rgb(67, 76, 94),
            highlight_fg: Color::Rgb(235, 203, 139),
            trend_up: Color::Rgb(163, 190, 140),
            trend_down: Color::Rgb(191, 97, 106),
            chart_today: Color::Rgb(136, 192, 208),
            chart_yesterday: Color::Rgb(76, 86, 106),
            chart_bar: Color::Rgb(129, 161, 193),
            chat_user: Color::Rgb(235, 203, 139),
            chat_assistant: Color::Rgb(136, 192, 208),
            error: Color::Rgb(191, 97, 106),
            faint: Color::Rgb(76, 86, 106),
            log_error: Color::Rgb(191, 97, 106),
            log_warn: Color::Rgb(235, 203, 139),
            log_info: Color::Rgb(129, 161, 193),
            log_debug: Color::Rgb(76, 86, 106),
            log_trace: Color::Rgb(59, 66, 82),
        }
    }

    // Style constructors

    /// Body text
    pub fn text(&self) -> Style {
        Style::new().fg(self.fg)
    }

    /// Secondary text
    pub fn dim(&self) -> Style {
        Style::new().fg(self.faint)
    }

    /// Panel border, focused or not
    pub fn frame_style(&self, focused: bool) -> Style {
        let color = if focused { self.frame_active } else { self.frame };
        Style::new().fg(color)
    }

    /// Panel title text
    pub fn panel_title(&self) -> Style {
        Style::new().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// Status-bar text
    pub fn hint_style(&self) -> Style {
        Style::new().fg(self.hint)
    }

    /// Active tab / current page number
    pub fn highlight(&self) -> Style {
        Style::new()
            .fg(self.highlight_fg)
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Error text
    pub fn error_text(&self) -> Style {
        Style::new().fg(self.error).add_modifier(Modifier::BOLD)
    }

    /// Colors a signed day-over-day delta by direction
    pub fn delta_style(&self, delta: f64) -> Style {
        let color = if delta >= 0.0 {
            self.trend_up
        } else {
            self.trend_down
        };
        Style::new().fg(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_cycle_wraps() {
        assert_eq!(ThemeKind::Dark.next(), ThemeKind::Light);
        assert_eq!(ThemeKind::Nord.next(), ThemeKind::Dark);
    }

    #[test]
    fn from_name_falls_back_to_dark() {
        assert_eq!(ThemeKind::from_name("nord"), ThemeKind::Nord);
        assert_eq!(ThemeKind::from_name("LIGHT"), ThemeKind::Light);
        assert_eq!(ThemeKind::from_name("dracula"), ThemeKind::Dark);
    }

    #[test]
    fn delta_style_uses_direction_colors() {
        let theme = Theme::dark();
        assert_eq!(theme.delta_style(5.2).fg, Some(theme.trend_up));
        assert_eq!(theme.delta_style(-0.9).fg, Some(theme.trend_down));
    }
}
