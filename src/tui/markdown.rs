// Markdown rendering for the chat transcript
//
// The assistant persona is told to answer with bullet points and bold
// highlights, so replies go through pulldown-cmark rather than being
// dumped as raw text. Only the subset the persona actually produces is
// handled: headings, bold, italic, inline code, fenced code blocks,
// bullet/numbered lists, and horizontal rules. Line wrapping is left to
// ratatui's Paragraph.

use crate::theme::Theme;
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

#[derive(Debug, Clone, PartialEq)]
pub enum StyledSegment {
    Text(String),
    Bold(String),
    Italic(String),
    InlineCode(String),
    CodeBlock(String),
    Heading { level: u8, text: String },
    ListItemStart { ordered: bool, number: u32 },
    ListItemEnd,
    SoftBreak,
    ParagraphEnd,
    Rule,
}

/// Which container is currently swallowing Text events
#[derive(Debug, Clone, Copy, PartialEq)]
enum Capture {
    None,
    CodeBlock,
    Heading(u8),
    Bold,
    Italic,
}

/// Parse markdown into a flat list of styled segments
pub fn parse_markdown(markdown: &str) -> Vec<StyledSegment> {
    let mut segments = Vec::new();
    let mut capture = Capture::None;
    let mut buf = String::new();
    // (ordered, next number) per nesting level
    let mut lists: Vec<(bool, u32)> = Vec::new();

    for event in Parser::new_ext(markdown, Options::ENABLE_STRIKETHROUGH) {
        match event {
            Event::Start(tag) => match tag {
                Tag::CodeBlock(_) => {
                    capture = Capture::CodeBlock;
                    buf.clear();
                }
                Tag::Heading { level, .. } => {
                    capture = Capture::Heading(level as u8);
                    buf.clear();
                }
                Tag::Strong => {
                    capture = Capture::Bold;
                    buf.clear();
                }
                Tag::Emphasis => {
                    capture = Capture::Italic;
                    buf.clear();
                }
                Tag::List(start) => {
                    lists.push((start.is_some(), start.unwrap_or(1) as u32));
                }
                Tag::Item => {
                    let (ordered, number) = lists.last().copied().unwrap_or((false, 1));
                    segments.push(StyledSegment::ListItemStart { ordered, number });
                    if let Some(current) = lists.last_mut() {
                        current.1 += 1;
                    }
                }
                _ => {}
            },
            Event::End(tag) => {
                let done = std::mem::replace(&mut capture, Capture::None);
                match (tag, done) {
                    (TagEnd::CodeBlock, Capture::CodeBlock) => {
                        segments.push(StyledSegment::CodeBlock(std::mem::take(&mut buf)));
                    }
                    (TagEnd::Heading(_), Capture::Heading(level)) => {
                        segments.push(StyledSegment::Heading {
                            level,
                            text: std::mem::take(&mut buf),
                        });
                    }
                    (TagEnd::Strong, Capture::Bold) => {
                        segments.push(StyledSegment::Bold(std::mem::take(&mut buf)));
                    }
                    (TagEnd::Emphasis, Capture::Italic) => {
                        segments.push(StyledSegment::Italic(std::mem::take(&mut buf)));
                    }
                    (TagEnd::List(_), _) => {
                        lists.pop();
                        segments.push(StyledSegment::ParagraphEnd);
                    }
                    (TagEnd::Item, _) => segments.push(StyledSegment::ListItemEnd),
                    (TagEnd::Paragraph, _) => segments.push(StyledSegment::ParagraphEnd),
                    _ => {}
                }
            }
            Event::Text(text) => {
                if capture == Capture::None {
                    segments.push(StyledSegment::Text(text.to_string()));
                } else {
                    buf.push_str(&text);
                }
            }
            Event::Code(code) => {
                if matches!(capture, Capture::Heading(_)) {
                    buf.push_str(&code);
                } else {
                    segments.push(StyledSegment::InlineCode(code.to_string()));
                }
            }
            Event::SoftBreak | Event::HardBreak => segments.push(StyledSegment::SoftBreak),
            Event::Rule => segments.push(StyledSegment::Rule),
            _ => {}
        }
    }

    segments
}

/// Accumulates spans and emits finished lines
#[derive(Default)]
struct LineBuilder {
    lines: Vec<Line<'static>>,
    pending: Vec<Span<'static>>,
}

impl LineBuilder {
    fn push(&mut self, span: Span<'static>) {
        self.pending.push(span);
    }

    fn break_line(&mut self) {
        if !self.pending.is_empty() {
            self.lines.push(Line::from(std::mem::take(&mut self.pending)));
        }
    }

    fn blank_line(&mut self) {
        self.lines.push(Line::default());
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.break_line();
        // Drop the trailing spacer left by the final ParagraphEnd
        if self.lines.last().is_some_and(|l| l.spans.is_empty()) {
            self.lines.pop();
        }
        self.lines
    }
}

/// Render markdown to ratatui lines with theme styling
pub fn render_lines(markdown: &str, theme: &Theme) -> Vec<Line<'static>> {
    let mut out = LineBuilder::default();
    let mut in_list_item = false;

    for segment in parse_markdown(markdown) {
        match segment {
            StyledSegment::Text(text) => out.push(Span::styled(text, theme.text())),
            StyledSegment::Bold(text) => {
                out.push(Span::styled(text, theme.text().add_modifier(Modifier::BOLD)));
            }
            StyledSegment::Italic(text) => {
                out.push(Span::styled(
                    text,
                    theme.text().add_modifier(Modifier::ITALIC),
                ));
            }
            StyledSegment::InlineCode(code) => {
                out.push(Span::styled(code, Style::new().fg(theme.highlight_fg)));
            }
            StyledSegment::CodeBlock(code) => {
                out.break_line();
                for code_line in code.lines() {
                    out.push(Span::styled(format!("  {}", code_line), theme.dim()));
                    out.break_line();
                }
                out.blank_line();
            }
            StyledSegment::Heading { level, text } => {
                out.break_line();
                // h1/h2 get the accent color, deeper levels just bold
                let style = if level <= 2 {
                    theme.panel_title()
                } else {
                    theme.text().add_modifier(Modifier::BOLD)
                };
                out.push(Span::styled(text, style));
                out.break_line();
            }
            StyledSegment::ListItemStart { ordered, number } => {
                out.break_line();
                let marker = if ordered {
                    format!("{}. ", number)
                } else {
                    "• ".to_string()
                };
                out.push(Span::styled(marker, Style::new().fg(theme.accent)));
                in_list_item = true;
            }
            StyledSegment::ListItemEnd => {
                out.break_line();
                in_list_item = false;
            }
            StyledSegment::SoftBreak => out.break_line(),
            StyledSegment::ParagraphEnd => {
                out.break_line();
                // Lists space themselves per item
                if !in_list_item {
                    out.blank_line();
                }
            }
            StyledSegment::Rule => {
                out.break_line();
                out.push(Span::styled("─".repeat(24), theme.dim()));
                out.break_line();
            }
        }
    }

    out.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_level_is_captured() {
        let segments = parse_markdown("## 核心指标");
        assert!(segments.contains(&StyledSegment::Heading {
            level: 2,
            text: "核心指标".to_string(),
        }));
    }

    #[test]
    fn parses_bold_and_text() {
        let segments = parse_markdown("销售额 **上涨 12%**，主要来自水果。");
        assert!(segments.contains(&StyledSegment::Bold("上涨 12%".to_string())));
        assert!(matches!(segments[0], StyledSegment::Text(_)));
    }

    #[test]
    fn parses_bullet_list() {
        let segments = parse_markdown("- GMV: ¥126,560\n- UV: 8,545");
        let markers = segments
            .iter()
            .filter(|s| matches!(s, StyledSegment::ListItemStart { ordered: false, .. }))
            .count();
        assert_eq!(markers, 2);
    }

    #[test]
    fn ordered_list_numbers_increment() {
        let segments = parse_markdown("1. 第一\n2. 第二\n3. 第三");
        let numbers: Vec<u32> = segments
            .iter()
            .filter_map(|s| match s {
                StyledSegment::ListItemStart { ordered: true, number } => Some(*number),
                _ => None,
            })
            .collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn render_produces_one_line_per_bullet() {
        let theme = Theme::dark();
        let lines = render_lines("- 第一点\n- 第二点", &theme);
        let bullet_lines = lines
            .iter()
            .filter(|l| l.spans.first().is_some_and(|s| s.content.starts_with('•')))
            .count();
        assert_eq!(bullet_lines, 2);
    }

    #[test]
    fn render_plain_paragraph() {
        let theme = Theme::dark();
        let lines = render_lines("今日数据正常。", &theme);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].spans[0].content, "今日数据正常。");
    }

    #[test]
    fn code_block_is_indented_and_muted() {
        let theme = Theme::dark();
        let lines = render_lines("```\nSELECT 1;\n```", &theme);
        assert!(lines[0].spans[0].content.starts_with("  SELECT"));
    }
}
