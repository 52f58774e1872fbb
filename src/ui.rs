use ratatui::{
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::transcript::Origin;

pub fn draw(app: &mut App, frame: &mut Frame) {
    let [header_area, chat_area, input_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(3),
    ])
    .areas(frame.area());

    // Header bar
    let status = if app.transcript.is_awaiting_response() {
        "typing..."
    } else {
        "online"
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" CS Chatbot ", Style::default().fg(Color::White).bold()),
        Span::styled(status, Style::default().fg(Color::Gray)),
    ]))
    .style(Style::default().bg(Color::Magenta));
    frame.render_widget(header, header_area);

    // Transcript pane. Store the inner size for scroll calculations.
    app.transcript_height = chat_area.height.saturating_sub(2);
    app.transcript_width = chat_area.width.saturating_sub(2);

    let mut lines: Vec<Line> = Vec::new();
    for msg in app.transcript.messages() {
        match msg.origin {
            Origin::Bot => {
                lines.push(Line::from(Span::styled(
                    "Bot",
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )));
                for line in msg.text.lines() {
                    lines.push(Line::from(line.to_string()));
                }
                lines.push(Line::default());
            }
            Origin::User => {
                lines.push(
                    Line::from(Span::styled(
                        "You",
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                    ))
                    .right_aligned(),
                );
                for line in msg.text.lines() {
                    lines.push(Line::from(line.to_string()).right_aligned());
                }
                lines.push(Line::default());
            }
        }
    }

    // Typing placeholder: a virtual last entry, never part of the transcript
    if app.transcript.is_awaiting_response() {
        lines.push(Line::from(Span::styled(
            "Bot",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        let dots = ".".repeat((app.animation_frame as usize) + 1);
        lines.push(Line::from(Span::styled(
            dots,
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    let chat = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .wrap(Wrap { trim: true })
        .scroll((app.transcript_scroll, 0));
    frame.render_widget(chat, chat_area);

    // Input line with horizontal scrolling to keep the cursor visible
    let inner_width = input_area.width.saturating_sub(2) as usize;
    let scroll_offset = if inner_width == 0 || app.draft_cursor < inner_width {
        0
    } else {
        app.draft_cursor - inner_width + 1
    };
    let visible_text: String = app
        .draft
        .chars()
        .skip(scroll_offset)
        .take(inner_width)
        .collect();

    let input = Paragraph::new(visible_text)
        .style(Style::default().fg(Color::Cyan))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Type a Message (Enter to send, Esc to quit) "),
        );
    frame.render_widget(input, input_area);

    // Show the cursor at the draft position, inside the border
    frame.set_cursor_position((
        input_area.x + app.draft_cursor.saturating_sub(scroll_offset) as u16 + 1,
        input_area.y + 1,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use anyhow::Result;
    use async_trait::async_trait;
    use ratatui::backend::{Backend as _, TestBackend};
    use ratatui::Terminal;
    use std::sync::Arc;

    struct Silent;

    #[async_trait]
    impl crate::session::Backend for Silent {
        async fn send(&self, _message: &str) -> Result<String> {
            Ok("ok".to_string())
        }
    }

    fn draw_to(app: &mut App, width: u16, height: u16) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| draw(app, frame)).unwrap();
        terminal
    }

    #[test]
    fn cursor_sits_at_the_draft_position() {
        let mut app = App::new(Session::new(Arc::new(Silent)));
        app.draft = "hello".to_string();
        app.draft_cursor = 3;

        let mut terminal = draw_to(&mut app, 40, 12);

        // Input box fills the bottom three rows; +1 past the border.
        let pos = terminal.backend_mut().get_cursor_position().unwrap();
        assert_eq!((pos.x, pos.y), (4, 10));
    }

    #[test]
    fn cursor_follows_editing_keys() {
        let mut app = App::new(Session::new(Arc::new(Silent)));
        app.draft = "hello".to_string();

        app.draft_cursor = 0; // Home
        let mut terminal = draw_to(&mut app, 40, 12);
        let pos = terminal.backend_mut().get_cursor_position().unwrap();
        assert_eq!(pos.x, 1);

        app.draft_cursor = 5; // End
        let mut terminal = draw_to(&mut app, 40, 12);
        let pos = terminal.backend_mut().get_cursor_position().unwrap();
        assert_eq!(pos.x, 6);
    }

    #[test]
    fn cursor_stays_inside_the_box_when_the_draft_overflows() {
        let mut app = App::new(Session::new(Arc::new(Silent)));
        app.draft = "a".repeat(100);
        app.draft_cursor = 100;

        let mut terminal = draw_to(&mut app, 40, 12);

        // Inner width is 38, so the view scrolls and the cursor lands on
        // the last inner column instead of walking off the widget.
        let pos = terminal.backend_mut().get_cursor_position().unwrap();
        assert_eq!((pos.x, pos.y), (38, 10));
    }
}
