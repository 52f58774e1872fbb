use crate::session::Session;
use crate::transcript::Transcript;

pub struct App {
    // Core state
    pub should_quit: bool,
    pub transcript: Transcript,
    pub session: Session,

    // Draft input
    pub draft: String,
    pub draft_cursor: usize, // cursor position in draft, in chars

    // Transcript viewport
    pub transcript_scroll: u16,
    pub transcript_height: u16, // inner size, updated during render
    pub transcript_width: u16,

    // Animation state
    pub animation_frame: u8, // 0-2 for the typing dots
}

impl App {
    pub fn new(session: Session) -> Self {
        Self {
            should_quit: false,
            transcript: Transcript::new(),
            session,

            draft: String::new(),
            draft_cursor: 0,

            transcript_scroll: 0,
            transcript_height: 0,
            transcript_width: 0,

            animation_frame: 0,
        }
    }

    /// Submit the draft line. The draft is cleared only when the session
    /// accepts it, so text typed while a reply is pending is kept.
    pub fn submit_draft(&mut self) {
        let draft = std::mem::take(&mut self.draft);
        if self.session.submit(&mut self.transcript, &draft) {
            self.draft_cursor = 0;
            self.scroll_to_bottom();
        } else {
            // Rejected submissions keep the draft for a later retry.
            self.draft = draft;
        }
    }

    /// Tick: advance the typing animation and pick up a finished reply.
    pub async fn tick(&mut self) {
        if !self.session.is_pending() {
            return;
        }
        self.animation_frame = (self.animation_frame + 1) % 3;

        self.session.poll(&mut self.transcript).await;
        if !self.session.is_pending() {
            self.scroll_to_bottom();
        }
    }

    pub fn scroll_up(&mut self) {
        self.transcript_scroll = self.transcript_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        let visible = if self.transcript_height > 0 {
            self.transcript_height
        } else {
            20
        };
        let max_scroll = self.total_transcript_lines().saturating_sub(visible);
        if self.transcript_scroll < max_scroll {
            self.transcript_scroll += 1;
        }
    }

    /// Keep the newest entry (or the typing placeholder) visible.
    pub fn scroll_to_bottom(&mut self) {
        let visible = if self.transcript_height > 0 {
            self.transcript_height
        } else {
            20
        };
        self.transcript_scroll = self.total_transcript_lines().saturating_sub(visible);
    }

    /// Estimate of the rendered transcript height, mirroring how the UI
    /// lays messages out: a label line, wrapped content lines, and a blank
    /// separator per message, plus two lines for the typing placeholder.
    fn total_transcript_lines(&self) -> u16 {
        let wrap_width = if self.transcript_width > 0 {
            self.transcript_width as usize
        } else {
            50
        };

        let mut total: u16 = 0;
        for msg in self.transcript.messages() {
            total += 1; // label line ("You" / "Bot")
            for line in msg.text.lines() {
                // Character count, not byte length, for UTF-8 content
                let char_count = line.chars().count();
                if char_count == 0 {
                    total += 1;
                } else {
                    total += ((char_count / wrap_width) + 1) as u16;
                }
            }
            total += 1; // blank line after message
        }

        if self.transcript.is_awaiting_response() {
            total += 2; // label + animated dots
        }

        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Backend;
    use anyhow::Result;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct Silent;

    #[async_trait]
    impl Backend for Silent {
        async fn send(&self, _message: &str) -> Result<String> {
            Ok("ok".to_string())
        }
    }

    fn test_app() -> App {
        App::new(Session::new(Arc::new(Silent)))
    }

    #[tokio::test]
    async fn accepted_draft_is_cleared() {
        let mut app = test_app();
        app.draft = "Hello".to_string();
        app.draft_cursor = 5;

        app.submit_draft();

        assert!(app.draft.is_empty());
        assert_eq!(app.draft_cursor, 0);
        assert_eq!(app.transcript.messages().len(), 2);
    }

    #[tokio::test]
    async fn blank_draft_is_kept() {
        let mut app = test_app();
        app.draft = "   ".to_string();
        app.draft_cursor = 3;

        app.submit_draft();

        assert_eq!(app.draft, "   ");
        assert_eq!(app.draft_cursor, 3);
        assert_eq!(app.transcript.messages().len(), 1);
    }

    #[tokio::test]
    async fn draft_survives_rejection_while_pending() {
        let mut app = test_app();
        app.draft = "first".to_string();
        app.submit_draft();
        assert!(app.session.is_pending());

        app.draft = "second".to_string();
        app.draft_cursor = 6;
        app.submit_draft();

        // Dropped while pending: the draft stays for a later retry.
        assert_eq!(app.draft, "second");
        assert_eq!(app.draft_cursor, 6);
        assert_eq!(app.transcript.messages().len(), 2);
    }
}
