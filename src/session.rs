//! Session controller: mediates the single in-flight request/response
//! cycle between the transcript and the chat backend.
//!
//! At most one backend call is outstanding at a time. The call runs on a
//! spawned task held inside [`SessionState::Pending`], so "a request is
//! pending" and "a task exists" are the same fact. Every accepted
//! submission ends in exactly one of two appends: the backend's reply, or
//! the fixed fallback message. Failures never reach the caller.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio::task::JoinHandle;

use crate::transcript::{Origin, Transcript};

/// Bot message substituted when the backend call fails.
pub const FALLBACK_REPLY: &str =
    "Sorry, I'm having trouble connecting right now. Please try again.";

/// The outbound side of the session: one message in, one reply out.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn send(&self, message: &str) -> Result<String>;
}

enum SessionState {
    Idle,
    Pending(JoinHandle<Result<String>>),
}

pub struct Session {
    backend: Arc<dyn Backend>,
    state: SessionState,
}

impl Session {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            state: SessionState::Idle,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, SessionState::Pending(_))
    }

    /// Submit user text. Returns whether the submission was accepted.
    ///
    /// Rejected without any state change when a request is already
    /// pending, or when the text is blank after trimming. On acceptance
    /// the user message is appended, the typing signal raised, and the
    /// backend call spawned.
    pub fn submit(&mut self, transcript: &mut Transcript, text: &str) -> bool {
        if self.is_pending() {
            return false;
        }

        let text = text.trim();
        if !transcript.push(Origin::User, text) {
            return false;
        }
        transcript.set_awaiting_response(true);

        let backend = Arc::clone(&self.backend);
        let message = text.to_string();
        self.state = SessionState::Pending(tokio::spawn(async move {
            backend.send(&message).await
        }));
        true
    }

    /// Consume the outstanding call if it has finished. Driven by the UI
    /// tick so the event loop never blocks on the backend.
    pub async fn poll(&mut self, transcript: &mut Transcript) {
        let finished = matches!(&self.state, SessionState::Pending(task) if task.is_finished());
        if finished {
            self.resolve(transcript).await;
        }
    }

    /// Await the outstanding call to completion and apply its outcome.
    /// No-op when idle.
    pub async fn resolve(&mut self, transcript: &mut Transcript) {
        if let SessionState::Pending(task) =
            std::mem::replace(&mut self.state, SessionState::Idle)
        {
            let outcome = match task.await {
                Ok(result) => result,
                Err(join_error) => Err(join_error.into()),
            };
            apply_outcome(transcript, outcome);
        }
    }
}

/// The single point where a request outcome becomes transcript state.
fn apply_outcome(transcript: &mut Transcript, outcome: Result<String>) {
    let reply = match outcome {
        // A blank reply cannot become a message, so it reads as a failure.
        Ok(reply) if !reply.trim().is_empty() => reply,
        _ => FALLBACK_REPLY.to_string(),
    };
    transcript.push(Origin::Bot, &reply);
    transcript.set_awaiting_response(false);
}
