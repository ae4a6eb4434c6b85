//! Conversation session management.
//!
//! A session owns the ordered transcript of user and assistant turns for as
//! long as the caller keeps it. Nothing is persisted.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ai::fallback::{fallback, FALLBACK_LABEL};
use crate::ai::router::ProviderRouter;
use crate::core::AdvisorError;
use crate::render::{Replay, TurnRenderer};

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// One message in the transcript. Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    /// Provider label, assistant turns only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Turn {
    fn user(content: &str) -> Self {
        Self {
            role: Role::User,
            content: content.to_string(),
            source: None,
            created_at: Utc::now(),
        }
    }

    fn assistant(content: String, source: String) -> Self {
        Self {
            role: Role::Assistant,
            content,
            source: Some(source),
            created_at: Utc::now(),
        }
    }
}

/// Whether the session is ready for a new submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    AwaitingResponse,
}

/// A conversation session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    state: SessionState,
    turns: Vec<Turn>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            state: SessionState::Idle,
            turns: Vec::new(),
        }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Process one user submission.
    ///
    /// Appends the user turn, asks the router, replays the answer through
    /// `renderer` at `pace`, then appends the assistant turn. The assistant
    /// turn is appended even when the renderer fails; the render error is
    /// returned afterwards.
    pub async fn submit(
        &mut self,
        input: &str,
        router: &ProviderRouter,
        renderer: &mut dyn TurnRenderer,
        pace: Duration,
    ) -> Result<&Turn, AdvisorError> {
        self.answer_interrupted_turn();

        self.state = SessionState::AwaitingResponse;
        self.turns.push(Turn::user(input));
        tracing::debug!(session = %self.id, turns = self.turns.len(), "User turn appended");

        // The busy indicator is cosmetic: a failure there must not skip routing.
        let busy_on = renderer.busy(true);
        let response = router.route(input).await;
        let busy_off = renderer.busy(false);

        let replayed = match busy_on.and(busy_off) {
            Ok(()) => replay_into(renderer, &response.text, &response.source_label, pace).await,
            Err(e) => Err(e.into()),
        };
        let index = self.finish(response.text, response.source_label);
        replayed?;

        Ok(&self.turns[index])
    }

    /// Append the assistant turn and return to idle. Returns the turn's index.
    fn finish(&mut self, content: String, source: String) -> usize {
        self.turns.push(Turn::assistant(content, source));
        self.state = SessionState::Idle;
        tracing::debug!(session = %self.id, turns = self.turns.len(), "Assistant turn appended");
        self.turns.len() - 1
    }

    /// A submission whose future was dropped mid-flight leaves a user turn
    /// without an answer. Answer it with the fallback report before moving on.
    fn answer_interrupted_turn(&mut self) {
        if self.state != SessionState::AwaitingResponse {
            return;
        }
        if let Some(last) = self.turns.last().filter(|t| t.role == Role::User) {
            let report = fallback(&last.content);
            tracing::warn!(session = %self.id, "Previous submission was interrupted, answering with fallback");
            self.finish(report, FALLBACK_LABEL.to_string());
        } else {
            self.state = SessionState::Idle;
        }
    }

    /// Render the transcript as markdown, one block per turn
    pub fn to_markdown(&self) -> String {
        self.turns
            .iter()
            .map(|turn| match turn.role {
                Role::User => format!("**You:**\n\n{}\n", turn.content),
                Role::Assistant => format!(
                    "**Advisor** ({}):\n\n{}\n",
                    turn.source.as_deref().unwrap_or("unknown"),
                    turn.content.trim()
                ),
            })
            .collect::<Vec<_>>()
            .join("\n---\n\n")
    }
}

async fn replay_into(
    renderer: &mut dyn TurnRenderer,
    text: &str,
    source_label: &str,
    pace: Duration,
) -> Result<(), AdvisorError> {
    let mut replay = Replay::start(text, pace);
    while let Some(frame) = replay.next_frame().await {
        renderer.frame(frame)?;
    }
    renderer.caption(source_label)?;
    Ok(())
}
