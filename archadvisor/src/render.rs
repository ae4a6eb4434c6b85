//! Word-by-word replay of a completed response.
//!
//! Providers answer in one piece. The replay producer re-emits that text as
//! whitespace-delimited tokens at a fixed pace over a bounded channel, and the
//! consumer grows a display buffer from them. Nothing here touches the stored
//! transcript.

use std::io;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

const CHANNEL_CAPACITY: usize = 32;

/// One step of the replay: the newest token and everything shown so far
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub token: &'a str,
    pub buffer: &'a str,
}

/// Display surface for a single turn
pub trait TurnRenderer: Send {
    /// Toggle the busy indicator shown while the router works
    fn busy(&mut self, _active: bool) -> io::Result<()> {
        Ok(())
    }

    fn frame(&mut self, frame: Frame<'_>) -> io::Result<()>;

    /// Caption naming the source that produced the response
    fn caption(&mut self, source_label: &str) -> io::Result<()>;
}

/// Renderer that shows nothing. Used for non-interactive output.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentRenderer;

impl TurnRenderer for SilentRenderer {
    fn frame(&mut self, _frame: Frame<'_>) -> io::Result<()> {
        Ok(())
    }

    fn caption(&mut self, _source_label: &str) -> io::Result<()> {
        Ok(())
    }
}

/// Consumer side of a running replay
pub struct Replay {
    rx: mpsc::Receiver<String>,
    producer: JoinHandle<()>,
    token: String,
    buffer: String,
}

impl Replay {
    /// Spawn the producer for `text`. Must be called inside a tokio runtime.
    pub fn start(text: &str, pace: Duration) -> Self {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let tokens: Vec<String> = text.split_whitespace().map(|w| format!("{} ", w)).collect();

        let producer = tokio::spawn(async move {
            for token in tokens {
                if tx.send(token).await.is_err() {
                    // consumer went away
                    break;
                }
                if !pace.is_zero() {
                    tokio::time::sleep(pace).await;
                }
            }
        });

        Self {
            rx,
            producer,
            token: String::new(),
            buffer: String::new(),
        }
    }

    /// Wait for the next token. `None` once the text is exhausted.
    pub async fn next_frame(&mut self) -> Option<Frame<'_>> {
        let token = self.rx.recv().await?;
        self.buffer.push_str(&token);
        self.token = token;
        Some(Frame {
            token: &self.token,
            buffer: &self.buffer,
        })
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }
}

impl Drop for Replay {
    fn drop(&mut self) {
        self.producer.abort();
    }
}
