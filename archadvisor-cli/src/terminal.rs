//! Terminal display surface for chat turns.

use std::io::{self, Stdout, Write};

use archadvisor::{Frame, TurnRenderer};

const BUSY_TEXT: &str = "Designing architecture...";

/// Prints tokens as they arrive and a provider caption after each answer.
pub struct TerminalRenderer<W: Write + Send> {
    out: W,
}

impl TerminalRenderer<Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write + Send> TurnRenderer for TerminalRenderer<W> {
    fn busy(&mut self, active: bool) -> io::Result<()> {
        let mut err = io::stderr();
        if active {
            write!(err, "⏳ {}", BUSY_TEXT)?;
        } else {
            // clear the busy line
            write!(err, "\r{}\r", " ".repeat(BUSY_TEXT.len() + 3))?;
        }
        err.flush()
    }

    fn frame(&mut self, frame: Frame<'_>) -> io::Result<()> {
        self.out.write_all(frame.token.as_bytes())?;
        self.out.flush()
    }

    fn caption(&mut self, source_label: &str) -> io::Result<()> {
        writeln!(self.out, "\n\n⚙️ Provider: {}\n", source_label)?;
        self.out.flush()
    }
}

/// Print the input prompt without a newline
pub fn prompt(text: &str) -> io::Result<()> {
    let mut out = io::stdout();
    write!(out, "{}\n> ", text)?;
    out.flush()
}
