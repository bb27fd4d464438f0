//! PTY (console) channel: reads lines from stdin, submits them to the
//! conversation and prints transcript updates to stdout.
//!
//! Output is driven by the conversation's event stream, so the processing
//! indicator shows up while a question is in flight. Runs until the
//! `shutdown` token is cancelled (Ctrl-C) or input is closed.

use std::io::Write;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::conversation::{Conversation, ConversationEvent, Origin, SubmitOutcome};
use crate::error::AppError;

pub struct PtyChannel {
    channel_id: String,
    title: String,
    conversation: Arc<Conversation>,
}

impl PtyChannel {
    pub fn new(
        channel_id: impl Into<String>,
        title: impl Into<String>,
        conversation: Arc<Conversation>,
    ) -> Self {
        Self {
            channel_id: channel_id.into(),
            title: title.into(),
            conversation,
        }
    }

    /// Run on the process's stdin/stdout.
    pub async fn run(self, shutdown: CancellationToken) -> Result<(), AppError> {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = std::io::stdout();
        self.run_with(stdin, &mut stdout, shutdown).await
    }

    /// Run on arbitrary line input and output.
    pub async fn run_with<R, W>(
        self,
        input: R,
        out: &mut W,
        shutdown: CancellationToken,
    ) -> Result<(), AppError>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let channel_id = self.channel_id;
        let conversation = self.conversation;
        let processing_text = conversation.texts().processing_text.clone();

        info!(%channel_id, "pty channel started");
        writeln!(out, "─────────────────────────────────")?;
        writeln!(out, " {}  (Ctrl-C to quit)", self.title)?;
        writeln!(out, "─────────────────────────────────")?;
        for entry in &conversation.render() {
            writeln!(out, "{}", line_prefix(entry.origin, entry.text))?;
        }

        let mut events = conversation.subscribe();
        let mut lines = input.lines();

        loop {
            write!(out, "> ")?;
            out.flush()?;

            let line = tokio::select! {
                biased;

                _ = shutdown.cancelled() => {
                    writeln!(out)?;
                    info!("pty channel shutting down");
                    break;
                }

                line = lines.next_line() => line,
            };

            let input = match line {
                Err(e) => {
                    warn!("pty read error: {e}");
                    break;
                }
                Ok(None) => {
                    info!("pty input closed");
                    break;
                }
                Ok(Some(input)) => input,
            };

            debug!(input_len = input.len(), "pty received line");

            let submit = conversation.submit(&input);
            tokio::pin!(submit);

            let outcome = loop {
                tokio::select! {
                    biased;

                    outcome = &mut submit => break outcome,

                    event = events.recv() => match event {
                        Ok(event) => print_event(out, &event, &processing_text)?,
                        Err(RecvError::Lagged(n)) => warn!(skipped = n, "pty lagged behind conversation events"),
                        Err(RecvError::Closed) => {}
                    },
                }
            };

            drain_events(out, &mut events, &processing_text)?;

            if outcome == SubmitOutcome::Busy {
                writeln!(out, "(aguarde a resposta anterior)")?;
            }
        }

        info!(%channel_id, "pty channel stopped");
        Ok(())
    }
}

fn drain_events<W: Write>(
    out: &mut W,
    events: &mut broadcast::Receiver<ConversationEvent>,
    processing_text: &str,
) -> Result<(), AppError> {
    loop {
        match events.try_recv() {
            Ok(event) => print_event(out, &event, processing_text)?,
            Err(TryRecvError::Lagged(n)) => warn!(skipped = n, "pty lagged behind conversation events"),
            Err(TryRecvError::Empty | TryRecvError::Closed) => return Ok(()),
        }
    }
}

/// User lines are already on screen as typed input.
fn print_event<W: Write>(
    out: &mut W,
    event: &ConversationEvent,
    processing_text: &str,
) -> Result<(), AppError> {
    match event {
        ConversationEvent::MessageAppended(m) if !m.is_user() => {
            writeln!(out, "{}", line_prefix(m.origin(), m.text()))?;
        }
        ConversationEvent::AwaitingChanged(true) => {
            writeln!(out, "{}", line_prefix(Origin::System, processing_text))?;
        }
        _ => {}
    }
    Ok(())
}

fn line_prefix(origin: Origin, text: &str) -> String {
    match origin {
        Origin::User => format!("U: {text}"),
        Origin::System => format!("B: {text}"),
    }
}
