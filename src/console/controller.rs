use std::rc::Rc;

use crossterm::event::KeyEvent;

use crate::client::error::ClientError;
use crate::client::transport::Interpretation;
use crate::console::bus::{BusEvent, MessageBus};
use crate::console::domain::models::{ContentEnvelope, TranscriptEntry};
use crate::console::history::History;
use crate::console::ui::components::{TextInput, Transcript};
use crate::console::worker::WorkRequest;

/// Owns the input line, the transcript, and the command history.
///
/// Submission hands the command to the worker and clears the input; the
/// resolution arrives later through `on_interpreted`, which always records
/// the command before looking at the outcome. Recall walks the history
/// with a cursor counted backward from the most recent entry; submitting
/// anything resets it.
pub struct ConsoleController {
    bus: Rc<MessageBus>,
    history: History,
    cursor: usize,
    input: TextInput,
    transcript: Transcript,
    next_request_id: u64,
    latest_request_id: u64,
}

impl ConsoleController {
    pub fn new(bus: Rc<MessageBus>) -> Self {
        Self {
            bus,
            history: History::new(),
            cursor: 0,
            input: TextInput::new(),
            transcript: Transcript::new(),
            next_request_id: 0,
            latest_request_id: 0,
        }
    }

    pub fn input(&self) -> &TextInput {
        &self.input
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn handle_input_key(&mut self, key: KeyEvent) -> bool {
        self.input.handle_key(key)
    }

    /// Takes the current input text as a command and clears the field. The
    /// command itself is recorded when the interpretation resolves.
    pub fn submit(&mut self) -> WorkRequest {
        let command = self.input.text().to_string();
        self.input.clear();
        self.next_request_id += 1;
        self.latest_request_id = self.next_request_id;
        WorkRequest::Interpret {
            id: self.next_request_id,
            command,
        }
    }

    /// Resolution point for an interpret call. History, cursor reset, and
    /// the statement echo happen regardless of the outcome.
    pub fn on_interpreted(
        &mut self,
        id: u64,
        command: &str,
        outcome: Result<Interpretation, ClientError>,
    ) {
        self.history.push(command);
        self.cursor = 0;
        self.transcript
            .push(TranscriptEntry::Statement(command.to_string()));

        match outcome {
            Ok(interpretation) => {
                if let Some(envelope) = ContentEnvelope::from_interpretation(&interpretation) {
                    if id == self.latest_request_id {
                        self.bus.publish(&BusEvent::ContentReceived(envelope));
                    } else {
                        // A newer command has been submitted since; its
                        // content wins, this one only reaches the transcript.
                        tracing::debug!(id, "superseded response, content not dispatched");
                    }
                }
                self.transcript
                    .push(TranscriptEntry::Result(interpretation.result));
            }
            Err(error) => {
                self.transcript
                    .push(TranscriptEntry::Error(error.to_string()));
            }
        }
    }

    /// Up arrow: step toward older entries while any remain.
    pub fn recall_older(&mut self) {
        if self.cursor < self.history.count() {
            self.cursor += 1;
            self.restore_from_history();
        }
    }

    /// Down arrow: step back toward the empty input.
    pub fn recall_newer(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.restore_from_history();
        }
    }

    #[cfg(test)]
    pub(crate) fn set_input_text(&mut self, text: &str) {
        self.input.set_text(text.to_string());
    }

    fn restore_from_history(&mut self) {
        match self.history.fetch(self.cursor) {
            // set_text leaves the caret at the end of the restored text.
            Some(entry) => self.input.set_text(entry.to_string()),
            None => self.input.clear(),
        }
    }
}
