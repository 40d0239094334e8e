use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::console::domain::models::TranscriptEntry;

/// Append-only record of the REPL session, pinned to the newest entries.
#[derive(Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: TranscriptEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn line(entry: &TranscriptEntry) -> Line<'_> {
        match entry {
            TranscriptEntry::Statement(text) => Line::from(vec![
                Span::styled(">>> ", Style::default().fg(Color::Cyan)),
                Span::raw(text.as_str()),
            ]),
            TranscriptEntry::Result(text) => Line::from(Span::raw(text.as_str())),
            TranscriptEntry::Error(text) => {
                Line::from(Span::styled(text.as_str(), Style::default().fg(Color::Red)))
            }
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("zounds");
        let inner_height = area.height.saturating_sub(2) as usize;

        // Always show the tail: the transcript follows the newest entry.
        let skip = self.entries.len().saturating_sub(inner_height);
        let lines: Vec<Line> = self.entries[skip..].iter().map(Self::line).collect();

        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}
