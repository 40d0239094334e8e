use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::console::dispatcher::ContentDispatcher;
use crate::console::ui::components::{TextInput, Transcript, Visualization};
use crate::console::ui::Focus;

pub struct Renderer {
    visualization: Visualization,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            visualization: Visualization::new(),
        }
    }

    pub fn render(
        &mut self,
        f: &mut Frame,
        transcript: &Transcript,
        input: &TextInput,
        dispatcher: &ContentDispatcher,
        focus: Focus,
        status: Option<&str>,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Transcript
                Constraint::Length(6), // Visualization
                Constraint::Length(3), // Input bar
                Constraint::Length(1), // Status line
            ])
            .split(f.area());

        transcript.render(f, chunks[0]);
        self.visualization
            .render(f, chunks[1], dispatcher, focus == Focus::Visualization);

        let input_style = if focus == Focus::Input {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        let input_line = Line::from(input.render_cursor_spans());
        let input_bar = Paragraph::new(input_line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(input_style)
                .title("command"),
        );
        f.render_widget(input_bar, chunks[2]);

        let status_text = status.unwrap_or(
            "Enter: run | Up/Down: history | Tab: focus visualization | Ctrl+C twice: quit",
        );
        let status_line = Paragraph::new(status_text)
            .style(Style::default().add_modifier(Modifier::DIM))
            .alignment(ratatui::layout::Alignment::Center);
        f.render_widget(status_line, chunks[3]);
    }
}
