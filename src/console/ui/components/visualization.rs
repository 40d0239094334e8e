use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::console::dispatcher::ContentDispatcher;
use crate::console::views::ActiveView;

/// Draws whichever view the dispatcher currently owns.
#[derive(Default)]
pub struct Visualization;

impl Visualization {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, f: &mut Frame, area: Rect, dispatcher: &ContentDispatcher, focused: bool) {
        let border_style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title("visualization");

        let lines = match dispatcher.active() {
            None => vec![Line::from(Span::styled(
                "no content",
                Style::default().add_modifier(Modifier::DIM),
            ))],
            Some(ActiveView::Image(view)) => vec![
                Line::from(Span::styled("image", Style::default().fg(Color::Green))),
                Line::from(Span::raw(view.url().to_string())),
            ],
            Some(ActiveView::Audio(view)) => {
                let view = view.borrow();
                let state = if view.playback().is_playing() {
                    "playing"
                } else {
                    "paused"
                };
                vec![
                    Line::from(Span::styled("audio", Style::default().fg(Color::Green))),
                    Line::from(Span::raw(view.url().to_string())),
                    Line::from(vec![
                        Span::raw(state),
                        Span::styled(
                            "  (Space: play/pause)",
                            Style::default().add_modifier(Modifier::DIM),
                        ),
                    ]),
                ]
            }
            Some(ActiveView::Results(paginator)) => {
                let paginator = paginator.borrow();
                if paginator.is_empty() {
                    vec![Line::from(Span::styled(
                        "empty result set",
                        Style::default().add_modifier(Modifier::DIM),
                    ))]
                } else {
                    let state = if paginator.current_playing() {
                        "playing"
                    } else {
                        "paused"
                    };
                    vec![
                        Line::from(Span::styled(
                            format!("result {} of {}", paginator.position() + 1, paginator.len()),
                            Style::default().fg(Color::Green),
                        )),
                        Line::from(Span::raw(paginator.current_label().unwrap_or_default())),
                        Line::from(vec![
                            Span::raw(state),
                            Span::styled(
                                "  (Space: play  Left/Right: browse)",
                                Style::default().add_modifier(Modifier::DIM),
                            ),
                        ]),
                    ]
                }
            }
        };

        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}
