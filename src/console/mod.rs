use anyhow::Result;
use crossterm::{
    event::{self, poll, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::cell::RefCell;
use std::io::{self, Stdout};
use std::rc::Rc;
use std::sync::mpsc::{Receiver, Sender};
use std::time::Duration;

pub mod bus;
pub mod controller;
pub mod dispatcher;
pub mod domain;
pub mod history;
pub mod ui;
pub mod views;
pub mod worker;

#[cfg(test)]
mod tests;

use crate::client::transport::Transport;
use self::bus::{EventName, MessageBus};
use self::controller::ConsoleController;
use self::dispatcher::ContentDispatcher;
use self::ui::renderer::Renderer;
use self::ui::Focus;
use self::views::AudioSliceFactory;
use self::worker::{WorkRequest, WorkResponse};

/// The interactive console: terminal lifecycle, the draw/poll loop, and
/// the wiring between controller, dispatcher, bus, and the transport
/// worker.
pub struct InteractiveConsole {
    bus: Rc<MessageBus>,
    controller: ConsoleController,
    dispatcher: Rc<RefCell<ContentDispatcher>>,
    renderer: Renderer,
    requests: Sender<WorkRequest>,
    responses: Receiver<WorkResponse>,
    focus: Focus,
    status: Option<String>,
    last_ctrl_c_press: Option<std::time::Instant>,
}

impl InteractiveConsole {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        let bus = Rc::new(MessageBus::new());

        let dispatcher = Rc::new(RefCell::new(ContentDispatcher::new(Rc::new(
            AudioSliceFactory,
        ))));
        bus.subscribe(EventName::ContentReceived, dispatcher.clone());

        let controller = ConsoleController::new(bus.clone());
        let (requests, responses) = worker::spawn(transport);

        Self {
            bus,
            controller,
            dispatcher,
            renderer: Renderer::new(),
            requests,
            responses,
            focus: Focus::Input,
            status: None,
            last_ctrl_c_press: None,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut terminal = self.setup_terminal()?;
        let result = self.run_app(&mut terminal);
        self.cleanup_terminal(&mut terminal)?;
        result
    }

    fn setup_terminal(&self) -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    fn cleanup_terminal(&self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }

    fn run_app(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| {
                let dispatcher = self.dispatcher.borrow();
                self.renderer.render(
                    f,
                    self.controller.transcript(),
                    self.controller.input(),
                    &dispatcher,
                    self.focus,
                    self.status.as_deref(),
                );
            })?;

            self.drain_responses();
            self.issue_pending_fetch();

            if poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if self.handle_input(key)? {
                        break;
                    }
                }
            }
        }
        Ok(())
    }

    /// Applies every response the worker has delivered since the last
    /// pass. Interpretations are applied in arrival order.
    fn drain_responses(&mut self) {
        while let Ok(response) = self.responses.try_recv() {
            match response {
                WorkResponse::Interpreted {
                    id,
                    command,
                    outcome,
                } => {
                    self.controller.on_interpreted(id, &command, outcome);
                }
                WorkResponse::ResultsFetched { id, outcome } => match outcome {
                    Ok(set) => {
                        self.dispatcher
                            .borrow_mut()
                            .install_results(id, set.results, &self.bus);
                    }
                    Err(error) => {
                        if self.dispatcher.borrow_mut().fetch_failed(id) {
                            tracing::warn!(error = %error, "result set fetch failed");
                            self.status = Some(format!("Failed to load results: {error}"));
                        }
                    }
                },
            }
        }
    }

    fn issue_pending_fetch(&mut self) {
        let pending = self.dispatcher.borrow_mut().poll_fetch();
        if let Some((id, url)) = pending {
            let _ = self.requests.send(WorkRequest::FetchResults { id, url });
        }
    }

    fn handle_input(&mut self, key: KeyEvent) -> Result<bool> {
        // Global Ctrl+C handling for exit
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            if let Some(last_press) = self.last_ctrl_c_press {
                if last_press.elapsed() < Duration::from_secs(1) {
                    return Ok(true);
                }
            }
            self.last_ctrl_c_press = Some(std::time::Instant::now());
            self.status = Some("Press Ctrl+C again to exit".to_string());
            return Ok(false);
        }
        self.status = None;

        // History recall works from either region.
        match key.code {
            KeyCode::Up => {
                self.controller.recall_older();
                return Ok(false);
            }
            KeyCode::Down => {
                self.controller.recall_newer();
                return Ok(false);
            }
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::Input => Focus::Visualization,
                    Focus::Visualization => Focus::Input,
                };
                return Ok(false);
            }
            _ => {}
        }

        match self.focus {
            Focus::Visualization => {
                if key.code == KeyCode::Esc {
                    self.focus = Focus::Input;
                    return Ok(false);
                }
                let translated = self.dispatcher.borrow().translate_key(key.code);
                if let Some(event) = translated {
                    self.bus.publish(&event);
                }
            }
            Focus::Input => {
                if key.code == KeyCode::Enter {
                    let request = self.controller.submit();
                    let _ = self.requests.send(request);
                } else {
                    self.controller.handle_input_key(key);
                }
            }
        }

        Ok(false)
    }
}
