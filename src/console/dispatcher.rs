use std::rc::Rc;

use crossterm::event::KeyCode;

use crate::client::transport::ResultItem;
use crate::console::bus::{BusEvent, MessageBus, Subscriber};
use crate::console::domain::models::{content_type, ContentEnvelope};
use crate::console::views::{ActiveView, AudioView, ImageView, ItemViewFactory, ResultPaginator};

/// A result-set fetch the dispatcher is waiting on. `issued` flips once
/// the request has been handed to the worker; the id stays behind so a
/// stale response can be told apart from the one currently expected.
struct PendingFetch {
    id: u64,
    url: String,
    issued: bool,
}

/// Selects and owns the single active view.
///
/// On each `CONTENT_RECEIVED` the previous view is destroyed first, then a
/// replacement is picked by exact content-type match. Paginated content
/// types need a second round trip for the result set; the paginator is
/// installed when that fetch resolves. Envelopes with any other content
/// type are dropped.
///
/// The dispatcher also translates raw keys into bus events, so whichever
/// view is mounted reacts without the dispatcher routing to it directly.
pub struct ContentDispatcher {
    active: Option<ActiveView>,
    pending_fetch: Option<PendingFetch>,
    next_fetch_id: u64,
    factory: Rc<dyn ItemViewFactory>,
}

impl ContentDispatcher {
    pub fn new(factory: Rc<dyn ItemViewFactory>) -> Self {
        Self {
            active: None,
            pending_fetch: None,
            next_fetch_id: 0,
            factory,
        }
    }

    pub fn active(&self) -> Option<&ActiveView> {
        self.active.as_ref()
    }

    pub fn translate_key(&self, key: KeyCode) -> Option<BusEvent> {
        match key {
            KeyCode::Char(' ') => Some(BusEvent::Play),
            KeyCode::Left => Some(BusEvent::Previous),
            KeyCode::Right => Some(BusEvent::Next),
            _ => None,
        }
    }

    /// Returns the fetch to hand to the worker, at most once per envelope.
    pub fn poll_fetch(&mut self) -> Option<(u64, String)> {
        let pending = self.pending_fetch.as_mut()?;
        if pending.issued {
            return None;
        }
        pending.issued = true;
        Some((pending.id, pending.url.clone()))
    }

    /// Installs a paginator over a fetched result set. Responses for any
    /// fetch other than the one currently pending are dropped.
    pub fn install_results(&mut self, id: u64, items: Vec<ResultItem>, bus: &MessageBus) {
        match &self.pending_fetch {
            Some(pending) if pending.id == id => {}
            _ => {
                tracing::debug!(id, "ignoring result set for a superseded fetch");
                return;
            }
        }
        self.pending_fetch = None;
        self.active = Some(ActiveView::Results(ResultPaginator::mount(
            items,
            self.factory.clone(),
            bus,
        )));
    }

    /// Reports whether the failed fetch was the one currently pending, and
    /// forgets it if so.
    pub fn fetch_failed(&mut self, id: u64) -> bool {
        match &self.pending_fetch {
            Some(pending) if pending.id == id => {
                self.pending_fetch = None;
                true
            }
            _ => false,
        }
    }

    fn show(&mut self, bus: &MessageBus, envelope: &ContentEnvelope) {
        // Destroy the old view before anything new becomes visible.
        if let Some(view) = self.active.take() {
            view.destroy(bus);
        }
        self.pending_fetch = None;

        match envelope.content_type.as_str() {
            content_type::IMAGE_PNG => {
                self.active = Some(ActiveView::Image(ImageView::new(envelope.url.clone())));
            }
            content_type::AUDIO_OGG => {
                self.active = Some(ActiveView::Audio(AudioView::mount(
                    envelope.url.clone(),
                    bus,
                )));
            }
            other if content_type::is_paginated(other) => {
                self.next_fetch_id += 1;
                self.pending_fetch = Some(PendingFetch {
                    id: self.next_fetch_id,
                    url: envelope.url.clone(),
                    issued: false,
                });
            }
            other => {
                tracing::debug!(content_type = other, "dropping envelope with unknown content type");
            }
        }
    }
}

impl Subscriber for ContentDispatcher {
    fn on_event(&mut self, bus: &MessageBus, event: &BusEvent) {
        if let BusEvent::ContentReceived(envelope) = event {
            self.show(bus, envelope);
        }
    }
}
