use std::cell::RefCell;
use std::rc::Rc;

use crate::client::transport::ResultItem;
use crate::console::bus::{BusEvent, EventName, MessageBus, Subscriber};
use crate::console::views::audio::PlaybackState;

/// The rendered form of one result item.
pub trait ItemView {
    fn label(&self) -> String;
    fn toggle_play(&mut self);
    fn is_playing(&self) -> bool;
}

/// Builds the view for whichever item the paginator points at.
pub trait ItemViewFactory {
    fn build(&self, item: &ResultItem) -> Box<dyn ItemView>;
}

/// Default item rendering: an audio slice with its own playback control.
pub struct AudioSlice {
    label: String,
    playback: PlaybackState,
}

impl ItemView for AudioSlice {
    fn label(&self) -> String {
        self.label.clone()
    }

    fn toggle_play(&mut self) {
        self.playback.toggle();
    }

    fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }
}

pub struct AudioSliceFactory;

impl ItemViewFactory for AudioSliceFactory {
    fn build(&self, item: &ResultItem) -> Box<dyn ItemView> {
        Box::new(AudioSlice {
            label: item.label(),
            playback: PlaybackState::Paused,
        })
    }
}

/// Browser over an ordered result set.
///
/// Holds the current position, renders the item there through the view
/// factory, and wraps around on `next`/`previous`. `play` is delegated to
/// the rendered item, never reimplemented here. Subscribed to `PLAY`,
/// `NEXT`, and `PREVIOUS` while mounted; `destroy` releases all three.
pub struct ResultPaginator {
    items: Vec<ResultItem>,
    position: usize,
    factory: Rc<dyn ItemViewFactory>,
    current: Option<Box<dyn ItemView>>,
}

impl ResultPaginator {
    pub fn mount(
        items: Vec<ResultItem>,
        factory: Rc<dyn ItemViewFactory>,
        bus: &MessageBus,
    ) -> Rc<RefCell<Self>> {
        let mut paginator = Self {
            items,
            position: 0,
            factory,
            current: None,
        };
        paginator.render();

        let shared = Rc::new(RefCell::new(paginator));
        bus.subscribe(EventName::Play, shared.clone());
        bus.subscribe(EventName::Previous, shared.clone());
        bus.subscribe(EventName::Next, shared.clone());
        shared
    }

    /// Replaces the previous item view wholesale. An empty item set renders
    /// nothing.
    fn render(&mut self) {
        self.current = self
            .items
            .get(self.position)
            .map(|item| self.factory.build(item));
    }

    pub fn next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.position = (self.position + 1) % self.items.len();
        self.render();
    }

    pub fn previous(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.position = (self.position + self.items.len() - 1) % self.items.len();
        self.render();
    }

    pub fn play(&mut self) {
        if let Some(current) = self.current.as_mut() {
            current.toggle_play();
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn current_label(&self) -> Option<String> {
        self.current.as_ref().map(|view| view.label())
    }

    pub fn current_playing(&self) -> bool {
        self.current
            .as_ref()
            .map(|view| view.is_playing())
            .unwrap_or(false)
    }

    pub fn destroy(&self, bus: &MessageBus) {
        bus.unsubscribe(&[EventName::Play, EventName::Previous, EventName::Next]);
    }
}

impl Subscriber for ResultPaginator {
    fn on_event(&mut self, _bus: &MessageBus, event: &BusEvent) {
        match event {
            BusEvent::Play => self.play(),
            BusEvent::Next => self.next(),
            BusEvent::Previous => self.previous(),
            BusEvent::ContentReceived(_) => {}
        }
    }
}
