use std::cell::RefCell;
use std::rc::Rc;

use crate::console::bus::{BusEvent, EventName, MessageBus, Subscriber};

/// Playback position of an audio control. The actual device sits behind
/// the presentation layer; the console only toggles and reports state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Paused,
    Playing,
}

impl PlaybackState {
    pub fn toggle(&mut self) {
        *self = match self {
            PlaybackState::Paused => PlaybackState::Playing,
            PlaybackState::Playing => PlaybackState::Paused,
        };
    }

    pub fn is_playing(self) -> bool {
        self == PlaybackState::Playing
    }
}

/// A playable audio resource. Subscribed to `PLAY` while mounted.
pub struct AudioView {
    url: String,
    playback: PlaybackState,
}

impl AudioView {
    pub fn mount(url: String, bus: &MessageBus) -> Rc<RefCell<Self>> {
        let view = Rc::new(RefCell::new(Self {
            url,
            playback: PlaybackState::Paused,
        }));
        bus.subscribe(EventName::Play, view.clone());
        view
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn playback(&self) -> PlaybackState {
        self.playback
    }

    pub fn destroy(&self, bus: &MessageBus) {
        bus.unsubscribe(&[EventName::Play]);
    }
}

impl Subscriber for AudioView {
    fn on_event(&mut self, _bus: &MessageBus, event: &BusEvent) {
        if let BusEvent::Play = event {
            self.playback.toggle();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_event_toggles_playback() {
        let bus = MessageBus::new();
        let view = AudioView::mount("/a.ogg".to_string(), &bus);
        assert_eq!(bus.subscriber_count(EventName::Play), 1);
        assert!(!view.borrow().playback().is_playing());

        bus.publish(&BusEvent::Play);
        assert!(view.borrow().playback().is_playing());

        bus.publish(&BusEvent::Play);
        assert!(!view.borrow().playback().is_playing());
    }

    #[test]
    fn destroy_releases_the_play_subscription() {
        let bus = MessageBus::new();
        let view = AudioView::mount("/a.ogg".to_string(), &bus);
        view.borrow().destroy(&bus);
        assert_eq!(bus.subscriber_count(EventName::Play), 0);
    }
}
