use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::client::error::ClientError;
use crate::client::transport::{Interpretation, ResultItem, ResultSet, Transport};
use crate::console::bus::{BusEvent, EventName, MessageBus};
use crate::console::controller::ConsoleController;
use crate::console::dispatcher::ContentDispatcher;
use crate::console::domain::models::{content_type, TranscriptEntry};
use crate::console::views::{ActiveView, AudioSliceFactory, ViewKind};
use crate::console::worker::{self, WorkRequest, WorkResponse};

struct Harness {
    bus: Rc<MessageBus>,
    controller: ConsoleController,
    dispatcher: Rc<RefCell<ContentDispatcher>>,
}

fn harness() -> Harness {
    let bus = Rc::new(MessageBus::new());
    let dispatcher = Rc::new(RefCell::new(ContentDispatcher::new(Rc::new(
        AudioSliceFactory,
    ))));
    bus.subscribe(EventName::ContentReceived, dispatcher.clone());
    let controller = ConsoleController::new(bus.clone());
    Harness {
        bus,
        controller,
        dispatcher,
    }
}

fn submit(harness: &mut Harness, command: &str) -> u64 {
    harness.controller.set_input_text(command);
    match harness.controller.submit() {
        WorkRequest::Interpret { id, command: sent } => {
            assert_eq!(sent, command);
            id
        }
        WorkRequest::FetchResults { .. } => unreachable!("submit produces interpret requests"),
    }
}

fn image_reply(result: &str, url: &str) -> Interpretation {
    Interpretation {
        result: result.to_string(),
        url: Some(url.to_string()),
        content_type: Some(content_type::IMAGE_PNG.to_string()),
    }
}

fn paginated_reply(url: &str) -> Interpretation {
    Interpretation {
        result: "search".to_string(),
        url: Some(url.to_string()),
        content_type: Some(content_type::SEARCH_RESULTS.to_string()),
    }
}

fn items(n: usize) -> Vec<ResultItem> {
    (0..n)
        .map(|i| ResultItem(serde_json::Value::String(format!("r{i}"))))
        .collect()
}

#[test]
fn successful_command_echoes_statement_then_result_and_mounts_an_image() {
    let mut h = harness();
    let id = submit(&mut h, "play");
    assert_eq!(h.controller.input().text(), "");

    h.controller
        .on_interpreted(id, "play", Ok(image_reply("ok", "/a.png")));

    assert_eq!(
        h.controller.transcript().entries(),
        &[
            TranscriptEntry::Statement("play".to_string()),
            TranscriptEntry::Result("ok".to_string()),
        ]
    );
    assert_eq!(h.controller.history().count(), 1);
    assert_eq!(h.controller.cursor(), 0);

    let dispatcher = h.dispatcher.borrow();
    match dispatcher.active() {
        Some(ActiveView::Image(view)) => assert_eq!(view.url(), "/a.png"),
        _ => panic!("expected an image view"),
    }
    // An image allocates no subscriptions.
    assert_eq!(h.bus.subscriber_count(EventName::Play), 0);
}

#[test]
fn failed_command_echoes_statement_then_error_and_still_records_history() {
    let mut h = harness();
    let id = submit(&mut h, "frobnicate");

    h.controller.on_interpreted(
        id,
        "frobnicate",
        Err(ClientError::Api("bad syntax".to_string())),
    );

    assert_eq!(
        h.controller.transcript().entries(),
        &[
            TranscriptEntry::Statement("frobnicate".to_string()),
            TranscriptEntry::Error("bad syntax".to_string()),
        ]
    );
    assert_eq!(h.controller.history().count(), 1);
    assert_eq!(h.controller.history().fetch(1), Some("frobnicate"));
    assert!(h.dispatcher.borrow().active().is_none());
}

#[test]
fn result_without_an_envelope_mounts_nothing() {
    let mut h = harness();
    let id = submit(&mut h, "1 + 1");
    h.controller
        .on_interpreted(id, "1 + 1", Ok(Interpretation {
            result: "2".to_string(),
            ..Interpretation::default()
        }));

    assert!(h.dispatcher.borrow().active().is_none());
    assert_eq!(
        h.controller.transcript().entries()[1],
        TranscriptEntry::Result("2".to_string())
    );
}

#[test]
fn audio_envelope_mounts_a_playable_view_and_replacement_tears_it_down() {
    let mut h = harness();
    let id = submit(&mut h, "listen");
    h.controller.on_interpreted(
        id,
        "listen",
        Ok(Interpretation {
            result: "ok".to_string(),
            url: Some("/a.ogg".to_string()),
            content_type: Some(content_type::AUDIO_OGG.to_string()),
        }),
    );

    assert_eq!(h.bus.subscriber_count(EventName::Play), 1);
    h.bus.publish(&BusEvent::Play);
    match h.dispatcher.borrow().active() {
        Some(ActiveView::Audio(view)) => assert!(view.borrow().playback().is_playing()),
        _ => panic!("expected an audio view"),
    }

    // Replacing the view releases its subscription before the new mount.
    let id = submit(&mut h, "show");
    h.controller
        .on_interpreted(id, "show", Ok(image_reply("ok", "/b.png")));
    assert_eq!(h.bus.subscriber_count(EventName::Play), 0);
    assert_eq!(h.dispatcher.borrow().active().map(ActiveView::kind), Some(ViewKind::Image));
}

#[test]
fn paginated_envelope_fetches_then_cycles_with_next_events() {
    let mut h = harness();
    let id = submit(&mut h, "search");
    h.controller
        .on_interpreted(id, "search", Ok(paginated_reply("/results/1")));

    // Nothing mounted until the result set arrives.
    assert!(h.dispatcher.borrow().active().is_none());
    let (fetch_id, url) = h.dispatcher.borrow_mut().poll_fetch().expect("fetch issued");
    assert_eq!(url, "/results/1");
    // Each pending fetch is handed out once.
    assert!(h.dispatcher.borrow_mut().poll_fetch().is_none());

    h.dispatcher
        .borrow_mut()
        .install_results(fetch_id, items(3), &h.bus);

    let position = |h: &Harness| match h.dispatcher.borrow().active() {
        Some(ActiveView::Results(p)) => p.borrow().position(),
        _ => panic!("expected a paginator"),
    };
    assert_eq!(position(&h), 0);

    for _ in 0..3 {
        h.bus.publish(&BusEvent::Next);
    }
    assert_eq!(position(&h), 0);

    h.bus.publish(&BusEvent::Previous);
    assert_eq!(position(&h), 2);

    // PLAY reaches the paginator's current slice.
    h.bus.publish(&BusEvent::Play);
    match h.dispatcher.borrow().active() {
        Some(ActiveView::Results(p)) => assert!(p.borrow().current_playing()),
        _ => unreachable!(),
    };
}

#[test]
fn unknown_content_type_is_dropped() {
    let mut h = harness();
    let id = submit(&mut h, "export");
    h.controller.on_interpreted(
        id,
        "export",
        Ok(Interpretation {
            result: "ok".to_string(),
            url: Some("/data.csv".to_string()),
            content_type: Some("text/csv".to_string()),
        }),
    );

    assert!(h.dispatcher.borrow().active().is_none());
    assert_eq!(h.bus.subscriber_count(EventName::Play), 0);
    // The transcript still shows the exchange.
    assert_eq!(h.controller.transcript().len(), 2);
}

#[test]
fn superseded_response_reaches_the_transcript_but_not_the_dispatcher() {
    let mut h = harness();
    let first = submit(&mut h, "slow");
    let second = submit(&mut h, "fast");

    // The older response arrives after the newer command was submitted:
    // its content is not dispatched.
    h.controller
        .on_interpreted(first, "slow", Ok(image_reply("late", "/old.png")));
    assert!(h.dispatcher.borrow().active().is_none());
    assert_eq!(h.controller.transcript().len(), 2);

    h.controller
        .on_interpreted(second, "fast", Ok(image_reply("fresh", "/new.png")));
    match h.dispatcher.borrow().active() {
        Some(ActiveView::Image(view)) => assert_eq!(view.url(), "/new.png"),
        _ => panic!("expected the newer image"),
    }
    // Both commands are in the history regardless.
    assert_eq!(h.controller.history().count(), 2);
}

#[test]
fn stale_result_set_is_ignored_after_a_newer_envelope() {
    let mut h = harness();
    let id = submit(&mut h, "search");
    h.controller
        .on_interpreted(id, "search", Ok(paginated_reply("/results/1")));
    let (stale_fetch, _) = h.dispatcher.borrow_mut().poll_fetch().unwrap();

    // A newer envelope replaces the pending fetch before it resolves.
    let id = submit(&mut h, "show");
    h.controller
        .on_interpreted(id, "show", Ok(image_reply("ok", "/b.png")));

    h.dispatcher
        .borrow_mut()
        .install_results(stale_fetch, items(2), &h.bus);
    assert_eq!(h.dispatcher.borrow().active().map(ActiveView::kind), Some(ViewKind::Image));
    assert_eq!(h.bus.subscriber_count(EventName::Next), 0);
}

#[test]
fn failed_fetch_clears_the_pending_state() {
    let mut h = harness();
    let id = submit(&mut h, "search");
    h.controller
        .on_interpreted(id, "search", Ok(paginated_reply("/results/1")));
    let (fetch_id, _) = h.dispatcher.borrow_mut().poll_fetch().unwrap();

    assert!(h.dispatcher.borrow_mut().fetch_failed(fetch_id));
    // A repeat of the same id no longer matches anything.
    assert!(!h.dispatcher.borrow_mut().fetch_failed(fetch_id));
    assert!(h.dispatcher.borrow().active().is_none());
}

#[test]
fn empty_result_set_mounts_a_paginator_that_does_nothing() {
    let mut h = harness();
    let id = submit(&mut h, "search");
    h.controller
        .on_interpreted(id, "search", Ok(paginated_reply("/results/1")));
    let (fetch_id, _) = h.dispatcher.borrow_mut().poll_fetch().unwrap();
    h.dispatcher
        .borrow_mut()
        .install_results(fetch_id, Vec::new(), &h.bus);

    h.bus.publish(&BusEvent::Next);
    h.bus.publish(&BusEvent::Play);
    match h.dispatcher.borrow().active() {
        Some(ActiveView::Results(p)) => {
            assert_eq!(p.borrow().position(), 0);
            assert!(p.borrow().current_label().is_none());
        }
        _ => panic!("expected a paginator"),
    };
}

#[test]
fn recall_walks_backward_and_forward_through_history() {
    let mut h = harness();
    for command in ["first", "second"] {
        let id = submit(&mut h, command);
        h.controller
            .on_interpreted(id, command, Ok(Interpretation::default()));
    }

    h.controller.recall_older();
    assert_eq!(h.controller.input().text(), "second");
    assert_eq!(h.controller.input().cursor_position(), 6);

    h.controller.recall_older();
    assert_eq!(h.controller.input().text(), "first");

    // Already at the oldest entry.
    h.controller.recall_older();
    assert_eq!(h.controller.input().text(), "first");

    h.controller.recall_newer();
    assert_eq!(h.controller.input().text(), "second");

    // Stepping past the newest entry empties the input.
    h.controller.recall_newer();
    assert_eq!(h.controller.input().text(), "");
    assert_eq!(h.controller.cursor(), 0);
}

#[test]
fn recall_with_empty_history_leaves_the_input_alone() {
    let mut h = harness();
    h.controller.set_input_text("typed");

    h.controller.recall_older();
    assert_eq!(h.controller.cursor(), 0);
    assert_eq!(h.controller.input().text(), "typed");

    h.controller.recall_newer();
    assert_eq!(h.controller.input().text(), "typed");
}

#[test]
fn submitting_resets_the_recall_cursor() {
    let mut h = harness();
    let id = submit(&mut h, "first");
    h.controller
        .on_interpreted(id, "first", Ok(Interpretation::default()));

    h.controller.recall_older();
    assert_eq!(h.controller.cursor(), 1);

    let id = submit(&mut h, "first");
    h.controller
        .on_interpreted(id, "first", Ok(Interpretation::default()));
    assert_eq!(h.controller.cursor(), 0);
    assert_eq!(h.controller.history().count(), 2);
}

struct CannedTransport {
    interpretation: Interpretation,
    results: Vec<ResultItem>,
}

impl Transport for CannedTransport {
    fn interpret(&self, command: &str) -> Result<Interpretation, ClientError> {
        if command == "fail" {
            return Err(ClientError::Api("bad syntax".to_string()));
        }
        Ok(self.interpretation.clone())
    }

    fn fetch_results(&self, _url: &str) -> Result<ResultSet, ClientError> {
        Ok(ResultSet {
            results: self.results.clone(),
        })
    }
}

#[test]
fn worker_round_trips_interpret_and_fetch_requests() {
    let (requests, responses) = worker::spawn(Box::new(CannedTransport {
        interpretation: image_reply("ok", "/a.png"),
        results: items(2),
    }));

    requests
        .send(WorkRequest::Interpret {
            id: 1,
            command: "play".to_string(),
        })
        .unwrap();
    match responses.recv_timeout(Duration::from_secs(5)).unwrap() {
        WorkResponse::Interpreted {
            id,
            command,
            outcome,
        } => {
            assert_eq!(id, 1);
            assert_eq!(command, "play");
            assert_eq!(outcome.unwrap().result, "ok");
        }
        _ => panic!("expected an interpret response"),
    }

    requests
        .send(WorkRequest::Interpret {
            id: 2,
            command: "fail".to_string(),
        })
        .unwrap();
    match responses.recv_timeout(Duration::from_secs(5)).unwrap() {
        WorkResponse::Interpreted { outcome, .. } => {
            assert_eq!(outcome.unwrap_err().to_string(), "bad syntax");
        }
        _ => panic!("expected an interpret response"),
    }

    requests
        .send(WorkRequest::FetchResults {
            id: 3,
            url: "/results/1".to_string(),
        })
        .unwrap();
    match responses.recv_timeout(Duration::from_secs(5)).unwrap() {
        WorkResponse::ResultsFetched { id, outcome } => {
            assert_eq!(id, 3);
            assert_eq!(outcome.unwrap().results.len(), 2);
        }
        _ => panic!("expected a fetch response"),
    }
}
