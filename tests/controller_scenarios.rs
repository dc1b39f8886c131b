//! End-to-end scenarios: startup, seeding over HTTP and controller flows.

// Integration tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used)]

use linkdeck::models::{LinkForm, LinkId, LinkInput};
use linkdeck::rendering::{SEED_FAILED_MESSAGE, StatusLevel};
use linkdeck::services::{
    FileSeedSource, HttpSeedSource, InitOutcome, InteractionController, RecordStore,
    SeedHttpConfig, SeedLoader, StaticSeedSource, bootstrap, filter,
};
use linkdeck::storage::{DurableStore, MemoryStore, PersistenceAdapter};
use linkdeck::Error;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;

/// Serves one HTTP response on a local port and returns its URL.
fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut line = String::new();
        while reader.read_line(&mut line).unwrap() > 0 && line != "\r\n" {
            line.clear();
        }
        let mut stream = stream;
        write!(
            stream,
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
        .unwrap();
        stream.flush().unwrap();
    });

    format!("http://{addr}/links.json")
}

fn http_loader(url: &str) -> SeedLoader {
    let config = SeedHttpConfig {
        timeout_ms: 5_000,
        connect_timeout_ms: 2_000,
    };
    SeedLoader::new(Box::new(HttpSeedSource::new(url, config)))
}

fn static_loader(inputs: Vec<LinkInput>) -> SeedLoader {
    SeedLoader::new(Box::new(StaticSeedSource::new(inputs)))
}

fn start(durable: Arc<MemoryStore>, seed: &SeedLoader) -> (InteractionController, InitOutcome) {
    let persistence = PersistenceAdapter::new(durable, "interviewPrepLinks").unwrap();
    let (store, outcome) = bootstrap(persistence, seed).unwrap();
    (InteractionController::new(store, outcome.status()), outcome)
}

fn titles(controller: &InteractionController) -> Vec<&str> {
    controller
        .store()
        .all()
        .iter()
        .map(|r| r.title.as_str())
        .collect()
}

#[test]
fn test_http_error_degrades_to_empty_store() {
    let url = serve_once("500 Internal Server Error", "oops");
    let (controller, outcome) = start(Arc::new(MemoryStore::new()), &http_loader(&url));

    assert!(outcome.is_failed());
    assert!(controller.store().all().is_empty());
    let status = controller.status().unwrap();
    assert_eq!(status.level, StatusLevel::Error);
    assert_eq!(status.text, SEED_FAILED_MESSAGE);
    assert!(controller.screen().table.is_empty());
}

#[test]
fn test_http_seed_is_loaded_and_persisted() {
    let url = serve_once(
        "200 OK",
        r#"[{"title": "Graphs", "url": "http://g"}, {"title": "DP", "url": "http://dp", "starred": true}]"#,
    );
    let durable = Arc::new(MemoryStore::new());
    let (controller, outcome) = start(durable.clone(), &http_loader(&url));

    assert_eq!(
        outcome,
        InitOutcome::Seeded {
            count: 2,
            save_error: None
        }
    );
    assert_eq!(titles(&controller), ["Graphs", "DP"]);
    assert!(controller.store().all()[1].starred);
    assert!(durable.read("interviewPrepLinks").unwrap().is_some());
}

#[test]
fn test_unreachable_seed_host_degrades_to_empty_store() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/links.json", listener.local_addr().unwrap());
    drop(listener);

    let (controller, outcome) = start(Arc::new(MemoryStore::new()), &http_loader(&url));

    assert!(outcome.is_failed());
    assert!(controller.store().is_empty());
}

#[test]
fn test_filter_scenario() {
    let (controller, _) = start(
        Arc::new(MemoryStore::new()),
        &static_loader(vec![
            LinkInput::new("Graphs", "http://g"),
            LinkInput::new("DP", "http://dp").with_starred(true),
        ]),
    );

    let view = filter(controller.store().all(), "gr");
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].title, "Graphs");
    assert!(!view[0].starred);
}

#[test]
fn test_add_is_newest_first() {
    let (mut controller, _) = start(
        Arc::new(MemoryStore::new()),
        &static_loader(vec![LinkInput::new("Graphs", "http://g")]),
    );

    controller.request_add().unwrap();
    controller
        .submit_form(LinkForm::new().with_title("New").with_url("http://x"))
        .unwrap();

    assert_eq!(controller.store().all()[0].title, "New");
    assert_eq!(controller.screen().table.rows()[0].title, "New");
}

#[test]
fn test_changes_survive_restart_without_reseeding() {
    let durable = Arc::new(MemoryStore::new());
    let (mut controller, _) = start(
        durable.clone(),
        &static_loader(vec![
            LinkInput::new("Graphs", "http://g"),
            LinkInput::new("DP", "http://dp"),
        ]),
    );

    controller.request_delete(1).unwrap();
    controller.confirm_delete().unwrap();
    controller.request_edit(0).unwrap();
    controller.draft_mut().unwrap().starred = true;
    controller.submit().unwrap();

    let failing = SeedLoader::new(Box::new(StaticSeedSource::failing("must not be fetched")));
    let (restarted, outcome) = start(durable, &failing);

    assert_eq!(outcome, InitOutcome::Restored { count: 1 });
    assert_eq!(titles(&restarted), ["Graphs"]);
    assert!(restarted.store().all()[0].starred);
    assert!(restarted.status().is_none());
}

#[test]
fn test_two_sessions_last_writer_wins() {
    let durable = Arc::new(MemoryStore::new());
    let seed = static_loader(vec![LinkInput::new("Graphs", "http://g")]);
    let (mut first, _) = start(durable.clone(), &seed);
    let (mut second, _) = start(durable.clone(), &seed);

    // Both sessions see the same record; the first deletes it.
    second.request_delete(0).unwrap();
    first.request_delete(0).unwrap();
    first.confirm_delete().unwrap();

    // The second session's own copy still has it, so its delete succeeds
    // locally and overwrites durable state with its view.
    second.confirm_delete().unwrap();
    assert!(second.store().is_empty());

    let (restarted, _) = start(durable, &seed);
    assert!(restarted.store().is_empty());
}

#[test]
fn test_remove_unknown_id_leaves_collection_alone() {
    let durable = Arc::new(MemoryStore::new());
    let persistence = PersistenceAdapter::new(durable.clone(), "links").unwrap();
    let mut store = RecordStore::new(persistence, Vec::new());
    store.add(LinkInput::new("Graphs", "http://g")).unwrap();
    let saved = durable.read("links").unwrap();

    let result = store.remove(&LinkId::new("no-such-id"));

    assert!(matches!(result, Err(Error::NotFound { .. })));
    assert!(result.unwrap_err().is_recoverable());
    assert_eq!(store.len(), 1);
    assert_eq!(durable.read("links").unwrap(), saved);
}

#[test]
fn test_out_of_range_row_sets_status() {
    let (mut controller, _) = start(
        Arc::new(MemoryStore::new()),
        &static_loader(vec![LinkInput::new("Graphs", "http://g")]),
    );
    controller.set_search("graph");

    let err = controller.request_delete(1).unwrap_err();

    assert!(err.is_recoverable());
    assert!(controller.mode().is_idle());
    assert_eq!(controller.status().unwrap().text, "No resource at row 2.");
    assert_eq!(controller.store().len(), 1);
}

#[test]
fn test_bundled_seed_document_loads() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data/links.json");
    let seed = SeedLoader::new(Box::new(FileSeedSource::new(path)));

    let (controller, outcome) = start(Arc::new(MemoryStore::new()), &seed);

    assert!(matches!(outcome, InitOutcome::Seeded { count: 5, .. }));
    assert!(controller.store().all().iter().any(|r| r.starred));
}
