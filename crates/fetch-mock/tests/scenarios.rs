//! End-to-end scenarios against the public API.
//!
//! Every test builds its own slot holding a fake "real" implementation, so
//! mocked and delegated calls can be told apart by body.

use fetch_mock::logging::init_logging;
use fetch_mock::{
    fetch_fn, AbortController, FetchError, FetchInput, FetchMock, FetchSlot, MatchRule, MockConfig,
    MockOutcome, MockReply, RejectValue, Rejection, Request, RequestInit, Response,
    ResponseDescriptor, ResponseInit,
};
use http::StatusCode;
use regex::Regex;
use std::sync::Arc;
use std::time::Duration;

const REAL: &str = "REAL FETCH RESPONSE";
const DEFAULT: &str = "MOCKED DEFAULT RESPONSE";
const TEST_URL: &str = "https://mock.test/";

fn slot() -> Arc<FetchSlot> {
    init_logging("fetch_mock=debug");
    Arc::new(FetchSlot::new(fetch_fn(|_input, _init| async {
        Ok(Response::new(REAL))
    })))
}

/// Engine installed in its slot with `DEFAULT` as the persistent response.
fn harness() -> (Arc<FetchSlot>, FetchMock) {
    let slot = slot();
    let mock = FetchMock::new(slot.clone());
    mock.enable_mocks().mock_response(DEFAULT, None);
    (slot, mock)
}

async fn request(slot: &FetchSlot, url: &str) -> String {
    slot.fetch(url, None).await.unwrap().text()
}

async fn expect_mocked(slot: &FetchSlot, url: &str, body: &str) {
    assert_eq!(request(slot, url).await, body, "expected mocked {body:?} for {url}");
}

async fn expect_unmocked(slot: &FetchSlot, url: &str) {
    assert_eq!(request(slot, url).await, REAL, "expected {url} to be delegated");
}

// ---------------------------------------------------------------------------
// Queue ordering
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_n_one_shots_then_default() {
    let (slot, mock) = harness();
    let bodies: Vec<String> = (0..5).map(|i| format!("body-{i}")).collect();
    for body in &bodies {
        mock.once(body.as_str(), None);
    }

    for body in &bodies {
        expect_mocked(&slot, TEST_URL, body).await;
    }
    expect_mocked(&slot, TEST_URL, DEFAULT).await;
}

#[tokio::test]
async fn test_reset_behaves_like_fresh_engine() {
    let (slot, mock) = harness();
    mock.once("stale", None).dont_mock_once().mock_abort_once();
    mock.reset_mocks();

    mock.once("A", None);
    expect_mocked(&slot, TEST_URL, "A").await;
    expect_mocked(&slot, TEST_URL, "").await;
    assert_eq!(mock.requests().len(), 2);
}

#[tokio::test]
async fn test_dont_mock_once_then_two_one_shots() {
    let (slot, mock) = harness();
    mock.dont_mock_once().once("A", None).once("B", None);

    expect_unmocked(&slot, TEST_URL).await;
    expect_mocked(&slot, TEST_URL, "A").await;
    expect_mocked(&slot, TEST_URL, "B").await;
    expect_mocked(&slot, TEST_URL, DEFAULT).await;
}

#[tokio::test]
async fn test_do_mock_once_if_then_other_url() {
    let (slot, mock) = harness();
    mock.do_mock_once_if_with("http://x/", "X", None);

    expect_mocked(&slot, "http://x/", "X").await;
    assert_ne!(request(&slot, "http://y/").await, "X");
}

/// Conditional one-shot registrations with a body, keyed by name.
fn conditional_once(mock: &FetchMock, name: &str) {
    match name {
        "do_mock_once_if_with" => mock.do_mock_once_if_with("http://x/", "X", None),
        "mock_once_if_with" => mock.mock_once_if_with("http://x/", "X", None),
        _ => mock.mock_response_once_if("http://x/", "X", None),
    };
}

const CONDITIONAL_ONCE: [&str; 3] = [
    "do_mock_once_if_with",
    "mock_once_if_with",
    "mock_response_once_if",
];

#[tokio::test]
async fn test_conditional_once_skipped_then_match() {
    for name in CONDITIONAL_ONCE {
        let (slot, mock) = harness();
        conditional_once(&mock, name);

        let bodies = [
            request(&slot, "http://y/").await,
            request(&slot, "http://y/").await,
            request(&slot, "http://x/").await,
        ];
        assert_eq!(bodies, [REAL, DEFAULT, DEFAULT], "{name}");
    }
}

#[tokio::test]
async fn test_conditional_once_match_then_other() {
    for name in CONDITIONAL_ONCE {
        let (slot, mock) = harness();
        conditional_once(&mock, name);

        expect_mocked(&slot, "http://x/", "X").await;
        expect_mocked(&slot, "http://y/", DEFAULT).await;
    }
}

#[tokio::test]
async fn test_conditional_once_other_then_match() {
    for name in CONDITIONAL_ONCE {
        let (slot, mock) = harness();
        conditional_once(&mock, name);

        expect_unmocked(&slot, "http://y/").await;
        expect_mocked(&slot, "http://x/", DEFAULT).await;
    }
}

#[tokio::test]
async fn test_mock_responses_in_order() {
    let (slot, mock) = harness();
    mock.mock_responses([
        r#"{"name":"naruto","average_score":79}"#,
        r#"{"name":"bleach","average_score":68}"#,
    ]);

    let first: serde_json::Value = slot.fetch(TEST_URL, None).await.unwrap().json().unwrap();
    let second: serde_json::Value = slot.fetch(TEST_URL, None).await.unwrap().json().unwrap();
    assert_eq!(first["name"], "naruto");
    assert_eq!(second["average_score"], 68);
    assert_eq!(mock.call_count(), 2);
}

#[tokio::test]
async fn test_overlapping_calls_take_slots_in_start_order() {
    let (_slot, mock) = harness();
    mock.once(
        MockOutcome::async_provider(|_| async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok::<_, RejectValue>("slow")
        }),
        None,
    )
    .once("fast", None);

    let slow = mock.fetch(TEST_URL, None);
    let fast = mock.fetch(TEST_URL, None);
    let (slow, fast) = tokio::join!(slow, fast);
    assert_eq!(slow.unwrap().text(), "slow");
    assert_eq!(fast.unwrap().text(), "fast");
}

// ---------------------------------------------------------------------------
// Conditional mocking
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_mock_if_variants() {
    let rules: Vec<MatchRule> = vec![
        TEST_URL.into(),
        Regex::new(&regex::escape(TEST_URL)).unwrap().into(),
        MatchRule::predicate(|req: &Request| req.url() == TEST_URL),
    ];
    for rule in rules {
        let (slot, mock) = harness();
        mock.do_mock_if(rule);
        expect_mocked(&slot, TEST_URL, DEFAULT).await;
        expect_unmocked(&slot, "https://other.test/").await;
    }
}

#[tokio::test]
async fn test_dont_mock_if_variants() {
    let rules: Vec<MatchRule> = vec![
        TEST_URL.into(),
        MatchRule::pattern(&regex::escape(TEST_URL)).unwrap(),
        MatchRule::predicate(|req: &Request| req.url() == TEST_URL),
    ];
    for rule in rules {
        let (slot, mock) = harness();
        mock.dont_mock_if(rule);
        expect_unmocked(&slot, TEST_URL).await;
        expect_mocked(&slot, "https://other.test/", DEFAULT).await;
    }
}

#[tokio::test]
async fn test_mock_once_if_default_mocked() {
    let (slot, mock) = harness();
    // No trailing slash: never equals a normalized URL.
    mock.do_mock_once_if("http://foo");
    expect_unmocked(&slot, TEST_URL).await;
    expect_mocked(&slot, TEST_URL, DEFAULT).await;

    let (slot, mock) = harness();
    mock.do_mock_once_if_with("http://foo/", "blah", None)
        .do_mock_once_if_with("http://foo2/", "blah2", None);
    expect_mocked(&slot, "http://foo/", "blah").await;
    expect_mocked(&slot, "http://foo2/", "blah2").await;
    expect_mocked(&slot, "http://foo3", DEFAULT).await;
}

#[tokio::test]
async fn test_mock_once_if_default_unmocked() {
    let (slot, mock) = harness();
    mock.dont_mock().mock_once_if(TEST_URL);
    expect_mocked(&slot, TEST_URL, DEFAULT).await;
    expect_unmocked(&slot, TEST_URL).await;
}

#[tokio::test]
async fn test_dont_mock_once_if_default_unmocked() {
    let (slot, mock) = harness();
    mock.dont_mock().dont_mock_once_if("http://foo");
    expect_mocked(&slot, TEST_URL, DEFAULT).await;
    expect_unmocked(&slot, TEST_URL).await;
}

#[tokio::test]
async fn test_do_mock_once_with_default_unmocked() {
    let (slot, mock) = harness();
    mock.dont_mock().mock_once();
    expect_mocked(&slot, TEST_URL, DEFAULT).await;
    expect_unmocked(&slot, TEST_URL).await;
}

// The complex example: six one-shot behaviors and four one-shot decisions.
// A behavior is only consumed by a call that is mocked.

const ALT_URL: &str = "http://bar/";
const ALT_BODY: &str = "ALTERNATIVE RESPONSE";

fn complex(mock: &FetchMock) {
    mock.mock_response_once("1", None)
        .mock_response_once("2", None)
        .mock_response_once(
            MockOutcome::async_provider(|req: Request| async move {
                Ok::<_, RejectValue>(if req.url() == ALT_URL { ALT_BODY } else { "3" })
            }),
            None,
        )
        .mock_response_once("4", None)
        .mock_response_once("5", None)
        .mock_response_once(
            MockOutcome::provider(|req: &Request| {
                if req.url() == ALT_URL {
                    ALT_BODY
                } else {
                    DEFAULT
                }
            }),
            None,
        );
}

fn once_decisions(mock: &FetchMock) {
    mock.dont_mock_once_if(ALT_URL)
        .do_mock_once_if(ALT_URL)
        .do_mock_once()
        .dont_mock_once();
}

/// `None` means the call is expected to be delegated.
async fn walk(slot: &FetchSlot, url: &str, expected: &[Option<&str>]) {
    for (i, expected) in expected.iter().enumerate() {
        let body = request(slot, url).await;
        assert_eq!(body, expected.unwrap_or(REAL), "call {} to {url}", i + 1);
    }
}

#[tokio::test]
async fn test_complex_default_do_mock() {
    let (slot, mock) = harness();
    complex(&mock);
    once_decisions(&mock);
    walk(
        &slot,
        TEST_URL,
        &[Some("1"), None, Some("2"), None, Some("3"), Some("4"), Some("5"), Some(DEFAULT), Some(DEFAULT)],
    )
    .await;

    let (slot, mock) = harness();
    complex(&mock);
    once_decisions(&mock);
    walk(
        &slot,
        ALT_URL,
        &[None, Some("1"), Some("2"), None, Some(ALT_BODY), Some("4"), Some("5"), Some(ALT_BODY), Some(DEFAULT)],
    )
    .await;
}

#[tokio::test]
async fn test_complex_dont_mock() {
    for url in [TEST_URL, ALT_URL] {
        let (slot, mock) = harness();
        complex(&mock);
        mock.dont_mock();
        once_decisions(&mock);
        let expected: &[Option<&str>] = if url == TEST_URL {
            &[Some("1"), None, Some("2"), None, None, None]
        } else {
            &[None, Some("1"), Some("2"), None, None, None]
        };
        walk(&slot, url, expected).await;
    }
}

#[tokio::test]
async fn test_complex_do_mock_if_alt() {
    let (slot, mock) = harness();
    complex(&mock);
    mock.do_mock_if(ALT_URL);
    once_decisions(&mock);
    walk(&slot, TEST_URL, &[Some("1"), None, Some("2"), None, None, None]).await;

    let (slot, mock) = harness();
    complex(&mock);
    mock.do_mock_if(ALT_URL);
    once_decisions(&mock);
    walk(
        &slot,
        ALT_URL,
        &[None, Some("1"), Some("2"), None, Some(ALT_BODY), Some("4"), Some("5"), Some(ALT_BODY), Some(DEFAULT)],
    )
    .await;
}

#[tokio::test]
async fn test_complex_dont_mock_if_alt() {
    let (slot, mock) = harness();
    complex(&mock);
    mock.dont_mock_if(ALT_URL);
    once_decisions(&mock);
    walk(
        &slot,
        TEST_URL,
        &[Some("1"), None, Some("2"), None, Some("3"), Some("4"), Some("5"), Some(DEFAULT), Some(DEFAULT)],
    )
    .await;

    let (slot, mock) = harness();
    complex(&mock);
    mock.dont_mock_if(ALT_URL);
    once_decisions(&mock);
    walk(&slot, ALT_URL, &[None, Some("1"), Some("2"), None, None, None]).await;
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_literal_round_trip_including_empty_string() {
    for body in ["", "plain", "{\"json\":true}", "ünïcødé"] {
        let (slot, mock) = harness();
        mock.mock_response(body, Some(ResponseInit::new().with_status(200)));
        let resp = slot.fetch(TEST_URL, None).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.text(), body);
    }
}

#[tokio::test]
async fn test_empty_bodies_in_every_shape() {
    let (slot, mock) = harness();
    let no_content = || Some(ResponseInit::new().with_status(204));
    mock.mock_response_once(None::<String>, no_content())
        .mock_response_once(MockOutcome::provider(|_: &Request| None::<String>), no_content())
        .mock_response_once(
            MockOutcome::async_provider(|_| async { Ok::<_, RejectValue>(None::<String>) }),
            no_content(),
        )
        .mock_response_once(ResponseDescriptor::new().with_status(204), None)
        .mock_response_once(
            MockOutcome::provider(|_: &Request| ResponseDescriptor::new().with_status(204)),
            None,
        )
        .mock_response_once(Response::new("").with_status(StatusCode::NO_CONTENT), None)
        .mock_response_once(
            MockOutcome::provider(|_: &Request| Response::new("").with_status(StatusCode::NO_CONTENT)),
            None,
        )
        .mock_response_once("done", None);

    for _ in 0..7 {
        let resp = slot.fetch(TEST_URL, None).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert_eq!(resp.text(), "");
    }
    assert_eq!(request(&slot, TEST_URL).await, "done");
}

#[tokio::test]
async fn test_provider_descriptor_url_is_reported() {
    let (slot, mock) = harness();
    mock.mock_response(
        MockOutcome::provider(|_: &Request| ResponseDescriptor::body("ok").with_url("http://z")),
        None,
    );
    let resp = slot.fetch(TEST_URL, None).await.unwrap();
    assert_eq!(resp.url(), "http://z");
    assert_eq!(resp.text(), "ok");
}

#[tokio::test]
async fn test_provider_descriptor_extends_overrides() {
    let (slot, mock) = harness();
    mock.mock_response(
        MockOutcome::provider(|_: &Request| {
            ResponseDescriptor::body("ok")
                .with_status(201)
                .with_counter(1)
        }),
        Some(
            ResponseInit::new()
                .with_status_text("Created")
                .with_header("x-from", "overrides"),
        ),
    );
    let resp = slot.fetch(TEST_URL, None).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(resp.status_text(), "Created");
    assert_eq!(resp.header("x-from"), Some("overrides"));
    assert!(resp.redirected());
}

#[tokio::test]
async fn test_provider_sees_normalized_request() {
    let (slot, mock) = harness();
    mock.mock_response(
        MockOutcome::provider(|req: &Request| {
            format!(
                "{} {} {}",
                req.method(),
                req.url(),
                req.header("x-test").unwrap_or("-")
            )
        }),
        None,
    );
    let init = RequestInit::new()
        .with_method("put")
        .with_header("X-Test", "1")
        .with_body("payload");
    let resp = slot.fetch("https://mock.test", Some(init)).await.unwrap();
    assert_eq!(resp.text(), "PUT https://mock.test/ 1");
    assert_eq!(mock.requests()[0].text().as_deref(), Some("payload"));
}

#[tokio::test]
async fn test_invalid_status_fails_the_call() {
    let (slot, mock) = harness();
    mock.mock_response("x", Some(ResponseInit::new().with_status(99)));
    let err = slot.fetch(TEST_URL, None).await.unwrap_err();
    assert!(matches!(err, FetchError::InvalidResponse(_)));
}

// ---------------------------------------------------------------------------
// Failures and cancellation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_rejections_keep_their_shape() {
    #[derive(Debug, thiserror::Error)]
    #[error("connection refused")]
    struct Refused;

    let (slot, mock) = harness();
    mock.mock_reject_once("fake error")
        .mock_reject_once(Rejection::error(Refused))
        .mock_reject_once(serde_json::json!({"code": 7}));

    let err = slot.fetch(TEST_URL, None).await.unwrap_err();
    assert_eq!(err.rejection().and_then(RejectValue::as_str), Some("fake error"));

    let err = slot.fetch(TEST_URL, None).await.unwrap_err();
    assert!(err.rejection().is_some_and(RejectValue::is_error));
    assert_eq!(err.to_string(), "connection refused");

    let err = slot.fetch(TEST_URL, None).await.unwrap_err();
    assert_eq!(
        err.rejection(),
        Some(&RejectValue::Raw(serde_json::json!({"code": 7})))
    );

    expect_mocked(&slot, TEST_URL, DEFAULT).await;
}

#[tokio::test(start_paused = true)]
async fn rejects_with_function_after_delay() {
    let (slot, mock) = harness();
    mock.mock_reject(Rejection::dynamic(|| async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        Err::<String, _>(RejectValue::from("late failure"))
    }));
    let err = slot.fetch(TEST_URL, None).await.unwrap_err();
    assert_eq!(err.to_string(), "late failure");
}

#[tokio::test]
async fn test_abort_once_then_default() {
    let (slot, mock) = harness();
    mock.mock_abort_once();
    let err = slot.fetch("/", None).await.unwrap_err();
    assert!(err.is_abort());
    expect_mocked(&slot, TEST_URL, DEFAULT).await;
}

#[tokio::test]
async fn test_pre_aborted_signal_fails_and_is_recorded() {
    let (slot, mock) = harness();
    let controller = AbortController::new();
    controller.abort();

    let err = slot
        .fetch("/", Some(RequestInit::new().with_signal(controller.signal())))
        .await
        .unwrap_err();
    assert!(err.is_abort());
    assert_eq!(mock.call_count(), 1);
    assert_eq!(mock.requests()[0].url(), "/");
}

#[tokio::test]
async fn test_pre_aborted_request_input_fails() {
    let (slot, _mock) = harness();
    let controller = AbortController::new();
    let req = Request::new(
        TEST_URL,
        RequestInit::new().with_signal(controller.signal()),
    )
    .unwrap();
    controller.abort();

    let err = slot.fetch(&req, None).await.unwrap_err();
    assert!(err.is_abort());
}

#[tokio::test(start_paused = true)]
async fn abort_timer_beats_slow_provider() {
    let (slot, mock) = harness();
    mock.mock_response(
        MockOutcome::async_provider(|_| async {
            tokio::time::sleep(Duration::from_millis(60)).await;
            Ok::<_, RejectValue>("")
        }),
        None,
    );

    let controller = AbortController::new();
    let aborter = controller.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        aborter.abort();
    });

    let err = slot
        .fetch(
            "http://foo.bar/",
            Some(RequestInit::new().with_signal(controller.signal())),
        )
        .await
        .unwrap_err();
    assert!(err.is_abort());
}

#[tokio::test]
async fn test_malformed_input_is_not_recorded() {
    let (slot, mock) = harness();
    let err = slot.fetch("http://[::1", None).await.unwrap_err();
    assert!(err.is_normalization());

    let err = slot
        .fetch(TEST_URL, Some(RequestInit::new().with_body("not allowed on GET")))
        .await
        .unwrap_err();
    assert!(err.is_normalization());

    assert_eq!(mock.call_count(), 0);
}

// ---------------------------------------------------------------------------
// Inputs, recording and installation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_every_input_shape_is_normalized() {
    struct Stringifier;
    impl std::fmt::Display for Stringifier {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("https://instagram.com")
        }
    }

    let (slot, mock) = harness();
    slot.fetch("https://instagram.com", None).await.unwrap();
    slot.fetch(url::Url::parse("https://instagram.com").unwrap(), None)
        .await
        .unwrap();
    slot.fetch(FetchInput::display(Stringifier), None)
        .await
        .unwrap();
    slot.fetch(Request::get("https://instagram.com/").unwrap(), None)
        .await
        .unwrap();

    let urls: Vec<String> = mock.requests().iter().map(|r| r.url().to_string()).collect();
    assert_eq!(urls, vec!["https://instagram.com/"; 4]);
}

#[tokio::test]
async fn test_relative_url_without_base_stays_relative() {
    let (slot, mock) = harness();
    mock.mock_response_once(r#"{"data":"abcde"}"#, Some(ResponseInit::new().with_status(200)));

    let value: serde_json::Value = slot
        .fetch("folder/file.json", None)
        .await
        .unwrap()
        .json()
        .unwrap();
    assert_eq!(value["data"], "abcde");
    assert_eq!(mock.requests()[0].url(), "folder/file.json");
}

#[tokio::test]
async fn test_is_mocking_is_read_only() {
    let (_slot, mock) = harness();
    mock.dont_mock_once_if(TEST_URL);

    assert!(!mock.is_mocking(TEST_URL, None).unwrap());
    assert!(mock.is_mocking("https://other.test/", None).unwrap());
    assert!(!mock.is_mocking(TEST_URL, None).unwrap());
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_enable_disable_round_trip() {
    let slot = slot();
    let mock = FetchMock::new(slot.clone());
    expect_unmocked(&slot, TEST_URL).await;

    mock.enable_mocks().mock_response(DEFAULT, None);
    expect_mocked(&slot, TEST_URL, DEFAULT).await;

    mock.disable_mocks();
    expect_unmocked(&slot, TEST_URL).await;
    mock.disable_mocks();
    expect_unmocked(&slot, TEST_URL).await;
}

#[tokio::test]
async fn test_mock_responses_accept_mixed_shapes() {
    let (slot, mock) = harness();
    mock.mock_responses(vec![
        MockReply::from("a"),
        ("b", ResponseInit::new().with_status(404)).into(),
        (
            MockOutcome::provider(|req: &Request| req.url().to_string()),
            ResponseInit::new().with_header("x-n", "3"),
        )
            .into(),
    ]);

    assert_eq!(request(&slot, TEST_URL).await, "a");
    let second = slot.fetch(TEST_URL, None).await.unwrap();
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
    assert!(!second.ok());
    let third = slot.fetch(TEST_URL, None).await.unwrap();
    assert_eq!(third.text(), TEST_URL);
    assert_eq!(third.header("x-n"), Some("3"));
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_engine_from_config() {
    let yaml = r#"
context:
  kind: document
  baseUrl: https://app.test/dir/
fixtures:
  - name: default
    respond: { body: "fallback" }
  - name: users
    once: true
    match: { url: "https://app.test/dir/users" }
    respond:
      body: '[{"id":1}]'
      headers: { content-type: application/json }
  - name: health
    match: { pattern: "/health$" }
    passthrough: true
"#;
    let config = MockConfig::from_yaml_str(yaml).unwrap();
    let slot = slot();
    let mock = FetchMock::from_config(&config, slot.clone()).unwrap();
    mock.enable_mocks();

    let users = slot.fetch("users", None).await.unwrap();
    assert_eq!(users.header("content-type"), Some("application/json"));
    assert_eq!(users.text(), r#"[{"id":1}]"#);

    expect_unmocked(&slot, "/health").await;
    expect_mocked(&slot, "users", "fallback").await;
}

#[tokio::test]
async fn test_config_reject_and_abort_fixtures() {
    let config = MockConfig::from_yaml_str(
        "fixtures:\n  - reject: boom\n    once: true\n  - abort: true\n    once: true\n",
    )
    .unwrap();
    let slot = slot();
    let mock = FetchMock::from_config(&config, slot.clone()).unwrap();

    let err = mock.fetch(TEST_URL, None).await.unwrap_err();
    assert_eq!(err.to_string(), "boom");
    assert!(mock.fetch(TEST_URL, None).await.unwrap_err().is_abort());
    assert_eq!(mock.fetch(TEST_URL, None).await.unwrap().text(), "");
}

#[test]
fn test_config_with_invalid_pattern_is_rejected() {
    let err = MockConfig::from_yaml_str("fixtures:\n  - match: { pattern: '(' }\n    abort: true\n")
        .unwrap_err();
    assert!(format!("{err:#}").contains("Invalid match.pattern"));
}
