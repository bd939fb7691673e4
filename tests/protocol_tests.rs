use serde_json::{Value, json};

use flowcheck::browser::protocol::{BrowserRequest, BrowserResponse};
use flowcheck::resolver::candidate::{Candidate, ElementRef};

fn to_json(request: &BrowserRequest) -> Value {
    serde_json::to_value(request).expect("Request must serialize")
}

// =========================================================================
// Request wire shapes
// =========================================================================

#[test]
fn navigate_request_shape() {
    let value = to_json(&BrowserRequest::navigate("http://localhost:5173/signup"));
    assert_eq!(
        value,
        json!({"cmd": "navigate", "url": "http://localhost:5173/signup"})
    );
}

#[test]
fn extract_request_omits_absent_scope() {
    assert_eq!(to_json(&BrowserRequest::extract(None)), json!({"cmd": "extract"}));
    assert_eq!(
        to_json(&BrowserRequest::extract(Some(7))),
        json!({"cmd": "extract", "scope": 7})
    );
}

#[test]
fn fill_request_carries_value_click_does_not() {
    assert_eq!(
        to_json(&BrowserRequest::fill(3, "Password123!")),
        json!({"cmd": "action", "action": "fill", "element": 3, "value": "Password123!"})
    );
    assert_eq!(
        to_json(&BrowserRequest::click(3)),
        json!({"cmd": "action", "action": "click", "element": 3})
    );
    assert_eq!(
        to_json(&BrowserRequest::scroll(3)),
        json!({"cmd": "action", "action": "scroll", "element": 3})
    );
}

#[test]
fn simple_requests_are_bare_commands() {
    assert_eq!(to_json(&BrowserRequest::current_url()), json!({"cmd": "current_url"}));
    assert_eq!(to_json(&BrowserRequest::page_source()), json!({"cmd": "page_source"}));
    assert_eq!(to_json(&BrowserRequest::ready_state()), json!({"cmd": "ready_state"}));
    assert_eq!(to_json(&BrowserRequest::quit()), json!({"cmd": "quit"}));
}

// =========================================================================
// Response decoding
// =========================================================================

#[test]
fn minimal_ok_response_decodes_with_defaults() {
    let response: BrowserResponse =
        serde_json::from_str(r#"{"ok": true}"#).expect("Minimal response must decode");

    assert!(response.ok);
    assert_eq!(response.error, None);
    assert_eq!(response.ready, None);
    assert_eq!(response.url, None);
    assert!(response.elements.is_none());
}

#[test]
fn error_response_decodes() {
    let response: BrowserResponse =
        serde_json::from_str(r#"{"ok": false, "error": "Stale element ref 4"}"#)
            .expect("Error response must decode");

    assert!(!response.ok);
    assert_eq!(response.error.as_deref(), Some("Stale element ref 4"));
}

#[test]
fn extraction_response_elements_decode_to_candidates() {
    let response: BrowserResponse = serde_json::from_str(
        r#"{
            "ok": true,
            "url": "http://localhost:5173/signup",
            "title": "Sign Up",
            "elements": [
                {"ref": 0, "tag": "input", "type": "email", "name": "email",
                 "ariaLabel": "Email address", "labelText": "Email",
                 "className": "form-input", "containerText": "Email *"},
                {"ref": 1, "tag": "button", "text": "Sign Up"}
            ]
        }"#,
    )
    .expect("Extraction response must decode");

    let raw = response.elements.expect("elements expected");
    let candidates = Candidate::decode_all(&raw);

    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].element_ref, ElementRef(0));
    assert_eq!(candidates[0].aria_label, "Email address");
    assert_eq!(candidates[0].label_text, "Email");
    assert_eq!(candidates[0].class_name, "form-input");
    assert_eq!(candidates[0].container_text, "Email *");
    assert_eq!(candidates[1].text, "Sign Up");
}
