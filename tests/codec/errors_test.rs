//! Codec failure modes: only invalid text and non-object roots are errors.

use serde_json::json;

use turnbridge::request::DeviceName;
use turnbridge::{
    CanonicalRequest, GoogleActionRequest, GoogleBusinessRequest, RequestCodec, RequestError,
};

#[test]
fn invalid_text_is_parse_error() {
    let result = GoogleActionRequest::from_json("{\"user\": ");
    assert!(matches!(result, Err(RequestError::Parse(_))));
}

#[test]
fn non_object_root_is_rejected() {
    let result = GoogleActionRequest::from_json("[1, 2, 3]");
    match result {
        Err(RequestError::NotAnObject { found }) => assert_eq!(found, "array"),
        other => panic!("expected NotAnObject, got {other:?}"),
    }

    let result = GoogleBusinessRequest::from_json(json!(null));
    assert!(matches!(result, Err(RequestError::NotAnObject { found: "null" })));
}

#[test]
fn mistyped_nested_fields_read_as_absent() {
    let request = GoogleActionRequest::from_json(json!({
        "conversation": "not-an-object",
        "user": {"userId": {"id": 1}, "permissions": "NAME"},
        "inputs": {"intent": "actions.intent.MAIN"}
    }))
    .expect("valid JSON object hydrates");
    assert!(request.conversation.is_none());
    assert_eq!(request.user_id(), None);
    assert!(request.inputs.is_none());
    assert!(request.is_new_session());
}

#[test]
fn malformed_capability_lists_classify_as_speaker() {
    let payloads = [
        json!({"surface": {"capabilities": [{}]}}),
        json!({"surface": {"capabilities": null}}),
        json!({"surface": {"capabilities": "actions.capability.SCREEN_OUTPUT"}}),
        json!({"surface": {"capabilities": [null, 3, {"name": null}]}}),
        json!({"inputs": [{"rawInputs": null}]}),
    ];
    for payload in payloads {
        let request = GoogleActionRequest::from_json(payload.clone())
            .unwrap_or_else(|e| panic!("payload {payload} should hydrate: {e}"));
        assert!(!request.has_screen_interface(), "payload {payload}");
        assert_eq!(request.device_name(), Some(DeviceName::Speaker), "payload {payload}");
    }
}

#[test]
fn scalar_fields_are_coerced() {
    let request = GoogleActionRequest::from_json(json!({
        "isInSandbox": "true",
        "conversation": {"conversationId": 1556703463049_u64, "type": "ACTIVE"}
    }))
    .expect("valid JSON object hydrates");
    assert!(request.is_in_sandbox());
    assert_eq!(request.session_id(), Some("1556703463049"));
    assert!(!request.is_new_session());
}

#[test]
fn business_payload_tolerates_mistyped_fields() {
    let request = GoogleBusinessRequest::from_json(json!({
        "conversationId": 42,
        "isNewSession": "false",
        "sessionData": ["not", "a", "map"],
        "context": {"userInfo": "anonymous", "resolvedLocale": null}
    }))
    .expect("valid JSON object hydrates");
    assert_eq!(request.session_id(), Some("42"));
    assert!(!request.is_new_session());
    assert_eq!(request.session_data(), None);
    assert_eq!(request.locale(), None);
}

#[test]
fn missing_fields_are_not_errors() {
    let payloads = [
        json!({}),
        json!({"user": {}}),
        json!({"conversation": {}}),
        json!({"inputs": [{}]}),
        json!({"surface": {}}),
        json!({"surface": {"capabilities": []}}),
    ];
    for payload in payloads {
        assert!(
            GoogleActionRequest::from_json(payload.clone()).is_ok(),
            "payload {payload} should hydrate"
        );
    }
}

#[test]
fn explicit_nulls_read_as_absent() {
    let request = GoogleActionRequest::from_json(json!({"user": null, "surface": null}))
        .expect("nulls are absent fields");
    assert!(request.user.is_none());
    assert!(request.surface.is_none());

    let request = GoogleActionRequest::from_json(json!({
        "user": {"userId": null, "locale": null, "profile": null},
        "conversation": {"conversationId": null, "type": null},
        "inputs": [{"intent": null, "rawInputs": [{"query": null}], "arguments": null}],
        "isInSandbox": null
    }))
    .expect("nested nulls are absent fields");
    assert_eq!(request.user_id(), None);
    assert_eq!(request.locale(), None);
    assert_eq!(request.session_id(), None);
    assert!(request.is_new_session());
    assert_eq!(request.raw_query(), None);
    assert!(!request.is_in_sandbox());
}
