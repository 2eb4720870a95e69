//! Round-trip behavior of the request codec.

use serde_json::json;

use turnbridge::request::Capability;
use turnbridge::{
    CanonicalRequest, CanonicalView, GoogleActionRequest, GoogleBusinessRequest, RequestCodec,
};

fn action_payload() -> serde_json::Value {
    json!({
        "user": {
            "userId": "user-1",
            "locale": "en-US",
            "accessToken": "secret",
            "userStorage": "{\"score\":10}",
            "profile": {"givenName": "Ada"},
            "packageEntitlements": [{"packageName": "com.example"}]
        },
        "conversation": {"conversationId": "conv-1", "type": "ACTIVE", "conversationToken": "{}"},
        "inputs": [{"intent": "actions.intent.MAIN", "rawInputs": [{"inputType": "VOICE", "query": "talk to pizza"}]}],
        "surface": {"capabilities": [{"name": "actions.capability.SCREEN_OUTPUT"}]},
        "isInSandbox": false,
        "availableSurfaces": [{"capabilities": [{"name": "actions.capability.WEB_BROWSER"}]}],
        "requestType": "SIMULATOR"
    })
}

#[test]
fn to_json_emits_wire_fields_verbatim() {
    let request = GoogleActionRequest::from_json(action_payload()).expect("should hydrate");
    assert_eq!(request.to_json().expect("should encode"), action_payload());
}

#[test]
fn action_request_round_trips_behavior() {
    let original = GoogleActionRequest::from_json(action_payload()).expect("should hydrate");
    let text = original.to_json_string().expect("should encode");
    let restored = GoogleActionRequest::from_json(text.as_str()).expect("should decode");

    assert_eq!(CanonicalView::capture(&restored), CanonicalView::capture(&original));
    assert_eq!(restored, original);
}

#[test]
fn mutated_request_round_trips_behavior() {
    let mut original = GoogleActionRequest::default();
    original
        .set_new_session(false)
        .set_audio_interface()
        .set_locale("it-IT");
    original.set_user_id("u1").expect("empty storage accepts id");

    let value = original.to_json().expect("should encode");
    let restored = GoogleActionRequest::from_json(value).expect("should decode");

    assert_eq!(CanonicalView::capture(&restored), CanonicalView::capture(&original));
    assert!(!restored.is_new_session());
    assert!(restored.has_audio_interface());
    assert!(!restored.has_screen_interface());
}

#[test]
fn business_request_round_trips_behavior() {
    let mut original = GoogleBusinessRequest::from_json(json!({
        "agent": "brands/1/agents/2",
        "conversationId": "conv-9",
        "message": {"text": "hi"},
        "sendTime": "2024-05-01T12:00:01.000Z"
    }))
    .expect("should hydrate");
    original.set_new_session(false).set_state("Menu");

    let text = original.to_json_string().expect("should encode");
    let restored = GoogleBusinessRequest::from_json(text.as_str()).expect("should decode");

    assert_eq!(CanonicalView::capture(&restored), CanonicalView::capture(&original));
    assert_eq!(restored.timestamp(), original.timestamp());
    assert_eq!(restored.state(), Some("Menu"));
}

#[test]
fn unknown_fields_survive_round_trip() {
    let payload = json!({
        "surface": {"capabilities": [{"name": "actions.capability.ACCOUNT_LINKING", "version": 2}], "os": "x"},
        "device": {"location": {"city": "Paris"}}
    });
    let request = GoogleActionRequest::from_json(payload.clone()).expect("should hydrate");
    assert_eq!(request.to_json().expect("should encode"), payload);
}

#[test]
fn nested_objects_stay_plain_data() {
    let request = GoogleActionRequest::from_json(action_payload()).expect("should hydrate");
    let surface = request.surface.as_ref().expect("surface present");
    assert_eq!(surface.known(), vec![Capability::ScreenOutput]);
    assert_eq!(
        request.extra.get("requestType"),
        Some(&json!("SIMULATOR"))
    );
}

#[test]
fn empty_object_hydrates_to_defaults() {
    let request = GoogleActionRequest::from_json("{}").expect("should hydrate");
    assert_eq!(request, GoogleActionRequest::default());
    assert_eq!(request.to_json().expect("should encode"), json!({}));
}

#[test]
fn string_and_value_inputs_agree() {
    let text = action_payload().to_string();
    let from_text = GoogleActionRequest::from_json(text.as_str()).expect("text input");
    let from_value = GoogleActionRequest::from_json(action_payload()).expect("value input");
    assert_eq!(from_text, from_value);
}
