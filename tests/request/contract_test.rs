//! The fallback policy holds uniformly across every adapter.

use serde_json::json;

use turnbridge::request::{Input, Inputs};
use turnbridge::{AnyRequest, CanonicalRequest, CanonicalView, Platform};

fn every_platform() -> Vec<AnyRequest> {
    Platform::ALL
        .into_iter()
        .map(|platform| AnyRequest::hydrate(platform, json!({})).expect("empty payload hydrates"))
        .collect()
}

#[test]
fn setters_return_the_same_receiver() {
    for mut request in every_platform() {
        let address: *const AnyRequest = &request;
        assert!(std::ptr::eq(request.set_state("x"), address));
        assert!(std::ptr::eq(request.set_intent_name("i"), address));
        assert!(std::ptr::eq(request.set_video_interface(), address));
        assert!(std::ptr::eq(request.set_access_token("t"), address));
        assert!(std::ptr::eq(request.set_inputs(Inputs::new()), address));
        assert!(std::ptr::eq(request.add_input("k", "v"), address));
        assert!(std::ptr::eq(request.set_timestamp("2024-01-01T00:00:00Z"), address));
        let returned = request.set_user_id("u").expect("empty payload accepts id");
        assert!(std::ptr::eq(returned, address));
    }
}

#[test]
fn empty_payloads_answer_every_query_without_failing() {
    for request in every_platform() {
        let view = CanonicalView::capture(&request);
        assert!(view.new_session, "{} should start new", view.platform);
        assert!(view.session_id.is_none());
        assert!(view.user_id.is_none());
        assert!(view.locale.is_none());
        assert!(!view.video);
        assert!(!view.web_browser);
    }
}

#[test]
fn unsupported_inputs_stay_absent_everywhere() {
    for mut request in every_platform() {
        let mut inputs = Inputs::new();
        inputs.insert("city".to_owned(), Input::new("city", "Berlin"));
        request.set_inputs(inputs).set_intent_name("Weather");
        assert_eq!(request.inputs(), None);
        assert_eq!(request.intent_name(), None);
    }
}

#[test]
fn state_support_differs_by_platform() {
    for mut request in every_platform() {
        request.set_state("Menu");
        match request.platform() {
            Platform::GoogleAction => assert_eq!(request.state(), None),
            Platform::GoogleBusiness => assert_eq!(request.state(), Some("Menu")),
        }
    }
}
