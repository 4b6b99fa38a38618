use common::route_table::{chatbot_routes, AppView, Resolution, RouteParams, CHAT_ID_PARAM, CHAT_ROUTE};
use rstest::rstest;

#[rstest]
#[case("/")]
#[case("/abc123")]
#[case("/new")]
#[case("/%20")]
#[case("/ChatbotLayout")]
fn root_and_single_segment_paths_always_reach_the_chat_view(#[case] path: &str) {
    let routes = chatbot_routes().expect("route table");
    let resolution = routes.resolve(path);
    assert!(resolution.is_match(), "{path} did not resolve");
    assert!(matches!(resolution.app_view(), AppView::Chat { .. }));
}

#[test]
fn root_resolves_to_chat_without_an_id() {
    let routes = chatbot_routes().expect("route table");
    assert_eq!(routes.resolve("/").app_view(), AppView::Chat { chat_id: None });
}

#[test]
fn segment_resolves_to_chat_with_that_id() {
    let routes = chatbot_routes().expect("route table");
    assert_eq!(
        routes.resolve("/abc123").app_view(),
        AppView::Chat { chat_id: Some("abc123".to_string()) }
    );
}

#[test]
fn resolution_is_deterministic() {
    let first = chatbot_routes().expect("route table");
    let second = chatbot_routes().expect("route table");
    for path in ["/", "/abc123", "/a/b", "/x?y#z"] {
        assert_eq!(first.resolve(path), second.resolve(path));
        assert_eq!(first.resolve(path), first.resolve(path));
    }
}

#[test]
fn hrefs_round_trip_through_resolution() {
    let routes = chatbot_routes().expect("route table");
    let mut params = RouteParams::new();
    params.insert(CHAT_ID_PARAM.to_string(), "c-42".to_string());
    let href = routes.path_for(CHAT_ROUTE, &params).expect("href");
    let Resolution::Matched(route) = routes.resolve(&href) else {
        panic!("{href} must resolve");
    };
    assert_eq!(route.params, params);
}
