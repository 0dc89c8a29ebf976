use picker_agent::{AlternativeFinder, BrickRequest, RebrickableFinder, XrefSettings};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn brick(element_id: Option<&str>) -> BrickRequest {
    BrickRequest {
        element_id: element_id.map(ToOwned::to_owned),
        color_id: "4".to_string(),
        part_number: "3001".to_string(),
        requested_quantity: 5,
        name: Some("Brick 2 x 4".to_string()),
        color: Some("Red".to_string()),
        locale: "en-US".to_string(),
    }
}

fn settings(server: &MockServer) -> XrefSettings {
    XrefSettings {
        base_url: server.uri(),
        api_key: "test-key".to_string(),
        ..XrefSettings::default()
    }
}

#[tokio::test]
async fn substitutes_carry_the_original_metadata() {
    picker_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/lego/parts/3001/colors/4/"))
        .and(header("authorization", "key test-key"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "elements": ["E1", "E2"] })),
        )
        .mount(&server)
        .await;

    let finder = RebrickableFinder::new(settings(&server)).expect("build finder");
    let candidates = finder.find_alternatives(&brick(None)).await;

    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].element_id.as_deref(), Some("E1"));
    assert_eq!(candidates[1].element_id.as_deref(), Some("E2"));
    for candidate in &candidates {
        assert_eq!(candidate.part_number, "3001");
        assert_eq!(candidate.color_id, "4");
        assert_eq!(candidate.requested_quantity, 5);
        assert_eq!(candidate.name.as_deref(), Some("Brick 2 x 4"));
        assert_eq!(candidate.locale, "en-US");
    }
}

#[tokio::test]
async fn the_original_element_id_is_excluded() {
    picker_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/lego/parts/3001/colors/4/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "elements": ["E1", "E2"] })),
        )
        .mount(&server)
        .await;

    let finder = RebrickableFinder::new(settings(&server)).expect("build finder");
    let candidates = finder.find_alternatives(&brick(Some("E1"))).await;

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].element_id.as_deref(), Some("E2"));
}

#[tokio::test]
async fn http_error_yields_no_candidates() {
    picker_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/lego/parts/3001/colors/4/"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let finder = RebrickableFinder::new(settings(&server)).expect("build finder");
    let candidates = finder.find_alternatives(&brick(None)).await;

    assert_eq!(candidates, Vec::new());
}

#[tokio::test]
async fn malformed_body_yields_no_candidates() {
    picker_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/lego/parts/3001/colors/4/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let finder = RebrickableFinder::new(settings(&server)).expect("build finder");
    let candidates = finder.find_alternatives(&brick(None)).await;

    assert_eq!(candidates, Vec::new());
}
