use picker_agent::{BrickRequest, PageAgent, ReqwestPageAgent, ShopSettings};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
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

fn settings(server: &MockServer) -> ShopSettings {
    ShopSettings {
        base_url: server.uri(),
        auth_token: Some("session-cookie".to_string()),
        ..ShopSettings::default()
    }
}

fn lookup_body(results: serde_json::Value) -> serde_json::Value {
    json!({ "data": { "elements": { "results": results } } })
}

async fn mount_lookup(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/api/graphql/PickABrickQuery"))
        .respond_with(template)
        .mount(server)
        .await;
}

async fn mount_cart(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/api/graphql/AddToElementCart"))
        .respond_with(template)
        .mount(server)
        .await;
}

#[tokio::test]
async fn pick_adds_the_requested_quantity() {
    picker_logging::initialize_for_tests();
    let server = MockServer::start().await;
    mount_lookup(
        &server,
        ResponseTemplate::new(200).set_body_json(lookup_body(json!([
            { "id": "E9", "variant": { "id": "v1", "attributes": { "deliveryChannel": "pab" } } }
        ]))),
    )
    .await;
    mount_cart(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "data": { "addToElementCart": { "id": "cart-1" } } })),
    )
    .await;

    let agent = ReqwestPageAgent::new(settings(&server)).expect("build agent");
    let outcome = agent.pick(&brick(Some("E9"))).await;

    assert!(outcome.success);
    assert_eq!(outcome.bricks_added, Some(5));
    assert!(!outcome.brick_not_found);
}

#[tokio::test]
async fn lookup_sends_session_locale_in_header_but_fixed_locale_in_body() {
    picker_logging::initialize_for_tests();
    let server = MockServer::start().await;

    // The header carries the session locale while the lookup body carries
    // the configured fixed value; both are asserted by the matcher set.
    Mock::given(method("POST"))
        .and(path("/api/graphql/PickABrickQuery"))
        .and(header("x-locale", "en-US"))
        .and(header("authorization", "session-cookie"))
        .and(body_partial_json(json!({
            "operationName": "PickABrickQuery",
            "variables": { "query": "E9", "locale": "nl-nl" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(lookup_body(json!([
            { "id": "E9", "variant": { "id": "v1", "attributes": { "deliveryChannel": "pab" } } }
        ]))))
        .expect(1)
        .mount(&server)
        .await;
    mount_cart(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "data": {} })),
    )
    .await;

    let agent = ReqwestPageAgent::new(settings(&server)).expect("build agent");
    let outcome = agent.pick(&brick(Some("E9"))).await;
    assert!(outcome.success);
}

#[tokio::test]
async fn empty_result_list_reports_brick_not_found() {
    picker_logging::initialize_for_tests();
    let server = MockServer::start().await;
    mount_lookup(
        &server,
        ResponseTemplate::new(200).set_body_json(lookup_body(json!([]))),
    )
    .await;
    // The cart call must never happen for a missing element.
    Mock::given(method("POST"))
        .and(path("/api/graphql/AddToElementCart"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let agent = ReqwestPageAgent::new(settings(&server)).expect("build agent");
    let outcome = agent.pick(&brick(Some("E9"))).await;

    assert!(!outcome.success);
    assert!(outcome.brick_not_found);
    assert_eq!(outcome.bricks_added, None);
}

#[tokio::test]
async fn absent_data_is_a_generic_failure() {
    picker_logging::initialize_for_tests();
    let server = MockServer::start().await;
    mount_lookup(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "errors": [{ "message": "boom" }] })),
    )
    .await;

    let agent = ReqwestPageAgent::new(settings(&server)).expect("build agent");
    let outcome = agent.pick(&brick(Some("E9"))).await;

    assert!(!outcome.success);
    // Absent data is not a not-found signal; the fallback must not fire.
    assert!(!outcome.brick_not_found);
}

#[tokio::test]
async fn lookup_http_error_is_a_generic_failure() {
    picker_logging::initialize_for_tests();
    let server = MockServer::start().await;
    mount_lookup(&server, ResponseTemplate::new(500)).await;

    let agent = ReqwestPageAgent::new(settings(&server)).expect("build agent");
    let outcome = agent.pick(&brick(Some("E9"))).await;

    assert!(!outcome.success);
    assert!(!outcome.brick_not_found);
}

#[tokio::test]
async fn cart_errors_are_a_generic_failure() {
    picker_logging::initialize_for_tests();
    let server = MockServer::start().await;
    mount_lookup(
        &server,
        ResponseTemplate::new(200).set_body_json(lookup_body(json!([
            { "id": "E9", "variant": { "id": "v1", "attributes": { "deliveryChannel": "bap" } } }
        ]))),
    )
    .await;
    mount_cart(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(json!({ "errors": [{ "message": "wrong cart type" }] })),
    )
    .await;

    let agent = ReqwestPageAgent::new(settings(&server)).expect("build agent");
    let outcome = agent.pick(&brick(Some("E9"))).await;

    assert!(!outcome.success);
    assert!(!outcome.brick_not_found);
}

#[tokio::test]
async fn cart_http_error_is_a_generic_failure() {
    picker_logging::initialize_for_tests();
    let server = MockServer::start().await;
    mount_lookup(
        &server,
        ResponseTemplate::new(200).set_body_json(lookup_body(json!([
            { "id": "E9", "variant": { "id": "v1", "attributes": { "deliveryChannel": "pab" } } }
        ]))),
    )
    .await;
    mount_cart(&server, ResponseTemplate::new(502)).await;

    let agent = ReqwestPageAgent::new(settings(&server)).expect("build agent");
    let outcome = agent.pick(&brick(Some("E9"))).await;

    assert!(!outcome.success);
    assert!(!outcome.brick_not_found);
}

#[tokio::test]
async fn delivery_channel_from_lookup_drives_the_cart_type() {
    picker_logging::initialize_for_tests();
    let server = MockServer::start().await;
    mount_lookup(
        &server,
        ResponseTemplate::new(200).set_body_json(lookup_body(json!([
            { "id": "E9", "variant": { "id": "v1", "attributes": { "deliveryChannel": "bap" } } }
        ]))),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/api/graphql/AddToElementCart"))
        .and(body_partial_json(json!({
            "variables": {
                "items": [{ "sku": "E9", "quantity": 5 }],
                "cartType": "bap"
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
        .expect(1)
        .mount(&server)
        .await;

    let agent = ReqwestPageAgent::new(settings(&server)).expect("build agent");
    let outcome = agent.pick(&brick(Some("E9"))).await;
    assert!(outcome.success);
}
