use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use eventmate::config::AppConfig;
use eventmate::create_app;

async fn setup_app() -> Router {
    create_app(AppConfig::for_tests())
        .await
        .expect("Failed to create test app")
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    headers: &[(&str, &str)],
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, None, &[]).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, "POST", uri, Some(body), &[]).await
}

async fn register(app: &Router, name: &str, email: &str) {
    let (status, _) = post(
        app,
        "/api/users/register",
        json!({ "name": name, "email": email, "password": "pw-123456" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register {}", email);
}

async fn set_location(app: &Router, email: &str, lat: f64, lng: f64) {
    let (status, _) = post(
        app,
        &format!("/api/locations/{}", email),
        json!({ "lat": lat, "lng": lng, "updatedAt": 1_700_000_000_000i64 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

async fn befriend(app: &Router, a: &str, b: &str) {
    let (status, _) = post(
        app,
        &format!("/api/requests/{}/send", a),
        json!({ "targetEmail": b }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = post(
        app,
        &format!("/api/requests/{}/accept", b),
        json!({ "fromEmail": a }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

fn emails(suggestions: &Value) -> Vec<String> {
    suggestions["suggestions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["email"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let app = setup_app().await;
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], json!(true));
}

#[tokio::test]
async fn test_register_and_login() {
    let app = setup_app().await;

    let (status, body) = post(
        &app,
        "/api/users/register",
        json!({ "name": "Anna", "email": " Anna@Example.com ", "password": "pw-123456" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "anna@example.com");
    assert!(body.get("password").is_none());

    let (status, _) = post(
        &app,
        "/api/users/register",
        json!({ "name": "Anna 2", "email": "anna@example.com", "password": "x" }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = post(
        &app,
        "/api/users/register",
        json!({ "name": "", "email": "bo@example.com", "password": "x" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = post(
        &app,
        "/api/users/login",
        json!({ "email": "anna@example.com", "password": "pw-123456" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Anna");
    assert!(body["createdAt"].is_string());

    let (status, _) = post(
        &app,
        "/api/users/login",
        json!({ "email": "anna@example.com", "password": "wrong" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = post(
        &app,
        "/api/users/login",
        json!({ "email": "anna@example.com", "name": "Anna" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "password required");
}

#[tokio::test]
async fn test_passwordless_login_creates_account() {
    let app = setup_app().await;

    let (status, _) = post(&app, "/api/users/login", json!({ "email": "guest@x.dk" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = post(
        &app,
        "/api/users/login",
        json!({ "email": "carl@x.dk", "name": "Carl" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Carl");

    let (status, body) = get(&app, "/api/users/carl@x.dk").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "carl@x.dk");
}

#[tokio::test]
async fn test_purchase_awards_points_and_levels() {
    let app = setup_app().await;
    register(&app, "Anna", "anna@x.dk").await;

    let (status, body) = get(&app, "/api/stats/anna@x.dk").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "xp": 0, "level": 1, "points": 0 }));

    let (status, body) = post(
        &app,
        "/api/stats/anna@x.dk/purchase",
        json!({ "amount": 100, "eventName": "Roskilde" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stats"], json!({ "xp": 17, "level": 2, "points": 100 }));
    assert_eq!(body["roundedAmount"], 100);
    assert_eq!(body["totalXp"], 117);
    assert_eq!(body["levelsGained"], 1);
    assert_eq!(
        body["summary"],
        "Purchase completed for Roskilde. +100 points and +117 xp."
    );

    let (_, body) = get(&app, "/api/stats/anna@x.dk").await;
    assert_eq!(body, json!({ "xp": 17, "level": 2, "points": 100 }));
}

#[tokio::test]
async fn test_purchase_rejections_leave_stats_unchanged() {
    let app = setup_app().await;
    register(&app, "Anna", "anna@x.dk").await;

    let (status, _) = post(&app, "/api/stats/anna@x.dk/purchase", json!({ "amount": 0 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(&app, "/api/stats/anna@x.dk/purchase", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(
        &app,
        "/api/stats/anna@x.dk/purchase",
        json!({ "amount": 50, "guest": true }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // No account row means guest.
    let (status, _) = post(&app, "/api/stats/nobody@x.dk/purchase", json!({ "amount": 50 })).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, body) = get(&app, "/api/stats/anna@x.dk").await;
    assert_eq!(body, json!({ "xp": 0, "level": 1, "points": 0 }));
    let (_, body) = get(&app, "/api/stats/nobody@x.dk").await;
    assert_eq!(body, json!({ "xp": 0, "level": 1, "points": 0 }));
}

#[tokio::test]
async fn test_point_shop() {
    let app = setup_app().await;
    register(&app, "Anna", "anna@x.dk").await;

    let (status, _) = post(
        &app,
        "/api/items/anna@x.dk",
        json!({ "itemName": "Gold badge", "price": 180, "source": "shop-points" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    post(&app, "/api/stats/anna@x.dk/purchase", json!({ "amount": 200 })).await;

    let (status, body) = post(
        &app,
        "/api/items/anna@x.dk",
        json!({ "itemName": "Gold badge", "price": 180, "source": "shop-points" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stats"]["points"], 20);

    let (status, body) = post(
        &app,
        "/api/items/anna@x.dk",
        json!({ "itemName": "VIP Pass", "price": 129, "source": "shop-dkk" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stats"]["points"], 20);

    let (status, body) = get(&app, "/api/items/anna@x.dk").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["itemName"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["VIP Pass", "Gold badge"]);

    let (status, _) = post(
        &app,
        "/api/items/nobody@x.dk",
        json!({ "itemName": "VIP Pass", "price": 129, "source": "shop-dkk" }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_point_orders_cannot_overspend_concurrently() {
    let app = setup_app().await;
    register(&app, "Anna", "anna@x.dk").await;
    post(&app, "/api/stats/anna@x.dk/purchase", json!({ "amount": 200 })).await;

    let order = json!({ "itemName": "Gold badge", "price": 180, "source": "shop-points" });
    let (first, second) = tokio::join!(
        post(&app, "/api/items/anna@x.dk", order.clone()),
        post(&app, "/api/items/anna@x.dk", order.clone()),
    );
    let mut statuses = vec![first.0.as_u16(), second.0.as_u16()];
    statuses.sort();
    assert_eq!(statuses, vec![200, 400]);

    let (_, body) = get(&app, "/api/stats/anna@x.dk").await;
    assert_eq!(body["points"], 20);
    let (_, body) = get(&app, "/api/items/anna@x.dk").await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_point_orders_require_a_price() {
    let app = setup_app().await;
    register(&app, "Anna", "anna@x.dk").await;
    post(&app, "/api/stats/anna@x.dk/purchase", json!({ "amount": 50 })).await;

    let (status, body) = post(
        &app,
        "/api/items/anna@x.dk",
        json!({ "itemName": "Gold badge", "source": "shop-points" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "price required");

    let (_, body) = get(&app, "/api/items/anna@x.dk").await;
    assert_eq!(body, json!([]));
    let (_, body) = get(&app, "/api/stats/anna@x.dk").await;
    assert_eq!(body["points"], 50);
}

#[tokio::test]
async fn test_huge_purchase_amounts_are_rejected() {
    let app = setup_app().await;
    register(&app, "Anna", "anna@x.dk").await;

    let (status, _) = post(&app, "/api/stats/anna@x.dk/purchase", json!({ "amount": 1e300 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = get(&app, "/api/stats/anna@x.dk").await;
    assert_eq!(body, json!({ "xp": 0, "level": 1, "points": 0 }));
}

#[tokio::test]
async fn test_locations_are_validated() {
    let app = setup_app().await;

    let (status, _) = post(&app, "/api/locations/a@x.dk", json!({ "lat": 91.0, "lng": 0.0 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(&app, "/api/locations/a@x.dk", json!({ "lng": 0.0 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    set_location(&app, "a@x.dk", 55.6761, 12.5683).await;
    set_location(&app, "a@x.dk", 56.1629, 10.2039).await;

    let (status, body) = get(&app, "/api/locations").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["a@x.dk"]["lat"], 56.1629);
    assert_eq!(body["a@x.dk"]["lng"], 10.2039);
    assert_eq!(body["a@x.dk"]["updatedAt"], 1_700_000_000_000i64);
}

#[tokio::test]
async fn test_friend_request_flow() {
    let app = setup_app().await;
    register(&app, "Anna", "anna@x.dk").await;
    register(&app, "Bo", "bo@x.dk").await;

    let (status, _) = post(
        &app,
        "/api/requests/anna@x.dk/send",
        json!({ "targetEmail": "anna@x.dk" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(
        &app,
        "/api/requests/anna@x.dk/send",
        json!({ "targetEmail": "ghost@x.dk" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = post(
        &app,
        "/api/requests/anna@x.dk/send",
        json!({ "targetEmail": "BO@x.dk" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get(&app, "/api/requests/bo@x.dk").await;
    assert_eq!(body, json!(["anna@x.dk"]));

    let (status, _) = post(
        &app,
        "/api/requests/bo@x.dk/accept",
        json!({ "fromEmail": "anna@x.dk" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get(&app, "/api/friends/anna@x.dk").await;
    assert_eq!(body, json!(["bo@x.dk"]));
    let (_, body) = get(&app, "/api/friends/bo@x.dk").await;
    assert_eq!(body, json!(["anna@x.dk"]));
    let (_, body) = get(&app, "/api/requests/bo@x.dk").await;
    assert_eq!(body, json!([]));

    // Accepting twice finds nothing pending.
    let (status, _) = post(
        &app,
        "/api/requests/bo@x.dk/accept",
        json!({ "fromEmail": "anna@x.dk" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = post(
        &app,
        "/api/requests/anna@x.dk/send",
        json!({ "targetEmail": "bo@x.dk" }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        "DELETE",
        "/api/friendships/anna@x.dk?friendEmail=bo@x.dk",
        None,
        &[],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = get(&app, "/api/friends/bo@x.dk").await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_suggestions_by_distance() {
    let app = setup_app().await;
    register(&app, "Me", "me@x.dk").await;
    register(&app, "Aalborg", "aalborg@x.dk").await;
    register(&app, "Aarhus", "aarhus@x.dk").await;
    register(&app, "Odense", "odense@x.dk").await;
    register(&app, "Zed", "zed@x.dk").await;

    set_location(&app, "me@x.dk", 55.6761, 12.5683).await;
    set_location(&app, "aalborg@x.dk", 57.0488, 9.9217).await;
    set_location(&app, "aarhus@x.dk", 56.1629, 10.2039).await;
    set_location(&app, "odense@x.dk", 55.4038, 10.4024).await;

    let (status, body) = get(&app, "/api/suggestions/me@x.dk").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hasLocation"], true);
    assert_eq!(
        emails(&body),
        vec!["odense@x.dk", "aarhus@x.dk", "aalborg@x.dk", "zed@x.dk"]
    );
    let first = &body["suggestions"][0];
    assert_eq!(first["name"], "Odense");
    assert!((first["distanceKm"].as_f64().unwrap() - 139.6).abs() < 1.0);
    assert!(body["suggestions"][3]["distanceKm"].is_null());
}

#[tokio::test]
async fn test_suggestions_from_friends_of_friends() {
    let app = setup_app().await;
    register(&app, "Anna", "anna@x.dk").await;
    register(&app, "Bo", "bo@x.dk").await;
    register(&app, "Carl", "carl@x.dk").await;
    register(&app, "Me", "me@x.dk").await;

    let (_, body) = get(&app, "/api/suggestions/me@x.dk").await;
    assert_eq!(body["hasLocation"], false);
    assert_eq!(emails(&body), vec!["anna@x.dk", "bo@x.dk", "carl@x.dk"]);

    befriend(&app, "me@x.dk", "anna@x.dk").await;
    befriend(&app, "anna@x.dk", "carl@x.dk").await;

    let (_, body) = get(&app, "/api/suggestions/me@x.dk").await;
    assert_eq!(emails(&body), vec!["carl@x.dk"]);
    assert_eq!(body["suggestions"][0]["isFriend"], false);
}

#[tokio::test]
async fn test_rename_moves_owned_rows() {
    let app = setup_app().await;
    register(&app, "Anna", "anna@x.dk").await;
    register(&app, "Bo", "bo@x.dk").await;
    befriend(&app, "anna@x.dk", "bo@x.dk").await;
    set_location(&app, "anna@x.dk", 55.0, 12.0).await;

    let (status, _) = send(
        &app,
        "PUT",
        "/api/users/anna@x.dk",
        Some(json!({ "name": "Anna", "email": "bo@x.dk" })),
        &[],
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(
        &app,
        "PUT",
        "/api/users/anna@x.dk",
        Some(json!({ "name": "Anna B", "email": "anna.b@x.dk" })),
        &[],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "anna.b@x.dk");
    assert_eq!(body["name"], "Anna B");

    let (status, _) = get(&app, "/api/users/anna@x.dk").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, body) = get(&app, "/api/friends/bo@x.dk").await;
    assert_eq!(body, json!(["anna.b@x.dk"]));
    let (_, body) = get(&app, "/api/locations").await;
    assert!(body.get("anna.b@x.dk").is_some());
    assert!(body.get("anna@x.dk").is_none());
}

#[tokio::test]
async fn test_delete_removes_owned_rows() {
    let app = setup_app().await;
    register(&app, "Anna", "anna@x.dk").await;
    register(&app, "Bo", "bo@x.dk").await;
    befriend(&app, "anna@x.dk", "bo@x.dk").await;
    post(&app, "/api/stats/anna@x.dk/purchase", json!({ "amount": 10 })).await;

    let (status, _) = send(&app, "DELETE", "/api/users/anna@x.dk", None, &[]).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get(&app, "/api/users/anna@x.dk").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, body) = get(&app, "/api/friends/bo@x.dk").await;
    assert_eq!(body, json!([]));
    let (_, body) = get(&app, "/api/stats/anna@x.dk").await;
    assert_eq!(body, json!({ "xp": 0, "level": 1, "points": 0 }));
}

#[tokio::test]
async fn test_events_are_pruned_on_read() {
    let app = setup_app().await;
    let uri = "/api/events/anna@x.dk";

    let (status, _) = post(&app, uri, json!({ "type": "interested", "event": { "name": "x" } })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    for (id, raw_date) in [("old", "2001-01-01"), ("future", "2999-06-01T19:00:00Z"), ("tbd", "")] {
        let (status, _) = post(
            &app,
            uri,
            json!({
                "type": "interested",
                "event": { "eventId": id, "name": format!("Concert {}", id), "rawDate": raw_date }
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, _) = get(&app, uri).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = get(&app, &format!("{}?type=interested", uri)).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["eventId"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["tbd", "future"]);
    assert_eq!(body[0]["type"], "interested");

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("{}?type=interested&eventId=future", uri),
        None,
        &[],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = get(&app, &format!("{}?type=interested", uri)).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_avatar_round_trip() {
    let app = setup_app().await;

    let (_, body) = get(&app, "/api/avatar/anna@x.dk").await;
    assert_eq!(body, json!({ "data": null }));

    let (status, _) = send(&app, "PUT", "/api/avatar/anna@x.dk", Some(json!({})), &[]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let avatar = json!({ "hair": "red", "height": 1.8 });
    let (status, _) = send(
        &app,
        "PUT",
        "/api/avatar/anna@x.dk",
        Some(json!({ "data": avatar })),
        &[],
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get(&app, "/api/avatar/anna@x.dk").await;
    assert_eq!(body["data"], avatar);
    assert!(body["updatedAt"].is_string());
}

#[tokio::test]
async fn test_mitid_flow() {
    let app = setup_app().await;

    let (status, _) = get(&app, "/api/mitid/0101901234").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let registration = json!({ "cpr": "0101901234", "name": "Dina", "email": "dina@x.dk" });
    let (status, body) = post(&app, "/api/mitid/register", registration.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "dina@x.dk");

    let (status, _) = post(&app, "/api/mitid/register", registration).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = get(&app, "/api/mitid/0101901234").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Dina");
}

#[tokio::test]
async fn test_admin_routes_require_credentials() {
    let app = setup_app().await;
    register(&app, "Anna", "anna@x.dk").await;

    let (status, _) = get(&app, "/api/admin/users").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let admin = [
        ("x-admin-email", "admin@example.com"),
        ("x-admin-password", "secret"),
    ];
    let (status, body) = send(&app, "GET", "/api/admin/users", None, &admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, _) = post(
        &app,
        "/api/admin/login",
        json!({ "email": "admin@example.com", "password": "nope" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, body) = post(
        &app,
        "/api/admin/login",
        json!({ "email": "admin@example.com", "password": "secret" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "admin@example.com");

    let (status, _) = send(
        &app,
        "POST",
        "/api/admin/users",
        Some(json!({ "name": "Bo", "email": "bo@x.dk" })),
        &admin,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "DELETE", "/api/admin/users/anna@x.dk", None, &admin).await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = get(&app, "/api/users").await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["email"], "bo@x.dk");
}
