use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use campus_core::db::open_db_in_memory;
use campus_core::{Principal, PrincipalDirectory};
use campus_server::{build_router, config::Config, state::AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

const USER: &str = "user-token";
const ADMIN: &str = "admin-token";

fn app() -> Router {
    let mut principals = PrincipalDirectory::new();
    principals
        .register(USER, Principal::new("student@ucsb.edu", false))
        .unwrap();
    principals
        .register(ADMIN, Principal::new("phtcon@ucsb.edu", true))
        .unwrap();

    let config = Config::from_lookup(|_| None).unwrap();
    let conn = open_db_in_memory().unwrap();
    build_router(AppState::new(config, conn, principals))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, value)
}

const ARTICLE_POST: &str = "/api/articles/post?title=A&url=u&explanation=e&email=x@y.edu&dateAdded=2022-01-03T00:00:00";

#[tokio::test]
async fn article_lifecycle_matches_expected_payloads() {
    let app = app();

    let (status, created) = send(&app, Method::POST, ARTICLE_POST, Some(ADMIN), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        created,
        json!({
            "id": 1,
            "title": "A",
            "url": "u",
            "explanation": "e",
            "email": "x@y.edu",
            "dateAdded": "2022-01-03T00:00:00"
        })
    );

    let (status, fetched) = send(&app, Method::GET, "/api/articles?id=1", Some(USER), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, all) = send(&app, Method::GET, "/api/articles/all", Some(USER), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all, json!([created]));

    let (status, deleted) = send(&app, Method::DELETE, "/api/articles?id=1", Some(ADMIN), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!({"message": "Articles with id 1 deleted"}));

    let (status, missing) = send(&app, Method::GET, "/api/articles?id=1", Some(USER), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        missing,
        json!({"type": "EntityNotFoundException", "message": "Articles with id 1 not found"})
    );
}

#[tokio::test]
async fn anonymous_callers_are_forbidden_everywhere() {
    let app = app();

    for (method, uri) in [
        (Method::GET, "/api/articles/all"),
        (Method::GET, "/api/helprequests?id=1"),
        (Method::POST, ARTICLE_POST),
        (Method::DELETE, "/api/ucsborganization?orgCode=ZPR"),
        // guard runs before key parsing
        (Method::GET, "/api/MenuItemReviews?id=notanumber"),
    ] {
        let (status, body) = send(&app, method, uri, None, None).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{uri}");
        assert_eq!(body["type"], "AccessDeniedException");
    }

    let (status, _) = send(&app, Method::GET, "/api/articles/all", Some("forged"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

fn article_body(title: &str) -> Value {
    json!({
        "title": title,
        "url": "u",
        "explanation": "e",
        "email": "x@y.edu",
        "dateAdded": "2022-01-03T00:00:00"
    })
}

#[tokio::test]
async fn users_may_read_but_not_mutate() {
    let app = app();

    let (status, all) = send(&app, Method::GET, "/api/recommendationrequest/all", Some(USER), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all, json!([]));

    let (status, body) = send(&app, Method::POST, ARTICLE_POST, Some(USER), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["type"], "AccessDeniedException");

    let (status, created) = send(&app, Method::POST, ARTICLE_POST, Some(ADMIN), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/articles?id=1",
        Some(USER),
        Some(article_body("B")),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["type"], "AccessDeniedException");

    let (status, body) = send(&app, Method::DELETE, "/api/articles?id=1", Some(USER), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["type"], "AccessDeniedException");

    let (_, all) = send(&app, Method::GET, "/api/articles/all", Some(ADMIN), None).await;
    assert_eq!(all, json!([created]));
}

#[tokio::test]
async fn anonymous_update_with_body_is_forbidden() {
    let app = app();
    let (_, created) = send(&app, Method::POST, ARTICLE_POST, Some(ADMIN), None).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/articles?id=1",
        None,
        Some(article_body("B")),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["type"], "AccessDeniedException");

    let (_, fetched) = send(&app, Method::GET, "/api/articles?id=1", Some(USER), None).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn update_body_may_carry_null_id() {
    let app = app();
    send(&app, Method::POST, ARTICLE_POST, Some(ADMIN), None).await;

    let mut body = article_body("B");
    body["id"] = Value::Null;
    let (status, updated) = send(&app, Method::PUT, "/api/articles?id=1", Some(ADMIN), Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], 1);
    assert_eq!(updated["title"], "B");
}

#[tokio::test]
async fn bearer_scheme_is_matched_case_insensitively() {
    let app = app();

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/articles/all")
        .header(header::AUTHORIZATION, format!("bearer {USER}"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn organization_without_code_is_a_bad_request() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/ucsborganization/post?orgCode=&orgTranslationShort=a&orgTranslation=b&inactive=false",
        Some(ADMIN),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "type": "MissingServletRequestParameterException",
            "message": "UCSBOrganization cannot be saved without a key"
        })
    );

    let (_, all) = send(&app, Method::GET, "/api/ucsborganization/all", Some(USER), None).await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn update_overwrites_fields_and_keeps_key() {
    let app = app();

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/helprequests/post?requesterEmail=cgaucho@ucsb.edu&teamId=s22-5pm-3&tableOrBreakoutRoom=7&requestTime=2022-04-20T17:35:00&explanation=Swagger&solved=false",
        Some(ADMIN),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["id"], 1);
    assert_eq!(created["solved"], false);

    let (status, updated) = send(
        &app,
        Method::PUT,
        "/api/helprequests?id=1",
        Some(ADMIN),
        Some(json!({
            "id": 99,
            "requesterEmail": "ldelplaya@ucsb.edu",
            "teamId": "s22-6pm-4",
            "tableOrBreakoutRoom": "13",
            "requestTime": "2022-04-21T14:15:00",
            "explanation": "Dokku",
            "solved": true
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        updated,
        json!({
            "id": 1,
            "requesterEmail": "ldelplaya@ucsb.edu",
            "teamId": "s22-6pm-4",
            "tableOrBreakoutRoom": "13",
            "requestTime": "2022-04-21T14:15:00",
            "explanation": "Dokku",
            "solved": true
        })
    );

    let (_, fetched) = send(&app, Method::GET, "/api/helprequests?id=1", Some(USER), None).await;
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn organizations_use_org_code_as_key() {
    let app = app();

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/ucsborganization/post?orgCode=ZPR&orgTranslationShort=ZETA%20PHI%20RHO&orgTranslation=ZETA%20PHI%20RHO&inactive=false",
        Some(ADMIN),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        created,
        json!({
            "orgCode": "ZPR",
            "orgTranslationShort": "ZETA PHI RHO",
            "orgTranslation": "ZETA PHI RHO",
            "inactive": false
        })
    );

    let (status, fetched) = send(&app, Method::GET, "/api/ucsborganization?orgCode=ZPR", Some(USER), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, deleted) = send(&app, Method::DELETE, "/api/ucsborganization?orgCode=ZPR", Some(ADMIN), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["message"], "UCSBOrganization with id ZPR deleted");

    let (status, missing) = send(&app, Method::DELETE, "/api/ucsborganization?orgCode=ZPR", Some(ADMIN), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(missing["message"], "UCSBOrganization with id ZPR not found");
}

#[tokio::test]
async fn dining_menu_items_and_reviews_are_created_in_order() {
    let app = app();

    for (name, station) in [("Baked%20Pesto%20Pasta", "Entree%20Specials"), ("Tofu%20Banh%20Mi", "Entrees")] {
        let uri = format!(
            "/api/ucsbdiningcommonsmenuitem/post?diningCommonsCode=ortega&name={name}&station={station}"
        );
        let (status, _) = send(&app, Method::POST, &uri, Some(ADMIN), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, items) = send(&app, Method::GET, "/api/ucsbdiningcommonsmenuitem/all", Some(USER), None).await;
    assert_eq!(items[0]["id"], 1);
    assert_eq!(items[0]["name"], "Baked Pesto Pasta");
    assert_eq!(items[1]["id"], 2);
    assert_eq!(items[1]["station"], "Entrees");

    let (status, review) = send(
        &app,
        Method::POST,
        "/api/MenuItemReviews/post?itemId=2&reviewerEmail=cgaucho@ucsb.edu&stars=4&dateReviewed=2022-01-02T12:00:00&comments=good",
        Some(ADMIN),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(review["itemId"], 2);
    assert_eq!(review["stars"], 4);
}

#[tokio::test]
async fn missing_records_are_not_found_for_update_and_delete() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/recommendationrequest?id=67",
        Some(ADMIN),
        Some(json!({
            "requesterEmail": "student@ucsb.edu",
            "professorEmail": "prof@ucsb.edu",
            "explanation": "grad school",
            "dateRequested": "2022-01-02T12:00:00",
            "dateNeeded": "2022-02-02T12:00:00",
            "done": false
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "RecommendationRequest with id 67 not found");

    let (status, body) = send(&app, Method::DELETE, "/api/recommendationrequest?id=67", Some(ADMIN), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["type"], "EntityNotFoundException");
}

#[tokio::test]
async fn bad_key_parameters_are_rejected() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/articles", Some(USER), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["type"], "MissingServletRequestParameterException");

    let (status, body) = send(&app, Method::DELETE, "/api/articles?id=abc", Some(ADMIN), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["type"], "MethodArgumentTypeMismatchException");
}

#[tokio::test]
async fn health_and_version_need_no_credentials() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/healthz", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("pong".to_string()));

    let (status, body) = send(&app, Method::GET, "/api/version", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "campus_server");
}
