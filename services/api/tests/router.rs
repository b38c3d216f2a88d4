//! Router-level tests over the in-memory backend

use api::{AppState, Repositories, create_router};
use async_trait::async_trait;
use auth::{models::PasswordResetToken, repositories::MemoryResetTokenRepository};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use catalog::{
    CatalogClient, CatalogResult,
    client::{AccessInfo, PdfAccess, Volume, VolumeInfo},
    repositories::MemoryBookRepository,
    seed::seed_genres,
};
use chrono::{Duration, Utc};
use common::settings::Settings;
use serde_json::{Value, json};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
use tower::ServiceExt;
use uuid::Uuid;

struct CountingCatalog {
    calls: AtomicUsize,
}

#[async_trait]
impl CatalogClient for CountingCatalog {
    async fn search_subject(&self, subject: &str, _max: u32) -> CatalogResult<Vec<Volume>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok((1..=3)
            .map(|n| Volume {
                id: format!("{}-{}", subject.to_lowercase().replace(' ', "-"), n),
                volume_info: VolumeInfo {
                    title: (n != 3).then(|| format!("{} book {}", subject, n)),
                    authors: Some(vec!["A. Writer".to_string(), "B. Writer".to_string()]),
                    description: (n == 1).then(|| "An overview".to_string()),
                    ..Default::default()
                },
                access_info: (n == 1).then(|| AccessInfo {
                    pdf: Some(PdfAccess {
                        download_link: Some("https://books.example/dl/1".to_string()),
                    }),
                }),
            })
            .collect())
    }
}

struct TestApp {
    router: Router,
    catalog: Arc<CountingCatalog>,
    reset_tokens: MemoryResetTokenRepository,
    books: MemoryBookRepository,
}

impl TestApp {
    async fn new() -> Self {
        let settings = Settings::load_from("missing-settings-file").unwrap();
        let mut repositories = Repositories::in_memory();
        let reset_tokens = MemoryResetTokenRepository::new(repositories.users.clone());
        let books = MemoryBookRepository::new();

        repositories.reset_tokens = Arc::new(reset_tokens.clone());
        repositories.books = Arc::new(books.clone());
        seed_genres(repositories.genres.as_ref()).await.unwrap();

        let catalog = Arc::new(CountingCatalog {
            calls: AtomicUsize::new(0),
        });
        let state = AppState::new(repositories, catalog.clone(), &settings, None);

        Self {
            router: create_router(state),
            catalog,
            reset_tokens,
            books,
        }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, headers, body)
    }

    async fn json(
        &self,
        method: Method,
        uri: &str,
        body: Value,
        cookie: Option<&str>,
    ) -> (StatusCode, HeaderMap, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    async fn get(&self, uri: &str, cookie: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(Method::GET).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let (status, _, body) = self.send(builder.body(Body::empty()).unwrap()).await;
        (status, body)
    }

    async fn register(&self, email: &str, password: &str) -> Value {
        let (status, _, body) = self
            .json(
                Method::POST,
                "/api/auth/register",
                json!({
                    "email": email,
                    "password": password,
                    "confirmPassword": password,
                    "name": "Reader",
                }),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK, "register failed: {}", body);
        body
    }

    /// Log in and return the `name=value` pair to send back as a Cookie header
    async fn login(&self, email: &str, password: &str) -> String {
        let (status, headers, body) = self
            .json(
                Method::POST,
                "/api/auth/login",
                json!({ "email": email, "password": password }),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        session_cookie(&headers)
    }

    async fn first_genre_id(&self) -> String {
        let (_, genres) = self.get("/api/genres", None).await;
        genres[0]["id"].as_str().unwrap().to_string()
    }
}

fn session_cookie(headers: &HeaderMap) -> String {
    headers
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .unwrap()
        .to_string()
}

fn contains_key(value: &Value, needle: &str) -> bool {
    match value {
        Value::Object(map) => map
            .iter()
            .any(|(key, value)| key.to_lowercase().contains(needle) || contains_key(value, needle)),
        Value::Array(items) => items.iter().any(|item| contains_key(item, needle)),
        _ => false,
    }
}

#[tokio::test]
async fn test_register_login_me_scenario() {
    let app = TestApp::new().await;

    let registered = app.register("a@x.com", "secret1").await;
    assert_eq!(registered["message"], "User registered successfully");
    let user_id = registered["userId"].as_str().unwrap().to_string();

    let (status, headers, body) = app
        .json(
            Method::POST,
            "/api/auth/login",
            json!({ "email": "a@x.com", "password": "secret1" }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Logged in successfully");
    assert_eq!(body["user"]["email"], "a@x.com");
    assert!(!contains_key(&body, "password"));

    let set_cookie = headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
    assert!(set_cookie.starts_with("sid="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));
    assert!(set_cookie.contains("Path=/"));

    let cookie = session_cookie(&headers);
    let (status, me) = app.get("/api/auth/me", Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["id"], user_id.as_str());
    assert_eq!(me["country"], "IN");
    assert_eq!(me["name"], "Reader");
    assert!(!contains_key(&me, "password"));
}

#[tokio::test]
async fn test_me_without_session_is_unauthorized() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/auth/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Unauthorized" }));

    let (status, _) = app.get("/api/auth/me", Some("sid=forged")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_duplicate_registration() {
    let app = TestApp::new().await;
    app.register("a@x.com", "secret1").await;

    let (status, _, body) = app
        .json(
            Method::POST,
            "/api/auth/register",
            json!({
                "email": "a@x.com",
                "password": "secret2",
                "confirmPassword": "secret2",
            }),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Email already registered" }));
}

#[tokio::test]
async fn test_registration_validation_errors() {
    let app = TestApp::new().await;

    let (status, _, body) = app
        .json(
            Method::POST,
            "/api/auth/register",
            json!({
                "email": "a@x.com",
                "password": "secret1",
                "confirmPassword": "secret2",
            }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Passwords don't match");

    let (status, _, body) = app
        .json(
            Method::POST,
            "/api/auth/register",
            json!({ "email": "a@x.com", "password": "123", "confirmPassword": "123" }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_malformed_json_is_a_validation_error() {
    let app = TestApp::new().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _, body) = app.send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_wrong_password_and_unknown_email_are_indistinguishable() {
    let app = TestApp::new().await;
    app.register("a@x.com", "secret1").await;

    let wrong_password = app
        .json(
            Method::POST,
            "/api/auth/login",
            json!({ "email": "a@x.com", "password": "wrong-password" }),
            None,
        )
        .await;
    let unknown_email = app
        .json(
            Method::POST,
            "/api/auth/login",
            json!({ "email": "nobody@x.com", "password": "secret1" }),
            None,
        )
        .await;

    assert_eq!(wrong_password.0, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.0, unknown_email.0);
    assert_eq!(wrong_password.2, unknown_email.2);
    assert_eq!(wrong_password.2, json!({ "error": "Invalid credentials" }));
    assert!(wrong_password.1.get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_logout_destroys_session_and_is_idempotent() {
    let app = TestApp::new().await;
    app.register("a@x.com", "secret1").await;
    let cookie = app.login("a@x.com", "secret1").await;

    for _ in 0..2 {
        let (status, headers, body) = app
            .json(Method::POST, "/api/auth/logout", json!({}), Some(&cookie))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Logged out successfully");
        let cleared = headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cleared.contains("Max-Age=0"));
    }

    let (status, _) = app.get("/api/auth/me", Some(&cookie)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, _) = app
        .json(Method::POST, "/api/auth/logout", json!({}), None)
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_forgot_password_does_not_reveal_accounts() {
    let app = TestApp::new().await;
    app.register("a@x.com", "secret1").await;

    let (unknown_status, _, unknown_body) = app
        .json(
            Method::POST,
            "/api/auth/forgot-password",
            json!({ "email": "ghost@x.com" }),
            None,
        )
        .await;
    assert_eq!(unknown_status, StatusCode::OK);
    assert!(app.reset_tokens.all().await.is_empty());

    let (known_status, _, known_body) = app
        .json(
            Method::POST,
            "/api/auth/forgot-password",
            json!({ "email": "a@x.com" }),
            None,
        )
        .await;
    assert_eq!(known_status, StatusCode::OK);
    assert_eq!(known_body, unknown_body);
    assert_eq!(app.reset_tokens.all().await.len(), 1);

    let (status, _, _) = app
        .json(
            Method::POST,
            "/api/auth/forgot-password",
            json!({ "email": "not-an-email" }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reset_token_redeems_once() {
    let app = TestApp::new().await;
    app.register("a@x.com", "secret1").await;
    app.json(
        Method::POST,
        "/api/auth/forgot-password",
        json!({ "email": "a@x.com" }),
        None,
    )
    .await;
    let token = app.reset_tokens.all().await[0].token.clone();

    let reset = json!({
        "token": token,
        "password": "newpass1",
        "confirmPassword": "newpass1",
    });
    let (status, _, body) = app
        .json(Method::POST, "/api/auth/reset-password", reset.clone(), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Password reset successfully");

    let (status, _, body) = app
        .json(Method::POST, "/api/auth/reset-password", reset, None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid or expired reset token" }));

    app.login("a@x.com", "newpass1").await;
    let (status, _, _) = app
        .json(
            Method::POST,
            "/api/auth/login",
            json!({ "email": "a@x.com", "password": "secret1" }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_reset_token_fails() {
    let app = TestApp::new().await;
    let registered = app.register("a@x.com", "secret1").await;
    let user_id: Uuid = registered["userId"].as_str().unwrap().parse().unwrap();

    let now = Utc::now();
    app.reset_tokens
        .insert(PasswordResetToken {
            id: Uuid::new_v4(),
            user_id,
            token: "stale0000000000000000000000000000000000000000000".to_string(),
            expires_at: now - Duration::seconds(1),
            used: false,
            created_at: now - Duration::hours(1),
        })
        .await;

    let (status, _, body) = app
        .json(
            Method::POST,
            "/api/auth/reset-password",
            json!({
                "token": "stale0000000000000000000000000000000000000000000",
                "password": "newpass1",
                "confirmPassword": "newpass1",
            }),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid or expired reset token");
    app.login("a@x.com", "secret1").await;
}

#[tokio::test]
async fn test_genre_books_fill_once_then_serve_from_cache() {
    let app = TestApp::new().await;
    let genre_id = app.first_genre_id().await;
    let uri = format!("/api/genres/{}/books", genre_id);

    let (status, first) = app.get(&uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first.as_array().unwrap().len(), 3);
    assert_eq!(app.books.len().await, 3);
    assert_eq!(app.catalog.calls.load(Ordering::SeqCst), 1);

    let (status, second) = app.get(&uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second, first);
    assert_eq!(app.catalog.calls.load(Ordering::SeqCst), 1);

    let books = first.as_array().unwrap();
    assert!(books.iter().any(|b| b["title"] == "Unknown Title"));
    assert!(books.iter().all(|b| b["authors"] == "A. Writer, B. Writer"));
    assert!(books.iter().all(|b| b["genreId"] == genre_id.as_str()));
}

#[tokio::test]
async fn test_genre_lookups() {
    let app = TestApp::new().await;

    let (status, genres) = app.get("/api/genres", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(genres.as_array().unwrap().len(), 8);

    let genre_id = genres[0]["id"].as_str().unwrap();
    let (status, genre) = app.get(&format!("/api/genres/{}", genre_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(genre["name"], genres[0]["name"]);
    assert!(genre["imageUrl"].is_string());

    let missing = Uuid::new_v4();
    let (status, body) = app.get(&format!("/api/genres/{}", missing), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Genre not found" }));

    let (status, _) = app.get(&format!("/api/genres/{}/books", missing), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.get("/api/genres/not-a-uuid/books", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(app.catalog.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_book_detail_preview_and_download() {
    let app = TestApp::new().await;
    let genre_id = app.first_genre_id().await;
    let (_, books) = app.get(&format!("/api/genres/{}/books", genre_id), None).await;

    let with_pdf = books
        .as_array()
        .unwrap()
        .iter()
        .find(|b| b["downloadUrl"].is_string())
        .unwrap();
    let without_pdf = books
        .as_array()
        .unwrap()
        .iter()
        .find(|b| b["downloadUrl"].is_null())
        .unwrap();
    let with_id = with_pdf["id"].as_str().unwrap();
    let without_id = without_pdf["id"].as_str().unwrap();

    let (status, book) = app.get(&format!("/api/books/{}", with_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&book, with_pdf);

    let (status, preview) = app
        .get(&format!("/api/books/{}/preview", with_id), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(preview["bookId"], with_id);
    assert_eq!(preview["previewPages"], 5);
    assert_eq!(preview["content"], "An overview");

    let (status, download) = app
        .get(&format!("/api/books/{}/download", with_id), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(download["downloadUrl"], "https://books.example/dl/1");

    let (status, body) = app
        .get(&format!("/api/books/{}/download", without_id), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Download not available for this book");

    let (status, body) = app.get("/api/books/unknown-volume", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Book not found" }));
}

#[tokio::test]
async fn test_notifications_lifecycle() {
    let app = TestApp::new().await;
    app.register("a@x.com", "secret1").await;
    let cookie = app.login("a@x.com", "secret1").await;

    let (status, _) = app.get("/api/notifications", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, unread) = app.get("/api/notifications", Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    let unread = unread.as_array().unwrap().clone();
    assert_eq!(unread.len(), 1);
    assert_eq!(unread[0]["type"], "success");
    assert_eq!(unread[0]["read"], false);

    let uri = format!("/api/notifications/{}/read", unread[0]["id"].as_str().unwrap());
    for _ in 0..2 {
        let (status, _, body) = app.json(Method::PUT, &uri, json!({}), Some(&cookie)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Notification marked as read");
    }

    let (_, unread) = app.get("/api/notifications", Some(&cookie)).await;
    assert!(unread.as_array().unwrap().is_empty());

    let (_, all) = app.get("/api/notifications?all=true", Some(&cookie)).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
    assert_eq!(all[0]["read"], true);
}

#[tokio::test]
async fn test_cannot_mark_someone_elses_notification() {
    let app = TestApp::new().await;
    app.register("a@x.com", "secret1").await;
    app.register("b@x.com", "secret1").await;
    let alice = app.login("a@x.com", "secret1").await;
    let bob = app.login("b@x.com", "secret1").await;

    let (_, alice_notes) = app.get("/api/notifications", Some(&alice)).await;
    let uri = format!(
        "/api/notifications/{}/read",
        alice_notes[0]["id"].as_str().unwrap()
    );

    let (status, _, _) = app.json(Method::PUT, &uri, json!({}), Some(&bob)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = app
        .json(
            Method::PUT,
            "/api/notifications/garbage/read",
            json!({}),
            Some(&bob),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, still_unread) = app.get("/api/notifications", Some(&alice)).await;
    assert_eq!(still_unread.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_profile_read_and_partial_update() {
    let app = TestApp::new().await;
    app.register("a@x.com", "secret1").await;
    let cookie = app.login("a@x.com", "secret1").await;

    let (status, _, _) = app
        .json(Method::PUT, "/api/profile", json!({ "bio": "x" }), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, updated) = app
        .json(
            Method::PUT,
            "/api/profile",
            json!({ "bio": "Loves mysteries", "country": "us" }),
            Some(&cookie),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["bio"], "Loves mysteries");
    assert_eq!(updated["country"], "US");
    assert_eq!(updated["name"], "Reader");
    assert!(!contains_key(&updated, "password"));

    let (status, profile) = app.get("/api/profile", Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile, updated);

    let (status, _, body) = app
        .json(
            Method::PUT,
            "/api/profile",
            json!({ "country": "USA" }),
            Some(&cookie),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid country code");
}

fn multipart_request(cookie: &str, content_type: &str, payload: &[u8]) -> Request<Body> {
    multipart_field_request(cookie, "avatar", content_type, payload)
}

fn multipart_field_request(
    cookie: &str,
    field: &str,
    content_type: &str,
    payload: &[u8],
) -> Request<Body> {
    let boundary = "XLIBRARYBOUNDARY";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"a.bin\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(payload);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri("/api/profile/avatar")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .header(header::COOKIE, cookie)
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_avatar_upload() {
    let app = TestApp::new().await;
    app.register("a@x.com", "secret1").await;
    let cookie = app.login("a@x.com", "secret1").await;

    let (status, _, body) = app
        .send(multipart_request(&cookie, "image/png", b"\x89PNG"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["avatarUrl"], "data:image/png;base64,iVBORw==");

    let (_, profile) = app.get("/api/profile", Some(&cookie)).await;
    assert_eq!(profile["avatarUrl"], body["avatarUrl"]);

    let (status, _, body) = app
        .send(multipart_request(&cookie, "text/plain", b"hello"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Only image files are allowed");
}

#[tokio::test]
async fn test_avatar_size_limits() {
    const FIVE_MIB: usize = 5 * 1024 * 1024;

    let app = TestApp::new().await;
    app.register("a@x.com", "secret1").await;
    let cookie = app.login("a@x.com", "secret1").await;

    let (status, _, _) = app
        .send(multipart_request(&cookie, "image/png", &vec![7u8; FIVE_MIB]))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, body) = app
        .send(multipart_request(&cookie, "image/png", &vec![7u8; FIVE_MIB + 1]))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "File too large");

    // Beyond the request body limit the stream itself is cut off
    let (status, _, body) = app
        .send(multipart_request(&cookie, "image/png", &vec![7u8; 6 * 1024 * 1024]))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "File too large");
}

#[tokio::test]
async fn test_avatar_upload_without_file_field() {
    let app = TestApp::new().await;
    app.register("a@x.com", "secret1").await;
    let cookie = app.login("a@x.com", "secret1").await;

    let (status, _, body) = app
        .send(multipart_field_request(&cookie, "document", "image/png", b"\x89PNG"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No file uploaded");

    let (_, profile) = app.get("/api/profile", Some(&cookie)).await;
    assert_eq!(profile["avatarUrl"], Value::Null);
}

#[tokio::test]
async fn test_contact_submissions() {
    let app = TestApp::new().await;

    let form = json!({
        "email": "guest@x.com",
        "phone": "+91 98765 43210",
        "country": "IN",
        "bookId": "vol-1",
    });
    let (status, _, body) = app
        .json(Method::POST, "/api/contact", form.clone(), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Message sent successfully");
    assert!(body["id"].as_str().unwrap().parse::<Uuid>().is_ok());

    app.register("a@x.com", "secret1").await;
    let cookie = app.login("a@x.com", "secret1").await;
    let (status, _, _) = app
        .json(Method::POST, "/api/contact", form, Some(&cookie))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, unread) = app.get("/api/notifications", Some(&cookie)).await;
    let messages: Vec<_> = unread
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["message"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(messages.len(), 2);
    assert!(messages[1].starts_with("Your message has been received"));

    let (status, _, body) = app
        .json(
            Method::POST,
            "/api/contact",
            json!({ "email": "guest@x.com", "phone": "", "country": "IN" }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Phone number is required");
}

#[tokio::test]
async fn test_health_reports_backend() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "in-memory");
}
