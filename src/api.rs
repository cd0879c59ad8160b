use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, Redirect},
    routing::get,
    Form, Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{config::Config, session::SessionStore};

pub const SESSION_COOKIE: &str = "session_id";

// Single hardcoded user; there is no account store.
const USERNAME: &str = "admin";
const PASSWORD: &str = "admin";

const LOGIN_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Login</title>
  <style>
    body { font-family: sans-serif; display: flex; justify-content: center; align-items: center; height: 100vh; background: #f0f2f5; }
    .card { background: white; padding: 2rem; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
    input { display: block; margin: 10px 0; padding: 8px; width: 100%; box-sizing: border-box; }
    button { width: 100%; padding: 10px; background: #007bff; color: white; border: none; border-radius: 4px; cursor: pointer; }
    button:hover { background: #0056b3; }
  </style>
</head>
<body>
  <div class="card">
    <h2>Login to Service</h2>
    <form method="POST" action="/login">
      <input type="text" name="username" placeholder="Username (admin)" required />
      <input type="password" name="password" placeholder="Password (admin)" required />
      <button type="submit">Login</button>
    </form>
  </div>
</body>
</html>
"#;

const INVALID_CREDENTIALS_PAGE: &str =
    "Invalid credentials. <a href='/login'>Try again</a>";

#[derive(Clone)]
pub struct AppContext {
    pub sessions: SessionStore,
    pub config: Config,
}

#[derive(Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
}

pub fn create_api_router(context: AppContext) -> Router {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/auth", get(check_auth))
        .route("/logout", get(logout))
        .route("/health", get(health_check))
        .fallback(not_found)
        .with_state(context)
}

async fn login_page() -> Html<&'static str> {
    Html(LOGIN_PAGE)
}

async fn login(
    State(context): State<AppContext>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<(CookieJar, Redirect), (StatusCode, Html<&'static str>)> {
    if form.username != USERNAME || form.password != PASSWORD {
        tracing::info!("Rejected login for user '{}'", form.username);
        return Err((StatusCode::UNAUTHORIZED, Html(INVALID_CREDENTIALS_PAGE)));
    }

    let session = context.sessions.issue().await;

    tracing::info!(
        "Issued session {}",
        session.id.chars().take(8).collect::<String>()
    );

    let cookie = Cookie::build((SESSION_COOKIE, session.id))
        .path("/")
        .http_only(true)
        .max_age(time::Duration::seconds(context.config.session.ttl_secs))
        .build();

    Ok((jar.add(cookie), Redirect::to("/")))
}

async fn check_auth(
    State(context): State<AppContext>,
    jar: CookieJar,
) -> (StatusCode, &'static str) {
    let authorized = match jar.get(SESSION_COOKIE) {
        Some(cookie) => context.sessions.verify(cookie.value()).await,
        None => false,
    };

    if authorized {
        (StatusCode::OK, "Authorized")
    } else {
        (StatusCode::UNAUTHORIZED, "Unauthorized")
    }
}

async fn logout(
    State(context): State<AppContext>,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        context.sessions.revoke(cookie.value()).await;

        tracing::info!(
            "Revoked session {}",
            cookie.value().chars().take(8).collect::<String>()
        );
    }

    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/").build());

    (jar, Redirect::to("/login"))
}

async fn health_check(State(context): State<AppContext>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "active_sessions": context.sessions.session_count().await,
        "timestamp": chrono::Utc::now()
    }))
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found")
}
