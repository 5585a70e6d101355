//! HTTP API server with HTMX admin pages
//!
//! Routes are organized into modules:
//! - routes::accounts: Account JSON API, account list and edit pages
//! - routes::payments: Payment JSON API, payment list and status control
//!
//! The JSON API lives at the root (`/accounts`, `/payments`), the admin
//! pages under `/admin`.

pub mod error;
pub mod routes;

use axum::{
    http::Uri,
    response::Redirect,
    routing::{get, patch},
    Router,
};
use paydesk_config::Config;
use paydesk_core::{AccountService, DatabaseConnection, PaymentService};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

pub use error::{ApiError, ApiResult};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountService,
    pub payments: PaymentService,
    pub config: Config,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        Self {
            accounts: AccountService::new(db.clone()),
            payments: PaymentService::new(db),
            config,
        }
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::accounts::{
        api_account_create, api_account_get, api_account_update, api_accounts_list,
        htmx_account_create_form, htmx_account_store, htmx_account_update, htmx_accounts_table,
        page_account_detail, page_accounts,
    };
    use routes::payments::{
        api_payment_create, api_payment_get, api_payment_update, api_payments_list,
        htmx_payment_create_form, htmx_payment_status, htmx_payment_store, htmx_payments_table,
        page_payments,
    };

    Router::new()
        // JSON API
        .route("/health", get(health_check))
        .route("/accounts", get(api_accounts_list).post(api_account_create))
        .route("/accounts/:id", get(api_account_get).patch(api_account_update))
        .route("/payments", get(api_payments_list))
        // POST takes the owning account id in the same path slot
        .route(
            "/payments/:id",
            get(api_payment_get)
                .patch(api_payment_update)
                .post(api_payment_create),
        )
        // Admin pages
        .route("/admin", get(admin_index))
        .route("/admin/accounts", get(page_accounts).post(htmx_account_store))
        .route("/admin/accounts/table", get(htmx_accounts_table))
        .route("/admin/accounts/new", get(htmx_account_create_form))
        .route(
            "/admin/accounts/:id",
            get(page_account_detail).post(htmx_account_update),
        )
        .route("/admin/payments", get(page_payments).post(htmx_payment_store))
        .route("/admin/payments/table", get(htmx_payments_table))
        .route("/admin/payments/new", get(htmx_payment_create_form))
        .route("/admin/payments/:id/status", patch(htmx_payment_status))
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

async fn admin_index() -> Redirect {
    Redirect::to("/admin/accounts")
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound {
        resource: uri.path().to_string(),
    }
}

// ==================== Template Functions ====================

/// Base HTML template with the snackbar and modal slots
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Paydesk</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
    <div id="modal"></div>
    <div id="snackbar" class="hidden fixed bottom-6 left-1/2 -translate-x-1/2 bg-gray-800 text-white px-4 py-3 rounded-lg shadow-lg z-50"></div>
    <script>
    var snackbarTimer = null;
    function showSnackbar(message) {{
        var bar = document.getElementById('snackbar');
        bar.textContent = message;
        bar.classList.remove('hidden');
        if (snackbarTimer) clearTimeout(snackbarTimer);
        snackbarTimer = setTimeout(function () {{ bar.classList.add('hidden'); }}, 4000);
    }}
    function closeModal() {{
        document.getElementById('modal').innerHTML = '';
    }}
    document.body.addEventListener('notify', function (evt) {{
        showSnackbar(evt.detail.value);
    }});
    </script>
</body>
</html>"#,
        title, content
    )
}

/// Navigation sidebar
pub fn nav_sidebar(current_path: &str) -> String {
    let links = [
        ("/admin/accounts", "Accounts", "👤"),
        ("/admin/payments", "Payments", "💸"),
    ];

    let mut nav = String::from("<div class='bg-white border-r h-screen flex flex-col'><div class='p-4 border-b'><h1 class='text-xl font-bold text-indigo-600'>Paydesk</h1></div><ul class='flex-1 py-2 space-y-1 px-2'>");

    for (path, label, icon) in &links {
        let active_class = if current_path.starts_with(path) {
            "bg-indigo-50 text-indigo-600"
        } else {
            "text-gray-600 hover:bg-gray-50"
        };
        nav.push_str(&format!(
            r#"<li><a href='{}' class='flex items-center gap-2 px-3 py-2 rounded-lg {}'>{}<span>{}</span></a></li>"#,
            path, active_class, icon, label
        ));
    }
    nav.push_str("</ul></div>");
    nav
}

fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("HX-Request").is_some()
}

/// Full page for normal navigation, content area only for HTMX requests
pub fn page_response(
    headers: &axum::http::HeaderMap,
    title: &str,
    current_path: &str,
    inner_content: &str,
) -> String {
    if is_htmx_request(headers) {
        format!(
            r#"<main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>"#,
            inner_content
        )
    } else {
        base_html(
            title,
            &format!(
                r#"<div class='flex flex-col h-screen'>
    <div class='flex flex-1 overflow-hidden'>
        <aside class='w-64 flex-shrink-0'>{}</aside>
        <main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>
    </div>
</div>"#,
                nav_sidebar(current_path),
                inner_content
            ),
        )
    }
}

/// Bind and serve until the listener fails
pub async fn start_server(config: Config, db: DatabaseConnection) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(db, config);
    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting Paydesk server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - /admin/accounts (Account management)");
    log::info!("  - /admin/payments (Payment management)");
    log::info!("  - /accounts, /payments (JSON API)");
    log::info!("  - /health");

    axum::serve(listener, router).await?;
    log::info!("Server stopped");
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use paydesk_config::DatabaseConfig;
    use tower::ServiceExt;

    pub async fn state() -> AppState {
        let db = paydesk_core::db::open(&DatabaseConfig::in_memory())
            .await
            .unwrap();
        AppState::new(db, Config::default())
    }

    pub async fn send(
        state: &AppState,
        method: &str,
        uri: &str,
        content_type: Option<&str>,
        body: &str,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        create_router(state.clone())
            .oneshot(builder.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap()
    }

    pub async fn json(state: &AppState, method: &str, uri: &str, body: &str) -> Response {
        send(state, method, uri, Some("application/json"), body).await
    }

    pub async fn form(state: &AppState, method: &str, uri: &str, body: &str) -> Response {
        send(
            state,
            method,
            uri,
            Some("application/x-www-form-urlencoded"),
            body,
        )
        .await
    }

    pub async fn get(state: &AppState, uri: &str) -> Response {
        send(state, "GET", uri, None, "").await
    }

    pub async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    pub async fn body_json(response: Response) -> serde_json::Value {
        serde_json::from_str(&body_text(response).await).unwrap()
    }

    pub fn trigger(response: &Response) -> Option<serde_json::Value> {
        response
            .headers()
            .get("HX-Trigger")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| serde_json::from_str(v).ok())
    }

    pub async fn expect_status(response: Response, status: StatusCode) -> serde_json::Value {
        assert_eq!(response.status(), status);
        body_json(response).await
    }
}
