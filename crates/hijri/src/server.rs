use crate::prelude::{eprintln, *};
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderName, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use hijri_core::calendar::{CalendarConverter, Numerals, UmmAlQuraConverter};
use hijri_core::handler::handle_body;
use std::sync::Arc;
use tower_http::set_header::SetResponseHeaderLayer;

#[derive(Debug, clap::Parser)]
#[command(name = "serve")]
#[command(about = "Start the conversion HTTP server")]
pub struct App {
    /// Port to listen on
    #[arg(short, long, env = "HIJRI_PORT", default_value = "8080")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "HIJRI_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Route the converter answers on
    #[arg(long, env = "HIJRI_PATH", default_value = "/")]
    pub path: String,

    /// Digit set for the Hijri dates ("latin" or "arabic-indic")
    #[arg(long, env = "HIJRI_NUMERALS", default_value = "latin")]
    pub numerals: Numerals,
}

#[derive(Clone)]
struct AppState {
    converter: Arc<dyn CalendarConverter>,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let addr = format!("{}:{}", app.host, app.port);
    let path = route_path(&app.path);
    let converter = Arc::new(UmmAlQuraConverter::new(app.numerals));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Bind {
            addr: addr.clone(),
            reason: e.to_string(),
        })?;

    log::info!("Hijri converter listening on http://{addr}{path}");
    log::debug!("Rendering digits as {}", app.numerals);

    if global.verbose {
        eprintln!("Conversion endpoint: http://{addr}{path}");
    }

    axum::serve(listener, router(&path, converter))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::Server(e.to_string()))?;

    log::info!("Server stopped");

    Ok(())
}

/// Build the router serving the converter on `path`
///
/// The fixed JSON and CORS headers are applied to every response, including
/// pre-flight requests and unknown routes.
pub fn router(path: &str, converter: Arc<dyn CalendarConverter>) -> Router {
    Router::new()
        .route(path, any(convert_handler))
        .fallback(not_found)
        .with_state(AppState { converter })
        .layer(fixed_header(header::CONTENT_TYPE, "application/json"))
        .layer(fixed_header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .layer(fixed_header(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            "POST, GET, OPTIONS",
        ))
        .layer(fixed_header(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            "Content-Type",
        ))
}

fn fixed_header(name: HeaderName, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(name, HeaderValue::from_static(value))
}

/// Routes must start with a slash
fn route_path(path: &str) -> String {
    let path = path.trim();
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

async fn convert_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    if method == Method::OPTIONS {
        log::debug!("{method} {uri} -> 200 (pre-flight)");
        return StatusCode::OK.into_response();
    }

    let reply = handle_body(&body, state.converter.as_ref());
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::BAD_REQUEST);

    log::info!("{method} {uri} -> {}", status.as_u16());

    match reply.body.to_pretty_json() {
        Ok(json) => (status, json).into_response(),
        Err(e) => {
            log::error!("{}", Error::Render(e));
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn not_found(method: Method, uri: Uri) -> StatusCode {
    log::info!("{method} {uri} -> 404");
    StatusCode::NOT_FOUND
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => log::info!("Shutdown signal received"),
        Err(e) => {
            log::error!("Failed to listen for the shutdown signal: {e}");
            std::future::pending::<()>().await;
        }
    }
}
