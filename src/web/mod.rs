//! The café web page
//!
//! One HTML page listing the menu, optionally filtered by category, plus
//! the stylesheet. The menu is validated before the listener binds.

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::menu::{Category, Menu};
use axum::Router;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use minijinja::{Environment, context};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Page template shipped with the app
pub const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");

/// Stylesheet shipped with the app
pub const STYLESHEET: &str = include_str!("../../static/styles.css");

const INDEX_NAME: &str = "index.html";
const NOT_FOUND_NAME: &str = "not_found.html";

const NOT_FOUND_TEMPLATE: &str =
    "<h1>Unknown category</h1><p>No category named '{{ category }}'.</p>";

/// Build a template environment holding `source` as the index page
pub fn template_env(source: &str) -> Result<Environment<'_>> {
    let mut env = Environment::new();
    env.add_template(INDEX_NAME, source)?;
    env.add_template(NOT_FOUND_NAME, NOT_FOUND_TEMPLATE)?;
    Ok(env)
}

/// Render the index page, optionally restricted to `selected`
pub fn render_index(env: &Environment<'_>, menu: &Menu, selected: Option<Category>) -> Result<String> {
    let items = match selected {
        Some(category) => menu.filtered(category),
        None => menu.sorted(),
    };
    let template = env.get_template(INDEX_NAME)?;
    let html = template.render(context! {
        categories => menu.categories(),
        selected => selected,
        items => items,
        item_count => menu.len(),
        average_price => menu.average_price(),
    })?;
    Ok(html)
}

/// Shared state for handlers
#[derive(Clone)]
pub struct AppState {
    menu: Arc<Menu>,
    templates: Arc<Environment<'static>>,
}

impl AppState {
    /// State serving `menu` with the shipped template
    pub fn new(menu: Menu) -> Result<Self> {
        Ok(Self {
            menu: Arc::new(menu),
            templates: Arc::new(template_env(INDEX_TEMPLATE)?),
        })
    }

    /// Menu being served
    pub fn menu(&self) -> &Menu {
        &self.menu
    }
}

#[derive(Debug, Deserialize)]
struct IndexQuery {
    category: Option<String>,
}

async fn index(State(state): State<AppState>, Query(query): Query<IndexQuery>) -> Response {
    let selected = match query.category.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => match raw.parse::<Category>() {
            Ok(category) => Some(category),
            Err(_) => return not_found(&state.templates, raw),
        },
    };

    match render_index(&state.templates, &state.menu, selected) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!(error = %e, "failed to render index");
            (StatusCode::INTERNAL_SERVER_ERROR, "template error").into_response()
        }
    }
}

async fn stylesheet() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLESHEET)
}

fn not_found(env: &Environment<'_>, category: &str) -> Response {
    let rendered = env
        .get_template(NOT_FOUND_NAME)
        .and_then(|t| t.render(context! { category => category }));
    match rendered {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(e) => {
            error!(error = %e, "failed to render not-found page");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

/// Routes for the café
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/static/styles.css", get(stylesheet))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Validate the menu, bind and serve until Ctrl-C
///
/// An invalid menu is returned as an error before anything listens.
pub async fn serve(settings: &Settings) -> Result<()> {
    let menu = Menu::load()?;
    let addr: SocketAddr = settings
        .server
        .bind
        .parse()
        .map_err(|e| Error::Config(format!("invalid bind address '{}': {e}", settings.server.bind)))?;

    let app = router(AppState::new(menu)?);
    let listener = TcpListener::bind(addr).await?;
    info!(address = %addr, "Starting HTTP server on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Error while waiting for shutdown signal: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn get_page(uri: &str) -> (StatusCode, String) {
        let app = router(AppState::new(Menu::load().unwrap()).unwrap());
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_index_lists_menu_in_order() {
        let (status, body) = get_page("/").await;
        assert_eq!(status, StatusCode::OK);
        let drip = body.find("Drip Coffee").unwrap();
        let tea = body.find("Green Tea").unwrap();
        assert!(drip < tea);
        assert!(body.contains("$3.50"));
        assert!(body.contains("2 items"));
    }

    #[tokio::test]
    async fn test_category_filter() {
        let (status, body) = get_page("/?category=tea").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Green Tea"));
        assert!(!body.contains("Drip Coffee"));
    }

    #[tokio::test]
    async fn test_unknown_category_is_not_found() {
        let (status, body) = get_page("/?category=%3Cjuice%3E").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("&lt;juice&gt;"));
        assert!(!body.contains("<juice>"));
    }

    #[tokio::test]
    async fn test_index_has_category_headings() {
        let (_, body) = get_page("/").await;
        assert_eq!(body.matches("class=\"category-heading\"").count(), 2);
        let coffee = body.find(">Coffee</h3>").unwrap();
        let tea = body.find(">Tea</h3>").unwrap();
        assert!(coffee < body.find("Drip Coffee").unwrap());
        assert!(tea < body.find("Green Tea").unwrap());
        assert!(coffee < tea);

        let (_, body) = get_page("/?category=tea").await;
        assert_eq!(body.matches("class=\"category-heading\"").count(), 1);
    }

    #[tokio::test]
    async fn test_stylesheet_served() {
        let (status, body) = get_page("/static/styles.css").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(".menu-grid"));
    }

    #[test]
    fn test_render_empty_category() {
        let env = template_env(INDEX_TEMPLATE).unwrap();
        let menu = Menu::load().unwrap();
        let html = render_index(&env, &menu, Some(Category::Other)).unwrap();
        assert!(html.contains("Nothing on the menu here yet."));
    }
}
