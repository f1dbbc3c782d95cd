//! Web report server for ledgerview
//!
//! A read-only axum application over a personal-finance dataset: a report
//! navigation index, monthly/budget/yearly report pages, and three modal
//! journal-list partials. The heavy lifting lives behind the
//! [`ledgerview_report`] collaborator traits; this crate validates route
//! parameters, assembles view models and renders tera templates.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod handlers;
pub mod models;
pub mod views;

use std::sync::Arc;

use axum::{response::Redirect, routing::get, Router};
use tera::Tera;
use tower_http::trace::TraceLayer;

pub use handlers::AppState;

/// Load the tera templates.
///
/// Uses `CARGO_MANIFEST_DIR` to find templates relative to the crate, with
/// fallbacks for running from the workspace root.
pub fn load_templates() -> tera::Result<Tera> {
    let template_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*");
    let mut tera = Tera::new(template_dir)
        .or_else(|_| Tera::new("templates/**/*"))
        .or_else(|_| Tera::new("crates/ledgerview-web/templates/**/*"))?;
    tera.autoescape_on(vec![".html"]);
    Ok(tera)
}

/// Build the report router over the given state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::permanent("/reports") }))
        .route("/reports", get(handlers::index))
        .route("/reports/month", get(handlers::month_default))
        .route("/reports/month/:year/:month", get(handlers::month))
        .route("/reports/budget", get(handlers::budget_default))
        .route("/reports/budget/:year/:month", get(handlers::budget))
        .route("/reports/year/:year", get(handlers::year))
        .route(
            "/reports/modal/balanced-transfers/:account/:year/:month",
            get(handlers::modal_balanced_transfers),
        )
        .route(
            "/reports/modal/no-budget/:account/:year/:month",
            get(handlers::modal_no_budget),
        )
        .route(
            "/reports/modal/left-unbalanced/:account/:year/:month",
            get(handlers::modal_left_unbalanced),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
