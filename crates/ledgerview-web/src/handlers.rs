//! HTTP handlers for the report routes.
//!
//! Each handler validates its date parameters, asks the collaborators for
//! the report data through [`crate::views`], and renders a tera template.
//! An unparsable date renders the error view; nothing here propagates a
//! fault to the framework.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Html,
};
use tera::{Context, Tera};

use ledgerview_report::{period, PreferenceStore, ReportHelper, ReportQuery};

use crate::views;

/// The year/month the parameterless report routes fall back to.
const DEFAULT_YEAR: &str = "2014";
const DEFAULT_MONTH: &str = "1";

/// Shared application state.
pub struct AppState {
    /// Compiled templates.
    pub tera: Tera,
    /// Raw aggregation queries.
    pub query: Arc<dyn ReportQuery>,
    /// Derived report helpers.
    pub helper: Arc<dyn ReportHelper>,
    /// Per-user settings.
    pub preferences: Arc<dyn PreferenceStore>,
}

impl AppState {
    /// Whether shared accounts join the aggregates, read once per request.
    fn show_shared(&self) -> bool {
        self.preferences.get_bool("showSharedReports", false).data
    }
}

/// Context pre-filled with the values every report page shows.
fn base_context() -> Context {
    let mut context = Context::new();
    context.insert("title", "Reports");
    context.insert("main_title_icon", "fa-line-chart");
    context
}

fn render(state: &AppState, template: &str, context: &Context) -> Html<String> {
    match state.tera.render(template, context) {
        Ok(page) => Html(page),
        Err(e) => Html(format!("<h1>Template Error</h1><p>{e}</p>")),
    }
}

fn error_view(state: &AppState, message: &str) -> Html<String> {
    let mut context = base_context();
    context.insert("message", message);
    render(state, "error.html", &context)
}

/// The report navigation index.
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let view = views::index_view(state.query.as_ref(), state.helper.as_ref());

    let mut context = base_context();
    context.insert("months", &view.months);
    context.insert("years", &view.years);
    render(&state, "reports/index.html", &context)
}

/// The monthly report.
pub async fn month(
    State(state): State<Arc<AppState>>,
    Path((year, month)): Path<(String, String)>,
) -> Html<String> {
    month_report(&state, &year, &month)
}

/// The monthly report with default parameters.
pub async fn month_default(State(state): State<Arc<AppState>>) -> Html<String> {
    month_report(&state, DEFAULT_YEAR, DEFAULT_MONTH)
}

fn month_report(state: &AppState, year: &str, month: &str) -> Html<String> {
    let date = match period::parse_month(year, month) {
        Ok(date) => date,
        Err(e) => {
            tracing::warn!(year, month, error = %e, "rejected month report parameters");
            return error_view(state, "Invalid date.");
        }
    };
    let view = views::month_view(
        state.query.as_ref(),
        state.helper.as_ref(),
        date,
        state.show_shared(),
    );

    let mut context = base_context();
    context.insert("sub_title", &view.subtitle);
    context.insert("sub_title_icon", "fa-calendar");
    context.insert("display_sum", &true);
    context.insert("date", &date);
    context.insert("income", &view.income);
    context.insert("income_total", &view.income_total);
    context.insert("expenses", &view.expenses);
    context.insert("budgets", &view.budgets);
    context.insert("categories", &view.categories);
    context.insert("accounts", &view.accounts);
    render(state, "reports/month.html", &context)
}

/// The per-account budget report.
pub async fn budget(
    State(state): State<Arc<AppState>>,
    Path((year, month)): Path<(String, String)>,
) -> Html<String> {
    budget_report(&state, &year, &month)
}

/// The budget report with default parameters.
pub async fn budget_default(State(state): State<Arc<AppState>>) -> Html<String> {
    budget_report(&state, DEFAULT_YEAR, DEFAULT_MONTH)
}

fn budget_report(state: &AppState, year: &str, month: &str) -> Html<String> {
    let date = match period::parse_month(year, month) {
        Ok(date) => date,
        Err(e) => {
            tracing::warn!(year, month, error = %e, "rejected budget report parameters");
            return error_view(state, "Invalid date");
        }
    };
    let view = views::budget_view(
        state.query.as_ref(),
        state.helper.as_ref(),
        date,
        state.show_shared(),
    );

    let mut context = base_context();
    context.insert("sub_title", &view.subtitle);
    context.insert("sub_title_icon", "fa-calendar");
    context.insert("year", year);
    context.insert("month", month);
    context.insert("date", &view.date);
    context.insert("day_early", &view.day_early);
    context.insert("accounts", &view.accounts);
    context.insert("budgets", &view.budgets);
    render(state, "reports/budget.html", &context)
}

/// The yearly report.
pub async fn year(
    State(state): State<Arc<AppState>>,
    Path(year): Path<String>,
) -> Html<String> {
    let date = match period::parse_year(&year) {
        Ok(date) => date,
        Err(e) => {
            tracing::warn!(year, error = %e, "rejected year report parameter");
            return error_view(&state, "Invalid date.");
        }
    };
    let view = views::year_view(
        state.query.as_ref(),
        state.helper.as_ref(),
        date,
        state.show_shared(),
    );

    let mut context = base_context();
    context.insert("sub_title", &year);
    context.insert("sub_title_icon", "fa-bar-chart");
    context.insert("date", &date);
    context.insert("year", &view.year);
    context.insert("balances", &view.balances);
    context.insert("grouped_incomes", &view.grouped_incomes);
    context.insert("grouped_expenses", &view.grouped_expenses);
    render(&state, "reports/year.html", &context)
}

/// Modal list of an account's reconciled transfers.
pub async fn modal_balanced_transfers(
    State(state): State<Arc<AppState>>,
    Path((account, year, month)): Path<(i64, String, String)>,
) -> Html<String> {
    match period::parse_month(&year, &month) {
        Ok(date) => {
            let journals = views::balanced_transfers_list(state.query.as_ref(), account, date);
            render_journal_list(&state, &journals)
        }
        Err(e) => {
            tracing::warn!(account, year, month, error = %e, "rejected modal parameters");
            error_view(&state, "Invalid date")
        }
    }
}

/// Modal list of an account's journals without a budget.
pub async fn modal_no_budget(
    State(state): State<Arc<AppState>>,
    Path((account, year, month)): Path<(i64, String, String)>,
) -> Html<String> {
    match period::parse_month(&year, &month) {
        Ok(date) => {
            let journals = views::no_budget_list(state.query.as_ref(), account, date);
            render_journal_list(&state, &journals)
        }
        Err(e) => {
            tracing::warn!(account, year, month, error = %e, "rejected modal parameters");
            error_view(&state, "Invalid date")
        }
    }
}

/// Modal list of an account's journals without a budget and without a
/// balance relation.
pub async fn modal_left_unbalanced(
    State(state): State<Arc<AppState>>,
    Path((account, year, month)): Path<(i64, String, String)>,
) -> Html<String> {
    match period::parse_month(&year, &month) {
        Ok(date) => {
            let journals = views::left_unbalanced_list(state.query.as_ref(), account, date);
            render_journal_list(&state, &journals)
        }
        Err(e) => {
            tracing::warn!(account, year, month, error = %e, "rejected modal parameters");
            error_view(&state, "Invalid date")
        }
    }
}

fn render_journal_list(state: &AppState, journals: &[crate::models::JournalLine]) -> Html<String> {
    let mut context = Context::new();
    context.insert("journals", journals);
    render(state, "reports/modal_journal_list.html", &context)
}
