//! View endpoints - HTMX partial responses for a mounted view
//!
//! Endpoints:
//! - htmx_view: current state of the view (polled while loading)
//! - htmx_view_filter: change the type filter
//! - htmx_view_next / htmx_view_previous: move between pages
//! - api_view_dispose: unmount the view

use crate::{ApiError, AppState};
use axum::extract::{Form, Path};
use axum::http::StatusCode;
use axum::response::Html;
use finboard_core::{MountedView, TypeFilter};
use serde::Deserialize;
use std::sync::Arc;

use super::render::render_view;

#[derive(Debug, Deserialize)]
pub struct FilterForm {
    #[serde(rename = "type", default)]
    pub transaction_type: String,
}

async fn render(state: &AppState, mounted: &MountedView) -> Html<String> {
    let view = mounted.read().await;
    Html(render_view(&mounted.id(), &view, &state.config.display))
}

async fn lookup(state: &AppState, id: &str) -> Result<Arc<MountedView>, ApiError> {
    Ok(state.registry.get_by_str(id).await?)
}

/// HTMX: current view fragment
pub async fn htmx_view(
    state: axum::extract::State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, ApiError> {
    let mounted = lookup(&state, &id).await?;
    Ok(render(&state, &mounted).await)
}

/// HTMX: apply a type filter and return to page 1
pub async fn htmx_view_filter(
    state: axum::extract::State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<FilterForm>,
) -> Result<Html<String>, ApiError> {
    let filter: TypeFilter = form.transaction_type.parse()?;
    let mounted = lookup(&state, &id).await?;
    mounted.write().await.set_filter(filter);
    log::debug!("View {} filter set to {}", id, filter);
    Ok(render(&state, &mounted).await)
}

/// HTMX: next page, a no-op on the last page
pub async fn htmx_view_next(
    state: axum::extract::State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, ApiError> {
    let mounted = lookup(&state, &id).await?;
    mounted.write().await.next_page();
    Ok(render(&state, &mounted).await)
}

/// HTMX: previous page, a no-op on page 1
pub async fn htmx_view_previous(
    state: axum::extract::State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, ApiError> {
    let mounted = lookup(&state, &id).await?;
    mounted.write().await.previous_page();
    Ok(render(&state, &mounted).await)
}

/// Unmount a view; unknown ids are accepted
pub async fn api_view_dispose(
    state: axum::extract::State<AppState>,
    Path(id): Path<String>,
) -> StatusCode {
    if let Ok(view_id) = id.parse() {
        state.registry.dispose(&view_id).await;
    }
    StatusCode::NO_CONTENT
}
