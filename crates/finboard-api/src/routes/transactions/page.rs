//! Dashboard page
//!
//! Each request mounts a fresh view; the page disposes it again on `pagehide`.

use crate::{page_response, AppState};
use finboard_core::ViewId;
use finboard_utils::escape_html;

use super::render::render_view;

/// Dashboard page - mounts a view and renders its first state
pub async fn page_dashboard(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let mounted = state.registry.mount().await;
    let view_html = {
        let view = mounted.read().await;
        render_view(&mounted.id(), &view, &state.config.display)
    };

    let title = escape_html(&state.config.display.title);
    let inner_content = format!(
        r#"<div class='container mx-auto px-4 py-8'>
    <h1 class='text-3xl font-bold mb-8'>{}</h1>
    {}
</div>
{}"#,
        title,
        view_html,
        dispose_script(&mounted.id())
    );

    axum::response::Html(page_response(&headers, &title, &inner_content))
}

/// Unmount the view when the page is discarded. A page kept in the
/// back/forward cache keeps its view so Back restores a working table.
fn dispose_script(id: &ViewId) -> String {
    format!(
        r#"<script>
    window.addEventListener('pagehide', function (event) {{
        if (!event.persisted) {{
            navigator.sendBeacon('/views/{}/dispose');
        }}
    }});
</script>"#,
        id
    )
}
