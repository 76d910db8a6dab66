//! Transaction routes - dashboard page, filter, pagination
//!
//! Structure:
//! - page.rs: full page that mounts a view
//! - api.rs: HTMX endpoints operating on a mounted view
//! - render.rs: HTML fragments for each view state

pub mod api;
pub mod page;
pub mod render;

pub use api::{api_view_dispose, htmx_view, htmx_view_filter, htmx_view_next, htmx_view_previous};
pub use page::page_dashboard;
pub use render::render_view;
