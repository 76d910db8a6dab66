//! HTML rendering of the transaction list view
//!
//! `render_view` dispatches on the load state. Every fragment is wrapped in
//! `#transactions-view` so HTMX can swap it with `outerHTML`.

use finboard_config::DisplayConfig;
use finboard_core::{LoadState, PageView, TransactionListView, TypeFilter, ViewId};
use finboard_utils::{escape_html, format_currency, format_display_date};

/// DOM id every fragment is wrapped in
pub const VIEW_TARGET: &str = "transactions-view";

const COLUMN_COUNT: usize = 5;

/// Render whichever of loading / error / table the view is in
pub fn render_view(id: &ViewId, view: &TransactionListView, display: &DisplayConfig) -> String {
    match view.state() {
        LoadState::Loading => render_loading(id),
        LoadState::Failed(message) => render_error(message),
        LoadState::Loaded(_) => render_table(id, view, display),
    }
}

/// Loading indicator that re-requests the view until the fetch settles
pub fn render_loading(id: &ViewId) -> String {
    format!(
        r#"<div id='{}' hx-get='/views/{}' hx-trigger='load delay:300ms' hx-swap='outerHTML'>
    <div class='text-gray-700 mt-8'>Loading transactions...</div>
</div>"#,
        VIEW_TARGET, id
    )
}

pub fn render_error(message: &str) -> String {
    format!(
        r#"<div id='{}'><div class='text-red-500 mt-8'>Error: {}</div></div>"#,
        VIEW_TARGET,
        escape_html(message)
    )
}

fn render_table(id: &ViewId, view: &TransactionListView, display: &DisplayConfig) -> String {
    let page = view.page();

    let body = if page.rows.is_empty() {
        format!(
            "<tr><td colspan='{}' class='px-6 py-4 text-center text-gray-500'>No transactions found.</td></tr>",
            COLUMN_COUNT
        )
    } else {
        page.rows
            .iter()
            .enumerate()
            .map(|(index, tx)| {
                let shade = if index % 2 == 0 { "bg-gray-50" } else { "bg-white" };
                let badge = if tx.is_credit() {
                    "bg-green-100 text-green-800"
                } else {
                    "bg-red-100 text-red-800"
                };
                format!(
                    r#"<tr class='{}'>
                <td class='px-6 py-4 whitespace-nowrap text-center text-sm text-gray-500'>{}</td>
                <td class='px-6 py-4 whitespace-nowrap text-center'><span class='px-2 inline-flex justify-center text-center text-xs leading-5 font-semibold rounded-full {}'>{}</span></td>
                <td class='px-6 py-4 whitespace-nowrap text-center text-sm text-gray-500'>{}</td>
                <td class='px-6 py-4 whitespace-nowrap text-left text-sm font-medium text-gray-900'>{}</td>
                <td class='px-6 py-4 whitespace-nowrap text-center text-sm text-gray-900'>{}</td>
            </tr>"#,
                    shade,
                    escape_html(&format_display_date(&tx.date, &display.date_format)),
                    badge,
                    tx.transaction_type,
                    escape_html(&tx.category_rel.name),
                    escape_html(&tx.description),
                    escape_html(&format_currency(&tx.amount, &display.currency_symbol)),
                )
            })
            .collect()
    };

    format!(
        r#"<div id='{target}' class='bg-white shadow overflow-hidden sm:rounded-lg mt-8'>
    <div class='px-4 py-5 sm:px-6 flex justify-between items-center'>
        <h3 class='text-lg leading-6 font-medium text-gray-900'>Recent Transactions</h3>
        <div class='flex items-center gap-2'>
            <label for='type-filter' class='text-sm font-medium text-gray-700'>Filter by type:</label>
            <select id='type-filter' name='type' hx-post='/views/{id}/filter' hx-trigger='change' hx-target='#{target}' hx-swap='outerHTML'
                class='border border-gray-300 rounded-md px-3 py-1 text-sm focus:outline-none focus:ring-2 focus:ring-blue-500'>
                {options}
            </select>
        </div>
    </div>
    <div class='border-t border-gray-200'>
        <table class='min-w-full divide-y divide-gray-200'>
            <thead class='bg-gray-50'>
                <tr>
                    <th scope='col' class='px-6 py-3 text-center text-xs font-medium text-gray-500 uppercase tracking-wider w-[15%]'>Date</th>
                    <th scope='col' class='px-6 py-3 text-center text-xs font-medium text-gray-500 uppercase tracking-wider w-[10%]'>Type</th>
                    <th scope='col' class='px-6 py-3 text-center text-xs font-medium text-gray-500 uppercase tracking-wider w-[20%]'>Category</th>
                    <th scope='col' class='px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase tracking-wider w-[35%]'>Description</th>
                    <th scope='col' class='px-6 py-3 text-center text-xs font-medium text-gray-500 uppercase tracking-wider w-[20%]'>Amount</th>
                </tr>
            </thead>
            <tbody class='bg-white divide-y divide-gray-200'>
            {body}
            </tbody>
        </table>
    </div>
    {pagination}
</div>"#,
        target = VIEW_TARGET,
        id = id,
        options = render_filter_options(view.filter()),
        body = body,
        pagination = render_pagination(id, &page),
    )
}

fn render_filter_options(selected: TypeFilter) -> String {
    TypeFilter::ALL
        .iter()
        .map(|filter| {
            format!(
                "<option value='{}'{}>{}</option>",
                filter,
                if *filter == selected { " selected" } else { "" },
                filter.label()
            )
        })
        .collect()
}

/// Pagination bar; empty unless there is more than one page
fn render_pagination(id: &ViewId, page: &PageView<'_>) -> String {
    if !page.show_pagination() {
        return String::new();
    }

    format!(
        r#"<div class='px-4 py-3 bg-gray-50 border-t border-gray-200 sm:px-6 flex items-center justify-between'>
        <div class='text-sm text-gray-700'>Page {} of {} ({} transactions)</div>
        <div class='flex gap-2'>
            {}
            {}
        </div>
    </div>"#,
        page.current_page,
        page.total_pages,
        page.filtered_count,
        page_button(id, "previous", "Previous", page.has_previous()),
        page_button(id, "next", "Next", page.has_next()),
    )
}

fn page_button(id: &ViewId, action: &str, label: &str, enabled: bool) -> String {
    let (class, disabled) = if enabled {
        ("bg-blue-500 text-white hover:bg-blue-600", "")
    } else {
        ("bg-gray-200 text-gray-400 cursor-not-allowed", " disabled")
    };
    format!(
        r#"<button hx-post='/views/{}/{}' hx-target='#{}' hx-swap='outerHTML' class='px-3 py-1 rounded text-sm font-medium {}'{}>{}</button>"#,
        id, action, VIEW_TARGET, class, disabled, label
    )
}
