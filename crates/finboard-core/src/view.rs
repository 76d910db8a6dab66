//! Transaction list view: load state, type filter and pagination
//!
//! The view owns the fetched transactions and derives everything shown on
//! screen from them on demand. Filtering and paging only move `filter` and
//! `current_page`; the fetched sequence is never reordered or trimmed.

use finboard_client::{ClientError, Transaction, TransactionType};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Rows per page
pub const PAGE_SIZE: usize = 10;

/// Type filter applied before pagination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    Credit,
    Debit,
}

impl TypeFilter {
    pub const ALL: [TypeFilter; 3] = [TypeFilter::All, TypeFilter::Credit, TypeFilter::Debit];

    pub fn matches(&self, transaction: &Transaction) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Credit => transaction.transaction_type == TransactionType::Credit,
            TypeFilter::Debit => transaction.transaction_type == TransactionType::Debit,
        }
    }

    /// Option label in the filter select
    pub fn label(&self) -> &'static str {
        match self {
            TypeFilter::All => "All",
            TypeFilter::Credit => "Credit",
            TypeFilter::Debit => "Debit",
        }
    }
}

impl std::str::FromStr for TypeFilter {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(TypeFilter::All),
            "credit" => Ok(TypeFilter::Credit),
            "debit" => Ok(TypeFilter::Debit),
            _ => Err(CoreError::InvalidFilter { value: s.to_string() }),
        }
    }
}

impl std::fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeFilter::All => write!(f, "all"),
            TypeFilter::Credit => write!(f, "credit"),
            TypeFilter::Debit => write!(f, "debit"),
        }
    }
}

/// Outcome of the view's single fetch
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Failed(String),
    Loaded(Vec<Transaction>),
}

/// One page of the filtered list plus what the pagination bar needs
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<'a> {
    pub rows: Vec<&'a Transaction>,
    pub current_page: usize,
    pub total_pages: usize,
    /// Number of transactions passing the filter
    pub filtered_count: usize,
}

impl PageView<'_> {
    pub fn show_pagination(&self) -> bool {
        self.total_pages > 1
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionListView {
    state: LoadState,
    filter: TypeFilter,
    current_page: usize,
}

impl Default for TransactionListView {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionListView {
    /// A freshly mounted view: loading, unfiltered, first page
    pub fn new() -> Self {
        Self {
            state: LoadState::Loading,
            filter: TypeFilter::All,
            current_page: 1,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn filter(&self) -> TypeFilter {
        self.filter
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Settle the fetch. Only the first settle counts; returns whether it was applied.
    pub fn complete(&mut self, result: Result<Vec<Transaction>, ClientError>) -> bool {
        if !self.is_loading() {
            return false;
        }
        self.state = match result {
            Ok(transactions) => LoadState::Loaded(transactions),
            Err(e) => LoadState::Failed(e.to_string()),
        };
        true
    }

    /// Fetched transactions in received order; empty until loaded
    pub fn transactions(&self) -> &[Transaction] {
        match &self.state {
            LoadState::Loaded(transactions) => transactions,
            _ => &[],
        }
    }

    pub fn filtered(&self) -> Vec<&Transaction> {
        self.transactions()
            .iter()
            .filter(|t| self.filter.matches(t))
            .collect()
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered().len())
    }

    /// Transactions on the current page
    pub fn visible(&self) -> Vec<&Transaction> {
        self.page().rows
    }

    pub fn page(&self) -> PageView<'_> {
        let filtered = self.filtered();
        let filtered_count = filtered.len();
        let start = ((self.current_page - 1) * PAGE_SIZE).min(filtered_count);
        let end = (start + PAGE_SIZE).min(filtered_count);

        PageView {
            rows: filtered[start..end].to_vec(),
            current_page: self.current_page,
            total_pages: total_pages(filtered_count),
            filtered_count,
        }
    }

    /// Change the type filter and go back to the first page
    pub fn set_filter(&mut self, filter: TypeFilter) {
        self.filter = filter;
        self.current_page = 1;
    }

    /// Advance one page; no-op on the last page. Returns whether the page moved.
    pub fn next_page(&mut self) -> bool {
        if self.current_page < self.total_pages() {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page; no-op on the first page. Returns whether the page moved.
    pub fn previous_page(&mut self) -> bool {
        if self.current_page > 1 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }
}

fn total_pages(count: usize) -> usize {
    count.div_ceil(PAGE_SIZE)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use finboard_client::Category;
    use rust_decimal::Decimal;

    pub(crate) fn tx(id: i64, transaction_type: TransactionType) -> Transaction {
        Transaction {
            id,
            description: format!("Entry {}", id),
            amount: Decimal::new(id * 100 + 5, 2),
            transaction_type,
            category_rel: Category { id: 1, name: "Food".to_string() },
            date: "2024-01-15T10:30:00".to_string(),
            user_id: 1,
        }
    }

    /// `count` transactions, every third one a credit
    pub(crate) fn mixed(count: i64) -> Vec<Transaction> {
        (1..=count)
            .map(|id| {
                let kind = if id % 3 == 0 { TransactionType::Credit } else { TransactionType::Debit };
                tx(id, kind)
            })
            .collect()
    }

    fn loaded(transactions: Vec<Transaction>) -> TransactionListView {
        let mut view = TransactionListView::new();
        assert!(view.complete(Ok(transactions)));
        view
    }

    fn ids(rows: &[&Transaction]) -> Vec<i64> {
        rows.iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_new_view_is_loading() {
        let view = TransactionListView::new();
        assert!(view.is_loading());
        assert_eq!(view.filter(), TypeFilter::All);
        assert_eq!(view.current_page(), 1);
        assert!(view.visible().is_empty());
        assert_eq!(view.total_pages(), 0);
    }

    #[test]
    fn test_25_items_three_pages() {
        let mut view = loaded(mixed(25));
        assert_eq!(view.total_pages(), 3);
        assert_eq!(ids(&view.visible()), (1..=10).collect::<Vec<_>>());

        assert!(view.next_page());
        assert!(view.next_page());
        assert_eq!(view.current_page(), 3);
        assert_eq!(ids(&view.visible()), (21..=25).collect::<Vec<_>>());

        let page = view.page();
        assert!(page.show_pagination());
        assert!(page.has_previous());
        assert!(!page.has_next());
        assert_eq!(page.filtered_count, 25);
    }

    #[test]
    fn test_next_is_noop_on_last_page() {
        let mut view = loaded(mixed(25));
        view.next_page();
        view.next_page();
        assert!(!view.next_page());
        assert_eq!(view.current_page(), 3);
    }

    #[test]
    fn test_previous_is_noop_on_first_page() {
        let mut view = loaded(mixed(25));
        assert!(!view.previous_page());
        assert_eq!(view.current_page(), 1);

        view.next_page();
        assert!(view.previous_page());
        assert_eq!(view.current_page(), 1);
    }

    #[test]
    fn test_filter_matches_exactly_type() {
        let mut view = loaded(mixed(25));
        for filter in TypeFilter::ALL {
            view.set_filter(filter);
            let filtered = view.filtered();
            let expected: Vec<i64> = mixed(25)
                .iter()
                .filter(|t| match filter {
                    TypeFilter::All => true,
                    TypeFilter::Credit => t.is_credit(),
                    TypeFilter::Debit => !t.is_credit(),
                })
                .map(|t| t.id)
                .collect();
            assert_eq!(ids(&filtered), expected, "filter {}", filter);
        }
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut view = loaded(mixed(25));
        view.next_page();
        assert_eq!(view.current_page(), 2);

        view.set_filter(TypeFilter::Debit);
        assert_eq!(view.current_page(), 1);

        view.next_page();
        view.set_filter(TypeFilter::Debit);
        assert_eq!(view.current_page(), 1);
    }

    #[test]
    fn test_visible_is_contiguous_slice_of_filtered() {
        let mut view = loaded(mixed(25));
        view.set_filter(TypeFilter::Debit);
        // 17 debits
        assert_eq!(view.total_pages(), 2);
        let filtered_ids = ids(&view.filtered());
        for page in 1..=view.total_pages() {
            let visible = view.visible();
            assert!(visible.len() <= PAGE_SIZE);
            let start = (page - 1) * PAGE_SIZE;
            let end = (start + PAGE_SIZE).min(filtered_ids.len());
            assert_eq!(ids(&visible), filtered_ids[start..end].to_vec());
            view.next_page();
        }
    }

    #[test]
    fn test_empty_credit_filter() {
        let all_debits: Vec<Transaction> = (1..=4).map(|id| tx(id, TransactionType::Debit)).collect();
        let mut view = loaded(all_debits);
        view.set_filter(TypeFilter::Credit);

        let page = view.page();
        assert!(page.rows.is_empty());
        assert_eq!(page.total_pages, 0);
        assert!(!page.show_pagination());
        assert!(!view.next_page());
        assert_eq!(view.current_page(), 1);
    }

    #[test]
    fn test_single_page_hides_pagination() {
        let view = loaded(mixed(10));
        let page = view.page();
        assert_eq!(page.total_pages, 1);
        assert!(!page.show_pagination());
    }

    #[test]
    fn test_paging_never_mutates_transactions() {
        let original = mixed(25);
        let mut view = loaded(original.clone());
        view.set_filter(TypeFilter::Credit);
        view.next_page();
        view.set_filter(TypeFilter::All);
        view.next_page();
        view.previous_page();
        assert_eq!(view.transactions(), original.as_slice());
    }

    #[test]
    fn test_failed_fetch() {
        let mut view = TransactionListView::new();
        assert!(view.complete(Err(ClientError::Http { status: 500 })));
        assert_eq!(view.error(), Some("HTTP error! status: 500"));
        assert!(!view.is_loading());
        assert!(view.transactions().is_empty());
    }

    #[test]
    fn test_second_settle_is_ignored() {
        let mut view = loaded(mixed(3));
        assert!(!view.complete(Err(ClientError::Transport { message: "late".to_string() })));
        assert_eq!(view.transactions().len(), 3);
        assert!(view.error().is_none());
    }

    #[test]
    fn test_type_filter_parse() {
        assert_eq!("credit".parse::<TypeFilter>().unwrap(), TypeFilter::Credit);
        assert_eq!(TypeFilter::Debit.to_string(), "debit");
        assert_eq!(TypeFilter::All.label(), "All");
        let err = "refund".parse::<TypeFilter>().unwrap_err();
        assert_eq!(err, CoreError::InvalidFilter { value: "refund".to_string() });
    }
}
