//! Paginated table fragment shared by the admin pages
//!
//! A table is a self-contained HTMX container. Its current `skip`/`take`
//! live in the container's own `hx-get` URL, so pager clicks and refresh
//! events reload exactly the page the user is looking at. Every request
//! for one table is serialized with `hx-sync` on the container using the
//! `replace` strategy: a newer request aborts the one in flight, so an
//! older response can never land on top of a newer one.

use async_trait::async_trait;
use axum::response::{Html, IntoResponse, Response};
use paydesk_core::{CoreResult, Page, PageRequest};

use crate::error::ApiError;
use crate::routes::notify::failure;

/// Page sizes offered by the size selector
pub const PAGE_SIZES: [u64; 3] = [5, 10, 25];

/// Current position of one table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    pub skip: u64,
    pub take: u64,
}

impl PaginationState {
    pub fn request(&self) -> PageRequest {
        PageRequest::new(self.skip, self.take)
    }
}

impl From<PageRequest> for PaginationState {
    fn from(request: PageRequest) -> Self {
        Self {
            skip: request.skip,
            take: request.take,
        }
    }
}

/// Something that can produce one page of rows for a table
#[async_trait]
pub trait PageSource<T>: Send + Sync {
    async fn fetch(&self, state: PaginationState) -> CoreResult<Page<T>>;
}

/// Header plus cell renderer. Renderers return HTML and must escape
/// user data themselves.
pub struct Column<T> {
    pub header: &'static str,
    render: Box<dyn Fn(&T) -> String + Send + Sync>,
}

impl<T> Column<T> {
    pub fn new(header: &'static str, render: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        Self {
            header,
            render: Box::new(render),
        }
    }

    pub fn cell(&self, row: &T) -> String {
        (self.render)(row)
    }
}

pub struct Table<T> {
    id: String,
    endpoint: String,
    refresh_event: String,
    columns: Vec<Column<T>>,
    empty_message: String,
}

impl<T> Table<T> {
    /// `endpoint` is the fragment URL, optionally with a fixed query
    /// (e.g. `/admin/payments/table?accountId=3`).
    pub fn new(id: &str, endpoint: &str, refresh_event: &str) -> Self {
        Self {
            id: id.to_string(),
            endpoint: endpoint.to_string(),
            refresh_event: refresh_event.to_string(),
            columns: Vec::new(),
            empty_message: "No records yet".to_string(),
        }
    }

    pub fn column(
        mut self,
        header: &'static str,
        render: impl Fn(&T) -> String + Send + Sync + 'static,
    ) -> Self {
        self.columns.push(Column::new(header, render));
        self
    }

    pub fn empty_message(mut self, message: &str) -> Self {
        self.empty_message = message.to_string();
        self
    }

    fn url(&self, skip: u64, take: Option<u64>) -> String {
        let separator = if self.endpoint.contains('?') { '&' } else { '?' };
        match take {
            Some(take) => format!("{}{}skip={}&take={}", self.endpoint, separator, skip, take),
            None => format!("{}{}skip={}", self.endpoint, separator, skip),
        }
    }

    fn container_attrs(&self, state: PaginationState, trigger: &str) -> String {
        format!(
            r#"id='{id}' hx-get='{url}' hx-trigger='{trigger}' hx-swap='outerHTML' hx-sync='this:replace' data-skip='{skip}' data-take='{take}'"#,
            id = self.id,
            url = self.url(state.skip, Some(state.take)),
            trigger = trigger,
            skip = state.skip,
            take = state.take,
        )
    }

    /// Placeholder for the initial page; loads itself on mount
    pub fn placeholder(&self, state: PaginationState) -> String {
        format!(
            r#"<div {}><div class='text-center py-12 text-gray-400'>Loading...</div></div>"#,
            self.container_attrs(state, &format!("load, {} from:body", self.refresh_event))
        )
    }

    fn nav_button(&self, label: &str, skip: u64, take: u64, disabled: bool) -> String {
        if disabled {
            return format!(
                r#"<button disabled class='px-3 py-1 border rounded text-gray-300'>{}</button>"#,
                label
            );
        }
        format!(
            r##"<button hx-get='{}' hx-target='#{}' hx-swap='outerHTML' hx-sync='#{}:replace' class='px-3 py-1 border rounded hover:bg-gray-100'>{}</button>"##,
            self.url(skip, Some(take)),
            self.id,
            self.id,
            label
        )
    }

    fn pager(&self, page: &Page<T>) -> String {
        let take = page.take.max(1);
        let last_skip = (page.total_pages() - 1) * take;
        let size_options: String = PAGE_SIZES
            .iter()
            .map(|size| {
                let selected = if *size == take { " selected" } else { "" };
                format!("<option value='{}'{}>{} / page</option>", size, selected, size)
            })
            .collect();

        format!(
            r##"<div class='mt-4 flex items-center justify-between flex-wrap gap-4'>
    <span class='text-sm text-gray-500'>{total} records, page {page} of {pages}</span>
    <div class='flex items-center gap-2'>
        <select name='take' hx-get='{size_url}' hx-target='#{id}' hx-swap='outerHTML' hx-sync='#{id}:replace' hx-trigger='change' class='px-2 py-1 border rounded'>{options}</select>
        {first}{prev}{next}{last}
    </div>
</div>"##,
            total = page.total,
            page = page.page_number(),
            pages = page.total_pages(),
            size_url = self.url(0, None),
            id = self.id,
            options = size_options,
            first = self.nav_button("First", 0, take, page.is_first_page()),
            prev = self.nav_button(
                "Previous",
                page.skip.saturating_sub(take),
                take,
                page.is_first_page()
            ),
            next = self.nav_button("Next", page.skip + take, take, page.is_last_page()),
            last = self.nav_button("Last", last_skip, take, page.is_last_page()),
        )
    }

    /// Full container with rows and pager, replacing the previous one
    pub fn render(&self, page: &Page<T>) -> String {
        let state = PaginationState {
            skip: page.skip,
            take: page.take,
        };
        let mut html = format!(
            "<div {}>",
            self.container_attrs(state, &format!("{} from:body", self.refresh_event))
        );

        if page.data.is_empty() {
            html.push_str(&format!(
                "<div class='text-center py-12 text-gray-500'><p>{}</p></div>",
                self.empty_message
            ));
        } else {
            html.push_str("<table class='min-w-full bg-white border rounded-lg'><thead class='bg-gray-50'><tr>");
            for column in &self.columns {
                html.push_str(&format!(
                    "<th class='px-4 py-2 text-left text-sm font-medium text-gray-600'>{}</th>",
                    column.header
                ));
            }
            html.push_str("</tr></thead><tbody>");
            for row in &page.data {
                html.push_str("<tr class='border-t hover:bg-gray-50'>");
                for column in &self.columns {
                    html.push_str(&format!("<td class='px-4 py-2 text-sm'>{}</td>", column.cell(row)));
                }
                html.push_str("</tr>");
            }
            html.push_str("</tbody></table>");
        }

        html.push_str(&self.pager(page));
        html.push_str("</div>");
        html
    }

    /// Fetch one page and render it. On failure the response carries an
    /// error status and a `notify` trigger; HTMX leaves the old rows in
    /// place.
    pub async fn respond<S>(&self, source: &S, state: PaginationState) -> Response
    where
        S: PageSource<T> + ?Sized,
    {
        match source.fetch(state).await {
            Ok(page) => Html(self.render(&page)).into_response(),
            Err(e) => fetch_failed(ApiError::from(e)),
        }
    }
}

/// Failure response for a table fragment request
pub fn fetch_failed(error: ApiError) -> Response {
    failure("Failed to fetch", error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use paydesk_core::CoreError;

    struct Numbers(u64);

    #[async_trait]
    impl PageSource<u64> for Numbers {
        async fn fetch(&self, state: PaginationState) -> CoreResult<Page<u64>> {
            let data = (state.skip..self.0).take(state.take as usize).collect();
            Ok(Page::new(data, self.0, state.request()))
        }
    }

    struct Broken;

    #[async_trait]
    impl PageSource<u64> for Broken {
        async fn fetch(&self, _state: PaginationState) -> CoreResult<Page<u64>> {
            Err(CoreError::Database {
                message: "database is locked".to_string(),
            })
        }
    }

    fn table() -> Table<u64> {
        Table::new("numbers", "/numbers/table", "refresh-numbers")
            .column("Value", |n: &u64| n.to_string())
    }

    #[test]
    fn test_placeholder_loads_on_mount() {
        let html = table().placeholder(PaginationState { skip: 0, take: 10 });
        assert!(html.contains("hx-trigger='load, refresh-numbers from:body'"));
        assert!(html.contains("hx-get='/numbers/table?skip=0&take=10'"));
        assert!(html.contains("hx-sync='this:replace'"));
    }

    #[tokio::test]
    async fn test_render_keeps_position_for_refresh() {
        let response = table()
            .respond(&Numbers(12), PaginationState { skip: 10, take: 5 })
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let page = Numbers(12)
            .fetch(PaginationState { skip: 10, take: 5 })
            .await
            .unwrap();
        let html = table().render(&page);
        assert!(html.contains("hx-get='/numbers/table?skip=10&take=5'"));
        assert!(html.contains("hx-trigger='refresh-numbers from:body'"));
        assert!(!html.contains("load,"));
        assert!(html.contains("<td class='px-4 py-2 text-sm'>11</td>"));
        assert!(html.contains("12 records, page 3 of 3"));
        assert!(html.contains("<option value='5' selected>"));
    }

    #[test]
    fn test_endpoint_with_fixed_query() {
        let table: Table<u64> = Table::new("p", "/payments/table?accountId=3", "refresh-payments");
        let html = table.placeholder(PaginationState { skip: 0, take: 5 });
        assert!(html.contains("/payments/table?accountId=3&skip=0&take=5"));
    }

    #[test]
    fn test_empty_table() {
        let page: Page<u64> = Page::new(vec![], 0, PageRequest::default());
        let html = table().empty_message("Nothing here").render(&page);
        assert!(html.contains("Nothing here"));
        assert!(html.contains("page 1 of 1"));
    }

    #[tokio::test]
    async fn test_fetch_failure_notifies() {
        let response = table()
            .respond(&Broken, PaginationState { skip: 0, take: 10 })
            .await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let header = response.headers().get("HX-Trigger").unwrap().to_str().unwrap();
        assert!(header.contains("Failed to fetch"));
    }
}
