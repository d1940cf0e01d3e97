//! Dashboard HTTP handler and view rendering.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    aggregation::{CategoryTotal, Summary, category_breakdown, summarize},
    dashboard::{
        cards::summary_cards_view,
        chart::{ECHARTS_SCRIPT_URL, chart_script, chart_view, expenses_chart},
    },
    endpoints,
    html::{HeadElement, base, format_currency, link},
    navigation::NavBar,
    store::TransactionStore,
};

/// The number of categories listed next to the chart.
const LEGEND_LIMIT: usize = 6;

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The transaction store the summaries are computed from.
    pub store: Arc<Mutex<TransactionStore>>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// Display a page with an overview of the user's transactions.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let store = state
        .store
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire store lock: {error}"))
        .map_err(|_| Error::StoreLockError)?;

    // Derived views are recomputed from the current snapshot on every
    // request, never cached.
    let summary = summarize(store.list());
    let breakdown = category_breakdown(store.list());
    drop(store);

    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW);

    Ok(dashboard_view(nav_bar, &summary, &breakdown).into_response())
}

/// Renders the dashboard page with summary cards and the category chart.
fn dashboard_view(nav_bar: NavBar, summary: &Summary, breakdown: &[CategoryTotal]) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        div
            id="dashboard-content"
            class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            (summary_cards_view(summary))

            @if breakdown.is_empty() {
                (no_expenses_view())
            } @else {
                section
                    id="chart"
                    class="w-full mx-auto mb-4"
                {
                    div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
                    {
                        (chart_view())

                        (category_legend_view(breakdown))
                    }
                }
            }
        }
    );

    let scripts = if breakdown.is_empty() {
        vec![]
    } else {
        vec![
            HeadElement::ScriptLink(ECHARTS_SCRIPT_URL.to_owned()),
            chart_script(&expenses_chart(breakdown)),
        ]
    };

    base("Dashboard", &scripts, &content)
}

/// Renders the chart section placeholder shown when there are no expenses.
fn no_expenses_view() -> Markup {
    let new_transaction_link = link(endpoints::NEW_TRANSACTION_VIEW, "adding a transaction");

    html!(
        section
            id="chart"
            class="w-full mx-auto mb-4"
        {
            div class="flex flex-col items-center px-6 py-8 mx-auto text-gray-900 dark:text-white"
            {
                h2 class="text-xl font-bold"
                {
                    "No expenses yet"
                }

                p
                {
                    "The category chart will show up here once you record some
                    spending. You can start by " (new_transaction_link) "."
                }
            }
        }
    )
}

/// Renders the per-category totals listed next to the chart.
fn category_legend_view(breakdown: &[CategoryTotal]) -> Markup {
    html!(
        div class="flex flex-col justify-center gap-2"
        {
            h3 class="text-xl font-semibold mb-2" { "Top categories" }

            @for entry in breakdown.iter().take(LEGEND_LIMIT) {
                div class="flex items-center justify-between gap-8 text-sm max-w-xs"
                {
                    span { (entry.category) }
                    span class="font-semibold" { (format_currency(entry.total)) }
                }
            }
        }
    )
}
