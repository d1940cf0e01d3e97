//! Alert partial for reporting errors on form submissions.
//!
//! Endpoints return this markup with a non-2xx status code; the
//! response-targets htmx extension swaps it into the page's alert container.

use maud::{Markup, html};

/// Renders an error alert with a message and optional details.
pub(crate) fn error_alert(message: &str, details: &str) -> Markup {
    html!(
        div
            class="p-4 mb-4 text-red-800 border border-red-300 rounded-lg
                bg-red-50 dark:bg-gray-800 dark:text-red-400 dark:border-red-800"
            role="alert"
        {
            span class="font-medium" { (message) }

            @if !details.is_empty() {
                p class="mt-1 text-sm" { (details) }
            }
        }
    )
}
