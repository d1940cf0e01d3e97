//! The summary cards shown at the top of the dashboard.

use maud::{Markup, html};

use crate::{aggregation::Summary, html::format_currency};

/// Renders the income, expense and balance cards for `summary`.
pub(super) fn summary_cards_view(summary: &Summary) -> Markup {
    html! {
        section class="w-full mx-auto mb-4" {
            div class="grid grid-cols-1 sm:grid-cols-3 gap-4" {
                (summary_card(
                    "Income",
                    &format!("+{}", format_currency(summary.total_income)),
                    "text-green-600 dark:text-green-400",
                ))
                (summary_card(
                    "Expenses",
                    &format!("-{}", format_currency(summary.total_expense)),
                    "text-red-600 dark:text-red-400",
                ))
                (summary_card(
                    "Balance",
                    &format_currency(summary.balance),
                    "text-gray-900 dark:text-white",
                ))
            }
        }
    }
}

fn summary_card(label: &str, amount: &str, amount_style: &str) -> Markup {
    html! {
        div
            class="bg-white dark:bg-gray-800 border border-gray-200
                dark:border-gray-700 rounded-lg p-4 shadow-md"
        {
            div class="text-sm text-gray-600 dark:text-gray-400 mb-1" { (label) }

            div class={ "text-3xl font-bold " (amount_style) } { (amount) }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::aggregation::Summary;

    use super::summary_cards_view;

    #[test]
    fn renders_all_three_totals() {
        let summary = Summary {
            total_income: 800.0,
            total_expense: 195.5,
            balance: 604.5,
        };

        let html = summary_cards_view(&summary).into_string();

        assert!(html.contains("+$800.00"));
        assert!(html.contains("-$195.50"));
        assert!(html.contains("$604.50"));
    }

    #[test]
    fn renders_zero_balance_for_empty_summary() {
        let summary = Summary {
            total_income: 0.0,
            total_expense: 0.0,
            balance: 0.0,
        };

        let html = summary_cards_view(&summary).into_string();

        assert!(html.contains("$0.00"));
    }
}
