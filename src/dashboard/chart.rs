//! Chart generation and rendering for the dashboard.
//!
//! Builds the category breakdown as an ECharts pie chart, where each slice's
//! angle is the category's share of total expenses. The chart is generated as
//! JSON configuration for the ECharts library and rendered with an HTML
//! container and JavaScript initialization code.

use charming::{
    Chart,
    component::{Legend, Title},
    datatype::DataPointItem,
    element::{Tooltip, Trigger},
    series::Pie,
};
use maud::{Markup, PreEscaped, html};

use crate::{aggregation::CategoryTotal, html::HeadElement};

/// The HTML element ID of the chart container.
pub(super) const CATEGORY_CHART_ID: &str = "category-chart";

/// The ECharts runtime loaded in the page head when a chart is shown.
pub(super) const ECHARTS_SCRIPT_URL: &str =
    "https://cdn.jsdelivr.net/npm/echarts@5.5.0/dist/echarts.min.js";

pub(super) fn expenses_chart(breakdown: &[CategoryTotal]) -> Chart {
    let data: Vec<DataPointItem> = breakdown
        .iter()
        .map(|entry| DataPointItem::new(entry.total).name(entry.category.clone()))
        .collect();

    Chart::new()
        .title(Title::new().text("Expenses by category"))
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(Legend::new().top("bottom"))
        .series(
            Pie::new()
                .name("Expenses")
                .radius(vec!["40%", "65%"])
                .avoid_label_overlap(false)
                .data(data),
        )
}

/// Renders the container div the chart is drawn into.
pub(super) fn chart_view() -> Markup {
    html!(
        div
            id=(CATEGORY_CHART_ID)
            class="min-h-[380px] rounded dark:bg-gray-100"
        {}
    )
}

/// Generates JavaScript initialization code for the dashboard chart.
///
/// Creates a script that initializes the ECharts instance with dark mode
/// support and responsive resizing.
pub(super) fn chart_script(chart: &Chart) -> HeadElement {
    let options = chart.to_string();
    let script_content = format!(
        r#"(function() {{
            const chartDom = document.getElementById("{}");
            const chart = echarts.init(chartDom);
            const option = {};
            chart.setOption(option);

            window.addEventListener('resize', chart.resize);

            const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
            const updateTheme = () => {{
                const isDarkMode = darkModeMediaQuery.matches;
                chart.setTheme(isDarkMode ? 'dark' : 'default');
            }}
            darkModeMediaQuery.addEventListener('change', updateTheme);
            updateTheme();
        }})();"#,
        CATEGORY_CHART_ID, options
    );

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}
