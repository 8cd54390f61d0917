//! Progress Chart Component
//!
//! SVG line chart of completion against the ideal line, plus cumulative
//! task totals when real metrics are available.

use leptos::prelude::*;

use crate::charts::{dashboard_series, svg_points, CHART_HEIGHT, CHART_WIDTH};
use crate::store::{use_freya_store, FreyaStateStoreFields};

#[component]
pub fn ProgressChart() -> impl IntoView {
    let store = use_freya_store();
    let series = Memo::new(move |_| {
        let today = chrono::Local::now().date_naive();
        store.metrics().with(|metrics| dashboard_series(metrics.as_ref(), today))
    });

    let first_date = move || series.with(|s| s.dates.first().cloned().unwrap_or_default());
    let last_date = move || series.with(|s| s.dates.last().cloned().unwrap_or_default());

    view! {
        <div class="chart-card">
            <div class="chart-header">
                <h3>"Task Progress"</h3>
                <span class="chart-latest">{move || format!("{}% complete", series.with(|s| s.latest_completion()))}</span>
                <Show when=move || series.with(|s| s.sample)>
                    <span class="sample-badge">"Sample data"</span>
                </Show>
            </div>
            <svg
                class="progress-chart"
                viewBox=format!("0 0 {CHART_WIDTH} {CHART_HEIGHT}")
                preserveAspectRatio="none"
            >
                <polyline
                    class="line-ideal"
                    fill="none"
                    stroke="#9ca3af"
                    stroke-dasharray="6 4"
                    points=move || series.with(|s| svg_points(&s.ideal, 100))
                />
                <polyline
                    class="line-completion"
                    fill="none"
                    stroke="#6366f1"
                    stroke-width="2"
                    points=move || series.with(|s| svg_points(&s.completion, 100))
                />
                {move || {
                    series
                        .with(|s| s.totals.clone())
                        .map(|totals| {
                            let max = totals.iter().copied().max().unwrap_or(0);
                            view! {
                                <polyline
                                    class="line-totals"
                                    fill="none"
                                    stroke="#10b981"
                                    points=svg_points(&totals, max)
                                />
                            }
                        })
                }}
            </svg>
            <div class="chart-axis">
                <span>{first_date}</span>
                <span>{last_date}</span>
            </div>
            <div class="chart-legend">
                <span class="legend-completion">"Completion %"</span>
                <span class="legend-ideal">"Ideal"</span>
                <Show when=move || series.with(|s| s.totals.is_some())>
                    <span class="legend-totals">"Total tasks"</span>
                </Show>
            </div>
        </div>
    }
}
