use yew::prelude::*;

use crate::core::logic::stats_labels;
use crate::models::QuickStats;

#[derive(Properties, PartialEq)]
pub(crate) struct StatsBarProps {
    pub stats: Option<QuickStats>,
}

#[function_component(StatsBar)]
pub(crate) fn stats_bar(props: &StatsBarProps) -> Html {
    let (files, sections, last_upload) = stats_labels(props.stats.as_ref());
    html! {
        <div class="quick-stats row">
            <div class="col stat">
                <span class="stat-label">{"Files"}</span>
                <span id="total-files" class="stat-value">{files}</span>
            </div>
            <div class="col stat">
                <span class="stat-label">{"Sections"}</span>
                <span id="total-sections" class="stat-value">{sections}</span>
            </div>
            <div class="col stat">
                <span class="stat-label">{"Last upload"}</span>
                <span id="last-upload" class="stat-value">{last_upload}</span>
            </div>
        </div>
    }
}
