//! Admin Logs Page
//!
//! Recent client log lines from the in-memory buffer, for bug reports.

use leptos::prelude::*;

use super::AdminTabs;

#[component]
pub fn AdminLogsPage() -> impl IntoView {
    let text = RwSignal::new(rolling_logger::dump());

    view! {
        <section class="page dashboard-page">
            <AdminTabs />
            <h1>"Client logs"</h1>
            <button class="btn" on:click=move |_| text.set(rolling_logger::dump())>"Refresh"</button>
            <Show
                when=move || text.with(|t| !t.is_empty())
                fallback=|| view! { <p class="muted">"Nothing logged yet."</p> }
            >
                <pre class="log-dump">{move || text.get()}</pre>
            </Show>
        </section>
    }
}
