//! Pagination Component

use leptos::prelude::*;

/// Page buttons shown around the current page
const WINDOW: usize = 5;

/// 1-based page numbers to render, centred on `current` where possible
pub fn page_window(current: usize, total: usize, width: usize) -> Vec<usize> {
    if total == 0 {
        return Vec::new();
    }
    let width = width.clamp(1, total);
    let current = current.clamp(1, total);
    let half = width / 2;
    let start = current.saturating_sub(half).max(1).min(total + 1 - width);
    (start..start + width).collect()
}

/// Previous / numbered / next buttons. Hidden when there is a single page.
#[component]
pub fn Pagination(
    #[prop(into)] current: Signal<usize>,
    #[prop(into)] total_pages: Signal<usize>,
    #[prop(into)] on_change: Callback<usize>,
) -> impl IntoView {
    let go = move |page: usize| {
        if page != current.get_untracked() {
            on_change.run(page);
        }
    };

    view! {
        <Show when=move || { total_pages.get() > 1 }>
            <nav class="pagination">
                <button
                    class="page-btn"
                    disabled=move || current.get() <= 1
                    on:click=move |_| go(current.get_untracked().saturating_sub(1).max(1))
                >
                    "‹ Prev"
                </button>
                <For
                    each=move || page_window(current.get(), total_pages.get(), WINDOW)
                    key=|page| *page
                    children=move |page| {
                        view! {
                            <button
                                class="page-btn"
                                class:active=move || current.get() == page
                                on:click=move |_| go(page)
                            >
                                {page}
                            </button>
                        }
                    }
                />
                <button
                    class="page-btn"
                    disabled=move || current.get() >= total_pages.get()
                    on:click=move |_| go(current.get_untracked() + 1)
                >
                    "Next ›"
                </button>
                <span class="page-info">
                    {move || format!("Page {} of {}", current.get(), total_pages.get())}
                </span>
            </nav>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_centres_on_current() {
        assert_eq!(page_window(5, 10, 5), vec![3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_window_sticks_to_edges() {
        assert_eq!(page_window(1, 10, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(10, 10, 5), vec![6, 7, 8, 9, 10]);
        assert_eq!(page_window(2, 3, 5), vec![1, 2, 3]);
    }

    #[test]
    fn test_window_for_no_pages() {
        assert!(page_window(1, 0, 5).is_empty());
    }
}
