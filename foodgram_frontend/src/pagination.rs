use leptos::*;

use crate::query::PageState;

/// Page buttons plus previous/next arrows. Renders nothing for a single page.
#[component]
pub fn Pagination(
    #[prop(into)] count: Signal<u64>,
    limit: u32,
    #[prop(into)] page: Signal<u32>,
    #[prop(into)] on_page_change: Callback<u32>,
) -> impl IntoView {
    let page_state = move || PageState {
        page: page.get(),
        count: count.get(),
        limit,
    };

    move || {
        let state = page_state();
        let pages = state.page_count();
        let current = state.page;
        let change = on_page_change.clone();
        (pages > 1).then(move || {
            let previous = change.clone();
            let next = change.clone();
            view! {
                <div class="pagination">
                    <button
                        class="pagination__arrow pagination__arrow_left"
                        disabled=state.at_first_page()
                        on:click=move |_| previous.call(state.clamp(current.saturating_sub(1)))
                    >
                        "«"
                    </button>
                    {(1..=pages)
                        .map(|number| {
                            let change = change.clone();
                            let class = if number == current {
                                "pagination__item pagination__item_active"
                            } else {
                                "pagination__item"
                            };
                            view! {
                                <button class=class on:click=move |_| change.call(number)>
                                    {number}
                                </button>
                            }
                        })
                        .collect_view()}
                    <button
                        class="pagination__arrow pagination__arrow_right"
                        disabled=state.at_last_page()
                        on:click=move |_| next.call(state.clamp(current + 1))
                    >
                        "»"
                    </button>
                </div>
            }
        })
    }
}
