use foodgram_model::TagId;
use leptos::*;

use crate::state::TagValue;

#[component]
pub fn TagCheckboxGroup(
    #[prop(into)] values: Signal<Vec<TagValue>>,
    #[prop(into)] handle_change: Callback<TagId>,
) -> impl IntoView {
    view! {
        <div class="checkbox-group">
            <For
                each=move || values.get()
                key=|tag_value| (tag_value.tag.id, tag_value.value)
                children=move |TagValue { tag, value }| {
                    let handle_change = handle_change.clone();
                    let id = tag.id;
                    let class = if value { "checkbox checkbox_active" } else { "checkbox" };
                    view! {
                        <label class=class style=format!("--tag-color: {}", tag.color)>
                            <input
                                type="checkbox"
                                class="checkbox__input"
                                prop:checked=value
                                on:change=move |_| handle_change.call(id)
                            />
                            <span class="checkbox__label">{tag.name}</span>
                        </label>
                    }
                }
            />
        </div>
    }
}
