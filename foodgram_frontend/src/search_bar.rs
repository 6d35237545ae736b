use leptos::*;

/// Search field that reports every keystroke.
#[component]
pub fn SearchBar(
    label: &'static str,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_input: Callback<String>,
) -> impl IntoView {
    view! {
        <label class="input">
            <div class="input__label">{label}</div>
            <input
                type="text"
                class="input__field"
                prop:value=move || value.get()
                on:input=move |event| on_input.call(event_target_value(&event))
            />
        </label>
    }
}
