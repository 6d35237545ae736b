use std::rc::Rc;

use foodgram_frontend::api::{ApiClient, ApiHandle};
use foodgram_frontend::config::ApiConfig;
use foodgram_frontend::templates::recipes::RecipesPage;
use leptos::logging::log;
use leptos::*;
use leptos_use::storage::use_local_storage;

fn main() {
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();
    log!("Starting");
    mount_to_body(|| {
        view! {
            <App />
        }
    })
}

#[component]
fn App() -> impl IntoView {
    let (token, _, _) = use_local_storage::<Option<String>, _>("token", None);
    let config = ApiConfig::from_document().with_token(token.get_untracked());
    log!("Signed in: {}", config.token.is_some());
    let api: ApiHandle = Rc::new(ApiClient::new(config));

    let (orders, set_orders) = create_signal(0u32);
    let update_orders = Callback::new(move |added: bool| {
        set_orders.update(|orders| {
            *orders = if added {
                *orders + 1
            } else {
                orders.saturating_sub(1)
            }
        })
    });

    view! {
        <div class="app">
            <TopBar orders/>
            <RecipesPage api update_orders/>
        </div>
    }
}

#[component]
fn TopBar(orders: ReadSignal<u32>) -> impl IntoView {
    view! {
        <header class="header">
            <div class="header__title">"Foodgram"</div>
            <div class="header__orders">
                "Shopping list "
                <span class="orders-count">{move || orders.get()}</span>
            </div>
        </header>
    }
}
