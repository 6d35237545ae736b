use std::rc::Rc;

use foodgram_model::{RecipeId, TagId};
use leptos::*;

use crate::api::ApiHandle;
use crate::card::RecipeCard;
use crate::fetch::RecipeLoader;
use crate::pagination::Pagination;
use crate::recipes::use_recipes;
use crate::search_bar::SearchBar;
use crate::tag_filter::TagCheckboxGroup;
use crate::util::set_page_meta;

pub const TITLE: &str = "Рецепты";
pub const DESCRIPTION: &str = "Продуктовый помощник - Рецепты";

#[component]
pub fn RecipesPage(
    api: ApiHandle,
    #[prop(optional)] update_orders: Option<Callback<bool>>,
) -> impl IntoView {
    set_page_meta(TITLE, DESCRIPTION);
    let recipes = use_recipes(api.clone());
    let (search, set_search) = create_signal(String::new());
    let loader = Rc::new(RecipeLoader::default());

    create_effect({
        let loader = loader.clone();
        move |_| {
            let query = recipes.query(&search.get());
            let apply = move |page| recipes.apply_page(page);
            if let Some(load) = loader.refresh(recipes.api(), query, apply) {
                spawn_local(load);
            }
        }
    });
    if let Some(load) = loader.load_tags(recipes.api(), move |tags| recipes.set_tags_value(tags)) {
        spawn_local(load);
    }

    let authenticated = api.is_authenticated();
    let limit = recipes.page_state().limit;

    view! {
        <main class="main">
            <div class="container">
                <div class="title">
                    <h1 class="title__text">{TITLE}</h1>
                    <TagCheckboxGroup
                        values=Signal::derive(move || recipes.tags_value())
                        handle_change=move |id: TagId| recipes.handle_tags_change(id)
                    />
                </div>
                <div class="ingredients">
                    <SearchBar
                        label="Поиск рецепта"
                        value=search
                        on_input=move |value: String| set_search.set(value)
                    />
                </div>
                <div class="card-list">
                    <For
                        each=move || recipes.recipes()
                        key=|recipe| (recipe.id, recipe.is_favorited, recipe.is_in_shopping_cart)
                        children=move |recipe| {
                            let update_orders = update_orders.clone();
                            view! {
                                <RecipeCard
                                    recipe
                                    authenticated
                                    handle_like=move |(id, to_like): (RecipeId, bool)| {
                                        recipes.handle_like(id, to_like)
                                    }
                                    handle_add_to_cart=move |(id, to_add): (RecipeId, bool)| {
                                        recipes.handle_add_to_cart(id, to_add, update_orders.clone())
                                    }
                                />
                            }
                        }
                    />
                </div>
                <Pagination
                    count=Signal::derive(move || recipes.recipes_count())
                    limit
                    page=Signal::derive(move || recipes.recipes_page())
                    on_page_change=move |page: u32| recipes.set_recipes_page(page)
                />
            </div>
        </main>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_texts_match_the_site() {
        assert_eq!(TITLE, "Рецепты");
        assert!(DESCRIPTION.ends_with(TITLE));
    }
}
