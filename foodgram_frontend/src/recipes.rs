use foodgram_model::{Recipe, RecipeId, RecipesResponse, Tag, TagId};
use leptos::logging::{log, warn};
use leptos::*;

use crate::api::ApiHandle;
use crate::query::{PageState, RecipeQuery};
use crate::state::{RecipesState, TagValue};

/// Shared recipe list state with the handlers cards and filters call into.
#[derive(Clone, Copy)]
pub struct RecipesHandle {
    state: RwSignal<RecipesState>,
    api: StoredValue<ApiHandle>,
}

pub fn use_recipes(api: ApiHandle) -> RecipesHandle {
    let limit = api.page_limit();
    RecipesHandle {
        state: create_rw_signal(RecipesState::with_limit(limit)),
        api: store_value(api),
    }
}

impl RecipesHandle {
    pub fn api(&self) -> ApiHandle {
        self.api.get_value()
    }

    pub fn recipes(&self) -> Vec<Recipe> {
        self.state.with(|state| state.recipes.clone())
    }

    pub fn recipes_count(&self) -> u64 {
        self.state.with(|state| state.recipes_count)
    }

    pub fn recipes_page(&self) -> u32 {
        self.state.with(|state| state.recipes_page)
    }

    pub fn page_state(&self) -> PageState {
        self.state.with(RecipesState::page_state)
    }

    pub fn tags_value(&self) -> Vec<TagValue> {
        self.state.with(|state| state.tags.clone())
    }

    pub fn query(&self, name: &str) -> RecipeQuery {
        self.state.with(|state| state.query(name))
    }

    pub fn set_recipes_page(&self, page: u32) {
        self.state.update(|state| state.set_recipes_page(page));
    }

    pub fn set_tags_value(&self, tags: Vec<Tag>) {
        self.state.update(|state| state.set_tags_value(tags));
    }

    pub fn handle_tags_change(&self, id: TagId) {
        self.state.update(|state| {
            if !state.handle_tags_change(id) {
                warn!("Tag {id:?} is not part of the filter");
            }
        });
    }

    pub fn apply_page(&self, page: RecipesResponse) {
        self.state.update(|state| state.apply_page(page));
    }

    pub fn handle_like(&self, id: RecipeId, to_like: bool) {
        let state = self.state;
        let api = self.api();
        spawn_local(async move {
            match api.set_favorited(id, to_like).await {
                Ok(()) => state.update(|state| {
                    state.set_favorited(id, to_like);
                }),
                Err(err) => warn!("Failed to update favorites for recipe {id}: {err}"),
            }
        });
    }

    pub fn handle_add_to_cart(&self, id: RecipeId, to_add: bool, callback: Option<Callback<bool>>) {
        let state = self.state;
        let api = self.api();
        spawn_local(async move {
            match api.set_in_cart(id, to_add).await {
                Ok(()) => {
                    log!("Recipe {id} in shopping cart: {to_add}");
                    state.update(|state| {
                        state.set_in_shopping_cart(id, to_add);
                    });
                    if let Some(callback) = callback {
                        callback.call(to_add);
                    }
                }
                Err(err) => warn!("Failed to update shopping cart for recipe {id}: {err}"),
            }
        });
    }
}
