use foodgram_model::{Recipe, RecipeId, RecipesResponse, Tag, TagId};

use crate::query::{PageState, RecipeQuery, RECIPES_PAGE_LIMIT};

/// A tag together with whether it is selected in the filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagValue {
    pub tag: Tag,
    pub value: bool,
}

/// Everything the recipe list shares between its filters, cards and pager.
/// The search text is owned by the page and passed into [`RecipesState::query`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipesState {
    pub recipes: Vec<Recipe>,
    pub recipes_count: u64,
    pub recipes_page: u32,
    pub tags: Vec<TagValue>,
    pub limit: u32,
}

impl Default for RecipesState {
    fn default() -> Self {
        RecipesState {
            recipes: vec![],
            recipes_count: 0,
            recipes_page: 1,
            tags: vec![],
            limit: RECIPES_PAGE_LIMIT,
        }
    }
}

impl RecipesState {
    pub fn with_limit(limit: u32) -> Self {
        RecipesState {
            limit: limit.max(1),
            ..RecipesState::default()
        }
    }

    pub fn query(&self, name: &str) -> RecipeQuery {
        RecipeQuery::new(self.recipes_page, &self.tags, name).with_limit(self.limit)
    }

    pub fn page_state(&self) -> PageState {
        PageState {
            page: self.recipes_page,
            count: self.recipes_count,
            limit: self.limit,
        }
    }

    pub fn set_recipes_page(&mut self, page: u32) {
        self.recipes_page = self.page_state().clamp(page);
    }

    /// Seeds the filter with every known tag selected.
    pub fn set_tags_value(&mut self, tags: Vec<Tag>) {
        self.tags = tags
            .into_iter()
            .map(|tag| TagValue { tag, value: true })
            .collect();
    }

    /// Flips one tag and goes back to the first page. Returns false for an unknown tag.
    pub fn handle_tags_change(&mut self, id: TagId) -> bool {
        self.recipes_page = 1;
        match self.tags.iter_mut().find(|tag| tag.tag.id == id) {
            Some(tag) => {
                tag.value = !tag.value;
                true
            }
            None => false,
        }
    }

    pub fn selected_slugs(&self) -> Vec<&str> {
        self.tags
            .iter()
            .filter(|tag| tag.value)
            .map(|tag| tag.tag.slug.as_str())
            .collect()
    }

    /// Replaces the shown recipes. A narrower result set pulls the page back to
    /// the last one that exists, which makes the query change and refetch.
    pub fn apply_page(&mut self, page: RecipesResponse) {
        self.recipes = page.results;
        self.recipes_count = page.count;
        let page_count = self.page_state().page_count();
        if page_count > 0 && self.recipes_page > page_count {
            self.recipes_page = page_count;
        }
    }

    pub fn set_favorited(&mut self, id: RecipeId, favorited: bool) -> bool {
        self.update_recipe(id, |recipe| recipe.is_favorited = favorited)
    }

    pub fn set_in_shopping_cart(&mut self, id: RecipeId, in_cart: bool) -> bool {
        self.update_recipe(id, |recipe| recipe.is_in_shopping_cart = in_cart)
    }

    fn update_recipe(&mut self, id: RecipeId, update: impl FnOnce(&mut Recipe)) -> bool {
        match self.recipes.iter_mut().find(|recipe| recipe.id == id) {
            Some(recipe) => {
                update(recipe);
                true
            }
            None => false,
        }
    }
}
