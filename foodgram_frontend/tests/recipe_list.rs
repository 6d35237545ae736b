use std::cell::{Cell, RefCell};
use std::rc::Rc;

use async_trait::async_trait;
use foodgram_frontend::api::{Error, RecipeApi};
use foodgram_frontend::fetch::{FetchTracker, RecipeLoader};
use foodgram_frontend::query::RecipeQuery;
use foodgram_frontend::state::RecipesState;
use foodgram_model::{Author, Page, Recipe, RecipeId, RecipesResponse, ShortRecipe, Tag, TagId};
use futures::channel::oneshot;
use futures::executor::{block_on, LocalPool};
use futures::task::LocalSpawnExt;

fn tag(id: i64, slug: &str) -> Tag {
    Tag {
        id: TagId(id),
        name: slug.to_string(),
        color: "#E26C2D".into(),
        slug: slug.to_string(),
    }
}

fn all_tags() -> Vec<Tag> {
    vec![tag(1, "breakfast"), tag(2, "lunch"), tag(3, "dinner")]
}

fn recipe(id: i64, name: &str, tags: &[Tag]) -> Recipe {
    Recipe {
        id: RecipeId(id),
        tags: tags.to_vec(),
        author: Author {
            id: 1,
            username: "chef".into(),
            ..Author::default()
        },
        name: name.to_string(),
        cooking_time: 20,
        ..Recipe::default()
    }
}

/// Serves an in-memory catalogue the way the backend filters it.
struct CatalogueApi {
    recipes: Vec<Recipe>,
    recipe_calls: RefCell<Vec<RecipeQuery>>,
    tag_calls: Cell<usize>,
    favorite_calls: RefCell<Vec<(RecipeId, bool)>>,
    fail_recipes: Cell<bool>,
}

impl CatalogueApi {
    fn new() -> Self {
        let [breakfast, lunch, dinner]: [Tag; 3] = all_tags().try_into().unwrap();
        let recipes = vec![
            recipe(1, "Pumpkin soup", &[lunch.clone(), dinner.clone()]),
            recipe(2, "Omelette", &[breakfast.clone()]),
            recipe(3, "Pancakes", &[breakfast.clone()]),
            recipe(4, "Borscht soup", &[lunch.clone()]),
            recipe(5, "Steak", &[dinner.clone()]),
            recipe(6, "Porridge", &[breakfast]),
            recipe(7, "Fish soup", &[dinner.clone()]),
            recipe(8, "Salad", &[lunch, dinner]),
        ];
        CatalogueApi {
            recipes,
            recipe_calls: RefCell::new(vec![]),
            tag_calls: Cell::new(0),
            favorite_calls: RefCell::new(vec![]),
            fail_recipes: Cell::new(false),
        }
    }

    fn last_query(&self) -> RecipeQuery {
        self.recipe_calls.borrow().last().cloned().unwrap()
    }
}

#[async_trait(?Send)]
impl RecipeApi for CatalogueApi {
    async fn get_recipes(&self, query: &RecipeQuery) -> Result<RecipesResponse, Error> {
        self.recipe_calls.borrow_mut().push(query.clone());
        if self.fail_recipes.get() {
            return Err(Error::Http("500 Internal Server Error – down".into()));
        }
        let name = query.name.to_lowercase();
        let matching: Vec<Recipe> = self
            .recipes
            .iter()
            .filter(|recipe| {
                query.tags.is_empty()
                    || recipe.tags.iter().any(|tag| query.tags.contains(&tag.slug))
            })
            .filter(|recipe| recipe.name.to_lowercase().contains(&name))
            .cloned()
            .collect();
        let limit = query.limit as usize;
        let start = (query.page as usize - 1) * limit;
        Ok(Page {
            count: matching.len() as u64,
            next: None,
            previous: None,
            results: matching.into_iter().skip(start).take(limit).collect(),
        })
    }

    async fn get_tags(&self) -> Result<Vec<Tag>, Error> {
        self.tag_calls.set(self.tag_calls.get() + 1);
        Ok(all_tags())
    }

    async fn add_to_favorites(&self, id: RecipeId) -> Result<ShortRecipe, Error> {
        self.favorite_calls.borrow_mut().push((id, true));
        Ok(ShortRecipe {
            id,
            ..ShortRecipe::default()
        })
    }

    async fn remove_from_favorites(&self, id: RecipeId) -> Result<(), Error> {
        self.favorite_calls.borrow_mut().push((id, false));
        Ok(())
    }

    async fn add_to_cart(&self, _id: RecipeId) -> Result<ShortRecipe, Error> {
        Err(Error::Forbidden)
    }

    async fn remove_from_cart(&self, _id: RecipeId) -> Result<(), Error> {
        Err(Error::Forbidden)
    }
}

/// Drives the same loader the page uses; `sync` plays the page effect, which
/// reruns after every state change.
struct ListPage {
    api: Rc<CatalogueApi>,
    state: Rc<RefCell<RecipesState>>,
    search: String,
    loader: Rc<RecipeLoader>,
}

impl ListPage {
    fn mount() -> Self {
        Self::mount_with_limit(6)
    }

    fn mount_with_limit(limit: u32) -> Self {
        let page = ListPage {
            api: Rc::new(CatalogueApi::new()),
            state: Rc::new(RefCell::new(RecipesState::with_limit(limit))),
            search: String::new(),
            loader: Rc::new(RecipeLoader::default()),
        };
        page.sync();
        let state = page.state.clone();
        let load = page.loader.load_tags(page.api.clone(), move |tags| {
            state.borrow_mut().set_tags_value(tags)
        });
        block_on(load.unwrap());
        page.sync();
        page
    }

    fn sync(&self) {
        loop {
            let query = self.state.borrow().query(&self.search);
            let state = self.state.clone();
            let apply = move |page| state.borrow_mut().apply_page(page);
            match self.loader.refresh(self.api.clone(), query, apply) {
                Some(load) => block_on(load),
                None => break,
            }
        }
    }

    fn type_search(&mut self, text: &str) {
        self.search = text.to_string();
        self.sync();
    }

    fn toggle_tag(&self, id: i64) {
        self.state.borrow_mut().handle_tags_change(TagId(id));
        self.sync();
    }

    fn go_to_page(&self, page: u32) {
        self.state.borrow_mut().set_recipes_page(page);
        self.sync();
    }

    fn shown_ids(&self) -> Vec<i64> {
        self.state
            .borrow()
            .recipes
            .iter()
            .map(|recipe| recipe.id.0)
            .collect()
    }

    fn recipes_count(&self) -> u64 {
        self.state.borrow().recipes_count
    }

    fn recipes_page(&self) -> u32 {
        self.state.borrow().recipes_page
    }
}

#[test]
fn mount_fetches_defaults_then_tags_once() {
    let page = ListPage::mount();

    let calls = page.api.recipe_calls.borrow();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], RecipeQuery::default());
    assert_eq!(calls[0].page, 1);
    assert!(calls[0].tags.is_empty());
    assert_eq!(calls[0].name, "");
    assert_eq!(page.api.tag_calls.get(), 1);

    assert!(page.state.borrow().tags.iter().all(|tag| tag.value));
    assert_eq!(calls[1].tags, vec!["breakfast", "lunch", "dinner"]);
    assert_eq!(page.recipes_count(), 8);
    assert_eq!(page.shown_ids(), vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn tags_are_not_requested_again_after_mount() {
    let page = ListPage::mount();
    let again = page.loader.load_tags(page.api.clone(), |_: Vec<Tag>| {});
    assert!(again.is_none());
    assert_eq!(page.api.tag_calls.get(), 1);
}

#[test]
fn typing_fetches_per_keystroke_with_same_page_and_tags() {
    let mut page = ListPage::mount();
    let before = page.api.last_query();

    for text in ["s", "so", "sou", "soup"] {
        page.type_search(text);
    }

    let calls = page.api.recipe_calls.borrow();
    assert_eq!(calls.len(), 2 + 4);
    let last = calls.last().unwrap();
    assert_eq!(last.name, "soup");
    assert_eq!(last.page, before.page);
    assert_eq!(last.tags, before.tags);
    drop(calls);
    assert_eq!(page.shown_ids(), vec![1, 4, 7]);
    assert_eq!(page.recipes_count(), 3);
}

#[test]
fn tag_toggle_returns_to_first_page() {
    let page = ListPage::mount();
    page.go_to_page(2);
    assert_eq!(page.api.last_query().page, 2);
    assert_eq!(page.shown_ids(), vec![7, 8]);

    page.toggle_tag(3);

    let query = page.api.last_query();
    assert_eq!(query.page, 1);
    assert_eq!(query.tags, vec!["breakfast", "lunch"]);
    assert_eq!(page.shown_ids(), vec![1, 2, 3, 4, 6, 8]);
}

#[test]
fn narrowing_search_from_later_page_lands_on_a_real_page() {
    let mut page = ListPage::mount();
    page.go_to_page(2);
    assert_eq!(page.shown_ids(), vec![7, 8]);

    page.type_search("soup");

    let page_state = page.state.borrow().page_state();
    assert_eq!(page_state.page_count(), 1);
    assert!(page_state.page <= page_state.page_count());
    assert_eq!(page.recipes_page(), 1);
    assert_eq!(page.shown_ids(), vec![1, 4, 7]);
    let query = page.api.last_query();
    assert_eq!((query.page, query.name.as_str()), (1, "soup"));
}

#[test]
fn empty_result_keeps_first_page() {
    let mut page = ListPage::mount();
    page.type_search("nothing like this");
    assert_eq!(page.recipes_count(), 0);
    assert_eq!(page.recipes_page(), 1);
    assert!(page.shown_ids().is_empty());
}

#[test]
fn paging_keeps_filters() {
    let mut page = ListPage::mount_with_limit(2);
    page.type_search("o");
    let filtered = page.api.last_query();
    assert_eq!(page.recipes_count(), 5);
    assert_eq!(page.shown_ids(), vec![1, 2]);

    page.go_to_page(2);

    let query = page.api.last_query();
    assert_eq!(query.page, 2);
    assert_eq!(query.name, filtered.name);
    assert_eq!(query.tags, filtered.tags);
    assert_eq!(page.shown_ids(), vec![4, 6]);
    assert_eq!(page.search, "o");
    assert!(page.state.borrow().tags.iter().all(|tag| tag.value));
}

#[test]
fn unchanged_query_does_not_refetch() {
    let mut page = ListPage::mount();
    let calls = page.api.recipe_calls.borrow().len();
    page.type_search("");
    page.go_to_page(1);
    page.state.borrow_mut().set_favorited(RecipeId(2), true);
    page.sync();
    assert_eq!(page.api.recipe_calls.borrow().len(), calls);
}

#[test]
fn failed_fetch_keeps_previous_list() {
    let mut page = ListPage::mount();
    let shown = page.shown_ids();
    page.api.fail_recipes.set(true);

    page.type_search("steak");

    assert_eq!(page.api.last_query().name, "steak");
    assert_eq!(page.shown_ids(), shown);
    assert_eq!(page.recipes_count(), 8);
}

#[test]
fn like_toggles_route_to_favorite_endpoints() {
    let page = ListPage::mount();
    block_on(page.api.set_favorited(RecipeId(2), true)).unwrap();
    page.state.borrow_mut().set_favorited(RecipeId(2), true);
    block_on(page.api.set_favorited(RecipeId(3), false)).unwrap();

    assert_eq!(
        *page.api.favorite_calls.borrow(),
        vec![(RecipeId(2), true), (RecipeId(3), false)]
    );
    assert!(page.state.borrow().recipes[1].is_favorited);
    assert!(block_on(page.api.set_in_cart(RecipeId(2), true)).is_err());
}

/// Holds every request open until the test answers it.
#[derive(Default)]
struct GatedApi {
    waiting: RefCell<Vec<(RecipeQuery, oneshot::Sender<RecipesResponse>)>>,
}

impl GatedApi {
    fn answer(&self, name: &str, count: u64) -> bool {
        let position = self
            .waiting
            .borrow()
            .iter()
            .position(|(query, _)| query.name == name);
        let Some(position) = position else {
            return false;
        };
        let (_, sender) = self.waiting.borrow_mut().remove(position);
        sender
            .send(Page {
                count,
                next: None,
                previous: None,
                results: vec![],
            })
            .is_ok()
    }
}

#[async_trait(?Send)]
impl RecipeApi for GatedApi {
    async fn get_recipes(&self, query: &RecipeQuery) -> Result<RecipesResponse, Error> {
        let (sender, receiver) = oneshot::channel();
        self.waiting.borrow_mut().push((query.clone(), sender));
        receiver
            .await
            .map_err(|_| Error::Http("request dropped".into()))
    }

    async fn get_tags(&self) -> Result<Vec<Tag>, Error> {
        Ok(vec![])
    }

    async fn add_to_favorites(&self, _id: RecipeId) -> Result<ShortRecipe, Error> {
        Err(Error::Forbidden)
    }

    async fn remove_from_favorites(&self, _id: RecipeId) -> Result<(), Error> {
        Err(Error::Forbidden)
    }

    async fn add_to_cart(&self, _id: RecipeId) -> Result<ShortRecipe, Error> {
        Err(Error::Forbidden)
    }

    async fn remove_from_cart(&self, _id: RecipeId) -> Result<(), Error> {
        Err(Error::Forbidden)
    }
}

#[test]
fn overlapping_requests_resolve_to_last_issued_query() {
    let mut pool = LocalPool::new();
    let spawner = pool.spawner();
    let api = Rc::new(GatedApi::default());
    let tracker = Rc::new(FetchTracker::default());
    let shown: Rc<RefCell<Option<u64>>> = Rc::new(RefCell::new(None));

    let mut issue = |name: &str| {
        let pending = tracker.issue(RecipeQuery {
            name: name.to_string(),
            ..RecipeQuery::default()
        });
        let api = api.clone();
        let tracker = tracker.clone();
        let shown = shown.clone();
        spawner
            .spawn_local(async move {
                if let Some(page) = pending.settle(api.as_ref(), &tracker).await {
                    *shown.borrow_mut() = Some(page.count);
                }
            })
            .unwrap();
        pool.run_until_stalled();
    };

    issue("s");
    issue("so");
    assert_eq!(api.waiting.borrow().len(), 2);

    // The older request was aborted, so its late answer goes nowhere.
    assert!(!api.answer("s", 1));
    pool.run_until_stalled();
    assert_eq!(*shown.borrow(), None);

    assert!(api.answer("so", 2));
    pool.run_until_stalled();
    assert_eq!(*shown.borrow(), Some(2));
    assert_eq!(tracker.latest(), 2);
}
