use crate::state::TagValue;

/// Page size the backend paginator uses unless told otherwise.
pub const RECIPES_PAGE_LIMIT: u32 = 6;

/// One request for a page of recipes. Two equal queries fetch the same page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecipeQuery {
    pub page: u32,
    pub limit: u32,
    /// Slugs of the selected tags.
    pub tags: Vec<String>,
    pub name: String,
    pub author: Option<i64>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

impl Default for RecipeQuery {
    fn default() -> Self {
        RecipeQuery {
            page: 1,
            limit: RECIPES_PAGE_LIMIT,
            tags: vec![],
            name: String::new(),
            author: None,
            is_favorited: false,
            is_in_shopping_cart: false,
        }
    }
}

impl RecipeQuery {
    pub fn new(page: u32, tags: &[TagValue], name: &str) -> Self {
        RecipeQuery {
            page: page.max(1),
            tags: tags
                .iter()
                .filter(|tag| tag.value)
                .map(|tag| tag.tag.slug.clone())
                .collect(),
            name: name.to_string(),
            ..RecipeQuery::default()
        }
    }

    pub fn with_limit(self, limit: u32) -> Self {
        RecipeQuery {
            limit: limit.max(1),
            ..self
        }
    }

    /// Query string pairs in the order the backend documents them.
    /// `tags` repeats once per slug; empty filters are left out.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(author) = self.author {
            pairs.push(("author", author.to_string()));
        }
        if self.is_favorited {
            pairs.push(("is_favorited", "1".to_string()));
        }
        if self.is_in_shopping_cart {
            pairs.push(("is_in_shopping_cart", "1".to_string()));
        }
        pairs.extend(self.tags.iter().map(|slug| ("tags", slug.clone())));
        if !self.name.is_empty() {
            pairs.push(("name", self.name.clone()));
        }
        pairs
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    /// 1-indexed.
    pub page: u32,
    pub count: u64,
    pub limit: u32,
}

impl PageState {
    pub fn page_count(&self) -> u32 {
        let limit = u64::from(self.limit.max(1));
        u32::try_from(self.count.div_ceil(limit)).unwrap_or(u32::MAX)
    }

    pub fn clamp(&self, page: u32) -> u32 {
        page.clamp(1, self.page_count().max(1))
    }

    pub fn at_first_page(&self) -> bool {
        self.page <= 1
    }

    pub fn at_last_page(&self) -> bool {
        self.page >= self.page_count()
    }
}
