pub mod api;
pub mod card;
pub mod config;
pub mod fetch;
pub mod pagination;
pub mod query;
pub mod recipes;
pub mod search_bar;
pub mod state;
pub mod tag_filter;
pub mod templates;
mod util;

