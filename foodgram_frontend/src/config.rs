use leptos::wasm_bindgen::JsCast;
use web_sys::HtmlMetaElement;

use crate::query::RECIPES_PAGE_LIMIT;

pub const DEFAULT_API_BASE: &str = "/api";

/// `<meta name="api-base" content="https://host/api">` overrides [`DEFAULT_API_BASE`].
pub const API_BASE_META: &str = "meta[name=api-base]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub page_limit: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: DEFAULT_API_BASE.to_string(),
            token: None,
            page_limit: RECIPES_PAGE_LIMIT,
        }
    }
}

impl ApiConfig {
    /// Reads the base url from the page's `api-base` meta tag, falling back to the default.
    pub fn from_document() -> Self {
        let base_url = leptos::document()
            .query_selector(API_BASE_META)
            .ok()
            .flatten()
            .and_then(|element| element.dyn_into::<HtmlMetaElement>().ok())
            .and_then(|meta| base_url_from_meta(&meta.content()));
        match base_url {
            Some(base_url) => {
                log::info!("api base from meta tag: {base_url}");
                ApiConfig {
                    base_url,
                    ..ApiConfig::default()
                }
            }
            None => {
                log::info!("api base from default: {DEFAULT_API_BASE}");
                ApiConfig::default()
            }
        }
    }

    pub fn with_token(self, token: Option<String>) -> Self {
        let token = token
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());
        ApiConfig { token, ..self }
    }

    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn authorization(&self) -> Option<String> {
        self.token.as_ref().map(|token| format!("Token {token}"))
    }
}

fn base_url_from_meta(content: &str) -> Option<String> {
    let content = content.trim();
    (!content.is_empty()).then(|| content.to_string())
}
