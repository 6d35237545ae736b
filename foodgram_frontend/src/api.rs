use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use async_trait::async_trait;
use foodgram_model::{ErrorBody, RecipeId, RecipesResponse, ShortRecipe, Tag};
use gloo_net::http::{self, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::query::{RecipeQuery, RECIPES_PAGE_LIMIT};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to do some HTTP: {0}")]
    Request(#[from] gloo_net::Error),
    #[error("Failed to do some JSON: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Bad response: {0}")]
    Http(String),
    #[error("Action not allowed without an API token")]
    Forbidden,
}

/// The REST operations the recipe list consumes.
#[async_trait(?Send)]
pub trait RecipeApi {
    async fn get_recipes(&self, query: &RecipeQuery) -> Result<RecipesResponse, Error>;

    async fn get_tags(&self) -> Result<Vec<Tag>, Error>;

    async fn add_to_favorites(&self, id: RecipeId) -> Result<ShortRecipe, Error>;

    async fn remove_from_favorites(&self, id: RecipeId) -> Result<(), Error>;

    async fn add_to_cart(&self, id: RecipeId) -> Result<ShortRecipe, Error>;

    async fn remove_from_cart(&self, id: RecipeId) -> Result<(), Error>;

    fn is_authenticated(&self) -> bool {
        false
    }

    fn page_limit(&self) -> u32 {
        RECIPES_PAGE_LIMIT
    }

    async fn set_favorited(&self, id: RecipeId, to_like: bool) -> Result<(), Error> {
        if to_like {
            self.add_to_favorites(id).await.map(|_| ())
        } else {
            self.remove_from_favorites(id).await
        }
    }

    async fn set_in_cart(&self, id: RecipeId, to_add: bool) -> Result<(), Error> {
        if to_add {
            self.add_to_cart(id).await.map(|_| ())
        } else {
            self.remove_from_cart(id).await
        }
    }
}

pub type ApiHandle = Rc<dyn RecipeApi>;

trait HttpErr {
    fn http_ok_json<T: DeserializeOwned + Unpin + 'static>(
        self,
    ) -> Pin<Box<dyn Future<Output = Result<T, Error>>>>;

    fn http_ok(self) -> Pin<Box<dyn Future<Output = Result<(), Error>>>>;
}

/// Builds the error for a non-2xx response, preferring the backend's own message.
fn http_error(code: u16, status: &str, body: &str) -> Error {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message().map(str::to_string))
        .unwrap_or_else(|| body.to_string());
    Error::Http(format!("{code} {status} – {message}"))
}

async fn response_http_err(resp: http::Response) -> Result<http::Response, Error> {
    if resp.ok() {
        Ok(resp)
    } else {
        let status = resp.status_text();
        let code = resp.status();
        let text = resp.text().await?;
        Err(http_error(code, &status, &text))
    }
}

async fn response_json<T: DeserializeOwned + Unpin + 'static>(
    resp: http::Response,
) -> Result<T, Error> {
    Ok(response_http_err(resp).await?.json::<T>().await?)
}

impl HttpErr for http::Response {
    fn http_ok_json<T: DeserializeOwned + 'static + Unpin>(
        self,
    ) -> Pin<Box<dyn Future<Output = Result<T, Error>>>> {
        Box::pin(response_json(self))
    }

    fn http_ok(self) -> Pin<Box<dyn Future<Output = Result<(), Error>>>> {
        Box::pin(async move { response_http_err(self).await.map(|_| ()) })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ApiClient {
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        ApiClient { config }
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.config.authorization() {
            Some(authorization) => builder.header("Authorization", &authorization),
            None => builder,
        }
    }

    fn authorization_required(&self) -> Result<(), Error> {
        self.config
            .token
            .as_ref()
            .map(|_| ())
            .ok_or(Error::Forbidden)
    }

    fn recipe_action_url(&self, id: RecipeId, action: &str) -> String {
        self.config.url(&format!("recipes/{id}/{action}/"))
    }
}

#[async_trait(?Send)]
impl RecipeApi for ApiClient {
    async fn get_recipes(&self, query: &RecipeQuery) -> Result<RecipesResponse, Error> {
        let pairs = query.query_pairs();
        log::debug!("GET recipes {pairs:?}");
        self.authorize(http::Request::get(&self.config.url("recipes/")))
            .query(pairs.iter().map(|(key, value)| (*key, value.as_str())))
            .send()
            .await?
            .http_ok_json::<RecipesResponse>()
            .await
    }

    async fn get_tags(&self) -> Result<Vec<Tag>, Error> {
        http::Request::get(&self.config.url("tags/"))
            .send()
            .await?
            .http_ok_json::<Vec<Tag>>()
            .await
    }

    async fn add_to_favorites(&self, id: RecipeId) -> Result<ShortRecipe, Error> {
        self.authorization_required()?;
        self.authorize(http::Request::post(&self.recipe_action_url(id, "favorite")))
            .send()
            .await?
            .http_ok_json::<ShortRecipe>()
            .await
    }

    async fn remove_from_favorites(&self, id: RecipeId) -> Result<(), Error> {
        self.authorization_required()?;
        self.authorize(http::Request::delete(
            &self.recipe_action_url(id, "favorite"),
        ))
        .send()
        .await?
        .http_ok()
        .await
    }

    async fn add_to_cart(&self, id: RecipeId) -> Result<ShortRecipe, Error> {
        self.authorization_required()?;
        self.authorize(http::Request::post(
            &self.recipe_action_url(id, "shopping_cart"),
        ))
        .send()
        .await?
        .http_ok_json::<ShortRecipe>()
        .await
    }

    async fn remove_from_cart(&self, id: RecipeId) -> Result<(), Error> {
        self.authorization_required()?;
        self.authorize(http::Request::delete(
            &self.recipe_action_url(id, "shopping_cart"),
        ))
        .send()
        .await?
        .http_ok()
        .await
    }

    fn is_authenticated(&self) -> bool {
        self.config.token.is_some()
    }

    fn page_limit(&self) -> u32 {
        self.config.page_limit
    }
}
