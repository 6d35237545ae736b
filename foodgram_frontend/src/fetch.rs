//! Issues recipe fetches so that only the newest query can land in the list.
//!
//! Every change of page, tags or search text issues a [`PendingFetch`]. Issuing
//! aborts whatever request was still in flight, and a response that arrives for
//! an older ticket is dropped, so the list always shows the last query asked for.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use foodgram_model::{RecipesResponse, Tag};
use futures::future::{AbortHandle, AbortRegistration, Abortable, Aborted};
use log::{debug, warn};

use crate::api::{self, RecipeApi};
use crate::query::RecipeQuery;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("recipe request failed: {0}")]
    Api(#[from] api::Error),
    #[error("recipe request superseded by a newer query")]
    Aborted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    pub query: RecipeQuery,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug)]
pub struct Fetched {
    pub ticket: Ticket,
    pub page: RecipesResponse,
}

#[derive(Debug, Default)]
pub struct FetchTracker {
    issued: Cell<u64>,
    in_flight: RefCell<Option<AbortHandle>>,
}

impl FetchTracker {
    pub fn issue(&self, query: RecipeQuery) -> PendingFetch {
        let generation = self.issued.get() + 1;
        self.issued.set(generation);
        let (handle, registration) = AbortHandle::new_pair();
        if let Some(previous) = self.in_flight.replace(Some(handle)) {
            previous.abort();
        }
        debug!("issuing recipe fetch #{generation}: {query:?}");
        PendingFetch {
            ticket: Ticket { generation, query },
            registration,
        }
    }

    pub fn latest(&self) -> u64 {
        self.issued.get()
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        ticket.generation == self.issued.get()
    }

    /// Hands back the page only if no newer fetch was issued since `fetched` started.
    pub fn accept(&self, fetched: Fetched) -> Option<RecipesResponse> {
        if !self.is_current(&fetched.ticket) {
            debug!(
                "dropping stale recipe page #{} (latest #{})",
                fetched.ticket.generation,
                self.latest()
            );
            return None;
        }
        self.in_flight.replace(None);
        Some(fetched.page)
    }
}

#[derive(Debug)]
pub struct PendingFetch {
    ticket: Ticket,
    registration: AbortRegistration,
}

impl PendingFetch {
    pub fn ticket(&self) -> &Ticket {
        &self.ticket
    }

    pub async fn run<A: RecipeApi + ?Sized>(self, api: &A) -> Result<Fetched, FetchError> {
        let PendingFetch {
            ticket,
            registration,
        } = self;
        let page = Abortable::new(api.get_recipes(&ticket.query), registration)
            .await
            .map_err(|Aborted| FetchError::Aborted)??;
        Ok(Fetched { ticket, page })
    }

    /// Runs the fetch and returns the page when it is still the newest one.
    /// Failures are logged and leave the caller's state untouched.
    pub async fn settle<A: RecipeApi + ?Sized>(
        self,
        api: &A,
        tracker: &FetchTracker,
    ) -> Option<RecipesResponse> {
        let generation = self.ticket.generation;
        match self.run(api).await {
            Ok(fetched) => tracker.accept(fetched),
            Err(FetchError::Aborted) => {
                debug!("recipe fetch #{generation} aborted");
                None
            }
            Err(err) => {
                warn!("recipe fetch #{generation} failed: {err}");
                None
            }
        }
    }
}

/// Loading for one mounted list: the tag list is requested once, and recipes
/// are refetched whenever the query differs from the last one issued.
#[derive(Debug, Default)]
pub struct RecipeLoader {
    tracker: FetchTracker,
    last_query: RefCell<Option<RecipeQuery>>,
    tags_requested: Cell<bool>,
}

impl RecipeLoader {
    pub fn tracker(&self) -> &FetchTracker {
        &self.tracker
    }

    /// Issues a fetch for `query` unless it equals the last one. The returned
    /// future hands the page to `apply` only while it is still the newest.
    pub fn refresh<A, F>(
        self: &Rc<Self>,
        api: Rc<A>,
        query: RecipeQuery,
        apply: F,
    ) -> Option<impl Future<Output = ()>>
    where
        A: RecipeApi + ?Sized + 'static,
        F: FnOnce(RecipesResponse) + 'static,
    {
        if self.last_query.borrow().as_ref() == Some(&query) {
            return None;
        }
        self.last_query.replace(Some(query.clone()));
        let pending = self.tracker.issue(query);
        let loader = Rc::clone(self);
        Some(async move {
            if let Some(page) = pending.settle(api.as_ref(), &loader.tracker).await {
                apply(page);
            }
        })
    }

    /// Requests the tags the first time only.
    pub fn load_tags<A, F>(&self, api: Rc<A>, apply: F) -> Option<impl Future<Output = ()>>
    where
        A: RecipeApi + ?Sized + 'static,
        F: FnOnce(Vec<Tag>) + 'static,
    {
        if self.tags_requested.replace(true) {
            return None;
        }
        Some(async move {
            match api.get_tags().await {
                Ok(tags) => {
                    debug!("loaded {} tags", tags.len());
                    apply(tags);
                }
                Err(err) => warn!("failed to load tags: {err}"),
            }
        })
    }
}
