// Named async queries: one status/data slot per category, one dispatch routine.
// Stale responses (superseded by a newer ticket) are dropped, never applied.
// See DESIGN.md: Query Store

use std::collections::BTreeMap;

use futures::stream::{FuturesUnordered, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::client::CatalogClient;
use crate::error::CatalogError;
use crate::types::{Category, ListResult};

/// Lifecycle of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryStatus {
    Pending,
    Ready,
    Failed,
}

/// Cached state for one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryState {
    pub status: QueryStatus,
    pub data: Option<ListResult>,
    pub error: Option<String>,
    /// Search term the data belongs to; `None` for plain listings.
    pub keyword: Option<String>,
    #[serde(skip)]
    generation: u64,
}

impl QueryState {
    /// True until the first result (or failure) arrives.
    pub fn is_loading(&self) -> bool {
        self.status == QueryStatus::Pending && self.data.is_none()
    }
}

/// Handle for one in-flight fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTicket {
    pub category: Category,
    pub keyword: Option<String>,
    generation: u64,
}

/// Outcome of settling a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    /// New data replaced the cached list.
    Replaced,
    Failed,
    /// A newer ticket exists for the category; nothing changed.
    Stale,
}

/// Category key → query state.
#[derive(Debug, Default)]
pub struct QueryStore {
    entries: BTreeMap<Category, QueryState>,
    next_generation: u64,
}

impl QueryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: Category) -> Option<&QueryState> {
        self.entries.get(&category)
    }

    /// Cached list for the category, whatever the current status.
    pub fn data(&self, category: Category) -> Option<&ListResult> {
        self.entries.get(&category).and_then(|e| e.data.as_ref())
    }

    /// Mark the category pending and hand out a ticket for the fetch.
    ///
    /// Cached data survives a refetch unless the search keyword changed.
    pub fn begin(&mut self, category: Category, keyword: Option<String>) -> QueryTicket {
        self.next_generation += 1;
        let generation = self.next_generation;

        let entry = self.entries.entry(category).or_insert_with(|| QueryState {
            status: QueryStatus::Pending,
            data: None,
            error: None,
            keyword: keyword.clone(),
            generation,
        });
        if entry.keyword != keyword {
            entry.data = None;
            entry.keyword = keyword.clone();
        }
        entry.status = QueryStatus::Pending;
        entry.error = None;
        entry.generation = generation;

        QueryTicket {
            category,
            keyword,
            generation,
        }
    }

    /// Apply a fetch result if the ticket is still current.
    pub fn settle(&mut self, ticket: &QueryTicket, result: Result<ListResult, CatalogError>) -> Settled {
        let Some(entry) = self.entries.get_mut(&ticket.category) else {
            return Settled::Stale;
        };
        if entry.generation != ticket.generation {
            debug!(category = %ticket.category, "dropping stale catalog response");
            return Settled::Stale;
        }

        match result {
            Ok(list) => {
                entry.status = QueryStatus::Ready;
                entry.data = Some(list);
                entry.error = None;
                Settled::Replaced
            }
            Err(err) => {
                warn!(category = %ticket.category, error = %err, "catalog query failed");
                entry.status = QueryStatus::Failed;
                entry.error = Some(err.to_string());
                Settled::Failed
            }
        }
    }
}

/// Run every ticket's fetch concurrently, handing each result to `settle` as it lands.
pub async fn dispatch<F>(client: &CatalogClient, tickets: Vec<QueryTicket>, mut settle: F)
where
    F: FnMut(QueryTicket, Result<ListResult, CatalogError>),
{
    let mut in_flight: FuturesUnordered<_> = tickets
        .into_iter()
        .map(|ticket| async move {
            let result = client.fetch(ticket.category, ticket.keyword.as_deref()).await;
            (ticket, result)
        })
        .collect();

    while let Some((ticket, result)) = in_flight.next().await {
        settle(ticket, result);
    }
}
