//! Debounced listing views.
//!
//! A [`ListingController`] owns one listing's page and filter state. Every
//! change schedules a fetch through a [`Debouncer`], so a burst of edits
//! produces one request carrying the final state. Results are published on
//! a [`tokio::sync::watch`] channel, tagged with a monotonic sequence number;
//! a response that arrives after a newer request has started is dropped.

mod debounce;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use pagination::{ListingState, Page, PageNumber};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::domain::catalogue::CatalogueService;
use crate::domain::{Resource, TraceId};

pub use debounce::{DEFAULT_DEBOUNCE, Debouncer};

/// What a listing view currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ListingStatus<R> {
    /// Nothing requested yet.
    Idle,
    /// A request is in flight.
    Loading,
    /// The latest request succeeded.
    Loaded(Page<R>),
    /// The latest request failed; the message is safe to display.
    Failed(String),
}

/// Published view plus the sequence number of the request it reflects.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingView<R> {
    /// Sequence number of the request behind `status`; zero before any.
    pub sequence: u64,
    /// Current status.
    pub status: ListingStatus<R>,
}

impl<R> Default for ListingView<R> {
    fn default() -> Self {
        Self {
            sequence: 0,
            status: ListingStatus::Idle,
        }
    }
}

/// Owner of one listing's state and published view.
pub struct ListingController<R: Resource> {
    service: CatalogueService,
    state: ListingState<R::Filters>,
    debouncer: Debouncer,
    sequence: Arc<AtomicU64>,
    view: Arc<watch::Sender<ListingView<R>>>,
}

impl<R: Resource> ListingController<R> {
    /// Create a controller with the default debounce delay.
    pub fn new(service: CatalogueService) -> Self {
        Self::with_delay(service, DEFAULT_DEBOUNCE)
    }

    /// Create a controller with a custom debounce delay.
    pub fn with_delay(service: CatalogueService, delay: Duration) -> Self {
        let (view, _) = watch::channel(ListingView::default());
        Self {
            service,
            state: ListingState::default(),
            debouncer: Debouncer::new(delay),
            sequence: Arc::new(AtomicU64::new(0)),
            view: Arc::new(view),
        }
    }

    /// Current page and filters.
    pub const fn state(&self) -> &ListingState<R::Filters> {
        &self.state
    }

    /// Receiver observing every published view.
    pub fn subscribe(&self) -> watch::Receiver<ListingView<R>> {
        self.view.subscribe()
    }

    /// Move to `page`, keeping the filters, and schedule a fetch.
    pub fn set_page(&mut self, page: PageNumber) {
        self.state.set_page(page);
        self.schedule();
    }

    /// Replace the filters, return to page one and schedule a fetch.
    pub fn set_filters(&mut self, filters: R::Filters) {
        self.state.set_filters(filters);
        self.schedule();
    }

    /// Drop the filters, return to page one and schedule a fetch.
    pub fn clear_filters(&mut self) {
        self.state.clear_filters();
        self.schedule();
    }

    /// Schedule a fetch of the current state without changing it.
    pub fn refresh(&mut self) {
        self.schedule();
    }

    fn schedule(&mut self) {
        let fetch = ScheduledFetch {
            service: self.service.clone(),
            page: self.state.page(),
            filters: self.state.filters().clone(),
            sequence: Arc::clone(&self.sequence),
            view: Arc::clone(&self.view),
        };
        let trace_id = TraceId::current();
        self.debouncer.schedule(async move {
            match trace_id {
                Some(trace_id) => TraceId::scope(trace_id, fetch.run()).await,
                None => fetch.run().await,
            }
        });
    }
}

struct ScheduledFetch<R: Resource> {
    service: CatalogueService,
    page: PageNumber,
    filters: R::Filters,
    sequence: Arc<AtomicU64>,
    view: Arc<watch::Sender<ListingView<R>>>,
}

impl<R: Resource> ScheduledFetch<R> {
    async fn run(self) {
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        self.view.send_if_modified(|current| {
            if seq <= current.sequence {
                return false;
            }
            current.sequence = seq;
            current.status = ListingStatus::Loading;
            true
        });

        let result = self.service.fetch_page::<R>(self.page, &self.filters).await;

        self.view.send_if_modified(|current| {
            if seq < current.sequence {
                debug!(seq, latest = current.sequence, "discarding stale listing response");
                return false;
            }
            current.sequence = seq;
            current.status = match result {
                Ok(page) => ListingStatus::Loaded(page),
                Err(err) => {
                    warn!(kind = %R::KIND, error = %err, "listing fetch failed");
                    ListingStatus::Failed(err.to_string())
                }
            };
            true
        });
    }
}
