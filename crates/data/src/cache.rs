//! Memoizing wrapper around a [`DataSource`].

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::error::Result;
use crate::model::PriceSeries;
use crate::request::FetchRequest;
use crate::source::DataSource;

/// Caches fetched series keyed by the full [`FetchRequest`].
///
/// Entries live until [`CachedSource::clear`] is called. Failed fetches are
/// not cached, so the next identical request goes back to the inner source.
#[derive(Debug)]
pub struct CachedSource<S> {
    inner: S,
    entries: Mutex<HashMap<FetchRequest, PriceSeries>>,
}

impl<S: DataSource> CachedSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Number of cached series.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Drop every cached series.
    pub fn clear(&self) {
        self.entries().clear();
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<FetchRequest, PriceSeries>> {
        // The map holds plain values, so a panic elsewhere cannot leave it
        // half-written.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: DataSource> DataSource for CachedSource<S> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn fetch_closes(&self, request: &FetchRequest) -> Result<PriceSeries> {
        if let Some(series) = self.entries().get(request) {
            debug!(symbol = %request.symbol, "price cache hit");
            return Ok(series.clone());
        }

        debug!(symbol = %request.symbol, source = self.inner.name(), "price cache miss");
        let series = self.inner.fetch_closes(request)?;
        self.entries().insert(request.clone(), series.clone());
        Ok(series)
    }
}
