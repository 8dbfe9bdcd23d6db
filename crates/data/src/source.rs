//! Data source trait definition.

use crate::error::Result;
use crate::model::PriceSeries;
use crate::request::FetchRequest;

/// Trait for sources that can fetch historical closing prices.
pub trait DataSource: Send + Sync {
    /// Data source name.
    fn name(&self) -> &str;

    /// Fetch daily closes for the request, blocking until done.
    fn fetch_closes(&self, request: &FetchRequest) -> Result<PriceSeries>;
}

impl<S: DataSource + ?Sized> DataSource for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch_closes(&self, request: &FetchRequest) -> Result<PriceSeries> {
        (**self).fetch_closes(request)
    }
}
