// Shared, swappable dataset snapshot.
//
// Readers take the current `Arc<Dataset>` and compute against it without
// any lock. A reload swaps the pointer in one step, so requests already in
// flight finish on the snapshot they started with.

use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::info;

use crate::dataset::Dataset;

#[derive(Debug)]
pub struct DatasetStore {
    current: ArcSwap<Dataset>,
}

impl DatasetStore {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            current: ArcSwap::new(Arc::new(dataset)),
        }
    }

    /// The dataset as of now. Never changes underneath the caller.
    pub fn snapshot(&self) -> Arc<Dataset> {
        self.current.load_full()
    }

    /// Install `dataset` as the current snapshot and return the previous one.
    pub fn replace(&self, dataset: Dataset) -> Arc<Dataset> {
        let next = Arc::new(dataset);
        let next_len = next.len();
        let previous = self.current.swap(next);
        info!(
            "Swapped dataset snapshot: {} -> {} home runs",
            previous.len(),
            next_len
        );
        previous
    }
}
