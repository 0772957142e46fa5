use std::{
    collections::VecDeque,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};
use strata_core::{Result, ResultReader, RowLabeled, RowNames, Value, future};

/// In memory [`ResultReader`] serving predefined result sets.
///
/// Every call to [`ResultReader::close`] bumps a shared counter, see [`MockResultReader::releases`].
#[derive(Debug)]
pub struct MockResultReader {
    current: VecDeque<RowLabeled>,
    pending: VecDeque<Vec<RowLabeled>>,
    releases: Arc<AtomicUsize>,
}

impl MockResultReader {
    /// The first set is current right away.
    pub fn new(sets: impl IntoIterator<Item = Vec<RowLabeled>>) -> Self {
        let mut pending = sets.into_iter().collect::<VecDeque<_>>();
        Self {
            current: pending.pop_front().unwrap_or_default().into(),
            pending,
            releases: Default::default(),
        }
    }

    /// Result sets sharing the same column `labels`.
    pub fn with_labels(labels: &[&str], sets: Vec<Vec<Vec<Value>>>) -> Self {
        let labels: RowNames = labels.iter().map(|v| v.to_string()).collect();
        Self::new(sets.into_iter().map(|rows| {
            rows.into_iter()
                .map(|values| RowLabeled::new(labels.clone(), values.into()))
                .collect()
        }))
    }

    /// How many times the reader was released, it stays readable after the reader is moved away.
    pub fn releases(&self) -> Arc<AtomicUsize> {
        self.releases.clone()
    }
}

impl ResultReader for MockResultReader {
    fn read(&mut self) -> impl Future<Output = Result<Option<RowLabeled>>> + Send {
        future::ready(Ok(self.current.pop_front()))
    }

    fn next_result(&mut self) -> impl Future<Output = Result<bool>> + Send {
        let next = self.pending.pop_front();
        let more = next.is_some();
        self.current = next.unwrap_or_default().into();
        future::ready(Ok(more))
    }

    fn close(&mut self) {
        self.releases.fetch_add(1, Ordering::SeqCst);
    }
}
