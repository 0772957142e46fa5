use crate::{
    Context, FromRow, Result, RowLabeled, StrataError,
    stream::{self, Stream, TryStreamExt},
};
use std::future::{self, Future};

/// Forward-only stream of result sets produced by one executed multi-statement command.
///
/// Implemented by the execution layer, the cursor only drives it.
pub trait ResultReader: Send {
    /// Next row of the current result set, `None` once the set is consumed.
    fn read(&mut self) -> impl Future<Output = Result<Option<RowLabeled>>> + Send;

    /// Moves to the next result set, `false` when there is none left.
    fn next_result(&mut self) -> impl Future<Output = Result<bool>> + Send;

    /// Releases the stream, called exactly once by the cursor.
    fn close(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    Open,
    /// No result set is left, advancing keeps returning `false`.
    Exhausted,
    /// The reader was released.
    Disposed,
}

/// Cursor stepping through the result sets of one execution.
///
/// The cursor owns the reader and releases it once, on [`QueryMultipleExtractor::dispose`] or
/// when dropped. It is not meant to be shared: every operation takes `&mut self`.
pub struct QueryMultipleExtractor<R: ResultReader> {
    reader: Option<R>,
    position: usize,
    state: CursorState,
}

impl<R: ResultReader> QueryMultipleExtractor<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: Some(reader),
            position: 0,
            state: CursorState::Open,
        }
    }

    /// Zero based index of the current result set.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn state(&self) -> CursorState {
        self.state
    }

    fn reader(&mut self) -> Result<&mut R> {
        self.reader.as_mut().ok_or_else(|| {
            StrataError::Disposed("The result cursor was already disposed".into()).into()
        })
    }

    /// Rows of the current result set, the position is not changed.
    pub fn rows(&mut self) -> Result<impl Stream<Item = Result<RowLabeled>> + Send + '_> {
        let reader = self.reader()?;
        Ok(stream::try_unfold(reader, |reader| async move {
            Ok(reader.read().await?.map(|row| (row, reader)))
        }))
    }

    /// Materializes the current result set, the position is not changed.
    pub async fn extract<T: FromRow>(&mut self) -> Result<Vec<T>> {
        let position = self.position;
        if self.state == CursorState::Exhausted {
            self.reader()?;
            return Ok(Vec::new());
        }
        self.rows()?
            .and_then(|row| future::ready(T::from_row(row)))
            .try_collect()
            .await
            .with_context(|| format!("While extracting the result set {position}"))
    }

    /// Moves to the next result set.
    ///
    /// Returns `false`, and stays exhausted from then on, when the stream has no result set left.
    pub async fn advance(&mut self) -> Result<bool> {
        if self.state == CursorState::Exhausted {
            self.reader()?;
            return Ok(false);
        }
        let more = self.reader()?.next_result().await?;
        if more {
            self.position += 1;
            log::debug!("Result cursor moved to the result set {}", self.position);
        } else {
            self.state = CursorState::Exhausted;
            log::debug!(
                "Result cursor exhausted after the result set {}",
                self.position
            );
        }
        Ok(more)
    }

    /// Like [`QueryMultipleExtractor::advance`] but a missing result set is an error.
    pub async fn advance_strict(&mut self) -> Result<()> {
        if self.advance().await? {
            Ok(())
        } else {
            Err(StrataError::NoMoreResults(format!(
                "There is no result set after the position {}",
                self.position
            ))
            .into())
        }
    }

    /// Advances then extracts. Without `strict`, `None` signals that no result set is left.
    pub async fn extract_next<T: FromRow>(&mut self, strict: bool) -> Result<Option<Vec<T>>> {
        if strict {
            self.advance_strict().await?;
        } else if !self.advance().await? {
            return Ok(None);
        }
        self.extract().await.map(Some)
    }

    /// Releases the reader, any further call is a no-op.
    pub fn dispose(&mut self) {
        if let Some(mut reader) = self.reader.take() {
            reader.close();
            log::trace!("Result cursor released at the result set {}", self.position);
        }
        self.state = CursorState::Disposed;
    }
}

impl<R: ResultReader> Drop for QueryMultipleExtractor<R> {
    fn drop(&mut self) {
        self.dispose();
    }
}
