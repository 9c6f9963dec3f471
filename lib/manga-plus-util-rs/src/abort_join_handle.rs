/// A join handle wrapper that will abort the task when dropped.
#[derive(Debug)]
pub struct AbortJoinHandle<T> {
    handle: Option<tokio::task::JoinHandle<T>>,
}

impl<T> AbortJoinHandle<T> {
    /// Wrap a join handle
    pub fn new(handle: tokio::task::JoinHandle<T>) -> Self {
        Self {
            handle: Some(handle),
        }
    }

    /// Abort the task now.
    pub fn abort(&self) {
        if let Some(handle) = self.handle.as_ref() {
            handle.abort();
        }
    }

    /// Returns true if the task has finished, either by completing or by being aborted.
    pub fn is_finished(&self) -> bool {
        self.handle
            .as_ref()
            .map_or(true, |handle| handle.is_finished())
    }

    /// Get the inner handle, without aborting it.
    pub fn into_inner(mut self) -> Option<tokio::task::JoinHandle<T>> {
        self.handle.take()
    }
}

impl<T> Drop for AbortJoinHandle<T> {
    fn drop(&mut self) {
        self.abort();
    }
}
