/// Lightweight progress reporting for long-running crawls. Frontends
/// implement this to surface status to users; it is a notification
/// channel only and carries nothing the caller cannot get from the
/// final [`CrawlResult`](crate::CrawlResult).
pub trait Progress: Send {
    /// Called once before the first fetch with the number of items that
    /// will be attempted.
    fn begin(&mut self, _total: usize) {}

    /// Called after each item completes, whatever its outcome.
    fn item_done(&mut self, _index: usize, _total: usize, _status: &str) {}

    /// Called once at the end, successful or not.
    fn finish(&mut self, _succeeded: usize, _attempted: usize) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
