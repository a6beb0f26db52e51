/// ProgressReporter port for user-facing progress during an analysis
///
/// Messages go to a side channel (stderr in the CLI) so they never mix
/// with the JSON report.
pub trait ProgressReporter: Send + Sync {
    /// Reports a one-line status message
    fn report(&self, message: &str);

    /// Reports progress of a batched operation
    ///
    /// # Arguments
    /// * `current` - Items processed so far
    /// * `total` - Total number of items
    /// * `message` - Optional label for the current step
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports a degraded step (tool fallback, failed lookup batch)
    fn report_warning(&self, message: &str);

    /// Reports completion of a batched operation
    fn report_completion(&self, message: &str);
}
