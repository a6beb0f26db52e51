use crate::application::dto::LookupSettings;
use crate::ports::outbound::{LatestVersionRepository, ProgressReporter};
use futures::future::join_all;
use std::collections::BTreeMap;
use tracing::debug;

/// LatestVersionChecker - batched "latest published version" lookups
///
/// Names are processed in fixed-size batches; lookups inside a batch run
/// concurrently and batches are separated by a short pause to stay under
/// registry rate limits. Every lookup has its own timeout, and a failed
/// or timed-out lookup yields `None` for that name only.
pub struct LatestVersionChecker<'a> {
    repository: &'a dyn LatestVersionRepository,
    settings: &'a LookupSettings,
}

impl<'a> LatestVersionChecker<'a> {
    pub fn new(repository: &'a dyn LatestVersionRepository, settings: &'a LookupSettings) -> Self {
        Self {
            repository,
            settings,
        }
    }

    pub async fn check_all(
        &self,
        names: &[String],
        progress_reporter: &dyn ProgressReporter,
    ) -> BTreeMap<String, Option<String>> {
        let total = names.len();
        let batch_size = self.settings.batch_size.max(1);
        let mut results = BTreeMap::new();
        let mut done = 0;

        for (index, batch) in names.chunks(batch_size).enumerate() {
            if index > 0 {
                tokio::time::sleep(self.settings.batch_delay).await;
            }

            let lookups = batch.iter().map(|name| self.lookup(name));
            for (name, latest) in batch.iter().zip(join_all(lookups).await) {
                results.insert(name.clone(), latest);
            }

            done += batch.len();
            progress_reporter.report_progress(done, total, Some("Checking latest versions"));
        }

        let failed = results.values().filter(|v| v.is_none()).count();
        if failed > 0 {
            progress_reporter.report_warning(&format!(
                "⚠️  Latest version unknown for {} of {} package(s)",
                failed, total
            ));
        }
        if total > 0 {
            progress_reporter.report_completion(&format!(
                "✅ Checked latest versions of {} package(s)",
                total
            ));
        }

        results
    }

    async fn lookup(&self, name: &str) -> Option<String> {
        match tokio::time::timeout(
            self.settings.timeout,
            self.repository.fetch_latest_version(name),
        )
        .await
        {
            Ok(Ok(version)) => Some(version),
            Ok(Err(e)) => {
                debug!(package = name, error = %e, "latest version lookup failed");
                None
            }
            Err(_) => {
                debug!(package = name, "latest version lookup timed out");
                None
            }
        }
    }
}
