use crate::dependency_analysis::domain::{AuditReport, DirectVulnerability, Severity};
use std::collections::BTreeMap;

/// Ancestry paths with at most this many segments belong to a direct dependency
const MAX_DIRECT_PATH_SEGMENTS: usize = 2;

/// AdvisoryExtractor narrows an audit report down to advisories that reach
/// the root project through a direct dependency.
pub struct AdvisoryExtractor;

impl AdvisoryExtractor {
    /// Direct vulnerabilities, one per package, keeping the most severe
    /// advisory. Sorted by severity (highest first) then package name.
    pub fn direct_vulnerabilities(report: &AuditReport) -> Vec<DirectVulnerability> {
        let mut by_package: BTreeMap<String, DirectVulnerability> = BTreeMap::new();

        for (advisory_id, advisory) in &report.advisories {
            let is_direct = advisory
                .findings
                .iter()
                .flat_map(|f| f.paths.iter())
                .any(|path| Self::is_direct_path(path));
            if !is_direct {
                continue;
            }

            let severity = Severity::parse(&advisory.severity).unwrap_or(Severity::Info);
            let candidate = DirectVulnerability {
                package: advisory.module_name.clone(),
                severity,
                advisory_id: advisory
                    .id
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| advisory_id.clone()),
                title: advisory.title.clone(),
                vulnerable_versions: advisory.vulnerable_versions.clone(),
                patched_versions: advisory.patched_versions.clone(),
            };

            match by_package.get(&candidate.package) {
                Some(existing) if existing.severity >= candidate.severity => {}
                _ => {
                    by_package.insert(candidate.package.clone(), candidate);
                }
            }
        }

        let mut direct: Vec<DirectVulnerability> = by_package.into_values().collect();
        direct.sort_by(|a, b| b.severity.cmp(&a.severity).then_with(|| a.package.cmp(&b.package)));
        direct
    }

    fn is_direct_path(path: &str) -> bool {
        let segments = path.split('>').filter(|s| !s.trim().is_empty()).count();
        (1..=MAX_DIRECT_PATH_SEGMENTS).contains(&segments)
    }

    /// Severity counts from the audit metadata, with a zero entry for every level
    pub fn severity_counts(report: &AuditReport) -> BTreeMap<String, u64> {
        let mut counts: BTreeMap<String, u64> = [
            Severity::Info,
            Severity::Low,
            Severity::Moderate,
            Severity::High,
            Severity::Critical,
        ]
        .iter()
        .map(|s| (s.to_string(), 0))
        .collect();

        for (name, count) in &report.metadata.vulnerabilities {
            let key = Severity::parse(name)
                .map(|s| s.to_string())
                .unwrap_or_else(|| name.to_lowercase());
            *counts.entry(key).or_insert(0) += count;
        }
        counts
    }
}
