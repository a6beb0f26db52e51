use crate::dependency_analysis::domain::{DependencyGraph, VersionInconsistency, VersionOccurrence};
use std::collections::{BTreeMap, BTreeSet};

/// ConsistencyAnalyzer groups every declaration by dependency name and
/// flags names requested with more than one distinct version string.
///
/// Versions are compared as exact strings: `^1.2.0` and `1.2.0` disagree.
/// The dependency kind does not matter, a dev declaration and a production
/// declaration of the same name are checked against each other. Internal
/// declarations (`core: workspace:*`) are grouped like external ones, so a
/// workspace package requested with differing ranges is flagged too.
pub struct ConsistencyAnalyzer;

impl ConsistencyAnalyzer {
    pub fn find_version_inconsistencies(graph: &DependencyGraph) -> BTreeMap<String, VersionInconsistency> {
        let mut grouped: BTreeMap<String, Vec<VersionOccurrence>> = BTreeMap::new();

        for declaration in graph.declarations() {
            grouped.entry(declaration.dep_name).or_default().push(VersionOccurrence {
                project: declaration.owner,
                version: declaration.version,
                kind: declaration.kind,
            });
        }

        grouped
            .into_iter()
            .filter_map(|(dep_name, occurrences)| {
                let distinct: BTreeSet<&str> =
                    occurrences.iter().map(|o| o.version.as_str()).collect();
                if distinct.len() <= 1 {
                    return None;
                }
                let distinct_version_count = distinct.len();
                Some((
                    dep_name.clone(),
                    VersionInconsistency {
                        dep_name,
                        occurrences,
                        distinct_version_count,
                    },
                ))
            })
            .collect()
    }
}
