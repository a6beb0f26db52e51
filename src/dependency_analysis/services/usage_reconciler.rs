use super::ImportScanner;
use crate::dependency_analysis::domain::ReconciliationResult;
use std::collections::BTreeSet;

/// UsageReconciler compares the packages a project imports against the
/// packages it declares.
///
/// Matching rules for each import candidate:
/// 1. exact match with a declared name -> matched
/// 2. scoped candidate whose scope prefixes at least one declared scoped
///    package -> every declared package of that scope is matched
/// 3. otherwise -> unmatched (used but undeclared)
///
/// Rule 2 can over-match unrelated packages of the same scope.
pub struct UsageReconciler;

impl UsageReconciler {
    pub fn reconcile<I, S>(project: &str, declared: &BTreeSet<String>, specifiers: I) -> ReconciliationResult
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut matched_declared = BTreeSet::new();
        let mut unmatched_imports = BTreeSet::new();

        let candidates: BTreeSet<String> = specifiers
            .into_iter()
            .filter_map(|s| ImportScanner::candidate(s.as_ref()))
            .collect();

        for candidate in candidates {
            if declared.contains(&candidate) {
                matched_declared.insert(candidate);
                continue;
            }

            let same_scope: Vec<&String> = match ImportScanner::scope_of(&candidate) {
                Some(scope) => {
                    let prefix = format!("{}/", scope);
                    declared.iter().filter(|d| d.starts_with(&prefix)).collect()
                }
                None => Vec::new(),
            };

            if same_scope.is_empty() {
                unmatched_imports.insert(candidate);
            } else {
                matched_declared.extend(same_scope.into_iter().cloned());
            }
        }

        let unused_declared = declared.difference(&matched_declared).cloned().collect();

        ReconciliationResult {
            project: project.to_string(),
            matched_declared,
            unmatched_imports,
            unused_declared,
        }
    }
}
