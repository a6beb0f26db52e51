use super::DependencyKind;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Parsed package manifest (package.json) as far as dependency analysis needs it.
///
/// Dependency maps keep only string-valued entries; a duplicated key keeps
/// the last occurrence, matching how the manifest is read by package managers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "string_entries")]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "string_entries")]
    pub dev_dependencies: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "string_entries")]
    pub peer_dependencies: BTreeMap<String, String>,
}

impl PackageManifest {
    /// Declared dependencies of one kind
    pub fn declared(&self, kind: DependencyKind) -> &BTreeMap<String, String> {
        match kind {
            DependencyKind::Production => &self.dependencies,
            DependencyKind::Dev => &self.dev_dependencies,
            DependencyKind::Peer => &self.peer_dependencies,
        }
    }

    /// Union of declared names across all three kinds
    pub fn declared_names(&self) -> BTreeSet<String> {
        DependencyKind::ALL
            .iter()
            .flat_map(|kind| self.declared(*kind).keys().cloned())
            .collect()
    }
}

fn string_entries<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, serde_json::Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(name, value)| value.as_str().map(|v| (name, v.to_string())))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_manifest() {
        let manifest: PackageManifest = serde_json::from_str(
            r#"{
                "name": "web",
                "version": "1.0.0",
                "dependencies": {"axios": "^1.6.0", "core": "workspace:*"},
                "devDependencies": {"jest": "29.7.0"},
                "peerDependencies": {"react": ">=18"}
            }"#,
        )
        .unwrap();

        assert_eq!(manifest.name.as_deref(), Some("web"));
        assert_eq!(manifest.dependencies["core"], "workspace:*");
        assert_eq!(manifest.declared(DependencyKind::Dev)["jest"], "29.7.0");
        assert_eq!(manifest.declared(DependencyKind::Peer)["react"], ">=18");
        assert_eq!(manifest.declared_names().len(), 4);
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let manifest: PackageManifest = serde_json::from_str(r#"{"name": "lonely"}"#).unwrap();
        assert!(manifest.dependencies.is_empty());
        assert!(manifest.declared_names().is_empty());
    }

    #[test]
    fn test_null_section_and_non_string_versions_are_ignored() {
        let manifest: PackageManifest = serde_json::from_str(
            r#"{"dependencies": null, "devDependencies": {"ok": "1.0.0", "weird": {"version": "2"}}}"#,
        )
        .unwrap();
        assert!(manifest.dependencies.is_empty());
        assert_eq!(manifest.dev_dependencies.len(), 1);
        assert!(manifest.dev_dependencies.contains_key("ok"));
    }

    #[test]
    fn test_duplicate_key_last_write_wins() {
        let manifest: PackageManifest =
            serde_json::from_str(r#"{"dependencies": {"lodash": "1.0.0", "lodash": "4.17.21"}}"#)
                .unwrap();
        assert_eq!(manifest.dependencies["lodash"], "4.17.21");
    }

    #[test]
    fn test_declared_names_is_union() {
        let manifest: PackageManifest = serde_json::from_str(
            r#"{"dependencies": {"a": "1"}, "devDependencies": {"a": "2", "b": "1"}, "peerDependencies": {"c": "1"}}"#,
        )
        .unwrap();
        let names: Vec<String> = manifest.declared_names().into_iter().collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }
}
