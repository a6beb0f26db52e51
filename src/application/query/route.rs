use crate::shared::error::AnalysisError;
use crate::shared::Result;

/// One analysis of the query surface, with its argument when it takes one
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Structure,
    Inconsistencies,
    Unused(Option<String>),
    Outdated,
    Graph(Option<String>),
    Circular,
    Security,
    UsedBy(String),
    ProjectDeps(String),
}

/// Operation names accepted by [`Route::from_operation`]
pub const ROUTE_OPERATIONS: &[&str] = &[
    "getStructure",
    "getVersionInconsistencies",
    "getUnusedDependencies",
    "getOutdatedDependencies",
    "getDependencyGraph",
    "getCircularDependencies",
    "getSecurityVulnerabilities",
    "getPackagesUsingDependency",
    "getProjectDependencies",
];

impl Route {
    pub fn operation_name(&self) -> &'static str {
        match self {
            Route::Structure => "getStructure",
            Route::Inconsistencies => "getVersionInconsistencies",
            Route::Unused(_) => "getUnusedDependencies",
            Route::Outdated => "getOutdatedDependencies",
            Route::Graph(_) => "getDependencyGraph",
            Route::Circular => "getCircularDependencies",
            Route::Security => "getSecurityVulnerabilities",
            Route::UsedBy(_) => "getPackagesUsingDependency",
            Route::ProjectDeps(_) => "getProjectDependencies",
        }
    }

    pub fn argument(&self) -> Option<&str> {
        match self {
            Route::Unused(arg) | Route::Graph(arg) => arg.as_deref(),
            Route::UsedBy(arg) | Route::ProjectDeps(arg) => Some(arg),
            _ => None,
        }
    }

    /// Cache key of the analysis result this route produces
    pub fn cache_key(&self) -> String {
        match self {
            Route::Structure => "structure".to_string(),
            Route::Inconsistencies => "inconsistencies".to_string(),
            Route::Unused(project) => format!("unused:{}", project.as_deref().unwrap_or("*")),
            Route::Outdated => "outdated".to_string(),
            Route::Graph(project) => format!("graph:{}", project.as_deref().unwrap_or("*")),
            Route::Circular => "circular".to_string(),
            Route::Security => "security".to_string(),
            Route::UsedBy(dep) => format!("used-by:{}", dep),
            Route::ProjectDeps(name) => format!("project-deps:{}", name),
        }
    }

    /// Maps an operation name and optional argument to a route
    ///
    /// # Errors
    /// * `UnknownOperation` for names outside [`ROUTE_OPERATIONS`]
    /// * `Validation` when the operation requires an argument and none is given
    pub fn from_operation(name: &str, argument: Option<&str>) -> Result<Route> {
        let argument = argument.map(str::trim).filter(|a| !a.is_empty());

        let required = |op: &str| -> Result<String> {
            argument.map(str::to_string).ok_or_else(|| {
                AnalysisError::Validation {
                    message: format!("Operation '{}' requires an argument", op),
                }
                .into()
            })
        };

        let route = match name.trim() {
            "getStructure" => Route::Structure,
            "getVersionInconsistencies" => Route::Inconsistencies,
            "getUnusedDependencies" => Route::Unused(argument.map(str::to_string)),
            "getOutdatedDependencies" => Route::Outdated,
            "getDependencyGraph" => Route::Graph(argument.map(str::to_string)),
            "getCircularDependencies" => Route::Circular,
            "getSecurityVulnerabilities" => Route::Security,
            "getPackagesUsingDependency" => Route::UsedBy(required(name)?),
            "getProjectDependencies" => Route::ProjectDeps(required(name)?),
            other => {
                return Err(AnalysisError::UnknownOperation {
                    name: other.to_string(),
                    valid: ROUTE_OPERATIONS.join(", "),
                }
                .into())
            }
        };
        Ok(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_operation_roundtrips_names() {
        for name in ROUTE_OPERATIONS {
            let route = Route::from_operation(name, Some("x")).unwrap();
            assert_eq!(route.operation_name(), *name);
        }
    }

    #[test]
    fn test_from_operation_requires_argument() {
        let err = Route::from_operation("getProjectDependencies", None).unwrap_err();
        assert!(err.to_string().contains("requires an argument"));

        let err = Route::from_operation("getPackagesUsingDependency", Some("  ")).unwrap_err();
        assert!(err.to_string().contains("requires an argument"));
    }

    #[test]
    fn test_from_operation_unknown() {
        let err = Route::from_operation("dropTables", None).unwrap_err();
        assert!(err.to_string().contains("Unknown operation: dropTables"));
    }

    #[test]
    fn test_cache_keys() {
        assert_eq!(Route::Unused(None).cache_key(), "unused:*");
        assert_eq!(Route::Graph(Some("api".into())).cache_key(), "graph:api");
        assert_eq!(Route::UsedBy("lodash".into()).cache_key(), "used-by:lodash");
        assert_eq!(Route::ProjectDeps("web".into()).cache_key(), "project-deps:web");
    }

    #[test]
    fn test_argument() {
        assert_eq!(Route::UsedBy("react".into()).argument(), Some("react"));
        assert_eq!(Route::Graph(None).argument(), None);
        assert_eq!(Route::Circular.argument(), None);
    }
}
