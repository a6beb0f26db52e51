use super::Route;
use regex::Regex;
use std::sync::OnceLock;

/// Words that follow "project"/"using" in ordinary phrasing and are never names
const STOPWORDS: &[&str] = &[
    "a", "all", "an", "and", "any", "are", "depend", "depends", "do", "does", "for", "has",
    "have", "in", "is", "it", "its", "my", "of", "on", "our", "that", "the", "these", "this",
    "those", "to", "use", "uses", "using", "what", "which", "with",
];

enum Matcher {
    /// Pattern rule that may capture an argument
    Pattern(fn(&str) -> Option<Route>),
    /// Case-insensitive substring rule
    Keywords {
        keywords: &'static [&'static str],
        route: fn() -> Route,
    },
}

/// One entry of the routing table
pub struct RouteRule {
    name: &'static str,
    matcher: Matcher,
}

impl RouteRule {
    fn pattern(name: &'static str, matcher: fn(&str) -> Option<Route>) -> Self {
        Self {
            name,
            matcher: Matcher::Pattern(matcher),
        }
    }

    fn keywords(name: &'static str, keywords: &'static [&'static str], route: fn() -> Route) -> Self {
        Self {
            name,
            matcher: Matcher::Keywords { keywords, route },
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn matches(&self, text: &str) -> Option<Route> {
        match &self.matcher {
            Matcher::Pattern(matcher) => matcher(text),
            Matcher::Keywords { keywords, route } => {
                let lowered = text.to_lowercase();
                keywords
                    .iter()
                    .any(|k| lowered.contains(k))
                    .then(*route)
            }
        }
    }
}

/// QueryRouter maps free text onto exactly one analysis.
///
/// Rules are evaluated in order and the first match wins:
/// project-specific questions, then "who uses X" questions, then single
/// keyword routes. Text matching nothing falls through to the structure
/// overview, so routing never fails.
pub struct QueryRouter {
    rules: Vec<RouteRule>,
}

impl Default for QueryRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryRouter {
    pub fn new() -> Self {
        let rules = vec![
            RouteRule::pattern("project-dependencies", match_project_dependencies),
            RouteRule::pattern("used-by", match_used_by),
            RouteRule::keywords(
                "inconsistencies",
                &["version", "inconsisten", "mismatch"],
                || Route::Inconsistencies,
            ),
            RouteRule::keywords("unused", &["unused"], || Route::Unused(None)),
            RouteRule::keywords("outdated", &["outdated", "update", "latest"], || {
                Route::Outdated
            }),
            RouteRule::keywords(
                "security",
                &["security", "vulnerab", "audit", "cve"],
                || Route::Security,
            ),
            RouteRule::keywords("circular", &["circular", "cycle", "cyclic"], || {
                Route::Circular
            }),
            RouteRule::keywords("graph", &["graph", "tree", "relationship"], || {
                Route::Graph(None)
            }),
        ];
        Self { rules }
    }

    /// Routing table in evaluation order
    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }

    pub fn route(&self, text: &str) -> Route {
        self.rules
            .iter()
            .find_map(|rule| rule.matches(text))
            .unwrap_or(Route::Structure)
    }
}

fn project_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)\b(?:project|package)\s+["'`]?([@a-z0-9][\w@./-]*)"#)
            .expect("project query regex")
    })
}

fn used_by_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?i)\b(?:using|uses|use|depends?\s+on|depending\s+on|requires?|imports?(?:\s+from)?)\s+["'`]?([@a-z0-9][\w@./-]*)"#,
        )
        .expect("used-by query regex")
    })
}

/// First capture of `re` in `text` that is a plausible name
fn captured_name(re: &Regex, text: &str) -> Option<String> {
    re.captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim_end_matches(['.', '/', '-']).to_string())
        .find(|name| !name.is_empty() && !STOPWORDS.contains(&name.to_lowercase().as_str()))
}

fn match_project_dependencies(text: &str) -> Option<Route> {
    captured_name(project_regex(), text).map(Route::ProjectDeps)
}

fn match_used_by(text: &str) -> Option<Route> {
    captured_name(used_by_regex(), text).map(Route::UsedBy)
}
