use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// ImportScanner extracts module specifiers from JavaScript/TypeScript
/// source text and reduces them to candidate package names.
///
/// The scan is shallow: static `import`/`export ... from` statements and
/// `require()` calls only. Comments are removed before matching, and
/// statements may share a line when separated by `;`. Dynamic `import()`
/// is not traced, paths are not resolved, re-exports are not followed.
pub struct ImportScanner;

/// Node.js core modules; never declared in a manifest
const NODE_BUILTINS: &[&str] = &[
    "assert", "async_hooks", "buffer", "child_process", "cluster", "console", "constants",
    "crypto", "dgram", "diagnostics_channel", "dns", "domain", "events", "fs", "http", "http2",
    "https", "inspector", "module", "net", "os", "path", "perf_hooks", "process", "punycode",
    "querystring", "readline", "repl", "stream", "string_decoder", "timers", "tls", "trace_events",
    "tty", "url", "util", "v8", "vm", "wasi", "worker_threads", "zlib",
];

fn import_from_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?m)(?:^|;)\s*import\s+(?:type\s+)?(?:[\w$*{}\s,]+?\s+from\s+)?["']([^"'\n]+)["']"#)
            .expect("static import regex")
    })
}

fn export_from_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?m)(?:^|;)\s*export\s+(?:type\s+)?(?:\*(?:\s+as\s+[\w$]+)?|\{[^}]*\})\s*from\s+["']([^"'\n]+)["']"#)
            .expect("re-export regex")
    })
}

fn require_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"\brequire\s*\(\s*["']([^"'\n]+)["']\s*\)"#).expect("require regex")
    })
}

/// Removes `//` and `/* */` comments, leaving string and template literals
/// intact. Newlines inside block comments are kept so line starts survive.
fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    let mut quote: Option<char> = None;

    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            out.push(c);
            if c == '\\' {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            } else if c == q || (c == '\n' && q != '`') {
                quote = None;
            }
            continue;
        }

        match (c, chars.peek().copied()) {
            ('"' | '\'' | '`', _) => {
                quote = Some(c);
                out.push(c);
            }
            ('/', Some('/')) => {
                while chars.peek().is_some_and(|&n| n != '\n') {
                    chars.next();
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for n in chars.by_ref() {
                    if n == '\n' {
                        out.push('\n');
                    }
                    if prev == '*' && n == '/' {
                        break;
                    }
                    prev = n;
                }
                out.push(' ');
            }
            _ => out.push(c),
        }
    }
    out
}

impl ImportScanner {
    /// All distinct specifiers referenced by static import-style statements
    pub fn extract_specifiers(source: &str) -> BTreeSet<String> {
        let code = strip_comments(source);
        [import_from_regex(), export_from_regex(), require_regex()]
            .iter()
            .flat_map(|re| re.captures_iter(&code))
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Candidate package name for a specifier.
    ///
    /// Relative specifiers (leading '.') are internal and yield `None`.
    /// Scoped specifiers keep `@scope/name`; everything else keeps its
    /// first path segment.
    pub fn candidate(specifier: &str) -> Option<String> {
        let specifier = specifier.trim();
        if specifier.is_empty() || specifier.starts_with('.') {
            return None;
        }

        let mut segments = specifier.split('/');
        let first = segments.next().filter(|s| !s.is_empty())?;

        if first.starts_with('@') {
            return Some(match segments.next().filter(|s| !s.is_empty()) {
                Some(name) => format!("{}/{}", first, name),
                None => first.to_string(),
            });
        }

        Some(first.to_string())
    }

    /// True for `node:`-prefixed specifiers and bare core module names
    /// (including subpaths such as `fs/promises`)
    pub fn is_builtin(specifier: &str) -> bool {
        let specifier = specifier.trim();
        if specifier.starts_with("node:") {
            return true;
        }
        let first = specifier.split('/').next().unwrap_or_default();
        NODE_BUILTINS.contains(&first)
    }

    /// Scope part of a scoped package name (`@scope/name` -> `@scope`)
    pub fn scope_of(name: &str) -> Option<&str> {
        if !name.starts_with('@') {
            return None;
        }
        name.split('/').next()
    }
}
