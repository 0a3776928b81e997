use regex::Regex;
use std::sync::Arc;

use crate::error::Error;
use crate::request::ParamVec;

/// A compiled path pattern: literal segments plus `:name` placeholders.
///
/// Matching is purely structural (segment count and literal-segment
/// equality) with one extracted value per placeholder. There are no partial
/// or prefix matches.
#[derive(Debug, Clone)]
pub struct PathPattern {
    raw: String,
    regex: Regex,
    params: Vec<Arc<str>>,
}

impl PathPattern {
    /// Compile a `:name`-style pattern into an anchored matcher.
    ///
    /// Placeholder segments become `([^/]+)` captures; literal segments are
    /// matched verbatim. Empty segments (`//`) are collapsed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] for an empty pattern, an unnamed
    /// placeholder (`/users/:`), or a placeholder name used twice.
    pub fn compile(pattern: &str) -> Result<Self, Error> {
        if pattern.is_empty() {
            return Err(Error::InvalidPattern {
                pattern: pattern.to_string(),
                reason: "pattern must not be empty".to_string(),
            });
        }

        if pattern == "/" {
            let regex = Regex::new(r"^/$").map_err(|e| Error::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })?;
            return Ok(Self {
                raw: pattern.to_string(),
                regex,
                params: Vec::new(),
            });
        }

        let mut source = String::with_capacity(pattern.len() + 8);
        source.push('^');
        let mut params: Vec<Arc<str>> = Vec::with_capacity(pattern.matches(':').count());

        for segment in pattern.split('/') {
            if segment.is_empty() {
                continue;
            }
            if let Some(name) = segment.strip_prefix(':') {
                if name.is_empty() {
                    return Err(Error::InvalidPattern {
                        pattern: pattern.to_string(),
                        reason: "placeholder segment has no name".to_string(),
                    });
                }
                if params.iter().any(|p| p.as_ref() == name) {
                    return Err(Error::InvalidPattern {
                        pattern: pattern.to_string(),
                        reason: format!("placeholder ':{name}' appears more than once"),
                    });
                }
                source.push_str("/([^/]+)");
                params.push(Arc::from(name));
            } else {
                source.push('/');
                source.push_str(&regex::escape(segment));
            }
        }
        source.push('$');

        let regex = Regex::new(&source).map_err(|e| Error::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            raw: pattern.to_string(),
            regex,
            params,
        })
    }

    /// Match a concrete path, extracting one value per placeholder.
    ///
    /// Returns `None` on a structural mismatch; never fails.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<ParamVec> {
        let captures = self.regex.captures(path)?;
        let mut extracted = ParamVec::new();
        for (idx, name) in self.params.iter().enumerate() {
            if let Some(value) = captures.get(idx + 1) {
                extracted.push((Arc::clone(name), value.as_str().to_string()));
            }
        }
        Some(extracted)
    }

    /// The pattern as registered.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Ordered placeholder names.
    #[must_use]
    pub fn param_names(&self) -> &[Arc<str>] {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pattern: &str, path: &str) -> Option<Vec<(String, String)>> {
        PathPattern::compile(pattern)
            .expect("pattern compiles")
            .match_path(path)
            .map(|p| p.iter().map(|(k, v)| (k.to_string(), v.clone())).collect())
    }

    #[test]
    fn literal_pattern_matches_exactly() {
        assert_eq!(params("/users", "/users"), Some(vec![]));
        assert_eq!(params("/users", "/users/42"), None);
        assert_eq!(params("/users", "/user"), None);
    }

    #[test]
    fn root_pattern() {
        assert_eq!(params("/", "/"), Some(vec![]));
        assert_eq!(params("/", "/users"), None);
    }

    #[test]
    fn placeholders_extract_segments() {
        assert_eq!(
            params("/users/:id", "/users/42"),
            Some(vec![("id".to_string(), "42".to_string())])
        );
        assert_eq!(
            params("/users/:id/posts/:post_id", "/users/7/posts/9"),
            Some(vec![
                ("id".to_string(), "7".to_string()),
                ("post_id".to_string(), "9".to_string()),
            ])
        );
    }

    #[test]
    fn no_prefix_matches() {
        assert_eq!(params("/users/:id", "/users/42/posts"), None);
        assert_eq!(params("/users/:id", "/users"), None);
    }

    #[test]
    fn literal_segments_are_escaped() {
        // a regex metacharacter in a literal segment must match itself only
        assert_eq!(params("/v1.0/ping", "/v1.0/ping"), Some(vec![]));
        assert_eq!(params("/v1.0/ping", "/v1x0/ping"), None);
    }

    #[test]
    fn rejects_unnamed_placeholder() {
        assert!(matches!(
            PathPattern::compile("/users/:"),
            Err(Error::InvalidPattern { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_placeholder() {
        assert!(matches!(
            PathPattern::compile("/a/:id/b/:id"),
            Err(Error::InvalidPattern { .. })
        ));
    }

    #[test]
    fn rejects_empty_pattern() {
        assert!(matches!(
            PathPattern::compile(""),
            Err(Error::InvalidPattern { .. })
        ));
    }
}
