use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A view path pattern such as `/task-details/:id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

/// Splits a location into path segments, dropping the query, fragment and
/// empty segments (so `/tasks/` and `/tasks` are the same view).
fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    path[..end].split('/').filter(|s| !s.is_empty())
}

impl RoutePattern {
    pub fn parse(raw: &str) -> Self {
        let segments = path_segments(raw)
            .map(|s| match s.strip_prefix(':') {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Literal(s.to_string()),
            })
            .collect();
        Self {
            raw: raw.to_string(),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Matches `path` segment by segment. Returns the captured parameters.
    pub fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
        let parts: Vec<&str> = path_segments(path).collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = HashMap::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) if literal == part => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => {
                    params.insert(name.clone(), part.to_string());
                }
            }
        }
        Some(params)
    }
}

/// A protected route that matched a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub pattern: String,
    pub params: HashMap<String, String>,
}

/// The set of views that need a session.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    protected: Vec<RoutePattern>,
}

impl RouteTable {
    pub fn new<I, S>(protected: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            protected: protected
                .into_iter()
                .map(|p| RoutePattern::parse(p.as_ref()))
                .collect(),
        }
    }

    pub fn protected_match(&self, path: &str) -> Option<RouteMatch> {
        self.protected.iter().find_map(|pattern| {
            pattern.matches(path).map(|params| RouteMatch {
                pattern: pattern.as_str().to_string(),
                params,
            })
        })
    }

    pub fn patterns(&self) -> impl Iterator<Item = &RoutePattern> {
        self.protected.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_patterns_match_exactly() {
        let pattern = RoutePattern::parse("/tasks");
        assert!(pattern.matches("/tasks").is_some());
        assert!(pattern.matches("/tasks/").is_some());
        assert!(pattern.matches("/tasks?sort=due").is_some());
        assert!(pattern.matches("/tasks/7").is_none());
        assert!(pattern.matches("/task").is_none());
        assert!(pattern.matches("/").is_none());
    }

    #[test]
    fn params_are_captured() {
        let pattern = RoutePattern::parse("/task-details/:id");
        let params = pattern.matches("/task-details/42#notes").unwrap();
        assert_eq!(params.get("id").map(String::as_str), Some("42"));
        assert!(pattern.matches("/task-details").is_none());
        assert!(pattern.matches("/task-details/42/edit").is_none());
    }

    #[test]
    fn root_pattern_matches_root_only() {
        let pattern = RoutePattern::parse("/");
        assert!(pattern.matches("/").is_some());
        assert!(pattern.matches("").is_some());
        assert!(pattern.matches("/login").is_none());
    }

    #[test]
    fn table_reports_matching_pattern() {
        let table = RouteTable::new(["/tasks", "/update-task/:id"]);
        let found = table.protected_match("/update-task/9").unwrap();
        assert_eq!(found.pattern, "/update-task/:id");
        assert_eq!(found.params["id"], "9");
        assert!(table.protected_match("/create-account").is_none());
    }
}
