//! Endpoint descriptors: HTTP method + path pattern pairs owned by a role.

use serde::{Deserialize, Serialize};

use rolegate_core::{RbacError, ValueObject};

/// HTTP methods understood by the endpoint resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    pub const ALL: &'static [HttpMethod] = &[
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
        HttpMethod::Head,
        HttpMethod::Options,
    ];

    /// GET, POST, PUT and DELETE.
    pub const CRUD: &'static [HttpMethod] = &[
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

impl core::str::FromStr for HttpMethod {
    type Err = RbacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| RbacError::unknown_method(s))
    }
}

/// Static form of an [`EndpointDescriptor`], as declared in role tables.
#[derive(Debug, Clone, Copy)]
pub struct EndpointSpec {
    pub pattern: &'static str,
    pub methods: &'static [HttpMethod],
}

/// Static declaration of the permissions an endpoint requires.
#[derive(Debug, Clone, Copy)]
pub struct EndpointPermissionSpec {
    pub pattern: &'static str,
    pub methods: &'static [HttpMethod],
    pub permissions: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PathSegment {
    Literal(String),
    Param,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PatternKind {
    Structured {
        segments: Vec<PathSegment>,
        trailing_wildcard: bool,
    },
    /// Anything that failed to parse is compared as an exact string.
    Literal,
}

/// Path pattern with `:param` segments and an optional trailing `/*`.
///
/// - `/users/:id` matches `/users/42` but not `/users` or `/users/42/roles`.
/// - `/admin/*` matches `/admin` and everything below it, on a segment boundary
///   (`/administrator` does not match).
/// - `/*` matches every absolute path.
///
/// Patterns that are not absolute, contain empty segments, a bare `:` or a `*`
/// anywhere other than the final segment are treated as exact literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    kind: PatternKind,
}

impl PathPattern {
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let kind = structure(&raw).unwrap_or(PatternKind::Literal);
        Self { raw, kind }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether the pattern was understood structurally (otherwise exact-match only).
    pub fn is_structured(&self) -> bool {
        matches!(self.kind, PatternKind::Structured { .. })
    }

    pub fn matches(&self, path: &str) -> bool {
        let PatternKind::Structured {
            segments,
            trailing_wildcard,
        } = &self.kind
        else {
            return self.raw == path;
        };
        let Some(rest) = path.strip_prefix('/') else {
            return false;
        };
        let parts: Vec<&str> = if rest.is_empty() {
            Vec::new()
        } else {
            rest.split('/').collect()
        };

        if parts.len() < segments.len() || (!trailing_wildcard && parts.len() != segments.len()) {
            return false;
        }
        segments
            .iter()
            .zip(&parts)
            .all(|(segment, part)| match segment {
                PathSegment::Literal(lit) => lit == part,
                PathSegment::Param => !part.is_empty(),
            })
    }
}

fn structure(raw: &str) -> Option<PatternKind> {
    let rest = raw.strip_prefix('/')?;
    let mut parts: Vec<&str> = if rest.is_empty() {
        Vec::new()
    } else {
        rest.split('/').collect()
    };

    let trailing_wildcard = parts.last() == Some(&"*");
    if trailing_wildcard {
        parts.pop();
    }

    let mut segments = Vec::with_capacity(parts.len());
    for part in parts {
        if part.is_empty() || part.contains('*') {
            return None;
        }
        match part.strip_prefix(':') {
            Some("") => return None,
            Some(_) => segments.push(PathSegment::Param),
            None => segments.push(PathSegment::Literal(part.to_string())),
        }
    }

    Some(PatternKind::Structured {
        segments,
        trailing_wildcard,
    })
}

impl Serialize for PathPattern {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

/// A path pattern together with the methods allowed on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointDescriptor {
    pub pattern: PathPattern,
    pub methods: Vec<HttpMethod>,
}

impl EndpointDescriptor {
    pub fn new(pattern: impl Into<String>, methods: impl IntoIterator<Item = HttpMethod>) -> Self {
        Self {
            pattern: PathPattern::parse(pattern),
            methods: methods.into_iter().collect(),
        }
    }

    pub fn allows(&self, method: HttpMethod, path: &str) -> bool {
        self.methods.contains(&method) && self.pattern.matches(path)
    }
}

impl From<&EndpointSpec> for EndpointDescriptor {
    fn from(spec: &EndpointSpec) -> Self {
        Self::new(spec.pattern, spec.methods.iter().copied())
    }
}

impl ValueObject for EndpointDescriptor {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_parsing_is_case_insensitive() {
        assert_eq!("delete".parse::<HttpMethod>().unwrap(), HttpMethod::Delete);
        assert_eq!("GET".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert!(matches!(
            "BREW".parse::<HttpMethod>(),
            Err(RbacError::UnknownMethod(m)) if m == "BREW"
        ));
    }

    #[test]
    fn trailing_wildcard_matches_prefix_on_segment_boundary() {
        let p = PathPattern::parse("/admin/*");
        assert!(p.matches("/admin"));
        assert!(p.matches("/admin/users"));
        assert!(p.matches("/admin/users/42"));
        assert!(!p.matches("/administrator"));
        assert!(!p.matches("/public/info"));
    }

    #[test]
    fn root_wildcard_matches_every_absolute_path() {
        let p = PathPattern::parse("/*");
        assert!(p.matches("/"));
        assert!(p.matches("/anything/at/all"));
        assert!(!p.matches("relative"));
    }

    #[test]
    fn params_match_exactly_one_segment() {
        let p = PathPattern::parse("/users/:id");
        assert!(p.matches("/users/42"));
        assert!(!p.matches("/users"));
        assert!(!p.matches("/users/"));
        assert!(!p.matches("/users/42/roles"));
    }

    #[test]
    fn exact_patterns_do_not_match_children() {
        let p = PathPattern::parse("/profile");
        assert!(p.matches("/profile"));
        assert!(!p.matches("/profile/avatar"));
    }

    #[test]
    fn malformed_patterns_fall_back_to_literal_matching() {
        for raw in ["admin/*", "/a/*/b", "/a//b", "/users/:", "/files*"] {
            let p = PathPattern::parse(raw);
            assert!(!p.is_structured(), "{raw} should be literal");
            assert!(p.matches(raw));
        }
        assert!(!PathPattern::parse("/a/*/b").matches("/a/x/b"));
    }

    #[test]
    fn descriptor_requires_method_and_path() {
        let d = EndpointDescriptor::new("/admin/*", HttpMethod::CRUD.iter().copied());
        assert!(d.allows(HttpMethod::Delete, "/admin/users/42"));
        assert!(!d.allows(HttpMethod::Patch, "/admin/users/42"));
        assert!(!d.allows(HttpMethod::Delete, "/public/info"));
    }
}
