//! Navigation targets and public path handling

/// Login entry point
pub const LOGIN: &str = "/login";

/// Registration page, reachable without a session
pub const REGISTER: &str = "/register";

/// Shown when an authenticated user lacks the required role
pub const ACCESS_DENIED: &str = "/access-denied";

/// Admin dashboard root
pub const ADMIN: &str = "/admin";

/// Paths that render without any authentication check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicPaths {
    paths: Vec<String>,
}

impl PublicPaths {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// Exact match, ignoring a single trailing slash
    pub fn contains(&self, path: &str) -> bool {
        let path = normalize(path);
        self.paths.iter().any(|p| normalize(p) == path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }
}

impl Default for PublicPaths {
    fn default() -> Self {
        Self::new([LOGIN, REGISTER])
    }
}

fn normalize(path: &str) -> &str {
    if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else {
        path
    }
}
