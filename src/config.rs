//! Static endpoint and environment configuration.
//!
//! Maps logical resource names to relative URL path segments and named
//! server environments to base URLs. Both mappings are fixed at compile
//! time; they exist so call sites never hardcode path strings.

/// Logical API resources and their relative path segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Register,
    Login,
    Trips,
    Events,
    Media,
}

impl Endpoint {
    pub const fn path(self) -> &'static str {
        match self {
            Endpoint::Register => "register",
            Endpoint::Login => "token",
            Endpoint::Trips => "trips",
            Endpoint::Events => "events",
            Endpoint::Media => "media",
        }
    }
}

/// Named server environments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Local development server.
    #[default]
    Local,
}

impl Environment {
    pub const fn base_url(self) -> &'static str {
        match self {
            Environment::Local => "http://localhost:8000/",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_paths() {
        assert_eq!(Endpoint::Register.path(), "register");
        assert_eq!(Endpoint::Login.path(), "token");
        assert_eq!(Endpoint::Trips.path(), "trips");
        assert_eq!(Endpoint::Events.path(), "events");
        assert_eq!(Endpoint::Media.path(), "media");
    }

    #[test]
    fn local_base_url_parses() {
        let base = url::Url::parse(Environment::Local.base_url()).unwrap();
        assert_eq!(
            base.join("trips").unwrap().as_str(),
            "http://localhost:8000/trips"
        );
    }
}
