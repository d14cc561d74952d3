//! Registry error types
//!
//! Error types for route registry operations. Look-ups never fail; only
//! malformed identities and duplicate mounts are reported.

use super::route::RouteKey;

/// Error type for registry operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A required identity field (`from` or `to`) is empty
    InvalidRoute {
        /// Name of the empty field
        field: &'static str,
        /// The offending route identity
        key: RouteKey,
    },
    /// A target instance is already mounted under this name
    TargetAlreadyRegistered(String),
    /// A source instance is already mounted under this name
    SourceAlreadyRegistered(String),
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::InvalidRoute { field, key } => {
                write!(f, "Invalid route ({}): `{}` must not be empty", key, field)
            }
            RegistryError::TargetAlreadyRegistered(name) => {
                write!(f, "Target already registered: {}", name)
            }
            RegistryError::SourceAlreadyRegistered(name) => {
                write!(f, "Source already registered: {}", name)
            }
        }
    }
}

impl std::error::Error for RegistryError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = RegistryError::InvalidRoute {
            field: "from",
            key: RouteKey::new("", "target"),
        };
        assert_eq!(
            err.to_string(),
            "Invalid route ( -> target): `from` must not be empty"
        );

        let err = RegistryError::TargetAlreadyRegistered("modal".into());
        assert_eq!(err.to_string(), "Target already registered: modal");
    }
}
