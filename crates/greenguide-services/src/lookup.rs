//! Outcome of a single external lookup.
//!
//! Every client answers with [`Lookup`] instead of swallowing failures, so the
//! page decides whether to render data, an empty notice, or an error.

use crate::error::ServiceError;

/// Found, nothing found, or failed with a reason.
#[derive(Debug)]
pub enum Lookup<T> {
    Found(T),
    Empty,
    Failed(ServiceError),
}

impl<T> Lookup<T> {
    /// Wrap a value that may legitimately be absent.
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Found(v),
            None => Self::Empty,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// The value, dropping the distinction between empty and failed.
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(v) => Some(v),
            Self::Empty | Self::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ServiceError> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Self::Found(v) => Lookup::Found(f(v)),
            Self::Empty => Lookup::Empty,
            Self::Failed(e) => Lookup::Failed(e),
        }
    }
}

impl<T> From<Result<Option<T>, ServiceError>> for Lookup<T> {
    fn from(result: Result<Option<T>, ServiceError>) -> Self {
        match result {
            Ok(value) => Self::from_option(value),
            Err(e) => Self::Failed(e),
        }
    }
}

/// How a component's failures reach the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Render the failure inline next to the page output.
    Visible,
    /// Log it and fall back to defaults; the page never shows it.
    Silent,
}

/// Identity and failure policy of an external lookup.
pub trait Service {
    /// Short name used in logs.
    const NAME: &'static str;
    const FAILURE_POLICY: FailurePolicy;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_result() {
        let found: Lookup<u8> = Ok(Some(3)).into();
        assert!(found.is_found());

        let empty: Lookup<u8> = Ok(None).into();
        assert!(empty.is_empty());

        let failed: Lookup<u8> = Err(ServiceError::Parse("x".into())).into();
        assert!(failed.is_failed());
        assert!(failed.error().is_some());
    }

    #[test]
    fn test_found_drops_failure() {
        let failed: Lookup<u8> = Lookup::Failed(ServiceError::Client("x".into()));
        assert_eq!(failed.found(), None);
        assert_eq!(Lookup::Found(7).found(), Some(7));
    }

    #[test]
    fn test_map_preserves_variant() {
        assert!(matches!(Lookup::Found(2).map(|v| v * 2), Lookup::Found(4)));
        assert!(Lookup::<u8>::Empty.map(|v| v * 2).is_empty());
    }
}
