//! Error types for anim construction, completion and evaluation.

use thiserror::Error;

use crate::incomplete::Param;

/// Errors raised by the anim engine.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum AnimError {
    /// A constructor or layout declaration received an unusable argument.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// An attribute name that the slot layout does not declare.
    #[error("unexpected attribute {name:?}")]
    UnknownAttribute { name: String },

    /// Completion was forced while parameters were still unset.
    #[error("unable to complete missing arguments: {}", .missing.join(", "))]
    MissingArguments { missing: Vec<&'static str> },

    /// Easing names are resolved lazily, so this surfaces at completion time.
    #[error("unknown easing method: {name}")]
    UnknownEasing { name: String },

    /// Evaluation hit an undefined operation (division by zero, zero-width wrap).
    #[error("domain error: {reason}")]
    Domain { reason: String },

    /// A slot reader whose slot was dropped together with its owner.
    #[error("slot reader outlived its slot")]
    SlotDropped,
}

impl AnimError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    pub fn domain(reason: impl Into<String>) -> Self {
        Self::Domain {
            reason: reason.into(),
        }
    }

    pub fn missing(params: impl IntoIterator<Item = Param>) -> Self {
        Self::MissingArguments {
            missing: params.into_iter().map(Param::name).collect(),
        }
    }

    /// Error category for logging.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } | Self::UnknownAttribute { .. } => "argument",
            Self::MissingArguments { .. } => "completion",
            Self::UnknownEasing { .. } => "easing",
            Self::Domain { .. } => "domain",
            Self::SlotDropped => "slot",
        }
    }
}

pub type Result<T> = std::result::Result<T, AnimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_arguments_lists_names() {
        let err = AnimError::missing([Param::Start, Param::Startt]);
        assert_eq!(
            err.to_string(),
            "unable to complete missing arguments: start, startt"
        );
        assert_eq!(err.category(), "completion");
    }

    #[test]
    fn categories() {
        assert_eq!(AnimError::invalid("x").category(), "argument");
        assert_eq!(
            AnimError::UnknownAttribute { name: "z".into() }.category(),
            "argument"
        );
        assert_eq!(AnimError::domain("division by zero").category(), "domain");
        assert_eq!(AnimError::SlotDropped.category(), "slot");
    }
}
