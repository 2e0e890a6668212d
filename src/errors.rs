//! Failure types raised by validation and declaration resolution.

use thiserror::Error;

use crate::raw_value::Candidate;
use crate::render;

/// A candidate value failed a class's membership test.
///
/// Recoverable and expected: the input is presumed malformed and correction
/// is up to the caller. The failure carries the original value unchanged and
/// the context key, when one was supplied, so call sites can build their own
/// messages without re-deriving anything.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct MembershipError {
    message: String,
    value: Candidate,
    key: Option<String>,
}

impl MembershipError {
    /// Failure phrased against the class name:
    /// `not a valid <ShortClassName>: <rendered value>`.
    pub fn for_class(value: Candidate, class_name: &str) -> Self {
        let message = format!(
            "not a valid {}: {}",
            render::short_name(class_name),
            render::render_candidate(&value)
        );
        MembershipError {
            message,
            value,
            key: None,
        }
    }

    /// Failure phrased against a caller-supplied input key:
    /// `not a valid '<key>': <rendered value>`.
    pub fn for_key(value: Candidate, key: &str) -> Self {
        let message = format!(
            "not a valid '{}': {}",
            key,
            render::render_candidate(&value)
        );
        MembershipError {
            message,
            value,
            key: Some(key.to_owned()),
        }
    }

    /// The rejected value, exactly as it was passed in.
    pub fn invalid_value(&self) -> &Candidate {
        &self.value
    }

    /// The input key the failing call was made with, if any.
    pub fn used_key(&self) -> Option<&str> {
        self.key.as_deref()
    }
}

/// An enum class declaration could not be enumerated.
///
/// This is a programming error in the declaration itself, not in user
/// input; callers are not expected to recover from it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclarationError {
    #[error("unknown enum class: {class}")]
    UnknownClass { class: String },

    #[error("malformed declaration for enum class {class}: {reason}")]
    Malformed { class: String, reason: String },
}

impl DeclarationError {
    pub fn unknown_class(class: impl Into<String>) -> Self {
        DeclarationError::UnknownClass {
            class: class.into(),
        }
    }

    pub fn malformed(class: impl Into<String>, reason: impl Into<String>) -> Self {
        DeclarationError::Malformed {
            class: class.into(),
            reason: reason.into(),
        }
    }
}

/// Umbrella for identity-keyed operations, which resolve declarations
/// before testing membership.
#[derive(Debug, Clone, Error)]
pub enum EnumError {
    #[error(transparent)]
    Membership(#[from] MembershipError),

    #[error(transparent)]
    Declaration(#[from] DeclarationError),
}

impl EnumError {
    /// The membership failure, when that is what this error is.
    pub fn as_membership(&self) -> Option<&MembershipError> {
        match self {
            EnumError::Membership(err) => Some(err),
            EnumError::Declaration(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw_value::RawValue;

    #[test]
    fn class_phrasing_uses_the_short_name() {
        let err = MembershipError::for_class(Candidate::from(5031), "app::enums::Priority");
        assert_eq!(err.to_string(), "not a valid Priority: 5031");
        assert_eq!(err.used_key(), None);
    }

    #[test]
    fn key_phrasing_quotes_the_key() {
        let err = MembershipError::for_key(Candidate::from(12), "myKey");
        assert_eq!(err.to_string(), "not a valid 'myKey': 12");
        assert_eq!(err.used_key(), Some("myKey"));
    }

    #[test]
    fn the_original_value_is_kept_unmodified() {
        let value = Candidate::from("zog+baz");
        let err = MembershipError::for_key(value.clone(), "k1");
        assert_eq!(err.invalid_value(), &value);

        let value = Candidate::from(-91.33);
        let err = MembershipError::for_class(value.clone(), "X");
        assert_eq!(err.invalid_value(), &value);
    }

    #[test]
    fn declaration_errors_format_their_class() {
        let err = DeclarationError::unknown_class("a::b::C");
        assert_eq!(err.to_string(), "unknown enum class: a::b::C");

        let err = DeclarationError::malformed("C", "cycle in ancestor chain");
        assert_eq!(
            err.to_string(),
            "malformed declaration for enum class C: cycle in ancestor chain"
        );
    }

    #[test]
    fn umbrella_exposes_the_membership_arm() {
        let err = EnumError::from(MembershipError::for_class(
            Candidate::Raw(RawValue::Null),
            "C",
        ));
        assert!(err.as_membership().is_some());

        let err = EnumError::from(DeclarationError::unknown_class("C"));
        assert!(err.as_membership().is_none());
    }
}
