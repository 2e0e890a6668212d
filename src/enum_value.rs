//! The validated enum value wrapper.

use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::class::{ClassDescriptor, ClassId, EnumClass};
use crate::errors::MembershipError;
use crate::raw_value::{Candidate, RawValue};

/// One validated value of one enum class.
///
/// An `EnumValue` only ever exists in its checked state: the payload is a
/// declared member of its class, or was unwrapped from an instance of a
/// descendant class. A failed construction produces a
/// [`MembershipError`](crate::MembershipError) and nothing else; there is no
/// unchecked or invalid state to observe. Values are immutable once built.
#[derive(Debug, Clone)]
pub struct EnumValue {
    descriptor: Arc<ClassDescriptor>,
    raw: RawValue,
}

impl EnumValue {
    pub(crate) fn from_parts(descriptor: Arc<ClassDescriptor>, raw: RawValue) -> Self {
        EnumValue { descriptor, raw }
    }

    /// Validated constructor for class `C`; equivalent to `C::wrap(value)`.
    pub fn try_new<C: EnumClass>(value: impl Into<Candidate>) -> Result<Self, MembershipError> {
        C::wrap(value)
    }

    /// Identity of the class this value belongs to.
    pub fn class(&self) -> ClassId {
        self.descriptor.class()
    }

    /// Fully-qualified class name.
    pub fn class_name(&self) -> &'static str {
        self.descriptor.name()
    }

    /// Final class name segment, as used in diagnostics.
    pub fn short_class_name(&self) -> &'static str {
        self.descriptor.short_name()
    }

    /// The wrapped raw payload.
    pub fn raw(&self) -> &RawValue {
        &self.raw
    }

    /// Consumes the value, yielding its payload.
    pub fn into_raw(self) -> RawValue {
        self.raw
    }

    /// Symbolic name of the payload in the class declaration, if any.
    ///
    /// `None` for unnamed members and for payloads inherited through the
    /// subclass-acceptance rule that the class itself never declared.
    pub fn member_name(&self) -> Option<&str> {
        self.descriptor.permitted().name_of(&self.raw)
    }

    /// True if this value is acceptable where `class` is expected: its own
    /// class, or any ancestor of it.
    pub fn is_instance_of(&self, class: &ClassId) -> bool {
        self.descriptor.is_or_descends_from(class)
    }
}

impl PartialEq for EnumValue {
    /// Same class identity and strictly-equal payload.
    fn eq(&self, other: &Self) -> bool {
        self.class() == other.class() && self.raw == other.raw
    }
}

impl PartialEq<RawValue> for EnumValue {
    /// One-directional convenience: the payload alone is compared.
    fn eq(&self, other: &RawValue) -> bool {
        self.raw == *other
    }
}

impl PartialEq<Candidate> for EnumValue {
    fn eq(&self, other: &Candidate) -> bool {
        match other {
            Candidate::Raw(raw) => self.raw == *raw,
            Candidate::Wrapped(value) => self == value,
        }
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl Serialize for EnumValue {
    /// Serializes transparently as the raw payload.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.raw.serialize(serializer)
    }
}
