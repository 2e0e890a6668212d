//! Dynamically-typed raw payloads and the strict equality contract.

use std::fmt;
use std::sync::Arc;

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::enum_value::EnumValue;

/// Renderable surface of an opaque payload.
///
/// Opaque payloads are values the closed tag set cannot express directly:
/// handles, foreign wrappers, countable containers. The surface is the only
/// thing diagnostics may touch; no serialization is ever attempted on the
/// value itself.
pub trait OpaqueSurface: fmt::Debug + Send + Sync + 'static {
    /// Fully-qualified type name. Diagnostics keep only the final `::` segment.
    fn type_name(&self) -> &str;

    /// Classifies how the value can be shown.
    fn surface(&self) -> Surface {
        Surface::Plain
    }
}

/// How an opaque payload presents itself to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Surface {
    /// A resource-style handle with an optional kind marker.
    Resource { kind: Option<String> },
    /// The value has a textual projection.
    Text(String),
    /// The value has an element count.
    Count(usize),
    /// Nothing beyond the type name can be shown.
    Plain,
}

/// A raw enum member or candidate payload.
///
/// Equality is strict: identical tag and identical value. There is no
/// numeric widening and no string/number coercion, so `Int(100)`,
/// `Str("100")` and `Float(100.0)` are three distinct values, and `Null`,
/// `Bool(false)` and `Str("")` never compare equal to each other.
///
/// Floats compare with IEEE semantics (`0.0 == -0.0`, `NaN` is never equal).
/// Opaque payloads compare by handle identity.
#[derive(Debug, Clone)]
pub enum RawValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<RawValue>),
    Opaque(Arc<dyn OpaqueSurface>),
}

impl RawValue {
    /// Wraps an opaque value in a shared handle.
    pub fn opaque(value: impl OpaqueSurface) -> Self {
        RawValue::Opaque(Arc::new(value))
    }

    /// Returns true for the `Null` tag.
    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }

    /// Tag name used in deserialization errors and debug output.
    pub fn tag(&self) -> &'static str {
        match self {
            RawValue::Null => "null",
            RawValue::Bool(_) => "bool",
            RawValue::Int(_) => "int",
            RawValue::Float(_) => "float",
            RawValue::Str(_) => "string",
            RawValue::List(_) => "list",
            RawValue::Opaque(_) => "opaque",
        }
    }
}

impl PartialEq for RawValue {
    fn eq(&self, other: &Self) -> bool {
        use RawValue::*;
        match (self, other) {
            (Null, Null) => true,
            (Bool(a), Bool(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (Str(a), Str(b)) => a == b,
            (List(a), List(b)) => a == b,
            (Opaque(a), Opaque(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for RawValue {
    /// Plain textual projection: scalars unquoted, containers and opaque
    /// values in their diagnostic form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Null => f.write_str("null"),
            RawValue::Bool(value) => write!(f, "{}", value),
            RawValue::Int(value) => write!(f, "{}", value),
            RawValue::Float(value) => write!(f, "{}", value),
            RawValue::Str(value) => f.write_str(value),
            other => f.write_str(&crate::render::render(other)),
        }
    }
}

impl Serialize for RawValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            RawValue::Null => serializer.serialize_unit(),
            RawValue::Bool(value) => serializer.serialize_bool(*value),
            RawValue::Int(value) => serializer.serialize_i64(*value),
            RawValue::Float(value) => serializer.serialize_f64(*value),
            RawValue::Str(value) => serializer.serialize_str(value),
            RawValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            RawValue::Opaque(opaque) => match opaque.surface() {
                Surface::Text(text) => serializer.serialize_str(&text),
                _ => Err(serde::ser::Error::custom(format!(
                    "opaque value {} has no serializable projection",
                    opaque.type_name()
                ))),
            },
        }
    }
}

impl<'de> Deserialize<'de> for RawValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RawValueVisitor;

        impl<'de> Visitor<'de> for RawValueVisitor {
            type Value = RawValue;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("null, a boolean, a number, a string, or a sequence")
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(RawValue::Null)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(RawValue::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                RawValue::deserialize(deserializer)
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(RawValue::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(RawValue::Int(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                i64::try_from(value)
                    .map(RawValue::Int)
                    .map_err(|_| E::custom("integer value out of range"))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(RawValue::Float(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(RawValue::Str(value.to_owned()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(RawValue::Str(value))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(item) = seq.next_element::<RawValue>()? {
                    items.push(item);
                }
                Ok(RawValue::List(items))
            }
        }

        deserializer.deserialize_any(RawValueVisitor)
    }
}

impl TryFrom<serde_json::Value> for RawValue {
    type Error = serde_json::Error;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        serde_json::from_value(value)
    }
}

/// A value submitted for membership testing: a bare raw value or an
/// already-wrapped enum instance.
#[derive(Debug, Clone, PartialEq)]
pub enum Candidate {
    Raw(RawValue),
    Wrapped(EnumValue),
}

impl Candidate {
    /// True only for the bare `Null` tag; a wrapped instance is never absent.
    pub fn is_null(&self) -> bool {
        matches!(self, Candidate::Raw(RawValue::Null))
    }

    /// The raw payload carried by this candidate.
    pub fn payload(&self) -> &RawValue {
        match self {
            Candidate::Raw(raw) => raw,
            Candidate::Wrapped(value) => value.raw(),
        }
    }

    /// Consumes the candidate, yielding the raw payload (unwrapping
    /// instances).
    pub fn into_payload(self) -> RawValue {
        match self {
            Candidate::Raw(raw) => raw,
            Candidate::Wrapped(value) => value.into_raw(),
        }
    }
}

impl From<RawValue> for Candidate {
    fn from(value: RawValue) -> Self {
        Candidate::Raw(value)
    }
}

impl From<EnumValue> for Candidate {
    fn from(value: EnumValue) -> Self {
        Candidate::Wrapped(value)
    }
}

impl From<&EnumValue> for Candidate {
    fn from(value: &EnumValue) -> Self {
        Candidate::Wrapped(value.clone())
    }
}

macro_rules! impl_raw_from {
    ($($source:ty => $variant:ident),* $(,)?) => {$(
        impl From<$source> for RawValue {
            fn from(value: $source) -> Self {
                RawValue::$variant(value.into())
            }
        }

        impl From<$source> for Candidate {
            fn from(value: $source) -> Self {
                Candidate::Raw(RawValue::from(value))
            }
        }
    )*};
}

impl_raw_from! {
    bool => Bool,
    i32 => Int,
    u32 => Int,
    i64 => Int,
    f64 => Float,
    &str => Str,
    String => Str,
    Vec<RawValue> => List,
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => RawValue::Null,
        }
    }
}

impl<T: Into<RawValue>> From<Option<T>> for Candidate {
    fn from(value: Option<T>) -> Self {
        Candidate::Raw(RawValue::from(value))
    }
}
