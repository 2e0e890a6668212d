//! Enum class identity, member declarations, and the declaration trait.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::enum_value::EnumValue;
use crate::errors::MembershipError;
use crate::membership::MembershipChecker;
use crate::raw_value::{Candidate, RawValue};
use crate::registry::EnumRegistry;
use crate::render;
use crate::validator::check_class;

/// Stable identity of one concrete enum class.
///
/// Two identities are equal iff they denote the exact same class; a subclass
/// has its own identity even though it is behaviorally compatible with its
/// parent. Equality and hashing use only the type identity; the name is
/// diagnostic metadata.
#[derive(Debug, Clone, Copy)]
pub struct ClassId {
    type_id: TypeId,
    name: &'static str,
}

impl ClassId {
    /// Identity of the class tagged by the Rust type `C`, named after it.
    pub fn of<C: 'static>() -> Self {
        ClassId {
            type_id: TypeId::of::<C>(),
            name: std::any::type_name::<C>(),
        }
    }

    /// Identity of `C` under an explicit diagnostic name.
    pub fn named<C: 'static>(name: &'static str) -> Self {
        ClassId {
            type_id: TypeId::of::<C>(),
            name,
        }
    }

    /// Fully-qualified diagnostic name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Final name segment, as shown in diagnostics.
    pub fn short_name(&self) -> &'static str {
        render::short_name(self.name)
    }
}

impl PartialEq for ClassId {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ClassId {}

impl Hash for ClassId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// One declared member: an optional symbolic name and a raw value.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    name: Option<String>,
    value: RawValue,
}

impl Member {
    /// A member carrying a symbolic name.
    pub fn named(name: impl Into<String>, value: impl Into<RawValue>) -> Self {
        Member {
            name: Some(name.into()),
            value: value.into(),
        }
    }

    /// A member declared by value alone.
    pub fn unnamed(value: impl Into<RawValue>) -> Self {
        Member {
            name: None,
            value: value.into(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn value(&self) -> &RawValue {
        &self.value
    }
}

/// The ordered set of values one enum class accepts.
///
/// Empty sets are legal; such a class rejects every input. Duplicate values
/// are tolerated but logged, since the declaration contract expects
/// uniqueness.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PermittedSet {
    members: Vec<Member>,
}

impl PermittedSet {
    pub fn new(members: Vec<Member>) -> Self {
        for (index, member) in members.iter().enumerate() {
            if members[..index].iter().any(|m| m.value() == member.value()) {
                tracing::warn!(
                    value = %render::render(member.value()),
                    "duplicate enum member value"
                );
            }
        }
        PermittedSet { members }
    }

    pub fn empty() -> Self {
        PermittedSet::default()
    }

    /// Strict membership scan: identical tag and identical value.
    pub fn contains(&self, value: &RawValue) -> bool {
        self.members.iter().any(|m| m.value() == value)
    }

    /// The value declared under `name`, if any.
    pub fn value_of(&self, name: &str) -> Option<&RawValue> {
        self.members
            .iter()
            .find(|m| m.name() == Some(name))
            .map(Member::value)
    }

    /// The first symbolic name declared for `value`, if any.
    pub fn name_of(&self, value: &RawValue) -> Option<&str> {
        self.members
            .iter()
            .find(|m| m.value() == value)
            .and_then(Member::name)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Member> {
        self.members.iter()
    }

    pub fn values(&self) -> impl Iterator<Item = &RawValue> {
        self.members.iter().map(Member::value)
    }
}

/// Everything the engine knows about one enum class: identity, permitted
/// set, and the precomputed ancestor chain (nearest first).
#[derive(Debug, Clone)]
pub struct ClassDescriptor {
    class: ClassId,
    permitted: PermittedSet,
    ancestors: Vec<ClassId>,
}

impl ClassDescriptor {
    pub fn new(class: ClassId, permitted: PermittedSet, ancestors: Vec<ClassId>) -> Self {
        ClassDescriptor {
            class,
            permitted,
            ancestors,
        }
    }

    pub fn class(&self) -> ClassId {
        self.class
    }

    pub fn name(&self) -> &'static str {
        self.class.name()
    }

    pub fn short_name(&self) -> &'static str {
        self.class.short_name()
    }

    pub fn permitted(&self) -> &PermittedSet {
        &self.permitted
    }

    /// Ancestor identities, nearest first.
    pub fn ancestors(&self) -> &[ClassId] {
        &self.ancestors
    }

    /// True if this class is `other` or descends from it.
    pub fn is_or_descends_from(&self, other: &ClassId) -> bool {
        self.class == *other || self.ancestors.contains(other)
    }
}

/// Declaration seam for one closed family of permitted values.
///
/// Implement [`members`](EnumClass::members) (and
/// [`ancestors`](EnumClass::ancestors) for subclass hierarchies) on a unit
/// struct, or use the [`enum_class!`](crate::enum_class) macro. The provided
/// operations resolve the declaration through the global [`EnumRegistry`]
/// and memoize it there.
pub trait EnumClass: Sized + Send + Sync + 'static {
    /// Diagnostic name; defaults to the fully-qualified Rust type name.
    fn name() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Declared members, in declaration order.
    fn members() -> Vec<Member>;

    /// Ancestor identities, nearest first. A subclass returns
    /// `Parent::lineage()`.
    fn ancestors() -> Vec<ClassId> {
        Vec::new()
    }

    /// This class followed by its ancestors; what a subclass passes on.
    fn lineage() -> Vec<ClassId> {
        let mut chain = vec![Self::class_id()];
        chain.extend(Self::ancestors());
        chain
    }

    fn class_id() -> ClassId {
        ClassId::named::<Self>(Self::name())
    }

    /// Memoized descriptor from the global registry.
    fn descriptor() -> Arc<ClassDescriptor> {
        EnumRegistry::global().ensure::<Self>()
    }

    /// Raw values this class accepts, in declaration order.
    fn all() -> Vec<RawValue> {
        Self::descriptor().permitted().values().cloned().collect()
    }

    /// Tests a candidate without constructing anything. Never fails.
    ///
    /// Instances of this class, and of any class descending from it, are
    /// accepted by identity alone.
    fn is_valid(value: impl Into<Candidate>) -> bool {
        MembershipChecker::accepts(&Self::descriptor(), &value.into())
    }

    /// Succeeds iff the candidate is valid for this class.
    fn validate(value: impl Into<Candidate>) -> Result<(), MembershipError> {
        check_class(&Self::descriptor(), value.into(), None).map(|_| ())
    }

    /// Like [`validate`](EnumClass::validate), but the failure message names
    /// the given input key instead of the class.
    fn validate_for_key(value: impl Into<Candidate>, key: &str) -> Result<(), MembershipError> {
        check_class(&Self::descriptor(), value.into(), Some(key)).map(|_| ())
    }

    /// Accepts `Null` unconditionally, then behaves like
    /// [`validate`](EnumClass::validate).
    ///
    /// The bypass applies even when the class has not declared `null` as a
    /// member.
    fn validate_optional(value: impl Into<Candidate>) -> Result<(), MembershipError> {
        let candidate = value.into();
        if candidate.is_null() {
            return Ok(());
        }
        check_class(&Self::descriptor(), candidate, None).map(|_| ())
    }

    fn validate_optional_for_key(
        value: impl Into<Candidate>,
        key: &str,
    ) -> Result<(), MembershipError> {
        let candidate = value.into();
        if candidate.is_null() {
            return Ok(());
        }
        check_class(&Self::descriptor(), candidate, Some(key)).map(|_| ())
    }

    /// Validates every element in order, stopping at the first failure.
    fn validate_many<I>(values: I) -> Result<(), MembershipError>
    where
        I: IntoIterator,
        I::Item: Into<Candidate>,
    {
        let descriptor = Self::descriptor();
        for value in values {
            check_class(&descriptor, value.into(), None)?;
        }
        Ok(())
    }

    fn validate_many_for_key<I>(values: I, key: &str) -> Result<(), MembershipError>
    where
        I: IntoIterator,
        I::Item: Into<Candidate>,
    {
        let descriptor = Self::descriptor();
        for value in values {
            check_class(&descriptor, value.into(), Some(key))?;
        }
        Ok(())
    }

    /// Like [`validate_many`](EnumClass::validate_many), with the `Null`
    /// bypass applied per element.
    fn validate_many_optional<I>(values: I) -> Result<(), MembershipError>
    where
        I: IntoIterator,
        I::Item: Into<Candidate>,
    {
        let descriptor = Self::descriptor();
        for value in values {
            let candidate = value.into();
            if candidate.is_null() {
                continue;
            }
            check_class(&descriptor, candidate, None)?;
        }
        Ok(())
    }

    fn validate_many_optional_for_key<I>(values: I, key: &str) -> Result<(), MembershipError>
    where
        I: IntoIterator,
        I::Item: Into<Candidate>,
    {
        let descriptor = Self::descriptor();
        for value in values {
            let candidate = value.into();
            if candidate.is_null() {
                continue;
            }
            check_class(&descriptor, candidate, Some(key))?;
        }
        Ok(())
    }

    /// Validated construction.
    ///
    /// Re-wrapping an instance of this class (or of a descendant class)
    /// reuses its payload, so wrapping N times yields the same value as
    /// wrapping once.
    fn wrap(value: impl Into<Candidate>) -> Result<EnumValue, MembershipError> {
        let descriptor = Self::descriptor();
        let candidate = check_class(&descriptor, value.into(), None)?;
        Ok(EnumValue::from_parts(descriptor, candidate.into_payload()))
    }

    /// `Null` becomes `None`; anything else must be valid.
    fn wrap_optional(value: impl Into<Candidate>) -> Result<Option<EnumValue>, MembershipError> {
        let candidate = value.into();
        if candidate.is_null() {
            return Ok(None);
        }
        Self::wrap(candidate).map(Some)
    }

    /// Wraps every element in order, stopping at the first failure.
    fn wrap_many<I>(values: I) -> Result<Vec<EnumValue>, MembershipError>
    where
        I: IntoIterator,
        I::Item: Into<Candidate>,
    {
        values.into_iter().map(Self::wrap).collect()
    }

    /// Like [`wrap_many`](EnumClass::wrap_many), mapping `Null` elements to
    /// `None`.
    fn wrap_many_optional<I>(values: I) -> Result<Vec<Option<EnumValue>>, MembershipError>
    where
        I: IntoIterator,
        I::Item: Into<Candidate>,
    {
        values.into_iter().map(Self::wrap_optional).collect()
    }
}
