//! Validation operations over an explicit registry.

use crate::class::{ClassDescriptor, ClassId};
use crate::errors::{EnumError, MembershipError};
use crate::membership::MembershipChecker;
use crate::raw_value::Candidate;
use crate::registry::EnumRegistry;

/// Runs the membership test and, on rejection, builds the failure carrying
/// the original candidate. Returns the candidate so construction paths can
/// reuse it without cloning.
pub(crate) fn check_class(
    descriptor: &ClassDescriptor,
    candidate: Candidate,
    key: Option<&str>,
) -> Result<Candidate, MembershipError> {
    if MembershipChecker::accepts(descriptor, &candidate) {
        return Ok(candidate);
    }
    tracing::trace!(class = descriptor.name(), "candidate rejected");
    Err(match key {
        Some(key) => MembershipError::for_key(candidate, key),
        None => MembershipError::for_class(candidate, descriptor.name()),
    })
}

/// Validates candidates against classes known to a registry.
///
/// [`EnumClass`](crate::EnumClass) offers the same operations as typed
/// methods over the global registry; this form exists for injected
/// registries and identity-keyed call sites. Identity resolution can fail
/// with a [`DeclarationError`](crate::DeclarationError), so every operation
/// returns the [`EnumError`] umbrella.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'r> {
    registry: &'r EnumRegistry,
}

impl<'r> Validator<'r> {
    pub fn new(registry: &'r EnumRegistry) -> Self {
        Validator { registry }
    }

    /// Succeeds iff the candidate is valid for `class`.
    ///
    /// The failure message names the class, or the key when one is given.
    pub fn validate(
        &self,
        class: &ClassId,
        value: impl Into<Candidate>,
        key: Option<&str>,
    ) -> Result<(), EnumError> {
        let descriptor = self.registry.descriptor(class)?;
        check_class(&descriptor, value.into(), key)?;
        Ok(())
    }

    /// Accepts `Null` without consulting the membership test.
    ///
    /// This is an explicit bypass for optional inputs; it applies even when
    /// the class has not declared `null` as a member.
    pub fn validate_optional(
        &self,
        class: &ClassId,
        value: impl Into<Candidate>,
        key: Option<&str>,
    ) -> Result<(), EnumError> {
        let candidate = value.into();
        if candidate.is_null() {
            return Ok(());
        }
        self.validate(class, candidate, key)
    }

    /// Validates every element in order; stops at the first invalid one.
    pub fn validate_many<I>(
        &self,
        class: &ClassId,
        values: I,
        key: Option<&str>,
    ) -> Result<(), EnumError>
    where
        I: IntoIterator,
        I::Item: Into<Candidate>,
    {
        let descriptor = self.registry.descriptor(class)?;
        for value in values {
            check_class(&descriptor, value.into(), key)?;
        }
        Ok(())
    }

    /// Like [`validate_many`](Validator::validate_many), with the `Null`
    /// bypass applied per element.
    pub fn validate_many_optional<I>(
        &self,
        class: &ClassId,
        values: I,
        key: Option<&str>,
    ) -> Result<(), EnumError>
    where
        I: IntoIterator,
        I::Item: Into<Candidate>,
    {
        let descriptor = self.registry.descriptor(class)?;
        for value in values {
            let candidate = value.into();
            if candidate.is_null() {
                continue;
            }
            check_class(&descriptor, candidate, key)?;
        }
        Ok(())
    }
}
