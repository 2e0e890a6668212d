//! Strict membership testing and the subclass identity-trust rule.

use crate::class::{ClassDescriptor, ClassId};
use crate::errors::DeclarationError;
use crate::raw_value::Candidate;
use crate::registry::EnumRegistry;

/// Membership test over a registry of declarations.
///
/// The test itself never fails and never coerces; only resolving an identity
/// that no declaration covers can error.
#[derive(Debug, Clone, Copy)]
pub struct MembershipChecker<'r> {
    registry: &'r EnumRegistry,
}

impl<'r> MembershipChecker<'r> {
    pub fn new(registry: &'r EnumRegistry) -> Self {
        MembershipChecker { registry }
    }

    /// Tests `candidate` against the class identified by `class`.
    ///
    /// Wrapped instances are judged by identity alone (their own class, or a
    /// class descending from the target); raw values are scanned against the
    /// target's permitted set with strict equality.
    pub fn is_valid(
        &self,
        class: &ClassId,
        candidate: &Candidate,
    ) -> Result<bool, DeclarationError> {
        match candidate {
            Candidate::Wrapped(value) => Ok(value.is_instance_of(class)),
            Candidate::Raw(raw) => Ok(self.registry.descriptor(class)?.permitted().contains(raw)),
        }
    }

    /// Tests against an already-resolved descriptor.
    ///
    /// A wrapped instance's payload is never re-checked against the target's
    /// set: a descendant class is trusted to have validated it, and the
    /// target may not even know the descendant's extra members.
    pub fn accepts(descriptor: &ClassDescriptor, candidate: &Candidate) -> bool {
        match candidate {
            Candidate::Wrapped(value) => value.is_instance_of(&descriptor.class()),
            Candidate::Raw(raw) => descriptor.permitted().contains(raw),
        }
    }
}
