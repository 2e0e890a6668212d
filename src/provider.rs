//! Pluggable sources of enum member declarations.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::class::{ClassId, Member};
use crate::errors::DeclarationError;
use crate::raw_value::RawValue;

/// Source of member declarations for enum classes that are not declared
/// through the typed [`EnumClass`](crate::EnumClass) path.
///
/// Implementations must be deterministic per identity within a process run;
/// the registry memoizes whatever they return and only asks again after an
/// explicit invalidation.
pub trait ValueSetProvider: Send + Sync {
    /// The declared members of `class`, in declaration order.
    fn members_of(&self, class: &ClassId) -> Result<Vec<Member>, DeclarationError>;

    /// Ancestor identities of `class`, nearest first.
    fn ancestors_of(&self, class: &ClassId) -> Result<Vec<ClassId>, DeclarationError> {
        let _ = class;
        Ok(Vec::new())
    }
}

/// Serialized form of one declared member, for data-driven tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberRecord {
    /// Optional symbolic name.
    #[serde(default)]
    pub name: Option<String>,
    /// The raw member value; JSON maps are not accepted.
    pub value: RawValue,
}

impl From<MemberRecord> for Member {
    fn from(record: MemberRecord) -> Self {
        match record.name {
            Some(name) => Member::named(name, record.value),
            None => Member::unnamed(record.value),
        }
    }
}

/// Declarations registered at runtime, keyed by identity.
///
/// The explicit counterpart of declaring members in code: assemble the
/// table at startup (for example from a JSON document) and hand it to
/// [`EnumRegistry::with_provider`](crate::EnumRegistry::with_provider).
#[derive(Default)]
pub struct DeclarationTable {
    entries: RwLock<HashMap<ClassId, Vec<Member>>>,
}

impl DeclarationTable {
    pub fn new() -> Self {
        DeclarationTable::default()
    }

    /// Registers (or replaces) the members declared for `class`.
    pub fn insert(&self, class: ClassId, members: Vec<Member>) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(class, members);
    }

    /// Registers members for `class` from their serialized form.
    pub fn insert_records(&self, class: ClassId, records: Vec<MemberRecord>) {
        self.insert(class, records.into_iter().map(Member::from).collect());
    }

    /// Parses a JSON array of member records and registers it for `class`.
    pub fn insert_json(&self, class: ClassId, json: &str) -> Result<(), DeclarationError> {
        let records: Vec<MemberRecord> = serde_json::from_str(json)
            .map_err(|e| DeclarationError::malformed(class.name(), e.to_string()))?;
        self.insert_records(class, records);
        Ok(())
    }

    /// Number of registered classes.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ValueSetProvider for DeclarationTable {
    fn members_of(&self, class: &ClassId) -> Result<Vec<Member>, DeclarationError> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(class)
            .cloned()
            .ok_or_else(|| DeclarationError::unknown_class(class.name()))
    }
}
