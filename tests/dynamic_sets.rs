//! Data-driven declarations: identities resolved through a provider table,
//! validated with an injected registry, and explicitly invalidated.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use strictenum::{
    ClassId, DeclarationError, DeclarationTable, EnumError, EnumRegistry, Member, RawValue,
    Validator, ValueSetProvider,
};

/// Marker type minting the identity of a set that only exists as data.
struct Weekday;

fn weekday_table() -> DeclarationTable {
    let table = DeclarationTable::new();
    table
        .insert_json(
            ClassId::of::<Weekday>(),
            r#"[
                {"name": "MONDAY", "value": "monday"},
                {"name": "TUESDAY", "value": "tuesday"},
                {"name": "WEDNESDAY", "value": "wednesday"}
            ]"#,
        )
        .expect("declaration JSON should parse");
    table
}

#[test]
fn provider_backed_sets_validate_like_typed_ones() {
    let registry = EnumRegistry::with_provider(Arc::new(weekday_table()));
    let validator = Validator::new(&registry);
    let class = ClassId::of::<Weekday>();

    assert!(validator.validate(&class, "monday", None).is_ok());
    assert!(validator.validate(&class, "friday", None).is_err());
    assert!(validator.validate_optional(&class, RawValue::Null, None).is_ok());
}

#[test]
fn provider_backed_failures_use_the_same_message_format() {
    let registry = EnumRegistry::with_provider(Arc::new(weekday_table()));
    let validator = Validator::new(&registry);

    let err = validator
        .validate(&ClassId::of::<Weekday>(), "friday", Some("dayOfWeek"))
        .unwrap_err();
    assert!(err.to_string().contains("not a valid 'dayOfWeek': 'friday'"));
}

#[test]
fn unknown_identities_surface_as_declaration_errors() {
    struct Unregistered;

    let registry = EnumRegistry::with_provider(Arc::new(weekday_table()));
    let validator = Validator::new(&registry);

    let err = validator
        .validate(&ClassId::of::<Unregistered>(), "monday", None)
        .unwrap_err();
    match err {
        EnumError::Declaration(DeclarationError::UnknownClass { class }) => {
            assert!(class.contains("Unregistered"));
        }
        other => panic!("expected a declaration error, got: {other}"),
    }
}

#[test]
fn the_registry_memoizes_provider_results() {
    struct Counting {
        inner: DeclarationTable,
        calls: AtomicUsize,
    }

    impl ValueSetProvider for Counting {
        fn members_of(&self, class: &ClassId) -> Result<Vec<Member>, DeclarationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.members_of(class)
        }
    }

    let provider = Arc::new(Counting {
        inner: weekday_table(),
        calls: AtomicUsize::new(0),
    });
    let registry = EnumRegistry::with_provider(provider.clone());
    let validator = Validator::new(&registry);
    let class = ClassId::of::<Weekday>();

    for _ in 0..5 {
        assert!(validator.validate(&class, "tuesday", None).is_ok());
    }
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn invalidation_reaches_back_to_the_provider() {
    struct Counting {
        inner: DeclarationTable,
        calls: AtomicUsize,
    }

    impl ValueSetProvider for Counting {
        fn members_of(&self, class: &ClassId) -> Result<Vec<Member>, DeclarationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.members_of(class)
        }
    }

    let provider = Arc::new(Counting {
        inner: weekday_table(),
        calls: AtomicUsize::new(0),
    });
    let registry = EnumRegistry::with_provider(provider.clone());
    let class = ClassId::of::<Weekday>();

    registry.descriptor(&class).unwrap();
    registry.invalidate(&class);
    registry.descriptor(&class).unwrap();

    assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
}

#[test]
fn replaced_declarations_take_effect_after_invalidation() {
    let table = Arc::new(weekday_table());
    let registry = EnumRegistry::with_provider(table.clone());
    let validator = Validator::new(&registry);
    let class = ClassId::of::<Weekday>();

    assert!(validator.validate(&class, "monday", None).is_ok());

    table.insert(class, vec![Member::named("FRIDAY", "friday")]);
    // Still memoized; the registry never recomputes on its own.
    assert!(validator.validate(&class, "monday", None).is_ok());

    registry.invalidate(&class);
    assert!(validator.validate(&class, "monday", None).is_err());
    assert!(validator.validate(&class, "friday", None).is_ok());
}

#[test]
fn permitted_exposes_the_resolved_set() {
    let registry = EnumRegistry::with_provider(Arc::new(weekday_table()));
    let set = registry.permitted(&ClassId::of::<Weekday>()).unwrap();

    assert_eq!(set.len(), 3);
    assert_eq!(set.value_of("MONDAY"), Some(&RawValue::Str("monday".into())));
    assert!(set.contains(&RawValue::Str("tuesday".into())));
    assert!(!set.contains(&RawValue::Str("friday".into())));
}
