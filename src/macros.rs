//! Declaration macro for enum classes.

/// Declares an enum class: a unit struct plus its
/// [`EnumClass`](crate::EnumClass) implementation.
///
/// Members are listed as `NAME => value` pairs and become the class's
/// permitted set, in declaration order. An `extends Parent` clause wires the
/// ancestor chain for the subclass-acceptance rule.
///
/// # Example
///
/// ```
/// use strictenum::{enum_class, EnumClass};
///
/// enum_class! {
///     /// Weekend days as lowercase strings.
///     pub struct Weekend {
///         SATURDAY => "saturday",
///         SUNDAY => "sunday",
///     }
/// }
///
/// enum_class! {
///     pub struct LongWeekend extends Weekend {
///         MONDAY => "monday",
///     }
/// }
///
/// assert!(Weekend::is_valid("saturday"));
/// assert!(!Weekend::is_valid("friday"));
///
/// // A subclass instance is valid wherever the base class is expected.
/// let monday = LongWeekend::wrap("monday").unwrap();
/// assert!(Weekend::is_valid(&monday));
/// ```
#[macro_export]
macro_rules! enum_class {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident extends $parent:ty {
            $($member:ident => $value:expr),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        $vis struct $name;

        impl $crate::EnumClass for $name {
            fn members() -> ::std::vec::Vec<$crate::Member> {
                ::std::vec![
                    $($crate::Member::named(stringify!($member), $value)),*
                ]
            }

            fn ancestors() -> ::std::vec::Vec<$crate::ClassId> {
                <$parent as $crate::EnumClass>::lineage()
            }
        }
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $($member:ident => $value:expr),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        $vis struct $name;

        impl $crate::EnumClass for $name {
            fn members() -> ::std::vec::Vec<$crate::Member> {
                ::std::vec![
                    $($crate::Member::named(stringify!($member), $value)),*
                ]
            }
        }
    };
}
