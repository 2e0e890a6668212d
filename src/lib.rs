//! Strictenum - Closed-set enum value types with strict membership validation
//!
//! A class of values is declared once as a finite set of permitted raw
//! values; every construction or validation attempt is checked against that
//! set with strict type-and-value equality. `100` is not `"100"`, `null` is
//! not `false`, and nothing is ever coerced.
//!
//! ```
//! use strictenum::{enum_class, EnumClass};
//!
//! enum_class! {
//!     /// The first five prime numbers.
//!     pub struct SmallPrimes {
//!         PRIME1 => 2,
//!         PRIME2 => 3,
//!         PRIME3 => 5,
//!         PRIME4 => 7,
//!         PRIME5 => 11,
//!     }
//! }
//!
//! assert!(SmallPrimes::is_valid(11));
//! assert!(!SmallPrimes::is_valid("11"));
//!
//! let five = SmallPrimes::wrap(5).unwrap();
//! assert_eq!(five.member_name(), Some("PRIME3"));
//!
//! let err = SmallPrimes::wrap(12).unwrap_err();
//! assert!(err.to_string().contains("not a valid SmallPrimes: 12"));
//! ```

mod class;
mod enum_value;
mod errors;
mod macros;
mod membership;
mod provider;
mod raw_value;
pub mod render;
mod registry;
mod validator;

pub use class::{ClassDescriptor, ClassId, EnumClass, Member, PermittedSet};
pub use enum_value::EnumValue;
pub use errors::{DeclarationError, EnumError, MembershipError};
pub use membership::MembershipChecker;
pub use provider::{DeclarationTable, MemberRecord, ValueSetProvider};
pub use raw_value::{Candidate, OpaqueSurface, RawValue, Surface};
pub use registry::EnumRegistry;
pub use validator::Validator;
