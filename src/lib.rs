//! Staged value-comparison predicates with a negated mirror of every
//! predicate.
//!
//! A comparator stages a single value and evaluates named predicates against
//! it: ordering (`gt`, `lt`, `cap`, `floor`, `range`), equality (`equal`,
//! `deepequal`), membership (`isin`), presence (`exists`, `isnull`). Strings
//! in strict ISO-8601 form are normalized to numeric epoch milliseconds
//! before comparing, and an optional precision mode swaps the native
//! relational operators for tolerance-aware numeric comparison.
//!
//! Every predicate is total: inputs that cannot be meaningfully compared
//! evaluate to `false` instead of erroring.
//!
//! ```
//! use conditional::compare;
//!
//! assert!(compare(1).range(0, 2));
//! assert!(!compare(1).not().range(0, 2));
//! assert!(compare("2018-06-11").equal("2018-06-11"));
//! assert!(compare("john").isin("joe,john"));
//! assert!(compare(0).exists());
//! ```
//!
//! Configuration goes through the [`Conditional`] factory:
//!
//! ```
//! use conditional::{Conditional, Config};
//!
//! let conditional = Conditional::new(Config { precision: true });
//! assert!(conditional.compare(0.1 + 0.2).equal(0.3));
//! ```

mod comparison;
mod date;
mod eval;
mod precision;
mod value;

pub use comparison::{Comparison, Conditional, Config, Negated};
pub use date::{is_iso_date, parse_iso, DateParseError};
pub use eval::{Predicate, UnknownPredicateError};
pub use value::Value;

/// Stages a value on a fresh default comparator. The primary entry point:
/// given a value, returns the predicate-bearing [`Comparison`].
pub fn compare(value: impl Into<Value>) -> Comparison {
	Conditional::default().compare(value)
}
