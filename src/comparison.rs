//! Public comparison surface.
//!
//! [`Conditional`] is the configured factory: staging a value through
//! [`Conditional::compare`] yields an immutable [`Comparison`] carrying that
//! value, against which any number of predicates can be evaluated. Every
//! predicate is mirrored in negated form behind [`Comparison::not`].

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
	date,
	eval::{self, Predicate},
	value::Value,
};

/// Comparator configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
	/// Replaces the native relational operators with tolerance-aware numeric
	/// comparison for `gt`, `lt`, `cap`, `floor`, `range` and numeric `equal`.
	#[serde(alias = "percision")]
	pub precision: bool,
}

/// A configured comparator factory.
#[derive(Debug, Clone, Copy, Default)]
pub struct Conditional {
	config: Config,
}

impl Conditional {
	pub fn new(config: Config) -> Self {
		Self { config }
	}

	pub fn config(&self) -> Config {
		self.config
	}

	/// Stages a comparison value. Strings recognized as strict ISO-8601 dates
	/// are converted to their numeric epoch-millisecond form here; native
	/// dates and everything else are staged as-is.
	pub fn compare(&self, value: impl Into<Value>) -> Comparison {
		Comparison {
			staged: date::normalize(value.into()),
			precision: self.config.precision,
		}
	}

	/// Alias for [`Conditional::compare`].
	pub fn evaluate(&self, value: impl Into<Value>) -> Comparison {
		self.compare(value)
	}

	/// Alias for [`Conditional::compare`].
	pub fn condition(&self, value: impl Into<Value>) -> Comparison {
		self.compare(value)
	}
}

/// A staged comparison value with its predicate vocabulary.
///
/// Immutable: re-staging goes through the [`Conditional`] factory (or the
/// crate-level [`compare`](crate::compare) entry point), so interleaved
/// callers can never observe each other's staged values.
#[derive(Debug, Clone)]
pub struct Comparison {
	staged: Value,
	precision: bool,
}

impl Comparison {
	/// The staged value, after any ISO-8601 staging conversion.
	pub fn staged(&self) -> &Value {
		&self.staged
	}

	/// Evaluates a predicate from the registry by value. Missing arguments
	/// are treated as `Undefined`, extras are ignored.
	pub fn apply(&self, predicate: Predicate, args: &[Value]) -> bool {
		eval::eval(self.precision, &self.staged, predicate, args)
	}

	/// Evaluates a predicate looked up by name (`"gt"`, `"ceil"`, `"isin"`,
	/// ...). Unknown names evaluate to `false`, keeping the surface total.
	pub fn apply_named(&self, name: &str, args: &[Value]) -> bool {
		match Predicate::from_str(name) {
			Ok(predicate) => self.apply(predicate, args),
			Err(_) => false,
		}
	}

	/// The negated view: every predicate, logically complemented.
	pub fn not(&self) -> Negated<'_> {
		Negated { inner: self }
	}

	/// Returns true if the staged value is greater than the argument.
	pub fn gt(&self, value: impl Into<Value>) -> bool {
		self.apply(Predicate::Gt, &[value.into()])
	}

	/// Returns true if the staged value is less than the argument.
	pub fn lt(&self, value: impl Into<Value>) -> bool {
		self.apply(Predicate::Lt, &[value.into()])
	}

	/// Returns true if the staged value is less than or equal to the
	/// argument. Falsy staged values other than `0` pass unconditionally.
	pub fn cap(&self, value: impl Into<Value>) -> bool {
		self.apply(Predicate::Cap, &[value.into()])
	}

	/// Alias for [`Comparison::cap`].
	pub fn ceil(&self, value: impl Into<Value>) -> bool {
		self.cap(value)
	}

	/// Returns true if the staged value is greater than or equal to the
	/// argument. Falsy staged values other than `0` fail unconditionally.
	pub fn floor(&self, value: impl Into<Value>) -> bool {
		self.apply(Predicate::Floor, &[value.into()])
	}

	/// Returns true if the staged value lies within the inclusive range
	/// spanned by the two bounds, in either order.
	pub fn range(&self, value1: impl Into<Value>, value2: impl Into<Value>) -> bool {
		self.apply(Predicate::Range, &[value1.into(), value2.into()])
	}

	/// Returns true if the staged value strictly equals the argument, after
	/// ISO-8601 date conversion of string arguments.
	pub fn equal(&self, value: impl Into<Value>) -> bool {
		self.apply(Predicate::Equal, &[value.into()])
	}

	/// Returns true if the staged value does not strictly equal the argument.
	pub fn notequal(&self, value: impl Into<Value>) -> bool {
		self.apply(Predicate::NotEqual, &[value.into()])
	}

	/// Returns true if the staged value is contained in the argument: an
	/// array argument by element, an object argument by key, a string
	/// argument by element (array staged value) or comma-split membership.
	pub fn isin(&self, value: impl Into<Value>) -> bool {
		self.apply(Predicate::In, &[value.into()])
	}

	/// Alias for [`Comparison::isin`] (`in` is a Rust keyword).
	pub fn in_(&self, value: impl Into<Value>) -> bool {
		self.isin(value)
	}

	/// Returns true if the staged value is not contained in the argument.
	pub fn notin(&self, value: impl Into<Value>) -> bool {
		self.apply(Predicate::NotIn, &[value.into()])
	}

	/// Returns true if the staged value is truthy or any number, `0` and
	/// `NaN` included.
	pub fn exists(&self) -> bool {
		self.apply(Predicate::Exists, &[])
	}

	/// Returns true if the staged value deeply, structurally equals the
	/// argument.
	pub fn deepequal(&self, value: impl Into<Value>) -> bool {
		self.apply(Predicate::DeepEqual, &[value.into()])
	}

	/// Returns true if the staged value is exactly `null` (not `undefined`).
	pub fn isnull(&self) -> bool {
		self.apply(Predicate::IsNull, &[])
	}

	/// Returns true if the staged value is anything but `null`.
	pub fn isnotnull(&self) -> bool {
		self.apply(Predicate::IsNotNull, &[])
	}
}

/// The negated predicate surface of a [`Comparison`].
///
/// Each method returns the logical complement of its direct counterpart,
/// evaluated against the same staged value.
#[derive(Debug, Clone, Copy)]
pub struct Negated<'a> {
	inner: &'a Comparison,
}

impl Negated<'_> {
	pub fn apply(&self, predicate: Predicate, args: &[Value]) -> bool {
		!self.inner.apply(predicate, args)
	}

	pub fn gt(&self, value: impl Into<Value>) -> bool {
		!self.inner.gt(value)
	}

	pub fn lt(&self, value: impl Into<Value>) -> bool {
		!self.inner.lt(value)
	}

	pub fn cap(&self, value: impl Into<Value>) -> bool {
		!self.inner.cap(value)
	}

	pub fn ceil(&self, value: impl Into<Value>) -> bool {
		!self.inner.ceil(value)
	}

	pub fn floor(&self, value: impl Into<Value>) -> bool {
		!self.inner.floor(value)
	}

	pub fn range(&self, value1: impl Into<Value>, value2: impl Into<Value>) -> bool {
		!self.inner.range(value1, value2)
	}

	pub fn equal(&self, value: impl Into<Value>) -> bool {
		!self.inner.equal(value)
	}

	pub fn notequal(&self, value: impl Into<Value>) -> bool {
		!self.inner.notequal(value)
	}

	pub fn isin(&self, value: impl Into<Value>) -> bool {
		!self.inner.isin(value)
	}

	pub fn in_(&self, value: impl Into<Value>) -> bool {
		!self.inner.in_(value)
	}

	pub fn notin(&self, value: impl Into<Value>) -> bool {
		!self.inner.notin(value)
	}

	pub fn exists(&self) -> bool {
		!self.inner.exists()
	}

	pub fn deepequal(&self, value: impl Into<Value>) -> bool {
		!self.inner.deepequal(value)
	}

	pub fn isnull(&self) -> bool {
		!self.inner.isnull()
	}

	pub fn isnotnull(&self) -> bool {
		!self.inner.isnotnull()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_staging_converts_iso_strings() {
		let comparison = Conditional::default().compare("2018-06-11");
		assert_eq!(comparison.staged(), &Value::Number(1_528_675_200_000.0));

		let comparison = Conditional::default().compare("john");
		assert_eq!(comparison.staged(), &Value::Str("john".into()));

		// Native dates are staged as-is
		let comparison = Conditional::default().compare(Value::Date(42));
		assert_eq!(comparison.staged(), &Value::Date(42));
	}

	#[test]
	fn test_factory_aliases() {
		let conditional = Conditional::default();
		assert!(conditional.compare(1).range(0, 2));
		assert!(conditional.evaluate(1).range(0, 2));
		assert!(conditional.condition(1).range(0, 2));
	}

	#[test]
	fn test_negated_view_mirrors_every_predicate() {
		let conditional = Conditional::default();
		let comparison = conditional.compare(10);
		assert_eq!(comparison.gt(5), !comparison.not().gt(5));
		assert_eq!(comparison.lt(5), !comparison.not().lt(5));
		assert_eq!(comparison.cap(5), !comparison.not().cap(5));
		assert_eq!(comparison.floor(5), !comparison.not().floor(5));
		assert_eq!(comparison.range(0, 20), !comparison.not().range(0, 20));
		assert_eq!(comparison.equal(10), !comparison.not().equal(10));
		assert_eq!(comparison.isin(vec![10]), !comparison.not().isin(vec![10]));
		assert_eq!(comparison.exists(), !comparison.not().exists());
		assert_eq!(comparison.isnull(), !comparison.not().isnull());
		assert_eq!(comparison.deepequal(10), !comparison.not().deepequal(10));
	}

	#[test]
	fn test_named_dispatch() {
		let comparison = Conditional::default().compare(10);
		assert!(comparison.apply_named("gt", &[5.into()]));
		assert!(comparison.apply_named("ceil", &[10.into()]));
		assert!(comparison.apply_named("isin", &[vec![0, 10].into()]));
		// Unknown names degrade to false rather than erroring
		assert!(!comparison.apply_named("between", &[5.into()]));
	}

	#[test]
	fn test_precision_config() {
		let sum = 0.1 + 0.2;
		let native = Conditional::default();
		let precise = Conditional::new(Config { precision: true });
		assert!(native.compare(sum).gt(0.3));
		assert!(!precise.compare(sum).gt(0.3));
		assert!(precise.compare(sum).equal(0.3));
		assert!(!native.compare(sum).equal(0.3));
	}

	#[test]
	fn test_config_deserializes_with_legacy_spelling() {
		let config: Config = serde_json::from_str(r#"{ "precision": true }"#).unwrap();
		assert!(config.precision);
		let config: Config = serde_json::from_str(r#"{ "percision": true }"#).unwrap();
		assert!(config.precision);
		let config: Config = serde_json::from_str("{}").unwrap();
		assert!(!config.precision);
	}
}
