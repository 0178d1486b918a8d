//! Dynamic operand model for comparisons.
//!
//! Every predicate in this crate operates on [`Value`], a self-describing
//! runtime value covering the full vocabulary of comparable shapes: numbers,
//! strings, booleans, dates, arrays, key/value objects, plus the two distinct
//! "empty" values `null` and `undefined`.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// A runtime comparison operand.
///
/// `Null` is an explicit domain value; `Undefined` stands for "argument not
/// supplied" and the two are never interchangeable. `Date` holds epoch
/// milliseconds and coerces numerically inside ordering predicates.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	Null,
	Undefined,
	Bool(bool),
	Number(f64),
	Str(String),
	Date(i64),
	Array(Vec<Value>),
	Object(BTreeMap<String, Value>),
}

impl Value {
	/// Boolean coercion: `Null`, `Undefined`, `false`, `0`, `NaN` and the
	/// empty string are falsy; everything else (arrays and objects included,
	/// even empty ones) is truthy.
	pub fn is_truthy(&self) -> bool {
		match self {
			Value::Null | Value::Undefined => false,
			Value::Bool(b) => *b,
			Value::Number(n) => *n != 0.0 && !n.is_nan(),
			Value::Str(s) => !s.is_empty(),
			Value::Date(_) | Value::Array(_) | Value::Object(_) => true,
		}
	}

	/// True for values that are falsy without being exactly the number `0`.
	///
	/// `cap`, `floor` and `range` short-circuit on such staged values before
	/// performing any real comparison. `-0.0` counts as zero and is never
	/// short-circuited.
	pub fn is_falsy_non_zero(&self) -> bool {
		if self.is_truthy() {
			return false;
		}
		!matches!(self, Value::Number(n) if *n == 0.0)
	}

	pub fn is_array(&self) -> bool {
		matches!(self, Value::Array(_))
	}

	/// Numeric coercion. `Bool` maps to 0/1, `Null` to 0, `Undefined` to NaN,
	/// strings are trimmed and parsed (empty string is 0), dates yield their
	/// epoch milliseconds and arrays go through their joined string form.
	pub fn as_number(&self) -> f64 {
		match self {
			Value::Number(n) => *n,
			Value::Bool(b) => {
				if *b {
					1.0
				} else {
					0.0
				}
			}
			Value::Null => 0.0,
			Value::Undefined => f64::NAN,
			Value::Str(s) => parse_number(s),
			Value::Date(millis) => *millis as f64,
			Value::Array(_) => parse_number(&self.join_string()),
			Value::Object(_) => f64::NAN,
		}
	}

	/// Strict (`===`) equality. Primitives compare by value within the same
	/// variant; `NaN` never equals anything. Composite values (`Array`,
	/// `Object`, `Date`) are reference types and are never strictly equal.
	pub fn strict_eq(&self, other: &Value) -> bool {
		match (self, other) {
			(Value::Null, Value::Null) | (Value::Undefined, Value::Undefined) => true,
			(Value::Bool(a), Value::Bool(b)) => a == b,
			(Value::Number(a), Value::Number(b)) => a == b,
			(Value::Str(a), Value::Str(b)) => a == b,
			_ => false,
		}
	}

	/// Deep structural equality. Arrays compare elementwise, objects keywise,
	/// dates by their epoch milliseconds; primitives follow [`Value::strict_eq`],
	/// so `Null` and `Undefined` stay distinct and `NaN` never matches.
	pub fn deep_eq(&self, other: &Value) -> bool {
		match (self, other) {
			(Value::Date(a), Value::Date(b)) => a == b,
			(Value::Array(a), Value::Array(b)) => {
				a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.deep_eq(y))
			}
			(Value::Object(a), Value::Object(b)) => {
				a.len() == b.len()
					&& a.iter()
						.zip(b)
						.all(|((ka, va), (kb, vb))| ka == kb && va.deep_eq(vb))
			}
			_ => self.strict_eq(other),
		}
	}

	/// Loose relational comparison. Operands reduce to primitives first
	/// (arrays to their joined string, dates to epoch milliseconds); two
	/// string primitives compare lexicographically, any other pairing is
	/// numeric. `None` when either side coerces to NaN.
	pub fn loose_cmp(&self, other: &Value) -> Option<Ordering> {
		match (self.to_primitive(), other.to_primitive()) {
			(Primitive::Str(a), Primitive::Str(b)) => Some(a.cmp(&b)),
			(a, b) => a.as_number().partial_cmp(&b.as_number()),
		}
	}

	fn to_primitive(&self) -> Primitive {
		match self {
			Value::Str(s) => Primitive::Str(s.clone()),
			Value::Array(_) => Primitive::Str(self.join_string()),
			Value::Object(_) => Primitive::Str("[object Object]".to_string()),
			other => Primitive::Number(other.as_number()),
		}
	}

	/// Comma-joined string form of an array; `Null` and `Undefined` elements
	/// render as empty, nested arrays join recursively.
	fn join_string(&self) -> String {
		match self {
			Value::Null | Value::Undefined => String::new(),
			Value::Bool(b) => b.to_string(),
			Value::Number(n) => format_number(*n),
			Value::Str(s) => s.clone(),
			Value::Date(millis) => format_date(*millis),
			Value::Array(items) => items
				.iter()
				.map(Value::join_string)
				.collect::<Vec<_>>()
				.join(","),
			Value::Object(_) => "[object Object]".to_string(),
		}
	}
}

enum Primitive {
	Str(String),
	Number(f64),
}

impl Primitive {
	fn as_number(&self) -> f64 {
		match self {
			Primitive::Str(s) => parse_number(s),
			Primitive::Number(n) => *n,
		}
	}
}

fn parse_number(s: &str) -> f64 {
	let trimmed = s.trim();
	if trimmed.is_empty() {
		return 0.0;
	}
	trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

fn format_number(n: f64) -> String {
	if n.is_nan() {
		"NaN".to_string()
	} else if n == f64::INFINITY {
		"Infinity".to_string()
	} else if n == f64::NEG_INFINITY {
		"-Infinity".to_string()
	} else {
		n.to_string()
	}
}

fn format_date(millis: i64) -> String {
	match DateTime::<Utc>::from_timestamp_millis(millis) {
		Some(datetime) => datetime.to_rfc3339(),
		None => "Invalid Date".to_string(),
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Value::Bool(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Value::Number(value)
	}
}

impl From<f32> for Value {
	fn from(value: f32) -> Self {
		Value::Number(f64::from(value))
	}
}

impl From<i32> for Value {
	fn from(value: i32) -> Self {
		Value::Number(f64::from(value))
	}
}

impl From<u32> for Value {
	fn from(value: u32) -> Self {
		Value::Number(f64::from(value))
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Value::Number(value as f64)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::Str(value.to_string())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Value::Str(value)
	}
}

impl From<DateTime<Utc>> for Value {
	fn from(value: DateTime<Utc>) -> Self {
		Value::Date(value.timestamp_millis())
	}
}

impl From<NaiveDate> for Value {
	fn from(value: NaiveDate) -> Self {
		Value::Date(value.and_time(NaiveTime::MIN).and_utc().timestamp_millis())
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(value: Option<T>) -> Self {
		match value {
			Some(inner) => inner.into(),
			None => Value::Null,
		}
	}
}

impl<T: Into<Value>> From<Vec<T>> for Value {
	fn from(values: Vec<T>) -> Self {
		Value::Array(values.into_iter().map(Into::into).collect())
	}
}

impl From<serde_json::Value> for Value {
	fn from(value: serde_json::Value) -> Self {
		match value {
			serde_json::Value::Null => Value::Null,
			serde_json::Value::Bool(b) => Value::Bool(b),
			serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
			serde_json::Value::String(s) => Value::Str(s),
			serde_json::Value::Array(items) => {
				Value::Array(items.into_iter().map(Value::from).collect())
			}
			serde_json::Value::Object(map) => Value::Object(
				map.into_iter()
					.map(|(key, val)| (key, Value::from(val)))
					.collect(),
			),
		}
	}
}
