//! Predicate registry and evaluation core.
//!
//! A single static vocabulary of named predicates drives the direct surface,
//! the negated surface and name-based dynamic dispatch. Every predicate is a
//! total function: malformed or type-mismatched operands degrade to `false`
//! (or `true` for a negation), never to a panic or an error.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::{date, precision, value::Value};

/// The fixed vocabulary of comparison predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Predicate {
	Gt,
	Lt,
	Cap,
	Floor,
	Range,
	Equal,
	NotEqual,
	In,
	NotIn,
	Exists,
	DeepEqual,
	IsNull,
	IsNotNull,
}

#[derive(Debug, PartialEq, Eq, Error)]
#[error("unknown predicate: {0}")]
pub struct UnknownPredicateError(pub String);

impl Predicate {
	pub const ALL: [Predicate; 13] = [
		Predicate::Gt,
		Predicate::Lt,
		Predicate::Cap,
		Predicate::Floor,
		Predicate::Range,
		Predicate::Equal,
		Predicate::NotEqual,
		Predicate::In,
		Predicate::NotIn,
		Predicate::Exists,
		Predicate::DeepEqual,
		Predicate::IsNull,
		Predicate::IsNotNull,
	];

	pub fn name(self) -> &'static str {
		match self {
			Predicate::Gt => "gt",
			Predicate::Lt => "lt",
			Predicate::Cap => "cap",
			Predicate::Floor => "floor",
			Predicate::Range => "range",
			Predicate::Equal => "equal",
			Predicate::NotEqual => "notequal",
			Predicate::In => "in",
			Predicate::NotIn => "notin",
			Predicate::Exists => "exists",
			Predicate::DeepEqual => "deepequal",
			Predicate::IsNull => "isnull",
			Predicate::IsNotNull => "isnotnull",
		}
	}

	/// Number of runtime arguments the predicate consumes.
	pub fn arity(self) -> usize {
		match self {
			Predicate::Range => 2,
			Predicate::Exists | Predicate::IsNull | Predicate::IsNotNull => 0,
			_ => 1,
		}
	}

	/// The named logical mirror, where the vocabulary carries one.
	/// Ordering predicates have no named mirror; their complement is only
	/// reachable through the negated view.
	pub fn named_negation(self) -> Option<Predicate> {
		match self {
			Predicate::Equal => Some(Predicate::NotEqual),
			Predicate::NotEqual => Some(Predicate::Equal),
			Predicate::In => Some(Predicate::NotIn),
			Predicate::NotIn => Some(Predicate::In),
			Predicate::IsNull => Some(Predicate::IsNotNull),
			Predicate::IsNotNull => Some(Predicate::IsNull),
			_ => None,
		}
	}
}

impl fmt::Display for Predicate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for Predicate {
	type Err = UnknownPredicateError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"gt" => Ok(Predicate::Gt),
			"lt" => Ok(Predicate::Lt),
			"cap" | "ceil" => Ok(Predicate::Cap),
			"floor" => Ok(Predicate::Floor),
			"range" => Ok(Predicate::Range),
			"equal" => Ok(Predicate::Equal),
			"notequal" => Ok(Predicate::NotEqual),
			"in" | "isin" => Ok(Predicate::In),
			"notin" => Ok(Predicate::NotIn),
			"exists" => Ok(Predicate::Exists),
			"deepequal" => Ok(Predicate::DeepEqual),
			"isnull" => Ok(Predicate::IsNull),
			"isnotnull" => Ok(Predicate::IsNotNull),
			other => Err(UnknownPredicateError(other.to_string())),
		}
	}
}

/// Evaluates a predicate against the staged value. Missing arguments are
/// padded with `Undefined`, extra arguments are ignored.
pub(crate) fn eval(precision: bool, staged: &Value, predicate: Predicate, args: &[Value]) -> bool {
	let arg = |index: usize| args.get(index).cloned().unwrap_or(Value::Undefined);
	let outcome = match predicate {
		Predicate::Gt => eval_gt(precision, staged, arg(0)),
		Predicate::Lt => eval_lt(precision, staged, arg(0)),
		Predicate::Cap => eval_cap(precision, staged, arg(0)),
		Predicate::Floor => eval_floor(precision, staged, arg(0)),
		Predicate::Range => eval_range(precision, staged, arg(0), arg(1)),
		Predicate::Equal => eval_equal(precision, staged, arg(0)),
		Predicate::NotEqual => !eval_equal(precision, staged, arg(0)),
		Predicate::In => eval_in(staged, &arg(0)),
		Predicate::NotIn => !eval_in(staged, &arg(0)),
		Predicate::Exists => eval_exists(staged),
		Predicate::DeepEqual => staged.deep_eq(&arg(0)),
		Predicate::IsNull => matches!(staged, Value::Null),
		Predicate::IsNotNull => !matches!(staged, Value::Null),
	};
	tracing::debug!(
		"evaluated {} against staged {:?} with args {:?} -> {}",
		predicate,
		staged,
		args,
		outcome
	);
	outcome
}

/// Null detection across the operands participating in an ordering predicate.
/// Only the literal `Null` counts; `Undefined` does not.
fn contains_null(operands: &[&Value]) -> bool {
	operands.iter().any(|value| matches!(value, Value::Null))
}

fn eval_gt(precision: bool, staged: &Value, value: Value) -> bool {
	if contains_null(&[staged, &value]) {
		return false;
	}
	let value = date::normalize(value);
	cmp_gt(precision, staged, &value)
}

fn eval_lt(precision: bool, staged: &Value, value: Value) -> bool {
	if contains_null(&[staged, &value]) {
		return false;
	}
	let value = date::normalize(value);
	cmp_lt(precision, staged, &value)
}

fn eval_cap(precision: bool, staged: &Value, value: Value) -> bool {
	if contains_null(&[staged, &value]) {
		return false;
	}
	let value = date::normalize(value);
	// Falsy-but-not-zero staged values pass a cap unconditionally
	if staged.is_falsy_non_zero() {
		return true;
	}
	cmp_leq(precision, staged, &value)
}

fn eval_floor(precision: bool, staged: &Value, value: Value) -> bool {
	if contains_null(&[staged, &value]) {
		return false;
	}
	let value = date::normalize(value);
	// ...and fail a floor unconditionally
	if staged.is_falsy_non_zero() {
		return false;
	}
	cmp_geq(precision, staged, &value)
}

fn eval_range(precision: bool, staged: &Value, value1: Value, value2: Value) -> bool {
	if contains_null(&[staged, &value1, &value2]) {
		return false;
	}
	let value1 = date::normalize(value1);
	let value2 = date::normalize(value2);
	if staged.is_falsy_non_zero() {
		return false;
	}
	// Bounds are order-independent. The swap decision is made with the exact
	// ordering even in precision mode: a tolerance-based swap would make
	// near-equal bounds evaluate differently depending on argument order.
	let (lower, upper) = match value1.loose_cmp(&value2) {
		Some(Ordering::Greater) => (value2, value1),
		_ => (value1, value2),
	};
	cmp_geq(precision, staged, &lower) && cmp_leq(precision, staged, &upper)
}

fn eval_equal(precision: bool, staged: &Value, value: Value) -> bool {
	let value = date::normalize(value);
	if precision {
		if let Some((a, b)) = number_pair(staged, &value) {
			return precision::eq(a, b);
		}
	}
	staged.strict_eq(&value)
}

fn eval_in(staged: &Value, value: &Value) -> bool {
	match value {
		// Object-typed argument, non-array staged value
		Value::Array(items) if !staged.is_array() => {
			items.iter().any(|item| item.strict_eq(staged))
		}
		Value::Object(map) if !staged.is_array() => {
			matches!(staged, Value::Str(key) if map.contains_key(key))
		}
		Value::Date(_) if !staged.is_array() => false,
		// String argument: element membership for array staged values,
		// comma-split membership otherwise
		Value::Str(s) => match staged {
			Value::Array(items) => {
				items.iter().any(|item| matches!(item, Value::Str(el) if el == s))
			}
			_ => s
				.split(',')
				.any(|part| matches!(staged, Value::Str(el) if el == part)),
		},
		_ => false,
	}
}

fn eval_exists(staged: &Value) -> bool {
	// Any number exists, zero and NaN included
	matches!(staged, Value::Number(_)) || staged.is_truthy()
}

fn number_pair(a: &Value, b: &Value) -> Option<(f64, f64)> {
	match (a, b) {
		(Value::Number(x), Value::Number(y)) => Some((*x, *y)),
		_ => None,
	}
}

fn cmp_gt(precision: bool, a: &Value, b: &Value) -> bool {
	if precision {
		if let Some((x, y)) = number_pair(a, b) {
			return precision::gt(x, y);
		}
	}
	matches!(a.loose_cmp(b), Some(Ordering::Greater))
}

fn cmp_lt(precision: bool, a: &Value, b: &Value) -> bool {
	if precision {
		if let Some((x, y)) = number_pair(a, b) {
			return precision::lt(x, y);
		}
	}
	matches!(a.loose_cmp(b), Some(Ordering::Less))
}

fn cmp_leq(precision: bool, a: &Value, b: &Value) -> bool {
	if precision {
		if let Some((x, y)) = number_pair(a, b) {
			return precision::leq(x, y);
		}
	}
	matches!(a.loose_cmp(b), Some(Ordering::Less | Ordering::Equal))
}

fn cmp_geq(precision: bool, a: &Value, b: &Value) -> bool {
	if precision {
		if let Some((x, y)) = number_pair(a, b) {
			return precision::geq(x, y);
		}
	}
	matches!(a.loose_cmp(b), Some(Ordering::Greater | Ordering::Equal))
}
