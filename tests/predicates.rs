//! End-to-end predicate behavior through the public surface.

use chrono::NaiveDate;
use conditional::{compare, Value};
use serde_json::json;

#[test]
fn null_guard_applies_to_ordering_only() {
	assert!(!compare(Value::Null).gt(5));
	assert!(!compare(5).gt(Value::Null));
	assert!(!compare(Value::Null).gt(Value::Null));
	assert!(!compare(Value::Null).lt(5));
	assert!(!compare(Value::Null).cap(5));
	assert!(!compare(Value::Null).floor(5));
	assert!(!compare(Value::Null).range(0, 10));

	// equality predicates are exempt from the guard
	assert!(compare(Value::Null).equal(Value::Null));
	assert!(!compare(Value::Null).notequal(Value::Null));
	assert!(compare(Value::Null).isnull());
	assert!(!compare(Value::Null).isnotnull());
}

#[test]
fn undefined_never_orders_but_equals_itself() {
	assert!(!compare(Value::Undefined).gt(5));
	assert!(!compare(5).gt(Value::Undefined));
	assert!(compare(Value::Undefined).equal(Value::Undefined));
	assert!(!compare(Value::Undefined).isnull());
	assert!(compare(Value::Undefined).isnotnull());
}

#[test]
fn cap_and_floor_treat_falsy_non_zero_staged_values_asymmetrically() {
	assert!(compare(Value::Undefined).cap(10));
	assert!(!compare(Value::Undefined).floor(10));
	assert!(compare("").cap(10));
	assert!(!compare("").floor(10));
	assert!(compare(false).cap(10));
	assert!(!compare(false).floor(10));

	// zero compares for real
	assert!(compare(0).cap(10));
	assert!(compare(0).exists());
	assert!(!compare(0).floor(10));
	assert!(compare(0).floor(0));
}

#[test]
fn range_bounds_are_order_independent() {
	assert!(compare(1).range(0, 2));
	assert!(compare(1).range(2, 0));
	assert!(!compare(5).range(0, 2));
	assert!(!compare(5).range(2, 0));
	assert!(!compare(Value::Undefined).range(0, 2));
	assert!(compare("2018-06-11").range("2020-01-01", "2000-01-01"));
}

#[test]
fn iso_date_strings_normalize_before_comparing() {
	assert!(compare("2018-06-11").equal("2018-06-11"));
	assert!(compare("2018-06-11").gt("2000-06-11"));
	assert!(compare("2000-06-11").lt("2018-06-11"));
	assert!(compare("2018-06-11T10:30:00Z").gt("2018-06-11"));

	// native dates coerce numerically in ordering predicates
	let date = NaiveDate::from_ymd_opt(2018, 6, 11).unwrap();
	assert!(compare(date).gt("2000-06-11"));
	assert!(compare(date).range("2000-01-01", "2020-01-01"));

	// non-date strings stay strings
	assert!(compare("joe,john").notequal("2018-06-11"));
	assert!(!compare("not a date").gt("2000-06-11"));
}

#[test]
fn membership_dispatches_by_argument_shape() {
	assert!(compare(10).isin(vec![0, 10, 20]));
	assert!(compare("john").isin(vec!["joe", "john"]));
	assert!(compare("john").isin("joe,john"));
	assert!(compare("john").isin(json!({ "joe": 1, "john": 2 })));
	assert!(compare(json!(["a", "b"])).isin("a"));

	assert!(compare(15).notin(vec![0, 10, 20]));
	assert!(compare("jane").notin("joe,john"));
	// membership is strict: a staged number never matches string elements
	assert!(compare(10).notin("9,10"));
}

#[test]
fn exists_special_cases_numbers() {
	assert!(compare(0).exists());
	assert!(compare(42).exists());
	assert!(compare("x").exists());
	assert!(!compare(false).exists());
	assert!(!compare("").exists());
	assert!(!compare(Value::Null).exists());
	assert!(!compare(Value::Undefined).exists());
}

#[test]
fn deepequal_compares_structure() {
	assert!(compare(json!({ "a": [1, 2], "b": null })).deepequal(json!({ "a": [1, 2], "b": null })));
	assert!(compare(json!([1, [2, 3]])).not().deepequal(json!([1, [2, 4]])));
	// strict equality never holds between distinct composites
	assert!(!compare(json!([1, 2])).equal(json!([1, 2])));
}

#[test]
fn infinity_follows_native_ordering() {
	let inf = f64::INFINITY;
	assert!(!compare(inf).gt(inf));
	assert!(compare(inf).cap(inf));
	assert!(compare(inf).range(inf, inf));
	assert!(compare(inf).gt(1e308));
	assert!(compare(f64::NEG_INFINITY).lt(-1e308));
}

#[test]
fn no_predicate_panics_on_mismatched_shapes() {
	let shapes = [
		Value::Null,
		Value::Undefined,
		Value::Bool(true),
		Value::Number(f64::NAN),
		Value::Str("x".into()),
		Value::Date(0),
		Value::from(json!([1, "a"])),
		Value::from(json!({ "k": 1 })),
	];
	for staged in &shapes {
		for arg in &shapes {
			let comparison = compare(staged.clone());
			comparison.gt(arg.clone());
			comparison.lt(arg.clone());
			comparison.cap(arg.clone());
			comparison.floor(arg.clone());
			comparison.range(arg.clone(), arg.clone());
			comparison.equal(arg.clone());
			comparison.isin(arg.clone());
			comparison.deepequal(arg.clone());
			comparison.exists();
			comparison.isnull();
		}
	}
}
