//! Tolerance-aware numeric comparison.
//!
//! Used in place of the native relational operators when precision mode is
//! enabled and both operands are numbers. Values within a relative
//! `f64::EPSILON` band count as equal, so artifacts of floating-point
//! arithmetic (`0.1 + 0.2` vs `0.3`) stop ordering apart. Non-finite operands
//! keep exact semantics: `Infinity` equals `Infinity` and exceeds nothing.

pub(crate) fn eq(a: f64, b: f64) -> bool {
	if a == b {
		return true;
	}
	if !a.is_finite() || !b.is_finite() {
		return false;
	}
	(a - b).abs() <= f64::EPSILON * 1.0_f64.max(a.abs()).max(b.abs())
}

pub(crate) fn gt(a: f64, b: f64) -> bool {
	a > b && !eq(a, b)
}

pub(crate) fn lt(a: f64, b: f64) -> bool {
	a < b && !eq(a, b)
}

pub(crate) fn geq(a: f64, b: f64) -> bool {
	a > b || eq(a, b)
}

pub(crate) fn leq(a: f64, b: f64) -> bool {
	a < b || eq(a, b)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_tolerates_float_artifacts() {
		let sum = 0.1 + 0.2;
		assert!(sum > 0.3); // native ordering disagrees
		assert!(eq(sum, 0.3));
		assert!(!gt(sum, 0.3));
		assert!(!lt(sum, 0.3));
		assert!(leq(sum, 0.3));
		assert!(geq(sum, 0.3));
	}

	#[test]
	fn test_orders_distinct_values() {
		assert!(gt(2.0, 1.0));
		assert!(lt(1.0, 2.0));
		assert!(!gt(1.0, 2.0));
		assert!(leq(1.0, 2.0));
		assert!(!geq(1.0, 2.0));
		// Tolerance scales relatively: well-separated large values still order
		assert!(gt(1.0e15 + 1.0, 1.0e15));
	}

	#[test]
	fn test_non_finite_operands() {
		assert!(eq(f64::INFINITY, f64::INFINITY));
		assert!(!gt(f64::INFINITY, f64::INFINITY));
		assert!(leq(f64::INFINITY, f64::INFINITY));
		assert!(gt(f64::INFINITY, 1.0));
		assert!(lt(f64::NEG_INFINITY, 1.0));
		assert!(!eq(f64::NAN, f64::NAN));
		assert!(!gt(f64::NAN, 0.0));
		assert!(!leq(f64::NAN, 0.0));
	}
}
