//! Strict ISO-8601 date detection and epoch conversion.
//!
//! A string is treated as a date only when the whole input matches the strict
//! profile `YYYY[-MM[-DD]][THH[:MM[:SS[.fff]]]][Z|±HH:MM|±HHMM]` and all of
//! its components are in range. Lenient or partial parses are rejected, so
//! values like `"06/11/2018"`, `"20180611"` or `"2018-02-30"` stay plain
//! strings.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;
use winnow::{
	combinator::{alt, eof, opt, preceded},
	prelude::*,
	token::{one_of, take_while},
};

use crate::value::Value;

#[derive(Debug, PartialEq, Eq, Error)]
pub enum DateParseError {
	#[error("not a strict ISO-8601 date: {0}")]
	Grammar(String),
	#[error("date component out of range: {0}")]
	OutOfRange(String),
}

/// --- Helper aliases ---
type Input<'a> = &'a str;
type ParserResult<T> = winnow::Result<T>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct IsoParts {
	year: i32,
	month: u32,
	day: u32,
	hour: u32,
	minute: u32,
	second: u32,
	millis: u32,
	offset_minutes: i32,
}

/// --- Parser functions ---
/// Parses exactly `N` ASCII digits into a number
fn fixed_digits<const N: usize>(input: &mut Input<'_>) -> ParserResult<u32> {
	take_while(N..=N, |c: char| c.is_ascii_digit())
		.try_map(str::parse)
		.parse_next(input)
}

/// Parses the calendar date part `YYYY[-MM[-DD]]`; omitted components
/// default to the first month/day
fn parse_date(input: &mut Input<'_>) -> ParserResult<(i32, u32, u32)> {
	let year = fixed_digits::<4>.parse_next(input)? as i32;
	let month = opt(preceded('-', fixed_digits::<2>)).parse_next(input)?;
	let day = match month {
		Some(_) => opt(preceded('-', fixed_digits::<2>)).parse_next(input)?,
		None => None,
	};
	Ok((year, month.unwrap_or(1), day.unwrap_or(1)))
}

/// Parses the time part `THH[:MM[:SS[.fff]]]`; fractional seconds are
/// truncated to millisecond resolution
fn parse_time(input: &mut Input<'_>) -> ParserResult<(u32, u32, u32, u32)> {
	let hour = preceded('T', fixed_digits::<2>).parse_next(input)?;
	let minute = opt(preceded(':', fixed_digits::<2>)).parse_next(input)?;
	let second = match minute {
		Some(_) => opt(preceded(':', fixed_digits::<2>)).parse_next(input)?,
		None => None,
	};
	let millis = match second {
		Some(_) => opt(parse_fraction).parse_next(input)?,
		None => None,
	};
	Ok((
		hour,
		minute.unwrap_or(0),
		second.unwrap_or(0),
		millis.unwrap_or(0),
	))
}

/// Parses fractional seconds (1 to 9 digits) into milliseconds
fn parse_fraction(input: &mut Input<'_>) -> ParserResult<u32> {
	preceded('.', take_while(1..=9, |c: char| c.is_ascii_digit()))
		.map(|digits: &str| {
			let mut millis = 0u32;
			let mut scale = 100u32;
			for c in digits.chars().take(3) {
				millis += (c as u32 - '0' as u32) * scale;
				scale /= 10;
			}
			millis
		})
		.parse_next(input)
}

/// Parses a UTC offset: `Z`, `±HH:MM` or `±HHMM`, as signed minutes
fn parse_offset(input: &mut Input<'_>) -> ParserResult<i32> {
	alt((
		one_of(['Z', 'z']).value(0),
		(
			one_of(['+', '-']),
			fixed_digits::<2>,
			opt(':'),
			fixed_digits::<2>,
		)
			.map(|(sign, hours, _, minutes)| {
				let total = (hours * 60 + minutes) as i32;
				if sign == '-' {
					-total
				} else {
					total
				}
			}),
	))
	.parse_next(input)
}

/// Parses the full grammar; an offset is only accepted after a time part
fn parse_iso_parts(input: &mut Input<'_>) -> ParserResult<IsoParts> {
	let (year, month, day) = parse_date.parse_next(input)?;
	let time = opt((parse_time, opt(parse_offset))).parse_next(input)?;
	let ((hour, minute, second, millis), offset_minutes) = match time {
		Some((time, offset)) => (time, offset.unwrap_or(0)),
		None => ((0, 0, 0, 0), 0),
	};
	Ok(IsoParts {
		year,
		month,
		day,
		hour,
		minute,
		second,
		millis,
		offset_minutes,
	})
}

/// Parses a strict ISO-8601 date string into epoch milliseconds.
pub fn parse_iso(value: &str) -> Result<i64, DateParseError> {
	let mut full_parser = (parse_iso_parts, eof).map(|(parts, _)| parts);
	let parts = full_parser
		.parse(value)
		.map_err(|err| DateParseError::Grammar(err.to_string()))?;
	to_epoch_millis(parts)
}

/// Returns whether the string satisfies the strict ISO-8601 profile.
pub fn is_iso_date(value: &str) -> bool {
	parse_iso(value).is_ok()
}

/// Converts string values recognized as strict ISO-8601 dates into their
/// numeric epoch-millisecond form; everything else passes through unchanged.
pub(crate) fn normalize(value: Value) -> Value {
	match value {
		Value::Str(s) => match parse_iso(&s) {
			Ok(millis) => {
				tracing::debug!("normalized ISO-8601 string {:?} to epoch millis {}", s, millis);
				Value::Number(millis as f64)
			}
			Err(_) => Value::Str(s),
		},
		other => other,
	}
}

fn to_epoch_millis(parts: IsoParts) -> Result<i64, DateParseError> {
	let date = NaiveDate::from_ymd_opt(parts.year, parts.month, parts.day).ok_or_else(|| {
		DateParseError::OutOfRange(format!(
			"{:04}-{:02}-{:02}",
			parts.year, parts.month, parts.day
		))
	})?;
	let time = NaiveTime::from_hms_milli_opt(parts.hour, parts.minute, parts.second, parts.millis)
		.ok_or_else(|| {
			DateParseError::OutOfRange(format!(
				"{:02}:{:02}:{:02}.{:03}",
				parts.hour, parts.minute, parts.second, parts.millis
			))
		})?;
	let local_millis = date.and_time(time).and_utc().timestamp_millis();
	Ok(local_millis - i64::from(parts.offset_minutes) * 60_000)
}
