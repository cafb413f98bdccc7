//! Client-side input validation.
//!
//! Every predicate returns `Ok(())` when the value satisfies its constraint and
//! an [`InvalidArgument`] naming `field` otherwise. Values are never modified.

use std::fmt::Display;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{InvalidArgument, Result};

// ============================================================================
// Patterns
// ============================================================================

/// 24 lowercase hex characters.
static OBJECT_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-f0-9]{24}$").expect("valid regex"));

static DISCORD_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("valid regex"));

/// Dot-separated segments, optionally closed by a `*` segment.
static FLAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]+(?:\.[A-Za-z0-9_-]+)*(?:\.\*)?$").expect("valid regex")
});

static STRICT_FLAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]+(?:\.[A-Za-z0-9_-]+)*$").expect("valid regex")
});

// ============================================================================
// Predicates
// ============================================================================

/// Values that can be checked for emptiness.
pub trait Emptiness {
    fn is_empty_value(&self) -> bool;
}

impl Emptiness for str {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl Emptiness for String {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Emptiness for [T] {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Emptiness for Vec<T> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

/// Fails if `value` is an empty string or an empty sequence.
pub fn not_empty<V: Emptiness + ?Sized>(value: &V, field: &str) -> Result<()> {
    if value.is_empty_value() {
        return Err(InvalidArgument::new(field, "must not be empty"));
    }
    Ok(())
}

/// Fails unless `value` is a 24 character lowercase hex object id.
pub fn object_id(value: &str, field: &str) -> Result<()> {
    if OBJECT_ID_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(InvalidArgument::new(
            field,
            format!("'{value}' is not a valid object id"),
        ))
    }
}

/// Fails unless `value` is a non-empty string of digits.
pub fn discord_id(value: &str, field: &str) -> Result<()> {
    if DISCORD_ID_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(InvalidArgument::new(
            field,
            format!("'{value}' is not a valid discord id"),
        ))
    }
}

/// Fails if `value < floor`.
pub fn min<T: PartialOrd + Display>(value: T, floor: T, field: &str) -> Result<()> {
    if value < floor {
        return Err(InvalidArgument::new(
            field,
            format!("{value} is below the minimum of {floor}"),
        ));
    }
    Ok(())
}

/// Fails if `value` lies outside `lo..=hi`.
pub fn in_range<T: PartialOrd + Display>(value: T, lo: T, hi: T, field: &str) -> Result<()> {
    if value < lo || value > hi {
        return Err(InvalidArgument::new(
            field,
            format!("{value} is outside the range {lo}..={hi}"),
        ));
    }
    Ok(())
}

/// Fails unless `value` is a member of `allowed`.
pub fn one_of<T: PartialEq + Display + ?Sized>(
    value: &T,
    allowed: &[&T],
    field: &str,
) -> Result<()> {
    if allowed.iter().any(|candidate| *candidate == value) {
        return Ok(());
    }

    let options = allowed
        .iter()
        .map(|candidate| candidate.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    Err(InvalidArgument::new(
        field,
        format!("'{value}' must be one of: {options}"),
    ))
}

/// Fails unless `value` is a permission flag. A trailing `*` segment is allowed.
pub fn flag(value: &str, field: &str) -> Result<()> {
    if FLAG_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(InvalidArgument::new(
            field,
            format!("'{value}' is not a valid permission flag"),
        ))
    }
}

/// Like [`flag`], but rejects a trailing wildcard segment.
pub fn strict_flag(value: &str, field: &str) -> Result<()> {
    if STRICT_FLAG_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(InvalidArgument::new(
            field,
            format!("'{value}' is not a valid strict permission flag"),
        ))
    }
}

/// Applies [`flag`] to every element of `values`.
pub fn flags<S: AsRef<str>>(values: &[S], field: &str) -> Result<()> {
    values.iter().try_for_each(|value| flag(value.as_ref(), field))
}

/// Applies [`object_id`] to every element of `values`.
pub fn object_ids<S: AsRef<str>>(values: &[S], field: &str) -> Result<()> {
    values.iter().try_for_each(|value| object_id(value.as_ref(), field))
}
