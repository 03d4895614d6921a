//! Natural ("human") ordering of ballot identifiers.
//!
//! Each string is split into alternating maximal runs of non-digits and
//! ASCII digits, always starting and ending with a (possibly empty) text run:
//!
//! ```text
//! "Orange County--1-19-19-150"
//!   -> "Orange County--", 1, "-", 19, "-", 19, "-", 150, ""
//! ```
//!
//! Runs are compared pairwise from the left. Digit runs compare by numeric
//! value (`"007"` equals `"7"`), text runs compare literally, and a string
//! that runs out of runs first sorts first. Digit runs of any length are
//! compared without parsing, so no run can overflow.

use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Run<'a> {
    Text(&'a str),
    Number(&'a str),
}

struct Runs<'a> {
    rest: &'a str,
    expect_text: bool,
    done: bool,
}

impl<'a> Runs<'a> {
    fn new(s: &'a str) -> Self {
        Self {
            rest: s,
            expect_text: true,
            done: false,
        }
    }

    fn take_while(&mut self, digits: bool) -> &'a str {
        let end = self
            .rest
            .find(|c: char| c.is_ascii_digit() != digits)
            .unwrap_or(self.rest.len());
        let (run, rest) = self.rest.split_at(end);
        self.rest = rest;
        run
    }
}

impl<'a> Iterator for Runs<'a> {
    type Item = Run<'a>;

    fn next(&mut self) -> Option<Run<'a>> {
        if self.done {
            return None;
        }
        if self.expect_text {
            let text = self.take_while(false);
            self.expect_text = false;
            self.done = self.rest.is_empty();
            Some(Run::Text(text))
        } else {
            self.expect_text = true;
            Some(Run::Number(self.take_while(true)))
        }
    }
}

fn compare_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Compares two strings in natural order.
///
/// # Examples
///
/// ```rust
/// use std::cmp::Ordering;
/// use sampler_core::natural::compare_natural;
///
/// assert_eq!(
///     compare_natural("Orange County--1-1-55-256", "Orange County--1-1-64-290"),
///     Ordering::Less
/// );
/// assert_eq!(
///     compare_natural("Orange County--1-3-288-117", "Orange County--1-19-19-150"),
///     Ordering::Less
/// );
/// assert_eq!(compare_natural("batch-007", "batch-7"), Ordering::Equal);
/// ```
pub fn compare_natural(a: &str, b: &str) -> Ordering {
    let mut left = Runs::new(a);
    let mut right = Runs::new(b);
    loop {
        let ordering = match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(Run::Text(x)), Some(Run::Text(y))) => x.cmp(y),
            (Some(Run::Number(x)), Some(Run::Number(y))) => compare_digits(x, y),
            // Both sides alternate from a leading text run, so kinds always align.
            (Some(Run::Text(_)), Some(Run::Number(_))) => Ordering::Greater,
            (Some(Run::Number(_)), Some(Run::Text(_))) => Ordering::Less,
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
}

/// Stable natural sort of a slice by a string key.
///
/// Elements whose keys compare equal keep their relative order.
pub fn sort_natural_by_key<T, F>(items: &mut [T], mut key: F)
where
    F: FnMut(&T) -> &str,
{
    items.sort_by(|a, b| compare_natural(key(a), key(b)));
}

/// Borrowed string ordered naturally; usable as a `BTreeMap` or sort key.
///
/// Strings that compare equal under [`compare_natural`] but differ in text,
/// such as `"County 07"` and `"County 7"`, are ordered by their bytes, so
/// two keys are equal only when the strings are identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NaturalKey<'a>(pub &'a str);

impl PartialOrd for NaturalKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NaturalKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_natural(self.0, other.0).then_with(|| self.0.cmp(other.0))
    }
}
