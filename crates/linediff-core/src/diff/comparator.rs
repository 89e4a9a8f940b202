//! Element equality used by the aligner.
//!
//! Comparators must behave as an equivalence relation over the elements
//! actually being compared. Line comparators never allocate when comparing;
//! `normalize` is offered for callers that want the canonical form itself.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Decides whether two elements count as equal for alignment.
pub trait Comparator<T: ?Sized> {
    fn equal(&self, a: &T, b: &T) -> bool;
}

impl<T: ?Sized, C: Comparator<T> + ?Sized> Comparator<T> for &C {
    fn equal(&self, a: &T, b: &T) -> bool {
        (**self).equal(a, b)
    }
}

/// Plain `==` equality.
#[derive(Debug, Clone, Copy, Default)]
pub struct Exact;

impl<T: PartialEq + ?Sized> Comparator<T> for Exact {
    fn equal(&self, a: &T, b: &T) -> bool {
        a == b
    }
}

/// Adapts a closure into a comparator.
#[derive(Clone, Copy)]
pub struct FnComparator<F>(pub F);

impl<T: ?Sized, F> Comparator<T> for FnComparator<F>
where
    F: Fn(&T, &T) -> bool,
{
    fn equal(&self, a: &T, b: &T) -> bool {
        (self.0)(a, b)
    }
}

/// Built-in line comparators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineComparator {
    /// Byte-for-byte equality
    #[default]
    Exact,
    /// Every run of whitespace, a lone tab included, counts as one space
    CollapseWhitespace,
    /// Whitespace is ignored entirely
    IgnoreWhitespace,
}

impl LineComparator {
    /// Canonical form of `line` under this comparator. Borrows when the line
    /// is already canonical.
    pub fn normalize<'a>(&self, line: &'a str) -> Cow<'a, str> {
        match self {
            LineComparator::Exact => Cow::Borrowed(line),
            LineComparator::CollapseWhitespace => {
                if needs_collapse(line) {
                    Cow::Owned(collapse_runs(line).collect())
                } else {
                    Cow::Borrowed(line)
                }
            }
            LineComparator::IgnoreWhitespace => {
                if line.chars().any(char::is_whitespace) {
                    Cow::Owned(line.chars().filter(|c| !c.is_whitespace()).collect())
                } else {
                    Cow::Borrowed(line)
                }
            }
        }
    }
}

impl Comparator<str> for LineComparator {
    fn equal(&self, a: &str, b: &str) -> bool {
        match self {
            LineComparator::Exact => a == b,
            LineComparator::CollapseWhitespace => a == b || collapse_runs(a).eq(collapse_runs(b)),
            LineComparator::IgnoreWhitespace => {
                a == b
                    || a.chars()
                        .filter(|c| !c.is_whitespace())
                        .eq(b.chars().filter(|c| !c.is_whitespace()))
            }
        }
    }
}

impl Comparator<String> for LineComparator {
    fn equal(&self, a: &String, b: &String) -> bool {
        Comparator::<str>::equal(self, a.as_str(), b.as_str())
    }
}

impl<'s> Comparator<&'s str> for LineComparator {
    fn equal(&self, a: &&'s str, b: &&'s str) -> bool {
        Comparator::<str>::equal(self, a, b)
    }
}

/// True unless every whitespace run in `line` is already a single space.
fn needs_collapse(line: &str) -> bool {
    let mut prev_ws = false;
    for c in line.chars() {
        let ws = c.is_whitespace();
        if ws && (prev_ws || c != ' ') {
            return true;
        }
        prev_ws = ws;
    }
    false
}

/// Characters of `line` with every whitespace run replaced by one space.
fn collapse_runs(line: &str) -> impl Iterator<Item = char> + '_ {
    let mut chars = line.chars().peekable();
    std::iter::from_fn(move || {
        let c = chars.next()?;
        if c.is_whitespace() {
            while chars.peek().is_some_and(|n| n.is_whitespace()) {
                chars.next();
            }
            Some(' ')
        } else {
            Some(c)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_comparator() {
        assert!(Exact.equal("a b", "a b"));
        assert!(!Exact.equal("a b", "a  b"));
        assert!(Exact.equal(&3, &3));
    }

    #[test]
    fn test_collapse_whitespace_treats_runs_as_single_space() {
        let cmp = LineComparator::CollapseWhitespace;
        assert!(cmp.equal("a  b", "a b"));
        assert!(cmp.equal("a \t b", "a b"));
        assert!(cmp.equal("x   ", "x "));
        assert!(!cmp.equal("ab", "a b"));
    }

    #[test]
    fn test_collapse_whitespace_maps_lone_tab_to_space() {
        let cmp = LineComparator::CollapseWhitespace;
        assert!(cmp.equal("a\tb", "a b"));
        assert!(cmp.equal("\tx", " x"));
        assert_eq!(cmp.normalize("a\tb"), "a b");
        assert_eq!(cmp.normalize("a \t b"), "a b");
        assert!(matches!(cmp.normalize("a b"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_default_is_exact() {
        assert_eq!(LineComparator::default(), LineComparator::Exact);
        assert!(!LineComparator::default().equal("a  b", "a b"));
    }

    #[test]
    fn test_normalize_borrows_when_canonical() {
        let cmp = LineComparator::CollapseWhitespace;
        assert!(matches!(cmp.normalize("a b c"), Cow::Borrowed(_)));
        assert!(matches!(
            LineComparator::IgnoreWhitespace.normalize("abc"),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn test_ignore_whitespace() {
        let cmp = LineComparator::IgnoreWhitespace;
        assert!(cmp.equal("a b c", "abc"));
        assert!(cmp.equal("  ", ""));
        assert!(!cmp.equal("abc", "abd"));
        assert_eq!(cmp.normalize(" a\tb "), "ab");
    }

    #[test]
    fn test_equal_agrees_with_normalize() {
        let samples = ["", " ", "a  b", "a b", " a\t\tb ", "ab", "a\tb"];
        for cmp in [
            LineComparator::Exact,
            LineComparator::CollapseWhitespace,
            LineComparator::IgnoreWhitespace,
        ] {
            for a in samples {
                for b in samples {
                    assert_eq!(
                        cmp.equal(a, b),
                        cmp.normalize(a) == cmp.normalize(b),
                        "{:?} on {:?} vs {:?}",
                        cmp,
                        a,
                        b
                    );
                }
            }
        }
    }

    #[test]
    fn test_fn_comparator() {
        let cmp = FnComparator(|a: &str, b: &str| a.eq_ignore_ascii_case(b));
        assert!(cmp.equal("Hello", "hELLO"));
        assert!(!cmp.equal("Hello", "World"));
    }
}
