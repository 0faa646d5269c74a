//! FILENAME: core/view-engine/src/sort.rs
//! PURPOSE: Sort directive, the tri-state column cycle, and the record comparator.
//! CONTEXT: Values are compared numerically when both sides parse as numbers,
//! otherwise with a case-insensitive, accent-folding natural text order. Ranking is
//! numbers, then text, then blanks, which keeps the comparator a total
//! preorder even when a column mixes numeric and non-numeric values.

use crate::record::{FieldValue, Record};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

// ============================================================================
// DIRECTIVE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Header arrow for the active sort column.
    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}

/// The active sort. `Unsorted` is the `{none, none}` state: the filtered
/// sequence keeps dataset order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum SortDirective {
    #[default]
    Unsorted,
    Sorted {
        key: String,
        direction: SortDirection,
    },
}

impl SortDirective {
    pub fn ascending(key: impl Into<String>) -> Self {
        SortDirective::Sorted {
            key: key.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(key: impl Into<String>) -> Self {
        SortDirective::Sorted {
            key: key.into(),
            direction: SortDirection::Descending,
        }
    }

    /// Next directive after the header for `key` is activated.
    ///
    /// | current            | next               |
    /// |--------------------|--------------------|
    /// | other key / none   | `{key, ascending}` |
    /// | `{key, ascending}` | `{key, descending}`|
    /// | `{key, descending}`| `{none, none}`     |
    pub fn advance(&self, key: &str) -> SortDirective {
        match self {
            SortDirective::Sorted {
                key: current,
                direction,
            } if current == key => match direction {
                SortDirection::Ascending => SortDirective::descending(key),
                SortDirection::Descending => SortDirective::Unsorted,
            },
            _ => SortDirective::ascending(key),
        }
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            SortDirective::Unsorted => None,
            SortDirective::Sorted { key, .. } => Some(key),
        }
    }

    pub fn direction(&self) -> Option<SortDirection> {
        match self {
            SortDirective::Unsorted => None,
            SortDirective::Sorted { direction, .. } => Some(*direction),
        }
    }

    /// Direction applied to `key`, if it is the active sort column.
    pub fn direction_for(&self, key: &str) -> Option<SortDirection> {
        match self {
            SortDirective::Sorted { key: k, direction } if k == key => Some(*direction),
            _ => None,
        }
    }

    pub fn is_sorted(&self) -> bool {
        !matches!(self, SortDirective::Unsorted)
    }
}

// ============================================================================
// COMPARATOR
// ============================================================================

/// Build a comparator over `key`. Descending is the exact reverse of ascending.
pub fn build_comparator(
    key: &str,
    direction: SortDirection,
) -> impl Fn(&Record, &Record) -> Ordering + '_ {
    move |a, b| {
        let ordering = compare_values(a.get(key), b.get(key));
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Ascending comparison of two (possibly missing) field values.
pub fn compare_values(a: Option<&FieldValue>, b: Option<&FieldValue>) -> Ordering {
    match (SortKey::of(a), SortKey::of(b)) {
        (SortKey::Number(x), SortKey::Number(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (SortKey::Text(x), SortKey::Text(y)) => natural_cmp(&x, &y),
        (SortKey::Blank, SortKey::Blank) => Ordering::Equal,
        (x, y) => x.rank().cmp(&y.rank()),
    }
}

/// Classified value for ordering. Blanks (missing or null) sort last.
enum SortKey {
    Number(f64),
    Text(String),
    Blank,
}

impl SortKey {
    fn of(value: Option<&FieldValue>) -> SortKey {
        match value {
            None | Some(FieldValue::Null) => SortKey::Blank,
            Some(v) => match v.as_number() {
                Some(n) => SortKey::Number(n),
                None => SortKey::Text(v.display().into_owned()),
            },
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Number(_) => 0,
            SortKey::Text(_) => 1,
            SortKey::Blank => 2,
        }
    }
}

// ============================================================================
// NATURAL TEXT ORDER
// ============================================================================

/// Case-insensitive comparison where digit runs compare by value, so "2"
/// sorts before "10" and "coin9" before "coin10". Separators (whitespace and
/// punctuation) sort before digits, digits before letters.
///
/// Accents are folded for the primary comparison ("Ävalanche" sorts with the
/// a's); strings that differ only in accents then fall back to their
/// unfolded form so the order stays deterministic.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let a_lower = a.to_lowercase();
    let b_lower = b.to_lowercase();
    natural_order(&fold_diacritics(&a_lower), &fold_diacritics(&b_lower))
        .then_with(|| natural_order(&a_lower, &b_lower))
}

/// NFKD decomposition with combining marks dropped: "é" -> "e", "ﬁ" -> "fi".
fn fold_diacritics(s: &str) -> String {
    if s.is_ascii() {
        return s.to_string();
    }
    s.nfkd().filter(|c| !is_combining_mark(*c)).collect()
}

fn natural_order(a: &str, b: &str) -> Ordering {
    let mut ai = a.chars().peekable();
    let mut bi = b.chars().peekable();

    loop {
        let (x, y) = match (ai.peek().copied(), bi.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => (x, y),
        };

        let ordering = if x.is_ascii_digit() && y.is_ascii_digit() {
            let run_a = take_digits(&mut ai);
            let run_b = take_digits(&mut bi);
            compare_digit_runs(&run_a, &run_b)
        } else {
            ai.next();
            bi.next();
            char_class(x).cmp(&char_class(y)).then(x.cmp(&y))
        };

        if ordering != Ordering::Equal {
            return ordering;
        }
    }
}

fn char_class(c: char) -> u8 {
    if c.is_ascii_digit() {
        1
    } else if c.is_alphanumeric() {
        2
    } else {
        0
    }
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.next_if(|c| c.is_ascii_digit()) {
        run.push(c);
    }
    run
}

fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
