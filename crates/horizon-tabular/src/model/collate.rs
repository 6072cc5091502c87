//! Locale-aware text comparison for the default text comparator.
//!
//! This implements one fixed convention, close to the root collation order
//! used by browsers for English text:
//!
//! 1. Primary level: whitespace and punctuation sort before digits, digits
//!    before letters; letters compare case-insensitively.
//! 2. Tertiary level: on a primary tie, the first position where the strings
//!    differ only by case decides, lowercase first.
//! 3. Finally, raw code point order, so distinct strings never compare equal.
//!
//! Accents are not folded; `é` orders after `z` at the primary level.

use std::cmp::Ordering;

/// Compares two strings with the fixed locale convention described in the
/// module docs.
///
/// # Example
///
/// ```
/// use horizon_tabular::model::locale_compare;
/// use std::cmp::Ordering;
///
/// assert_eq!(locale_compare("apple", "Banana"), Ordering::Less);
/// assert_eq!(locale_compare("a", "A"), Ordering::Less);
/// assert_eq!(locale_compare("item 2", "item10"), Ordering::Less);
/// ```
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    primary_keys(a)
        .cmp(primary_keys(b))
        .then_with(|| tertiary(a, b))
        .then_with(|| a.cmp(b))
}

/// Character class followed by the lowercased character.
fn primary_keys(s: &str) -> impl Iterator<Item = (u8, char)> + '_ {
    s.chars().flat_map(|c| {
        let class = char_class(c);
        c.to_lowercase().map(move |lower| (class, lower))
    })
}

fn char_class(c: char) -> u8 {
    if c.is_alphabetic() {
        2
    } else if c.is_numeric() {
        1
    } else {
        0
    }
}

fn tertiary(a: &str, b: &str) -> Ordering {
    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca == cb {
            continue;
        }
        return match (ca.is_lowercase(), cb.is_lowercase()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => Ordering::Equal,
        };
    }
    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_primary() {
        assert_eq!(locale_compare("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_compare("Zebra", "apple"), Ordering::Greater);
        assert_eq!(locale_compare("alpha", "ALPHABET"), Ordering::Less);
    }

    #[test]
    fn test_lowercase_first_on_tie() {
        assert_eq!(locale_compare("a", "A"), Ordering::Less);
        assert_eq!(locale_compare("Widget", "widget"), Ordering::Greater);
    }

    #[test]
    fn test_punctuation_and_digits_before_letters() {
        assert_eq!(locale_compare("~tilde", "alpha"), Ordering::Less);
        assert_eq!(locale_compare("9 lives", "nine"), Ordering::Less);
        assert_eq!(locale_compare("_x", "1"), Ordering::Less);
    }

    #[test]
    fn test_digits_compare_as_text() {
        assert_eq!(locale_compare("10", "9"), Ordering::Less);
    }

    #[test]
    fn test_equal_only_when_identical() {
        assert_eq!(locale_compare("same", "same"), Ordering::Equal);
        assert_ne!(locale_compare("ß", "ss"), Ordering::Equal);
        assert_eq!(locale_compare("", ""), Ordering::Equal);
        assert_eq!(locale_compare("", "a"), Ordering::Less);
    }

    #[test]
    fn test_antisymmetric() {
        let words = ["b", "B", "a", "A", "ab", "Ab", "1", "-", "é", "e"];
        for a in words {
            for b in words {
                assert_eq!(locale_compare(a, b), locale_compare(b, a).reverse(), "{a} vs {b}");
            }
        }
    }
}
