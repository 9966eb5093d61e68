use std::borrow::Cow;
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// How entry names are compared for collisions and sorting.
///
/// Case-insensitive comparison folds with Unicode lowercase. No Unicode
/// normalization form is applied; names are compared as stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseSensitivity {
    Sensitive,
    #[default]
    Insensitive,
}

impl CaseSensitivity {
    pub fn fold<'a>(self, name: &'a str) -> Cow<'a, str> {
        match self {
            Self::Sensitive => Cow::Borrowed(name),
            Self::Insensitive => Cow::Owned(name.to_lowercase()),
        }
    }

    pub fn same_name(self, a: &str, b: &str) -> bool {
        self.fold(a) == self.fold(b)
    }

    /// Total order: folded name first, raw name as the tie breaker.
    pub fn compare(self, a: &str, b: &str) -> Ordering {
        self.fold(a).cmp(&self.fold(b)).then_with(|| a.cmp(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insensitive_is_default() {
        assert_eq!(CaseSensitivity::default(), CaseSensitivity::Insensitive);
    }

    #[test]
    fn insensitive_treats_case_variants_as_same_name() {
        assert!(CaseSensitivity::Insensitive.same_name("Report.PDF", "report.pdf"));
        assert!(CaseSensitivity::Insensitive.same_name("ÄRGER", "ärger"));
        assert!(!CaseSensitivity::Sensitive.same_name("Report.PDF", "report.pdf"));
    }

    #[test]
    fn compare_orders_folded_then_raw() {
        let policy = CaseSensitivity::Insensitive;
        assert_eq!(policy.compare("apple", "Banana"), Ordering::Less);
        assert_eq!(policy.compare("B", "b"), Ordering::Less);
        assert_eq!(CaseSensitivity::Sensitive.compare("apple", "Banana"), Ordering::Greater);
    }
}
