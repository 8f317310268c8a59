//! Masking of diagnostic output.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// Replacement written in place of every filtered term.
pub const FILTERED: &str = "<filtered>";

#[allow(clippy::expect_used)]
static ACCOUNT_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new("[0-9]{12,19}").expect("account number pattern is valid"));

/// Returns the last four characters of an account number, or the whole value when it is
/// shorter than that.
pub fn last_four(account_number: &str) -> &str {
    let start = account_number
        .char_indices()
        .rev()
        .nth(3)
        .map_or(0, |(index, _)| index);
    &account_number[start..]
}

/// Scrubs log lines before they are emitted.
///
/// Every configured term is replaced with [`FILTERED`], then every run of 12 to 19 digits
/// is reduced to its last four digits.
///
/// The terms are secrets themselves, so `Debug` only reports how many there are.
#[derive(Clone, Default)]
pub struct LogFilter {
    terms: Vec<String>,
}

impl fmt::Debug for LogFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogFilter")
            .field("terms", &self.terms.len())
            .finish()
    }
}

impl LogFilter {
    pub fn new<I, T>(terms: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::default().with_terms(terms)
    }

    /// Returns a copy of this filter which also scrubs `terms`. Empty terms are ignored.
    #[must_use]
    pub fn with_terms<I, T>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        for term in terms.into_iter().map(Into::into) {
            if !term.is_empty() && !self.terms.contains(&term) {
                self.terms.push(term);
            }
        }
        // Longer terms first so a term containing another is replaced whole.
        self.terms.sort_by_key(|term| std::cmp::Reverse(term.len()));
        self
    }

    pub fn filter(&self, message: &str) -> String {
        let filtered = self
            .terms
            .iter()
            .fold(message.to_owned(), |acc, term| acc.replace(term.as_str(), FILTERED));

        ACCOUNT_NUMBER
            .replace_all(&filtered, |caps: &regex::Captures<'_>| {
                last_four(&caps[0]).to_owned()
            })
            .into_owned()
    }
}
