//! Placeholder variables and span-to-variable rewriting.

use crate::extract::Span;

pub const SOURCE_VARIABLE_PREFIX: &str = "X_";
pub const TARGET_VARIABLE_PREFIX: &str = "Y_";

pub fn source_variable(index: usize) -> String {
    format!("{}{}", SOURCE_VARIABLE_PREFIX, index)
}

pub fn target_variable(index: usize) -> String {
    format!("{}{}", TARGET_VARIABLE_PREFIX, index)
}

/// True for tokens of the form `X_<n>` or `Y_<n>`.
pub fn is_variable_token(token: &str) -> bool {
    [SOURCE_VARIABLE_PREFIX, TARGET_VARIABLE_PREFIX]
        .iter()
        .filter_map(|prefix| token.strip_prefix(prefix))
        .any(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// Replace each span of `tokens` with its variable, one variable per span.
///
/// Tokens outside every span are kept. If spans overlap, the last span
/// containing a token wins for that token, so an overlapped span may show
/// up as more than one variable.
pub fn replace_with_var(tokens: &[&str], replacements: &[(Span, String)]) -> String {
    let mut out: Vec<&str> = Vec::with_capacity(tokens.len());
    let mut previous: Option<usize> = None;

    for (i, &word) in tokens.iter().enumerate() {
        let covering = replacements.iter().rposition(|(span, _)| span.contains(i));
        match covering {
            Some(j) if previous == Some(j) => {}
            Some(j) => out.push(replacements[j].1.as_str()),
            None => out.push(word),
        }
        previous = covering;
    }

    out.join(" ")
}
