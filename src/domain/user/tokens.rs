//! Username extraction from free-form invitation input

use once_cell::sync::Lazy;
use regex::Regex;

/// Word characters and hyphens, accepted when recruiting
static RECRUIT_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z0-9_-]+").unwrap());

/// Word characters only, accepted when a team is defined with a username list
static WORD_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z0-9_]+").unwrap());

/// Extract recruitable usernames, e.g. `"alice, mary-jane"` -> `["alice", "mary-jane"]`
pub fn recruit_tokens<I, S>(input: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    scan(&RECRUIT_TOKEN, input)
}

/// Extract word-only usernames, e.g. `"mary-jane"` -> `["mary", "jane"]`
pub fn word_tokens<I, S>(input: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    scan(&WORD_TOKEN, input)
}

fn scan<I, S>(pattern: &Regex, input: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    input
        .into_iter()
        .flat_map(|item| {
            pattern
                .find_iter(item.as_ref())
                .map(|m| m.as_str().to_string())
                .collect::<Vec<_>>()
        })
        .collect()
}
