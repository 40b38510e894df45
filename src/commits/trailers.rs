use crate::identity::UserInfo;

const CO_AUTHOR_TOKEN: &str = "Co-authored-by: ";
const REVIEW_TOKEN: &str = "Reviewed-by: ";
const REVIEWERS_SEPARATOR: &str = ", ";

/// Identities listed in `Co-authored-by: Name <email>` lines.
/// The email is the last whitespace-separated token of the line.
pub fn co_authors(message: &str) -> Vec<UserInfo> {
    message
        .lines()
        .filter_map(|line| line.strip_prefix(CO_AUTHOR_TOKEN))
        .filter_map(|rest| {
            let rest = rest.trim();
            let last = rest.split_whitespace().last()?;
            let email = last.trim_start_matches('<').trim_end_matches('>');
            if email.is_empty() {
                return None;
            }
            let name = rest[..rest.len() - last.len()].trim();
            Some(UserInfo::new(name, email))
        })
        .collect()
}

/// Reviewer names from the first `Reviewed-by: a, b, c` trailer.
pub fn reviewers(message: &str) -> Vec<String> {
    let Some(idx) = message.find(REVIEW_TOKEN) else {
        return Vec::new();
    };
    let rest = &message[idx + REVIEW_TOKEN.len()..];
    let line = rest.split('\n').next().unwrap_or(rest);
    line.split(REVIEWERS_SEPARATOR)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[path = "trailers_test.rs"]
mod tests;
