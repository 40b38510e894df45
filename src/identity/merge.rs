//! Offline fuzzy merging of contributor aliases.
//!
//! Every candidate pair is scored on cleaned name tokens and the email
//! local part. Only the two best similarity observations are kept and a
//! pair is merged when their mean reaches `MERGE_THRESHOLD`. Components
//! shorter than `MIN_COMPONENT_LEN` never take part in a comparison.
//!
//! Ids are assigned in a single left-to-right scan: a matched pair shares
//! the smaller of the two ids, but earlier members of a cluster are not
//! revisited, so the grouping is not transitively closed.

use std::collections::{BTreeMap, HashSet};

use super::{BotFilter, UserInfo};
use crate::commits::CommitInfo;

const MIN_COMPONENT_LEN: usize = 3;
const MERGE_THRESHOLD: f64 = 0.95;
const TOP_SCORES: usize = 2;

const NOISE_TOKENS: &[&str] = &["jr", "admin", "support", "anonymous", "anon", "user", "cvs"];
const TIMEZONES: &[&str] = &["cst", "pst", "pdt", "cdt", "gmt", "bst", "cet", "cest"];
const DELIMITERS: &[char] = &[' ', '+', '-', ',', '.', '_', ';'];

/// Keeps only the `capacity` highest values pushed into it.
struct TopScores {
    scores: Vec<f64>,
    capacity: usize,
}

impl TopScores {
    fn new(capacity: usize) -> Self {
        Self {
            scores: Vec::with_capacity(capacity + 1),
            capacity,
        }
    }

    fn push(&mut self, score: f64) {
        self.scores.push(score);
        if self.scores.len() > self.capacity {
            let min_idx = self
                .scores
                .iter()
                .enumerate()
                .min_by(|a, b| a.1.total_cmp(b.1))
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.scores.swap_remove(min_idx);
        }
    }

    fn mean(&self) -> Option<f64> {
        if self.scores.is_empty() {
            return None;
        }
        Some(self.scores.iter().sum::<f64>() / self.scores.len() as f64)
    }
}

pub fn levenshtein(lhs: &str, rhs: &str) -> usize {
    if lhs == rhs {
        return 0;
    }
    let lhs: Vec<char> = lhs.chars().collect();
    let rhs: Vec<char> = rhs.chars().collect();
    if lhs.is_empty() {
        return rhs.len();
    }
    if rhs.is_empty() {
        return lhs.len();
    }

    let mut cost: Vec<usize> = (0..=lhs.len()).collect();
    let mut new_cost = vec![0; lhs.len() + 1];

    for (i, rc) in rhs.iter().enumerate() {
        new_cost[0] = i + 1;
        for (j, lc) in lhs.iter().enumerate() {
            let replace = cost[j] + usize::from(lc != rc);
            let insert = cost[j + 1] + 1;
            let delete = new_cost[j] + 1;
            new_cost[j + 1] = replace.min(insert).min(delete);
        }
        std::mem::swap(&mut cost, &mut new_cost);
    }
    cost[lhs.len()]
}

/// Normalized edit similarity in [0, 1].
pub fn similarity(lhs: &str, rhs: &str) -> f64 {
    let max_len = lhs.chars().count().max(rhs.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein(lhs, rhs) as f64 / max_len as f64
}

fn flag(value: bool) -> f64 {
    if value { 1.0 } else { 0.0 }
}

fn long_enough(parts: &[&str]) -> bool {
    parts.iter().all(|p| p.chars().count() >= MIN_COMPONENT_LEN)
}

/// Lowercase, split on delimiters, keep letters only, drop noise tokens.
fn clean_name(raw: &str) -> String {
    let lower = raw.to_lowercase().replace(DELIMITERS, " ");
    let letters: String = lower
        .chars()
        .filter(|c| c.is_lowercase() || *c == ' ')
        .collect();
    letters
        .split_whitespace()
        .filter(|t| !NOISE_TOKENS.contains(t) && !TIMEZONES.contains(t))
        .collect::<Vec<_>>()
        .join(" ")
}

struct Candidate {
    info: UserInfo,
    name: String,
    compact_name: String,
    email: String,
    email_base: String,
    first: String,
    last: String,
    penultimate: String,
}

impl Candidate {
    fn new(info: UserInfo) -> Self {
        let name = clean_name(&info.name);
        let email = info.email.to_lowercase();
        let email_base = email.split('@').next().unwrap_or("").to_string();
        let parts: Vec<&str> = name.split(' ').collect();
        let first = parts.first().copied().unwrap_or("").to_string();
        let last = parts.last().copied().unwrap_or("").to_string();
        let penultimate = if parts.len() > 2 {
            parts[parts.len() - 2].to_string()
        } else {
            String::new()
        };
        Self {
            compact_name: name.replace(' ', ""),
            info,
            name,
            email,
            email_base,
            first,
            last,
            penultimate,
        }
    }

    fn is_same_person(&self, other: &Candidate) -> bool {
        let mut top = TopScores::new(TOP_SCORES);

        if long_enough(&[&self.name, &other.name]) {
            top.push(similarity(&self.name, &other.name));
            top.push(flag(self.compact_name == other.name));
            top.push(flag(other.compact_name == self.name));
            top.push(flag(self.compact_name == other.compact_name));
        }

        if long_enough(&[&self.first, &self.last, &other.first, &other.last]) {
            self.compare_name_tokens(other, &mut top);
        }

        if long_enough(&[&self.email_base, &other.email_base]) {
            top.push(2.0 * flag(self.email == other.email));
            top.push(similarity(&self.email_base, &other.email_base));
        }

        if long_enough(&[
            &self.first,
            &self.last,
            &self.email_base,
            &other.first,
            &other.last,
            &other.email_base,
        ]) {
            if self.first != self.last {
                other.email_contains_name_of(self, &mut top);
            }
            if other.first != other.last {
                self.email_contains_name_of(other, &mut top);
            }
        }

        top.mean().is_some_and(|mean| mean >= MERGE_THRESHOLD)
    }

    fn compare_name_tokens(&self, other: &Candidate, top: &mut TopScores) {
        let ff = similarity(&self.first, &other.first);
        if long_enough(&[&self.penultimate, &other.penultimate]) {
            let fp = similarity(&self.first, &other.penultimate);
            let pf = similarity(&self.penultimate, &other.first);
            let both_middle = ff.min(ff.max(fp).max(pf));
            for _ in 0..3 {
                top.push(both_middle);
            }
        } else if long_enough(&[&self.penultimate]) {
            self.compare_with_middle_name(other, top);
        } else if long_enough(&[&other.penultimate]) {
            other.compare_with_middle_name(self, top);
        } else {
            top.push(ff.min(similarity(&self.last, &other.last)));
            top.push(similarity(&self.first, &other.last).min(similarity(&self.last, &other.first)));
        }
    }

    // `self` has a middle name, `other` does not: try "First Last",
    // "Last First" and "Middle Last" readings.
    fn compare_with_middle_name(&self, other: &Candidate, top: &mut TopScores) {
        top.push(similarity(&self.first, &other.first).min(
            similarity(&self.penultimate, &other.last).max(similarity(&self.last, &other.last)),
        ));
        top.push(similarity(&self.first, &other.last).min(
            similarity(&self.penultimate, &other.first).max(similarity(&self.last, &other.first)),
        ));
        top.push(similarity(&self.last, &other.first).min(
            similarity(&self.penultimate, &other.last).max(similarity(&self.first, &other.last)),
        ));
    }

    fn email_contains_name_of(&self, other: &Candidate, top: &mut TopScores) {
        let (Some(first_initial), Some(last_initial)) =
            (other.first.chars().next(), other.last.chars().next())
        else {
            return;
        };
        let initial_last = format!("{first_initial}{}", other.last);
        top.push(flag(self.email_base.contains(&initial_last)));

        let first_initial_of_last = format!("{}{last_initial}", other.first);
        top.push(flag(self.email_base.contains(&first_initial_of_last)));

        top.push(
            2.0 * flag(
                self.email_base.contains(other.first.as_str())
                    && self.email_base.contains(other.last.as_str()),
            ),
        );
    }
}

/// Single pass over all pairs `(i, j)` with `i < j`. A new group id is
/// handed out to every element not yet grouped when its turn comes; a
/// matching pair moves both elements to the smaller id.
fn assign_groups(len: usize, same: impl Fn(usize, usize) -> bool) -> Vec<usize> {
    let mut groups: Vec<Option<usize>> = vec![None; len];
    let mut next_group = 0;
    for i in 0..len {
        let mut current = match groups[i] {
            Some(g) => g,
            None => {
                next_group += 1;
                next_group - 1
            }
        };
        groups[i] = Some(current);
        for j in i + 1..len {
            if !same(i, j) {
                continue;
            }
            match groups[j] {
                Some(group_j) => {
                    current = current.min(group_j);
                    groups[i] = Some(current);
                    groups[j] = Some(current);
                }
                None => groups[j] = Some(current),
            }
        }
    }
    groups.into_iter().map(|g| g.unwrap_or_default()).collect()
}

#[derive(Debug, Clone, Default)]
pub struct UserMerger {
    bots: Option<BotFilter>,
}

impl UserMerger {
    pub fn new(bots: Option<BotFilter>) -> Self {
        Self { bots }
    }

    fn is_bot(&self, user: &UserInfo) -> bool {
        self.bots.as_ref().is_some_and(|b| b.is_bot_user(user))
    }

    /// Distinct non-bot identities seen as author, committer or co-author.
    pub fn collect_identities<'a>(
        &self,
        commits: impl IntoIterator<Item = &'a CommitInfo>,
    ) -> Vec<UserInfo> {
        let mut seen = HashSet::new();
        let mut users = Vec::new();
        for commit in commits {
            let identities = std::iter::once(commit.author.clone())
                .chain(std::iter::once(commit.committer.clone()))
                .chain(crate::commits::co_authors(&commit.message));
            for user in identities {
                if self.is_bot(&user) || !seen.insert(user.clone()) {
                    continue;
                }
                users.push(user);
            }
        }
        users
    }

    /// Group identities judged to be the same person. Groups with a single
    /// distinct email are dropped since they merge nothing.
    pub fn merge_users(&self, users: &[UserInfo]) -> Vec<Vec<UserInfo>> {
        let candidates: Vec<Candidate> = users
            .iter()
            .filter(|u| !self.is_bot(u))
            .cloned()
            .map(Candidate::new)
            .collect();

        let groups_by_index =
            assign_groups(candidates.len(), |i, j| candidates[i].is_same_person(&candidates[j]));

        let mut groups: BTreeMap<usize, Vec<UserInfo>> = BTreeMap::new();
        for (candidate, group) in candidates.into_iter().zip(groups_by_index) {
            groups.entry(group).or_default().push(candidate.info);
        }

        groups
            .into_values()
            .filter(|members| {
                let emails: HashSet<&str> = members.iter().map(|m| m.email.as_str()).collect();
                emails.len() > 1
            })
            .collect()
    }

    pub fn merge_commits<'a>(
        &self,
        commits: impl IntoIterator<Item = &'a CommitInfo>,
    ) -> Vec<Vec<UserInfo>> {
        let users = self.collect_identities(commits);
        self.merge_users(&users)
    }
}

#[cfg(test)]
#[path = "merge_test.rs"]
mod tests;
