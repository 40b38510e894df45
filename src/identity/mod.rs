//! Contributor identity resolution.
//!
//! Free-text (name, email) pairs are canonicalized into stable integer
//! user ids. Emails are matched case-insensitively. Reviewer annotations
//! carry only a free-text name, so they live in a second namespace keyed
//! by name; resolving an email registers its local part in that namespace
//! so `Reviewed-by: alice` and `alice@corp.com` end up as one user.

pub mod bots;
pub mod merge;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub use bots::BotFilter;
pub use merge::UserMerger;

pub type UserId = u32;

/// A raw identity as it appears in commit metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserInfo {
    pub name: String,
    pub email: String,
}

impl UserInfo {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct IdentityResolver {
    email_to_id: HashMap<String, UserId>,
    reviewer_to_id: HashMap<String, UserId>,
    // reviewer ids that have not been bound to an email yet
    reviewer_only: HashMap<String, UserId>,
    // indexed by user id
    display: Vec<String>,
    names: Vec<String>,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

impl IdentityResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver with alias groups bound up front. Groups must be bound
    /// before any `resolve` call touches their emails.
    pub fn with_aliases(groups: &[Vec<UserInfo>]) -> Self {
        let mut resolver = Self::new();
        for group in groups {
            resolver.bind_aliases(group);
        }
        resolver
    }

    fn new_user(&mut self, display: String, name: String) -> UserId {
        let id = self.display.len() as UserId;
        self.display.push(display);
        self.names.push(name);
        id
    }

    fn bind_email(&mut self, email: String, id: UserId) {
        let local = local_part(&email).to_string();
        self.reviewer_to_id.insert(local, id);
        self.display[id as usize] = email.clone();
        self.email_to_id.insert(email, id);
    }

    /// Return the id for `email`, creating one on first sighting.
    pub fn resolve(&mut self, name: &str, email: &str) -> UserId {
        let email = normalize_email(email);
        if let Some(&id) = self.email_to_id.get(&email) {
            return id;
        }
        let id = match self.reviewer_only.remove(local_part(&email)) {
            Some(id) => id,
            None => self.new_user(email.clone(), name.to_string()),
        };
        self.bind_email(email, id);
        id
    }

    /// Return the id for a reviewer known only by name.
    pub fn resolve_reviewer_name(&mut self, name: &str) -> UserId {
        if let Some(&id) = self.reviewer_to_id.get(name) {
            return id;
        }
        let id = self.new_user(name.to_string(), name.to_string());
        self.reviewer_to_id.insert(name.to_string(), id);
        self.reviewer_only.insert(name.to_string(), id);
        id
    }

    /// Force every email of `group` onto one id, named after the first member.
    ///
    /// An email that already has an id keeps it: binding after the email
    /// was resolved is a no-op for that alias.
    pub fn bind_aliases(&mut self, group: &[UserInfo]) {
        let Some(first) = group.first() else {
            return;
        };
        let first_email = normalize_email(&first.email);
        let id = match self.email_to_id.get(&first_email) {
            Some(&id) => id,
            None => self.new_user(first_email.clone(), first.name.clone()),
        };
        self.names[id as usize] = first.name.clone();

        for member in group {
            let email = normalize_email(&member.email);
            match self.email_to_id.get(&email) {
                Some(&existing) if existing != id => {
                    log::debug!("alias {email} already bound to user {existing}, not rebinding");
                }
                Some(_) => {}
                None => self.bind_email(email, id),
            }
        }
    }

    /// Canonical display identity: the most recently bound email, or the
    /// reviewer name for users never seen with an email.
    pub fn get(&self, id: UserId) -> Option<&str> {
        self.display.get(id as usize).map(String::as_str)
    }

    pub fn name(&self, id: UserId) -> Option<&str> {
        self.names.get(id as usize).map(String::as_str)
    }

    pub fn lookup_email(&self, email: &str) -> Option<UserId> {
        self.email_to_id.get(&normalize_email(email)).copied()
    }

    pub fn contains(&self, id: UserId) -> bool {
        (id as usize) < self.display.len()
    }

    pub fn len(&self) -> usize {
        self.display.len()
    }

    pub fn is_empty(&self) -> bool {
        self.display.is_empty()
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
