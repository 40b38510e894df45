use std::sync::OnceLock;

use regex::Regex;

use super::UserInfo;

const DEFAULT_BOT_PARTS: &[&str] = &["dependabot", "[bot]", "testingbot"];
const DEFAULT_EMAIL_BOTS: &[&str] = &["info@testingbot", "noreply@github.com"];
const DEFAULT_NAME_BOTS: &[&str] = &["GitHub", "TestingBot"];

fn bot_word() -> &'static Regex {
    static BOT_WORD: OnceLock<Regex> = OnceLock::new();
    BOT_WORD.get_or_init(|| Regex::new(r"\bbot\b").unwrap())
}

/// Classifies identities as automation accounts. Default patterns are
/// always active; `extra` fragments are matched against names and emails.
#[derive(Debug, Clone, Default)]
pub struct BotFilter {
    extra: Vec<String>,
}

impl BotFilter {
    pub fn new(extra: Vec<String>) -> Self {
        Self { extra }
    }

    fn matches_extra(&self, value: &str) -> bool {
        self.extra.iter().any(|part| value.contains(part.as_str()))
    }

    fn check_name(&self, name: &str) -> bool {
        self.matches_extra(name)
            || DEFAULT_BOT_PARTS.iter().any(|p| name.contains(p))
            || DEFAULT_NAME_BOTS.iter().any(|p| name.contains(p))
            || bot_word().is_match(&name.to_lowercase())
    }

    fn check_email(&self, email: &str) -> bool {
        self.matches_extra(email)
            || DEFAULT_BOT_PARTS.iter().any(|p| email.contains(p))
            || DEFAULT_EMAIL_BOTS.iter().any(|p| email.contains(p))
    }

    pub fn is_bot(&self, name: &str, email: &str) -> bool {
        self.check_email(email) || self.check_name(name)
    }

    pub fn is_bot_user(&self, user: &UserInfo) -> bool {
        self.is_bot(&user.name, &user.email)
    }
}

#[cfg(test)]
#[path = "bots_test.rs"]
mod tests;
