use std::sync::LazyLock;

use regex::RegexSet;
use typing_types::EmailClass;

pub const DEFAULT_TEAM_DOMAINS: &[&str] = &["digitalocean.com", "ajot.me"];

/// Usernames on a team domain that are still obviously throwaway.
const TEAM_TEST_USERNAMES: &[&str] = &[
    "test", "asdf", "fake", "null", "admin", "user", "demo", "sample",
];

const PERSONAL_DOMAINS: &[&str] = &[
    "gmail.com",
    "yahoo.com",
    "outlook.com",
    "hotmail.com",
    "icloud.com",
    "aol.com",
    "protonmail.com",
    "proton.me",
    "live.com",
    "msn.com",
    "me.com",
    "mac.com",
    "mail.com",
    "ymail.com",
    "googlemail.com",
    "fastmail.com",
    "zoho.com",
    "tutanota.com",
    "hey.com",
];

const FAKE_DOMAINS: &[&str] = &[
    "test.com",
    "example.com",
    "fake.com",
    "asdf.com",
    "xyz.com",
    "aaa.com",
    "abc.com",
    "123.com",
    "temp.com",
    "tempmail.com",
    "mailinator.com",
    "guerrillamail.com",
    "throwaway.com",
    "fakeemail.com",
    "noemail.com",
    "none.com",
    "na.com",
    "n.com",
    "x.com",
    "a.com",
    "aa.com",
    "aaaa.com",
    "testing.com",
    "do.com",
    "robot.com",
    "secret.com",
    "email.com",
    "mail.co",
];

const SUSPICIOUS_TLDS: &[&str] = &[".xyz", ".tk", ".ml", ".ga", ".cf", ".gq"];

/// Misspellings of .com / .net / .org and of gmail itself.
const TYPO_TLDS: &[&str] = &[
    ".co", ".con", ".cmo", ".ocm", ".vom", ".xom", ".om", ".ner", ".nte", ".bet", ".met",
    ".ogr", ".otg", ".prg", ".gmai", ".gmial", ".gmal",
];

const FAKE_USERNAME_PATTERNS: &[&str] = &[
    r"^test\d*$",
    r"^asdf+$",
    r"^[a-z]$",
    r"^[a-z]{1,2}\d*$",
    r"^fake",
    r"^none$",
    r"^na$",
    r"^null$",
    r"^admin$",
    r"^user\d*$",
    r"^demo\d*$",
    r"^sample\d*$",
    r"^\d+$",
    r"^x+$",
    r"^aaa+$",
    r"^player\d*$",
    r"^hello$",
    r"^noemail$",
    r"^secret$",
    r"^xyz$",
    r"^lol$",
    r"^lmao$",
    r"^hi$",
    r"^hey$",
    r"^yo$",
    r"^blah$",
    r"^foo$",
    r"^bar$",
    r"^baz$",
    r"^qwerty",
    r"^abcd*$",
    // anything punctuated beyond . - _
    r"[!@#$%^&*()+=]",
];

static FAKE_USERNAMES: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new(FAKE_USERNAME_PATTERNS).expect("username patterns are valid regexes")
});

/// Rule-based email triage for the admin dashboard.
///
/// Pure function of the address and the configured team domains; the rules run
/// in a fixed priority order and the first hit wins.
#[derive(Debug, Clone)]
pub struct EmailClassifier {
    team_domains: Vec<String>,
}

impl Default for EmailClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_TEAM_DOMAINS.iter().copied())
    }
}

impl EmailClassifier {
    pub fn new<I, S>(team_domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            team_domains: team_domains
                .into_iter()
                .map(|domain| domain.as_ref().trim().trim_start_matches('@').to_lowercase())
                .filter(|domain| !domain.is_empty())
                .collect(),
        }
    }

    pub fn team_domains(&self) -> &[String] {
        &self.team_domains
    }

    /// True when the address sits on one of the team domains.
    pub fn is_team_email(&self, email: &str) -> bool {
        let email = email.trim().to_lowercase();
        match email.rsplit_once('@') {
            Some((_, domain)) => self.team_domains.iter().any(|team| team == domain),
            None => false,
        }
    }

    pub fn classify(&self, email: &str) -> EmailClass {
        let email = email.trim().to_lowercase();

        let Some((username, domain)) = email.rsplit_once('@') else {
            return EmailClass::Fake;
        };
        if username.is_empty() || domain.is_empty() {
            return EmailClass::Fake;
        }
        let domain_name = domain.split('.').next().unwrap_or(domain);

        if self.team_domains.iter().any(|team| team == domain) {
            if TEAM_TEST_USERNAMES.contains(&username) {
                return EmailClass::Suspicious;
            }
            return EmailClass::Employee;
        }

        if FAKE_USERNAMES.is_match(username) {
            return EmailClass::Suspicious;
        }

        if username == domain_name {
            return EmailClass::Suspicious;
        }

        if FAKE_DOMAINS.contains(&domain) {
            return EmailClass::Suspicious;
        }

        if SUSPICIOUS_TLDS.iter().any(|tld| domain.ends_with(tld)) {
            return EmailClass::Suspicious;
        }

        if TYPO_TLDS.iter().any(|tld| domain.ends_with(tld)) {
            return EmailClass::Typo;
        }

        if domain_name.chars().count() <= 2 {
            return EmailClass::Suspicious;
        }

        if !domain.contains('.') {
            return EmailClass::Suspicious;
        }

        if PERSONAL_DOMAINS.contains(&domain) {
            return EmailClass::Personal;
        }

        EmailClass::Company
    }
}
