//! Shortcut Matcher: canned answers for common profile questions.
//!
//! Rules are plain data: an ordered list of groups, each an ordered list of
//! `(category, keywords, fragment)` records. The first group with at least one
//! matching rule wins; its matching fragments are joined with `" | "` in table
//! order. Matching is a case-insensitive substring test, so false positives
//! ("where did he work" → location) are expected.

const FRAGMENT_SEPARATOR: &str = " | ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutCategory {
    GitHub,
    LinkedIn,
    Achievements,
    Email,
    Phone,
    Location,
}

/// One keyword-triggered answer fragment.
#[derive(Debug, Clone, Copy)]
pub struct ShortcutRule {
    pub category: ShortcutCategory,
    /// Lowercase substrings; any one of them triggers the rule.
    pub keywords: &'static [&'static str],
    pub fragment: &'static str,
}

impl ShortcutRule {
    /// `normalized` must already be trimmed and lowercased.
    pub fn matches(&self, normalized: &str) -> bool {
        self.keywords.iter().any(|k| normalized.contains(k))
    }
}

/// An ordered set of rules evaluated together.
#[derive(Debug, Clone, Copy)]
pub struct ShortcutGroup {
    pub name: &'static str,
    pub rules: &'static [ShortcutRule],
}

pub const IDENTITY_RULES: &[ShortcutRule] = &[
    ShortcutRule {
        category: ShortcutCategory::GitHub,
        keywords: &["github"],
        fragment: "GitHub: https://github.com/YUG3011",
    },
    ShortcutRule {
        category: ShortcutCategory::LinkedIn,
        keywords: &["linkedin", "linked in"],
        fragment: "LinkedIn: https://www.linkedin.com/in/yug-vachhani-bb4133251/",
    },
];

pub const FAQ_RULES: &[ShortcutRule] = &[
    ShortcutRule {
        category: ShortcutCategory::Achievements,
        keywords: &["achiev", "achiv", "certificate", "certificates"],
        fragment: "Certificates & Achievements: Google AI Essential (Coursera); MERN Stack (Simplilearn); \
            Linux Essentials (Cisco); Python for Data-Science (IBM); Java Programming Fundamentals (Infosys); \
            MATLAB — Advance Your Career with MATLAB Programming; J2EE Comprehensive Training Course; \
            Beginning Java Data Structures and Algorithms; CSS3; Database and SQL; Networking Essentials; \
            Android Material Design — The Fundamentals; Basic C# Programming; \
            Building Recommender Systems with Machine Learning and AI; Software Testing Fundamentals",
    },
    ShortcutRule {
        category: ShortcutCategory::Email,
        keywords: &["email", "e-mail"],
        fragment: "Email: yug30112005@gmail.com",
    },
    ShortcutRule {
        category: ShortcutCategory::Phone,
        keywords: &["phone", "contact", "mobile"],
        fragment: "Phone: +91 93133 98556",
    },
    ShortcutRule {
        category: ShortcutCategory::Location,
        keywords: &["location", "where", "based"],
        fragment: "Location: Rajkot, Gujarat",
    },
];

/// Identity links take precedence over the FAQ group.
pub const SHORTCUT_GROUPS: &[ShortcutGroup] = &[
    ShortcutGroup {
        name: "identity",
        rules: IDENTITY_RULES,
    },
    ShortcutGroup {
        name: "faq",
        rules: FAQ_RULES,
    },
];

/// A shortcut answer, the group that produced it and the rules that fired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutAnswer {
    pub group: &'static str,
    pub categories: Vec<ShortcutCategory>,
    pub answer: String,
}

pub fn normalize_question(question: &str) -> String {
    question.trim().to_lowercase()
}

/// Returns the canned answer for `question`, or `None` when the model should
/// answer instead.
pub fn match_shortcut(question: &str, groups: &[ShortcutGroup]) -> Option<ShortcutAnswer> {
    let normalized = normalize_question(question);

    groups.iter().find_map(|group| {
        let matched: Vec<&ShortcutRule> = group
            .rules
            .iter()
            .filter(|rule| rule.matches(&normalized))
            .collect();

        if matched.is_empty() {
            return None;
        }

        let fragments: Vec<&str> = matched.iter().map(|rule| rule.fragment).collect();
        Some(ShortcutAnswer {
            group: group.name,
            categories: matched.iter().map(|rule| rule.category).collect(),
            answer: fragments.join(FRAGMENT_SEPARATOR),
        })
    })
}
