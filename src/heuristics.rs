//! Keyword tables and the small pure functions that turn scraped text into
//! derived fields: durations, seniority tiers, title flags, signals and
//! engagement tiers.
//!
//! Every table here is plain data so each family can be tuned and tested on
//! its own.

use regex::Regex;
use std::sync::LazyLock;

use crate::models::{EngagementTier, SeniorityTier};

// --- Durations ---

static YEARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*yr").unwrap());
static MONTHS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*mo").unwrap());
static PERCENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+%").unwrap());

/// "3 yrs 4 mos" -> 40. Either token may be missing; a missing token adds 0.
pub fn parse_duration_months(text: &str) -> u32 {
    let token = |re: &Regex| -> u32 {
        re.captures(text)
            .and_then(|cap| cap.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .unwrap_or(0)
    };
    token(&YEARS_RE).saturating_mul(12).saturating_add(token(&MONTHS_RE))
}

pub fn is_current_role(duration: &str) -> bool {
    duration.to_lowercase().contains("present")
}

// --- Title classification ---

/// Ordered tier table; the first tier with a hit wins. Words match anywhere
/// as whole words, levels only as the last token ("Engineer II", not
/// "Web 2.0 Developer").
pub const SENIORITY_TIERS: &[(SeniorityTier, &[&str], &[&str])] = &[
    (
        SeniorityTier::Senior,
        &["senior", "sr", "lead", "principal", "staff", "director", "head", "vp", "chief"],
        &[],
    ),
    (SeniorityTier::Mid, &["mid", "mid-level", "intermediate"], &["ii", "2"]),
    (
        SeniorityTier::Junior,
        &["junior", "jr", "associate", "entry", "entry-level", "intern", "internship", "trainee"],
        &["i", "1"],
    ),
];

pub const LEADERSHIP_TITLE_KEYWORDS: &[&str] = &[
    "founder", "co-founder", "ceo", "president", "vice president", "manager", "director", "lead",
    "head", "organizer", "coordinator", "captain", "chair", "principal",
];

pub const EXECUTIVE_TITLE_KEYWORDS: &[&str] = &[
    "founder", "co-founder", "cofounder", "ceo", "cto", "cfo", "coo", "chief", "president", "vp",
    "vice president",
];

pub const ORG_LEADERSHIP_KEYWORDS: &[&str] = &[
    "founder", "president", "vice president", "treasurer", "secretary", "lead", "head", "organizer",
    "coordinator", "manager", "director", "chair", "chairperson", "captain",
];

/// Substrings that mark a leadership signal as mentoring or team management.
pub const MENTORSHIP_KEYWORDS: &[&str] = &["mentor", "team", "manage"];

static ADVANCED_DEGREE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:master'?s?|mba|msc|mphil|doctor(?:ate)?|ph\.?\s?d)").unwrap()
});

static SENIORITY_RES: LazyLock<Vec<(SeniorityTier, Regex)>> = LazyLock::new(|| {
    SENIORITY_TIERS
        .iter()
        .map(|(tier, words, levels)| (*tier, tier_regex(words, levels)))
        .collect()
});
static LEADERSHIP_TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| keyword_regex(LEADERSHIP_TITLE_KEYWORDS));
static EXECUTIVE_TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| keyword_regex(EXECUTIVE_TITLE_KEYWORDS));
static ORG_LEADERSHIP_RE: LazyLock<Regex> = LazyLock::new(|| keyword_regex(ORG_LEADERSHIP_KEYWORDS));

/// Case-insensitive whole-word alternation over a keyword list.
pub fn keyword_regex(words: &[&str]) -> Regex {
    Regex::new(&format!(r"(?i)\b(?:{})\b", alternation(words))).unwrap()
}

fn alternation(words: &[&str]) -> String {
    words.iter().map(|w| regex::escape(w)).collect::<Vec<_>>().join("|")
}

fn tier_regex(words: &[&str], levels: &[&str]) -> Regex {
    let mut pattern = format!(r"(?i)\b(?:{})\b", alternation(words));
    if !levels.is_empty() {
        pattern.push_str(&format!(r"|\b(?:{})\s*$", alternation(levels)));
    }
    Regex::new(&pattern).unwrap()
}

pub fn classify_seniority(title: &str) -> SeniorityTier {
    SENIORITY_RES
        .iter()
        .find(|(_, re)| re.is_match(title))
        .map(|(tier, _)| *tier)
        .unwrap_or(SeniorityTier::Unknown)
}

pub fn is_leadership_title(title: &str) -> bool {
    LEADERSHIP_TITLE_RE.is_match(title)
}

pub fn is_executive_title(title: &str) -> bool {
    EXECUTIVE_TITLE_RE.is_match(title)
}

pub fn is_org_leadership(text: &str) -> bool {
    ORG_LEADERSHIP_RE.is_match(text)
}

pub fn is_mentorship_signal(signal: &str) -> bool {
    let lower = signal.to_lowercase();
    MENTORSHIP_KEYWORDS.iter().any(|k| lower.contains(k))
}

pub fn is_advanced_degree(text: &str) -> bool {
    ADVANCED_DEGREE_RE.is_match(text)
}

// --- Signals ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalFamily {
    Progression,
    Learning,
    Leadership,
    Initiative,
}

/// One keyword family applied to one kind of text. `message` may contain a
/// `{context}` placeholder (a role title, a school, "about section").
#[derive(Debug, Clone, Copy)]
pub struct SignalRule {
    pub family: SignalFamily,
    pub pattern: &'static str,
    pub message: &'static str,
}

pub const ABOUT_RULES: &[SignalRule] = &[
    SignalRule {
        family: SignalFamily::Learning,
        pattern: r"learn|grow|develop|curious|eager|passionate|drive|motivated",
        message: "Growth mindset language in {context}",
    },
    SignalRule {
        family: SignalFamily::Leadership,
        pattern: r"lead|mentor|manage|team|coach|guide|initiative",
        message: "Leadership language in {context}",
    },
    SignalRule {
        family: SignalFamily::Initiative,
        pattern: r"built|created|founded|launched|started|initiated|pioneered",
        message: "Initiative-taking language in {context}",
    },
];

pub const DESCRIPTION_RULES: &[SignalRule] = &[
    SignalRule {
        family: SignalFamily::Learning,
        pattern: r"learned|upskilled|self-taught|certified|studied|trained in|picked up",
        message: "Continuous learning in {context}",
    },
    SignalRule {
        family: SignalFamily::Leadership,
        pattern: r"led team|led a team|managed|supervised|coordinated|mentored|trained",
        message: "Leadership in {context}",
    },
    SignalRule {
        family: SignalFamily::Initiative,
        pattern: r"initiated|proposed|developed|created|implemented|launched|improved|optimized|increased by|reduced by",
        message: "Proactive contributions in {context}",
    },
];

pub const EDUCATION_RULES: &[SignalRule] = &[SignalRule {
    family: SignalFamily::Leadership,
    pattern: r"president|lead|founder|organized|captain|head",
    message: "Leadership during education at {context}",
}];

pub struct CompiledRule {
    pub rule: SignalRule,
    re: Regex,
}

fn compile(rules: &[SignalRule]) -> Vec<CompiledRule> {
    rules
        .iter()
        .map(|rule| CompiledRule {
            rule: *rule,
            re: Regex::new(&format!("(?i){}", rule.pattern)).unwrap(),
        })
        .collect()
}

pub static ABOUT_SIGNALS: LazyLock<Vec<CompiledRule>> = LazyLock::new(|| compile(ABOUT_RULES));
pub static DESCRIPTION_SIGNALS: LazyLock<Vec<CompiledRule>> =
    LazyLock::new(|| compile(DESCRIPTION_RULES));
pub static EDUCATION_SIGNALS: LazyLock<Vec<CompiledRule>> =
    LazyLock::new(|| compile(EDUCATION_RULES));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signal {
    pub family: SignalFamily,
    pub text: String,
}

/// Run every rule against `text`. Families are independent: one text can
/// fire several of them.
pub fn detect_signals(rules: &[CompiledRule], text: &str, context: &str) -> Vec<Signal> {
    rules
        .iter()
        .filter(|compiled| compiled.re.is_match(text))
        .map(|compiled| Signal {
            family: compiled.rule.family,
            text: compiled.rule.message.replace("{context}", context),
        })
        .collect()
}

/// Percentages such as "40%", as an initiative signal listing every match.
pub fn detect_quantified(text: &str, context: &str) -> Option<Signal> {
    let matches: Vec<&str> = PERCENT_RE.find_iter(text).map(|m| m.as_str()).collect();
    if matches.is_empty() {
        return None;
    }
    Some(Signal {
        family: SignalFamily::Initiative,
        text: format!("Measurable impact: {} in {}", matches.join(", "), context),
    })
}

// --- Engagement ---

pub fn engagement_tier(count: usize) -> EngagementTier {
    if count > 50 {
        EngagementTier::High
    } else if count > 20 {
        EngagementTier::Medium
    } else if count > 0 {
        EngagementTier::Low
    } else {
        EngagementTier::None
    }
}
