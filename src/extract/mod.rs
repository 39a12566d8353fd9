//! Profile page extraction.
//!
//! [`Extractor`] reads a parsed profile page into a [`ProfileRecord`]. Every
//! field is looked up through an ordered locator list (see [`locators`]) so
//! that markup drift degrades to empty fields instead of errors. The only
//! failure is an input that is not a document at all.

pub mod locators;
mod sections;

use regex::Regex;
use scraper::{ElementRef, Html};
use std::cmp::Reverse;
use std::sync::LazyLock;

use crate::config::ExtractionConfig;
use crate::error::ExtractionError;
use crate::heuristics::{self, ABOUT_SIGNALS, Signal, SignalFamily, detect_quantified, detect_signals};
use crate::models::{
    About, PotentialSignals, ProfileRecord, RecentActivity, Recommendations, Skill,
    distinct_employers, distinct_languages,
};
use locators::{first_attr, first_text};
use sections::Extracted;

static CONNECTIONS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d[\d,]*)\+?\s*connection").unwrap());
static FOLLOWERS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d[\d,]*)\+?\s*follower").unwrap());

#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractionConfig,
}

impl Extractor {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Parse raw page source and extract it.
    pub fn extract_str(&self, source: &str) -> Result<ProfileRecord, ExtractionError> {
        if source.trim().is_empty() {
            return Err(ExtractionError::EmptyInput);
        }
        if !source.contains('<') {
            return Err(ExtractionError::NotMarkup);
        }
        let document = Html::parse_document(source);
        self.extract(&document)
    }

    /// Extract a record from an already parsed document. The document is
    /// only read.
    pub fn extract(&self, document: &Html) -> Result<ProfileRecord, ExtractionError> {
        if !document.tree.root().value().is_document() {
            return Err(ExtractionError::Fragment);
        }
        Ok(self.read(document))
    }

    fn read(&self, document: &Html) -> ProfileRecord {
        let cfg = &self.config;
        let root = document.root_element();
        let mut signals = SignalBuilder::default();

        let about = self.about(root, &mut signals);

        let experience = signals.absorb(sections::experience(document));
        let current_role = experience
            .first()
            .filter(|e| e.is_current)
            .and_then(|e| e.title.clone());
        let total_months: u64 = experience.iter().map(|e| u64::from(e.duration_months)).sum();
        let total_experience_years = total_months as f64 / 12.0;

        let mut tiers: Vec<_> = experience.iter().map(|e| e.seniority).collect();
        tiers.sort();
        tiers.dedup();
        if tiers.len() > 1 {
            signals.push(SignalFamily::Progression, "Career progression visible across roles".to_string());
        }

        let education = signals.absorb(sections::education(document));

        let skills = signals.absorb(sections::skills(document));
        let top_skills = top_skills(&skills, cfg.top_skills);
        if skills.len() > cfg.broad_skill_signal_min {
            signals.push(
                SignalFamily::Learning,
                format!("Broad skill set: {} skills listed", skills.len()),
            );
        }

        let certifications = signals.absorb(sections::certifications(document));
        let projects = signals.absorb(sections::projects(document));
        let volunteering = signals.absorb(sections::volunteering(document));
        let courses = signals.absorb(sections::courses(document));
        let languages = signals.absorb(sections::languages(document));
        let honors = signals.absorb(sections::honors(document));
        let publications = signals.absorb(sections::publications(document));
        let patents = signals.absorb(sections::patents(document));
        let organizations = signals.absorb(sections::organizations(document));
        let received = signals.absorb(sections::recommendations(document));

        let posts = sections::activity_posts(document, cfg.post_excerpt_chars);
        let engagement_count = sections::engagement_count(document);
        if posts.len() > cfg.active_post_min {
            signals.push(
                SignalFamily::Learning,
                "Active on LinkedIn - shares insights and content".to_string(),
            );
        }

        let employers = distinct_employers(&experience);
        signals.diverse_experience = employers > cfg.diverse_employer_min
            || distinct_languages(&languages) > cfg.multilingual_min;
        signals.continuous_learning = !certifications.is_empty()
            || !courses.is_empty()
            || skills.len() > cfg.continuous_learning_skill_min;
        signals.community_engagement = !volunteering.is_empty() || posts.len() > cfg.active_post_min;
        signals.organization_leadership = organizations.iter().any(|o| {
            heuristics::is_org_leadership(&o.name)
                || o.position.as_deref().is_some_and(heuristics::is_org_leadership)
        }) || volunteering.iter().any(|v| heuristics::is_org_leadership(&v.role));

        ProfileRecord {
            url: first_attr(root, locators::CANONICAL_URL),
            name: first_text(root, locators::NAME),
            headline: first_text(root, locators::HEADLINE),
            location: first_text(root, locators::LOCATION).filter(|l| is_location_line(l)),
            profile_image: first_attr(root, locators::PROFILE_IMAGE),
            connections: labelled_count(root, locators::CONNECTIONS, &CONNECTIONS_RE),
            followers: labelled_count(root, locators::FOLLOWERS, &FOLLOWERS_RE),
            about,
            experience,
            current_role,
            total_experience_years,
            education,
            skills,
            top_skills,
            certifications,
            courses,
            languages,
            honors,
            publications,
            patents,
            projects,
            volunteering,
            organizations,
            recommendations: Recommendations { count: received.len(), received },
            activity: RecentActivity {
                post_count: posts.len(),
                posts,
                engagement_count,
                engagement: heuristics::engagement_tier(engagement_count),
            },
            signals: signals.finish(),
        }
    }

    fn about(&self, root: ElementRef<'_>, signals: &mut SignalBuilder) -> About {
        let Some(text) = first_text(root, locators::ABOUT) else {
            return About::default();
        };

        const CONTEXT: &str = "about section";
        for signal in detect_signals(&ABOUT_SIGNALS, &text, CONTEXT) {
            signals.add(signal);
        }
        if let Some(signal) = detect_quantified(&text, CONTEXT) {
            signals.add(signal);
            signals.quantified += 1;
        }

        let length = text.chars().count();
        About {
            present: length > self.config.about_min_length,
            length,
            text: Some(text),
        }
    }
}

/// Names of the most endorsed skills. The sort is stable so ties keep
/// page order.
pub fn top_skills(skills: &[Skill], limit: usize) -> Vec<String> {
    let mut ranked: Vec<&Skill> = skills.iter().collect();
    ranked.sort_by_key(|s| Reverse(s.endorsements));
    ranked.into_iter().take(limit).map(|s| s.name.clone()).collect()
}

/// The location locators also hit the "Contact info" and follower lines.
fn is_location_line(text: &str) -> bool {
    !text.contains("Contact info") && !text.contains("followers")
}

/// A count shown next to its label, e.g. "500+ connections". Locators whose
/// text carries no such label are passed over.
fn labelled_count(root: ElementRef<'_>, locators: &[&str], re: &Regex) -> Option<u32> {
    locators.iter().find_map(|css| {
        let text = first_text(root, &[*css])?;
        let cap = re.captures(&text)?;
        cap.get(1)?.as_str().replace(',', "").parse().ok()
    })
}

/// Collects signals from every section and freezes them into
/// [`PotentialSignals`] once extraction is done.
#[derive(Debug, Default)]
struct SignalBuilder {
    progression: Vec<String>,
    learning: Vec<String>,
    leadership: Vec<String>,
    initiative: Vec<String>,
    quantified: u32,
    diverse_experience: bool,
    continuous_learning: bool,
    community_engagement: bool,
    organization_leadership: bool,
}

impl SignalBuilder {
    fn add(&mut self, signal: Signal) {
        self.push(signal.family, signal.text);
    }

    fn push(&mut self, family: SignalFamily, text: String) {
        match family {
            SignalFamily::Progression => self.progression.push(text),
            SignalFamily::Learning => self.learning.push(text),
            SignalFamily::Leadership => self.leadership.push(text),
            SignalFamily::Initiative => self.initiative.push(text),
        }
    }

    fn absorb<T>(&mut self, extracted: Extracted<T>) -> Vec<T> {
        for signal in extracted.signals {
            self.add(signal);
        }
        self.quantified += extracted.quantified;
        extracted.items
    }

    fn finish(self) -> PotentialSignals {
        PotentialSignals {
            career_progression: self.progression,
            learning: self.learning,
            leadership: self.leadership,
            initiative: self.initiative,
            quantified_achievements: self.quantified,
            diverse_experience: self.diverse_experience,
            continuous_learning: self.continuous_learning,
            community_engagement: self.community_engagement,
            organization_leadership: self.organization_leadership,
        }
    }
}
