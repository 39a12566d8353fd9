//! One reader per profile section. Each reader only looks inside its own
//! section and hands back its items together with the signals they fired;
//! nothing is shared between readers.

use regex::Regex;
use scraper::{ElementRef, Html};
use std::sync::LazyLock;

use super::locators::{self as loc, all_texts, first_attr, first_text, items, section_scope};
use crate::heuristics::{
    self, DESCRIPTION_SIGNALS, EDUCATION_SIGNALS, Signal, SignalFamily, detect_quantified,
    detect_signals,
};
use crate::models::{
    ActivityPost, Certification, Course, EducationEntry, ExperienceEntry, Honor, Language,
    Organization, Patent, Project, Publication, Recommendation, Skill, VolunteerEntry,
};

static FIRST_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d[\d,]*)").unwrap());

pub struct Extracted<T> {
    pub items: Vec<T>,
    pub signals: Vec<Signal>,
    pub quantified: u32,
}

impl<T> Default for Extracted<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            signals: Vec::new(),
            quantified: 0,
        }
    }
}

impl<T> Extracted<T> {
    fn signal(&mut self, family: SignalFamily, text: String) {
        self.signals.push(Signal { family, text });
    }

    fn scan(&mut self, text: &str, context: &str) {
        self.signals.extend(detect_signals(&DESCRIPTION_SIGNALS, text, context));
        if let Some(signal) = detect_quantified(text, context) {
            self.signals.push(signal);
            self.quantified += 1;
        }
    }
}

fn section_items<'a>(document: &'a Html, anchors: &[&str], locators: &[&str]) -> Vec<ElementRef<'a>> {
    section_scope(document, anchors)
        .map(|scope| items(scope, locators))
        .unwrap_or_default()
}

/// First number in a string, commas allowed: "1,204 followers" -> 1204.
pub fn first_number(text: &str) -> Option<u32> {
    let cap = FIRST_NUMBER_RE.captures(text)?;
    cap.get(1)?.as_str().replace(',', "").parse().ok()
}

/// "Acme Corp · Full-time" -> "Acme Corp".
fn before_middot(text: &str) -> Option<String> {
    let head = text.split('·').next().unwrap_or(text).trim();
    if head.is_empty() { None } else { Some(head.to_string()) }
}

/// "Master of Science - MS, Computer Science" -> ("Master of Science - MS", "Computer Science").
fn split_degree(text: &str) -> (Option<String>, Option<String>) {
    match text.split_once(", ") {
        Some((degree, field)) => {
            let field = field.trim();
            let field = if field.is_empty() { None } else { Some(field.to_string()) };
            (Some(degree.trim().to_string()), field)
        }
        None => (Some(text.to_string()), None),
    }
}

// --- Experience ---

pub fn experience(document: &Html) -> Extracted<ExperienceEntry> {
    let mut out = Extracted::default();

    for item in section_items(document, loc::EXPERIENCE_SECTION, loc::EXPERIENCE_ITEMS) {
        let title = first_text(item, loc::ITEM_TITLE);
        let company = first_text(item, loc::EXPERIENCE_COMPANY).and_then(|c| before_middot(&c));
        if title.is_none() && company.is_none() {
            continue;
        }

        let duration = first_text(item, loc::EXPERIENCE_DURATION);
        let location = first_text(item, loc::EXPERIENCE_LOCATION)
            .or_else(|| all_texts(item, loc::ITEM_CAPTION).into_iter().nth(1));
        let description = first_text(item, loc::ITEM_DESCRIPTION);
        let skills: Vec<String> = all_texts(item, loc::EXPERIENCE_SKILLS)
            .into_iter()
            .filter(|s| !s.contains('·'))
            .collect();

        let (duration_months, is_current) = match &duration {
            Some(d) => (heuristics::parse_duration_months(d), heuristics::is_current_role(d)),
            None => (0, false),
        };
        let (seniority, is_leadership) = match &title {
            Some(t) => (heuristics::classify_seniority(t), heuristics::is_leadership_title(t)),
            None => (Default::default(), false),
        };

        if let Some(desc) = &description {
            let context = title.as_deref().unwrap_or("an unnamed role");
            out.scan(desc, context);
        }

        out.items.push(ExperienceEntry {
            title,
            company,
            location,
            description,
            duration,
            duration_months,
            is_current,
            seniority,
            is_leadership,
            skills,
        });
    }

    out
}

// --- Education ---

pub fn education(document: &Html) -> Extracted<EducationEntry> {
    let mut out = Extracted::default();

    for item in section_items(document, loc::EDUCATION_SECTION, loc::EDUCATION_ITEMS) {
        let Some(school) = first_text(item, loc::SCHOOL) else {
            continue;
        };
        let (degree, field) = match first_text(item, loc::DEGREE) {
            Some(text) => split_degree(&text),
            None => (None, None),
        };
        let description = first_text(item, loc::ITEM_DESCRIPTION);
        if let Some(desc) = &description {
            out.signals.extend(detect_signals(&EDUCATION_SIGNALS, desc, &school));
        }

        out.items.push(EducationEntry {
            school: Some(school),
            degree,
            field,
            dates: first_text(item, loc::EDUCATION_DATES),
            description,
        });
    }

    out
}

// --- Skills ---

pub fn skills(document: &Html) -> Extracted<Skill> {
    let mut out = Extracted::default();

    for item in section_items(document, loc::SKILLS_SECTION, loc::SKILL_ITEMS) {
        let Some(name) = first_text(item, loc::SKILL_NAME) else {
            continue;
        };
        let endorsements = first_text(item, loc::ENDORSEMENTS)
            .and_then(|t| first_number(&t))
            .unwrap_or(0);
        out.items.push(Skill { name, endorsements });
    }

    out
}

// --- Small titled sections ---

/// Items of a plain list section keyed by their bold title line.
fn titled<T>(
    document: &Html,
    anchors: &[&str],
    build: impl Fn(String, ElementRef<'_>) -> T,
) -> Vec<T> {
    section_items(document, anchors, loc::LIST_ITEMS)
        .into_iter()
        .filter_map(|item| first_text(item, loc::ITEM_TITLE).map(|title| build(title, item)))
        .collect()
}

pub fn certifications(document: &Html) -> Extracted<Certification> {
    let items = titled(document, loc::CERTIFICATIONS_SECTION, |name, item| Certification {
        name,
        issuer: first_text(item, loc::ITEM_SUBTITLE),
        issue_date: all_texts(item, loc::ITEM_CAPTION).into_iter().next(),
    });
    let mut out = Extracted { items, ..Default::default() };
    if !out.items.is_empty() {
        let text = format!("{} professional certifications obtained", out.items.len());
        out.signal(SignalFamily::Learning, text);
    }
    out
}

pub fn projects(document: &Html) -> Extracted<Project> {
    let items = titled(document, loc::PROJECTS_SECTION, |name, item| Project {
        name,
        description: first_text(item, loc::ITEM_DESCRIPTION),
    });
    let mut out = Extracted { items, ..Default::default() };
    let texts: Vec<String> = out
        .items
        .iter()
        .map(|p| format!("Personal/side project: {}", p.name))
        .collect();
    for text in texts {
        out.signal(SignalFamily::Initiative, text);
    }
    out
}

pub fn volunteering(document: &Html) -> Extracted<VolunteerEntry> {
    let mut out = Extracted::default();
    for item in section_items(document, loc::VOLUNTEER_SECTION, loc::VOLUNTEER_ITEMS) {
        let Some(role) = first_text(item, loc::VOLUNTEER_ROLE) else {
            continue;
        };
        out.signal(SignalFamily::Leadership, format!("Volunteer work: {}", role));
        out.items.push(VolunteerEntry {
            role,
            organization: first_text(item, loc::VOLUNTEER_ORGANIZATION),
        });
    }
    out
}

pub fn courses(document: &Html) -> Extracted<Course> {
    let items = titled(document, loc::COURSES_SECTION, |name, item| Course {
        name,
        number: first_text(item, loc::ITEM_SUBTITLE),
    });
    let mut out = Extracted { items, ..Default::default() };
    if !out.items.is_empty() {
        let text = format!("{} additional courses completed", out.items.len());
        out.signal(SignalFamily::Learning, text);
    }
    out
}

pub fn languages(document: &Html) -> Extracted<Language> {
    let items = titled(document, loc::LANGUAGES_SECTION, |name, item| Language {
        name,
        proficiency: all_texts(item, loc::ITEM_CAPTION).into_iter().next(),
    });
    Extracted { items, ..Default::default() }
}

pub fn honors(document: &Html) -> Extracted<Honor> {
    let items = titled(document, loc::HONORS_SECTION, |title, item| Honor {
        title,
        issuer: first_text(item, loc::ITEM_SUBTITLE),
    });
    let mut out = Extracted { items, ..Default::default() };
    let texts: Vec<String> = out.items.iter().map(|h| format!("Award/Honor: {}", h.title)).collect();
    for text in texts {
        out.signal(SignalFamily::Initiative, text);
    }
    out
}

pub fn publications(document: &Html) -> Extracted<Publication> {
    let items = titled(document, loc::PUBLICATIONS_SECTION, |title, item| Publication {
        title,
        publisher: first_text(item, loc::ITEM_SUBTITLE),
    });
    let mut out = Extracted { items, ..Default::default() };
    let texts: Vec<String> = out.items.iter().map(|p| format!("Publication: {}", p.title)).collect();
    for text in texts {
        out.signal(SignalFamily::Initiative, text);
    }
    out
}

pub fn patents(document: &Html) -> Extracted<Patent> {
    let items = titled(document, loc::PATENTS_SECTION, |title, item| Patent {
        title,
        number: first_text(item, loc::ITEM_SUBTITLE),
    });
    let mut out = Extracted { items, ..Default::default() };
    let texts: Vec<String> = out.items.iter().map(|p| format!("Patent: {}", p.title)).collect();
    for text in texts {
        out.signal(SignalFamily::Initiative, text);
    }
    out
}

pub fn organizations(document: &Html) -> Extracted<Organization> {
    let items = section_items(document, loc::ORGANIZATIONS_SECTION, loc::ORGANIZATION_ITEMS)
        .into_iter()
        .filter_map(|item| {
            let name = first_text(item, loc::ITEM_TITLE)?;
            Some(Organization {
                name,
                position: first_text(item, loc::ITEM_SUBTITLE),
            })
        })
        .collect();
    Extracted { items, ..Default::default() }
}

// --- Recommendations ---

pub fn recommendations(document: &Html) -> Extracted<Recommendation> {
    let items: Vec<Recommendation> =
        section_items(document, loc::RECOMMENDATIONS_SECTION, loc::RECOMMENDATION_ITEMS)
            .into_iter()
            .filter_map(|item| {
                let from = first_text(item, loc::RECOMMENDER)?;
                Some(Recommendation {
                    from,
                    relationship: first_text(item, loc::RECOMMENDER_RELATIONSHIP),
                    text: first_text(item, loc::RECOMMENDATION_TEXT),
                })
            })
            .collect();
    let mut out = Extracted { items, ..Default::default() };
    if !out.items.is_empty() {
        let text = format!("{} recommendations received", out.items.len());
        out.signal(SignalFamily::Leadership, text);
    }
    out
}

// --- Activity ---

pub fn activity_posts(document: &Html, excerpt_chars: usize) -> Vec<ActivityPost> {
    let Some(feed) = loc::anchor(document, loc::ACTIVITY_SECTION) else {
        return Vec::new();
    };
    items(feed, loc::ACTIVITY_ITEMS)
        .into_iter()
        .filter_map(|item| {
            let content = first_text(item, loc::POST_CONTENT)?;
            Some(ActivityPost {
                content: content.chars().take(excerpt_chars).collect(),
                date: first_attr(item, loc::POST_DATE),
            })
        })
        .collect()
}

/// Like, comment and share affordances anywhere on the page.
pub fn engagement_count(document: &Html) -> usize {
    let root = document.root_element();
    loc::ENGAGEMENT_AFFORDANCES
        .iter()
        .map(|css| loc::count(root, css))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(body: &str) -> Html {
        Html::parse_document(&format!("<html><body>{}</body></html>", body))
    }

    #[test]
    fn test_first_number() {
        assert_eq!(first_number("1,204 followers"), Some(1204));
        assert_eq!(first_number("Endorsed by 12 colleagues"), Some(12));
        assert_eq!(first_number("no digits"), None);
    }

    #[test]
    fn test_split_degree() {
        assert_eq!(
            split_degree("Master of Science - MS, Computer Science"),
            (Some("Master of Science - MS".to_string()), Some("Computer Science".to_string()))
        );
        assert_eq!(split_degree("High School"), (Some("High School".to_string()), None));
    }

    #[test]
    fn test_experience_class_markup() {
        let html = doc(r#"
            <section><div id="experience"></div><ul>
              <li class="artdeco-list__item">
                <div class="mr1 t-bold"><span aria-hidden="true">Staff Engineer</span></div>
                <span class="t-14 t-normal"><span aria-hidden="true">Initech · Full-time</span></span>
                <span class="t-14 t-normal t-black--light"><span aria-hidden="true">Jan 2021 - Present · 2 yrs 3 mos</span></span>
                <span class="t-14 t-normal t-black--light"><span aria-hidden="true">Austin, TX</span></span>
                <div class="inline-show-more-text"><span aria-hidden="true">Mentored four engineers and improved throughput 35%.</span></div>
                <div data-field="experience_skill"><span>Rust</span><span>Go · Kafka</span></div>
              </li>
            </ul></section>"#);

        let out = experience(&html);
        assert_eq!(out.items.len(), 1);
        let entry = &out.items[0];
        assert_eq!(entry.title.as_deref(), Some("Staff Engineer"));
        assert_eq!(entry.company.as_deref(), Some("Initech"));
        assert_eq!(entry.location.as_deref(), Some("Austin, TX"));
        assert_eq!(entry.duration_months, 27);
        assert!(entry.is_current);
        assert_eq!(entry.seniority, crate::models::SeniorityTier::Senior);
        assert_eq!(entry.skills, vec!["Rust".to_string()]);

        let texts: Vec<&str> = out.signals.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "Leadership in Staff Engineer",
                "Proactive contributions in Staff Engineer",
                "Measurable impact: 35% in Staff Engineer",
            ]
        );
        assert_eq!(out.quantified, 1);
    }

    #[test]
    fn test_experience_attribute_markup() {
        let html = doc(r#"
            <div id="experience">
              <div data-test-id="experience-item">
                <span data-test-id="title">Marketing Intern</span>
                <span data-test-id="company-name">Globex</span>
                <span data-test-id="duration">6 mos</span>
              </div>
              <div data-test-id="experience-item">
                <span data-test-id="description">No title or company here</span>
              </div>
            </div>"#);

        let out = experience(&html);
        assert_eq!(out.items.len(), 1);
        assert_eq!(out.items[0].duration_months, 6);
        assert!(!out.items[0].is_current);
        assert_eq!(out.items[0].seniority, crate::models::SeniorityTier::Junior);
        assert!(out.signals.is_empty());
    }

    #[test]
    fn test_sections_without_anchor_are_empty() {
        let html = doc(r#"<ul><li class="artdeco-list__item">
            <div class="mr1 t-bold"><span aria-hidden="true">Orphan</span></div></li></ul>"#);
        assert!(experience(&html).items.is_empty());
        assert!(certifications(&html).items.is_empty());
        assert!(projects(&html).signals.is_empty());
        assert!(activity_posts(&html, 200).is_empty());
    }

    #[test]
    fn test_skills_endorsements() {
        let html = doc(r#"
            <section id="skills">
              <div class="artdeco-list__item">
                <div class="mr1 t-bold"><span aria-hidden="true">Rust</span></div>
                <span class="t-14 t-black--light">12 endorsements</span>
              </div>
              <div class="artdeco-list__item">
                <div class="mr1 t-bold"><span aria-hidden="true">SQL</span></div>
              </div>
            </section>"#);
        let out = skills(&html);
        assert_eq!(
            out.items,
            vec![
                Skill { name: "Rust".to_string(), endorsements: 12 },
                Skill { name: "SQL".to_string(), endorsements: 0 },
            ]
        );
    }

    #[test]
    fn test_education_leadership_signal() {
        let html = doc(r#"
            <section id="education"><ul><li class="artdeco-list__item">
              <div class="mr1 t-bold"><span aria-hidden="true">State University</span></div>
              <span class="t-14 t-normal"><span aria-hidden="true">Bachelor of Science - BS, Economics</span></span>
              <span class="t-14 t-normal t-black--light"><span aria-hidden="true">2012 - 2016</span></span>
              <div class="inline-show-more-text"><span aria-hidden="true">Captain of the debate team</span></div>
            </li></ul></section>"#);
        let out = education(&html);
        assert_eq!(out.items.len(), 1);
        assert_eq!(out.items[0].field.as_deref(), Some("Economics"));
        assert_eq!(out.items[0].dates.as_deref(), Some("2012 - 2016"));
        assert_eq!(out.signals[0].text, "Leadership during education at State University");
    }

    #[test]
    fn test_titled_sections_emit_signals() {
        let html = doc(r#"
            <section id="projects"><ul>
              <li class="artdeco-list__item"><div class="mr1 t-bold"><span aria-hidden="true">Tiny DB</span></div></li>
              <li class="artdeco-list__item"><div class="mr1 t-bold"><span aria-hidden="true">Chess Bot</span></div></li>
            </ul></section>
            <section id="licenses_and_certifications"><ul>
              <li class="artdeco-list__item"><div class="mr1 t-bold"><span aria-hidden="true">CKA</span></div></li>
            </ul></section>"#);

        let projects = projects(&html);
        assert_eq!(projects.items.len(), 2);
        assert_eq!(projects.signals[1].text, "Personal/side project: Chess Bot");

        let certs = certifications(&html);
        assert_eq!(certs.items[0].name, "CKA");
        assert_eq!(certs.signals[0].text, "1 professional certifications obtained");
    }

    #[test]
    fn test_activity_and_engagement() {
        let long = "x".repeat(300);
        let html = doc(&format!(r#"
            <div data-view-name="profile-recent-activity">
              <div class="profile-creator-shared-feed-update__container">
                <div class="break-words">{}</div><time datetime="2024-05-01">1w</time>
                <button aria-label="Like post">l</button>
                <button aria-label="Comment on post">c</button>
              </div>
              <div class="profile-creator-shared-feed-update__container"></div>
            </div>
            <button aria-label="Share post">s</button>"#, long));

        let posts = activity_posts(&html, 200);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].content.chars().count(), 200);
        assert_eq!(posts[0].date.as_deref(), Some("2024-05-01"));
        assert_eq!(engagement_count(&html), 3);
    }
}
