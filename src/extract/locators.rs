//! Ordered locator lists and the fallback lookups that walk them.
//!
//! Lists run from most to least stable: `data-test-id` attributes first,
//! then class-name selectors from specific to generic. The first locator
//! that yields a non-empty value wins.

use scraper::{ElementRef, Html, Selector};

// --- Top card ---

pub const NAME: &[&str] = &[
    r#"[data-test-id="top-card-profile-name"]"#,
    "h1.text-heading-xlarge",
    ".pv-text-details__left-panel h1",
    r#"h1[class*="inline"]"#,
    ".ph5 h1",
];

pub const HEADLINE: &[&str] = &[
    r#"[data-test-id="top-card-headline"]"#,
    ".text-body-medium.break-words",
    ".pv-text-details__left-panel .text-body-medium",
    r#"div[class*="headline"]"#,
];

pub const LOCATION: &[&str] = &[
    r#"[data-test-id="top-card-location"]"#,
    ".text-body-small.inline.t-black--light.break-words",
    ".pv-text-details__left-panel .text-body-small",
];

pub const PROFILE_IMAGE: &[(&str, &str)] = &[
    (r#"[data-test-id="profile-photo"]"#, "src"),
    (".pv-top-card-profile-picture__image", "src"),
    (r#"img[class*="profile-photo"]"#, "src"),
];

pub const CANONICAL_URL: &[(&str, &str)] = &[
    (r#"link[rel="canonical"]"#, "href"),
    (r#"meta[property="og:url"]"#, "content"),
];

pub const CONNECTIONS: &[&str] = &[
    r#"[data-test-id="connections-count"]"#,
    ".t-black--light.t-normal span",
];

pub const FOLLOWERS: &[&str] = &[
    r#"[data-test-id="followers-count"]"#,
    ".pv-top-card--list-bullet .t-black--light",
];

pub const ABOUT: &[&str] = &[
    r#"[data-test-id="about-details"]"#,
    "#about ~ .display-flex .inline-show-more-text",
    r#"section[data-section="about"] .display-flex .inline-show-more-text"#,
    r#".pv-shared-text-with-see-more span[aria-hidden="true"]"#,
];

// --- Section anchors ---

pub const EXPERIENCE_SECTION: &[&str] = &["#experience"];
pub const EDUCATION_SECTION: &[&str] = &["#education"];
pub const SKILLS_SECTION: &[&str] = &["#skills"];
pub const CERTIFICATIONS_SECTION: &[&str] = &["#licenses_and_certifications"];
pub const PROJECTS_SECTION: &[&str] = &["#projects"];
pub const VOLUNTEER_SECTION: &[&str] = &["#volunteering_experience", "#volunteering_see_all"];
pub const COURSES_SECTION: &[&str] = &["#courses"];
pub const LANGUAGES_SECTION: &[&str] = &["#languages"];
pub const HONORS_SECTION: &[&str] = &["#honors_and_awards"];
pub const PUBLICATIONS_SECTION: &[&str] = &["#publications"];
pub const PATENTS_SECTION: &[&str] = &["#patents"];
pub const ORGANIZATIONS_SECTION: &[&str] = &["#organizations"];
pub const RECOMMENDATIONS_SECTION: &[&str] = &["#recommendations"];
pub const ACTIVITY_SECTION: &[&str] = &[r#"[data-view-name="profile-recent-activity"]"#];

// --- Items within a section ---

pub const EXPERIENCE_ITEMS: &[&str] = &[r#"[data-test-id="experience-item"]"#, "li.artdeco-list__item"];
pub const EDUCATION_ITEMS: &[&str] = &[r#"[data-test-id="education-item"]"#, "li.artdeco-list__item"];
pub const SKILL_ITEMS: &[&str] = &[r#"[data-test-id="skill-item"]"#, ".artdeco-list__item"];
pub const VOLUNTEER_ITEMS: &[&str] = &[r#"[data-test-id="volunteering-item"]"#, "li.artdeco-list__item"];
pub const ORGANIZATION_ITEMS: &[&str] = &[".org-association-item", "li.artdeco-list__item"];
pub const RECOMMENDATION_ITEMS: &[&str] = &[r#"[data-test-id="recommendation-item"]"#, ".artdeco-entity-lockup"];
pub const ACTIVITY_ITEMS: &[&str] = &[
    ".profile-creator-shared-feed-update__container",
    r#"[data-test-id="feed-item"]"#,
    r#"[data-test-id="activity-item"]"#,
];
pub const LIST_ITEMS: &[&str] = &["li.artdeco-list__item"];

// --- Fields within an item ---

pub const ITEM_TITLE: &[&str] = &[
    r#"[data-test-id="title"]"#,
    r#".mr1.t-bold span[aria-hidden="true"]"#,
    r#".t-bold span[aria-hidden="true"]"#,
];
pub const ITEM_SUBTITLE: &[&str] = &[
    r#"[data-test-id="subtitle"]"#,
    r#".t-14.t-normal span[aria-hidden="true"]"#,
];
pub const ITEM_CAPTION: &str = r#".t-14.t-normal.t-black--light span[aria-hidden="true"]"#;
pub const ITEM_DESCRIPTION: &[&str] = &[
    r#"[data-test-id="description"]"#,
    r#".inline-show-more-text span[aria-hidden="true"]"#,
];

pub const EXPERIENCE_COMPANY: &[&str] = &[
    r#"[data-test-id="company-name"]"#,
    r#".t-14.t-normal span[aria-hidden="true"]"#,
];
pub const EXPERIENCE_DURATION: &[&str] = &[r#"[data-test-id="duration"]"#, ITEM_CAPTION];
pub const EXPERIENCE_LOCATION: &[&str] = &[r#"[data-test-id="location"]"#];
pub const EXPERIENCE_SKILLS: &str = r#"[data-field="experience_skill"] span"#;

pub const SCHOOL: &[&str] = &[
    r#"[data-test-id="school-name"]"#,
    r#".mr1.t-bold span[aria-hidden="true"]"#,
];
pub const DEGREE: &[&str] = &[
    r#"[data-test-id="degree-name"]"#,
    r#".t-14.t-normal span[aria-hidden="true"]"#,
];
pub const EDUCATION_DATES: &[&str] = &[r#"[data-test-id="dates"]"#, ITEM_CAPTION];

pub const SKILL_NAME: &[&str] = &[
    r#"[data-test-id="skill-name"]"#,
    r#".mr1.t-bold span[aria-hidden="true"]"#,
];
pub const ENDORSEMENTS: &[&str] = &[r#"[data-test-id="endorsement-count"]"#, ".t-14.t-black--light"];

pub const VOLUNTEER_ROLE: &[&str] = &[
    r#"[data-test-id="volunteering-role"]"#,
    r#".mr1.t-bold span[aria-hidden="true"]"#,
];
pub const VOLUNTEER_ORGANIZATION: &[&str] = &[
    r#"[data-test-id="volunteering-organization"]"#,
    r#".t-14.t-normal span[aria-hidden="true"]"#,
];

pub const RECOMMENDER: &[&str] = &[r#"[data-test-id="recommender-name"]"#, ".t-16.t-black span"];
pub const RECOMMENDER_RELATIONSHIP: &[&str] = &[
    r#"[data-test-id="recommender-relationship"]"#,
    ".t-14.t-black--light",
];
pub const RECOMMENDATION_TEXT: &[&str] = &[
    r#"[data-test-id="recommendation-text"]"#,
    ".inline-show-more-text span",
];

pub const POST_CONTENT: &[&str] = &[r#"[data-test-id="post-content"]"#, ".break-words"];
pub const POST_DATE: &[(&str, &str)] = &[("time", "datetime")];

/// Engagement affordances counted across the whole page.
pub const ENGAGEMENT_AFFORDANCES: &[&str] = &[
    r#"[aria-label*="Like"]"#,
    r#"[aria-label*="Comment"]"#,
    r#"[aria-label*="Share"]"#,
];

// --- Lookups ---

pub fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

/// Whitespace-collapsed text content of an element.
pub fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() { None } else { Some(text) }
}

/// Text of the first element matched by the first locator that resolves to
/// something non-empty.
pub fn first_text(scope: ElementRef<'_>, locators: &[&str]) -> Option<String> {
    locators.iter().find_map(|css| {
        let sel = selector(css)?;
        let element = scope.select(&sel).next()?;
        non_empty(element_text(element))
    })
}

/// Attribute value under the same fallback rule as [`first_text`].
pub fn first_attr(scope: ElementRef<'_>, locators: &[(&str, &str)]) -> Option<String> {
    locators.iter().find_map(|(css, attr)| {
        let sel = selector(css)?;
        let element = scope.select(&sel).next()?;
        let value = element.value().attr(attr)?.trim();
        non_empty(value.to_string())
    })
}

/// Texts of every element a single selector matches, empties skipped.
pub fn all_texts(scope: ElementRef<'_>, css: &str) -> Vec<String> {
    let Some(sel) = selector(css) else {
        return Vec::new();
    };
    scope
        .select(&sel)
        .map(element_text)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Count of elements a selector matches within `scope`.
pub fn count(scope: ElementRef<'_>, css: &str) -> usize {
    selector(css).map(|sel| scope.select(&sel).count()).unwrap_or(0)
}

/// First element matched by any of the anchor locators.
pub fn anchor<'a>(document: &'a Html, anchors: &[&str]) -> Option<ElementRef<'a>> {
    anchors.iter().find_map(|css| {
        let sel = selector(css)?;
        document.select(&sel).next()
    })
}

/// Resolve a section anchor to the region its items live in: the closest
/// enclosing `<section>`, or the anchor itself when it has none.
pub fn section_scope<'a>(document: &'a Html, anchors: &[&str]) -> Option<ElementRef<'a>> {
    let anchor = anchor(document, anchors)?;

    if anchor.value().name() == "section" {
        return Some(anchor);
    }
    let section = anchor
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "section");
    Some(section.unwrap_or(anchor))
}

/// Items under `scope` from the first item locator that matches anything.
pub fn items<'a>(scope: ElementRef<'a>, locators: &[&str]) -> Vec<ElementRef<'a>> {
    for css in locators {
        let Some(sel) = selector(css) else { continue };
        let found: Vec<ElementRef<'a>> = scope.select(&sel).collect();
        if !found.is_empty() {
            return found;
        }
    }
    Vec::new()
}
