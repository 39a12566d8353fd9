use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// --- Profile record ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileRecord {
    pub url: Option<String>,
    pub name: Option<String>,
    pub headline: Option<String>,
    pub location: Option<String>,
    pub profile_image: Option<String>,
    pub connections: Option<u32>,
    pub followers: Option<u32>,

    pub about: About,

    pub experience: Vec<ExperienceEntry>,
    pub current_role: Option<String>,
    pub total_experience_years: f64,

    pub education: Vec<EducationEntry>,

    pub skills: Vec<Skill>,
    pub top_skills: Vec<String>,

    pub certifications: Vec<Certification>,
    pub courses: Vec<Course>,
    pub languages: Vec<Language>,
    pub honors: Vec<Honor>,
    pub publications: Vec<Publication>,
    pub patents: Vec<Patent>,
    pub projects: Vec<Project>,
    pub volunteering: Vec<VolunteerEntry>,
    pub organizations: Vec<Organization>,

    pub recommendations: Recommendations,
    pub activity: RecentActivity,

    pub signals: PotentialSignals,
}

impl ProfileRecord {
    pub fn distinct_employers(&self) -> usize {
        distinct_employers(&self.experience)
    }

    pub fn distinct_languages(&self) -> usize {
        distinct_languages(&self.languages)
    }

    pub fn current_experience(&self) -> Option<&ExperienceEntry> {
        self.experience.iter().find(|e| e.is_current)
    }
}

/// Number of distinct employers, compared case-insensitively.
pub fn distinct_employers(entries: &[ExperienceEntry]) -> usize {
    let mut seen: Vec<String> = Vec::new();
    for company in entries.iter().filter_map(|e| e.company.as_deref()) {
        let key = company.trim().to_lowercase();
        if !key.is_empty() && !seen.contains(&key) {
            seen.push(key);
        }
    }
    seen.len()
}

/// Number of distinct language names, compared case-insensitively.
pub fn distinct_languages(entries: &[Language]) -> usize {
    let mut seen: Vec<String> = Vec::new();
    for language in entries {
        let key = language.name.trim().to_lowercase();
        if !key.is_empty() && !seen.contains(&key) {
            seen.push(key);
        }
    }
    seen.len()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct About {
    pub text: Option<String>,
    pub length: usize,
    pub present: bool, // length above the configured minimum
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub duration: Option<String>, // raw text, e.g. "Jan 2020 - Present · 3 yrs 4 mos"
    pub duration_months: u32,
    pub is_current: bool,
    pub seniority: SeniorityTier,
    pub is_leadership: bool,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeniorityTier {
    Junior,
    Mid,
    Senior,
    #[default]
    Unknown,
}

impl SeniorityTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeniorityTier::Junior => "junior",
            SeniorityTier::Mid => "mid",
            SeniorityTier::Senior => "senior",
            SeniorityTier::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SeniorityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub school: Option<String>,
    pub degree: Option<String>,
    pub field: Option<String>,
    pub dates: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skill {
    pub name: String,
    pub endorsements: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Certification {
    pub name: String,
    pub issuer: Option<String>,
    pub issue_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Course {
    pub name: String,
    pub number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Language {
    pub name: String,
    pub proficiency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Honor {
    pub title: String,
    pub issuer: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Publication {
    pub title: String,
    pub publisher: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Patent {
    pub title: String,
    pub number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolunteerEntry {
    pub role: String,
    pub organization: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Organization {
    pub name: String,
    pub position: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recommendations {
    pub count: usize,
    pub received: Vec<Recommendation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recommendation {
    pub from: String,
    pub relationship: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecentActivity {
    pub posts: Vec<ActivityPost>,
    pub post_count: usize,
    pub engagement_count: usize, // like + comment + share affordances
    pub engagement: EngagementTier,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityPost {
    pub content: String,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementTier {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl fmt::Display for EngagementTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EngagementTier::None => "none",
            EngagementTier::Low => "low",
            EngagementTier::Medium => "medium",
            EngagementTier::High => "high",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PotentialSignals {
    pub career_progression: Vec<String>,
    pub learning: Vec<String>,
    pub leadership: Vec<String>,
    pub initiative: Vec<String>,
    pub quantified_achievements: u32,
    pub diverse_experience: bool,
    pub continuous_learning: bool,
    pub community_engagement: bool,
    pub organization_leadership: bool,
}

// --- Score report ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    LearningPotential,
    Leadership,
    Initiative,
    CareerGrowth,
    TechnicalBreadth,
    CommunityEngagement,
}

impl Category {
    /// Declaration order; also the tie-break order for the top category.
    pub const ALL: [Category; 6] = [
        Category::LearningPotential,
        Category::Leadership,
        Category::Initiative,
        Category::CareerGrowth,
        Category::TechnicalBreadth,
        Category::CommunityEngagement,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::LearningPotential => "Learning Potential",
            Category::Leadership => "Leadership",
            Category::Initiative => "Initiative",
            Category::CareerGrowth => "Career Growth",
            Category::TechnicalBreadth => "Technical Breadth",
            Category::CommunityEngagement => "Community Engagement",
        }
    }

    pub fn max_score(&self) -> u32 {
        match self {
            Category::LearningPotential => 20,
            Category::Leadership => 20,
            Category::Initiative => 20,
            Category::CareerGrowth => 15,
            Category::TechnicalBreadth => 15,
            Category::CommunityEngagement => 10,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub score: u32,
    pub max: u32,
    pub indicators: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "Exceptional Potential")]
    Exceptional,
    #[serde(rename = "High Potential")]
    High,
    #[serde(rename = "Good Potential")]
    Good,
    #[serde(rename = "Moderate Potential")]
    Moderate,
    #[serde(rename = "Limited Data")]
    LimitedData,
}

impl Verdict {
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Exceptional => "Exceptional Potential",
            Verdict::High => "High Potential",
            Verdict::Good => "Good Potential",
            Verdict::Moderate => "Moderate Potential",
            Verdict::LimitedData => "Limited Data",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingIcon {
    Learning,
    Leadership,
    Initiative,
    Growth,
    Technical,
    Community,
    Skills,
    About,
}

impl FindingIcon {
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingIcon::Learning => "learning",
            FindingIcon::Leadership => "leadership",
            FindingIcon::Initiative => "initiative",
            FindingIcon::Growth => "growth",
            FindingIcon::Technical => "technical",
            FindingIcon::Community => "community",
            FindingIcon::Skills => "skills",
            FindingIcon::About => "about",
        }
    }
}

impl From<Category> for FindingIcon {
    fn from(category: Category) -> Self {
        match category {
            Category::LearningPotential => FindingIcon::Learning,
            Category::Leadership => FindingIcon::Leadership,
            Category::Initiative => FindingIcon::Initiative,
            Category::CareerGrowth => FindingIcon::Growth,
            Category::TechnicalBreadth => FindingIcon::Technical,
            Category::CommunityEngagement => FindingIcon::Community,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub text: String,
    pub icon: FindingIcon,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub categories: BTreeMap<Category, CategoryScore>,
    pub aggregate: u32,
    pub max_aggregate: u32,
    pub verdict: Verdict,
    pub top_category: Category,
    pub findings: Vec<Finding>,
    pub concerns: Vec<String>,
    pub reasoning: String,
}

impl ScoreReport {
    pub fn category(&self, category: Category) -> Option<&CategoryScore> {
        self.categories.get(&category)
    }

    /// Score of one category, zero if it was not scored.
    pub fn score_of(&self, category: Category) -> u32 {
        self.category(category).map(|c| c.score).unwrap_or(0)
    }
}
