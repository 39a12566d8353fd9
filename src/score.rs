//! Heuristic scoring of an extracted profile.
//!
//! Six independent categories each add up points from a handful of triggers
//! and are then capped at their maximum. The capped totals sum to an
//! aggregate out of 100, which maps to a graded verdict.

use std::collections::BTreeMap;

use crate::config::{Config, ExtractionConfig, ScoringConfig};
use crate::error::ScoringError;
use crate::heuristics;
use crate::models::{
    Category, CategoryScore, Finding, FindingIcon, ProfileRecord, ScoreReport, SeniorityTier,
    Verdict,
};

/// Ordered verdict tiers, highest first. The first tier whose threshold the
/// aggregate reaches wins.
pub const VERDICT_TIERS: &[(u32, Verdict, &str)] = &[
    (80, Verdict::Exceptional, "Outstanding candidate with strong growth trajectory"),
    (65, Verdict::High, "Strong candidate with clear hunger to learn and grow"),
    (50, Verdict::Good, "Solid candidate showing positive indicators"),
    (35, Verdict::Moderate, "Shows some potential but may need more development"),
    (0, Verdict::LimitedData, "Insufficient profile data for comprehensive assessment"),
];

/// Category score at which the reasoning calls a category out as strong.
pub const STRONG_AREA_MIN: u32 = 15;

const ENDORSED_SKILL_ABOVE: u32 = 5;
const LOYALTY_YEARS_ABOVE: f64 = 5.0;

pub fn verdict_for(aggregate: u32) -> Verdict {
    tier_for(aggregate).1
}

fn tier_for(aggregate: u32) -> (u32, Verdict, &'static str) {
    VERDICT_TIERS
        .iter()
        .copied()
        .find(|(min, _, _)| aggregate >= *min)
        .unwrap_or((0, Verdict::LimitedData, ""))
}

fn strong_area(category: Category) -> &'static str {
    match category {
        Category::LearningPotential => "Strong commitment to continuous learning",
        Category::Leadership => "Demonstrated leadership capabilities",
        Category::Initiative => "High initiative and self-motivation",
        Category::CareerGrowth => "Consistent upward career trajectory",
        Category::TechnicalBreadth => "Broad and well-endorsed technical foundation",
        Category::CommunityEngagement => "Deeply engaged with the professional community",
    }
}

/// `n * per`, capped. Saturates instead of overflowing on absurd counts.
fn linear(n: usize, per: u32, cap: u32) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX).saturating_mul(per).min(cap)
}

/// Points and indicators for one category before capping.
struct Tally {
    category: Category,
    points: u32,
    indicators: Vec<String>,
}

impl Tally {
    fn new(category: Category) -> Self {
        Self { category, points: 0, indicators: Vec::new() }
    }

    fn add(&mut self, points: u32, indicator: impl Into<String>) {
        self.points = self.points.saturating_add(points);
        self.indicators.push(indicator.into());
    }

    fn finish(self) -> (Category, CategoryScore) {
        let max = self.category.max_score();
        let score = CategoryScore {
            score: self.points.min(max),
            max,
            indicators: self.indicators,
        };
        (self.category, score)
    }
}

/// Scores records. Thresholds shared with extraction (top skill count,
/// active posting, languages) are read from the extraction settings so a
/// record is judged by the same rules that built it.
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    config: ScoringConfig,
    extraction: ExtractionConfig,
}

impl Scorer {
    /// Scorer with default extraction thresholds.
    pub fn new(config: ScoringConfig) -> Self {
        Self { config, extraction: ExtractionConfig::default() }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            config: config.scoring.clone(),
            extraction: config.extraction.clone(),
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score(&self, record: &ProfileRecord) -> Result<ScoreReport, ScoringError> {
        self.validate(record)?;

        let categories: BTreeMap<Category, CategoryScore> = [
            learning_potential(record),
            leadership(record),
            initiative(record),
            self.career_growth(record),
            technical_breadth(record),
            self.community_engagement(record),
        ]
        .into_iter()
        .map(Tally::finish)
        .collect();

        let aggregate: u32 = categories.values().map(|c| c.score).sum();
        let max_aggregate: u32 = categories.values().map(|c| c.max).sum();
        let (_, verdict, summary) = tier_for(aggregate);

        // Ties go to the category declared first.
        let mut top_category = Category::ALL[0];
        for category in Category::ALL {
            if score_in(&categories, category) > score_in(&categories, top_category) {
                top_category = category;
            }
        }

        let findings = self.findings(record, &categories, top_category);
        let concerns = self.concerns(record);
        let reasoning = reasoning(record, &categories, aggregate, max_aggregate, verdict, summary, top_category);

        Ok(ScoreReport {
            categories,
            aggregate,
            max_aggregate,
            verdict,
            top_category,
            findings,
            concerns,
            reasoning,
        })
    }

    fn validate(&self, record: &ProfileRecord) -> Result<(), ScoringError> {
        let years = record.total_experience_years;
        if !years.is_finite() || years < 0.0 {
            return Err(ScoringError::InvalidExperienceYears(years));
        }

        let counts = [
            ("recommendations.count", record.recommendations.count, record.recommendations.received.len()),
            ("activity.post_count", record.activity.post_count, record.activity.posts.len()),
            (
                "about.length",
                record.about.length,
                record.about.text.as_deref().map(|t| t.chars().count()).unwrap_or(0),
            ),
        ];
        for (field, declared, actual) in counts {
            if declared != actual {
                return Err(ScoringError::InconsistentCount { field, declared, actual });
            }
        }

        let limit = self.extraction.top_skills;
        if record.top_skills.len() > limit {
            return Err(ScoringError::TooManyTopSkills { count: record.top_skills.len(), limit });
        }
        Ok(())
    }

    fn career_growth(&self, record: &ProfileRecord) -> Tally {
        let mut tally = Tally::new(Category::CareerGrowth);

        let mut tiers: Vec<SeniorityTier> = record.experience.iter().map(|e| e.seniority).collect();
        tiers.sort();
        tiers.dedup();
        if tiers.len() > 1 {
            tally.add(5, "Clear career progression trajectory");
        } else if tiers.contains(&SeniorityTier::Senior) {
            tally.add(3, "Reached a senior-level role");
        }

        let employers = record.distinct_employers();
        let frequent = self.config.frequent_changes_above;
        if (2..=frequent).contains(&employers) {
            tally.add(5, "Healthy job mobility showing adaptability");
        } else if employers > frequent {
            tally.add(2, format!("Broad exposure across {} employers", employers));
        } else if employers == 1 && record.total_experience_years > LOYALTY_YEARS_ABOVE {
            tally.add(3, "Long tenure showing loyalty");
        }

        if let Some(current) = record.current_experience() {
            let months = current.duration_months;
            if months > 12 {
                tally.add(5, format!("{} months in current role", months));
            } else if months > 6 {
                tally.add(3, format!("{} months in current role", months));
            }
        }

        tally
    }

    fn community_engagement(&self, record: &ProfileRecord) -> Tally {
        let mut tally = Tally::new(Category::CommunityEngagement);

        if !record.volunteering.is_empty() {
            tally.add(4, "Active in volunteer/community work");
        }
        if record.activity.post_count > self.extraction.active_post_min {
            tally.add(3, "Active on LinkedIn - shares knowledge");
        }
        let languages = record.distinct_languages();
        if languages > self.extraction.multilingual_min {
            tally.add(3, format!("Multilingual ({} languages)", languages));
        }

        tally
    }

    fn findings(
        &self,
        record: &ProfileRecord,
        categories: &BTreeMap<Category, CategoryScore>,
        top_category: Category,
    ) -> Vec<Finding> {
        let icon = FindingIcon::from(top_category);
        let mut findings: Vec<Finding> = categories
            .get(&top_category)
            .map(|c| c.indicators.as_slice())
            .unwrap_or_default()
            .iter()
            .map(|text| Finding { text: text.clone(), icon })
            .collect();

        if record.skills.len() > self.config.findings_skill_min {
            findings.push(Finding {
                text: format!("{} skills listed", record.skills.len()),
                icon: FindingIcon::Skills,
            });
        }
        if record.about.length > self.config.findings_about_min {
            findings.push(Finding {
                text: format!("Detailed about section ({} characters)", record.about.length),
                icon: FindingIcon::About,
            });
        }
        findings
    }

    fn concerns(&self, record: &ProfileRecord) -> Vec<String> {
        let mut concerns = Vec::new();
        if record.experience.is_empty() {
            concerns.push("No work experience listed".to_string());
        }
        if record.skills.len() < self.config.limited_skills_below {
            concerns.push("Limited skills listed on profile".to_string());
        }
        if record.about.text.is_none() {
            concerns.push("No about section - profile may be incomplete".to_string());
        }
        if record.distinct_employers() > self.config.frequent_changes_above {
            concerns.push("Frequent job changes - may need stability assessment".to_string());
        }
        concerns
    }
}

fn score_in(categories: &BTreeMap<Category, CategoryScore>, category: Category) -> u32 {
    categories.get(&category).map(|c| c.score).unwrap_or(0)
}

fn learning_potential(record: &ProfileRecord) -> Tally {
    let mut tally = Tally::new(Category::LearningPotential);

    let certs = record.certifications.len();
    if certs > 0 {
        tally.add(linear(certs, 2, 6), format!("{} professional certifications", certs));
    }
    let courses = record.courses.len();
    if courses > 0 {
        tally.add(linear(courses, 1, 4), format!("Completed {} additional courses", courses));
    }

    let skills = record.skills.len();
    if skills > 15 {
        tally.add(5, format!("Broad technical skill set ({} skills)", skills));
    } else if skills > 8 {
        tally.add(3, format!("Solid skill set ({} skills)", skills));
    }

    let signals = record.signals.learning.len();
    if signals > 0 {
        tally.add(linear(signals, 1, 5), "Growth mindset evident in profile content");
    }

    tally
}

fn leadership(record: &ProfileRecord) -> Tally {
    let mut tally = Tally::new(Category::Leadership);

    let roles = record
        .experience
        .iter()
        .filter(|e| e.is_leadership || e.seniority == SeniorityTier::Senior)
        .count();
    if roles > 0 {
        tally.add(linear(roles, 4, 8), format!("{} leadership or senior roles", roles));
    }

    let mentorship = record
        .signals
        .leadership
        .iter()
        .filter(|s| heuristics::is_mentorship_signal(s))
        .count();
    if mentorship > 0 {
        tally.add(linear(mentorship, 2, 6), "Mentorship and team management experience");
    }

    let recommendations = record.recommendations.count;
    if recommendations > 0 {
        tally.add(
            linear(recommendations, 1, 6),
            format!("{} recommendations received", recommendations),
        );
    }

    let executive = record
        .experience
        .iter()
        .filter_map(|e| e.title.as_deref())
        .any(heuristics::is_executive_title);
    if executive {
        tally.add(4, "Founder or executive experience");
    }

    if record.signals.organization_leadership {
        tally.add(3, "Leadership in professional or volunteer organizations");
    }

    tally
}

fn initiative(record: &ProfileRecord) -> Tally {
    let mut tally = Tally::new(Category::Initiative);

    let projects = record.projects.len();
    if projects > 0 {
        tally.add(linear(projects, 3, 9), format!("{} independent projects", projects));
    }

    let achievements = record.publications.len() + record.patents.len() + record.honors.len();
    if achievements > 0 {
        tally.add(linear(achievements, 2, 6), format!("{} publications/patents/honors", achievements));
    }

    let signals = record.signals.initiative.len();
    if signals > 0 {
        tally.add(linear(signals, 1, 5), "Proactive problem-solving evident in work history");
    }

    let quantified = record.signals.quantified_achievements;
    if quantified > 0 {
        tally.add(
            linear(quantified as usize, 2, 4),
            format!("{} quantified achievements", quantified),
        );
    }

    tally
}

fn technical_breadth(record: &ProfileRecord) -> Tally {
    let mut tally = Tally::new(Category::TechnicalBreadth);

    if record.signals.diverse_experience {
        tally.add(5, "Diverse industry/domain experience");
    }

    let endorsed = record
        .skills
        .iter()
        .filter(|s| s.endorsements > ENDORSED_SKILL_ABOVE)
        .count();
    if endorsed > 5 {
        tally.add(5, format!("{} well-endorsed technical skills", endorsed));
    } else if endorsed > 0 {
        tally.add(3, format!("{} endorsed technical skills", endorsed));
    }

    if !record.education.is_empty() {
        tally.add(3, "Formal education listed");
    }
    let advanced = record
        .education
        .iter()
        .filter_map(|e| e.degree.as_deref())
        .any(heuristics::is_advanced_degree);
    if advanced {
        tally.add(2, "Advanced degree");
    }

    tally
}

fn reasoning(
    record: &ProfileRecord,
    categories: &BTreeMap<Category, CategoryScore>,
    aggregate: u32,
    max_aggregate: u32,
    verdict: Verdict,
    summary: &str,
    top_category: Category,
) -> String {
    let name = record.name.as_deref().unwrap_or("This candidate");
    let top = score_in(categories, top_category);

    let mut text = format!(
        "{} is rated {} with an overall score of {}/{}. Strongest area: {} ({}/{}). {}.",
        name,
        verdict,
        aggregate,
        max_aggregate,
        top_category.label(),
        top,
        top_category.max_score(),
        summary,
    );
    for category in Category::ALL {
        if score_in(categories, category) >= STRONG_AREA_MIN {
            text.push(' ');
            text.push_str(strong_area(category));
            text.push('.');
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::Extractor;
    use crate::models::{
        About, ActivityPost, Certification, EducationEntry, ExperienceEntry, Language,
        PotentialSignals, Recommendation, Recommendations, RecentActivity, Skill, VolunteerEntry,
    };

    fn about(text: &str) -> About {
        About {
            text: Some(text.to_string()),
            length: text.chars().count(),
            present: true,
        }
    }

    fn skills(endorsed: &[u32]) -> Vec<Skill> {
        endorsed
            .iter()
            .enumerate()
            .map(|(i, e)| Skill { name: format!("skill-{}", i), endorsements: *e })
            .collect()
    }

    fn certifications(n: usize) -> Vec<Certification> {
        (0..n)
            .map(|i| Certification { name: format!("cert-{}", i), ..Default::default() })
            .collect()
    }

    fn posts(n: usize) -> RecentActivity {
        RecentActivity {
            posts: (0..n)
                .map(|i| ActivityPost { content: format!("post {}", i), date: None })
                .collect(),
            post_count: n,
            ..Default::default()
        }
    }

    /// One current senior role, three certifications, twelve skills, two
    /// volunteer roles and three posts, with the signals extraction derives
    /// from them.
    fn scenario() -> ProfileRecord {
        let about_text = "Curious engineer, always eager to learn. I mentor my teams and built a payments platform that grew sales by 40% in 2023.";
        ProfileRecord {
            name: Some("Sam Okafor".to_string()),
            about: about(about_text),
            experience: vec![ExperienceEntry {
                title: Some("Senior Engineering Manager".to_string()),
                company: Some("Initech".to_string()),
                duration: Some("Aug 2023 - Present · 1 yr 2 mos".to_string()),
                description: Some(
                    "Led team of 8 engineers and mentored new hires. Launched the billing platform and reduced costs by 30%. Self-taught Kubernetes along the way."
                        .to_string(),
                ),
                duration_months: 14,
                is_current: true,
                seniority: SeniorityTier::Senior,
                is_leadership: true,
                ..Default::default()
            }],
            current_role: Some("Senior Engineering Manager".to_string()),
            total_experience_years: 14.0 / 12.0,
            skills: skills(&[30, 25, 20, 18, 15, 12, 10, 8, 7, 2, 1, 0]),
            top_skills: vec!["skill-0", "skill-1", "skill-2", "skill-3", "skill-4"]
                .into_iter()
                .map(String::from)
                .collect(),
            certifications: certifications(3),
            activity: posts(3),
            volunteering: vec![
                VolunteerEntry { role: "Mentor".to_string(), organization: None },
                VolunteerEntry { role: "Community Organizer".to_string(), organization: None },
            ],
            signals: PotentialSignals {
                learning: vec![
                    "Growth mindset language in about section".to_string(),
                    "Continuous learning in Senior Engineering Manager".to_string(),
                    "3 professional certifications obtained".to_string(),
                    "Broad skill set: 12 skills listed".to_string(),
                    "Active on LinkedIn - shares insights and content".to_string(),
                ],
                leadership: vec![
                    "Leadership language in about section".to_string(),
                    "Leadership in Senior Engineering Manager".to_string(),
                    "Volunteer work: Mentor".to_string(),
                    "Volunteer work: Community Organizer".to_string(),
                ],
                initiative: vec![
                    "Initiative-taking language in about section".to_string(),
                    "Proactive contributions in Senior Engineering Manager".to_string(),
                    "Measurable impact: 40% in about section".to_string(),
                    "Measurable impact: 30% in Senior Engineering Manager".to_string(),
                ],
                quantified_achievements: 2,
                continuous_learning: true,
                community_engagement: true,
                organization_leadership: true,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_scenario_lands_in_good_potential() {
        let record = scenario();
        assert_eq!(record.about.length, 120);

        let report = Scorer::default().score(&record).unwrap();
        assert_eq!(report.score_of(Category::LearningPotential), 14);
        assert_eq!(report.score_of(Category::Leadership), 11);
        assert_eq!(report.score_of(Category::Initiative), 8);
        assert_eq!(report.score_of(Category::CareerGrowth), 8);
        assert_eq!(report.score_of(Category::TechnicalBreadth), 5);
        assert_eq!(report.score_of(Category::CommunityEngagement), 7);
        assert_eq!(report.aggregate, 53);
        assert_eq!(report.max_aggregate, 100);
        assert_eq!(report.verdict, Verdict::Good);
        assert_eq!(report.top_category, Category::LearningPotential);
    }

    #[test]
    fn test_scenario_findings_and_reasoning() {
        let report = Scorer::default().score(&scenario()).unwrap();

        let texts: Vec<&str> = report.findings.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "3 professional certifications",
                "Solid skill set (12 skills)",
                "Growth mindset evident in profile content",
                "12 skills listed",
            ]
        );
        assert_eq!(report.findings[0].icon, FindingIcon::Learning);
        assert_eq!(report.findings[3].icon, FindingIcon::Skills);

        assert_eq!(
            report.reasoning,
            "Sam Okafor is rated Good Potential with an overall score of 53/100. \
             Strongest area: Learning Potential (14/20). \
             Solid candidate showing positive indicators."
        );
        assert!(report.concerns.is_empty());
    }

    #[test]
    fn test_empty_record_is_limited_data() {
        let report = Scorer::default().score(&ProfileRecord::default()).unwrap();
        assert_eq!(report.aggregate, 0);
        assert_eq!(report.verdict, Verdict::LimitedData);
        assert_eq!(report.top_category, Category::LearningPotential);
        assert!(report.findings.is_empty());
        assert_eq!(
            report.concerns,
            vec![
                "No work experience listed",
                "Limited skills listed on profile",
                "No about section - profile may be incomplete",
            ]
        );
        assert!(report.reasoning.starts_with("This candidate is rated Limited Data"));
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let record = scenario();
        let scorer = Scorer::default();
        assert_eq!(scorer.score(&record).unwrap(), scorer.score(&record).unwrap());
    }

    #[test]
    fn test_categories_are_capped_not_scaled() {
        let founder = || ExperienceEntry {
            title: Some("Founder & CEO".to_string()),
            seniority: SeniorityTier::Senior,
            is_leadership: true,
            ..Default::default()
        };
        let record = ProfileRecord {
            experience: (0..5).map(|_| founder()).collect(),
            recommendations: Recommendations {
                count: 10,
                received: (0..10)
                    .map(|i| Recommendation { from: format!("peer {}", i), ..Default::default() })
                    .collect(),
            },
            signals: PotentialSignals {
                leadership: (0..5).map(|i| format!("Mentored cohort {}", i)).collect(),
                organization_leadership: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let report = Scorer::default().score(&record).unwrap();
        let leadership = report.category(Category::Leadership).unwrap();
        assert_eq!(leadership.score, 20);
        assert_eq!(leadership.max, 20);
        assert_eq!(leadership.indicators.len(), 5);

        for category in Category::ALL {
            let c = report.category(category).unwrap();
            assert!(c.score <= c.max);
        }
    }

    #[test]
    fn test_more_certifications_never_lower_the_score() {
        let scorer = Scorer::default();
        let mut record = ProfileRecord::default();
        let mut previous = scorer.score(&record).unwrap();
        for _ in 0..6 {
            record.certifications.push(Certification::default());
            let current = scorer.score(&record).unwrap();
            assert!(current.aggregate >= previous.aggregate);
            assert!(
                current.score_of(Category::LearningPotential)
                    >= previous.score_of(Category::LearningPotential)
            );
            previous = current;
        }
        assert_eq!(previous.score_of(Category::LearningPotential), 6);

        let mut record = scenario();
        let mut previous = scorer.score(&record).unwrap();
        for _ in 0..6 {
            record.certifications.push(Certification::default());
            let current = scorer.score(&record).unwrap();
            assert!(current.aggregate >= previous.aggregate);
            assert!(
                current.score_of(Category::LearningPotential)
                    >= previous.score_of(Category::LearningPotential)
            );
            previous = current;
        }
    }

    #[test]
    fn test_verdict_boundaries() {
        assert_eq!(verdict_for(100), Verdict::Exceptional);
        assert_eq!(verdict_for(80), Verdict::Exceptional);
        assert_eq!(verdict_for(79), Verdict::High);
        assert_eq!(verdict_for(65), Verdict::High);
        assert_eq!(verdict_for(64), Verdict::Good);
        assert_eq!(verdict_for(50), Verdict::Good);
        assert_eq!(verdict_for(49), Verdict::Moderate);
        assert_eq!(verdict_for(35), Verdict::Moderate);
        assert_eq!(verdict_for(34), Verdict::LimitedData);
        assert_eq!(verdict_for(0), Verdict::LimitedData);
    }

    #[test]
    fn test_career_growth_branches() {
        let job = |company: &str, tier: SeniorityTier| ExperienceEntry {
            company: Some(company.to_string()),
            seniority: tier,
            ..Default::default()
        };
        let scorer = Scorer::default();

        let loyal = ProfileRecord {
            experience: vec![job("Acme", SeniorityTier::Mid)],
            total_experience_years: 7.0,
            ..Default::default()
        };
        assert_eq!(scorer.score(&loyal).unwrap().score_of(Category::CareerGrowth), 3);

        let hopper = ProfileRecord {
            experience: ["a", "b", "c", "d", "e", "f"]
                .iter()
                .map(|c| job(c, SeniorityTier::Junior))
                .collect(),
            ..Default::default()
        };
        let report = scorer.score(&hopper).unwrap();
        assert_eq!(report.score_of(Category::CareerGrowth), 2);
        assert!(report.concerns.contains(&"Frequent job changes - may need stability assessment".to_string()));

        let climber = ProfileRecord {
            experience: vec![job("a", SeniorityTier::Senior), job("b", SeniorityTier::Junior)],
            ..Default::default()
        };
        assert_eq!(scorer.score(&climber).unwrap().score_of(Category::CareerGrowth), 10);
    }

    #[test]
    fn test_technical_breadth_counts_advanced_degree() {
        let record = ProfileRecord {
            education: vec![EducationEntry {
                degree: Some("Doctor of Philosophy - PhD".to_string()),
                ..Default::default()
            }],
            skills: skills(&[9, 9, 9, 9, 9, 9]),
            signals: PotentialSignals { diverse_experience: true, ..Default::default() },
            ..Default::default()
        };
        let report = Scorer::default().score(&record).unwrap();
        assert_eq!(report.score_of(Category::TechnicalBreadth), 15);
    }

    #[test]
    fn test_rejects_invalid_experience_years() {
        let scorer = Scorer::default();
        for years in [-1.0, f64::NAN, f64::INFINITY] {
            let record = ProfileRecord { total_experience_years: years, ..Default::default() };
            assert!(matches!(
                scorer.score(&record),
                Err(ScoringError::InvalidExperienceYears(_))
            ));
        }
    }

    #[test]
    fn test_rejects_inconsistent_counts() {
        let scorer = Scorer::default();

        let mut record = ProfileRecord::default();
        record.recommendations.count = 2;
        assert_eq!(
            scorer.score(&record),
            Err(ScoringError::InconsistentCount {
                field: "recommendations.count",
                declared: 2,
                actual: 0,
            })
        );

        let mut record = ProfileRecord::default();
        record.about.text = Some("short".to_string());
        assert_eq!(
            scorer.score(&record),
            Err(ScoringError::InconsistentCount { field: "about.length", declared: 0, actual: 5 })
        );

        let mut record = ProfileRecord::default();
        record.activity.post_count = 1;
        assert!(matches!(scorer.score(&record), Err(ScoringError::InconsistentCount { .. })));
    }

    #[test]
    fn test_rejects_too_many_top_skills() {
        let record = ProfileRecord {
            top_skills: (0..6).map(|i| i.to_string()).collect(),
            ..Default::default()
        };
        assert_eq!(
            Scorer::default().score(&record),
            Err(ScoringError::TooManyTopSkills { count: 6, limit: 5 })
        );

        let mut config = Config::default();
        config.extraction.top_skills = 10;
        assert!(Scorer::from_config(&config).score(&record).is_ok());
    }

    #[test]
    fn test_accepts_what_a_wider_extractor_produces() {
        let items: String = (0..12)
            .map(|i| {
                format!(
                    r#"<li class="artdeco-list__item"><div class="mr1 t-bold"><span aria-hidden="true">Skill {}</span></div></li>"#,
                    i
                )
            })
            .collect();
        let html = format!(r#"<section id="skills"><ul>{}</ul></section>"#, items);

        let mut config = Config::default();
        config.extraction.top_skills = 10;
        let record = Extractor::new(config.extraction.clone()).extract_str(&html).unwrap();
        assert_eq!(record.top_skills.len(), 10);

        assert!(Scorer::from_config(&config).score(&record).is_ok());
        assert_eq!(
            Scorer::default().score(&record),
            Err(ScoringError::TooManyTopSkills { count: 10, limit: 5 })
        );
    }

    #[test]
    fn test_activity_threshold_comes_from_config() {
        let record = ProfileRecord { activity: posts(3), ..Default::default() };

        let report = Scorer::default().score(&record).unwrap();
        assert_eq!(report.score_of(Category::CommunityEngagement), 3);

        let mut config = Config::default();
        config.extraction.active_post_min = 3;
        let report = Scorer::from_config(&config).score(&record).unwrap();
        assert_eq!(report.score_of(Category::CommunityEngagement), 0);
    }

    #[test]
    fn test_multilingual_counts_distinct_languages() {
        let language = |name: &str| Language { name: name.to_string(), proficiency: None };
        let scorer = Scorer::default();

        let repeated = ProfileRecord {
            languages: vec![language("English"), language("english "), language("ENGLISH")],
            ..Default::default()
        };
        assert_eq!(scorer.score(&repeated).unwrap().score_of(Category::CommunityEngagement), 0);

        let bilingual = ProfileRecord {
            languages: vec![language("English"), language("Spanish"), language("english")],
            ..Default::default()
        };
        let report = scorer.score(&bilingual).unwrap();
        assert_eq!(report.score_of(Category::CommunityEngagement), 3);
        assert_eq!(
            report.category(Category::CommunityEngagement).unwrap().indicators,
            vec!["Multilingual (2 languages)"]
        );
    }

    #[test]
    fn test_scores_extracted_fixture() {
        let record = Extractor::default()
            .extract_str(include_str!("../tests/fixtures/profile.html"))
            .unwrap();
        let report = Scorer::default().score(&record).unwrap();

        assert_eq!(report.verdict, Verdict::High);
        assert_eq!(report.top_category, Category::CareerGrowth);
        assert!(report.reasoning.starts_with("Jordan Rivera is rated High Potential"));
        assert!(report.reasoning.contains("Consistent upward career trajectory."));
        assert!(report.concerns.is_empty());
    }
}
