//! Intent Router — the deterministic responder's decision core.
//!
//! A query is lower-cased once and checked against an ordered list of rules.
//! The first rule with any trigger occurring as a substring fires and the scan
//! stops. Ambiguous queries are settled by rule position alone; there is no
//! relevance scoring. Nothing matched means the fixed fallback answer.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::knowledge::KnowledgeBase;
use crate::rules::catalog::{
    RoadmapFocus, AI_ML_PROFILE, FALLBACK_ANSWER, FULLSTACK_PROFILE, IMPROVEMENT_CLARIFICATION,
    NEW_PROJECT_IDEAS, TECH_STACK_CLARIFICATION,
};
use crate::rules::formatter;

/// What a matched rule answers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "intent", content = "target")]
pub enum Intent {
    AboutDeveloper,
    ProjectTechStack,
    Skills,
    Expertise,
    ProjectList,
    /// Details of the named project.
    ProjectDetail(&'static str),
    ImprovementSuggestions,
    NewProjectIdeas,
    /// Resolved further by a nested first-match over roadmap flavors.
    LearningRoadmap,
    CareerInterests,
    RecruiterPitch,
    AiMlProfile,
    FullStackProfile,
}

/// One entry of the ordered rule table.
#[derive(Debug, Clone)]
pub struct Rule {
    pub triggers: &'static [&'static str],
    pub intent: Intent,
}

impl Rule {
    pub const fn new(triggers: &'static [&'static str], intent: Intent) -> Self {
        Self { triggers, intent }
    }

    fn matches(&self, query_lower: &str) -> bool {
        any_present(self.triggers, query_lower)
    }
}

fn any_present(triggers: &[&str], query_lower: &str) -> bool {
    triggers.iter().any(|t| query_lower.contains(t))
}

/// Nested roadmap flavors, checked in order; no hit means the general roadmap.
const ROADMAP_FLAVORS: &[(RoadmapFocus, &[&str])] = &[
    (RoadmapFocus::MachineLearning, &["machine learning", "ml", "ai"]),
    (RoadmapFocus::Nlp, &["nlp", "language"]),
    (RoadmapFocus::FullStack, &["fullstack", "full-stack", "web"]),
];

/// Picks the roadmap flavor a lowered query asks for.
pub fn roadmap_focus_for(query_lower: &str) -> RoadmapFocus {
    ROADMAP_FLAVORS
        .iter()
        .find(|(_, triggers)| any_present(triggers, query_lower))
        .map(|(focus, _)| *focus)
        .unwrap_or_default()
}

/// The production rule table, highest priority first.
///
/// The tech-stack rule sits right below "about" so that "tech stack for X"
/// is not swallowed by the generic "tech" skills trigger or the per-project
/// detail triggers.
pub fn default_rules() -> Vec<Rule> {
    vec![
        Rule::new(
            &["about", "who are you", "tell me about yourself", "introduce"],
            Intent::AboutDeveloper,
        ),
        Rule::new(&["tech stack", "used in", "built with"], Intent::ProjectTechStack),
        Rule::new(&["skills", "technologies", "tech"], Intent::Skills),
        Rule::new(&["expertise", "specialization", "strong at"], Intent::Expertise),
        Rule::new(
            &["all projects", "portfolio", "what have you built"],
            Intent::ProjectList,
        ),
        Rule::new(
            &["smartleaf", "plant", "disease"],
            Intent::ProjectDetail("SmartLeaf"),
        ),
        Rule::new(
            &["breatheasy", "pollution", "air quality", "health"],
            Intent::ProjectDetail("BreatheEasy"),
        ),
        Rule::new(
            &["student", "management", "school"],
            Intent::ProjectDetail("Student Management System"),
        ),
        Rule::new(
            &["movie", "recommendation", "sentiment"],
            Intent::ProjectDetail("Movie Recommendation System"),
        ),
        Rule::new(
            &["grocery", "shopping", "smart"],
            Intent::ProjectDetail("Smart Grocery AI"),
        ),
        Rule::new(
            &["improve", "improvement", "better", "enhance"],
            Intent::ImprovementSuggestions,
        ),
        Rule::new(
            &["new project", "project ideas", "what should i build"],
            Intent::NewProjectIdeas,
        ),
        Rule::new(&["learning", "roadmap", "improve skills"], Intent::LearningRoadmap),
        Rule::new(&["career", "interests", "what roles"], Intent::CareerInterests),
        Rule::new(
            &["recruiter", "hiring", "job", "interview", "pitch"],
            Intent::RecruiterPitch,
        ),
        Rule::new(&["ai/ml", "ai specialist", "ml engineer"], Intent::AiMlProfile),
        Rule::new(
            &["fullstack", "full-stack", "backend", "frontend"],
            Intent::FullStackProfile,
        ),
    ]
}

/// Rule-based responder over a shared, read-only knowledge base.
#[derive(Debug, Clone)]
pub struct IntentRouter {
    knowledge: Arc<KnowledgeBase>,
    rules: Vec<Rule>,
}

impl IntentRouter {
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        Self::with_rules(knowledge, default_rules())
    }

    pub fn with_rules(knowledge: Arc<KnowledgeBase>, rules: Vec<Rule>) -> Self {
        Self { knowledge, rules }
    }

    /// The intent of the first matching rule, if any.
    pub fn classify(&self, query: &str) -> Option<Intent> {
        self.first_match(&query.to_lowercase())
    }

    fn first_match(&self, query_lower: &str) -> Option<Intent> {
        self.rules
            .iter()
            .find(|rule| rule.matches(query_lower))
            .map(|rule| rule.intent)
    }

    /// Answers a free-text query. Never fails: unmatched queries get the fallback text.
    pub fn resolve(&self, query: &str) -> String {
        let query_lower = query.to_lowercase();
        match self.first_match(&query_lower) {
            Some(intent) => {
                debug!(?intent, "Rule matched");
                self.answer(intent, &query_lower)
            }
            None => {
                debug!("No rule matched, returning fallback");
                FALLBACK_ANSWER.to_string()
            }
        }
    }

    fn answer(&self, intent: Intent, query_lower: &str) -> String {
        let kb = &self.knowledge;
        match intent {
            Intent::AboutDeveloper => formatter::developer_overview(kb.developer()),
            Intent::ProjectTechStack => match kb.project_mentioned_in(query_lower) {
                Some(project) => formatter::tech_stack(project),
                None => TECH_STACK_CLARIFICATION.to_string(),
            },
            Intent::Skills => formatter::skills_summary(kb.skill_categories()),
            Intent::Expertise => formatter::expertise_areas(kb.expertise_areas()),
            Intent::ProjectList => formatter::project_list(kb.projects()),
            Intent::ProjectDetail(name) => self.project_detail(name),
            Intent::ImprovementSuggestions => match kb.project_mentioned_in(query_lower) {
                Some(project) => formatter::improvement_suggestions(project),
                None => IMPROVEMENT_CLARIFICATION.to_string(),
            },
            Intent::NewProjectIdeas => NEW_PROJECT_IDEAS.to_string(),
            Intent::LearningRoadmap => roadmap_focus_for(query_lower).roadmap().to_string(),
            Intent::CareerInterests => formatter::career_interests(kb.career_interests()),
            Intent::RecruiterPitch => formatter::recruiter_pitch(kb.developer()),
            Intent::AiMlProfile => AI_ML_PROFILE.to_string(),
            Intent::FullStackProfile => FULLSTACK_PROFILE.to_string(),
        }
    }

    /// Full details for a project looked up by name, or the not-found message.
    fn project_detail(&self, name: &str) -> String {
        match self.knowledge.project_by_name(name) {
            Some(project) => formatter::project_detail(project),
            None => formatter::project_not_found(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::fixtures::knowledge_base;
    use crate::rules::catalog::{GENERAL_ROADMAP, ML_ROADMAP, NLP_ROADMAP};

    fn router() -> IntentRouter {
        IntentRouter::new(Arc::new(knowledge_base()))
    }

    #[test]
    fn test_tech_stack_query_names_project_and_stack() {
        let answer = router().resolve("What's your tech stack for SmartLeaf?");
        assert!(answer.contains("SmartLeaf"));
        assert!(answer.contains("TensorFlow, Keras"));
    }

    #[test]
    fn test_tech_stack_without_project_asks_for_clarification() {
        assert_eq!(
            router().resolve("what is the tech stack?"),
            TECH_STACK_CLARIFICATION
        );
    }

    #[test]
    fn test_nested_roadmap_picks_nlp() {
        assert_eq!(router().resolve("roadmap for nlp"), NLP_ROADMAP);
    }

    #[test]
    fn test_nested_roadmap_first_match_and_default() {
        let r = router();
        // "machine learning" and "language" both present: ml is checked first
        assert_eq!(r.resolve("learning roadmap: machine learning or language?"), ML_ROADMAP);
        assert_eq!(r.resolve("show me a roadmap"), GENERAL_ROADMAP);
    }

    #[test]
    fn test_unmatched_query_returns_fallback_verbatim() {
        let r = router();
        assert_eq!(r.resolve("xyz"), FALLBACK_ANSWER);
        assert_eq!(r.resolve(""), FALLBACK_ANSWER);
        assert_eq!(r.classify("qwerty"), None);
    }

    #[test]
    fn test_first_match_wins_over_later_rules() {
        let r = router();
        // "about" (rule 1) beats "skills" (rule 3)
        let answer = r.resolve("Tell me about your skills");
        assert_eq!(answer, formatter::developer_overview(knowledge_base().developer()));
        // "skills" (rule 3) beats "career" (rule 14)
        assert_eq!(r.classify("skills for a career"), Some(Intent::Skills));
        // "better" (rule 11) beats "learning" (rule 13)
        assert_eq!(
            r.classify("better learning habits"),
            Some(Intent::ImprovementSuggestions)
        );
        // "improve skills" is shadowed by the "skills" trigger of rule 3
        assert_eq!(r.classify("how can I improve skills"), Some(Intent::Skills));
    }

    #[test]
    fn test_each_rule_reachable_when_higher_rules_silent() {
        let r = router();
        let cases = [
            ("who are you", Intent::AboutDeveloper),
            ("built with what?", Intent::ProjectTechStack),
            ("list your technologies", Intent::Skills),
            ("what is your specialization", Intent::Expertise),
            ("show the portfolio", Intent::ProjectList),
            ("plant disease", Intent::ProjectDetail("SmartLeaf")),
            ("air quality", Intent::ProjectDetail("BreatheEasy")),
            ("school system", Intent::ProjectDetail("Student Management System")),
            ("movie picks", Intent::ProjectDetail("Movie Recommendation System")),
            ("grocery list", Intent::ProjectDetail("Smart Grocery AI")),
            ("enhance it", Intent::ImprovementSuggestions),
            ("what should i build next", Intent::NewProjectIdeas),
            ("learning path", Intent::LearningRoadmap),
            ("what roles fit", Intent::CareerInterests),
            ("a recruiter here", Intent::RecruiterPitch),
            ("ai/ml", Intent::AiMlProfile),
            ("frontend work", Intent::FullStackProfile),
        ];
        for (query, expected) in cases {
            assert_eq!(r.classify(query), Some(expected), "query: {query}");
        }
    }

    #[test]
    fn test_resolve_equals_handler_output() {
        let r = router();
        let kb = knowledge_base();
        assert_eq!(
            r.resolve("list your technologies"),
            formatter::skills_summary(kb.skill_categories())
        );
        assert_eq!(r.resolve("show the portfolio"), formatter::project_list(kb.projects()));
        assert_eq!(
            r.resolve("plant disease"),
            formatter::project_detail(kb.project_by_id(1).unwrap())
        );
        assert_eq!(r.resolve("what should i build next"), NEW_PROJECT_IDEAS);
        assert_eq!(r.resolve("frontend work"), FULLSTACK_PROFILE);
    }

    #[test]
    fn test_project_detail_for_absent_project() {
        // No "Movie Recommendation System" in the fixture
        assert_eq!(
            router().resolve("movie night"),
            "I don't have information about a project called 'Movie Recommendation System'."
        );
    }

    #[test]
    fn test_improvement_with_named_project() {
        let answer = router().resolve("how would you improve Weather Oracle?");
        assert!(answer.starts_with("**Improvement Suggestions for Weather Oracle:**"));
        assert!(answer.contains("1. Write comprehensive documentation"));
        // Project names caught by an earlier detail rule never reach this rule
        assert_eq!(
            router().classify("how would you enhance breatheasy"),
            Some(Intent::ProjectDetail("BreatheEasy"))
        );
        assert_eq!(
            router().resolve("what could be better?"),
            IMPROVEMENT_CLARIFICATION
        );
    }

    #[test]
    fn test_custom_rule_order_changes_outcome() {
        let kb = Arc::new(knowledge_base());
        let rules = vec![
            Rule::new(&["career"], Intent::CareerInterests),
            Rule::new(&["skills"], Intent::Skills),
        ];
        let r = IntentRouter::with_rules(kb, rules);
        assert_eq!(r.classify("skills for a career"), Some(Intent::CareerInterests));
    }

    #[test]
    fn test_roadmap_focus_for_query() {
        assert_eq!(roadmap_focus_for("web roadmap"), RoadmapFocus::FullStack);
        assert_eq!(roadmap_focus_for("roadmap please"), RoadmapFocus::General);
    }
}
