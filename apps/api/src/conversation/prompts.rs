// Prompt text for the LLM-backed responder.
// The system prompt is a pure function of the knowledge base; one-shot
// templates use `{placeholder}` substitution before sending.

use serde::{Deserialize, Serialize};

use crate::knowledge::models::Project;
use crate::knowledge::KnowledgeBase;

/// Depth requested for a concept explanation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConceptLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl ConceptLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ConceptLevel::Beginner => "beginner",
            ConceptLevel::Intermediate => "intermediate",
            ConceptLevel::Advanced => "advanced",
        }
    }
}

/// Responsibilities, guidelines and tone appended after the portfolio data.
pub const ASSISTANT_GUIDELINES: &str = "YOUR RESPONSIBILITIES:
1. Answer questions about projects with accurate technical details
2. Explain code examples and architectural decisions
3. Provide recruiter-friendly professional summaries
4. Suggest improvements and new project ideas
5. Explain learning concepts in simple, clear language
6. Generate code examples when requested
7. Provide learning roadmaps for skill development
8. Be personable, professional, and helpful

GUIDELINES:
- Speak in first person as the developer
- Use the provided portfolio data as your source of truth
- When asked about code, provide working, well-documented examples
- For improvements, give specific, actionable suggestions
- Maintain a friendly, mentor-like tone
- If you don't know specific details, say so and provide general expertise
- Always cite relevant projects or technologies from the portfolio
- Help recruiters understand the developer's capabilities
- Be enthusiastic about discussing projects and learning

TONE: Professional but friendly, mentor-style, encouraging, knowledgeable.";

/// Replace `{language}` and `{topic}`.
pub const CODE_EXAMPLE_PROMPT_TEMPLATE: &str =
    "Generate a {language} code example for: {topic}. Make it production-ready and well-documented.";

/// Replace `{project}`.
pub const PROJECT_SUMMARY_PROMPT_TEMPLATE: &str = "Provide a detailed summary of the {project} project \
    including its purpose, tech stack, key features, and what was learned.";

pub const RECRUITER_PITCH_PROMPT: &str = "Generate a compelling 2-3 paragraph pitch for a recruiter \
    explaining my background, skills, and what makes me a great fit for a team.";

/// Replace `{concept}` and `{level}`.
pub const EXPLAIN_CONCEPT_PROMPT_TEMPLATE: &str =
    "Explain the concept '{concept}' at a {level} level, with examples if relevant.";

fn project_block(p: &Project) -> String {
    format!(
        "\n**{}**\n\
         - Subtitle: {}\n\
         - Type: {}\n\
         - Description: {}\n\
         - Tech Stack: {}\n\
         - Features: {}\n\
         - Impact: {}\n\
         - Key Learning: {}\n\
         - Status: {}\n",
        p.name.as_deref().unwrap_or("Unknown"),
        p.subtitle.as_deref().unwrap_or(""),
        p.project_type.as_deref().unwrap_or(""),
        p.description.as_deref().unwrap_or(""),
        p.tech_stack.join(", "),
        p.features.join(", "),
        p.impact.as_deref().unwrap_or(""),
        p.key_learning.as_deref().unwrap_or(""),
        p.status.as_deref().unwrap_or(""),
    )
}

/// Serializes the whole knowledge base plus the fixed guidelines into one instruction block.
/// Deterministic: the same knowledge base always yields the same prompt.
pub fn build_system_prompt(kb: &KnowledgeBase) -> String {
    let dev = kb.developer();

    let skills_text = kb
        .skill_categories()
        .iter()
        .map(|c| format!("- {}: {}", c.label(), c.items.joined()))
        .collect::<Vec<_>>()
        .join("\n");

    let projects_text = kb
        .projects()
        .iter()
        .map(project_block)
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are an AI assistant representing {owner}'s GitHub portfolio and professional profile.

DEVELOPER PROFILE:
- Name: {name}
- Alias: {alias}
- Role: {role}
- GitHub: {github}
- Summary: {summary}

TECHNICAL SKILLS:
{skills_text}

PORTFOLIO PROJECTS:
{projects_text}

CAREER INTERESTS:
{interests}

CURRENT FOCUS:
{focus}

{ASSISTANT_GUIDELINES}",
        owner = dev.name.as_deref().unwrap_or("a developer"),
        name = dev.name.as_deref().unwrap_or("Unknown"),
        alias = dev.alias.as_deref().unwrap_or("N/A"),
        role = dev.role.as_deref().unwrap_or("N/A"),
        github = dev.github.as_deref().unwrap_or("N/A"),
        summary = dev.summary.as_deref().unwrap_or("N/A"),
        interests = kb.career_interests().join(", "),
        focus = kb.current_focus().unwrap_or("N/A"),
    )
}
