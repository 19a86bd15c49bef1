//! Template Formatter — renders knowledge fragments as markdown answer text.
//!
//! Every function here is total: missing data turns into placeholder text,
//! never into an error, so every answer keeps the same shape.

use crate::knowledge::models::{Developer, Project, SkillCategory};
use crate::rules::catalog::{improvements_for, CAREER_RATIONALE, RECRUITER_PITCH_BODY};

const PLACEHOLDER: &str = "N/A";

fn or_placeholder(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or(PLACEHOLDER)
}

fn bullets(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("• {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn developer_overview(dev: &Developer) -> String {
    format!(
        "Hi! I'm **{}** (also known as **{}**). \n\n\
         **Role:** {}\n\n\
         **About:** {}\n\n\
         **GitHub:** {}",
        dev.name.as_deref().unwrap_or("Unknown"),
        or_placeholder(dev.alias.as_deref()),
        or_placeholder(dev.role.as_deref()),
        or_placeholder(dev.summary.as_deref()),
        or_placeholder(dev.github.as_deref()),
    )
}

/// One line per category: list categories comma-joined, scalar categories verbatim.
pub fn skills_summary(categories: &[SkillCategory]) -> String {
    if categories.is_empty() {
        return "I don't have skills information available.".to_string();
    }

    let mut summary = String::from("**Technical Skills:**\n\n");
    for category in categories {
        summary.push_str(&format!("**{}:** {}\n", category.label(), category.items.joined()));
    }
    summary
}

pub fn expertise_areas(areas: &[String]) -> String {
    if areas.is_empty() {
        return "I don't have expertise area information.".to_string();
    }
    format!("**Areas of Expertise:**\n\n{}", bullets(areas))
}

/// One line per project (`id. name – subtitle`), ordered by id.
pub fn project_list(projects: &[Project]) -> String {
    if projects.is_empty() {
        return "No projects found.".to_string();
    }

    let mut sorted: Vec<&Project> = projects.iter().collect();
    sorted.sort_by_key(|p| p.id);

    let mut list = String::from("**Portfolio Projects:**\n\n");
    for p in sorted {
        list.push_str(&format!(
            "{}. **{}** – {}\n",
            p.id,
            p.name.as_deref().unwrap_or("Unknown"),
            p.subtitle.as_deref().unwrap_or("")
        ));
    }
    list
}

pub fn project_detail(project: &Project) -> String {
    let tech_stack = if project.tech_stack.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        project.tech_stack.join(", ")
    };
    let features = if project.features.is_empty() {
        format!("• {PLACEHOLDER}")
    } else {
        bullets(&project.features)
    };

    format!(
        "**{}**\n\n\
         *{}*\n\n\
         **Type:** {}\n\n\
         **Description:** {}\n\n\
         **Tech Stack:** {}\n\n\
         **Key Features:**\n{}\n\n\
         **Impact:** {}\n\n\
         **Key Learning:** {}\n\n\
         **Status:** {}",
        project.name.as_deref().unwrap_or("Unknown"),
        or_placeholder(project.subtitle.as_deref()),
        or_placeholder(project.project_type.as_deref()),
        or_placeholder(project.description.as_deref()),
        tech_stack,
        features,
        or_placeholder(project.impact.as_deref()),
        or_placeholder(project.key_learning.as_deref()),
        or_placeholder(project.status.as_deref()),
    )
}

pub fn project_not_found(name: &str) -> String {
    format!("I don't have information about a project called '{name}'.")
}

pub fn tech_stack(project: &Project) -> String {
    let name = project.name.as_deref().unwrap_or("Project");
    if project.tech_stack.is_empty() {
        return format!("Tech stack information not available for {name}.");
    }
    format!("**{name} Tech Stack:**\n\n{}", project.tech_stack.join(", "))
}

/// Numbered suggestions: curated when the project name has an entry, generic otherwise.
pub fn improvement_suggestions(project: &Project) -> String {
    let mut suggestions = format!(
        "**Improvement Suggestions for {}:**\n\n",
        project.name.as_deref().unwrap_or("this project")
    );
    for (i, suggestion) in improvements_for(project.name_or_empty()).iter().enumerate() {
        suggestions.push_str(&format!("{}. {suggestion}\n", i + 1));
    }
    suggestions
}

pub fn career_interests(interests: &[String]) -> String {
    if interests.is_empty() {
        return "I don't have career interest information.".to_string();
    }
    format!(
        "**Career Interests:**\n\n{}\n{CAREER_RATIONALE}",
        bullets(interests)
    )
}

pub fn recruiter_pitch(dev: &Developer) -> String {
    format!(
        "**Hi! I'm {}.**\n\n{RECRUITER_PITCH_BODY}",
        dev.name.as_deref().unwrap_or("the developer")
    )
}
