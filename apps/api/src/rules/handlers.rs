//! Read-only knowledge endpoints. Each is a direct pass-through to the
//! knowledge base, formatter or roadmap catalog.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::knowledge::models::{Developer, Project, SkillCategory};
use crate::rules::catalog::RoadmapFocus;
use crate::rules::formatter;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DeveloperInfoResponse {
    pub developer: Developer,
    pub overview: String,
}

#[derive(Debug, Serialize)]
pub struct SkillsResponse {
    pub summary: String,
    pub categories: Vec<SkillCategory>,
}

#[derive(Debug, Serialize)]
pub struct ProjectSummary {
    pub id: i64,
    pub name: Option<String>,
    pub subtitle: Option<String>,
    #[serde(rename = "type")]
    pub project_type: Option<String>,
}

impl From<&Project> for ProjectSummary {
    fn from(p: &Project) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            subtitle: p.subtitle.clone(),
            project_type: p.project_type.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProjectFilter {
    pub tech: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RoadmapResponse {
    pub focus: RoadmapFocus,
    pub roadmap: &'static str,
}

/// GET /api/info/developer
pub async fn handle_developer_info(State(state): State<AppState>) -> Json<DeveloperInfoResponse> {
    let developer = state.knowledge.developer();
    Json(DeveloperInfoResponse {
        developer: developer.clone(),
        overview: formatter::developer_overview(developer),
    })
}

/// GET /api/info/skills
pub async fn handle_skills(State(state): State<AppState>) -> Json<SkillsResponse> {
    let categories = state.knowledge.skill_categories();
    Json(SkillsResponse {
        summary: formatter::skills_summary(categories),
        categories: categories.to_vec(),
    })
}

/// GET /api/projects
///
/// `?tech=` restricts the list to projects whose tech stack mentions the technology.
pub async fn handle_list_projects(
    State(state): State<AppState>,
    Query(filter): Query<ProjectFilter>,
) -> Json<Vec<ProjectSummary>> {
    let projects: Vec<ProjectSummary> = match filter.tech.as_deref().map(str::trim) {
        Some(tech) if !tech.is_empty() => state
            .knowledge
            .projects_using(tech)
            .into_iter()
            .map(ProjectSummary::from)
            .collect(),
        _ => state
            .knowledge
            .projects()
            .iter()
            .map(ProjectSummary::from)
            .collect(),
    };
    Json(projects)
}

/// GET /api/projects/:id
pub async fn handle_get_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Project>, AppError> {
    state
        .knowledge
        .project_by_id(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Project {id} not found")))
}

/// GET /api/roadmap/:focus
pub async fn handle_roadmap(Path(focus): Path<String>) -> Json<RoadmapResponse> {
    let focus = RoadmapFocus::parse(&focus);
    Json(RoadmapResponse {
        focus,
        roadmap: focus.roadmap(),
    })
}
