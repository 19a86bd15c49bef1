//! Knowledge Base — the read-only, in-memory view of the portfolio document.
//!
//! Built once at startup and shared behind an `Arc`. Every lookup returns an
//! `Option`; only loading can fail.

pub mod models;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use models::{Developer, Experience, PortfolioDocument, Project, SkillCategory};

/// Skill category whose items are reported as "areas of expertise".
const EXPERTISE_CATEGORY: &str = "expertise_areas";

/// Why a knowledge base could not be constructed. Both variants are fatal at startup.
#[derive(Debug, Error)]
pub enum DataUnavailable {
    #[error("portfolio source not found at {path}: {source}")]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed portfolio source {origin}: {reason}")]
    MalformedSource { origin: String, reason: String },
}

#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    developer: Developer,
    skills: Vec<SkillCategory>,
    /// Insertion order of the source document.
    projects: Vec<Project>,
    /// Project id -> index into `projects`.
    by_id: HashMap<i64, usize>,
    experience: Experience,
}

impl KnowledgeBase {
    /// Reads and validates the portfolio document at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataUnavailable> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| DataUnavailable::SourceNotFound {
            path: path.to_path_buf(),
            source,
        })?;
        let kb = Self::from_json_str(&raw, &path.display().to_string())?;
        info!(
            "Knowledge base loaded from {}: {} projects, {} skill categories",
            path.display(),
            kb.projects.len(),
            kb.skills.len()
        );
        Ok(kb)
    }

    /// Parses an in-memory JSON document. `origin` names the source in error messages.
    pub fn from_json_str(raw: &str, origin: &str) -> Result<Self, DataUnavailable> {
        let document: PortfolioDocument =
            serde_json::from_str(raw).map_err(|e| DataUnavailable::MalformedSource {
                origin: origin.to_string(),
                reason: e.to_string(),
            })?;
        Self::from_document(document, origin)
    }

    pub fn from_document(document: PortfolioDocument, origin: &str) -> Result<Self, DataUnavailable> {
        let mut by_id = HashMap::with_capacity(document.projects.len());
        for (index, project) in document.projects.iter().enumerate() {
            if by_id.insert(project.id, index).is_some() {
                return Err(DataUnavailable::MalformedSource {
                    origin: origin.to_string(),
                    reason: format!("duplicate project id {}", project.id),
                });
            }
        }

        Ok(Self {
            developer: document.developer,
            skills: document.skills,
            projects: document.projects,
            by_id,
            experience: document.experience,
        })
    }

    pub fn developer(&self) -> &Developer {
        &self.developer
    }

    pub fn skill_categories(&self) -> &[SkillCategory] {
        &self.skills
    }

    /// All projects in source order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn career_interests(&self) -> &[String] {
        &self.experience.career_interests
    }

    pub fn current_focus(&self) -> Option<&str> {
        self.experience.current_focus.as_deref()
    }

    /// Items of the `expertise_areas` skill category, empty if absent or scalar.
    pub fn expertise_areas(&self) -> &[String] {
        self.skills
            .iter()
            .find(|c| c.key == EXPERTISE_CATEGORY)
            .and_then(|c| c.items.as_list())
            .unwrap_or(&[])
    }

    pub fn project_by_id(&self, id: i64) -> Option<&Project> {
        self.by_id.get(&id).map(|&index| &self.projects[index])
    }

    /// Case-insensitive substring match of `fragment` against project names.
    /// Names are not unique: the first match in source order wins.
    pub fn project_by_name(&self, fragment: &str) -> Option<&Project> {
        let needle = fragment.to_lowercase();
        self.projects
            .iter()
            .find(|p| p.name_or_empty().to_lowercase().contains(&needle))
    }

    /// First project (source order) whose lower-cased name occurs in `query_lower`.
    /// Unnamed projects never match.
    pub fn project_mentioned_in(&self, query_lower: &str) -> Option<&Project> {
        self.projects.iter().find(|p| match p.name.as_deref() {
            Some(name) if !name.is_empty() => query_lower.contains(&name.to_lowercase()),
            _ => false,
        })
    }

    /// Projects whose tech stack has an entry containing `technology` (case-insensitive).
    pub fn projects_using(&self, technology: &str) -> Vec<&Project> {
        let needle = technology.to_lowercase();
        self.projects
            .iter()
            .filter(|p| p.tech_stack.iter().any(|t| t.to_lowercase().contains(&needle)))
            .collect()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::{knowledge_base, PORTFOLIO_JSON};
    use super::*;
    use std::io::Write;

    #[test]
    fn test_project_by_id_returns_matching_id() {
        let kb = knowledge_base();
        for project in kb.projects() {
            assert_eq!(kb.project_by_id(project.id).unwrap().id, project.id);
        }
        assert!(kb.project_by_id(3).is_none());
        assert!(kb.project_by_id(-1).is_none());
    }

    #[test]
    fn test_project_by_name_is_case_insensitive_substring() {
        let kb = knowledge_base();
        assert_eq!(kb.project_by_name("smartleaf").unwrap().id, 1);
        assert_eq!(kb.project_by_name("BREATHE").unwrap().id, 2);
        assert!(kb.project_by_name("quantum").is_none());
    }

    #[test]
    fn test_project_by_name_first_match_wins() {
        let kb = knowledge_base();
        // "smart" occurs in both SmartLeaf and Smart Grocery AI
        assert_eq!(kb.project_by_name("smart").unwrap().id, 1);
    }

    #[test]
    fn test_project_mentioned_in_query() {
        let kb = knowledge_base();
        let p = kb.project_mentioned_in("how was smart grocery ai built?").unwrap();
        assert_eq!(p.id, 5);
        assert!(kb.project_mentioned_in("nothing here").is_none());
    }

    #[test]
    fn test_projects_using_technology() {
        let kb = knowledge_base();
        let names: Vec<_> = kb
            .projects_using("scikit")
            .iter()
            .map(|p| p.name_or_empty())
            .collect();
        assert_eq!(names, vec!["Smart Grocery AI"]);
        assert!(kb.projects_using("rust").is_empty());
    }

    #[test]
    fn test_expertise_and_experience_accessors() {
        let kb = knowledge_base();
        assert_eq!(kb.expertise_areas().len(), 2);
        assert_eq!(kb.career_interests()[0], "ML Engineer");
        assert_eq!(kb.current_focus(), Some("Deep learning and NLP"));
        assert_eq!(kb.developer().name.as_deref(), Some("Nishan Bhurtel"));
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let kb = KnowledgeBase::from_json_str(r#"{"developer": {"name": "A"}}"#, "inline").unwrap();
        assert!(kb.projects().is_empty());
        assert!(kb.skill_categories().is_empty());
        assert!(kb.career_interests().is_empty());
        assert!(kb.current_focus().is_none());
        assert!(kb.expertise_areas().is_empty());
    }

    #[test]
    fn test_wrong_shape_is_malformed() {
        let err = KnowledgeBase::from_json_str(r#"{"projects": {"id": 1}}"#, "inline").unwrap_err();
        assert!(matches!(err, DataUnavailable::MalformedSource { .. }));
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let err = KnowledgeBase::from_json_str("{not json", "inline").unwrap_err();
        assert!(matches!(err, DataUnavailable::MalformedSource { .. }));
    }

    #[test]
    fn test_duplicate_project_id_is_malformed() {
        let json = r#"{"projects": [{"id": 1, "name": "A"}, {"id": 1, "name": "B"}]}"#;
        let err = KnowledgeBase::from_json_str(json, "inline").unwrap_err();
        match err {
            DataUnavailable::MalformedSource { reason, .. } => {
                assert!(reason.contains("duplicate project id 1"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_missing_file_is_source_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = KnowledgeBase::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, DataUnavailable::SourceNotFound { .. }));
    }

    #[test]
    fn test_load_reads_document_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(PORTFOLIO_JSON.as_bytes()).unwrap();
        let kb = KnowledgeBase::load(file.path()).unwrap();
        assert_eq!(kb.projects().len(), 4);
    }

    #[test]
    fn test_null_lists_load_as_empty() {
        let raw = r#"{
            "projects": [{"id": 1, "name": "A", "tech_stack": null, "features": null}],
            "experience": {"career_interests": null}
        }"#;
        let kb = KnowledgeBase::from_json_str(raw, "nulls").unwrap();
        let project = kb.project_by_id(1).unwrap();
        assert!(project.tech_stack.is_empty());
        assert!(project.features.is_empty());
        assert!(kb.career_interests().is_empty());

        let detail = crate::rules::formatter::project_detail(project);
        assert!(detail.contains("**Tech Stack:** N/A"));
        assert!(detail.contains("**Key Features:**\n• N/A"));
    }

    #[test]
    fn test_non_list_tech_stack_is_malformed() {
        let raw = r#"{"projects": [{"id": 1, "tech_stack": "TensorFlow"}]}"#;
        assert!(matches!(
            KnowledgeBase::from_json_str(raw, "bad"),
            Err(DataUnavailable::MalformedSource { .. })
        ));
    }
}
