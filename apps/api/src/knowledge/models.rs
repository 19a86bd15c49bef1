use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Public profile of the developer the portfolio belongs to.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Developer {
    pub name: Option<String>,
    pub alias: Option<String>,
    pub role: Option<String>,
    /// External profile link.
    pub github: Option<String>,
    pub summary: Option<String>,
}

/// Items listed under a skill category: either a list of technologies or a single value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SkillItems {
    List(Vec<String>),
    Scalar(serde_json::Value),
}

impl SkillItems {
    /// Renders the items as a single line: lists are comma-joined, scalars printed as-is.
    pub fn joined(&self) -> String {
        match self {
            SkillItems::List(items) => items.join(", "),
            SkillItems::Scalar(serde_json::Value::String(s)) => s.clone(),
            SkillItems::Scalar(other) => other.to_string(),
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            SkillItems::List(items) => Some(items),
            SkillItems::Scalar(_) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SkillCategory {
    /// Category key exactly as stored in the source, e.g. `machine_learning`.
    pub key: String,
    pub items: SkillItems,
}

impl SkillCategory {
    /// Display label: underscores become spaces, each word title-cased.
    /// The stored key is never modified.
    pub fn label(&self) -> String {
        title_case(&self.key.replace('_', " "))
    }
}

/// Title-cases text the way word-initial capitalization is usually done for labels:
/// a letter following a non-letter is upper-cased, every other letter lower-cased.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_is_letter = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub id: i64,
    pub name: Option<String>,
    pub subtitle: Option<String>,
    #[serde(rename = "type")]
    pub project_type: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tech_stack: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub features: Vec<String>,
    pub impact: Option<String>,
    pub key_learning: Option<String>,
    pub status: Option<String>,
}

impl Project {
    pub fn name_or_empty(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Experience {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub career_interests: Vec<String>,
    pub current_focus: Option<String>,
}

/// Raw shape of the portfolio source document.
/// Every top-level section is optional and defaults to empty.
#[derive(Debug, Default, Deserialize)]
pub struct PortfolioDocument {
    #[serde(default)]
    pub developer: Developer,
    #[serde(default, deserialize_with = "ordered_skills")]
    pub skills: Vec<SkillCategory>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub experience: Experience,
}

/// Reads an explicit `null` list the same as a missing one.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserializes the `skills` object into categories, keeping source order.
fn ordered_skills<'de, D>(deserializer: D) -> Result<Vec<SkillCategory>, D::Error>
where
    D: Deserializer<'de>,
{
    struct SkillsVisitor;

    impl<'de> Visitor<'de> for SkillsVisitor {
        type Value = Vec<SkillCategory>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a mapping of skill category to a list or a scalar")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut categories = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((key, items)) = map.next_entry::<String, SkillItems>()? {
                categories.push(SkillCategory { key, items });
            }
            Ok(categories)
        }
    }

    deserializer.deserialize_map(SkillsVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case_matches_label_convention() {
        assert_eq!(title_case("machine learning"), "Machine Learning");
        assert_eq!(title_case("WEB dev"), "Web Dev");
        assert_eq!(title_case("ci/cd tools"), "Ci/Cd Tools");
    }

    #[test]
    fn test_skill_label_does_not_touch_key() {
        let cat = SkillCategory {
            key: "programming_languages".to_string(),
            items: SkillItems::List(vec!["Python".to_string()]),
        };
        assert_eq!(cat.label(), "Programming Languages");
        assert_eq!(cat.key, "programming_languages");
    }

    #[test]
    fn test_skills_keep_source_order() {
        let json = r#"{
            "skills": {
                "zeta": ["Z"],
                "alpha": ["A", "B"],
                "years_coding": 3
            }
        }"#;
        let doc: PortfolioDocument = serde_json::from_str(json).unwrap();
        let keys: Vec<_> = doc.skills.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "years_coding"]);
        assert_eq!(doc.skills[1].items.joined(), "A, B");
        assert_eq!(doc.skills[2].items.joined(), "3");
        assert!(doc.skills[2].items.as_list().is_none());
    }

    #[test]
    fn test_project_type_field_is_renamed() {
        let json = r#"{"id": 7, "name": "X", "type": "Web App"}"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.project_type.as_deref(), Some("Web App"));
        assert!(project.tech_stack.is_empty());
        assert!(project.features.is_empty());
    }

    #[test]
    fn test_project_without_id_is_rejected() {
        let json = r#"{"name": "No Id"}"#;
        assert!(serde_json::from_str::<Project>(json).is_err());
    }
}
