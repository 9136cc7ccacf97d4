use std::{slice::Iter, sync::Arc};

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub title: String,
    pub description: String,
    pub tech_stack: Vec<String>,
    pub link: String,
    // Carried for screenshots; cards don't show it yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ProjectRecord {
    pub fn new(title: &str, description: &str, tech_stack: &[&str], link: &str) -> Self {
        ProjectRecord {
            title: title.to_string(),
            description: description.to_string(),
            tech_stack: tech_stack.iter().map(|tech| tech.to_string()).collect(),
            link: link.to_string(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: &str) -> Self {
        self.image = Some(image.to_string());
        self
    }
}

/// Ordered, read-only list of projects shown on the page.
///
/// Cloning shares the same records, so handlers can hold their own copy.
#[derive(Clone, Debug, PartialEq)]
pub struct Catalog {
    records: Arc<[ProjectRecord]>,
}

impl Catalog {
    pub fn new(records: Vec<ProjectRecord>) -> Self {
        Catalog {
            records: records.into(),
        }
    }

    /// The placeholder entry the page ships with until real projects are listed.
    pub fn builtin() -> Self {
        Catalog::new(vec![ProjectRecord::new(
            "Project Title",
            "Project description goes here. Explain what the project does and what technologies you used.",
            &["Tech1", "Tech2", "Tech3"],
            "https://github.com/your-username/project-repo",
        )
        .with_image("https://via.placeholder.com/300x200")])
    }

    pub fn records(&self) -> &[ProjectRecord] {
        &self.records
    }

    pub fn iter(&self) -> Iter<'_, ProjectRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a ProjectRecord;
    type IntoIter = Iter<'a, ProjectRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for Catalog {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.records().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<ProjectRecord>::deserialize(deserializer).map(Catalog::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_keeps_declaration_order() {
        let catalog = Catalog::new(vec![
            ProjectRecord::new("B", "d", &[], "https://b"),
            ProjectRecord::new("A", "d", &[], "https://a"),
            ProjectRecord::new("B", "d", &[], "https://b"),
        ]);
        let titles: Vec<&str> = catalog.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["B", "A", "B"]);
        // Iterating twice yields the same sequence.
        assert_eq!(catalog.iter().count(), 3);
    }

    #[test]
    fn record_uses_camel_case_tech_stack() {
        let json = r#"{"title":"A","description":"d","techStack":["X","X"],"link":"https://x"}"#;
        let record: ProjectRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.tech_stack, ["X", "X"]);
        assert_eq!(record.image, None);

        let back = serde_json::to_value(&record).unwrap();
        assert!(back.get("techStack").is_some());
        assert!(back.get("image").is_none());
    }

    #[test]
    fn record_without_tech_stack_is_rejected() {
        let json = r#"{"title":"A","description":"d","link":"https://x"}"#;
        assert!(serde_json::from_str::<ProjectRecord>(json).is_err());
    }

    #[test]
    fn builtin_catalog_has_placeholder_project() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 1);
        let project = &catalog.records()[0];
        assert_eq!(project.tech_stack, ["Tech1", "Tech2", "Tech3"]);
        assert!(project.image.is_some());
    }

    #[test]
    fn clones_share_records() {
        let catalog = Catalog::builtin();
        let copy = catalog.clone();
        assert!(std::ptr::eq(catalog.records(), copy.records()));
    }
}
