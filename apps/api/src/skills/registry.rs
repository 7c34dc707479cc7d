//! Role Skill Registry — read-only role → required skills mapping, loaded once at startup.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::skills::normalizer::normalize;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Failed to read role skills file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Role skills file {path} is not a JSON object of string arrays: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Role names are stored lower-cased; skills are stored normalized.
#[derive(Debug, Default)]
pub struct RoleSkillRegistry {
    roles: HashMap<String, Vec<String>>,
}

impl RoleSkillRegistry {
    /// Loads the mapping from a JSON file: `{"data scientist": ["python", ...], ...}`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let registry = Self::from_json_str(&raw).map_err(|source| RegistryError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(
            "Loaded {} roles from {}",
            registry.roles.len(),
            path.display()
        );
        Ok(registry)
    }

    /// Keys that differ only by case collapse to one role. The key already written
    /// in lower case wins; otherwise the lexicographically smallest original key.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let raw: HashMap<String, Vec<String>> = serde_json::from_str(json)?;

        let mut entries: Vec<(String, String, Vec<String>)> = raw
            .into_iter()
            .map(|(original, skills)| (original.trim().to_lowercase(), original, skills))
            .collect();
        entries.sort_by(|(a_key, a_orig, _), (b_key, b_orig, _)| {
            (a_key, a_orig.trim() != a_key.as_str(), a_orig).cmp(&(
                b_key,
                b_orig.trim() != b_key.as_str(),
                b_orig,
            ))
        });

        let mut roles = HashMap::with_capacity(entries.len());
        for (key, original, skills) in entries {
            if roles.contains_key(&key) {
                warn!("Role '{original}' duplicates '{key}' ignoring case; keeping the first");
                continue;
            }
            roles.insert(key, normalize_skills(skills));
        }
        Ok(Self { roles })
    }

    /// Required skills for `role`, matched case-insensitively.
    /// Unknown roles yield an empty slice.
    pub fn lookup(&self, role: &str) -> &[String] {
        self.roles
            .get(&role.trim().to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All known role names, sorted.
    pub fn roles(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.roles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

/// Normalizes, drops blanks and keeps the first occurrence of each skill.
fn normalize_skills(skills: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(skills.len());
    for skill in skills {
        let skill = normalize(&skill);
        if !skill.is_empty() && !out.contains(&skill) {
            out.push(skill);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const ROLES_JSON: &str = r#"{
        "Data Scientist": ["Python", " SQL ", "Deep Learning", "python"],
        "backend engineer": ["Rust", "PostgreSQL", "Docker."]
    }"#;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = RoleSkillRegistry::from_json_str(ROLES_JSON).unwrap();
        assert_eq!(
            registry.lookup("DATA SCIENTIST"),
            ["python", "sql", "deep learning"]
        );
        assert_eq!(registry.lookup("data scientist"), registry.lookup("Data Scientist"));
    }

    #[test]
    fn test_skills_are_normalized_and_deduplicated() {
        let registry = RoleSkillRegistry::from_json_str(ROLES_JSON).unwrap();
        assert_eq!(
            registry.lookup("backend engineer"),
            ["rust", "postgresql", "docker"]
        );
        assert_eq!(registry.lookup("data scientist").len(), 3);
    }

    #[test]
    fn test_known_roles_are_non_empty() {
        let registry = RoleSkillRegistry::from_json_str(ROLES_JSON).unwrap();
        for role in registry.roles() {
            assert!(!registry.lookup(role).is_empty(), "{role} has no skills");
        }
    }

    #[test]
    fn test_unknown_role_is_empty() {
        let registry = RoleSkillRegistry::from_json_str(ROLES_JSON).unwrap();
        assert!(registry.lookup("astronaut").is_empty());
        assert!(registry.lookup("").is_empty());
    }

    #[test]
    fn test_roles_sorted() {
        let registry = RoleSkillRegistry::from_json_str(ROLES_JSON).unwrap();
        assert_eq!(registry.roles(), vec!["backend engineer", "data scientist"]);
    }

    #[test]
    fn test_case_colliding_roles_prefer_lowercase_key() {
        for json in [
            r#"{"Data Scientist": ["python"], "data scientist": ["sql"]}"#,
            r#"{"data scientist": ["sql"], "Data Scientist": ["python"]}"#,
        ] {
            for _ in 0..32 {
                let registry = RoleSkillRegistry::from_json_str(json).unwrap();
                assert_eq!(registry.lookup("Data Scientist"), ["sql"]);
                assert_eq!(registry.roles(), vec!["data scientist"]);
            }
        }
    }

    #[test]
    fn test_case_colliding_roles_without_lowercase_key_are_stable() {
        let json = r#"{"DATA SCIENTIST": ["r"], "Data Scientist": ["python"]}"#;
        for _ in 0..32 {
            let registry = RoleSkillRegistry::from_json_str(json).unwrap();
            assert_eq!(registry.lookup("data scientist"), ["r"]);
        }
    }

    #[test]
    fn test_rejects_non_object_json() {
        assert!(RoleSkillRegistry::from_json_str(r#"["python"]"#).is_err());
        assert!(RoleSkillRegistry::from_json_str(r#"{"dev": "python"}"#).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(ROLES_JSON.as_bytes()).unwrap();

        let registry = RoleSkillRegistry::load(file.path()).unwrap();
        assert_eq!(registry.roles().len(), 2);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = RoleSkillRegistry::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, RegistryError::Io { .. }));
    }

    #[test]
    fn test_load_bad_json_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = RoleSkillRegistry::load(file.path()).unwrap_err();
        assert!(matches!(err, RegistryError::Parse { .. }));
    }

    #[test]
    fn test_shipped_data_file_parses() {
        let raw = include_str!("../../data/job_skills.json");
        let registry = RoleSkillRegistry::from_json_str(raw).unwrap();
        assert!(!registry.is_empty());
        assert!(!registry.lookup("data scientist").is_empty());
    }
}
