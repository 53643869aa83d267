use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::{
    Certification, Education, EducationPatch, Language, PersonalInfoPatch, Reference, ResumeData,
    SavedVersion, WorkExperience, WorkExperiencePatch,
};

/// The persisted shape: one JSON object holding the live document, the
/// selected template and every saved version.
#[derive(Debug, Serialize, Deserialize)]
struct StoreState {
    data: ResumeData,
    template: String,
    #[serde(rename = "savedVersions", default)]
    saved_versions: Vec<SavedVersion>,
}

/// Single source of truth for the live resume, the template identifier and
/// saved versions. Every mutating operation rewrites the whole state file
/// before returning; persistence is not separately invocable.
pub struct Store {
    data: ResumeData,
    template: String,
    versions: Vec<SavedVersion>,
    path: PathBuf,
    last_id: i64,
}

// --- Input shapes for add operations (entries without an id) ---

#[derive(Debug, Clone, Default)]
pub struct NewWorkExperience {
    pub title: String,
    pub company: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NewEducation {
    pub degree: String,
    pub institution: String,
    pub start_date: String,
    pub end_date: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewCertification {
    pub name: String,
    pub issuer: String,
    pub date: String,
}

#[derive(Debug, Clone)]
pub struct NewReference {
    pub name: String,
    pub position: String,
    pub company: String,
    pub contact: String,
    pub phone: Option<String>,
}

impl Store {
    /// Open the store at its default location, initializing with the
    /// hardcoded starter document on first run.
    pub fn open() -> Result<Self> {
        Self::open_at(Self::default_path()?)
    }

    /// Open the store backed by an explicit file, for tests and `--file`.
    /// First run writes the initial state so the file exists from then on.
    pub fn open_at(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let existed = path.exists();
        let (data, template, versions) = if existed {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read state file: {}", path.display()))?;
            let state: StoreState = serde_json::from_str(&raw)
                .with_context(|| format!("Malformed state file: {}", path.display()))?;
            (state.data, state.template, state.saved_versions)
        } else {
            (ResumeData::default_document(), "modern".to_string(), Vec::new())
        };

        let store = Self {
            data,
            template,
            versions,
            path,
            last_id: 0,
        };
        if !existed {
            store.persist()?;
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn default_path() -> Result<PathBuf> {
        // XDG data directory or fallback to cwd
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "vitae") {
            Ok(proj_dirs.data_dir().join("resume-storage.json"))
        } else {
            Ok(PathBuf::from("resume-storage.json"))
        }
    }

    pub fn data(&self) -> &ResumeData {
        &self.data
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn versions(&self) -> &[SavedVersion] {
        &self.versions
    }

    /// Millisecond timestamp token, forced strictly increasing so rapid
    /// consecutive adds never collide.
    fn next_id(&mut self) -> String {
        let mut id = chrono::Utc::now().timestamp_millis();
        if id <= self.last_id {
            id = self.last_id + 1;
        }
        self.last_id = id;
        id.to_string()
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create state directory: {}", parent.display())
                })?;
            }
        }
        let state = StoreState {
            data: self.data.clone(),
            template: self.template.clone(),
            saved_versions: self.versions.clone(),
        };
        let json = serde_json::to_string_pretty(&state)?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write state file: {}", self.path.display()))
    }

    // --- Personal info ---

    pub fn update_personal_info(&mut self, patch: PersonalInfoPatch) -> Result<()> {
        let info = &mut self.data.personal_info;
        if let Some(v) = patch.first_name {
            info.first_name = v;
        }
        if let Some(v) = patch.last_name {
            info.last_name = v;
        }
        if let Some(v) = patch.title {
            info.title = v;
        }
        if let Some(v) = patch.email {
            info.email = v;
        }
        if let Some(v) = patch.phone {
            info.phone = v;
        }
        if let Some(v) = patch.location {
            info.location = v;
        }
        if let Some(v) = patch.linkedin {
            info.linkedin = v;
        }
        if let Some(v) = patch.website {
            info.website = Some(v);
        }
        if let Some(v) = patch.twitter {
            info.twitter = Some(v);
        }
        if let Some(v) = patch.github {
            info.github = Some(v);
        }
        self.persist()
    }

    /// Empty string means "no picture".
    pub fn set_profile_picture(&mut self, uri: &str) -> Result<()> {
        self.data.personal_info.profile_picture = if uri.is_empty() {
            None
        } else {
            Some(uri.to_string())
        };
        self.persist()
    }

    pub fn update_summary(&mut self, summary: &str) -> Result<()> {
        self.data.summary = summary.to_string();
        self.persist()
    }

    // --- Work experience ---

    pub fn add_work_experience(&mut self, entry: NewWorkExperience) -> Result<String> {
        let id = self.next_id();
        self.data.work_experience.push(WorkExperience {
            id: id.clone(),
            title: entry.title,
            company: entry.company,
            start_date: entry.start_date,
            end_date: entry.end_date,
            description: entry.description,
            bullets: entry.bullets,
        });
        self.persist()?;
        Ok(id)
    }

    /// Merges the patch into the entry matching `id`; silent no-op if absent.
    pub fn update_work_experience(&mut self, id: &str, patch: WorkExperiencePatch) -> Result<()> {
        if let Some(exp) = self.data.work_experience.iter_mut().find(|e| e.id == id) {
            if let Some(v) = patch.title {
                exp.title = v;
            }
            if let Some(v) = patch.company {
                exp.company = v;
            }
            if let Some(v) = patch.start_date {
                exp.start_date = v;
            }
            if let Some(v) = patch.end_date {
                exp.end_date = v;
            }
            if let Some(v) = patch.description {
                exp.description = v;
            }
            if let Some(v) = patch.bullets {
                exp.bullets = v;
            }
        }
        self.persist()
    }

    pub fn remove_work_experience(&mut self, id: &str) -> Result<()> {
        self.data.work_experience.retain(|e| e.id != id);
        self.persist()
    }

    /// Swap with the immediate predecessor; no-op at index 0 or unknown id.
    pub fn move_work_experience_up(&mut self, id: &str) -> Result<()> {
        if let Some(index) = self.data.work_experience.iter().position(|e| e.id == id) {
            if index > 0 {
                self.data.work_experience.swap(index, index - 1);
            }
        }
        self.persist()
    }

    /// Swap with the immediate successor; no-op at the last index or unknown id.
    pub fn move_work_experience_down(&mut self, id: &str) -> Result<()> {
        if let Some(index) = self.data.work_experience.iter().position(|e| e.id == id) {
            if index + 1 < self.data.work_experience.len() {
                self.data.work_experience.swap(index, index + 1);
            }
        }
        self.persist()
    }

    // --- Education ---

    pub fn add_education(&mut self, entry: NewEducation) -> Result<String> {
        let id = self.next_id();
        self.data.education.push(Education {
            id: id.clone(),
            degree: entry.degree,
            institution: entry.institution,
            start_date: entry.start_date,
            end_date: entry.end_date,
            description: entry.description,
        });
        self.persist()?;
        Ok(id)
    }

    pub fn update_education(&mut self, id: &str, patch: EducationPatch) -> Result<()> {
        if let Some(edu) = self.data.education.iter_mut().find(|e| e.id == id) {
            if let Some(v) = patch.degree {
                edu.degree = v;
            }
            if let Some(v) = patch.institution {
                edu.institution = v;
            }
            if let Some(v) = patch.start_date {
                edu.start_date = v;
            }
            if let Some(v) = patch.end_date {
                edu.end_date = v;
            }
            if let Some(v) = patch.description {
                edu.description = Some(v);
            }
        }
        self.persist()
    }

    pub fn remove_education(&mut self, id: &str) -> Result<()> {
        self.data.education.retain(|e| e.id != id);
        self.persist()
    }

    // --- Skills and languages (keyed by value, not id) ---

    /// Appends without deduplication; callers treat the value as the key.
    pub fn add_skill(&mut self, skill: &str) -> Result<()> {
        self.data.skills.push(skill.to_string());
        self.persist()
    }

    pub fn remove_skill(&mut self, skill: &str) -> Result<()> {
        self.data.skills.retain(|s| s != skill);
        self.persist()
    }

    pub fn add_language(&mut self, language: &str, proficiency: &str) -> Result<()> {
        self.data.languages.push(Language {
            language: language.to_string(),
            proficiency: proficiency.to_string(),
        });
        self.persist()
    }

    pub fn remove_language(&mut self, language: &str) -> Result<()> {
        self.data.languages.retain(|l| l.language != language);
        self.persist()
    }

    // --- Certifications and references ---

    pub fn add_certification(&mut self, entry: NewCertification) -> Result<String> {
        let id = self.next_id();
        self.data.certifications.push(Certification {
            id: id.clone(),
            name: entry.name,
            issuer: entry.issuer,
            date: entry.date,
        });
        self.persist()?;
        Ok(id)
    }

    pub fn remove_certification(&mut self, id: &str) -> Result<()> {
        self.data.certifications.retain(|c| c.id != id);
        self.persist()
    }

    pub fn add_reference(&mut self, entry: NewReference) -> Result<String> {
        let id = self.next_id();
        self.data.references.push(Reference {
            id: id.clone(),
            name: entry.name,
            position: entry.position,
            company: entry.company,
            contact: entry.contact,
            phone: entry.phone,
        });
        self.persist()?;
        Ok(id)
    }

    pub fn remove_reference(&mut self, id: &str) -> Result<()> {
        self.data.references.retain(|r| r.id != id);
        self.persist()
    }

    // --- Template ---

    /// Free-form at the store level; unrecognized values fall back to the
    /// default layout at render time, they are not rejected here.
    pub fn set_template(&mut self, template: &str) -> Result<()> {
        self.template = template.to_string();
        self.persist()
    }

    // --- Versions ---

    /// Snapshot the current document and template under `name`. Names are
    /// not deduplicated; multiple versions may share one.
    pub fn save_version(&mut self, name: &str) -> Result<String> {
        let id = self.next_id();
        self.versions.push(SavedVersion {
            id: id.clone(),
            name: name.to_string(),
            date: chrono::Utc::now().to_rfc3339(),
            data: self.data.clone(),
            template: self.template.clone(),
        });
        self.persist()?;
        Ok(id)
    }

    /// Replace the live document and template with a deep copy of the
    /// version's snapshot. Loading must not alias the stored data, else
    /// later edits would corrupt history. No-op if `id` is unknown.
    pub fn load_version(&mut self, id: &str) -> Result<bool> {
        let Some(version) = self.versions.iter().find(|v| v.id == id) else {
            return Ok(false);
        };
        self.data = version.data.clone();
        self.template = version.template.clone();
        self.persist()?;
        Ok(true)
    }

    pub fn delete_version(&mut self, id: &str) -> Result<()> {
        self.versions.retain(|v| v.id != id);
        self.persist()
    }

    /// Replace document and template wholesale (JSON import path).
    pub fn replace(&mut self, data: ResumeData, template: &str) -> Result<()> {
        self.data = data;
        self.template = template.to_string();
        self.persist()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, Store) {
        let dir = TempDir::new().unwrap();
        let store = Store::open_at(dir.path().join("resume-storage.json")).unwrap();
        (dir, store)
    }

    fn new_exp(title: &str) -> NewWorkExperience {
        NewWorkExperience {
            title: title.to_string(),
            company: "Company Name".to_string(),
            start_date: "Month Year".to_string(),
            end_date: "Present".to_string(),
            description: String::new(),
            bullets: vec![String::new()],
        }
    }

    #[test]
    fn test_first_run_defaults() {
        let (_dir, store) = temp_store();
        assert_eq!(store.template(), "modern");
        assert_eq!(store.data().personal_info.first_name, "John");
        assert_eq!(store.data().work_experience.len(), 2);
        assert!(store.versions().is_empty());
    }

    #[test]
    fn test_add_work_experience_scenario() {
        let (_dir, mut store) = temp_store();
        let before = store.data().work_experience.len();

        let id = store.add_work_experience(new_exp("New Position")).unwrap();

        assert!(!id.is_empty());
        assert_eq!(store.data().work_experience.len(), before + 1);
        let added = store.data().work_experience.last().unwrap();
        assert_eq!(added.id, id);
        assert_eq!(added.title, "New Position");
        assert_eq!(added.company, "Company Name");
        assert_eq!(added.start_date, "Month Year");
        assert_eq!(added.end_date, "Present");
        assert_eq!(added.bullets, vec![String::new()]);
    }

    #[test]
    fn test_generated_ids_unique_under_rapid_adds() {
        let (_dir, mut store) = temp_store();
        let mut ids = Vec::new();
        for i in 0..20 {
            ids.push(store.add_work_experience(new_exp(&format!("Job {i}"))).unwrap());
        }
        let mut dedup = ids.clone();
        dedup.sort();
        dedup.dedup();
        assert_eq!(dedup.len(), ids.len());
    }

    #[test]
    fn test_add_remove_preserves_relative_order() {
        let (_dir, mut store) = temp_store();
        let a = store.add_work_experience(new_exp("A")).unwrap();
        let b = store.add_work_experience(new_exp("B")).unwrap();
        let c = store.add_work_experience(new_exp("C")).unwrap();

        store.remove_work_experience(&b).unwrap();

        let titles: Vec<&str> = store
            .data()
            .work_experience
            .iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Senior Product Manager", "Product Manager", "A", "C"]);
        assert!(store.data().work_experience.iter().any(|e| e.id == a));
        assert!(store.data().work_experience.iter().any(|e| e.id == c));
    }

    #[test]
    fn test_move_up_down_swaps_adjacent() {
        let (_dir, mut store) = temp_store();
        // Default document starts with ids "1" and "2".
        store.move_work_experience_up("2").unwrap();
        let ids: Vec<&str> = store.data().work_experience.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);

        store.move_work_experience_down("2").unwrap();
        let ids: Vec<&str> = store.data().work_experience.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_move_noop_at_boundaries_and_unknown_id() {
        let (_dir, mut store) = temp_store();
        let before: Vec<String> = store
            .data()
            .work_experience
            .iter()
            .map(|e| e.id.clone())
            .collect();

        store.move_work_experience_up("1").unwrap(); // already first
        store.move_work_experience_down("2").unwrap(); // already last
        store.move_work_experience_up("nope").unwrap();
        store.move_work_experience_down("nope").unwrap();

        let after: Vec<String> = store
            .data()
            .work_experience
            .iter()
            .map(|e| e.id.clone())
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_update_work_experience_merges_and_ignores_unknown() {
        let (_dir, mut store) = temp_store();
        store
            .update_work_experience(
                "1",
                WorkExperiencePatch {
                    title: Some("Principal Product Manager".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        let exp = &store.data().work_experience[0];
        assert_eq!(exp.title, "Principal Product Manager");
        assert_eq!(exp.company, "Example Tech Inc."); // untouched

        let before = store.data().clone();
        store
            .update_work_experience(
                "missing",
                WorkExperiencePatch {
                    title: Some("x".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(*store.data(), before);
    }

    #[test]
    fn test_skill_add_remove_restores_prior_sequence() {
        let (_dir, mut store) = temp_store();
        let before = store.data().skills.clone();

        store.add_skill("Rustacean Relations").unwrap();
        store.remove_skill("Rustacean Relations").unwrap();

        assert_eq!(store.data().skills, before);
    }

    #[test]
    fn test_skill_duplicates_allowed_and_removed_by_value() {
        let (_dir, mut store) = temp_store();
        store.add_skill("Negotiation").unwrap();
        store.add_skill("Negotiation").unwrap();
        let count = store.data().skills.iter().filter(|s| *s == "Negotiation").count();
        assert_eq!(count, 2);

        // Removal is by value and drops every occurrence.
        store.remove_skill("Negotiation").unwrap();
        assert!(!store.data().skills.iter().any(|s| s == "Negotiation"));
    }

    #[test]
    fn test_language_keyed_by_value() {
        let (_dir, mut store) = temp_store();
        store.add_language("Spanish", "Beginner").unwrap();
        assert!(store.data().languages.iter().any(|l| l.language == "Spanish"));

        store.remove_language("Spanish").unwrap();
        assert!(!store.data().languages.iter().any(|l| l.language == "Spanish"));
    }

    #[test]
    fn test_certification_and_reference_ids() {
        let (_dir, mut store) = temp_store();
        let cert_id = store
            .add_certification(NewCertification {
                name: "AWS Solutions Architect".to_string(),
                issuer: "Amazon".to_string(),
                date: "Feb 2024".to_string(),
            })
            .unwrap();
        let ref_id = store
            .add_reference(NewReference {
                name: "Ama Owusu".to_string(),
                position: "VP Engineering".to_string(),
                company: "Example Tech Inc.".to_string(),
                contact: "ama@example.com".to_string(),
                phone: None,
            })
            .unwrap();
        assert!(!cert_id.is_empty());
        assert!(!ref_id.is_empty());

        store.remove_certification(&cert_id).unwrap();
        store.remove_reference(&ref_id).unwrap();
        assert!(!store.data().certifications.iter().any(|c| c.id == cert_id));
        assert!(!store.data().references.iter().any(|r| r.id == ref_id));
    }

    #[test]
    fn test_profile_picture_empty_string_clears() {
        let (_dir, mut store) = temp_store();
        store.set_profile_picture("file:///tmp/me.png").unwrap();
        assert_eq!(
            store.data().personal_info.profile_picture.as_deref(),
            Some("file:///tmp/me.png")
        );

        store.set_profile_picture("").unwrap();
        assert!(store.data().personal_info.profile_picture.is_none());
    }

    #[test]
    fn test_version_roundtrip_restores_bit_for_bit() {
        let (_dir, mut store) = temp_store();
        store.set_template("executive").unwrap();
        let snapshot = store.data().clone();

        let id = store.save_version("A").unwrap();

        // Arbitrary edits after saving.
        store.update_summary("Completely different summary.").unwrap();
        store.add_skill("Forklift Certification").unwrap();
        store.remove_work_experience("1").unwrap();
        store.set_template("minimal").unwrap();

        assert!(store.load_version(&id).unwrap());
        assert_eq!(*store.data(), snapshot);
        assert_eq!(store.template(), "executive");
    }

    #[test]
    fn test_version_deep_copy_isolation() {
        let (_dir, mut store) = temp_store();
        let id = store.save_version("base").unwrap();
        let stored = store.versions()[0].data.clone();

        // Mutating the live document after load must never touch the snapshot.
        assert!(store.load_version(&id).unwrap());
        store.update_summary("mutated after load").unwrap();
        store.add_skill("mutated").unwrap();

        assert_eq!(store.versions()[0].data, stored);
    }

    #[test]
    fn test_load_version_unknown_id_is_noop() {
        let (_dir, mut store) = temp_store();
        let before = store.data().clone();
        assert!(!store.load_version("999").unwrap());
        assert_eq!(*store.data(), before);
    }

    #[test]
    fn test_version_names_not_deduplicated() {
        let (_dir, mut store) = temp_store();
        store.save_version("draft").unwrap();
        store.save_version("draft").unwrap();
        assert_eq!(store.versions().len(), 2);
        assert_ne!(store.versions()[0].id, store.versions()[1].id);
    }

    #[test]
    fn test_delete_version() {
        let (_dir, mut store) = temp_store();
        let id = store.save_version("doomed").unwrap();
        store.delete_version(&id).unwrap();
        assert!(store.versions().is_empty());
    }

    #[test]
    fn test_persistence_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("resume-storage.json");

        let version_id;
        {
            let mut store = Store::open_at(&path).unwrap();
            store.update_summary("Persisted summary").unwrap();
            store.set_template("technical").unwrap();
            version_id = store.save_version("checkpoint").unwrap();
        }

        let store = Store::open_at(&path).unwrap();
        assert_eq!(store.data().summary, "Persisted summary");
        assert_eq!(store.template(), "technical");
        assert_eq!(store.versions().len(), 1);
        assert_eq!(store.versions()[0].id, version_id);
        assert_eq!(store.versions()[0].name, "checkpoint");
    }

    #[test]
    fn test_update_personal_info_merges_fields() {
        let (_dir, mut store) = temp_store();
        store
            .update_personal_info(PersonalInfoPatch {
                first_name: Some("Akosua".to_string()),
                email: Some("akosua@example.com".to_string()),
                ..Default::default()
            })
            .unwrap();

        let info = &store.data().personal_info;
        assert_eq!(info.first_name, "Akosua");
        assert_eq!(info.email, "akosua@example.com");
        assert_eq!(info.last_name, "Doe"); // untouched
    }
}
