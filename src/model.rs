//! CV document data model.
//!
//! This is the single source of truth the block builders project from. Every
//! field is `#[serde(default)]` so partial or legacy JSON deserializes into a
//! fully-populated document; the pagination core performs no validation of
//! its own. Visibility is always filtered downstream, never deleted here.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::template::SectionId;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CvDocument {
    pub schema_version: u32,
    pub personal: PersonalInfo,
    pub statement: String,
    pub experiences: Vec<Experience>,
    pub education: Vec<Education>,
    pub competencies: Vec<Competency>,
    pub languages: Vec<SimpleItem>,
    pub other: Vec<SimpleItem>,
    pub certifications: Vec<SimpleItem>,
    pub portfolio: Vec<SimpleItem>,
    pub preferences: Preferences,
    pub sections: SectionVisibility,
    pub locale: LocaleSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub name: String,
    pub job_title: String,
    pub email: ContactField,
    pub phone: ContactField,
    pub location: ContactField,
    pub linkedin: ContactField,
    pub website: ContactField,
    /// Path to the photo file, relative to the document file.
    pub photo_path: Option<String>,
    pub photo_visible: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ContactField {
    pub value: String,
    pub visible: bool,
}

impl Default for ContactField {
    fn default() -> Self {
        Self {
            value: String::new(),
            visible: true,
        }
    }
}

impl ContactField {
    pub fn shown(&self) -> bool {
        self.visible && !self.value.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceKind {
    Employment,
    Assignment,
    /// Free-text subtype chosen by the user.
    Custom(String),
    #[default]
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Experience {
    pub id: String,
    pub kind: ExperienceKind,
    pub company: String,
    pub title: String,
    pub start_date: String,
    /// `None` means the position is ongoing.
    pub end_date: Option<String>,
    pub description: String,
    pub tags: Vec<Tag>,
    pub visible: bool,
}

impl Default for Experience {
    fn default() -> Self {
        Self {
            id: String::new(),
            kind: ExperienceKind::None,
            company: String::new(),
            title: String::new(),
            start_date: String::new(),
            end_date: None,
            description: String::new(),
            tags: Vec::new(),
            visible: true,
        }
    }
}

impl Experience {
    /// Formatted date range, e.g. "2020-01 – Present". Empty when both ends
    /// are blank, which marks a placeholder entry.
    pub fn date_range(&self, present: &str) -> String {
        let start = self.start_date.trim();
        let end = self.end_date.as_deref().map(str::trim).unwrap_or("");
        match (start.is_empty(), end.is_empty(), self.end_date.is_some()) {
            (true, true, _) => String::new(),
            (false, true, true) => start.to_string(),
            (false, true, false) => format!("{start} – {present}"),
            (true, false, _) => end.to_string(),
            (false, false, _) => format!("{start} – {end}"),
        }
    }

    /// A fully blank placeholder must never emit a block or occupy a page.
    pub fn has_content(&self) -> bool {
        !self.company.trim().is_empty()
            || !self.title.trim().is_empty()
            || !self.description.trim().is_empty()
            || self.tags.iter().any(Tag::shown)
            || !self.date_range("x").is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Education {
    pub id: String,
    pub institution: String,
    pub degree: String,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub description: String,
    pub tags: Vec<Tag>,
    pub visible: bool,
}

impl Default for Education {
    fn default() -> Self {
        Self {
            id: String::new(),
            institution: String::new(),
            degree: String::new(),
            start_year: None,
            end_year: None,
            description: String::new(),
            tags: Vec::new(),
            visible: true,
        }
    }
}

impl Education {
    pub fn date_range(&self) -> String {
        match (self.start_year, self.end_year) {
            (None, None) => String::new(),
            (Some(s), None) => s.to_string(),
            (None, Some(e)) => e.to_string(),
            (Some(s), Some(e)) => format!("{s} – {e}"),
        }
    }

    pub fn has_content(&self) -> bool {
        !self.institution.trim().is_empty()
            || !self.degree.trim().is_empty()
            || !self.description.trim().is_empty()
            || self.tags.iter().any(Tag::shown)
            || !self.date_range().is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub visible: bool,
}

impl Default for Tag {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            visible: true,
        }
    }
}

impl Tag {
    pub fn shown(&self) -> bool {
        self.visible && !self.name.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CompetencyLevel {
    Expert,
    Advanced,
    #[default]
    Proficient,
}

impl CompetencyLevel {
    /// Display order: strongest level first.
    pub const ALL: [CompetencyLevel; 3] = [
        CompetencyLevel::Expert,
        CompetencyLevel::Advanced,
        CompetencyLevel::Proficient,
    ];

    pub fn key(self) -> &'static str {
        match self {
            CompetencyLevel::Expert => "expert",
            CompetencyLevel::Advanced => "advanced",
            CompetencyLevel::Proficient => "proficient",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Competency {
    pub id: String,
    pub name: String,
    pub level: CompetencyLevel,
    pub visible: bool,
}

impl Default for Competency {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            level: CompetencyLevel::Proficient,
            visible: true,
        }
    }
}

impl Competency {
    pub fn shown(&self) -> bool {
        self.visible && !self.name.trim().is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimpleItem {
    pub id: String,
    pub name: String,
    pub visible: bool,
}

impl Default for SimpleItem {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            visible: true,
        }
    }
}

impl SimpleItem {
    pub fn shown(&self) -> bool {
        self.visible && !self.name.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferenceKind {
    WorkMode,
    Availability,
    Location,
}

impl PreferenceKind {
    pub const ALL: [PreferenceKind; 3] = [
        PreferenceKind::WorkMode,
        PreferenceKind::Availability,
        PreferenceKind::Location,
    ];

    pub fn key(self) -> &'static str {
        match self {
            PreferenceKind::WorkMode => "work_mode",
            PreferenceKind::Availability => "availability",
            PreferenceKind::Location => "location",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PreferenceField {
    pub value: String,
    pub visible: bool,
}

impl Default for PreferenceField {
    fn default() -> Self {
        Self {
            value: String::new(),
            visible: true,
        }
    }
}

impl PreferenceField {
    pub fn shown(&self) -> bool {
        self.visible && !self.value.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub work_mode: PreferenceField,
    pub availability: PreferenceField,
    pub location: PreferenceField,
}

impl Preferences {
    pub fn field(&self, kind: PreferenceKind) -> &PreferenceField {
        match kind {
            PreferenceKind::WorkMode => &self.work_mode,
            PreferenceKind::Availability => &self.availability,
            PreferenceKind::Location => &self.location,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionVisibility {
    pub statement: bool,
    pub experiences: bool,
    pub education: bool,
    pub competencies: bool,
    pub languages: bool,
    pub other: bool,
    pub certifications: bool,
    pub portfolio: bool,
    pub preferences: bool,
}

impl Default for SectionVisibility {
    fn default() -> Self {
        Self {
            statement: true,
            experiences: true,
            education: true,
            competencies: true,
            languages: true,
            other: true,
            certifications: true,
            portfolio: true,
            preferences: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleSettings {
    /// Active language code, e.g. "en" or "fr".
    pub language: String,
    /// Per-language, per-section title overrides.
    pub overrides: HashMap<String, HashMap<SectionId, String>>,
}

impl Default for LocaleSettings {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            overrides: HashMap::new(),
        }
    }
}
