//! Resolved display strings for section titles and labels.
//!
//! The builders and renderers only ever consume resolved strings; language
//! keys stop here. Built-in tables exist for "en" and "fr" (anything else
//! resolves as English), overlaid with the document's per-section overrides.

use std::collections::HashMap;

use crate::model::{CompetencyLevel, CvDocument, ExperienceKind, PreferenceKind};
use crate::template::SectionId;

#[derive(Debug, Clone)]
pub struct SectionTitles {
    titles: HashMap<SectionId, String>,
    pub expert: String,
    pub advanced: String,
    pub proficient: String,
    pub work_mode: String,
    pub availability: String,
    pub location: String,
    pub employment: String,
    pub assignment: String,
    /// Marker for an ongoing date range.
    pub present: String,
    /// Placeholder message rendered for the empty sentinel block.
    pub empty_state: String,
}

impl SectionTitles {
    pub fn section(&self, id: SectionId) -> &str {
        self.titles.get(&id).map(String::as_str).unwrap_or("")
    }

    pub fn level(&self, level: CompetencyLevel) -> &str {
        match level {
            CompetencyLevel::Expert => &self.expert,
            CompetencyLevel::Advanced => &self.advanced,
            CompetencyLevel::Proficient => &self.proficient,
        }
    }

    pub fn preference(&self, kind: PreferenceKind) -> &str {
        match kind {
            PreferenceKind::WorkMode => &self.work_mode,
            PreferenceKind::Availability => &self.availability,
            PreferenceKind::Location => &self.location,
        }
    }

    pub fn experience_kind<'a>(&'a self, kind: &'a ExperienceKind) -> &'a str {
        match kind {
            ExperienceKind::Employment => &self.employment,
            ExperienceKind::Assignment => &self.assignment,
            ExperienceKind::Custom(label) => label,
            ExperienceKind::None => "",
        }
    }
}

fn default_section_title(id: SectionId, lang: &str) -> &'static str {
    match lang {
        "fr" => match id {
            SectionId::PersonalInfo => "Contact",
            SectionId::ProfessionalStatement => "Profil",
            SectionId::Experiences => "Expérience Professionnelle",
            SectionId::Education => "Formation",
            SectionId::Competencies => "Compétences",
            SectionId::Languages => "Langues",
            SectionId::Other => "Divers",
            SectionId::Certifications => "Certifications",
            SectionId::Portfolio => "Portfolio",
            SectionId::Preferences => "Préférences",
        },
        _ => match id {
            SectionId::PersonalInfo => "Contact",
            SectionId::ProfessionalStatement => "Profile",
            SectionId::Experiences => "Work Experience",
            SectionId::Education => "Education",
            SectionId::Competencies => "Competencies",
            SectionId::Languages => "Languages",
            SectionId::Other => "Other",
            SectionId::Certifications => "Certifications",
            SectionId::Portfolio => "Portfolio",
            SectionId::Preferences => "Preferences",
        },
    }
}

const ALL_SECTIONS: [SectionId; 10] = [
    SectionId::PersonalInfo,
    SectionId::ProfessionalStatement,
    SectionId::Experiences,
    SectionId::Education,
    SectionId::Competencies,
    SectionId::Languages,
    SectionId::Other,
    SectionId::Certifications,
    SectionId::Portfolio,
    SectionId::Preferences,
];

/// Resolve every display string for the document's active language, applying
/// the user's per-section overrides.
pub fn resolve(doc: &CvDocument) -> SectionTitles {
    let lang = doc.locale.language.as_str();
    let overrides = doc.locale.overrides.get(lang);

    let mut titles = HashMap::new();
    for id in ALL_SECTIONS {
        let text = overrides
            .and_then(|m| m.get(&id))
            .filter(|s| !s.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| default_section_title(id, lang).to_string());
        titles.insert(id, text);
    }

    let (expert, advanced, proficient) = match lang {
        "fr" => ("Expert", "Avancé", "Maîtrisé"),
        _ => ("Expert", "Advanced", "Proficient"),
    };
    let (work_mode, availability, location) = match lang {
        "fr" => ("Mode de travail", "Disponibilité", "Localisation"),
        _ => ("Work mode", "Availability", "Location"),
    };
    let (employment, assignment) = match lang {
        "fr" => ("Emploi", "Mission"),
        _ => ("Employment", "Assignment"),
    };
    let present = match lang {
        "fr" => "Présent",
        _ => "Present",
    };
    let empty_state = match lang {
        "fr" => "Votre CV est vide. Ajoutez du contenu pour voir l'aperçu.",
        _ => "Your CV is empty. Add some content to see the preview.",
    };

    SectionTitles {
        titles,
        expert: expert.to_string(),
        advanced: advanced.to_string(),
        proficient: proficient.to_string(),
        work_mode: work_mode.to_string(),
        availability: availability.to_string(),
        location: location.to_string(),
        employment: employment.to_string(),
        assignment: assignment.to_string(),
        present: present.to_string(),
        empty_state: empty_state.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_beats_default() {
        let mut doc = CvDocument::default();
        doc.locale.language = "en".to_string();
        let mut per_section = HashMap::new();
        per_section.insert(SectionId::Experiences, "Career".to_string());
        doc.locale
            .overrides
            .insert("en".to_string(), per_section);

        let titles = resolve(&doc);
        assert_eq!(titles.section(SectionId::Experiences), "Career");
        assert_eq!(titles.section(SectionId::Education), "Education");
    }

    #[test]
    fn french_tables() {
        let mut doc = CvDocument::default();
        doc.locale.language = "fr".to_string();
        let titles = resolve(&doc);
        assert_eq!(
            titles.section(SectionId::Experiences),
            "Expérience Professionnelle"
        );
        assert_eq!(titles.present, "Présent");
    }

    #[test]
    fn blank_override_is_ignored() {
        let mut doc = CvDocument::default();
        let mut per_section = HashMap::new();
        per_section.insert(SectionId::Languages, "   ".to_string());
        doc.locale
            .overrides
            .insert("en".to_string(), per_section);

        let titles = resolve(&doc);
        assert_eq!(titles.section(SectionId::Languages), "Languages");
    }
}
