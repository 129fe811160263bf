//! Block builders: project a CV document plus template configuration into
//! ordered block streams.
//!
//! All three builders are deterministic and apply the same visibility rule:
//! a section is included only when its visibility flag is on AND it has at
//! least one visible item with non-empty rendering-relevant content. Empty
//! or hidden content never emits a block.

use std::collections::HashMap;

use crate::block::{Block, ContactKind};
use crate::locale::SectionTitles;
use crate::model::{CompetencyLevel, CvDocument, PreferenceKind};
use crate::template::{SectionId, Template};

/// Pre-wrapped competency chip rows per proficiency level. Row wrapping is an
/// external concern (the DOM measurer owns it in two-column mode); a level
/// missing from the map falls back to one name per row.
pub type CompetencyRows = HashMap<CompetencyLevel, Vec<Vec<String>>>;

/// Main-column stream: header, statement, experiences, education.
pub fn main_blocks(doc: &CvDocument, titles: &SectionTitles) -> Vec<Block> {
    let mut out = vec![Block::Header];
    out.extend(statement_section(doc));
    out.extend(experience_section(doc, titles));
    out.extend(education_section(doc, titles));

    // Only the header made it: signal the empty state instead of a blank page.
    if out.len() == 1 {
        out.push(Block::Empty);
    }
    out
}

/// Sidebar stream: photo, contact, competencies, the four simple lists,
/// preferences.
pub fn sidebar_blocks(
    doc: &CvDocument,
    titles: &SectionTitles,
    rows: &CompetencyRows,
) -> Vec<Block> {
    let mut out = Vec::new();
    if doc.personal.photo_path.is_some() && doc.personal.photo_visible {
        out.push(Block::Photo);
    }
    out.extend(contact_section(doc, titles));
    out.extend(competency_section(doc, titles, rows));
    for section in [
        SectionId::Languages,
        SectionId::Other,
        SectionId::Certifications,
        SectionId::Portfolio,
    ] {
        out.extend(simple_section(doc, section, titles));
    }
    out.extend(preferences_section(doc, titles));
    out
}

/// Unified stream for single-column mode, following the template's configured
/// section order with a divider between non-empty sections.
pub fn content_blocks(
    doc: &CvDocument,
    template: &Template,
    titles: &SectionTitles,
    rows: &CompetencyRows,
) -> Vec<Block> {
    let mut out: Vec<Block> = Vec::new();
    for &section in &template.content_sections {
        let sub = match section {
            SectionId::PersonalInfo => vec![Block::Header],
            SectionId::ProfessionalStatement => statement_section(doc),
            SectionId::Experiences => experience_section(doc, titles),
            SectionId::Education => education_section(doc, titles),
            SectionId::Competencies => competency_section(doc, titles, rows),
            SectionId::Languages
            | SectionId::Other
            | SectionId::Certifications
            | SectionId::Portfolio => simple_section(doc, section, titles),
            SectionId::Preferences => preferences_section(doc, titles),
        };
        if sub.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(Block::Divider);
        }
        out.extend(sub);
    }

    if out.is_empty() || out == [Block::Header] {
        out.push(Block::Empty);
    }
    out
}

fn statement_section(doc: &CvDocument) -> Vec<Block> {
    if doc.sections.statement && !doc.statement.trim().is_empty() {
        vec![Block::Statement(doc.statement.trim().to_string())]
    } else {
        Vec::new()
    }
}

fn experience_section(doc: &CvDocument, titles: &SectionTitles) -> Vec<Block> {
    if !doc.sections.experiences {
        return Vec::new();
    }
    let items: Vec<Block> = doc
        .experiences
        .iter()
        .filter(|e| e.visible && e.has_content())
        .map(|e| Block::ExperienceItem(e.clone()))
        .collect();
    if items.is_empty() {
        return Vec::new();
    }
    let mut out = vec![Block::SectionTitle {
        section: SectionId::Experiences,
        text: titles.section(SectionId::Experiences).to_string(),
        continuation: None,
    }];
    out.extend(items);
    out
}

fn education_section(doc: &CvDocument, titles: &SectionTitles) -> Vec<Block> {
    if !doc.sections.education {
        return Vec::new();
    }
    let items: Vec<Block> = doc
        .education
        .iter()
        .filter(|e| e.visible && e.has_content())
        .map(|e| Block::EducationItem(e.clone()))
        .collect();
    if items.is_empty() {
        return Vec::new();
    }
    let mut out = vec![Block::SectionTitle {
        section: SectionId::Education,
        text: titles.section(SectionId::Education).to_string(),
        continuation: None,
    }];
    out.extend(items);
    out
}

fn contact_section(doc: &CvDocument, titles: &SectionTitles) -> Vec<Block> {
    let p = &doc.personal;
    let items: Vec<Block> = ContactKind::ALL
        .iter()
        .filter_map(|&kind| {
            let field = match kind {
                ContactKind::Email => &p.email,
                ContactKind::Phone => &p.phone,
                ContactKind::Location => &p.location,
                ContactKind::Linkedin => &p.linkedin,
                ContactKind::Website => &p.website,
            };
            field.shown().then(|| Block::ContactItem {
                kind,
                value: field.value.trim().to_string(),
            })
        })
        .collect();
    if items.is_empty() {
        return Vec::new();
    }
    let mut out = vec![Block::SectionTitle {
        section: SectionId::PersonalInfo,
        text: titles.section(SectionId::PersonalInfo).to_string(),
        continuation: None,
    }];
    out.extend(items);
    out
}

fn competency_section(
    doc: &CvDocument,
    titles: &SectionTitles,
    rows: &CompetencyRows,
) -> Vec<Block> {
    if !doc.sections.competencies {
        return Vec::new();
    }
    let mut levels: Vec<Block> = Vec::new();
    for level in CompetencyLevel::ALL {
        let level_rows: Vec<Vec<String>> = match rows.get(&level) {
            Some(wrapped) => wrapped.clone(),
            // No external wrapping supplied: one name per row.
            None => doc
                .competencies
                .iter()
                .filter(|c| c.shown() && c.level == level)
                .map(|c| vec![c.name.trim().to_string()])
                .collect(),
        };
        if level_rows.is_empty() {
            continue;
        }
        levels.push(Block::LevelTitle {
            level,
            text: titles.level(level).to_string(),
            continuation: None,
        });
        for (index, names) in level_rows.into_iter().enumerate() {
            levels.push(Block::CompetencyRow {
                level,
                index,
                names,
            });
        }
    }
    if levels.is_empty() {
        return Vec::new();
    }
    let mut out = vec![Block::SectionTitle {
        section: SectionId::Competencies,
        text: titles.section(SectionId::Competencies).to_string(),
        continuation: None,
    }];
    out.extend(levels);
    out
}

fn simple_section(doc: &CvDocument, section: SectionId, titles: &SectionTitles) -> Vec<Block> {
    let (visible, items) = match section {
        SectionId::Languages => (doc.sections.languages, &doc.languages),
        SectionId::Other => (doc.sections.other, &doc.other),
        SectionId::Certifications => (doc.sections.certifications, &doc.certifications),
        SectionId::Portfolio => (doc.sections.portfolio, &doc.portfolio),
        _ => return Vec::new(),
    };
    if !visible {
        return Vec::new();
    }
    let items: Vec<Block> = items
        .iter()
        .filter(|i| i.shown())
        .map(|i| Block::ListItem {
            section,
            id: i.id.clone(),
            text: i.name.trim().to_string(),
        })
        .collect();
    if items.is_empty() {
        return Vec::new();
    }
    let mut out = vec![Block::SectionTitle {
        section,
        text: titles.section(section).to_string(),
        continuation: None,
    }];
    out.extend(items);
    out
}

fn preferences_section(doc: &CvDocument, titles: &SectionTitles) -> Vec<Block> {
    if !doc.sections.preferences {
        return Vec::new();
    }
    let items: Vec<Block> = PreferenceKind::ALL
        .iter()
        .filter_map(|&kind| {
            let field = doc.preferences.field(kind);
            field.shown().then(|| Block::PreferenceItem {
                kind,
                text: format!("{}: {}", titles.preference(kind), field.value.trim()),
            })
        })
        .collect();
    if items.is_empty() {
        return Vec::new();
    }
    let mut out = vec![Block::SectionTitle {
        section: SectionId::Preferences,
        text: titles.section(SectionId::Preferences).to_string(),
        continuation: None,
    }];
    out.extend(items);
    out
}
