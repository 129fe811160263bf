//! Block stream construction from documents: visibility rules, ordering and
//! the empty-document sentinel.

use std::collections::HashMap;

use cvpress::block::Block;
use cvpress::builder::{CompetencyRows, content_blocks, main_blocks, sidebar_blocks};
use cvpress::locale;
use cvpress::model::{
    Competency, CompetencyLevel, CvDocument, Education, Experience, SimpleItem,
};
use cvpress::template::{SectionId, Template};

fn doc_with_content() -> CvDocument {
    let mut doc = CvDocument::default();
    doc.personal.name = "Ada".to_string();
    doc.statement = "Builds things.".to_string();
    doc.experiences = vec![
        Experience {
            id: "e1".to_string(),
            company: "Acme".to_string(),
            title: "Engineer".to_string(),
            ..Default::default()
        },
        Experience {
            id: "hidden".to_string(),
            company: "Ghost".to_string(),
            visible: false,
            ..Default::default()
        },
        // Fully blank placeholder, must not emit a block.
        Experience {
            id: "blank".to_string(),
            ..Default::default()
        },
    ];
    doc.education = vec![Education {
        id: "u1".to_string(),
        institution: "MIT".to_string(),
        ..Default::default()
    }];
    doc
}

fn ids(blocks: &[Block]) -> Vec<String> {
    blocks.iter().map(Block::id).collect()
}

#[test]
fn main_stream_order_and_filtering() {
    let doc = doc_with_content();
    let titles = locale::resolve(&doc);
    let blocks = main_blocks(&doc, &titles);
    assert_eq!(
        ids(&blocks),
        [
            "header",
            "statement",
            "title-experiences",
            "exp-e1",
            "title-education",
            "edu-u1",
        ]
    );
}

#[test]
fn hidden_section_emits_nothing() {
    let mut doc = doc_with_content();
    doc.sections.experiences = false;
    let titles = locale::resolve(&doc);
    let blocks = main_blocks(&doc, &titles);
    assert!(!blocks.iter().any(|b| b.section() == Some(SectionId::Experiences)));
}

#[test]
fn empty_document_yields_header_and_sentinel() {
    let doc = CvDocument::default();
    let titles = locale::resolve(&doc);
    let blocks = main_blocks(&doc, &titles);
    assert_eq!(ids(&blocks), ["header", "empty"]);
}

#[test]
fn sidebar_photo_requires_path_and_visibility() {
    let mut doc = CvDocument::default();
    let titles = locale::resolve(&doc);
    let rows = CompetencyRows::new();

    doc.personal.photo_path = Some("me.jpg".to_string());
    doc.personal.photo_visible = true;
    assert_eq!(sidebar_blocks(&doc, &titles, &rows).first(), Some(&Block::Photo));

    doc.personal.photo_visible = false;
    assert!(!sidebar_blocks(&doc, &titles, &rows).contains(&Block::Photo));

    doc.personal.photo_path = None;
    doc.personal.photo_visible = true;
    assert!(!sidebar_blocks(&doc, &titles, &rows).contains(&Block::Photo));
}

#[test]
fn contact_items_follow_fixed_order() {
    let mut doc = CvDocument::default();
    doc.personal.website.value = "example.com".to_string();
    doc.personal.email.value = "a@b.c".to_string();
    doc.personal.phone.visible = false;
    doc.personal.phone.value = "123".to_string();
    let titles = locale::resolve(&doc);
    let blocks = sidebar_blocks(&doc, &titles, &CompetencyRows::new());
    assert_eq!(
        ids(&blocks),
        ["title-personalInfo", "contact-email", "contact-website"]
    );
}

#[test]
fn competencies_group_by_level_with_row_fallback() {
    let mut doc = CvDocument::default();
    doc.competencies = vec![
        Competency {
            id: "1".to_string(),
            name: "Rust".to_string(),
            level: CompetencyLevel::Expert,
            visible: true,
        },
        Competency {
            id: "2".to_string(),
            name: "SQL".to_string(),
            level: CompetencyLevel::Expert,
            visible: true,
        },
    ];
    let titles = locale::resolve(&doc);

    // No wrapping supplied: one name per row.
    let blocks = sidebar_blocks(&doc, &titles, &CompetencyRows::new());
    assert_eq!(
        ids(&blocks),
        [
            "title-competencies",
            "level-expert",
            "row-expert-0",
            "row-expert-1",
        ]
    );

    // Supplied wrapping wins.
    let mut rows = HashMap::new();
    rows.insert(
        CompetencyLevel::Expert,
        vec![vec!["Rust".to_string(), "SQL".to_string()]],
    );
    let blocks = sidebar_blocks(&doc, &titles, &rows);
    assert_eq!(
        ids(&blocks),
        ["title-competencies", "level-expert", "row-expert-0"]
    );
}

#[test]
fn preference_items_are_label_value_formatted() {
    let mut doc = CvDocument::default();
    doc.preferences.work_mode.value = "Remote".to_string();
    let titles = locale::resolve(&doc);
    let blocks = sidebar_blocks(&doc, &titles, &CompetencyRows::new());
    match &blocks[1] {
        Block::PreferenceItem { text, .. } => assert_eq!(text, "Work mode: Remote"),
        other => panic!("expected preference item, got {other:?}"),
    }
}

#[test]
fn unified_stream_separates_sections_with_dividers() {
    let mut doc = doc_with_content();
    doc.languages = vec![SimpleItem {
        id: "l1".to_string(),
        name: "English".to_string(),
        visible: true,
    }];
    let titles = locale::resolve(&doc);
    let template = Template::single_column();
    let blocks = content_blocks(&doc, &template, &titles, &CompetencyRows::new());

    // One divider between each pair of adjacent non-empty sections:
    // header, statement, experiences, education, languages.
    let dividers = blocks.iter().filter(|b| **b == Block::Divider).count();
    assert_eq!(dividers, 4);
    assert_ne!(blocks.first(), Some(&Block::Divider));
    assert_ne!(blocks.last(), Some(&Block::Divider));
}

#[test]
fn unified_stream_empty_document_gets_sentinel() {
    let doc = CvDocument::default();
    let titles = locale::resolve(&doc);
    let template = Template::single_column();
    let blocks = content_blocks(&doc, &template, &titles, &CompetencyRows::new());
    assert_eq!(ids(&blocks), ["header", "empty"]);
}
