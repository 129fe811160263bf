//! The block model: the paginator's unit of layout.
//!
//! One closed sum type covers the whole vocabulary; the main, sidebar and
//! unified content streams are plain `Vec<Block>` over it, so renderer
//! dispatch is exhaustive-checked. Every block carries a stable string
//! identity used as the measurement key. Continuation titles are synthetic
//! additions with a page-indexed id, but they measure as the original title
//! (same visual kind, same height).

use crate::model::{CompetencyLevel, Education, Experience, PreferenceKind};
use crate::template::SectionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Email,
    Phone,
    Location,
    Linkedin,
    Website,
}

impl ContactKind {
    /// Fixed display order of contact fields.
    pub const ALL: [ContactKind; 5] = [
        ContactKind::Email,
        ContactKind::Phone,
        ContactKind::Location,
        ContactKind::Linkedin,
        ContactKind::Website,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ContactKind::Email => "email",
            ContactKind::Phone => "phone",
            ContactKind::Location => "location",
            ContactKind::Linkedin => "linkedin",
            ContactKind::Website => "website",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Always emitted, even for an empty document.
    Header,
    Statement(String),
    SectionTitle {
        section: SectionId,
        text: String,
        /// Page index when this is a synthetic continuation title.
        continuation: Option<usize>,
    },
    ExperienceItem(Experience),
    EducationItem(Education),
    Photo,
    ContactItem {
        kind: ContactKind,
        value: String,
    },
    LevelTitle {
        level: CompetencyLevel,
        text: String,
        continuation: Option<usize>,
    },
    /// One pre-wrapped row of competency chip names.
    CompetencyRow {
        level: CompetencyLevel,
        index: usize,
        names: Vec<String>,
    },
    /// Item of one of the simple list sections.
    ListItem {
        section: SectionId,
        id: String,
        text: String,
    },
    /// Pre-formatted as "<Label>: <Value>".
    PreferenceItem {
        kind: PreferenceKind,
        text: String,
    },
    /// Single-column mode only: separator between sections.
    Divider,
    /// Sentinel for an all-empty document; renders a placeholder message.
    Empty,
}

impl Block {
    /// Stable identity, unique within a paginated result.
    pub fn id(&self) -> String {
        match self {
            Block::Header => "header".to_string(),
            Block::Statement(_) => "statement".to_string(),
            Block::SectionTitle {
                section,
                continuation,
                ..
            } => match continuation {
                Some(page) => format!("title-{}#p{page}", section.key()),
                None => format!("title-{}", section.key()),
            },
            Block::ExperienceItem(exp) => format!("exp-{}", exp.id),
            Block::EducationItem(edu) => format!("edu-{}", edu.id),
            Block::Photo => "photo".to_string(),
            Block::ContactItem { kind, .. } => format!("contact-{}", kind.key()),
            Block::LevelTitle {
                level,
                continuation,
                ..
            } => match continuation {
                Some(page) => format!("level-{}#p{page}", level.key()),
                None => format!("level-{}", level.key()),
            },
            Block::CompetencyRow { level, index, .. } => {
                format!("row-{}-{index}", level.key())
            }
            Block::ListItem { section, id, .. } => format!("item-{}-{id}", section.key()),
            Block::PreferenceItem { kind, .. } => format!("pref-{}", kind.key()),
            Block::Divider => "divider".to_string(),
            Block::Empty => "empty".to_string(),
        }
    }

    /// Measurement key: like `id()`, but continuation titles resolve to the
    /// original title so a height oracle never has to pre-measure a block
    /// that only exists after pagination.
    pub fn measure_key(&self) -> String {
        match self {
            Block::SectionTitle { section, .. } => format!("title-{}", section.key()),
            Block::LevelTitle { level, .. } => format!("level-{}", level.key()),
            other => other.id(),
        }
    }

    /// Section a block belongs to, for orphan and continuation decisions.
    pub fn section(&self) -> Option<SectionId> {
        match self {
            Block::Header | Block::Photo | Block::Divider | Block::Empty => None,
            Block::Statement(_) => Some(SectionId::ProfessionalStatement),
            Block::SectionTitle { section, .. } => Some(*section),
            Block::ExperienceItem(_) => Some(SectionId::Experiences),
            Block::EducationItem(_) => Some(SectionId::Education),
            Block::ContactItem { .. } => Some(SectionId::PersonalInfo),
            Block::LevelTitle { .. } | Block::CompetencyRow { .. } => {
                Some(SectionId::Competencies)
            }
            Block::ListItem { section, .. } => Some(*section),
            Block::PreferenceItem { .. } => Some(SectionId::Preferences),
        }
    }

    /// Title blocks are subject to orphan prevention.
    pub fn is_title(&self) -> bool {
        matches!(
            self,
            Block::SectionTitle { .. } | Block::LevelTitle { .. }
        )
    }

    pub fn is_continuation(&self) -> bool {
        matches!(
            self,
            Block::SectionTitle {
                continuation: Some(_),
                ..
            } | Block::LevelTitle {
                continuation: Some(_),
                ..
            }
        )
    }

    /// Synthetic repeat of a title for the top of a later page. Panics are
    /// avoided by returning a clone for non-title blocks (never constructed
    /// by the paginators).
    pub fn continuation(&self, page: usize) -> Block {
        match self {
            Block::SectionTitle { section, text, .. } => Block::SectionTitle {
                section: *section,
                text: text.clone(),
                continuation: Some(page),
            },
            Block::LevelTitle { level, text, .. } => Block::LevelTitle {
                level: *level,
                text: text.clone(),
                continuation: Some(page),
            },
            other => other.clone(),
        }
    }
}
