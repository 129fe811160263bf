//! Template configuration: page geometry, layout slots and design tokens.
//!
//! Templates are immutable inputs. The paginator only ever consumes the
//! capacity numbers derived here; design tokens are for measurement and
//! rendering.

use serde::{Deserialize, Serialize};

/// Points per millimeter (PDF user space is 72 dpi).
pub const MM_TO_PT: f32 = 72.0 / 25.4;

/// Closed set of section identifiers a template may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionId {
    PersonalInfo,
    ProfessionalStatement,
    Experiences,
    Education,
    Competencies,
    Languages,
    Other,
    Certifications,
    Portfolio,
    Preferences,
}

impl SectionId {
    pub fn key(self) -> &'static str {
        match self {
            SectionId::PersonalInfo => "personalInfo",
            SectionId::ProfessionalStatement => "professionalStatement",
            SectionId::Experiences => "experiences",
            SectionId::Education => "education",
            SectionId::Competencies => "competencies",
            SectionId::Languages => "languages",
            SectionId::Other => "other",
            SectionId::Certifications => "certifications",
            SectionId::Portfolio => "portfolio",
            SectionId::Preferences => "preferences",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    TwoColumn,
    SingleColumn,
}

/// Fonts, spacing and colors consumed by measurement and rendering only.
#[derive(Debug, Clone)]
pub struct DesignTokens {
    pub name_size: f32,
    pub job_title_size: f32,
    pub section_title_size: f32,
    pub level_title_size: f32,
    pub body_size: f32,
    pub small_size: f32,
    /// Line height as a multiple of font size.
    pub line_h_ratio: f32,
    /// Vertical gap after a block, in points.
    pub block_gap: f32,
    /// Height reserved for the photo block, in points.
    pub photo_size: f32,
    /// Height of a section divider, in points.
    pub divider_gap: f32,
    pub text_color: [u8; 3],
    pub muted_color: [u8; 3],
    pub accent_color: [u8; 3],
    pub sidebar_fill: [u8; 3],
}

impl Default for DesignTokens {
    fn default() -> Self {
        Self {
            name_size: 22.0,
            job_title_size: 12.0,
            section_title_size: 13.0,
            level_title_size: 10.0,
            body_size: 10.0,
            small_size: 9.0,
            line_h_ratio: 1.3,
            block_gap: 8.0,
            photo_size: 90.0,
            divider_gap: 14.0,
            text_color: [34, 34, 34],
            muted_color: [117, 117, 117],
            accent_color: [20, 164, 230],
            sidebar_fill: [243, 246, 249],
        }
    }
}

#[derive(Debug, Clone)]
pub struct Template {
    pub name: &'static str,
    pub mode: LayoutMode,
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_top_mm: f32,
    pub margin_bottom_mm: f32,
    pub margin_side_mm: f32,
    /// Two-column mode only.
    pub sidebar_width_percent: f32,
    /// Extra bottom margin for the sidebar column, two-column mode only.
    pub sidebar_safe_bottom_mm: f32,
    pub header_sections: Vec<SectionId>,
    pub sidebar_sections: Vec<SectionId>,
    pub main_sections: Vec<SectionId>,
    /// Single-column mode: the ordered unified content flow.
    pub content_sections: Vec<SectionId>,
    pub tokens: DesignTokens,
}

impl Template {
    /// A4 sidebar + main column layout.
    pub fn two_column() -> Self {
        Self {
            name: "two-column",
            mode: LayoutMode::TwoColumn,
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_top_mm: 14.0,
            margin_bottom_mm: 14.0,
            margin_side_mm: 14.0,
            sidebar_width_percent: 32.0,
            sidebar_safe_bottom_mm: 8.0,
            header_sections: vec![SectionId::PersonalInfo],
            sidebar_sections: vec![
                SectionId::Competencies,
                SectionId::Languages,
                SectionId::Other,
                SectionId::Certifications,
                SectionId::Portfolio,
                SectionId::Preferences,
            ],
            main_sections: vec![
                SectionId::ProfessionalStatement,
                SectionId::Experiences,
                SectionId::Education,
            ],
            content_sections: Vec::new(),
            tokens: DesignTokens::default(),
        }
    }

    /// A4 single unified flow with a header zone.
    pub fn single_column() -> Self {
        Self {
            name: "single-column",
            mode: LayoutMode::SingleColumn,
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_top_mm: 16.0,
            margin_bottom_mm: 16.0,
            margin_side_mm: 18.0,
            sidebar_width_percent: 0.0,
            sidebar_safe_bottom_mm: 0.0,
            header_sections: vec![SectionId::PersonalInfo],
            sidebar_sections: Vec::new(),
            main_sections: Vec::new(),
            content_sections: vec![
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
            ],
            tokens: DesignTokens::default(),
        }
    }

    /// Unknown names fall back to the default two-column template.
    pub fn by_name(name: &str) -> Self {
        match name {
            "single-column" => Self::single_column(),
            "two-column" => Self::two_column(),
            other => {
                log::warn!("unknown template '{other}', falling back to two-column");
                Self::two_column()
            }
        }
    }

    pub fn page_width_pt(&self) -> f32 {
        self.page_width_mm * MM_TO_PT
    }

    pub fn page_height_pt(&self) -> f32 {
        self.page_height_mm * MM_TO_PT
    }

    pub fn margin_top_pt(&self) -> f32 {
        self.margin_top_mm * MM_TO_PT
    }

    pub fn margin_bottom_pt(&self) -> f32 {
        self.margin_bottom_mm * MM_TO_PT
    }

    pub fn margin_side_pt(&self) -> f32 {
        self.margin_side_mm * MM_TO_PT
    }

    /// Usable height for the main column (and the unified flow).
    pub fn main_capacity_pt(&self) -> f32 {
        self.page_height_pt() - self.margin_top_pt() - self.margin_bottom_pt()
    }

    /// Usable height for the sidebar: the main capacity minus the extra
    /// safe-bottom margin, so the sidebar never collides with the main
    /// column's bottom edge or a page-number footer.
    pub fn sidebar_capacity_pt(&self) -> f32 {
        self.main_capacity_pt() - self.sidebar_safe_bottom_mm * MM_TO_PT
    }

    /// Full sidebar band width, including its inner padding.
    pub fn sidebar_width_pt(&self) -> f32 {
        self.page_width_pt() * self.sidebar_width_percent / 100.0
    }

    /// Text width inside the sidebar band.
    pub fn sidebar_text_width_pt(&self) -> f32 {
        self.sidebar_width_pt() - 2.0 * self.margin_side_pt()
    }

    /// Text width of the main column (two-column mode).
    pub fn main_text_width_pt(&self) -> f32 {
        self.page_width_pt() - self.sidebar_width_pt() - 2.0 * self.margin_side_pt()
    }

    /// Text width of the unified flow (single-column mode).
    pub fn content_text_width_pt(&self) -> f32 {
        self.page_width_pt() - 2.0 * self.margin_side_pt()
    }
}
