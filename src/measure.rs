//! Font-metrics height estimation: the height oracle for the non-DOM path.
//!
//! The DOM preview measures real rendered elements; this module replicates
//! that contract with approximate Helvetica metrics so the PDF renderer can
//! feed the same paginators. Both the estimator and the PDF drawing code go
//! through `Measurer::layout_block`, so a block's estimated height and its
//! drawn height can never drift apart.

use std::collections::HashMap;

use crate::block::Block;
use crate::builder::CompetencyRows;
use crate::locale::SectionTitles;
use crate::model::{CompetencyLevel, CvDocument};
use crate::template::DesignTokens;

/// Approximate Helvetica advance widths at 1000 units/em for WinAnsi chars
/// 32..=255.
fn helvetica_widths() -> Vec<f32> {
    (32u8..=255u8)
        .map(|b| match b {
            32 => 278.0,                          // space
            33..=47 => 333.0,                     // punctuation
            48..=57 => 556.0,                     // digits
            58..=64 => 333.0,                     // more punctuation
            73 | 74 => 278.0,                     // I J (narrow uppercase)
            77 => 833.0,                          // M (wide)
            65..=90 => 667.0,                     // uppercase A-Z (average)
            91..=96 => 333.0,                     // brackets etc.
            102 | 105 | 106 | 108 | 116 => 278.0, // narrow lowercase: f i j l t
            109 | 119 => 833.0,                   // m w (wide)
            97..=122 => 556.0,                    // lowercase a-z (average)
            _ => 556.0,
        })
        .collect()
}

/// Helvetica-Bold runs wider across the board.
fn helvetica_bold_widths() -> Vec<f32> {
    (32u8..=255u8)
        .map(|b| match b {
            32 => 278.0,
            33..=47 => 333.0,
            48..=57 => 556.0,
            58..=64 => 333.0,
            73 | 74 => 278.0,
            77 => 889.0,
            65..=90 => 722.0,
            91..=96 => 389.0,
            102 | 105 | 106 | 108 | 116 => 333.0,
            109 | 119 => 889.0,
            97..=122 => 611.0,
            _ => 611.0,
        })
        .collect()
}

/// Map a single Unicode char to its WinAnsi byte, or 0 if unmappable.
pub(crate) fn char_to_winansi(c: char) -> u8 {
    match c as u32 {
        0x0020..=0x007F => c as u8,
        0x00A0..=0x00FF => c as u8,
        0x20AC => 0x80,
        0x201A => 0x82,
        0x0192 => 0x83,
        0x201E => 0x84,
        0x2026 => 0x85,
        0x2020 => 0x86,
        0x2021 => 0x87,
        0x02C6 => 0x88,
        0x2030 => 0x89,
        0x0160 => 0x8A,
        0x2039 => 0x8B,
        0x0152 => 0x8C,
        0x017D => 0x8E,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95, // bullet
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x02DC => 0x98,
        0x2122 => 0x99,
        0x0161 => 0x9A,
        0x203A => 0x9B,
        0x0153 => 0x9C,
        0x017E => 0x9E,
        0x0178 => 0x9F,
        _ => 0,
    }
}

#[derive(Debug, Clone)]
pub struct FontMetrics {
    widths_1000: Vec<f32>,
}

impl FontMetrics {
    pub fn helvetica() -> Self {
        Self {
            widths_1000: helvetica_widths(),
        }
    }

    pub fn helvetica_bold() -> Self {
        Self {
            widths_1000: helvetica_bold_widths(),
        }
    }

    fn char_width_1000(&self, ch: char) -> f32 {
        let byte = char_to_winansi(ch);
        if byte >= 32 {
            self.widths_1000[(byte - 32) as usize]
        } else {
            0.0
        }
    }

    pub fn text_width(&self, text: &str, font_size: f32) -> f32 {
        text.chars()
            .map(|ch| self.char_width_1000(ch) * font_size / 1000.0)
            .sum()
    }

    /// Greedy word wrap. A word wider than the line goes on a line of its
    /// own rather than being broken mid-word.
    pub fn wrap(&self, text: &str, font_size: f32, max_width: f32) -> Vec<String> {
        let space_w = self.char_width_1000(' ') * font_size / 1000.0;
        let mut lines: Vec<String> = Vec::new();
        let mut line = String::new();
        let mut line_w = 0.0f32;

        for word in text.split_whitespace() {
            let ww = self.text_width(word, font_size);
            if line.is_empty() {
                line.push_str(word);
                line_w = ww;
            } else if line_w + space_w + ww <= max_width {
                line.push(' ');
                line.push_str(word);
                line_w += space_w + ww;
            } else {
                lines.push(std::mem::take(&mut line));
                line.push_str(word);
                line_w = ww;
            }
        }
        if !line.is_empty() {
            lines.push(line);
        }
        lines
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineColor {
    Text,
    Muted,
    Accent,
}

#[derive(Debug, Clone)]
pub(crate) struct LayoutLine {
    pub text: String,
    pub size: f32,
    pub bold: bool,
    pub color: LineColor,
}

/// Resolved flow layout for one block at a given column width.
#[derive(Debug, Clone)]
pub(crate) struct BlockLayout {
    pub lines: Vec<LayoutLine>,
    /// Total advance, including the trailing block gap.
    pub height: f32,
}

pub(crate) struct Measurer {
    pub regular: FontMetrics,
    pub bold: FontMetrics,
}

impl Measurer {
    pub fn new() -> Self {
        Self {
            regular: FontMetrics::helvetica(),
            bold: FontMetrics::helvetica_bold(),
        }
    }

    fn metrics(&self, bold: bool) -> &FontMetrics {
        if bold { &self.bold } else { &self.regular }
    }

    fn push_wrapped(
        &self,
        lines: &mut Vec<LayoutLine>,
        text: &str,
        size: f32,
        bold: bool,
        color: LineColor,
        width: f32,
    ) {
        for line in self.metrics(bold).wrap(text, size, width) {
            lines.push(LayoutLine {
                text: line,
                size,
                bold,
                color,
            });
        }
    }

    /// Lay a block out at the given column width. The returned height is the
    /// exact advance the PDF renderer will use when drawing it. The document
    /// is needed because the header block carries no payload of its own.
    pub fn layout_block(
        &self,
        block: &Block,
        doc: &CvDocument,
        titles: &SectionTitles,
        tokens: &DesignTokens,
        width: f32,
    ) -> BlockLayout {
        let t = tokens;
        let mut lines: Vec<LayoutLine> = Vec::new();

        match block {
            Block::Header => {
                let name = doc.personal.name.trim();
                if !name.is_empty() {
                    self.push_wrapped(&mut lines, name, t.name_size, true, LineColor::Text, width);
                }
                let job = doc.personal.job_title.trim();
                if !job.is_empty() {
                    self.push_wrapped(
                        &mut lines,
                        job,
                        t.job_title_size,
                        false,
                        LineColor::Muted,
                        width,
                    );
                }
                // An all-blank header contributes no height at all.
            }
            Block::Statement(text) => {
                self.push_wrapped(&mut lines, text, t.body_size, false, LineColor::Text, width);
            }
            Block::SectionTitle { text, .. } => {
                self.push_wrapped(
                    &mut lines,
                    text,
                    t.section_title_size,
                    true,
                    LineColor::Accent,
                    width,
                );
            }
            Block::ExperienceItem(exp) => {
                if !exp.title.trim().is_empty() {
                    self.push_wrapped(
                        &mut lines,
                        exp.title.trim(),
                        t.body_size,
                        true,
                        LineColor::Text,
                        width,
                    );
                }
                let kind_label = titles.experience_kind(&exp.kind);
                let company_line = match (exp.company.trim(), kind_label) {
                    ("", "") => String::new(),
                    (c, "") => c.to_string(),
                    ("", k) => k.to_string(),
                    (c, k) => format!("{c} · {k}"),
                };
                if !company_line.is_empty() {
                    self.push_wrapped(
                        &mut lines,
                        &company_line,
                        t.body_size,
                        false,
                        LineColor::Text,
                        width,
                    );
                }
                let dates = exp.date_range(&titles.present);
                if !dates.is_empty() {
                    self.push_wrapped(
                        &mut lines,
                        &dates,
                        t.small_size,
                        false,
                        LineColor::Muted,
                        width,
                    );
                }
                if !exp.description.trim().is_empty() {
                    self.push_wrapped(
                        &mut lines,
                        exp.description.trim(),
                        t.body_size,
                        false,
                        LineColor::Text,
                        width,
                    );
                }
                let tags: Vec<&str> = exp
                    .tags
                    .iter()
                    .filter(|tag| tag.shown())
                    .map(|tag| tag.name.trim())
                    .collect();
                if !tags.is_empty() {
                    self.push_wrapped(
                        &mut lines,
                        &tags.join(" · "),
                        t.small_size,
                        false,
                        LineColor::Muted,
                        width,
                    );
                }
            }
            Block::EducationItem(edu) => {
                if !edu.degree.trim().is_empty() {
                    self.push_wrapped(
                        &mut lines,
                        edu.degree.trim(),
                        t.body_size,
                        true,
                        LineColor::Text,
                        width,
                    );
                }
                if !edu.institution.trim().is_empty() {
                    self.push_wrapped(
                        &mut lines,
                        edu.institution.trim(),
                        t.body_size,
                        false,
                        LineColor::Text,
                        width,
                    );
                }
                let years = edu.date_range();
                if !years.is_empty() {
                    self.push_wrapped(
                        &mut lines,
                        &years,
                        t.small_size,
                        false,
                        LineColor::Muted,
                        width,
                    );
                }
                if !edu.description.trim().is_empty() {
                    self.push_wrapped(
                        &mut lines,
                        edu.description.trim(),
                        t.body_size,
                        false,
                        LineColor::Text,
                        width,
                    );
                }
                let tags: Vec<&str> = edu
                    .tags
                    .iter()
                    .filter(|tag| tag.shown())
                    .map(|tag| tag.name.trim())
                    .collect();
                if !tags.is_empty() {
                    self.push_wrapped(
                        &mut lines,
                        &tags.join(" · "),
                        t.small_size,
                        false,
                        LineColor::Muted,
                        width,
                    );
                }
            }
            Block::Photo => {
                return BlockLayout {
                    lines,
                    height: t.photo_size + t.block_gap,
                };
            }
            Block::ContactItem { value, .. } => {
                self.push_wrapped(&mut lines, value, t.small_size, false, LineColor::Text, width);
            }
            Block::LevelTitle { text, .. } => {
                self.push_wrapped(
                    &mut lines,
                    text,
                    t.level_title_size,
                    true,
                    LineColor::Muted,
                    width,
                );
            }
            Block::CompetencyRow { names, .. } => {
                self.push_wrapped(
                    &mut lines,
                    &names.join(" · "),
                    t.small_size,
                    false,
                    LineColor::Text,
                    width,
                );
            }
            Block::ListItem { text, .. } => {
                self.push_wrapped(&mut lines, text, t.small_size, false, LineColor::Text, width);
            }
            Block::PreferenceItem { text, .. } => {
                self.push_wrapped(&mut lines, text, t.small_size, false, LineColor::Text, width);
            }
            Block::Divider => {
                return BlockLayout {
                    lines,
                    height: t.divider_gap,
                };
            }
            Block::Empty => {
                self.push_wrapped(
                    &mut lines,
                    &titles.empty_state,
                    t.body_size,
                    false,
                    LineColor::Muted,
                    width,
                );
            }
        }

        let text_h: f32 = lines.iter().map(|l| l.size * t.line_h_ratio).sum();
        let height = if lines.is_empty() {
            0.0
        } else {
            text_h + t.block_gap
        };
        BlockLayout { lines, height }
    }
}

/// Estimate heights for every block in a stream, keyed by block identity.
/// This is the PDF path's height oracle; the DOM preview supplies measured
/// pixel heights through the same map shape instead.
pub fn estimate_heights(
    blocks: &[Block],
    doc: &CvDocument,
    titles: &SectionTitles,
    tokens: &DesignTokens,
    width: f32,
) -> HashMap<String, f32> {
    let measurer = Measurer::new();
    blocks
        .iter()
        .map(|b| {
            (
                b.measure_key(),
                measurer.layout_block(b, doc, titles, tokens, width).height,
            )
        })
        .collect()
}

/// Pack visible competency names into chip rows that fit the sidebar width.
/// This is the external row-wrapping input of the sidebar builder.
pub fn wrap_rows(doc: &CvDocument, tokens: &DesignTokens, width: f32) -> CompetencyRows {
    let metrics = FontMetrics::helvetica();
    let sep_w = metrics.text_width(" · ", tokens.small_size);
    let mut rows: CompetencyRows = HashMap::new();

    for level in CompetencyLevel::ALL {
        let mut level_rows: Vec<Vec<String>> = Vec::new();
        let mut row: Vec<String> = Vec::new();
        let mut row_w = 0.0f32;

        for comp in doc
            .competencies
            .iter()
            .filter(|c| c.shown() && c.level == level)
        {
            let name = comp.name.trim().to_string();
            let w = metrics.text_width(&name, tokens.small_size);
            if row.is_empty() {
                row_w = w;
                row.push(name);
            } else if row_w + sep_w + w <= width {
                row_w += sep_w + w;
                row.push(name);
            } else {
                level_rows.push(std::mem::take(&mut row));
                row_w = w;
                row.push(name);
            }
        }
        if !row.is_empty() {
            level_rows.push(row);
        }
        if !level_rows.is_empty() {
            rows.insert(level, level_rows);
        }
    }
    rows
}

/// One name per row for every level: the trivial wrapping used when no
/// measured wrapping is available.
pub fn single_rows(doc: &CvDocument) -> CompetencyRows {
    let mut rows: CompetencyRows = HashMap::new();
    for level in CompetencyLevel::ALL {
        let level_rows: Vec<Vec<String>> = doc
            .competencies
            .iter()
            .filter(|c| c.shown() && c.level == level)
            .map(|c| vec![c.name.trim().to_string()])
            .collect();
        if !level_rows.is_empty() {
            rows.insert(level, level_rows);
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Competency;

    #[test]
    fn wrap_respects_width() {
        let m = FontMetrics::helvetica();
        let lines = m.wrap("alpha beta gamma delta", 10.0, 40.0);
        assert!(lines.len() > 1);
        for line in &lines {
            // A single word may exceed the width; joined words must not.
            if line.contains(' ') {
                assert!(m.text_width(line, 10.0) <= 40.0);
            }
        }
    }

    #[test]
    fn wrap_empty_text_yields_no_lines() {
        let m = FontMetrics::helvetica();
        assert!(m.wrap("", 10.0, 100.0).is_empty());
        assert!(m.wrap("   ", 10.0, 100.0).is_empty());
    }

    #[test]
    fn oversized_word_gets_own_line() {
        let m = FontMetrics::helvetica();
        let lines = m.wrap("supercalifragilistic a", 12.0, 20.0);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "supercalifragilistic");
    }

    #[test]
    fn single_rows_partitions_by_level() {
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
                name: "Go".to_string(),
                level: CompetencyLevel::Advanced,
                visible: true,
            },
            Competency {
                id: "3".to_string(),
                name: "Hidden".to_string(),
                level: CompetencyLevel::Advanced,
                visible: false,
            },
        ];
        let rows = single_rows(&doc);
        assert_eq!(rows[&CompetencyLevel::Expert].len(), 1);
        assert_eq!(rows[&CompetencyLevel::Advanced].len(), 1);
        assert!(!rows.contains_key(&CompetencyLevel::Proficient));
    }
}
