//! Pagination: pack an ordered block stream into fixed-height pages.
//!
//! Three variants share the same overflow rules but differ in title
//! handling: the main column repeats experience/education titles across page
//! breaks, the sidebar re-inserts every structurally necessary ancestor
//! title (section title plus level title inside competencies), and the
//! unified single-column flow does orphan prevention only.
//!
//! All variants are pure: same inputs, same pages, no state between calls.
//! Pages are recomputed from scratch whenever content, template or measured
//! heights change. A missing height reads as zero, so the algorithms always
//! terminate even before the first measurement pass has run.

use std::collections::HashMap;

use crate::block::Block;
use crate::model::CompetencyLevel;
use crate::template::SectionId;

/// An ordered list of blocks whose measured heights fit the page capacity.
pub type Page = Vec<Block>;

/// Height oracle view: block identity → measured height in a shared unit.
/// The DOM preview fills this with rendered pixel heights; the PDF path uses
/// font-metrics estimates. Missing entries are zero by contract.
#[derive(Debug, Clone, Copy)]
pub struct Heights<'a> {
    map: &'a HashMap<String, f32>,
}

impl<'a> Heights<'a> {
    pub fn new(map: &'a HashMap<String, f32>) -> Self {
        Self { map }
    }

    /// Continuation titles resolve through `measure_key` to the original
    /// title, so synthetic blocks never need a measurement of their own.
    pub fn of(&self, block: &Block) -> f32 {
        self.map
            .get(&block.measure_key())
            .copied()
            .unwrap_or(0.0)
    }
}

/// Main-column variant: orphan prevention for section titles, continuation
/// titles once a section's real title has appeared, oversized blocks alone
/// on their own page.
pub fn paginate_main(blocks: &[Block], heights: &Heights, max_height: f32) -> Vec<Page> {
    let mut pages: Vec<Page> = Vec::new();
    let mut current: Page = Vec::new();
    let mut used = 0.0f32;
    let mut seen_titles: HashMap<SectionId, Block> = HashMap::new();

    for (i, block) in blocks.iter().enumerate() {
        let h = heights.of(block);

        if let Block::SectionTitle { section, .. } = block {
            // Never leave a title stranded at the bottom: it must fit
            // together with its first item.
            let next_h = blocks.get(i + 1).map(|b| heights.of(b)).unwrap_or(0.0);
            if !current.is_empty() && used + h + next_h > max_height {
                pages.push(std::mem::take(&mut current));
                used = 0.0;
            }
            seen_titles.insert(*section, block.clone());
            current.push(block.clone());
            used += h;
            continue;
        }

        if !current.is_empty() && used + h > max_height {
            pages.push(std::mem::take(&mut current));
            used = 0.0;
            // Section already introduced on an earlier page: repeat its
            // title, but only when it still fits above the carried block.
            if let Some(title) = block.section().and_then(|s| seen_titles.get(&s)) {
                let th = heights.of(title);
                if th + h <= max_height {
                    current.push(title.continuation(pages.len()));
                    used += th;
                }
            }
        }

        current.push(block.clone());
        used += h;
    }

    if !current.is_empty() {
        pages.push(current);
    }
    pages
}

/// Sidebar variant: same rules generalized across the sidebar sections, with
/// nested title re-insertion inside competencies. The sidebar receives a
/// smaller capacity than the main column on the same page (safe bottom
/// margin).
pub fn paginate_sidebar(blocks: &[Block], heights: &Heights, max_height: f32) -> Vec<Page> {
    let mut pages: Vec<Page> = Vec::new();
    let mut current: Page = Vec::new();
    let mut used = 0.0f32;
    let mut section_titles: HashMap<SectionId, Block> = HashMap::new();
    let mut level_titles: HashMap<CompetencyLevel, Block> = HashMap::new();

    for (i, block) in blocks.iter().enumerate() {
        let h = heights.of(block);

        if block.is_title() {
            let next_h = blocks.get(i + 1).map(|b| heights.of(b)).unwrap_or(0.0);
            if !current.is_empty() && used + h + next_h > max_height {
                pages.push(std::mem::take(&mut current));
                used = 0.0;
                // A level title moved to a fresh page still needs its parent
                // section title above it.
                if let Block::LevelTitle { .. } = block {
                    if let Some(parent) = section_titles.get(&SectionId::Competencies) {
                        let th = heights.of(parent);
                        if th + h + next_h <= max_height {
                            current.push(parent.continuation(pages.len()));
                            used += th;
                        }
                    }
                }
            }
            match block {
                // Contact never repeats: one title, usually short.
                Block::SectionTitle { section, .. } if *section != SectionId::PersonalInfo => {
                    section_titles.insert(*section, block.clone());
                }
                Block::LevelTitle { level, .. } => {
                    level_titles.insert(*level, block.clone());
                }
                _ => {}
            }
            current.push(block.clone());
            used += h;
            continue;
        }

        if !current.is_empty() && used + h > max_height {
            pages.push(std::mem::take(&mut current));
            used = 0.0;
            let page = pages.len();
            match block {
                // Breaking inside competencies re-inserts both ancestors.
                Block::CompetencyRow { level, .. } => {
                    let lt = level_titles.get(level);
                    let lt_h = lt.map(|t| heights.of(t)).unwrap_or(0.0);
                    if let Some(parent) = section_titles.get(&SectionId::Competencies) {
                        let th = heights.of(parent);
                        if th + lt_h + h <= max_height {
                            current.push(parent.continuation(page));
                            used += th;
                        }
                    }
                    if let Some(lt) = lt {
                        if used + lt_h + h <= max_height {
                            current.push(lt.continuation(page));
                            used += lt_h;
                        }
                    }
                }
                _ => {
                    // Simple lists and preferences repeat their own title;
                    // a repeated title that no longer fits is dropped.
                    if let Some(title) =
                        block.section().and_then(|s| section_titles.get(&s))
                    {
                        let th = heights.of(title);
                        if th + h <= max_height {
                            current.push(title.continuation(page));
                            used += th;
                        }
                    }
                }
            }
        }

        current.push(block.clone());
        used += h;
    }

    if !current.is_empty() {
        pages.push(current);
    }
    pages
}

/// Unified single-column variant: greedy packing with orphan prevention
/// only. No title repetition; dividers are ordinary blocks and never
/// trigger an orphan check.
pub fn paginate_content(blocks: &[Block], heights: &Heights, max_height: f32) -> Vec<Page> {
    let mut pages: Vec<Page> = Vec::new();
    let mut current: Page = Vec::new();
    let mut used = 0.0f32;

    for (i, block) in blocks.iter().enumerate() {
        let h = heights.of(block);

        if block.is_title() {
            let next_h = blocks.get(i + 1).map(|b| heights.of(b)).unwrap_or(0.0);
            if !current.is_empty() && used + h + next_h > max_height {
                pages.push(std::mem::take(&mut current));
                used = 0.0;
            }
        } else if !current.is_empty() && used + h > max_height {
            pages.push(std::mem::take(&mut current));
            used = 0.0;
        }

        current.push(block.clone());
        used += h;
    }

    if !current.is_empty() {
        pages.push(current);
    }
    pages
}
