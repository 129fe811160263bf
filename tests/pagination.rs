//! End-to-end pagination behavior over hand-measured block streams.

use std::collections::HashMap;

use cvpress::block::Block;
use cvpress::model::{CompetencyLevel, Experience};
use cvpress::paginate::{Heights, Page, paginate_content, paginate_main, paginate_sidebar};
use cvpress::template::SectionId;

fn title(section: SectionId) -> Block {
    Block::SectionTitle {
        section,
        text: "T".to_string(),
        continuation: None,
    }
}

fn level_title(level: CompetencyLevel) -> Block {
    Block::LevelTitle {
        level,
        text: "L".to_string(),
        continuation: None,
    }
}

fn row(level: CompetencyLevel, index: usize) -> Block {
    Block::CompetencyRow {
        level,
        index,
        names: vec!["x".to_string()],
    }
}

fn exp(id: &str) -> Block {
    Block::ExperienceItem(Experience {
        id: id.to_string(),
        company: "Acme".to_string(),
        ..Default::default()
    })
}

fn heights(pairs: &[(&str, f32)]) -> HashMap<String, f32> {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

fn ids(page: &Page) -> Vec<String> {
    page.iter().map(Block::id).collect()
}

#[test]
fn short_content_stays_on_one_page() {
    let blocks = vec![Block::Header, title(SectionId::Experiences), exp("a")];
    let map = heights(&[("header", 40.0), ("title-experiences", 30.0), ("exp-a", 50.0)]);
    let pages = paginate_main(&blocks, &Heights::new(&map), 200.0);
    assert_eq!(pages.len(), 1);
    assert_eq!(ids(&pages[0]), ["header", "title-experiences", "exp-a"]);
}

#[test]
fn overflow_mid_section_carries_title_to_next_page() {
    // 40 + 30 + 120 = 190 fits in 200; the second item forces a break and
    // arrives under a repeated title (30 + 120 = 150).
    let blocks = vec![Block::Header, title(SectionId::Experiences), exp("a"), exp("b")];
    let map = heights(&[
        ("header", 40.0),
        ("title-experiences", 30.0),
        ("exp-a", 120.0),
        ("exp-b", 120.0),
    ]);
    let pages = paginate_main(&blocks, &Heights::new(&map), 200.0);
    assert_eq!(pages.len(), 2);
    assert_eq!(ids(&pages[0]), ["header", "title-experiences", "exp-a"]);
    assert_eq!(ids(&pages[1]), ["title-experiences#p1", "exp-b"]);
}

#[test]
fn overflow_repeats_section_title_as_continuation() {
    let blocks = vec![
        title(SectionId::Experiences),
        exp("a"),
        exp("b"),
        exp("c"),
    ];
    let map = heights(&[
        ("title-experiences", 20.0),
        ("exp-a", 50.0),
        ("exp-b", 50.0),
        ("exp-c", 50.0),
    ]);
    let pages = paginate_main(&blocks, &Heights::new(&map), 100.0);
    assert_eq!(pages.len(), 3);
    assert_eq!(ids(&pages[0]), ["title-experiences", "exp-a"]);
    assert_eq!(ids(&pages[1]), ["title-experiences#p1", "exp-b"]);
    assert_eq!(ids(&pages[2]), ["title-experiences#p2", "exp-c"]);
    assert!(pages[1][0].is_continuation());
    // A continuation measures as the original title.
    assert_eq!(pages[1][0].measure_key(), "title-experiences");
}

#[test]
fn title_is_never_stranded_at_page_bottom() {
    let blocks = vec![Block::Header, title(SectionId::Experiences), exp("a")];
    let map = heights(&[("header", 90.0), ("title-experiences", 20.0), ("exp-a", 30.0)]);
    let pages = paginate_main(&blocks, &Heights::new(&map), 100.0);
    assert_eq!(pages.len(), 2);
    assert_eq!(ids(&pages[0]), ["header"]);
    assert_eq!(ids(&pages[1]), ["title-experiences", "exp-a"]);
}

#[test]
fn oversized_block_occupies_a_page_alone() {
    let blocks = vec![Block::Header, exp("big"), exp("after")];
    let map = heights(&[("header", 10.0), ("exp-big", 500.0), ("exp-after", 10.0)]);
    let pages = paginate_main(&blocks, &Heights::new(&map), 100.0);
    assert_eq!(pages.len(), 3);
    assert_eq!(ids(&pages[1]), ["exp-big"]);
    assert_eq!(ids(&pages[2]), ["exp-after"]);
}

#[test]
fn sidebar_break_reinserts_section_and_level_titles() {
    let blocks = vec![
        title(SectionId::Competencies),
        level_title(CompetencyLevel::Expert),
        row(CompetencyLevel::Expert, 0),
        row(CompetencyLevel::Expert, 1),
        row(CompetencyLevel::Expert, 2),
    ];
    let map = heights(&[
        ("title-competencies", 20.0),
        ("level-expert", 15.0),
        ("row-expert-0", 40.0),
        ("row-expert-1", 40.0),
        ("row-expert-2", 40.0),
    ]);
    let pages = paginate_sidebar(&blocks, &Heights::new(&map), 100.0);
    assert_eq!(pages.len(), 3);
    assert_eq!(
        ids(&pages[0]),
        ["title-competencies", "level-expert", "row-expert-0"]
    );
    assert_eq!(
        ids(&pages[1]),
        ["title-competencies#p1", "level-expert#p1", "row-expert-1"]
    );
    assert_eq!(
        ids(&pages[2]),
        ["title-competencies#p2", "level-expert#p2", "row-expert-2"]
    );
}

#[test]
fn sidebar_level_title_break_carries_parent_title() {
    // The level title itself triggers the orphan flush; its parent section
    // title must come along to the fresh page.
    let blocks = vec![
        title(SectionId::Competencies),
        level_title(CompetencyLevel::Expert),
        row(CompetencyLevel::Expert, 0),
        level_title(CompetencyLevel::Advanced),
        row(CompetencyLevel::Advanced, 0),
    ];
    let map = heights(&[
        ("title-competencies", 20.0),
        ("level-expert", 15.0),
        ("row-expert-0", 50.0),
        ("level-advanced", 15.0),
        ("row-advanced-0", 50.0),
    ]);
    let pages = paginate_sidebar(&blocks, &Heights::new(&map), 100.0);
    assert_eq!(pages.len(), 2);
    assert_eq!(
        ids(&pages[1]),
        ["title-competencies#p1", "level-advanced", "row-advanced-0"]
    );
}

#[test]
fn sidebar_drops_repeated_title_that_no_longer_fits() {
    let blocks = vec![
        title(SectionId::Languages),
        Block::ListItem {
            section: SectionId::Languages,
            id: "a".to_string(),
            text: "a".to_string(),
        },
        Block::ListItem {
            section: SectionId::Languages,
            id: "b".to_string(),
            text: "b".to_string(),
        },
    ];
    let map = heights(&[
        ("title-languages", 30.0),
        ("item-languages-a", 60.0),
        ("item-languages-b", 90.0),
    ]);
    let pages = paginate_sidebar(&blocks, &Heights::new(&map), 100.0);
    assert_eq!(pages.len(), 2);
    // 30 + 90 > 100: the repeat is silently dropped.
    assert_eq!(ids(&pages[1]), ["item-languages-b"]);
}

#[test]
fn unified_flow_never_repeats_titles() {
    let blocks = vec![
        title(SectionId::Experiences),
        exp("a"),
        exp("b"),
    ];
    let map = heights(&[
        ("title-experiences", 20.0),
        ("exp-a", 70.0),
        ("exp-b", 70.0),
    ]);
    let pages = paginate_content(&blocks, &Heights::new(&map), 100.0);
    assert_eq!(pages.len(), 2);
    assert_eq!(ids(&pages[1]), ["exp-b"]);
    assert!(pages.iter().flatten().all(|b| !b.is_continuation()));
}

#[test]
fn pagination_is_deterministic() {
    let blocks = vec![
        Block::Header,
        title(SectionId::Experiences),
        exp("a"),
        exp("b"),
        exp("c"),
    ];
    let map = heights(&[
        ("header", 30.0),
        ("title-experiences", 20.0),
        ("exp-a", 50.0),
        ("exp-b", 60.0),
        ("exp-c", 40.0),
    ]);
    let first = paginate_main(&blocks, &Heights::new(&map), 120.0);
    let second = paginate_main(&blocks, &Heights::new(&map), 120.0);
    assert_eq!(first, second);
}

#[test]
fn every_input_block_appears_exactly_once_in_order() {
    let blocks = vec![
        Block::Header,
        title(SectionId::Experiences),
        exp("a"),
        exp("b"),
        title(SectionId::Education),
        exp("c"),
    ];
    let map = heights(&[
        ("header", 30.0),
        ("title-experiences", 20.0),
        ("exp-a", 50.0),
        ("exp-b", 60.0),
        ("title-education", 20.0),
        ("exp-c", 40.0),
    ]);
    let pages = paginate_main(&blocks, &Heights::new(&map), 90.0);

    let flattened: Vec<String> = pages
        .iter()
        .flatten()
        .filter(|b| !b.is_continuation())
        .map(Block::id)
        .collect();
    let input: Vec<String> = blocks.iter().map(Block::id).collect();
    assert_eq!(flattened, input);
}

#[test]
fn shrinking_capacity_never_reduces_page_count() {
    let blocks = vec![
        Block::Header,
        title(SectionId::Experiences),
        exp("a"),
        exp("b"),
        exp("c"),
    ];
    let map = heights(&[
        ("header", 30.0),
        ("title-experiences", 20.0),
        ("exp-a", 50.0),
        ("exp-b", 60.0),
        ("exp-c", 40.0),
    ]);
    let h = Heights::new(&map);
    let mut prev = paginate_main(&blocks, &h, 300.0).len();
    for max in [200.0, 150.0, 120.0, 90.0, 60.0] {
        let n = paginate_main(&blocks, &h, max).len();
        assert!(n >= prev, "pages dropped from {prev} to {n} at capacity {max}");
        prev = n;
    }
}

#[test]
fn empty_document_always_fills_exactly_one_page() {
    let doc = cvpress::model::CvDocument::default();
    let titles = cvpress::locale::resolve(&doc);
    let blocks = cvpress::builder::main_blocks(&doc, &titles);
    assert_eq!(ids(&blocks), ["header", "empty"]);

    let map = heights(&[("header", 40.0), ("empty", 20.0)]);
    for max in [1000.0, 100.0, 60.0] {
        let pages = paginate_main(&blocks, &Heights::new(&map), max);
        assert_eq!(pages.len(), 1, "at capacity {max}");
        assert_eq!(ids(&pages[0]), ["header", "empty"]);
    }
    // Below their combined height the two blocks still come out, just split.
    let pages = paginate_main(&blocks, &Heights::new(&map), 10.0);
    assert!(!pages.is_empty());
    let flat: Vec<String> = pages.iter().flatten().map(Block::id).collect();
    assert_eq!(flat, ["header", "empty"]);
}

#[test]
fn pages_respect_capacity_unless_a_single_block_exceeds_it() {
    let blocks = vec![
        title(SectionId::Experiences),
        exp("a"),
        exp("b"),
        exp("c"),
        exp("d"),
    ];
    let map = heights(&[
        ("title-experiences", 20.0),
        ("exp-a", 45.0),
        ("exp-b", 45.0),
        ("exp-c", 150.0),
        ("exp-d", 10.0),
    ]);
    let max = 100.0;
    let h = Heights::new(&map);
    for page in paginate_main(&blocks, &h, max) {
        let total: f32 = page.iter().map(|b| h.of(b)).sum();
        assert!(total <= max || page.len() == 1);
    }
}
