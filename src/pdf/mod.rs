//! PDF export.
//!
//! The exporter reuses the exact builders and paginators that drive the
//! interactive preview, with font-metrics estimates standing in for DOM
//! measurements. Every block is drawn through the same layout routine that
//! produced its estimated height, so pages can never overflow what the
//! paginator planned.

mod text;

use std::io::Cursor;

use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str};

use crate::block::Block;
use crate::builder::{content_blocks, main_blocks, sidebar_blocks};
use crate::error::Error;
use crate::locale::{self, SectionTitles};
use crate::measure::{LineColor, Measurer, estimate_heights, wrap_rows};
use crate::model::CvDocument;
use crate::paginate::{Heights, Page, paginate_content, paginate_main, paginate_sidebar};
use crate::template::{DesignTokens, LayoutMode, Template};
use text::{set_fill_color, to_winansi_bytes};

const FONT_REGULAR: &[u8] = b"F1";
const FONT_BOLD: &[u8] = b"F2";
const PHOTO_NAME: &[u8] = b"Im1";

/// Baseline sits at this fraction of the font size below the line top.
const ASCENT_RATIO: f32 = 0.75;

/// Render the document to PDF bytes. A photo that fails to embed is logged
/// and skipped; everything else about the document has already been
/// normalized at load time.
pub fn render(
    doc: &CvDocument,
    template: &Template,
    photo: Option<&[u8]>,
) -> Result<Vec<u8>, Error> {
    let t0 = std::time::Instant::now();
    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();

    let font_regular_ref = alloc();
    pdf.type1_font(font_regular_ref)
        .base_font(Name(b"Helvetica"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    let font_bold_ref = alloc();
    pdf.type1_font(font_bold_ref)
        .base_font(Name(b"Helvetica-Bold"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    let photo_ref = photo.and_then(|bytes| match embed_photo(&mut pdf, bytes, &mut alloc) {
        Ok(r) => Some(r),
        Err(e) => {
            log::warn!("skipping photo: {e}");
            None
        }
    });

    let t_embed = t0.elapsed();

    let titles = locale::resolve(doc);
    let tokens = &template.tokens;
    let renderer = PageRenderer {
        doc,
        titles: &titles,
        tokens,
        measurer: Measurer::new(),
        photo_embedded: photo_ref.is_some(),
    };

    // Build and paginate the block streams for the template's layout mode.
    let (main_pages, side_pages) = match template.mode {
        LayoutMode::TwoColumn => {
            let rows = wrap_rows(doc, tokens, template.sidebar_text_width_pt());
            let main = main_blocks(doc, &titles);
            let mut side = sidebar_blocks(doc, &titles, &rows);
            if photo_ref.is_none() {
                // The photo block was planned but the file never made it in.
                side.retain(|b| *b != Block::Photo);
            }

            let main_h = estimate_heights(
                &main,
                doc,
                &titles,
                tokens,
                template.main_text_width_pt(),
            );
            let side_h = estimate_heights(
                &side,
                doc,
                &titles,
                tokens,
                template.sidebar_text_width_pt(),
            );
            (
                paginate_main(&main, &Heights::new(&main_h), template.main_capacity_pt()),
                paginate_sidebar(&side, &Heights::new(&side_h), template.sidebar_capacity_pt()),
            )
        }
        LayoutMode::SingleColumn => {
            let rows = wrap_rows(doc, tokens, template.content_text_width_pt());
            let blocks = content_blocks(doc, template, &titles, &rows);
            let heights = estimate_heights(
                &blocks,
                doc,
                &titles,
                tokens,
                template.content_text_width_pt(),
            );
            (
                paginate_content(&blocks, &Heights::new(&heights), template.main_capacity_pt()),
                Vec::new(),
            )
        }
    };

    let t_layout = t0.elapsed();

    let n = main_pages.len().max(side_pages.len()).max(1);
    let empty_page: Page = Vec::new();
    let page_h = template.page_height_pt();
    let page_w = template.page_width_pt();

    let mut all_contents: Vec<Content> = Vec::with_capacity(n);
    for i in 0..n {
        let mut content = Content::new();

        match template.mode {
            LayoutMode::TwoColumn => {
                // The sidebar band is part of the page chrome: drawn on
                // every page, content or not.
                set_fill_color(&mut content, tokens.sidebar_fill);
                content.rect(0.0, 0.0, template.sidebar_width_pt(), page_h);
                content.fill_nonzero();

                let side = side_pages.get(i).unwrap_or(&empty_page);
                renderer.draw_column(
                    &mut content,
                    side,
                    template.margin_side_pt(),
                    page_h - template.margin_top_pt(),
                    template.sidebar_text_width_pt(),
                );

                let main = main_pages.get(i).unwrap_or(&empty_page);
                renderer.draw_column(
                    &mut content,
                    main,
                    template.sidebar_width_pt() + template.margin_side_pt(),
                    page_h - template.margin_top_pt(),
                    template.main_text_width_pt(),
                );
            }
            LayoutMode::SingleColumn => {
                let blocks = main_pages.get(i).unwrap_or(&empty_page);
                renderer.draw_column(
                    &mut content,
                    blocks,
                    template.margin_side_pt(),
                    page_h - template.margin_top_pt(),
                    template.content_text_width_pt(),
                );
            }
        }

        if n > 1 {
            renderer.draw_footer(&mut content, i + 1, n, page_w, template.margin_bottom_pt());
        }

        all_contents.push(content);
    }

    // Page tree assembly; IDs are allocated now that the count is known.
    let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

    for (i, c) in all_contents.into_iter().enumerate() {
        let raw = c.finish();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
        pdf.stream(content_ids[i], &compressed)
            .filter(Filter::FlateDecode);
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(n as i32);

    for i in 0..n {
        let mut page = pdf.page(page_ids[i]);
        page.media_box(Rect::new(0.0, 0.0, page_w, page_h))
            .parent(pages_id)
            .contents(content_ids[i]);
        let mut resources = page.resources();
        {
            let mut fonts = resources.fonts();
            fonts.pair(Name(FONT_REGULAR), font_regular_ref);
            fonts.pair(Name(FONT_BOLD), font_bold_ref);
        }
        if let Some(photo_ref) = photo_ref {
            resources.x_objects().pair(Name(PHOTO_NAME), photo_ref);
        }
    }

    let t_assembly = t0.elapsed();

    log::info!(
        "Export phases: embed={:.1}ms, layout={:.1}ms, assembly={:.1}ms, pages={n}",
        t_embed.as_secs_f64() * 1000.0,
        (t_layout - t_embed).as_secs_f64() * 1000.0,
        (t_assembly - t_layout).as_secs_f64() * 1000.0,
    );

    Ok(pdf.finish())
}

/// Embed the photo as an image XObject. JPEG data passes through with
/// DctDecode; PNG is decoded and re-packed as Flate RGB with a soft mask
/// when it carries transparency.
fn embed_photo(
    pdf: &mut Pdf,
    bytes: &[u8],
    alloc: &mut dyn FnMut() -> Ref,
) -> Result<Ref, Error> {
    let xobj_ref = alloc();

    if bytes.starts_with(&[0xFF, 0xD8]) {
        let (w, h) = image::ImageReader::with_format(
            Cursor::new(bytes),
            image::ImageFormat::Jpeg,
        )
        .into_dimensions()
        .map_err(|e| Error::Photo(format!("bad JPEG: {e}")))?;

        let mut xobj = pdf.image_xobject(xobj_ref, bytes);
        xobj.filter(Filter::DctDecode);
        xobj.width(w as i32);
        xobj.height(h as i32);
        xobj.color_space().device_rgb();
        xobj.bits_per_component(8);
        return Ok(xobj_ref);
    }

    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        let decoded = image::ImageReader::with_format(
            Cursor::new(bytes),
            image::ImageFormat::Png,
        )
        .decode()
        .map_err(|e| Error::Photo(format!("bad PNG: {e}")))?;
        let rgba: image::RgbaImage = decoded.to_rgba8();
        let (w, h) = (rgba.width(), rgba.height());
        let has_alpha = rgba.pixels().any(|p| p.0[3] < 255);

        let rgb_data: Vec<u8> = rgba.pixels().flat_map(|p| [p.0[0], p.0[1], p.0[2]]).collect();
        let compressed_rgb = miniz_oxide::deflate::compress_to_vec_zlib(&rgb_data, 6);

        let smask_ref = if has_alpha {
            let alpha_data: Vec<u8> = rgba.pixels().map(|p| p.0[3]).collect();
            let compressed_alpha = miniz_oxide::deflate::compress_to_vec_zlib(&alpha_data, 6);
            let mask_ref = alloc();
            let mut mask = pdf.image_xobject(mask_ref, &compressed_alpha);
            mask.filter(Filter::FlateDecode);
            mask.width(w as i32);
            mask.height(h as i32);
            mask.color_space().device_gray();
            mask.bits_per_component(8);
            Some(mask_ref)
        } else {
            None
        };

        let mut xobj = pdf.image_xobject(xobj_ref, &compressed_rgb);
        xobj.filter(Filter::FlateDecode);
        xobj.width(w as i32);
        xobj.height(h as i32);
        xobj.color_space().device_rgb();
        xobj.bits_per_component(8);
        if let Some(mask_ref) = smask_ref {
            xobj.s_mask(mask_ref);
        }
        return Ok(xobj_ref);
    }

    Err(Error::Photo("unsupported format, expected JPEG or PNG".to_string()))
}

struct PageRenderer<'a> {
    doc: &'a CvDocument,
    titles: &'a SectionTitles,
    tokens: &'a DesignTokens,
    measurer: Measurer,
    photo_embedded: bool,
}

impl PageRenderer<'_> {
    /// Draw one paginated column top-down. The cursor advances by exactly
    /// the heights the estimator reported for each block.
    fn draw_column(&self, content: &mut Content, blocks: &[Block], x: f32, top: f32, width: f32) {
        let t = self.tokens;
        let mut cursor = top;

        for block in blocks {
            match block {
                Block::Photo => {
                    if self.photo_embedded {
                        let size = t.photo_size;
                        let px = x + ((width - size) / 2.0).max(0.0);
                        content.save_state();
                        content.transform([size, 0.0, 0.0, size, px, cursor - size]);
                        content.x_object(Name(PHOTO_NAME));
                        content.restore_state();
                    }
                    cursor -= t.photo_size + t.block_gap;
                }
                Block::Divider => {
                    set_fill_color(content, t.muted_color);
                    content.rect(x, cursor - t.divider_gap / 2.0, width, 0.5);
                    content.fill_nonzero();
                    cursor -= t.divider_gap;
                }
                _ => {
                    let layout =
                        self.measurer
                            .layout_block(block, self.doc, self.titles, t, width);
                    let mut y = cursor;
                    for line in &layout.lines {
                        let lh = line.size * t.line_h_ratio;
                        let baseline = y - (lh - line.size) / 2.0 - line.size * ASCENT_RATIO;
                        let color = match line.color {
                            LineColor::Text => t.text_color,
                            LineColor::Muted => t.muted_color,
                            LineColor::Accent => t.accent_color,
                        };
                        let font = if line.bold { FONT_BOLD } else { FONT_REGULAR };
                        set_fill_color(content, color);
                        content.begin_text();
                        content.set_font(Name(font), line.size);
                        content.next_line(x, baseline);
                        content.show(Str(&to_winansi_bytes(&line.text)));
                        content.end_text();
                        y -= lh;
                    }
                    cursor -= layout.height;
                }
            }
        }
    }

    fn draw_footer(
        &self,
        content: &mut Content,
        page_num: usize,
        total: usize,
        page_width: f32,
        margin_bottom: f32,
    ) {
        let t = self.tokens;
        let label = format!("{page_num} / {total}");
        let w = self.measurer.regular.text_width(&label, t.small_size);
        set_fill_color(content, t.muted_color);
        content.begin_text();
        content.set_font(Name(FONT_REGULAR), t.small_size);
        content.next_line((page_width - w) / 2.0, margin_bottom / 2.0);
        content.show(Str(&to_winansi_bytes(&label)));
        content.end_text();
    }
}
