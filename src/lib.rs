//! Pagination core and PDF exporter for structured CV documents.
//!
//! A CV document is projected into ordered block streams ([`builder`]),
//! packed into fixed-height pages against a height oracle ([`paginate`]) and
//! rendered to PDF ([`pdf`]). The paginators are pure functions over
//! measured heights, so an interactive preview can drive them with real DOM
//! measurements while the exporter feeds them font-metrics estimates.

pub mod block;
pub mod builder;
mod error;
pub mod locale;
pub mod measure;
pub mod model;
pub mod paginate;
pub mod pdf;
pub mod storage;
pub mod template;

pub use error::Error;
pub use model::CvDocument;
pub use template::Template;

use std::path::{Path, PathBuf};
use std::time::Instant;

/// Load a document, render it with the given template and write the PDF.
/// Without an explicit output path the file lands next to the input as
/// `CV_<Name>.pdf`. Returns the path written.
pub fn export_file(
    input: &Path,
    output: Option<&Path>,
    template: &Template,
    lang: Option<&str>,
) -> Result<PathBuf, Error> {
    let t0 = Instant::now();

    let mut doc = storage::load(input)?;
    if let Some(lang) = lang {
        doc.locale.language = lang.to_string();
    }
    let photo = storage::load_photo(input, &doc);
    let t_load = t0.elapsed();

    let bytes = pdf::render(&doc, template, photo.as_deref())?;
    let t_render = t0.elapsed();

    let out = match output {
        Some(p) => p.to_path_buf(),
        None => input
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(storage::default_output_name(&doc)),
    };
    std::fs::write(&out, &bytes).map_err(Error::Io)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: load={:.1}ms, render={:.1}ms, write={:.1}ms, total={:.1}ms (output {} bytes)",
        t_load.as_secs_f64() * 1000.0,
        (t_render - t_load).as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        bytes.len(),
    );

    Ok(out)
}

/// Render a document already in memory. Used by tests and embedders that
/// manage persistence themselves.
pub fn export_bytes(
    doc: &CvDocument,
    template: &Template,
    photo: Option<&[u8]>,
) -> Result<Vec<u8>, Error> {
    pdf::render(doc, template, photo)
}
