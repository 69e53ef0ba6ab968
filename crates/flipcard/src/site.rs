//! Static page template and source discovery for `build` and `render --standalone`.

use std::fmt::Write;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use flipcard_content::escape_html;

/// Render a complete HTML page around a rendered document.
///
/// `head` is inserted verbatim into `<head>` (asset tags).
pub(crate) fn render_page(title: &str, head: &str, body: &str) -> String {
    let mut html = String::with_capacity(body.len() + 512);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape_html(title));
    html.push_str(head);
    html.push_str("</head>\n<body>\n<main>\n");
    html.push_str(body);
    html.push_str("</main>\n</body>\n</html>\n");
    html
}

/// Page title for a document: its file stem.
pub(crate) fn page_title(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Collect markdown files under `source_dir`, relative to it, sorted.
///
/// Hidden entries and anything under `exclude` (the output directory, when
/// it lives inside the source tree) are skipped.
pub(crate) fn collect_markdown(source_dir: &Path, exclude: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    walk_dir(source_dir, source_dir, exclude, &mut files)?;
    files.sort();
    Ok(files)
}

fn walk_dir(base: &Path, current: &Path, exclude: &Path, files: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(current)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_name().to_string_lossy().starts_with('.') || path == exclude {
            continue;
        }
        if path.is_dir() {
            walk_dir(base, &path, exclude, files)?;
        } else if path.extension().is_some_and(|ext| ext == "md")
            && let Ok(relative) = path.strip_prefix(base)
        {
            files.push(relative.to_path_buf());
        }
    }
    Ok(())
}
