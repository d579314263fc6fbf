use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::{ErrorContext, GalleryError, GalleryResult};

/// `path` with an `.html` extension appended unless it already ends in one.
pub fn html_path(path: &Path) -> PathBuf {
    let has_html = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("html"))
        .unwrap_or(false);
    if has_html {
        path.to_path_buf()
    } else {
        let mut name = path.as_os_str().to_os_string();
        name.push(".html");
        PathBuf::from(name)
    }
}

/// Write a rendered page to disk, returning the path actually written.
pub fn write_page(path: &Path, html: &str) -> GalleryResult<PathBuf> {
    let target = html_path(path);
    fs::write(&target, html).map_err(|e| {
        GalleryError::io_with_context(
            format!("failed to write {}: {}", target.display(), e),
            ErrorContext::new("write_page").with_entity(target.display().to_string()),
        )
    })?;
    info!("Saved gallery page to {} ({} bytes)", target.display(), html.len());
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_html_path() {
        assert_eq!(html_path(Path::new("out/page")), PathBuf::from("out/page.html"));
        assert_eq!(html_path(Path::new("out/page.html")), PathBuf::from("out/page.html"));
        assert_eq!(html_path(Path::new("out/page.v2")), PathBuf::from("out/page.v2.html"));
    }

    #[test]
    fn test_write_page() {
        let dir = TempDir::new().unwrap();
        let written = write_page(&dir.path().join("gallery"), "<html></html>").unwrap();
        assert_eq!(written, dir.path().join("gallery.html"));
        assert_eq!(fs::read_to_string(written).unwrap(), "<html></html>");
    }

    #[test]
    fn test_write_page_missing_directory() {
        let dir = TempDir::new().unwrap();
        let err = write_page(&dir.path().join("nope/gallery"), "x").unwrap_err();
        assert!(matches!(err, GalleryError::IoError { .. }));
    }
}
