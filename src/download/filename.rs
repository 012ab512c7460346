//! Save-name sanitization and unique path resolution for downloads.

use std::path::{Component, Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Name used when nothing usable survives sanitization.
const FALLBACK_SAVE_NAME: &str = "document";

/// Sanitizes a filename for filesystem safety.
///
/// Replaces characters that are invalid on common filesystems:
/// / \ : * ? " < > |
pub(crate) fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.is_empty() {
        return "_".to_string();
    }

    if is_safe_filename_segment(&sanitized) {
        sanitized
    } else {
        sanitized
            .chars()
            .map(|c| if c == '.' { '_' } else { c })
            .collect()
    }
}

/// Resolves a unique path under `dir`, suffixing `_2`, `_3`, ... on conflict.
pub(crate) fn resolve_unique_path(dir: &Path, filename: &str) -> PathBuf {
    let filename = {
        let sanitized = sanitize_filename(filename);
        if sanitized.trim_matches(['_', '.']).is_empty() {
            FALLBACK_SAVE_NAME.to_string()
        } else {
            sanitized
        }
    };
    let base_path = dir.join(&filename);
    if !base_path.exists() {
        return base_path;
    }

    let (stem, ext) = match filename.rfind('.') {
        Some(pos) if pos > 0 => (&filename[..pos], &filename[pos..]),
        _ => (filename.as_str(), ""),
    };

    for i in 2..1000 {
        let candidate = dir.join(format!("{stem}_{i}{ext}"));
        if !candidate.exists() {
            return candidate;
        }
    }

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    dir.join(format!("{stem}_{timestamp}{ext}"))
}

fn is_safe_filename_segment(name: &str) -> bool {
    !Path::new(name).components().any(|component| {
        matches!(
            component,
            Component::CurDir | Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sanitize_filename_removes_invalid_chars() {
        assert_eq!(sanitize_filename("file/name.pdf"), "file_name.pdf");
        assert_eq!(sanitize_filename("file\\name.pdf"), "file_name.pdf");
        assert_eq!(sanitize_filename("file:name.pdf"), "file_name.pdf");
        assert_eq!(sanitize_filename("file<name>.pdf"), "file_name_.pdf");
        assert_eq!(sanitize_filename("file|name.pdf"), "file_name.pdf");
    }

    #[test]
    fn test_sanitize_filename_rewrites_dot_segments() {
        assert_eq!(sanitize_filename("."), "_");
        assert_eq!(sanitize_filename(".."), "__");
    }

    #[test]
    fn test_sanitize_filename_preserves_slugs() {
        assert_eq!(sanitize_filename("annual-report-2024.pdf"), "annual-report-2024.pdf");
    }

    #[test]
    fn test_resolve_unique_path_no_conflict() {
        let temp_dir = TempDir::new().unwrap();
        let path = resolve_unique_path(temp_dir.path(), "test.pdf");
        assert_eq!(path, temp_dir.path().join("test.pdf"));
    }

    #[test]
    fn test_resolve_unique_path_with_conflicts() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("test.pdf"), b"a").unwrap();
        assert_eq!(
            resolve_unique_path(temp_dir.path(), "test.pdf"),
            temp_dir.path().join("test_2.pdf")
        );

        std::fs::write(temp_dir.path().join("test_2.pdf"), b"b").unwrap();
        assert_eq!(
            resolve_unique_path(temp_dir.path(), "test.pdf"),
            temp_dir.path().join("test_3.pdf")
        );
    }

    #[test]
    fn test_resolve_unique_path_without_extension() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("readme"), b"a").unwrap();
        assert_eq!(
            resolve_unique_path(temp_dir.path(), "readme"),
            temp_dir.path().join("readme_2")
        );
    }

    #[test]
    fn test_resolve_unique_path_protects_against_traversal() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path();
        for malicious in ["../../../etc/passwd", "..", "/abs/path.pdf", "a\\..\\b.pdf"] {
            let path = resolve_unique_path(base, malicious);
            assert_eq!(path.parent().unwrap(), base, "escaped base for {malicious}");
        }
    }

    #[test]
    fn test_resolve_unique_path_empty_name_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(
            resolve_unique_path(temp_dir.path(), "  "),
            temp_dir.path().join(FALLBACK_SAVE_NAME)
        );
    }
}
