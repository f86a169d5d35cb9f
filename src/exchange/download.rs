//! Turning a response body into a file in the download directory.
//!
//! Bytes go to a `.part` file first and are renamed into place once fully
//! written, so a half-written download never carries the final name.

use super::content_disposition::parse_content_disposition_filename;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

pub const TEMP_SUFFIX: &str = ".part";
const NAME_MAX: usize = 255;
/// Leaves room for the temp suffix and a ` (n)` de-duplication marker.
const MAX_SAVED_NAME: usize = NAME_MAX - TEMP_SUFFIX.len() - 8;

pub fn fallback_name(prefix: &str, unix_millis: u128) -> String {
    format!("{}-{}.xlsx", prefix, unix_millis)
}

pub fn unix_millis_now() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}

/// Name to save a response under: the server's suggestion when it survives
/// sanitizing, otherwise `<prefix>-<millis>.xlsx`.
pub fn download_name(content_disposition: Option<&str>, prefix: &str, unix_millis: u128) -> String {
    content_disposition
        .and_then(parse_content_disposition_filename)
        .map(|name| sanitize_filename(&name))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| fallback_name(prefix, unix_millis))
}

/// Strips anything that could escape the download directory or upset the filesystem.
pub fn sanitize_filename(name: &str) -> String {
    // Keep only the last path component of whatever the server sent.
    let base = name.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or_default();

    let cleaned: String = base
        .chars()
        .map(|c| match c {
            '\0' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let trimmed = cleaned.trim_matches(|c: char| c == ' ' || c == '.');

    if trimmed.len() <= MAX_SAVED_NAME {
        return trimmed.to_string();
    }

    // Shorten the stem, not the extension.
    let (stem, ext) = match trimmed.rfind('.') {
        Some(dot) if dot > 0 && trimmed.len() - dot <= 16 => trimmed.split_at(dot),
        _ => (trimmed, ""),
    };
    let mut take = MAX_SAVED_NAME - ext.len();
    while !stem.is_char_boundary(take) {
        take -= 1;
    }
    format!("{}{}", &stem[..take], ext)
}

/// First path in `dir` named `name`, `name (1)`, `name (2)`, ... that does not exist yet.
pub fn unique_path(dir: &Path, name: &str) -> PathBuf {
    let candidate = dir.join(name);
    if !candidate.exists() {
        return candidate;
    }

    let (stem, ext) = match name.rfind('.') {
        Some(dot) if dot > 0 => (&name[..dot], &name[dot..]),
        _ => (name, ""),
    };
    (1u32..)
        .map(|n| dir.join(format!("{} ({}){}", stem, n, ext)))
        .find(|p| !p.exists())
        .unwrap_or(candidate)
}

fn temp_path(final_path: &Path) -> PathBuf {
    let mut os = final_path.as_os_str().to_owned();
    os.push(TEMP_SUFFIX);
    PathBuf::from(os)
}

/// Writes `bytes` into `dir` under `name` (or a de-duplicated variant) and returns the final path.
pub fn save_download(dir: &Path, name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let final_path = unique_path(dir, name);
    let temp = temp_path(&final_path);

    let written = (|| {
        let mut file = fs::File::create(&temp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        drop(file);
        fs::rename(&temp, &final_path)
    })();

    if let Err(e) = written {
        let _ = fs::remove_file(&temp);
        return Err(e);
    }

    tracing::debug!(path = %final_path.display(), bytes = bytes.len(), "download materialized");
    Ok(final_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_fallback(name: &str, prefix: &str) -> bool {
        name.strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix('-'))
            .and_then(|rest| rest.strip_suffix(".xlsx"))
            .map(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
            .unwrap_or(false)
    }

    #[test]
    fn uses_server_name() {
        assert_eq!(
            download_name(Some("attachment; filename=\"report.xlsx\""), "ferias-facil", 1),
            "report.xlsx"
        );
    }

    #[test]
    fn falls_back_without_header() {
        let name = download_name(None, "ferias-facil", unix_millis_now());
        assert!(is_fallback(&name, "ferias-facil"), "{}", name);
        assert_eq!(download_name(None, "p", 1700000000123), "p-1700000000123.xlsx");
    }

    #[test]
    fn falls_back_on_unparseable_header() {
        let name = download_name(Some("attachment; filename=\"\""), "p", 42);
        assert_eq!(name, "p-42.xlsx");
        let name = download_name(Some("attachment; filename=\"..\""), "p", 43);
        assert_eq!(name, "p-43.xlsx");
    }

    #[test]
    fn strips_directories_from_server_name() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\temp\\out.xlsx"), "out.xlsx");
        assert_eq!(sanitize_filename("a:b?.xlsx"), "a_b_.xlsx");
        assert_eq!(sanitize_filename("  .hidden.xlsx. "), "hidden.xlsx");
    }

    #[test]
    fn long_names_keep_extension() {
        let long = format!("{}.xlsx", "escala".repeat(60));
        let name = sanitize_filename(&long);
        assert_eq!(name.len(), MAX_SAVED_NAME);
        assert!(name.ends_with(".xlsx"));
        assert!(name.starts_with("escalaescala"));
    }

    #[test]
    fn long_multibyte_names_cut_on_char_boundary() {
        let long = format!("{}.xlsx", "é".repeat(200));
        let name = sanitize_filename(&long);
        assert!(name.len() <= MAX_SAVED_NAME);
        assert!(name.ends_with(".xlsx"));
        assert!(name.trim_end_matches(".xlsx").chars().all(|c| c == 'é'));
    }

    #[test]
    fn long_names_without_extension_are_cut() {
        let name = sanitize_filename(&"x".repeat(300));
        assert_eq!(name.len(), MAX_SAVED_NAME);
    }

    #[test]
    fn long_server_name_saves_and_deduplicates() {
        let dir = tempfile::tempdir().unwrap();
        let header = format!("attachment; filename=\"{}.xlsx\"", "relatorio".repeat(40));
        let name = download_name(Some(&header), "p", 1);
        let first = save_download(dir.path(), &name, b"one").unwrap();
        let second = save_download(dir.path(), &name, b"two").unwrap();
        assert!(first.to_string_lossy().ends_with(".xlsx"));
        assert!(second.to_string_lossy().ends_with(" (1).xlsx"));
        assert_eq!(fs::read(second).unwrap(), b"two");
    }

    #[test]
    fn save_renames_into_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_download(dir.path(), "out.xlsx", b"data").unwrap();
        assert_eq!(path, dir.path().join("out.xlsx"));
        assert_eq!(fs::read(&path).unwrap(), b"data");
        assert!(!dir.path().join("out.xlsx.part").exists());
    }

    #[test]
    fn save_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let first = save_download(dir.path(), "out.xlsx", b"one").unwrap();
        let second = save_download(dir.path(), "out.xlsx", b"two").unwrap();
        let third = save_download(dir.path(), "out.xlsx", b"three").unwrap();
        assert_eq!(second, dir.path().join("out (1).xlsx"));
        assert_eq!(third, dir.path().join("out (2).xlsx"));
        assert_eq!(fs::read(first).unwrap(), b"one");
    }

    #[test]
    fn unique_path_without_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("report"), b"x").unwrap();
        assert_eq!(unique_path(dir.path(), "report"), dir.path().join("report (1)"));
    }
}
