use super::types::CandidateFile;

pub const XLS_MIME: &str = "application/vnd.ms-excel";
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// MIME types the endpoint accepts. This is the authoritative filter.
pub const SPREADSHEET_MIME_TYPES: [&str; 2] = [XLS_MIME, XLSX_MIME];

/// Extension hint for the native picker. Usability aid only.
pub const PICKER_EXTENSIONS: [&str; 2] = ["xls", "xlsx"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOutcome {
    NoMatch,
    /// First match's index and resolved MIME, plus the total number of matches.
    Match {
        index: usize,
        mime: &'static str,
        matches: usize,
    },
}

/// Resolves the MIME type of a candidate to one of the recognized spreadsheet types.
///
/// A MIME reported by the source wins; otherwise it is guessed from the file name,
/// which is what a browser does when it fills in `File.type`.
pub fn spreadsheet_mime(candidate: &CandidateFile) -> Option<&'static str> {
    match candidate.mime.as_deref().map(str::trim) {
        Some(reported) if !reported.is_empty() => SPREADSHEET_MIME_TYPES
            .iter()
            .copied()
            .find(|known| known.eq_ignore_ascii_case(reported)),
        _ => mime_guess::from_path(&candidate.name)
            .iter_raw()
            .find_map(|guess| {
                SPREADSHEET_MIME_TYPES
                    .iter()
                    .copied()
                    .find(|known| known.eq_ignore_ascii_case(guess))
            }),
    }
}

pub fn filter_spreadsheets(candidates: &[CandidateFile]) -> FilterOutcome {
    let mut first = None;
    let mut matches = 0;
    for (index, candidate) in candidates.iter().enumerate() {
        if let Some(mime) = spreadsheet_mime(candidate) {
            first.get_or_insert((index, mime));
            matches += 1;
        }
    }

    match first {
        Some((index, mime)) => FilterOutcome::Match {
            index,
            mime,
            matches,
        },
        None => FilterOutcome::NoMatch,
    }
}
