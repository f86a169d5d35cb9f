mod drag;
mod filter;
mod mirror;
mod types;

pub use drag::HoverTracker;
pub use filter::{
    filter_spreadsheets, spreadsheet_mime, FilterOutcome, PICKER_EXTENSIONS,
    SPREADSHEET_MIME_TYPES, XLSX_MIME, XLS_MIME,
};
pub use mirror::FileInputMirror;
pub use types::{CandidateFile, DragEvent, DragState, IntakeEvent, Notice, SelectedFile};

use crate::error::IntakeError;
use std::fs;

/// Single-file intake: filters candidates, keeps the first spreadsheet and
/// mirrors it into the native input surface.
#[derive(Debug, Default)]
pub struct FileIntake {
    selection: Option<SelectedFile>,
    drag: DragState,
    mirror: FileInputMirror,
}

impl FileIntake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> Option<&SelectedFile> {
        self.selection.as_ref()
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn mirror(&self) -> &FileInputMirror {
        &self.mirror
    }

    pub fn handle(&mut self, event: IntakeEvent) -> Option<Notice> {
        match event {
            IntakeEvent::Drag(event) => {
                self.drag = self.drag.apply(&event);
                match event {
                    DragEvent::Drop(files) if !files.is_empty() => self.accept(files),
                    _ => None,
                }
            }
            IntakeEvent::Select(files) => self.accept(files),
        }
    }

    /// Keeps the first spreadsheet among `candidates`.
    ///
    /// The previous selection survives when nothing matches or the chosen file
    /// cannot be read.
    pub fn accept(&mut self, candidates: Vec<CandidateFile>) -> Option<Notice> {
        let (index, mime, matches) = match filter_spreadsheets(&candidates) {
            FilterOutcome::NoMatch => {
                tracing::info!(
                    offered = candidates.len(),
                    "rejected files: no spreadsheet among them"
                );
                return Some(Notice::NoValidFiles);
            }
            FilterOutcome::Match {
                index,
                mime,
                matches,
            } => (index, mime, matches),
        };

        let Some(candidate) = candidates.into_iter().nth(index) else {
            return Some(Notice::NoValidFiles);
        };
        let name = candidate.name.clone();

        let file = match load(candidate, mime) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!(file = %name, error = %e, "could not read selected file");
                return Some(Notice::Unreadable {
                    name,
                    reason: e.to_string(),
                });
            }
        };

        tracing::info!(file = %file.name, mime = file.mime, size = file.size(), "file selected");
        self.selection = Some(file);
        self.mirror.sync(self.selection.as_ref());

        if matches > 1 {
            Some(Notice::OnlyFirstUsed)
        } else {
            None
        }
    }
}

fn load(candidate: CandidateFile, mime: &'static str) -> Result<SelectedFile, IntakeError> {
    let bytes = match (candidate.bytes, &candidate.path) {
        (Some(bytes), _) => bytes,
        (None, Some(path)) => fs::read(path)
            .map_err(|source| IntakeError::Read {
                path: path.clone(),
                source,
            })?
            .into(),
        (None, None) => {
            return Err(IntakeError::NoContent {
                name: candidate.name,
            })
        }
    };

    Ok(SelectedFile {
        name: candidate.name,
        mime,
        path: candidate.path,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn mem(name: &str) -> CandidateFile {
        CandidateFile::from_bytes(name, None, name.as_bytes().to_vec())
    }

    #[test]
    fn keeps_first_spreadsheet_and_warns_on_many() {
        let mut intake = FileIntake::new();
        let notice = intake.accept(vec![mem("a.txt"), mem("b.xlsx"), mem("c.xls")]);
        assert_eq!(notice, Some(Notice::OnlyFirstUsed));
        let selected = intake.selection().unwrap();
        assert_eq!(selected.name, "b.xlsx");
        assert_eq!(selected.mime, XLSX_MIME);
        assert_eq!(&*selected.bytes, b"b.xlsx");
    }

    #[test]
    fn single_match_is_silent() {
        let mut intake = FileIntake::new();
        assert_eq!(intake.accept(vec![mem("x.png"), mem("only.xls")]), None);
        assert_eq!(intake.selection().unwrap().name, "only.xls");
        assert_eq!(intake.mirror().display(), "only.xls");
    }

    #[test]
    fn no_match_keeps_previous_selection() {
        let mut intake = FileIntake::new();
        intake.accept(vec![mem("keep.xlsx")]);
        let notice = intake.accept(vec![mem("a.pdf"), mem("b.docx")]);
        assert_eq!(notice, Some(Notice::NoValidFiles));
        assert_eq!(intake.selection().unwrap().name, "keep.xlsx");
        assert_eq!(intake.mirror().display(), "keep.xlsx");
    }

    #[test]
    fn no_match_on_empty_intake_stays_empty() {
        let mut intake = FileIntake::new();
        assert_eq!(
            intake.accept(vec![mem("a.csv")]),
            Some(Notice::NoValidFiles)
        );
        assert!(intake.selection().is_none());
        assert!(intake.mirror().is_empty());
    }

    #[test]
    fn new_selection_replaces_old() {
        let mut intake = FileIntake::new();
        intake.accept(vec![mem("first.xlsx")]);
        intake.accept(vec![mem("second.xls")]);
        assert_eq!(intake.selection().unwrap().name, "second.xls");
    }

    #[test]
    fn reads_bytes_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ferias.xlsx");
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(b"PK\x03\x04sheet").unwrap();

        let mut intake = FileIntake::new();
        assert_eq!(intake.accept(vec![CandidateFile::from_path(path.clone())]), None);
        let selected = intake.selection().unwrap();
        assert_eq!(&*selected.bytes, b"PK\x03\x04sheet");
        assert_eq!(intake.mirror().path(), Some(path.as_path()));
    }

    #[test]
    fn unreadable_file_keeps_previous_selection() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone.xlsx");

        let mut intake = FileIntake::new();
        intake.accept(vec![mem("keep.xls")]);
        let notice = intake.accept(vec![CandidateFile::from_path(missing)]);
        assert!(matches!(notice, Some(Notice::Unreadable { ref name, .. }) if name == "gone.xlsx"));
        assert_eq!(intake.selection().unwrap().name, "keep.xls");
    }

    #[test]
    fn reported_mime_carries_into_selection() {
        let mut intake = FileIntake::new();
        let export = CandidateFile::from_bytes("export", Some(XLS_MIME), vec![0xD0, 0xCF]);
        assert_eq!(intake.accept(vec![mem("a.txt"), export]), None);
        let selected = intake.selection().unwrap();
        assert_eq!(selected.name, "export");
        assert_eq!(selected.mime, XLS_MIME);
    }

    #[test]
    fn in_memory_candidate_without_bytes_is_unreadable() {
        let mut intake = FileIntake::new();
        let notice = intake.accept(vec![CandidateFile {
            name: "ghost.xlsx".to_string(),
            ..Default::default()
        }]);
        assert!(matches!(notice, Some(Notice::Unreadable { ref name, .. }) if name == "ghost.xlsx"));
        assert!(intake.selection().is_none());
    }

    #[test]
    fn drop_event_selects_and_clears_drag() {
        let mut intake = FileIntake::new();
        assert_eq!(intake.handle(IntakeEvent::Drag(DragEvent::Enter)), None);
        assert!(intake.drag_state().is_dragging());

        let notice = intake.handle(IntakeEvent::Drag(DragEvent::Drop(vec![mem("d.xlsx")])));
        assert_eq!(notice, None);
        assert_eq!(intake.drag_state(), DragState::Idle);
        assert_eq!(intake.selection().unwrap().name, "d.xlsx");
    }

    #[test]
    fn empty_drop_is_ignored() {
        let mut intake = FileIntake::new();
        intake.handle(IntakeEvent::Drag(DragEvent::Enter));
        assert_eq!(intake.handle(IntakeEvent::Drag(DragEvent::Drop(Vec::new()))), None);
        assert!(intake.selection().is_none());
        assert_eq!(intake.drag_state(), DragState::Idle);
    }
}
