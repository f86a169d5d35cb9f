use super::filter::PICKER_EXTENSIONS;
use super::types::SelectedFile;
use rfd::FileDialog;
use std::path::{Path, PathBuf};

/// Native-side reflection of the stored selection.
///
/// Keeps the path field and the file picker consistent with whatever the
/// intake currently holds, whether the file came from the picker or a drop.
#[derive(Debug, Default, Clone)]
pub struct FileInputMirror {
    name: Option<String>,
    path: Option<PathBuf>,
    display: String,
}

impl FileInputMirror {
    pub fn sync(&mut self, selection: Option<&SelectedFile>) {
        match selection {
            Some(file) => {
                self.name = Some(file.name.clone());
                self.path = file.path.clone();
                self.display = match &file.path {
                    Some(path) => path.display().to_string(),
                    None => file.name.clone(),
                };
            }
            None => *self = Self::default(),
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }

    /// Picker pre-seeded with the mirrored file's directory and name.
    pub fn picker(&self) -> FileDialog {
        let mut dialog = FileDialog::new()
            .set_title("Select spreadsheet")
            .add_filter("Excel spreadsheets", &PICKER_EXTENSIONS);
        if let Some(dir) = self.path.as_deref().and_then(Path::parent) {
            dialog = dialog.set_directory(dir);
        }
        if let Some(name) = &self.name {
            dialog = dialog.set_file_name(name.as_str());
        }
        dialog
    }
}
