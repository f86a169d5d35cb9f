use std::path::PathBuf;
use std::sync::Arc;

/// A file offered to the intake, either by the picker or by a drop.
#[derive(Debug, Clone, Default)]
pub struct CandidateFile {
    pub name: String,
    pub path: Option<PathBuf>,
    /// MIME type reported by the source, if any. Native drops leave this empty.
    pub mime: Option<String>,
    pub bytes: Option<Arc<[u8]>>,
}

impl CandidateFile {
    pub fn from_path(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        Self {
            name,
            path: Some(path),
            mime: None,
            bytes: None,
        }
    }

    pub fn from_bytes(name: impl Into<String>, mime: Option<&str>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            path: None,
            mime: mime.map(str::to_owned),
            bytes: Some(bytes.into()),
        }
    }
}

/// The single file retained for upload.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub mime: &'static str,
    pub path: Option<PathBuf>,
    pub bytes: Arc<[u8]>,
}

impl SelectedFile {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Over,
}

#[derive(Debug, Clone)]
pub enum DragEvent {
    Enter,
    Over,
    /// `on_target` is false when the pointer only left a child of the drop target.
    Leave { on_target: bool },
    Drop(Vec<CandidateFile>),
}

#[derive(Debug, Clone)]
pub enum IntakeEvent {
    Drag(DragEvent),
    /// Files chosen through the native picker.
    Select(Vec<CandidateFile>),
}

/// A message the user has to acknowledge before doing anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    NoValidFiles,
    OnlyFirstUsed,
    NoFileSelected,
    Unreadable { name: String, reason: String },
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::NoValidFiles => "Please send Excel files only (.xls or .xlsx).".to_string(),
            Notice::OnlyFirstUsed => {
                "Only one file will be sent. Using the first valid one.".to_string()
            }
            Notice::NoFileSelected => "Select or drag a file first!".to_string(),
            Notice::Unreadable { name, reason } => {
                format!("Could not read '{}': {}", name, reason)
            }
        }
    }
}
