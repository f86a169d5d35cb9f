use crate::error::ExchangeError;
use crate::exchange::SavedDownload;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadStatus {
    #[default]
    Idle,
    Uploading,
    Success,
    Error,
}

#[derive(Debug, Clone, Default)]
pub struct UploadState {
    pub status: UploadStatus,
    pub message: String,
    pub last_download: Option<PathBuf>,
}

impl UploadState {
    pub fn is_uploading(&self) -> bool {
        self.status == UploadStatus::Uploading
    }

    /// Moves to `Uploading`. Returns false, leaving the state alone, if an upload is in flight.
    pub fn begin(&mut self) -> bool {
        if self.is_uploading() {
            return false;
        }
        self.status = UploadStatus::Uploading;
        self.message = "Sending file...".to_string();
        true
    }

    pub fn finish(&mut self, outcome: Result<SavedDownload, ExchangeError>) {
        if !self.is_uploading() {
            tracing::warn!("exchange outcome arrived while no upload was running");
            return;
        }
        match outcome {
            Ok(saved) => {
                self.status = UploadStatus::Success;
                self.message = format!(
                    "File processed successfully! Download saved to {}.",
                    saved.path.display()
                );
                self.last_download = Some(saved.path);
            }
            Err(e) => {
                self.status = UploadStatus::Error;
                self.message = e.user_message();
            }
        }
    }

    pub fn status_text(&self) -> Option<&str> {
        match self.status {
            UploadStatus::Idle => None,
            _ => Some(&self.message),
        }
    }
}
