use super::state::{UploadState, UploadStatus};
use crate::config::UploaderConfig;
use crate::error::ExchangeError;
use crate::exchange::{spawn_exchange, DownloadTarget, ExchangeClient, ExchangeOutcome};
use crate::intake::{FileIntake, IntakeEvent, Notice};
use std::sync::mpsc::{Receiver, TryRecvError};

/// Everything one open window owns: selection, drag flag, upload status,
/// the pending notice and the in-flight exchange.
pub struct UploadSession {
    intake: FileIntake,
    state: UploadState,
    notice: Option<Notice>,
    client: ExchangeClient,
    target: DownloadTarget,
    outcome_receiver: Option<Receiver<ExchangeOutcome>>,
}

impl UploadSession {
    pub fn new(client: ExchangeClient, target: DownloadTarget) -> Self {
        Self {
            intake: FileIntake::new(),
            state: UploadState::default(),
            notice: None,
            client,
            target,
            outcome_receiver: None,
        }
    }

    pub fn from_config(config: &UploaderConfig) -> Result<Self, ExchangeError> {
        let client = ExchangeClient::new(config)?;
        tracing::info!(endpoint = %client.endpoint(), "upload session created");
        Ok(Self::new(
            client,
            DownloadTarget {
                dir: config.resolve_download_dir(),
                fallback_prefix: config.fallback_prefix.clone(),
            },
        ))
    }

    pub fn intake(&self) -> &FileIntake {
        &self.intake
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn target(&self) -> &DownloadTarget {
        &self.target
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn can_submit(&self) -> bool {
        !self.state.is_uploading() && self.notice.is_none()
    }

    pub fn handle(&mut self, event: IntakeEvent) {
        if let Some(notice) = self.intake.handle(event) {
            self.notice = Some(notice);
        }
    }

    pub fn submit(&mut self) {
        if self.state.is_uploading() {
            tracing::debug!("submit ignored: upload already running");
            return;
        }
        let Some(file) = self.intake.selection().cloned() else {
            self.notice = Some(Notice::NoFileSelected);
            return;
        };
        if !self.state.begin() {
            return;
        }
        self.outcome_receiver = Some(spawn_exchange(
            self.client.clone(),
            file,
            self.target.clone(),
        ));
    }

    /// Applies a finished exchange, if any. Returns true when the state changed.
    pub fn poll(&mut self) -> bool {
        let Some(receiver) = &self.outcome_receiver else {
            return false;
        };
        let outcome = match receiver.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => {
                tracing::error!("upload worker ended without reporting");
                Err(ExchangeError::Runtime(
                    "upload worker stopped".to_string(),
                ))
            }
        };
        self.outcome_receiver = None;
        self.state.finish(outcome);
        true
    }

    pub fn status(&self) -> UploadStatus {
        self.state.status
    }
}
