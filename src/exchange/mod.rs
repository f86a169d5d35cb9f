mod client;
mod content_disposition;
mod download;

pub use client::{ExchangeClient, ExchangeResponse};
pub use content_disposition::parse_content_disposition_filename;
pub use download::{
    download_name, fallback_name, sanitize_filename, save_download, unique_path,
    unix_millis_now, TEMP_SUFFIX,
};

use crate::error::ExchangeError;
use crate::intake::SelectedFile;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};

/// Where and how a response body is saved.
#[derive(Debug, Clone)]
pub struct DownloadTarget {
    pub dir: PathBuf,
    pub fallback_prefix: String,
}

#[derive(Debug, Clone)]
pub struct SavedDownload {
    pub path: PathBuf,
    pub size: usize,
}

pub type ExchangeOutcome = Result<SavedDownload, ExchangeError>;

/// One upload/download round trip. Failures are logged here; no retry.
pub async fn run_exchange(
    client: &ExchangeClient,
    file: &SelectedFile,
    target: &DownloadTarget,
) -> ExchangeOutcome {
    let result = exchange_once(client, file, target).await;

    match &result {
        Ok(saved) => {
            tracing::info!(path = %saved.path.display(), size = saved.size, "download saved")
        }
        Err(ExchangeError::Status(code)) => {
            tracing::warn!(status = *code, file = %file.name, "upload failed with server status")
        }
        Err(e) => tracing::error!(error = %e, file = %file.name, "upload could not be completed"),
    }
    result
}

async fn exchange_once(
    client: &ExchangeClient,
    file: &SelectedFile,
    target: &DownloadTarget,
) -> ExchangeOutcome {
    let response = client.send(file).await?;
    let name = download_name(
        response.content_disposition.as_deref(),
        &target.fallback_prefix,
        unix_millis_now(),
    );
    let path = save_download(&target.dir, &name, &response.body)?;
    Ok(SavedDownload {
        path,
        size: response.body.len(),
    })
}

/// Runs the exchange on a background thread with its own runtime.
///
/// Exactly one outcome is sent on the returned channel.
pub fn spawn_exchange(
    client: ExchangeClient,
    file: SelectedFile,
    target: DownloadTarget,
) -> Receiver<ExchangeOutcome> {
    let (sender, receiver) = channel();

    std::thread::spawn(move || {
        let outcome = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt.block_on(run_exchange(&client, &file, &target)),
            Err(e) => {
                tracing::error!(error = %e, "failed to start upload runtime");
                Err(ExchangeError::Runtime(e.to_string()))
            }
        };
        let _ = sender.send(outcome);
    });

    receiver
}
