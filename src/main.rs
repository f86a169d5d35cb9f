use anyhow::Context;
use eframe::CreationContext;
use sheet_uploader::app::{SheetUploader, UploadSession};
use sheet_uploader::{config, logging};

fn main() -> anyhow::Result<()> {
    if let Err(e) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable, using stderr: {:#}", e);
    }

    let config = config::load_or_init().unwrap_or_else(|e| {
        tracing::warn!("could not load config, using defaults: {:#}", e);
        config::UploaderConfig::default()
    });
    let session = UploadSession::from_config(&config).context("failed to build HTTP client")?;

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([600.0, 620.0])
            .with_min_inner_size([420.0, 520.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Férias Fácil",
        options,
        Box::new(move |cc: &CreationContext| Box::new(SheetUploader::new(cc, session))),
    )
    .map_err(|e| anyhow::anyhow!("window failed: {}", e))
}
