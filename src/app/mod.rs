mod session;
mod state;
mod ui;

use crate::intake::{CandidateFile, HoverTracker, IntakeEvent};
use eframe::{egui, App};
pub use session::UploadSession;
pub use state::{UploadState, UploadStatus};
use std::time::Duration;

pub struct SheetUploader {
    session: UploadSession,
    hover: HoverTracker,
}

impl SheetUploader {
    pub fn new(_cc: &eframe::CreationContext<'_>, session: UploadSession) -> Self {
        tracing::info!(
            download_dir = %session.target().dir.display(),
            "uploader window opened"
        );
        Self {
            session,
            hover: HoverTracker::default(),
        }
    }

    /// Feeds this frame's drag-and-drop input into the session.
    ///
    /// Dropped files are taken out of the raw input so no other widget opens them.
    fn collect_drag_events(&mut self, ctx: &egui::Context) {
        let (hovering, dropped) = ctx.input_mut(|i| {
            (
                !i.raw.hovered_files.is_empty(),
                std::mem::take(&mut i.raw.dropped_files),
            )
        });

        // A notice blocks the window; keep dropping from stealing its focus.
        if self.session.notice().is_some() {
            self.hover = HoverTracker::default();
            return;
        }

        let dropped: Vec<CandidateFile> = dropped
            .into_iter()
            .map(|file| {
                let name = if file.name.is_empty() {
                    file.path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_default()
                } else {
                    file.name
                };
                CandidateFile {
                    name,
                    path: file.path,
                    mime: None,
                    bytes: file.bytes,
                }
            })
            .collect();

        for event in self.hover.frame(hovering, dropped) {
            self.session.handle(IntakeEvent::Drag(event));
        }
    }

    fn update_state(&mut self, ctx: &egui::Context) {
        if self.session.poll() {
            ctx.request_repaint();
        }
        if self.session.state().is_uploading() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

impl App for SheetUploader {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.collect_drag_events(ctx);
        self.update_state(ctx);
        self.render(ctx);
    }
}
