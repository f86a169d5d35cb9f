use super::{SheetUploader, UploadStatus};
use crate::intake::{CandidateFile, IntakeEvent};
use crate::utils::color::Palette;
use crate::utils::file_size::FileSizeUtils;
use eframe::egui::{self, Align, Align2, Color32, RichText, Stroke};

impl SheetUploader {
    pub fn render(&mut self, ctx: &egui::Context) {
        let blocked = self.session.notice().is_some();

        egui::CentralPanel::default().show(ctx, |ui| {
            let total_height = ui.available_height();
            let footer_height = 40.0;
            let footer_margin = 15.0;
            let content_height = total_height - footer_height - footer_margin;

            ui.add_enabled_ui(!blocked, |ui| {
                egui::ScrollArea::vertical()
                    .max_height(content_height)
                    .show(ui, |ui| {
                        ui.add_space(20.0);
                        ui.vertical_centered(|ui| {
                            ui.heading(RichText::new("Férias Fácil").color(Palette::brand()));
                            ui.add_space(5.0);
                            ui.label(
                                RichText::new("Upload your spreadsheet and download the generated schedule")
                                    .color(ui.visuals().text_color().gamma_multiply(0.7)),
                            );
                        });

                        ui.add_space(20.0);
                        self.render_drop_zone(ui);
                        ui.add_space(20.0);
                        self.render_submit(ui);
                        ui.add_space(20.0);
                    });
            });

            ui.with_layout(egui::Layout::bottom_up(Align::Center), |ui| {
                ui.add_space(footer_margin);
                self.render_footer(ui);
            });
        });

        self.render_notice(ctx);
    }

    fn render_drop_zone(&mut self, ui: &mut egui::Ui) {
        let dragging = self.session.intake().drag_state().is_dragging();
        let (fill, stroke) = if dragging {
            (
                Palette::drop_highlight().gamma_multiply(0.4),
                Stroke::new(4.0, Palette::brand()),
            )
        } else {
            (
                ui.visuals().extreme_bg_color,
                Stroke::new(1.0, Palette::idle_border()),
            )
        };

        egui::Frame::none()
            .fill(fill)
            .stroke(stroke)
            .rounding(6.0)
            .inner_margin(24.0)
            .show(ui, |ui| {
                ui.set_min_height(180.0);
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("📊").size(40.0));
                    ui.add_space(8.0);

                    let text = match self.session.intake().selection() {
                        Some(file) => format!(
                            "Selected file: {} ({})",
                            file.name,
                            FileSizeUtils::format_size(file.size())
                        ),
                        None if dragging => "Drop here…".to_string(),
                        None => "Drop the file here or click to choose".to_string(),
                    };
                    ui.label(text);
                    ui.add_space(8.0);

                    let select = egui::Button::new("📁 Select")
                        .fill(Palette::drop_highlight())
                        .min_size(egui::vec2(120.0, 30.0));
                    if ui.add(select).clicked() {
                        if let Some(paths) = self.session.intake().mirror().picker().pick_files() {
                            let files = paths.into_iter().map(CandidateFile::from_path).collect();
                            self.session.handle(IntakeEvent::Select(files));
                        }
                    }

                    ui.add_space(8.0);
                    let mut shown = self.session.intake().mirror().display();
                    ui.add(
                        egui::TextEdit::singleline(&mut shown)
                            .desired_width(ui.available_width() * 0.8)
                            .hint_text("No file chosen (.xls, .xlsx)"),
                    )
                    .on_hover_text("Currently selected spreadsheet");
                });
            });
    }

    fn render_submit(&mut self, ui: &mut egui::Ui) {
        let state = self.session.state();
        let uploading = state.is_uploading();

        ui.vertical_centered(|ui| {
            let label = if uploading { "Sending..." } else { "Send File" };
            let button = egui::Button::new(RichText::new(label).strong().color(Color32::WHITE))
                .fill(Palette::brand())
                .min_size(egui::vec2(220.0, 40.0));

            ui.add_enabled_ui(self.session.can_submit(), |ui| {
                if ui.add(button).clicked() {
                    self.session.submit();
                }
            });

            if uploading {
                ui.add_space(5.0);
                ui.spinner();
            }

            let state = self.session.state();
            if let Some(text) = state.status_text() {
                ui.add_space(5.0);
                match state.status {
                    UploadStatus::Error => {
                        ui.colored_label(Palette::error(), text);
                    }
                    _ => {
                        ui.label(
                            RichText::new(text).color(ui.visuals().text_color().gamma_multiply(0.8)),
                        );
                    }
                }
            }

            if state.status == UploadStatus::Success {
                if let Some(dir) = state.last_download.as_deref().and_then(|p| p.parent()) {
                    ui.add_space(5.0);
                    if ui.button("📂 Open folder").clicked() {
                        if let Err(e) = open::that(dir) {
                            tracing::warn!(error = %e, dir = %dir.display(), "failed to open download folder");
                        }
                    }
                }
            }
        });
    }

    fn render_footer(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new(format!(
                    "Downloads are saved to {}",
                    self.session.target().dir.display()
                ))
                .small()
                .color(ui.visuals().text_color().gamma_multiply(0.6)),
            );
        });
    }

    fn render_notice(&mut self, ctx: &egui::Context) {
        let Some(message) = self.session.notice().map(|n| n.message()) else {
            return;
        };

        let mut acknowledged = false;
        egui::Window::new("Notice")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.add_space(5.0);
                ui.label(message);
                ui.add_space(10.0);
                ui.vertical_centered(|ui| {
                    let ok = ui.button("OK");
                    if ok.clicked() || ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        acknowledged = true;
                    }
                });
            });

        if acknowledged {
            self.session.dismiss_notice();
        }
    }
}
