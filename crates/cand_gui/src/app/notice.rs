//! Non-fatal notifications shown over the viewer.

use cand_core::Boundary;
use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Severity {
    Warning,
    Information,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Notice {
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn from_boundary(boundary: Boundary) -> Self {
        let severity = match boundary {
            Boundary::AtStart | Boundary::AtEnd => Severity::Warning,
            Boundary::NoMoreUnlabeled(_) => Severity::Information,
        };
        Self {
            severity,
            message: boundary.to_string(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.severity {
            Severity::Warning => "Warning",
            Severity::Information => "Information",
        }
    }

    /// Draw the notice. Returns true once the user dismissed it.
    pub fn show(&self, ctx: &egui::Context) -> bool {
        let mut dismissed =
            ctx.input(|i| i.key_pressed(egui::Key::Enter) || i.key_pressed(egui::Key::Escape));
        egui::Window::new(self.title())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(self.message.as_str());
                ui.add_space(6.0);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        dismissed
    }
}
