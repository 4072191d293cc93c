//! Status line, classification buttons and the confirm row.

use std::path::Path;

use cand_core::{Action, Label, Status};
use eframe::egui::{self, Color32, RichText};

use super::ViewerApp;

const FALSE_FILL: Color32 = Color32::from_rgb(0xff, 0xa5, 0xa5);
const MAYBE_FILL: Color32 = Color32::from_rgb(0xfe, 0xff, 0xa8);
const TRUE_FILL: Color32 = Color32::from_rgb(0xc4, 0xff, 0xc1);
const BUTTON_TEXT_SIZE: f32 = 16.0;

/// `(007/120) cand_snr_9_rank_3 => Labeled as 1`
pub(crate) fn status_line(status: &Status<'_>) -> String {
    let stem = Path::new(status.item)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| status.item.to_string());
    let head = format!("({}/{}) {stem}", status.padded_position(), status.total);
    match status.label.code() {
        Some(code) => format!("{head} => Labeled as {code}"),
        None => head,
    }
}

/// Caption for a classification button, with the running count.
pub(crate) fn button_caption(action: Action, status: &Status<'_>) -> String {
    let counts = &status.counts;
    match action.label() {
        Some(Label::False) => format!("< False ({})", counts.false_count),
        Some(Label::Maybe) => format!("Maybe ({}) ^", counts.maybe_count),
        Some(Label::True) => format!("True ({}) >", counts.true_count),
        _ => format!("{action:?}"),
    }
}

impl ViewerApp<'_> {
    /// Renders the three classification buttons and the status/confirm row.
    pub(super) fn render_controls(&mut self, ui: &mut egui::Ui) {
        let mut clicked = None;
        {
            let status = self.session.status();
            ui.columns(3, |cols| {
                for (col, (action, fill)) in cols.iter_mut().zip([
                    (Action::Reject, FALSE_FILL),
                    (Action::Uncertain, MAYBE_FILL),
                    (Action::Accept, TRUE_FILL),
                ]) {
                    let text = RichText::new(button_caption(action, &status))
                        .strong()
                        .size(BUTTON_TEXT_SIZE)
                        .color(Color32::BLACK);
                    let button = egui::Button::new(text).fill(fill);
                    if col
                        .add_sized([col.available_width(), 32.0], button)
                        .clicked()
                    {
                        clicked = Some(action);
                    }
                }
            });
        }

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            let line = status_line(&self.session.status());
            ui.label(RichText::new(line).strong().size(BUTTON_TEXT_SIZE));
            if !self.message.is_empty() {
                ui.separator();
                ui.label(self.message.as_str());
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Save as…").clicked() {
                    self.save_as();
                }
                if ui.button("Confirm").clicked() {
                    clicked = Some(Action::Export);
                }
            });
        });

        if let Some(action) = clicked {
            self.perform(action);
        }
    }
}
