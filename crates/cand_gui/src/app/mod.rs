//! The viewer window: one candidate image, three classification buttons and
//! a status row.

mod keys;
mod notice;
mod status;

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};

use cand_core::{Action, LabelingSession, Outcome, write_history};
use eframe::{App, Frame, egui};
use rfd::FileDialog;

use notice::Notice;

/// Images are shown at most this fraction of the free area.
const MAX_FILL: f32 = 0.75;
const MAX_TEXTURES: usize = 16;

pub struct ViewerApp<'a> {
    session: &'a mut LabelingSession,
    outfile: PathBuf,
    notice: Option<Notice>,
    /// Outcome of the last export, shown next to the status line.
    message: String,
    // Texture cache keyed by item index (basic LRU); `None` marks a failed load.
    textures: HashMap<usize, Option<egui::TextureHandle>>,
    texture_keys: VecDeque<usize>,
}

impl<'a> ViewerApp<'a> {
    pub fn new(session: &'a mut LabelingSession, outfile: PathBuf) -> Self {
        Self {
            session,
            outfile,
            notice: None,
            message: String::new(),
            textures: HashMap::new(),
            texture_keys: VecDeque::new(),
        }
    }

    /// Run one action against the session and surface whatever it reports.
    pub(crate) fn perform(&mut self, action: Action) {
        match action.apply(self.session) {
            Ok(Outcome::Moved) => {}
            Ok(Outcome::ExportRequested) => {
                let path = self.outfile.clone();
                self.export_to(&path);
            }
            Err(boundary) => self.notice = Some(Notice::from_boundary(boundary)),
        }
    }

    fn export_to(&mut self, path: &Path) {
        match write_history(&self.session.export(), path) {
            Ok(()) => self.message = format!("Exported to {}", path.display()),
            Err(e) => {
                tracing::error!("Export to {} failed: {e}", path.display());
                self.notice = Some(Notice::warning(format!("Export failed: {e}")));
            }
        }
    }

    fn save_as(&mut self) {
        let file_name = self
            .outfile
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "results.csv".to_string());
        if let Some(path) = FileDialog::new()
            .add_filter("CSV", &["csv"])
            .set_file_name(file_name)
            .save_file()
        {
            self.export_to(&path);
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        let pressed: Vec<(egui::Key, egui::Modifiers)> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|e| match e {
                    egui::Event::Key {
                        key,
                        pressed: true,
                        modifiers,
                        ..
                    } => Some((*key, *modifiers)),
                    _ => None,
                })
                .collect()
        });
        for (key, modifiers) in pressed {
            // the notice is modal
            if self.notice.is_some() {
                break;
            }
            match keys::action_for_key(key, modifiers) {
                Some(action) => self.perform(action),
                None => tracing::debug!("No action bound to {key:?}"),
            }
        }
    }

    fn texture_for(&mut self, ctx: &egui::Context, index: usize) -> Option<egui::TextureHandle> {
        if let Some(tex) = self.textures.get(&index) {
            return tex.clone();
        }

        let path = PathBuf::from(&self.session.items()[index]);
        let loaded = match image::open(&path) {
            Ok(img) => {
                let rgba = img.to_rgba8();
                let (w, h) = rgba.dimensions();
                let size = [w as usize, h as usize];
                let pixels = rgba.into_raw();
                let color = egui::ColorImage::from_rgba_unmultiplied(size, &pixels);
                let name = format!("cand:{}", path.display());
                Some(ctx.load_texture(name, color, egui::TextureOptions::LINEAR))
            }
            Err(e) => {
                tracing::warn!("Failed to load image {}: {}", path.display(), e);
                None
            }
        };
        self.textures.insert(index, loaded.clone());
        self.texture_keys.push_back(index);
        if self.textures.len() > MAX_TEXTURES
            && let Some(old) = self.texture_keys.pop_front()
        {
            self.textures.remove(&old);
        }
        loaded
    }

    fn render_image(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        let index = self.session.cursor();
        let available = ui.available_size();
        ui.vertical_centered(|ui| match self.texture_for(ctx, index) {
            Some(tex) => {
                let desired = fit_size(tex.size_vec2(), available * MAX_FILL);
                let (resp, painter) = ui.allocate_painter(desired, egui::Sense::hover());
                let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                painter.image(tex.id(), resp.rect, uv, egui::Color32::WHITE);
            }
            None => {
                ui.heading(format!("Could not load {}", self.session.current_item()));
            }
        });
    }
}

/// Scale `image` down to fit inside `bounds`, keeping its aspect ratio.
/// Never scales up.
fn fit_size(image: egui::Vec2, bounds: egui::Vec2) -> egui::Vec2 {
    if image.x <= 0.0 || image.y <= 0.0 {
        return egui::Vec2::ZERO;
    }
    let scale = (bounds.x / image.x).min(bounds.y / image.y).min(1.0).max(0.0);
    image * scale
}

impl App for ViewerApp<'_> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        if let Some(notice) = &self.notice {
            if notice.show(ctx) {
                self.notice = None;
            }
        } else {
            self.handle_keys(ctx);
        }

        egui::TopBottomPanel::bottom("controls").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.add_enabled_ui(self.notice.is_none(), |ui| self.render_controls(ui));
            ui.add_space(6.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_image(ctx, ui);
        });
    }
}
