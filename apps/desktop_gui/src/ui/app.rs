use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use game_core::{Game, InputEvent, RenderInstruction};
use serde::{Deserialize, Serialize};
use shared::{
    config::PuzzleConfig,
    domain::{Cell, FeatureId, FeedbackTone, RevealState},
};

use crate::controller::events::{direction_for_key, tone_color, FeedbackBanner};
use crate::controller::orchestration::dispatch_input;

pub const SETTINGS_STORAGE_KEY: &str = "conv_game.settings";

const REVEALED_TRUE_FILL: egui::Color32 = egui::Color32::from_rgb(211, 47, 47);
const REVEALED_FALSE_FILL: egui::Color32 = egui::Color32::from_rgb(48, 79, 254);
const HIGHLIGHT_STROKE: egui::Color32 = egui::Color32::YELLOW;
const IMAGE_GRID_LINE: egui::Color32 = egui::Color32::from_gray(70);
const FEATURE_MAP_GRID_LINE: egui::Color32 = egui::Color32::from_gray(150);

const FEATURE_MAP_COLUMNS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedDesktopSettings {
    pub show_grid_lines: bool,
}

impl Default for PersistedDesktopSettings {
    fn default() -> Self {
        Self {
            show_grid_lines: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PatchHighlight {
    x_px: u32,
    y_px: u32,
    width_px: u32,
    height_px: u32,
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

pub struct ConvGameApp {
    config: PuzzleConfig,
    game: Game,
    cmd_tx: Sender<InputEvent>,
    cmd_rx: Receiver<InputEvent>,

    // View state, fed exclusively through apply_instruction.
    revealed_cells: Vec<Vec<RevealState>>,
    active_feature: FeatureId,
    patch_highlight: Option<PatchHighlight>,
    fm_highlight: Option<(FeatureId, Cell)>,
    feedback: Option<FeedbackBanner>,
    image_revealed: bool,

    reveal_image: Option<egui::ColorImage>,
    reveal_texture: Option<egui::TextureHandle>,

    guess_input: String,
    status: String,
    settings: PersistedDesktopSettings,
}

impl ConvGameApp {
    pub fn new(
        config: PuzzleConfig,
        game: Game,
        reveal_image: Option<egui::ColorImage>,
        cmd_tx: Sender<InputEvent>,
        cmd_rx: Receiver<InputEvent>,
        persisted_settings: Option<PersistedDesktopSettings>,
    ) -> Self {
        let side = config.geometry.feature_map_size();
        let feature_count = config.features.len();
        let mut status = String::new();

        // Styling for the initially selected feature flows through the
        // same queue as every later event.
        dispatch_input(&cmd_tx, InputEvent::SelectFeature(FeatureId(0)), &mut status);

        Self {
            config,
            game,
            cmd_tx,
            cmd_rx,
            revealed_cells: vec![vec![RevealState::Unrevealed; side * side]; feature_count],
            active_feature: FeatureId(0),
            patch_highlight: None,
            fm_highlight: None,
            feedback: None,
            image_revealed: false,
            reveal_image,
            reveal_texture: None,
            guess_input: String::new(),
            status,
            settings: persisted_settings.unwrap_or_default(),
        }
    }

    fn collect_keyboard_input(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let arrows = [
            egui::Key::ArrowLeft,
            egui::Key::ArrowRight,
            egui::Key::ArrowUp,
            egui::Key::ArrowDown,
        ];
        let pressed: Vec<_> = ctx.input(|input| {
            arrows
                .iter()
                .filter(|&&key| input.key_pressed(key))
                .filter_map(|&key| direction_for_key(key))
                .collect()
        });
        for direction in pressed {
            dispatch_input(
                &self.cmd_tx,
                InputEvent::DirectionalKey(direction),
                &mut self.status,
            );
        }
    }

    /// Drain the queue one event at a time, each processed to completion
    /// before the next is looked at.
    fn process_input_events(&mut self) {
        while let Ok(event) = self.cmd_rx.try_recv() {
            for instruction in self.game.apply(event) {
                self.apply_instruction(instruction);
            }
        }
    }

    fn apply_instruction(&mut self, instruction: RenderInstruction) {
        match instruction {
            RenderInstruction::RedrawCell {
                feature,
                cell,
                state,
            } => {
                let side = self.config.geometry.feature_map_size();
                self.revealed_cells[feature.0][cell.row * side + cell.col] = state;
            }
            RenderInstruction::HighlightPatch {
                x_px,
                y_px,
                width_px,
                height_px,
            } => {
                self.patch_highlight = Some(PatchHighlight {
                    x_px,
                    y_px,
                    width_px,
                    height_px,
                });
            }
            RenderInstruction::HighlightFeatureMapCell { feature, cell } => {
                self.fm_highlight = Some((feature, cell));
            }
            RenderInstruction::SetSelectorActive(feature) => {
                self.active_feature = feature;
                // Highlights follow the selection; the controller re-emits
                // them right after when the feature has a saved cell.
                self.patch_highlight = None;
                self.fm_highlight = None;
            }
            RenderInstruction::ShowFeedback { message, tone } => {
                self.feedback = Some(FeedbackBanner { message, tone });
            }
            RenderInstruction::RevealFinalImage { asset_available } => {
                if asset_available {
                    self.image_revealed = true;
                } else {
                    self.feedback = Some(FeedbackBanner {
                        message: "(reveal image unavailable)".to_string(),
                        tone: FeedbackTone::Warning,
                    });
                }
            }
        }
    }

    fn reveal_texture_id(&mut self, ctx: &egui::Context) -> Option<egui::TextureId> {
        if self.reveal_texture.is_none() {
            let image = self.reveal_image.take()?;
            self.reveal_texture =
                Some(ctx.load_texture("final-reveal", image, egui::TextureOptions::LINEAR));
        }
        self.reveal_texture.as_ref().map(|texture| texture.id())
    }

    fn show_feature_selector(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Select Filter:").size(16.0));
        let mut clicked = None;
        for (index, feature) in self.config.features.iter().enumerate() {
            let id = FeatureId(index);
            if ui
                .selectable_label(self.active_feature == id, capitalize(&feature.label))
                .clicked()
            {
                clicked = Some(id);
            }
        }
        if let Some(feature) = clicked {
            dispatch_input(
                &self.cmd_tx,
                InputEvent::SelectFeature(feature),
                &mut self.status,
            );
        }
    }

    fn show_image_canvas(&mut self, ui: &mut egui::Ui) {
        let geometry = self.config.geometry;
        let canvas = geometry.image_canvas_px() as f32;
        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(canvas, canvas), egui::Sense::click());
        let texture_id = if self.image_revealed {
            self.reveal_texture_id(ui.ctx())
        } else {
            None
        };
        let painter = ui.painter_at(rect);

        painter.rect_filled(rect, egui::CornerRadius::ZERO, egui::Color32::BLACK);

        if let Some(texture_id) = texture_id {
            painter.image(
                texture_id,
                rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        } else if self.settings.show_grid_lines {
            let cell = geometry.cell_px as f32;
            for index in 0..=geometry.image_size {
                let offset = index as f32 * cell;
                painter.line_segment(
                    [
                        rect.left_top() + egui::vec2(0.0, offset),
                        rect.left_top() + egui::vec2(canvas, offset),
                    ],
                    egui::Stroke::new(1.0, IMAGE_GRID_LINE),
                );
                painter.line_segment(
                    [
                        rect.left_top() + egui::vec2(offset, 0.0),
                        rect.left_top() + egui::vec2(offset, canvas),
                    ],
                    egui::Stroke::new(1.0, IMAGE_GRID_LINE),
                );
            }
        }

        if let Some(patch) = self.patch_highlight {
            let patch_rect = egui::Rect::from_min_size(
                rect.left_top() + egui::vec2(patch.x_px as f32, patch.y_px as f32),
                egui::vec2(patch.width_px as f32, patch.height_px as f32),
            );
            painter.rect_stroke(
                patch_rect,
                egui::CornerRadius::ZERO,
                egui::Stroke::new(3.0, HIGHLIGHT_STROKE),
                egui::StrokeKind::Middle,
            );
        }

        if response.clicked() {
            if let Some(pointer) = response.interact_pointer_pos() {
                let local = pointer - rect.left_top();
                dispatch_input(
                    &self.cmd_tx,
                    InputEvent::PointerDown {
                        x_px: local.x,
                        y_px: local.y,
                    },
                    &mut self.status,
                );
            }
        }
    }

    fn show_feature_maps(&mut self, ui: &mut egui::Ui) {
        let geometry = self.config.geometry;
        let side = geometry.feature_map_size();
        let canvas = geometry.feature_map_canvas_px() as f32;
        let cell_px = geometry.cell_px as f32;

        egui::Grid::new("feature_maps")
            .spacing([10.0, 10.0])
            .show(ui, |ui| {
                for (index, feature) in self.config.features.iter().enumerate() {
                    let id = FeatureId(index);
                    ui.vertical(|ui| {
                        ui.label(
                            egui::RichText::new(format!("{} Map", capitalize(&feature.label)))
                                .size(13.0),
                        );
                        let (rect, _response) = ui
                            .allocate_exact_size(egui::vec2(canvas, canvas), egui::Sense::hover());
                        let painter = ui.painter_at(rect);

                        painter.rect_filled(rect, egui::CornerRadius::ZERO, egui::Color32::WHITE);

                        for row in 0..side {
                            for col in 0..side {
                                let state = self.revealed_cells[index][row * side + col];
                                if !state.is_revealed() {
                                    continue;
                                }
                                let fill = if state == RevealState::RevealedTrue {
                                    REVEALED_TRUE_FILL
                                } else {
                                    REVEALED_FALSE_FILL
                                };
                                let cell_rect = egui::Rect::from_min_size(
                                    rect.left_top()
                                        + egui::vec2(col as f32 * cell_px, row as f32 * cell_px),
                                    egui::vec2(cell_px, cell_px),
                                );
                                painter.rect_filled(
                                    cell_rect.shrink(0.5),
                                    egui::CornerRadius::ZERO,
                                    fill,
                                );
                            }
                        }

                        for line in 0..=side {
                            let offset = line as f32 * cell_px;
                            painter.line_segment(
                                [
                                    rect.left_top() + egui::vec2(0.0, offset),
                                    rect.left_top() + egui::vec2(canvas, offset),
                                ],
                                egui::Stroke::new(1.0, FEATURE_MAP_GRID_LINE),
                            );
                            painter.line_segment(
                                [
                                    rect.left_top() + egui::vec2(offset, 0.0),
                                    rect.left_top() + egui::vec2(offset, canvas),
                                ],
                                egui::Stroke::new(1.0, FEATURE_MAP_GRID_LINE),
                            );
                        }

                        if let Some((highlight_feature, cell)) = self.fm_highlight {
                            if highlight_feature == id {
                                let cell_rect = egui::Rect::from_min_size(
                                    rect.left_top()
                                        + egui::vec2(
                                            cell.col as f32 * cell_px,
                                            cell.row as f32 * cell_px,
                                        ),
                                    egui::vec2(cell_px, cell_px),
                                );
                                painter.rect_stroke(
                                    cell_rect,
                                    egui::CornerRadius::ZERO,
                                    egui::Stroke::new(3.0, HIGHLIGHT_STROKE),
                                    egui::StrokeKind::Middle,
                                );
                            }
                        }
                    });
                    if (index + 1) % FEATURE_MAP_COLUMNS == 0 {
                        ui.end_row();
                    }
                }
            });
    }

    fn show_guess_row(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Your Guess:").size(14.0));
            let edit_resp = ui.add(
                egui::TextEdit::singleline(&mut self.guess_input).desired_width(180.0),
            );
            let submit_clicked = ui.button("Guess!").clicked();
            let enter_pressed =
                edit_resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if submit_clicked || enter_pressed {
                dispatch_input(
                    &self.cmd_tx,
                    InputEvent::SubmitGuess(self.guess_input.clone()),
                    &mut self.status,
                );
            }
        });

        if let Some(feedback) = &self.feedback {
            ui.label(
                egui::RichText::new(feedback.message.as_str())
                    .size(18.0)
                    .color(tone_color(feedback.tone)),
            );
        }
        if !self.status.is_empty() {
            ui.label(egui::RichText::new(self.status.as_str()).weak());
        }
    }
}

impl eframe::App for ConvGameApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.collect_keyboard_input(ctx);
        self.process_input_events();

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading(
                        egui::RichText::new(self.config.title.as_str())
                            .size(26.0)
                            .strong(),
                    );
                });
                ui.add_space(8.0);

                ui.horizontal_top(|ui| {
                    ui.vertical(|ui| {
                        self.show_feature_selector(ui);
                        ui.add_space(12.0);
                        ui.checkbox(&mut self.settings.show_grid_lines, "Grid lines");
                    });
                    ui.add_space(12.0);

                    ui.vertical(|ui| {
                        let image_size = self.config.geometry.image_size;
                        ui.label(
                            egui::RichText::new(format!(
                                "Hidden Image ({image_size}x{image_size})"
                            ))
                            .size(14.0),
                        );
                        self.show_image_canvas(ui);
                        ui.add_space(8.0);
                        self.show_guess_row(ui);
                    });
                    ui.add_space(12.0);

                    ui.vertical(|ui| {
                        let side = self.config.geometry.feature_map_size();
                        ui.label(
                            egui::RichText::new(format!("Feature Maps ({side}x{side})")).size(14.0),
                        );
                        self.show_feature_maps(ui);
                    });
                });
            });
        });

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        if let Ok(serialized) = serde_json::to_string(&self.settings) {
            storage.set_string(SETTINGS_STORAGE_KEY, serialized);
        }
    }
}
