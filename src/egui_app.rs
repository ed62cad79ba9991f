//! Egui-based interactive pipeline editor (feature = "egui").
//!
//! Construct a [`PipelineApp`] and pass it to `eframe::run_native` from
//! your binary or example to open an editor window. The canvas paints
//! the scene primitives; a pointer release re-runs the hit scan, and
//! the side panel renders the highlighted stage's configuration widget
//! plus its input/output line panels.

#![cfg(feature = "egui")]

use eframe::egui::{self, Color32, Pos2, Rect, RichText, Sense, Stroke, Vec2};

use crate::pipeline::{Pipeline, Trace};
use crate::scene::{self, Shape};
use crate::selection::StageSelection;
use crate::tool::{ConfigField, ConfigValue};

/// Interactive egui application that displays and edits a pipeline.
pub struct PipelineApp {
    pipeline: Pipeline,
    selection: StageSelection,
    trace: Trace,
    /// Draft text of the config field being edited.
    config_draft: String,
    /// Message from the last rejected configuration update.
    config_error: Option<String>,
}

impl PipelineApp {
    pub fn new(pipeline: Pipeline) -> Self {
        let trace = pipeline.evaluate();
        let selection = StageSelection::new();
        let config_draft = draft_for(&pipeline, &selection);
        Self {
            pipeline,
            selection,
            trace,
            config_draft,
            config_error: None,
        }
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    fn refresh_draft(&mut self) {
        self.config_draft = draft_for(&self.pipeline, &self.selection);
        self.config_error = None;
    }

    /// Parse the draft according to the highlighted stage's field kind
    /// and try to replace the stage. A construction failure leaves the
    /// pipeline unchanged and keeps the error text for display.
    fn submit_config(&mut self) {
        let Some(desc) = self.selection.config_descriptor(&self.pipeline) else {
            return;
        };
        let value = match desc.field {
            ConfigField::Text(_) => ConfigValue::Text(self.config_draft.clone()),
            ConfigField::Integer(_) => {
                ConfigValue::Integer(self.config_draft.trim().parse::<i64>().ok())
            }
            ConfigField::Pattern(_) => ConfigValue::Pattern(self.config_draft.clone()),
        };
        match self.selection.reconfigure(&self.pipeline, value) {
            Ok(updated) => {
                self.pipeline = updated;
                self.trace = self.pipeline.evaluate();
                self.config_error = None;
            }
            Err(e) => self.config_error = Some(format!("{e:#}")),
        }
    }

    fn inspector_panel(&mut self, ui: &mut egui::Ui) {
        let position = self.selection.highlighted();
        let kind = self
            .pipeline
            .tool(position)
            .map(|t| t.kind().name())
            .unwrap_or("?");
        ui.heading(format!("Stage {position}: {kind}"));
        ui.separator();

        if let Some(desc) = self.selection.config_descriptor(&self.pipeline) {
            ui.label(desc.label);
            match desc.field {
                ConfigField::Text(_) => {
                    ui.text_edit_multiline(&mut self.config_draft);
                }
                ConfigField::Integer(_) | ConfigField::Pattern(_) => {
                    ui.text_edit_singleline(&mut self.config_draft);
                }
            }
            if ui.button(format!("Update {}", desc.label)).clicked() {
                self.submit_config();
            }
            if let Some(err) = &self.config_error {
                ui.colored_label(Color32::RED, err);
            }
        } else {
            ui.label("No configuration for this stage");
        }

        ui.separator();
        ui.label(RichText::new("Input").strong());
        for line in self.selection.input_lines(&self.trace) {
            ui.monospace(line);
        }
        ui.separator();
        ui.label(RichText::new("Output").strong());
        for line in self.selection.output_lines(&self.trace) {
            ui.monospace(line);
        }
    }

    fn canvas(&mut self, ui: &mut egui::Ui) {
        let avail = ui.available_rect_before_wrap();
        let resp = ui.interact(avail, ui.id().with("canvas"), Sense::click());
        if resp.clicked() {
            if let Some(pos) = resp.interact_pointer_pos() {
                if self
                    .selection
                    .pointer_released(&self.pipeline, pos.x, pos.y)
                {
                    self.refresh_draft();
                }
            }
        }

        let highlighted = Some(self.selection.highlighted());
        let painter = ui.painter();
        for shape in scene::build_scene(&self.pipeline, &self.trace, highlighted) {
            match shape {
                Shape::Rect {
                    min_x,
                    min_y,
                    width,
                    height,
                    fill,
                    stroke_width,
                } => {
                    let rect =
                        Rect::from_min_size(Pos2::new(min_x, min_y), Vec2::new(width, height));
                    if let Some(fill) = fill {
                        painter.rect_filled(rect, 0.0, parse_color(fill));
                    }
                    painter.rect_stroke(
                        rect,
                        0.0,
                        Stroke::new(stroke_width, Color32::BLACK),
                        egui::StrokeKind::Outside,
                    );
                }
                Shape::Segment {
                    x1,
                    y1,
                    x2,
                    y2,
                    stroke,
                    stroke_width,
                } => {
                    painter.line_segment(
                        [Pos2::new(x1, y1), Pos2::new(x2, y2)],
                        Stroke::new(stroke_width, parse_color(&stroke)),
                    );
                }
            }
        }
    }
}

impl eframe::App for PipelineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::right("inspector")
            .default_width(320.0)
            .show(ctx, |ui| self.inspector_panel(ui));
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label("Pipeline Visualization:");
            self.canvas(ui);
        });
    }
}

/// Parse the CSS-style colors emitted by the scene builder: the named
/// kind colors plus `#rgb` / `#rrggbb` grayscale values.
fn parse_color(value: &str) -> Color32 {
    match value {
        "purple" => Color32::from_rgb(128, 0, 128),
        "green" => Color32::from_rgb(0, 128, 0),
        "blue" => Color32::from_rgb(0, 0, 255),
        _ => {
            let hex = value.strip_prefix('#').unwrap_or(value);
            let digit = |s: &str| u8::from_str_radix(s, 16).unwrap_or(0);
            match hex.len() {
                3 => {
                    let r = digit(&hex[0..1]) * 17;
                    let g = digit(&hex[1..2]) * 17;
                    let b = digit(&hex[2..3]) * 17;
                    Color32::from_rgb(r, g, b)
                }
                6 => {
                    let r = digit(&hex[0..2]);
                    let g = digit(&hex[2..4]);
                    let b = digit(&hex[4..6]);
                    Color32::from_rgb(r, g, b)
                }
                _ => Color32::BLACK,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_colors() {
        assert_eq!(parse_color("purple"), Color32::from_rgb(128, 0, 128));
        assert_eq!(parse_color("green"), Color32::from_rgb(0, 128, 0));
        assert_eq!(parse_color("blue"), Color32::from_rgb(0, 0, 255));
    }

    #[test]
    fn test_parse_hex_colors() {
        assert_eq!(parse_color("#9b9b9b"), Color32::from_rgb(155, 155, 155));
        assert_eq!(parse_color("#555"), Color32::from_rgb(85, 85, 85));
        assert_eq!(parse_color("#000000"), Color32::BLACK);
        assert_eq!(parse_color("bogus"), Color32::BLACK);
    }
}
