//! egui panels around the canvas: parameter controls, readouts and the
//! laboratory worksheet

use std::collections::BTreeMap;

use common::{Locale, Readout, RunState, Simulation};
use egui::{Color32, RichText, Ui};
use laboratory::{LabSession, ResultsSink};

/// Decimals implied by a parameter step, e.g. `0.05` → 2
pub fn step_decimals(step: f32) -> usize {
    let mut decimals = 0;
    let mut scaled = step.abs();
    while decimals < 4 && scaled.fract() > 1e-4 && (1.0 - scaled.fract()) > 1e-4 {
        scaled *= 10.0;
        decimals += 1;
    }
    decimals
}

/// Sliders with a text box per parameter. Text is committed when the box
/// loses focus; until then the draft is kept as typed.
#[derive(Default)]
pub struct ParameterPanel {
    drafts: BTreeMap<&'static str, String>,
}

impl ParameterPanel {
    /// Forget drafts of a previous simulation
    pub fn clear(&mut self) {
        self.drafts.clear();
    }

    pub fn show(&mut self, ui: &mut Ui, simulation: &mut dyn Simulation, locale: Locale) {
        let specs: Vec<_> = simulation
            .parameters()
            .iter()
            .map(|p| (*p.spec(), p.label(locale)))
            .collect();

        egui::Grid::new("parameters")
            .num_columns(3)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                for (spec, label) in specs {
                    if spec.unit.is_empty() {
                        ui.label(label);
                    } else {
                        ui.label(format!("{label} ({})", spec.unit));
                    }

                    let mut value = simulation.parameters().value(spec.id);
                    let slider = egui::Slider::new(&mut value, spec.min..=spec.max)
                        .step_by(f64::from(spec.step))
                        .show_value(false);
                    if ui.add(slider).changed() {
                        simulation.set_parameter(spec.id, value);
                    }

                    let edit_id = ui.make_persistent_id(("parameter", spec.id));
                    let editing = ui.memory(|memory| memory.has_focus(edit_id));
                    let draft = self.drafts.entry(spec.id).or_default();
                    if !editing {
                        let decimals = step_decimals(spec.step);
                        *draft = format!("{:.decimals$}", simulation.parameters().value(spec.id));
                    }
                    let response = ui.add(egui::TextEdit::singleline(draft).id(edit_id).desired_width(64.0));
                    if response.lost_focus() {
                        if let Some(outcome) = simulation.commit_parameter_text(spec.id, draft) {
                            log::debug!("Parameter {} <- {:?}", spec.id, outcome);
                        }
                    }
                    ui.end_row();
                }
            });
    }
}

/// Pause, reset and restore-defaults buttons
pub fn run_controls(ui: &mut Ui, simulation: &mut dyn Simulation) {
    ui.horizontal(|ui| {
        if simulation.pausable() {
            let label = match simulation.run_state() {
                RunState::Running => "⏸ Pause",
                RunState::Paused => "▶ Resume",
            };
            if ui.button(label).clicked() {
                simulation.toggle_pause();
            }
        }
        if ui.button("⟲ Reset").clicked() {
            simulation.reset();
        }
        if ui.button("Defaults").clicked() {
            simulation.reset_parameters();
        }
    });
}

pub fn readout_bar(ui: &mut Ui, readouts: &[Readout], finished: bool) {
    ui.horizontal_wrapped(|ui| {
        for (i, readout) in readouts.iter().enumerate() {
            if i > 0 {
                ui.separator();
            }
            ui.label(format!("{}: {}", readout.label, readout.value));
        }
        if finished {
            ui.separator();
            ui.label(RichText::new("FINISHED").color(Color32::GREEN));
        }
    });
}

/// Editable table for a [`LabSession`]
#[derive(Default)]
pub struct WorksheetView {
    drafts: BTreeMap<(usize, &'static str), String>,
    error: Option<String>,
}

impl WorksheetView {
    pub fn clear(&mut self) {
        self.drafts.clear();
        self.error = None;
    }

    pub fn show(&mut self, ui: &mut Ui, session: &mut LabSession, sink: &dyn ResultsSink, locale: Locale, now: f64) {
        let kind = session.kind();
        ui.heading(RichText::new(kind.title(locale)).color(Color32::LIGHT_BLUE));
        ui.separator();

        let columns = kind.columns();
        let mut remove = None;

        egui::ScrollArea::both().show(ui, |ui| {
            egui::Grid::new(("worksheet", kind.slug()))
                .striped(true)
                .num_columns(columns.len() + 2)
                .show(ui, |ui| {
                    ui.label(RichText::new("#").strong());
                    for column in columns {
                        let header = RichText::new(column.header(locale)).strong();
                        ui.label(if column.is_input { header } else { header.color(Color32::LIGHT_GREEN) });
                    }
                    ui.end_row();

                    for index in 0..session.worksheet().len() {
                        ui.label(session.worksheet().rows()[index].id.to_string());
                        for column in columns {
                            if !column.is_input {
                                ui.label(session.worksheet().cell_text(index, column.id));
                                continue;
                            }
                            let edit_id = ui.make_persistent_id(("cell", index, column.id));
                            let editing = ui.memory(|memory| memory.has_focus(edit_id));
                            let draft = self.drafts.entry((index, column.id)).or_default();
                            if !editing {
                                *draft = session.worksheet().rows()[index]
                                    .get(column.id)
                                    .map(|v| v.to_string())
                                    .unwrap_or_default();
                            }
                            let response = ui.add(egui::TextEdit::singleline(draft).id(edit_id).desired_width(72.0));
                            if response.lost_focus() {
                                self.error = session.worksheet_mut().edit(index, column.id, draft).err().map(|e| e.to_string());
                            }
                        }
                        if ui.small_button("🗑").clicked() {
                            remove = Some(index);
                        }
                        ui.end_row();
                    }

                    ui.label(RichText::new("Avg").italics());
                    for column in columns {
                        ui.label(RichText::new(session.worksheet().average_text(column.id)).italics());
                    }
                    ui.end_row();
                });
        });

        if let Some(index) = remove {
            if let Err(err) = session.worksheet_mut().remove_row(index) {
                self.error = Some(err.to_string());
            }
            // row indices shifted
            self.drafts.clear();
        }

        ui.horizontal(|ui| {
            if ui.button("➕ Add row").clicked() {
                session.worksheet_mut().add_row();
            }
            let save = ui.add_enabled(session.can_persist(), egui::Button::new("💾 Save"));
            if save.clicked() {
                session.save(sink, now);
            }
            if !session.can_persist() {
                ui.label(RichText::new("Sign in to save results").small().italics());
            }
        });

        if let Some(error) = &self.error {
            ui.colored_label(Color32::LIGHT_RED, error);
        }
        if let Some(note) = session.notification(now) {
            let color = if note.is_error { Color32::LIGHT_RED } else { Color32::LIGHT_GREEN };
            ui.colored_label(color, &note.message);
        }
    }
}
