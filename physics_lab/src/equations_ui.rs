//! Equations sidebar and the searchable formula reference
//!
//! Displays formula sheets using egui.

use common::{FormulaSheet, Locale};
use egui::{Color32, Context, RichText, Ui};

use crate::catalog::{search_formulas, SimulationKind};

fn draw_sheet(ui: &mut Ui, id: &str, sheet: &FormulaSheet) {
    ui.collapsing(RichText::new("📐 Equations").strong(), |ui| {
        for eq in sheet.equations {
            ui.group(|ui| {
                ui.label(RichText::new(eq.name).strong().color(Color32::YELLOW));
                ui.label(RichText::new(eq.formula).monospace().color(Color32::WHITE));
                ui.label(RichText::new(eq.description).small().italics());
            });
            ui.add_space(4.0);
        }
    });

    ui.add_space(8.0);

    ui.collapsing(RichText::new("📖 Variables").strong(), |ui| {
        egui::Grid::new(format!("{id}_variables"))
            .num_columns(2)
            .spacing([10.0, 4.0])
            .show(ui, |ui| {
                for (symbol, meaning) in sheet.variables {
                    ui.label(RichText::new(*symbol).monospace().color(Color32::LIGHT_GREEN));
                    ui.label(*meaning);
                    ui.end_row();
                }
            });
    });
}

/// Draw the equations sidebar for the running simulation
pub fn draw_equations_sidebar(ctx: &Context, sheet: &FormulaSheet) {
    egui::SidePanel::right("equations_panel")
        .resizable(true)
        .default_width(280.0)
        .show(ctx, |ui| {
            ui.heading(RichText::new(sheet.title).color(Color32::LIGHT_BLUE));
            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| {
                draw_sheet(ui, "sidebar", sheet);
            });
        });
}

/// Every formula sheet, filtered by `query`. Returns the simulation the
/// user asked to open, if any.
pub fn draw_formula_reference(ui: &mut Ui, query: &mut String, locale: Locale) -> Option<SimulationKind> {
    let mut open = None;

    ui.horizontal(|ui| {
        ui.label("🔍");
        ui.text_edit_singleline(query);
        if ui.button("✖").clicked() {
            query.clear();
        }
    });
    ui.separator();

    let matches = search_formulas(query);
    if matches.is_empty() {
        ui.label(RichText::new("No formulas match the search").italics());
        return None;
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        for (kind, sheet) in &matches {
            ui.horizontal(|ui| {
                ui.heading(RichText::new(sheet.title).color(Color32::LIGHT_BLUE));
                if ui.small_button(format!("▶ {}", kind.title(locale))).clicked() {
                    open = Some(*kind);
                }
            });
            draw_sheet(ui, kind.slug(), sheet);
            ui.separator();
        }
    });

    open
}
