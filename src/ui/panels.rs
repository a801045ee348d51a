use std::sync::Arc;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::{Pclass, Sex};
use crate::state::Dashboard;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, dashboard: &mut Dashboard) {
    ui.heading("Filters");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            sex_filter(ui, dashboard);
            ui.separator();
            class_filter(ui, dashboard);
        });
}

fn sex_filter(ui: &mut Ui, dashboard: &mut Dashboard) {
    let n_selected = dashboard.selection().sexes.len();
    ui.strong(format!("Select Gender  ({n_selected}/{})", Sex::ALL.len()));

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            dashboard.select_all_sexes();
        }
        if ui.small_button("None").clicked() {
            dashboard.select_no_sexes();
        }
    });

    for sex in Sex::ALL {
        let mut checked = dashboard.selection().sexes.contains(&sex);
        if ui.checkbox(&mut checked, sex.as_str()).changed() {
            dashboard.toggle_sex(sex);
        }
    }
}

fn class_filter(ui: &mut Ui, dashboard: &mut Dashboard) {
    let n_selected = dashboard.selection().classes.len();
    ui.strong(format!("Select Class  ({n_selected}/{})", Pclass::ALL.len()));

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            dashboard.select_all_classes();
        }
        if ui.small_button("None").clicked() {
            dashboard.select_no_classes();
        }
    });

    for class in Pclass::ALL {
        let mut checked = dashboard.selection().classes.contains(&class);
        if ui.checkbox(&mut checked, class.to_string()).changed() {
            dashboard.toggle_class(class);
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, dashboard: &mut Dashboard) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(dashboard);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} passengers loaded, {} visible",
            dashboard.dataset().len(),
            dashboard.snapshot().counts.total
        ));

        if let Some(path) = &dashboard.dataset().source {
            ui.separator();
            ui.weak(path.display().to_string());
        }

        if let Some(msg) = &dashboard.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(dashboard: &mut Dashboard) {
    let file = rfd::FileDialog::new()
        .set_title("Open passenger data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!("Loaded {} passengers from {}", dataset.len(), path.display());
                dashboard.replace_dataset(Arc::new(dataset));
            }
            Err(e) => {
                // The previous dataset stays active.
                log::error!("Failed to load file: {e:#}");
                dashboard.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
