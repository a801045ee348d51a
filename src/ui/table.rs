use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::Dataset;

const ROW_HEIGHT: f32 = 18.0;

/// Scrollable preview of the passengers passing the filters, in dataset order.
pub fn passenger_table(ui: &mut Ui, dataset: &Dataset, visible_indices: &[usize]) {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(240.0)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::auto())
        .column(Column::remainder().at_least(160.0))
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .header(20.0, |mut header| {
            for title in ["Id", "Name", "Sex", "Class", "Age", "Survived"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, visible_indices.len(), |mut row| {
                let p = &dataset.passengers[visible_indices[row.index()]];
                row.col(|ui| {
                    ui.label(p.passenger_id.map(|id| id.to_string()).unwrap_or_default());
                });
                row.col(|ui| {
                    ui.label(p.name.as_deref().unwrap_or(""));
                });
                row.col(|ui| {
                    ui.label(p.sex.as_str());
                });
                row.col(|ui| {
                    ui.label(p.pclass.to_string());
                });
                row.col(|ui| {
                    ui.label(match p.age {
                        Some(age) => format!("{age}"),
                        None => "unknown".to_owned(),
                    });
                });
                row.col(|ui| {
                    ui.label(if p.survived { "yes" } else { "no" });
                });
            });
        });
}
