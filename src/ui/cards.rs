use eframe::egui::{self, RichText, Ui};

use crate::data::aggregate::Counts;

/// The three headline numbers, side by side.
pub fn value_cards(ui: &mut Ui, counts: &Counts) {
    let cards = [
        ("Total Passengers", counts.total),
        ("Survivors", counts.survivors),
        ("Non-Survivors", counts.non_survivors),
    ];

    ui.columns(cards.len(), |columns: &mut [Ui]| {
        for (ui, (title, value)) in columns.iter_mut().zip(cards) {
            egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
                ui.set_min_width(ui.available_width());
                ui.label(title);
                ui.label(RichText::new(value.to_string()).size(28.0).strong());
            });
        }
    });
}
