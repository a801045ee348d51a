use eframe::egui;

use crate::state::Dashboard;
use crate::ui::{cards, charts, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct TitanicExplorerApp {
    pub dashboard: Dashboard,
}

impl TitanicExplorerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, mut dashboard: Dashboard) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        dashboard.subscribe(|snapshot| {
            log::debug!(
                "survivors {} / non-survivors {} across {} sexes",
                snapshot.counts.survivors,
                snapshot.counts.non_survivors,
                snapshot.survival_by_gender.len()
            );
        });

        // Selection changes inside a frame still need the next frame drawn.
        let ctx = cc.egui_ctx.clone();
        dashboard.subscribe(move |_| ctx.request_repaint());

        Self { dashboard }
    }
}

impl eframe::App for TitanicExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.dashboard);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(200.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.dashboard);
            });

        // ---- Central panel: cards, charts, rows ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let snapshot = self.dashboard.snapshot();

            cards::value_cards(ui, &snapshot.counts);
            ui.add_space(8.0);

            ui.columns(2, |columns| {
                charts::survival_by_gender_chart(&mut columns[0], &snapshot.survival_by_gender);
                charts::age_distribution_chart(
                    &mut columns[1],
                    &snapshot.age_histogram,
                    snapshot.counts.total,
                );
            });
            ui.add_space(8.0);

            egui::CollapsingHeader::new(format!("Passengers ({})", snapshot.counts.total))
                .default_open(false)
                .show(ui, |ui| {
                    table::passenger_table(
                        ui,
                        self.dashboard.dataset(),
                        &snapshot.visible_indices,
                    );
                });
        });
    }
}
