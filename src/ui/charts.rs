use std::collections::BTreeMap;

use eframe::egui::{self, Ui};
use egui_plot::{Bar, BarChart, Corner, Legend, Plot};

use crate::color::{histogram_color, outcome_color};
use crate::data::aggregate::{HistogramBin, SurvivalCounts};
use crate::data::model::Sex;

const CHART_HEIGHT: f32 = 320.0;
const BAR_WIDTH: f64 = 0.4;

const NO_MATCHES: &str = "No passengers match the current filters";
const NO_KNOWN_AGES: &str = "No known ages for the current filters";

fn chart_title(ui: &mut Ui, title: &str) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(title);
    });
}

fn empty_placeholder(ui: &mut Ui, message: &str) {
    ui.allocate_ui(egui::vec2(ui.available_width(), CHART_HEIGHT), |ui: &mut Ui| {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(message);
        });
    });
}

// ---------------------------------------------------------------------------
// Survival status by gender (grouped bars)
// ---------------------------------------------------------------------------

/// Bars for one outcome, one per observed sex, offset to sit beside the
/// other outcome's bar.
fn outcome_bars(groups: &BTreeMap<Sex, SurvivalCounts>, survived: bool) -> Vec<Bar> {
    let offset = if survived { -BAR_WIDTH / 2.0 } else { BAR_WIDTH / 2.0 };
    groups
        .iter()
        .map(|(sex, counts)| {
            let value = if survived {
                counts.survived
            } else {
                counts.perished
            };
            Bar::new(sex_position(*sex) + offset, value as f64)
                .width(BAR_WIDTH)
                .name(sex.as_str())
                .fill(outcome_color(survived))
        })
        .collect()
}

fn sex_position(sex: Sex) -> f64 {
    Sex::ALL.iter().position(|s| *s == sex).unwrap_or(0) as f64
}

fn outcome_label(survived: bool) -> &'static str {
    if survived {
        "Survived"
    } else {
        "Did not survive"
    }
}

/// Render the grouped survival chart.
pub fn survival_by_gender_chart(ui: &mut Ui, groups: &BTreeMap<Sex, SurvivalCounts>) {
    chart_title(ui, "Survival Status by Gender");

    if groups.is_empty() {
        empty_placeholder(ui, NO_MATCHES);
        return;
    }

    // Survivors first, matching the legend order.
    let charts: Vec<BarChart> = [true, false]
        .into_iter()
        .map(|survived| {
            let label = outcome_label(survived);
            BarChart::new(outcome_bars(groups, survived))
                .name(label)
                .color(outcome_color(survived))
                .element_formatter(Box::new(move |bar, _chart| {
                    format!("Gender: {}\n{label}: {}", bar.name, bar.value)
                }))
        })
        .collect();

    Plot::new("survival_by_gender")
        .legend(Legend::default().position(Corner::RightTop))
        .height(CHART_HEIGHT)
        .x_axis_label("Gender")
        .y_axis_label("Number of Passengers")
        .x_axis_formatter(|mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            Sex::ALL
                .get(idx as usize)
                .map(|s| s.to_string())
                .unwrap_or_default()
        })
        .include_y(0.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

// ---------------------------------------------------------------------------
// Age distribution (histogram)
// ---------------------------------------------------------------------------

/// Placeholder text for an age chart with no bars. Matching passengers whose
/// ages are all unknown still leave the chart empty.
fn empty_age_message(matched: usize) -> &'static str {
    if matched == 0 {
        NO_MATCHES
    } else {
        NO_KNOWN_AGES
    }
}

/// Render the age histogram. `matched` is the number of passengers passing
/// the filters, known age or not.
pub fn age_distribution_chart(ui: &mut Ui, bins: &[HistogramBin], matched: usize) {
    chart_title(ui, "Age Distribution");

    if bins.is_empty() {
        empty_placeholder(ui, empty_age_message(matched));
        return;
    }

    let bars: Vec<Bar> = bins
        .iter()
        .map(|bin| {
            Bar::new(bin.center(), bin.count as f64)
                .width(bin.width())
                .stroke(egui::Stroke::new(1.0, egui::Color32::BLACK))
        })
        .collect();

    let chart = BarChart::new(bars)
        .name("Count")
        .color(histogram_color())
        .element_formatter(Box::new(|bar, _chart| {
            let half = bar.bar_width / 2.0;
            format!(
                "Age: {:.1}-{:.1}\nCount: {}",
                bar.argument - half,
                bar.argument + half,
                bar.value
            )
        }));

    Plot::new("age_distribution")
        .height(CHART_HEIGHT)
        .x_axis_label("Age")
        .y_axis_label("Count")
        .include_y(0.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| plot_ui.bar_chart(chart));
}
