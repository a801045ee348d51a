use eframe::egui::Color32;
use palette::{named, Srgb};

// ---------------------------------------------------------------------------
// Chart colours
// ---------------------------------------------------------------------------

/// Bar fill for the age histogram.
pub const HISTOGRAM_HEX: &str = "#3498DB";

fn to_color32(rgb: Srgb<u8>, opacity: f32) -> Color32 {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(rgb.red, rgb.green, rgb.blue, alpha)
}

fn outcome_rgb(survived: bool) -> Srgb<u8> {
    if survived {
        named::MEDIUMSEAGREEN
    } else {
        named::TOMATO
    }
}

fn histogram_rgb() -> Srgb<u8> {
    HISTOGRAM_HEX.parse().unwrap_or(named::STEELBLUE)
}

/// Fill for the "survived" / "did not survive" bars.
pub fn outcome_color(survived: bool) -> Color32 {
    to_color32(outcome_rgb(survived), 0.9)
}

/// Fill for the age histogram bars.
pub fn histogram_color() -> Color32 {
    to_color32(histogram_rgb(), 0.7)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_outcome_colours() {
        let green = outcome_rgb(true);
        assert_eq!((green.red, green.green, green.blue), (60, 179, 113));
        let red = outcome_rgb(false);
        assert_eq!((red.red, red.green, red.blue), (255, 99, 71));
    }

    #[test]
    fn histogram_hex_parses() {
        let rgb = histogram_rgb();
        assert_eq!((rgb.red, rgb.green, rgb.blue), (0x34, 0x98, 0xDB));
    }

    #[test]
    fn bars_are_translucent() {
        assert!(outcome_color(true).a() < 255);
        assert!(histogram_color().a() < outcome_color(false).a());
    }
}
