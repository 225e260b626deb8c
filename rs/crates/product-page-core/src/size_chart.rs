use crate::numeric::{number_to_string, parse_float_prefix, round_half_up, to_fixed_1};
use crate::view::ProductView;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const CM_PER_INCH: f64 = 2.54;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "in")]
    Inches,
    #[serde(rename = "cm")]
    Centimeters,
}

impl Unit {
    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Inches => "in",
            Unit::Centimeters => "cm",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rewrite one cell into `target`, or `None` if the cell is not in the
/// opposite unit. Inches become whole centimeters, centimeters become inches
/// with one decimal, so a round trip drifts (`72"` → `183cm` → `72.0"`).
pub fn convert_cell(text: &str, target: Unit) -> Option<String> {
    match target {
        Unit::Centimeters if text.contains('"') => {
            let inches = parse_float_prefix(text)?;
            Some(format!("{}cm", number_to_string(round_half_up(inches * CM_PER_INCH))))
        }
        Unit::Inches if text.contains("cm") => {
            let cm = parse_float_prefix(text)?;
            Some(format!("{}\"", to_fixed_1(cm / CM_PER_INCH)))
        }
        _ => None,
    }
}

/// Activate the unit tab and rewrite every cell shown in the other unit.
/// Returns how many cells changed.
pub fn switch_unit<V: ProductView>(view: &mut V, unit: Unit) -> usize {
    view.activate_unit_tab(unit.as_str());
    let mut converted = 0;
    for (index, cell) in view.size_chart_cells().iter().enumerate() {
        if let Some(text) = convert_cell(cell, unit) {
            view.set_size_chart_cell(index, &text);
            converted += 1;
        }
    }
    tracing::debug!(unit = %unit, converted, "size chart unit switched");
    converted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{RecordingView, ViewCall};

    #[test]
    fn test_inches_to_cm_and_back_drifts() {
        assert_eq!(convert_cell("72\"", Unit::Centimeters).as_deref(), Some("183cm"));
        assert_eq!(convert_cell("183cm", Unit::Inches).as_deref(), Some("72.0\""));
    }

    #[test]
    fn test_only_opposite_unit_cells_convert() {
        assert_eq!(convert_cell("183cm", Unit::Centimeters), None);
        assert_eq!(convert_cell("72\"", Unit::Inches), None);
        assert_eq!(convert_cell("M", Unit::Centimeters), None);
        assert_eq!(convert_cell("\"", Unit::Centimeters), None);
    }

    #[test]
    fn test_ranges_keep_only_leading_number() {
        assert_eq!(convert_cell("34-36\"", Unit::Centimeters).as_deref(), Some("86cm"));
        assert_eq!(convert_cell("86cm", Unit::Inches).as_deref(), Some("33.9\""));
    }

    #[test]
    fn test_cm_halves_round_up() {
        assert_eq!(convert_cell("3.175cm", Unit::Inches).as_deref(), Some("1.3\""));
        assert_eq!(convert_cell("0.635cm", Unit::Inches).as_deref(), Some("0.3\""));
        assert_eq!(convert_cell("Infinitycm", Unit::Inches).as_deref(), Some("Infinity\""));
        assert_eq!(convert_cell("Infinity\"", Unit::Centimeters).as_deref(), Some("Infinitycm"));
    }

    #[test]
    fn test_switching_twice_to_same_unit_is_noop() {
        let mut view = RecordingView {
            chart_cells: vec!["S".into(), "28\"".into(), "36\"".into()],
            ..RecordingView::default()
        };
        assert_eq!(switch_unit(&mut view, Unit::Centimeters), 2);
        assert_eq!(view.chart_cells, ["S", "71cm", "91cm"]);
        view.take_calls();
        assert_eq!(switch_unit(&mut view, Unit::Centimeters), 0);
        assert_eq!(view.take_calls(), vec![ViewCall::UnitTab("cm".into())]);
        assert_eq!(switch_unit(&mut view, Unit::Inches), 2);
        assert_eq!(view.chart_cells, ["S", "28.0\"", "35.8\""]);
    }
}
