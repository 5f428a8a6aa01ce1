use super::calibration::{Calibration, default_comparison_rows};
use super::types::ScenarioRow;

/// Comparison rows from the active calibration. Not derived from sampling.
pub fn scenario_table(calibration: &Calibration) -> &[ScenarioRow] {
    &calibration.comparison
}

/// Built-in comparison rows: Conservative, Base and Optimistic.
pub fn default_scenario_table() -> Vec<ScenarioRow> {
    default_comparison_rows()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_has_three_fixed_rows() {
        let rows = default_scenario_table();
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Conservative", "Base", "Optimistic"]);
        assert!(rows.iter().all(|r| r.simulation_count == 10_000));
        assert_eq!(rows[1].target_value, 90.0);
        assert_eq!(rows[1].predicted_value, 89.4);
    }

    #[test]
    fn table_follows_calibration() {
        let mut calibration = Calibration::default();
        assert_eq!(scenario_table(&calibration), default_scenario_table().as_slice());

        calibration.comparison[0].probability_percent = 99.0;
        assert_eq!(scenario_table(&calibration)[0].probability_percent, 99.0);
    }
}
