use cohort_utils::version_info;
use egui::{Color32, Response, Ui};

/// Displays the build environment and version, e.g. `stable:2026.1.0`.
pub fn env_version(ui: &mut Ui) -> Response {
    let display_text = version_info::format_env_version();
    let (env_name, _) = version_info::env_version_info();

    let color = match env_name {
        "stable" => Color32::GREEN,
        "staging" => Color32::from_rgb(255, 165, 0), // Orange
        "main" => Color32::from_rgb(200, 200, 200),  // Light gray
        _ => Color32::WHITE,
    };

    ui.colored_label(color, display_text)
}

#[cfg(test)]
mod env_version_widget_test {
    use egui_kittest::Harness;
    use kittest::Queryable;

    #[test]
    fn test_env_version_widget() {
        let mut harness = Harness::new_ui(|ui| {
            super::env_version(ui);
        });
        harness.step();

        // env:info format
        assert!(
            harness.query_by_label_contains(":").is_some(),
            "env_version widget should display format like 'env:info'"
        );
    }
}
