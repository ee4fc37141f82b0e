use cohort_business::generate_breadcrumbs_with_home;
use egui::Ui;

/// Renders the crumb trail for `path`. Returns the href of a clicked crumb.
///
/// The last crumb is the current location and is not clickable.
pub fn breadcrumbs(ui: &mut Ui, path: &str) -> Option<String> {
    let crumbs = generate_breadcrumbs_with_home(path);
    let last = crumbs.len().saturating_sub(1);
    let mut clicked = None;

    ui.horizontal(|ui| {
        for (index, crumb) in crumbs.iter().enumerate() {
            if index == last {
                ui.strong(&crumb.label);
            } else {
                if ui.link(&crumb.label).clicked() {
                    clicked = Some(crumb.href.clone());
                }
                ui.weak("›");
            }
        }
    });

    clicked
}

#[cfg(test)]
mod breadcrumbs_widget_test {
    use egui_kittest::Harness;
    use kittest::Queryable;

    #[test]
    fn test_breadcrumbs_render_trail() {
        let harness = Harness::new_ui(|ui| {
            super::breadcrumbs(ui, "/dashboard/startup-applications");
        });

        assert!(harness.query_by_label("Home").is_some());
        assert!(harness.query_by_label("Dashboard").is_some());
        assert!(harness.query_by_label("Startup Applications").is_some());
    }
}
