//! Cell rendering for each [`CellDisplay`] variant.

use cohort_business::{CellDisplay, SelectOption};
use egui::{Color32, RichText, Ui};

/// Maps a tag colour name to an egui colour; unknown names render gray.
pub fn tag_color(name: &str) -> Color32 {
    match name {
        "blue" => Color32::from_rgb(59, 130, 246),
        "cyan" => Color32::from_rgb(6, 182, 212),
        "teal" => Color32::from_rgb(20, 184, 166),
        "green" => Color32::from_rgb(34, 139, 34),
        "orange" => Color32::from_rgb(255, 165, 0),
        "purple" => Color32::from_rgb(147, 51, 234),
        "red" => Color32::RED,
        "yellow" => Color32::YELLOW,
        _ => Color32::GRAY,
    }
}

/// Renders one cell. Returns the newly chosen value when a select changed.
pub fn render_cell(ui: &mut Ui, cell: &CellDisplay, id_salt: (usize, usize)) -> Option<String> {
    match cell {
        CellDisplay::Empty => {
            ui.weak("-");
            None
        }
        CellDisplay::Text(text) => {
            ui.label(text);
            None
        }
        CellDisplay::Date(date) => {
            ui.label(RichText::new(date).monospace());
            None
        }
        CellDisplay::Tag {
            label,
            color,
            with_icon,
        } => {
            render_tag(ui, label, color, *with_icon);
            None
        }
        CellDisplay::Avatar { name, image_url } => {
            render_avatar(ui, name, image_url.as_deref());
            None
        }
        CellDisplay::Url(url) => {
            ui.hyperlink(url);
            None
        }
        CellDisplay::Email(email) => {
            ui.hyperlink_to(email, format!("mailto:{email}"));
            None
        }
        CellDisplay::Phone(phone) => {
            ui.hyperlink_to(phone, format!("tel:{phone}"));
            None
        }
        CellDisplay::Select { current, options } => {
            render_select(ui, current.as_deref(), options, id_salt)
        }
    }
}

fn render_tag(ui: &mut Ui, label: &str, color: &str, with_icon: bool) {
    let color = tag_color(color);
    let text = if with_icon {
        format!("● {label}")
    } else {
        label.to_owned()
    };
    egui::Frame::new()
        .stroke(egui::Stroke::new(1.0, color))
        .corner_radius(4.0)
        .inner_margin(egui::Margin::symmetric(6, 1))
        .show(ui, |ui| {
            ui.label(RichText::new(text).color(color).small());
        });
}

fn render_avatar(ui: &mut Ui, name: &str, image_url: Option<&str>) {
    ui.horizontal(|ui| {
        let initial = name
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_default();
        let (rect, _) = ui.allocate_exact_size(egui::vec2(20.0, 20.0), egui::Sense::hover());
        let fill = ui.visuals().widgets.inactive.bg_fill;
        ui.painter().circle_filled(rect.center(), 10.0, fill);
        ui.painter().text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            initial,
            egui::FontId::proportional(11.0),
            ui.visuals().text_color(),
        );
        let response = ui.label(name);
        if let Some(url) = image_url {
            response.on_hover_text(url);
        }
    });
}

fn render_select(
    ui: &mut Ui,
    current: Option<&str>,
    options: &[SelectOption],
    id_salt: (usize, usize),
) -> Option<String> {
    let selected_text = current
        .map(|value| {
            options
                .iter()
                .find(|o| o.value == value)
                .map_or_else(|| value.to_owned(), |o| o.label.clone())
        })
        .unwrap_or_else(|| "Select...".to_owned());

    let mut chosen = None;
    egui::ComboBox::from_id_salt(("cell_select", id_salt))
        .selected_text(selected_text)
        .show_ui(ui, |ui| {
            for option in options {
                let is_current = current == Some(option.value.as_str());
                let text = RichText::new(&option.label).color(tag_color(&option.color));
                if ui.selectable_label(is_current, text).clicked() && !is_current {
                    chosen = Some(option.value.clone());
                }
            }
        });
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_tag_color_is_gray() {
        assert_eq!(tag_color("gray"), Color32::GRAY);
        assert_eq!(tag_color("no-such-color"), Color32::GRAY);
        assert_ne!(tag_color("green"), Color32::GRAY);
    }
}
