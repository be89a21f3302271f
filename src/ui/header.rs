use crate::config::PARTNERS;
use egui::{RichText, Ui};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderAction {
    ToggleDarkMode,
    SwitchPartner(String),
}

fn partner_name(partner_id: &str) -> &str {
    PARTNERS
        .iter()
        .find(|(id, _)| *id == partner_id)
        .map_or(partner_id, |(_, name)| *name)
}

pub fn draw_header(
    ui: &mut Ui,
    title: &str,
    logo_color: Option<egui::Color32>,
    partner_id: &str,
    dark_mode: bool,
) -> Option<HeaderAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        let mut heading = RichText::new(title).heading().strong();
        if let Some(color) = logo_color {
            heading = heading.color(color);
        }
        ui.label(heading);

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let label = if dark_mode { "Light" } else { "Dark" };
            if ui.button(label).clicked() {
                action = Some(HeaderAction::ToggleDarkMode);
            }

            let mut selected = partner_id.to_string();
            egui::ComboBox::from_id_salt("partner")
                .selected_text(partner_name(partner_id))
                .show_ui(ui, |ui| {
                    for (id, name) in PARTNERS {
                        ui.selectable_value(&mut selected, id.to_string(), *name);
                    }
                });
            if selected != partner_id {
                action = Some(HeaderAction::SwitchPartner(selected));
            }
            ui.label("Partner:");
        });
    });

    action
}
