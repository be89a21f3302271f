use crate::config::FeatureFlags;
use crate::inbox::{Email, EmailId, Folder, InboxState};
use crate::store::InboxAction;
use crate::ui::format::{highlight_segments, list_date};
use egui::text::{LayoutJob, TextFormat};
use egui::{Color32, RichText, TextStyle, Ui};
use egui_extras::{Column, TableBuilder};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkButton {
    MarkRead,
    MarkUnread,
    MarkSpam,
    NotSpam,
    Delete,
}

impl BulkButton {
    fn label(self) -> &'static str {
        match self {
            BulkButton::MarkRead => "Mark as Read",
            BulkButton::MarkUnread => "Mark as Unread",
            BulkButton::MarkSpam => "Mark as Spam",
            BulkButton::NotSpam => "Not Spam",
            BulkButton::Delete => "Delete",
        }
    }

    pub fn action(self, ids: Vec<EmailId>) -> InboxAction {
        match self {
            BulkButton::MarkRead => InboxAction::MarkRead(ids),
            BulkButton::MarkUnread => InboxAction::MarkUnread(ids),
            BulkButton::MarkSpam => InboxAction::MarkSpam(ids),
            BulkButton::NotSpam => InboxAction::MarkNotSpam(ids),
            BulkButton::Delete => InboxAction::Delete(ids),
        }
    }
}

/// Buttons offered for the selection in `folder`.
pub fn bulk_buttons(folder: Option<Folder>, flags: &FeatureFlags) -> Vec<BulkButton> {
    let mut buttons = Vec::new();
    match folder {
        Some(Folder::Trash) => {}
        Some(Folder::Spam) => {
            if flags.mark_as_spam_button {
                buttons.push(BulkButton::NotSpam);
            }
            if flags.bulk_actions_toolbar {
                buttons.push(BulkButton::Delete);
            }
        }
        _ => {
            if flags.bulk_actions_toolbar {
                buttons.extend([BulkButton::MarkRead, BulkButton::MarkUnread]);
            }
            if flags.mark_as_spam_button {
                buttons.push(BulkButton::MarkSpam);
            }
            if flags.bulk_actions_toolbar {
                buttons.push(BulkButton::Delete);
            }
        }
    }
    buttons
}

/// The other party of an email: the recipient for sent mail, otherwise the sender.
pub fn counterpart(email: &Email) -> &str {
    match (&email.receiver, email.is_sent) {
        (Some(receiver), true) => receiver,
        _ => &email.sender,
    }
}

pub fn draw_list(
    ui: &mut Ui,
    state: &InboxState,
    flags: &FeatureFlags,
    search_input: &mut String,
    actions: &mut Vec<InboxAction>,
) {
    if flags.search_filter {
        let response = ui.add(
            egui::TextEdit::singleline(search_input)
                .hint_text("Search emails...")
                .desired_width(f32::INFINITY),
        );
        if response.changed() {
            actions.push(InboxAction::Search(search_input.clone()));
        }
        ui.add_space(4.0);
    }

    draw_bulk_bar(ui, state, flags, actions);
    ui.separator();

    let emails = state.display_emails();
    if emails.is_empty() {
        ui.centered_and_justified(|ui| {
            ui.label("No emails to display");
        });
        return;
    }
    draw_table(ui, state, &emails, flags, actions);
}

fn draw_bulk_bar(
    ui: &mut Ui,
    state: &InboxState,
    flags: &FeatureFlags,
    actions: &mut Vec<InboxAction>,
) {
    let buttons = bulk_buttons(state.current_folder(), flags);
    let has_selection = state.selected_count() > 0;

    ui.horizontal(|ui| {
        let mut all = state.is_select_all_active();
        if ui.checkbox(&mut all, "Select all").changed() {
            actions.push(if all {
                InboxAction::SelectAll
            } else {
                InboxAction::DeselectAll
            });
        }

        if has_selection {
            ui.label(format!("{} selected", state.selected_count()));
        }

        for button in buttons {
            if ui
                .add_enabled(has_selection, egui::Button::new(button.label()))
                .clicked()
            {
                actions.push(button.action(state.selected_ids().cloned().collect()));
            }
        }
    });
}

fn draw_table(
    ui: &mut Ui,
    state: &InboxState,
    emails: &[&Email],
    flags: &FeatureFlags,
    actions: &mut Vec<InboxAction>,
) {
    let query = state.search_query();
    let now = chrono::Local::now();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::exact(24.0))
        .column(Column::initial(200.0).at_least(120.0))
        .column(Column::remainder().at_least(200.0))
        .column(Column::exact(80.0))
        .header(20.0, |mut header| {
            header.col(|_| {});
            header.col(|ui| {
                ui.strong("From");
            });
            header.col(|ui| {
                ui.strong("Subject");
            });
            header.col(|ui| {
                ui.strong("Date");
            });
        })
        .body(|body| {
            body.rows(22.0, emails.len(), |mut row| {
                let Some(email) = emails.get(row.index()) else {
                    return;
                };
                row.col(|ui| {
                    let mut checked = state.is_selected(&email.id);
                    if ui.checkbox(&mut checked, "").changed() {
                        actions.push(InboxAction::ToggleSelection(email.id.clone()));
                    }
                });
                row.col(|ui| {
                    let who = if email.is_sent {
                        format!("To: {}", counterpart(email))
                    } else {
                        counterpart(email).to_string()
                    };
                    let job = highlighted(ui, &who, query, !email.is_read);
                    ui.add(egui::Label::new(job).truncate());
                });
                row.col(|ui| {
                    let mut job = highlighted(ui, &email.subject, query, !email.is_read);
                    if flags.email_preview_snippet {
                        job.append(
                            &format!("  {}", email.snippet),
                            0.0,
                            TextFormat {
                                font_id: TextStyle::Body.resolve(ui.style()),
                                color: ui.visuals().weak_text_color(),
                                ..Default::default()
                            },
                        );
                    }
                    let response = ui.add(
                        egui::Label::new(job)
                            .sense(egui::Sense::click())
                            .truncate(),
                    );
                    if response.clicked() {
                        actions.push(InboxAction::Open(email.id.clone()));
                    }
                });
                row.col(|ui| {
                    ui.label(RichText::new(list_date(&email.date, &now)).small());
                });
            });
        });
}

fn highlighted(ui: &Ui, text: &str, query: &str, strong: bool) -> LayoutJob {
    let color = if strong {
        ui.visuals().strong_text_color()
    } else {
        ui.visuals().text_color()
    };
    let font_id = TextStyle::Body.resolve(ui.style());
    let mark = ui.visuals().warn_fg_color.gamma_multiply(0.4);

    let mut job = LayoutJob::default();
    for segment in highlight_segments(text, query) {
        job.append(
            segment.text,
            0.0,
            TextFormat {
                font_id: font_id.clone(),
                color,
                background: if segment.is_match {
                    mark
                } else {
                    Color32::TRANSPARENT
                },
                ..Default::default()
            },
        );
    }
    job
}
