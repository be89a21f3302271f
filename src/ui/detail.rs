use crate::config::FeatureFlags;
use crate::inbox::{Email, EmailId, Folder};
use crate::store::InboxAction;
use crate::ui::format::full_date;
use chrono::{DateTime, Utc};
use egui::{RichText, Ui};

/// Reply compose box state, kept by the app across frames.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplyDraft {
    pub open: bool,
    pub content: String,
}

impl ReplyDraft {
    pub fn reset(&mut self) {
        self.open = false;
        self.content.clear();
    }

    /// Turns the draft into a reply action and resets it. Blank drafts stay open.
    pub fn take_reply(&mut self, to: &EmailId, at: DateTime<Utc>) -> Option<InboxAction> {
        if self.content.trim().is_empty() {
            return None;
        }
        let content = std::mem::take(&mut self.content);
        self.open = false;
        Some(InboxAction::Reply {
            to: to.clone(),
            content,
            at,
        })
    }
}

pub fn draw_detail(
    ui: &mut Ui,
    email: &Email,
    folder: Option<Folder>,
    flags: &FeatureFlags,
    draft: &mut ReplyDraft,
    actions: &mut Vec<InboxAction>,
) {
    let in_inbox = folder == Some(Folder::Inbox);

    ui.horizontal(|ui| {
        if ui.button("Back").clicked() {
            actions.push(InboxAction::CloseDetail);
            draft.reset();
        }
        if ui.button("Mark as Unread").clicked() {
            actions.push(InboxAction::MarkUnread(vec![email.id.clone()]));
        }
        if flags.mark_as_spam_button && in_inbox && ui.button("Mark as Spam").clicked() {
            actions.push(InboxAction::MarkSpam(vec![email.id.clone()]));
            actions.push(InboxAction::CloseDetail);
            draft.reset();
        }
        if flags.reply_functionality && in_inbox && !draft.open && ui.button("Reply").clicked() {
            draft.open = true;
        }
    });
    ui.separator();

    ui.heading(&email.subject);
    ui.add_space(4.0);
    if email.is_sent {
        ui.label(format!("To: {}", email.receiver.as_deref().unwrap_or("")));
    } else {
        ui.label(format!("From: {}", email.sender));
    }
    ui.label(RichText::new(full_date(&email.date, &chrono::Local)).weak());
    ui.add_space(8.0);

    egui::ScrollArea::vertical()
        .max_height(ui.available_height() * 0.6)
        .show(ui, |ui| {
            ui.label(&email.body);
        });

    if draft.open {
        ui.add_space(8.0);
        ui.separator();
        ui.label(format!("Reply to {}", email.sender));
        ui.add(
            egui::TextEdit::multiline(&mut draft.content)
                .hint_text("Write your reply...")
                .desired_rows(6)
                .desired_width(f32::INFINITY),
        );
        ui.horizontal(|ui| {
            let can_send = !draft.content.trim().is_empty();
            if ui.add_enabled(can_send, egui::Button::new("Send")).clicked() {
                if let Some(action) = draft.take_reply(&email.id, Utc::now()) {
                    actions.push(action);
                }
            }
            if ui.button("Cancel").clicked() {
                draft.reset();
            }
        });
    }
}
