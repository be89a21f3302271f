use crate::config::FeatureFlags;
use crate::inbox::{Folder, FolderCounts};
use crate::store::InboxAction;
use egui::Ui;

/// Folders shown in the sidebar. Trash is never listed.
pub fn visible_folders(flags: &FeatureFlags) -> Vec<Folder> {
    let mut folders = vec![Folder::Inbox, Folder::Sent];
    if flags.mark_as_spam_button {
        folders.push(Folder::Spam);
    }
    folders
}

pub fn draw_sidebar(
    ui: &mut Ui,
    counts: FolderCounts,
    current: Option<Folder>,
    flags: &FeatureFlags,
    actions: &mut Vec<InboxAction>,
) {
    ui.heading("Folders");
    ui.add_space(4.0);

    for folder in visible_folders(flags) {
        let text = format!("{} ({})", folder.label(), counts.get(folder));
        if ui
            .selectable_label(current == Some(folder), text)
            .clicked()
            && current != Some(folder)
        {
            actions.push(InboxAction::ChangeFolder(folder));
        }
    }

    ui.add_space(8.0);
    ui.separator();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spam_folder_follows_flag() {
        let mut flags = FeatureFlags::default();
        assert_eq!(
            visible_folders(&flags),
            vec![Folder::Inbox, Folder::Sent, Folder::Spam]
        );
        flags.mark_as_spam_button = false;
        assert_eq!(visible_folders(&flags), vec![Folder::Inbox, Folder::Sent]);
    }
}
