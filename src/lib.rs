//! Partner-themed email inbox.
//!
//! - `inbox`: normalized inbox state and its transitions
//! - `store`: action dispatcher owning the live snapshot
//! - `config`: partner, theme and partner-type JSON files
//! - `mock`: demo mailbox
//! - `bridge`: background worker for loads
//! - `app`, `ui`: egui front end

pub mod app;
pub mod bridge;
pub mod config;
pub mod error;
pub mod inbox;
pub mod mock;
pub mod store;
pub mod ui;

pub fn run() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Email Inbox",
        options,
        Box::new(|cc| Ok(Box::new(app::InboxApp::new(cc)))),
    )
}
