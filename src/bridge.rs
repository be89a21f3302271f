use crate::config::{self, ConfigPaths, PartnerConfig, ThemeConfig};
use crate::inbox::InboxState;
use crate::mock;
use std::sync::mpsc as std_mpsc;
use tokio::sync::mpsc as tokio_mpsc;
use tracing::{error, info};

#[derive(Debug)]
pub enum UiCommand {
    LoadEmails,
    LoadPartner { partner_id: String, generation: u64 },
}

#[derive(Debug)]
pub enum BackgroundEvent {
    EmailsLoaded(InboxState),
    PartnerLoaded {
        generation: u64,
        config: PartnerConfig,
        theme: Box<ThemeConfig>,
    },
    PartnerLoadFailed {
        generation: u64,
        message: String,
    },
}

#[derive(Debug)]
pub struct BridgeChannels {
    pub cmd_tx: tokio_mpsc::UnboundedSender<UiCommand>,
    pub event_rx: std_mpsc::Receiver<BackgroundEvent>,
}

pub fn setup_bridge(ctx: egui::Context, paths: ConfigPaths) -> BridgeChannels {
    let (cmd_tx, cmd_rx) = tokio_mpsc::unbounded_channel::<UiCommand>();
    let (event_tx, event_rx) = std_mpsc::channel::<BackgroundEvent>();

    std::thread::spawn(move || match tokio::runtime::Runtime::new() {
        Ok(rt) => rt.block_on(background_loop(cmd_rx, event_tx, ctx, paths)),
        Err(e) => error!("Failed to create tokio runtime: {}", e),
    });

    BridgeChannels { cmd_tx, event_rx }
}

async fn background_loop(
    mut cmd_rx: tokio_mpsc::UnboundedReceiver<UiCommand>,
    event_tx: std_mpsc::Sender<BackgroundEvent>,
    ctx: egui::Context,
    paths: ConfigPaths,
) {
    while let Some(cmd) = cmd_rx.recv().await {
        let tx = event_tx.clone();
        let ctx2 = ctx.clone();
        match cmd {
            UiCommand::LoadEmails => {
                tokio::spawn(async move {
                    handle_load_emails(tx, ctx2).await;
                });
            }
            UiCommand::LoadPartner {
                partner_id,
                generation,
            } => {
                let paths = paths.clone();
                tokio::spawn(async move {
                    handle_load_partner(paths, partner_id, generation, tx, ctx2).await;
                });
            }
        }
    }
}

fn send_event(tx: &std_mpsc::Sender<BackgroundEvent>, ctx: &egui::Context, evt: BackgroundEvent) {
    if let Err(e) = tx.send(evt) {
        tracing::warn!("Failed to send event to UI: {}", e);
    }
    ctx.request_repaint();
}

async fn handle_load_emails(tx: std_mpsc::Sender<BackgroundEvent>, ctx: egui::Context) {
    let state = mock::fetch_emails().await;
    info!("Loaded {} emails", state.len());
    send_event(&tx, &ctx, BackgroundEvent::EmailsLoaded(state));
}

async fn handle_load_partner(
    paths: ConfigPaths,
    partner_id: String,
    generation: u64,
    tx: std_mpsc::Sender<BackgroundEvent>,
    ctx: egui::Context,
) {
    let loaded = async {
        let config = config::load_partner_config(&paths, &partner_id).await?;
        let theme = config::load_theme(&paths, &config.theme_id).await?;
        Ok::<_, crate::error::AppError>((config, theme))
    }
    .await;

    let evt = match loaded {
        Ok((config, theme)) => {
            info!(
                "Loaded partner {} with theme {} (generation {})",
                partner_id, theme.theme_id, generation
            );
            BackgroundEvent::PartnerLoaded {
                generation,
                config,
                theme: Box::new(theme),
            }
        }
        Err(e) => {
            error!("Failed to load partner config or theme for {}: {}", partner_id, e);
            BackgroundEvent::PartnerLoadFailed {
                generation,
                message: e.to_string(),
            }
        }
    };
    send_event(&tx, &ctx, evt);
}
