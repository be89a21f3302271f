use crate::bridge::{BackgroundEvent, UiCommand};
use crate::config::{ConfigPaths, FeatureFlags, PartnerConfig, ThemeConfig, DEFAULT_PARTNER};
use crate::inbox::Folder;
use crate::store::{InboxAction, InboxStore};
use crate::ui::detail::{self, ReplyDraft};
use crate::ui::header::{self, HeaderAction};
use crate::ui::theme::{self, Palette};
use crate::ui::{list, sidebar};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, info, warn};

/// Active partner and the load in flight. Each switch bumps the generation so
/// results of superseded loads are dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct PartnerSession {
    current: String,
    requested: String,
    generation: u64,
    config: Option<PartnerConfig>,
    palette: Option<Palette>,
    error: Option<String>,
}

impl PartnerSession {
    pub fn new(partner_id: &str) -> Self {
        Self {
            current: partner_id.to_string(),
            requested: partner_id.to_string(),
            generation: 0,
            config: None,
            palette: None,
            error: None,
        }
    }

    /// Starts a load for `partner_id` and returns its generation.
    pub fn switch(&mut self, partner_id: String) -> u64 {
        self.generation += 1;
        self.requested = partner_id;
        self.error = None;
        self.generation
    }

    /// Partner shown in the switcher: the one being loaded, else the active one.
    pub fn requested(&self) -> &str {
        &self.requested
    }

    pub fn config(&self) -> Option<&PartnerConfig> {
        self.config.as_ref()
    }

    pub fn palette(&self) -> Option<&Palette> {
        self.palette.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Flags of the active partner; everything is on until one loads.
    pub fn features(&self) -> FeatureFlags {
        self.config
            .as_ref()
            .map_or_else(FeatureFlags::default, |c| c.features)
    }

    /// Installs a finished load. Returns false when it was stale or its theme
    /// is unusable; the previous partner then stays active.
    pub fn accept(&mut self, generation: u64, config: PartnerConfig, theme: &ThemeConfig) -> bool {
        if generation != self.generation {
            debug!("Dropping stale partner load (generation {generation})");
            return false;
        }
        match Palette::from_theme(theme) {
            Ok(palette) => {
                self.current.clone_from(&config.partner_id);
                self.requested.clone_from(&config.partner_id);
                self.config = Some(config);
                self.palette = Some(palette);
                self.error = None;
                true
            }
            Err(e) => {
                warn!("Theme {} for partner {} is unusable: {}", theme.theme_id, config.partner_id, e);
                self.fail(e.to_string());
                false
            }
        }
    }

    /// Records a failed load. Returns false when it was stale.
    pub fn reject(&mut self, generation: u64, message: String) -> bool {
        if generation != self.generation {
            debug!("Dropping stale partner failure (generation {generation})");
            return false;
        }
        self.fail(message);
        true
    }

    fn fail(&mut self, message: String) {
        self.requested.clone_from(&self.current);
        self.error = Some(message);
    }
}

#[derive(Debug)]
pub struct InboxApp {
    store: InboxStore,
    partner: PartnerSession,
    dark_mode: bool,
    search_input: String,
    reply: ReplyDraft,
    cmd_tx: UnboundedSender<UiCommand>,
    event_rx: std::sync::mpsc::Receiver<BackgroundEvent>,
}

impl InboxApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let paths = ConfigPaths::from_env();
        info!("Reading partner config from {}", paths.root().display());
        let bridge = crate::bridge::setup_bridge(cc.egui_ctx.clone(), paths);
        theme::apply(&cc.egui_ctx, None, false);

        let mut app = Self {
            store: InboxStore::new(),
            partner: PartnerSession::new(DEFAULT_PARTNER),
            dark_mode: false,
            search_input: String::new(),
            reply: ReplyDraft::default(),
            cmd_tx: bridge.cmd_tx,
            event_rx: bridge.event_rx,
        };
        app.send(UiCommand::LoadEmails);
        app.request_partner(DEFAULT_PARTNER.to_string());
        app
    }

    fn send(&self, cmd: UiCommand) {
        if let Err(e) = self.cmd_tx.send(cmd) {
            error!("Background worker is gone: {}", e);
        }
    }

    fn request_partner(&mut self, partner_id: String) {
        let generation = self.partner.switch(partner_id.clone());
        self.send(UiCommand::LoadPartner {
            partner_id,
            generation,
        });
    }

    fn drain_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                BackgroundEvent::EmailsLoaded(state) => {
                    self.search_input = state.search_query().to_string();
                    self.store.replace(state);
                    self.enforce_features();
                }
                BackgroundEvent::PartnerLoaded {
                    generation,
                    config,
                    theme: partner_theme,
                } => {
                    if self.partner.accept(generation, config, &partner_theme) {
                        theme::apply(ctx, self.partner.palette(), self.dark_mode);
                        self.enforce_features();
                    }
                }
                BackgroundEvent::PartnerLoadFailed {
                    generation,
                    message,
                } => {
                    self.partner.reject(generation, message);
                }
            }
            ctx.request_repaint();
        }
    }

    /// Leaves views the active partner does not offer.
    fn enforce_features(&mut self) {
        let features = self.partner.features();
        let mut actions = Vec::new();
        if let Ok(state) = self.store.state() {
            if let Some(folder) = state.current_folder() {
                if !sidebar::visible_folders(&features).contains(&folder) {
                    actions.push(InboxAction::ChangeFolder(Folder::Inbox));
                }
            }
            if !features.search_filter && !state.search_query().is_empty() {
                self.search_input.clear();
                actions.push(InboxAction::Search(String::new()));
            }
        }
        self.dispatch_all(actions);
    }

    fn dispatch_all(&mut self, actions: Vec<InboxAction>) {
        for action in actions {
            if let Err(e) = self.store.dispatch(action) {
                warn!("Dropped inbox action: {}", e);
            }
        }
    }
}

impl eframe::App for InboxApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events(ctx);

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            let title = self
                .partner
                .config()
                .map_or("Email Inbox", |c| c.partner_name.as_str());
            let picked = header::draw_header(
                ui,
                title,
                self.partner.palette().map(|p| p.logo),
                self.partner.requested(),
                self.dark_mode,
            );
            match picked {
                Some(HeaderAction::ToggleDarkMode) => {
                    self.dark_mode = !self.dark_mode;
                    theme::apply(ctx, self.partner.palette(), self.dark_mode);
                }
                Some(HeaderAction::SwitchPartner(id)) => self.request_partner(id),
                None => {}
            }
            if let Some(err) = self.partner.error() {
                ui.colored_label(ui.visuals().error_fg_color, format!("Error: {err}"));
            }
        });

        let (state, counts, current) = match (
            self.store.state(),
            self.store.folder_counts(),
            self.store.current_email(),
        ) {
            (Ok(state), Ok(counts), Ok(current)) => (state, counts, current),
            _ => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.centered_and_justified(|ui| {
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label("Loading emails...");
                        });
                    });
                });
                return;
            }
        };

        let features = self.partner.features();
        let mut actions = Vec::new();

        egui::SidePanel::left("sidebar")
            .resizable(true)
            .default_width(180.0)
            .show(ctx, |ui| {
                sidebar::draw_sidebar(ui, counts, state.current_folder(), &features, &mut actions);
            });

        egui::CentralPanel::default().show(ctx, |ui| match current {
            Some(email) => detail::draw_detail(
                ui,
                email,
                state.current_folder(),
                &features,
                &mut self.reply,
                &mut actions,
            ),
            None => list::draw_list(ui, state, &features, &mut self.search_input, &mut actions),
        });

        if actions
            .iter()
            .any(|a| matches!(a, InboxAction::ChangeFolder(_) | InboxAction::Open(_)))
        {
            self.reply.reset();
        }
        self.dispatch_all(actions);
    }
}
