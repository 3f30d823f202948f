//! Dashboard GUI
//!
//! Champion and item browsers, AI profile manager and settings in one window.

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use eframe::egui;
use egui_phosphor::regular::*;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{error, info};
use uuid::Uuid;

use crate::backend::{ItemSource, ProfileStore};
use crate::browser::Browser;
use crate::champion::Champion;
use crate::config::Config;
use crate::data::{DataStatus, LocalDataSource};
use crate::item::Item;
use crate::presenter::{Listable, PageLink};
use crate::profile::{AiProfile, JsonProfileStore, ProfileForm};
use crate::request::{Loadable, RequestState};

/// Champion cards per row in the grid
const CARDS_PER_ROW: usize = 4;

/// Dashboard application state
pub struct Dashboard {
    /// Configuration, saved whenever a setting changes
    config: Config,
    /// Game data on disk
    source: Arc<LocalDataSource>,
    /// Saved AI profiles
    profile_store: JsonProfileStore,
    /// Runtime used for background loads
    runtime: Handle,
    /// Current tab
    current_tab: DashboardTab,
    /// Loaded champions and list state
    champion_browser: Browser<Champion>,
    /// Loaded items and list state
    item_browser: Browser<Item>,
    /// Champion search box contents
    champion_search: String,
    /// Item search box contents
    item_search: String,
    /// Local data version
    data_status: Loadable<DataStatus>,
    /// Results of background data loads
    load_tx: mpsc::Sender<DataLoad>,
    load_rx: mpsc::Receiver<DataLoad>,
    /// Paths typed into the import box
    import_path: String,
    item_import_path: String,
    /// Profiles as last read from the store
    profiles: Loadable<Vec<AiProfile>>,
    /// Add/edit profile form
    form: ProfileForm,
    /// Profile waiting for delete confirmation
    pending_delete: Option<(Uuid, String)>,
    /// Status message
    status_message: Option<(String, Instant)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardTab {
    Champions,
    Items,
    Profiles,
    Settings,
    About,
}

/// A finished background load
enum DataLoad {
    Champions(Result<Vec<Champion>>),
    Items(Result<Vec<Item>>),
}

/// Owned copy of the current page, so the UI can mutate the browser while drawing
struct PageSnapshot<T> {
    items: Vec<T>,
    window: Vec<PageLink>,
    current_page: usize,
    total_pages: usize,
    has_prev: bool,
    has_next: bool,
    shows_pager: bool,
    matched: usize,
    range: String,
}

impl<T: Listable + Clone> PageSnapshot<T> {
    fn of(browser: &mut Browser<T>) -> Self {
        let view = browser.view();
        Self {
            items: view.items.iter().map(|item| (*item).clone()).collect(),
            window: view.window.clone(),
            current_page: view.current_page,
            total_pages: view.total_pages,
            has_prev: view.has_prev,
            has_next: view.has_next,
            shows_pager: view.shows_pager(),
            matched: view.matched,
            range: view.range_label(),
        }
    }
}

/// A pager click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PagerMove {
    Prev,
    Next,
    To(usize),
}

impl PagerMove {
    fn apply<T: Listable>(self, browser: &mut Browser<T>) {
        match self {
            PagerMove::Prev => browser.prev_page(),
            PagerMove::Next => browser.next_page(),
            PagerMove::To(page) => browser.go_to_page(page),
        }
    }
}

impl Dashboard {
    /// Create a new dashboard
    pub fn new(
        config: Config,
        source: LocalDataSource,
        profile_store: JsonProfileStore,
        runtime: Handle,
    ) -> Self {
        let (load_tx, load_rx) = mpsc::channel(4);
        let form = ProfileForm::with_defaults(config.default_endpoint.clone(), config.default_model.clone());

        let mut dashboard = Self {
            champion_browser: Browser::new(config.page_size),
            item_browser: Browser::new(config.page_size),
            config,
            source: Arc::new(source),
            profile_store,
            runtime,
            current_tab: DashboardTab::Champions,
            champion_search: String::new(),
            item_search: String::new(),
            data_status: Loadable::new(),
            load_tx,
            load_rx,
            import_path: String::new(),
            item_import_path: String::new(),
            profiles: Loadable::new(),
            form,
            pending_delete: None,
            status_message: None,
        };

        dashboard.check_status();
        dashboard.reload_profiles();
        if dashboard.data_status.value().is_some_and(DataStatus::has_data) {
            dashboard.load_data(None);
        }
        dashboard
    }

    /// Run the dashboard
    pub fn run(
        config: Config,
        source: LocalDataSource,
        profile_store: JsonProfileStore,
        runtime: Handle,
    ) -> Result<(), eframe::Error> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1100.0, 760.0])
                .with_min_inner_size([760.0, 520.0])
                .with_title("League Guider"),
            ..Default::default()
        };

        eframe::run_native(
            "League Guider",
            options,
            Box::new(move |cc| {
                let mut fonts = egui::FontDefinitions::default();
                egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
                cc.egui_ctx.set_fonts(fonts);

                Ok(Box::new(Dashboard::new(config, source, profile_store, runtime)))
            }),
        )
    }

    fn show_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    fn check_status(&mut self) {
        self.data_status.begin();
        self.data_status.finish(self.source.status());
    }

    fn reload_profiles(&mut self) {
        self.profiles.begin();
        self.profiles.finish(self.profile_store.list());
        if let Some(message) = self.profiles.error() {
            let message = format!("Failed to load profiles: {}", message);
            self.show_status(message);
        }
    }

    /// Load champions and items on a blocking worker; results are picked up in `update`
    fn load_data(&mut self, ctx: Option<egui::Context>) {
        if self.champion_browser.items().is_pending() || self.item_browser.items().is_pending() {
            return;
        }
        self.champion_browser.begin_refresh();
        self.item_browser.begin_refresh();

        let source = Arc::clone(&self.source);
        let tx = self.load_tx.clone();
        self.runtime.spawn_blocking(move || {
            let champions = ItemSource::<Champion>::fetch_all(&*source);
            let items = ItemSource::<Item>::fetch_all(&*source);
            for load in [DataLoad::Champions(champions), DataLoad::Items(items)] {
                if tx.blocking_send(load).is_err() {
                    error!("Dashboard closed before game data finished loading");
                    break;
                }
            }
            if let Some(ctx) = ctx {
                ctx.request_repaint();
            }
        });
    }

    fn poll_loads(&mut self) {
        while let Ok(load) = self.load_rx.try_recv() {
            match load {
                DataLoad::Champions(result) => {
                    let failed = result.is_err();
                    self.champion_browser.apply(result);
                    if failed {
                        let message = format!(
                            "Load failed: {}",
                            self.champion_browser.items().error().unwrap_or("unknown error")
                        );
                        self.show_status(message);
                    }
                }
                // Older imports may have no item file; the Items tab shows why
                DataLoad::Items(result) => self.item_browser.apply(result),
            }
        }
    }

    fn import_data(&mut self, ctx: &egui::Context) {
        let champions = PathBuf::from(self.import_path.trim());
        let items = Some(self.item_import_path.trim())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        match self.source.import(&champions, items.as_deref(), None) {
            Ok(status) => {
                let version = status.current_version.clone().unwrap_or_default();
                self.data_status.finish(Ok(status));
                self.import_path.clear();
                self.item_import_path.clear();
                self.show_status(format!("Imported game data v{}", version));
                self.load_data(Some(ctx.clone()));
            }
            Err(e) => self.show_status(format!("Import failed: {:#}", e)),
        }
    }

    fn save_config(&mut self) {
        if let Err(e) = self.config.save() {
            self.show_status(format!("Failed to save settings: {:#}", e));
        }
    }
}

impl eframe::App for Dashboard {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_loads();

        // Clear old status messages
        if let Some((_, time)) = &self.status_message {
            if time.elapsed() > Duration::from_secs(4) {
                self.status_message = None;
            }
        }

        // Top panel with tabs
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.add_space(5.0);
            ui.horizontal(|ui| {
                ui.heading(format!("{} League Guider", COMPASS));
                ui.add_space(20.0);

                for (tab, label) in [
                    (DashboardTab::Champions, format!("{} Champions", SWORD)),
                    (DashboardTab::Items, format!("{} Items", SHOPPING_CART)),
                    (DashboardTab::Profiles, format!("{} AI Profiles", ROBOT)),
                    (DashboardTab::Settings, format!("{} Settings", GEAR)),
                    (DashboardTab::About, format!("{} About", INFO)),
                ] {
                    if ui.selectable_label(self.current_tab == tab, label).clicked() {
                        self.current_tab = tab;
                    }
                }
            });
            ui.add_space(5.0);
        });

        // Status bar
        if let Some((message, _)) = &self.status_message {
            egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(INFO);
                    ui.label(message);
                });
            });
        }

        match self.current_tab {
            DashboardTab::Champions => self.show_champions_tab(ctx),
            DashboardTab::Items => self.show_items_tab(ctx),
            DashboardTab::Profiles => self.show_profiles_tab(ctx),
            DashboardTab::Settings => self.show_settings_tab(ctx),
            DashboardTab::About => self.show_about_tab(ctx),
        }

        if self.champion_browser.items().is_pending() || self.item_browser.items().is_pending() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

impl Dashboard {
    fn show_champions_tab(&mut self, ctx: &egui::Context) {
        let mut action_reload = false;
        let mut action_import = false;
        let mut pager_move: Option<PagerMove> = None;

        let loading = self.champion_browser.items().is_pending();
        let loaded = self.champion_browser.is_loaded();
        let version = self
            .data_status
            .value()
            .and_then(|s| s.current_version.clone());

        egui::TopBottomPanel::top("champion_header").show(ctx, |ui| {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.heading("Champions");
                match version {
                    Some(ref v) => {
                        ui.label(egui::RichText::new(format!("v{}", v)).monospace().small());
                    }
                    None => {
                        ui.colored_label(egui::Color32::LIGHT_RED, "No Data");
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if loading {
                        ui.spinner();
                    } else if version.is_some() {
                        let label = if loaded {
                            format!("{} Reload", ARROW_CLOCKWISE)
                        } else {
                            format!("{} Load", DATABASE)
                        };
                        if ui.button(label).clicked() {
                            action_reload = true;
                        }
                    }
                });
            });

            if loaded {
                ui.add_space(5.0);
                ui.horizontal(|ui| {
                    let edit = egui::TextEdit::singleline(&mut self.champion_search)
                        .hint_text(format!("{} Search champions...", MAGNIFYING_GLASS))
                        .desired_width(320.0);
                    if ui.add(edit).changed() {
                        self.champion_browser.set_query(self.champion_search.clone());
                    }
                });
            }
            ui.add_space(8.0);
        });

        let page = PageSnapshot::of(&mut self.champion_browser);

        egui::CentralPanel::default().show(ctx, |ui| {
            if !loaded {
                ui.vertical_centered(|ui| {
                    ui.add_space(60.0);
                    ui.heading(format!("{} No Data Loaded", DATABASE));
                    ui.add_space(10.0);

                    if let Some(message) = self.champion_browser.items().error() {
                        ui.colored_label(egui::Color32::LIGHT_RED, message);
                        ui.add_space(10.0);
                    }

                    if version.is_some() {
                        ui.label("Load the local data to view champions.");
                        if ui.add_enabled(!loading, egui::Button::new("Load Data")).clicked() {
                            action_reload = true;
                        }
                    } else {
                        ui.label("Import a DataDragon champion.json to get started.");
                    }

                    ui.add_space(20.0);
                    egui::Grid::new("import_grid")
                        .num_columns(2)
                        .spacing([12.0, 6.0])
                        .show(ui, |ui| {
                            ui.label("champion.json:");
                            ui.add(
                                egui::TextEdit::singleline(&mut self.import_path)
                                    .hint_text("/path/to/champion.json")
                                    .desired_width(320.0),
                            );
                            ui.end_row();

                            ui.label("item.json:");
                            ui.add(
                                egui::TextEdit::singleline(&mut self.item_import_path)
                                    .hint_text("optional")
                                    .desired_width(320.0),
                            );
                            ui.end_row();
                        });

                    ui.add_space(5.0);
                    let ready = !self.import_path.trim().is_empty();
                    if ui
                        .add_enabled(ready, egui::Button::new(format!("{} Import", DOWNLOAD_SIMPLE)))
                        .clicked()
                    {
                        action_import = true;
                    }
                });
                return;
            }

            Self::range_line(ui, &page);

            egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
                if page.matched == 0 {
                    ui.vertical_centered(|ui| {
                        ui.add_space(40.0);
                        ui.label(format!("No champions found matching \"{}\"", self.champion_search));
                    });
                }

                for row in page.items.chunks(CARDS_PER_ROW) {
                    ui.columns(CARDS_PER_ROW, |columns| {
                        for (column, champion) in columns.iter_mut().zip(row) {
                            Self::champion_card(column, champion);
                        }
                    });
                    ui.add_space(8.0);
                }

                pager_move = Self::pager(ui, &page);
            });
        });

        // Handle actions after UI
        if action_reload {
            self.check_status();
            self.load_data(Some(ctx.clone()));
        }
        if action_import {
            self.import_data(ctx);
        }
        if let Some(pager_move) = pager_move {
            pager_move.apply(&mut self.champion_browser);
        }
    }

    fn range_line<T>(ui: &mut egui::Ui, page: &PageSnapshot<T>) {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(&page.range).small().weak());
            ui.label(
                egui::RichText::new(format!("page {} / {}", page.current_page, page.total_pages))
                    .small()
                    .weak(),
            );
        });
        ui.add_space(5.0);
    }

    /// Previous, page window, next. Nothing is drawn for a single page.
    fn pager<T>(ui: &mut egui::Ui, page: &PageSnapshot<T>) -> Option<PagerMove> {
        if !page.shows_pager {
            return None;
        }

        let mut clicked = None;
        ui.add_space(10.0);
        ui.vertical_centered(|ui| {
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(page.has_prev, egui::Button::new(format!("{} Previous", CARET_LEFT)))
                    .clicked()
                {
                    clicked = Some(PagerMove::Prev);
                }

                for link in &page.window {
                    match *link {
                        PageLink::Page(n) => {
                            if ui.selectable_label(n == page.current_page, n.to_string()).clicked() {
                                clicked = Some(PagerMove::To(n));
                            }
                        }
                        PageLink::Ellipsis => {
                            ui.label(DOTS_THREE);
                        }
                    }
                }

                if ui
                    .add_enabled(page.has_next, egui::Button::new(format!("Next {}", CARET_RIGHT)))
                    .clicked()
                {
                    clicked = Some(PagerMove::Next);
                }
            });
        });
        clicked
    }

    fn show_items_tab(&mut self, ctx: &egui::Context) {
        let mut action_reload = false;
        let mut pager_move: Option<PagerMove> = None;

        let loading = self.item_browser.items().is_pending();
        let loaded = self.item_browser.is_loaded();
        let has_data = self.data_status.value().is_some_and(DataStatus::has_data);

        egui::TopBottomPanel::top("item_header").show(ctx, |ui| {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.heading("Items");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if loading {
                        ui.spinner();
                    } else if has_data && ui.button(format!("{} Reload", ARROW_CLOCKWISE)).clicked() {
                        action_reload = true;
                    }
                });
            });

            if loaded {
                ui.add_space(5.0);
                let edit = egui::TextEdit::singleline(&mut self.item_search)
                    .hint_text(format!("{} Search items...", MAGNIFYING_GLASS))
                    .desired_width(320.0);
                if ui.add(edit).changed() {
                    self.item_browser.set_query(self.item_search.clone());
                }
            }
            ui.add_space(8.0);
        });

        let page = PageSnapshot::of(&mut self.item_browser);

        egui::CentralPanel::default().show(ctx, |ui| {
            if !loaded {
                ui.vertical_centered(|ui| {
                    ui.add_space(60.0);
                    ui.heading(format!("{} No Items Loaded", SHOPPING_CART));
                    ui.add_space(10.0);
                    match self.item_browser.items().error() {
                        Some(message) => {
                            ui.colored_label(egui::Color32::LIGHT_RED, message);
                        }
                        None => {
                            ui.label("Import game data on the Champions tab.");
                        }
                    }
                });
                return;
            }

            Self::range_line(ui, &page);

            egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
                if page.matched == 0 {
                    ui.vertical_centered(|ui| {
                        ui.add_space(40.0);
                        ui.label(format!("No items found matching \"{}\"", self.item_search));
                    });
                }

                for item in &page.items {
                    Self::item_row(ui, item);
                    ui.add_space(4.0);
                }

                pager_move = Self::pager(ui, &page);
            });
        });

        if action_reload {
            self.check_status();
            self.load_data(Some(ctx.clone()));
        }
        if let Some(pager_move) = pager_move {
            pager_move.apply(&mut self.item_browser);
        }
    }

    fn item_row(ui: &mut egui::Ui, item: &Item) {
        ui.group(|ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&item.name).strong());
                if !item.is_purchasable() {
                    ui.label(egui::RichText::new("not in shop").small().weak());
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(egui::RichText::new(format!("{} {}g", COINS, item.gold.total)).monospace());
                });
            });
            if !item.plaintext.is_empty() {
                ui.small(&item.plaintext);
            }
            ui.horizontal_wrapped(|ui| {
                for tag in &item.tags {
                    ui.label(egui::RichText::new(tag).small().background_color(ui.visuals().faint_bg_color));
                }
            });
        });
    }

    fn champion_card(ui: &mut egui::Ui, champion: &Champion) {
        ui.group(|ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new(&champion.name).strong().size(16.0));
            ui.label(egui::RichText::new(&champion.title).small().italics());

            ui.horizontal_wrapped(|ui| {
                for tag in champion.tags.iter().take(2) {
                    ui.label(egui::RichText::new(tag).small().background_color(ui.visuals().faint_bg_color));
                }
            });

            ui.separator();

            let info = champion.info;
            for (icon, label, value) in [
                (SWORD, "ATK", info.attack),
                (SHIELD, "DEF", info.defense),
                (MAGIC_WAND, "MAG", info.magic),
                (GAUGE, "DIFF", info.difficulty),
            ] {
                ui.add(
                    egui::ProgressBar::new(f32::from(value) / 10.0)
                        .desired_height(10.0)
                        .text(egui::RichText::new(format!("{} {} {}", icon, label, value)).small()),
                );
            }

            ui.add_space(4.0);
            let stats = &champion.stats;
            egui::Grid::new(("stats", &champion.key))
                .num_columns(2)
                .spacing([12.0, 2.0])
                .show(ui, |ui| {
                    ui.small(format!("{} HP {:.0}", HEARTBEAT, stats.hp));
                    ui.small(format!("{} {} {:.0}", DROP, champion.partype, stats.mp));
                    ui.end_row();
                    ui.small(format!("{} Range {:.0}", CROSSHAIR, stats.attack_range));
                    ui.small(format!("{} Speed {:.0}", PERSON_SIMPLE_RUN, stats.move_speed));
                    ui.end_row();
                });
        });
    }

    fn show_profiles_tab(&mut self, ctx: &egui::Context) {
        let mut action_save = false;
        let mut action_cancel = false;
        let mut edit_profile: Option<AiProfile> = None;
        let mut ask_delete: Option<(Uuid, String)> = None;

        let profiles: Vec<AiProfile> = self.profiles.value().cloned().unwrap_or_default();
        let load_error = self.profiles.error().map(str::to_string);

        egui::SidePanel::left("profile_editor")
            .resizable(true)
            .default_width(340.0)
            .min_width(280.0)
            .show(ctx, |ui| {
                ui.add_space(10.0);
                ui.heading(if self.form.is_editing() { "Edit Profile" } else { "Add New Profile" });
                ui.add_space(10.0);

                egui::Grid::new("profile_form")
                    .num_columns(2)
                    .spacing([12.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("Profile name:");
                        ui.add(egui::TextEdit::singleline(&mut self.form.name).hint_text("My Assistant"));
                        ui.end_row();

                        ui.label("API endpoint:");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.form.endpoint)
                                .hint_text("https://api.openai.com/v1/chat/completions"),
                        );
                        ui.end_row();

                        ui.label("Model name:");
                        ui.add(egui::TextEdit::singleline(&mut self.form.model).hint_text("gpt-4o"));
                        ui.end_row();

                        ui.label("API key:");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.form.api_key)
                                .password(true)
                                .hint_text("sk-..."),
                        );
                        ui.end_row();
                    });

                if self.form.is_editing() {
                    ui.small("Leave the key blank to keep the existing one.");
                }

                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    let label = if self.form.is_editing() { "Update Profile" } else { "Add Profile" };
                    if ui.button(label).clicked() {
                        action_save = true;
                    }
                    if self.form.is_editing() && ui.button("Cancel").clicked() {
                        action_cancel = true;
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Existing Profiles");
            ui.add_space(10.0);

            if let Some(ref message) = load_error {
                ui.colored_label(egui::Color32::LIGHT_RED, message);
            }

            if profiles.is_empty() {
                ui.label("No profiles found. Create one on the left.");
                return;
            }

            egui::ScrollArea::vertical().show(ui, |ui| {
                for profile in &profiles {
                    ui.group(|ui| {
                        ui.set_width(ui.available_width());
                        ui.horizontal(|ui| {
                            ui.label(egui::RichText::new(&profile.name).strong());
                            if !self.profile_store.has_api_key(profile.id) {
                                ui.colored_label(egui::Color32::YELLOW, format!("{} no key this session", WARNING));
                            }
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                if ui.button(format!("{} Delete", TRASH)).clicked() {
                                    ask_delete = Some((profile.id, profile.name.clone()));
                                }
                                if ui.button(format!("{} Edit", PENCIL_SIMPLE)).clicked() {
                                    edit_profile = Some(profile.clone());
                                }
                            });
                        });
                        ui.small(format!("Model: {}", profile.model));
                        ui.small(format!("URL: {}", profile.endpoint));
                    });
                    ui.add_space(5.0);
                }
            });
        });

        if let Some((id, name)) = self.pending_delete.clone() {
            let mut confirmed = false;
            let mut dismissed = false;
            egui::Window::new("Delete profile")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(format!("Are you sure you want to delete \"{}\"?", name));
                    ui.horizontal(|ui| {
                        if ui.button("Delete").clicked() {
                            confirmed = true;
                        }
                        if ui.button("Cancel").clicked() {
                            dismissed = true;
                        }
                    });
                });

            if confirmed {
                self.pending_delete = None;
                match self.profile_store.delete(id) {
                    Ok(()) => {
                        if self.form.editing == Some(id) {
                            self.reset_form();
                        }
                        self.reload_profiles();
                        self.show_status("Profile deleted");
                    }
                    Err(e) => self.show_status(format!("Failed to delete profile: {:#}", e)),
                }
            } else if dismissed {
                self.pending_delete = None;
            }
        }

        // Handle actions after UI
        if let Some(target) = ask_delete {
            self.pending_delete = Some(target);
        }
        if let Some(profile) = edit_profile {
            self.form = ProfileForm::edit(&profile);
        }
        if action_cancel {
            self.reset_form();
        }
        if action_save {
            self.save_profile();
        }
    }

    fn reset_form(&mut self) {
        self.form = ProfileForm::with_defaults(
            self.config.default_endpoint.clone(),
            self.config.default_model.clone(),
        );
    }

    fn save_profile(&mut self) {
        let submission = match self.form.validate() {
            Ok(submission) => submission,
            Err(e) => {
                self.show_status(e.to_string());
                return;
            }
        };

        let name = submission.profile.name.clone();
        match self
            .profile_store
            .save(submission.profile, submission.api_key.as_deref())
        {
            Ok(()) => {
                info!("Profile {} saved from dashboard", name);
                self.reload_profiles();
                self.reset_form();
                self.show_status(format!("Saved profile {}", name));
            }
            Err(e) => self.show_status(format!("Failed to save profile: {:#}", e)),
        }
    }

    fn show_settings_tab(&mut self, ctx: &egui::Context) {
        let mut changed = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(format!("{} Settings", GEAR));
            ui.add_space(20.0);

            egui::Grid::new("settings_grid")
                .num_columns(2)
                .spacing([40.0, 10.0])
                .show(ui, |ui| {
                    ui.label("Champions per page:");
                    let mut size = self.config.page_size.get();
                    if ui.add(egui::Slider::new(&mut size, 6..=96)).changed() {
                        if let Some(size) = NonZeroUsize::new(size) {
                            self.config.page_size = size;
                            self.champion_browser.set_page_size(size);
                            self.item_browser.set_page_size(size);
                            changed = true;
                        }
                    }
                    ui.end_row();

                    ui.label("Default endpoint:");
                    if ui.text_edit_singleline(&mut self.config.default_endpoint).changed() {
                        changed = true;
                    }
                    ui.end_row();

                    ui.label("Default model:");
                    if ui.text_edit_singleline(&mut self.config.default_model).changed() {
                        changed = true;
                    }
                    ui.end_row();

                    ui.label("Game data:");
                    ui.label(self.source.root().display().to_string());
                    ui.end_row();

                    ui.label("Data version:");
                    match self.data_status.state() {
                        RequestState::Failed(message) => {
                            ui.colored_label(egui::Color32::LIGHT_RED, message);
                        }
                        _ => {
                            let version = self
                                .data_status
                                .value()
                                .and_then(|s| s.current_version.as_deref())
                                .unwrap_or("none");
                            ui.label(version);
                        }
                    }
                    ui.end_row();

                    ui.label("Profiles file:");
                    ui.label(self.profile_store.path().display().to_string());
                    ui.end_row();
                });
        });

        if changed {
            self.save_config();
        }
    }

    fn show_about_tab(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.heading(format!("{} League Guider", COMPASS));
                ui.add_space(10.0);
                ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                ui.add_space(20.0);

                ui.label("Browse champions and items from a local DataDragon snapshot");
                ui.label("and keep your AI provider profiles in one place.");

                ui.add_space(30.0);
                ui.separator();
                ui.add_space(20.0);

                if let Some(loaded_at) = self.champion_browser.items().loaded_at() {
                    ui.label(format!(
                        "Champions loaded {}",
                        loaded_at.format("%Y-%m-%d %H:%M:%S UTC")
                    ));
                }
            });
        });
    }
}
