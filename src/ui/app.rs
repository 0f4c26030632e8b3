use std::time::{Duration, Instant};

use eframe::egui;

use crate::config::park::{ParkConfig, load_park_config};
use crate::core::geo::{GeoPoint, PixelVec};
use crate::core::sighting::{Sighting, SightingFilter};
use crate::interaction::InteractionController;
use crate::rendering::heatmap::{HeatBin, compute_bins};
use crate::rendering::layers::LayerToggles;
use crate::rendering::viewport::Viewport;
use crate::storage::sightings::SightingStore;
use crate::storage::ui_state::{UiState, UiStateStore, ViewState};
use crate::ui::control_panel::show_control_panel;
use crate::ui::map_view::show_map;
use crate::ui::sighting_details::{DetailsAction, show_sighting_details};
use crate::ui::sighting_form::SightingForm;
use crate::ui::status_bar::show_status_bar;

/// How often the sighting store is re-read from disk.
const STORE_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

pub struct WildWatchApp {
    park: ParkConfig,
    store: SightingStore,
    ui_store: UiStateStore,
    sightings: Vec<Sighting>,
    /// `sightings` narrowed by the current filter; this is what the map,
    /// heatmap and recent list actually see.
    visible: Vec<Sighting>,
    filter: SightingFilter,
    bins: Vec<HeatBin>,
    viewport: Viewport,
    controller: InteractionController,
    toggles: LayerToggles,
    heat_intensity: f32,
    selecting: bool,
    selected: Option<String>,
    form: SightingForm,
    last_refresh: Instant,
    last_hover: Option<GeoPoint>,
    last_status: String,
}

impl WildWatchApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let park = load_park_config().expect("yellowstone.json failed to load");
        let store = SightingStore::open_default();
        let sightings = match store.load() {
            Ok(list) => list,
            Err(error) => {
                eprintln!("[storage] {error}");
                Vec::new()
            }
        };

        let ui_store = UiStateStore::open_default();
        let saved = match ui_store.load() {
            Ok(state) => state,
            Err(error) => {
                eprintln!("[storage] could not read ui state: {error}");
                UiState::default()
            }
        };
        let mut viewport = Viewport::new(park.bounds, &park.map);
        viewport.restore(saved.view.zoom, PixelVec::new(saved.view.x, saved.view.y));

        let count = sightings.len();
        let mut app = Self {
            park,
            store,
            ui_store,
            sightings,
            visible: Vec::new(),
            filter: SightingFilter::default(),
            bins: Vec::new(),
            viewport,
            controller: InteractionController::new(),
            toggles: saved.layers,
            heat_intensity: 0.7,
            selecting: false,
            selected: None,
            form: SightingForm::default(),
            last_refresh: Instant::now(),
            last_hover: None,
            last_status: format!("Loaded {count} sightings"),
        };
        app.apply_filter();
        app
    }

    /// Replace the sighting list and re-derive the visible set.
    fn set_sightings(&mut self, sightings: Vec<Sighting>) {
        self.sightings = sightings;
        self.apply_filter();
    }

    /// Re-derive `visible` and the heatmap bins from the current filter.
    fn apply_filter(&mut self) {
        self.visible = self
            .sightings
            .iter()
            .filter(|s| self.filter.matches(s))
            .cloned()
            .collect();
        self.bins = bins_for(&self.visible, self.park.map.grid_size);
    }

    fn refresh_from_store(&mut self) {
        match self.store.load() {
            Ok(list) => {
                let count = list.len();
                self.set_sightings(list);
                self.last_status = format!("Refreshed: {count} sightings");
            }
            Err(error) => {
                eprintln!("[storage] refresh failed: {error}");
                self.last_status = format!("Refresh failed: {error}");
            }
        }
    }

    fn persist_ui_state(&self) {
        let offset = self.viewport.offset();
        let state = UiState {
            layers: self.toggles,
            view: ViewState {
                zoom: self.viewport.zoom(),
                x: offset.x,
                y: offset.y,
            },
        };
        if let Err(error) = self.ui_store.save(&state) {
            eprintln!("[storage] could not persist ui state: {error}");
        }
    }

    fn selected_sighting(&self) -> Option<&Sighting> {
        let id = self.selected.as_deref()?;
        self.sightings.iter().find(|s| s.id == id)
    }
}

fn bins_for(sightings: &[Sighting], grid_size: f64) -> Vec<HeatBin> {
    let coords: Vec<GeoPoint> = sightings.iter().map(|s| s.coordinates).collect();
    compute_bins(&coords, grid_size)
}

impl eframe::App for WildWatchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.last_refresh.elapsed() >= STORE_REFRESH_INTERVAL {
            self.refresh_from_store();
            self.last_refresh = Instant::now();
        }
        // keep the refresh timer ticking even without input events
        ctx.request_repaint_after(Duration::from_secs(1));

        egui::SidePanel::left("control_panel")
            .resizable(true)
            .default_width(230.0)
            .show(ctx, |ui| {
                let action = show_control_panel(
                    ui,
                    &mut self.toggles,
                    &mut self.filter,
                    &mut self.selecting,
                    &mut self.heat_intensity,
                    self.viewport.zoom(),
                    &self.visible,
                    self.sightings.len(),
                );
                self.controller.set_selecting(self.selecting);

                if action.zoom_in {
                    self.viewport.zoom_in();
                }
                if action.zoom_out {
                    self.viewport.zoom_out();
                }
                if action.zoom_reset {
                    self.viewport.reset();
                }
                if action.zoom_in || action.zoom_out || action.zoom_reset || action.layers_changed {
                    self.persist_ui_state();
                }
                if action.filters_changed {
                    self.apply_filter();
                }
                if let Some(id) = action.select_sighting {
                    self.selected = Some(id);
                }
                if action.open_report {
                    self.form.open_blank();
                }
                if action.refresh_now {
                    self.refresh_from_store();
                    self.last_refresh = Instant::now();
                }
            });

        egui::TopBottomPanel::bottom("status_bar")
            .resizable(false)
            .min_height(26.0)
            .show(ctx, |ui| {
                show_status_bar(
                    ui,
                    &self.last_status,
                    self.last_hover,
                    self.viewport.zoom(),
                    self.visible.len(),
                );
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(&self.park.name);
            ui.separator();

            let was_dragging = self.controller.is_dragging();
            let map = show_map(
                ui,
                &self.park,
                &self.visible,
                &self.bins,
                &mut self.viewport,
                &mut self.controller,
                &self.toggles,
                self.heat_intensity,
                self.selected.as_deref(),
            );
            self.last_hover = map.hover;

            if was_dragging && !self.controller.is_dragging() {
                self.persist_ui_state();
            }
            if let Some(pick) = map.picked {
                self.form.set_location(pick);
                self.form.open = true;
                self.last_status =
                    format!("Location selected: {:.6}, {:.6}", pick.lat, pick.lng);
            }
            if let Some(id) = map.marker_clicked {
                self.selected = Some(id);
            }
        });

        // report form
        if let Some(sighting) = self.form.show(ctx, self.park.bounds) {
            let species = sighting.species.clone();
            match self.store.add(sighting) {
                Ok(list) => {
                    self.set_sightings(list);
                    self.selecting = false;
                    self.controller.set_selecting(false);
                    self.last_status = format!("Reported {species}");
                }
                Err(error) => {
                    eprintln!("[storage] save failed: {error}");
                    self.last_status = format!("Save failed: {error}");
                }
            }
        }

        // details window for the selected sighting
        if let Some(sighting) = self.selected_sighting().cloned() {
            match show_sighting_details(ctx, &sighting) {
                DetailsAction::None => {}
                DetailsAction::Close => self.selected = None,
                DetailsAction::Verify => {
                    let mut updated = sighting;
                    updated.verified = true;
                    match self.store.update(&updated) {
                        Ok(Some(list)) => {
                            self.set_sightings(list);
                            self.last_status = "Sighting verified".to_string();
                        }
                        Ok(None) => self.last_status = "Sighting no longer exists".to_string(),
                        Err(error) => {
                            eprintln!("[storage] update failed: {error}");
                            self.last_status = format!("Update failed: {error}");
                        }
                    }
                }
                DetailsAction::Delete => {
                    match self.store.remove(&sighting.id) {
                        Ok(Some(list)) => {
                            self.set_sightings(list);
                            self.selected = None;
                            self.last_status = "Sighting deleted".to_string();
                        }
                        Ok(None) => {
                            self.selected = None;
                            self.last_status = "Sighting no longer exists".to_string();
                        }
                        Err(error) => {
                            eprintln!("[storage] delete failed: {error}");
                            self.last_status = format!("Delete failed: {error}");
                        }
                    }
                }
            }
        }
    }
}
