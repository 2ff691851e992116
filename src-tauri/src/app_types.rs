use std::{
    sync::Mutex,
    time::{Duration, Instant},
};

use crate::{
    settings::{Settings, SettingsStore, WindowGeometry},
    shell_config::ShellConfig,
    window_lifecycle::{LifecycleEffect, LifecycleEvent, WindowLifecycle, WindowPhase},
    LOAD_REDIRECT_WINDOW_MS,
};

/// A main-window load that was allowed and has not finished yet.
#[derive(Debug, Clone)]
struct InFlightLoad {
    url: String,
    started_at: Instant,
}

/// Process-wide shell state managed by Tauri. Every mutation happens from
/// event handlers; the mutexes only satisfy `Send + Sync`.
#[derive(Debug)]
pub(crate) struct ShellState {
    pub(crate) config: ShellConfig,
    pub(crate) opened_as_hidden: bool,
    settings: Mutex<SettingsStore>,
    lifecycle: Mutex<WindowLifecycle>,
    in_flight_load: Mutex<Option<InFlightLoad>>,
    normal_geometry: Mutex<Option<WindowGeometry>>,
}

impl ShellState {
    pub(crate) fn new(config: ShellConfig, settings: SettingsStore, opened_as_hidden: bool) -> Self {
        Self {
            config,
            opened_as_hidden,
            settings: Mutex::new(settings),
            lifecycle: Mutex::new(WindowLifecycle::default()),
            in_flight_load: Mutex::new(None),
            normal_geometry: Mutex::new(None),
        }
    }

    pub(crate) fn settings_snapshot(&self) -> Settings {
        self.settings
            .lock()
            .map(|store| store.settings().clone())
            .unwrap_or_default()
    }

    pub(crate) fn with_settings<T, F>(&self, update: F) -> Result<T, String>
    where
        F: FnOnce(&mut SettingsStore) -> Result<T, String>,
    {
        let mut store = self
            .settings
            .lock()
            .map_err(|_| "Settings store lock poisoned.".to_string())?;
        update(&mut store)
    }

    pub(crate) fn apply_lifecycle(&self, event: LifecycleEvent) -> LifecycleEffect {
        match self.lifecycle.lock() {
            Ok(mut lifecycle) => lifecycle.apply(event),
            Err(_) => LifecycleEffect::None,
        }
    }

    pub(crate) fn lifecycle_phase(&self) -> WindowPhase {
        self.lifecycle
            .lock()
            .map(|lifecycle| lifecycle.phase())
            .unwrap_or(WindowPhase::Terminated)
    }

    pub(crate) fn is_quitting(&self) -> bool {
        self.lifecycle
            .lock()
            .map(|lifecycle| lifecycle.is_quitting())
            .unwrap_or(true)
    }

    /// Records a load the main window is about to perform. Until that load
    /// finishes, further navigation callbacks are its server-side redirect hops.
    pub(crate) fn begin_load(&self, url: &str) {
        self.begin_load_at(url, Instant::now());
    }

    fn begin_load_at(&self, url: &str, now: Instant) {
        if let Ok(mut in_flight) = self.in_flight_load.lock() {
            *in_flight = Some(InFlightLoad {
                url: url.to_string(),
                started_at: now,
            });
        }
    }

    /// URL of the load whose redirect hops are still being let through, if any.
    pub(crate) fn redirecting_load(&self) -> Option<String> {
        self.redirecting_load_at(Instant::now())
    }

    fn redirecting_load_at(&self, now: Instant) -> Option<String> {
        let window = Duration::from_millis(LOAD_REDIRECT_WINDOW_MS);
        let in_flight = self.in_flight_load.lock().ok()?;
        in_flight
            .as_ref()
            .filter(|load| now.saturating_duration_since(load.started_at) <= window)
            .map(|load| load.url.clone())
    }

    /// Closes the redirect window of the current load and returns its URL.
    pub(crate) fn finish_load(&self) -> Option<String> {
        self.in_flight_load
            .lock()
            .ok()
            .and_then(|mut in_flight| in_flight.take())
            .map(|load| load.url)
    }

    pub(crate) fn remember_normal_geometry(&self, geometry: WindowGeometry) {
        if let Ok(mut normal) = self.normal_geometry.lock() {
            *normal = Some(geometry);
        }
    }

    /// Last bounds seen while the window was neither maximized nor minimized.
    pub(crate) fn normal_geometry(&self) -> Option<WindowGeometry> {
        self.normal_geometry.lock().ok().and_then(|normal| *normal)
    }
}
