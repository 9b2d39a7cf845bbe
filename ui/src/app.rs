use std::time::Duration;

use warden_business::{AdminConfig, Database, Route, SessionCompute, SessionState, SignOutCommand};
use warden_states::Time;

use crate::state::State;
use crate::storage::{StorageMut, StorageRef};
use crate::widgets;

/// Repaint interval while an error or notification is waiting to expire.
const TIMER_REPAINT: Duration = Duration::from_millis(250);

pub struct WardenApp {
    state: State,
}

impl WardenApp {
    pub fn new(state: State) -> Self {
        Self { state }
    }

    /// Called once before the first frame; restores the session from eframe storage.
    pub fn from_creation_context(
        cc: &eframe::CreationContext<'_>,
        seed: Database,
        config: AdminConfig,
    ) -> Self {
        let session = cc
            .storage
            .map(|storage| SessionState::load(&StorageRef(storage)))
            .unwrap_or_default();
        Self::new(State::new(seed, config, session))
    }

}

impl eframe::App for WardenApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let state_ctx = &mut self.state.ctx;
        state_ctx.update::<Time>(|time| *time = Time::now());
        state_ctx.run_due();
        state_ctx.sync_computes();

        let session = state_ctx.cached::<SessionCompute>().session.clone();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                if let Some(username) = session.username() {
                    let mut route = *state_ctx.state::<Route>();
                    for tab in Route::ALL {
                        ui.selectable_value(&mut route, tab, tab.title());
                    }
                    if route != *state_ctx.state::<Route>() {
                        state_ctx.update::<Route>(|current| *current = route);
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Sign Out").clicked() {
                            state_ctx.dispatch::<SignOutCommand>();
                        }
                        ui.label(format!("Signed in as {username}"));
                    });
                } else {
                    ui.strong("Warden");
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if session.is_authenticated() {
                match *state_ctx.state::<Route>() {
                    Route::Users => widgets::users_panel(state_ctx, ui),
                    Route::Logs => widgets::logs_panel(state_ctx, ui),
                }
            } else {
                widgets::sign_in_gate(state_ctx, &session, ui);
            }
        });

        // Recompute after this frame's commands so the next frame renders fresh rows.
        state_ctx.run_computed();
        state_ctx.sync_computes();

        if state_ctx.pending_tasks() > 0 {
            ctx.request_repaint_after(TIMER_REPAINT);
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.state
            .ctx
            .state::<SessionState>()
            .save(&mut StorageMut(storage));
    }
}
