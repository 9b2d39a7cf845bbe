use egui_kittest::Harness;
use warden_business::Database;
use warden_states::StateCtx;
use warden_ui::WardenApp;
use warden_ui::state::State;

/// Frames needed for a click to reach a command and its recomputed rows.
pub const UI_PROPAGATION_FRAMES: usize = 4;

/// Id of the admin account in the demo seed.
#[allow(unused)]
pub const DEMO_ADMIN_ID: &str = "1";

/// The full app on the demo seed, signed in as `user_id`.
#[allow(unused)]
pub fn app_harness<'a>(user_id: Option<&str>) -> Harness<'a, WardenApp> {
    let app = WardenApp::new(State::test(Database::demo(), user_id));
    Harness::new_eframe(|_| app)
}

/// A single panel drawn with the same frame loop as the app.
#[allow(unused)]
pub fn panel_harness<'a>(
    seed: Database,
    panel: fn(&mut StateCtx, &mut egui::Ui),
) -> Harness<'a, State> {
    let mut state = State::test(seed, Some(DEMO_ADMIN_ID));
    state.ctx.tick();

    Harness::new_ui_state(
        move |ui, state: &mut State| {
            state.ctx.run_due();
            state.ctx.sync_computes();
            panel(&mut state.ctx, ui);
            state.ctx.run_computed();
            state.ctx.sync_computes();
        },
        state,
    )
}

pub fn settle<T>(harness: &mut Harness<'_, T>) {
    for _ in 0..UI_PROPAGATION_FRAMES {
        harness.step();
    }
}
