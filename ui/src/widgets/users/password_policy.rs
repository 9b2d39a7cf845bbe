use egui::{Button, DragValue, Ui};
use warden_business::users::{SaveMinPasswordLengthCommand, UserListState};
use warden_states::StateCtx;

const MAX_PASSWORD_LENGTH: u32 = 128;

/// Staged minimum password length with its Save button.
///
/// Save stays disabled while the staged value equals `stored`.
pub fn password_policy(state_ctx: &mut StateCtx, stored: u32, ui: &mut Ui) {
    let state = state_ctx.state::<UserListState>();
    let mut staged = state.staged_min_password_length.unwrap_or(stored);
    let can_save = state.can_save_min_password_length(stored);

    let save = ui
        .horizontal(|ui| {
            ui.label("Minimum password length:");
            // An out-of-range stored value is shown as is, not staged as a clamped edit.
            let drag = DragValue::new(&mut staged)
                .range(1..=MAX_PASSWORD_LENGTH)
                .clamp_existing_to_range(false);
            if ui.add(drag).changed() {
                state_ctx.update::<UserListState>(|state| {
                    state.staged_min_password_length = Some(staged);
                });
            }
            ui.add_enabled(can_save, Button::new("Save")).clicked()
        })
        .inner;

    if save {
        state_ctx.dispatch::<SaveMinPasswordLengthCommand>();
    }
}
