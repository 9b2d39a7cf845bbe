use egui::{Id, Key, Modal, Ui};
use warden_business::users::{CloseCreateUserModalCommand, CreateUserCommand, UserListState};
use warden_states::StateCtx;

use crate::utils::colors::COLOR_RED;

enum ModalAction {
    Create,
    Close,
}

pub fn create_user_modal(state_ctx: &mut StateCtx, ui: &mut Ui) {
    let mut action = None;

    let response = Modal::new(Id::new("create_user_modal")).show(ui.ctx(), |ui| {
        ui.heading("Create User");
        ui.add_space(8.0);

        let state = state_ctx.state_mut::<UserListState>();
        ui.horizontal(|ui| {
            ui.label("Username:");
            let input = ui.text_edit_singleline(&mut state.new_username);
            if input.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                action = Some(ModalAction::Create);
            }
        });

        if let Some(error) = state.error() {
            ui.colored_label(COLOR_RED, error.to_string());
        }

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.button("Create").clicked() {
                action = Some(ModalAction::Create);
            }
            if ui.button("Cancel").clicked() {
                action = Some(ModalAction::Close);
            }
        });
    });

    if response.should_close() && action.is_none() {
        action = Some(ModalAction::Close);
    }

    match action {
        Some(ModalAction::Create) => state_ctx.dispatch::<CreateUserCommand>(),
        Some(ModalAction::Close) => state_ctx.dispatch::<CloseCreateUserModalCommand>(),
        None => {}
    }
}
