use egui::Ui;
use warden_business::DatabaseStore;
use warden_business::users::{OpenCreateUserModalCommand, UserListState};
use warden_states::StateCtx;

use super::modal::create_user_modal;
use super::password_policy::password_policy;
use super::table::users_table;
use crate::widgets::notification;

pub fn users_panel(state_ctx: &mut StateCtx, ui: &mut Ui) {
    ui.horizontal(|ui| {
        if ui.button("➕ Create User").clicked() {
            state_ctx.dispatch::<OpenCreateUserModalCommand>();
        }
        notification(state_ctx, ui);
    });

    ui.add_space(4.0);
    let stored = state_ctx.state::<DatabaseStore>().get().min_password_length;
    password_policy(state_ctx, stored, ui);

    ui.add_space(8.0);
    users_table(state_ctx, ui);

    if state_ctx.state::<UserListState>().create_modal_open {
        create_user_modal(state_ctx, ui);
    }
}
