use egui::{RichText, Ui};
use warden_business::users::{DismissNotificationCommand, UserListState};
use warden_states::StateCtx;

use crate::utils::colors::COLOR_GREEN;

/// Success banner of the user list; expires on its own, or on click.
pub fn notification(state_ctx: &mut StateCtx, ui: &mut Ui) {
    let Some(message) = state_ctx.state::<UserListState>().notification() else {
        return;
    };
    let text = RichText::new(format!("✔ {message}")).color(COLOR_GREEN);

    if ui
        .add(egui::Label::new(text).sense(egui::Sense::click()))
        .clicked()
    {
        state_ctx.dispatch::<DismissNotificationCommand>();
    }
}
