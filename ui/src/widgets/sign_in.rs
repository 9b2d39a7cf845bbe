//! Gate shown while no valid session exists.

use egui::{RichText, Ui};
use warden_business::{DatabaseStore, Session, SignInCommand, SignInInput};
use warden_states::StateCtx;

use crate::utils::colors::COLOR_RED;

pub fn sign_in_gate(state_ctx: &mut StateCtx, session: &Session, ui: &mut Ui) {
    ui.heading("Sign in");
    ui.label("Pick an account or enter its id.");

    if let Session::Rejected { user_id } = session {
        ui.colored_label(
            COLOR_RED,
            format!("No account may sign in with id \"{user_id}\""),
        );
    }
    ui.add_space(8.0);

    let database = state_ctx.state::<DatabaseStore>().get();
    let mut picked = None;
    ui.horizontal_wrapped(|ui| {
        for user in &database.users {
            let label = RichText::new(&user.username);
            if ui.button(label).on_hover_text(user.id.as_str()).clicked() {
                picked = Some(user.id.to_string());
            }
        }
    });

    ui.add_space(8.0);
    let submitted = ui
        .horizontal(|ui| {
            ui.label("User id:");
            let input = state_ctx.state_mut::<SignInInput>();
            let response = ui.text_edit_singleline(&mut input.user_id);
            let entered = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            ui.button("Sign In").clicked() || entered
        })
        .inner;

    if let Some(user_id) = picked {
        state_ctx.update::<SignInInput>(|input| input.user_id = user_id);
        state_ctx.dispatch::<SignInCommand>();
    } else if submitted {
        state_ctx.dispatch::<SignInCommand>();
    }
}
