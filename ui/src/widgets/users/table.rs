//! The users table: sortable username and role columns, id, block toggle.

use egui::{Layout, RichText, Ui};
use egui_extras::{Column, TableBuilder, TableRow};
use warden_business::users::{
    SetUserBlockedCommand, UserListState, UserRow, UserRowsCompute, UserSortKey,
};
use warden_business::{SortState, UserId};
use warden_states::StateCtx;

use crate::utils::colors::COLOR_AMBER;
use crate::widgets::sort_header;

const ROW_HEIGHT: f32 = 28.0;
const HEADER_HEIGHT: f32 = 24.0;
const ROLE_WIDTH: f32 = 80.0;
const ID_WIDTH: f32 = 280.0;
const ACTIONS_WIDTH: f32 = 100.0;

fn block_label(row: &UserRow) -> &'static str {
    if row.blocked { "Unblock" } else { "Block" }
}

fn render_row(row: &UserRow, table_row: &mut TableRow<'_, '_>) -> Option<(UserId, bool)> {
    table_row.col(|ui| {
        if row.blocked {
            ui.label(RichText::new(&row.username).color(COLOR_AMBER))
                .on_hover_text("blocked");
        } else {
            ui.label(&row.username);
        }
    });
    table_row.col(|ui| {
        ui.label(row.role.as_str());
    });
    table_row.col(|ui| {
        ui.label(RichText::new(row.id.as_str()).monospace());
    });

    let mut request = None;
    table_row.col(|ui| {
        if row.can_block && ui.button(block_label(row)).clicked() {
            request = Some((row.id.clone(), !row.blocked));
        }
    });
    request
}

pub fn users_table(state_ctx: &mut StateCtx, ui: &mut Ui) {
    let rows = state_ctx.cached::<UserRowsCompute>().rows.clone();
    let sort = *state_ctx.state::<SortState<UserSortKey>>();

    let mut clicked_column = None;
    let mut block_request = None;

    TableBuilder::new(ui)
        .id_salt("users_table")
        .striped(true)
        .cell_layout(Layout::left_to_right(egui::Align::Center))
        .column(Column::remainder().at_least(100.0))
        .column(Column::exact(ROLE_WIDTH))
        .column(Column::exact(ID_WIDTH))
        .column(Column::exact(ACTIONS_WIDTH))
        .header(HEADER_HEIGHT, |mut header| {
            header.col(|ui| {
                if sort_header(ui, "Username", &sort, UserSortKey::Username) {
                    clicked_column = Some(UserSortKey::Username);
                }
            });
            header.col(|ui| {
                if sort_header(ui, "Role", &sort, UserSortKey::Role) {
                    clicked_column = Some(UserSortKey::Role);
                }
            });
            header.col(|ui| {
                ui.strong("ID");
            });
            header.col(|ui| {
                ui.strong("Blocked");
            });
        })
        .body(|mut body| {
            for row in &rows {
                body.row(ROW_HEIGHT, |mut table_row| {
                    if let Some(request) = render_row(row, &mut table_row) {
                        block_request = Some(request);
                    }
                });
            }
        });

    if let Some(column) = clicked_column {
        state_ctx.update::<SortState<UserSortKey>>(|sort| sort.toggle(column));
    }
    if let Some(request) = block_request {
        state_ctx.update::<UserListState>(|state| state.block_request = Some(request));
        state_ctx.dispatch::<SetUserBlockedCommand>();
    }
}
