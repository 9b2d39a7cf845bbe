//! Audit log panel.

mod table;

use egui::Ui;
use warden_business::logs::LogRowsCompute;
use warden_states::StateCtx;

pub fn logs_panel(state_ctx: &mut StateCtx, ui: &mut Ui) {
    let count = state_ctx.cached::<LogRowsCompute>().rows.len();
    ui.label(format!("{count} entries"));
    ui.add_space(8.0);
    table::logs_table(state_ctx, ui);
}
