use egui::{Layout, RichText, Ui};
use egui_extras::{Column, TableBuilder, TableRow};
use warden_business::logs::{LogMessage, LogRow, LogRowsCompute, LogSortKey};
use warden_business::{SortState, format_timestamp};
use warden_states::StateCtx;

use crate::utils::colors::COLOR_RED;
use crate::widgets::sort_header;

const ROW_HEIGHT: f32 = 24.0;
const HEADER_HEIGHT: f32 = 24.0;
const WHO_WIDTH: f32 = 120.0;
const ACTION_WIDTH: f32 = 140.0;
const DATE_WIDTH: f32 = 160.0;

const SORTABLE: [(&str, LogSortKey); 2] = [("Who", LogSortKey::Who), ("Action", LogSortKey::Action)];

fn render_row(row: &LogRow, table_row: &mut TableRow<'_, '_>) {
    table_row.col(|ui| {
        ui.label(&row.who);
    });
    table_row.col(|ui| {
        ui.label(RichText::new(row.action.as_str()).monospace());
    });
    table_row.col(|ui| match &row.message {
        LogMessage::Text(text) => {
            ui.label(text);
        }
        LogMessage::Unknown(_) => {
            ui.colored_label(COLOR_RED, row.message.to_string());
        }
    });
    table_row.col(|ui| {
        ui.label(format_timestamp(row.timestamp, &chrono::Local));
    });
}

pub fn logs_table(state_ctx: &mut StateCtx, ui: &mut Ui) {
    let rows = state_ctx.cached::<LogRowsCompute>().rows.clone();
    let sort = *state_ctx.state::<SortState<LogSortKey>>();
    let mut clicked_column = None;

    TableBuilder::new(ui)
        .id_salt("logs_table")
        .striped(true)
        .cell_layout(Layout::left_to_right(egui::Align::Center))
        .column(Column::exact(WHO_WIDTH))
        .column(Column::exact(ACTION_WIDTH))
        .column(Column::remainder().at_least(200.0))
        .column(Column::exact(DATE_WIDTH))
        .header(HEADER_HEIGHT, |mut header| {
            for (label, column) in SORTABLE {
                header.col(|ui| {
                    if sort_header(ui, label, &sort, column) {
                        clicked_column = Some(column);
                    }
                });
            }
            header.col(|ui| {
                ui.strong("Message");
            });
            header.col(|ui| {
                if sort_header(ui, "Date", &sort, LogSortKey::Timestamp) {
                    clicked_column = Some(LogSortKey::Timestamp);
                }
            });
        })
        .body(|mut body| {
            for row in &rows {
                body.row(ROW_HEIGHT, |mut table_row| render_row(row, &mut table_row));
            }
        });

    if let Some(column) = clicked_column {
        state_ctx.update::<SortState<LogSortKey>>(|sort| sort.toggle(column));
    }
}
