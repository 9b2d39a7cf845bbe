use egui::{Button, RichText, Ui};
use warden_business::SortState;

/// Clickable column header with the current sort arrow. Returns `true` when clicked.
pub fn sort_header<K: Copy + PartialEq>(
    ui: &mut Ui,
    label: &str,
    sort: &SortState<K>,
    column: K,
) -> bool {
    let text = RichText::new(format!("{label}{}", sort.indicator(column))).strong();
    ui.add(Button::new(text).frame(false)).clicked()
}
