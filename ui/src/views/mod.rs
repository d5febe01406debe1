pub mod admin_panel;
pub mod program_card;
pub mod program_grid;
pub mod program_modal;
pub mod search_bar;

/// Class list of a dialog element: the visible modifier only while logically open.
pub fn dialog_class(base: &str, open: bool) -> String {
    if open {
        format!("{base} panel-visible")
    } else {
        base.to_string()
    }
}
