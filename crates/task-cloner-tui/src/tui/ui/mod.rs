/*
[INPUT]:  TUI app state and rendering snapshots for UI components
[OUTPUT]: UI component render functions and module exports
[POS]:    TUI UI module root
[UPDATE]: When adding or moving panel renderers
*/

mod attachments;
mod editor;
mod importer;
mod layout;
mod logs;
mod notices;
mod notifier;

pub(in crate::tui) use editor::draw_editor;
pub(in crate::tui) use importer::draw_importer;
pub(in crate::tui) use layout::{draw_add_prompt, draw_tabs};
pub(in crate::tui) use logs::draw_logs;
pub(in crate::tui) use notices::draw_notices;
pub(in crate::tui) use notifier::draw_notifier;
