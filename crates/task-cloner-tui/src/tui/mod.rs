/*
[INPUT]:  FlowController, platform ports, and log buffer
[OUTPUT]: Ratatui-based TUI for importing, editing, and cloning tasks
[POS]:    TUI module for the task-cloner binary
[UPDATE]: When changing TUI layout, keybindings, or runtime controls
*/

mod app;
mod events;
mod runtime;
mod terminal;
mod ui;

pub(crate) use runtime::{LOG_BUFFER_CAPACITY, LogBuffer, LogBufferHandle, LogWriterFactory, run_tui};
