pub mod apply;
pub mod calendar;
pub mod check;
pub mod config_panel;
pub mod debounce;
pub mod editor;
pub mod history;
pub mod resolve;
pub mod workspace;
