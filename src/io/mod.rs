pub mod backup;
pub mod board_io;
pub mod history_io;
pub mod logging;
pub mod project_io;
pub mod settings_io;
pub mod state;
pub mod store;
#[cfg(test)]
pub mod test_store;
