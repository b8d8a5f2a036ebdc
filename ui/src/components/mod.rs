pub mod app;
pub mod dao_api;
pub mod ethereum;
pub mod forms;
pub mod panels;
pub mod ui_state;
