pub mod config;
pub mod display;
pub mod http_client;
pub mod logging;
pub mod outcome;
pub mod predictor_api;
pub mod provider;
pub mod session_file;
pub mod state;
