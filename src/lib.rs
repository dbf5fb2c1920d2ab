pub mod app;
pub mod bridge;
pub mod components;
pub mod controller;
pub mod history;
pub mod json_format;
pub mod logging;
pub mod state;
pub mod storage;
pub mod web;
