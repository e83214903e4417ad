// Desktop table editor: grid, selection toolbar and bulk row actions over the table engine.
pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod services;
pub mod state;
