pub mod action;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod event;
pub mod grouping;
pub mod host;
pub mod theme;
pub mod tui;
pub mod view;
pub mod widgets;
pub mod worker;
