pub mod app;
pub mod carousel;
pub mod config;
pub mod context;
pub mod cta;
pub mod effect;
pub mod error;
pub mod event;
pub mod form;
pub mod logging;
pub mod nav;
pub mod overlay;
pub mod page;
pub mod replay;
pub mod scene;
pub mod scroll;
pub mod site;
pub mod store;
pub mod timer;
pub mod ui;
