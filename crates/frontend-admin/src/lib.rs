pub mod app;
pub mod pages;
pub mod services;

pub use app::{App, Route};
