//! # Trek Desktop
//!
//! Dioxus client for the destination catalog: a filterable list, a detail page and an
//! admin form, all talking to `trek-server` through [`trek_catalog::store::HttpStore`].

mod backend;
mod views;

pub use backend::Backend;
pub use views::Route;

use dioxus::desktop::{Config, LogicalSize, WindowBuilder};
use dioxus::prelude::*;
use trek_domain::config::WindowConfig;
use trek_domain::preferences::Preferences;

const STYLE: &str = r"
body { margin: 0; font-family: system-ui, sans-serif; }
.app { min-height: 100vh; }
.theme-light { background: #f7f7f5; color: #1d1d1f; }
.theme-dark { background: #16181d; color: #e8e8ea; }
.theme-dark a { color: #8ab4f8; }
.nav { display: flex; gap: 1rem; align-items: center; padding: 0.75rem 1.5rem; border-bottom: 1px solid #8884; }
.nav .brand { font-weight: 700; margin-right: auto; }
.content { padding: 1.5rem; }
.filters { display: flex; flex-wrap: wrap; gap: 1rem; margin-bottom: 1rem; }
.grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(220px, 1fr)); gap: 1rem; }
.card { display: block; border-radius: 8px; overflow: hidden; border: 1px solid #8884; text-decoration: none; color: inherit; }
.card img { width: 100%; height: 140px; object-fit: cover; }
.card-body { padding: 0.5rem 0.75rem; }
.hero { max-width: 100%; border-radius: 8px; }
.gallery img { width: 200px; margin-right: 0.5rem; border-radius: 6px; }
.form { display: grid; gap: 0.75rem; max-width: 520px; }
.form label { display: grid; gap: 0.25rem; }
.status.error { color: #d9534f; }
.status.ok { color: #3c9a5f; }
";

#[derive(Debug)]
pub struct DesktopApp {
    title: String,
    width: f64,
    height: f64,
}

impl Default for DesktopApp {
    fn default() -> Self {
        Self::from_config(&WindowConfig::default())
    }
}

impl DesktopApp {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_config(window: &WindowConfig) -> Self {
        Self { title: window.title.clone(), width: window.width, height: window.height }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use = "This function does nothing unless you call `launch()` on it"]
    pub const fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Opens the window and blocks until it closes.
    ///
    /// `prefs` is the value read at startup; the shell keeps it in a signal and persists
    /// every toggle through `backend`.
    pub fn launch(self, backend: Backend, prefs: Preferences) {
        let window = WindowBuilder::new()
            .with_title(&self.title)
            .with_inner_size(LogicalSize { width: self.width, height: self.height });

        let cfg = Config::default().with_window(window).with_custom_head(format!(
            r#"<meta name="viewport" content="width=device-width, initial-scale=1.0"><style>{STYLE}</style>"#
        ));

        LaunchBuilder::desktop()
            .with_cfg(cfg)
            .with_context_provider(move || Box::new(backend.clone()))
            .with_context_provider(move || Box::new(prefs))
            .launch(App);
    }
}

#[component]
fn App() -> Element {
    let initial = use_context::<Preferences>();
    use_context_provider(|| Signal::new(initial));

    rsx! { Router::<Route> {} }
}
