pub mod api;
pub mod config;
pub mod dom_renderer;
pub mod logging;

pub use api::SignatureApi;
pub use dom_renderer::DomRenderer;
pub use logging::Logger;
