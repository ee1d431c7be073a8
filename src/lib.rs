pub mod catalog;
pub mod config;
pub mod emulated;
pub mod error;
#[cfg(not(target_family = "wasm"))]
pub mod helper_traits;
pub mod plugin;
pub mod pose;
pub mod prelude;
pub mod reconciler;
pub mod registry;
pub mod runtime;
pub mod scene;
pub mod types;

pub use plugin::XrMarkerPlugin;
