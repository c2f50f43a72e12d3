pub mod use_periodic_refresh;
pub mod use_viewport_resize;

pub use use_periodic_refresh::use_periodic_refresh;
pub use use_viewport_resize::{is_narrow_viewport, use_viewport_resize};
