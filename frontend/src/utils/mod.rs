pub mod api;
pub mod dom;
pub mod generation;
pub mod html;
pub mod theme;
