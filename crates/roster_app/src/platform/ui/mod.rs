pub mod render;
pub mod toast;
