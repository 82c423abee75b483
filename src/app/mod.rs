// Presentation boundary: rendering and the interactive front-end.

pub mod render;
pub mod session;
