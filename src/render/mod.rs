pub mod braille;
pub mod canvas;
pub mod halfblock;
pub mod surface;

pub use canvas::{Canvas, ColorMode, RenderMode};
pub use surface::{Paint, Surface};
