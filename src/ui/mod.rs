pub mod input;
pub mod painter;
pub mod renderer;
pub mod surface;
