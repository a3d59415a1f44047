pub mod cell;
pub mod direction;
pub mod geometry;
