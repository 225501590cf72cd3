pub mod depth;
pub mod direction;
pub mod distance;
pub mod geometry;
pub mod risk;
