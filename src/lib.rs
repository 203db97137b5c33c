pub mod audio;
pub mod constants;
pub mod director;
pub mod display;
pub mod entity;
pub mod input;
pub mod level;
pub mod rect;
pub mod registry;
pub mod surface;
