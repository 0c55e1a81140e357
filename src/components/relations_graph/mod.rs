mod component;
mod controller;
mod controls;
mod render;
mod scene;
mod ticker;

pub use component::RelationsGraph;
