//! egui front end for the timeline ruler.

pub mod controller;
pub mod ui;
