//! Interactive network-topology diagram editor.
//!
//! Routers and switches are placed on a canvas and linked by clicking from
//! node to node. The editing core in [`editor`] draws through the
//! [`surface::DrawingSurface`] trait and needs no GUI; the binary `topodraw`
//! hosts it in an egui window.

pub mod config;
pub mod editor;
pub mod geometry;
pub mod model;
pub mod surface;

// The egui front-end lives behind the `egui` feature flag.
#[cfg(feature = "egui")]
pub mod egui_app;
