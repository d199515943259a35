//! Interactive topology editing.
//!
//! The editor is a single-threaded state machine fed with [`InputEvent`]s. It
//! keeps its own graph model and pushes every visual change into a
//! [`DrawingSurface`](crate::surface::DrawingSurface), so it runs the same
//! under egui and in headless tests.
//!
//! - **Placement**: `r` / `s` select router or switch mode, a click places a node
//! - **Linking**: clicking node after node chains links between them
//! - **Selection**: click a node or link, or drag a box over empty canvas
//! - **Navigation**: arrow keys walk to the neighbor that continues straightest
//! - **View**: wheel zoom about the cursor, secondary-button pan

pub mod gesture;
pub mod graph;
pub mod input;
pub mod legend;
pub mod navigator;
pub mod selection;
pub mod state;
pub mod view;

pub use gesture::Gesture;
pub use graph::{Removed, TopologyGraph};
pub use hit_test::Hit;
pub use input::{EditorKey, InputEvent, PointerButton, WheelDirection};
pub use legend::{Legend, LegendLabel};
pub use navigator::{Navigator, WalkAnchor};
pub use selection::{Selection, SelectionRect};
pub use state::{EditMode, EditorState};
pub use view::ViewTransform;
