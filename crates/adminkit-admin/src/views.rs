//! List and edit views
//!
//! Views pull prepared data from a model, refuse to render when the model
//! reported errors, and describe the toolbar the host should render.

pub mod edit;
pub mod list;
pub mod toolbar;

pub use edit::{EditDisplay, EditSource, EditView};
pub use list::{ListDisplay, ListSource, ListView};
pub use toolbar::{ButtonKind, Toolbar, ToolbarButton, ToolbarTitle};
