//! Page shell composing the sidebar, canvas, console and chat regions.
//!
//! Every region renders behind its own [`Boundary`]; the layout as a whole
//! sits behind one more. A region that errors or panics is replaced by a
//! fallback panel and its siblings render normally.

pub mod layout;
pub mod node;
pub mod region;
pub mod regions;

pub use layout::{Layout, Page};
pub use node::{Element, Node};
pub use region::{Boundary, Isolated, Outcome, Region, RenderError};
pub use regions::{Canvas, Chat, Console, Sidebar};
