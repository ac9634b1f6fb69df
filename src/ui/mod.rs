//! UI modules for the Insight window
//!
//! The page is one scrolling column of sections; each module renders one of
//! them from the state slices on `InsightApp`.

mod components;
mod hero;
mod nav;
mod recommendations;
mod sections;
pub mod theme;

pub use components::render_about_dialog;
pub use hero::render_hero;
pub use nav::render_nav;
pub use recommendations::render_recommendations;
pub use sections::{render_about, render_contact, render_footer};
