//! Application state modules
//!
//! Each state struct owns one slice of the window's state and is passed
//! explicitly to the renderers that need it.

mod hero;
mod nav;
mod recommendations;
mod ui;

pub use hero::HeroCarousel;
pub use nav::{AudioState, NavState};
pub use recommendations::{RecommendationController, RequestFailed, RequestStatus, ResultsView};
pub use ui::UiState;

/// Events that state poll methods can return.
/// These communicate results back to the app without direct mutation.
#[derive(Debug)]
pub enum StateEvent {
    /// Update the status message
    StatusMessage(String),

    /// The displayed recommendation list was replaced
    RecommendationsChanged,
}
