mod events;
mod view;


pub use events::{Dispatch, INITIAL_K_TEXT, KSelector, SUBMIT_KEY, UiEvent};
pub use view::{
    DEFAULT_K, FETCH_ERROR_MESSAGE, GENERATE_ERROR_MESSAGE, LOADING_MESSAGE, ViewController,
};

/// Chart area lifecycle within one pipeline invocation
///
/// `Idle → Loading → {Rendered | ErrorDisplayed}`; a new invocation always
/// goes back to `Loading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaState {
    Idle,
    Loading,
    Rendered,
    ErrorDisplayed,
}

/// How one controller action ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Charts were replaced with `charts` new ones
    Rendered { charts: usize },
    /// The area shows the fetch error message
    ErrorDisplayed,
    /// A newer fetch started before this one's response arrived
    Superseded,
    /// Generation failed and the user was alerted; nothing was fetched
    Alerted,
}
