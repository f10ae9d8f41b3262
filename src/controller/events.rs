use super::Outcome;

/// Key that submits the k input
pub const SUBMIT_KEY: &str = "Enter";

/// Initial content of the k input
pub const INITIAL_K_TEXT: &str = "3";

/// User actions the controller reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// The "fetch" trigger was activated
    FetchClicked,
    /// The "generate" trigger was activated
    GenerateClicked,
    /// A key was pressed while the k input had focus
    KeyPress { key: String },
    /// The k input's text changed
    KInput(String),
}

impl UiEvent {
    pub fn key(key: impl Into<String>) -> Self {
        UiEvent::KeyPress { key: key.into() }
    }
}

/// Result of dispatching one event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dispatch {
    /// The event's default action (form submission) was suppressed
    pub default_prevented: bool,
    /// Set when the event ran a pipeline cycle
    pub outcome: Option<Outcome>,
}

impl Dispatch {
    pub(crate) fn ignored() -> Self {
        Self::default()
    }

    pub(crate) fn ran(outcome: Outcome) -> Self {
        Self {
            default_prevented: false,
            outcome: Some(outcome),
        }
    }

    pub(crate) fn prevented(mut self) -> Self {
        self.default_prevented = true;
        self
    }
}

/// Raw text of the k input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KSelector {
    text: String,
}

impl KSelector {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The selected k, if the text is a non-negative integer
    pub fn parse(&self) -> Option<u32> {
        self.text.trim().parse().ok()
    }
}

impl Default for KSelector {
    fn default() -> Self {
        Self::new(INITIAL_K_TEXT)
    }
}
