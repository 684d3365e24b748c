use crossterm::event::Event as CrosstermEvent;

#[derive(Debug)]
pub enum AppEvent {
    /// Terminal input event
    Terminal(CrosstermEvent),

    /// An async button action began running
    ActionStarted { name: &'static str },

    /// An async button action completed
    ActionFinished {
        name: &'static str,
        detail: String,
    },

    /// An async button action failed and the error policy forwarded it
    ActionFailed { error: String },

    /// Leave the event loop
    Quit,

    /// Tick for UI refresh
    Tick,
}
