use crossterm::event::Event;

#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// The tick interval elapsed.
    Tick,
    /// The screen is out of date.
    Render,
    Terminal(Event),
}
