use crate::host::MemoryDataTable;

#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    NavigateUp,
    NavigateDown,
    NavigateTop,
    NavigateBottom,
    PageUp,
    PageDown,

    // Vim chord
    EnterPendingG,

    // UI
    CloseOverlay,
    ToggleHelp,

    // Data responses
    DataLoaded(Box<MemoryDataTable>),

    // App control
    Reload,
    Quit,
    Tick,
    Error(String),
}
