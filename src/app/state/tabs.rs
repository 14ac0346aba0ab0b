/// Panels of the main window. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Library,
    Search,
    ManualAdd,
    ReadingLog,
    Stopwatch,
}

impl Tab {
    pub(crate) const ALL: [Tab; 5] = [
        Tab::Library,
        Tab::Search,
        Tab::ManualAdd,
        Tab::ReadingLog,
        Tab::Stopwatch,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Library => "My Books",
            Tab::Search => "Search Catalog",
            Tab::ManualAdd => "Add Manually",
            Tab::ReadingLog => "Log Reading",
            Tab::Stopwatch => "Stopwatch",
        }
    }

    /// Stable identifier used by `ui.default_tab`.
    pub fn id(self) -> &'static str {
        match self {
            Tab::Library => "library",
            Tab::Search => "search",
            Tab::ManualAdd => "manual",
            Tab::ReadingLog => "log",
            Tab::Stopwatch => "timer",
        }
    }

    pub fn from_id(raw: &str) -> Option<Tab> {
        let normalized = raw.trim().to_ascii_lowercase();
        Tab::ALL.into_iter().find(|tab| tab.id() == normalized)
    }

    /// Tab bound to `ctrl+<digit>`, counting from 1.
    pub fn from_shortcut_digit(digit: &str) -> Option<Tab> {
        let index = digit.parse::<usize>().ok()?.checked_sub(1)?;
        Tab::ALL.get(index).copied()
    }
}
