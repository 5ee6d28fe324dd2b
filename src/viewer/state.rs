//! Viewer state machine.
//!
//! Selection, search term, display mode and theme are independent fields.
//! The selection stores a reference string, never a document: what it
//! points at is re-resolved every time the view is built.

use crate::config::ThemePreference;

/// How the selected document is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayMode {
    #[default]
    Rendered,
    RawSource,
}

impl DisplayMode {
    fn flipped(self) -> Self {
        match self {
            Self::Rendered => Self::RawSource,
            Self::RawSource => Self::Rendered,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Initial theme from the configured preference and, for `system`, the
    /// client's reported preference. `None` leaves the choice to the client.
    pub fn initial(preference: ThemePreference, system_prefers_dark: Option<bool>) -> Option<Self> {
        match preference {
            ThemePreference::Light => Some(Self::Light),
            ThemePreference::Dark => Some(Self::Dark),
            ThemePreference::System => {
                system_prefers_dark.map(|dark| if dark { Self::Dark } else { Self::Light })
            }
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// A user action against the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerAction {
    Select(String),
    ToggleSource,
    Search(String),
    /// Carries the theme the client currently displays, if known.
    ToggleTheme(Option<Theme>),
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerEffect {
    None,
    /// Content pane scrolls back to the top.
    ResetScroll,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewerState {
    selection: Option<String>,
    mode: DisplayMode,
    search: String,
    /// `None` follows the client's system preference.
    theme: Option<Theme>,
}

impl ViewerState {
    pub fn new(theme: Option<Theme>) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    pub fn apply(&mut self, action: ViewerAction) -> ViewerEffect {
        match action {
            ViewerAction::Select(reference) => self.select(reference),
            ViewerAction::ToggleSource => self.toggle_source(),
            ViewerAction::Search(term) => self.set_search(term),
            ViewerAction::ToggleTheme(displayed) => self.toggle_theme(displayed),
        }
    }

    /// Select a navigation item. Always returns to the rendered view.
    pub fn select(&mut self, reference: impl Into<String>) -> ViewerEffect {
        self.selection = Some(reference.into());
        self.mode = DisplayMode::Rendered;
        ViewerEffect::ResetScroll
    }

    pub fn toggle_source(&mut self) -> ViewerEffect {
        self.mode = self.mode.flipped();
        ViewerEffect::None
    }

    /// Change the search term. The selection is left alone even when its
    /// item is filtered out of the visible list.
    pub fn set_search(&mut self, term: impl Into<String>) -> ViewerEffect {
        self.search = term.into();
        ViewerEffect::None
    }

    /// Flip the theme. `displayed` is what the client currently shows,
    /// which is the only source of truth while following the system.
    pub fn toggle_theme(&mut self, displayed: Option<Theme>) -> ViewerEffect {
        let current = displayed.or(self.theme).unwrap_or(Theme::Light);
        self.theme = Some(current.toggled());
        ViewerEffect::None
    }

    /// Settle a system-following theme once the client has reported its
    /// preference. An explicit theme is kept.
    pub fn adopt_theme(&mut self, theme: Option<Theme>) {
        if self.theme.is_none() {
            self.theme = theme;
        }
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    /// The explicit selection, else `default`.
    pub fn effective_selection<'a>(&'a self, default: Option<&'a str>) -> Option<&'a str> {
        self.selection().or(default)
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn theme(&self) -> Option<Theme> {
        self.theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_resets_display_mode() {
        let mut state = ViewerState::new(Some(Theme::Light));
        state.select("a.md");
        state.toggle_source();
        assert_eq!(state.mode(), DisplayMode::RawSource);

        let effect = state.select("b.md");
        assert_eq!(effect, ViewerEffect::ResetScroll);
        assert_eq!(state.mode(), DisplayMode::Rendered);
        assert_eq!(state.selection(), Some("b.md"));
    }

    #[test]
    fn test_reselect_same_item_also_resets() {
        let mut state = ViewerState::new(Some(Theme::Light));
        state.select("a.md");
        state.toggle_source();
        state.select("a.md");
        assert_eq!(state.mode(), DisplayMode::Rendered);
    }

    #[test]
    fn test_toggle_source_keeps_selection() {
        let mut state = ViewerState::new(Some(Theme::Light));
        state.select("a.md");
        assert_eq!(state.toggle_source(), ViewerEffect::None);
        assert_eq!(state.selection(), Some("a.md"));
        state.toggle_source();
        assert_eq!(state.mode(), DisplayMode::Rendered);
    }

    #[test]
    fn test_search_independent_of_selection() {
        let mut state = ViewerState::new(Some(Theme::Light));
        state.select("a.md");
        state.toggle_source();
        state.set_search("zzz");
        assert_eq!(state.selection(), Some("a.md"));
        assert_eq!(state.mode(), DisplayMode::RawSource);
        assert_eq!(state.search(), "zzz");
    }

    #[test]
    fn test_theme_orthogonal() {
        let mut state = ViewerState::new(Some(Theme::Dark));
        state.select("a.md");
        state.toggle_theme(None);
        assert_eq!(state.theme(), Some(Theme::Light));
        assert_eq!(state.selection(), Some("a.md"));
    }

    #[test]
    fn test_toggle_from_system_uses_displayed_theme() {
        let mut state = ViewerState::new(None);
        state.toggle_theme(Some(Theme::Dark));
        assert_eq!(state.theme(), Some(Theme::Light));

        let mut state = ViewerState::new(None);
        state.toggle_theme(None);
        assert_eq!(state.theme(), Some(Theme::Dark));
    }

    #[test]
    fn test_apply_dispatches_actions() {
        let mut state = ViewerState::new(None);
        assert_eq!(state.apply(ViewerAction::Select("a.md".into())), ViewerEffect::ResetScroll);
        assert_eq!(state.apply(ViewerAction::ToggleSource), ViewerEffect::None);
        assert_eq!(state.apply(ViewerAction::Search("gui".into())), ViewerEffect::None);
        state.apply(ViewerAction::ToggleTheme(Some(Theme::Light)));
        assert_eq!(state.selection(), Some("a.md"));
        assert_eq!(state.mode(), DisplayMode::RawSource);
        assert_eq!(state.search(), "gui");
        assert_eq!(state.theme(), Some(Theme::Dark));
    }

    #[test]
    fn test_adopt_theme_only_when_following_system() {
        let mut state = ViewerState::new(None);
        state.adopt_theme(None);
        assert_eq!(state.theme(), None);
        state.adopt_theme(Some(Theme::Dark));
        assert_eq!(state.theme(), Some(Theme::Dark));
        state.adopt_theme(Some(Theme::Light));
        assert_eq!(state.theme(), Some(Theme::Dark));
    }

    #[test]
    fn test_effective_selection() {
        let mut state = ViewerState::new(Some(Theme::Light));
        assert_eq!(state.effective_selection(Some("index.md")), Some("index.md"));
        assert_eq!(state.effective_selection(None), None);
        state.select("guide.md");
        assert_eq!(state.effective_selection(Some("index.md")), Some("guide.md"));
    }

    #[test]
    fn test_initial_theme() {
        assert_eq!(Theme::initial(ThemePreference::System, Some(true)), Some(Theme::Dark));
        assert_eq!(Theme::initial(ThemePreference::System, Some(false)), Some(Theme::Light));
        assert_eq!(Theme::initial(ThemePreference::System, None), None);
        assert_eq!(Theme::initial(ThemePreference::Light, Some(true)), Some(Theme::Light));
        assert_eq!(Theme::initial(ThemePreference::Dark, None), Some(Theme::Dark));
    }
}
