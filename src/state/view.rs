/// Which screen is shown in the main area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Info,
    TryModel,
}

impl View {
    pub fn label(&self) -> &'static str {
        match self {
            View::Info => "Model Information",
            View::TryModel => "Try the Model",
        }
    }
}

/// Holds the active view. Any view may be set at any time.
#[derive(Debug, Default)]
pub struct ViewController {
    current: View,
}

impl ViewController {
    pub fn current(&self) -> View {
        self.current
    }

    /// Switch views; returns the view that was left, or `None` if nothing
    /// changed
    pub fn set(&mut self, view: View) -> Option<View> {
        if self.current == view {
            return None;
        }
        let previous = self.current;
        self.current = view;
        Some(previous)
    }
}
