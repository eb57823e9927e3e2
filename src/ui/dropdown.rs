//! Select-style dropdown accordion

/// Open/selected state of one `.dropdown`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dropdown {
    options: Vec<String>,
    open: bool,
    selected: Option<usize>,
}

impl Dropdown {
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            open: false,
            selected: None,
        }
    }

    /// Click on the select box
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Click on an option: it becomes the only active one and the menu closes
    pub fn select(&mut self, index: usize) -> Option<&str> {
        let label = self.options.get(index)?;
        self.selected = Some(index);
        self.open = false;
        Some(label.as_str())
    }

    /// Click anywhere else on the page
    pub fn click_outside(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The caret rotates while the menu is open
    pub fn caret_rotated(&self) -> bool {
        self.open
    }

    /// Placeholder styling stays until something is picked
    pub fn shows_placeholder(&self) -> bool {
        self.selected.is_none()
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.selected == Some(index)
    }

    pub fn selected_label(&self) -> Option<&str> {
        self.selected.and_then(|i| self.options.get(i)).map(String::as_str)
    }
}
