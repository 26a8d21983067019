#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Toggle,
    LinkClick,
    DocumentClick { inside_menu: bool, inside_toggle: bool },
}

/// Open/closed state of the mobile menu. The body scroll lock is derived
/// from it, so the two can never disagree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    pub fn closed() -> Self {
        Self { open: false }
    }

    pub fn is_open(self) -> bool {
        self.open
    }

    pub fn toggled(self) -> Self {
        Self { open: !self.open }
    }

    pub fn scroll_locked(self) -> bool {
        self.open
    }

    /// A link inside the menu was followed.
    pub fn after_link_click(self) -> Self {
        Self::closed()
    }

    /// A click landed somewhere on the document. Clicks inside the menu or on
    /// its toggle leave the state alone.
    pub fn after_document_click(self, inside_menu: bool, inside_toggle: bool) -> Self {
        if inside_menu || inside_toggle {
            self
        } else {
            Self::closed()
        }
    }

    pub fn apply(self, action: MenuAction) -> Self {
        match action {
            MenuAction::Toggle => self.toggled(),
            MenuAction::LinkClick => self.after_link_click(),
            MenuAction::DocumentClick {
                inside_menu,
                inside_toggle,
            } => self.after_document_click(inside_menu, inside_toggle),
        }
    }

    pub fn active_class(self) -> Option<&'static str> {
        self.open.then_some("active")
    }
}

pub fn header_is_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}
