/// Open/closed flag of the mobile navigation overlay. Never persisted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    pub fn is_open(self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    /// Every navigation link activation goes through here.
    pub fn follow_link(&mut self) {
        self.close();
    }

    pub fn nav_class(self) -> &'static str {
        if self.open {
            "nav nav-open"
        } else {
            "nav"
        }
    }

    pub fn bar_class(self) -> &'static str {
        if self.open {
            "open"
        } else {
            ""
        }
    }
}
