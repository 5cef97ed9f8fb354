use crate::{
    menu::MenuState,
    preference::{PreferenceBackend, PreferenceStore, Theme},
    sections::{RegionObserver, SectionId, ViewportSectionTracker},
};

/// Composition root of the page's interactive state.
///
/// The preference store is built by the caller and handed in. Dropping the
/// controller tears down every section registration.
pub struct PageController<H, B> {
    tracker: ViewportSectionTracker<H>,
    preferences: PreferenceStore<B>,
    menu: MenuState,
}

impl<H, B: PreferenceBackend> PageController<H, B> {
    pub fn new(preferences: PreferenceStore<B>) -> Self {
        Self {
            tracker: ViewportSectionTracker::new(),
            preferences,
            menu: MenuState::default(),
        }
    }

    pub fn mount<I>(&mut self, observer: Option<Box<dyn RegionObserver<H>>>, regions: I)
    where
        I: IntoIterator<Item = (SectionId, Option<H>)>,
    {
        if let Some(observer) = observer {
            self.tracker.attach(observer);
        }

        for (id, handle) in regions {
            self.tracker.register(id, handle);
        }
    }

    pub fn unmount(&mut self) {
        self.tracker.detach();
    }

    pub fn on_intersections<I>(&mut self, batch: I) -> bool
    where
        I: IntoIterator<Item = (SectionId, bool)>,
    {
        self.tracker.on_intersections(batch)
    }

    pub fn follow_nav_link(&mut self, id: SectionId) -> String {
        self.menu.follow_link();
        id.anchor()
    }

    pub fn toggle_menu(&mut self) {
        self.menu.toggle();
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.preferences.toggle()
    }

    pub fn active_section(&self) -> SectionId {
        self.tracker.active()
    }

    pub fn is_active(&self, id: SectionId) -> bool {
        self.tracker.active() == id
    }

    pub fn theme(&self) -> Theme {
        self.preferences.theme()
    }

    pub fn menu(&self) -> MenuState {
        self.menu
    }

    pub fn menu_open(&self) -> bool {
        self.menu.is_open()
    }

    /// False when no intersection capability was available at mount.
    pub fn highlighting_enabled(&self) -> bool {
        self.tracker.has_observer()
    }

    pub fn mounted_sections(&self) -> Vec<SectionId> {
        self.tracker.registered()
    }
}
