use log::debug;

/// Root margin shrinking the viewport to a line through its vertical middle.
pub const BAND_ROOT_MARGIN: &str = "-50% 0px -50% 0px";
/// Any overlap with the band counts.
pub const BAND_THRESHOLD: f64 = 0.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SectionId {
    #[default]
    Home,
    About,
    Ja,
    Projects,
    Contact,
}

impl SectionId {
    /// Page order, top to bottom.
    pub const ALL: [SectionId; 5] = [
        Self::Home,
        Self::About,
        Self::Ja,
        Self::Projects,
        Self::Contact,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::About => "about",
            Self::Ja => "ja",
            Self::Projects => "projects",
            Self::Contact => "contact",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "home" => Some(Self::Home),
            "about" => Some(Self::About),
            "ja" => Some(Self::Ja),
            "projects" => Some(Self::Projects),
            "contact" => Some(Self::Contact),
            _ => None,
        }
    }

    pub fn nav_label(self) -> &'static str {
        match self {
            Self::Home => "Domů",
            Self::About => "O nás",
            Self::Ja => "JA Czech",
            Self::Projects => "Projekty",
            Self::Contact => "Kontakt",
        }
    }

    pub fn anchor(self) -> String {
        format!("#{}", self.as_str())
    }
}

/// The intersection capability the tracker subscribes regions to.
pub trait RegionObserver<H> {
    fn observe(&self, handle: &H);
    fn unobserve(&self, handle: &H);
}

struct Section<H> {
    id: SectionId,
    handle: H,
}

/// Reports which registered section currently crosses the middle of the
/// viewport.
///
/// Notifications arrive as batches of `(id, is_intersecting)` pairs. Only the
/// entering edge moves the active section; when nothing crosses the band the
/// last value is kept.
pub struct ViewportSectionTracker<H> {
    sections: Vec<Section<H>>,
    observer: Option<Box<dyn RegionObserver<H>>>,
    active: SectionId,
}

impl<H> Default for ViewportSectionTracker<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> ViewportSectionTracker<H> {
    pub fn new() -> Self {
        Self {
            sections: Vec::new(),
            observer: None,
            active: SectionId::default(),
        }
    }

    pub fn attach(&mut self, observer: Box<dyn RegionObserver<H>>) {
        if let Some(previous) = self.observer.as_ref() {
            for section in &self.sections {
                previous.unobserve(&section.handle);
            }
        }

        for section in &self.sections {
            observer.observe(&section.handle);
        }

        self.observer = Some(observer);
    }

    pub fn has_observer(&self) -> bool {
        self.observer.is_some()
    }

    pub fn register(&mut self, id: SectionId, handle: Option<H>) {
        let Some(handle) = handle else {
            return;
        };

        self.unregister(id);

        if let Some(observer) = self.observer.as_ref() {
            observer.observe(&handle);
        }
        self.sections.push(Section { id, handle });
    }

    pub fn unregister(&mut self, id: SectionId) {
        let Some(index) = self.sections.iter().position(|section| section.id == id) else {
            return;
        };

        let section = self.sections.remove(index);
        if let Some(observer) = self.observer.as_ref() {
            observer.unobserve(&section.handle);
        }
    }

    pub fn unregister_all(&mut self) {
        for section in self.sections.drain(..) {
            if let Some(observer) = self.observer.as_ref() {
                observer.unobserve(&section.handle);
            }
        }
    }

    /// Unregisters everything and releases the observer.
    pub fn detach(&mut self) {
        self.unregister_all();
        self.observer = None;
    }

    pub fn is_registered(&self, id: SectionId) -> bool {
        self.sections.iter().any(|section| section.id == id)
    }

    pub fn registered(&self) -> Vec<SectionId> {
        self.sections.iter().map(|section| section.id).collect()
    }

    pub fn active(&self) -> SectionId {
        self.active
    }

    /// Applies one notification batch in delivery order and reports whether
    /// the active section changed.
    pub fn on_intersections<I>(&mut self, batch: I) -> bool
    where
        I: IntoIterator<Item = (SectionId, bool)>,
    {
        let before = self.active;

        for (id, is_intersecting) in batch {
            if is_intersecting && self.is_registered(id) {
                self.active = id;
            }
        }

        if self.active != before {
            debug!("active section {} -> {}", before.as_str(), self.active.as_str());
            return true;
        }

        false
    }
}

impl<H> Drop for ViewportSectionTracker<H> {
    fn drop(&mut self) {
        self.unregister_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::{cell::RefCell, collections::HashMap, rc::Rc};

    #[derive(Clone, Default)]
    struct RecordingObserver {
        observed: Rc<RefCell<Vec<u32>>>,
    }

    impl RegionObserver<u32> for RecordingObserver {
        fn observe(&self, handle: &u32) {
            self.observed.borrow_mut().push(*handle);
        }

        fn unobserve(&self, handle: &u32) {
            self.observed.borrow_mut().retain(|value| value != handle);
        }
    }

    fn tracker_with_observer() -> (ViewportSectionTracker<u32>, Rc<RefCell<Vec<u32>>>) {
        let observer = RecordingObserver::default();
        let observed = observer.observed.clone();
        let mut tracker = ViewportSectionTracker::new();
        tracker.attach(Box::new(observer));
        (tracker, observed)
    }

    /// Section extents in page pixels, stacked without gaps.
    fn stacked_extents(heights: &[f64]) -> Vec<(f64, f64)> {
        let mut top = 0.0;
        heights
            .iter()
            .map(|height| {
                let extent = (top, top + height);
                top += height;
                extent
            })
            .collect()
    }

    /// Emits the batch an intersection observer would deliver when the band
    /// (the viewport midline) moves from `from` to `to`.
    fn band_crossings(extents: &[(f64, f64)], from: f64, to: f64) -> Vec<(SectionId, bool)> {
        let inside = |line: f64, (top, bottom): (f64, f64)| line >= top && line < bottom;
        SectionId::ALL
            .iter()
            .zip(extents)
            .filter_map(|(id, extent)| {
                let was = inside(from, *extent);
                let is = inside(to, *extent);
                (was != is).then_some((*id, is))
            })
            .collect()
    }

    #[test]
    fn section_ids_parse_their_dom_ids() {
        for id in SectionId::ALL {
            assert_eq!(SectionId::from_str(id.as_str()), Some(id));
        }
        assert_eq!(SectionId::from_str("footer"), None);
        assert_eq!(SectionId::Ja.anchor(), "#ja");
    }

    #[test]
    fn unregistered_handles_are_no_longer_observed() {
        let (mut tracker, observed) = tracker_with_observer();

        tracker.register(SectionId::Home, Some(1));
        tracker.register(SectionId::About, Some(2));
        tracker.register(SectionId::Ja, Some(3));
        tracker.unregister(SectionId::About);
        assert_eq!(*observed.borrow(), vec![1, 3]);

        tracker.register(SectionId::About, Some(4));
        tracker.unregister(SectionId::Home);
        tracker.unregister(SectionId::Home);
        assert_eq!(*observed.borrow(), vec![3, 4]);

        tracker.unregister_all();
        assert!(observed.borrow().is_empty());
        assert!(tracker.registered().is_empty());
    }

    #[test]
    fn missing_handle_is_not_registered() {
        let (mut tracker, observed) = tracker_with_observer();

        tracker.register(SectionId::Projects, None);

        assert!(!tracker.is_registered(SectionId::Projects));
        assert!(observed.borrow().is_empty());
    }

    #[test]
    fn re_registering_replaces_the_handle() {
        let (mut tracker, observed) = tracker_with_observer();

        tracker.register(SectionId::Home, Some(1));
        tracker.register(SectionId::Home, Some(7));

        assert_eq!(*observed.borrow(), vec![7]);
        assert_eq!(tracker.registered(), vec![SectionId::Home]);
    }

    #[test]
    fn attach_hands_existing_sections_to_the_observer() {
        let mut tracker = ViewportSectionTracker::new();
        tracker.register(SectionId::Home, Some(1));
        tracker.register(SectionId::About, Some(2));

        let observer = RecordingObserver::default();
        let observed = observer.observed.clone();
        tracker.attach(Box::new(observer));

        assert!(tracker.has_observer());
        assert_eq!(*observed.borrow(), vec![1, 2]);
    }

    #[test]
    fn detach_releases_sections_and_observer() {
        let (mut tracker, observed) = tracker_with_observer();
        tracker.register(SectionId::Home, Some(1));

        tracker.detach();
        tracker.register(SectionId::About, Some(2));

        assert!(!tracker.has_observer());
        assert!(observed.borrow().is_empty());
        assert_eq!(tracker.registered(), vec![SectionId::About]);
    }

    #[test]
    fn dropping_the_tracker_unobserves_everything() {
        let (mut tracker, observed) = tracker_with_observer();
        tracker.register(SectionId::Home, Some(1));
        tracker.register(SectionId::Contact, Some(5));

        drop(tracker);

        assert!(observed.borrow().is_empty());
    }

    #[test]
    fn entering_sections_move_the_active_section_forward() {
        let (mut tracker, _) = tracker_with_observer();
        tracker.register(SectionId::Home, Some(1));
        tracker.register(SectionId::About, Some(2));
        tracker.register(SectionId::Ja, Some(3));

        assert!(!tracker.on_intersections([(SectionId::Home, true)]));
        assert_eq!(tracker.active(), SectionId::Home);

        assert!(tracker.on_intersections([(SectionId::Home, false), (SectionId::About, true)]));
        assert_eq!(tracker.active(), SectionId::About);

        assert!(tracker.on_intersections([(SectionId::About, false), (SectionId::Ja, true)]));
        assert_eq!(tracker.active(), SectionId::Ja);
    }

    #[test]
    fn last_entering_entry_in_a_batch_wins() {
        let (mut tracker, _) = tracker_with_observer();
        for (index, id) in SectionId::ALL.into_iter().enumerate() {
            tracker.register(id, Some(index as u32));
        }

        tracker.on_intersections([
            (SectionId::About, true),
            (SectionId::Projects, true),
            (SectionId::Ja, false),
        ]);

        assert_eq!(tracker.active(), SectionId::Projects);
    }

    #[test]
    fn leaving_without_entering_keeps_the_last_value() {
        let (mut tracker, _) = tracker_with_observer();
        tracker.register(SectionId::Home, Some(1));
        tracker.register(SectionId::About, Some(2));
        tracker.on_intersections([(SectionId::About, true)]);

        assert!(!tracker.on_intersections([(SectionId::About, false)]));
        assert_eq!(tracker.active(), SectionId::About);
    }

    #[test]
    fn unregistered_ids_are_ignored() {
        let (mut tracker, _) = tracker_with_observer();
        tracker.register(SectionId::Home, Some(1));

        assert!(!tracker.on_intersections([(SectionId::Contact, true)]));
        assert_eq!(tracker.active(), SectionId::Home);
    }

    #[test]
    fn monotonic_scroll_never_moves_backwards() {
        let (mut tracker, _) = tracker_with_observer();
        for (index, id) in SectionId::ALL.into_iter().enumerate() {
            tracker.register(id, Some(index as u32));
        }
        let extents = stacked_extents(&[700.0, 900.0, 600.0, 2_400.0, 800.0]);

        let mut midline = 360.0;
        let mut last_index = 0;
        while midline < 5_300.0 {
            let next = midline + 45.0;
            tracker.on_intersections(band_crossings(&extents, midline, next));
            let index = SectionId::ALL
                .iter()
                .position(|id| *id == tracker.active())
                .expect("active section is registered");
            assert!(index >= last_index);
            last_index = index;
            midline = next;
        }

        assert_eq!(tracker.active(), SectionId::Contact);
    }

    #[derive(Clone, Debug)]
    enum Op {
        Register(usize, Option<u32>),
        Unregister(usize),
        UnregisterAll,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => (0usize..5, proptest::option::of(0u32..1_000))
                .prop_map(|(index, handle)| Op::Register(index, handle)),
            3 => (0usize..5).prop_map(Op::Unregister),
            1 => Just(Op::UnregisterAll),
        ]
    }

    proptest! {
        #[test]
        fn observed_set_matches_registrations(ops in proptest::collection::vec(op_strategy(), 0..64)) {
            let (mut tracker, observed) = tracker_with_observer();
            let mut expected: HashMap<SectionId, u32> = HashMap::new();

            for op in ops {
                match op {
                    Op::Register(index, handle) => {
                        let id = SectionId::ALL[index];
                        // Handles stay unique per section.
                        let handle = handle.map(|value| index as u32 * 1_000 + value);
                        tracker.register(id, handle);
                        if let Some(handle) = handle {
                            expected.insert(id, handle);
                        }
                    }
                    Op::Unregister(index) => {
                        let id = SectionId::ALL[index];
                        let released = expected.remove(&id);
                        tracker.unregister(id);
                        if let Some(released) = released {
                            prop_assert!(!observed.borrow().contains(&released));
                        }
                    }
                    Op::UnregisterAll => {
                        expected.clear();
                        tracker.unregister_all();
                        prop_assert!(observed.borrow().is_empty());
                    }
                }

                let mut observed_now = observed.borrow().clone();
                observed_now.sort_unstable();
                let mut expected_handles: Vec<u32> = expected.values().copied().collect();
                expected_handles.sort_unstable();
                prop_assert_eq!(observed_now, expected_handles);

                let mut registered = tracker.registered();
                registered.sort_by_key(|id| id.as_str());
                let mut expected_ids: Vec<SectionId> = expected.keys().copied().collect();
                expected_ids.sort_by_key(|id| id.as_str());
                prop_assert_eq!(registered, expected_ids);
            }
        }
    }

    #[test]
    fn no_observer_keeps_the_default() {
        let mut tracker = ViewportSectionTracker::<u32>::new();
        tracker.register(SectionId::Home, Some(1));

        assert!(!tracker.has_observer());
        assert_eq!(tracker.active(), SectionId::Home);
    }
}
