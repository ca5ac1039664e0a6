//! Single selection across a group of toggleable elements.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::error::{SelectionError, SelectionResult};
use crate::handlers::{Handler, handler};

/// An element with a boolean state that reports its own state changes.
pub trait Toggleable {
    /// Whether the element actually toggles. Only toggleable elements can
    /// join a [`RadioGroup`].
    fn is_toggleable(&self) -> bool;

    fn state(&self) -> bool;

    /// Request a new state. State handlers are notified if it changes.
    fn set_state(&self, state: bool);

    fn add_state_handler(&self, handler: Handler<bool>);

    fn remove_state_handler(&self, handler: &Handler<bool>);
}

#[derive(Default)]
struct GroupState {
    elements: Vec<Rc<dyn Toggleable>>,
    active: Option<usize>,
}

/// Keeps at most one element of a group active.
///
/// Activating an element deactivates the previous one. The group subscribes
/// to every element and unsubscribes on [`destroy`](Self::destroy) or drop.
pub struct RadioGroup {
    state: Rc<RefCell<GroupState>>,
    handlers: Vec<Handler<bool>>,
}

impl fmt::Debug for RadioGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("RadioGroup")
            .field("len", &state.elements.len())
            .field("active", &state.active)
            .finish()
    }
}

impl RadioGroup {
    /// Build a group over `elements`, activating `initial` and deactivating
    /// every other element that starts active.
    ///
    /// Every element is checked before any is touched.
    pub fn new(elements: Vec<Rc<dyn Toggleable>>, initial: Option<usize>) -> SelectionResult<Self> {
        if let Some(index) = elements.iter().position(|e| !e.is_toggleable()) {
            return Err(SelectionError::InvalidCapability { index });
        }
        if let Some(index) = initial.filter(|i| *i >= elements.len()) {
            return Err(SelectionError::InitialIndexOutOfRange {
                index,
                len: elements.len(),
            });
        }

        for (i, element) in elements.iter().enumerate() {
            if element.state() && Some(i) != initial {
                element.set_state(false);
            }
        }

        let state = Rc::new(RefCell::new(GroupState {
            elements: elements.clone(),
            active: initial.filter(|i| elements[*i].state()),
        }));

        let handlers: Vec<Handler<bool>> = (0..elements.len())
            .map(|index| state_change_handler(Rc::downgrade(&state), index))
            .collect();
        for (element, h) in elements.iter().zip(&handlers) {
            element.add_state_handler(h.clone());
        }

        if let Some(index) = initial {
            let element = &elements[index];
            if !element.state() {
                element.set_state(true);
            }
        }

        let group = Self { state, handlers };
        group.sync_active();
        Ok(group)
    }

    /// Index of the active element.
    pub fn active_index(&self) -> Option<usize> {
        self.state.borrow().active
    }

    pub fn active_element(&self) -> Option<Rc<dyn Toggleable>> {
        let state = self.state.borrow();
        state.active.map(|i| state.elements[i].clone())
    }

    /// Deactivate the active element, if any.
    pub fn clear(&self) {
        if let Some(element) = self.active_element() {
            element.set_state(false);
        }
        self.sync_active();
    }

    pub fn len(&self) -> usize {
        self.state.borrow().elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Unsubscribe from every element and forget them.
    pub fn destroy(&mut self) {
        let elements = std::mem::take(&mut self.state.borrow_mut().elements);
        for (element, h) in elements.iter().zip(&self.handlers) {
            element.remove_state_handler(h);
        }
        self.handlers.clear();
        self.state.borrow_mut().active = None;
    }

    /// Forget the active index if that element refused its last state change.
    fn sync_active(&self) {
        let mut state = self.state.borrow_mut();
        if let Some(i) = state.active {
            if !state.elements[i].state() {
                state.active = None;
            }
        }
    }
}

impl Drop for RadioGroup {
    fn drop(&mut self) {
        self.destroy();
    }
}

fn state_change_handler(group: Weak<RefCell<GroupState>>, index: usize) -> Handler<bool> {
    handler(move |active: bool| {
        let Some(group) = group.upgrade() else {
            return;
        };
        let previous = {
            let mut state = group.borrow_mut();
            if state.active == Some(index) {
                if !active {
                    state.active = None;
                }
                return;
            }
            if !active {
                return;
            }
            let previous = state.active.replace(index);
            previous.and_then(|i| state.elements.get(i).cloned())
        };
        // The borrow is released first: deactivating re-enters this handler.
        if let Some(previous) = previous {
            log::debug!("radio group: element {} replaces active element", index);
            previous.set_state(false);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::HandlerCollection;
    use std::cell::Cell;

    struct MockToggle {
        toggleable: bool,
        locked: bool,
        state: Cell<bool>,
        handlers: HandlerCollection<bool>,
    }

    impl MockToggle {
        fn new(state: bool) -> Rc<Self> {
            Rc::new(Self {
                toggleable: true,
                locked: false,
                state: Cell::new(state),
                handlers: HandlerCollection::new(),
            })
        }

        fn inert() -> Rc<Self> {
            Rc::new(Self {
                toggleable: false,
                locked: false,
                state: Cell::new(false),
                handlers: HandlerCollection::new(),
            })
        }

        /// An element that ignores every state request, like a disabled button.
        fn locked(state: bool) -> Rc<Self> {
            Rc::new(Self {
                toggleable: true,
                locked: true,
                state: Cell::new(state),
                handlers: HandlerCollection::new(),
            })
        }

        /// Simulate the user toggling the element.
        fn user_toggle(&self) {
            self.set_state(!self.state.get());
        }
    }

    impl Toggleable for MockToggle {
        fn is_toggleable(&self) -> bool {
            self.toggleable
        }

        fn state(&self) -> bool {
            self.state.get()
        }

        fn set_state(&self, state: bool) {
            if !self.locked && self.state.get() != state {
                self.state.set(state);
                self.handlers.notify(state);
            }
        }

        fn add_state_handler(&self, handler: Handler<bool>) {
            self.handlers.add(handler);
        }

        fn remove_state_handler(&self, handler: &Handler<bool>) {
            self.handlers.remove(handler);
        }
    }

    fn group_of(mocks: &[Rc<MockToggle>], initial: Option<usize>) -> SelectionResult<RadioGroup> {
        let elements = mocks
            .iter()
            .map(|m| m.clone() as Rc<dyn Toggleable>)
            .collect();
        RadioGroup::new(elements, initial)
    }

    fn states(mocks: &[Rc<MockToggle>]) -> Vec<bool> {
        mocks.iter().map(|m| m.state()).collect()
    }

    #[test]
    fn test_construction_resets_and_activates_initial() {
        let mocks = vec![MockToggle::new(true), MockToggle::new(false), MockToggle::new(true)];
        let group = group_of(&mocks, Some(1)).unwrap();

        assert_eq!(states(&mocks), vec![false, true, false]);
        assert_eq!(group.active_index(), Some(1));
        assert_eq!(group.len(), 3);
    }

    #[test]
    fn test_construction_without_initial_clears_all() {
        let mocks = vec![MockToggle::new(true), MockToggle::new(true)];
        let group = group_of(&mocks, None).unwrap();
        assert_eq!(states(&mocks), vec![false, false]);
        assert_eq!(group.active_index(), None);
        assert!(group.active_element().is_none());
    }

    #[test]
    fn test_initial_already_active_is_kept() {
        let mocks = vec![MockToggle::new(false), MockToggle::new(true)];
        let group = group_of(&mocks, Some(1)).unwrap();
        assert_eq!(states(&mocks), vec![false, true]);
        assert_eq!(group.active_index(), Some(1));
    }

    #[test]
    fn test_rejects_non_toggleable_before_mutating() {
        let mocks = vec![MockToggle::new(true), MockToggle::inert()];
        let err = group_of(&mocks, None).unwrap_err();
        assert_eq!(err, SelectionError::InvalidCapability { index: 1 });
        assert!(mocks[0].state());
        assert!(mocks[0].handlers.is_empty());
    }

    #[test]
    fn test_rejects_out_of_range_initial() {
        let mocks = vec![MockToggle::new(true)];
        let err = group_of(&mocks, Some(3)).unwrap_err();
        assert_eq!(err, SelectionError::InitialIndexOutOfRange { index: 3, len: 1 });
        assert!(mocks[0].state());
    }

    #[test]
    fn test_activating_other_element_deactivates_previous() {
        let mocks = vec![MockToggle::new(false), MockToggle::new(false), MockToggle::new(false)];
        let group = group_of(&mocks, Some(0)).unwrap();

        mocks[2].user_toggle();
        assert_eq!(states(&mocks), vec![false, false, true]);
        assert_eq!(group.active_index(), Some(2));

        mocks[1].user_toggle();
        assert_eq!(states(&mocks), vec![false, true, false]);
        assert_eq!(group.active_index(), Some(1));
    }

    #[test]
    fn test_deactivating_active_element_clears_index() {
        let mocks = vec![MockToggle::new(false), MockToggle::new(false)];
        let group = group_of(&mocks, Some(0)).unwrap();

        mocks[0].user_toggle();
        assert_eq!(group.active_index(), None);
        assert_eq!(states(&mocks), vec![false, false]);
    }

    #[test]
    fn test_redundant_reports_are_absorbed() {
        let mocks = vec![MockToggle::new(false), MockToggle::new(false)];
        let group = group_of(&mocks, Some(0)).unwrap();

        // Active element re-reporting active, inactive element reporting inactive.
        mocks[0].handlers.notify(true);
        mocks[1].handlers.notify(false);
        assert_eq!(group.active_index(), Some(0));
        assert_eq!(states(&mocks), vec![true, false]);
    }

    #[test]
    fn test_clear() {
        let mocks = vec![MockToggle::new(false), MockToggle::new(false)];
        let group = group_of(&mocks, Some(1)).unwrap();

        group.clear();
        assert_eq!(group.active_index(), None);
        assert_eq!(states(&mocks), vec![false, false]);

        // Clearing an empty selection does nothing.
        group.clear();
        assert_eq!(group.active_index(), None);
    }

    #[test]
    fn test_initial_element_refusing_activation_is_not_recorded() {
        let mocks = vec![MockToggle::new(false), MockToggle::locked(false)];
        let group = group_of(&mocks, Some(1)).unwrap();
        assert_eq!(states(&mocks), vec![false, false]);
        assert_eq!(group.active_index(), None);
        assert!(group.active_element().is_none());
    }

    #[test]
    fn test_clear_keeps_element_refusing_deactivation() {
        let mocks = vec![MockToggle::new(false), MockToggle::locked(true)];
        let group = group_of(&mocks, Some(1)).unwrap();
        assert_eq!(group.active_index(), Some(1));

        group.clear();
        assert_eq!(states(&mocks), vec![false, true]);
        assert_eq!(group.active_index(), Some(1));
    }

    #[test]
    fn test_destroy_unsubscribes() {
        let mocks = vec![MockToggle::new(false), MockToggle::new(false)];
        let mut group = group_of(&mocks, Some(0)).unwrap();
        assert_eq!(mocks[0].handlers.len(), 1);

        group.destroy();
        assert!(mocks.iter().all(|m| m.handlers.is_empty()));
        assert_eq!(group.len(), 0);

        mocks[1].user_toggle();
        assert_eq!(states(&mocks), vec![true, true]);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let mocks = vec![MockToggle::new(false), MockToggle::new(false)];
        drop(group_of(&mocks, Some(0)).unwrap());
        assert!(mocks.iter().all(|m| m.handlers.is_empty()));
    }

    #[test]
    fn test_at_most_one_active_under_any_sequence() {
        let mocks: Vec<_> = (0..5).map(|_| MockToggle::new(false)).collect();
        let group = group_of(&mocks, None).unwrap();

        // Deterministic pseudo-random toggle sequence.
        let mut seed: u32 = 0x2545_f491;
        for _ in 0..500 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            let target = (seed % 6) as usize;
            if target == 5 {
                group.clear();
            } else {
                mocks[target].user_toggle();
            }

            let active: Vec<usize> = (0..mocks.len()).filter(|i| mocks[*i].state()).collect();
            assert!(active.len() <= 1, "several active: {active:?}");
            assert_eq!(group.active_index(), active.first().copied());
        }
    }
}
