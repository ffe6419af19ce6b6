//! Navigation state using The Elm Architecture (TEA) pattern
//!
//! `NavigationState` is the only mutable state of a browsing session. Every
//! input is turned into a [`Message`] and applied with [`update`], which never
//! lets the selection leave `0..len`.

use crate::catalog::{Catalog, CatalogError, Entry, INITIAL_SELECTION};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationState {
    /// Currently selected index (0-indexed)
    pub selected: usize,
    /// Page currently shown
    pub page: usize,
    /// Rows per page
    pub page_size: usize,
    /// Number of catalog entries
    pub len: usize,
    /// Whether the loop should exit
    pub should_exit: bool,
}

impl NavigationState {
    /// Start with `initial` selected and its page shown.
    ///
    /// `len` and `page_size` must be non-zero; `initial` is clamped to the
    /// last index.
    pub fn new(len: usize, page_size: usize, initial: usize) -> Self {
        let page_size = page_size.max(1);
        let selected = initial.min(len.saturating_sub(1));
        Self {
            selected,
            page: selected / page_size,
            page_size,
            len,
            should_exit: false,
        }
    }

    /// Browser start: the first reserved program selected
    pub fn starting(len: usize, page_size: usize) -> Self {
        Self::new(len, page_size, INITIAL_SELECTION.saturating_sub(1))
    }

    /// First index shown on the current page
    pub fn page_start(&self) -> usize {
        self.page * self.page_size
    }

    /// Index range shown on the current page
    pub fn visible(&self) -> std::ops::Range<usize> {
        let start = self.page_start().min(self.len);
        start..(start + self.page_size).min(self.len)
    }

    /// Sequence number of the selected entry
    pub fn selected_number(&self) -> usize {
        self.selected + 1
    }
}

/// Messages that can be sent to update state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    MoveUp,
    MoveDown,
    NextPage,
    PrevPage,
    /// Select a row of the current page (e.g. from mouse)
    SelectAt(usize),
    /// Launch the selected entry
    Activate,
    Quit,
}

/// Update function - pure state transition
///
/// `Activate` doesn't change navigation; the caller resolves it with
/// [`resolve`]. Nothing is applied once `Quit` has been seen.
pub fn update(state: &mut NavigationState, msg: Message) {
    if state.should_exit {
        return;
    }

    let before = *state;

    match msg {
        Message::MoveUp => {
            if state.selected > 0 {
                state.selected -= 1;
                if state.selected < state.page_start() {
                    state.page = state.selected / state.page_size;
                }
            }
        }
        Message::MoveDown => {
            if state.selected + 1 < state.len {
                state.selected += 1;
                if state.selected >= (state.page + 1) * state.page_size {
                    state.page = state.selected / state.page_size;
                }
            }
        }
        Message::NextPage => {
            let candidate = (state.page + 1) * state.page_size;
            if candidate < state.len {
                state.page += 1;
                state.selected = candidate;
            }
        }
        Message::PrevPage => {
            if state.page > 0 {
                state.page -= 1;
                state.selected = state.page_start();
            }
        }
        Message::SelectAt(offset) => {
            // offsets past the page would select an off-screen row
            if offset < state.page_size {
                let idx = state.page_start() + offset;
                if idx < state.len {
                    state.selected = idx;
                }
            }
        }
        Message::Activate => {}
        Message::Quit => {
            state.should_exit = true;
        }
    }

    if crate::cli::DEBUG_ENABLED.load(std::sync::atomic::Ordering::Relaxed) {
        crate::core::debug_logger::log_transition(msg, &before, state);
    }
}

/// What activating the selection should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation<'a> {
    /// Hand the terminal to the entry's program
    Launch { entry: &'a Entry, key: &'a str },
    /// Filler entry, nothing to run
    NotInstalled(&'a Entry),
}

/// User-visible report of an activation that didn't run a program
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Filler entry: listed but not on the disc
    NotInstalled {
        number: usize,
        name: String,
        file: String,
    },
    /// Real entry whose program is missing
    LaunchNotFound { name: String, searched: Vec<String> },
    /// Real entry whose program failed to start or exited abnormally
    LaunchFailed { name: String, reason: String },
}

/// Resolve the selected entry into an activation.
///
/// An `OutOfRange` error here means the state and catalog disagree, which is
/// a bug rather than something to recover from.
pub fn resolve<'a>(
    catalog: &'a Catalog,
    state: &NavigationState,
) -> Result<Activation<'a>, CatalogError> {
    let entry = catalog.get(state.selected_number())?;
    Ok(match (entry.real, entry.launch_key.as_deref()) {
        (true, Some(key)) => Activation::Launch { entry, key },
        _ => Activation::NotInstalled(entry),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RESERVED;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn disc() -> NavigationState {
        NavigationState::starting(500, 10)
    }

    fn apply(state: &mut NavigationState, msgs: &[Message]) {
        for msg in msgs {
            update(state, *msg);
        }
    }

    #[test]
    fn test_initial_page_follows_selection() {
        let state = disc();
        assert_eq!(state.selected_number(), INITIAL_SELECTION);
        assert_eq!(state.selected, 386);
        assert_eq!(state.page, 38);
        assert_eq!(state.visible(), 380..390);
    }

    #[test]
    fn test_start_clamps_to_short_catalog() {
        let state = NavigationState::starting(100, 10);
        assert_eq!((state.selected, state.page), (99, 9));
    }

    #[test]
    fn test_next_page_jumps_to_page_start() {
        let mut state = disc();
        update(&mut state, Message::NextPage);
        assert_eq!(state.page, 39);
        assert_eq!(state.selected, 390);
        assert_eq!(state.selected_number(), 391);
    }

    #[test]
    fn test_prev_page_jumps_to_page_start() {
        let mut state = disc();
        update(&mut state, Message::PrevPage);
        assert_eq!(state.page, 37);
        assert_eq!(state.selected, 370);
    }

    #[test]
    fn test_select_at_on_first_page() {
        let mut state = NavigationState::new(500, 10, 0);
        update(&mut state, Message::SelectAt(5));
        assert_eq!(state.selected, 5);
        assert_eq!(state.page, 0);
    }

    #[test]
    fn test_select_at_keeps_page() {
        let mut state = disc();
        update(&mut state, Message::SelectAt(0));
        assert_eq!(state.selected, 380);
        assert_eq!(state.page, 38);
    }

    #[test]
    fn test_select_past_partial_last_page_is_noop() {
        // 25 entries: last page holds indices 20..25
        let mut state = NavigationState::new(25, 10, 24);
        assert_eq!(state.page, 2);
        let before = state;
        update(&mut state, Message::SelectAt(5));
        assert_eq!(state, before);
        update(&mut state, Message::SelectAt(9));
        assert_eq!(state, before);
        update(&mut state, Message::SelectAt(4));
        assert_eq!(state.selected, 24);
        update(&mut state, Message::SelectAt(0));
        assert_eq!(state.selected, 20);
    }

    #[test]
    fn test_select_past_page_rows_is_noop() {
        let mut state = NavigationState::new(500, 10, 0);
        let before = state;
        update(&mut state, Message::SelectAt(10));
        assert_eq!(state, before);
    }

    #[test]
    fn test_huge_select_offset_is_noop() {
        let mut state = disc();
        let before = state;
        update(&mut state, Message::SelectAt(usize::MAX));
        assert_eq!(state, before);
    }

    #[test]
    fn test_move_up_at_top_is_noop() {
        let mut state = NavigationState::new(500, 10, 0);
        let before = state;
        update(&mut state, Message::MoveUp);
        assert_eq!(state, before);
    }

    #[test]
    fn test_move_down_at_bottom_is_noop() {
        let mut state = NavigationState::new(500, 10, 499);
        let before = state;
        update(&mut state, Message::MoveDown);
        assert_eq!(state, before);
    }

    #[test]
    fn test_next_page_on_last_page_is_noop() {
        let mut state = NavigationState::new(500, 10, 495);
        assert_eq!(state.page, 49);
        let before = state;
        update(&mut state, Message::NextPage);
        assert_eq!(state, before);
    }

    #[test]
    fn test_prev_page_on_first_page_is_noop() {
        let mut state = NavigationState::new(500, 10, 3);
        let before = state;
        update(&mut state, Message::PrevPage);
        assert_eq!(state, before);
    }

    #[test]
    fn test_moves_recompute_page_across_boundary() {
        let mut state = NavigationState::new(500, 10, 389);
        update(&mut state, Message::MoveDown);
        assert_eq!((state.selected, state.page), (390, 39));
        update(&mut state, Message::MoveUp);
        assert_eq!((state.selected, state.page), (389, 38));
    }

    #[test]
    fn test_moves_keep_selection_off_page_boundary() {
        // up/down only scroll, paging resets to the page start
        let mut state = NavigationState::new(500, 10, 385);
        apply(&mut state, &[Message::MoveUp, Message::MoveUp]);
        assert_eq!((state.selected, state.page), (383, 38));
        apply(&mut state, &[Message::NextPage]);
        assert_eq!((state.selected, state.page), (390, 39));
    }

    #[test]
    fn test_quit_stops_transitions() {
        let mut state = disc();
        update(&mut state, Message::Quit);
        assert!(state.should_exit);
        update(&mut state, Message::MoveDown);
        update(&mut state, Message::NextPage);
        assert_eq!(state.selected, 386);
        assert_eq!(state.page, 38);
    }

    #[test]
    fn test_random_walks_stay_in_bounds() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for (len, page_size) in [(500, 10), (25, 10), (1, 10), (7, 3), (10, 10), (11, 10)] {
            let initial = rng.gen_range(0..len);
            let mut state = NavigationState::new(len, page_size, initial);
            for _ in 0..2_000 {
                let msg = match rng.gen_range(0..5) {
                    0 => Message::MoveUp,
                    1 => Message::MoveDown,
                    2 => Message::NextPage,
                    3 => Message::PrevPage,
                    _ => Message::SelectAt(rng.gen_range(0..page_size + 3)),
                };
                update(&mut state, msg);
                assert!(state.selected < len, "{msg:?} broke {state:?}");
                assert!(state.page < len.div_ceil(page_size), "{msg:?} broke {state:?}");
                assert!(
                    state.visible().contains(&state.selected),
                    "{msg:?} hid the selection: {state:?}"
                );
            }
        }
    }

    #[test]
    fn test_resolve_real_and_filler() {
        let catalog = Catalog::seeded(500, RESERVED, Some(1)).unwrap();

        let state = disc();
        match resolve(&catalog, &state).unwrap() {
            Activation::Launch { entry, key } => {
                assert_eq!(entry.number, 387);
                assert_eq!(key, "v1");
            }
            other => panic!("expected a launch, got {other:?}"),
        }

        let state = NavigationState::new(500, 10, 0);
        match resolve(&catalog, &state).unwrap() {
            Activation::NotInstalled(entry) => assert_eq!(entry.number, 1),
            other => panic!("expected not installed, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_detects_mismatched_state() {
        let catalog = Catalog::seeded(400, RESERVED, Some(1)).unwrap();
        let state = NavigationState::new(500, 10, 450);
        assert_eq!(
            resolve(&catalog, &state),
            Err(CatalogError::OutOfRange { number: 451, len: 400 })
        );
    }
}
