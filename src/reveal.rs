use std::collections::HashMap;

/// Entry animation a reveal candidate plays once it is revealed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RevealKind {
    #[default]
    FadeUp,
    FadeDown,
    FadeLeft,
    FadeRight,
    ZoomIn,
}

impl RevealKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FadeUp => "fade-up",
            Self::FadeDown => "fade-down",
            Self::FadeLeft => "fade-left",
            Self::FadeRight => "fade-right",
            Self::ZoomIn => "zoom-in",
        }
    }
}

/// Per-element registration options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RevealOptions {
    pub delay_ms: Option<u32>,
}

impl RevealOptions {
    /// A zero delay is the same as none.
    pub fn new(delay_ms: Option<u32>) -> Self {
        Self {
            delay_ms: delay_ms.filter(|delay| *delay > 0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealState {
    Pending,
    Revealed { delay_ms: Option<u32> },
}

/// What the observer callback has to do after an intersection entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealStep {
    /// Not visible yet; keep watching.
    Wait,
    /// First visible entry; apply the state and stop observing.
    RevealAndUnobserve,
    /// Already terminal; nothing left to do.
    Ignore,
}

impl RevealState {
    /// State applied synchronously when the element registers. Without
    /// intersection support there is nothing to wait for.
    pub fn initial(observer_supported: bool) -> Self {
        if observer_supported {
            Self::Pending
        } else {
            Self::Revealed { delay_ms: None }
        }
    }

    pub fn on_intersection(self, is_intersecting: bool, options: RevealOptions) -> (Self, RevealStep) {
        match self {
            Self::Revealed { .. } => (self, RevealStep::Ignore),
            Self::Pending if is_intersecting => (
                Self::Revealed {
                    delay_ms: options.delay_ms,
                },
                RevealStep::RevealAndUnobserve,
            ),
            Self::Pending => (self, RevealStep::Wait),
        }
    }

    pub fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed { .. })
    }

    pub fn class(self) -> &'static str {
        match self {
            Self::Pending => "aos-init",
            Self::Revealed { .. } => "animated",
        }
    }

    /// Inline style carrying the delay into the CSS transition.
    pub fn style(self) -> Option<String> {
        match self {
            Self::Revealed { delay_ms: Some(delay) } => {
                Some(format!("transition-delay: {delay}ms; animation-delay: {delay}ms;"))
            }
            _ => None,
        }
    }
}

/// Bookkeeping for every candidate watched by one shared observer. Ids are
/// handed out at registration and forgotten once the candidate reveals.
#[derive(Debug, Default)]
pub struct RevealRegistry {
    next_id: u32,
    pending: HashMap<u32, RevealOptions>,
}

impl RevealRegistry {
    pub fn register(&mut self, options: RevealOptions) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.pending.insert(id, options);
        id
    }

    /// Returns the revealed state the first time `id` intersects. Unknown or
    /// already revealed ids yield nothing.
    pub fn on_entry(&mut self, id: u32, is_intersecting: bool) -> Option<RevealState> {
        let options = *self.pending.get(&id)?;
        match RevealState::Pending.on_intersection(is_intersecting, options) {
            (next, RevealStep::RevealAndUnobserve) => {
                self.pending.remove(&id);
                Some(next)
            }
            _ => None,
        }
    }

    pub fn release(&mut self, id: u32) {
        self.pending.remove(&id);
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_delay_means_no_delay() {
        assert_eq!(RevealOptions::new(Some(200)).delay_ms, Some(200));
        assert_eq!(RevealOptions::new(Some(0)).delay_ms, None);
        assert_eq!(RevealOptions::new(None), RevealOptions::default());
    }

    #[test]
    fn first_intersection_reveals_with_delay_and_unobserves() {
        let options = RevealOptions { delay_ms: Some(300) };
        let (state, step) = RevealState::initial(true).on_intersection(false, options);
        assert_eq!((state, step), (RevealState::Pending, RevealStep::Wait));

        let (state, step) = state.on_intersection(true, options);
        assert_eq!(step, RevealStep::RevealAndUnobserve);
        assert_eq!(state, RevealState::Revealed { delay_ms: Some(300) });
        assert_eq!(
            state.style().as_deref(),
            Some("transition-delay: 300ms; animation-delay: 300ms;")
        );
    }

    #[test]
    fn revealed_is_terminal() {
        let options = RevealOptions::default();
        let (revealed, _) = RevealState::Pending.on_intersection(true, options);

        for visible in [false, true, false] {
            let (state, step) = revealed.on_intersection(visible, options);
            assert!(state.is_revealed());
            assert_eq!(step, RevealStep::Ignore);
        }
    }

    #[test]
    fn unsupported_observer_reveals_immediately_without_delay() {
        let state = RevealState::initial(false);

        assert_eq!(state, RevealState::Revealed { delay_ms: None });
        assert_eq!(state.class(), "animated");
        assert_eq!(state.style(), None);
    }

    #[test]
    fn pending_state_hides_content() {
        assert_eq!(RevealState::initial(true).class(), "aos-init");
        assert_eq!(RevealKind::ZoomIn.as_str(), "zoom-in");
    }

    #[test]
    fn shared_registry_reveals_each_candidate_once() {
        let mut registry = RevealRegistry::default();
        let hero = registry.register(RevealOptions::default());
        let card = registry.register(RevealOptions::new(Some(200)));
        assert_ne!(hero, card);
        assert_eq!(registry.pending_count(), 2);

        assert_eq!(registry.on_entry(card, false), None);
        assert_eq!(
            registry.on_entry(card, true),
            Some(RevealState::Revealed { delay_ms: Some(200) })
        );
        assert_eq!(registry.on_entry(card, true), None);
        assert_eq!(registry.pending_count(), 1);

        assert_eq!(
            registry.on_entry(hero, true),
            Some(RevealState::Revealed { delay_ms: None })
        );
        assert_eq!(registry.pending_count(), 0);
    }

    #[test]
    fn released_candidates_are_ignored() {
        let mut registry = RevealRegistry::default();
        let id = registry.register(RevealOptions::default());
        registry.release(id);

        assert_eq!(registry.on_entry(id, true), None);
        assert_eq!(registry.on_entry(id + 1, true), None);
    }
}
