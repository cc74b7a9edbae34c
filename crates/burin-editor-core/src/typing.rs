//! The Idle/Typing gate for deferred selection re-synchronization.
//!
//! Host-native editing mutates the surface before the model hears about it,
//! so the render layer must not read the selection back until the surface
//! has settled, one render frame after the last input. The gate tracks that
//! window: `begin` on every input event, `settle` from the deferred
//! callback. Tokens are last-writer-wins: a newer `begin` invalidates every
//! earlier token, so a stale deferred read is dropped rather than queued.
//!
//! The gate does no scheduling of its own; the host owns the frame deferral.

/// Proof of a particular typing burst; redeemed by [`TypingGate::settle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleToken(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypingState {
    #[default]
    Idle,
    Typing,
}

#[derive(Debug, Default)]
pub struct TypingGate {
    state: TypingState,
    generation: u64,
}

impl TypingGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> TypingState {
        self.state
    }

    pub fn is_typing(&self) -> bool {
        self.state == TypingState::Typing
    }

    /// Enter (or stay in) Typing and invalidate all earlier tokens.
    pub fn begin(&mut self) -> SettleToken {
        self.generation += 1;
        self.state = TypingState::Typing;
        SettleToken(self.generation)
    }

    /// Exit Typing if `token` is still the current one. Returns whether the
    /// caller holds the settle; `false` means a newer keystroke superseded
    /// this burst and the deferred read must be dropped.
    pub fn settle(&mut self, token: SettleToken) -> bool {
        if self.state == TypingState::Typing && token.0 == self.generation {
            self.state = TypingState::Idle;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_and_settle() {
        let mut gate = TypingGate::new();
        assert!(!gate.is_typing());
        let token = gate.begin();
        assert!(gate.is_typing());
        assert!(gate.settle(token));
        assert_eq!(gate.state(), TypingState::Idle);
    }

    #[test]
    fn test_later_begin_invalidates_earlier_token() {
        let mut gate = TypingGate::new();
        let first = gate.begin();
        let second = gate.begin();
        // The first burst's deferred read arrives late and is dropped.
        assert!(!gate.settle(first));
        assert!(gate.is_typing());
        assert!(gate.settle(second));
        assert!(!gate.is_typing());
    }

    #[test]
    fn test_settle_is_single_use() {
        let mut gate = TypingGate::new();
        let token = gate.begin();
        assert!(gate.settle(token));
        assert!(!gate.settle(token));
    }
}
