use crate::deck::Deck;
use crate::render::effects::Effect;

/// Keys the input collaborator can report. Anything not in the fixed map
/// below is simply ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Next,
    Previous,
    Quit,
}

/// Fixed key map: `q` quits, `n`/Right advances, `b`/Left goes back.
pub fn map_key(key: Key) -> Option<Intent> {
    match key {
        Key::Char('q') => Some(Intent::Quit),
        Key::Char('n') | Key::Right => Some(Intent::Next),
        Key::Char('b') | Key::Left => Some(Intent::Previous),
        Key::Char(_) => None,
    }
}

/// An effect in progress between two slides, tracked purely by frame
/// count. Frame 0 means "created, nothing drawn yet"; the engine draws
/// frames `1..=total`, and frame `total` is exactly the destination's
/// static layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub from: usize,
    pub to: usize,
    pub effect: Effect,
    pub frame: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}

/// Current-slide state machine. Owns nothing but indices; the deck stays
/// immutable and is only consulted for slide count and effect names.
#[derive(Debug)]
pub struct Navigator {
    current: usize,
    deck_size: usize,
    transition: Option<Transition>,
    pending: Option<Intent>,
}

impl Navigator {
    pub fn new(deck_size: usize, start: usize) -> Self {
        Self {
            current: start.min(deck_size.saturating_sub(1)),
            deck_size,
            transition: None,
            pending: None,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Apply a navigation intent. Quit always wins immediately; while a
    /// transition runs, Next/Previous are queued (at most one, latest
    /// wins) and applied once the transition completes.
    pub fn handle(&mut self, intent: Intent, deck: &Deck) -> Outcome {
        if intent == Intent::Quit {
            return Outcome::Quit;
        }
        if self.transition.is_some() {
            self.pending = Some(intent);
            return Outcome::Continue;
        }

        let target = match intent {
            Intent::Next => (self.current + 1).min(self.deck_size - 1),
            Intent::Previous => self.current.saturating_sub(1),
            Intent::Quit => unreachable!(),
        };
        if target != self.current {
            self.move_to(target, deck);
        }
        Outcome::Continue
    }

    /// An effect is a property of the destination slide only: entering a
    /// slide that names a known effect starts a transition, anything else
    /// snaps instantly.
    fn move_to(&mut self, target: usize, deck: &Deck) {
        let effect = deck
            .slide(target)
            .style
            .effect
            .as_deref()
            .and_then(Effect::from_name);
        if let Some(effect) = effect {
            self.transition = Some(Transition {
                from: self.current,
                to: target,
                effect,
                frame: 0,
                total: effect.total_frames(),
            });
        }
        self.current = target;
    }

    /// Advance the active transition by one frame and return a snapshot of
    /// the frame to draw. When the final frame is reached the transition is
    /// destroyed and any queued intent applied.
    pub fn advance_frame(&mut self, deck: &Deck) -> Option<Transition> {
        let transition = self.transition.as_mut()?;
        transition.frame += 1;
        let snapshot = transition.clone();
        if snapshot.frame >= snapshot.total {
            self.transition = None;
            if let Some(intent) = self.pending.take() {
                let _ = self.handle(intent, deck);
            }
        }
        Some(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck;

    fn plain_deck() -> Deck {
        deck::build("# A\n---\n# B\n---\n# C").unwrap()
    }

    fn effect_deck() -> Deck {
        deck::build("# A\n---\n<!-- effect=explosions -->\n# B\n---\n# C").unwrap()
    }

    #[test]
    fn test_key_map_is_fixed() {
        assert_eq!(map_key(Key::Char('q')), Some(Intent::Quit));
        assert_eq!(map_key(Key::Char('n')), Some(Intent::Next));
        assert_eq!(map_key(Key::Right), Some(Intent::Next));
        assert_eq!(map_key(Key::Char('b')), Some(Intent::Previous));
        assert_eq!(map_key(Key::Left), Some(Intent::Previous));
        assert_eq!(map_key(Key::Char('x')), None);
    }

    #[test]
    fn test_next_clamps_at_last_slide() {
        let deck = plain_deck();
        let mut nav = Navigator::new(deck.len(), 0);
        for expected in [1, 2, 2] {
            nav.handle(Intent::Next, &deck);
            assert_eq!(nav.current(), expected);
        }
    }

    #[test]
    fn test_previous_clamps_at_zero() {
        let deck = plain_deck();
        let mut nav = Navigator::new(deck.len(), 0);
        nav.handle(Intent::Previous, &deck);
        assert_eq!(nav.current(), 0);
    }

    #[test]
    fn test_snap_without_effect() {
        let deck = plain_deck();
        let mut nav = Navigator::new(deck.len(), 0);
        nav.handle(Intent::Next, &deck);
        assert!(!nav.is_transitioning());
    }

    #[test]
    fn test_effect_on_destination_starts_transition() {
        let deck = effect_deck();
        let mut nav = Navigator::new(deck.len(), 0);
        nav.handle(Intent::Next, &deck);
        assert!(nav.is_transitioning());
        assert_eq!(nav.current(), 1);
    }

    #[test]
    fn test_effect_triggers_when_navigating_backward_into_slide() {
        let deck = effect_deck();
        let mut nav = Navigator::new(deck.len(), 2);
        nav.handle(Intent::Previous, &deck);
        assert!(nav.is_transitioning());
    }

    #[test]
    fn test_leaving_effect_slide_does_not_transition() {
        let deck = effect_deck();
        let mut nav = Navigator::new(deck.len(), 1);
        nav.handle(Intent::Next, &deck);
        assert!(!nav.is_transitioning());
        assert_eq!(nav.current(), 2);
    }

    #[test]
    fn test_unknown_effect_falls_back_to_cut() {
        let deck = deck::build("# A\n---\n<!-- effect=wormhole -->\n# B").unwrap();
        let mut nav = Navigator::new(deck.len(), 0);
        nav.handle(Intent::Next, &deck);
        assert!(!nav.is_transitioning());
        assert_eq!(nav.current(), 1);
    }

    #[test]
    fn test_quit_wins_while_transitioning() {
        let deck = effect_deck();
        let mut nav = Navigator::new(deck.len(), 0);
        nav.handle(Intent::Next, &deck);
        assert!(nav.is_transitioning());
        assert_eq!(nav.handle(Intent::Quit, &deck), Outcome::Quit);
    }

    #[test]
    fn test_intents_queue_while_transitioning() {
        let deck = effect_deck();
        let mut nav = Navigator::new(deck.len(), 0);
        nav.handle(Intent::Next, &deck);
        nav.handle(Intent::Next, &deck);
        // Still on the transition's destination until it completes.
        assert_eq!(nav.current(), 1);
        let total = nav.transition.as_ref().unwrap().total;
        for _ in 0..total {
            nav.advance_frame(&deck);
        }
        assert!(!nav.is_transitioning());
        assert_eq!(nav.current(), 2);
    }

    #[test]
    fn test_transition_runs_for_its_total_frames() {
        let deck = effect_deck();
        let mut nav = Navigator::new(deck.len(), 0);
        nav.handle(Intent::Next, &deck);
        let total = nav.transition.as_ref().unwrap().total;
        let mut frames = 0;
        while let Some(t) = nav.advance_frame(&deck) {
            frames += 1;
            assert!(t.frame <= t.total);
        }
        assert_eq!(frames, total);
    }
}
