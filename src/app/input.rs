//! Global key sequences.

use crossterm::event::KeyCode;

/// Up Up Down Down Left Right Left Right B A.
const KONAMI: [KonamiStep; 10] = [
    KonamiStep::Up,
    KonamiStep::Up,
    KonamiStep::Down,
    KonamiStep::Down,
    KonamiStep::Left,
    KonamiStep::Right,
    KonamiStep::Left,
    KonamiStep::Right,
    KonamiStep::B,
    KonamiStep::A,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KonamiStep {
    Up,
    Down,
    Left,
    Right,
    B,
    A,
}

impl KonamiStep {
    fn matches(&self, code: KeyCode) -> bool {
        match self {
            KonamiStep::Up => code == KeyCode::Up,
            KonamiStep::Down => code == KeyCode::Down,
            KonamiStep::Left => code == KeyCode::Left,
            KonamiStep::Right => code == KeyCode::Right,
            KonamiStep::B => matches!(code, KeyCode::Char('b') | KeyCode::Char('B')),
            KonamiStep::A => matches!(code, KeyCode::Char('a') | KeyCode::Char('A')),
        }
    }
}

/// Watches the global key stream for the konami sequence.
#[derive(Debug, Default)]
pub struct KonamiDetector {
    progress: usize,
}

impl KonamiDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one key. Returns true when the final key of the sequence lands.
    pub fn feed(&mut self, code: KeyCode) -> bool {
        if KONAMI[self.progress].matches(code) {
            self.progress += 1;
            if self.progress == KONAMI.len() {
                self.progress = 0;
                return true;
            }
        } else {
            // A mismatch can still be the start of a fresh attempt
            self.progress = usize::from(KONAMI[0].matches(code));
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_sequence(detector: &mut KonamiDetector, codes: &[KeyCode]) -> bool {
        codes.iter().fold(false, |done, code| {
            let hit = detector.feed(*code);
            done || hit
        })
    }

    #[test]
    fn test_full_sequence_completes() {
        let mut d = KonamiDetector::new();
        let seq = [
            KeyCode::Up,
            KeyCode::Up,
            KeyCode::Down,
            KeyCode::Down,
            KeyCode::Left,
            KeyCode::Right,
            KeyCode::Left,
            KeyCode::Right,
            KeyCode::Char('b'),
            KeyCode::Char('a'),
        ];
        assert!(feed_sequence(&mut d, &seq));
    }

    #[test]
    fn test_interrupted_sequence_resets() {
        let mut d = KonamiDetector::new();
        assert!(!feed_sequence(
            &mut d,
            &[KeyCode::Up, KeyCode::Up, KeyCode::Char('x')]
        ));
        // The broken attempt must not count toward a new one
        let seq = [
            KeyCode::Up,
            KeyCode::Up,
            KeyCode::Down,
            KeyCode::Down,
            KeyCode::Left,
            KeyCode::Right,
            KeyCode::Left,
            KeyCode::Right,
            KeyCode::Char('b'),
            KeyCode::Char('a'),
        ];
        assert!(feed_sequence(&mut d, &seq));
    }

    #[test]
    fn test_mismatched_up_restarts_the_attempt() {
        let mut d = KonamiDetector::new();
        // Three Ups: the third is still a valid second step of a new attempt
        d.feed(KeyCode::Up);
        d.feed(KeyCode::Up);
        d.feed(KeyCode::Down);
        d.feed(KeyCode::Up); // breaks, but starts over at progress 1
        let rest = [
            KeyCode::Up,
            KeyCode::Down,
            KeyCode::Down,
            KeyCode::Left,
            KeyCode::Right,
            KeyCode::Left,
            KeyCode::Right,
            KeyCode::Char('b'),
            KeyCode::Char('a'),
        ];
        assert!(feed_sequence(&mut d, &rest));
    }
}
