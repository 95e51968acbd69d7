use serde::{Deserialize, Serialize};

/// Confetti colors: the deck accents plus amber.
pub const CONFETTI_PALETTE: [&str; 5] = [
    "hsl(187, 100%, 50%)",
    "hsl(270, 80%, 65%)",
    "hsl(150, 60%, 50%)",
    "hsl(43, 100%, 60%)",
    "hsl(340, 75%, 55%)",
];

/// One falling confetti piece. Layout only; the shell animates the fall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfettiPiece {
    /// Horizontal start, percent of the viewport width.
    pub left: f32,
    /// Animation delay in seconds.
    pub delay: f32,
    /// Side length in px.
    pub size: f32,
    /// Degrees.
    pub rotation: f32,
    /// Index into [`CONFETTI_PALETTE`].
    pub tint: u8,
    pub round: bool,
}

/// One-shot finish celebration. Fires once per arrival at the end of the
/// deck; repeated triggers are ignored until [`Celebration::reset`].
#[derive(Debug, Default)]
pub struct Celebration {
    fired: bool,
    pieces: Vec<ConfettiPiece>,
}

impl Celebration {
    /// Spawn `count` pieces unless already fired. Returns whether it fired.
    pub fn trigger(&mut self, count: usize) -> bool {
        if self.fired {
            tracing::debug!("Celebration already fired for this arrival");
            return false;
        }
        self.fired = true;
        self.pieces = (0..count)
            .map(|i| ConfettiPiece {
                left: fastrand::f32() * 100.0,
                delay: fastrand::f32() * 0.8,
                size: fastrand::f32() * 8.0 + 4.0,
                rotation: fastrand::f32() * 360.0,
                tint: fastrand::u8(0..CONFETTI_PALETTE.len() as u8),
                round: i % 3 == 0,
            })
            .collect();
        true
    }

    pub fn reset(&mut self) {
        self.fired = false;
        self.pieces.clear();
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    pub fn pieces(&self) -> &[ConfettiPiece] {
        &self.pieces
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_until_reset() {
        let mut c = Celebration::default();
        assert!(c.trigger(50));
        assert_eq!(c.pieces().len(), 50);
        assert!(!c.trigger(50));
        assert_eq!(c.pieces().len(), 50);

        c.reset();
        assert!(!c.has_fired());
        assert!(c.pieces().is_empty());
        assert!(c.trigger(10));
        assert_eq!(c.pieces().len(), 10);
    }

    #[test]
    fn pieces_stay_in_bounds() {
        let mut c = Celebration::default();
        c.trigger(200);
        for p in c.pieces() {
            assert!((0.0..=100.0).contains(&p.left));
            assert!((0.0..=0.8).contains(&p.delay));
            assert!((4.0..=12.0).contains(&p.size));
            assert!((p.tint as usize) < CONFETTI_PALETTE.len());
        }
        assert!(c.pieces()[0].round);
        assert!(!c.pieces()[1].round);
    }
}
