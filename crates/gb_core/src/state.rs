//! The tri-state presentation state machine and its per-state render
//! parameters (tint, caption, clip-pair ordinal).

/// Discrete presentation state. The ordinal doubles as the index of the
/// two-frame clip pair assigned to the state on the sprite sheet.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GopherState {
    #[default]
    Run,
    Flap,
    Dead,
}

impl GopherState {
    /// All states in cycle order.
    pub const ALL: &'static [GopherState] =
        &[GopherState::Run, GopherState::Flap, GopherState::Dead];

    pub fn ordinal(self) -> usize {
        match self {
            Self::Run => 0,
            Self::Flap => 1,
            Self::Dead => 2,
        }
    }

    /// Caption drawn above the gopher while this state is active.
    pub fn caption(self) -> &'static str {
        match self {
            Self::Run => "RUN",
            Self::Flap => "FLAP",
            Self::Dead => "DEAD",
        }
    }

    /// Sprite tint for this state, RGBA. Applied as a color multiply at
    /// draw time; the texture keeps its own alpha and shape.
    pub fn tint(self) -> [u8; 4] {
        match self {
            Self::Run => [168, 235, 254, 255],
            Self::Flap => [251, 231, 240, 255],
            Self::Dead => [255, 250, 205, 255],
        }
    }

    /// Cycle to the next state (wraps around).
    pub fn next(self) -> Self {
        match self {
            Self::Run => Self::Flap,
            Self::Flap => Self::Dead,
            Self::Dead => Self::Run,
        }
    }
}

impl std::fmt::Display for GopherState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.caption())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_run() {
        assert_eq!(GopherState::default(), GopherState::Run);
    }

    #[test]
    fn tint_table_is_exact() {
        assert_eq!(GopherState::Run.tint(), [168, 235, 254, 255]);
        assert_eq!(GopherState::Flap.tint(), [251, 231, 240, 255]);
        assert_eq!(GopherState::Dead.tint(), [255, 250, 205, 255]);
    }

    #[test]
    fn next_cycles_through_states() {
        assert_eq!(GopherState::Run.next(), GopherState::Flap);
        assert_eq!(GopherState::Flap.next(), GopherState::Dead);
        assert_eq!(GopherState::Dead.next(), GopherState::Run);
    }

    #[test]
    fn n_presses_land_on_n_mod_3() {
        let cycle = [GopherState::Run, GopherState::Flap, GopherState::Dead];
        let mut state = GopherState::Run;
        for n in 1..=10 {
            state = state.next();
            assert_eq!(state, cycle[n % 3]);
        }
    }

    #[test]
    fn ordinals_are_distinct_and_in_range() {
        assert_eq!(GopherState::Run.ordinal(), 0);
        assert_eq!(GopherState::Flap.ordinal(), 1);
        assert_eq!(GopherState::Dead.ordinal(), 2);
    }

    #[test]
    fn display_matches_caption() {
        for &state in GopherState::ALL {
            assert_eq!(format!("{}", state), state.caption());
        }
    }
}
