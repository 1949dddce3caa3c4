//! Pre-market gap classification.

const GAP_PCT: f64 = 0.5;
const BIG_GAP_PCT: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapDirection {
    Up,
    Down,
    Flat,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gap {
    pub change_percent: f64,
    pub direction: GapDirection,
    pub is_big: bool,
}

impl Gap {
    pub fn classify(change_percent: f64) -> Self {
        let direction = if change_percent > GAP_PCT {
            GapDirection::Up
        } else if change_percent < -GAP_PCT {
            GapDirection::Down
        } else {
            GapDirection::Flat
        };
        Self {
            change_percent,
            direction,
            is_big: change_percent.abs() > BIG_GAP_PCT,
        }
    }

    pub fn is_up(&self) -> bool {
        self.direction == GapDirection::Up
    }

    pub fn is_down(&self) -> bool {
        self.direction == GapDirection::Down
    }
}
