use std::fmt;

use serde::{Deserialize, Serialize};

/// Gesture recognised from the number of extended fingers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GestureLabel {
    Fist,
    One,
    Peace,
    Three,
    Four,
    Hello,
}

impl GestureLabel {
    /// Map a fingertip count to a label. Counts above five saturate to `Hello`.
    pub fn from_count(count: usize) -> Self {
        match count {
            0 => Self::Fist,
            1 => Self::One,
            2 => Self::Peace,
            3 => Self::Three,
            4 => Self::Four,
            _ => Self::Hello,
        }
    }

    /// Number of extended fingers the label stands for.
    pub fn finger_count(&self) -> usize {
        match self {
            Self::Fist => 0,
            Self::One => 1,
            Self::Peace => 2,
            Self::Three => 3,
            Self::Four => 4,
            Self::Hello => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fist => "Fist",
            Self::One => "One",
            Self::Peace => "Peace/Two",
            Self::Three => "Three",
            Self::Four => "Four",
            Self::Hello => "Hello",
        }
    }

    /// Caption shown on the video overlay.
    pub fn caption(&self) -> &'static str {
        match self {
            Self::Fist => "A Fist?",
            Self::One => "its a 1 right?",
            Self::Peace => "Peace!",
            Self::Three => "maybe 3?",
            Self::Four => "4?",
            Self::Hello => "Well Hello there",
        }
    }
}

impl fmt::Display for GestureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_mapping() {
        let labels: Vec<_> = (0..=5).map(GestureLabel::from_count).collect();
        assert_eq!(
            labels,
            vec![
                GestureLabel::Fist,
                GestureLabel::One,
                GestureLabel::Peace,
                GestureLabel::Three,
                GestureLabel::Four,
                GestureLabel::Hello,
            ]
        );
    }

    #[test]
    fn test_mapping_is_total_and_deterministic() {
        for count in 0..64 {
            assert_eq!(GestureLabel::from_count(count), GestureLabel::from_count(count));
        }
        assert_eq!(GestureLabel::from_count(usize::MAX), GestureLabel::Hello);
    }

    #[test]
    fn test_finger_count_round_trip() {
        for count in 0..=5 {
            assert_eq!(GestureLabel::from_count(count).finger_count(), count);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(GestureLabel::Peace.to_string(), "Peace/Two");
        assert_eq!(GestureLabel::Hello.caption(), "Well Hello there");
    }
}
