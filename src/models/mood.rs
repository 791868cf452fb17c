use serde::{Deserialize, Serialize};

/// Intensity scores run 1 (barely present) to 10 (overwhelming).
pub const INTENSITY_MIN: i32 = 1;
pub const INTENSITY_MAX: i32 = 10;

/// Emotion data the analyzer attaches to a journal entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub primary_emotion: String,
    pub intensity_level: i32,
}

impl MoodEntry {
    /// Display label used by entry lists, e.g. `"anxious (7/10)"`.
    pub fn label(&self) -> String {
        format!(
            "{} ({}/{})",
            self.primary_emotion, self.intensity_level, INTENSITY_MAX
        )
    }

    pub fn intensity_in_range(&self) -> bool {
        (INTENSITY_MIN..=INTENSITY_MAX).contains(&self.intensity_level)
    }
}
