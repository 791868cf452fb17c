//! Mood dashboard aggregates, derived from analyzed journal entries.

use chrono::NaiveDate;

use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::models::journal::JournalEntry;

/// One point on the mood-over-time chart.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub average_intensity: f64,
    pub entries: usize,
}

/// Page state behind the dashboard: a fetched entry list plus pure
/// derivations over it.
pub struct MoodDashboard {
    api: ApiClient,
    entries: Vec<JournalEntry>,
}

impl MoodDashboard {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            entries: Vec::new(),
        }
    }

    pub async fn refresh(&mut self) -> ClientResult<()> {
        self.entries = self.api.list_journal().await?;
        Ok(())
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn analyzed_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_analyzed()).count()
    }

    pub fn average_intensity(&self) -> Option<i32> {
        average_intensity(&self.entries)
    }

    pub fn dominant_emotion(&self) -> Option<&str> {
        dominant_emotion(&self.entries)
    }

    pub fn emotion_breakdown(&self) -> Vec<(String, usize)> {
        emotion_breakdown(&self.entries)
    }

    pub fn daily_trend(&self) -> Vec<TrendPoint> {
        daily_trend(&self.entries)
    }
}

/// Arithmetic mean of intensity scores, rounded to the nearest integer.
/// `None` until at least one entry has been analyzed.
pub fn average_intensity(entries: &[JournalEntry]) -> Option<i32> {
    let scores: Vec<i32> = entries
        .iter()
        .filter_map(|e| e.mood.as_ref())
        .map(|m| m.intensity_level)
        .collect();

    if scores.is_empty() {
        return None;
    }
    let mean = scores.iter().sum::<i32>() as f64 / scores.len() as f64;
    Some(mean.round() as i32)
}

/// Most frequent primary emotion; the earliest-seen label wins ties so the
/// derivation stays deterministic.
pub fn dominant_emotion(entries: &[JournalEntry]) -> Option<&str> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for mood in entries.iter().filter_map(|e| e.mood.as_ref()) {
        match counts
            .iter_mut()
            .find(|(label, _)| *label == mood.primary_emotion)
        {
            Some((_, n)) => *n += 1,
            None => counts.push((mood.primary_emotion.as_str(), 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (label, n) in counts {
        match best {
            Some((_, best_n)) if n <= best_n => {}
            _ => best = Some((label, n)),
        }
    }
    best.map(|(label, _)| label)
}

/// Counts per emotion label, in first-seen order.
pub fn emotion_breakdown(entries: &[JournalEntry]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for mood in entries.iter().filter_map(|e| e.mood.as_ref()) {
        match counts
            .iter_mut()
            .find(|(label, _)| *label == mood.primary_emotion)
        {
            Some((_, n)) => *n += 1,
            None => counts.push((mood.primary_emotion.clone(), 1)),
        }
    }
    counts
}

/// Per-calendar-day average intensity, ascending by date.
pub fn daily_trend(entries: &[JournalEntry]) -> Vec<TrendPoint> {
    let mut days: Vec<(NaiveDate, i64, usize)> = Vec::new();
    for entry in entries {
        if let Some(mood) = &entry.mood {
            let date = entry.created_at.date_naive();
            match days.iter_mut().find(|(d, _, _)| *d == date) {
                Some((_, sum, n)) => {
                    *sum += i64::from(mood.intensity_level);
                    *n += 1;
                }
                None => days.push((date, i64::from(mood.intensity_level), 1)),
            }
        }
    }

    days.sort_by_key(|(date, _, _)| *date);
    days.into_iter()
        .map(|(date, sum, n)| TrendPoint {
            date,
            average_intensity: sum as f64 / n as f64,
            entries: n,
        })
        .collect()
}
