pub mod chat;
pub mod journal;
pub mod mood;

pub use chat::ChatStore;
pub use journal::JournalStore;
pub use mood::MoodDashboard;
