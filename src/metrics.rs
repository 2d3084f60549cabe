//! In-process play statistics for the header and the game-over screen.
//! Nothing here is persisted; the high score lives only as long as the
//! process.

use std::time::{Duration, Instant};

pub struct GameMetrics {
    session_start: Instant,
    elapsed: Duration,
    pub high_score: u32,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            session_start: Instant::now(),
            elapsed: Duration::ZERO,
            high_score: 0,
            games_played: 0,
        }
    }

    /// Refresh the elapsed clock; called once per rendered frame
    pub fn update(&mut self) {
        self.elapsed = self.session_start.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.session_start = Instant::now();
        self.elapsed = Duration::ZERO;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        self.high_score = self.high_score.max(final_score);
    }

    /// Current session play time as mm:ss
    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
