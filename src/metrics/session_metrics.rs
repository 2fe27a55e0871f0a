use std::time::{Duration, Instant};

/// Per-process counters shown in the HUD. Nothing here survives the process;
/// persistence is out of scope.
pub struct SessionMetrics {
    run_started: Instant,
    elapsed: Duration,
    pub best_score: u32,
    pub games_played: u32,
    pub reversals: u32,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self {
            run_started: Instant::now(),
            elapsed: Duration::ZERO,
            best_score: 0,
            games_played: 0,
            reversals: 0,
        }
    }

    /// Refresh the elapsed-time reading for the current run
    pub fn update(&mut self) {
        self.elapsed = self.run_started.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.run_started = Instant::now();
        self.elapsed = Duration::ZERO;
    }

    /// Record a finished run; the session has already reset itself
    pub fn on_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        if final_score > self.best_score {
            self.best_score = final_score;
        }
        self.on_game_start();
    }

    pub fn on_reversal(&mut self) {
        self.reversals += 1;
    }

    /// Elapsed time of the current run as mm:ss
    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self::new()
    }
}
