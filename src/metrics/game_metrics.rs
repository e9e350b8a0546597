use std::time::{Duration, Instant};

use crate::game::{PlayerId, RoundOutcome};

/// Per-process tallies shown in the header
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub rounds_played: u32,
    /// Versus wins, indexed by `PlayerId::index`
    pub wins: [u32; 2],
    pub draws: u32,
    running: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            rounds_played: 0,
            wins: [0; 2],
            draws: 0,
            running: false,
        }
    }

    /// Refresh the round clock; it freezes once the round ends
    pub fn update(&mut self) {
        if self.running {
            self.elapsed_time = self.start_time.elapsed();
        }
    }

    pub fn on_round_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.running = true;
    }

    pub fn on_round_stop(&mut self) {
        self.update();
        self.running = false;
    }

    pub fn on_round_over(&mut self, outcome: RoundOutcome) {
        self.on_round_stop();
        self.rounds_played += 1;
        match outcome {
            RoundOutcome::Winner(player) => self.wins[player.index()] += 1,
            RoundOutcome::Draw => self.draws += 1,
            RoundOutcome::GameOver { .. } => {}
        }
    }

    pub fn wins(&self, player: PlayerId) -> u32 {
        self.wins[player.index()]
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::CollisionType;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_outcome_tallies() {
        let mut metrics = GameMetrics::new();

        metrics.on_round_over(RoundOutcome::GameOver {
            score: 10,
            cause: CollisionType::Wall,
        });
        metrics.on_round_over(RoundOutcome::Winner(PlayerId::Two));
        metrics.on_round_over(RoundOutcome::Draw);
        metrics.on_round_over(RoundOutcome::Winner(PlayerId::Two));

        assert_eq!(metrics.rounds_played, 4);
        assert_eq!(metrics.wins(PlayerId::One), 0);
        assert_eq!(metrics.wins(PlayerId::Two), 2);
        assert_eq!(metrics.draws, 1);
    }

    #[test]
    fn test_clock_only_runs_during_round() {
        let mut metrics = GameMetrics::new();
        std::thread::sleep(Duration::from_millis(20));
        metrics.update();
        assert_eq!(metrics.elapsed_time, Duration::ZERO);

        metrics.on_round_start();
        std::thread::sleep(Duration::from_millis(50));
        metrics.update();
        assert!(metrics.elapsed_time.as_millis() >= 50);

        metrics.on_round_stop();
        let frozen = metrics.elapsed_time;
        std::thread::sleep(Duration::from_millis(20));
        metrics.update();
        assert_eq!(metrics.elapsed_time, frozen);
    }
}
