//! Text for the session HUD and end screen

use crate::tuning::Tuning;

/// Format seconds as `MM:SS`, rounding down
pub fn format_clock(seconds: f64) -> String {
    let total = if seconds.is_finite() {
        seconds.max(0.0).floor() as u32
    } else {
        0
    };
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// End-screen teaser for the next session
pub fn next_game_message(iteration: u32, tuning: &Tuning) -> String {
    if iteration > 0 {
        format!(
            "Next game will last {} seconds with more challenges!",
            tuning.session_secs(iteration)
        )
    } else {
        "Ready for more challenges?".to_string()
    }
}
