/// Session scoreboard: score, level and remaining ships.
///
/// `high_score` survives [`GameStats::reset`] and never decreases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    pub score: u32,
    pub high_score: u32,
    pub level: u32,
    pub ships_left: u32,
    initial_lives: u32,
}

impl GameStats {
    pub fn new(initial_lives: u32) -> Self {
        Self {
            score: 0,
            high_score: 0,
            level: 1,
            ships_left: initial_lives,
            initial_lives,
        }
    }

    pub fn reset(&mut self) {
        self.score = 0;
        self.level = 1;
        self.ships_left = self.initial_lives;
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Raises the high score to the current score. Returns true on a new record.
    pub fn check_high_score(&mut self) -> bool {
        if self.score > self.high_score {
            self.high_score = self.score;
            true
        } else {
            false
        }
    }

    /// Takes one ship away and returns how many are left.
    pub fn lose_ship(&mut self) -> u32 {
        self.ships_left = self.ships_left.saturating_sub(1);
        self.ships_left
    }

    pub fn score_text(&self) -> String {
        format_points(self.score)
    }

    pub fn high_score_text(&self) -> String {
        format_points(self.high_score)
    }

    pub fn level_text(&self) -> String {
        format!("Level {}", self.level)
    }

    pub fn ships_text(&self, glyph: &str) -> String {
        vec![glyph; self.ships_left as usize].join(" ")
    }
}

/// Rounds to the nearest ten and groups thousands: `12345` -> `"12,350"`.
pub fn format_points(points: u32) -> String {
    let rounded = (points as u64 + 5) / 10 * 10;
    let digits = rounded.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
