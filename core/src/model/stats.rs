use serde::{Deserialize, Serialize};

/// Lecture counts for one accounting bucket.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub total: u32,
    pub attended: u32,
    pub absent: u32,
}

impl Tally {
    pub fn record(&mut self, present: bool) {
        self.total = self.total.saturating_add(1);
        if present {
            self.attended = self.attended.saturating_add(1);
        } else {
            self.absent = self.absent.saturating_add(1);
        }
    }

    /// Unrounded attended/total, `None` when nothing has been scheduled yet.
    pub fn ratio(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(f64::from(self.attended) / f64::from(self.total))
        }
    }

    /// Attendance percentage rounded to one decimal, `None` meaning "N/A".
    pub fn percentage(&self) -> Option<f64> {
        self.ratio().map(|r| (r * 1000.0).round() / 10.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SubjectStats {
    pub subject: String,
    pub tally: Tally,
    pub bunks_left: u32,
}

/// Derived view over a semester and its ledger as of one date. Never persisted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StatsReport {
    pub started: bool,
    pub overall: Tally,
    pub monthly: Tally,
    pub subjects: Vec<SubjectStats>,
    pub semester_bunks_left: u32,
    pub monthly_bunks_left: u32,
}

impl StatsReport {
    pub fn subject(&self, name: &str) -> Option<&SubjectStats> {
        self.subjects.iter().find(|s| s.subject == name)
    }
}
