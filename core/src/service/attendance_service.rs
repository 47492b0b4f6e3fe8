use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use tracing::{debug, info, trace};

use crate::engine::{
    self, check_mutation, compute_report, day_view, plan_lecture_status, plan_mark_leave,
    plan_toggle_holiday, DayView,
};
use crate::model::lecture::{LectureId, LectureStatus};
use crate::model::ledger::{AttendanceLedger, LedgerMutation};
use crate::model::semester::SemesterConfig;
use crate::model::stats::StatsReport;
use crate::repository::{LedgerRepository, SemesterRepository};

/// Loads snapshots from the repositories, hands them to the engine with an
/// explicit `today`, and writes planned mutations back.
pub struct AttendanceService<S: SemesterRepository, L: LedgerRepository> {
    semester_repo: S,
    ledger_repo: L,
}

impl<S: SemesterRepository, L: LedgerRepository> AttendanceService<S, L> {
    pub fn new(semester_repo: S, ledger_repo: L) -> Self {
        Self {
            semester_repo,
            ledger_repo,
        }
    }

    pub fn semester(&self) -> Result<Option<SemesterConfig>> {
        self.semester_repo.load()
    }

    pub fn require_semester(&self) -> Result<SemesterConfig> {
        self.semester_repo
            .load()?
            .ok_or_else(|| anyhow!("No semester configured yet. Run `attendo setup` first."))
    }

    pub fn ledger(&self) -> Result<AttendanceLedger> {
        self.ledger_repo.load()
    }

    /// Replaces the semester wholesale. The ledger is created empty on first setup
    /// and left untouched on later edits.
    pub fn replace_semester(&self, config: &SemesterConfig) -> Result<()> {
        self.semester_repo.save(config)?;
        if !self.ledger_repo.exists() {
            debug!("Initializing empty attendance ledger");
            self.ledger_repo.save(&AttendanceLedger::new())?;
        }
        info!("Semester set to {}", config.name());
        Ok(())
    }

    pub fn report(&self, today: NaiveDate) -> Result<StatsReport> {
        let config = self.require_semester()?;
        let ledger = self.ledger_repo.load()?;
        let report = compute_report(&config, &ledger, today);
        trace!("{report:?}");
        Ok(report)
    }

    pub fn day(&self, date: NaiveDate, today: NaiveDate) -> Result<DayView> {
        let config = self.require_semester()?;
        let ledger = self.ledger_repo.load()?;
        Ok(day_view(&config, &ledger, date, today))
    }

    pub fn set_lecture_status(
        &self,
        date: NaiveDate,
        lecture: LectureId,
        status: LectureStatus,
        today: NaiveDate,
    ) -> Result<()> {
        self.commit(plan_lecture_status(date, lecture, status), today)
    }

    /// Flips one lecture between present and absent; unmarked counts as absent.
    pub fn toggle_lecture(
        &self,
        date: NaiveDate,
        lecture: LectureId,
        today: NaiveDate,
    ) -> Result<LectureStatus> {
        let ledger = self.ledger_repo.load()?;
        let current = ledger.status(date, &lecture).unwrap_or(LectureStatus::Absent);
        let next = current.toggled();
        self.commit(plan_lecture_status(date, lecture, next), today)?;
        Ok(next)
    }

    /// Returns whether `date` is a holiday afterwards.
    pub fn toggle_holiday(&self, date: NaiveDate, today: NaiveDate) -> Result<bool> {
        let ledger = self.ledger_repo.load()?;
        let mutation = plan_toggle_holiday(&ledger, date);
        let holiday = matches!(mutation, LedgerMutation::SetHoliday { holiday: true, .. });
        self.commit(mutation, today)?;
        Ok(holiday)
    }

    /// Marks every lecture on `date` absent. Returns how many lectures were
    /// written, zero on days without instruction.
    pub fn mark_leave(&self, date: NaiveDate, today: NaiveDate) -> Result<usize> {
        let config = self.require_semester()?;
        let ledger = self.ledger_repo.load()?;
        match plan_mark_leave(&config, &ledger, date) {
            Some(mutation) => {
                let written = match &mutation {
                    LedgerMutation::MarkDayAbsent { lectures, .. } => lectures.len(),
                    _ => 0,
                };
                self.commit(mutation, today)?;
                Ok(written)
            }
            None => {
                debug!("Nothing to mark as leave on {date}");
                Ok(0)
            }
        }
    }

    fn commit(&self, mutation: LedgerMutation, today: NaiveDate) -> Result<()> {
        let config = self.require_semester()?;
        let ledger = self.ledger_repo.load()?;
        check_mutation(&config, &ledger, today, &mutation)?;
        debug!("Applying {mutation:?}");
        self.ledger_repo.apply(&mutation)?;
        Ok(())
    }

    /// Lectures the schedule puts on `date`, for callers that address lectures by
    /// position.
    pub fn lectures_on(&self, date: NaiveDate) -> Result<Vec<LectureId>> {
        let config = self.require_semester()?;
        Ok(engine::scheduled_lectures(&config, date).collect())
    }
}
