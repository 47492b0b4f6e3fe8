use anyhow::Result;
use attendo_core::{DayView, SemesterConfig, StatsReport};
use chrono::{Days, NaiveDate};
use ratatui::widgets::TableState;
use tracing::warn;

use crate::Service;

pub enum InputMode {
    Normal,
    ConfirmLeave,
}

pub struct App {
    service: Service,
    pub today: NaiveDate,
    pub date: NaiveDate,
    pub config: SemesterConfig,
    pub day: DayView,
    pub report: StatsReport,
    pub state: TableState,
    pub input_mode: InputMode,
    pub message: Option<String>,
}

impl App {
    pub fn new(service: Service, today: NaiveDate) -> Result<App> {
        let config = service.require_semester()?;
        let day = service.day(today, today)?;
        let report = service.report(today)?;
        let mut app = App {
            service,
            today,
            date: today,
            config,
            day,
            report,
            state: TableState::default(),
            input_mode: InputMode::Normal,
            message: None,
        };
        app.fix_selection();
        Ok(app)
    }

    pub fn next_day(&mut self) {
        if let Some(date) = self.date.checked_add_days(Days::new(1)) {
            self.go_to(date);
        }
    }

    pub fn previous_day(&mut self) {
        if let Some(date) = self.date.checked_sub_days(Days::new(1)) {
            self.go_to(date);
        }
    }

    pub fn go_to_today(&mut self) {
        self.go_to(self.today);
    }

    fn go_to(&mut self, date: NaiveDate) {
        self.date = date;
        self.message = None;
        self.state.select(None);
        self.reload();
    }

    pub fn next(&mut self) {
        let len = self.day.lectures.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.day.lectures.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    pub fn toggle_lecture(&mut self) {
        let Some(lecture) = self
            .state
            .selected()
            .and_then(|i| self.day.lectures.get(i))
            .map(|l| l.id.clone())
        else {
            return;
        };
        let result = self.service.toggle_lecture(self.date, lecture.clone(), self.today);
        match result {
            Ok(status) => self.message = Some(format!("{} marked {}", lecture, status)),
            Err(e) => self.report_error(e),
        }
        self.reload();
    }

    pub fn toggle_holiday(&mut self) {
        match self.service.toggle_holiday(self.date, self.today) {
            Ok(true) => self.message = Some(format!("{} is now a holiday", self.date)),
            Ok(false) => self.message = Some(format!("{} is no longer a holiday", self.date)),
            Err(e) => self.report_error(e),
        }
        self.reload();
    }

    /// Asks for confirmation before marking the whole day absent.
    pub fn request_leave(&mut self) {
        if self.day.can_mark_leave() {
            self.input_mode = InputMode::ConfirmLeave;
        } else {
            self.message = Some(format!("Nothing to mark as leave on {}", self.date));
        }
    }

    pub fn confirm_leave(&mut self) {
        self.input_mode = InputMode::Normal;
        match self.service.mark_leave(self.date, self.today) {
            Ok(n) => self.message = Some(format!("Marked {} lectures absent", n)),
            Err(e) => self.report_error(e),
        }
        self.reload();
    }

    pub fn cancel(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    fn report_error(&mut self, e: anyhow::Error) {
        warn!("{e:#}");
        self.message = Some(format!("{e:#}"));
    }

    fn reload(&mut self) {
        let loaded = self
            .service
            .day(self.date, self.today)
            .and_then(|day| Ok((day, self.service.report(self.today)?)));
        match loaded {
            Ok((day, report)) => {
                self.day = day;
                self.report = report;
            }
            Err(e) => self.report_error(e),
        }
        self.fix_selection();
    }

    fn fix_selection(&mut self) {
        let len = self.day.lectures.len();
        match self.state.selected() {
            _ if len == 0 => self.state.select(None),
            Some(i) if i >= len => self.state.select(Some(len - 1)),
            Some(_) => {}
            None => self.state.select(Some(0)),
        }
    }
}
