pub mod engine;
pub mod error;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;
pub mod usecase;

pub use engine::{compute_report, AttendanceBand, DayKind, DayView, LectureView};
pub use error::{ConfigError, MutationError};
pub use input::{expand_key, parse_args, ParsedInput};
pub use model::lecture::{LectureId, LectureStatus};
pub use model::ledger::{AttendanceLedger, LedgerMutation};
pub use model::semester::{SemesterConfig, WeekendDays, WeeklySchedule};
pub use model::stats::{StatsReport, SubjectStats, Tally};
pub use repository::{FileLedgerRepository, FileSemesterRepository, LedgerRepository, SemesterRepository};
pub use service::attendance_service::AttendanceService;
pub use time::{parse_human_date, weekday_name};
pub use usecase::semester_setup::SemesterDraft;
