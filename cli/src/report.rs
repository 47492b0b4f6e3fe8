use attendo_core::engine::band;
use attendo_core::model::semester::WEEK;
use attendo_core::{
    weekday_name, AttendanceBand, DayKind, DayView, LectureStatus, SemesterConfig, StatsReport,
    Tally,
};
use tabled::builder::Builder;
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct TallyRow {
    #[tabled(rename = "Scope")]
    scope: String,
    #[tabled(rename = "Attended")]
    attended: u32,
    #[tabled(rename = "Total")]
    total: u32,
    #[tabled(rename = "Attendance")]
    percentage: String,
    #[tabled(rename = "Bunks left")]
    bunks_left: u32,
    #[tabled(rename = "Status")]
    status: &'static str,
}

#[derive(Tabled)]
struct LectureRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Lecture")]
    lecture: String,
    #[tabled(rename = "Status")]
    status: String,
}

pub fn percentage_label(tally: &Tally) -> String {
    match tally.percentage() {
        Some(p) => format!("{:.1}%", p),
        None => "N/A".to_string(),
    }
}

pub fn band_label(tally: &Tally) -> &'static str {
    match band(tally) {
        Some(AttendanceBand::Safe) => "ok",
        Some(AttendanceBand::Short) => "short",
        Some(AttendanceBand::Critical) => "critical",
        None => "-",
    }
}

fn print_table(mut table: Table) {
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN)); // Header color
    println!("{}", table);
}

pub fn show_stats(config: &SemesterConfig, report: &StatsReport) {
    println!("\n\x1b[1;36m{}\x1b[0m ({} to {})", config.name(), config.start_date(), config.end_date());
    if !report.started {
        println!("The semester has not started yet.");
    }

    let summary = vec![
        TallyRow {
            scope: "Semester".to_string(),
            attended: report.overall.attended,
            total: report.overall.total,
            percentage: percentage_label(&report.overall),
            bunks_left: report.semester_bunks_left,
            status: band_label(&report.overall),
        },
        TallyRow {
            scope: "This month".to_string(),
            attended: report.monthly.attended,
            total: report.monthly.total,
            percentage: percentage_label(&report.monthly),
            bunks_left: report.monthly_bunks_left,
            status: band_label(&report.monthly),
        },
    ];
    print_table(Table::new(summary));

    let subjects: Vec<TallyRow> = report
        .subjects
        .iter()
        .map(|s| TallyRow {
            scope: s.subject.clone(),
            attended: s.tally.attended,
            total: s.tally.total,
            percentage: percentage_label(&s.tally),
            bunks_left: s.bunks_left,
            status: band_label(&s.tally),
        })
        .collect();
    print_table(Table::new(subjects));
}

pub fn show_semester(config: &SemesterConfig) {
    let weekend: Vec<&str> = WEEK
        .into_iter()
        .filter(|d| config.weekend_days().contains(*d))
        .map(weekday_name)
        .collect();
    println!("\n\x1b[1;36m{}\x1b[0m ({} to {})", config.name(), config.start_date(), config.end_date());
    println!(
        "Weekend: {}",
        if weekend.is_empty() { "none".to_string() } else { weekend.join(", ") }
    );

    let mut builder = Builder::default();
    let mut header = vec!["Day".to_string()];
    header.extend(config.subjects().iter().cloned());
    builder.push_record(header);
    for weekday in config.working_weekdays() {
        let mut record = vec![weekday_name(weekday).to_string()];
        record.extend(
            config
                .subjects()
                .iter()
                .map(|s| config.lectures_per_weekday(weekday, s).to_string()),
        );
        builder.push_record(record);
    }
    print_table(builder.build());
}

pub fn show_day(day: &DayView) {
    let heading = format!("{} ({})", day.date.format("%Y-%m-%d"), day.date.format("%a"));
    let note = match day.kind {
        DayKind::OutsideSemester => Some("outside the semester"),
        DayKind::Weekend => Some("weekend"),
        DayKind::Holiday => Some("holiday"),
        DayKind::Instructional if day.lectures.is_empty() => Some("no lectures scheduled"),
        DayKind::Instructional => None,
    };
    if let Some(note) = note {
        println!("{}: {}", heading, note);
        return;
    }

    println!("\n\x1b[1;36m{}\x1b[0m{}", heading, if day.future { " (upcoming)" } else { "" });
    let rows: Vec<LectureRow> = day
        .lectures
        .iter()
        .enumerate()
        .map(|(i, l)| LectureRow {
            position: i + 1,
            lecture: l.id.to_string(),
            status: match (l.status, l.marked) {
                (LectureStatus::Present, _) => "present".to_string(),
                (LectureStatus::Absent, true) => "absent".to_string(),
                (LectureStatus::Absent, false) => "absent (unmarked)".to_string(),
            },
        })
        .collect();
    print_table(Table::new(rows));
}
