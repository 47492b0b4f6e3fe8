use attendo_core::engine::band;
use attendo_core::{AttendanceBand, DayKind, LectureStatus, Tally};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, Paragraph, Row, Table, Wrap},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::report::percentage_label;
use crate::tui::app::{App, InputMode};

// --- THEME ---
struct Theme {
    primary: Color,
    muted: Color,
    text: Color,
    safe: Color,
    short: Color,
    critical: Color,
}

const THEME: Theme = Theme {
    primary: Color::Cyan,
    muted: Color::DarkGray,
    text: Color::White,
    safe: Color::Green,
    short: Color::Yellow,
    critical: Color::Red,
};

const SUBJECT_WIDTH: usize = 14;

fn band_color(tally: &Tally) -> Color {
    match band(tally) {
        Some(AttendanceBand::Safe) => THEME.safe,
        Some(AttendanceBand::Short) => THEME.short,
        Some(AttendanceBand::Critical) => THEME.critical,
        None => THEME.muted,
    }
}

/// Cuts `s` to at most `width` terminal columns, ending in an ellipsis when cut.
pub fn truncate(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Footer
        ])
        .split(size);

    draw_header(f, app, main_chunks[0]);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(main_chunks[1]);

    draw_lectures(f, app, content_chunks[0]);
    draw_stats(f, app, content_chunks[1]);

    let footer = match &app.message {
        Some(message) => Paragraph::new(message.as_str()).style(Style::default().fg(THEME.short)),
        None => Paragraph::new(
            "h/l: Day | t: Today | j/k: Lecture | space: Toggle | H: Holiday | L: Leave | q: Quit",
        )
        .style(Style::default().fg(THEME.muted)),
    };
    f.render_widget(footer.alignment(Alignment::Center), main_chunks[2]);

    if let InputMode::ConfirmLeave = app.input_mode {
        draw_confirm(f, app, size);
    }
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let tag = match app.day.kind {
        DayKind::OutsideSemester => "outside semester",
        DayKind::Weekend => "weekend",
        DayKind::Holiday => "holiday",
        DayKind::Instructional if app.date == app.today => "today",
        DayKind::Instructional if app.day.future => "upcoming",
        DayKind::Instructional => "",
    };

    let title = Line::from(vec![
        Span::styled(" ATTENDO ", Style::default().fg(THEME.primary).add_modifier(Modifier::BOLD)),
        Span::styled(app.config.name(), Style::default().fg(THEME.muted)),
    ]);
    let nav = Line::from(vec![
        Span::styled(" < ", Style::default().fg(THEME.text)),
        Span::styled(
            app.date.format("%a %Y-%m-%d").to_string(),
            Style::default().fg(THEME.text).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" > ", Style::default().fg(THEME.text)),
        Span::styled(tag, Style::default().fg(THEME.primary)),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title);
    f.render_widget(
        Paragraph::new(nav).alignment(Alignment::Center).block(block),
        area,
    );
}

fn draw_lectures(f: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .title(" Lectures ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);

    if app.day.lectures.is_empty() {
        let text = match app.day.kind {
            DayKind::OutsideSemester => "Outside the semester",
            DayKind::Weekend => "Weekend",
            DayKind::Holiday => "Holiday (H to undo)",
            DayKind::Instructional => "No lectures scheduled",
        };
        let empty = Paragraph::new(text)
            .style(Style::default().fg(THEME.muted))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let rows: Vec<Row> = app
        .day
        .lectures
        .iter()
        .map(|lecture| {
            let (icon, style) = match lecture.status {
                LectureStatus::Present => ("✔", Style::default().fg(THEME.safe)),
                LectureStatus::Absent if lecture.marked => ("✖", Style::default().fg(THEME.critical)),
                LectureStatus::Absent => ("☐", Style::default().fg(THEME.muted)),
            };
            Row::new(vec![
                Span::styled(icon, style),
                Span::styled(
                    lecture.id.to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(lecture.status.to_string(), style),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),  // Status icon
            Constraint::Min(10),    // Lecture
            Constraint::Length(10), // Status
        ],
    )
    .header(Row::new(vec!["", "Lecture", "Status"]).style(Style::default().fg(THEME.short)))
    .block(block)
    .row_highlight_style(Style::default().bg(THEME.muted).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn gauge<'a>(title: &'a str, tally: &Tally, bunks_left: u32) -> Gauge<'a> {
    let label = format!(
        "{} ({}/{}) | {} bunks left",
        percentage_label(tally),
        tally.attended,
        tally.total,
        bunks_left
    );
    Gauge::default()
        .block(Block::default().title(title))
        .gauge_style(Style::default().fg(band_color(tally)).bg(Color::Black))
        .ratio(tally.ratio().unwrap_or(0.0))
        .label(label)
}

fn draw_stats(f: &mut Frame, app: &App, area: Rect) {
    let report = &app.report;
    let block = Block::default()
        .title(" Stats ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(THEME.muted));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Semester gauge
            Constraint::Length(2), // Month gauge
            Constraint::Length(1), // Spacer
            Constraint::Min(1),    // Subjects
        ])
        .split(inner);

    f.render_widget(
        gauge(" Semester ", &report.overall, report.semester_bunks_left),
        chunks[0],
    );
    f.render_widget(
        gauge(" This month ", &report.monthly, report.monthly_bunks_left),
        chunks[1],
    );

    let mut lines = Vec::new();
    if !report.started {
        lines.push(Line::from(Span::styled(
            "Semester not started yet",
            Style::default().fg(THEME.muted),
        )));
    }
    for subject in &report.subjects {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<width$} ", truncate(&subject.subject, SUBJECT_WIDTH), width = SUBJECT_WIDTH),
                Style::default().fg(THEME.text),
            ),
            Span::styled(
                format!("{:>6} ", percentage_label(&subject.tally)),
                Style::default().fg(band_color(&subject.tally)).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{}/{}", subject.tally.attended, subject.tally.total),
                Style::default().fg(THEME.muted),
            ),
            Span::raw(format!("  {} left", subject.bunks_left)),
        ]));
    }
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), chunks[3]);
}

fn draw_confirm(f: &mut Frame, app: &App, area: Rect) {
    let popup = centered(area, 44, 5);
    let text = vec![
        Line::from(format!(
            "Mark all {} lectures on {} absent?",
            app.day.lectures.len(),
            app.date.format("%a %m-%d")
        )),
        Line::from(""),
        Line::from(Span::styled("y: Yes   n: No", Style::default().fg(THEME.muted))),
    ];
    let dialog = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .title(" Leave ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(THEME.critical)),
    );
    f.render_widget(Clear, popup);
    f.render_widget(dialog, popup);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
