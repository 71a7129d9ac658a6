use crate::calc::{
    calculate_work_days, format_time_remaining, generate_contribution_data, week_columns,
    ContributionLevel, ContributionRecord, ProgressBand, ScheduleConfig, TimeLeft, WorkDaySummary,
};
use crate::calc::workday::DAY_NAMES;
use crate::data::{Countdown, WidgetKind};
use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use crossterm::event::{self, Event as CEvent, KeyCode, KeyModifiers};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table},
    Frame, Terminal,
};
use std::io::Stdout;
use std::time::{Duration as StdDuration, Instant};

const SECTION_BG: Color = Color::Rgb(40, 44, 52);
const TICK: StdDuration = StdDuration::from_secs(1);

/// A countdown with its schedule decoded once, so redraws never re-parse the
/// stored strings.
pub struct CountdownView {
    pub countdown: Countdown,
    pub schedule: ScheduleConfig,
    pub widgets: Vec<WidgetKind>,
    pub records: Vec<ContributionRecord>,
}

impl CountdownView {
    pub fn new(countdown: Countdown) -> Self {
        let schedule = countdown.schedule();
        let widgets = countdown.enabled_widgets();
        let records =
            generate_contribution_data(countdown.start_date(), countdown.target_date, &schedule);
        CountdownView {
            countdown,
            schedule,
            widgets,
            records,
        }
    }

    fn summary(&self, now: NaiveDateTime) -> WorkDaySummary {
        calculate_work_days(
            self.countdown.start_date(),
            self.countdown.target_date,
            &self.schedule,
            now,
        )
    }
}

pub struct App {
    views: Vec<CountdownView>,
    selected: usize,
    now: NaiveDateTime,
    summary: Option<WorkDaySummary>,
}

impl App {
    pub fn new(countdowns: Vec<Countdown>, now: NaiveDateTime) -> Self {
        let views = countdowns.into_iter().map(CountdownView::new).collect();
        let mut app = App {
            views,
            selected: 0,
            now,
            summary: None,
        };
        app.update_summary();
        app
    }

    fn update_summary(&mut self) {
        self.summary = self.current().map(|v| v.summary(self.now));
    }

    fn current(&self) -> Option<&CountdownView> {
        self.views.get(self.selected)
    }

    pub fn tick(&mut self, now: NaiveDateTime) {
        self.now = now;
        self.update_summary();
    }

    fn select_next(&mut self) {
        if !self.views.is_empty() {
            self.selected = (self.selected + 1) % self.views.len();
            self.update_summary();
        }
    }

    fn select_prev(&mut self) {
        if !self.views.is_empty() {
            self.selected = (self.selected + self.views.len() - 1) % self.views.len();
            self.update_summary();
        }
    }

    /// Returns true when the app should quit.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => true,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => true,
            KeyCode::Char('n') | KeyCode::Right | KeyCode::Tab => {
                self.select_next();
                false
            }
            KeyCode::Char('p') | KeyCode::Left | KeyCode::BackTab => {
                self.select_prev();
                false
            }
            _ => false,
        }
    }

    pub fn render(&self, f: &mut Frame) {
        let size = f.area();
        let (view, summary) = match (self.current(), &self.summary) {
            (Some(v), Some(s)) => (v, s),
            _ => {
                let p = Paragraph::new(vec![
                    Line::from("No active countdowns."),
                    Line::from("Create one with `countdown create <name> --target YYYY-MM-DD`."),
                    Line::from(""),
                    Line::from("q: quit"),
                ])
                .block(Block::default().borders(Borders::ALL).title(" Countdown "));
                f.render_widget(p, size);
                return;
            }
        };

        let mut constraints = vec![Constraint::Length(3)];
        constraints.extend(view.widgets.iter().map(|w| widget_height(*w)));
        constraints.push(Constraint::Min(0));
        constraints.push(Constraint::Length(1));
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(size);

        self.render_header(f, chunks[0], view);
        if view.widgets.is_empty() {
            let p = Paragraph::new("No widgets enabled for this countdown.");
            f.render_widget(p, chunks[1]);
        }
        for (i, widget) in view.widgets.iter().enumerate() {
            let area = chunks[i + 1];
            match widget {
                WidgetKind::Timer => self.render_timer(f, area, view),
                WidgetKind::Progress => render_progress(f, area, summary),
                WidgetKind::Contribution => render_contribution(f, area, view, self.now),
                WidgetKind::Stats => render_stats(f, area, view, summary),
            }
        }

        let help = Paragraph::new(Line::from(vec![
            Span::styled("n/p", Style::default().fg(Color::Cyan)),
            Span::raw(" switch countdown  "),
            Span::styled("q", Style::default().fg(Color::Cyan)),
            Span::raw(" quit"),
        ]));
        f.render_widget(help, chunks[chunks.len() - 1]);
    }

    fn render_header(&self, f: &mut Frame, area: Rect, view: &CountdownView) {
        let c = &view.countdown;
        let mut spans = vec![Span::styled(
            c.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        if let Some(description) = &c.description {
            spans.push(Span::raw(format!("  {}", description)));
        }
        let title = format!(
            " {}/{}  Target: {} ",
            self.selected + 1,
            self.views.len(),
            c.target_date.format("%B %-d, %Y")
        );
        let p = Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(p, area);
    }

    fn render_timer(&self, f: &mut Frame, area: Rect, view: &CountdownView) {
        let left = TimeLeft::until(view.countdown.target_date, self.now);
        let lines = if left.is_expired() {
            vec![Line::from(Span::styled(
                crate::calc::duration::TARGET_REACHED,
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ))]
        } else {
            vec![
                Line::from(Span::styled(
                    format!(
                        "{} days  {:02}h {:02}m {:02}s",
                        left.days, left.hours, left.minutes, left.seconds
                    ),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                )),
                Line::from(format!(
                    "until {}",
                    view.countdown.target_date.format("%A, %B %-d, %Y")
                )),
            ]
        };
        let p = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", WidgetKind::Timer.name())),
        );
        f.render_widget(p, area);
    }
}

fn widget_height(widget: WidgetKind) -> Constraint {
    match widget {
        WidgetKind::Timer => Constraint::Length(4),
        WidgetKind::Progress => Constraint::Length(7),
        // seven weekday rows, legend, borders
        WidgetKind::Contribution => Constraint::Length(10),
        WidgetKind::Stats => Constraint::Length(9),
    }
}

pub(crate) fn band_color(band: ProgressBand) -> Color {
    match band {
        ProgressBand::High => Color::Green,
        ProgressBand::Mid => Color::Yellow,
        ProgressBand::Low => Color::Blue,
    }
}

pub(crate) fn level_style(level: Option<ContributionLevel>) -> (&'static str, Style) {
    match level {
        Some(ContributionLevel::WorkDay) => ("■ ", Style::default().fg(Color::Green)),
        Some(ContributionLevel::Holiday) => ("■ ", Style::default().fg(Color::Red)),
        Some(ContributionLevel::Pto) => ("■ ", Style::default().fg(Color::Blue)),
        Some(ContributionLevel::NoWork) => ("■ ", Style::default().fg(Color::DarkGray)),
        None => ("  ", Style::default()),
    }
}

fn render_progress(f: &mut Frame, area: Rect, summary: &WorkDaySummary) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", WidgetKind::Progress.name()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(band_color(summary.band())))
        .ratio(summary.fill_ratio())
        .label(format!("{:.1}%", summary.percentage_complete));
    f.render_widget(gauge, chunks[0]);

    let lines = vec![
        Line::from(format!(
            "Total Days: {}   Remaining: {}",
            summary.total_days, summary.remaining_work_days
        )),
        Line::from(format!("Days until target:   {}", summary.days_until_target)),
        Line::from(format!("Weeks until target:  {}", summary.weeks_until_target)),
        Line::from(format!("Months until target: {}", summary.months_until_target)),
    ];
    f.render_widget(Paragraph::new(lines), chunks[1]);
}

fn render_contribution(f: &mut Frame, area: Rect, view: &CountdownView, now: NaiveDateTime) {
    let columns = week_columns(&view.records);
    let mut block = Block::default().borders(Borders::ALL).title(format!(
        " {}: {} weeks ",
        WidgetKind::Contribution.name(),
        columns.len()
    ));
    let today = now.date().format("%Y-%m-%d").to_string();
    if let Some(record) = view.records.iter().find(|r| r.date == today) {
        block = block.title_bottom(format!(" Today: {} ", record.tooltip()));
    }

    let mut lines: Vec<Line> = DAY_NAMES
        .iter()
        .enumerate()
        .map(|(row, day)| {
            let mut spans = vec![Span::raw(format!("{:<4}", &day[..3]))];
            spans.extend(columns.iter().map(|col| {
                let (symbol, style) = level_style(col[row]);
                Span::styled(symbol, style)
            }));
            Line::from(spans)
        })
        .collect();

    let mut legend = vec![Span::raw("    ")];
    for level in ContributionLevel::ALL {
        let (symbol, style) = level_style(Some(level));
        legend.push(Span::styled(symbol, style));
        legend.push(Span::raw(format!("{}  ", level.label())));
    }
    lines.push(Line::from(legend));

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_stats(f: &mut Frame, area: Rect, view: &CountdownView, summary: &WorkDaySummary) {
    let remaining_color = if summary.remaining_work_days < 0 {
        Color::Red
    } else {
        Color::Green
    };
    let rows = vec![
        data_row("Work Days", plain(summary.work_days.to_string())),
        data_row("Holidays", plain(summary.holidays.to_string())),
        data_row(
            "Floating Holidays",
            plain(format!(
                "{} of {}",
                summary.floating_holidays, view.countdown.floating_holidays
            )),
        ),
        data_row(
            "PTO Days",
            plain(format!("{} ({} allowed)", summary.pto_days, view.countdown.pto_days)),
        ),
        data_row(
            "Remaining Work Days",
            colored(summary.remaining_work_days.to_string(), remaining_color),
        ),
        Row::new(vec![
            Cell::from(format!("  {}", format_time_remaining(summary.days_until_target)))
                .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            Cell::from(""),
        ])
        .style(Style::default().bg(SECTION_BG)),
    ];
    let table = Table::new(rows, [Constraint::Length(26), Constraint::Min(10)]).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", WidgetKind::Stats.name())),
    );
    f.render_widget(table, area);
}

fn data_row(metric: &str, value: Cell<'static>) -> Row<'static> {
    Row::new(vec![Cell::from(format!("  {}", metric)), value])
}

fn plain(s: impl Into<String>) -> Cell<'static> {
    Cell::from(s.into())
}

fn colored(s: impl Into<String>, color: Color) -> Cell<'static> {
    Cell::from(s.into()).style(Style::default().fg(color))
}

/// Draws until the user quits. With `live` the clock is re-read every
/// second; otherwise the time given to `App::new` stays fixed.
pub fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    live: bool,
) -> Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| app.render(f))?;
        if event::poll(StdDuration::from_millis(16))? {
            if let CEvent::Key(key) = event::read()? {
                if app.handle_key(key.code, key.modifiers) {
                    break;
                }
            }
        }
        if live && last_tick.elapsed() >= TICK {
            app.tick(Local::now().naive_local());
            last_tick = Instant::now();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CountdownData, NewCountdown};
    use chrono::NaiveDate;
    use ratatui::backend::TestBackend;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn at(y: i32, m: u32, day: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        d(y, m, day).and_hms_opt(h, min, s).unwrap()
    }

    fn make_countdowns(widgets: Vec<WidgetKind>) -> Vec<Countdown> {
        let mut data = CountdownData::default();
        let mut first = NewCountdown::new("Launch", d(2024, 1, 10));
        first.enabled_widgets = widgets.clone();
        first.floating_holidays = 2;
        data.create("me", first, at(2024, 1, 1, 0, 0, 0)).unwrap();
        let mut second = NewCountdown::new("Retreat", d(2024, 3, 1));
        second.enabled_widgets = widgets;
        data.create("me", second, at(2023, 12, 1, 0, 0, 0)).unwrap();
        data.countdowns
    }

    fn draw(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_navigation_wraps() {
        let mut app = App::new(make_countdowns(WidgetKind::ALL.to_vec()), at(2024, 1, 1, 8, 0, 0));
        assert_eq!(app.current().unwrap().countdown.name, "Launch");
        assert!(!app.handle_key(KeyCode::Char('n'), KeyModifiers::NONE));
        assert_eq!(app.current().unwrap().countdown.name, "Retreat");
        app.handle_key(KeyCode::Char('n'), KeyModifiers::NONE);
        assert_eq!(app.current().unwrap().countdown.name, "Launch");
        app.handle_key(KeyCode::Char('p'), KeyModifiers::NONE);
        assert_eq!(app.current().unwrap().countdown.name, "Retreat");
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new(Vec::new(), at(2024, 1, 1, 0, 0, 0));
        assert!(app.handle_key(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(app.handle_key(KeyCode::Esc, KeyModifiers::NONE));
        assert!(app.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.handle_key(KeyCode::Char('c'), KeyModifiers::NONE));
    }

    #[test]
    fn test_switching_recomputes_summary() {
        let mut app = App::new(make_countdowns(WidgetKind::ALL.to_vec()), at(2024, 1, 1, 8, 0, 0));
        assert_eq!(app.summary.as_ref().unwrap().floating_holidays, 2);
        app.handle_key(KeyCode::Char('n'), KeyModifiers::NONE);
        assert_eq!(app.summary.as_ref().unwrap().floating_holidays, 0);
    }

    #[test]
    fn test_tick_advances_clock() {
        let mut app = App::new(make_countdowns(WidgetKind::ALL.to_vec()), at(2024, 1, 1, 8, 0, 0));
        assert_eq!(app.summary.as_ref().unwrap().days_until_target, 9);
        app.tick(at(2024, 1, 9, 8, 0, 0));
        assert_eq!(app.summary.as_ref().unwrap().days_until_target, 1);
    }

    #[test]
    fn test_render_empty_state() {
        let app = App::new(Vec::new(), at(2024, 1, 1, 0, 0, 0));
        let screen = draw(&app, 80, 10);
        assert!(screen.contains("No active countdowns."));
    }

    #[test]
    fn test_render_all_widgets() {
        let app = App::new(make_countdowns(WidgetKind::ALL.to_vec()), at(2024, 1, 1, 8, 0, 0));
        let screen = draw(&app, 100, 40);
        assert!(screen.contains("Launch"));
        assert!(screen.contains("1/2"));
        assert!(screen.contains("8 days  16h 00m 00s"));
        assert!(screen.contains("33.3%"));
        assert!(screen.contains("Work Schedule Grid: 2 weeks"));
        assert!(screen.contains("Today: Jan 1, 2024: Work day"));
        assert!(screen.contains("Floating Holidays"));
        assert!(screen.contains("1 week, 2 days"));
    }

    #[test]
    fn test_render_only_enabled_widgets() {
        let app = App::new(make_countdowns(vec![WidgetKind::Stats]), at(2024, 1, 1, 8, 0, 0));
        let screen = draw(&app, 100, 40);
        assert!(screen.contains("Quick Stats"));
        assert!(!screen.contains("Countdown Timer"));
        assert!(!screen.contains("Progress Indicator"));
        assert!(!screen.contains("Work Schedule Grid"));
    }

    #[test]
    fn test_render_timer_reached() {
        let app = App::new(make_countdowns(vec![WidgetKind::Timer]), at(2024, 2, 1, 0, 0, 0));
        let screen = draw(&app, 100, 20);
        assert!(screen.contains("Target date reached!"));
    }

    #[test]
    fn test_band_colors() {
        assert_eq!(band_color(ProgressBand::High), Color::Green);
        assert_eq!(band_color(ProgressBand::Mid), Color::Yellow);
        assert_eq!(band_color(ProgressBand::Low), Color::Blue);
    }
}
