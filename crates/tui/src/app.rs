use std::{io, thread, time::Duration};

use anyhow::{Context, Result};
use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        BarChart, Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph, Wrap,
    },
    Frame, Terminal,
};
use tokio::{
    spawn,
    sync::mpsc,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, info};

use studytui_core::{
    clock, stats, AppConfig, CompletionOutcome, Currency, DayType, DaySummary, ProgressBook,
    RewardLedger, RewardPolicy, SpendAmount, StudySession, WeekHistory,
};

use crate::block_font;

const TICK_RATE: Duration = Duration::from_millis(250);
const SECOND: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
struct Theme {
    primary_fg: Color,
    accent: Color,
    accent_alt: Color,
    muted: Color,
    selection_bg: Color,
    success: Color,
    warning: Color,
    danger: Color,
    subject_cycle: [Color; 4],
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_fg: Color::White,
            accent: Color::Magenta,
            accent_alt: Color::Blue,
            muted: Color::DarkGray,
            selection_bg: Color::DarkGray,
            success: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
            subject_cycle: [Color::Red, Color::Blue, Color::Yellow, Color::Green],
        }
    }
}

impl Theme {
    fn subject_color(&self, index: usize) -> Color {
        self.subject_cycle[index % self.subject_cycle.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Home,
    Timer,
    Rewards,
    Stats,
}

impl Screen {
    /// Next screen in the navigation cycle. The timer screen is not
    /// part of the cycle; it is entered only by starting a session.
    fn next_tab(self) -> Screen {
        match self {
            Screen::Home => Screen::Rewards,
            Screen::Rewards => Screen::Stats,
            Screen::Stats => Screen::Home,
            Screen::Timer => Screen::Timer,
        }
    }
}

enum AppEvent {
    Input(Event),
    Tick,
    Second,
}

/// High-level application state for the study scheduler TUI.
pub struct StudyApp {
    day: DayType,
    session: StudySession,
    progress: ProgressBook,
    policy: RewardPolicy,
    ledger: RewardLedger,
    week: Vec<DaySummary>,
    screen: Screen,
    home_cursor: usize,
    status: String,
    should_quit: bool,
    theme: Theme,
}

impl StudyApp {
    pub fn new(config: AppConfig, history: Box<dyn WeekHistory>) -> Self {
        let progress = ProgressBook::new(config.subjects.clone(), config.pages_per_subject);
        let policy = RewardPolicy::from_settings(&config.rewards);
        Self {
            day: DayType::today(),
            session: StudySession::default(),
            progress,
            policy,
            ledger: RewardLedger::default(),
            week: history.days(),
            screen: Screen::Home,
            home_cursor: 0,
            status: "Pick a subject to start studying".to_string(),
            should_quit: false,
            theme: Theme::default(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        info!(
            day = ?self.day,
            subjects = self.progress.subjects().len(),
            "StudyTUI starting"
        );

        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx.clone());
        spawn_second_ticker(event_tx);

        loop {
            terminal.draw(|frame| self.draw(frame))?;
            if self.should_quit {
                break;
            }

            let maybe_event = event_rx.recv().await;
            if !self.process_app_event(maybe_event) {
                break;
            }

            if self.should_quit {
                break;
            }
        }

        restore_terminal(&mut terminal)?;
        Ok(())
    }

    fn process_app_event(&mut self, maybe_event: Option<AppEvent>) -> bool {
        match maybe_event {
            Some(AppEvent::Input(event)) => {
                if let Err(err) = self.handle_input(event) {
                    self.set_status(format!("Error: {err}"));
                }
                true
            }
            Some(AppEvent::Tick) => {
                // Input poll timed out; the loop redraws on its own.
                true
            }
            Some(AppEvent::Second) => {
                self.handle_second();
                true
            }
            None => false,
        }
    }

    /// One second of wall-clock time has passed.
    fn handle_second(&mut self) {
        self.session.tick();
        self.progress.tick();
    }

    fn handle_input(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Resize(_, _)
            | Event::Mouse(_)
            | Event::FocusGained
            | Event::FocusLost
            | Event::Paste(_) => Ok(()),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Ok(());
        }
        match self.screen {
            Screen::Home => self.handle_home_key(key),
            Screen::Timer => self.handle_timer_key(key),
            Screen::Rewards | Screen::Stats => self.handle_nav_screen_key(key),
        }
        Ok(())
    }

    fn handle_home_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_home_cursor(1);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_home_cursor(-1);
            }
            KeyCode::Enter => {
                self.start_study();
            }
            _ => {
                self.handle_nav_key(&key);
            }
        }
    }

    fn handle_timer_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => {
                self.toggle_pause();
            }
            KeyCode::Char('c') | KeyCode::Enter => {
                self.complete_current_page();
            }
            KeyCode::Char('s') => {
                self.switch_subject();
            }
            // Navigation is deliberately unavailable while studying.
            _ => {}
        }
    }

    fn handle_nav_screen_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('g') if self.screen == Screen::Rewards => {
                self.spend_reward(Currency::Game, SpendAmount::Ten);
            }
            KeyCode::Char('G') if self.screen == Screen::Rewards => {
                self.spend_reward(Currency::Game, SpendAmount::Thirty);
            }
            KeyCode::Char('v') if self.screen == Screen::Rewards => {
                self.spend_reward(Currency::Video, SpendAmount::Ten);
            }
            KeyCode::Char('V') if self.screen == Screen::Rewards => {
                self.spend_reward(Currency::Video, SpendAmount::Thirty);
            }
            _ => {
                self.handle_nav_key(&key);
            }
        }
    }

    /// Shared navigation keys for every screen except the timer.
    fn handle_nav_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('1') => {
                self.navigate(Screen::Home);
                true
            }
            KeyCode::Char('2') => {
                self.navigate(Screen::Rewards);
                true
            }
            KeyCode::Char('3') => {
                self.navigate(Screen::Stats);
                true
            }
            KeyCode::Tab => {
                self.navigate(self.screen.next_tab());
                true
            }
            _ => false,
        }
    }

    fn move_home_cursor(&mut self, delta: isize) {
        let total = self.progress.subjects().len();
        if total == 0 {
            return;
        }
        let current = self.home_cursor as isize;
        let next = (current + delta).rem_euclid(total as isize);
        self.home_cursor = next as usize;
    }

    fn navigate(&mut self, target: Screen) {
        if self.screen == target {
            return;
        }
        debug!(?target, "Navigating");
        self.screen = target;
        let status = match target {
            Screen::Home => "Pick a subject to start studying",
            Screen::Rewards => "g/G spend game time, v/V spend video time",
            Screen::Stats => "This week at a glance",
            Screen::Timer => return,
        };
        self.set_status(status.to_string());
    }

    fn start_study(&mut self) {
        let Some(subject) = self.progress.subjects().get(self.home_cursor).cloned() else {
            return;
        };
        if self.progress.is_complete(&subject) {
            self.set_status(format!("{subject} is already finished today"));
            return;
        }
        info!(subject = %subject, "Study session started");
        self.session.begin(subject.clone());
        self.screen = Screen::Timer;
        self.set_status(format!("Studying {subject}"));
    }

    fn toggle_pause(&mut self) {
        if self.session.is_active() {
            self.session.pause();
            info!("Session paused");
            self.set_status("Paused (space to resume)".to_string());
        } else {
            self.session.resume();
            info!("Session resumed");
            self.set_status("Back to it!".to_string());
        }
    }

    fn complete_current_page(&mut self) {
        let Some(subject) = self.session.subject().map(str::to_string) else {
            return;
        };
        let quota = self.progress.pages_per_subject();
        match self.progress.complete_page(&subject) {
            CompletionOutcome::Advanced { pages } => {
                self.set_status(format!("{subject}: {pages} / {quota} pages done"));
            }
            CompletionOutcome::SubjectComplete => {
                self.set_status(format!("{subject} finished! Great job"));
            }
            CompletionOutcome::AlreadyComplete => {
                self.set_status(format!("{subject} is already done for today"));
            }
        }
    }

    fn switch_subject(&mut self) {
        info!(
            elapsed = self.session.elapsed_seconds(),
            "Leaving session to switch subject"
        );
        self.session.end();
        self.screen = Screen::Home;
        self.set_status("Pick your next subject".to_string());
    }

    fn spend_reward(&mut self, currency: Currency, amount: SpendAmount) {
        let ceiling = self.ceiling_for(currency);
        let available = self.ledger.available(currency, ceiling);
        if !amount.can_spend(available) {
            self.set_status(format!("Not enough {} time left", currency.label()));
            return;
        }
        let granted = self.ledger.spend(currency, amount, ceiling);
        let left = self.ledger.available(currency, ceiling);
        self.set_status(format!(
            "Spent {} of {} time ({} left)",
            clock::format_minutes(granted),
            currency.label(),
            clock::format_minutes(left)
        ));
    }

    fn earned_minutes(&self) -> u32 {
        self.policy.earned_minutes(self.session.elapsed_seconds())
    }

    fn ceiling_for(&self, currency: Currency) -> u32 {
        match currency {
            Currency::Game => self.policy.game_ceiling(self.day, self.earned_minutes()),
            Currency::Video => self.policy.video_ceiling(),
        }
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status = message.into();
        debug!(status = %self.status, "Status updated");
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut Frame) {
        match self.screen {
            Screen::Home => self.draw_home(frame),
            Screen::Timer => self.draw_timer(frame),
            Screen::Rewards => self.draw_rewards(frame),
            Screen::Stats => self.draw_stats(frame),
        }
    }

    fn draw_home(&mut self, frame: &mut Frame) {
        let area = frame.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(4),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(area);

        let today = Local::now();
        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                today.format("%B %-d (%a)").to_string(),
                Style::default().fg(self.theme.muted),
            )),
            Line::from(Span::styled(
                self.day.label(),
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(header, chunks[0]);

        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(format!(
                "Today's Progress ({} / {} pages)",
                self.progress.total_pages(),
                self.progress.total_quota()
            )))
            .gauge_style(Style::default().fg(self.theme.success))
            .percent(u16::from(self.progress.percent()))
            .label(format!("{}% done", self.progress.percent()));
        frame.render_widget(gauge, chunks[1]);

        self.render_subject_list(frame, chunks[2]);

        let points = Paragraph::new(vec![
            Line::from(vec![
                Span::styled("Studied: ", Style::default().fg(self.theme.muted)),
                Span::styled(
                    clock::format_elapsed(self.session.elapsed_seconds()),
                    Style::default().fg(self.theme.primary_fg),
                ),
            ]),
            Line::from(vec![
                Span::styled("Game time earned: ", Style::default().fg(self.theme.muted)),
                Span::styled(
                    clock::format_minutes(self.earned_minutes()),
                    Style::default().fg(self.theme.success),
                ),
            ]),
        ])
        .block(Block::default().borders(Borders::ALL).title("My Points"));
        frame.render_widget(points, chunks[3]);

        self.render_nav(frame, chunks[4]);
        self.render_status(frame, chunks[5]);
    }

    fn render_subject_list(&mut self, frame: &mut Frame, area: Rect) {
        let quota = self.progress.pages_per_subject();
        let items: Vec<ListItem> = self
            .progress
            .subjects()
            .iter()
            .enumerate()
            .map(|(idx, subject)| {
                let pages = self.progress.pages(subject);
                let complete = self.progress.is_complete(subject);
                let marker = if idx == self.home_cursor {
                    Span::styled(
                        "▶ ",
                        Style::default()
                            .fg(self.theme.accent)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::raw("  ")
                };
                let name = if complete {
                    Span::styled(
                        format!("✔ {subject}"),
                        Style::default().fg(self.theme.muted),
                    )
                } else {
                    Span::styled(
                        subject.clone(),
                        Style::default()
                            .fg(self.theme.subject_color(idx))
                            .add_modifier(Modifier::BOLD),
                    )
                };
                let count = Span::styled(
                    format!("  {pages} / {quota} pages"),
                    Style::default().fg(self.theme.muted),
                );
                ListItem::new(Line::from(vec![marker, name, count]))
            })
            .collect();

        let mut list_state = ListState::default();
        if !self.progress.subjects().is_empty() {
            list_state.select(Some(self.home_cursor));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .title("Pick a Subject (Enter to start)");
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(self.theme.selection_bg));
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn draw_timer(&mut self, frame: &mut Frame) {
        let area = frame.size();
        let banner_lines = block_font::render(&clock::clock_face(self.session.elapsed_seconds()));
        let banner_height = banner_lines.len() as u16 + 2;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(banner_height.min(area.height)),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(area);

        let subject = self.session.subject().unwrap_or("?").to_string();
        let mut header_spans = vec![
            Span::styled("Now studying: ", Style::default().fg(self.theme.muted)),
            Span::styled(
                subject.clone(),
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
        ];
        if !self.session.is_active() {
            header_spans.push(Span::styled(
                "  (paused)",
                Style::default().fg(self.theme.warning),
            ));
        }
        let header = Paragraph::new(Line::from(header_spans)).alignment(Alignment::Center);
        frame.render_widget(header, chunks[0]);

        let banner_color = if self.session.is_active() {
            self.theme.primary_fg
        } else {
            self.theme.muted
        };
        let banner_content: Vec<Line> = banner_lines
            .into_iter()
            .map(|line| {
                Line::from(Span::styled(
                    line,
                    Style::default()
                        .fg(banner_color)
                        .add_modifier(Modifier::BOLD),
                ))
            })
            .collect();
        let banner = Paragraph::new(banner_content).alignment(Alignment::Center);
        frame.render_widget(banner, chunks[1]);

        self.render_page_row(frame, chunks[2], &subject);

        let help = Paragraph::new(Line::from(Span::styled(
            "Space pause/resume   c check off a page   s switch subject   q quit",
            Style::default().fg(self.theme.muted),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(help, chunks[3]);

        self.render_status(frame, chunks[5]);

        if self.progress.celebration().is_some() {
            self.render_celebration(frame, area);
        }
    }

    fn render_page_row(&self, frame: &mut Frame, area: Rect, subject: &str) {
        let completed = self.progress.pages(subject);
        let quota = self.progress.pages_per_subject();
        let mut spans = Vec::new();
        for page in 1..=quota {
            let span = if page <= completed {
                Span::styled(" ✔ ", Style::default().fg(self.theme.success))
            } else if page == completed + 1 {
                Span::styled(
                    format!(" {page} "),
                    Style::default()
                        .fg(self.theme.accent)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(format!(" {page} "), Style::default().fg(self.theme.muted))
            };
            spans.push(span);
        }
        let row = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Pages"));
        frame.render_widget(row, area);
    }

    fn render_celebration(&self, frame: &mut Frame, area: Rect) {
        let Some(celebration) = self.progress.celebration() else {
            return;
        };
        let width = 40.min(area.width.saturating_sub(4)).max(20);
        let height = 5;
        let modal = centered_rect(width, height, area);
        frame.render_widget(Clear, modal);
        let paragraph = Paragraph::new(vec![
            Line::from(Span::styled(
                format!("★ {} finished! ★", celebration.subject),
                Style::default()
                    .fg(self.theme.warning)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Great job!",
                Style::default().fg(self.theme.primary_fg),
            )),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, modal);
    }

    fn draw_rewards(&mut self, frame: &mut Frame) {
        let area = frame.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6),
                Constraint::Length(6),
                Constraint::Length(6),
                Constraint::Min(0),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(area);

        self.render_reward_panel(frame, chunks[0], Currency::Game);
        self.render_reward_panel(frame, chunks[1], Currency::Video);

        let record = Paragraph::new(vec![
            Line::from(format!(
                "Studied: {}",
                clock::format_elapsed(self.session.elapsed_seconds())
            )),
            Line::from(format!("Pages finished: {}", self.progress.total_pages())),
            Line::from(format!(
                "Game used: {}   Video used: {}",
                clock::format_minutes(self.ledger.used(Currency::Game)),
                clock::format_minutes(self.ledger.used(Currency::Video))
            )),
        ])
        .block(Block::default().borders(Borders::ALL).title("Today's Record"));
        frame.render_widget(record, chunks[2]);

        self.render_nav(frame, chunks[4]);
        self.render_status(frame, chunks[5]);
    }

    fn render_reward_panel(&self, frame: &mut Frame, area: Rect, currency: Currency) {
        let ceiling = self.ceiling_for(currency);
        let available = self.ledger.available(currency, ceiling);
        let (title, color, keys) = match currency {
            Currency::Game => ("Game Time", self.theme.success, ("g", "G")),
            Currency::Video => ("Video Time", self.theme.danger, ("v", "V")),
        };

        let block = Block::default().borders(Borders::ALL).title(title);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height < 3 {
            return;
        }
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(inner);

        let ratio = if ceiling > 0 {
            f64::from(available) / f64::from(ceiling)
        } else {
            0.0
        };
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(color))
            .ratio(ratio)
            .label(format!("{} left", clock::format_minutes(available)));
        frame.render_widget(gauge, rows[0]);

        let caption = match currency {
            Currency::Game => {
                if self.day.is_weekend() {
                    format!("Weekend cap: {}", clock::format_minutes(ceiling))
                } else {
                    format!(
                        "{}% of study time ({} earned)",
                        self.policy.earn_percent(),
                        clock::format_minutes(self.earned_minutes())
                    )
                }
            }
            Currency::Video => format!("Daily cap: {}", clock::format_minutes(ceiling)),
        };
        let caption = Paragraph::new(Line::from(Span::styled(
            caption,
            Style::default().fg(self.theme.muted),
        )));
        frame.render_widget(caption, rows[1]);

        let hint_style = |enabled: bool| {
            if enabled {
                Style::default().fg(self.theme.primary_fg)
            } else {
                Style::default().fg(self.theme.muted)
            }
        };
        let hints = Paragraph::new(Line::from(vec![
            Span::styled(
                format!("{} spend 10m", keys.0),
                hint_style(SpendAmount::Ten.can_spend(available)),
            ),
            Span::raw("   "),
            Span::styled(
                format!("{} spend 30m", keys.1),
                hint_style(SpendAmount::Thirty.can_spend(available)),
            ),
        ]));
        frame.render_widget(hints, rows[2]);
    }

    fn draw_stats(&mut self, frame: &mut Frame) {
        let area = frame.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(8),
                Constraint::Min(7),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(area);

        let study_data: Vec<(&str, u64)> = self
            .week
            .iter()
            .map(|day| (day.label.as_str(), u64::from(day.study_minutes)))
            .collect();
        let study_chart = BarChart::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Study Minutes"),
            )
            .data(&study_data)
            .bar_width(5)
            .bar_gap(2)
            .bar_style(Style::default().fg(self.theme.accent_alt))
            .value_style(
                Style::default()
                    .fg(self.theme.primary_fg)
                    .bg(self.theme.accent_alt),
            )
            .max(u64::from(stats::max_study_minutes(&self.week)));
        frame.render_widget(study_chart, chunks[0]);

        let page_data: Vec<(&str, u64)> = self
            .week
            .iter()
            .map(|day| (day.label.as_str(), u64::from(day.pages)))
            .collect();
        let page_chart = BarChart::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Pages Finished"),
            )
            .data(&page_data)
            .bar_width(5)
            .bar_gap(2)
            .bar_style(Style::default().fg(self.theme.success))
            .value_style(
                Style::default()
                    .fg(self.theme.primary_fg)
                    .bg(self.theme.success),
            );
        frame.render_widget(page_chart, chunks[1]);

        let totals = stats::week_totals(&self.week);
        let summary = Paragraph::new(Line::from(vec![
            Span::styled(
                format!("{}h studied", totals.hours),
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled(
                format!("{} pages", totals.pages),
                Style::default().fg(self.theme.primary_fg),
            ),
            Span::raw("   "),
            Span::styled(
                format!("{} goal days", totals.goal_days),
                Style::default().fg(self.theme.success),
            ),
        ]))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("This Week"));
        frame.render_widget(summary, chunks[2]);

        self.render_nav(frame, chunks[3]);
        self.render_status(frame, chunks[4]);
    }

    fn render_nav(&self, frame: &mut Frame, area: Rect) {
        let entries = [
            ("1", "Home", Screen::Home),
            ("2", "Rewards", Screen::Rewards),
            ("3", "Stats", Screen::Stats),
        ];
        let mut spans = Vec::new();
        for (key, label, screen) in entries {
            let style = if self.screen == screen {
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.muted)
            };
            spans.push(Span::styled(format!("[{key}] {label}"), style));
            spans.push(Span::raw("   "));
        }
        spans.push(Span::styled(
            "(Tab to cycle, q to quit)",
            Style::default().fg(self.theme.muted),
        ));
        let nav = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(nav, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(Line::from(self.status.clone()))
            .block(Block::default().borders(Borders::ALL).title("Status"))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_thread(sender: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        match event::poll(TICK_RATE) {
            Ok(true) => match event::read() {
                Ok(evt) => {
                    if sender.blocking_send(AppEvent::Input(evt)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            },
            Ok(false) => {
                if sender.blocking_send(AppEvent::Tick).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}

fn spawn_second_ticker(sender: mpsc::Sender<AppEvent>) {
    spawn(async move {
        let mut interval = time::interval(SECOND);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick resolves immediately; skip it.
        interval.tick().await;
        loop {
            interval.tick().await;
            if sender.send(AppEvent::Second).await.is_err() {
                break;
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use studytui_core::stats::SampleWeek;

    fn app() -> StudyApp {
        let mut app = StudyApp::new(AppConfig::default(), Box::new(SampleWeek));
        app.day = DayType::Weekday;
        app
    }

    fn key(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE)
    }

    #[test]
    fn selecting_a_subject_starts_the_timer() {
        let mut app = app();
        app.start_study();
        assert_eq!(app.screen, Screen::Timer);
        assert!(app.session.is_active());
        assert_eq!(app.session.subject(), Some("Korean"));
    }

    #[test]
    fn completed_subject_cannot_be_reselected() {
        let mut app = app();
        for _ in 0..6 {
            app.progress.complete_page("Korean");
        }
        app.start_study();
        assert_eq!(app.screen, Screen::Home);
        assert!(!app.session.is_active());
        assert_eq!(app.session.subject(), None);
    }

    #[test]
    fn navigation_is_suppressed_while_studying() -> Result<()> {
        let mut app = app();
        app.start_study();
        app.handle_key(key('2'))?;
        app.handle_key(key('3'))?;
        app.handle_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE))?;
        assert_eq!(app.screen, Screen::Timer);
        Ok(())
    }

    #[test]
    fn switching_subject_returns_home_and_keeps_time() -> Result<()> {
        let mut app = app();
        app.start_study();
        for _ in 0..90 {
            app.handle_second();
        }
        app.handle_key(key('s'))?;
        assert_eq!(app.screen, Screen::Home);
        assert_eq!(app.session.subject(), None);
        assert_eq!(app.session.elapsed_seconds(), 90);
        Ok(())
    }

    #[test]
    fn pause_toggle_stays_on_the_timer_screen() -> Result<()> {
        let mut app = app();
        app.start_study();
        app.handle_key(key(' '))?;
        assert_eq!(app.screen, Screen::Timer);
        assert!(!app.session.is_active());
        app.handle_second();
        assert_eq!(app.session.elapsed_seconds(), 0);
        app.handle_key(key(' '))?;
        assert!(app.session.is_active());
        Ok(())
    }

    #[test]
    fn weekday_spend_clamps_to_earned_minutes() {
        let mut app = app();
        app.start_study();
        // Ten studied minutes earn three game minutes.
        for _ in 0..600 {
            app.handle_second();
        }
        assert_eq!(app.earned_minutes(), 3);
        app.spend_reward(Currency::Game, SpendAmount::Ten);
        assert_eq!(app.ledger.used(Currency::Game), 3);
        let ceiling = app.ceiling_for(Currency::Game);
        assert_eq!(app.ledger.available(Currency::Game, ceiling), 0);
    }

    #[test]
    fn celebration_window_closes_after_two_seconds() -> Result<()> {
        let mut app = app();
        app.start_study();
        for _ in 0..6 {
            app.handle_key(key('c'))?;
        }
        assert!(app.progress.celebration().is_some());
        app.handle_second();
        app.handle_second();
        assert!(app.progress.celebration().is_none());
        Ok(())
    }

    #[test]
    fn tab_cycles_the_nav_screens() -> Result<()> {
        let mut app = app();
        let tab = KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE);
        app.handle_key(tab)?;
        assert_eq!(app.screen, Screen::Rewards);
        app.handle_key(tab)?;
        assert_eq!(app.screen, Screen::Stats);
        app.handle_key(tab)?;
        assert_eq!(app.screen, Screen::Home);
        Ok(())
    }
}
