use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use comparador::comparison::{Comparison, OriginProfile, origin_line};
use comparador::config::AppConfig;
use comparador::demo_feed;
use comparador::export::{self, ExportFormat};
use comparador::model::{CardColor, Club, GoalOriginStats, Venue};
use comparador::persist;
use comparador::roster::initial_clubs;
use comparador::state::{Action, AppState, FormField, GoalForm, Screen, apply_action};

struct App {
    state: AppState,
    config: AppConfig,
    should_quit: bool,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let mut logs = Vec::new();
        let clubs = match config.data_file.as_deref() {
            Some(path) => match persist::read_snapshot(path) {
                Ok(Some(clubs)) => {
                    logs.push(format!(
                        "[INFO] Loaded {} clubs from {}",
                        clubs.len(),
                        path.display()
                    ));
                    clubs
                }
                Ok(None) => seed_clubs(&config, &mut logs),
                Err(err) => {
                    logs.push(format!("[WARN] Snapshot unreadable: {err:#}"));
                    match persist::back_up_snapshot(path) {
                        Ok(backup) => logs.push(format!(
                            "[INFO] Unreadable snapshot kept at {}",
                            backup.display()
                        )),
                        Err(err) => logs.push(format!("[WARN] Backup failed: {err:#}")),
                    }
                    seed_clubs(&config, &mut logs)
                }
            },
            None => {
                logs.push("[WARN] No data directory; changes will not be saved".to_string());
                seed_clubs(&config, &mut logs)
            }
        };

        let mut state = AppState::new(clubs);
        state.max_logs = config.max_logs;
        for line in logs {
            apply_action(&mut state, Action::Log(line));
        }
        Self {
            state,
            config,
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.goal_form.is_some() {
            self.on_goal_form_key(key);
        } else if self.state.rename.is_some() {
            self.on_rename_key(key);
        } else if self.state.confirm_reset {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('s') => self.reset(),
                _ => apply_action(&mut self.state, Action::CancelReset),
            }
        } else {
            self.on_main_key(key);
        }
        self.persist_if_dirty();
    }

    fn on_main_key(&mut self, key: KeyEvent) {
        let action = match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('j') | KeyCode::Down => Action::SelectNext,
            KeyCode::Char('k') | KeyCode::Up => Action::SelectPrev,
            KeyCode::Tab | KeyCode::Char('g') => Action::SwitchGroup,
            KeyCode::Char(' ') | KeyCode::Enter => Action::ToggleCompare,
            KeyCode::Char('c') => Action::ShowComparison,
            KeyCode::Char('b') | KeyCode::Esc => Action::Back,
            KeyCode::Char('a') => Action::OpenGoalForm,
            KeyCode::Char('n') => Action::StartRename,
            KeyCode::Char('y') => cards(CardColor::Yellow, Venue::Home, 1),
            KeyCode::Char('Y') => cards(CardColor::Yellow, Venue::Home, -1),
            KeyCode::Char('u') => cards(CardColor::Yellow, Venue::Away, 1),
            KeyCode::Char('U') => cards(CardColor::Yellow, Venue::Away, -1),
            KeyCode::Char('r') => cards(CardColor::Red, Venue::Home, 1),
            KeyCode::Char('R') => cards(CardColor::Red, Venue::Home, -1),
            KeyCode::Char('t') => cards(CardColor::Red, Venue::Away, 1),
            KeyCode::Char('T') => cards(CardColor::Red, Venue::Away, -1),
            KeyCode::Char('e') => return self.export(ExportFormat::Json),
            KeyCode::Char('v') => return self.export(ExportFormat::Csv),
            KeyCode::Char('x') => return self.export(ExportFormat::Xlsx),
            KeyCode::Char('i') => return self.import(),
            KeyCode::Char('Z') => Action::RequestReset,
            KeyCode::Char('?') => Action::ToggleHelp,
            _ => return,
        };
        apply_action(&mut self.state, action);
    }

    fn on_goal_form_key(&mut self, key: KeyEvent) {
        let action = match key.code {
            KeyCode::Esc => Action::Back,
            KeyCode::Enter => Action::SaveGoal,
            KeyCode::Tab | KeyCode::Down => Action::FormNextField,
            KeyCode::BackTab | KeyCode::Up => Action::FormPrevField,
            KeyCode::Right | KeyCode::Char('l') => Action::FormIncrease,
            KeyCode::Left | KeyCode::Char('h') => Action::FormDecrease,
            KeyCode::Char(ch) if ch.is_ascii_digit() => Action::FormDigit(ch as u8 - b'0'),
            _ => return,
        };
        apply_action(&mut self.state, action);
    }

    fn on_rename_key(&mut self, key: KeyEvent) {
        let action = match key.code {
            KeyCode::Esc => Action::Back,
            KeyCode::Enter => Action::CommitRename,
            KeyCode::Backspace => Action::RenameBackspace,
            KeyCode::Char(ch) => Action::RenameInput(ch),
            _ => return,
        };
        apply_action(&mut self.state, action);
    }

    fn log(&mut self, line: String) {
        apply_action(&mut self.state, Action::Log(line));
    }

    fn persist_if_dirty(&mut self) {
        if !self.state.dirty {
            return;
        }
        self.state.dirty = false;
        let Some(path) = self.config.data_file.clone() else {
            return;
        };
        if let Err(err) = persist::save_clubs(&path, &self.state.clubs) {
            self.log(format!("[WARN] Save failed: {err:#}"));
        }
    }

    fn export(&mut self, format: ExportFormat) {
        match export::export(&self.config.export_dir, &self.state.clubs, format) {
            Ok(path) => self.log(format!(
                "[INFO] Dados exportados em formato {}: {}",
                format.extension().to_uppercase(),
                path.display()
            )),
            Err(err) => self.log(format!("[WARN] Export failed: {err:#}")),
        }
    }

    fn import(&mut self) {
        let path = self.import_path();
        match export::import_json(&path) {
            Ok(clubs) => {
                let note = format!("[INFO] Imported {} clubs from {}", clubs.len(), path.display());
                apply_action(&mut self.state, Action::ReplaceClubs { clubs, note });
            }
            Err(err) => self.log(format!("[WARN] Import failed: {err:#}")),
        }
    }

    fn import_path(&self) -> PathBuf {
        std::env::var("COMPARADOR_IMPORT_FILE")
            .ok()
            .filter(|val| !val.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| self.config.export_dir.join("import.json"))
    }

    fn reset(&mut self) {
        match persist::reset_all_data(self.config.data_file.as_deref()) {
            Ok(clubs) => apply_action(
                &mut self.state,
                Action::ReplaceClubs {
                    clubs,
                    note: "[INFO] Dados resetados".to_string(),
                },
            ),
            Err(err) => {
                apply_action(&mut self.state, Action::CancelReset);
                self.log(format!("[WARN] Reset failed: {err:#}"));
            }
        }
    }
}

fn cards(color: CardColor, venue: Venue, delta: i32) -> Action {
    Action::AdjustCards {
        color,
        venue,
        delta,
    }
}

fn seed_clubs(config: &AppConfig, logs: &mut Vec<String>) -> Vec<Club> {
    let mut clubs = initial_clubs();
    if config.demo {
        demo_feed::seed_random_season(&mut clubs, &mut rand::thread_rng());
        logs.push("[INFO] Demo season generated".to_string());
    } else {
        logs.push("[INFO] Starting from the default roster".to_string());
    }
    clubs
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    let config = AppConfig::from_env();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new(config);
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    loop {
        terminal.draw(|f| ui(f, &app.state))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match state.screen {
        Screen::Clubs => render_clubs(frame, chunks[1], state),
        Screen::Comparison => match state.comparison() {
            Some(cmp) => render_comparison(frame, chunks[1], &cmp),
            None => render_clubs(frame, chunks[1], state),
        },
    }

    let console = Paragraph::new(console_text(state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text(state)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[3]);

    if let Some(form) = &state.goal_form {
        render_goal_form(frame, frame.size(), state, form);
    } else if let Some(buf) = &state.rename {
        render_prompt(frame, frame.size(), "Renomear clube", &format!("{buf}_"));
    } else if state.confirm_reset {
        render_prompt(
            frame,
            frame.size(),
            "Resetar",
            "Tem certeza que deseja resetar todos os dados? (y/n)",
        );
    } else if state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let title = match state.screen {
        Screen::Clubs => format!("COMPARADOR | Grupo {}", state.group),
        Screen::Comparison => "COMPARADOR | Comparação".to_string(),
    };
    let home = state
        .compare
        .home
        .as_deref()
        .and_then(|id| state.club_by_id(id))
        .map(|c| c.name.as_str());
    let away = state
        .compare
        .away
        .as_deref()
        .and_then(|id| state.club_by_id(id))
        .map(|c| c.name.as_str());
    let picked = match (home, away) {
        (Some(h), Some(a)) => format!("Selecionados: {h} vs {a}"),
        (Some(h), None) => format!("Selecionados: {h} (selecione outro clube)"),
        _ => "Primera Federación · Espanha 2025/2026".to_string(),
    };
    format!("{title}\n{picked}")
}

fn footer_text(state: &AppState) -> String {
    match state.screen {
        Screen::Clubs => "j/k Move | Tab Group | Space Select | c Compare | a Goal | y/u r/t Cards | n Rename | e/v/x Export | i Import | ? Help | q Quit".to_string(),
        Screen::Comparison => "b/Esc Back | ? Help | q Quit".to_string(),
    }
}

fn console_text(state: &AppState) -> String {
    state
        .logs
        .iter()
        .rev()
        .take(3)
        .rev()
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_clubs(frame: &mut Frame, area: Rect, state: &AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(46), Constraint::Min(30)])
        .split(area);

    let clubs = state.group_clubs();
    let visible = columns[0].height.saturating_sub(2) as usize;
    let (start, end) = visible_range(state.selected, clubs.len(), visible);
    let mut lines = Vec::new();
    for (idx, club) in clubs.iter().enumerate().take(end).skip(start) {
        let cursor = if idx == state.selected { ">" } else { " " };
        let mark = if state.compare.contains(&club.id) { "✓" } else { " " };
        lines.push(format!(
            "{cursor}{mark} {:<24} {:>3} {:>3} {:>3} {:>2}",
            truncate(&club.name, 24),
            club.goals_scored.total(),
            club.goals_conceded.total(),
            club.yellow_cards.total(),
            club.red_cards.total()
        ));
    }
    if lines.is_empty() {
        lines.push("No clubs in this group".to_string());
    }
    let list = Paragraph::new(lines.join("\n")).block(
        Block::default()
            .title(format!("Grupo {}  GM  GS  CA CV", state.group))
            .borders(Borders::ALL),
    );
    frame.render_widget(list, columns[0]);

    let detail = match state.selected_club() {
        Some(club) => club_detail_text(club),
        None => "No club selected".to_string(),
    };
    let panel = Paragraph::new(detail)
        .wrap(Wrap { trim: false })
        .block(Block::default().title("Clube").borders(Borders::ALL));
    frame.render_widget(panel, columns[1]);
}

fn club_detail_text(club: &Club) -> String {
    let origins = OriginProfile::of(club);
    [
        format!("{} (Grupo {})", club.name, club.group),
        String::new(),
        format!(
            "Gols marcados: {}  (Casa {} | Fora {})",
            club.goals_scored.total(),
            club.goals_scored.home.len(),
            club.goals_scored.away.len()
        ),
        format!(
            "Gols sofridos: {}  (Casa {} | Fora {})",
            club.goals_conceded.total(),
            club.goals_conceded.home.len(),
            club.goals_conceded.away.len()
        ),
        format!(
            "Cartões amarelos: {}  (Casa {} | Fora {})",
            club.yellow_cards.total(),
            club.yellow_cards.home,
            club.yellow_cards.away
        ),
        format!(
            "Cartões vermelhos: {}  (Casa {} | Fora {})",
            club.red_cards.total(),
            club.red_cards.home,
            club.red_cards.away
        ),
        String::new(),
        format!("Origem (marcados): {}", origin_line(&origins.scored)),
        format!("Origem (sofridos): {}", origin_line(&origins.conceded)),
    ]
    .join("\n")
}

fn render_comparison(frame: &mut Frame, area: Rect, cmp: &Comparison) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Min(4),
        ])
        .split(area);

    let table = Paragraph::new(stat_table_text(cmp))
        .block(Block::default().title("Estatísticas").borders(Borders::ALL));
    frame.render_widget(table, rows[0]);

    let origin_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(rows[1]);
    let panels = [
        (format!("{} marca", cmp.club1.name), &cmp.club1_origins.scored),
        (format!("{} sofre", cmp.club1.name), &cmp.club1_origins.conceded),
        (format!("{} marca", cmp.club2.name), &cmp.club2_origins.scored),
        (format!("{} sofre", cmp.club2.name), &cmp.club2_origins.conceded),
    ];
    for (area, (title, stats)) in origin_cols.iter().zip(panels.iter()) {
        let panel = Paragraph::new(origin_bars_text(stats, area.width.saturating_sub(2)))
            .block(Block::default().title(title.as_str()).borders(Borders::ALL));
        frame.render_widget(panel, *area);
    }

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[2]);

    let insights = if cmp.insights.is_empty() {
        "Nenhum padrão relevante identificado.".to_string()
    } else {
        cmp.insights
            .iter()
            .map(|line| format!("• {line}"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    let insights = Paragraph::new(insights)
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Insights Táticos").borders(Borders::ALL));
    frame.render_widget(insights, bottom[0]);

    let mut lines: Vec<Line> = Vec::new();
    for bet in &cmp.betting_insights {
        let mut spans = vec![Span::styled(
            bet.market.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        if let Some(p) = &bet.probability {
            spans.push(Span::styled(
                format!("  {p}"),
                Style::default().fg(Color::Green),
            ));
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(bet.analysis.clone()));
    }
    let betting = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Mercados").borders(Borders::ALL));
    frame.render_widget(betting, bottom[1]);
}

fn stat_table_text(cmp: &Comparison) -> String {
    let (a, b) = (&cmp.club1, &cmp.club2);
    let rows = [
        ("Gols marcados (casa)", a.goals_scored.home.len(), b.goals_scored.home.len()),
        ("Gols marcados (fora)", a.goals_scored.away.len(), b.goals_scored.away.len()),
        ("Gols sofridos (casa)", a.goals_conceded.home.len(), b.goals_conceded.home.len()),
        ("Gols sofridos (fora)", a.goals_conceded.away.len(), b.goals_conceded.away.len()),
        ("Cartões amarelos", a.yellow_cards.total() as usize, b.yellow_cards.total() as usize),
        ("Cartões vermelhos", a.red_cards.total() as usize, b.red_cards.total() as usize),
    ];
    let mut lines = vec![format!(
        "{:<22} {:>18} {:>18}",
        "",
        truncate(&a.name, 18),
        truncate(&b.name, 18)
    )];
    for (label, left, right) in rows {
        lines.push(format!("{label:<22} {left:>18} {right:>18}"));
    }
    lines.join("\n")
}

fn origin_bars_text(stats: &[GoalOriginStats], width: u16) -> String {
    if stats.is_empty() {
        return "Sem gols".to_string();
    }
    let bar_width = (width as usize).saturating_sub(20).max(4);
    stats
        .iter()
        .map(|s| {
            let filled = ((s.percentage / 100.0) * bar_width as f64).round() as usize;
            format!(
                "{:<12} {}{} {:>3.0}%",
                truncate(s.origin.label(), 12),
                "█".repeat(filled),
                " ".repeat(bar_width.saturating_sub(filled)),
                s.percentage.round()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_goal_form(frame: &mut Frame, area: Rect, state: &AppState, form: &GoalForm) {
    let popup_area = centered_rect(50, 40, area);
    frame.render_widget(Clear, popup_area);

    let club_name = state
        .club_by_id(&form.club_id)
        .map(|c| c.name.as_str())
        .unwrap_or_default();
    let field = |f: FormField, label: &str, value: String| -> Line<'static> {
        let style = if form.focus == f {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default()
        };
        Line::from(vec![
            Span::raw(format!("{label:<18}")),
            Span::styled(format!("< {value} >"), style),
        ])
    };
    let lines = vec![
        field(FormField::Kind, "Tipo de gol", form.kind.label().to_string()),
        field(FormField::Venue, "Local da partida", form.venue.label().to_string()),
        field(FormField::Minute, "Minuto do gol", format!("{}'", form.minute)),
        field(FormField::Origin, "Origem", form.origin.label().to_string()),
        Line::from(""),
        Line::from("↑/↓ campo | ←/→ valor | 0-9 minuto | Enter salvar | Esc cancelar"),
    ];
    let popup = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(format!("Adicionar Gol - {club_name}"))
            .borders(Borders::ALL),
    );
    frame.render_widget(popup, popup_area);
}

fn render_prompt(frame: &mut Frame, area: Rect, title: &str, body: &str) {
    let popup_area = centered_rect(50, 20, area);
    frame.render_widget(Clear, popup_area);
    let popup = Paragraph::new(body.to_string())
        .wrap(Wrap { trim: true })
        .block(Block::default().title(title.to_string()).borders(Borders::ALL));
    frame.render_widget(popup, popup_area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Comparador - Help",
        "",
        "Clubs:",
        "  j/k or ↑/↓   Move",
        "  Tab / g      Switch group",
        "  Space/Enter  Select for comparison",
        "  c            Open comparison",
        "  a            Add goal",
        "  y/Y u/U      Yellow card +/- (home/away)",
        "  r/R t/T      Red card +/- (home/away)",
        "  n            Rename club",
        "  e / v / x    Export JSON / CSV / XLSX",
        "  i            Import JSON",
        "  Z            Reset all data",
        "",
        "Global:",
        "  b / Esc      Back",
        "  ?            Toggle help",
        "  q            Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
