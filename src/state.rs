use std::collections::VecDeque;

use crate::comparison::{Comparison, build_comparison};
use crate::model::{CardColor, Club, Goal, GoalKind, GoalOrigin, Group, Venue};

pub const MINUTE_MIN: u16 = 1;
pub const MINUTE_MAX: u16 = 100;
const DEFAULT_MINUTE: u16 = 45;
const DEFAULT_MAX_LOGS: usize = 200;

/// Copy of `club` with `goal` appended to the list picked by `kind` and the
/// goal's own venue.
pub fn add_goal(club: &Club, kind: GoalKind, goal: Goal) -> Club {
    let mut out = club.clone();
    let list = match kind {
        GoalKind::Scored => &mut out.goals_scored,
        GoalKind::Conceded => &mut out.goals_conceded,
    };
    list.get_mut(goal.venue()).push(goal);
    out
}

/// Copy of `club` with one card tally moved by `delta`, never below zero.
pub fn adjust_cards(club: &Club, color: CardColor, venue: Venue, delta: i32) -> Club {
    let mut out = club.clone();
    let tally = match color {
        CardColor::Yellow => out.yellow_cards.get_mut(venue),
        CardColor::Red => out.red_cards.get_mut(venue),
    };
    *tally = tally.saturating_add_signed(delta);
    out
}

/// Copy of `club` under a new name. Blank names are refused.
pub fn rename_club(club: &Club, name: &str) -> Option<Club> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    let mut out = club.clone();
    out.name = name.to_string();
    Some(out)
}

/// Comparison slots: first pick plays at home, second away.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompareSelection {
    pub home: Option<String>,
    pub away: Option<String>,
}

impl CompareSelection {
    /// Toggle `club_id` in or out of the pair. Returns true when the pair
    /// has just been completed.
    pub fn toggle(&mut self, club_id: &str) -> bool {
        match (&self.home, &self.away) {
            (None, _) => {
                self.home = Some(club_id.to_string());
                self.away = None;
                false
            }
            (Some(home), _) if home == club_id => {
                self.home = None;
                self.away = None;
                false
            }
            (Some(_), None) => {
                self.away = Some(club_id.to_string());
                true
            }
            (Some(_), Some(away)) if away == club_id => {
                self.away = None;
                false
            }
            (Some(_), Some(_)) => {
                self.home = Some(club_id.to_string());
                self.away = None;
                false
            }
        }
    }

    pub fn contains(&self, club_id: &str) -> bool {
        self.home.as_deref() == Some(club_id) || self.away.as_deref() == Some(club_id)
    }

    pub fn is_complete(&self) -> bool {
        self.home.is_some() && self.away.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Kind,
    Venue,
    Minute,
    Origin,
}

impl FormField {
    const ORDER: [FormField; 4] = [
        FormField::Kind,
        FormField::Venue,
        FormField::Minute,
        FormField::Origin,
    ];

    fn step(self, forward: bool) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        let len = Self::ORDER.len();
        let next = if forward { (idx + 1) % len } else { (idx + len - 1) % len };
        Self::ORDER[next]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalForm {
    pub club_id: String,
    pub kind: GoalKind,
    pub venue: Venue,
    pub minute: u16,
    pub origin: GoalOrigin,
    pub focus: FormField,
}

impl GoalForm {
    pub fn new(club_id: impl Into<String>) -> Self {
        Self {
            club_id: club_id.into(),
            kind: GoalKind::Scored,
            venue: Venue::Home,
            minute: DEFAULT_MINUTE,
            origin: GoalOrigin::Other,
            focus: FormField::Kind,
        }
    }

    pub fn goal(&self) -> Goal {
        Goal::new(self.minute, self.origin, self.venue)
    }

    fn nudge(&mut self, forward: bool) {
        match self.focus {
            FormField::Kind => self.kind = self.kind.toggle(),
            FormField::Venue => self.venue = self.venue.toggle(),
            FormField::Minute => {
                self.minute = if forward {
                    (self.minute + 1).min(MINUTE_MAX)
                } else {
                    self.minute.saturating_sub(1).max(MINUTE_MIN)
                };
            }
            FormField::Origin => {
                self.origin = if forward {
                    self.origin.next()
                } else {
                    self.origin.prev()
                };
            }
        }
    }

    /// Typing digits builds the minute left to right; a digit that would
    /// overflow the range starts a new number.
    fn type_digit(&mut self, digit: u8) {
        if self.focus != FormField::Minute || digit > 9 {
            return;
        }
        let appended = self.minute * 10 + u16::from(digit);
        self.minute = if appended <= MINUTE_MAX {
            appended.max(MINUTE_MIN)
        } else {
            u16::from(digit).max(MINUTE_MIN)
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Clubs,
    Comparison,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SelectNext,
    SelectPrev,
    SwitchGroup,
    ToggleCompare,
    ShowComparison,
    Back,
    OpenGoalForm,
    FormNextField,
    FormPrevField,
    FormIncrease,
    FormDecrease,
    FormDigit(u8),
    SaveGoal,
    AdjustCards {
        color: CardColor,
        venue: Venue,
        delta: i32,
    },
    StartRename,
    RenameInput(char),
    RenameBackspace,
    CommitRename,
    RequestReset,
    CancelReset,
    ReplaceClubs {
        clubs: Vec<Club>,
        note: String,
    },
    ToggleHelp,
    Log(String),
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub clubs: Vec<Club>,
    pub group: Group,
    pub selected: usize,
    pub compare: CompareSelection,
    pub screen: Screen,
    pub goal_form: Option<GoalForm>,
    pub rename: Option<String>,
    pub confirm_reset: bool,
    pub help_overlay: bool,
    /// Set whenever club data changed and a snapshot write is due.
    pub dirty: bool,
    pub logs: VecDeque<String>,
    pub max_logs: usize,
}

impl AppState {
    pub fn new(clubs: Vec<Club>) -> Self {
        Self {
            clubs,
            group: Group::One,
            selected: 0,
            compare: CompareSelection::default(),
            screen: Screen::Clubs,
            goal_form: None,
            rename: None,
            confirm_reset: false,
            help_overlay: false,
            dirty: false,
            logs: VecDeque::new(),
            max_logs: DEFAULT_MAX_LOGS,
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > self.max_logs {
            self.logs.pop_front();
        }
    }

    /// Clubs of the active group tab, in stored order.
    pub fn group_clubs(&self) -> Vec<&Club> {
        self.clubs.iter().filter(|c| c.group == self.group).collect()
    }

    pub fn selected_club(&self) -> Option<&Club> {
        self.group_clubs().get(self.selected).copied()
    }

    pub fn club_by_id(&self, id: &str) -> Option<&Club> {
        self.clubs.iter().find(|c| c.id == id)
    }

    pub fn comparison(&self) -> Option<Comparison> {
        let home = self.club_by_id(self.compare.home.as_deref()?)?;
        let away = self.club_by_id(self.compare.away.as_deref()?)?;
        Some(build_comparison(home, away, &self.clubs))
    }

    fn replace_club(&mut self, updated: Club) {
        if let Some(slot) = self.clubs.iter_mut().find(|c| c.id == updated.id) {
            *slot = updated;
            self.dirty = true;
        }
    }

    fn clamp_selection(&mut self) {
        let total = self.group_clubs().len();
        if total == 0 {
            self.selected = 0;
        } else if self.selected >= total {
            self.selected = total - 1;
        }
    }
}

pub fn apply_action(state: &mut AppState, action: Action) {
    match action {
        Action::SelectNext => {
            let total = state.group_clubs().len();
            if total > 0 {
                state.selected = (state.selected + 1).min(total - 1);
            }
        }
        Action::SelectPrev => {
            state.selected = state.selected.saturating_sub(1);
        }
        Action::SwitchGroup => {
            state.group = state.group.other();
            state.selected = 0;
        }
        Action::ToggleCompare => {
            let Some(id) = state.selected_club().map(|c| c.id.clone()) else {
                return;
            };
            if state.compare.toggle(&id) {
                state.screen = Screen::Comparison;
            }
        }
        Action::ShowComparison => {
            if state.compare.is_complete() {
                state.screen = Screen::Comparison;
            } else {
                state.push_log("[INFO] Select two clubs to compare");
            }
        }
        Action::Back => {
            if state.goal_form.is_some() {
                state.goal_form = None;
            } else if state.rename.is_some() {
                state.rename = None;
            } else if state.confirm_reset {
                state.confirm_reset = false;
            } else if state.help_overlay {
                state.help_overlay = false;
            } else {
                state.screen = Screen::Clubs;
            }
        }
        Action::OpenGoalForm => {
            if let Some(id) = state.selected_club().map(|c| c.id.clone()) {
                state.goal_form = Some(GoalForm::new(id));
            }
        }
        Action::FormNextField | Action::FormPrevField => {
            let forward = action == Action::FormNextField;
            if let Some(form) = state.goal_form.as_mut() {
                form.focus = form.focus.step(forward);
            }
        }
        Action::FormIncrease | Action::FormDecrease => {
            let forward = action == Action::FormIncrease;
            if let Some(form) = state.goal_form.as_mut() {
                form.nudge(forward);
            }
        }
        Action::FormDigit(digit) => {
            if let Some(form) = state.goal_form.as_mut() {
                form.type_digit(digit);
            }
        }
        Action::SaveGoal => {
            let Some(form) = state.goal_form.take() else {
                return;
            };
            let Some(club) = state.club_by_id(&form.club_id) else {
                return;
            };
            let updated = add_goal(club, form.kind, form.goal());
            let msg = format!(
                "[INFO] Gol {} registrado: {} {}' {} ({})",
                form.kind.label().to_lowercase(),
                updated.name,
                form.minute,
                form.origin.label(),
                form.venue.label()
            );
            state.replace_club(updated);
            state.push_log(msg);
        }
        Action::AdjustCards {
            color,
            venue,
            delta,
        } => {
            let Some(club) = state.selected_club() else {
                return;
            };
            let updated = adjust_cards(club, color, venue, delta);
            state.replace_club(updated);
        }
        Action::StartRename => {
            if let Some(name) = state.selected_club().map(|c| c.name.clone()) {
                state.rename = Some(name);
            }
        }
        Action::RenameInput(ch) => {
            if let Some(buf) = state.rename.as_mut() {
                buf.push(ch);
            }
        }
        Action::RenameBackspace => {
            if let Some(buf) = state.rename.as_mut() {
                buf.pop();
            }
        }
        Action::CommitRename => {
            let Some(buf) = state.rename.take() else {
                return;
            };
            let Some(club) = state.selected_club() else {
                return;
            };
            if let Some(updated) = rename_club(club, &buf) {
                state.replace_club(updated);
            }
        }
        Action::RequestReset => state.confirm_reset = true,
        Action::CancelReset => state.confirm_reset = false,
        Action::ReplaceClubs { clubs, note } => {
            state.clubs = clubs;
            state.compare = CompareSelection::default();
            state.screen = Screen::Clubs;
            state.goal_form = None;
            state.rename = None;
            state.confirm_reset = false;
            state.dirty = true;
            state.clamp_selection();
            state.push_log(note);
        }
        Action::ToggleHelp => state.help_overlay = !state.help_overlay,
        Action::Log(msg) => state.push_log(msg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::initial_clubs;

    #[test]
    fn add_goal_files_by_kind_and_venue() {
        let club = Club::new("c", "C", Group::One);
        let updated = add_goal(
            &club,
            GoalKind::Conceded,
            Goal::new(88, GoalOrigin::Penalty, Venue::Away),
        );
        assert_eq!(updated.goals_conceded.away.len(), 1);
        assert_eq!(updated.goals_conceded.home.len(), 0);
        assert_eq!(updated.goals_scored.total(), 0);
        assert_eq!(club.goals_conceded.total(), 0);
    }

    #[test]
    fn card_decrement_stops_at_zero() {
        let club = Club::new("c", "C", Group::One);
        let up = adjust_cards(&club, CardColor::Red, Venue::Home, 1);
        assert_eq!(up.red_cards.home, 1);
        let down = adjust_cards(&up, CardColor::Red, Venue::Home, -3);
        assert_eq!(down.red_cards.home, 0);
    }

    #[test]
    fn blank_rename_is_refused() {
        let club = Club::new("c", "C", Group::One);
        assert!(rename_club(&club, "   ").is_none());
        assert_eq!(rename_club(&club, "  Novo  ").unwrap().name, "Novo");
    }

    #[test]
    fn compare_toggle_cycle() {
        let mut sel = CompareSelection::default();
        assert!(!sel.toggle("a"));
        assert!(sel.toggle("b"));
        assert_eq!(sel.home.as_deref(), Some("a"));
        assert_eq!(sel.away.as_deref(), Some("b"));

        assert!(!sel.toggle("b"));
        assert_eq!(sel.away, None);

        sel.toggle("b");
        assert!(!sel.toggle("c"));
        assert_eq!(sel.home.as_deref(), Some("c"));
        assert_eq!(sel.away, None);

        assert!(!sel.toggle("c"));
        assert_eq!(sel, CompareSelection::default());
    }

    #[test]
    fn minute_typing_stays_in_range() {
        let mut form = GoalForm::new("c");
        form.focus = FormField::Minute;
        form.minute = 9;
        form.type_digit(0);
        assert_eq!(form.minute, 90);
        form.type_digit(5);
        assert_eq!(form.minute, 5);
        form.minute = MINUTE_MAX;
        form.nudge(true);
        assert_eq!(form.minute, MINUTE_MAX);
        form.minute = MINUTE_MIN;
        form.nudge(false);
        assert_eq!(form.minute, MINUTE_MIN);
    }

    #[test]
    fn saving_goal_form_updates_club_and_marks_dirty() {
        let mut state = AppState::new(initial_clubs());
        apply_action(&mut state, Action::OpenGoalForm);
        apply_action(&mut state, Action::FormNextField);
        apply_action(&mut state, Action::FormIncrease);
        apply_action(&mut state, Action::SaveGoal);

        let club = &state.clubs[0];
        assert_eq!(club.goals_scored.away.len(), 1);
        assert_eq!(club.goals_scored.away[0].minute, 45);
        assert_eq!(club.goals_scored.away[0].origin, GoalOrigin::Other);
        assert!(state.dirty);
        assert!(state.goal_form.is_none());
    }

    #[test]
    fn completing_pair_opens_comparison() {
        let mut state = AppState::new(initial_clubs());
        apply_action(&mut state, Action::ToggleCompare);
        apply_action(&mut state, Action::SelectNext);
        apply_action(&mut state, Action::ToggleCompare);
        assert_eq!(state.screen, Screen::Comparison);
        let cmp = state.comparison().unwrap();
        assert_eq!(cmp.club1.id, "club-0");
        assert_eq!(cmp.club2.id, "club-1");
        assert!(cmp.betting_insights.len() >= 3);
    }

    #[test]
    fn log_action_keeps_console_bounded() {
        let mut state = AppState::new(initial_clubs());
        state.max_logs = 3;
        for idx in 0..5 {
            apply_action(&mut state, Action::Log(format!("[INFO] line {idx}")));
        }
        assert_eq!(state.logs.len(), 3);
        assert_eq!(state.logs.front().map(String::as_str), Some("[INFO] line 2"));
        assert_eq!(state.logs.back().map(String::as_str), Some("[INFO] line 4"));
        assert!(!state.dirty);
    }
}
