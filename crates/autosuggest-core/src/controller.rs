//! Suggestion controller.
//!
//! Owns all per-widget suggestion state and runs one complete
//! reparse → match → render cycle per key event. Every cycle replaces the
//! match list and navigator state wholesale.
//!
//! Hosts deliver each physical keypress twice: [`SuggestionController::on_key_down`]
//! before the widget applies its default action (so Ctrl+Space, Tab and Enter
//! can be suppressed) and [`SuggestionController::on_key_up`] afterwards, to
//! react to the resulting text.

use std::borrow::Cow;

use tracing::{debug, trace};

use crate::candidate::{Candidate, CandidateSet};
use crate::config::Options;
use crate::host::{Host, ListItem, Point};
use crate::keys::{Key, KeyClass, KeyEvent};
use crate::matcher::match_fragment;
use crate::navigator::Navigator;
use crate::tokenizer::{self, ParseState};

/// Whether a keydown was handled by the controller.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The host must suppress the widget's default action for this key.
    Consumed,
    /// The host should let the widget handle the key as usual.
    Ignored,
}

impl KeyOutcome {
    pub const fn is_consumed(self) -> bool {
        matches!(self, Self::Consumed)
    }
}

/// Inline typeahead state bound to one text widget.
#[derive(Debug)]
pub struct SuggestionController {
    candidates: CandidateSet,
    options: Options,
    parse: ParseState,
    /// Indices into `candidates`.
    matches: Vec<usize>,
    navigator: Navigator,
    list_visible: bool,
}

impl SuggestionController {
    pub fn new(candidates: CandidateSet, options: Options) -> Self {
        Self {
            candidates,
            options,
            parse: ParseState::default(),
            matches: Vec::new(),
            navigator: Navigator::new(),
            list_visible: false,
        }
    }

    /// Replace the candidate set. The current match list is dropped and the
    /// list hidden; the next qualifying key event rebuilds it.
    pub fn set_candidates<H: Host + ?Sized>(&mut self, host: &mut H, candidates: CandidateSet) {
        self.candidates = candidates;
        self.matches.clear();
        self.navigator.reset();
        self.cancel(host);
    }

    pub const fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    pub const fn options(&self) -> &Options {
        &self.options
    }

    /// State from the most recent reparse.
    pub const fn parse_state(&self) -> &ParseState {
        &self.parse
    }

    /// Candidates in the current match list, in order.
    pub fn matches(&self) -> impl Iterator<Item = &Candidate> + '_ {
        self.matches.iter().map(|&i| &self.candidates[i])
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Selected position in the match list; `None` when nothing is selected.
    pub const fn cursor(&self) -> Option<usize> {
        self.navigator.cursor()
    }

    pub const fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// The candidate under the cursor.
    pub fn selected(&self) -> Option<&Candidate> {
        let position = self.navigator.cursor()?;
        self.matches.get(position).map(|&i| &self.candidates[i])
    }

    pub const fn is_list_visible(&self) -> bool {
        self.list_visible
    }

    fn display_at(&self, position: usize) -> Cow<'_, str> {
        self.matches
            .get(position)
            .map_or(Cow::Borrowed(""), |&i| {
                self.candidates[i].display(self.options.display_key())
            })
    }

    /// Handle a key after the widget applied its default action.
    pub fn on_key_up<H: Host + ?Sized>(&mut self, host: &mut H, event: KeyEvent) {
        match event.class() {
            KeyClass::Navigation => self.navigate(host, event.key),
            KeyClass::NonCharacter => self.non_character(host, event),
            KeyClass::Character => self.request_suggestions(host, false),
        }
    }

    /// Handle a key before the widget applies its default action.
    pub fn on_key_down<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        event: KeyEvent,
    ) -> KeyOutcome {
        match event.key {
            Key::Space if event.modifiers.ctrl => {
                self.request_suggestions(host, true);
                KeyOutcome::Consumed
            }
            Key::Tab | Key::Enter if self.navigator.is_active() => {
                self.commit_selection(host);
                KeyOutcome::Consumed
            }
            _ => KeyOutcome::Ignored,
        }
    }

    /// Run a full keypress: keydown, the widget's default action unless the
    /// keydown was consumed, then keyup.
    pub fn handle_key<H, F>(
        &mut self,
        host: &mut H,
        event: KeyEvent,
        default_action: F,
    ) -> KeyOutcome
    where
        H: Host + ?Sized,
        F: FnOnce(&mut H),
    {
        let outcome = self.on_key_down(host, event);
        if !outcome.is_consumed() {
            default_action(host);
        }
        self.on_key_up(host, event);
        outcome
    }

    fn navigate<H: Host + ?Sized>(&mut self, host: &mut H, key: Key) {
        let moved = match key {
            Key::Up => self.navigator.move_up(),
            Key::Down => self.navigator.move_down(),
            Key::Right => {
                if let Some(position) = self.navigator.move_right() {
                    self.commit_at(host, position);
                }
                return;
            }
            _ => {
                self.navigator.move_left();
                return;
            }
        };
        if let Some(mv) = moved {
            host.set_highlighted(mv.from, false);
            host.set_highlighted(mv.to, true);
            self.type_ahead(host, mv.to);
        }
    }

    fn non_character<H: Host + ?Sized>(&mut self, host: &mut H, event: KeyEvent) {
        match event.key {
            Key::Escape => self.cancel(host),
            other => trace!(key = %other, "Ignoring non-character key"),
        }
    }

    /// Hide the list. The selection survives, so Tab/Enter still commit the
    /// previewed candidate.
    pub fn cancel<H: Host + ?Sized>(&mut self, host: &mut H) {
        host.hide_list();
        self.list_visible = false;
    }

    /// Reparse the widget text and show the matching candidates.
    ///
    /// With `force_all`, the whole candidate set is shown regardless of the
    /// active fragment. Otherwise an empty fragment shows nothing.
    pub fn request_suggestions<H: Host + ?Sized>(&mut self, host: &mut H, force_all: bool) {
        self.parse = tokenizer::parse(&host.text());
        debug!(
            committed = %self.parse.committed_text,
            fragment = %self.parse.active_fragment,
            active_start = self.parse.active_start,
            force_all,
            "Reparsed input"
        );

        let matches = if force_all {
            (0..self.candidates.len()).collect()
        } else if self.parse.active_fragment.is_empty() {
            Vec::new()
        } else {
            let matching = self.options.matching();
            match_fragment(&self.candidates, &self.parse.active_fragment, |c, p| {
                matching(c, p)
            })
        };
        debug!(count = matches.len(), "Matched candidates");
        self.autosuggest(host, matches);
    }

    /// Render a new match list (indices into the candidate set), or hide the
    /// list when it is empty. Selection restarts at the first match.
    pub fn autosuggest<H: Host + ?Sized>(&mut self, host: &mut H, matches: Vec<usize>) {
        let len = self.candidates.len();
        self.matches = matches.into_iter().filter(|&i| i < len).collect();
        self.navigator.show(self.matches.len());

        if self.matches.is_empty() {
            host.hide_list();
            self.list_visible = false;
            return;
        }

        let items: Vec<ListItem> = self
            .matches
            .iter()
            .enumerate()
            .map(|(position, &i)| (self.options.mapping())(&self.candidates[i], position))
            .collect();
        let position = self.list_position(&*host);
        host.render_list(&items, position);
        self.list_visible = true;
        self.type_ahead(host, 0);
    }

    fn list_position<H: Host + ?Sized>(&self, host: &H) -> Point {
        let origin = host.origin();
        let caret = host.caret_offset();
        Point {
            top: origin
                .top
                .saturating_add(caret.top)
                .saturating_add(self.options.list_offset()),
            left: origin.left,
        }
    }

    /// Show the candidate at `position` inline: the widget holds the committed
    /// text plus the full candidate, with the suggested part selected so that
    /// further typing overwrites it.
    fn type_ahead<H: Host + ?Sized>(&self, host: &mut H, position: usize) {
        if !host.can_select() {
            trace!("Host cannot select; skipping inline preview");
            return;
        }
        let text = self.parse.splice(&self.display_at(position));
        let end = text.chars().count();
        host.set_text(&text);
        host.select_range(self.parse.active_start.min(end)..end);
    }

    /// Commit the selected candidate into the widget and end the cycle.
    ///
    /// Returns `false` when nothing is selected.
    pub fn commit_selection<H: Host + ?Sized>(&mut self, host: &mut H) -> bool {
        let Some(position) = self.navigator.accept() else {
            return false;
        };
        self.commit_at(host, position);
        true
    }

    fn commit_at<H: Host + ?Sized>(&mut self, host: &mut H, position: usize) {
        let text = self.parse.splice(&self.display_at(position));
        debug!(position, text = %text, "Committing suggestion");
        host.set_text(&text);
        host.hide_list();
        self.list_visible = false;
        self.accept_suggestion(host);
    }

    /// Clear fragment tracking and the selection, and put the caret at the
    /// end of the widget text.
    pub fn accept_suggestion<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.parse.active_fragment.clear();
        self.navigator.reset();
        let end = host.text().chars().count();
        host.select_range(end..end);
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::candidate::candidate_set;
    use crate::config::Settings;
    use crate::host::{HostCommand, RecordingHost, TextWidget};
    use crate::keys::Modifiers;

    fn cities() -> SuggestionController {
        SuggestionController::new(
            candidate_set(["New York", "Newark", "Boston", "Nice", "world"]),
            Options::default(),
        )
    }

    fn press(
        ctl: &mut SuggestionController,
        host: &mut RecordingHost,
        event: KeyEvent,
    ) -> KeyOutcome {
        ctl.handle_key(host, event, |h| h.apply_default(event))
    }

    fn type_str(ctl: &mut SuggestionController, host: &mut RecordingHost, s: &str) {
        for c in s.chars() {
            let key = if c == ' ' { Key::Space } else { Key::Char(c) };
            let _ = press(ctl, host, KeyEvent::plain(key));
        }
    }

    #[test]
    fn typing_previews_first_match() {
        let mut ctl = cities();
        let mut host = RecordingHost::new();
        type_str(&mut ctl, &mut host, "N");
        assert_eq!(host.labels(), vec!["New York", "Newark", "Nice"]);
        assert_eq!(host.highlighted(), Some(0));
        assert_eq!(host.text(), "New York");
        assert_eq!(host.selection(), 1..8);
        assert_eq!(ctl.cursor(), Some(0));
    }

    #[test]
    fn continued_typing_overwrites_preview() {
        let mut ctl = cities();
        let mut host = RecordingHost::new();
        type_str(&mut ctl, &mut host, "Ne");
        assert_eq!(host.text(), "New York");
        assert_eq!(host.selection(), 2..8);
        type_str(&mut ctl, &mut host, "wa");
        assert_eq!(host.labels(), vec!["Newark"]);
        assert_eq!(host.text(), "Newark");
        assert_eq!(host.selection(), 4..6);
    }

    #[test]
    fn accept_moves_caret_to_end() {
        let mut ctl = cities();
        let mut host = RecordingHost::new();
        type_str(&mut ctl, &mut host, "Ne");
        assert_eq!(ctl.parse_state().active_start, 2);
        assert_eq!(
            press(&mut ctl, &mut host, KeyEvent::plain(Key::Enter)),
            KeyOutcome::Consumed
        );
        assert_eq!(host.text(), "New York");
        assert_eq!(host.selection(), 8..8);
        assert!(!host.is_list_visible());
        assert_eq!(ctl.cursor(), None);
        assert_eq!(ctl.parse_state().active_fragment, "");
    }

    #[test]
    fn multi_word_splice() {
        let mut ctl = cities();
        let mut host = RecordingHost::new();
        type_str(&mut ctl, &mut host, "hello wor");
        assert_eq!(ctl.parse_state().committed_text, "hello ");
        assert_eq!(ctl.parse_state().active_fragment, "wor");
        assert_eq!(ctl.parse_state().active_start, 9);
        assert_eq!(host.text(), "hello world");
        assert_eq!(host.selection(), 9..11);
        let _ = press(&mut ctl, &mut host, KeyEvent::plain(Key::Tab));
        assert_eq!(host.text(), "hello world");
        assert_eq!(host.selection(), 11..11);
    }

    #[test]
    fn words_after_a_line_break() {
        let mut ctl = cities();
        let mut host = RecordingHost::with_text("abc\n");
        type_str(&mut ctl, &mut host, "Bo");
        assert_eq!(ctl.parse_state().committed_text, "abc\n");
        assert_eq!(host.text(), "abc\nBoston");
        assert_eq!(host.selection(), 6..10);
    }

    #[test]
    fn arrows_wrap_and_retype_preview() {
        let mut ctl = cities();
        let mut host = RecordingHost::new();
        type_str(&mut ctl, &mut host, "n");
        let _ = press(&mut ctl, &mut host, KeyEvent::plain(Key::Down));
        assert_eq!(ctl.cursor(), Some(1));
        assert_eq!(host.highlighted(), Some(1));
        assert_eq!(host.text(), "Newark");
        assert_eq!(host.selection(), 1..6);

        let _ = press(&mut ctl, &mut host, KeyEvent::plain(Key::Up));
        let _ = press(&mut ctl, &mut host, KeyEvent::plain(Key::Up));
        assert_eq!(ctl.cursor(), Some(2));
        assert_eq!(host.text(), "Nice");

        let _ = press(&mut ctl, &mut host, KeyEvent::plain(Key::Down));
        assert_eq!(ctl.cursor(), Some(0));
        assert_eq!(host.text(), "New York");
    }

    #[test]
    fn right_arrow_accepts() {
        let mut ctl = cities();
        let mut host = RecordingHost::new();
        type_str(&mut ctl, &mut host, "bo");
        let _ = press(&mut ctl, &mut host, KeyEvent::plain(Key::Right));
        assert_eq!(host.text(), "Boston");
        assert_eq!(host.selection(), 6..6);
        assert!(!host.is_list_visible());
        assert_eq!(ctl.cursor(), None);
    }

    #[test]
    fn navigation_is_noop_after_accept() {
        let mut ctl = cities();
        let mut host = RecordingHost::new();
        type_str(&mut ctl, &mut host, "n");
        let _ = press(&mut ctl, &mut host, KeyEvent::plain(Key::Tab));
        host.take_commands();
        let _ = press(&mut ctl, &mut host, KeyEvent::plain(Key::Down));
        let _ = press(&mut ctl, &mut host, KeyEvent::plain(Key::Up));
        assert!(host.commands().is_empty());
        assert_eq!(host.text(), "New York");
    }

    #[test]
    fn enter_without_selection_passes_through() {
        let mut ctl = cities();
        let mut host = RecordingHost::new();
        type_str(&mut ctl, &mut host, "zz");
        assert!(!host.is_list_visible());
        assert_eq!(
            press(&mut ctl, &mut host, KeyEvent::plain(Key::Enter)),
            KeyOutcome::Ignored
        );
        assert_eq!(host.text(), "zz\n");
    }

    #[test]
    fn left_arrow_keeps_state() {
        let mut ctl = cities();
        let mut host = RecordingHost::new();
        type_str(&mut ctl, &mut host, "n");
        host.take_commands();
        ctl.on_key_up(&mut host, KeyEvent::plain(Key::Left));
        assert!(host.commands().is_empty());
        assert_eq!(ctl.cursor(), Some(0));
        assert!(ctl.is_list_visible());
    }

    #[test]
    fn escape_hides_but_keeps_selection() {
        let mut ctl = cities();
        let mut host = RecordingHost::new();
        type_str(&mut ctl, &mut host, "n");
        let _ = press(&mut ctl, &mut host, KeyEvent::plain(Key::Escape));
        assert!(!host.is_list_visible());
        assert!(!ctl.is_list_visible());
        assert_eq!(ctl.cursor(), Some(0));
    }

    #[test]
    fn space_hides_list() {
        let mut ctl = cities();
        let mut host = RecordingHost::new();
        type_str(&mut ctl, &mut host, "n");
        type_str(&mut ctl, &mut host, " ");
        assert_eq!(host.text(), "N ");
        assert!(!host.is_list_visible());
        assert_eq!(ctl.cursor(), None);
    }

    #[test]
    fn backspace_does_not_requery() {
        let mut ctl = cities();
        let mut host = RecordingHost::new();
        type_str(&mut ctl, &mut host, "ne");
        host.take_commands();
        let _ = press(&mut ctl, &mut host, KeyEvent::plain(Key::Backspace));
        assert_eq!(host.text(), "Ne");
        assert!(host.commands().is_empty());
    }

    #[test]
    fn ctrl_space_shows_everything() {
        let mut ctl = cities();
        let mut host = RecordingHost::new();
        let outcome = press(&mut ctl, &mut host, KeyEvent::ctrl(Key::Space));
        assert_eq!(outcome, KeyOutcome::Consumed);
        assert_eq!(ctl.parse_state().active_fragment, "");
        assert_eq!(ctl.match_count(), 5);
        assert_eq!(host.labels().len(), 5);
        assert!(host.is_list_visible());
        assert_eq!(host.text(), "New York");
        assert_eq!(host.selection(), 0..8);
    }

    #[test]
    fn ctrl_space_keyup_keeps_list() {
        let mut ctl = cities();
        let mut host = RecordingHost::with_text("hello ");
        let _ = ctl.on_key_down(&mut host, KeyEvent::ctrl(Key::Space));
        ctl.on_key_up(&mut host, KeyEvent::ctrl(Key::Space));
        assert!(host.is_list_visible());
        assert_eq!(host.text(), "hello New York");
        assert_eq!(host.selection(), 6..14);
    }

    #[test]
    fn list_is_placed_under_the_caret() {
        let mut ctl = SuggestionController::new(
            candidate_set(["alpha"]),
            Options::from_settings(&Settings {
                list_offset: 5,
                ..Settings::default()
            }),
        );
        let mut host = RecordingHost::with_text("x\ny\na").at(Point { top: 10, left: 3 });
        ctl.request_suggestions(&mut host, false);
        let position = host.commands().iter().find_map(|c| match c {
            HostCommand::RenderList { position, .. } => Some(*position),
            _ => None,
        });
        assert_eq!(position, Some(Point { top: 17, left: 3 }));
    }

    #[test]
    fn emits_commands_in_order() {
        let mut ctl = cities();
        let mut host = RecordingHost::with_text("Bo");
        ctl.on_key_up(&mut host, KeyEvent::plain(Key::Char('o')));
        let commands = host.take_commands();
        assert!(matches!(commands[0], HostCommand::RenderList { .. }));
        assert_eq!(
            commands[1..],
            [
                HostCommand::SetText {
                    text: "Boston".into()
                },
                HostCommand::SelectRange { start: 2, end: 6 },
            ]
        );
    }

    #[test]
    fn no_preview_without_selection_support() {
        let mut ctl = cities();
        let mut host = RecordingHost::new().without_selection();
        type_str(&mut ctl, &mut host, "ni");
        assert_eq!(host.text(), "ni");
        assert!(host.is_list_visible());
        assert_eq!(host.labels(), vec!["Nice"]);
        let _ = press(&mut ctl, &mut host, KeyEvent::plain(Key::Enter));
        assert_eq!(host.text(), "Nice");
    }

    #[test]
    fn record_candidates_with_display_key() {
        let set: Vec<Candidate> = serde_json::from_str(
            r#"[{"name": "New York", "code": "NY"}, {"name": "Nairobi", "code": "NBO"}]"#,
        )
        .unwrap();
        let options = Options::from_settings(&Settings {
            display_key: Some("name".into()),
            ..Settings::default()
        });
        let mut ctl = SuggestionController::new(set.into(), options);
        let mut host = RecordingHost::new();
        type_str(&mut ctl, &mut host, "na");
        assert_eq!(host.labels(), vec!["Nairobi"]);
        assert_eq!(host.text(), "Nairobi");
    }

    #[test]
    fn custom_mapping_is_used() {
        let options = Options::default().with_mapping(|c, i| ListItem {
            label: format!("{}. {}", i + 1, c.display(None)),
            highlighted: i == 0,
        });
        let mut ctl = SuggestionController::new(candidate_set(["Nice", "Nimes"]), options);
        let mut host = RecordingHost::new();
        type_str(&mut ctl, &mut host, "ni");
        assert_eq!(host.labels(), vec!["1. Nice", "2. Nimes"]);
    }

    #[test]
    fn controllers_are_independent() {
        let set = candidate_set(["Nice", "Boston"]);
        let mut a = SuggestionController::new(set.clone(), Options::default());
        let mut b = SuggestionController::new(set, Options::default());
        let mut ha = RecordingHost::new();
        let mut hb = RecordingHost::new();
        type_str(&mut a, &mut ha, "n");
        type_str(&mut b, &mut hb, "b");
        assert_eq!(ha.text(), "Nice");
        assert_eq!(hb.text(), "Boston");
        assert_eq!(a.parse_state().active_fragment, "n");
    }

    #[test]
    fn set_candidates_drops_matches() {
        let mut ctl = cities();
        let mut host = RecordingHost::new();
        type_str(&mut ctl, &mut host, "n");
        assert!(host.is_list_visible());
        ctl.set_candidates(&mut host, candidate_set(["Oslo"]));
        assert_eq!(ctl.match_count(), 0);
        assert_eq!(ctl.cursor(), None);
        assert!(!ctl.is_list_visible());
        assert!(!host.is_list_visible());
        assert_eq!(host.commands().last(), Some(&HostCommand::HideList));
        assert_eq!(
            ctl.on_key_down(&mut host, KeyEvent::new(Key::Tab, Modifiers::NONE)),
            KeyOutcome::Ignored
        );
    }

    #[test]
    fn selected_tracks_cursor() {
        let mut ctl = cities();
        let mut host = RecordingHost::new();
        type_str(&mut ctl, &mut host, "new");
        assert_eq!(ctl.selected(), Some(&Candidate::from("New York")));
        ctl.on_key_up(&mut host, KeyEvent::plain(Key::Down));
        assert_eq!(ctl.selected(), Some(&Candidate::from("Newark")));
        assert_eq!(
            ctl.matches().map(|c| c.display(None).into_owned()).collect::<Vec<_>>(),
            vec!["New York", "Newark"]
        );
    }

    #[test]
    fn preview_selection_never_reverses() {
        let options = Options::from_settings(&Settings {
            display_key: Some("name".into()),
            ..Settings::default()
        });
        let record: Candidate = serde_json::from_str(r#"{"code": "NY"}"#).unwrap();
        let mut ctl = SuggestionController::new(candidate_set([record]), options);
        let mut host = RecordingHost::with_text("hello wor");
        ctl.request_suggestions(&mut host, true);
        assert_eq!(host.text(), "hello ");
        assert!(host.commands().contains(&HostCommand::SelectRange { start: 6, end: 6 }));
        assert!(host.commands().iter().all(|c| match c {
            HostCommand::SelectRange { start, end } => start <= end,
            _ => true,
        }));
    }

    #[test]
    fn right_commits_through_navigator() {
        let mut ctl = cities();
        let mut host = RecordingHost::new();
        type_str(&mut ctl, &mut host, "new");
        ctl.on_key_up(&mut host, KeyEvent::plain(Key::Down));
        ctl.on_key_up(&mut host, KeyEvent::plain(Key::Right));
        assert_eq!(host.text(), "Newark");
        assert_eq!(host.selection(), 6..6);
        assert!(!ctl.navigator().is_active());
        assert!(!host.is_list_visible());
    }
}
