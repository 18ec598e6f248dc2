// src/matchday/lifecycle.rs
//! The match state machine.
//!
//! `scheduled`/`tbd` fixtures go live, pass through halftime into the second
//! half and complete; postponement, cancellation and forfeit branch off
//! before or during play and are terminal. Everything not listed in
//! [`allowed`] is rejected; the controller never coerces an out-of-order
//! request into something it can apply.

use crate::errors::ApiError;
use crate::models::matches::MatchStatus;

/// Whether the state machine permits `current -> target`.
///
/// Forfeiting an already-forfeited match is handled as an idempotent no-op
/// one level up (the lifecycle service), not as a legal transition here.
pub fn allowed(current: MatchStatus, target: MatchStatus) -> bool {
    use MatchStatus::*;
    match (current, target) {
        (Scheduled | Tbd, Live) => true,
        (Scheduled | Tbd | Live, Postponed | Cancelled | Forfeit) => true,
        (Live, Halftime) => true,
        (Halftime, SecondHalf) => true,
        (SecondHalf, Completed) => true,
        _ => false,
    }
}

pub fn validate_transition(current: MatchStatus, target: MatchStatus) -> Result<(), ApiError> {
    if allowed(current, target) {
        Ok(())
    } else {
        Err(ApiError::InvalidTransition {
            from: current,
            to: target,
        })
    }
}

/// Whether an edit arrives through the live surface or the post-match editor.
/// Both surfaces call the same mutation services; the window only decides
/// which match statuses accept the edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditWindow {
    Live,
    PostMatch,
}

/// Event create/delete/patch is allowed while the match is in play, or on
/// completed/forfeited matches through the post-match editor.
pub fn ensure_event_window(status: MatchStatus, window: EditWindow) -> Result<(), ApiError> {
    let ok = match window {
        EditWindow::Live => status.is_in_play(),
        EditWindow::PostMatch => {
            matches!(status, MatchStatus::Completed | MatchStatus::Forfeit)
        }
    };
    if ok {
        Ok(())
    } else {
        Err(ApiError::Validation(format!(
            "match in status '{}' does not accept {} event edits",
            status,
            window_name(window)
        )))
    }
}

/// Lineups are replaceable up to completion; afterwards only via the
/// post-match editor.
pub fn ensure_lineup_window(status: MatchStatus, window: EditWindow) -> Result<(), ApiError> {
    let ok = match window {
        EditWindow::Live => !status.is_terminal(),
        EditWindow::PostMatch => {
            matches!(status, MatchStatus::Completed | MatchStatus::Forfeit)
        }
    };
    if ok {
        Ok(())
    } else {
        Err(ApiError::Validation(format!(
            "match in status '{}' does not accept {} lineup edits",
            status,
            window_name(window)
        )))
    }
}

/// Batch stat corrections reconcile a roster after the fact; they are only
/// reachable through the post-match editor.
pub fn ensure_stats_window(status: MatchStatus) -> Result<(), ApiError> {
    if matches!(status, MatchStatus::Completed | MatchStatus::Forfeit) {
        Ok(())
    } else {
        Err(ApiError::Validation(format!(
            "stat corrections require a completed or forfeited match, status is '{}'",
            status
        )))
    }
}

fn window_name(window: EditWindow) -> &'static str {
    match window {
        EditWindow::Live => "live",
        EditWindow::PostMatch => "post-match",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use MatchStatus::*;

    /// The complete set of legal transitions. Any (state, target) pair not
    /// in this list must be rejected.
    fn allowed_pairs() -> Vec<(MatchStatus, MatchStatus)> {
        vec![
            (Scheduled, Live),
            (Scheduled, Postponed),
            (Scheduled, Cancelled),
            (Scheduled, Forfeit),
            (Tbd, Live),
            (Tbd, Postponed),
            (Tbd, Cancelled),
            (Tbd, Forfeit),
            (Live, Halftime),
            (Live, Postponed),
            (Live, Cancelled),
            (Live, Forfeit),
            (Halftime, SecondHalf),
            (SecondHalf, Completed),
        ]
    }

    #[test]
    fn transition_table_is_complete() {
        for current in MatchStatus::all() {
            for target in MatchStatus::all() {
                let expected = allowed_pairs().contains(&(current, target));
                assert_eq!(
                    allowed(current, target),
                    expected,
                    "transition {} -> {} should be {}",
                    current,
                    target,
                    if expected { "allowed" } else { "rejected" }
                );
            }
        }
    }

    #[test]
    fn terminal_states_allow_nothing() {
        for current in [Completed, Postponed, Cancelled, Forfeit] {
            for target in MatchStatus::all() {
                assert!(!allowed(current, target));
            }
        }
    }

    #[test]
    fn rejected_transition_carries_both_states() {
        let err = validate_transition(Cancelled, Live).unwrap_err();
        match err {
            crate::errors::ApiError::InvalidTransition { from, to } => {
                assert_eq!(from, Cancelled);
                assert_eq!(to, Live);
            }
            other => panic!("expected InvalidTransition, got {:?}", other),
        }
    }

    #[test]
    fn event_window_live() {
        for status in [Live, Halftime, SecondHalf] {
            assert!(ensure_event_window(status, EditWindow::Live).is_ok());
        }
        for status in [Scheduled, Tbd, Completed, Postponed, Cancelled, Forfeit] {
            assert!(ensure_event_window(status, EditWindow::Live).is_err());
        }
    }

    #[test]
    fn event_window_post_match() {
        for status in [Completed, Forfeit] {
            assert!(ensure_event_window(status, EditWindow::PostMatch).is_ok());
        }
        for status in [Scheduled, Tbd, Live, Halftime, SecondHalf, Postponed, Cancelled] {
            assert!(ensure_event_window(status, EditWindow::PostMatch).is_err());
        }
    }

    #[test]
    fn lineup_window_freezes_after_completion() {
        for status in [Scheduled, Tbd, Live, Halftime, SecondHalf] {
            assert!(ensure_lineup_window(status, EditWindow::Live).is_ok());
        }
        for status in [Completed, Postponed, Cancelled, Forfeit] {
            assert!(ensure_lineup_window(status, EditWindow::Live).is_err());
        }
        assert!(ensure_lineup_window(Completed, EditWindow::PostMatch).is_ok());
        assert!(ensure_lineup_window(Forfeit, EditWindow::PostMatch).is_ok());
    }

    #[test]
    fn stats_window_is_post_match_only() {
        assert!(ensure_stats_window(Completed).is_ok());
        assert!(ensure_stats_window(Forfeit).is_ok());
        for status in [Scheduled, Tbd, Live, Halftime, SecondHalf, Postponed, Cancelled] {
            assert!(ensure_stats_window(status).is_err());
        }
    }
}
