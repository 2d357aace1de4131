/// End-to-end flows: generating a bracket, taking matches live, scoring
/// them to completion, and advancing winners the way a host application
/// would.
use tourney_core::{
    MatchStatus, Scoring, Side, SportConfig, SportState, TennisConfig, TournamentFormat,
    VolleyballConfig, generator,
};

/// Score straight points for `side` until the sport state reports the
/// match complete.
fn sweep_match(state: &mut SportState, side: Side) {
    while !state.is_complete() {
        state.score_point(side).unwrap();
    }
}

#[test]
fn test_tennis_match_played_to_completion() {
    let mut state = SportConfig::Tennis(TennisConfig::default())
        .initialize()
        .unwrap();
    sweep_match(&mut state, Side::Two);

    let SportState::Tennis(tennis) = &state else {
        panic!("expected tennis state");
    };
    assert!(tennis.is_match_complete);
    assert_eq!(tennis.sets, vec![[0, 6], [0, 6]]);
    assert_eq!(tennis.sets_won(Side::Two), 2);
}

#[test]
fn test_volleyball_five_set_match() {
    let mut state = tourney_core::VolleyballState::new(VolleyballConfig::default()).unwrap();

    // Two sets each, then the shortened deciding set.
    for winner in [Side::One, Side::One, Side::Two, Side::Two] {
        for _ in 0..25 {
            state.score_point(winner).unwrap();
        }
    }
    for _ in 0..15 {
        state.score_point(Side::One).unwrap();
    }

    assert!(state.is_match_complete);
    assert_eq!(state.sets.len(), 5);
    assert_eq!(state.sets[4], [15, 0]);
    assert_eq!(state.score_point(Side::One), Err(tourney_core::EngineError::MatchComplete));
}

/// Run a four-entrant single elimination bracket the way the host would:
/// initialize each ready match, score it, record the result, and push the
/// winner along the generated link.
#[test]
fn test_single_elimination_bracket_played_through() {
    let participants: Vec<String> = ["ada", "brook", "cleo", "dana"]
        .iter()
        .map(ToString::to_string)
        .collect();
    let mut matches =
        generator::generate(TournamentFormat::SingleElimination, &participants).unwrap();
    let config = SportConfig::Volleyball(VolleyballConfig::default());

    loop {
        let Some(index) = matches
            .iter()
            .position(|m| m.status == MatchStatus::Pending && m.participant_count() == 2)
        else {
            break;
        };

        matches[index].begin_scoring(&config).unwrap();
        // Slot 1 sweeps every rally.
        sweep_match(matches[index].sport_state_mut().unwrap(), Side::One);

        let winner = matches[index].participant1.clone().unwrap();
        matches[index].status = MatchStatus::Completed;
        matches[index].winner = Some(winner.clone());

        if let (Some(target), Some(slot)) =
            (matches[index].next_match, matches[index].next_match_slot)
        {
            matches[target].set_participant(slot, winner);
        }
    }

    let last = matches.last().unwrap();
    assert_eq!(last.status, MatchStatus::Completed);
    assert_eq!(last.winner.as_deref(), Some("ada"));
    assert!(matches.iter().all(|m| m.status == MatchStatus::Completed));
}

#[test]
fn test_sport_state_serialization_is_tagged() {
    let state = SportConfig::Tennis(TennisConfig::default())
        .initialize()
        .unwrap();
    let json = serde_json::to_value(&state).unwrap();
    assert_eq!(json["sport"], "tennis");
    assert_eq!(json["serving_participant"], 1);

    let restored: SportState = serde_json::from_value(json).unwrap();
    assert_eq!(restored, state);
}

#[test]
fn test_match_record_serialization() {
    let matches = generator::generate_single_elimination(&[
        "ada".to_string(),
        "brook".to_string(),
        "cleo".to_string(),
    ])
    .unwrap();

    let json = serde_json::to_value(&matches).unwrap();
    assert_eq!(json[0]["status"], "bye");
    assert_eq!(json[0]["winner"], "ada");
    assert_eq!(json[0]["next_match_slot"], 1);

    let restored: Vec<tourney_core::MatchRecord> = serde_json::from_value(json).unwrap();
    assert_eq!(restored, matches);
}

#[test]
fn test_invalid_winner_value_is_rejected_at_the_boundary() {
    // Hosts deserialize the point winner straight off the wire.
    let side: Result<Side, _> = serde_json::from_str("2");
    assert!(side.is_ok());
    let side: Result<Side, _> = serde_json::from_str("3");
    assert!(side.is_err());
}
