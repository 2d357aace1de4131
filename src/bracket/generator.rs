//! Bracket generation.
//!
//! Pure functions that map an ordered participant list and a format to a
//! complete match graph: rounds, positions, initial participants or byes,
//! and forward links for winner (and, for double elimination, loser)
//! advancement. No storage or runtime dependencies; `next_match` references
//! are indices into the returned sequence.
//!
//! Participants are assumed pre-sorted by seed (seed 1 first); sorting is
//! the host's concern.

use log::debug;
use std::collections::VecDeque;

use super::entities::{BracketSide, MatchRecord, MatchStatus, TournamentFormat};
use crate::constants::MIN_PARTICIPANTS;
use crate::entities::{ParticipantId, Side};
use crate::errors::{EngineError, EngineResult};

/// Generate the full match graph for `format`.
pub fn generate(
    format: TournamentFormat,
    participants: &[ParticipantId],
) -> EngineResult<Vec<MatchRecord>> {
    match format {
        TournamentFormat::SingleElimination => generate_single_elimination(participants),
        TournamentFormat::DoubleElimination => generate_double_elimination(participants),
        TournamentFormat::RoundRobin => generate_round_robin(participants),
    }
}

fn check_participants(participants: &[ParticipantId]) -> EngineResult<()> {
    if participants.len() < MIN_PARTICIPANTS {
        return Err(EngineError::NotEnoughParticipants(participants.len()));
    }
    Ok(())
}

/// Seed placement order for a bracket of `size` slots (power of two).
///
/// Returns 1-based seeds in slot order, pairing highest remaining against
/// lowest remaining recursively (1 vs N, 2 vs N-1, ...) so top seeds meet
/// as late as possible. For size 8: `[1, 8, 4, 5, 2, 7, 3, 6]`.
fn seeding_order(size: usize) -> Vec<usize> {
    let mut order = vec![1];
    while order.len() < size {
        let doubled = order.len() * 2;
        let mut expanded = Vec::with_capacity(doubled);
        for &seed in &order {
            expanded.push(seed);
            expanded.push(doubled + 1 - seed);
        }
        order = expanded;
    }
    order
}

/// Build an elimination bracket skeleton: all rounds, winner links, round-1
/// seeds, and round-1 byes. Returns the matches and the start index of each
/// round (round r starts at `round_start[r - 1]`).
fn build_elimination_rounds(
    participants: &[ParticipantId],
    size: usize,
    side: Option<BracketSide>,
) -> (Vec<MatchRecord>, Vec<usize>) {
    let rounds = size.trailing_zeros();
    let mut matches = Vec::with_capacity(size - 1);
    let mut round_start = Vec::with_capacity(rounds as usize);

    let mut match_number = 1;
    for round in 1..=rounds {
        let count = size >> round;
        round_start.push(matches.len());
        for position in 0..count {
            let mut m = MatchRecord::new(round, match_number, position as u32);
            m.bracket_side = side;
            matches.push(m);
            match_number += 1;
        }
    }

    // Winner advancement: match i of round r feeds match i/2 of round r+1,
    // even positions into slot 1, odd into slot 2.
    for round in 1..rounds {
        let count = size >> round;
        let start = round_start[round as usize - 1];
        let next_start = round_start[round as usize];
        for i in 0..count {
            let m = &mut matches[start + i];
            m.next_match = Some(next_start + i / 2);
            m.next_match_slot = Some(if i % 2 == 0 { Side::One } else { Side::Two });
        }
    }

    // Seed round 1; slots past the participant count stay empty.
    for (slot_index, &seed) in seeding_order(size).iter().enumerate() {
        if let Some(id) = participants.get(seed - 1) {
            let slot = if slot_index % 2 == 0 {
                Side::One
            } else {
                Side::Two
            };
            matches[slot_index / 2].set_participant(slot, id.clone());
        }
    }

    // Round 1 matches with a single real participant are byes, completed
    // immediately with that participant as winner.
    for m in &mut matches[..size >> 1] {
        if m.participant_count() == 1 {
            m.status = MatchStatus::Bye;
            m.winner = m.participant1.clone().or_else(|| m.participant2.clone());
        }
    }

    (matches, round_start)
}

/// Feeder map: for every `(match, slot)`, the matches whose winner or loser
/// is routed there.
fn build_feeders(matches: &[MatchRecord]) -> Vec<[Vec<usize>; 2]> {
    let mut feeders: Vec<[Vec<usize>; 2]> = vec![[Vec::new(), Vec::new()]; matches.len()];
    for (i, m) in matches.iter().enumerate() {
        if let (Some(target), Some(slot)) = (m.next_match, m.next_match_slot) {
            feeders[target][slot.index()].push(i);
        }
        if let (Some(target), Some(slot)) = (m.loser_next_match, m.loser_next_match_slot) {
            feeders[target][slot.index()].push(i);
        }
    }
    feeders
}

/// Push a finished match's winner into its downstream slot. Returns true if
/// a slot was filled.
fn deliver_winner(matches: &mut [MatchRecord], index: usize) -> bool {
    let (winner, link) = {
        let m = &matches[index];
        if !matches!(m.status, MatchStatus::Bye | MatchStatus::Completed) {
            return false;
        }
        (m.winner.clone(), m.next_match.zip(m.next_match_slot))
    };
    let (Some(winner), Some((target, slot))) = (winner, link) else {
        return false;
    };
    if matches[target].participant(slot).is_some() {
        return false;
    }
    matches[target].set_participant(slot, winner);
    true
}

/// A slot can never be filled when it is empty and every feeder routed into
/// it has already finished (or it has no feeders at all).
fn slot_unfillable(matches: &[MatchRecord], feeders: &[[Vec<usize>; 2]], index: usize, slot: Side) -> bool {
    matches[index].participant(slot).is_none()
        && feeders[index][slot.index()]
            .iter()
            .all(|&f| matches!(matches[f].status, MatchStatus::Bye | MatchStatus::Completed))
}

/// Auto-complete a pending match whose remaining slot can never be filled.
/// Returns true if the match transitioned.
fn autocomplete_bye(
    matches: &mut [MatchRecord],
    feeders: &[[Vec<usize>; 2]],
    index: usize,
) -> bool {
    if matches[index].status != MatchStatus::Pending {
        return false;
    }
    let one_dead = slot_unfillable(matches, feeders, index, Side::One);
    let two_dead = slot_unfillable(matches, feeders, index, Side::Two);
    let m = &mut matches[index];
    match (m.participant1.clone(), m.participant2.clone()) {
        (Some(winner), None) if two_dead => {
            m.status = MatchStatus::Bye;
            m.winner = Some(winner);
            true
        }
        (None, Some(winner)) if one_dead => {
            m.status = MatchStatus::Bye;
            m.winner = Some(winner);
            true
        }
        // Both feeders were byes: the match is dead and delivers nothing.
        // Only reachable in losers brackets.
        (None, None) if one_dead && two_dead => {
            m.status = MatchStatus::Bye;
            true
        }
        _ => false,
    }
}

/// Transitive bye propagation over the whole graph.
///
/// Worklist over match indices rather than recursion, so stack depth stays
/// bounded for large brackets. Each match transitions at most once and each
/// slot fills at most once, so the list drains.
fn propagate_byes(matches: &mut [MatchRecord]) {
    let feeders = build_feeders(matches);
    let mut worklist: VecDeque<usize> = (0..matches.len()).collect();
    while let Some(index) = worklist.pop_front() {
        let delivered = deliver_winner(matches, index);
        let completed = autocomplete_bye(matches, &feeders, index);
        // A fresh completion delivers its winner in the same pass, so no
        // other match ever observes a finished feeder that has not yet
        // handed its winner forward.
        if completed {
            deliver_winner(matches, index);
        }
        if delivered || completed {
            if let Some(target) = matches[index].next_match {
                worklist.push_back(target);
            }
        }
    }
}

/// Single elimination: bracket size is the next power of two, unfilled
/// slots become byes.
pub fn generate_single_elimination(
    participants: &[ParticipantId],
) -> EngineResult<Vec<MatchRecord>> {
    check_participants(participants)?;
    let size = participants.len().next_power_of_two();
    let (mut matches, _) = build_elimination_rounds(participants, size, None);
    propagate_byes(&mut matches);
    debug!(
        "generated single elimination bracket: {} participants, {} matches",
        participants.len(),
        matches.len()
    );
    Ok(matches)
}

/// Double elimination: a winners bracket identical to single elimination,
/// a losers bracket in alternating minor/major rounds, and a grand final.
///
/// The loser of every non-bye winners match drops into the losers bracket.
/// Drop-down order alternates direction on every major round so nobody
/// meets the same opponent again before necessary. A single grand final is
/// generated; the bracket-reset second final is intentionally not modeled.
pub fn generate_double_elimination(
    participants: &[ParticipantId],
) -> EngineResult<Vec<MatchRecord>> {
    check_participants(participants)?;
    let size = participants.len().next_power_of_two();
    let depth = size.trailing_zeros() as usize;

    let (mut matches, wb_round_start) =
        build_elimination_rounds(participants, size, Some(BracketSide::Winners));
    let wb_final = matches.len() - 1;
    let mut match_number = matches.len() as u32 + 1;

    // Losers bracket rounds come in pairs: a minor round among survivors,
    // then a major round against the next wave of winners-bracket losers.
    // Pair j (1-based) has size >> (j + 1) matches per round.
    let mut lb_round_start = Vec::new();
    for j in 1..depth {
        let count = size >> (j + 1);
        for half in 0..2 {
            let lb_round = (2 * j - 1 + half) as u32;
            lb_round_start.push(matches.len());
            for position in 0..count {
                let mut m = MatchRecord::new(lb_round, match_number, position as u32);
                m.bracket_side = Some(BracketSide::Losers);
                matches.push(m);
                match_number += 1;
            }
        }
    }

    let grand_final = matches.len();
    let mut gf = MatchRecord::new(depth as u32 + 1, match_number, 0);
    gf.bracket_side = Some(BracketSide::Winners);
    matches.push(gf);

    matches[wb_final].next_match = Some(grand_final);
    matches[wb_final].next_match_slot = Some(Side::One);

    if depth == 1 {
        // Two-entrant bracket: the losers bracket is empty and the loser of
        // the only match goes straight to the grand final.
        matches[wb_final].loser_next_match = Some(grand_final);
        matches[wb_final].loser_next_match_slot = Some(Side::Two);
    } else {
        // Winners round 1 losers pair up in losers round 1.
        let wb_r1_count = size >> 1;
        for i in 0..wb_r1_count {
            let m = &mut matches[wb_round_start[0] + i];
            m.loser_next_match = Some(lb_round_start[0] + i / 2);
            m.loser_next_match_slot = Some(if i % 2 == 0 { Side::One } else { Side::Two });
        }

        for j in 1..depth {
            let count = size >> (j + 1);
            let minor_start = lb_round_start[2 * (j - 1)];
            let major_start = lb_round_start[2 * (j - 1) + 1];

            // Winners round j+1 losers drop into major round 2j, slot 2.
            // Alternate mapping direction each wave to avoid rematches.
            for i in 0..count {
                let target = if j % 2 == 1 { count - 1 - i } else { i };
                let m = &mut matches[wb_round_start[j] + i];
                m.loser_next_match = Some(major_start + target);
                m.loser_next_match_slot = Some(Side::Two);
            }

            for i in 0..count {
                let m = &mut matches[minor_start + i];
                m.next_match = Some(major_start + i);
                m.next_match_slot = Some(Side::One);
            }

            for i in 0..count {
                let m = &mut matches[major_start + i];
                if j + 1 < depth {
                    let next_minor_start = lb_round_start[2 * j];
                    m.next_match = Some(next_minor_start + i / 2);
                    m.next_match_slot = Some(if i % 2 == 0 { Side::One } else { Side::Two });
                } else {
                    m.next_match = Some(grand_final);
                    m.next_match_slot = Some(Side::Two);
                }
            }
        }

        // Byes have no loser to send down.
        for m in &mut matches[..wb_r1_count] {
            if m.status == MatchStatus::Bye {
                m.loser_next_match = None;
                m.loser_next_match_slot = None;
            }
        }
    }

    propagate_byes(&mut matches);
    debug!(
        "generated double elimination bracket: {} participants, {} matches",
        participants.len(),
        matches.len()
    );
    Ok(matches)
}

/// Round robin via the circle method: fix the first entry, rotate the rest.
/// Odd participant counts get a rotating bye slot; whoever draws it that
/// round receives an explicit bye record. No advancement links apply.
pub fn generate_round_robin(participants: &[ParticipantId]) -> EngineResult<Vec<MatchRecord>> {
    check_participants(participants)?;

    let mut slots: Vec<Option<ParticipantId>> =
        participants.iter().cloned().map(Some).collect();
    if slots.len() % 2 == 1 {
        slots.push(None);
    }
    let n = slots.len();
    let rounds = n - 1;

    let mut matches = Vec::with_capacity(rounds * n / 2);
    let mut match_number = 1;
    let mut rotation: Vec<usize> = (0..n).collect();

    for round in 1..=rounds {
        let mut position = 0;
        for i in 0..n / 2 {
            let home = slots[rotation[i]].clone();
            let away = slots[rotation[n - 1 - i]].clone();
            let mut m = MatchRecord::new(round as u32, match_number, position);
            match (home, away) {
                (Some(home), Some(away)) => {
                    m.participant1 = Some(home);
                    m.participant2 = Some(away);
                }
                (Some(solo), None) | (None, Some(solo)) => {
                    m.participant1 = Some(solo.clone());
                    m.status = MatchStatus::Bye;
                    m.winner = Some(solo);
                }
                // At most one bye slot exists per round.
                (None, None) => continue,
            }
            matches.push(m);
            match_number += 1;
            position += 1;
        }
        // Keep rotation[0] fixed, rotate everyone else one step.
        rotation[1..].rotate_right(1);
    }

    debug!(
        "generated round robin: {} participants, {} rounds, {} matches",
        participants.len(),
        rounds,
        matches.len()
    );
    Ok(matches)
}
