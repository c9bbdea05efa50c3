//! Key-consideration selection for a debate result.
//!
//! Excerpts are picked in priority order:
//!
//! 1. the highest-confidence record of each distinct position
//! 2. records flagging a compliance or security blocker
//! 3. everything else, by descending confidence
//!
//! Stand-ins for failed agents are never candidates.
//! A candidate is skipped when its leading sentence is a near-duplicate
//! (word-set Jaccard similarity ≥ [`SIMILARITY_THRESHOLD`]) of one
//! already chosen.

use crate::core::text::{jaccard_similarity, truncate};
use crate::debate::{ArgumentRecord, Position};

/// Maximum number of key considerations in a result
pub const MAX_KEY_CONSIDERATIONS: usize = 5;

/// Leading sentences at or above this similarity count as duplicates
pub const SIMILARITY_THRESHOLD: f64 = 0.6;

const MAX_EXCERPT_LEN: usize = 240;

const BLOCKER_MARKERS: &[&str] = &[
    "blocker",
    "blocking",
    "compliance",
    "security risk",
    "vulnerab",
    "regulatory",
    "gdpr",
    "hipaa",
    "pci",
];

/// Whether reasoning text flags a compliance/security blocker
pub fn flags_blocker(text: &str) -> bool {
    let lower = text.to_lowercase();
    BLOCKER_MARKERS.iter().any(|m| lower.contains(m))
}

/// Pick up to `limit` non-duplicate excerpts from the final votes
pub fn select_key_considerations(votes: &[ArgumentRecord], limit: usize) -> Vec<String> {
    let mut by_confidence: Vec<usize> = (0..votes.len())
        .filter(|&i| !votes[i].is_fallback())
        .collect();
    by_confidence.sort_by(|&a, &b| votes[b].confidence.total_cmp(&votes[a].confidence));

    let strongest_per_position = Position::ALL.iter().filter_map(|position| {
        by_confidence
            .iter()
            .copied()
            .find(|&i| votes[i].position == *position)
    });
    let blockers = by_confidence
        .iter()
        .copied()
        .filter(|&i| flags_blocker(&votes[i].reasoning));

    let candidates: Vec<usize> = strongest_per_position
        .chain(blockers)
        .chain(by_confidence.iter().copied())
        .collect();

    let mut chosen: Vec<usize> = Vec::new();
    for index in candidates {
        if chosen.len() >= limit {
            break;
        }
        if chosen.contains(&index) {
            continue;
        }
        let lead = votes[index].leading_sentence();
        if lead.is_empty() {
            continue;
        }
        let duplicate = chosen.iter().any(|&c| {
            jaccard_similarity(votes[c].leading_sentence(), lead) >= SIMILARITY_THRESHOLD
        });
        if !duplicate {
            chosen.push(index);
        }
    }

    chosen
        .into_iter()
        .map(|i| {
            let record = &votes[i];
            format!(
                "[{} · {}] {}",
                record.agent_id,
                record.position,
                truncate(record.leading_sentence(), MAX_EXCERPT_LEN)
            )
        })
        .collect()
}
