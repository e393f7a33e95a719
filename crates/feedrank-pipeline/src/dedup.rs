//! Deduplication of canonical items by equivalence key.
//!
//! One pass over the input: a map from key to output slot holds, per key,
//! the current winner and a running group size. Output order is the order
//! in which each key was first seen.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use feedrank_core::{CanonicalItem, DedupConfig, DedupKeyStrategy, ItemField, Resolution};

use crate::text::{normalize_key_text, normalize_url};

/// Derive the equivalence key of an item.
///
/// Returns `None` when no key can be formed (no raw id, empty URL, an empty
/// composite). Such items are never merged with anything.
#[must_use]
pub fn dedup_key(item: &CanonicalItem, strategy: &DedupKeyStrategy) -> Option<String> {
    let key = match strategy {
        DedupKeyStrategy::NormalizedUrl => normalize_url(&item.url),
        DedupKeyStrategy::NormalizedTitle => normalize_key_text(&item.title),
        DedupKeyStrategy::RawId => item.id.as_deref().unwrap_or_default().trim().to_string(),
        DedupKeyStrategy::Composite { fields } => {
            if fields.is_empty() {
                return None;
            }
            fields
                .iter()
                .map(|field| composite_part(item, *field))
                .collect::<Vec<_>>()
                .join("|")
        }
    };

    if key.is_empty() {
        None
    } else {
        Some(key)
    }
}

fn composite_part(item: &CanonicalItem, field: ItemField) -> String {
    match field {
        ItemField::Url => normalize_url(&item.url),
        other => normalize_key_text(&item.field_text(other)),
    }
}

struct Slot {
    winner: CanonicalItem,
    count: usize,
}

/// Collapse items sharing a key, keeping one per key.
///
/// - [`Resolution::FirstWins`]: the first item with each key is kept as-is.
/// - [`Resolution::HighestScoreWins`]: the item with the greatest `score` is
///   kept, at the key's first-occurrence position; ties keep the earlier item.
///
/// With `with_duplicate_count`, each survivor's `duplicate_count` is set to
/// the number of input items that shared its key.
#[must_use]
pub fn deduplicate(items: Vec<CanonicalItem>, config: &DedupConfig) -> Vec<CanonicalItem> {
    let input_count = items.len();
    let mut slots: Vec<Slot> = Vec::with_capacity(input_count);
    let mut slot_by_key: HashMap<String, usize> = HashMap::with_capacity(input_count);

    for item in items {
        let Some(key) = dedup_key(&item, &config.key) else {
            slots.push(Slot {
                winner: item,
                count: 1,
            });
            continue;
        };

        match slot_by_key.entry(key) {
            Entry::Occupied(entry) => {
                let slot = &mut slots[*entry.get()];
                slot.count += 1;
                if config.resolution == Resolution::HighestScoreWins
                    && item.score > slot.winner.score
                {
                    slot.winner = item;
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(slots.len());
                slots.push(Slot {
                    winner: item,
                    count: 1,
                });
            }
        }
    }

    let unique: Vec<CanonicalItem> = slots
        .into_iter()
        .map(|slot| {
            let mut winner = slot.winner;
            if config.with_duplicate_count {
                winner.duplicate_count = Some(slot.count);
            }
            winner
        })
        .collect();

    tracing::debug!(
        input = input_count,
        unique = unique.len(),
        removed = input_count - unique.len(),
        "deduplicated batch"
    );

    unique
}
