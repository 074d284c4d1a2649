//! Save-record codec: board ↔ flat JSON record.
//!
//! The record layout is fixed by boards already sitting in browsers'
//! local storage:
//!
//! ```json
//! {
//!   "flashcards": [{ "x": "120px", "y": "40px", "frontText": "...", "backText": "...", "id": 0 }],
//!   "connections": [{ "startId": 0, "endId": "1" }]
//! }
//! ```
//!
//! Record ids are **not** card handles. A save re-indexes the live cards
//! densely (`0..N` in board order) and writes connections against those
//! fresh ids, looked up by handle. A load restores the ids it finds and
//! resolves connection endpoints against the cards it just created;
//! endpoints that match nothing drop the connection silently.

use crate::connections::ConnectionGraph;
use crate::error::{LoadError, PxError};
use crate::id::NodeId;
use crate::px::{format_px, parse_px};
use crate::registry::NodeRegistry;
use kurbo::Point;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A record id as found in stored JSON: a number, or a numeric string
/// (older saves wrote connection endpoints from a DOM attribute).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Index(u64),
    Text(String),
}

impl RecordId {
    /// Canonical text form used for matching: `0` and `"0"` are equal.
    pub fn key(&self) -> String {
        match self {
            RecordId::Index(n) => n.to_string(),
            RecordId::Text(s) => s.clone(),
        }
    }

    /// Numeric value, if the id is one.
    pub fn as_index(&self) -> Option<u64> {
        match self {
            RecordId::Index(n) => Some(*n),
            RecordId::Text(s) => s.parse().ok(),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    #[serde(default)]
    pub x: String,
    #[serde(default)]
    pub y: String,
    #[serde(default)]
    pub front_text: String,
    #[serde(default)]
    pub back_text: String,
    pub id: RecordId,
}

/// A stored connection. Endpoints may be missing or `null` in older saves
/// (the card they named was never re-indexed); such records are dropped
/// during resolution, never rejected at decode time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRecord {
    #[serde(default)]
    pub start_id: Option<RecordId>,
    #[serde(default)]
    pub end_id: Option<RecordId>,
}

impl LinkRecord {
    pub fn new(start: RecordId, end: RecordId) -> Self {
        Self {
            start_id: Some(start),
            end_id: Some(end),
        }
    }
}

/// The whole board, flattened.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub flashcards: Vec<CardRecord>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub connections: Vec<LinkRecord>,
}

/// `"connections": null` reads as an empty list.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A card record with its coordinates parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct CardSeed {
    pub id: RecordId,
    /// `None` when the record carried no offset (never dragged).
    pub position: Option<Point>,
    pub front_text: String,
    pub back_text: String,
}

/// Flatten the board into a record, re-indexing every card's `saved_id`.
///
/// Cards are numbered `0..N` in board order, overwriting any previous
/// record id. Connections are written against those fresh numbers.
pub fn encode(registry: &mut NodeRegistry, graph: &ConnectionGraph) -> SaveRecord {
    let mut fresh: HashMap<NodeId, u64> = HashMap::with_capacity(registry.len());
    let mut flashcards = Vec::with_capacity(registry.len());

    for (index, card) in (0u64..).zip(registry.iter_mut()) {
        card.saved_id = Some(index);
        fresh.insert(card.id, index);
        flashcards.push(CardRecord {
            x: format_px(card.position.x),
            y: format_px(card.position.y),
            front_text: card.front_text.clone(),
            back_text: card.back_text.clone(),
            id: RecordId::Index(index),
        });
    }

    let connections = graph
        .list()
        .into_iter()
        .filter_map(|conn| {
            let start = fresh.get(&conn.start)?;
            let end = fresh.get(&conn.end)?;
            Some(LinkRecord::new(RecordId::Index(*start), RecordId::Index(*end)))
        })
        .collect();

    SaveRecord {
        flashcards,
        connections,
    }
}

pub fn to_json(record: &SaveRecord) -> Result<String, serde_json::Error> {
    serde_json::to_string(record)
}

/// Parse a stored value. A missing value, `null`, or text that is not JSON
/// at all all mean "no saved data".
pub fn decode(value: Option<&str>) -> Result<SaveRecord, LoadError> {
    let text = value.ok_or(LoadError::NoSavedData)?;
    let json: serde_json::Value =
        serde_json::from_str(text).map_err(|_| LoadError::NoSavedData)?;
    if json.is_null() {
        return Err(LoadError::NoSavedData);
    }
    Ok(serde_json::from_value(json)?)
}

/// Parse every card record's coordinates up front, so a bad record aborts
/// the load before anything is created.
pub fn seeds(record: &SaveRecord) -> Result<Vec<CardSeed>, LoadError> {
    record
        .flashcards
        .iter()
        .enumerate()
        .map(|(index, card)| {
            let bad = |source: PxError| LoadError::BadPosition { index, source };
            let x = parse_px(&card.x).map_err(bad)?;
            let y = parse_px(&card.y).map_err(bad)?;
            let position = match (x, y) {
                (None, None) => None,
                (x, y) => Some(Point::new(x.unwrap_or(0.0), y.unwrap_or(0.0))),
            };
            Ok(CardSeed {
                id: card.id.clone(),
                position,
                front_text: card.front_text.clone(),
                back_text: card.back_text.clone(),
            })
        })
        .collect()
}

/// Create one card per seed, in record order. Returns the lookup from
/// record-id key to the new handle; for duplicate ids the first card wins.
pub fn restore_cards(
    seeds: Vec<CardSeed>,
    registry: &mut NodeRegistry,
    default_position: Point,
) -> HashMap<String, NodeId> {
    let mut by_record: HashMap<String, NodeId> = HashMap::with_capacity(seeds.len());
    for seed in seeds {
        let position = seed.position.unwrap_or(default_position);
        let id = registry.create(&seed.front_text, &seed.back_text, position);
        if let Some(card) = registry.get_mut(id) {
            card.saved_id = seed.id.as_index();
        }
        by_record.entry(seed.id.key()).or_insert(id);
    }
    by_record
}

/// Resolve each link record against the restored cards.
///
/// Returns `(start, end)` handle pairs in record order plus the number of
/// records dropped for a missing endpoint.
pub fn resolve_links(
    links: &[LinkRecord],
    by_record: &HashMap<String, NodeId>,
) -> (Vec<(NodeId, NodeId)>, usize) {
    let mut pairs = Vec::with_capacity(links.len());
    let mut dropped = 0;
    for link in links {
        let find = |id: &Option<RecordId>| id.as_ref().and_then(|id| by_record.get(&id.key()));
        match (find(&link.start_id), find(&link.end_id)) {
            (Some(&start), Some(&end)) => pairs.push((start, end)),
            _ => {
                log::warn!(
                    "dropping connection {} -> {}: endpoint not found",
                    endpoint_name(&link.start_id),
                    endpoint_name(&link.end_id)
                );
                dropped += 1;
            }
        }
    }
    (pairs, dropped)
}

fn endpoint_name(id: &Option<RecordId>) -> String {
    id.as_ref().map_or_else(|| "null".to_string(), RecordId::key)
}
