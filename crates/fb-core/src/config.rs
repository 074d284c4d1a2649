//! Board configuration.

use kurbo::{Point, Size};

/// Blob-store key the board is saved under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "flashcardsData";

/// Static board settings shared by the engine and the codec.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardConfig {
    /// Fixed dimensions of every card. Anchors are derived from this.
    pub card_size: Size,

    /// Where `AddCard` places a new card. Default: the board origin.
    pub spawn_position: Point,

    /// Key the whole board is written under in the blob store.
    pub storage_key: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            card_size: Size::new(200.0, 150.0),
            spawn_position: Point::ORIGIN,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}
