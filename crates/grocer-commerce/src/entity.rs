//! Identity traits shared by every server-backed record.

use std::fmt;
use std::hash::Hash;

/// A record with a stable unique identifier assigned by the server.
///
/// Stores match records by [`Entity::id`], never by position.
pub trait Entity: fmt::Debug + Send + Sync + 'static {
    /// Identifier type.
    type Id: Clone + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static;

    /// Human-readable kind, used in log fields and messages ("product").
    const KIND: &'static str;

    /// The record's identifier.
    fn id(&self) -> &Self::Id;
}

/// A record the client may create, edit or delete through the API.
pub trait Mutable: Entity {
    /// Payload sent to create a record; the server assigns the id.
    type Draft: fmt::Debug + Send + Sync + 'static;

    /// Partial update payload.
    type Patch: fmt::Debug + Send + Sync + 'static;
}
