use crate::config::Rgb;
use crate::grid::Position;

/// Something placed on the grid that a renderer can draw.
///
/// Implemented by plain value types and used through generics only.
pub trait Entity {
    /// The cell that identifies this entity (the head, for a snake).
    fn position(&self) -> Position;

    /// Fill color for every cell of the entity.
    fn color(&self) -> Rgb;

    /// All cells the entity covers, primary cell first.
    fn cells(&self) -> impl Iterator<Item = Position> + '_;
}

/// Returns true when any cell of `entity` equals `position`.
#[must_use]
pub fn covers<E: Entity>(entity: &E, position: Position) -> bool {
    entity.cells().any(|cell| cell == position)
}
