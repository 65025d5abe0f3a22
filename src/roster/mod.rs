// Roster domain: player records, season metadata, normalization, ordering.

pub mod import;
pub mod normalize;
pub mod player;
pub mod sort;
