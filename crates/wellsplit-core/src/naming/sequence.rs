use std::ops::Range;

/// First (1-based) output tile number for one field of one well.
///
/// Wells sharing a genotype are numbered back to back in grid order, so
/// `occurrence_rank` whole wells of `fields_per_well * tiles_per_frame` tiles
/// precede this one. `field` is 1-based.
pub fn first_sequence_number(
    occurrence_rank: usize,
    field: u32,
    tiles_per_frame: u32,
    fields_per_well: u32,
) -> u32 {
    debug_assert!(field >= 1 && field <= fields_per_well);
    occurrence_rank as u32 * fields_per_well * tiles_per_frame + (field - 1) * tiles_per_frame + 1
}

/// Tile numbers produced by one frame: `[first, first + tiles_per_frame)`.
pub fn sequence_range(
    occurrence_rank: usize,
    field: u32,
    tiles_per_frame: u32,
    fields_per_well: u32,
) -> Range<u32> {
    let first = first_sequence_number(occurrence_rank, field, tiles_per_frame, fields_per_well);
    first..first + tiles_per_frame
}
