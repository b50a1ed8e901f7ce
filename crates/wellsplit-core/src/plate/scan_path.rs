/// 0-based position of well `(row, col)` in the microscope's physical scan.
///
/// The stage first walks the entire first column top to bottom. It then
/// serpentines through the remaining columns starting from the bottom row:
/// odd rows are visited left to right, even rows right to left. Rows below
/// `row` have already been fully visited by the time `row` is reached.
pub fn scan_ordinal(row: u32, col: u32, rows: u32, cols: u32) -> u32 {
    debug_assert!(row < rows && col < cols, "well ({row}, {col}) outside {rows}x{cols}");

    if col == 0 {
        return row;
    }

    let visited = rows + (rows - row - 1) * (cols - 1);
    if row % 2 == 0 {
        visited + (cols - col - 1)
    } else {
        visited + (col - 1)
    }
}
