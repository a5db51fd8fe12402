//! Blocked transposes tuned for a 1KB direct-mapped cache with 32 byte lines
//!
//! A line holds 8 elements and the cache holds 32 lines, so an 8x8 tile of a 32 column matrix
//! fits exactly while a 64 column matrix conflicts every 4 rows

use std::array;
use super::Workspace;

const TILE: usize = 8;
const HALF_TILE: usize = TILE / 2;

/// Block size for irregular shapes, large enough to reuse lines without thrashing at the edges
const IRREGULAR_BLOCK: usize = 14;

/// The graded transpose. Dispatches to a blocking strategy for the 32x32, 64x64 and 61x67
/// shapes and falls back to the row-wise scan for anything else
pub fn transpose_submit(ws: &mut Workspace) {
    match (ws.m(), ws.n()) {
        (32, 32) => transpose_tiled(ws),
        (64, 64) => transpose_split_tiles(ws),
        (61, 67) => transpose_blocked(ws, IRREGULAR_BLOCK),
        _ => transpose_row_wise(ws),
    }
}

/// 8x8 tiles. Tiles on the diagonal share sets between `A` and `B`, so each row is staged
/// through locals before any of it is written back
fn transpose_tiled(ws: &mut Workspace) {
    for ib in (0..ws.n()).step_by(TILE) {
        for jb in (0..ws.m()).step_by(TILE) {
            if ib == jb {
                for i in ib..ib + TILE {
                    let row: [i32; TILE] = array::from_fn(|k| ws.a(i, jb + k));
                    for (k, value) in row.into_iter().enumerate() {
                        ws.set_b(jb + k, i, value);
                    }
                }
            } else {
                for i in ib..ib + TILE {
                    for j in jb..jb + TILE {
                        let value = ws.a(i, j);
                        ws.set_b(j, i, value);
                    }
                }
            }
        }
    }
}

/// 8x8 tiles handled as four 4x4 quadrants, so at most 4 rows of `B` are live at once
///
/// The upper-right quadrant of `A` is parked in the upper-right of `B` while the upper rows are
/// in cache, then swapped into place as the lower-left quadrant of `A` is written
fn transpose_split_tiles(ws: &mut Workspace) {
    for ib in (0..ws.n()).step_by(TILE) {
        for jb in (0..ws.m()).step_by(TILE) {
            for i in ib..ib + HALF_TILE {
                let upper_left: [i32; HALF_TILE] = array::from_fn(|k| ws.a(i, jb + k));
                for (k, value) in upper_left.into_iter().enumerate() {
                    ws.set_b(jb + k, i, value);
                }
                let upper_right: [i32; HALF_TILE] = array::from_fn(|k| ws.a(i, jb + HALF_TILE + k));
                for (k, value) in upper_right.into_iter().enumerate() {
                    ws.set_b(jb + k, i + HALF_TILE, value);
                }
            }

            for k in 0..HALF_TILE {
                let parked: [i32; HALF_TILE] = array::from_fn(|c| ws.b(jb + k, ib + HALF_TILE + c));
                for c in 0..HALF_TILE {
                    let value = ws.a(ib + HALF_TILE + c, jb + k);
                    ws.set_b(jb + k, ib + HALF_TILE + c, value);
                }
                for (c, value) in parked.into_iter().enumerate() {
                    ws.set_b(jb + k + HALF_TILE, ib + c, value);
                }
            }

            for i in ib + HALF_TILE..ib + TILE {
                let lower_right: [i32; HALF_TILE] = array::from_fn(|k| ws.a(i, jb + HALF_TILE + k));
                for (k, value) in lower_right.into_iter().enumerate() {
                    ws.set_b(jb + HALF_TILE + k, i, value);
                }
            }
        }
    }
}

/// Square blocks of any size with the edges clamped, so partial blocks at the bottom and right
/// of the matrix stay in bounds. Works for every shape
pub fn transpose_blocked(ws: &mut Workspace, block: usize) {
    let (m, n) = (ws.m(), ws.n());
    let block = block.max(1);
    for ib in (0..n).step_by(block) {
        for jb in (0..m).step_by(block) {
            for i in ib..(ib + block).min(n) {
                for j in jb..(jb + block).min(m) {
                    let value = ws.a(i, j);
                    ws.set_b(j, i, value);
                }
            }
        }
    }
}

/// A simple baseline transpose, not optimised for the cache
pub fn transpose_row_wise(ws: &mut Workspace) {
    for i in 0..ws.n() {
        for j in 0..ws.m() {
            let value = ws.a(i, j);
            ws.set_b(j, i, value);
        }
    }
}
