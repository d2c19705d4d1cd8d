//! Responsive grid layout.
//!
//! Tiles are placed row-major on the z = 0 plane, horizontally centred and
//! vertically centred about the origin. The column count depends only on
//! the viewport width.

use glam::Vec3;

use crate::options::LayoutOptions;
use crate::scene::Tile;

/// Column count for a viewport `width` in pixels.
///
/// One column below the narrow breakpoint, two up to the wide breakpoint,
/// three from there on.
#[must_use]
pub fn columns_for_width(width: f32, options: &LayoutOptions) -> usize {
    if width < options.narrow_breakpoint {
        1
    } else if width < options.wide_breakpoint {
        2
    } else {
        3
    }
}

/// Grid geometry for a given tile count and column count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    /// Columns per row.
    pub columns: usize,
    /// Number of rows.
    pub rows: usize,
    /// Distance between cell centres.
    pub spacing: f32,
    /// Y of the first row, so the grid is centred vertically.
    pub vertical_offset: f32,
}

impl GridLayout {
    /// Grid for `count` tiles in a viewport `width` pixels wide.
    #[must_use]
    pub fn new(count: usize, width: f32, options: &LayoutOptions) -> Self {
        let columns = columns_for_width(width, options);
        let rows = count.div_ceil(columns);
        let total_height = rows.saturating_sub(1) as f32 * options.spacing;
        Self {
            columns,
            rows,
            spacing: options.spacing,
            vertical_offset: total_height / 2.0,
        }
    }

    /// Resting position of the tile at layout index `index`.
    #[must_use]
    pub fn position(&self, index: usize) -> Vec3 {
        let col = index % self.columns;
        let row = index / self.columns;
        let x = col as f32 * self.spacing - (self.columns - 1) as f32 * self.spacing / 2.0;
        let y = -(row as f32) * self.spacing + self.vertical_offset;
        Vec3::new(x, y, 0.0)
    }
}

/// Rewrite `base_position` for every tile, in collection order.
///
/// Only `base_position` is touched; hover and rotation state survive a
/// relayout. Idempotent for a fixed width and collection.
pub fn apply(width: f32, tiles: &mut [Tile], options: &LayoutOptions) -> GridLayout {
    let grid = GridLayout::new(tiles.len(), width, options);
    for (index, tile) in tiles.iter_mut().enumerate() {
        tile.base_position = grid.position(index);
    }
    log::debug!(
        "layout: {} tiles in {} columns x {} rows (width {width})",
        tiles.len(),
        grid.columns,
        grid.rows
    );
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::primitive::box_asset;
    use crate::scene::{NodeId, Project, TileId};

    fn tiles(n: u32) -> Vec<Tile> {
        (0..n)
            .map(|i| {
                let project = Project::new(format!("P{i}"), "#", 0);
                let (body, label) = (NodeId(2 * i), NodeId(2 * i + 1));
                Tile::new(TileId(i), &project, box_asset(3.0), body, label, 2.2)
            })
            .collect()
    }

    #[test]
    fn columns_follow_breakpoints() {
        let opts = LayoutOptions::default();
        assert_eq!(columns_for_width(320.0, &opts), 1);
        assert_eq!(columns_for_width(599.9, &opts), 1);
        assert_eq!(columns_for_width(600.0, &opts), 2);
        assert_eq!(columns_for_width(899.0, &opts), 2);
        assert_eq!(columns_for_width(900.0, &opts), 3);
        assert_eq!(columns_for_width(4000.0, &opts), 3);
    }

    #[test]
    fn columns_are_monotone_in_width() {
        let opts = LayoutOptions::default();
        let mut previous = 0;
        for w in (0..2000).step_by(25) {
            let cols = columns_for_width(w as f32, &opts);
            assert!((1..=3).contains(&cols));
            assert!(cols >= previous);
            previous = cols;
        }
    }

    #[test]
    fn narrow_viewport_stacks_a_single_column() {
        let opts = LayoutOptions::default();
        let mut t = tiles(4);
        let _ = apply(500.0, &mut t, &opts);
        for pair in t.windows(2) {
            assert_eq!(pair[0].base_position.x, 0.0);
            let step = pair[0].base_position.y - pair[1].base_position.y;
            assert!((step - opts.spacing).abs() < 1e-5);
        }
    }

    #[test]
    fn nine_tiles_wide_form_a_centred_square() {
        let opts = LayoutOptions::default();
        let mut t = tiles(9);
        let grid = apply(1000.0, &mut t, &opts);
        assert_eq!(grid.rows, 3);
        assert_eq!(grid.vertical_offset, 5.0);
        assert_eq!(t[4].base_position, Vec3::new(0.0, -opts.spacing + grid.vertical_offset, 0.0));
        assert_eq!(t[0].base_position, Vec3::new(-5.0, 5.0, 0.0));
        assert_eq!(t[8].base_position, Vec3::new(5.0, -5.0, 0.0));
    }

    #[test]
    fn layout_is_idempotent_and_leaves_hover_alone() {
        let opts = LayoutOptions::default();
        let mut t = tiles(5);
        t[2].is_hovered = true;
        t[2].rotation_y = 1.0;
        let _ = apply(700.0, &mut t, &opts);
        let first: Vec<_> = t.iter().map(|x| x.base_position).collect();
        let _ = apply(700.0, &mut t, &opts);
        let second: Vec<_> = t.iter().map(|x| x.base_position).collect();
        assert_eq!(first, second);
        assert!(t[2].is_hovered);
        assert_eq!(t[2].rotation_y, 1.0);
    }

    #[test]
    fn empty_collection_is_fine() {
        let grid = apply(1000.0, &mut [], &LayoutOptions::default());
        assert_eq!(grid.rows, 0);
        assert_eq!(grid.vertical_offset, 0.0);
    }
}
