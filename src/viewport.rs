//! World to screen projection and the visibility test used to cull layers.

use crate::rotation::{rotate_point, Rotation};

/// Answers whether a world cell can be seen this frame.
pub trait ViewportQuery {
    fn is_outside_screen(&self, world_x: i32, world_y: i32, rotation: Rotation) -> bool;
}

// =============================================================================
// ZOOM
// =============================================================================

/// Sprite resolution levels, smallest first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Zoom {
    Sgfx,
    Mgfx,
    #[default]
    Gfx,
}

impl Zoom {
    pub fn all() -> &'static [Zoom] {
        &[Zoom::Sgfx, Zoom::Mgfx, Zoom::Gfx]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Zoom::Sgfx => "SGFX",
            Zoom::Mgfx => "MGFX",
            Zoom::Gfx => "GFX",
        }
    }

    /// Tile size in pixels as (width, height)
    pub fn tile_size(&self) -> (i32, i32) {
        match self {
            Zoom::Sgfx => (16, 8),
            Zoom::Mgfx => (32, 16),
            Zoom::Gfx => (64, 32),
        }
    }

    pub fn tile_width_half(&self) -> i32 {
        self.tile_size().0 / 2
    }

    pub fn tile_height_half(&self) -> i32 {
        self.tile_size().1 / 2
    }

    /// Pixel height of one elevation step
    pub fn elevation(&self) -> i32 {
        match self {
            Zoom::Sgfx => 5,
            Zoom::Mgfx => 10,
            Zoom::Gfx => 20,
        }
    }

    /// Next larger zoom; stays at GFX.
    pub fn zoom_in(&self) -> Zoom {
        match self {
            Zoom::Sgfx => Zoom::Mgfx,
            Zoom::Mgfx | Zoom::Gfx => Zoom::Gfx,
        }
    }

    /// Next smaller zoom; stays at SGFX.
    pub fn zoom_out(&self) -> Zoom {
        match self {
            Zoom::Gfx => Zoom::Mgfx,
            Zoom::Mgfx | Zoom::Sgfx => Zoom::Sgfx,
        }
    }
}

// =============================================================================
// PROJECTION
// =============================================================================

/// Isometric projection of world cells for a world of a given size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IsoProjection {
    pub world_width: usize,
    pub world_height: usize,
    pub zoom: Zoom,
}

impl IsoProjection {
    pub fn new(world_width: usize, world_height: usize, zoom: Zoom) -> Self {
        Self {
            world_width,
            world_height,
            zoom,
        }
    }

    /// Screen position of the top-left corner of a cell's sprite.
    pub fn world_to_screen(&self, x: i32, y: i32, rotation: Rotation) -> (i32, i32) {
        let (rx, ry) = rotate_point(
            x,
            y,
            self.world_width as i32,
            self.world_height as i32,
            rotation,
        );

        (
            (rx - ry) * self.zoom.tile_width_half(),
            (rx + ry) * self.zoom.tile_height_half(),
        )
    }
}

/// Axis aligned rectangle in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenBounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ScreenBounds {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn overlaps(&self, x: i32, y: i32, width: i32, height: i32) -> bool {
        x < self.x + self.width && x + width > self.x && y < self.y + self.height && y + height > self.y
    }
}

/// Camera state read by viewport selection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub projection: IsoProjection,
    /// Screen-space translation applied to every projected cell
    pub offset_x: i32,
    pub offset_y: i32,
    pub screen: ScreenBounds,
}

impl Camera {
    pub fn new(projection: IsoProjection, screen: ScreenBounds) -> Self {
        Self {
            projection,
            offset_x: 0,
            offset_y: 0,
            screen,
        }
    }

    pub fn zoom(&self) -> Zoom {
        self.projection.zoom
    }

    pub fn set_zoom(&mut self, zoom: Zoom) {
        self.projection.zoom = zoom;
    }
}

impl ViewportQuery for Camera {
    fn is_outside_screen(&self, world_x: i32, world_y: i32, rotation: Rotation) -> bool {
        let (sx, sy) = self.projection.world_to_screen(world_x, world_y, rotation);
        let (tile_width, tile_height) = self.projection.zoom.tile_size();
        // Leave room for sprites raised above the tile
        let raise = self.projection.zoom.elevation();

        !self.screen.overlaps(
            sx + self.offset_x,
            sy + self.offset_y - raise,
            tile_width,
            tile_height + raise,
        )
    }
}
