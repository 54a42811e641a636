//! Parallax backdrop.
//!
//! Layers further back scroll slower. Each layer keeps its own offset and
//! wraps once a whole layer width has scrolled past, so the offset stays
//! bounded however long the run lasts.

use crate::surface::{Rgb, Surface};

/// Width of one repetition of a layer in world pixels
pub const LAYER_WIDTH: f64 = 1667.0;

/// One tiled line of a layer
struct Strip {
    pattern: &'static str,
    y: f64,
}

pub struct Layer {
    strips: &'static [Strip],
    speed_modifier: f64,
    color: Rgb,
    x: f64,
}

impl Layer {
    fn new(strips: &'static [Strip], speed_modifier: f64, color: Rgb) -> Self {
        Self {
            strips,
            speed_modifier,
            color,
            x: 0.0,
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn speed_modifier(&self) -> f64 {
        self.speed_modifier
    }

    fn update(&mut self, world_speed: f64) {
        if self.x < -LAYER_WIDTH {
            self.x = 0.0;
        } else {
            self.x -= world_speed * self.speed_modifier;
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        for strip in self.strips {
            surface.draw_strip(strip.pattern, strip.y, self.x, self.color);
        }
    }
}

static SKY: &[Strip] = &[
    Strip { pattern: "      .                *                .              ", y: 20.0 },
    Strip { pattern: "  *            .                   .          *        ", y: 60.0 },
    Strip { pattern: "           .          (_)                .            ", y: 100.0 },
];

static MOUNTAINS: &[Strip] = &[
    Strip { pattern: "            /\\                      /\\               ", y: 200.0 },
    Strip { pattern: "     /\\    /  \\        /\\         /  \\      /\\       ", y: 230.0 },
    Strip { pattern: "    /  \\  /    \\      /  \\   /\\  /    \\    /  \\      ", y: 260.0 },
];

static HILLS: &[Strip] = &[
    Strip { pattern: "        ____                ______                  ", y: 290.0 },
    Strip { pattern: "   ____/    \\______    ____/      \\___      _______  ", y: 320.0 },
];

static TREES: &[Strip] = &[
    Strip { pattern: "   ^        ^^           ^         ^^       ^       ", y: 340.0 },
    Strip { pattern: "  /|\\      /||\\         /|\\       /||\\     /|\\      ", y: 370.0 },
    Strip { pattern: "   |        ||           |         ||       |       ", y: 395.0 },
];

static GROUND: &[Strip] = &[
    Strip { pattern: "=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-", y: 420.0 },
    Strip { pattern: " .  ,   .    ,  .   ,    .  ,   .     ,  .   ,  .  ", y: 450.0 },
];

/// The five layers, back to front
pub struct Background {
    layers: [Layer; 5],
}

impl Default for Background {
    fn default() -> Self {
        Self::new()
    }
}

impl Background {
    pub fn new() -> Self {
        Self {
            layers: [
                Layer::new(SKY, 0.0, Rgb(200, 200, 255)),
                Layer::new(MOUNTAINS, 0.2, Rgb(110, 110, 150)),
                Layer::new(HILLS, 0.4, Rgb(70, 130, 90)),
                Layer::new(TREES, 0.8, Rgb(40, 160, 60)),
                Layer::new(GROUND, 1.0, Rgb(160, 120, 70)),
            ],
        }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Scrolls every layer by one frame's worth of world speed
    pub fn update(&mut self, world_speed: f64) {
        for layer in &mut self.layers {
            layer.update(world_speed);
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        for layer in &self.layers {
            layer.draw(surface);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};

    #[test]
    fn test_layers_scroll_at_their_own_rate() {
        let mut background = Background::new();
        background.update(3.0);
        let offsets: Vec<f64> = background.layers().iter().map(Layer::x).collect();
        let expected = [0.0, -0.6, -1.2, -2.4, -3.0];
        for (offset, expected) in offsets.iter().zip(expected) {
            assert!((offset - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_stationary_world_does_not_scroll() {
        let mut background = Background::new();
        for _ in 0..100 {
            background.update(0.0);
        }
        assert!(background.layers().iter().all(|layer| layer.x() == 0.0));
    }

    #[test]
    fn test_offset_wraps_after_a_full_layer() {
        let mut background = Background::new();
        for _ in 0..2000 {
            background.update(6.0);
            for layer in background.layers() {
                assert!(layer.x() >= -LAYER_WIDTH - 6.0 * layer.speed_modifier());
                assert!(layer.x() <= 0.0);
            }
        }
    }

    #[test]
    fn test_draws_back_to_front() {
        let background = Background::new();
        let mut surface = RecordingSurface::new();
        background.draw(&mut surface);

        let rows: Vec<f64> = surface
            .commands()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Strip { y, .. } => Some(*y),
                _ => None,
            })
            .collect();
        assert_eq!(rows.first(), Some(&20.0));
        assert_eq!(rows.last(), Some(&450.0));
        assert_eq!(rows.len(), 13);
    }
}
