//! ASCII sprite sheets.
//!
//! Each sheet is a grid of frames: `rows[frame_y][frame_x]` is one frame,
//! stored as the text lines that make it up. Spaces are transparent. The
//! nominal frame size is in world pixels, matching the hitbox of whatever
//! draws with the sheet.

use crate::surface::Rgb;

type Frame = &'static [&'static str];

#[derive(Debug)]
pub struct SpriteSheet {
    pub name: &'static str,
    pub frame_width: f64,
    pub frame_height: f64,
    pub color: Rgb,
    pub rows: &'static [&'static [Frame]],
}

impl SpriteSheet {
    /// Frame at the given column and row, `None` when out of range
    pub fn frame(&self, frame_x: usize, frame_y: usize) -> Option<Frame> {
        self.rows.get(frame_y)?.get(frame_x).copied()
    }

    /// Number of frames in a row
    pub fn columns(&self, frame_y: usize) -> usize {
        self.rows.get(frame_y).map_or(0, |row| row.len())
    }

    /// Column to use for a looping animation whose counter runs past the art
    pub fn looping_column(&self, frame_x: usize, frame_y: usize) -> usize {
        match self.columns(frame_y) {
            0 => 0,
            columns => frame_x % columns,
        }
    }
}

/// Player rows: idle, jump, fall, run, hit, sit, roll
pub static PLAYER: SpriteSheet = SpriteSheet {
    name: "player",
    frame_width: 100.0,
    frame_height: 91.3,
    color: Rgb(230, 180, 110),
    rows: &[
        &[
            &[r"  __      ", r" /o \___  ", r"<_   ___)~", r"  |_| |_| "],
            &[r"  __      ", r" /o \___  ", r"<_   ___)/", r"  |_| |_| "],
        ],
        &[&[r"  __       ", r" /o \____  ", r"<_   ____)~", r"   ``  ``  "]],
        &[&[r"  __       ", r" /o \____  ", r"<_   ____)~", r"  /     \  "]],
        &[
            &[r"  __       ", r" /o \____  ", r"<_   ____)~", r"  /_/  \_\ "],
            &[r"  __       ", r" /o \____  ", r"<_   ____)~", r"  \_\  /_/ "],
        ],
        &[
            &[r"  __  *    ", r" /x \____  ", r"<_   ____)~", r"  /_/  \_\ "],
            &[r"* __     * ", r" /x \____  ", r"<_   ____)~", r"  /_/  \_\ "],
        ],
        &[&[r"  __    ", r" /o \   ", r"<_  |\  ", r"  |_|_)~"]],
        &[
            &[r"  .--.  ", r" / @@ \ ", r" \ @@ / ", r"  '--'  "],
            &[r"  .--.  ", r" / @  \ ", r" \  @ / ", r"  '--'  "],
            &[r"  .--.  ", r" /  @ \ ", r" \ @  / ", r"  '--'  "],
        ],
    ],
};

pub static FLYING_ENEMY: SpriteSheet = SpriteSheet {
    name: "fly",
    frame_width: 60.0,
    frame_height: 44.0,
    color: Rgb(180, 120, 220),
    rows: &[&[&[r"\(o)/", r" `-` "], &[r"_(o)_", r" `-` "]]],
};

pub static GROUND_ENEMY: SpriteSheet = SpriteSheet {
    name: "plant",
    frame_width: 60.0,
    frame_height: 87.0,
    color: Rgb(90, 200, 90),
    rows: &[&[
        &[r" @@@ ", r"(@_@)", r"  |  ", r" \|/ "],
        &[r" @@@ ", r"(@o@)", r"  |  ", r" \|/ "],
    ]],
};

pub static CLIMBING_ENEMY: SpriteSheet = SpriteSheet {
    name: "spider",
    frame_width: 120.0,
    frame_height: 144.0,
    color: Rgb(200, 70, 70),
    rows: &[&[
        &[r"  /\__/\  ", r" //(oo)\\ ", r"  \/  \/  "],
        &[r"  \/--\/  ", r" \\(oo)// ", r"  /\  /\  "],
    ]],
};

/// Five-frame impact burst, played once
pub static BOOM: SpriteSheet = SpriteSheet {
    name: "boom",
    frame_width: 100.0,
    frame_height: 90.0,
    color: Rgb(255, 170, 40),
    rows: &[&[
        &[r"  .  "],
        &[r" \|/ ", r"- * -", r" /|\ "],
        &[r"\ | /", r"--*--", r"/ | \"],
        &[r".  '  .", r"' (*) '", r".  ,  ."],
        &[r".     .", r"   .   ", r".     ."],
    ]],
};

/// Particle rows: dust, fire, splash; columns grow with particle size
pub static PARTICLES: SpriteSheet = SpriteSheet {
    name: "particles",
    frame_width: 10.0,
    frame_height: 10.0,
    color: Rgb(255, 120, 30),
    rows: &[
        &[&["."], &["o"]],
        &[&["'"], &["*"], &["@"]],
        &[&["."], &["~"], &["*"]],
    ],
};

pub static LIVES: SpriteSheet = SpriteSheet {
    name: "lives",
    frame_width: 25.0,
    frame_height: 25.0,
    color: Rgb(240, 80, 120),
    rows: &[&[&["<3"]]],
};
