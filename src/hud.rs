use crate::session::{Outcome, SessionState};
use crate::sprites::LIVES;
use crate::surface::{Point, Rect, Rgb, Surface, TextAlign};

const LIFE_ICON_SIZE: f64 = 25.0;

/// Score, clock and lives in the top left; the verdict once the run ends
#[derive(Debug, Default, Clone, Copy)]
pub struct Hud;

impl Hud {
    pub fn draw(&self, session: &SessionState, debug: bool, width: f64, height: f64, surface: &mut dyn Surface) {
        surface.fill_text(
            &format!("Score: {}", session.score),
            Point::new(20.0, 20.0),
            TextAlign::Left,
            Rgb::WHITE,
        );
        surface.fill_text(
            &format!("Time: {:.1}", session.remaining_seconds()),
            Point::new(20.0, 50.0),
            TextAlign::Left,
            Rgb::WHITE,
        );

        for i in 0..session.lives {
            let dest = Rect::new(
                LIFE_ICON_SIZE * f64::from(i) + 20.0,
                95.0,
                LIFE_ICON_SIZE,
                LIFE_ICON_SIZE,
            );
            surface.draw_sprite(&LIVES, 0, 0, dest);
        }

        if debug {
            surface.fill_text("[debug]", Point::new(width - 100.0, 20.0), TextAlign::Left, Rgb::GRAY);
        }

        if let Some(outcome) = session.outcome() {
            let (title, subtitle, color) = match outcome {
                Outcome::Win => ("You Win!", "That is some good rolling!", Rgb::YELLOW),
                Outcome::Lose => ("Game Over", "Better luck next time!", Rgb::RED),
            };
            let center = Point::new(width * 0.5, height * 0.5);
            surface.fill_text(title, Point::new(center.x, center.y - 20.0), TextAlign::Center, color);
            surface.fill_text(subtitle, Point::new(center.x, center.y + 20.0), TextAlign::Center, Rgb::WHITE);
        }
    }
}
