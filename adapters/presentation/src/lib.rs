#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Audio and visual hook contracts for Hype Type adapters.
//!
//! The simulation never waits on presentation. Adapters implement
//! [`Presentation`] and feed the world's events through [`present`] once per
//! frame; every hook is fire-and-forget.

use glam::Vec2;
use hype_type_core::{Event, Palette, Rgb};
use std::{error::Error, fmt, str::FromStr};

/// Vertical offset between a struck enemy and its floating damage number.
pub const DAMAGE_NUMBER_RISE: f32 = 20.0;

/// Color used for floating damage numbers.
pub const DAMAGE_NUMBER_COLOR: Color = Color::from_rgb_u8(0xff, 0x44, 0x44);

/// RGBA color used when presenting effects.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self::from_rgb_u8(rgb.red(), rgb.green(), rgb.blue())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    /// Parses `#rrggbb` or `#rgb`, with or without the leading hash.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let digits = value.trim().trim_start_matches('#');
        if !digits.chars().all(|digit| digit.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigits {
                value: value.to_owned(),
            });
        }

        let nibbles: Vec<u8> = digits
            .bytes()
            .map(|digit| match digit {
                b'0'..=b'9' => digit - b'0',
                b'a'..=b'f' => digit - b'a' + 10,
                _ => digit - b'A' + 10,
            })
            .collect();
        match *nibbles.as_slice() {
            [r, g, b] => Ok(Self::from_rgb_u8(r * 17, g * 17, b * 17)),
            [r1, r2, g1, g2, b1, b2] => Ok(Self::from_rgb_u8(
                r1 * 16 + r2,
                g1 * 16 + g2,
                b1 * 16 + b2,
            )),
            _ => Err(ColorParseError::InvalidLength {
                value: value.to_owned(),
            }),
        }
    }
}

/// Errors raised while parsing hex color strings.
#[derive(Debug, PartialEq, Eq)]
pub enum ColorParseError {
    /// The string did not contain three or six hex digits.
    InvalidLength {
        /// Rejected input.
        value: String,
    },
    /// The string contained characters outside `0-9a-fA-F`.
    InvalidDigits {
        /// Rejected input.
        value: String,
    },
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength { value } => {
                write!(f, "expected #rgb or #rrggbb (received {value:?})")
            }
            Self::InvalidDigits { value } => {
                write!(f, "color contains non-hex digits (received {value:?})")
            }
        }
    }
}

impl Error for ColorParseError {}

/// Sounds the game asks adapters to play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// An enemy was destroyed.
    Defeat,
    /// An upgrade was purchased.
    Info,
}

impl SoundCue {
    /// Asset file conventionally bound to the cue.
    #[must_use]
    pub const fn asset(self) -> &'static str {
        match self {
            Self::Defeat => "cu1.mp3",
            Self::Info => "info.mp3",
        }
    }
}

/// Audio and visual provider driven by world events.
pub trait Presentation {
    /// Plays a one-shot sound.
    fn play_sound(&mut self, cue: SoundCue);

    /// Shows a floating damage number.
    fn spawn_damage_number(&mut self, position: Vec2, value: f32, color: Color);

    /// Bursts an enemy into fragments.
    fn spawn_defeat_fragments(&mut self, position: Vec2, color: Color);
}

/// Forwards presentation-relevant events to `presenter`.
pub fn present<P>(events: &[Event], palette: &Palette, presenter: &mut P)
where
    P: Presentation + ?Sized,
{
    let fragments = Color::from(palette.enemy);
    for event in events {
        match event {
            Event::EnemyHit {
                position, damage, ..
            } => presenter.spawn_damage_number(
                *position - Vec2::new(0.0, DAMAGE_NUMBER_RISE),
                *damage,
                DAMAGE_NUMBER_COLOR,
            ),
            Event::EnemyDefeated { position, .. } => {
                presenter.spawn_defeat_fragments(*position, fragments);
                presenter.play_sound(SoundCue::Defeat);
            }
            Event::UpgradeAcquired { .. } => presenter.play_sound(SoundCue::Info),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        let long: Color = "#ff4444".parse().expect("valid hex");
        assert_eq!(long, DAMAGE_NUMBER_COLOR);

        let short: Color = "fff".parse().expect("valid short hex");
        assert_eq!(short, Color::from_rgb_u8(255, 255, 255));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(matches!(
            "#12345".parse::<Color>(),
            Err(ColorParseError::InvalidLength { .. })
        ));
        assert!(matches!(
            "#gg0000".parse::<Color>(),
            Err(ColorParseError::InvalidDigits { .. })
        ));
        assert!(matches!(
            "#+ff".parse::<Color>(),
            Err(ColorParseError::InvalidDigits { .. })
        ));
    }

    #[test]
    fn palette_colors_convert() {
        let color = Color::from(Palette::STANDARD.enemy);
        assert_eq!(color, Color::from_rgb_u8(0xa2, 0x56, 0x5f));
    }
}
