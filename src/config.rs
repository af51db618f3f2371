use clap::Parser;

use std::path::PathBuf;

/// Full screen stopwatch with image based digits
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Config {
    /// Directory holding the digit, button and background images
    #[arg(long, env = "STOPWATCH_ASSETS", default_value = "assets")]
    pub assets: PathBuf,

    /// Disable sound effects
    #[arg(long)]
    pub mute: bool,

    /// Start fullscreen without window decorations
    #[arg(long)]
    pub fullscreen: bool,

    #[arg(long, default_value_t = 960.0)]
    pub width: f32,

    #[arg(long, default_value_t = 540.0)]
    pub height: f32,
}

impl Config {
    /// The stopwatch is always laid out in landscape, portrait sizes are rotated
    pub fn window_size(&self) -> [f32; 2] {
        if self.height > self.width {
            [self.height, self.width]
        } else {
            [self.width, self.height]
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["stopwatch"]).unwrap();
        assert!(!config.mute);
        assert!(!config.fullscreen);
        assert_eq!(config.window_size(), [960.0, 540.0]);
    }

    #[test]
    fn portrait_is_rotated() {
        let config =
            Config::try_parse_from(["stopwatch", "--width", "400", "--height", "800"]).unwrap();
        assert_eq!(config.window_size(), [800.0, 400.0]);
    }

    #[test]
    fn assets_flag() {
        let config =
            Config::try_parse_from(["stopwatch", "--assets", "/tmp/glyphs", "--mute"]).unwrap();
        assert_eq!(config.assets, PathBuf::from("/tmp/glyphs"));
        assert!(config.mute);
    }
}
