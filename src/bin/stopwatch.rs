use stopwatch::{
    app::TimerController,
    audio::{self, AudioCues, RodioAudio, SilentAudio},
    config::Config,
    gui::Gui,
    util::SystemClock,
};

use anyhow::{Error, Result};
use clap::Parser;
use eframe::egui;
use log::{info, warn};

fn open_audio(config: &Config) -> Box<dyn AudioCues> {
    if config.mute {
        return Box::new(SilentAudio);
    }

    match RodioAudio::new(&audio::sounds_dir(&config.assets)) {
        Ok(v) => Box::new(v),
        Err(e) => {
            warn!("Audio disabled: {:?}", e);
            Box::new(SilentAudio)
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let config = Config::parse();
    info!("Starting with {:?}", config);

    let mut viewport = egui::ViewportBuilder::default()
        .with_title("Stopwatch")
        .with_inner_size(config.window_size());
    if config.fullscreen {
        viewport = viewport.with_fullscreen(true).with_decorations(false);
    }

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Stopwatch",
        native_options,
        Box::new(move |cc| {
            let controller = TimerController::new(SystemClock::new(), open_audio(&config));
            Box::new(Gui::new(cc, controller, &config.assets))
        }),
    )
    .map_err(|e| Error::msg(e.to_string()))
}
