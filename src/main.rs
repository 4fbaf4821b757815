mod app;
mod data;
mod media;
mod player;
mod ui;
mod utils;

use anyhow::Result;
use media::local::ClipSource;

fn main() -> Result<()> {
    env_logger::init();

    let config = data::config::Config::load_or_default()?;
    let theme = data::theme_loader::ThemeLoader::load(&config.theme);

    // first argument wins over the configured clip
    let source = std::env::args()
        .nth(1)
        .and_then(|a| ClipSource::parse(&a))
        .or_else(|| ClipSource::parse(&config.source));

    let mut app = app::state::AppState::new(config, theme);
    app::event_loop::run(&mut app, source)
}
