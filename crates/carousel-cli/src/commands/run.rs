use std::io;
use std::time::Instant;

use anyhow::{bail, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::info;

use carousel_core::{AppConfig, CarouselConfig, Direction, Slide};
use carousel_tui::{
    app::App,
    event::{AppEvent, EventHandler, ImageLoadResult},
    input::{handle_key_event, Action},
    keymap::Keymap,
    track::timing::frame_interval,
};

pub fn run(config: &AppConfig, slides: Vec<Slide>) -> Result<()> {
    if slides.is_empty() {
        bail!("Nothing to show.\nPass image paths or URLs, or a manifest with --manifest.");
    }

    let keymap = Keymap::from_config(&config.keymap);
    let settings = &config.carousel;
    let start_index = settings.start_index.min(slides.len() - 1);

    let track = settings
        .track_options(&config.ui)
        .on_view_change(|index| info!(index, "View changed"));
    let carousel_config = CarouselConfig::new()
        .with_views(slides)
        .with_current_index(start_index)
        .with_track_options(track)
        .with_modal(settings.modal_context())
        .with_palette(config.ui.palette())
        .hide_controls_when_idle(settings.hide_controls_when_idle);

    // Create channel for async image loading results
    let (img_tx, mut img_rx) = mpsc::unbounded_channel::<ImageLoadResult>();
    let cache_dir = config.cache_dir();
    let mut app = App::new(
        carousel_config,
        settings.touch,
        keymap,
        Some(cache_dir.as_path()),
        img_tx,
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("Carousel"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let event_handler = EventHandler::new(config.ui.tick_rate_ms);
    let animation_interval = frame_interval(config.ui.animation_fps);

    app.mount();
    let result = event_loop(&mut terminal, &mut app, &event_handler, animation_interval, &mut img_rx);
    app.teardown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_handler: &EventHandler,
    animation_interval: std::time::Duration,
    img_rx: &mut mpsc::UnboundedReceiver<ImageLoadResult>,
) -> Result<()> {
    loop {
        // Process any completed image loads (non-blocking)
        while let Ok(result) = img_rx.try_recv() {
            app.apply_image(result);
        }

        app.tick(Instant::now());
        terminal.draw(|frame| app.draw(frame))?;

        // Run at frame rate while a transition or fresh input is in flight
        let event = if app.needs_fast_tick() {
            event_handler.next_within(animation_interval)?
        } else {
            event_handler.next()?
        };

        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => {
                    app.record_key_activity();
                    let action = handle_key_event(key, &app.keymap, app.pending_key);
                    handle_action(app, action);
                }
                AppEvent::Mouse(mouse) => app.handle_mouse(mouse),
                AppEvent::Resize(_, _) | AppEvent::FocusGained | AppEvent::FocusLost => {}
                AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_action(app: &mut App, action: Action) {
    if action != Action::PendingG {
        app.clear_pending_key();
    }
    if !matches!(action, Action::None | Action::PendingG) {
        app.clear_status();
    }

    let paging = matches!(
        action,
        Action::Previous | Action::Next | Action::First | Action::Last
    );
    if paging && !app.accepts_keyboard_navigation() {
        return;
    }

    match action {
        Action::Close => app.should_quit = true,
        Action::Previous => app.go(Direction::Previous),
        Action::Next => app.go(Direction::Next),
        Action::First => app.jump_to_first(),
        Action::Last => app.jump_to_last(),
        Action::ToggleFullscreen => app.toggle_fullscreen(),
        Action::OpenExternal => app.open_external(),
        Action::PendingG => app.pending_key = Some('g'),
        Action::None => {}
    }
}
