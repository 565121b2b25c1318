use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use ratatui::layout::{Constraint, Layout};
use tokio::sync::mpsc;

use auditview::action::Action;
use auditview::app::{App, Effect, Overlay};
use auditview::config::{Cli, ConfigFile, Settings};
use auditview::event::{key_to_action, AppEvent, EventHandler};
use auditview::host::{load_localizations, CatalogLocalizer, MemoryDataTable};
use auditview::widgets;
use auditview::worker::{LoadHandle, LoadRequest, LoadWorker};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Set up logging
    let _log_guard = match cli.log_file {
        Some(ref log_file) => {
            let file = std::fs::File::create(log_file)
                .wrap_err_with(|| format!("cannot create log file {}", log_file.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_writer(writer)
                .with_ansi(false)
                .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
                .init();
            Some(guard)
        }
        None => None,
    };

    let settings = Settings::resolve(cli, ConfigFile::load().unwrap_or_default());
    tracing::debug!("Resolved settings: {:?}", settings);

    let mut localizer = CatalogLocalizer::with_builtins(settings.locale.clone());
    if let Some(ref path) = settings.localizations {
        let extra = load_localizations(path)
            .wrap_err_with(|| format!("cannot load translations from {}", path.display()))?;
        localizer.extend(extra);
    }

    if settings.plain {
        return run_plain(settings, localizer);
    }
    run_tui(settings, localizer).await
}

fn run_plain(settings: Settings, localizer: CatalogLocalizer) -> Result<()> {
    let table = MemoryDataTable::load(&settings.data)
        .wrap_err_with(|| format!("cannot load {}", settings.data.display()))?;

    let mut app = App::new(
        settings.data.display().to_string(),
        settings.screen_parameters,
        localizer,
    );
    app.update(Action::DataLoaded(Box::new(table)));

    match app.rendered.data() {
        Some(render) => {
            print!("{}", render);
            Ok(())
        }
        None => match app.last_error {
            Some((msg, _)) => Err(color_eyre::eyre::eyre!(msg)),
            None => Ok(()),
        },
    }
}

async fn run_tui(settings: Settings, localizer: CatalogLocalizer) -> Result<()> {
    let mut app = App::new(
        settings.data.display().to_string(),
        settings.screen_parameters.clone(),
        localizer,
    );
    app.watch = settings.watch;

    // Set up channels
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    // Create worker
    let (worker, load_handle) = LoadWorker::new(settings.data.clone(), action_tx);
    tokio::spawn(worker.run());

    // Initial data load
    load_handle.send(LoadRequest::Load);

    let mut terminal = auditview::tui::init()?;
    let mut events = EventHandler::new(Duration::from_millis(settings.tick_ms));

    // Main loop
    loop {
        terminal.draw(|frame| render(&mut app, frame))?;

        tokio::select! {
            Some(event) = events.next() => {
                let action = match event {
                    AppEvent::Key(key) => key_to_action(key, &app.input_mode, &app.overlay),
                    AppEvent::Tick => Some(Action::Tick),
                    AppEvent::Resize => None,
                };
                if let Some(action) = action {
                    let effects = app.update(action);
                    handle_effects(effects, &load_handle);
                }
            }
            Some(action) = action_rx.recv() => {
                let effects = app.update(action);
                handle_effects(effects, &load_handle);
            }
        }

        if app.should_quit {
            break;
        }
    }

    auditview::tui::restore()?;

    Ok(())
}

fn render(app: &mut App, frame: &mut ratatui::Frame) {
    let area = frame.area();

    frame.render_widget(
        ratatui::widgets::Block::default()
            .style(ratatui::style::Style::default().bg(auditview::theme::BG_DARK)),
        area,
    );

    let layout = Layout::vertical([
        Constraint::Length(1), // Status bar
        Constraint::Fill(1),   // Grouped audit log
        Constraint::Length(1), // Footer
    ])
    .split(area);
    app.viewport_height = layout[1].height;

    widgets::status_bar::render(app, frame, layout[0]);
    widgets::audit_log::render(app, frame, layout[1]);
    widgets::footer::render(app, frame, layout[2]);

    if app.overlay == Overlay::Help {
        widgets::help_overlay::render(app.watch, frame, area);
    }

    widgets::error_toast::render(app, frame, area);
}

fn handle_effects(effects: Vec<Effect>, load_handle: &LoadHandle) {
    for effect in effects {
        match effect {
            Effect::Reload => load_handle.send(LoadRequest::Load),
            Effect::ReloadIfChanged => load_handle.send(LoadRequest::LoadIfChanged),
            Effect::Quit => {}
        }
    }
}
