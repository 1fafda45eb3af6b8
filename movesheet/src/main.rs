//! Terminal viewer for move and ability CSV sheets.

use std::cell::RefCell;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::OnceLock;

use clap::{Parser, ValueEnum};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use movesheet::action::Action;
use movesheet::audio::{self, ClipCache};
use movesheet::config::{DEFAULT_LOG_FILE, DEFAULT_RESOURCES, DEFAULT_VOLUME, Settings};
use movesheet::effect::Effect;
use movesheet::loader::{self, LoadError};
use movesheet::reducer::reducer;
use movesheet::schema::{AbilityRecord, MoveRecord};
use movesheet::state::{AppState, LoadOrigin, SheetKind};
use movesheet::ui::SheetUi;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SheetArg {
    Moves,
    Abilities,
}

impl From<SheetArg> for SheetKind {
    fn from(arg: SheetArg) -> Self {
        match arg {
            SheetArg::Moves => SheetKind::Moves,
            SheetArg::Abilities => SheetKind::Abilities,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "movesheet")]
#[command(about = "Browse move and ability CSV sheets in the terminal")]
struct Args {
    /// Directory holding the sheets, audio and icons
    #[arg(long, default_value = DEFAULT_RESOURCES)]
    resources: PathBuf,

    /// Fetch resources over HTTP from this base URL instead
    #[arg(long)]
    base_url: Option<String>,

    /// Moves sheet path or URL
    #[arg(long)]
    moves: Option<String>,

    /// Abilities sheet path or URL
    #[arg(long)]
    abilities: Option<String>,

    /// Sheet shown at startup
    #[arg(long, value_enum, default_value_t = SheetArg::Moves)]
    sheet: SheetArg,

    /// Disable the scroll tick
    #[arg(long)]
    mute: bool,

    /// Scroll tick volume (0.0 to 1.0)
    #[arg(long, default_value_t = DEFAULT_VOLUME)]
    volume: f32,

    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum SheetComponentId {
    Main,
    Picker,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum SheetContext {
    Main,
    Picker,
}

impl EventRoutingState<SheetComponentId, SheetContext> for AppState {
    fn focused(&self) -> Option<SheetComponentId> {
        if self.picker.open {
            Some(SheetComponentId::Picker)
        } else {
            Some(SheetComponentId::Main)
        }
    }

    fn modal(&self) -> Option<SheetComponentId> {
        if self.picker.open {
            Some(SheetComponentId::Picker)
        } else {
            None
        }
    }

    fn binding_context(&self, id: SheetComponentId) -> SheetContext {
        match id {
            SheetComponentId::Main => SheetContext::Main,
            SheetComponentId::Picker => SheetContext::Picker,
        }
    }

    fn default_context(&self) -> SheetContext {
        SheetContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_file);

    let settings = Settings::locate(&args.resources, args.base_url.as_deref())
        .with_moves(args.moves.as_deref())
        .with_abilities(args.abilities.as_deref())
        .with_sound(args.volume, args.mute)
        .with_start_sheet(args.sheet.into());
    log::info!(
        "movesheet starting: moves={} abilities={}",
        settings.moves,
        settings.abilities
    );

    let debug = DebugSession::new(args.debug);
    let state = debug
        .load_state_or_else_async(move || async move {
            let mut state = AppState::new(settings);
            if let Ok(size) = crossterm::terminal::size() {
                state.terminal_size = size;
            }
            Ok::<AppState, io::Error>(state)
        })
        .await
        .map_err(debug_error)?;
    let replay_actions = debug.load_replay_items().map_err(debug_error)?;
    let (middleware, recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions).await;

    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug.save_actions(recorder.as_ref()).map_err(debug_error)?;
    log::info!("movesheet exiting");
    Ok(())
}

/// Logs go to a file so they never draw over the terminal UI.
fn init_logging(path: &Path) {
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(path) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(SheetUi::new()));
    let mut bus: EventBus<AppState, Action, SheetComponentId, SheetContext> = EventBus::new();
    let keybindings: Keybindings<SheetContext> = Keybindings::new();

    let ui_main = Rc::clone(&ui);
    bus.register(SheetComponentId::Main, move |event, state| {
        ui_main.borrow_mut().handle_main_event(&event.kind, state)
    });

    let ui_picker = Rc::clone(&ui);
    bus.register(SheetComponentId::Picker, move |event, state| {
        ui_picker
            .borrow_mut()
            .handle_picker_event(&event.kind, state)
    });

    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(width, height) => {
            HandlerResponse::action(Action::UiTerminalResize(width, height)).with_render()
        }
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |_runtime| {},
            &mut bus,
            &keybindings,
            |frame, area, state, _render_ctx, event_ctx| {
                let areas = ui.borrow_mut().render(frame, area, state);
                event_ctx.set_component_area(SheetComponentId::Main, areas.main);
                match areas.picker {
                    Some(picker_area) => {
                        event_ctx.set_component_area(SheetComponentId::Picker, picker_area);
                    }
                    None => {
                        event_ctx.component_areas.remove(&SheetComponentId::Picker);
                    }
                }
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

static SCROLL_CLIP: OnceLock<ClipCache> = OnceLock::new();

fn log_load_failure(sheet: SheetKind, origin: LoadOrigin, error: &LoadError) {
    let kind = if error.is_remote() { "network" } else { "file" };
    match origin {
        LoadOrigin::Auto => log::warn!("auto-load of {} failed ({kind}): {error}", sheet.noun()),
        LoadOrigin::Picked => {
            log::error!("could not load picked {} sheet ({kind}): {error}", sheet.noun())
        }
    }
}

fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::LoadMoves { source, origin } => {
            ctx.tasks().spawn(TaskKey::new("moves_sheet"), async move {
                match loader::load_sheet::<MoveRecord>(&source).await {
                    Ok(moves) => {
                        log::info!("loaded {} moves from {source}", moves.len());
                        Action::MovesDidLoad {
                            origin,
                            source: source.file_name(),
                            moves,
                        }
                    }
                    Err(error) => {
                        log_load_failure(SheetKind::Moves, origin, &error);
                        Action::MovesDidError {
                            origin,
                            error: error.to_string(),
                        }
                    }
                }
            });
        }
        Effect::LoadAbilities { source, origin } => {
            ctx.tasks().spawn(TaskKey::new("abilities_sheet"), async move {
                match loader::load_sheet::<AbilityRecord>(&source).await {
                    Ok(abilities) => {
                        log::info!("loaded {} abilities from {source}", abilities.len());
                        Action::AbilitiesDidLoad {
                            origin,
                            source: source.file_name(),
                            abilities,
                        }
                    }
                    Err(error) => {
                        log_load_failure(SheetKind::Abilities, origin, &error);
                        Action::AbilitiesDidError {
                            origin,
                            error: error.to_string(),
                        }
                    }
                }
            });
        }
        Effect::PlayScrollTick { source, volume } => {
            ctx.tasks().spawn(TaskKey::new("scroll_tick"), async move {
                let clip = SCROLL_CLIP
                    .get_or_init(ClipCache::new)
                    .get_or_load(|| loader::load_bytes(&source))
                    .await;
                let Some(clip) = clip else {
                    return Action::SoundDidError(format!("no scroll tick at {source}"));
                };
                match tokio::task::spawn_blocking(move || audio::play_wav(clip, volume)).await {
                    Ok(Ok(())) => Action::SoundDidPlay,
                    Ok(Err(error)) => {
                        log::debug!("scroll tick failed: {error}");
                        Action::SoundDidError(error)
                    }
                    Err(error) => {
                        log::debug!("scroll tick task failed: {error}");
                        Action::SoundDidError(error.to_string())
                    }
                }
            });
        }
    }
}
