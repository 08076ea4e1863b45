use timelane::cli::{Args, JumpArg, ResizeSpec};
use timelane::config::{self, AppSettings, PathConfig};
use timelane::core::event_bus::{EventBus, downcast_event};
use timelane::entities::{ItemStore, assign_lanes, max_overlap};
use timelane::widgets::timeline::timeline_events::{ItemResizedEvent, WindowChangedEvent};
use timelane::widgets::timeline::window::item_placement;
use timelane::widgets::timeline::{
    Direction, DragResizeController, DragUpdate, Pointer, TimelineConfig, TimelineState, detect_handle,
    render_timeline,
};

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, warn};

/// Pointer moves per scripted drag (consecutive deltas, like real motion events)
const DRAG_STEPS: usize = 4;

fn main() -> Result<()> {
    let args = Args::parse();

    // Create path configuration from CLI args and environment
    let path_config = PathConfig::from_env_and_cli(args.config_dir.clone());
    if let Err(e) = config::ensure_dirs(&path_config) {
        eprintln!("Warning: Failed to create application directories: {:#}", e);
    }

    init_logging(&args, &path_config)?;
    info!("Timelane starting...");
    debug!("Command-line args: {:?}", args);

    let settings_path = config::config_file(config::SETTINGS_FILE, &path_config);
    info!("Config path: {}", settings_path.display());
    let mut settings = AppSettings::load_or_default(&settings_path);

    // Items: CLI file → last file from settings → bundled demo
    let mut store = settings.open_items(args.items_file.as_deref())?;
    info!(
        "{} items, {} lanes (max overlap {})",
        store.len(),
        assign_lanes(&store.to_vec()).len(),
        max_overlap(&store.to_vec())
    );

    let bus = EventBus::new();
    bus.subscribe::<ItemResizedEvent, _>(|e| {
        info!("Item {} resized to {}..{}", e.item_id, e.start, e.end);
    });

    let mut state = settings.timeline.clone();
    apply_view_args(&args, &mut state, &store, &bus);

    let mut drag = DragResizeController::new(bus.emitter());
    let timeline_config = TimelineConfig::default();
    for resize in &args.resize {
        run_scripted_drag(resize, &mut store, &state, &timeline_config, &mut drag);
    }

    for event in bus.poll() {
        if let Some(WindowChangedEvent(window)) = downcast_event::<WindowChangedEvent>(&event) {
            debug!("Window now {} {}", window.granularity.as_str(), window.focus);
        }
    }

    print!("{}", render_timeline(&store, &state, &timeline_config, drag.preview()));

    if !args.no_save {
        settings.timeline = state;
        if let Some(path) = &args.items_file {
            settings.remember_items_file(path);
        }
        if let Err(e) = settings.save(&settings_path) {
            warn!("{:#}", e);
        }
    }
    Ok(())
}

/// Initialize env_logger: file target with `--log`, console otherwise.
fn init_logging(args: &Args, path_config: &PathConfig) -> Result<()> {
    // 0 (default) = warn, 1 (-v) = info, 2 (-vv) = debug, 3+ (-vvv) = trace
    let log_level = match args.verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    if let Some(log_path_opt) = &args.log_file {
        let log_path = log_path_opt
            .clone()
            .unwrap_or_else(|| config::data_file(config::LOG_FILE, path_config));
        let file = std::fs::File::create(&log_path)
            .with_context(|| format!("Failed to create log file: {}", log_path.display()))?;

        env_logger::Builder::new()
            .filter_level(log_level)
            .format_timestamp_millis()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();
        info!("Logging to file: {} (level: {:?})", log_path.display(), log_level);
    } else {
        // Console logging respects RUST_LOG if set
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level.as_str()))
            .format_timestamp_millis()
            .init();
    }
    Ok(())
}

/// Apply --view/--date/--step/--jump to the persisted window.
fn apply_view_args(args: &Args, state: &mut TimelineState, store: &ItemStore, bus: &EventBus) {
    let before = state.window;
    if let Some(view) = args.view {
        state.set_granularity(view);
    }
    if let Some(date) = args.date {
        state.navigate_to(date);
    }
    if let Some(steps) = args.step {
        state.step(steps);
    }
    if let Some(width) = args.width {
        state.set_grid_width(width);
    }
    if let Some(jump) = args.jump {
        let visible = timelane::widgets::timeline::navigation::has_visible_items(store.iter(), &state.columns());
        let direction = match jump {
            JumpArg::Prev => Direction::Previous,
            JumpArg::Next => Direction::Next,
        };
        if visible {
            info!("Window already shows items, --jump ignored");
        } else if !state.jump_to_closest(store.iter(), direction) {
            warn!("No item {:?} of {}", direction, state.window.focus);
        }
    }
    if state.window != before {
        bus.emit(WindowChangedEvent(state.window));
    }
}

/// Grab an item handle where the renderer would draw it and drag it.
fn run_scripted_drag(
    resize: &ResizeSpec,
    store: &mut ItemStore,
    state: &TimelineState,
    config: &TimelineConfig,
    drag: &mut DragResizeController,
) {
    let geometry = state.geometry();
    let columns = state.columns();
    let Some(placement) = store.get(resize.id).and_then(|item| item_placement(&columns, item)) else {
        warn!("Item {} is not fully visible in {}, cannot grab it", resize.id, state.label());
        return;
    };
    let Some(origin_x) = geometry.handle_x(placement, resize.handle) else {
        warn!("Grid has no usable width, skipping resize of {}", resize.id);
        return;
    };
    if detect_handle(origin_x, placement, &geometry, config.edge_threshold_px) != Some(resize.handle) {
        // Bar narrower than the grab zone: the other edge wins the hit test
        debug!("Handle {} of {} overlaps the opposite edge", resize.handle.as_str(), resize.id);
    }

    if !drag.begin(store, resize.id, resize.handle, Pointer::new(origin_x, 0.0)) {
        return;
    }
    let mut last = DragUpdate::Ignored;
    for step in 1..=DRAG_STEPS {
        let x = origin_x + resize.pixels * step as f32 / DRAG_STEPS as f32;
        last = drag.pointer_move(store, Pointer::new(x, 0.0), geometry);
    }
    match last {
        DragUpdate::Rejected => warn!("Resize of {} by {}px would invert it, kept last valid value", resize.id, resize.pixels),
        other => debug!("Resize of {} finished: {:?}", resize.id, other),
    }
    if let Some(preview) = drag.preview() {
        println!("{} {}: {} .. {}", resize.id, preview.name, preview.start, preview.end);
    }
    drag.release();
}
