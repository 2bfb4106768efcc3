//! City weather form
//!
//! FRAMEWORK PATTERN: EffectRuntime loop
//! 1. Event (keyboard) -> WeatherApp.handle_event() -> Actions
//! 2. Actions dispatched to EffectStoreWithMiddleware
//! 3. Reducer updates state and returns effects
//! 4. Effects handled by TaskManager (one task per request)
//! 5. If state changed, re-render
//!
//! # Usage
//!
//! ```sh
//! OPENWEATHER_API_KEY=... cityweather
//! OPENWEATHER_API_KEY=... cityweather --city London --clear-stale
//! CITYWEATHER_LOG=/tmp/cityweather.log RUST_LOG=debug cityweather --api-key ...
//! ```

use std::cell::RefCell;
use std::io;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use cityweather::action::Action;
use cityweather::api::{failure_message, WeatherClient};
use cityweather::components::{Component, WeatherApp, WeatherAppProps};
use cityweather::config::Args;
use cityweather::effect::Effect;
use cityweather::logging::{action_logger, init_tracing};
use cityweather::reducer::reducer;
use cityweather::state::{AppState, StalePolicy, LOADING_ANIM_TICK_MS};
use cityweather_core::{
    EffectContext, EffectRuntime, EffectStoreWithMiddleware, EventKind, EventOutcome,
};

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    init_tracing();

    // Validate configuration before entering TUI mode
    let client = match args.client_config() {
        Ok(config) => match WeatherClient::new(config) {
            Ok(client) => client,
            Err(e) => {
                eprintln!("Error: could not create HTTP client: {e}");
                std::process::exit(1);
            }
        },
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Pass --api-key or set OPENWEATHER_API_KEY.");
            std::process::exit(1);
        }
    };

    info!(
        city = args.initial_city(),
        policy = ?args.stale_policy(),
        "Starting cityweather"
    );

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app and capture result
    let result = run_app(
        &mut terminal,
        client,
        args.stale_policy(),
        args.initial_city(),
    )
    .await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "Event loop failed");
    }
    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    client: WeatherClient,
    policy: StalePolicy,
    initial_city: Option<&str>,
) -> io::Result<()> {
    let store = EffectStoreWithMiddleware::new(AppState::new(policy), reducer, action_logger());

    let mut runtime = EffectRuntime::from_store(store);

    // Tick timer for the loading spinner
    runtime
        .subscriptions()
        .interval("tick", Duration::from_millis(LOADING_ANIM_TICK_MS), || {
            Action::Tick
        });

    let mut app = WeatherApp::new();
    if let Some(city) = initial_city {
        app.form_mut().set_city(city);
        runtime.enqueue(Action::WeatherFetch(city.to_string()));
    }

    let app = RefCell::new(app);

    runtime
        .run(
            terminal,
            |frame, area, state| {
                let props = WeatherAppProps {
                    state,
                    is_focused: true,
                };
                app.borrow_mut().render(frame, area, props);
            },
            |event, state| map_event(&mut app.borrow_mut(), event, state),
            |action| matches!(action, Action::Quit),
            |effect, ctx| handle_effect(&client, effect, ctx),
        )
        .await
}

fn map_event(app: &mut WeatherApp, event: &EventKind, state: &AppState) -> EventOutcome<Action> {
    // Terminals that report releases would otherwise type every character twice
    if matches!(event, EventKind::Key(_)) && !event.is_key_press() {
        return EventOutcome::ignored();
    }

    let props = WeatherAppProps {
        state,
        is_focused: true,
    };
    // Keystrokes change the form's local input, which the store never sees
    EventOutcome::from_actions(app.handle_event(event, props)).with_render()
}

/// Handle effects by spawning tasks
fn handle_effect(client: &WeatherClient, effect: Effect, ctx: &mut EffectContext<Action>) {
    let key = effect.task_key();
    match effect {
        Effect::FetchWeather { city, .. } => {
            let client = client.clone();
            ctx.tasks().spawn(key, async move {
                match client.current_weather(&city).await {
                    Ok(payload) => Action::WeatherDidLoad(payload),
                    Err(e) => Action::WeatherDidError(failure_message(&e)),
                }
            });
        }
    }
}
