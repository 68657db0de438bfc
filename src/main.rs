use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use ratatui::{backend::CrosstermBackend, Terminal};
use seeded_life::{
    ui::{self, Action, Monitor},
    Cli, Simulation,
};
use std::{
    error::Error,
    fs::File,
    io,
    path::Path,
    time::{Duration, Instant},
};

/// Redraw interval while no timer is running.
const IDLE_POLL: Duration = Duration::from_millis(100);

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_secs()
        .try_init();
    Ok(())
}

/// Sets up the terminal, starts a seeded game and runs the event loop until quit.
///
/// # Errors
///
/// Returns an error if the options are invalid or terminal manipulation fails.
fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }
    let settings = cli.settings()?;

    let mut sim = Simulation::new(settings)?;
    sim.start();
    if cli.paused {
        sim.pause();
    }
    info!(
        "seeded {} cells: {:?}",
        sim.grid().population(),
        sim.initial_seeds()
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut sim);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    sim: &mut Simulation,
) -> Result<(), Box<dyn Error>> {
    let mut monitor = Monitor::new();

    loop {
        monitor.refresh();
        terminal.draw(|f| ui::draw(f, &*sim, monitor.memory_kb()))?;

        let timeout = sim
            .time_until_tick(Instant::now())
            .map_or(IDLE_POLL, |remaining| remaining.min(IDLE_POLL));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match Action::from_key(key.code) {
                        Some(Action::Quit) => break,
                        Some(action) => {
                            if let Err(e) = action.apply(sim) {
                                error!("{e}");
                            }
                        }
                        None => {}
                    }
                }
            }
        }

        sim.tick(Instant::now());
    }

    info!("quit after {} ticks", sim.ticks());
    Ok(())
}
