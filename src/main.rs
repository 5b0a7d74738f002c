//! speakit main entry point
//!
//! The main loop monitors three sources:
//! 1. stdin (user keyboard input) - edits the form and submits it
//! 2. the speech service - lifecycle and catalog notifications, polled on a tick
//! 3. Signals (SIGWINCH for resize) - redraws the form at the new width

use log::{debug, error, info};
use mio::{Events, Interest, Poll, Token};
use nix::libc;
use nix::sys::signal::{self, SigHandler, Signal};
use speakit::config::Config;
use speakit::controller::Controller;
use speakit::input::{create_default_keymap, FormKeyHandler, HandlerAction};
use speakit::speech::create_service;
use speakit::terminal::{get_terminal_size, set_raw_mode, TermiosGuard};
use speakit::ui::Ui;
use speakit::Result;
use std::io::{self, Read};
use std::os::unix::io::AsRawFd;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Token for stdin in mio poll
const STDIN: Token = Token(0);

/// Tick for pumping speech service notifications
const SERVICE_TICK: Duration = Duration::from_millis(100);

/// Global flag set by SIGWINCH handler
static RESIZE_PENDING: AtomicBool = AtomicBool::new(false);

/// SIGWINCH handler - sets flag when terminal is resized
extern "C" fn handle_sigwinch(_: libc::c_int) {
    RESIZE_PENDING.store(true, Ordering::Relaxed);
}

fn main() {
    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let debug_mode = args.iter().any(|arg| arg == "--debug" || arg == "-d");

    // Initialize logger
    if debug_mode {
        // Debug mode: write to speakit.log file
        use std::fs::OpenOptions;
        match OpenOptions::new()
            .create(true)
            .append(true)
            .open("speakit.log")
        {
            Ok(log_file) => {
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Debug)
                    .target(env_logger::Target::Pipe(Box::new(log_file)))
                    .init();
            }
            Err(e) => {
                eprintln!(
                    "Warning: Failed to open speakit.log for debug logging: {}",
                    e
                );
                eprintln!("Continuing without file logging...");
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Warn)
                    .init();
            }
        }

        info!(
            "speakit version {} starting (debug mode, logging to speakit.log)",
            speakit::VERSION
        );
    } else {
        // Normal mode: minimal logging to stderr, only errors
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Error)
            .init();
    }

    // Run the application
    if let Err(e) = run() {
        error!("Fatal error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    debug!("Initializing speakit");

    // Verify stdin is a TTY - the form needs interactive terminal access
    let stdin_fd = io::stdin().as_raw_fd();
    if unsafe { libc::isatty(stdin_fd) } == 0 {
        eprintln!("Error: speakit requires an interactive terminal (stdin is not a TTY)");
        eprintln!("Usage: Run speakit directly in a terminal, not through pipes or redirects");
        process::exit(1);
    }

    // Raw mode lets the form capture individual keypresses and escape
    // sequences; the guard restores the terminal on any exit path
    let original_termios = set_raw_mode(stdin_fd)?;
    let _guard = TermiosGuard::new(stdin_fd, original_termios);

    let (cols, _rows) = get_terminal_size(stdin_fd)?;
    info!("Terminal width: {}", cols);

    // Startup defaults for the sliders and preferred voice
    let config = Config::load()?;
    info!("Configuration loaded from {:?}", config.path());

    // Speech service and the controller that owns it
    let service = create_service()?;
    let mut controller = Controller::new(service, &config);

    // Populate the voice selector; the catalog may still be empty here if
    // the engine fills it asynchronously - a VoicesChanged notification
    // triggers a reload later
    if let Err(e) = controller.load_voices() {
        error!("Initial voice load failed: {}", e);
    }

    let keymap = create_default_keymap();
    info!("Key handler initialized with {} bindings", keymap.len());
    let mut handler = FormKeyHandler::new(keymap);

    let mut ui = Ui::new(cols);

    // Set up signal handler for window resize
    unsafe {
        signal::signal(Signal::SIGWINCH, SigHandler::Handler(handle_sigwinch)).map_err(|e| {
            speakit::SpeakItError::Terminal(format!("Failed to set SIGWINCH handler: {}", e))
        })?;
    }

    // Set up event loop - stdin readiness plus a tick for service events
    let mut poll = Poll::new()?;
    let mut events = Events::with_capacity(16);
    let mut stdin_source = mio::unix::SourceFd(&stdin_fd);
    poll.registry()
        .register(&mut stdin_source, STDIN, Interest::READABLE)?;

    info!("speakit ready - entering event loop");
    ui.draw(&controller)?;

    loop {
        // Check for pending resize
        if RESIZE_PENDING.swap(false, Ordering::Relaxed) {
            let (new_cols, _) = get_terminal_size(stdin_fd)?;
            info!("Terminal resized to {} columns", new_cols);
            ui.resize(new_cols);
            ui.draw(&controller)?;
        }

        if let Err(e) = poll.poll(&mut events, Some(SERVICE_TICK)) {
            if e.kind() == io::ErrorKind::Interrupted {
                debug!("poll interrupted by signal");
                continue;
            }
            return Err(e.into());
        }

        for event in events.iter() {
            if event.token() == STDIN {
                match handle_stdin(&mut handler, &mut controller)? {
                    HandlerAction::Quit => {
                        info!("Exiting");
                        return Ok(());
                    }
                    HandlerAction::Handled => {}
                }
            }
        }

        // Lifecycle and catalog notifications from the engine
        controller.pump_events();

        if controller.take_dirty() {
            ui.draw(&controller)?;
        }
    }
}

/// Handle user input from stdin
///
/// Each read chunk is processed as one key sequence; escape sequences
/// arrive whole from the terminal.
fn handle_stdin(handler: &mut FormKeyHandler, controller: &mut Controller) -> Result<HandlerAction> {
    let mut buf = [0u8; 4096];

    let n = io::stdin().read(&mut buf)?;
    if n == 0 {
        return Ok(HandlerAction::Handled);
    }

    handler.process_key(&buf[..n], controller)
}
