//! xlib-probe - Example caller for the bindings
//!
//! Loads libX11, opens a display and reports what the query accessors return.
//! Optionally creates and maps a window and pumps its events.

use std::env;
use std::process;
use std::time::{Duration, Instant};

use xlib_bind::event::{
    CLIENT_MESSAGE, CONFIGURE_NOTIFY, DESTROY_NOTIFY, EXPOSE, EXPOSURE_MASK, KEY_PRESS,
    KEY_PRESS_MASK, STRUCTURE_NOTIFY_MASK,
};
use xlib_bind::{Display, Geometry, LoadConfig, WindowAttributes, XEvent, Xlib, SYMBOLS};

/// Probe version
const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_usage() {
    println!("xlib-probe v{}", VERSION);
    println!("Query an X server through runtime-loaded Xlib bindings");
    println!();
    println!("Usage: xlib-probe [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -display <name>       Display to open (default: $DISPLAY)");
    println!("  -library <name>       Shared library to load (default: $XLIB_BIND_LIBRARY, libX11.so)");
    println!("  -window               Create and map a test window, then pump events");
    println!("  -timeout <secs>       Stop pumping events after this many seconds (default: 10)");
    println!("  -list-symbols         Print the bound symbol table and exit");
    println!("  -h, --help            Show this help message");
    println!();
    println!("Examples:");
    println!("  xlib-probe -display :0");
    println!("  xlib-probe -library /usr/lib/libX11.so.6 -window -timeout 30");
    println!();
}

fn list_symbols() {
    println!("Bound symbols ({}):", SYMBOLS.len());
    for sig in SYMBOLS {
        println!("  {}", sig);
    }
}

#[derive(Debug)]
struct Config {
    display: Option<String>,
    library: Option<String>,
    window: bool,
    timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            display: None,
            library: None,
            window: false,
            timeout: Duration::from_secs(10),
        }
    }
}

fn parse_args() -> Result<Config, String> {
    let mut config = Config::default();
    let args: Vec<String> = env::args().collect();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                process::exit(0);
            }
            "-list-symbols" => {
                list_symbols();
                process::exit(0);
            }
            "-display" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for -display".to_string());
                }
                config.display = Some(args[i].clone());
            }
            "-library" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for -library".to_string());
                }
                config.library = Some(args[i].clone());
            }
            "-window" => {
                config.window = true;
            }
            "-timeout" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for -timeout".to_string());
                }
                let secs: u64 = args[i]
                    .parse()
                    .map_err(|_| "Invalid timeout".to_string())?;
                config.timeout = Duration::from_secs(secs);
            }
            arg => {
                return Err(format!("Unknown option: {}", arg));
            }
        }
        i += 1;
    }

    Ok(config)
}

unsafe fn report(xlib: &Xlib, display: Display) {
    let screen = xlib.default_screen(display);
    println!("Display string:      {}", xlib.display_string(display).unwrap_or_default());
    println!("Vendor:              {}", xlib.server_vendor(display).unwrap_or_default());
    println!("Vendor release:      {}", xlib.vendor_release(display));
    println!(
        "Protocol:            {}.{}",
        xlib.protocol_version(display),
        xlib.protocol_revision(display)
    );
    println!("Connection number:   {}", xlib.connection_number(display));
    println!("Screens:             {}", xlib.screen_count(display));
    println!("Default screen:      {}", screen);
    println!("Root window:         {}", xlib.root_window(display, screen));
    println!("Default depth:       {}", xlib.default_depth(display, screen));
    println!("Depths:              {:?}", xlib.list_depths(display, screen).unwrap_or_default());
    println!("Display cells:       {}", xlib.display_cells(display, screen));
    println!("Display planes:      {}", xlib.display_planes(display, screen));
    println!("Black pixel:         0x{:x}", xlib.black_pixel(display, screen));
    println!("White pixel:         0x{:x}", xlib.white_pixel(display, screen));
    println!("Default colormap:    {}", xlib.default_colormap(display, screen));
    println!("Default visual:      {}", xlib.default_visual(display, screen));
    println!("Default GC:          {}", xlib.default_gc(display, screen));
    println!("Max request size:    {}", xlib.max_request_size(display));
    println!("Ext. request size:   {}", xlib.extended_max_request_size(display));
    println!("Next request:        {}", xlib.next_request(display));
    println!("Last processed:      {}", xlib.last_known_request_processed(display));
    println!("Queue length:        {}", xlib.q_length(display));
}

unsafe fn run_window(xlib: &Xlib, display: Display, timeout: Duration) -> xlib_bind::Result<()> {
    let screen = xlib.default_screen(display);
    let root = xlib.root_window(display, screen);
    let attributes = WindowAttributes::new()
        .background_pixel(xlib.white_pixel(display, screen))
        .border_pixel(xlib.black_pixel(display, screen));

    let window = xlib.create_window(display, root, Geometry::new(0, 0, 400, 300), 1, &attributes);
    if window.is_null() {
        log::error!("XCreateWindow returned None");
        return Ok(());
    }

    xlib.store_name(display, window, "xlib-probe")?;
    let wm_protocols = xlib.intern_atom(display, "WM_PROTOCOLS", false)?;
    let wm_delete = xlib.intern_atom(display, "WM_DELETE_WINDOW", false)?;
    xlib.set_wm_protocols(display, window, &[wm_delete]);
    xlib.select_input(display, window, EXPOSURE_MASK | KEY_PRESS_MASK | STRUCTURE_NOTIFY_MASK);
    xlib.map_window(display, window);
    xlib.flush(display);
    log::info!("Mapped window {}", window);

    let deadline = Instant::now() + timeout;
    let mut event = XEvent::new();
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            log::info!("Timeout reached");
            break;
        }
        if !xlib.wait_for_event(display, Some(remaining))? {
            continue;
        }

        xlib.next_event(display, &mut event);
        log::debug!("Event: {:?}", event);
        match event.kind() {
            EXPOSE => log::info!("Expose on {}", event.window()),
            CONFIGURE_NOTIFY => log::debug!("Configure on {}", event.window()),
            KEY_PRESS => {
                log::info!("Key press, exiting");
                break;
            }
            CLIENT_MESSAGE
                if event.message_type() == wm_protocols && event.protocol_atom() == Some(wm_delete) =>
            {
                log::info!("Window manager closed the window");
                break;
            }
            DESTROY_NOTIFY => break,
            _ => {}
        }
    }

    Ok(())
}

fn main() {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command line arguments
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {}", err);
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    let load_config = match config.library {
        Some(ref name) => LoadConfig::library(name.clone()),
        None => LoadConfig::from_env(),
    };

    // Binding failures are fatal
    let xlib = match Xlib::open_with(&load_config) {
        Ok(xlib) => xlib,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    log::info!("Loaded {}", xlib.library_name().unwrap_or("Xlib"));

    println!("DISPLAY:             {}", env::var("DISPLAY").unwrap_or_default());
    println!("All planes:          0x{:x}", xlib.all_planes());

    let display = match xlib.open_display(config.display.as_deref()) {
        Ok(display) if !display.is_null() => display,
        Ok(_) => {
            eprintln!("Error: Cannot open display");
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let result = unsafe {
        report(&xlib, display);
        let result = if config.window {
            run_window(&xlib, display, config.timeout)
        } else {
            Ok(())
        };
        xlib.close_display(display);
        result
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
