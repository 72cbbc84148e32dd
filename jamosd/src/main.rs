//! # Jamos Host Daemon
//!
//! Main entry point for the Jamos host runtime.

use hal::ByteSource;
use jamosd::{
    HostRuntime, HostRuntimeConfig, HostRuntimeError, InputScript, RawModeGuard, ReaderSource,
    WriterSink,
};
use services_workspace_manager::TerminalConfig;
use std::env;
use std::fs;
use std::io;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("jamosd");

    let config = parse_args(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        print_usage(program);
        process::exit(1);
    });

    let result = match config.script.clone() {
        Some(text) => InputScript::from_text(&text)
            .map_err(HostRuntimeError::from)
            .and_then(|script| run(config, script.into_source(), WriterSink::stdout(), None)),
        None => run_interactive(config),
    };

    if let Err(e) = result {
        eprintln!("Runtime error: {}", e);
        process::exit(1);
    }
}

fn run_interactive(config: HostRuntimeConfig) -> Result<(), HostRuntimeError> {
    let guard = RawModeGuard::enable().map_err(|e| HostRuntimeError::Io(e.to_string()))?;
    match guard {
        Some(guard) => {
            eprint!("jamosd: raw terminal, press Ctrl+] to exit\r\n");
            let sink = WriterSink::stdout().with_crlf(true);
            run(config, ReaderSource::raw_stdin(), sink, Some(guard))
        }
        None => run(config, ReaderSource::stdin(), WriterSink::stdout(), None),
    }
}

fn run<Src: ByteSource>(
    config: HostRuntimeConfig,
    source: Src,
    sink: WriterSink<io::Stdout>,
    guard: Option<RawModeGuard>,
) -> Result<(), HostRuntimeError> {
    let dump_log = config.dump_log;
    let mut runtime = HostRuntime::new(config, source, sink)?;
    let result = runtime.run();
    drop(guard);

    if dump_log {
        for entry in runtime.session().logger().entries() {
            eprintln!("{}", entry);
        }
    }
    result
}

fn parse_args(args: &[String]) -> Result<HostRuntimeConfig, String> {
    let mut config = HostRuntimeConfig::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --config".to_string());
                }
                let text = fs::read_to_string(&args[i])
                    .map_err(|e| format!("Failed to read config file: {}", e))?;
                config.terminal = TerminalConfig::from_json(&text).map_err(|e| e.to_string())?;
            }
            "--script" | "-s" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --script".to_string());
                }
                let script_text = fs::read_to_string(&args[i])
                    .map_err(|e| format!("Failed to read script file: {}", e))?;
                config.script = Some(script_text);
            }
            "--max-steps" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --max-steps".to_string());
                }
                config.max_steps = args[i]
                    .parse()
                    .map_err(|_| format!("Invalid max-steps value: {}", args[i]))?;
            }
            "--dump-log" => {
                config.dump_log = true;
            }
            "--help" | "-h" => {
                print_usage(args.first().map(String::as_str).unwrap_or("jamosd"));
                process::exit(0);
            }
            other => {
                return Err(format!("Unknown option: {}", other));
            }
        }
        i += 1;
    }

    Ok(config)
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [OPTIONS]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --config <FILE>      Terminal config (JSON)");
    eprintln!("  -s, --script <FILE>      Key script to replay instead of stdin");
    eprintln!("                           (a terminal stdin runs raw; Ctrl+] exits)");
    eprintln!("  --max-steps <N>          Maximum input bytes to process (0 = unlimited)");
    eprintln!("  --dump-log               Print the session log to stderr on exit");
    eprintln!("  -h, --help               Show this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} --script demos/files.jkeys", program);
    eprintln!("  {} --config terminal.json --dump-log", program);
}
