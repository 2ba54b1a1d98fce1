use std::io;
use std::process;

use clap::{App, Arg};

use remindme_chatbot::{ChatbotConfig, ChatbotEngine, SessionLoop};

fn main() {
    env_logger::Builder::from_default_env()
        .format_timestamp_nanos()
        .init();

    let matches = App::new("remindme-chatbot")
        .about("Interactive reminder and event management chatbot")
        .arg(
            Arg::with_name("DATA_DIR")
                .takes_value(true)
                .index(1)
                .help("directory containing intents.json and entities.json (defaults to 'data')"),
        )
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .takes_value(true)
                .help("path to a JSON configuration file"),
        )
        .arg(
            Arg::with_name("threshold")
                .short("t")
                .long("threshold")
                .takes_value(true)
                .help("intent error threshold, overrides configuration and environment"),
        )
        .get_matches();

    let data_dir = matches.value_of("DATA_DIR").unwrap_or("data");

    let mut config = match matches.value_of("config") {
        Some(config_path) => match ChatbotConfig::from_path(config_path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Failed to load configuration: {}", err);
                process::exit(1);
            }
        },
        None => ChatbotConfig::default(),
    };
    config.apply_env_overrides();
    if let Some(raw_threshold) = matches.value_of("threshold") {
        match raw_threshold.parse::<f32>() {
            Ok(threshold) => config.intent.error_threshold = threshold,
            Err(_) => {
                eprintln!("Invalid threshold value: '{}'", raw_threshold);
                process::exit(1);
            }
        }
    }

    println!("Loading the chatbot engine...");
    let session_config = config.session.clone();
    let engine = match ChatbotEngine::from_path(data_dir, config) {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("Failed to load the chatbot engine: {}", err);
            process::exit(1);
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = SessionLoop::new(&engine, session_config, stdin.lock(), stdout.lock());
    if let Err(err) = session.run() {
        eprintln!("Session failed: {}", err);
        process::exit(1);
    }
}
