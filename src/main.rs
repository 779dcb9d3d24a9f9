#![allow(non_snake_case)]
use chrono::Local;
use latex_calc::calculator::config::CalculatorConfig;
use latex_calc::calculator::trace::LogTrace;
use latex_calc::calculator::{Calculator, is_equivalent};
use latex_calc::symbolic::symbolic_traits::NativeBackend;
use log::info;
use simplelog::{
    ColorChoice, CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::fs::File;
use std::path::Path;
use std::process::ExitCode;

const USAGE: &str = "usage:
  latex_calc [--config <file.toml>] eval <latex>
  latex_calc [--config <file.toml>] judge <user answer> <correct answer>";

fn init_logger(level: LevelFilter, log_dir: Option<&Path>) {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];
    if let Some(dir) = log_dir {
        let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
        let name = dir.join(format!("log_{}.txt", date_and_time));
        match File::create(&name) {
            Ok(file) => loggers.push(WriteLogger::new(level, Config::default(), file)),
            Err(err) => eprintln!("cannot create log file {}: {}", name.display(), err),
        }
    }
    let _ = CombinedLogger::init(loggers);
}

fn usage_error(message: &str) -> ExitCode {
    eprintln!("{}\n{}", message, USAGE);
    ExitCode::from(2)
}

fn main() -> ExitCode {
    let mut args: Vec<String> = std::env::args().skip(1).collect();

    let config = if args.first().map(String::as_str) == Some("--config") {
        if args.len() < 2 {
            return usage_error("--config needs a file");
        }
        let path = args.remove(1);
        args.remove(0);
        match CalculatorConfig::load(Path::new(&path)) {
            Ok(config) => config,
            Err(err) => return usage_error(&err.to_string()),
        }
    } else {
        CalculatorConfig::default()
    };

    let level = match config.level_filter() {
        Ok(level) => level,
        Err(err) => return usage_error(&err.to_string()),
    };
    if let Some(level) = level {
        init_logger(level, config.log_file.as_deref());
    }

    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["eval", latex] => {
            let calculator = Calculator::from_config(NativeBackend, &config);
            let calculator = if level == Some(LevelFilter::Debug) {
                calculator.with_trace(&LogTrace)
            } else {
                calculator
            };
            println!("{}", calculator.evaluate(latex));
        }
        ["judge", user, correct] => {
            let verdict = is_equivalent(user, correct);
            info!("judged {:?} against {:?}: {}", user, correct, verdict);
            println!("{}", verdict);
        }
        _ => return usage_error("unknown command"),
    }
    ExitCode::SUCCESS
}
