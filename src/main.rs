// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! deepracer CLI - drive and inspect a DeepRacer from the terminal

use std::env;
use std::process::ExitCode;

use anyhow::{bail, Context};
use serde_json::Value;

use deepracer_control::{Credentials, VehicleClient, VehicleConfig};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("deepracer_control=info")),
        )
        .init();

    let mut args: Vec<String> = env::args().skip(1).collect();
    let host = take_option(&mut args, "--host");

    let Some(command) = args.first().cloned() else {
        print_usage();
        return ExitCode::from(1);
    };

    match command.as_str() {
        "--help" | "-h" | "help" => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        "--version" | "-v" | "version" => {
            println!("deepracer {}", deepracer_control::VERSION);
            return ExitCode::SUCCESS;
        }
        _ => {}
    }

    match run(&command, &args[1..], host) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"deepracer - DeepRacer vehicle control

USAGE:
    deepracer [--host <ip>] <COMMAND> [ARGS]

ENVIRONMENT:
    DEEPRACER_PASSWORD   Device password (required)
    DEEPRACER_HOST       Device IP or hostname (default 127.0.0.1)
    DEEPRACER_BASE_URL   Full base URL override, e.g. https://10.0.0.5:8443/

COMMANDS:
    info                               Show battery, calibration, models and network
    battery                            Show battery level
    usb                                Show USB connection state
    network                            Show network details
    models                             List models on the car
    uploaded-models                    List uploaded models
    load <name>                        Load a model
    upload <path> <name>               Upload a model archive
    auto                               Stop, then switch to autonomous mode
    manual                             Stop, then switch to manual mode
    start                              Start the car
    stop                               Stop the car
    throttle <percent>                 Set max autonomous throttle
    move <angle> <throttle> <speed>    Manual drive command
    calibration                        Show angle and throttle calibration
    calibration-mode                   Enter calibration mode
    help                               Show this help message
    version                            Show version information

EXAMPLES:
    DEEPRACER_PASSWORD=secret deepracer --host 192.168.1.10 info
    deepracer upload ./model.tar.gz my-model
    deepracer move 0.0 0.4 0.5
"#
    );
}

/// Remove `--name value` from the argument list
fn take_option(args: &mut Vec<String>, name: &str) -> Option<String> {
    let idx = args.iter().position(|a| a == name)?;
    if idx + 1 >= args.len() {
        args.remove(idx);
        return None;
    }
    let value = args.remove(idx + 1);
    args.remove(idx);
    Some(value)
}

fn connect(host: Option<String>) -> anyhow::Result<VehicleClient> {
    let mut credentials = Credentials::from_env()?;
    if let Some(host) = host {
        credentials = credentials.with_host(host);
    }
    let client = VehicleClient::with_config(credentials, VehicleConfig::from_env())?;
    Ok(client)
}

fn arg<'a>(args: &'a [String], idx: usize, name: &str) -> anyhow::Result<&'a str> {
    match args.get(idx) {
        Some(value) => Ok(value),
        None => bail!("missing argument <{}>", name),
    }
}

fn number(args: &[String], idx: usize, name: &str) -> anyhow::Result<f64> {
    let raw = arg(args, idx, name)?;
    raw.parse()
        .with_context(|| format!("<{}> must be a number, got '{}'", name, raw))
}

fn print_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(command: &str, args: &[String], host: Option<String>) -> anyhow::Result<()> {
    let mut car = connect(host)?;

    match command {
        "info" => println!("{}", car.vehicle_info()?),
        "battery" => println!("{}", car.battery_status()?),
        "usb" => print_json(&car.is_usb_connected()?)?,
        "network" => print_json(&car.network_details()?)?,
        "models" => print_json(&car.models()?)?,
        "uploaded-models" => print_json(&car.uploaded_models()?)?,
        "load" => print_json(&car.load_model(arg(args, 0, "name")?)?)?,
        "upload" => {
            let path = arg(args, 0, "path")?;
            let name = arg(args, 1, "name")?;
            let response = car
                .upload_model(path, name)
                .with_context(|| format!("uploading {}", path))?;
            print_json(&response)?;
        }
        "auto" => print_json(&car.set_autonomous_mode()?)?,
        "manual" => print_json(&car.set_manual_mode()?)?,
        "start" => print_json(&car.start_car()?)?,
        "stop" => print_json(&car.stop_car()?)?,
        "throttle" => {
            let raw = arg(args, 0, "percent")?;
            let percent: u32 = raw
                .parse()
                .with_context(|| format!("<percent> must be a whole number, got '{}'", raw))?;
            print_json(&car.set_throttle_percent(percent)?)?;
        }
        "move" => {
            let angle = number(args, 0, "angle")?;
            let throttle = number(args, 1, "throttle")?;
            let speed = number(args, 2, "speed")?;
            print_json(&car.move_car(angle, throttle, speed)?)?;
        }
        "calibration" => {
            println!("Angle: {}", car.calibration_angle()?);
            println!("Throttle: {}", car.calibration_throttle()?);
        }
        "calibration-mode" => print_json(&car.set_calibration_mode()?)?,
        cmd => bail!("unknown command: {} (see `deepracer help`)", cmd),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_take_option() {
        let mut list = args(&["--host", "10.0.0.5", "battery"]);
        assert_eq!(take_option(&mut list, "--host").as_deref(), Some("10.0.0.5"));
        assert_eq!(list, args(&["battery"]));

        let mut list = args(&["battery"]);
        assert_eq!(take_option(&mut list, "--host"), None);
    }

    #[test]
    fn test_number_args() {
        let list = args(&["0.5", "fast"]);
        assert_eq!(number(&list, 0, "angle").unwrap(), 0.5);
        assert!(number(&list, 1, "throttle").is_err());
        assert!(number(&list, 2, "speed").is_err());
    }
}
