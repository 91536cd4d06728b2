use std::io::Read;

use clap::ArgMatches;
use serde::Serialize;
use tracing::{error, info, warn};

use textbridge_core::errors::TextBridgeError;
use textbridge_core::events;
use textbridge_core::{SelectionBridge, SystemAccessibility, TextBridgeConfig};

#[derive(Debug, Serialize)]
struct CheckOutput {
    trusted: bool,
}

#[derive(Debug, Serialize)]
struct GetOutput<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct ReplaceOutput {
    replaced: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_code: Option<&'static str>,
}

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup();

    let config = load_config_with_warning(matches);
    let bridge = SelectionBridge::from_config(&config);

    match matches.subcommand() {
        Some(("check", sub_matches)) => handle_check_command(&bridge, sub_matches),
        Some(("get", sub_matches)) => handle_get_command(&bridge, sub_matches),
        Some(("replace", sub_matches)) => handle_replace_command(&bridge, sub_matches),
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    }
}

/// Load config from files, then apply `--timeout-ms` on top.
///
/// Falls back to defaults if config loading fails, but notifies the user via:
/// - stderr message for immediate visibility
/// - structured log event `cli.config.load_failed` for debugging
fn load_config_with_warning(matches: &ArgMatches) -> TextBridgeConfig {
    let config = match TextBridgeConfig::load_hierarchy() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Could not load config: {}. Using defaults.\n\
                 Tip: Check ~/.textbridge/config.toml and ./.textbridge/config.toml for syntax errors.",
                e
            );
            warn!(
                event = "cli.config.load_failed",
                error = %e,
                "Config load failed, using defaults"
            );
            TextBridgeConfig::default()
        }
    };

    match matches.get_one::<u64>("timeout-ms") {
        Some(&timeout_ms) => config.with_messaging_timeout_ms(Some(timeout_ms)),
        None => config,
    }
}

fn handle_check_command(
    bridge: &SelectionBridge<SystemAccessibility>,
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");

    info!(event = "cli.check_started", json_output = json_output);

    let trusted = bridge.has_accessibility_permission();

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&CheckOutput { trusted })?
        );
    } else if trusted {
        println!("Accessibility permission: granted");
    } else {
        println!("Accessibility permission: not granted");
        println!(
            "Enable it in System Settings > Privacy & Security > Accessibility, then run again."
        );
    }

    info!(event = "cli.check_completed", trusted = trusted);
    Ok(())
}

fn handle_get_command(
    bridge: &SelectionBridge<SystemAccessibility>,
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");

    info!(event = "cli.get_started", json_output = json_output);

    // A failed read is an empty selection from the user's point of view.
    let text = match bridge.try_get_selected_text() {
        Ok(text) => text,
        Err(e) => {
            info!(
                event = "cli.get_empty",
                error_code = e.error_code(),
                error = %e
            );
            String::new()
        }
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&GetOutput { text: &text })?);
    } else {
        println!("{}", text);
    }

    info!(event = "cli.get_completed", text_len = text.len());
    Ok(())
}

fn handle_replace_command(
    bridge: &SelectionBridge<SystemAccessibility>,
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");

    let text = if matches.get_flag("stdin") {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        strip_trailing_newline(buffer)
    } else {
        matches
            .get_one::<String>("text")
            .cloned()
            .ok_or("Replacement text is required")?
    };

    info!(
        event = "cli.replace_started",
        json_output = json_output,
        text_len = text.len()
    );

    match bridge.try_replace_selected_text(&text) {
        Ok(()) => {
            if json_output {
                let output = ReplaceOutput {
                    replaced: true,
                    error_code: None,
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("Selection replaced.");
            }

            info!(event = "cli.replace_completed");
            Ok(())
        }
        Err(e) => {
            if json_output {
                let output = ReplaceOutput {
                    replaced: false,
                    error_code: Some(e.error_code()),
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            eprintln!("Could not replace selection: {}", e);
            if e.invites_fallback() {
                eprintln!("The focused element does not accept direct edits; paste instead.");
            }

            error!(
                event = "cli.replace_failed",
                error_code = e.error_code(),
                error = %e
            );
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

/// Drop one trailing line ending, so `textbridge get | textbridge replace --stdin` is stable.
fn strip_trailing_newline(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    text
}
