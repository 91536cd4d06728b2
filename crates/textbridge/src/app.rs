use clap::{Arg, ArgAction, Command};

use textbridge_core::config::MAX_MESSAGING_TIMEOUT_MS;

pub fn build_cli() -> Command {
    Command::new("textbridge")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Read and replace the selected text of the focused application")
        .long_about(
            "textbridge talks to the accessibility subsystem to find the UI element that has \
             keyboard focus and reads or overwrites its selected text. Requires accessibility \
             permission (System Settings > Privacy & Security > Accessibility).",
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("timeout-ms")
                .long("timeout-ms")
                .help("How long to wait for an unresponsive application, in milliseconds")
                .value_parser(clap::value_parser!(u64).range(1..=MAX_MESSAGING_TIMEOUT_MS))
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        // Check subcommand
        .subcommand(
            Command::new("check")
                .about("Report whether accessibility permission is granted")
                .arg(json_arg()),
        )
        // Get subcommand
        .subcommand(
            Command::new("get")
                .about("Print the selected text of the focused element (empty if none)")
                .arg(json_arg()),
        )
        // Replace subcommand
        .subcommand(
            Command::new("replace")
                .about("Replace the selected text of the focused element")
                .arg(
                    Arg::new("text")
                        .help("Replacement text")
                        .required_unless_present("stdin")
                        .conflicts_with("stdin"),
                )
                .arg(
                    Arg::new("stdin")
                        .long("stdin")
                        .help("Read the replacement text from stdin")
                        .action(ArgAction::SetTrue),
                )
                .arg(json_arg()),
        )
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .help("Output in JSON format")
        .action(ArgAction::SetTrue)
}
