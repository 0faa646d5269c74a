//! FILENAME: app/src/main.rs
// PURPOSE: Command-line entry point: one ticker load, snapshot to stdout.
// FORMAT: seq|level|category|message

fn main() {
    app_lib::run();
}
