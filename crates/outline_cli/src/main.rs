//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `outline_core` linkage with deterministic output.
//! - Round-trip an outline text file: `outline_cli <path>` imports it and
//!   prints the normalized export.

use outline_core::{
    export_outline, import_outline, init_logging_with, visible_flat_list, LoggingConfig,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    match LoggingConfig::from_env() {
        Ok(Some(config)) => {
            if let Err(err) = init_logging_with(config) {
                eprintln!("logging disabled: {err}");
            }
        }
        Ok(None) => {}
        Err(err) => eprintln!("logging disabled: {err}"),
    }

    println!("outline_core ping={}", outline_core::ping());
    println!("outline_core version={}", outline_core::core_version());

    let Some(path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };
    let source = match std::fs::read_to_string(&path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("failed to read `{path}`: {err}");
            return ExitCode::FAILURE;
        }
    };

    let store = import_outline(&source);
    let visible = visible_flat_list(&store, store.root_id());
    println!("items={} visible={}", store.len() - 1, visible.len());
    println!("{}", export_outline(&store));
    ExitCode::SUCCESS
}
