//! `conseil config` -- print the effective configuration.

use console::style;

use conseil_infra::config::render_config;

use crate::state::AppState;

pub fn show_config(state: &AppState, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&state.config)?);
        return Ok(());
    }

    if let Some(path) = &state.config_path {
        let note = if path.exists() { "" } else { " (not found, defaults)" };
        println!(
            "{}",
            style(format!("# {}{note}", path.display())).dim()
        );
    }
    print!("{}", render_config(&state.config)?);
    Ok(())
}
