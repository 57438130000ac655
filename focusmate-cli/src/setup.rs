use anyhow::{bail, Context, Result};
use std::io::{self, Write};

use focusmate_store::{open_store, Backend, Store};

use crate::config::{data_dir, save_config, Config};
use crate::state::config_path;

fn prompt(label: &str, default: &str) -> Result<String> {
    print!("{} [{}]: ", label, default);
    io::stdout().flush().ok();
    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    let s = s.trim().to_string();
    Ok(if s.is_empty() { default.to_string() } else { s })
}

pub fn run_setup(defaults: bool) -> Result<()> {
    println!("FocusMate setup\n");

    let mut cfg = Config::default();

    if !defaults {
        let tz = prompt("Timezone (IANA name, e.g. America/Chicago)", "UTC")?;
        let _: chrono_tz::Tz = tz
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))?;
        cfg.timer.timezone = tz;

        let minutes = prompt("Default focus minutes", "25")?;
        cfg.timer.default_minutes = minutes
            .parse()
            .with_context(|| format!("invalid minutes '{minutes}'"))?;
        if cfg.timer.default_minutes < 1 {
            bail!("default focus minutes must be at least 1");
        }

        let backend = prompt("Storage backend (json | memory)", "json")?;
        cfg.store.backend = match Backend::parse(&backend) {
            Some(b) => b,
            None => bail!("unknown backend '{backend}' (json | memory)"),
        };
    }

    save_config(&cfg)?;

    // Open the store once now so the data directory exists and the preset
    // catalog is seeded before the first real command.
    let dir = data_dir(&cfg)?;
    let store = open_store(cfg.store.backend, &dir)?;
    let presets = store.presets()?;

    println!("\nWrote {}", config_path()?.display());
    if cfg.store.backend == Backend::Json {
        println!("Data directory: {}", dir.display());
    } else {
        println!("Backend is memory: state lasts for one command only (good for trying things out).");
    }
    let names: Vec<&str> = presets.iter().map(|p| p.name.as_str()).collect();
    println!("Presets: {}", names.join(", "));

    println!("\nNext steps:");
    println!("- Add a task:      focusmate task add --title \"Write draft\" --priority 4 --due 2026-09-01 --target 120");
    println!("- See the plan:    focusmate plan");
    println!("- Start focusing:  focusmate focus --task 1 --preset classic");

    Ok(())
}
