// Keysim CLI
// Drives a simulated keyboard from the demo sequence, a script file or
// steps given on the command line

use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::Parser;

use keysim_core::{demo_script, Config, ConsoleSink, Keyboard, Script};

/// Keyboard state-dispatch simulator
#[derive(Parser, Debug)]
#[command(name = "keysim")]
#[command(author = "keysim contributors")]
#[command(version)]
#[command(about = "Simulate modifier-dependent key presses with rebindable Alt commands", long_about = None)]
struct Args {
    /// TOML configuration file (defaults to ~/.config/keysim/config.toml)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Run steps from a script file, one per line
    #[arg(short, long, value_name = "SCRIPT", conflicts_with = "demo")]
    script: Option<PathBuf>,

    /// Run the built-in demo sequence
    #[arg(long)]
    demo: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Validate config and exit
    #[arg(long)]
    check_config: bool,

    /// Print triggers and Alt bindings, then exit
    #[arg(long)]
    list_bindings: bool,

    /// Steps to run, e.g. `q shift q undo` or `"rebind q Open => Close"`
    #[arg(value_name = "STEP")]
    steps: Vec<String>,
}

struct Application {
    config: Config,
    args: Args,
}

impl Application {
    fn new(args: Args) -> anyhow::Result<Self> {
        let config = match &args.config {
            Some(path) => Config::from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => Config::load_default().context("failed to load default config")?,
        };
        Ok(Self { config, args })
    }

    fn validate(&self) -> anyhow::Result<()> {
        println!("Configuration is valid");
        println!(
            "  {} keys, {} triggers, {} alt bindings",
            self.config.keys.len(),
            self.config.transitions.len(),
            self.config.alt_bindings.len()
        );
        Ok(())
    }

    fn list_bindings(&self) {
        let mut triggers: Vec<_> = self.config.transitions.iter().collect();
        triggers.sort();
        println!("Triggers:");
        for (key, state) in triggers {
            println!("  {} -> {}", key, state);
        }

        println!("Alt bindings:");
        for spec in &self.config.alt_bindings {
            println!("  alt+{}: {} / {}", spec.key, spec.perform, spec.revert);
        }
    }

    /// Script file wins over positional steps; with neither, the demo runs
    fn resolve_script(&self) -> anyhow::Result<Script> {
        if let Some(path) = &self.args.script {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read script {}", path.display()))?;
            return Script::parse(&text)
                .with_context(|| format!("invalid script {}", path.display()));
        }

        if !self.args.demo && !self.args.steps.is_empty() {
            return Script::from_args(&self.args.steps).context("invalid step");
        }

        demo_script(&self.config.keys)
            .ok_or_else(|| anyhow!("the demo needs at least six configured keys"))
    }

    fn run(&self) -> anyhow::Result<()> {
        let script = self.resolve_script()?;
        log::info!("running {} steps", script.len());

        let mut keyboard: Keyboard = self.config.build_keyboard(ConsoleSink);
        script.run(&mut keyboard);

        log::info!(
            "finished in {} state with {} history entries",
            keyboard.current_state(),
            keyboard.history().len()
        );
        Ok(())
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let app = Application::new(args)?;

    if app.args.check_config {
        return app.validate();
    }

    if app.args.list_bindings {
        app.list_bindings();
        return Ok(());
    }

    app.run()
}
