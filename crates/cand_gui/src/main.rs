mod app;
mod cli;

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result, anyhow};
use cand_core::{LabelingSession, discover, load_history, write_history};
use clap::Parser;
use eframe::{NativeOptions, egui};

use app::ViewerApp;
use cli::{Cli, ViewerConfig};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    match run(cli.into()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: ViewerConfig) -> Result<()> {
    let items = discover(&config.image_dir, &config.discovery).with_context(|| {
        format!("finding candidates under {}", config.image_dir.display())
    })?;
    let history = match &config.history_file {
        Some(path) => Some(
            load_history(path)
                .with_context(|| format!("reading history file {}", path.display()))?,
        ),
        None => None,
    };
    let mut session = LabelingSession::new(items, history.as_ref())
        .with_context(|| format!("nothing matching `{}`", config.discovery.pattern))?;

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| show_viewer(&mut session, &config)));
    let failure = match outcome {
        Ok(Ok(())) => return Ok(()),
        Ok(Err(e)) => anyhow!("viewer stopped with an error: {e}"),
        Err(_) => anyhow!("viewer panicked"),
    };

    save_on_failure(&session, &config.outfile);
    Err(failure)
}

/// Best-effort export after the viewer died. Failures are logged, not retried.
fn save_on_failure(session: &LabelingSession, outfile: &Path) {
    match write_history(&session.export(), outfile) {
        Ok(()) => tracing::info!("Saved labels to {} before exiting", outfile.display()),
        Err(e) => tracing::error!(
            "Could not save labels to {} before exiting: {e}",
            outfile.display()
        ),
    }
}

fn show_viewer(session: &mut LabelingSession, config: &ViewerConfig) -> eframe::Result<()> {
    let title = format!(
        "Transient candidates classifier {}",
        env!("CAND_VIEWER_VERSION")
    );
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(title.clone())
            .with_inner_size([1024.0, 800.0]),
        ..Default::default()
    };
    let app = ViewerApp::new(session, config.outfile.clone());
    eframe::run_native(&title, options, Box::new(move |_cc| Ok(Box::new(app))))
}
