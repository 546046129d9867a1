use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use owo_colors::OwoColorize;
use termine_core::ics::{generate_ics, ics_file_name};
use termine_core::{CalendarEvent, Config};

use crate::google::{self, AuthError, GoogleCalendar};
use crate::{pdf, render};

pub struct ConvertOptions {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub config_path: PathBuf,
    /// Upload to Google Calendar if the config enables it
    pub upload: bool,
}

#[derive(Debug, Default)]
struct RunSummary {
    documents: usize,
    appointments: usize,
    written: usize,
    uploaded: usize,
    skipped: usize,
    failed: usize,
}

pub async fn run(options: ConvertOptions) -> Result<()> {
    let config = Config::load_or_init(&options.config_path)
        .with_context(|| format!("Failed to load config from {}", options.config_path.display()))?;

    let documents = find_documents(&options.input_dir)?;

    if documents.is_empty() {
        println!(
            "No PDF files found in {}",
            options.input_dir.display().to_string().dimmed()
        );
        return Ok(());
    }

    std::fs::create_dir_all(&options.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            options.output_dir.display()
        )
    })?;

    let calendar = if options.upload && config.google_calendar_enabled {
        connect(&config).await
    } else {
        None
    };

    let mut summary = RunSummary::default();

    for (i, document) in documents.iter().enumerate() {
        println!("{}", render::render_document(document));

        if let Err(e) = process_document(
            document,
            &config,
            &options.output_dir,
            calendar.as_ref(),
            &mut summary,
        )
        .await
        {
            println!("{}", render::render_error("Failed:", &e));
            summary.failed += 1;
        }

        // Add spacing between documents (but not after the last one)
        if i < documents.len() - 1 {
            println!();
        }
    }

    println!("\n{}", render_summary(&summary, calendar.is_some()));

    if summary.failed > 0 {
        anyhow::bail!(
            "{} {} failed",
            summary.failed,
            render::pluralize("document", summary.failed)
        );
    }

    Ok(())
}

/// PDF files directly inside `dir`, sorted by file name.
fn find_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read input directory {}", dir.display()))?;

    let mut documents = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && pdf::is_pdf(&path) {
            documents.push(path);
        }
    }

    documents.sort();
    Ok(documents)
}

async fn connect(config: &Config) -> Option<GoogleCalendar> {
    match google::obtain_credentials().await {
        Ok(authorization) => Some(GoogleCalendar::new(
            authorization.client(),
            &config.google_calendar_id,
        )),
        Err(AuthError::Unavailable(path)) => {
            println!("{}", google::app_config::setup_instructions(&path).yellow());
            println!("Skipping Google Calendar upload.\n");
            None
        }
        Err(AuthError::Failed(e)) => {
            println!("{}", render::render_error("Google authentication failed:", &e));
            println!("Skipping Google Calendar upload.\n");
            None
        }
    }
}

async fn process_document(
    document: &Path,
    config: &Config,
    output_dir: &Path,
    calendar: Option<&GoogleCalendar>,
    summary: &mut RunSummary,
) -> Result<()> {
    let text = pdf::read_document_text(document)?;
    let appointments = termine_core::extract(&text);

    summary.documents += 1;
    summary.appointments += appointments.len();

    println!("{}", render::render_appointments(&appointments));

    if appointments.is_empty() {
        return Ok(());
    }

    let events = CalendarEvent::from_appointments(&appointments, config)?;

    let path = write_calendar(document, &events, output_dir)?;
    summary.written += 1;
    println!("   {} {}", "Wrote".green(), path.display());

    let Some(calendar) = calendar else {
        return Ok(());
    };

    let spinner = render::create_spinner("   Uploading to Google Calendar".to_string());
    let result = calendar.upload(&events).await;
    spinner.finish_and_clear();

    match result {
        Ok(stats) => {
            summary.uploaded += stats.uploaded;
            summary.skipped += stats.skipped;
            println!(
                "   {} {}, {} already in calendar",
                "Uploaded".green(),
                stats.uploaded,
                stats.skipped
            );
        }
        // Upload problems never fail the document; the .ics file is already written
        Err(e) => println!("{}", render::render_error("Upload failed:", &e)),
    }

    Ok(())
}

/// Write `<output_dir>/<stem>.ics` for `document` and return its path.
fn write_calendar(document: &Path, events: &[CalendarEvent], output_dir: &Path) -> Result<PathBuf> {
    let name = document
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    let content = generate_ics(&name, events, Utc::now());
    let path = output_dir.join(ics_file_name(document));

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::debug!(path = %path.display(), events = events.len(), "wrote calendar file");

    Ok(path)
}

fn render_summary(summary: &RunSummary, uploading: bool) -> String {
    let mut line = format!(
        "Converted {} {}: {} {}, {} calendar {} written",
        summary.documents,
        render::pluralize("document", summary.documents),
        summary.appointments,
        render::pluralize("appointment", summary.appointments),
        summary.written,
        render::pluralize("file", summary.written),
    );

    if uploading {
        line.push_str(&format!(
            ", {} uploaded, {} already in calendar",
            summary.uploaded, summary.skipped
        ));
    }

    line
}
