//! CLI command routing: runs Extract, Download, and Settings subcommands.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use doclinks_core::download::download_links;
use doclinks_core::{
    ExtractRequest, ExtractedLink, HttpClient, HttpSizeProbe, JsonFileSettingsStore, Settings,
    SettingsStore, SizeProbe, extract_links, handle_request, render_csv, render_html_snippet,
};
use tracing::{debug, info};

use super::exit_handler::{ProcessExit, determine_exit_outcome};
use super::input_processor::load_page;
use super::progress_manager::{batch_progress_bar, record_outcome};
use super::terminal::progress_enabled;
use crate::cli::{Args, Command, DownloadArgs, ExtractArgs, OutputFormat, ScanArgs, SettingsAction};

pub(crate) async fn dispatch(args: Args) -> Result<ProcessExit> {
    let store = match &args.settings_file {
        Some(path) => JsonFileSettingsStore::new(path),
        None => JsonFileSettingsStore::at_default_location()?,
    };
    debug!(path = %store.path().display(), "settings store");

    match args.command {
        Command::Extract(extract) => run_extract(&store, &extract).await,
        Command::Download(download) => run_download(&store, &download, args.quiet).await,
        Command::Settings { action } => run_settings(&store, action),
    }
}

fn effective_settings(store: &dyn SettingsStore, scan: &ScanArgs) -> Result<Settings> {
    let mut settings = store.load()?;
    scan.apply(&mut settings);
    settings.validate()?;
    if scan.save_settings {
        store.save(&settings)?;
        info!("settings saved");
    }
    Ok(settings)
}

fn size_probe(settings: &Settings) -> Result<Option<HttpSizeProbe>> {
    if !settings.fetch_file_sizes {
        return Ok(None);
    }
    Ok(Some(HttpSizeProbe::new(settings.probe_timeout_secs)?))
}

async fn run_extract(store: &JsonFileSettingsStore, args: &ExtractArgs) -> Result<ProcessExit> {
    let mut settings = effective_settings(store, &args.scan)?;
    if let Some(prefix) = &args.href_prefix {
        settings.href_prefix.clone_from(prefix);
    }
    if let Some(prefix) = &args.media_prefix {
        settings.media_prefix.clone_from(prefix);
    }

    let page = load_page(&args.scan.source, args.scan.page_url.as_deref(), settings.make_absolute).await?;
    let probe = size_probe(&settings)?;
    let probe = probe.as_ref().map(|p| p as &dyn SizeProbe);

    let (rendered, exit) = match args.format {
        OutputFormat::Json => {
            let request = ExtractRequest::new(settings, page.page_url);
            let response = handle_request(&request, &page.html, probe).await;
            let exit = if response.is_success() {
                ProcessExit::Success
            } else {
                ProcessExit::Failure
            };
            let mut json = serde_json::to_string_pretty(&response)?;
            json.push('\n');
            (json, exit)
        }
        OutputFormat::Csv | OutputFormat::Html => {
            let extraction = extract_links(&page.html, &page.page_url, &settings, probe).await?;
            info!(links = extraction.links.len(), "links extracted");
            let rendered = if args.format == OutputFormat::Csv {
                render_csv(&extraction.links, &settings.media_prefix, None)?
            } else {
                render_html_snippet(&extraction.links, &settings.href_prefix, settings.inner_content)
            };
            (rendered, ProcessExit::Success)
        }
    };

    write_output(args.output.as_deref(), &rendered)?;
    Ok(exit)
}

async fn run_download(
    store: &JsonFileSettingsStore,
    args: &DownloadArgs,
    quiet: bool,
) -> Result<ProcessExit> {
    let settings = effective_settings(store, &args.scan)?;
    let page = load_page(&args.scan.source, args.scan.page_url.as_deref(), settings.make_absolute).await?;
    let probe = size_probe(&settings)?;
    let extraction = extract_links(
        &page.html,
        &page.page_url,
        &settings,
        probe.as_ref().map(|p| p as &dyn SizeProbe),
    )
    .await?;
    let links: Vec<ExtractedLink> = extraction.links;
    if links.is_empty() {
        info!("no document links found");
        return Ok(ProcessExit::Success);
    }

    let client = HttpClient::new()?;
    let bar = batch_progress_bar(progress_enabled(quiet, args.no_progress), links.len());
    let summary = download_links(&client, &links, &args.output_dir, |outcome| {
        record_outcome(&bar, outcome);
    })
    .await?;
    bar.finish_and_clear();

    if let Some(report) = &args.report {
        let csv = render_csv(&links, &settings.media_prefix, Some(&summary))?;
        write_output(Some(report), &csv)?;
    }

    info!(
        completed = summary.completed,
        failed = summary.failed,
        dir = %args.output_dir.display(),
        "download complete"
    );
    Ok(determine_exit_outcome(summary.completed, summary.failed))
}

fn run_settings(store: &JsonFileSettingsStore, action: SettingsAction) -> Result<ProcessExit> {
    match action {
        SettingsAction::Show => {
            let settings = store.load()?;
            let json = serde_json::to_string_pretty(&settings)?;
            write_output(None, &format!("{json}\n"))?;
        }
        SettingsAction::Reset => {
            store.save(&Settings::default())?;
            info!(path = %store.path().display(), "settings reset to defaults");
        }
        SettingsAction::Path => {
            write_output(None, &format!("{}\n", store.path().display()))?;
        }
    }
    Ok(ProcessExit::Success)
}

fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}
