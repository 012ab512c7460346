//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};

use doclinks_core::{DuplicatePolicy, Settings};

/// Harvest document links from a web page.
///
/// Scans a page for links to documents (PDF, DOC, XLS, ...), infers a clean
/// filename and size for each, and prints them as JSON, CSV, or an HTML
/// snippet, or downloads them.
#[derive(Parser, Debug)]
#[command(name = "doclinks")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Settings file to use instead of the default location
    #[arg(long, value_name = "PATH", global = true)]
    pub settings_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract document links and print them
    Extract(ExtractArgs),
    /// Extract document links and download them
    Download(DownloadArgs),
    /// Inspect or reset persisted settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

/// `settings` subcommands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsAction {
    /// Print the effective settings as JSON
    Show,
    /// Restore default settings
    Reset,
    /// Print the settings file path
    Path,
}

/// Output format for `extract`.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `extractLinks` response JSON
    #[default]
    Json,
    /// One quoted CSV row per link
    Csv,
    /// One `<a>` element per link
    Html,
}

/// Page source and extraction overrides shared by `extract` and `download`.
#[derive(ClapArgs, Debug, Clone)]
pub struct ScanArgs {
    /// Page to scan: an http(s) URL, an HTML file, or - for stdin
    #[arg(value_name = "SOURCE")]
    pub source: String,

    /// URL the page was served from (base for relative links)
    #[arg(long, value_name = "URL")]
    pub page_url: Option<String>,

    /// File extensions to match, comma-separated (replaces saved list)
    #[arg(short = 'e', long = "ext", value_name = "EXT", value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// CSS selector for link candidates, repeatable (replaces saved list)
    #[arg(short = 's', long = "selector", value_name = "CSS")]
    pub selectors: Vec<String>,

    /// Keep link targets as written instead of resolving them
    #[arg(long)]
    pub no_absolute: bool,

    /// Leave titles empty instead of using element text
    #[arg(long)]
    pub no_inner_content: bool,

    /// Skip links inside header/footer regions
    #[arg(long)]
    pub ignore_header_footer: bool,

    /// Keep the first link for a duplicate URL instead of the last
    #[arg(long)]
    pub first_wins: bool,

    /// Treat URLs differing only in query/fragment as distinct
    #[arg(long)]
    pub keep_query: bool,

    /// Ask the server for exact file sizes (HEAD, then ranged GET)
    #[arg(long)]
    pub probe_sizes: bool,

    /// Leave sizes unknown rather than using per-extension defaults
    #[arg(long)]
    pub no_default_sizes: bool,

    /// Per-request timeout for size probes in seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..=600))]
    pub probe_timeout: Option<u64>,

    /// Persist the effective settings after applying these flags
    #[arg(long)]
    pub save_settings: bool,
}

impl ScanArgs {
    /// Applies flags on top of loaded settings.
    pub fn apply(&self, settings: &mut Settings) {
        if !self.extensions.is_empty() {
            settings.file_extensions.clone_from(&self.extensions);
        }
        if !self.selectors.is_empty() {
            settings.link_selectors.clone_from(&self.selectors);
        }
        if self.no_absolute {
            settings.make_absolute = false;
        }
        if self.no_inner_content {
            settings.inner_content = false;
        }
        if self.ignore_header_footer {
            settings.ignore_header_footer_files = true;
        }
        if self.first_wins {
            settings.duplicate_policy = DuplicatePolicy::FirstWins;
        }
        if self.keep_query {
            settings.normalize_urls = false;
        }
        if self.probe_sizes {
            settings.fetch_file_sizes = true;
        }
        if self.no_default_sizes {
            settings.estimate_default_sizes = false;
        }
        if let Some(secs) = self.probe_timeout {
            settings.probe_timeout_secs = secs;
        }
    }
}

/// `extract` arguments.
#[derive(ClapArgs, Debug, Clone)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub scan: ScanArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Prefix for snippet hrefs (overrides saved hrefPrefix)
    #[arg(long, value_name = "PREFIX")]
    pub href_prefix: Option<String>,

    /// Prefix for the CSV media_constant column (overrides saved mediaPrefix)
    #[arg(long, value_name = "PREFIX")]
    pub media_prefix: Option<String>,

    /// Write output to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// `download` arguments.
#[derive(ClapArgs, Debug, Clone)]
pub struct DownloadArgs {
    #[command(flatten)]
    pub scan: ScanArgs,

    /// Directory to save documents into
    #[arg(short = 'd', long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Write a CSV report with per-link download status
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn extract_args(argv: &[&str]) -> ExtractArgs {
        let mut full = vec!["doclinks", "extract"];
        full.extend_from_slice(argv);
        match Args::try_parse_from(full).unwrap().command {
            Command::Extract(args) => args,
            other => panic!("expected extract, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_extract_defaults() {
        let args = extract_args(&["page.html"]);
        assert_eq!(args.scan.source, "page.html");
        assert_eq!(args.format, OutputFormat::Json);
        assert!(args.scan.extensions.is_empty());
        assert!(!args.scan.probe_sizes);
        assert!(args.output.is_none());
    }

    #[test]
    fn test_cli_verbose_flag_increments_count_after_subcommand() {
        let args = Args::try_parse_from(["doclinks", "extract", "-", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);

        let args = Args::try_parse_from(["doclinks", "--verbose", "extract", "-"]).unwrap();
        assert_eq!(args.verbose, 1);
    }

    #[test]
    fn test_cli_quiet_flag_sets_quiet() {
        let args = Args::try_parse_from(["doclinks", "-q", "settings", "show"]).unwrap();
        assert!(args.quiet);
    }

    #[test]
    fn test_cli_ext_is_comma_delimited() {
        let args = extract_args(&["-", "--ext", "pdf,docx", "-e", "xls"]);
        assert_eq!(args.scan.extensions, vec!["pdf", "docx", "xls"]);
    }

    #[test]
    fn test_cli_format_values() {
        assert_eq!(extract_args(&["-", "-f", "csv"]).format, OutputFormat::Csv);
        assert_eq!(extract_args(&["-", "--format", "html"]).format, OutputFormat::Html);
        let result = Args::try_parse_from(["doclinks", "extract", "-", "--format", "xml"]);
        assert_eq!(result.unwrap_err().kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn test_cli_probe_timeout_range() {
        assert_eq!(extract_args(&["-", "--probe-timeout", "5"]).scan.probe_timeout, Some(5));
        let result = Args::try_parse_from(["doclinks", "extract", "-", "--probe-timeout", "0"]);
        assert_eq!(result.unwrap_err().kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_cli_download_defaults() {
        let args = Args::try_parse_from(["doclinks", "download", "https://e.com/"]).unwrap();
        match args.command {
            Command::Download(download) => {
                assert_eq!(download.output_dir, PathBuf::from("."));
                assert!(download.report.is_none());
                assert!(!download.no_progress);
            }
            other => panic!("expected download, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_settings_subcommands() {
        for (word, expected) in [
            ("show", SettingsAction::Show),
            ("reset", SettingsAction::Reset),
            ("path", SettingsAction::Path),
        ] {
            let args = Args::try_parse_from(["doclinks", "settings", word]).unwrap();
            assert!(matches!(args.command, Command::Settings { action } if action == expected));
        }
    }

    #[test]
    fn test_cli_missing_subcommand_is_error() {
        let kind = Args::try_parse_from(["doclinks"]).unwrap_err().kind();
        assert!(matches!(
            kind,
            clap::error::ErrorKind::MissingSubcommand
                | clap::error::ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        ));
    }

    #[test]
    fn test_cli_version_flag_shows_version() {
        let result = Args::try_parse_from(["doclinks", "--version"]);
        assert_eq!(result.unwrap_err().kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_scan_args_apply_overrides() {
        let args = extract_args(&[
            "-",
            "--ext",
            "pdf",
            "--selector",
            "a.doc",
            "--no-absolute",
            "--no-inner-content",
            "--ignore-header-footer",
            "--first-wins",
            "--keep-query",
            "--probe-sizes",
            "--no-default-sizes",
            "--probe-timeout",
            "12",
        ]);
        let mut settings = Settings::default();
        args.scan.apply(&mut settings);

        assert_eq!(settings.file_extensions, vec!["pdf"]);
        assert_eq!(settings.link_selectors, vec!["a.doc"]);
        assert!(!settings.make_absolute);
        assert!(!settings.inner_content);
        assert!(settings.ignore_header_footer_files);
        assert_eq!(settings.duplicate_policy, DuplicatePolicy::FirstWins);
        assert!(!settings.normalize_urls);
        assert!(settings.fetch_file_sizes);
        assert!(!settings.estimate_default_sizes);
        assert_eq!(settings.probe_timeout_secs, 12);
    }

    #[test]
    fn test_scan_args_apply_without_flags_keeps_settings() {
        let args = extract_args(&["-"]);
        let mut settings = Settings::default();
        args.scan.apply(&mut settings);
        assert_eq!(settings, Settings::default());
    }
}
