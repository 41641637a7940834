//! Pageshot CLI
//!
//! Captures a screenshot of a web page and saves it as an encoded image
//! file, controlled via command-line flags.

mod logging;

use clap::{ArgAction, Parser};
use colored::Colorize;
use std::path::PathBuf;

use pageshot_capture::{CaptureRequest, CaptureService, ImageFormat};

#[derive(Parser)]
#[command(author, version, about = "Capture a screenshot of a web page", long_about = None)]
struct Cli {
    /// URL of the page to screenshot
    #[arg(long, default_value = "https://example.com")]
    url: String,

    /// Output file path without extension
    #[arg(long, default_value = "screenshot")]
    output: String,

    /// Image format
    #[arg(long, value_enum, default_value_t = ImageFormat::Png)]
    format: ImageFormat,

    /// Image quality for jpeg (0-100)
    #[arg(long, default_value_t = 80, value_parser = clap::value_parser!(u8).range(0..=100))]
    quality: u8,

    /// Browser window width
    #[arg(long, default_value_t = 425)]
    width: u32,

    /// Browser window height
    #[arg(long, default_value_t = 1080)]
    height: u32,

    /// Delay before taking the screenshot (in milliseconds)
    #[arg(long, default_value_t = 0)]
    delay: u64,

    /// CSS selector of the element to capture
    #[arg(long)]
    selector: Option<String>,

    /// Capture full page screenshot
    #[arg(
        long,
        action = ArgAction::Set,
        default_value_t = true,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    fullpage: bool,

    /// Hide scrollbars
    #[arg(
        long = "hideScrollbars",
        action = ArgAction::Set,
        default_value_t = false,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    hide_scrollbars: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "PAGESHOT_LOG_LEVEL")]
    log_level: String,

    /// Log format: compact, full
    #[arg(long, default_value = "compact", env = "PAGESHOT_LOG_FORMAT")]
    log_format: String,

    /// Directory the persistent log file is written into
    #[arg(long, default_value = ".", env = "PAGESHOT_LOG_DIR")]
    log_dir: PathBuf,
}

impl Cli {
    fn to_request(&self) -> CaptureRequest {
        CaptureRequest {
            url: self.url.clone(),
            output: self.output.clone(),
            format: self.format,
            quality: self.quality,
            width: self.width,
            height: self.height,
            delay_ms: self.delay,
            selector: self.selector.clone(),
            full_page: self.fullpage,
            hide_scrollbars: self.hide_scrollbars,
        }
    }
}

async fn run(request: &CaptureRequest) -> anyhow::Result<PathBuf> {
    let service = CaptureService::from_env().await?;
    let path = service.capture_and_save(request).await?;
    Ok(path)
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(&cli.log_level, &cli.log_format, &cli.log_dir);

    let request = cli.to_request();
    match run(&request).await {
        Ok(path) => {
            println!(
                "{} {}",
                "Screenshot captured successfully:".green(),
                path.display()
            );
        }
        Err(e) => {
            eprintln!("{} {}", "Failed to capture screenshot:".red(), e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pageshot_capture::CaptureMode;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_match_documented_values() {
        let cli = Cli::try_parse_from(["pageshot"]).unwrap();
        let request = cli.to_request();

        assert_eq!(request.url, "https://example.com");
        assert_eq!(request.output, "screenshot");
        assert_eq!(request.format, ImageFormat::Png);
        assert_eq!(request.quality, 80);
        assert_eq!(request.width, 425);
        assert_eq!(request.height, 1080);
        assert_eq!(request.delay_ms, 0);
        assert!(request.selector.is_none());
        assert!(request.full_page);
        assert!(!request.hide_scrollbars);
    }

    #[test]
    fn test_all_flags_parse() {
        let cli = Cli::try_parse_from([
            "pageshot",
            "--url",
            "https://rust-lang.org",
            "--output",
            "homepage",
            "--format",
            "jpeg",
            "--quality",
            "55",
            "--width",
            "1280",
            "--height",
            "720",
            "--delay",
            "250",
            "--selector",
            "#main",
            "--fullpage",
            "false",
            "--hideScrollbars",
        ])
        .unwrap();
        let request = cli.to_request();

        assert_eq!(request.url, "https://rust-lang.org");
        assert_eq!(request.format, ImageFormat::Jpeg);
        assert_eq!(request.quality, 55);
        assert_eq!(request.delay_ms, 250);
        assert!(!request.full_page);
        assert!(request.hide_scrollbars);
        assert_eq!(request.mode(), CaptureMode::Element("#main"));
    }

    #[test]
    fn test_fullpage_flag_without_value() {
        let cli = Cli::try_parse_from(["pageshot", "--fullpage"]).unwrap();
        assert!(cli.fullpage);

        let cli = Cli::try_parse_from(["pageshot", "--fullpage", "false"]).unwrap();
        assert!(!cli.fullpage);
    }

    #[test]
    fn test_quality_out_of_range_is_rejected() {
        let result = Cli::try_parse_from(["pageshot", "--quality", "101"]);
        assert!(result.is_err());
    }
}
