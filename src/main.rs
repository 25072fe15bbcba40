use anyhow::Context;
use clap::Parser;
use quake_report::domain::ports::ConnectivityProbe;
use quake_report::utils::error::ErrorSeverity;
use quake_report::utils::{logger, validation::Validate};
use quake_report::{
    AlwaysOnline, CliConfig, DnsProbe, FeedLoader, FeedPipeline, HttpFetcher, LoadState,
    OutputFormat, QuakeError, ReportEngine, Settings, TerminalPresenter,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting quake-report");
    tracing::debug!("CLI config: {:?}", cli);

    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => exit_with(e),
    };

    let url = match settings.request_url() {
        Ok(url) => url,
        Err(e) => exit_with(e),
    };

    let fetcher = HttpFetcher::with_timeouts(settings.connect_timeout(), settings.read_timeout())
        .context("failed to build the HTTP client")?;
    let format = settings.output.format;

    let outcome = if settings.source.check_connectivity {
        refresh(fetcher, DnsProbe::default(), &url, format).await
    } else {
        refresh(fetcher, AlwaysOnline, &url, format).await
    };

    match outcome {
        Ok(LoadState::Loaded(records)) => {
            tracing::info!("Listed {} earthquakes", records.len());
        }
        Ok(state) => {
            tracing::debug!("Finished with state {:?}", state);
        }
        Err(e) => exit_with(e),
    }

    Ok(())
}

fn load_settings(cli: &CliConfig) -> quake_report::Result<Settings> {
    let settings = cli.resolve()?;
    settings.validate()?;
    Ok(settings)
}

async fn refresh<C: ConnectivityProbe + 'static>(
    fetcher: HttpFetcher,
    probe: C,
    url: &str,
    format: OutputFormat,
) -> quake_report::Result<LoadState> {
    let loader = FeedLoader::new(FeedPipeline::new(fetcher, probe));
    let presenter = TerminalPresenter::new(std::io::stdout().lock(), format);
    let mut engine = ReportEngine::new(loader, presenter);
    engine.refresh(url).await
}

fn exit_with(e: QuakeError) -> ! {
    tracing::error!(
        "quake-report failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("{}", e.user_friendly_message());
    eprintln!("Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code)
}
