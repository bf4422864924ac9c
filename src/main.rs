use clap::Parser;
use miette::{IntoDiagnostic, Result};
use pos_terminal::application::page::Response;
use pos_terminal::application::terminal::PosTerminal;
use pos_terminal::config::{DEFAULT_PAGE_URL, TerminalFixtures};
use pos_terminal::infrastructure::flash::RecordingNotifier;
use pos_terminal::infrastructure::redirect::RouteRedirector;
use pos_terminal::interfaces::csv::action_reader::ActionReader;
use pos_terminal::interfaces::json::response_writer::ResponseWriter;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Kiosk action script (CSV)
    script: PathBuf,

    /// JSON file with merchants, POS users, wallets, rates and balances
    #[arg(long)]
    fixtures: PathBuf,

    /// Route template of the terminal page, used for redirects
    #[arg(long, default_value = DEFAULT_PAGE_URL)]
    page_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pos_terminal=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let fixtures = TerminalFixtures::from_path(&cli.fixtures).into_diagnostic()?;

    let wallets = fixtures.wallet_service();
    let notifier = RecordingNotifier::new();
    let terminal = PosTerminal::new(
        Box::new(fixtures.auth_service().into_diagnostic()?),
        Box::new(fixtures.sale_service(wallets.clone())),
        Box::new(wallets),
        Box::new(fixtures.converter()),
        Box::new(notifier.clone()),
        Box::new(RouteRedirector::new(cli.page_url)),
    );

    let file = File::open(cli.script).into_diagnostic()?;
    let reader = ActionReader::new(file);
    let stdout = io::stdout();
    let mut writer = ResponseWriter::new(stdout.lock());

    // The page URL the kiosk browser is currently on.
    let mut route_username: Option<String> = None;

    for action_result in reader.actions() {
        let scripted = match action_result {
            Ok(scripted) => scripted,
            Err(e) => {
                error!(error = %e, "Error reading action");
                continue;
            }
        };

        if scripted.route_username.is_some() {
            route_username = scripted.route_username.clone();
        }

        let request = scripted.to_request(route_username.as_deref());
        let outcome = terminal.dispatch(scripted.action, &request).await;

        if let Ok(Response::Redirect(_)) = &outcome {
            route_username = scripted.username.clone();
        }

        let flash = notifier.take();
        writer
            .write_response(scripted.action, &outcome, &flash)
            .into_diagnostic()?;
    }

    writer.flush().into_diagnostic()?;
    Ok(())
}
