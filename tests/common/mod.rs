#![allow(dead_code)]

use pos_terminal::application::request::Request;
use pos_terminal::application::terminal::PosTerminal;
use pos_terminal::config::{DEFAULT_PAGE_URL, TerminalFixtures};
use pos_terminal::infrastructure::flash::RecordingNotifier;
use pos_terminal::infrastructure::in_memory::InMemorySaleService;
use pos_terminal::infrastructure::redirect::RouteRedirector;
use std::fs::File;
use std::io::{Error, Write};
use std::path::Path;

pub const FIXTURES: &str = "tests/fixtures/kiosk.json";

pub struct Kiosk {
    pub terminal: PosTerminal,
    pub sales: InMemorySaleService,
    pub notifier: RecordingNotifier,
}

pub fn kiosk() -> Kiosk {
    let fixtures = TerminalFixtures::from_path(FIXTURES).unwrap();
    let wallets = fixtures.wallet_service();
    let sales = fixtures.sale_service(wallets.clone());
    let notifier = RecordingNotifier::new();

    let terminal = PosTerminal::new(
        Box::new(fixtures.auth_service().unwrap()),
        Box::new(sales.clone()),
        Box::new(wallets),
        Box::new(fixtures.converter()),
        Box::new(notifier.clone()),
        Box::new(RouteRedirector::new(DEFAULT_PAGE_URL)),
    );

    Kiosk {
        terminal,
        sales,
        notifier,
    }
}

/// A request sent from the terminal page of `username`.
pub fn on_page(username: &str) -> Request {
    Request::new().with_param("username", username)
}

pub fn write_script(path: &Path, rows: &[&str]) -> Result<(), Error> {
    let mut file = File::create(path)?;
    writeln!(file, "action,username,route_username,keypad_value,sale_hash,notes")?;
    for row in rows {
        writeln!(file, "{row}")?;
    }
    Ok(())
}
