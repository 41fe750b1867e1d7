//! Interactive KiotViet API explorer.
//!
//! Authenticates, shows what the token says about the shop, asks for the
//! retailer name and explores the endpoints with it.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use kiot_cli::report::{self, print_lines};
use kiot_cli::{choose_retailer, logging, ConnectionArgs};
use kiot_core::{inspect_token, suggest_components, RetailerCandidates, EXPLORE_ENDPOINTS};
use kiot_sdk::config::credentials_from_env;
use kiot_sdk::{Authenticator, EndpointProber, ProbeReport};

const PREVIEW_ENDPOINTS: usize = 2;

/// Explore KiotViet API endpoints for one retailer
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// Retailer (shop) name; prompted for when omitted
    #[arg(long)]
    retailer: Option<String>,

    /// Characters of a failed response body to show
    #[arg(long, default_value_t = 200)]
    excerpt_chars: usize,
}

fn main() -> Result<()> {
    logging::init_tracing();
    let args = Args::parse();

    println!("Interactive KiotViet API Explorer");
    println!("{}", report::rule());

    let credentials = credentials_from_env()?;
    println!("Loaded credentials - Client ID: {}", credentials.masked_client_id());

    let config = args.connection.config();
    let transport = args.connection.transport()?;
    let mut auth = Authenticator::new(&transport, &config, credentials);

    println!("Authenticating...");
    let session = match auth.authenticate() {
        Ok(session) => session.clone(),
        Err(e) => {
            eprintln!("{}", report::auth_failure_line(&e));
            std::process::exit(1);
        }
    };
    print_lines(&report::session_lines(&session));

    let hint = match inspect_token(session.access_token()) {
        Ok(insight) => {
            print_lines(&report::token_lines(&insight));
            insight.retailer_hint().map(str::to_string)
        }
        Err(e) => {
            tracing::warn!("Could not decode token: {}", e);
            None
        }
    };

    let retailer = match args.retailer {
        Some(name) => choose_retailer(&name, None),
        None => prompt_retailer(hint.as_deref())?,
    };
    let Some(retailer) = retailer else {
        anyhow::bail!("Retailer name required");
    };
    println!("Using retailer name: '{}'", retailer);

    let prober = EndpointProber::new(
        &transport,
        &config,
        &session,
        RetailerCandidates::named([retailer.as_str()]),
    )
    .with_page_size(args.connection.page_size)
    .with_excerpt_chars(args.excerpt_chars);

    println!();
    println!("Testing all endpoints with retailer: '{}'", retailer);
    println!("{}", report::rule());

    let results = prober.probe_all(EXPLORE_ENDPOINTS, |result| {
        let endpoint = &result.endpoint;
        println!("Testing {} ({})", endpoint.label, endpoint.path);
        match result.payload() {
            Some(payload) => print_lines(&report::success_lines(endpoint.label, payload)),
            None => print_lines(&report::failure_lines(endpoint.label, &result.attempts)),
        }
        println!();
    });

    print_dashboard(&results);

    println!();
    println!("API exploration complete!");
    println!("{} endpoints returned data successfully.", results.success_count());
    Ok(())
}

fn prompt_retailer(hint: Option<&str>) -> Result<Option<String>> {
    print_lines(&report::section("RETAILER NAME REQUIRED"));
    println!("The KiotViet API requires a 'Retailer' header with your shop name.");
    println!("This should be the name of your store/shop in KiotViet.");
    println!("Examples: 'myshop', 'taphoaxyz', 'cuahangabc'");
    println!();
    match hint {
        Some(hint) => print!("Please enter your shop/retailer name [{}]: ", hint),
        None => print!("Please enter your shop/retailer name: "),
    }
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read retailer name")?;
    Ok(choose_retailer(&line, hint))
}

fn print_dashboard(results: &ProbeReport) {
    print_lines(&report::section("DASHBOARD ANALYSIS & SUGGESTIONS"));

    if results.success_count() == 0 {
        println!("No data retrieved. Cannot create dashboard suggestions.");
        return;
    }
    print_lines(&report::dashboard_analysis_lines(results));

    let components = suggest_components(results.successes());
    print_lines(&report::section("RECOMMENDED DASHBOARD COMPONENTS"));
    print_lines(&report::numbered(&components));

    print_lines(&report::section("SAMPLE DATA PREVIEW"));
    print_lines(&report::sample_preview_lines(results, PREVIEW_ENDPOINTS));
}
