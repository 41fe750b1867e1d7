//! Probe every KiotViet read endpoint, guessing the Retailer header.
//!
//! Each endpoint is tried without a Retailer header first, then with a few
//! guessed shop names, stopping at the first HTTP 200.

use anyhow::Result;
use clap::Parser;
use kiot_cli::report::{self, print_lines};
use kiot_cli::{logging, ConnectionArgs};
use kiot_core::{availability_summary, inspect_token, RetailerCandidates, PROBE_ENDPOINTS};
use kiot_sdk::config::credentials_from_env;
use kiot_sdk::probe::DEFAULT_EXCERPT_CHARS;
use kiot_sdk::{Authenticator, EndpointProber};

/// Probe KiotViet API endpoints and summarise what data is available
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// Retailer name to try (repeatable); replaces the guessed names
    #[arg(long = "retailer")]
    retailers: Vec<String>,

    /// Characters of a failed response body to show
    #[arg(long, default_value_t = DEFAULT_EXCERPT_CHARS)]
    excerpt_chars: usize,

    /// Decode the access token payload and show its claims
    #[arg(long)]
    inspect_token: bool,
}

fn main() -> Result<()> {
    logging::init_tracing();
    let args = Args::parse();

    println!("KiotViet API probe");
    println!("{}", "=".repeat(50));

    let credentials = credentials_from_env()?;
    println!("Client ID: {}", credentials.masked_client_id());
    println!(
        "Client ID length: {}, secret length: {}",
        credentials.client_id().chars().count(),
        credentials.client_secret().chars().count()
    );

    let candidates = if args.retailers.is_empty() {
        RetailerCandidates::guessed(&credentials)
    } else {
        RetailerCandidates::with_bare_request(args.retailers.iter().map(String::as_str))
    };

    let config = args.connection.config();
    let transport = args.connection.transport()?;
    let mut auth = Authenticator::new(&transport, &config, credentials);

    println!("Requesting token from {}", config.token_url);
    let session = match auth.authenticate() {
        Ok(session) => session.clone(),
        Err(e) => {
            eprintln!("{}", report::auth_failure_line(&e));
            std::process::exit(1);
        }
    };
    print_lines(&report::session_lines(&session));

    if args.inspect_token {
        match inspect_token(session.access_token()) {
            Ok(insight) => print_lines(&report::token_lines(&insight)),
            Err(e) => tracing::warn!("Could not decode token: {}", e),
        }
    }

    let prober = EndpointProber::new(&transport, &config, &session, candidates)
        .with_page_size(args.connection.page_size)
        .with_excerpt_chars(args.excerpt_chars);

    println!();
    println!("Testing available endpoints...");

    let results = prober.probe_all(PROBE_ENDPOINTS, |result| {
        let endpoint = &result.endpoint;
        println!();
        println!("{}", "=".repeat(50));
        println!("Testing {} endpoint: {}", endpoint.label, endpoint.path);
        println!("{}", "=".repeat(50));

        for attempt in &result.attempts {
            print_lines(&report::attempt_lines(attempt));
        }
        match result.payload() {
            Some(payload) => print_lines(&report::analysis_lines(endpoint.label, payload)),
            None => println!(
                "No data retrieved for {} with any retailer option",
                endpoint.label
            ),
        }
    });

    print_lines(&report::section("SUMMARY OF AVAILABLE DATA"));
    print_lines(&report::availability_lines(&results));

    print_lines(&report::section("DASHBOARD POSSIBILITIES"));
    let suggestions = availability_summary(results.successes().map(|(label, _)| label));
    if suggestions.is_empty() {
        println!("No data available for dashboard creation. Check API access permissions.");
    }
    for suggestion in suggestions {
        println!("- {}", suggestion);
    }

    Ok(())
}
