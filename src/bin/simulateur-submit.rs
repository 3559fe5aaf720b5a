//! Fills the simulator form, submits it to a running server and prints the result region.

use clap::Parser;
use simulateur::client::dom::FORM_ID;
use simulateur::client::{HttpTransport, MemoryDocument, Page, PageEvent, SubmissionOutcome, SubmitEvent};
use simulateur::config::ClientConfig;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "simulateur-submit", version, about = "Estimate a car insurance premium")]
struct Cli {
    #[arg(long, default_value = "")]
    nom: String,

    #[arg(long, default_value = "")]
    prenom: String,

    #[arg(long, default_value = "")]
    email: String,

    #[arg(long, default_value = "")]
    age: String,

    /// One of `moins_5`, `5_20`, `plus_20`.
    #[arg(long, default_value = "")]
    anciennete_permis: String,

    /// Fiscal horsepower.
    #[arg(long, default_value = "")]
    puissance: String,

    /// `personal` or `professional`. Left out of the form when absent.
    #[arg(long)]
    usage_type: Option<String>,

    /// Server base URL. Defaults to SIMULATEUR_URL or http://127.0.0.1:5001.
    #[arg(long)]
    url: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let cli = Cli::parse();
    let base_url = cli.url.clone().unwrap_or_else(|| ClientConfig::from_env().base_url);

    let document = Arc::new(MemoryDocument::with_fields([
        ("nom", cli.nom.as_str()),
        ("prenom", cli.prenom.as_str()),
        ("email", cli.email.as_str()),
        ("age", cli.age.as_str()),
        ("anciennete_permis", cli.anciennete_permis.as_str()),
        ("puissance", cli.puissance.as_str()),
    ]));
    if let Some(usage_type) = &cli.usage_type {
        document.set_field("usage_type", usage_type);
    }

    let transport = HttpTransport::new(reqwest::Client::new(), base_url);
    let mut page = Page::new(document.clone(), transport);

    page.dispatch(PageEvent::DomContentLoaded).await;
    let outcome = page
        .dispatch(PageEvent::Submit(SubmitEvent::new(FORM_ID)))
        .await;

    if let Some(region) = document.region() {
        println!("{}", region.snapshot().text);
    }

    match outcome {
        Some(SubmissionOutcome::Estimated(_)) => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}
