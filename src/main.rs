//! Join Me - submit one lead from the terminal.
//!
//! Reads a JSON object `{name, email, phone, birthday, country}` from stdin,
//! runs it through a form session, and prints each status the form passes
//! through. `country` may be a dialing code (`+44`) or a label (`Canada`).

use anyhow::{bail, Result};
use join_me_leads::{
    AsyncWebhookClient, Config, ContactForm, CountryCode, FormField, FormSession, Metrics,
    SubmissionStatus, WebhookClient,
};
use serde::Deserialize;
use tokio::io::AsyncReadExt;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize)]
struct LeadInput {
    #[serde(flatten)]
    form: ContactForm,
    #[serde(default)]
    country: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // Logs go to stderr; stdout carries the status lines
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Posting leads to {}", config.webhook_url);

    let mut raw = String::new();
    tokio::io::stdin().read_to_string(&mut raw).await?;
    let input: LeadInput = serde_json::from_str(&raw)?;

    let country = match input.country.as_deref() {
        None => CountryCode::default(),
        Some(value) => match CountryCode::by_code(value).or_else(|| CountryCode::by_label(value)) {
            Some(country) => country,
            None => bail!("Unknown country: {}", value),
        },
    };

    let metrics = Metrics::new();
    let client = WebhookClient::new(&config).with_metrics(metrics.clone());
    let mut session = FormSession::with_reset_delay(
        AsyncWebhookClient::new(client),
        config.status_reset_delay(),
    )
    .with_metrics(metrics.clone());

    let ContactForm {
        name,
        email,
        phone,
        birthday,
    } = input.form;
    session.select_country(country);
    session.edit(FormField::Name, name);
    session.edit(FormField::Email, email);
    session.edit(FormField::Phone, phone);
    session.edit(FormField::Birthday, birthday);

    let status = session.submit().await;
    if let Some(err) = session.phone_error() {
        println!("phone: {}", err);
        bail!("Lead not submitted");
    }

    println!("{}: {}", status, status.button_label());
    if let Some(banner) = status.banner() {
        println!("{}", banner);
    }

    if session.wait_for_reset().await {
        let status = session.status();
        println!("{}: {}", status, status.button_label());
    }

    info!("Metrics: {:?}", metrics.summary());

    if status == SubmissionStatus::Error {
        error!("Webhook did not accept the lead");
        bail!("Lead submission failed");
    }
    Ok(())
}
