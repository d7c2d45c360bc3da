use std::{
    path::{Path, PathBuf},
    process::ExitCode,
    sync::Arc,
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use contact_core::{
    validation, ContactFormController, EmailJsClient, NotificationSink, SubmitOutcome,
};
use serde::Serialize;
use shared::{
    domain::{ContactFields, FieldErrors, Notice, Severity},
    error::{ApiError, ContactError},
    site::{CONTACT_EMAIL, SOCIAL_LINKS},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;

use crate::config::load_settings;

#[derive(Parser, Debug)]
#[command(name = "contact", about = "Send a message to the YogaSeekho studio")]
struct Cli {
    /// Settings file; missing is fine, environment variables still apply.
    #[arg(long, default_value = "contact.toml")]
    config: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate and send a contact message.
    Send(FormArgs),
    /// Check a message against the form rules without sending it.
    Validate {
        #[command(flatten)]
        form: FormArgs,
        #[arg(long)]
        json: bool,
    },
    /// Print the studio's contact details.
    Info,
}

#[derive(Args, Debug)]
struct FormArgs {
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    phone: String,
    #[arg(long, default_value = "")]
    message: String,
}

impl From<FormArgs> for ContactFields {
    fn from(args: FormArgs) -> Self {
        Self {
            name: args.name,
            email: args.email,
            phone: args.phone,
            message: args.message,
        }
    }
}

struct ConsoleNotifier;

impl NotificationSink for ConsoleNotifier {
    fn notify(&self, notice: &Notice) {
        match notice.severity {
            Severity::Default => println!("{}: {}", notice.title, notice.description),
            Severity::Destructive => eprintln!("{}: {}", notice.title, notice.description),
        }
    }
}

fn print_field_errors(errors: &FieldErrors) {
    for (field, message) in errors.iter() {
        eprintln!("{}: {message}", field.label());
    }
}

/// Process status for validation failures; other failures exit with 1.
const EXIT_INVALID: u8 = 2;

fn exit_code(outcome: &SubmitOutcome) -> ExitCode {
    match outcome {
        SubmitOutcome::Submitted => ExitCode::SUCCESS,
        SubmitOutcome::Invalid(_) => ExitCode::from(EXIT_INVALID),
        SubmitOutcome::Failed(_) | SubmitOutcome::Ignored => ExitCode::FAILURE,
    }
}

/// What `validate --json` prints.
#[derive(Debug, Serialize)]
struct ValidationReport {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ApiError>,
}

impl ValidationReport {
    fn check(fields: &ContactFields) -> Self {
        let errors = validation::validate(fields);
        if errors.is_empty() {
            return Self {
                valid: true,
                error: None,
            };
        }
        Self {
            valid: false,
            error: Some(ContactError::Validation(errors).into()),
        }
    }

    fn field_errors(&self) -> Option<&FieldErrors> {
        self.error.as_ref().and_then(|api| api.fields.as_ref())
    }

    fn exit_code(&self) -> ExitCode {
        if self.valid {
            ExitCode::SUCCESS
        } else {
            ExitCode::from(EXIT_INVALID)
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    match cli.command {
        Command::Send(form) => send(&cli.config, form.into()).await,
        Command::Validate { form, json } => validate(form.into(), json),
        Command::Info => {
            println!("Email: {CONTACT_EMAIL}");
            for link in SOCIAL_LINKS {
                println!("{}: {}", link.id, link.url);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn send(config_path: &Path, fields: ContactFields) -> Result<ExitCode> {
    let settings = load_settings(config_path)?;
    contact_core::config::install(settings.emailjs_config())
        .context("failed to install EmailJS configuration")?;
    let emailjs_config = contact_core::config::installed()
        .context("EmailJS configuration was not installed")?;
    let client = EmailJsClient::new(&settings.emailjs_api_url, settings.request_timeout())?;
    info!(endpoint = %client.endpoint(), "email relay ready");

    let controller = ContactFormController::new(
        emailjs_config.clone(),
        Arc::new(client),
        Arc::new(ConsoleNotifier),
    );
    controller.set_fields(fields);

    let outcome = controller.submit().await;
    match &outcome {
        SubmitOutcome::Invalid(errors) => print_field_errors(errors),
        SubmitOutcome::Failed(api) => eprintln!("{}", serde_json::to_string(api)?),
        SubmitOutcome::Submitted | SubmitOutcome::Ignored => {}
    }
    Ok(exit_code(&outcome))
}

fn validate(fields: ContactFields, json: bool) -> Result<ExitCode> {
    let report = ValidationReport::check(&fields);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if let Some(errors) = report.field_errors() {
        print_field_errors(errors);
    } else {
        println!("All fields are valid.");
    }
    Ok(report.exit_code())
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
