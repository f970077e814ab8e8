//! Command implementations over the API clients.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, anyhow, bail};
use indicatif::ProgressBar;
use serde_json::json;
use tracing::debug;

use pdrisk_api::{
    ApiConfig, ApiError, AuthClient, FilePayload, PredictionClient, RequestGateway, Session,
};
use pdrisk_report::{aggregate, rank_biomarkers};

use crate::cli::{ImportanceArgs, LoginArgs, PredictArgs, SignupArgs};
use crate::preflight;
use crate::summary;

/// Environment fallback for the `--token` flag.
const TOKEN_ENV: &str = "PDRISK_TOKEN";

/// Shared gateway plus the two clients built over it.
pub struct Clients {
    pub gateway: Arc<RequestGateway>,
    pub auth: AuthClient,
    pub prediction: PredictionClient,
}

/// Build the clients from the environment, seeding the session from the
/// `--token` flag or `PDRISK_TOKEN`.
pub fn build_clients(token: Option<&str>) -> Result<Clients> {
    let session = Session::new();
    let token = token
        .map(str::to_string)
        .or_else(|| std::env::var(TOKEN_ENV).ok());
    if let Some(token) = token {
        session.set(token);
    }
    let gateway = Arc::new(
        RequestGateway::new(ApiConfig::from_env(), session).map_err(surface)?,
    );
    Ok(Clients {
        auth: AuthClient::new(Arc::clone(&gateway)),
        prediction: PredictionClient::new(Arc::clone(&gateway)),
        gateway,
    })
}

/// Upload a biomarker file, aggregate the response, and print the verdict.
pub fn run_predict(args: &PredictArgs, token: Option<&str>) -> Result<()> {
    let clients = build_clients(token)?;

    if !args.url && !args.no_preflight {
        check_required_columns(&clients.prediction, Path::new(&args.file))?;
    }

    let mut payload = if args.url {
        FilePayload::remote(&args.file)
    } else {
        FilePayload::local(&args.file)
    };
    if let Some(name) = &args.name {
        payload = payload.with_name(name);
    }
    if let Some(mime_type) = &args.mime_type {
        payload = payload.with_mime_type(mime_type);
    }
    let file_name = payload.name.clone();

    let spinner = start_spinner("Uploading and analyzing...");
    let result = clients.prediction.predict_from_file(payload);
    spinner.finish_and_clear();
    let response = result.map_err(surface)?;

    let verdict = aggregate(&response).map_err(|err| anyhow!("{err}"))?;
    let biomarkers = rank_biomarkers(&response.top_biomarkers);

    if args.json {
        let output = json!({
            "file": file_name,
            "prediction": verdict,
            "biomarkers": biomarkers,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        summary::print_verdict(&file_name, &verdict, &biomarkers);
    }
    Ok(())
}

/// Compare the file's header row against the model's required features and
/// fail with the missing column names before uploading anything.
fn check_required_columns(prediction: &PredictionClient, path: &Path) -> Result<()> {
    let header = preflight::read_header_columns(path)?;
    let required_value = prediction.required_features().map_err(surface)?;
    let required = preflight::required_feature_names(&required_value);
    if required.is_empty() {
        debug!("required-features response had no recognizable feature list; skipping preflight");
        return Ok(());
    }
    let missing = preflight::missing_features(&header, &required);
    if !missing.is_empty() {
        bail!(
            "{} is missing {} required feature column(s): {}",
            path.display(),
            missing.len(),
            missing.join(", ")
        );
    }
    debug!(columns = header.len(), "preflight passed");
    Ok(())
}

/// Print the model's required feature list.
pub fn run_features(token: Option<&str>) -> Result<()> {
    let clients = build_clients(token)?;
    print_json(&clients.prediction.required_features().map_err(surface)?)
}

/// Print a sample of the expected input format.
pub fn run_sample(token: Option<&str>) -> Result<()> {
    let clients = build_clients(token)?;
    print_json(&clients.prediction.sample_data().map_err(surface)?)
}

/// Print global feature importance.
pub fn run_importance(args: &ImportanceArgs, token: Option<&str>) -> Result<()> {
    let clients = build_clients(token)?;
    print_json(&clients.prediction.feature_importance(args.top_n).map_err(surface)?)
}

/// Print biomarker details.
pub fn run_biomarkers(token: Option<&str>) -> Result<()> {
    let clients = build_clients(token)?;
    print_json(&clients.prediction.biomarkers().map_err(surface)?)
}

/// Print protein categories.
pub fn run_categories(token: Option<&str>) -> Result<()> {
    let clients = build_clients(token)?;
    print_json(&clients.prediction.categories().map_err(surface)?)
}

/// Register a new account and print the access token.
pub fn run_signup(args: &SignupArgs) -> Result<()> {
    let clients = build_clients(None)?;
    clients
        .auth
        .signup(&args.name, &args.email, &args.password)
        .map_err(surface)?;
    print_session_token(&clients)
}

/// Log in and print the access token.
pub fn run_login(args: &LoginArgs) -> Result<()> {
    let clients = build_clients(None)?;
    clients
        .auth
        .login(&args.email, &args.password)
        .map_err(surface)?;
    print_session_token(&clients)
}

/// Print the current user's profile.
pub fn run_profile(token: Option<&str>) -> Result<()> {
    let clients = build_clients(token)?;
    print_json(&clients.auth.profile().map_err(surface)?)
}

/// Log out; the session clears even when the server call fails.
pub fn run_logout(token: Option<&str>) -> Result<()> {
    let clients = build_clients(token)?;
    clients.auth.logout();
    println!("Logged out.");
    Ok(())
}

fn print_session_token(clients: &Clients) -> Result<()> {
    match clients.gateway.session().get() {
        Some(token) => {
            println!("Access token: {token}");
            println!("Pass it to later invocations with --token (or PDRISK_TOKEN).");
            Ok(())
        }
        None => bail!("the server response carried no access token"),
    }
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn start_spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Reduce an API error to its user-facing message; the full error is kept
/// in the debug log.
fn surface(err: ApiError) -> anyhow::Error {
    debug!(error = %err, "request failed");
    anyhow!(err.user_message())
}
