use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use plod_core::report::render;
use plod_core::{
    ClientConfig, Identifier, Method, MethodArgs, OutputFormat, PlodError, PlodResource,
    SparqlClient,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{Level, debug};

/// Everything needed to answer one invocation
#[derive(Debug, Clone)]
pub struct QueryRequest {
    pub identifier: String,
    /// `None` prints the label
    pub method: Option<Method>,
    pub args: MethodArgs,
    pub format: OutputFormat,
}

pub fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    // A subscriber may already be set when running inside tests
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn list_methods() -> String {
    let width = Method::ALL.iter().map(|m| m.as_str().len()).max().unwrap_or(0);
    let mut out = String::new();
    for method in Method::ALL {
        out.push_str(&format!(
            "  {:<width$}  {}\n",
            method.as_str(),
            method.description(),
            width = width
        ));
    }
    out
}

/// Defaults, then the config file, then environment, then flags
pub fn resolve_config<F>(matches: &ArgMatches, lookup: F) -> Result<ClientConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let config_path = matches.get_one::<PathBuf>("config");
    let mut config = ClientConfig::load(config_path.map(PathBuf::as_path))?.apply_env(lookup)?;

    if let Some(endpoint) = matches.get_one::<String>("endpoint") {
        config.endpoint = endpoint.clone();
    }
    if let Some(timeout) = matches.get_one::<u64>("timeout") {
        config.timeout_secs = *timeout;
    }
    if matches.get_flag("no-cache") {
        config.cache = false;
    }

    config.validate()?;
    debug!("Using endpoint {}", config.endpoint);
    Ok(config)
}

pub fn parse_request(matches: &ArgMatches) -> Result<QueryRequest> {
    let identifier = matches
        .get_one::<String>("IDENTIFIER")
        .cloned()
        .context("an identifier is required")?;

    let method = matches
        .get_one::<String>("method")
        .map(|name| name.parse::<Method>())
        .transpose()?;

    let level_of_detail = matches
        .get_one::<String>("level")
        .map(|level| Identifier::parse(level))
        .transpose()
        .context("invalid --level")?;

    let format_name = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("text");
    let format = OutputFormat::from_str(format_name)
        .with_context(|| format!("unknown format '{}'", format_name))?;

    Ok(QueryRequest {
        identifier,
        method,
        args: MethodArgs {
            predicate: matches.get_one::<String>("predicate").cloned(),
            level_of_detail,
        },
        format,
    })
}

/// Load the resource, call the accessor and render its output
pub async fn run_query(client: &SparqlClient, request: &QueryRequest) -> Result<String> {
    let resource = PlodResource::load(client, &request.identifier)
        .await
        .with_context(|| format!("loading '{}'", request.identifier))?;

    let method = request.method.unwrap_or(Method::Label);
    let output = method
        .invoke(&resource, &request.args)
        .await
        .with_context(|| format!("calling {} on '{}'", method, resource.identifier))?;

    Ok(render(&output, request.format))
}

/// 2 when the resource does not exist, 1 for every other failure
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<PlodError>() {
        Some(e) if e.is_not_found() => 2,
        _ => 1,
    }
}

fn spinner(quiet: bool, message: String) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message);
    pb
}

async fn execute(matches: &ArgMatches, pb: &ProgressBar) -> Result<String> {
    let config = resolve_config(matches, |key| std::env::var(key).ok())?;
    let request = parse_request(matches)?;
    let client = SparqlClient::from_config(&config)?;

    pb.set_message(format!("Querying {} for {}", config.endpoint, request.identifier));
    run_query(&client, &request).await
}

pub async fn handle_query(matches: &ArgMatches) -> i32 {
    let quiet = matches.get_flag("quiet");
    let pb = spinner(quiet, "Connecting...".to_string());

    let result = execute(matches, &pb).await;
    pb.finish_and_clear();

    match result {
        Ok(rendered) => {
            if rendered.ends_with('\n') {
                print!("{}", rendered);
            } else {
                println!("{}", rendered);
            }
            0
        }
        Err(e) => {
            eprintln!("{} {:#}", "✗".red().bold(), e);
            exit_code_for(&e)
        }
    }
}
