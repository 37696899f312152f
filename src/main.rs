use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod app;
mod cli;
mod client;
mod form;
mod model;
mod service;

use cli::{Cli, Command, FormCommand};
use client::{Presenter, ReportClient};
use form::FormStore;
use model::Config;

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present (ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Some(path) = cli.form {
        config.form_store_path = path;
    }

    match cli.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            match app::serve(config).await {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    tracing::error!(error = %e, "Server stopped");
                    ExitCode::FAILURE
                }
            }
        }
        Command::Form(command) => run_form(command, &FormStore::new(&config.form_store_path)),
        Command::Generate { endpoint, output } => {
            let endpoint = endpoint.unwrap_or(config.endpoint);
            let store = FormStore::new(&config.form_store_path);
            run_generate(&store, ReportClient::new(endpoint), output.as_deref()).await
        }
    }
}

fn run_form(command: FormCommand, store: &FormStore) -> ExitCode {
    match command {
        FormCommand::Show => {
            println!("{}", store.load());
            ExitCode::SUCCESS
        }
        FormCommand::Set { field, value } => {
            let mut form = store.load();
            if let Err(e) = form.set(field, &value) {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
            if let Err(e) = store.save(&form) {
                tracing::warn!(path = %store.path().display(), error = %e, "Failed to save form");
            }
            println!("{form}");
            ExitCode::SUCCESS
        }
        FormCommand::Clear => {
            match store.clear() {
                Ok(_) => println!("{}", form::FormState::default()),
                Err(e) => {
                    tracing::warn!(path = %store.path().display(), error = %e, "Failed to clear form")
                }
            }
            ExitCode::SUCCESS
        }
    }
}

async fn run_generate(
    store: &FormStore,
    client: ReportClient,
    output: Option<&std::path::Path>,
) -> ExitCode {
    let form = store.load();
    if !form.can_submit() {
        eprintln!("Adresse, notes de visite et type de bien sont requis (tibreton form set ...).");
        return ExitCode::FAILURE;
    }

    let mut presenter = Presenter::default();
    presenter
        .submit_with(&client, &form, |p| {
            if p.loading {
                eprint!("{}", p.render());
            }
        })
        .await;
    print!("{}", presenter.render());

    if !presenter.error.is_empty() {
        return ExitCode::FAILURE;
    }

    if let Some(dir) = output {
        match presenter.export(dir) {
            Ok(paths) => {
                for path in paths {
                    tracing::info!(path = %path.display(), "Pane written");
                }
            }
            Err(e) => tracing::error!(dir = %dir.display(), error = %e, "Failed to write panes"),
        }
    }

    ExitCode::SUCCESS
}
