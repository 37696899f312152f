//! Command-line interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::form::FormField;

#[derive(Parser, Debug)]
#[command(name = "tibreton", version)]
#[command(about = "Générateur de rapports d’expertise immobilière")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Saved form location (default: TIBRETON_FORM_PATH or .tibreton-form.json)
    #[arg(long, global = true, value_name = "PATH")]
    pub form: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP server (form page + report endpoint)
    Serve {
        /// Bind host (overrides HOST)
        #[arg(long)]
        host: Option<String>,
        /// Bind port (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Edit the saved form
    #[command(subcommand)]
    Form(FormCommand),

    /// Submit the saved form and print the report and market synthesis
    Generate {
        /// Report endpoint URL (overrides TIBRETON_ENDPOINT)
        #[arg(long, value_name = "URL")]
        endpoint: Option<String>,
        /// Also write rapport.md and synthese-marche.md into this directory
        #[arg(long, value_name = "DIR")]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum FormCommand {
    /// Print the saved form
    Show,
    /// Set one field; an empty value clears numeric fields
    Set {
        #[arg(value_enum)]
        field: FormField,
        value: String,
    },
    /// Reset the form to its defaults
    Clear,
}
