// src/cli.rs
use clap::{Args, Parser, Subcommand};

use crate::domain::FieldRecord;

#[derive(Parser, Debug)]
#[command(
    name = "intake",
    version,
    about = "Collect, validate, review and submit employee details"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<Cmd>,

    /// Storage endpoint receiving the submissions
    #[arg(long, global = true, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Start with the dark palette
    #[arg(long, global = true)]
    pub dark: bool,

    /// Ticks per second (notification expiry)
    #[arg(long, global = true, value_name = "FLOAT")]
    pub tick_rate: Option<f64>,

    /// Frames per second
    #[arg(long, global = true, value_name = "FLOAT")]
    pub frame_rate: Option<f64>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Cmd {
    /// Run the interactive form (default)
    Run,
    /// Validate and submit one record without the terminal UI
    Submit(SubmitArgs),
}

#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct SubmitArgs {
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long, default_value = "")]
    pub mobile: String,
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub department: String,
    #[arg(long, default_value = "")]
    pub role: String,
    #[arg(long, default_value = "")]
    pub address: String,

    /// Validate and print the request body, but do not send it
    #[arg(long)]
    pub dry_run: bool,
}

impl SubmitArgs {
    pub fn record(&self) -> FieldRecord {
        FieldRecord {
            name: self.name.clone(),
            mobile: self.mobile.clone(),
            email: self.email.clone(),
            department: self.department.clone(),
            role: self.role.clone(),
            address: self.address.clone(),
        }
    }
}

impl Cli {
    pub fn is_headless(&self) -> bool {
        matches!(self.cmd, Some(Cmd::Submit(_)))
    }
}
