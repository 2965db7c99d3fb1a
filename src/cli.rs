use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "specprobe")]
#[command(version, about = "Swagger/OpenAPI unauthorized-access and sensitive-parameter auditor")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    Audit {
        #[arg(short, long, conflicts_with = "url", required_unless_present = "url")]
        spec: Option<String>,

        #[arg(short, long)]
        url: Option<String>,

        #[arg(short = 'x', long)]
        host: Option<String>,

        #[arg(short, long)]
        proxy: Option<String>,

        #[arg(long)]
        delete: bool,

        #[arg(short, long, default_value = "10")]
        concurrency: usize,

        #[arg(short, long, default_value = "10")]
        timeout: u64,

        #[arg(short, long)]
        output: Option<String>,

        #[arg(short, long)]
        json: Option<String>,

        #[arg(short, long)]
        verbose: bool,
    },

    Parse {
        #[arg(short, long)]
        spec: String,
    },

    Report {
        #[arg(short, long)]
        input: String,

        #[arg(short, long)]
        output: String,
    },
}
