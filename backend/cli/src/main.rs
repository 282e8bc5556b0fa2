use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use axe::{load_options, Args, Axe, FieldName, Options, Value};
use axe_logging::{init_logger, TracingConsole};

#[derive(Parser)]
#[command(name = "axe")]
#[command(about = "Log a message through axe and the tracing subscriber")]
#[command(version)]
struct Cli {
    /// Lowest active level (overrides the options file)
    #[arg(short, long)]
    level: Option<String>,

    /// Metadata object as JSON
    #[arg(short, long)]
    meta: Option<String>,

    /// POST every record to this URL
    #[arg(long)]
    capture: Option<String>,

    /// Suppress writes; hooks still run
    #[arg(long)]
    silent: bool,

    /// Logger name
    #[arg(long)]
    name: Option<String>,

    /// YAML options file
    #[arg(short, long, default_value = "axe.yaml")]
    config: PathBuf,

    /// Also write NDJSON logs to this directory
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Level name, or the first word of the message
    call_level: String,

    /// Message and format arguments
    message: Vec<String>,
}

impl Cli {
    fn options(&self, mut options: Options) -> Options {
        if let Some(level) = &self.level {
            options.level = Some(level.clone());
            options.levels = None;
        }
        if self.silent {
            options.silent = Some(true);
        }
        if let Some(name) = &self.name {
            options.name = Some(FieldName::from(name.as_str()));
        }
        options
    }

    fn args(&self) -> Result<Args> {
        let mut args: Args = std::iter::once(self.call_level.as_str())
            .chain(self.message.iter().map(String::as_str))
            .map(Value::from)
            .collect();
        if let Some(raw) = &self.meta {
            let json: serde_json::Value =
                serde_json::from_str(raw).context("--meta must be valid JSON")?;
            args = args.arg(json);
        }
        Ok(args)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Tracing passes everything; the logger's own levels decide what is written
    init_logger("trace", cli.log_dir.as_deref());

    let options = load_options(&cli.config).await?;
    let options = cli.options(options);
    let args = cli.args()?;

    let mut axe = Axe::new(Arc::new(TracingConsole::new()), options)?;
    if let Some(url) = &cli.capture {
        axe.capture(url.as_str());
    }

    debug!(args = args.len(), "Logging from command line");
    if axe.log(args).await.is_none() {
        debug!("Level inactive; nothing written");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("axe").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn flags_override_options() {
        let cli = parse(&["--level", "debug", "--silent", "--name", "job", "info", "hi"]);
        let options = Options {
            levels: Some(vec!["warn".into(), "error".into(), "fatal".into()]),
            ..Default::default()
        };
        let options = cli.options(options);
        assert_eq!(options.level.as_deref(), Some("debug"));
        assert!(options.levels.is_none());
        assert_eq!(options.silent, Some(true));
        assert_eq!(options.name, Some(FieldName::from("job")));
    }

    #[test]
    fn positional_words_and_meta_become_args() {
        let cli = parse(&["--meta", r#"{"user":7}"#, "warn", "hi %s", "bob"]);
        let args = cli.args().unwrap();
        assert_eq!(args.len(), 4);
        assert_eq!(args.as_slice()[0], Value::from("warn"));
        assert!(args.as_slice()[3].is_map());
    }

    #[test]
    fn bad_meta_is_an_error() {
        let cli = parse(&["--meta", "{nope", "info", "x"]);
        assert!(cli.args().is_err());
    }
}
