mod input;
mod render;
mod watch;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use magic_output_core::{Category, Classifier, LineStream, Preset, RuleTable};
use owo_colors::OwoColorize;
use std::fs::File;
use std::io;
use std::path::PathBuf;

use render::Format;

#[derive(Parser)]
#[command(name = "magic-output")]
#[command(about = "Colorize build and tool output by severity", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a file (or stdin) and print every line
    Classify {
        /// Output to classify; reads stdin when omitted
        #[arg(value_name = "FILE")]
        path: Option<PathBuf>,
        #[command(flatten)]
        rules: RuleArgs,
        #[arg(long, value_enum, default_value_t = Format::Auto)]
        format: Format,
    },
    /// Follow a growing file and print lines as they are appended
    Watch {
        #[arg(value_name = "FILE")]
        path: PathBuf,
        #[command(flatten)]
        rules: RuleArgs,
        #[arg(long, value_enum, default_value_t = Format::Auto)]
        format: Format,
    },
    /// Show the color each category is rendered with
    Palette,
    /// Print the active rule table as JSON
    Rules {
        #[command(flatten)]
        rules: RuleArgs,
    },
}

#[derive(Args)]
struct RuleArgs {
    /// JSON rule table replacing the built-in vocabulary
    #[arg(long = "rules", value_name = "FILE")]
    file: Option<PathBuf>,
    /// Built-in vocabulary, ignored when --rules is given
    #[arg(long, value_enum, default_value_t = PresetArg::Reference)]
    preset: PresetArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum PresetArg {
    Reference,
    CountAware,
}

impl From<PresetArg> for Preset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Reference => Preset::Reference,
            PresetArg::CountAware => Preset::CountAware,
        }
    }
}

impl RuleArgs {
    fn table(&self) -> Result<RuleTable> {
        match &self.file {
            Some(path) => RuleTable::load(path)
                .with_context(|| format!("invalid rule table {}", path.display())),
            None => Ok(RuleTable::preset(self.preset.into())),
        }
    }

    fn stream(&self) -> Result<LineStream> {
        Ok(LineStream::new(Classifier::new(self.table()?)))
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Classify {
            path,
            rules,
            format,
        } => {
            let stream = rules.stream()?;
            let mut out = render::renderer(*format, io::stdout());
            let lines = match path {
                Some(path) => {
                    let file = File::open(path)
                        .with_context(|| format!("cannot open {}", path.display()))?;
                    input::pump(file, stream, out.as_mut())?
                }
                None => input::pump(io::stdin().lock(), stream, out.as_mut())?,
            };
            log::info!("classified {lines} lines");
        }
        Commands::Watch {
            path,
            rules,
            format,
        } => {
            let stream = rules.stream()?;
            let mut out = render::renderer(*format, io::stdout());
            watch::follow(path, stream, out.as_mut())?;
        }
        Commands::Palette => {
            for category in Category::ALL {
                let style = render::style(category);
                let (r, g, b) = style.rgb;
                println!(
                    "{:<16}{:<16}#{r:02X}{g:02X}{b:02X}",
                    category.classification_type(),
                    style.display_name.truecolor(r, g, b),
                );
            }
        }
        Commands::Rules { rules } => {
            let table = rules.table()?;
            println!("{}", serde_json::to_string_pretty(&table.to_specs())?);
        }
    }
    Ok(())
}
