use std::{path::PathBuf, thread, time::Duration};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use derive_more::Display;
use log::info;

use prompter::{
    Logging, PROJECT_NAME, PROJECT_VERSION, Prompter, PrompterConfig,
    validation::{NonEmpty, ValidationResult, Validator},
};

#[derive(Parser)]
#[command(version = PROJECT_VERSION, about, long_about = None)]
pub struct UserArgs {
    #[command(subcommand)]
    command: Option<Command>,

    /// Configuration file (defaults to the project config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Ask for a line of text
    Text {
        /// Value to pre-fill
        #[arg(long)]
        default: Option<String>,
    },
    /// Ask a yes/no question
    Confirm {
        /// Answer used when the input is empty
        #[arg(long)]
        default: bool,
    },
    /// Ask for a semantic version
    Semver,
    /// Pick from a list
    Select {
        /// Allow choosing nothing
        #[arg(long)]
        optional: bool,
    },
    /// Run a spinner for a while
    Spin {
        /// Seconds to spin for
        #[arg(long, default_value_t = 2)]
        seconds: u64,
        /// Finish with an error instead of success
        #[arg(long)]
        fail: bool,
    },
    /// Print the effective configuration as TOML
    ShowConfig,
    /// Run every prompt in turn
    Tour,
}

#[derive(Display)]
enum Environment {
    #[display("Development")]
    Development,
    #[display("Staging")]
    Staging,
    #[display("Production (requires approval)")]
    Production,
}

const ENVIRONMENTS: [Environment; 3] = [
    Environment::Development,
    Environment::Staging,
    Environment::Production,
];

fn init_logging(verbose: bool) -> Result<()> {
    if verbose {
        Logging::new().with_debug_mode(true).start()
    } else {
        let file_name = format!("{PROJECT_NAME}.log");
        Logging::new().with_file(file_name).start()
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<PrompterConfig> {
    match path {
        Some(path) => PrompterConfig::load_from(path),
        None => PrompterConfig::load(),
    }
}

fn project_name(candidate: &str) -> ValidationResult {
    if candidate
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        ValidationResult::Valid
    } else {
        ValidationResult::Invalid("Use letters, digits, '-' or '_' only".into())
    }
}

fn text(p: &mut Prompter, default: Option<&str>) -> Result<()> {
    let name = match default {
        Some(default) => p.prompt_with_default("Project name", default, &project_name)?,
        None => {
            let required = NonEmpty::new("A project name is required");
            let validator = |candidate: &str| match required.validate(candidate) {
                ValidationResult::Valid => project_name(candidate),
                invalid @ ValidationResult::Invalid(_) => invalid,
            };
            p.prompt_validated("Project name", &validator)?
        }
    };
    println!("name = {name}");
    Ok(())
}

fn confirm(p: &mut Prompter, default: bool) -> Result<()> {
    let answer = p.yes_or_no("Continue?", default)?;
    println!("continue = {answer}");
    Ok(())
}

fn semver(p: &mut Prompter) -> Result<()> {
    let version = p.prompt_semver("Release version")?;
    println!("version = {version}");
    Ok(())
}

fn select(p: &mut Prompter, optional: bool) -> Result<()> {
    let index = p.prompt_list("Deploy to", !optional, 0, &ENVIRONMENTS)?;
    match usize::try_from(index).ok().and_then(|i| ENVIRONMENTS.get(i)) {
        Some(env) => println!("environment = {env}"),
        None => println!("environment = (none)"),
    }
    Ok(())
}

fn spin(p: &mut Prompter, seconds: u64, fail: bool) -> Result<()> {
    let spinner = p.start_spinner("Deploying")?;
    thread::sleep(Duration::from_secs(seconds));
    if fail {
        spinner.error("Deploy failed")?;
    } else {
        spinner.success("Deployed")?;
    }
    Ok(())
}

fn tour(p: &mut Prompter) -> Result<()> {
    text(p, Some("my-app"))?;
    semver(p)?;
    select(p, true)?;
    if p.yes_or_no("Deploy now?", true)? {
        spin(p, 2, false)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = UserArgs::parse();

    init_logging(args.verbose)?;

    let config = load_config(args.config.as_ref()).context("Unable to load configuration")?;
    info!("{PROJECT_NAME} {PROJECT_VERSION} starting");

    let mut p = Prompter::stdio(config);

    match args.command {
        Some(Command::Text { default }) => text(&mut p, default.as_deref()),
        Some(Command::Confirm { default }) => confirm(&mut p, default),
        Some(Command::Semver) => semver(&mut p),
        Some(Command::Select { optional }) => select(&mut p, optional),
        Some(Command::Spin { seconds, fail }) => spin(&mut p, seconds, fail),
        Some(Command::ShowConfig) => {
            print!("{}", p.config().to_toml()?);
            Ok(())
        }
        None | Some(Command::Tour) => tour(&mut p),
    }
}
