use clap::{Parser, Subcommand};
use content_core::config::{require_family_safe_from_env, PipelineConfig};
use content_core::error::CoreResult;
use content_core::pipeline;
use content_core::report::render_lines;
use content_core::safety::defaults::SafetyDefaults;
use content_core::safety::whitelist::WhitelistStore;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "content_validator")]
#[command(about = "Validate question catalogs before release")]
struct Args {
    /// Repository root containing questions/, config/ and tmp/.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Override the summary output path.
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Anything other than "false" enables the family_safe warning pass.
    #[arg(long, env = "REQUIRE_FAMILY_SAFE")]
    require_family_safe: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the release gate (default).
    Validate,
    /// Manage the local whitelist override file.
    Whitelist {
        #[command(subcommand)]
        action: WhitelistAction,
    },
}

#[derive(Debug, Subcommand)]
enum WhitelistAction {
    /// Print the effective hard-banned, soft-banned and whitelist sets as JSON.
    Show,
    /// Add a term to the override file.
    Add { term: String },
    /// Remove a term from the override file.
    Remove { term: String },
    /// Merge the built-in default whitelist into the file.
    Seed,
}

fn main() {
    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let args = Args::parse();
    let mut cfg = PipelineConfig::from_root(&args.root).with_require_family_safe(
        require_family_safe_from_env(args.require_family_safe.as_deref()),
    );
    if let Some(p) = args.summary {
        cfg = cfg.with_summary_path(p);
    }

    match args.command.unwrap_or(Command::Validate) {
        Command::Validate => validate(&cfg),
        Command::Whitelist { action } => {
            if let Err(e) = whitelist(&cfg, action) {
                eprintln!("whitelist error: {}", e);
                std::process::exit(2);
            }
        }
    }
}

fn validate(cfg: &PipelineConfig) {
    let outcome = pipeline::run(cfg);
    for line in render_lines(&outcome.summary, &outcome.issues) {
        println!("{}", line);
    }
    std::process::exit(outcome.verdict().exit_code());
}

fn whitelist(cfg: &PipelineConfig, action: WhitelistAction) -> CoreResult<()> {
    let defaults = SafetyDefaults::builtin();
    let store = WhitelistStore::new(&cfg.whitelist_path);
    match action {
        WhitelistAction::Show => {
            let lists = store.effective_lists(&defaults)?;
            let out = serde_json::json!({
                "hardBanned": lists.hard_banned,
                "softBanned": lists.soft_banned,
                "whitelist": lists.whitelist,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        WhitelistAction::Add { term } => {
            let added = store.add_term(&term)?;
            println!(
                "WHITELIST add {} {}",
                term,
                if added { "ADDED" } else { "UNCHANGED" }
            );
        }
        WhitelistAction::Remove { term } => {
            let removed = store.remove_term(&term, &defaults)?;
            println!(
                "WHITELIST remove {} {}",
                term,
                if removed { "REMOVED" } else { "NOT_FOUND" }
            );
        }
        WhitelistAction::Seed => {
            let added = store.seed_defaults(&defaults)?;
            println!("WHITELIST seed added={} path={}", added, store.path().display());
        }
    }
    Ok(())
}
