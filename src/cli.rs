//! Command-line interface for contrib-readme.
//!
//! This module is CLI glue only: argument parsing, credential resolution, and
//! printing. All pipeline logic lives in [`crate::readme`], persistence in
//! [`crate::store`].
//!
//! [`execute`] takes its collaborators through [`AppContext`], so commands can
//! be driven against any [`ContributionSource`] and output sink.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{info, warn};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

use crate::config::Config;
use crate::contributions::RepositorySets;
use crate::constants::{ERROR_NO_TOKEN, ERROR_NO_USERNAME, SUCCESS_README_WRITTEN, TOKEN_ENV_VAR};
use crate::github::ContributionSource;
use crate::i18n::{TranslationCatalog, Translator};
use crate::readme::{ReadmeGenerator, ReadmeOutcome};
use crate::store::{Profile, ProfileStore, Theme};

/// Generate a Markdown README from your GitHub contribution history.
#[derive(Debug, Parser)]
#[clap(name = "contrib-readme", version, about)]
pub struct Cli {
    /// Path to a TOML config file (defaults to ./contrib-readme.toml or the XDG config dir)
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Args, Clone, Default)]
pub struct Credentials {
    /// GitHub username (defaults to the last validated one)
    #[clap(short, long)]
    pub username: Option<String>,

    /// Personal access token (defaults to GITHUB_TOKEN, then the stored token)
    #[clap(short, long)]
    pub token: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check credentials and remember them
    Validate {
        #[clap(flatten)]
        credentials: Credentials,
    },
    /// Generate the contributions README
    Generate {
        #[clap(flatten)]
        credentials: Credentials,

        /// Write the README to this file instead of stdout
        #[clap(short, long)]
        output: Option<PathBuf>,
    },
    /// Manage per-repository comments
    Comment {
        /// GitHub username (defaults to the last validated one)
        #[clap(short, long, global = true)]
        username: Option<String>,

        #[clap(subcommand)]
        action: CommentAction,
    },
    /// Show recently used usernames
    History,
    /// Show or change the theme
    Theme {
        #[clap(value_enum)]
        mode: Option<ThemeMode>,
    },
    /// Show available languages or select one
    Language { code: Option<String> },
    /// Write a default configuration file
    InitConfig { path: Option<PathBuf> },
}

#[derive(Debug, Subcommand)]
pub enum CommentAction {
    /// Add or replace the comment for a repository
    Set {
        /// Repository full name, e.g. owner/name
        repo: String,
        comment: String,
    },
    /// Delete the comment for a repository
    Remove { repo: String },
    /// List stored comments
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeMode {
    Light,
    Dark,
    Toggle,
}

/// Collaborators shared by all commands.
pub struct AppContext<S> {
    pub generator: ReadmeGenerator<S>,
    pub store: ProfileStore,
    pub catalog: TranslationCatalog,
}

/// Load settings honoring `--config`.
pub fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load_from_file(path),
        None => Config::load(),
    }
}

/// Translation catalog for `config`, switched to the profile's language.
pub fn build_catalog(config: &Config, profile: &Profile) -> Result<TranslationCatalog> {
    let mut catalog = match &config.i18n.translations_dir {
        Some(dir) => TranslationCatalog::with_overrides(dir)?,
        None => TranslationCatalog::builtin(),
    };
    if !catalog.set_language(&profile.language) {
        warn!("⚠️  Unknown language '{}' in profile, using English", profile.language);
    }
    Ok(catalog)
}

fn resolve_username(flag: Option<&str>, profile: &Profile) -> Result<String> {
    match flag {
        Some(username) if !username.trim().is_empty() => Ok(username.trim().to_string()),
        _ if !profile.username.is_empty() => Ok(profile.username.clone()),
        _ => anyhow::bail!(ERROR_NO_USERNAME),
    }
}

fn resolve_token(flag: Option<&str>, profile: &Profile) -> Result<String> {
    if let Some(token) = flag.filter(|token| !token.trim().is_empty()) {
        return Ok(token.trim().to_string());
    }
    if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
        if !token.trim().is_empty() {
            return Ok(token.trim().to_string());
        }
    }
    let stored = profile.token();
    if stored.is_empty() {
        anyhow::bail!(ERROR_NO_TOKEN);
    }
    Ok(stored)
}

/// Run one command.
///
/// Primary output (the README, listings, status lines) goes to `out`.
pub async fn execute<S: ContributionSource>(
    command: Commands,
    ctx: &mut AppContext<S>,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        Commands::Validate { credentials } => validate(&credentials, ctx, out).await,
        Commands::Generate { credentials, output } => generate(&credentials, output, ctx, out).await,
        Commands::Comment { username, action } => comment(username.as_deref(), action, ctx, out),
        Commands::History => history(ctx, out),
        Commands::Theme { mode } => theme(mode, ctx, out),
        Commands::Language { code } => language(code.as_deref(), ctx, out),
        Commands::InitConfig { path } => {
            let path = match path {
                Some(path) => path,
                None => Config::get_default_config_path()?,
            };
            Config::generate_default_config(path)
        }
    }
}

/// Check credentials against the source, then remember them.
async fn authorize<S: ContributionSource>(username: &str, token: &str, ctx: &mut AppContext<S>) -> Result<()> {
    if !ctx.generator.validate(username, token).await {
        warn!("{}", ctx.catalog.get_text("status_messages.invalid_credentials"));
        anyhow::bail!(ctx.catalog.get_text("errors.invalid_credentials"));
    }

    ctx.store.update(|profile| {
        profile.record_username(username);
        profile.set_token(token);
    })
}

/// Repositories with a stored comment that appear in none of `sets`.
pub fn stale_comments<'a>(comments: &'a BTreeMap<String, String>, sets: &RepositorySets) -> Vec<&'a str> {
    comments
        .keys()
        .filter(|repo| sets.category_of(repo).is_none())
        .map(String::as_str)
        .collect()
}

async fn validate<S: ContributionSource>(
    credentials: &Credentials,
    ctx: &mut AppContext<S>,
    out: &mut dyn Write,
) -> Result<()> {
    let profile = ctx.store.load();
    let username = resolve_username(credentials.username.as_deref(), &profile)?;
    let token = resolve_token(credentials.token.as_deref(), &profile)?;

    writeln!(out, "{}", ctx.catalog.get_text("status_messages.validating"))?;
    authorize(&username, &token, ctx).await?;

    writeln!(
        out,
        "{}",
        ctx.catalog
            .get_text_with("status_messages.connection_validated", &[("username", &username)])
    )?;
    Ok(())
}

async fn generate<S: ContributionSource>(
    credentials: &Credentials,
    output: Option<PathBuf>,
    ctx: &mut AppContext<S>,
    out: &mut dyn Write,
) -> Result<()> {
    let profile = ctx.store.load();
    let username = resolve_username(credentials.username.as_deref(), &profile)?;
    let token = resolve_token(credentials.token.as_deref(), &profile)?;
    let comments = profile.comments(&username);

    authorize(&username, &token, ctx).await?;
    info!(
        "{}",
        ctx.catalog
            .get_text_with("status_messages.generating", &[("username", &username)])
    );

    let outcome = ctx
        .generator
        .generate(&username, &token, &comments, &ctx.catalog)
        .await;

    match &outcome {
        ReadmeOutcome::Failed(failure) => {
            anyhow::bail!("{} ({failure})", ctx.catalog.get_text("errors.github_data_error"));
        }
        ReadmeOutcome::NoContributions { .. } => {
            info!(
                "{}",
                ctx.catalog
                    .get_text_with("status_messages.no_contributions", &[("username", &username)])
            );
        }
        ReadmeOutcome::Rendered { .. } => {}
    }

    for repo in stale_comments(&comments, &outcome.sets()) {
        warn!("⚠️  Comment for {repo} does not match any contributed repository");
    }

    match output {
        Some(path) => {
            std::fs::write(&path, outcome.markdown())
                .with_context(|| format!("Failed to write README: {}", path.display()))?;
            writeln!(out, "{} {}", SUCCESS_README_WRITTEN, path.display())?;
        }
        None => writeln!(out, "{}", outcome.markdown())?,
    }
    Ok(())
}

fn comment<S>(
    username: Option<&str>,
    action: CommentAction,
    ctx: &mut AppContext<S>,
    out: &mut dyn Write,
) -> Result<()> {
    let profile = ctx.store.load();
    let username = resolve_username(username, &profile)?;

    match action {
        CommentAction::Set { repo, comment } => {
            if !ctx.store.update(|profile| profile.set_comment(&username, &repo, &comment))? {
                anyhow::bail!("Comment for {repo} cannot be empty");
            }
            writeln!(
                out,
                "{}",
                ctx.catalog.get_text_with("status_messages.comment_saved", &[("repo", &repo)])
            )?;
        }
        CommentAction::Remove { repo } => {
            let key = if ctx.store.update(|profile| profile.remove_comment(&username, &repo))? {
                "status_messages.comment_removed"
            } else {
                "status_messages.comment_missing"
            };
            writeln!(out, "{}", ctx.catalog.get_text_with(key, &[("repo", &repo)]))?;
        }
        CommentAction::List => {
            let comments = profile.comments(&username);
            if comments.is_empty() {
                writeln!(
                    out,
                    "{}",
                    ctx.catalog
                        .get_text_with("status_messages.no_comments", &[("username", &username)])
                )?;
            }
            for (repo, text) in &comments {
                writeln!(out, "{repo} — {text}")?;
            }
        }
    }
    Ok(())
}

fn history<S>(ctx: &mut AppContext<S>, out: &mut dyn Write) -> Result<()> {
    let profile = ctx.store.load();
    if profile.username_history.is_empty() {
        writeln!(out, "{}", ctx.catalog.get_text("status_messages.history_empty"))?;
    }
    for username in &profile.username_history {
        writeln!(out, "{username}")?;
    }
    Ok(())
}

fn theme<S>(mode: Option<ThemeMode>, ctx: &mut AppContext<S>, out: &mut dyn Write) -> Result<()> {
    let theme = match mode {
        None => ctx.store.load().theme,
        Some(mode) => ctx.store.update(|profile| {
            profile.theme = match mode {
                ThemeMode::Light => Theme::Light,
                ThemeMode::Dark => Theme::Dark,
                ThemeMode::Toggle => profile.theme.toggled(),
            };
            profile.theme
        })?,
    };

    let theme_name = ctx.catalog.get_text(&format!("themes.{theme}"));
    if mode.is_some() {
        writeln!(
            out,
            "{}",
            ctx.catalog
                .get_text_with("status_messages.theme_changed", &[("theme", &theme_name)])
        )?;
    } else {
        writeln!(out, "{theme_name}")?;
    }
    Ok(())
}

fn language<S>(code: Option<&str>, ctx: &mut AppContext<S>, out: &mut dyn Write) -> Result<()> {
    let Some(code) = code else {
        for (code, name) in TranslationCatalog::available_languages() {
            let marker = if *code == ctx.catalog.language() { "*" } else { " " };
            writeln!(out, "{marker} {code}  {name}")?;
        }
        return Ok(());
    };

    if !ctx.catalog.set_language(code) {
        anyhow::bail!(ctx
            .catalog
            .get_text_with("errors.unknown_language", &[("language", code)]));
    }
    ctx.store.update(|profile| profile.language = code.to_string())?;

    let name = TranslationCatalog::language_name(code).unwrap_or(code);
    writeln!(
        out,
        "{}",
        ctx.catalog
            .get_text_with("status_messages.language_changed", &[("language", name)])
    )?;
    Ok(())
}
