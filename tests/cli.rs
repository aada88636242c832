mod common;

use clap::Parser;
use common::{collection, public, FakeSource};
use contrib_readme::cli::{execute, stale_comments, AppContext, Cli, Commands};
use contrib_readme::contributions::{RepositoryRef, RepositorySets};
use contrib_readme::i18n::TranslationCatalog;
use contrib_readme::store::{ProfileStore, Theme};
use contrib_readme::ReadmeGenerator;
use serde_json::json;
use std::collections::BTreeMap;
use tempfile::TempDir;

fn context(dir: &TempDir, source: FakeSource) -> AppContext<FakeSource> {
    AppContext {
        generator: ReadmeGenerator::new(source).with_current_year(2024),
        store: ProfileStore::new(dir.path().join("profile.json")),
        catalog: TranslationCatalog::builtin(),
    }
}

fn contributing_source() -> FakeSource {
    let payload = json!({
        "contributionsCollection": collection(&[public("org/tool")], &[public("org/lib")], &[], &[], &[]),
    });
    FakeSource::new(Some(2024), Some(payload))
}

fn command(args: &[&str]) -> Commands {
    let mut argv = vec!["contrib-readme"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap().command
}

async fn run(ctx: &mut AppContext<FakeSource>, args: &[&str]) -> anyhow::Result<String> {
    let mut out = Vec::new();
    execute(command(args), ctx, &mut out).await?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn test_global_config_flag_parses() {
    let cli = Cli::try_parse_from(["contrib-readme", "history", "--config", "custom.toml"]).unwrap();
    assert_eq!(cli.config.unwrap().to_str(), Some("custom.toml"));
    assert!(matches!(cli.command, Commands::History));
}

#[test]
fn test_unknown_theme_mode_is_rejected() {
    assert!(Cli::try_parse_from(["contrib-readme", "theme", "purple"]).is_err());
}

#[tokio::test]
async fn test_validate_remembers_credentials() {
    let dir = TempDir::new().unwrap();
    let mut ctx = context(&dir, contributing_source());

    let output = run(&mut ctx, &["validate", "-u", "octocat", "-t", "ghp_token"]).await.unwrap();
    assert!(output.contains("Connection validated for octocat"));

    let profile = ctx.store.load();
    assert_eq!(profile.username, "octocat");
    assert_eq!(profile.username_history, vec!["octocat"]);
    assert_eq!(profile.token(), "ghp_token");
}

#[tokio::test]
async fn test_validate_rejects_bad_credentials() {
    let dir = TempDir::new().unwrap();
    let mut ctx = context(&dir, FakeSource::rejecting());

    let err = run(&mut ctx, &["validate", "-u", "octocat", "-t", "bad"]).await.unwrap_err();
    assert!(err.to_string().contains("Invalid credentials"));
    assert!(ctx.store.load().username.is_empty());
}

#[tokio::test]
async fn test_generate_prints_readme() {
    let dir = TempDir::new().unwrap();
    let mut ctx = context(&dir, contributing_source());

    let output = run(&mut ctx, &["generate", "-u", "octocat", "-t", "token"]).await.unwrap();
    assert!(output.starts_with("# GitHub Profile : octocat\n"));
    assert!(output.contains("## Commits only\n\n- [org/tool](https://github.com/org/tool)"));
    assert!(output.contains("## Pull Requests\n\n- [org/lib](https://github.com/org/lib)"));
}

#[tokio::test]
async fn test_generate_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let mut ctx = context(&dir, contributing_source());
    let target = dir.path().join("README.md");

    let output = run(
        &mut ctx,
        &["generate", "-u", "octocat", "-t", "token", "-o", target.to_str().unwrap()],
    )
    .await
    .unwrap();

    assert!(output.contains("README written to"));
    let written = std::fs::read_to_string(&target).unwrap();
    assert!(written.starts_with("# GitHub Profile : octocat\n"));
}

#[tokio::test]
async fn test_generate_failure_is_an_error() {
    let dir = TempDir::new().unwrap();
    let mut ctx = context(&dir, FakeSource::new(None, None));
    let target = dir.path().join("README.md");

    let err = run(
        &mut ctx,
        &["generate", "-u", "ghost", "-t", "token", "-o", target.to_str().unwrap()],
    )
    .await
    .unwrap_err();

    assert!(err.to_string().contains("Failed to retrieve data from GitHub."));
    assert!(!target.exists());
}

#[tokio::test]
async fn test_generate_rejects_bad_credentials() {
    let dir = TempDir::new().unwrap();
    let mut ctx = context(&dir, FakeSource::rejecting());
    let target = dir.path().join("README.md");

    let err = run(
        &mut ctx,
        &["generate", "-u", "alice", "-t", "tok", "-o", target.to_str().unwrap()],
    )
    .await
    .unwrap_err();

    assert!(err.to_string().contains("Invalid credentials"));
    assert!(!target.exists());
    assert!(ctx.generator.source().recorded_requests().is_empty());

    let profile = ctx.store.load();
    assert!(profile.username.is_empty());
    assert!(profile.username_history.is_empty());
}

#[tokio::test]
async fn test_generate_remembers_credentials() {
    let dir = TempDir::new().unwrap();
    let mut ctx = context(&dir, contributing_source());

    run(&mut ctx, &["validate", "-u", "bob", "-t", "old"]).await.unwrap();
    run(&mut ctx, &["generate", "-u", "alice", "-t", "tok"]).await.unwrap();

    let profile = ctx.store.load();
    assert_eq!(profile.username, "alice");
    assert_eq!(profile.username_history, vec!["alice", "bob"]);
    assert_eq!(profile.token(), "tok");

    // Comments now default to the user the README was generated for
    run(&mut ctx, &["comment", "set", "org/tool", "note"]).await.unwrap();
    assert_eq!(ctx.store.load().comments("alice")["org/tool"], "note");
}

#[test]
fn test_stale_comments_are_detected() {
    let mut comments = BTreeMap::new();
    comments.insert("org/gone".to_string(), "old".to_string());
    comments.insert("org/tool".to_string(), "kept".to_string());
    comments.insert("org/archived".to_string(), "old".to_string());

    let mut sets = RepositorySets::default();
    sets.commit_only
        .insert(RepositoryRef::new("org/tool", "https://github.com/org/tool"));

    assert_eq!(stale_comments(&comments, &sets), vec!["org/archived", "org/gone"]);
}

#[test]
fn test_all_comments_are_stale_without_contributions() {
    let mut comments = BTreeMap::new();
    comments.insert("org/tool".to_string(), "kept".to_string());

    assert_eq!(stale_comments(&comments, &RepositorySets::default()), vec!["org/tool"]);
    assert!(stale_comments(&BTreeMap::new(), &RepositorySets::default()).is_empty());
}

#[tokio::test]
async fn test_generate_requires_username() {
    let dir = TempDir::new().unwrap();
    let mut ctx = context(&dir, contributing_source());

    assert!(run(&mut ctx, &["generate", "-t", "token"]).await.is_err());
}

#[tokio::test]
async fn test_comment_round_trip_through_generate() {
    let dir = TempDir::new().unwrap();
    let mut ctx = context(&dir, contributing_source());

    let output = run(&mut ctx, &["comment", "-u", "octocat", "set", "org/tool", "Deployment helper"])
        .await
        .unwrap();
    assert!(output.contains("Comment saved for org/tool"));

    let readme = run(&mut ctx, &["generate", "-u", "octocat", "-t", "token"]).await.unwrap();
    assert!(readme.contains("- [org/tool](https://github.com/org/tool) — Deployment helper"));

    let listing = run(&mut ctx, &["comment", "-u", "octocat", "list"]).await.unwrap();
    assert_eq!(listing, "org/tool — Deployment helper\n");

    let output = run(&mut ctx, &["comment", "-u", "octocat", "remove", "org/tool"]).await.unwrap();
    assert!(output.contains("Comment removed for org/tool"));

    let readme = run(&mut ctx, &["generate", "-u", "octocat", "-t", "token"]).await.unwrap();
    assert!(!readme.contains("Deployment helper"));
    assert!(readme.contains("- [org/tool](https://github.com/org/tool)\n"));
}

#[tokio::test]
async fn test_comment_edge_cases() {
    let dir = TempDir::new().unwrap();
    let mut ctx = context(&dir, contributing_source());

    assert!(run(&mut ctx, &["comment", "-u", "octocat", "set", "org/tool", "   "]).await.is_err());

    let output = run(&mut ctx, &["comment", "-u", "octocat", "remove", "org/tool"]).await.unwrap();
    assert!(output.contains("No comment stored for org/tool"));

    let output = run(&mut ctx, &["comment", "-u", "octocat", "list"]).await.unwrap();
    assert!(output.contains("No comments stored for octocat"));
}

#[tokio::test]
async fn test_history_lists_recent_usernames() {
    let dir = TempDir::new().unwrap();
    let mut ctx = context(&dir, contributing_source());

    let output = run(&mut ctx, &["history"]).await.unwrap();
    assert_eq!(output, "No usernames in history\n");

    run(&mut ctx, &["validate", "-u", "alice", "-t", "token"]).await.unwrap();
    run(&mut ctx, &["validate", "-u", "bob", "-t", "token"]).await.unwrap();

    let output = run(&mut ctx, &["history"]).await.unwrap();
    assert_eq!(output, "bob\nalice\n");
}

#[tokio::test]
async fn test_theme_commands() {
    let dir = TempDir::new().unwrap();
    let mut ctx = context(&dir, contributing_source());

    assert_eq!(run(&mut ctx, &["theme"]).await.unwrap(), "light\n");

    let output = run(&mut ctx, &["theme", "toggle"]).await.unwrap();
    assert_eq!(output, "Theme changed to dark\n");
    assert_eq!(ctx.store.load().theme, Theme::Dark);

    run(&mut ctx, &["theme", "light"]).await.unwrap();
    assert_eq!(ctx.store.load().theme, Theme::Light);
}

#[tokio::test]
async fn test_language_selection_changes_headings() {
    let dir = TempDir::new().unwrap();
    let mut ctx = context(&dir, contributing_source());

    let listing = run(&mut ctx, &["language"]).await.unwrap();
    assert!(listing.contains("* en  English"));
    assert!(listing.contains("  fr  Français"));

    run(&mut ctx, &["language", "fr"]).await.unwrap();
    assert_eq!(ctx.store.load().language, "fr");

    let readme = run(&mut ctx, &["generate", "-u", "octocat", "-t", "token"]).await.unwrap();
    assert!(readme.starts_with("# Profil GitHub : octocat\n"));

    assert!(run(&mut ctx, &["language", "xx"]).await.is_err());
    assert_eq!(ctx.store.load().language, "fr");
}

#[tokio::test]
async fn test_init_config_writes_file() {
    let dir = TempDir::new().unwrap();
    let mut ctx = context(&dir, contributing_source());
    let path = dir.path().join("config").join("contrib-readme.toml");

    run(&mut ctx, &["init-config", path.to_str().unwrap()]).await.unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("[api]"));
}
