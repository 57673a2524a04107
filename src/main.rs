use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use git_release::cli::{run_release_workflow, ReleaseWorkflowArgs, WorkflowResult};
use git_release::config::{self, Config};
use git_release::source::{Git2Repository, JsonReleaseFile, WithReleases};
use git_release::ui;

#[derive(clap::Parser)]
#[command(
    name = "git-release",
    version,
    about = "Generate a changelog and the next semantic version tag from conventional commits"
)]
struct Args {
    #[arg(short, long, env = "GIT_RELEASE_CONFIG", help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, default_value = ".", help = "Path inside the git repository")]
    repo: PathBuf,

    #[arg(long, default_value = "HEAD", help = "Reference being released")]
    head: String,

    #[arg(long, env = "GIT_RELEASE_BASE_TAG", help = "Base tag, defaults to the last released tag")]
    base_tag: Option<String>,

    #[arg(long, env = "GIT_RELEASE_TAG", help = "Release tag, skips the version bump")]
    release_tag: Option<String>,

    #[arg(long, env = "GIT_RELEASE_NAME", help = "Release name, defaults to the release tag")]
    release_name: Option<String>,

    #[arg(long, help = "Release as a prerelease (forces a release candidate bump)")]
    prerelease: bool,

    #[arg(long, help = "Mark the release as a draft in the outputs")]
    draft: bool,

    #[arg(long, help = "Create the release tag and push it to the remote")]
    push_tag: bool,

    #[arg(long, help = "Remote to push the tag to")]
    remote: Option<String>,

    #[arg(long, help = "App name prefixed to tags (e.g. my-app@1.0.0)")]
    app: Option<String>,

    #[arg(long, help = "Separator between app name and version")]
    app_tag_separator: Option<String>,

    #[arg(long, help = "Prefix versions with 'v'")]
    with_v: bool,

    #[arg(long, help = "Never bump minor or major twice since the last release")]
    bump_protection: bool,

    #[arg(long, help = "Task key prefix (e.g. JIR-)")]
    task_prefix: Option<String>,

    #[arg(long, help = "Base URL for task links")]
    task_base_url: Option<String>,

    #[arg(long, help = "Only include commits with this scope (defaults to the app)")]
    scope: Option<String>,

    #[arg(long, help = "Release body template, relative to .github/")]
    template: Option<String>,

    #[arg(long, help = "Repository owner used in links")]
    owner: Option<String>,

    #[arg(long, help = "Repository name used in links")]
    name: Option<String>,

    #[arg(long, help = "JSON release listing to use instead of local tags")]
    releases_json: Option<PathBuf>,

    #[arg(long, env = "GITHUB_OUTPUT", help = "File the outputs are appended to")]
    output_file: Option<PathBuf>,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,
}

impl Args {
    /// Command-line values take precedence over the configuration file
    fn apply_overrides(&self, config: &mut Config) {
        fn set(target: &mut String, value: &Option<String>) {
            if let Some(value) = value {
                *target = value.clone();
            }
        }

        set(&mut config.repository.owner, &self.owner);
        set(&mut config.repository.name, &self.name);
        set(&mut config.release.remote, &self.remote);
        set(&mut config.release.app_tag_separator, &self.app_tag_separator);
        set(&mut config.changelog.task_prefix, &self.task_prefix);

        if self.app.is_some() {
            config.release.app = self.app.clone();
        }
        if self.template.is_some() {
            config.release.template_path = self.template.clone();
        }
        if self.task_base_url.is_some() {
            config.changelog.task_base_url = self.task_base_url.clone();
        }
        if self.scope.is_some() {
            config.changelog.commit_scope = self.scope.clone();
        }
        config.release.with_v |= self.with_v;
        config.release.bump_protection |= self.bump_protection;
    }

    fn workflow_args(&self, repo_root: PathBuf) -> ReleaseWorkflowArgs {
        ReleaseWorkflowArgs {
            base_tag: self.base_tag.clone(),
            release_tag: self.release_tag.clone(),
            release_name: self.release_name.clone(),
            head: self.head.clone(),
            prerelease: self.prerelease,
            draft: self.draft,
            push_tag: self.push_tag,
            dry_run: self.dry_run,
            repo_root,
        }
    }
}

fn main() {
    init_tracing();

    let args = Args::parse();
    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Console logging controlled by RUST_LOG (default: warn), on stderr
fn init_tracing() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .with_filter(console_filter),
        )
        .init();
}

fn run(args: Args) -> Result<()> {
    let mut config =
        config::load_config(args.config.as_deref()).context("Error loading config")?;
    args.apply_overrides(&mut config);

    let repo = Git2Repository::open(&args.repo, config.repo_slug())
        .context("Git repository error")?
        .with_authors(config.authors.clone())
        .with_page_size(config.release.page_size);
    let repo_root = repo
        .workdir()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| args.repo.clone());
    let workflow_args = args.workflow_args(repo_root);

    let result = match &args.releases_json {
        Some(path) => {
            let combined = WithReleases::new(repo, JsonReleaseFile::new(path));
            run_release_workflow(workflow_args, &config, &combined)?
        }
        None => run_release_workflow(workflow_args, &config, &repo)?,
    };

    report(&args, &config, &result)
}

fn report(args: &Args, config: &Config, result: &WorkflowResult) -> Result<()> {
    for warning in &result.warnings {
        ui::display_boundary_warning(warning);
    }

    ui::display_changelog_summary(&result.report);
    let previous = Some(result.outputs.previous_tag.as_str()).filter(|tag| !tag.is_empty());
    ui::display_proposed_tag(previous, &result.release_tag);

    if result.tag_pushed {
        ui::display_success(&format!(
            "Pushed tag {} to {}",
            result.release_tag, config.release.remote
        ));
    } else if args.dry_run {
        ui::display_status(&format!("Dry run: tag {} was not created", result.release_tag));
    } else {
        ui::display_manual_push_instruction(&result.release_tag, &config.release.remote);
    }

    result.outputs.write_to(&mut io::stdout().lock())?;
    if let Some(path) = &args.output_file {
        result
            .outputs
            .append_to_file(path)
            .with_context(|| format!("Failed to write outputs to {}", path.display()))?;
    }

    Ok(())
}
