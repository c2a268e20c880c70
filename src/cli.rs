//! CLI argument definitions and command dispatch.
//!
//! Argument values are validated while parsing: names, tokens and `PATH`
//! arguments that designate no manifest are usage errors, reported before
//! any request is sent.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use crate::api::RequiresApi;
use crate::config::{ApiConfig, DEFAULT_BASE_URL};
use crate::discovery::{self, parse_path_argument, DiscoveredPaths};
use crate::error::RequiresError;
use crate::name::Name;
use crate::normalize::{to_urls, ManifestFile};
use crate::output::Output;
use crate::site::{self, DEFAULT_PIP};

#[derive(Debug, Parser)]
#[command(name = "requires")]
#[command(about = "Upload Python dependency manifests to requires.io")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create or update a repository
    UpdateRepo(UpdateRepoArgs),
    /// Delete a repository
    DeleteRepo(RepoArgs),
    /// Create or update a branch from local requirement files
    UpdateBranch(UpdateReferenceArgs),
    /// Delete a branch
    DeleteBranch(ReferenceArgs),
    /// Create or update a tag from local requirement files
    UpdateTag(UpdateReferenceArgs),
    /// Delete a tag
    DeleteTag(ReferenceArgs),
    /// Create or update a site from the packages installed with pip
    UpdateSite(UpdateSiteArgs),
    /// Delete a site
    DeleteSite(SiteArgs),
}

#[derive(Debug, Args)]
#[command(next_help_heading = "Global options")]
pub struct ConnectionArgs {
    /// API token
    #[arg(short, long, env = "REQUIRES_TOKEN", hide_env_values = true, value_parser = parse_token)]
    pub token: String,

    /// API base URL
    #[arg(long, env = "REQUIRES_API_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Skip TLS certificate verification
    #[arg(long)]
    pub insecure: bool,
}

#[derive(Debug, Args)]
pub struct RepoArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Repository name
    #[arg(short, long, value_name = "REPO", value_parser = parse_name)]
    pub repository: Name,
}

#[derive(Debug, Args)]
pub struct UpdateRepoArgs {
    #[command(flatten)]
    pub repo: RepoArgs,

    #[command(flatten)]
    pub visibility: Visibility,
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct Visibility {
    /// Make the repository public
    #[arg(long)]
    pub public: bool,

    /// Make the repository private
    #[arg(long)]
    pub private: bool,
}

#[derive(Debug, Args)]
pub struct ReferenceArgs {
    #[command(flatten)]
    pub repo: RepoArgs,

    /// Branch or tag name
    #[arg(short, long, value_parser = parse_name)]
    pub name: Name,
}

#[derive(Debug, Args)]
pub struct UpdateReferenceArgs {
    #[command(flatten)]
    pub reference: ReferenceArgs,

    /// Requirement files or folders containing requirement files (glob allowed)
    #[arg(value_name = "PATH", required = true, num_args = 1.., value_parser = parse_path_argument)]
    pub paths: Vec<DiscoveredPaths>,
}

#[derive(Debug, Args)]
pub struct SiteArgs {
    #[command(flatten)]
    pub repo: RepoArgs,

    /// Site name [default: this machine's host name]
    #[arg(short, long, value_parser = parse_name)]
    pub name: Option<Name>,
}

#[derive(Debug, Args)]
pub struct UpdateSiteArgs {
    #[command(flatten)]
    pub site: SiteArgs,

    /// pip executable used to list the installed packages
    #[arg(long, value_name = "PROGRAM", default_value = DEFAULT_PIP)]
    pub pip: String,
}

fn parse_name(value: &str) -> Result<Name, String> {
    Name::parse(value).map_err(|err| match err {
        RequiresError::InvalidName { reason, .. } => reason,
        other => other.to_string(),
    })
}

fn parse_token(value: &str) -> Result<String, String> {
    if value.trim().is_empty() {
        return Err("required".to_string());
    }
    Ok(value.to_string())
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::UpdateRepo(args) => {
            let api = connect(&args.repo.connection)?;
            let private = args.visibility.private;
            api.update_repository(&args.repo.repository, private)?;
            let visibility = if private { "private" } else { "public" };
            Output::success(format!(
                "Updated {visibility} repository {}",
                args.repo.repository
            ));
        }
        Commands::DeleteRepo(args) => {
            let api = connect(&args.connection)?;
            api.delete_repository(&args.repository)?;
            Output::success(format!("Deleted repository {}", args.repository));
        }
        Commands::UpdateBranch(args) => {
            let (repo, name) = (&args.reference.repo, &args.reference.name);
            let manifests = manifests(&args.paths);
            let api = connect(&repo.connection)?;
            api.update_branch(&repo.repository, name, &manifests)?;
            report_upload("branch", name, &repo.repository, &manifests);
        }
        Commands::DeleteBranch(args) => {
            let api = connect(&args.repo.connection)?;
            api.delete_branch(&args.repo.repository, &args.name)?;
            Output::success(format!(
                "Deleted branch {} on repository {}",
                args.name, args.repo.repository
            ));
        }
        Commands::UpdateTag(args) => {
            let (repo, name) = (&args.reference.repo, &args.reference.name);
            let manifests = manifests(&args.paths);
            let api = connect(&repo.connection)?;
            api.update_tag(&repo.repository, name, &manifests)?;
            report_upload("tag", name, &repo.repository, &manifests);
        }
        Commands::DeleteTag(args) => {
            let api = connect(&args.repo.connection)?;
            api.delete_tag(&args.repo.repository, &args.name)?;
            Output::success(format!(
                "Deleted tag {} on repository {}",
                args.name, args.repo.repository
            ));
        }
        Commands::UpdateSite(args) => {
            let repo = &args.site.repo;
            let name = site_name(args.site.name)?;
            let listing = site::installed_packages(&args.pip)?;
            let api = connect(&repo.connection)?;
            api.update_site(&repo.repository, &name, &listing)?;
            Output::success(format!(
                "Updated site {name} on repository {} ({} packages)",
                repo.repository,
                listing.lines().filter(|line| !line.trim().is_empty()).count()
            ));
        }
        Commands::DeleteSite(args) => {
            let name = site_name(args.name)?;
            let api = connect(&args.repo.connection)?;
            api.delete_site(&args.repo.repository, &name)?;
            Output::success(format!(
                "Deleted site {name} on repository {}",
                args.repo.repository
            ));
        }
    }
    Ok(())
}

fn connect(args: &ConnectionArgs) -> Result<RequiresApi> {
    let config = ApiConfig::new(args.token.clone())?
        .with_base_url(args.base_url.clone())
        .with_verify_tls(!args.insecure);
    RequiresApi::new(config).context("failed to create API client")
}

fn manifests(paths: &[DiscoveredPaths]) -> Vec<ManifestFile> {
    to_urls(&discovery::merge(paths))
}

fn site_name(name: Option<Name>) -> Result<Name> {
    match name {
        Some(name) => Ok(name),
        None => {
            let hostname = site::default_site_name()?;
            Name::parse(&hostname).with_context(|| {
                format!("host name '{hostname}' is not a valid site name, use -n/--name")
            })
        }
    }
}

fn report_upload(kind: &str, name: &Name, repository: &Name, manifests: &[ManifestFile]) {
    Output::success(format!(
        "Updated {kind} {name} on repository {repository} ({} files)",
        manifests.len()
    ));
    for manifest in manifests {
        Output::list_item(&manifest.relative_url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("requires").chain(args.iter().copied()))
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn update_repo_requires_visibility() {
        let err = parse(&["update-repo", "-t", "tok", "-r", "foo"]).expect_err("missing group");
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn update_repo_visibility_is_exclusive() {
        let err = parse(&["update-repo", "-t", "tok", "-r", "foo", "--public", "--private"])
            .expect_err("conflict");
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn update_repo_private_flag() {
        let cli = parse(&["update-repo", "-t", "tok", "-r", "foo", "--private"]).expect("parse");
        match cli.command {
            Commands::UpdateRepo(args) => {
                assert!(args.visibility.private);
                assert_eq!(args.repo.repository.as_str(), "foo");
                assert_eq!(args.repo.connection.base_url, DEFAULT_BASE_URL);
                assert!(!args.repo.connection.insecure);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn invalid_repository_name_is_rejected() {
        let err = parse(&["delete-repo", "-t", "tok", "-r", "foo/bar"]).expect_err("bad name");
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert!(err.to_string().contains("only alphanumeric"));
    }

    #[test]
    fn empty_token_is_rejected() {
        let err = parse(&["delete-repo", "-t", "", "-r", "foo"]).expect_err("empty token");
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn branch_commands_require_name() {
        let err = parse(&["delete-branch", "-t", "tok", "-r", "foo"]).expect_err("missing name");
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn update_branch_requires_paths() {
        let err = parse(&["update-branch", "-t", "tok", "-r", "foo", "-n", "master"])
            .expect_err("missing paths");
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn site_name_is_optional() {
        let cli = parse(&["delete-site", "-t", "tok", "-r", "foo"]).expect("parse");
        match cli.command {
            Commands::DeleteSite(args) => assert!(args.name.is_none()),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn update_site_defaults_to_pip() {
        let cli = parse(&["update-site", "-t", "tok", "-r", "foo", "-n", "web"]).expect("parse");
        match cli.command {
            Commands::UpdateSite(args) => {
                assert_eq!(args.pip, "pip");
                assert_eq!(args.site.name.map(|name| name.to_string()).as_deref(), Some("web"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
