//! URL classification.
//!
//! Inspects a repository URL's hostname to decide the provider and pulls
//! the owner/repository path segments out. The hostname allow-list is
//! fixed (`github.com`, `gitlab.com`, and their subdomains) plus any
//! private GitLab hosts from the configuration.

use crate::error::{Result, TfViewError};
use crate::types::{Provider, RepoReference};
use url::Url;

/// Classify a repository URL into a [`RepoReference`].
///
/// `private_gitlab_hosts` extends the allow-list with self-hosted GitLab
/// instances; matching is case-insensitive and exact per host.
///
/// # Errors
///
/// - `InvalidUrl` when the input is not a parseable URL
/// - `UnsupportedHost` when the hostname is outside the allow-list
/// - `InvalidRepoPath` when fewer than two non-empty path segments remain
pub fn classify(raw_url: &str, private_gitlab_hosts: &[String]) -> Result<RepoReference> {
    let url = Url::parse(raw_url.trim()).map_err(|e| TfViewError::InvalidUrl {
        url: raw_url.to_string(),
        message: e.to_string(),
    })?;

    let host = url
        .host_str()
        .ok_or_else(|| TfViewError::InvalidUrl {
            url: raw_url.to_string(),
            message: "URL has no hostname".to_string(),
        })?
        .to_lowercase();

    let provider = detect_provider(&host, private_gitlab_hosts).ok_or_else(|| {
        TfViewError::UnsupportedHost { host: host.clone() }
    })?;

    let mut segments: Vec<String> = url
        .path_segments()
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if segments.len() < 2 {
        return Err(TfViewError::InvalidRepoPath {
            url: raw_url.to_string(),
        });
    }

    // Pasted clone URLs commonly end in ".git".
    if let Some(last) = segments.last_mut() {
        if let Some(stripped) = last.strip_suffix(".git") {
            *last = stripped.to_string();
        }
    }

    let (owner, repo, project_path) = match provider {
        // GitHub ignores anything past owner/repo (tree links, blob links).
        Provider::GitHub => {
            let owner = segments[0].clone();
            let repo = segments[1].clone();
            let project_path = format!("{owner}/{repo}");
            (owner, repo, project_path)
        }
        // GitLab projects may sit under nested subgroups; the whole path
        // identifies the project.
        Provider::GitLab => {
            let owner = segments.first().cloned().unwrap_or_default();
            let repo = segments.last().cloned().unwrap_or_default();
            (owner, repo, segments.join("/"))
        }
    };

    tracing::debug!(
        provider = %provider,
        host = %host,
        project = %project_path,
        "Classified repository URL"
    );

    Ok(RepoReference {
        provider,
        host,
        owner,
        repo,
        project_path,
    })
}

fn detect_provider(host: &str, private_gitlab_hosts: &[String]) -> Option<Provider> {
    if host == "github.com" || host.ends_with(".github.com") {
        return Some(Provider::GitHub);
    }
    if host == "gitlab.com" || host.ends_with(".gitlab.com") {
        return Some(Provider::GitLab);
    }
    if private_gitlab_hosts
        .iter()
        .any(|h| h.eq_ignore_ascii_case(host))
    {
        return Some(Provider::GitLab);
    }
    None
}

/// True when the host is one of the configured private GitLab instances.
#[must_use]
pub fn is_private_host(host: &str, private_gitlab_hosts: &[String]) -> bool {
    private_gitlab_hosts
        .iter()
        .any(|h| h.eq_ignore_ascii_case(host))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn no_private_hosts() -> Vec<String> {
        Vec::new()
    }

    #[test]
    fn github_url() {
        let repo = classify("https://github.com/acme/infra", &no_private_hosts()).unwrap();
        assert_eq!(repo.provider, Provider::GitHub);
        assert_eq!(repo.host, "github.com");
        assert_eq!(repo.owner, "acme");
        assert_eq!(repo.repo, "infra");
        assert_eq!(repo.project_path, "acme/infra");
    }

    #[test]
    fn gitlab_nested_subgroups() {
        let repo = classify(
            "https://gitlab.com/team/sub/project",
            &no_private_hosts(),
        )
        .unwrap();
        assert_eq!(repo.provider, Provider::GitLab);
        assert_eq!(repo.owner, "team");
        assert_eq!(repo.repo, "project");
        assert_eq!(repo.project_path, "team/sub/project");
    }

    #[test]
    fn private_gitlab_host_from_config() {
        let hosts = vec!["gitlab.internal.example.com".to_string()];
        let repo = classify("https://gitlab.internal.example.com/ops/tf", &hosts).unwrap();
        assert_eq!(repo.provider, Provider::GitLab);
        assert_eq!(repo.host, "gitlab.internal.example.com");
    }

    #[test_case("https://bitbucket.org/acme/infra"; "bitbucket")]
    #[test_case("https://example.com/acme/infra"; "generic host")]
    #[test_case("https://githubb.com/acme/infra"; "lookalike host")]
    #[test_case("https://mygithub.com/acme/infra"; "suffix without dot")]
    fn unsupported_hosts(url: &str) {
        let err = classify(url, &no_private_hosts()).unwrap_err();
        assert!(matches!(err, TfViewError::UnsupportedHost { .. }), "{err}");
    }

    #[test_case("https://github.com"; "no segments")]
    #[test_case("https://github.com/acme"; "one segment")]
    #[test_case("https://github.com/acme/"; "trailing slash only")]
    fn short_paths(url: &str) {
        let err = classify(url, &no_private_hosts()).unwrap_err();
        assert!(matches!(err, TfViewError::InvalidRepoPath { .. }), "{err}");
    }

    #[test_case("not a url"; "free text")]
    #[test_case("github.com/acme/infra"; "missing scheme")]
    fn invalid_urls(url: &str) {
        let err = classify(url, &no_private_hosts()).unwrap_err();
        assert!(matches!(err, TfViewError::InvalidUrl { .. }), "{err}");
    }

    #[test]
    fn subdomains_are_allowed() {
        let gh = classify("https://www.github.com/acme/infra", &no_private_hosts()).unwrap();
        assert_eq!(gh.provider, Provider::GitHub);

        let gl = classify("https://www.gitlab.com/acme/infra", &no_private_hosts()).unwrap();
        assert_eq!(gl.provider, Provider::GitLab);
    }

    #[test]
    fn clone_url_suffix_is_stripped() {
        let repo = classify("https://github.com/acme/infra.git", &no_private_hosts()).unwrap();
        assert_eq!(repo.repo, "infra");
        assert_eq!(repo.project_path, "acme/infra");
    }

    #[test]
    fn host_matching_is_case_insensitive() {
        let repo = classify("https://GitHub.com/Acme/Infra", &no_private_hosts()).unwrap();
        assert_eq!(repo.host, "github.com");
        // Path segments keep their case; providers are case-sensitive there
        assert_eq!(repo.owner, "Acme");
    }
}
