//! Loads the build [`Config`]. Settings come from an optional
//! `scribble.yaml` project file, found by walking up from the working
//! directory; anything the file leaves out falls back to built-in defaults.
//! Relative paths in the project file are resolved against the directory
//! holding it, and `~` is expanded.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The name of the project file.
pub const PROJECT_FILE: &str = "scribble.yaml";

#[derive(Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct Project {
    notes_directory: Option<String>,
    output_directory: Option<String>,
    static_directory: Option<String>,
    site: SiteConfig,
    deploy: DeployConfig,
}

/// Site-wide strings interpolated into the page and index templates.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SiteConfig {
    /// The index page's `<title>` and heading.
    pub title: String,

    /// The paragraph under the index heading.
    pub tagline: String,

    /// The copyright holder named in every footer.
    pub author: String,

    /// Where the footer's author name links to.
    pub author_url: String,

    /// The first year of the footer's open-ended copyright range.
    pub copyright_since: String,

    /// The site stylesheet, relative to the output root.
    pub stylesheet: String,

    /// The loader script for the footer badge widget.
    pub badge_loader: String,

    /// The highlight.js stylesheet for note pages.
    pub highlight_stylesheet: String,

    /// The highlight.js script for note pages.
    pub highlight_script: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            title: String::from("Angad's Notes"),
            tagline: String::from(
                "Miscellaneous thoughts and lessons learned while programming (usually the hard way).",
            ),
            author: String::from("Angad Singh"),
            author_url: String::from("https://angad.dev/"),
            copyright_since: String::from("2021"),
            stylesheet: String::from("static/css/style.css"),
            badge_loader: String::from(
                "https://www.recurse-scout.com/loader.js?t=86d76fd73a1916306be7e1b86b9685fa",
            ),
            highlight_stylesheet: String::from(
                "https://cdnjs.cloudflare.com/ajax/libs/highlight.js/10.7.2/styles/default.min.css",
            ),
            highlight_script: String::from(
                "https://cdnjs.cloudflare.com/ajax/libs/highlight.js/10.7.2/highlight.min.js",
            ),
        }
    }
}

/// The external command that publishes the output directory.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DeployConfig {
    /// The program followed by its arguments.
    pub command: Vec<String>,
}

impl Default for DeployConfig {
    fn default() -> Self {
        DeployConfig {
            command: vec![String::from("vercel"), String::from("--prod")],
        }
    }
}

/// Everything a build needs.
#[derive(Clone, Debug)]
pub struct Config {
    /// The directory holding the project file (or the working directory if
    /// there is none). The deploy command runs here.
    pub root_directory: PathBuf,

    /// The directory of note source files.
    pub notes_directory: PathBuf,

    /// The directory that is cleared and refilled on every build.
    pub output_directory: PathBuf,

    /// The static assets copied to `{output_directory}/static`.
    pub static_directory: PathBuf,

    pub site: SiteConfig,

    pub deploy: DeployConfig,
}

impl Config {
    /// Searches `dir` and its ancestors for a project file and loads the
    /// first one found. Without a project file, the defaults are resolved
    /// against `dir`.
    pub fn from_directory(dir: &Path) -> Result<Config> {
        for ancestor in dir.ancestors() {
            let path = ancestor.join(PROJECT_FILE);
            if path.is_file() {
                return Config::from_project_file(&path);
            }
        }
        debug!(
            "No `{}` found above `{}`; using defaults",
            PROJECT_FILE,
            dir.display()
        );
        Ok(Config::from_project(dir, Project::default()))
    }

    /// Loads the project file at `path`.
    pub fn from_project_file(path: &Path) -> Result<Config> {
        let file = File::open(path)
            .with_context(|| format!("Opening project file `{}`", path.display()))?;
        let project: Project = serde_yaml::from_reader(file)
            .with_context(|| format!("Loading configuration from `{}`", path.display()))?;
        let root = path.parent().ok_or_else(|| {
            anyhow!(
                "Can't get parent directory for provided project file path '{:?}'",
                path
            )
        })?;
        debug!("Loaded project file `{}`", path.display());
        Ok(Config::from_project(root, project))
    }

    fn from_project(root: &Path, project: Project) -> Config {
        let resolve = |value: Option<String>, default: &str| -> PathBuf {
            let raw = value.unwrap_or_else(|| default.to_owned());
            let path = PathBuf::from(shellexpand::tilde(&raw).into_owned());
            match path.is_absolute() {
                true => path,
                false => root.join(path),
            }
        };

        Config {
            root_directory: root.to_owned(),
            notes_directory: resolve(project.notes_directory, "~/notes"),
            output_directory: resolve(project.output_directory, "dist"),
            static_directory: resolve(project.static_directory, "static"),
            site: project.site,
            deploy: project.deploy,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_from_project_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(PROJECT_FILE);
        std::fs::write(
            &path,
            "notes_directory: notes\n\
             output_directory: /srv/site\n\
             site:\n  title: My Notes\n\
             deploy:\n  command: [netlify, deploy, --prod]\n",
        )?;

        let config = Config::from_project_file(&path)?;
        assert_eq!(dir.path(), config.root_directory);
        assert_eq!(dir.path().join("notes"), config.notes_directory);
        assert_eq!(PathBuf::from("/srv/site"), config.output_directory);
        assert_eq!(dir.path().join("static"), config.static_directory);
        assert_eq!("My Notes", config.site.title);
        assert_eq!("Angad Singh", config.site.author);
        assert_eq!(vec!["netlify", "deploy", "--prod"], config.deploy.command);
        Ok(())
    }

    #[test]
    fn test_from_directory_searches_ancestors() -> Result<()> {
        let dir = tempfile::tempdir()?;
        std::fs::write(dir.path().join(PROJECT_FILE), "output_directory: public\n")?;
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested)?;

        let config = Config::from_directory(&nested)?;
        assert_eq!(dir.path(), config.root_directory);
        assert_eq!(dir.path().join("public"), config.output_directory);
        Ok(())
    }

    #[test]
    fn test_defaults_without_project_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let config = Config::from_project(dir.path(), Project::default());
        assert_eq!(dir.path().join("dist"), config.output_directory);
        assert!(config.notes_directory.is_absolute());
        assert!(config.notes_directory.ends_with("notes"));
        assert_eq!(SiteConfig::default(), config.site);
        assert_eq!(vec!["vercel", "--prod"], config.deploy.command);
        Ok(())
    }

    #[test]
    fn test_unknown_keys_rejected() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(PROJECT_FILE);
        std::fs::write(&path, "notes_dir: notes\n")?;
        assert!(Config::from_project_file(&path).is_err());
        Ok(())
    }
}
