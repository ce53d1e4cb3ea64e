//! Front-end dependency URLs and the startup copy of local dependencies.

use anyhow::{Context, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tokio::fs;
use tracing::{info, warn};

/// Where pages load their CSS/JS dependencies from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AssetSource {
    #[default]
    Local,
    Cdn,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid dependency source '{0}', expected 'local' or 'cdn'")]
pub struct InvalidAssetSource(pub String);

impl FromStr for AssetSource {
    type Err = InvalidAssetSource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(AssetSource::Local),
            "cdn" => Ok(AssetSource::Cdn),
            other => Err(InvalidAssetSource(other.to_string())),
        }
    }
}

impl fmt::Display for AssetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AssetSource::Local => "local",
            AssetSource::Cdn => "cdn",
        })
    }
}

/// URL of every dependency a page template may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetUrls {
    pub google_fonts: &'static str,
    pub google_fonts_pan: &'static str,
    pub open_dyslexic_css: &'static str,
    pub tailwind_js: &'static str,
    pub daisyui_css: &'static str,
    pub daisyui_themes_css: &'static str,
    pub app_root_css: &'static str,
    pub app_global_css: &'static str,
    pub entry_js: &'static str,
    pub ganger_js: &'static str,
    pub courses_js: &'static str,
    pub katex_css: &'static str,
    pub katex_js: &'static str,
    pub katex_autorender_js: &'static str,
    /// wasm-bindgen glue of the theme crate.
    pub theme_js: &'static str,
}

const LOCAL: AssetUrls = AssetUrls {
    google_fonts: "/static/dependencies/google_fonts.css",
    google_fonts_pan: "/static/dependencies/google_fonts_pan.css",
    open_dyslexic_css: "/static/dependencies/open_dyslexic_regular.css",
    tailwind_js: "/static/dependencies/tailwindcssbrowser@4.js",
    daisyui_css: "/static/dependencies/daisyui@5.css",
    daisyui_themes_css: "/static/dependencies/daisyUI@5themes.css",
    app_root_css: "/static/dependencies/root.css",
    app_global_css: "/static/dependencies/global.css",
    entry_js: "/static/ganger/entry.js",
    ganger_js: "/static/ganger/ganger.js",
    courses_js: "/static/ganger/courses.js",
    katex_css: "/static/dependencies/katex.css",
    katex_js: "/static/dependencies/katex.js",
    katex_autorender_js: "/static/dependencies/katex-autorender.js",
    theme_js: "/static/pkg/attam_theme.js",
};

const CDN: AssetUrls = AssetUrls {
    google_fonts: "https://fonts.googleapis.com/css2?family=Lexend:wght@300..900&family=Outfit:wght@300..900&family=EB+Garamond:ital,wght@0,400..800;1,400..800&family=Dancing+Script:wght@400..700&family=Lora:ital,wght@0,400..700;1,400..700&family=JetBrains+Mono:ital,wght@0,400..800;1,400..800&display=swap",
    google_fonts_pan: "https://fonts.googleapis.com/css2?family=Barlow:wght@400;600;700&family=Crimson+Text:wght@400;600&family=Inter:wght@400;600;700&family=Lora:wght@400;600&family=Rajdhani:wght@400;600;700&family=Merriweather:wght@400;700&family=Work+Sans:wght@400;600;700&family=Source+Serif+4:wght@400;600&family=Rubik:wght@400;600;700&family=Spectral:wght@400;600&display=swap",
    open_dyslexic_css: "https://cdn.jsdelivr.net/npm/open-dyslexic@1.0.3/open-dyslexic-regular.min.css",
    tailwind_js: "https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4",
    daisyui_css: "https://cdn.jsdelivr.net/npm/daisyui@5",
    daisyui_themes_css: "https://cdn.jsdelivr.net/npm/daisyui@5/themes.css",
    app_root_css: "/static/dependencies/root.css",
    app_global_css: "/static/dependencies/global.css",
    entry_js: "/static/ganger/entry.js",
    ganger_js: "/static/ganger/ganger.js",
    courses_js: "/static/ganger/courses.js",
    katex_css: "https://cdn.jsdelivr.net/npm/katex@0.16.9/dist/katex.min.css",
    katex_js: "https://cdn.jsdelivr.net/npm/katex@0.16.9/dist/katex.min.js",
    katex_autorender_js: "https://cdn.jsdelivr.net/npm/katex@0.16.9/dist/contrib/auto-render.min.js",
    theme_js: "/static/pkg/attam_theme.js",
};

impl AssetSource {
    pub fn urls(self) -> AssetUrls {
        match self {
            AssetSource::Local => LOCAL,
            AssetSource::Cdn => CDN,
        }
    }
}

/// Copy `dependencies_dir` to `<static_dir>/dependencies`, replacing any
/// previous copy. Returns `false` when the source does not exist.
pub async fn copy_dependencies(dependencies_dir: &Path, static_dir: &Path) -> Result<bool> {
    fs::create_dir_all(static_dir)
        .await
        .with_context(|| format!("Failed to create static dir: {}", static_dir.display()))?;

    if !fs::try_exists(dependencies_dir).await.unwrap_or(false) {
        warn!(path = %dependencies_dir.display(), "Dependencies folder not found");
        return Ok(false);
    }

    let target = static_dir.join("dependencies");
    if fs::try_exists(&target).await.unwrap_or(false) {
        fs::remove_dir_all(&target)
            .await
            .with_context(|| format!("Failed to remove old copy: {}", target.display()))?;
    }

    let copied = copy_tree(dependencies_dir, &target).await?;
    info!(
        from = %dependencies_dir.display(),
        to = %target.display(),
        files = copied,
        "Copied dependencies"
    );
    Ok(true)
}

async fn copy_tree(from: &Path, to: &Path) -> Result<usize> {
    let mut pending: Vec<(PathBuf, PathBuf)> = vec![(from.to_path_buf(), to.to_path_buf())];
    let mut files = 0;

    while let Some((src, dst)) = pending.pop() {
        fs::create_dir_all(&dst)
            .await
            .with_context(|| format!("Failed to create dir: {}", dst.display()))?;
        let mut entries = fs::read_dir(&src)
            .await
            .with_context(|| format!("Failed to read dir: {}", src.display()))?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let dest = dst.join(entry.file_name());
            if entry.file_type().await?.is_dir() {
                pending.push((path, dest));
            } else {
                fs::copy(&path, &dest)
                    .await
                    .with_context(|| format!("Failed to copy {}", path.display()))?;
                files += 1;
            }
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sources() {
        assert_eq!("cdn".parse::<AssetSource>(), Ok(AssetSource::Cdn));
        assert_eq!("local".parse::<AssetSource>(), Ok(AssetSource::Local));
        assert!("CDN".parse::<AssetSource>().is_err());
        assert_eq!(AssetSource::default().to_string(), "local");
    }

    #[test]
    fn local_urls_stay_on_the_server() {
        let urls = AssetSource::Local.urls();
        assert!(urls.daisyui_css.starts_with("/static/"));
        assert!(urls.katex_js.starts_with("/static/"));
        let cdn = AssetSource::Cdn.urls();
        assert!(cdn.tailwind_js.starts_with("https://"));
        assert_eq!(cdn.app_root_css, urls.app_root_css);
    }

    #[tokio::test]
    async fn copies_and_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let deps = dir.path().join("dependencies");
        std::fs::create_dir_all(deps.join("fonts")).unwrap();
        std::fs::write(deps.join("root.css"), ":root {}").unwrap();
        std::fs::write(deps.join("fonts/a.woff2"), "font").unwrap();

        let static_dir = dir.path().join("static");
        std::fs::create_dir_all(static_dir.join("dependencies")).unwrap();
        std::fs::write(static_dir.join("dependencies/stale.css"), "old").unwrap();

        assert!(copy_dependencies(&deps, &static_dir).await.unwrap());
        assert!(static_dir.join("dependencies/root.css").exists());
        assert!(static_dir.join("dependencies/fonts/a.woff2").exists());
        assert!(!static_dir.join("dependencies/stale.css").exists());
    }

    #[tokio::test]
    async fn missing_source_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let copied = copy_dependencies(&dir.path().join("nope"), &dir.path().join("static"))
            .await
            .unwrap();
        assert!(!copied);
        assert!(dir.path().join("static").exists());
    }
}
