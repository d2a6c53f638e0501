//! Page render command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use docpage_static::{default_output_path, BuildConfig, OutputFormat, PageBuilder};

use crate::config::{load_config, ConfigFile};

/// Arguments of the render command.
#[derive(Debug)]
pub struct RenderArgs {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub fragment: bool,
    pub format: OutputFormat,
}

/// Run the render command.
pub async fn run(config_path: &Path, args: RenderArgs) -> Result<()> {
    tracing::info!("Rendering {}...", args.input.display());

    let config = build_config(load_config(config_path)?, args)?;

    let result = PageBuilder::new(config).build().await?;

    tracing::info!(
        "Rendered {} nodes ({} bytes) in {}ms",
        result.nodes,
        result.bytes,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_path.display());

    Ok(())
}

/// Combine `docpage.toml` with the command line arguments.
fn build_config(file_config: ConfigFile, args: RenderArgs) -> Result<BuildConfig> {
    let components = file_config.component_map()?;

    let output = args.output.unwrap_or_else(|| {
        default_output_path(
            &args.input,
            Path::new(&file_config.build.output),
            args.format,
        )
    });

    Ok(BuildConfig {
        input: args.input,
        output,
        site_title: file_config.site.title,
        lang: file_config.site.lang,
        styles: file_config.site.styles,
        template: file_config.build.template.map(PathBuf::from),
        fragment: args.fragment || file_config.build.fragment,
        format: args.format,
        components,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use docpage_render::ElementName;
    use std::fs;
    use tempfile::tempdir;

    fn args(input: PathBuf) -> RenderArgs {
        RenderArgs {
            input,
            output: None,
            fragment: false,
            format: OutputFormat::Html,
        }
    }

    #[test]
    fn maps_config_into_build_config() {
        let file_config: ConfigFile = toml::from_str(
            r#"
[site]
title = "IBM FHIR Server"
lang = "de"
styles = ["/assets/docs.css"]

[build]
output = "public"
template = "layout.html"

[components]
wrapper = { tag = "article" }
"#,
        )
        .unwrap();

        let config = build_config(file_config, args(PathBuf::from("pages/tips.mdx"))).unwrap();

        assert_eq!(config.output, PathBuf::from("public/tips.html"));
        assert_eq!(config.site_title, "IBM FHIR Server");
        assert_eq!(config.lang, "de");
        assert_eq!(config.styles, vec!["/assets/docs.css"]);
        assert_eq!(config.template, Some(PathBuf::from("layout.html")));
        assert!(!config.fragment);
        assert!(config.components.contains(ElementName::Wrapper));
    }

    #[test]
    fn fragment_flag_or_config_enables_fragment() {
        let from_flag = build_config(
            ConfigFile::default(),
            RenderArgs {
                fragment: true,
                ..args(PathBuf::from("page.mdx"))
            },
        )
        .unwrap();
        assert!(from_flag.fragment);

        let file_config: ConfigFile = toml::from_str("[build]\nfragment = true\n").unwrap();
        let from_config = build_config(file_config, args(PathBuf::from("page.mdx"))).unwrap();
        assert!(from_config.fragment);
    }

    #[test]
    fn explicit_output_wins_over_default_path() {
        let config = build_config(
            ConfigFile::default(),
            RenderArgs {
                output: Some(PathBuf::from("site/custom.html")),
                format: OutputFormat::Json,
                ..args(PathBuf::from("pages/tips.mdx"))
            },
        )
        .unwrap();

        assert_eq!(config.output, PathBuf::from("site/custom.html"));
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn invalid_component_is_an_error() {
        let file_config: ConfigFile =
            toml::from_str("[components]\ntable = { tag = \"div\" }\n").unwrap();

        assert!(build_config(file_config, args(PathBuf::from("page.mdx"))).is_err());
    }

    #[tokio::test]
    async fn renders_into_configured_output_dir() {
        let temp = tempdir().unwrap();
        let input = temp.path().join("tips-and-tricks.mdx");
        let out_dir = temp.path().join("public");
        let config_path = temp.path().join("docpage.toml");
        fs::write(&input, "# DB2 Error 42501\n").unwrap();
        fs::write(
            &config_path,
            format!(
                "[build]\noutput = {:?}\nfragment = true\n\n[components]\nh1 = {{ tag = \"h2\", class = \"title\" }}\n",
                out_dir.display().to_string()
            ),
        )
        .unwrap();

        run(&config_path, args(input)).await.unwrap();

        let html = fs::read_to_string(out_dir.join("tips-and-tricks.html")).unwrap();
        assert_eq!(html, "<h2 class=\"title\">DB2 Error 42501</h2>");
    }

    #[tokio::test]
    async fn writes_to_explicit_output() {
        let temp = tempdir().unwrap();
        let input = temp.path().join("page.mdx");
        let output = temp.path().join("nested").join("page.json");
        fs::write(&input, "Intro.\n").unwrap();

        run(
            &temp.path().join("docpage.toml"),
            RenderArgs {
                output: Some(output.clone()),
                format: OutputFormat::Json,
                ..args(input)
            },
        )
        .await
        .unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(value["children"][0]["tag"], "p");
    }
}
