//! Runtime configuration for the `zproject_demo` binary.
//!
//! Parameters load from a JSON file whose `zProject` block uses the
//! historical names, and individual CLI flags override the file.
use crate::projector::ZProjectParams;
use crate::types::{FocusMode, ProjectionMode};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OutputConfig {
    pub image_out: Option<PathBuf>,
    pub json_out: Option<PathBuf>,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeConfig {
    pub input_dir: PathBuf,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default, rename = "zProject")]
    pub project_params: ZProjectParams,
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let config: RuntimeConfig = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
    Ok(config)
}

pub fn parse_cli(program: &str) -> Result<RuntimeConfig, String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        return Err(usage(program));
    }

    let mut config: Option<RuntimeConfig> = None;
    let mut input_dir: Option<PathBuf> = None;
    let mut mode: Option<FocusMode> = None;
    let mut projection: Option<ProjectionMode> = None;
    let mut block_size: Option<usize> = None;
    let mut image_out: Option<PathBuf> = None;
    let mut json_out: Option<PathBuf> = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let value = expect_value(&mut iter, arg, program)?;
                config = Some(load_config(Path::new(&value))?);
            }
            "--mode" => {
                let value = expect_value(&mut iter, arg, program)?;
                mode = Some(parse_mode(&value)?);
            }
            "--projection" => {
                let value = expect_value(&mut iter, arg, program)?;
                projection = Some(parse_projection(&value)?);
            }
            "--block-size" => {
                let value = expect_value(&mut iter, arg, program)?;
                block_size = Some(
                    value
                        .parse()
                        .map_err(|e| format!("Invalid block size {value}: {e}"))?,
                );
            }
            "--image-out" => {
                let value = expect_value(&mut iter, arg, program)?;
                image_out = Some(PathBuf::from(value));
            }
            "--json-out" => {
                let value = expect_value(&mut iter, arg, program)?;
                json_out = Some(PathBuf::from(value));
            }
            "--help" | "-h" => return Err(usage(program)),
            flag if flag.starts_with("--") => {
                return Err(format!("Unknown flag {flag}\n{}", usage(program)));
            }
            positional => input_dir = Some(PathBuf::from(positional)),
        }
    }

    let mut config = match (config, input_dir) {
        (Some(mut cfg), dir) => {
            if let Some(dir) = dir {
                cfg.input_dir = dir;
            }
            cfg
        }
        (None, Some(dir)) => RuntimeConfig {
            input_dir: dir,
            output: OutputConfig::default(),
            project_params: ZProjectParams::default(),
        },
        (None, None) => return Err(usage(program)),
    };

    if let Some(mode) = mode {
        config.project_params.mode = mode;
    }
    if let Some(projection) = projection {
        config.project_params.projection = projection;
    }
    if let Some(block_size) = block_size {
        config.project_params.block_size = block_size;
    }
    if image_out.is_some() {
        config.output.image_out = image_out;
    }
    if json_out.is_some() {
        config.output.json_out = json_out;
    }
    Ok(config)
}

fn expect_value<'a>(
    iter: &mut std::slice::Iter<'a, String>,
    flag: &str,
    program: &str,
) -> Result<&'a String, String> {
    iter.next()
        .ok_or_else(|| format!("Missing value for {flag}\n{}", usage(program)))
}

fn parse_mode(value: &str) -> Result<FocusMode, String> {
    match value.to_ascii_lowercase().as_str() {
        "manual" => Ok(FocusMode::Manual),
        "full" => Ok(FocusMode::Full),
        "automatic" => Ok(FocusMode::Automatic),
        "laplacian" => Ok(FocusMode::Laplacian),
        other => Err(format!(
            "Unknown mode {other}; expected manual, full, automatic or laplacian"
        )),
    }
}

fn parse_projection(value: &str) -> Result<ProjectionMode, String> {
    match value {
        "MIP" | "mip" => Ok(ProjectionMode::Mip),
        "sum" => Ok(ProjectionMode::Sum),
        other => Err(format!("Unknown projection {other}; expected MIP or sum")),
    }
}

fn usage(program: &str) -> String {
    format!(
        "usage: {program} <stack-dir> [--config file.json] \
         [--mode manual|full|automatic|laplacian] [--projection MIP|sum] \
         [--block-size N] [--image-out out.png] [--json-out report.json]"
    )
}
