use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "noisegallery",
    author,
    version,
    about = "Procedural noise shader catalog with typed uniform controls"
)]
pub struct Cli {
    /// Gallery configuration file (defaults to `gallery.toml` in the config directory).
    #[arg(long, global = true, value_name = "FILE", env = "NOISEGALLERY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Additional shader pack root; may be repeated.
    #[arg(long = "packs", global = true, value_name = "DIR")]
    pub packs: Vec<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List shaders in display order.
    List,
    /// Describe the UI controls of a shader as JSON.
    Controls(SelectArgs),
    /// Resolve the uniform values a renderer receives for a page location.
    Uniforms(UniformArgs),
    /// Print a shader's GLSL source.
    Source(SelectArgs),
    /// Validate shader metadata against bounds and GLSL declarations.
    Check,
    /// Print resolved directories.
    Where,
}

#[derive(Args, Debug)]
pub struct SelectArgs {
    /// Shader id; when omitted the location query and then the configured default decide.
    #[arg(value_name = "ID")]
    pub shader: Option<String>,

    /// Page location whose query holds the selection and parameter values.
    #[arg(long, value_name = "PATH?QUERY", default_value = "/")]
    pub location: String,
}

#[derive(Args, Debug)]
pub struct UniformArgs {
    #[command(flatten)]
    pub select: SelectArgs,

    /// Edit a control before resolving (e.g. `scale=0.5`, `position=10,20`); may be repeated.
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_assignment)]
    pub set: Vec<(String, String)>,

    /// Canvas resolution passed as `u_resolution`.
    #[arg(long, value_name = "WIDTHxHEIGHT", value_parser = parse_resolution, default_value = "800x600")]
    pub resolution: (u32, u32),

    /// Pointer position passed as `u_mouse`.
    #[arg(long, value_name = "X,Y", value_parser = parse_point)]
    pub mouse: Option<(f32, f32)>,

    /// Time in seconds passed as `u_time`.
    #[arg(long, value_name = "SECONDS", default_value_t = 0.0)]
    pub time: f32,
}

pub fn parse() -> Cli {
    Cli::parse()
}

pub fn parse_assignment(value: &str) -> Result<(String, String), String> {
    let (key, raw) = value
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{value}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err("assignment key must not be empty".into());
    }
    Ok((key.to_string(), raw.trim().to_string()))
}

pub fn parse_resolution(value: &str) -> Result<(u32, u32), String> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| "expected WIDTHxHEIGHT".to_string())?;
    let width = w
        .trim()
        .parse::<u32>()
        .map_err(|_| "invalid width in resolution".to_string())?;
    let height = h
        .trim()
        .parse::<u32>()
        .map_err(|_| "invalid height in resolution".to_string())?;
    if width == 0 || height == 0 {
        return Err("resolution must be greater than zero".into());
    }
    Ok((width, height))
}

pub fn parse_point(value: &str) -> Result<(f32, f32), String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| "expected X,Y".to_string())?;
    let x = x
        .trim()
        .parse::<f32>()
        .map_err(|_| "invalid x coordinate".to_string())?;
    let y = y
        .trim()
        .parse::<f32>()
        .map_err(|_| "invalid y coordinate".to_string())?;
    Ok((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_assignments() {
        assert_eq!(
            parse_assignment("position=10,20").unwrap(),
            ("position".to_string(), "10,20".to_string())
        );
        assert!(parse_assignment("scale").is_err());
        assert!(parse_assignment("=1").is_err());
    }

    #[test]
    fn parses_resolution_and_points() {
        assert_eq!(parse_resolution("1920x1080").unwrap(), (1920, 1080));
        assert!(parse_resolution("0x10").is_err());
        assert!(parse_resolution("1920").is_err());
        assert_eq!(parse_point("1.5, -2").unwrap(), (1.5, -2.0));
        assert!(parse_point("1.5").is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
