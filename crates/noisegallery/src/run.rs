use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use catalog::{ControlPanel, ShaderEntry, ShaderRegistry};
use pagestate::{MemoryHistory, Page, QueryState};
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use uniforms::{ControlDescriptor, HostInputs, RawValue, UniformFrame};

use crate::bindings::{apply_edit, hydrate_panel, select_shader};
use crate::cli::{Cli, Command, SelectArgs, UniformArgs};
use crate::config::GalleryConfig;
use crate::paths::AppPaths;

struct Gallery {
    paths: AppPaths,
    config: GalleryConfig,
    registry: ShaderRegistry,
}

pub fn run(cli: Cli) -> Result<()> {
    initialise_tracing();

    let paths = AppPaths::discover()?;
    tracing::debug!(
        config = %paths.config_dir().display(),
        data = %paths.data_dir().display(),
        "resolved noisegallery paths"
    );
    let config_path = cli.config.clone().unwrap_or_else(|| paths.config_file());
    let config = GalleryConfig::load_or_default(&config_path)?;
    let registry = build_registry(&paths, &config, &cli.packs)?;
    registry
        .get(&config.default_shader)
        .with_context(|| format!("configured default shader '{}'", config.default_shader))?;

    let gallery = Gallery {
        paths,
        config,
        registry,
    };

    match cli.command {
        Command::List => list(&gallery),
        Command::Controls(args) => controls(&gallery, &args),
        Command::Uniforms(args) => uniforms(&gallery, &args),
        Command::Source(args) => source(&gallery, &args),
        Command::Check => check(&gallery),
        Command::Where => where_(&gallery),
    }
}

fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn build_registry(
    paths: &AppPaths,
    config: &GalleryConfig,
    extra: &[PathBuf],
) -> Result<ShaderRegistry> {
    let mut builder = ShaderRegistry::builder().with_builtins();
    let roots = paths
        .pack_roots()
        .into_iter()
        .chain(config.pack_dirs.iter().map(|dir| paths.config_dir().join(dir)))
        .chain(extra.iter().cloned());
    for root in roots {
        tracing::debug!(root = %root.display(), "scanning shader packs");
        builder
            .load_pack_root(&root)
            .with_context(|| format!("failed to load shader packs from {}", root.display()))?;
    }
    let registry = builder.build();
    tracing::debug!(shaders = registry.len(), "shader registry ready");
    Ok(registry)
}

fn open_location(location: &str) -> Result<QueryState> {
    let page = Page::from_location(location, MemoryHistory::new())
        .with_context(|| format!("invalid page location '{location}'"))?;
    Ok(QueryState::new(page))
}

fn resolve<'g>(
    gallery: &'g Gallery,
    state: &QueryState,
    args: &SelectArgs,
) -> Result<&'g ShaderEntry> {
    let entry = select_shader(
        &gallery.registry,
        state,
        &gallery.config.shader_field,
        args.shader.as_deref(),
        &gallery.config.default_shader,
    )?;
    Ok(entry)
}

fn print_json(value: &impl Serialize) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("failed to serialise output")?;
    println!("{text}");
    Ok(())
}

fn list(gallery: &Gallery) -> Result<()> {
    for entry in gallery.registry.list() {
        println!("{}\t{}", entry.id, entry.definition.title());
    }
    Ok(())
}

#[derive(Serialize)]
struct ControlRow<'a> {
    key: &'a str,
    identifier: String,
    #[serde(flatten)]
    descriptor: ControlDescriptor,
    value: RawValue,
}

#[derive(Serialize)]
struct ControlsReport<'a> {
    shader: &'a str,
    title: &'a str,
    controls: Vec<ControlRow<'a>>,
}

fn controls(gallery: &Gallery, args: &SelectArgs) -> Result<()> {
    let state = open_location(&args.location)?;
    let entry = resolve(gallery, &state, args)?;
    let mut panel = ControlPanel::new(&entry.id, &entry.definition);
    hydrate_panel(&mut panel, &state);

    let controls = panel
        .descriptors()
        .into_iter()
        .zip(panel.values())
        .map(|((key, descriptor), (_, value))| ControlRow {
            key,
            identifier: uniforms::uniform_identifier(key),
            descriptor,
            value,
        })
        .collect();
    print_json(&ControlsReport {
        shader: &entry.id,
        title: entry.definition.title(),
        controls,
    })
}

#[derive(Serialize)]
struct UniformsReport<'a> {
    shader: &'a str,
    location: String,
    uniforms: UniformFrame,
}

fn uniforms(gallery: &Gallery, args: &UniformArgs) -> Result<()> {
    let state = open_location(&args.select.location)?;
    let entry = resolve(gallery, &state, &args.select)?;
    let mut panel = ControlPanel::new(&entry.id, &entry.definition);
    let hydrated = hydrate_panel(&mut panel, &state);
    tracing::debug!(shader = %entry.id, hydrated, "controls loaded from location");

    for (key, value) in &args.set {
        apply_edit(&mut panel, &state, key, value)
            .with_context(|| format!("failed to set '{key}'"))?;
    }

    let (width, height) = args.resolution;
    let mut host = HostInputs::new(width as f32, height as f32);
    if let Some((x, y)) = args.mouse {
        host.mouse = [x, y];
    }
    host.time = args.time;

    let frame = panel.frame(Some(&host))?;
    print_json(&UniformsReport {
        shader: &entry.id,
        location: state.page().location(),
        uniforms: frame,
    })
}

fn source(gallery: &Gallery, args: &SelectArgs) -> Result<()> {
    let state = open_location(&args.location)?;
    let entry = resolve(gallery, &state, args)?;
    print!("{}", entry.definition.source());
    Ok(())
}

fn check(gallery: &Gallery) -> Result<()> {
    let report = gallery.registry.validate();
    for (id, issues) in &report {
        for issue in issues {
            println!("{id}: {issue}");
        }
    }
    if !report.is_empty() {
        let count: usize = report.iter().map(|(_, issues)| issues.len()).sum();
        bail!("{count} issue(s) across {} shader(s)", report.len());
    }
    println!("{} shader(s) ok", gallery.registry.len());
    Ok(())
}

fn where_(gallery: &Gallery) -> Result<()> {
    println!("config: {}", gallery.paths.config_dir().display());
    println!("data: {}", gallery.paths.data_dir().display());
    println!("config file: {}", gallery.paths.config_file().display());
    for root in gallery.paths.pack_roots() {
        println!("packs: {}", root.display());
    }
    for dir in &gallery.config.pack_dirs {
        println!("packs: {}", gallery.paths.config_dir().join(dir).display());
    }
    Ok(())
}
