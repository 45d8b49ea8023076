use anyhow::{anyhow, Result};
use catalog::{CatalogError, ControlPanel, ShaderEntry, ShaderRegistry};
use pagestate::QueryState;
use uniforms::RawValue;

/// Picks the shader to show: an explicit id wins over the location's
/// `shader_field`, and anything unknown falls back to `default_shader`.
pub fn select_shader<'r>(
    registry: &'r ShaderRegistry,
    state: &QueryState,
    shader_field: &str,
    explicit: Option<&str>,
    default_shader: &str,
) -> Result<&'r ShaderEntry, CatalogError> {
    let field = state.field(shader_field);
    let requested = explicit.map(str::to_string).or_else(|| field.get());
    let entry = registry.get_or_fallback(requested.as_deref(), default_shader)?;
    if explicit.is_some() && field.get().as_deref() != Some(entry.id.as_str()) {
        field.set(entry.id.clone());
    }
    Ok(entry)
}

/// Loads every control whose key is present in the query. Values that do not
/// parse for the uniform's kind are skipped and the default is kept.
pub fn hydrate_panel(panel: &mut ControlPanel<'_>, state: &QueryState) -> usize {
    let definition = panel.definition();
    let mut applied = 0;
    for (key, spec) in definition.uniforms() {
        let Some(text) = state.field(key).get() else {
            continue;
        };
        let Some(raw) = RawValue::parse(spec.kind(), &text) else {
            tracing::warn!(
                shader = panel.shader(),
                key,
                value = %text,
                kind = %spec.kind(),
                "ignoring unparseable query value"
            );
            continue;
        };
        match panel.edit(key, raw) {
            Ok(()) => applied += 1,
            Err(err) => tracing::warn!(error = %err, "ignoring query value"),
        }
    }
    applied
}

/// Applies a textual edit to the panel and writes it back to the location.
pub fn apply_edit(
    panel: &mut ControlPanel<'_>,
    state: &QueryState,
    key: &str,
    text: &str,
) -> Result<()> {
    let spec = panel
        .definition()
        .uniform(key)
        .ok_or_else(|| CatalogError::UnknownUniform {
            shader: panel.shader().to_string(),
            key: key.to_string(),
        })?;
    let raw = RawValue::parse(spec.kind(), text)
        .ok_or_else(|| anyhow!("value '{text}' is not a valid {} for '{key}'", spec.kind()))?;
    panel.edit(key, raw)?;
    state.field(key).set(raw.to_string());
    tracing::debug!(shader = panel.shader(), key, value = %raw, "control edited");
    Ok(())
}
