use anyhow::bail;

/// Resolve a result limit: the command's own `--limit`, then the global one,
/// then `general.default_limit`. A zero limit is rejected rather than
/// returning an empty page.
pub fn resolve_limit(local: Option<u32>, global: Option<u32>, configured: u32) -> anyhow::Result<u32> {
    match local.or(global) {
        Some(0) => bail!("--limit must be at least 1"),
        Some(limit) => Ok(limit),
        None => Ok(configured),
    }
}
