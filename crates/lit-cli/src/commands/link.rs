use anyhow::Context;
use lit_core::entities::EntityLink;
use lit_core::enums::RelationType;
use lit_core::query::BulkLinkEntry;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{LinkArgs, LinkBulkArgs, LinksArgs, UnlinkArgs};
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct LinkListResponse {
    links: Vec<EntityLink>,
}

/// Handle `lit link`.
pub async fn handle_link(args: &LinkArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let relation = parse_enum::<RelationType>(&args.relation, "relation")?;
    ctx.check_known_entities([args.entity.as_str()])?;
    let outcome = ctx
        .service
        .link(
            &args.item_id,
            &args.entity,
            relation,
            args.context.as_deref(),
            args.notes.as_deref(),
        )
        .await?;
    output(&outcome, flags.format)
}

/// Handle `lit link-bulk`.
pub async fn handle_bulk(
    args: &LinkBulkArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let entries = parse_entries(&args.entries, args.section.as_deref())?;
    ctx.check_known_entities(entries.iter().map(|entry| entry.name.as_str()))?;
    let response = ctx.service.bulk_link(&args.item_id, &entries).await?;
    output(&response, flags.format)
}

/// Handle `lit unlink`.
pub async fn handle_unlink(
    args: &UnlinkArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let response = ctx.service.unlink(&args.item_id, &args.entity).await?;
    output(&response, flags.format)
}

/// Handle `lit links`.
pub async fn handle_list(args: &LinksArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let links = match (&args.item, &args.entity) {
        (Some(item), _) => ctx.service.links_for_item(item).await?,
        (None, Some(entity)) => ctx.service.links_for_entity(entity).await?,
        (None, None) => anyhow::bail!("either --item or --entity is required"),
    };
    output(&LinkListResponse { links }, flags.format)
}

/// Parse the JSON entry array; entries without a context take `section`.
fn parse_entries(raw: &str, section: Option<&str>) -> anyhow::Result<Vec<BulkLinkEntry>> {
    let mut entries: Vec<BulkLinkEntry> =
        serde_json::from_str(raw).context("entries must be a JSON array of link entries")?;
    if let Some(section) = section.filter(|s| !s.trim().is_empty()) {
        for entry in &mut entries {
            if entry.context.as_deref().is_none_or(|c| c.trim().is_empty()) {
                entry.context = Some(section.to_string());
            }
        }
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use lit_core::enums::RelationType;
    use pretty_assertions::assert_eq;

    use super::parse_entries;

    #[test]
    fn section_fills_missing_context_only() {
        let entries = parse_entries(
            r#"[{"name":"attention","relation_type":"introduces"},
                {"name":"rnn","relation_type":"critiques","context":"related_work"}]"#,
            Some("methods"),
        )
        .expect("entries should parse");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].relation_type, RelationType::Introduces);
        assert_eq!(entries[0].context.as_deref(), Some("methods"));
        assert_eq!(entries[1].context.as_deref(), Some("related_work"));
    }

    #[test]
    fn without_section_contexts_stay_empty() {
        let entries = parse_entries(r#"[{"name":"gpt","relation_type":"applies"}]"#, None)
            .expect("entries should parse");
        assert_eq!(entries[0].context, None);
    }

    #[test]
    fn rejects_unknown_relation_and_non_array() {
        assert!(parse_entries(r#"[{"name":"gpt","relation_type":"ponders"}]"#, None).is_err());
        assert!(parse_entries(r#"{"name":"gpt"}"#, None).is_err());
    }
}
