use anyhow::{Context, Result};
use std::collections::BTreeSet;

use crate::upstream::{DamageRelations, TypeSlot, Upstream};

/// Combine the damage relations of all of a Pokémon's types into its net
/// weakness set.
///
/// Weaknesses are unioned across types first and resistances/immunities
/// subtracted afterwards: a type resisted by either of a dual-type's types
/// cancels a weakness introduced by the other, which per-type filtering would
/// get wrong.
pub fn net_weaknesses(relations: &[DamageRelations]) -> BTreeSet<String> {
    let mut weak = BTreeSet::new();
    let mut resist = BTreeSet::new();

    for rel in relations {
        weak.extend(rel.double_damage_from.iter().map(|r| r.name.clone()));
        resist.extend(rel.half_damage_from.iter().map(|r| r.name.clone()));
        resist.extend(rel.no_damage_from.iter().map(|r| r.name.clone()));
    }

    weak.difference(&resist).cloned().collect()
}

/// Fetch damage relations for each of the given type slots and resolve the
/// net weakness set. Any failed type fetch fails the whole resolution; a
/// partial weakness set is never returned.
pub fn resolve_weaknesses(upstream: &impl Upstream, types: &[TypeSlot]) -> Result<BTreeSet<String>> {
    let mut relations = Vec::with_capacity(types.len());

    for slot in types {
        let info = upstream
            .type_relations(&slot.kind.url)
            .with_context(|| format!("Failed to fetch damage relations for type {}", slot.kind.name))?;
        relations.push(info.damage_relations);
    }

    Ok(net_weaknesses(&relations))
}
