use anyhow::Context;
use bazaar_core::{RuleRegistry, Ruleset};
use std::fs;
use std::path::Path;

const HAGGLE_CATALOG: &str = include_str!("catalogs/haggle.json");
const REMIXED_CATALOG: &str = include_str!("catalogs/remixed.json");
const PIZZAZ_CATALOG: &str = include_str!("catalogs/pizzaz.json");

/// The built-in game variants. Each one pairs an embedded card catalog with
/// the registry of behaviors its rule cards refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinRuleset {
    Haggle,
    RemixedHaggle,
    Pizzaz,
}

impl BuiltinRuleset {
    pub const ALL: [BuiltinRuleset; 3] = [
        BuiltinRuleset::Haggle,
        BuiltinRuleset::RemixedHaggle,
        BuiltinRuleset::Pizzaz,
    ];

    pub fn ruleset(&self) -> anyhow::Result<Ruleset> {
        let (name, raw) = match self {
            BuiltinRuleset::Haggle => ("haggle", HAGGLE_CATALOG),
            BuiltinRuleset::RemixedHaggle => ("remixed", REMIXED_CATALOG),
            BuiltinRuleset::Pizzaz => ("pizzaz", PIZZAZ_CATALOG),
        };
        let ruleset =
            serde_json::from_str(raw).with_context(|| format!("parse builtin catalog {name}"))?;
        Ok(ruleset)
    }

    pub fn registry(&self) -> RuleRegistry {
        match self {
            BuiltinRuleset::Haggle => crate::haggle::registry(),
            BuiltinRuleset::RemixedHaggle => crate::remixed::registry(),
            BuiltinRuleset::Pizzaz => crate::pizzaz::registry(),
        }
    }
}

/// Load a catalog from an external JSON file, same schema as the embedded
/// ones. Behaviors for its rule cards must be registered by the caller.
pub fn load_ruleset(path: impl AsRef<Path>) -> anyhow::Result<Ruleset> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let ruleset =
        serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(ruleset)
}
