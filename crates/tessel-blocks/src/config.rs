use std::collections::HashMap;

use serde::Deserialize;
use tessel_geom::{Side, SideMask};

use crate::block::BlockProps;
use crate::placement::ConnectionRule;
use crate::uri::BlockUri;

// Top-level definitions file: shape metadata plus family definitions
#[derive(Deserialize, Debug, Clone, Default)]
pub struct DefinitionsConfig {
    #[serde(default)]
    pub shapes: Vec<ShapeDef>,
    #[serde(default)]
    pub families: Vec<FamilyDef>,
    // Known block ids from a previous session, keyed by full block uri.
    #[serde(default)]
    pub ids: HashMap<String, u16>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ShapeDef {
    pub name: String,
    #[serde(default)]
    pub placement: PlacementTopology,
    // A symmetric shape looks the same from opposite directions, so only
    // canonical sides/corners/edges need their own variant.
    #[serde(default)]
    pub symmetric: bool,
}

/// How a shape may be oriented when placed; drives freeform family dispatch.
#[derive(Deserialize, Debug, Clone, Copy, Default, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum PlacementTopology {
    #[default]
    Cube,
    Horizontal,
    Full,
    Side,
    Edge,
    Corner,
}

#[derive(Deserialize, Debug, Clone)]
pub struct FamilyDef {
    pub uri: BlockUri,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub shape: Option<String>,
    // Overrides the shape's own symmetric flag.
    #[serde(default)]
    pub symmetric: Option<bool>,
    // Restricts side/corner/edge families to these identifiers.
    #[serde(default)]
    pub allowed: Option<Vec<String>>,
    #[serde(default)]
    pub connections: Option<ConnectionsCfg>,
    #[serde(default)]
    pub connects_to: Option<ConnectsToCfg>,
    #[serde(default)]
    pub base: SectionDef,
    #[serde(default)]
    pub sections: HashMap<String, SectionDef>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SectionDef {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub solid: Option<bool>,
    #[serde(default)]
    pub emission: Option<u8>,
    #[serde(default)]
    pub shape: Option<String>,
}

// Connectable sides: "all", "horizontal", or an explicit list of side names
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ConnectionsCfg {
    Preset(String),
    Sides(Vec<String>),
}

// Connection rule: "same_family" / "solid" / "any", or { families = [...] }
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ConnectsToCfg {
    Simple(String),
    Families { families: Vec<BlockUri> },
}

impl SectionDef {
    /// Fields set here win; anything left unset is taken from `base`.
    pub fn merged_over(&self, base: &SectionDef) -> SectionDef {
        SectionDef {
            display_name: self.display_name.clone().or_else(|| base.display_name.clone()),
            solid: self.solid.or(base.solid),
            emission: self.emission.or(base.emission),
            shape: self.shape.clone().or_else(|| base.shape.clone()),
        }
    }
}

impl FamilyDef {
    /// A bare definition with only a uri, useful for building families in code.
    pub fn new(uri: BlockUri) -> FamilyDef {
        FamilyDef {
            uri,
            kind: None,
            categories: Vec::new(),
            shape: None,
            symmetric: None,
            allowed: None,
            connections: None,
            connects_to: None,
            base: SectionDef::default(),
            sections: HashMap::new(),
        }
    }

    #[inline]
    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Resolved section: `None` is the base section, a named section is
    /// merged over the base. `None` result when the named section is absent.
    pub fn section(&self, name: Option<&str>) -> Option<SectionDef> {
        match name {
            None => Some(self.base.clone()),
            Some(n) => self.sections.get(n).map(|s| s.merged_over(&self.base)),
        }
    }

    /// Block attributes for a resolved section. Display name defaults to the family name.
    pub fn props_for(&self, section: &SectionDef) -> BlockProps {
        BlockProps {
            display_name: section
                .display_name
                .clone()
                .unwrap_or_else(|| self.uri.name().to_string()),
            solid: section.solid.unwrap_or(true),
            emission: section.emission.unwrap_or(0),
        }
    }

    /// Connectable sides; every side when unset.
    pub fn connectable_mask(&self) -> Result<SideMask, String> {
        match &self.connections {
            None => Ok(SideMask::ALL),
            Some(ConnectionsCfg::Preset(p)) => match p.to_ascii_lowercase().as_str() {
                "all" => Ok(SideMask::ALL),
                "horizontal" => Ok(SideMask::HORIZONTAL),
                other => Err(format!("unknown connections preset `{}`", other)),
            },
            Some(ConnectionsCfg::Sides(list)) => list
                .iter()
                .map(|s| s.parse::<Side>().map_err(|e| e.to_string()))
                .collect::<Result<SideMask, _>>(),
        }
    }

    /// Connection rule; same family when unset.
    pub fn connection_rule(&self) -> Result<ConnectionRule, String> {
        match &self.connects_to {
            None => Ok(ConnectionRule::SameFamily),
            Some(ConnectsToCfg::Simple(s)) => match s.to_ascii_lowercase().as_str() {
                "same_family" => Ok(ConnectionRule::SameFamily),
                "solid" => Ok(ConnectionRule::Solid),
                "any" => Ok(ConnectionRule::Any),
                other => Err(format!("unknown connection rule `{}`", other)),
            },
            Some(ConnectsToCfg::Families { families }) => Ok(ConnectionRule::Families(
                families.iter().map(BlockUri::family_uri).collect(),
            )),
        }
    }
}

impl DefinitionsConfig {
    pub fn shape(&self, name: &str) -> Option<&ShapeDef> {
        self.shapes.iter().find(|s| s.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFS: &str = r#"
[[shapes]]
name = "torch"
placement = "side"
symmetric = false

[[shapes]]
name = "cube"

[[families]]
uri = "core:fence"
kind = "multi_connect"
categories = ["fences"]
connections = "horizontal"
connects_to = "solid"
base = { display_name = "Fence" }

[families.sections.no_connections]
[families.sections.line_connection]
display_name = "Fence Line"
solid = false

[[families]]
uri = "core:cable"
connections = ["left", "right", "top"]
connects_to = { families = ["core:cable", "core:battery.top"] }

[ids]
"core:fence.18" = 7
"#;

    #[test]
    fn parses_definitions() {
        let cfg: DefinitionsConfig = toml::from_str(DEFS).unwrap();
        assert_eq!(cfg.shapes.len(), 2);
        assert_eq!(cfg.shape("cube").unwrap().placement, PlacementTopology::Cube);
        assert_eq!(cfg.shape("torch").unwrap().placement, PlacementTopology::Side);
        assert_eq!(cfg.ids.get("core:fence.18"), Some(&7));

        let fence = &cfg.families[0];
        assert_eq!(fence.kind.as_deref(), Some("multi_connect"));
        assert_eq!(fence.connectable_mask(), Ok(SideMask::HORIZONTAL));
        assert_eq!(fence.connection_rule(), Ok(ConnectionRule::Solid));
        assert!(fence.has_section("no_connections"));
    }

    #[test]
    fn sections_merge_over_base() {
        let cfg: DefinitionsConfig = toml::from_str(DEFS).unwrap();
        let fence = &cfg.families[0];
        let line = fence.section(Some("line_connection")).unwrap();
        assert_eq!(line.display_name.as_deref(), Some("Fence Line"));
        assert_eq!(line.solid, Some(false));
        let empty = fence.section(Some("no_connections")).unwrap();
        assert_eq!(empty.display_name.as_deref(), Some("Fence"));
        assert!(fence.section(Some("cross")).is_none());
        assert_eq!(fence.props_for(&empty).display_name, "Fence");
        assert!(fence.props_for(&empty).solid);
    }

    #[test]
    fn explicit_connection_list() {
        let cfg: DefinitionsConfig = toml::from_str(DEFS).unwrap();
        let cable = &cfg.families[1];
        let expected: SideMask = [Side::Left, Side::Right, Side::Top].into_iter().collect();
        assert_eq!(cable.connectable_mask(), Ok(expected));
        match cable.connection_rule().unwrap() {
            ConnectionRule::Families(f) => {
                assert_eq!(f.len(), 2);
                assert!(f.iter().all(BlockUri::is_family));
            }
            other => panic!("unexpected rule {:?}", other),
        }
    }

    #[test]
    fn bad_connection_settings_are_reported() {
        let mut def = FamilyDef::new("core:x".parse().unwrap());
        def.connections = Some(ConnectionsCfg::Preset("diagonal".into()));
        assert!(def.connectable_mask().is_err());
        def.connections = Some(ConnectionsCfg::Sides(vec!["up".into()]));
        assert!(def.connectable_mask().is_err());
        def.connects_to = Some(ConnectsToCfg::Simple("liquid".into()));
        assert!(def.connection_rule().is_err());
    }
}
