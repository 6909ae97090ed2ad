//! Archetype placements stored in map tiles

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One placed object in a tile.
///
/// The full archetype schema belongs to the game server; this core only needs
/// the prototype references (`Arch` and `Archs`) for identity checks. Every
/// other field is carried in `extra` so map files round-trip untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Archetype {
    /// Single prototype this placement derives from
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub arch: String,
    /// Ordered multiple-inheritance prototype names
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub archs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Fields this core does not interpret
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Archetype {
    /// Create a placement that inherits from `arch` through the `Archs` list
    pub fn from_arch(arch: impl Into<String>) -> Self {
        Self {
            archs: vec![arch.into()],
            ..Default::default()
        }
    }

    /// Whether both placements reference the same prototypes in the same order
    pub fn same_identity(&self, other: &Archetype) -> bool {
        self.arch == other.arch && self.archs == other.archs
    }

    /// Whether `name` is this placement's `Arch` or any of its `Archs`
    pub fn refers_to(&self, name: &str) -> bool {
        self.arch == name || self.archs.iter().any(|a| a == name)
    }

    /// The prototype name used to represent this placement: `Arch` if set,
    /// otherwise the first `Archs` entry
    pub fn primary_arch(&self) -> Option<&str> {
        if !self.arch.is_empty() {
            Some(self.arch.as_str())
        } else {
            self.archs.first().map(String::as_str)
        }
    }
}

/// Compare two tile stacks by their topmost placement.
///
/// Two empty stacks match; an empty and a non-empty stack never do.
pub fn same_top(a: &[Archetype], b: &[Archetype]) -> bool {
    match (a.last(), b.last()) {
        (None, None) => true,
        (Some(a), Some(b)) => a.same_identity(b),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arch(arch: &str, archs: &[&str]) -> Archetype {
        Archetype {
            arch: arch.to_string(),
            archs: archs.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_identity_ignores_payload() {
        let mut a = arch("wall", &["stone"]);
        let b = arch("wall", &["stone"]);
        a.name = Some("Old wall".to_string());
        assert!(a.same_identity(&b));
    }

    #[test]
    fn test_identity_is_order_sensitive() {
        let a = arch("", &["stone", "wall"]);
        let b = arch("", &["wall", "stone"]);
        assert!(!a.same_identity(&b));
        assert!(!arch("", &["wall"]).same_identity(&arch("", &["wall", "wall"])));
    }

    #[test]
    fn test_refers_to_and_primary() {
        let a = arch("", &["floor", "grass"]);
        assert!(a.refers_to("grass"));
        assert!(!a.refers_to("wall"));
        assert_eq!(a.primary_arch(), Some("floor"));
        assert_eq!(arch("door", &["wood"]).primary_arch(), Some("door"));
        assert_eq!(Archetype::default().primary_arch(), None);
    }

    #[test]
    fn test_same_top() {
        let wall = vec![arch("", &["floor"]), arch("", &["wall"])];
        let other_wall = vec![arch("", &["wall"])];
        assert!(same_top(&[], &[]));
        assert!(same_top(&wall, &other_wall));
        assert!(!same_top(&wall, &[]));
    }

    #[test]
    fn test_yaml_keeps_unknown_fields() {
        let src = "Archs:\n- wall\nName: Big wall\nMatter: stone\n";
        let a: Archetype = serde_yaml::from_str(src).unwrap();
        assert_eq!(a.archs, vec!["wall".to_string()]);
        assert_eq!(a.name.as_deref(), Some("Big wall"));
        assert!(a.extra.contains_key("Matter"));

        let back: Archetype = serde_yaml::from_str(&serde_yaml::to_string(&a).unwrap()).unwrap();
        assert_eq!(a, back);
    }
}
