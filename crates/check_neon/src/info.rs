//! Dump das informações do dispositivo (`--info`).

use neon_core::device::DeviceTree;
use std::collections::BTreeMap;
use std::fmt;

const RULE_WIDTH: usize = 21;

/// Renderiza a árvore: primeiro os valores simples, depois cada sensor em sua seção.
pub fn render(tree: &DeviceTree) -> String {
    InfoDump(tree).to_string()
}

struct InfoDump<'a>(&'a DeviceTree);

impl fmt::Display for InfoDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Device information:")?;
        writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;
        match self.0 {
            DeviceTree::Node(children) => write_node(f, children),
            DeviceTree::Leaf(value) => writeln!(f, "{value}"),
        }
    }
}

fn write_node(f: &mut fmt::Formatter<'_>, children: &BTreeMap<String, DeviceTree>) -> fmt::Result {
    for (key, child) in children {
        if let DeviceTree::Leaf(value) = child {
            writeln!(f, "{key:<20}: {value}")?;
        }
    }

    for (key, child) in children {
        if let DeviceTree::Node(nested) = child {
            writeln!(f)?;
            writeln!(f, "Sensor {key}")?;
            writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;
            write_node(f, nested)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(v: &str) -> DeviceTree {
        DeviceTree::Leaf(v.into())
    }

    #[test]
    fn leaves_before_sections() {
        let tree = DeviceTree::Node(BTreeMap::from([
            (
                "temperature".to_string(),
                DeviceTree::Node(BTreeMap::from([
                    ("value".to_string(), leaf("22.5")),
                    ("unit".to_string(), leaf("°C")),
                ])),
            ),
            ("uptime".to_string(), leaf("86400")),
            ("firmware".to_string(), leaf("1.4.2")),
        ]));

        let expected = "\
Device information:
---------------------
firmware            : 1.4.2
uptime              : 86400

Sensor temperature
---------------------
unit                : °C
value               : 22.5
";
        assert_eq!(render(&tree), expected);
    }

    #[test]
    fn empty_tree_prints_header_only() {
        let out = render(&DeviceTree::Node(BTreeMap::new()));
        assert_eq!(out, "Device information:\n---------------------\n");
    }
}
