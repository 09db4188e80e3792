//! Decodificação do `values.xml` do dispositivo.
//!
//! O documento tem um elemento `<root>` com um filho por sensor:
//!
//! ```text
//! <root>
//!   <Temperature>
//!     <Value>22.5</Value>
//!     <Unit>°C</Unit>
//!     <LowAlarm>10</LowAlarm>
//!     <HighAlarm>30</HighAlarm>
//!   </Temperature>
//!   <Humidity>…</Humidity>
//! </root>
//! ```
//!
//! Nomes de tags são comparados sem diferenciar maiúsculas.
//! O check usa apenas os registros tipados ([`DeviceValues`]); a árvore
//! genérica ([`DeviceTree`]) existe só para o modo `--info`.

use crate::error::{CheckError, Result};
use roxmltree::{Document, Node};
use std::collections::BTreeMap;

pub const TEMPERATURE: &str = "temperature";
pub const HUMIDITY: &str = "humidity";

/// Campos de um sensor como reportados pelo dispositivo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SensorRecord {
    pub value: String,
    pub unit: String,
    pub low_alarm: String,
    pub high_alarm: String,
}

/// Sensores consumidos pelo check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceValues {
    pub temperature: SensorRecord,
    pub humidity: SensorRecord,
}

/// Árvore genérica do documento (modo `--info`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceTree {
    Leaf(String),
    Node(BTreeMap<String, DeviceTree>),
}

impl SensorRecord {
    fn from_node(sensor: &str, node: Node<'_, '_>) -> Result<Self> {
        let required = |field: &str| {
            child_element(node, field)
                .map(leaf_text)
                .ok_or_else(|| CheckError::MissingField {
                    sensor: sensor.into(),
                    field: field.into(),
                })
        };

        Ok(Self {
            value: required("value")?,
            unit: child_element(node, "unit").map(leaf_text).unwrap_or_default(),
            low_alarm: required("lowalarm")?,
            high_alarm: required("highalarm")?,
        })
    }

    /// Leitura numérica do sensor. `NaN` e infinitos são rejeitados.
    pub fn reading(&self, sensor: &str) -> Result<f64> {
        let invalid = || CheckError::InvalidValue {
            sensor: sensor.into(),
            value: self.value.clone(),
        };
        let value: f64 = self.value.trim().parse().map_err(|_| invalid())?;
        if !value.is_finite() {
            return Err(invalid());
        }
        Ok(value)
    }

    /// Range padrão derivado dos alarmes configurados no dispositivo.
    pub fn alarm_range(&self) -> String {
        format!("{}:{}", self.low_alarm.trim(), self.high_alarm.trim())
    }
}

/// Extrai temperatura e umidade do documento.
pub fn parse_values(xml: &str) -> Result<DeviceValues> {
    let doc = parse_document(xml)?;
    let root = root_element(&doc)?;

    let sensor = |name: &str| {
        let node = child_element(root, name).ok_or_else(|| CheckError::MissingField {
            sensor: "root".into(),
            field: name.into(),
        })?;
        SensorRecord::from_node(name, node)
    };

    Ok(DeviceValues {
        temperature: sensor(TEMPERATURE)?,
        humidity: sensor(HUMIDITY)?,
    })
}

/// Converte o documento inteiro em árvore genérica a partir de `<root>`.
///
/// Elementos sem nenhum filho são omitidos.
pub fn parse_tree(xml: &str) -> Result<DeviceTree> {
    let doc = parse_document(xml)?;
    let root = root_element(&doc)?;
    Ok(DeviceTree::Node(children_map(root)))
}

fn parse_document(xml: &str) -> Result<Document<'_>> {
    Document::parse(xml).map_err(|e| CheckError::Fetch(format!("XML inválido: {e}")))
}

fn root_element<'a, 'input>(doc: &'a Document<'input>) -> Result<Node<'a, 'input>> {
    doc.descendants()
        .find(|n| n.is_element() && n.tag_name().name() == "root")
        .ok_or_else(|| CheckError::Fetch("Elemento <root> não encontrado".into()))
}

fn child_element<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|c| c.is_element() && c.tag_name().name().eq_ignore_ascii_case(name))
}

fn leaf_text(node: Node<'_, '_>) -> String {
    node.children()
        .filter(|c| c.is_text())
        .filter_map(|c| c.text())
        .collect::<String>()
        .trim()
        .to_string()
}

fn children_map(node: Node<'_, '_>) -> BTreeMap<String, DeviceTree> {
    node.children()
        .filter(|c| c.is_element())
        .filter_map(|c| Some((c.tag_name().name().to_lowercase(), to_tree(c)?)))
        .collect()
}

fn to_tree(node: Node<'_, '_>) -> Option<DeviceTree> {
    if node.children().any(|c| c.is_element()) {
        Some(DeviceTree::Node(children_map(node)))
    } else if node.has_children() {
        Some(DeviceTree::Leaf(leaf_text(node)))
    } else {
        None
    }
}
