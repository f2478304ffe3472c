use std::collections::HashSet;

use ego_tree::NodeRef;
use lazy_static::lazy_static;
use regex::Regex;
use scraper::node::Node;
use scraper::Html;
use vin_core::Vin;

lazy_static! {
    // The VIN field of the inline listing JSON, e.g. `"vin":"1FA6P8CF5N5100001"`.
    static ref VIN_FIELD: Regex = Regex::new(r#""vin":"([A-HJ-NPR-Z0-9]{17})""#)
        .expect("VIN_FIELD regex is valid");
}

/// Insertion-ordered set of VINs collected for one search URL.
#[derive(Debug, Clone, Default)]
pub struct VinSet {
    order: Vec<Vin>,
    seen: HashSet<Vin>,
}

impl VinSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the VIN was already present.
    pub fn insert(&mut self, vin: Vin) -> bool {
        if self.seen.contains(&vin) {
            return false;
        }
        self.seen.insert(vin.clone());
        self.order.push(vin);
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, vin: &Vin) -> bool {
        self.seen.contains(vin)
    }

    /// VINs in discovery order.
    pub fn into_vec(self) -> Vec<Vin> {
        self.order
    }
}

/// Outcome of scanning one listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageScan {
    /// Text nodes on the page carrying at least one VIN field.
    pub matched_nodes: usize,
    /// VINs not seen on earlier pages or nodes.
    pub new_vins: usize,
    /// Scanning stopped early because the set reached the cap.
    pub reached_cap: bool,
}

/// Owned copies of every text node (script bodies included) that contains a
/// `"vin":"..."` field.
pub fn vin_text_nodes(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let nodes = document
        .tree
        .root()
        .descendants()
        .filter_map(matching_text)
        .collect();
    nodes
}

/// All VINs in the `"vin":"..."` fields of a piece of text.
pub fn vins_in_text(text: &str) -> impl Iterator<Item = Vin> + '_ {
    VIN_FIELD
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .filter_map(|m| Vin::parse(m.as_str()).ok())
}

/// Adds the page's VINs to `found`, node by node, stopping after the node
/// that brings `found` to `max_vins`.
pub fn scan_page(html: &str, found: &mut VinSet, max_vins: usize) -> PageScan {
    let nodes = vin_text_nodes(html);
    let mut scan = PageScan {
        matched_nodes: nodes.len(),
        ..PageScan::default()
    };

    for text in &nodes {
        for vin in vins_in_text(text) {
            if found.insert(vin) {
                scan.new_vins += 1;
            }
        }
        if found.len() >= max_vins {
            scan.reached_cap = true;
            break;
        }
    }

    scan
}

fn matching_text(node: NodeRef<'_, Node>) -> Option<String> {
    match node.value() {
        Node::Text(text) => {
            let content: &str = text;
            VIN_FIELD.is_match(content).then(|| content.to_owned())
        }
        _ => None,
    }
}
