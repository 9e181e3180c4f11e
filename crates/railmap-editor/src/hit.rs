//! Hit-target resolution: host element IDs → diagram elements.
//!
//! The host shell hit-tests its own scene (SVG/DOM) and hands the session
//! the topmost element's ID string. Element IDs embed the owning node's
//! ID behind a small set of known prefixes; anything else is background
//! or decoration.

use railmap_core::ElementId;

/// The station core shape, the part a line may attach to.
const STATION_CORE: &str = "stn_core_";
/// The clickable circle of a virtual junction node.
const VIRTUAL_CIRCLE: &str = "virtual_circle_";
/// Connectable handle on other misc node variants.
const MISC_CONNECTABLE: &str = "misc_node_connectable_";
/// Non-connectable node decorations that still select the node.
const DECOR: [&str; 2] = ["stn_name_", "misc_node_body_"];

const CONNECTABLE: [&str; 3] = [STATION_CORE, VIRTUAL_CIRCLE, MISC_CONNECTABLE];

/// The node a drawn line may attach to, if the hit element is one of the
/// connectable shapes. Any unknown prefix means "not connectable".
pub fn connectable_target(element_id: &str) -> Option<ElementId> {
    CONNECTABLE
        .iter()
        .find_map(|p| element_id.strip_prefix(p))
        .map(ElementId::intern)
}

/// The node a pointer press lands on, for selection and dragging.
/// Accepts connectable shapes and node decorations alike.
pub fn hit_node(element_id: &str) -> Option<ElementId> {
    CONNECTABLE
        .iter()
        .chain(DECOR.iter())
        .find_map(|p| element_id.strip_prefix(p))
        .map(ElementId::intern)
}
