//! Products, Frameworks and main groups, and the recursive group sort.

use std::collections::HashSet;

use crate::application::generator::dependencies::FrameworkCollector;
use crate::graph::{Group, GraphError, Object, ObjectGraph, Reference};

pub const PRODUCTS_GROUP: &str = "Products";
pub const FRAMEWORKS_GROUP: &str = "Frameworks";
pub const CARTHAGE_GROUP: &str = "Carthage";

/// The `Products` group listing every target's product.
pub fn products_group(graph: &mut ObjectGraph, products: Vec<Reference>) -> Reference {
    graph.add(
        Object::Group(Group::new(products).named(PRODUCTS_GROUP)),
        PRODUCTS_GROUP,
    )
}

/// The `Frameworks` group: path-based frameworks plus a `Carthage` group
/// with one child group per platform. `None` when there is nothing to list.
pub fn frameworks_group(
    graph: &mut ObjectGraph,
    collector: &FrameworkCollector,
    carthage_build_path: &str,
) -> Option<Reference> {
    let mut children = collector.framework_files().to_vec();

    if !collector.carthage().is_empty() {
        let mut platforms = Vec::new();
        for (platform, files) in collector.carthage() {
            let group = Group::new(files.iter().cloned().collect())
                .named(platform.as_str())
                .with_path(platform.as_str());
            platforms.push(graph.add(Object::Group(group), &format!("{CARTHAGE_GROUP}{platform}")));
        }
        platforms.sort();

        let carthage = Group::new(platforms)
            .named(CARTHAGE_GROUP)
            .with_path(carthage_build_path);
        children.push(graph.add(Object::Group(carthage), CARTHAGE_GROUP));
    }

    if children.is_empty() {
        return None;
    }
    Some(graph.add(
        Object::Group(Group::new(children).named(FRAMEWORKS_GROUP)),
        FRAMEWORKS_GROUP,
    ))
}

/// The unnamed root group. Duplicate children are listed once.
pub fn main_group(graph: &mut ObjectGraph, children: Vec<Reference>) -> Reference {
    let mut seen = HashSet::new();
    let children = children
        .into_iter()
        .filter(|c| seen.insert(c.clone()))
        .collect();
    graph.add(Object::Group(Group::new(children)), "Project")
}

/// Sort `root` and every group below it: groups before files, then by name
/// or path. A group never keeps itself as a child.
pub fn sort_groups(graph: &mut ObjectGraph, root: &Reference) -> Result<(), GraphError> {
    let mut visited = HashSet::new();
    sort_group(graph, root, &mut visited)
}

fn sort_group(
    graph: &mut ObjectGraph,
    reference: &Reference,
    visited: &mut HashSet<Reference>,
) -> Result<(), GraphError> {
    if !visited.insert(reference.clone()) {
        return Ok(());
    }

    let children = match graph.require(reference)? {
        Object::Group(group) => group.children.clone(),
        _ => return Ok(()),
    };

    let mut keyed: Vec<(u8, String, Reference)> = children
        .into_iter()
        .filter_map(|child| {
            let object = graph.get(&child)?;
            let order = object.sort_order()?;
            Some((order, object.name_or_path().to_string(), child))
        })
        .collect();
    keyed.sort_by(|a, b| (a.0, &a.1).cmp(&(b.0, &b.1)));

    let sorted: Vec<Reference> = keyed
        .into_iter()
        .map(|(_, _, child)| child)
        .filter(|child| child != reference)
        .collect();

    let child_groups: Vec<Reference> = sorted
        .iter()
        .filter(|child| matches!(graph.get(child), Some(Object::Group(_))))
        .cloned()
        .collect();

    if let Some(Object::Group(group)) = graph.get_mut(reference) {
        group.children = sorted;
    }

    for child in &child_groups {
        sort_group(graph, child, visited)?;
    }
    Ok(())
}
