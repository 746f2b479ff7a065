use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::schema::DatabaseSpec;

/// Summary of the manual reference graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceGraphSummary {
    pub tables: usize,
    pub edges: usize,
}

/// Client-side preview of the generation order implied by manual references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceGraphReport {
    pub summary: ReferenceGraphSummary,
    /// Parents before children, ties in declaration order.
    pub order: Option<Vec<String>>,
    pub cycle: Option<Vec<String>>,
}

/// Build the dependency report for the named tables of `database`.
///
/// Intelligent mode ignores stored references, so every table is independent.
/// Self references and references to unknown tables add no edge.
pub fn build_reference_graph(database: &DatabaseSpec) -> ReferenceGraphReport {
    let names: Vec<&str> = database
        .tables
        .iter()
        .filter(|table| table.has_name())
        .map(|table| table.table_name.as_str())
        .collect();
    let position: BTreeMap<&str, usize> = names
        .iter()
        .enumerate()
        .map(|(idx, name)| (*name, idx))
        .collect();

    // parent index -> child indices
    let mut graph: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); names.len()];
    if !database.use_intelligent_mode {
        for table in database.tables.iter().filter(|table| table.has_name()) {
            let Some(&child) = position.get(table.table_name.as_str()) else {
                continue;
            };
            for field in table.fields.iter().filter(|field| field.has_name()) {
                let Some(reference) = field.reference.as_ref().filter(|r| r.is_complete()) else {
                    continue;
                };
                if let Some(&parent) = position.get(reference.target_table.as_str())
                    && parent != child
                {
                    graph[parent].insert(child);
                }
            }
        }
    }

    let edges = graph.iter().map(BTreeSet::len).sum();
    let summary = ReferenceGraphSummary {
        tables: names.len(),
        edges,
    };

    match toposort(&graph) {
        Ok(order) => ReferenceGraphReport {
            summary,
            order: Some(order.into_iter().map(|idx| names[idx].to_string()).collect()),
            cycle: None,
        },
        Err(cycle) => ReferenceGraphReport {
            summary,
            order: None,
            cycle: Some(cycle.into_iter().map(|idx| names[idx].to_string()).collect()),
        },
    }
}

fn toposort(graph: &[BTreeSet<usize>]) -> Result<Vec<usize>, Vec<usize>> {
    let mut indegree = vec![0_usize; graph.len()];
    for targets in graph {
        for &target in targets {
            indegree[target] += 1;
        }
    }

    let mut ready: BTreeSet<usize> = indegree
        .iter()
        .enumerate()
        .filter_map(|(node, count)| (*count == 0).then_some(node))
        .collect();

    let mut order = Vec::with_capacity(graph.len());
    while let Some(node) = ready.pop_first() {
        order.push(node);
        for &target in &graph[node] {
            indegree[target] = indegree[target].saturating_sub(1);
            if indegree[target] == 0 {
                ready.insert(target);
            }
        }
    }

    if order.len() == graph.len() {
        Ok(order)
    } else {
        Err(indegree
            .into_iter()
            .enumerate()
            .filter_map(|(node, count)| (count > 0).then_some(node))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldReference, FieldSpec, TableSpec};

    fn table(name: &str, refs: &[(&str, &str)]) -> TableSpec {
        let mut fields = vec![FieldSpec::named("id", "integer")];
        for (field, target) in refs {
            let mut spec = FieldSpec::named(*field, "integer");
            spec.reference = Some(FieldReference {
                target_table: target.to_string(),
                target_field: "id".to_string(),
            });
            fields.push(spec);
        }
        TableSpec {
            table_name: name.to_string(),
            fields,
            ..TableSpec::default()
        }
    }

    fn manual(tables: Vec<TableSpec>) -> DatabaseSpec {
        DatabaseSpec {
            name: "shop".to_string(),
            use_intelligent_mode: false,
            tables,
        }
    }

    #[test]
    fn parents_come_before_children() {
        let db = manual(vec![
            table("order_items", &[("order_id", "orders"), ("product_id", "products")]),
            table("orders", &[("customer_id", "customers")]),
            table("customers", &[]),
            table("products", &[]),
        ]);
        let report = build_reference_graph(&db);
        assert_eq!(report.summary.edges, 3);
        let order = report.order.expect("acyclic");
        assert_eq!(order, vec!["customers", "orders", "products", "order_items"]);
    }

    #[test]
    fn cycles_are_reported() {
        let db = manual(vec![
            table("a", &[("b_id", "b")]),
            table("b", &[("a_id", "a")]),
            table("c", &[]),
        ]);
        let report = build_reference_graph(&db);
        assert!(report.order.is_none());
        assert_eq!(report.cycle, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn intelligent_mode_and_self_references_add_no_edges() {
        let mut db = manual(vec![table("employees", &[("manager_id", "employees")])]);
        assert_eq!(build_reference_graph(&db).summary.edges, 0);

        db.tables.push(table("teams", &[("lead_id", "employees")]));
        db.use_intelligent_mode = true;
        let report = build_reference_graph(&db);
        assert_eq!(report.summary.edges, 0);
        assert_eq!(
            report.order,
            Some(vec!["employees".to_string(), "teams".to_string()])
        );
    }
}
