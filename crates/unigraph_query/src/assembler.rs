//! Query text assembly.
//!
//! Turns a flat list of field paths into a nested selection set. Paths with
//! one segment are root fields, paths with two segments are grouped into a
//! block per reference, and paths with three segments into a block per
//! second-hop reference inside it.

use crate::error::{QueryError, QueryResult};
use crate::options::QueryKind;
use crate::path::FieldPath;
use rustc_hash::{FxHashMap, FxHashSet};
use unigraph_schema::{Catalog, EntitySchema};

const INDENT_SIZE: usize = 2;

/// Selections accumulated under one reference field.
struct Block<'a> {
    target: &'a EntitySchema,
    fields: Vec<&'a str>,
    nested: FxHashMap<&'a str, Vec<&'a str>>,
}

impl<'a> Block<'a> {
    fn new(target: &'a EntitySchema) -> Self {
        Self {
            target,
            fields: Vec::new(),
            nested: FxHashMap::default(),
        }
    }
}

/// Line-oriented writer that tracks open braces.
struct QueryWriter {
    output: String,
    indent: usize,
}

impl QueryWriter {
    fn new() -> Self {
        Self {
            output: String::new(),
            indent: 0,
        }
    }

    fn push_indent(&mut self) {
        for _ in 0..(self.indent * INDENT_SIZE) {
            self.output.push(' ');
        }
    }

    fn line(&mut self, text: &str) {
        self.push_indent();
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn open(&mut self, head: &str) {
        self.push_indent();
        self.output.push_str(head);
        self.output.push_str(" {\n");
        self.indent += 1;
    }

    fn close(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.line("}");
    }

    fn finish(mut self) -> String {
        while self.indent > 0 {
            self.close();
        }
        if self.output.ends_with('\n') {
            self.output.pop();
        }
        self.output
    }
}

fn ensure_direct(entity: &EntitySchema, field: &str, path: &FieldPath) -> QueryResult<()> {
    if entity.has_direct_field(field) {
        Ok(())
    } else {
        Err(QueryError::invalid_field(path))
    }
}

/// Follows `field` from `entity`. A name that is not a reference is treated
/// as an unknown field of the whole path.
fn follow<'c>(
    catalog: &'c Catalog,
    entity: &EntitySchema,
    field: &str,
    path: &FieldPath,
) -> QueryResult<&'c EntitySchema> {
    let target = entity
        .reference(field)
        .ok_or_else(|| QueryError::invalid_field(path))?;
    catalog
        .get(target)
        .ok_or_else(|| QueryError::unknown_reference(entity.name(), field, target))
}

/// Assembles the query text selecting `fields` on `entity`.
///
/// Root fields keep their order in `fields`; reference blocks follow the
/// entity's reference declaration order. Repeated paths are emitted once.
/// A non-zero `block` is inlined as a literal argument.
pub fn assemble(
    catalog: &Catalog,
    kind: QueryKind,
    entity: &EntitySchema,
    fields: &[FieldPath],
    block: Option<u64>,
) -> QueryResult<String> {
    if fields.is_empty() {
        return Err(QueryError::EmptySelection {
            entity: entity.name().to_string(),
        });
    }

    let mut seen = FxHashSet::default();
    let mut root = Vec::new();
    let mut blocks: FxHashMap<&str, Block<'_>> = FxHashMap::default();

    for path in fields {
        if !seen.insert(path) {
            continue;
        }
        match path.segments() {
            [field] => {
                ensure_direct(entity, field, path)?;
                root.push(field.as_str());
            }
            [reference, field] => {
                let target = follow(catalog, entity, reference, path)?;
                ensure_direct(target, field, path)?;
                blocks
                    .entry(reference.as_str())
                    .or_insert_with(|| Block::new(target))
                    .fields
                    .push(field.as_str());
            }
            [reference, sub, field] => {
                let target = follow(catalog, entity, reference, path)?;
                let sub_target = follow(catalog, target, sub, path)?;
                ensure_direct(sub_target, field, path)?;
                blocks
                    .entry(reference.as_str())
                    .or_insert_with(|| Block::new(target))
                    .nested
                    .entry(sub.as_str())
                    .or_default()
                    .push(field.as_str());
            }
            _ => return Err(QueryError::invalid_field(path)),
        }
    }

    let block_arg = block
        .map(|number| format!(", block: {{number: {number}}}"))
        .unwrap_or_default();

    let mut writer = QueryWriter::new();
    match kind {
        QueryKind::ById => {
            let name = entity.name();
            writer.open(&format!("query {name}($id: ID!)"));
            writer.open(&format!("{name}(id: $id{block_arg})"));
        }
        QueryKind::List => {
            let plural = entity.plural_name();
            writer.open(&format!(
                "query {plural}($first: Int!, $skip: Int!, $orderBy: {}_orderBy!, $orderDir: OrderDirection!)",
                entity.type_name()
            ));
            writer.open(&format!(
                "{plural}(first: $first, skip: $skip, orderBy: $orderBy, orderDirection: $orderDir{block_arg})"
            ));
        }
    }

    for field in &root {
        writer.line(field);
    }

    for (reference, _) in entity.references() {
        let Some(group) = blocks.get(reference) else {
            continue;
        };
        writer.open(reference);
        for field in &group.fields {
            writer.line(field);
        }
        for (sub, _) in group.target.references() {
            if let Some(sub_fields) = group.nested.get(sub) {
                writer.open(sub);
                for field in sub_fields {
                    writer.line(field);
                }
                writer.close();
            }
        }
        writer.close();
    }

    Ok(writer.finish())
}
