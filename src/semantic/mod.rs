//! Semantic networks with `is-a` inheritance
//!
//! A knowledge base maps each entity to its direct `(relation, target)`
//! facts. Querying an entity follows `is-a` links depth-first and collects
//! every non-`is-a` fact of its ancestors that the entity does not already
//! state itself.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Error, Result,
    trace::{Run, Trace},
};

/// Relation names that denote inheritance.
pub const INHERITANCE_RELATIONS: [&str; 2] = ["is-a", "is a"];

pub fn is_inheritance(relation: &str) -> bool {
    INHERITANCE_RELATIONS.contains(&relation)
}

/// A `(subject, relation, object)` triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fact {
    pub subject: String,
    pub relation: String,
    pub object: String,
}

impl Fact {
    pub fn new(
        subject: impl Into<String>,
        relation: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            relation: relation.into(),
            object: object.into(),
        }
    }
}

/// A direct fact as seen from its subject.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Property {
    pub relation: String,
    pub target: String,
}

/// A fact contributed by an ancestor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InheritedProperty {
    pub relation: String,
    pub target: String,
    pub inherited_from: String,
    /// 1 for a direct parent
    pub depth: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct KnowledgeBase {
    entities: Vec<String>,
    facts: HashMap<String, Vec<Property>>,
    fact_count: usize,
}

impl KnowledgeBase {
    /// Build from declared entities and fact triples. Every fact subject must
    /// be declared; objects may be undeclared leaves.
    pub fn new(entities: Vec<String>, facts: Vec<Fact>) -> Result<Self> {
        let mut declared = Vec::new();
        for entity in entities {
            let entity = entity.trim().to_string();
            if !entity.is_empty() && !declared.contains(&entity) {
                declared.push(entity);
            }
        }
        if declared.is_empty() {
            return Err(Error::EmptyKnowledgeBase {
                what: "entity".to_string(),
            });
        }
        if facts.is_empty() {
            return Err(Error::EmptyKnowledgeBase {
                what: "relation".to_string(),
            });
        }

        let mut table: HashMap<String, Vec<Property>> = HashMap::new();
        let fact_count = facts.len();
        for fact in facts {
            if !declared.contains(&fact.subject) {
                return Err(Error::UnknownEntity {
                    entity: fact.subject,
                });
            }
            table.entry(fact.subject).or_default().push(Property {
                relation: fact.relation,
                target: fact.object,
            });
        }

        Ok(Self {
            entities: declared,
            facts: table,
            fact_count,
        })
    }

    pub fn entities(&self) -> &[String] {
        &self.entities
    }

    pub fn contains(&self, entity: &str) -> bool {
        self.entities.iter().any(|e| e == entity)
    }

    /// Direct facts of `entity` in declaration order.
    pub fn direct(&self, entity: &str) -> &[Property] {
        self.facts.get(entity).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn fact_count(&self) -> usize {
        self.fact_count
    }

    /// Resolve direct and inherited properties of `entity`.
    ///
    /// # Examples
    ///
    /// ```
    /// use algoviz::semantic::{Fact, KnowledgeBase};
    /// use algoviz::trace::Trace;
    ///
    /// let kb = KnowledgeBase::new(
    ///     vec!["Cat".into(), "Mammal".into()],
    ///     vec![
    ///         Fact::new("Cat", "is-a", "Mammal"),
    ///         Fact::new("Mammal", "has", "Fur"),
    ///     ],
    /// )?;
    /// let inference = kb.infer("Cat", &mut Trace::new())?;
    /// assert_eq!(inference.inherited[0].target, "Fur");
    /// assert_eq!(inference.inherited[0].inherited_from, "Mammal");
    /// # Ok::<(), algoviz::Error>(())
    /// ```
    pub fn infer(&self, entity: &str, trace: &mut Trace) -> Result<Inference> {
        if !self.contains(entity) {
            return Err(Error::UnknownEntity {
                entity: entity.to_string(),
            });
        }
        trace.highlight(format!("Query: all properties of {entity}"));

        let direct = self.direct(entity).to_vec();
        for property in &direct {
            trace.info(format!("{entity} {} {} (direct)", property.relation, property.target));
        }

        let mut resolver = Resolver {
            kb: self,
            root: entity,
            direct: self.direct(entity).iter().collect(),
            visited: HashSet::new(),
            seen: HashSet::new(),
            ancestors: Vec::new(),
            inherited: Vec::new(),
        };
        resolver.explore(entity, 1, trace);
        let Resolver {
            ancestors,
            inherited,
            ..
        } = resolver;

        debug!(entity, direct = direct.len(), inherited = inherited.len(), "semantic query resolved");
        trace.success(format!(
            "Found {} direct and {} inherited properties",
            direct.len(),
            inherited.len()
        ));
        Ok(Inference {
            entity: entity.to_string(),
            direct,
            inherited,
            ancestors,
        })
    }
}

struct Resolver<'a> {
    kb: &'a KnowledgeBase,
    root: &'a str,
    direct: HashSet<&'a Property>,
    visited: HashSet<&'a str>,
    /// (relation, target) pairs already inherited
    seen: HashSet<(&'a str, &'a str)>,
    ancestors: Vec<String>,
    inherited: Vec<InheritedProperty>,
}

impl<'a> Resolver<'a> {
    fn explore(&mut self, current: &'a str, depth: usize, trace: &mut Trace) {
        self.visited.insert(current);
        let kb = self.kb;
        for link in kb.direct(current).iter().filter(|p| is_inheritance(&p.relation)) {
            let parent = link.target.as_str();
            trace.info(format!("{current} inherits from {parent} (via {})", link.relation));
            if parent == self.root || self.visited.contains(parent) {
                trace.info(format!("{parent} already visited"));
                continue;
            }
            self.ancestors.push(parent.to_string());

            for property in kb.direct(parent).iter().filter(|p| !is_inheritance(&p.relation)) {
                if self.direct.contains(property) {
                    continue;
                }
                if !self.seen.insert((property.relation.as_str(), property.target.as_str())) {
                    continue;
                }
                trace.info(format!(
                    "  inherit: {} {} (from {parent})",
                    property.relation, property.target
                ));
                self.inherited.push(InheritedProperty {
                    relation: property.relation.clone(),
                    target: property.target.clone(),
                    inherited_from: parent.to_string(),
                    depth,
                });
            }

            self.explore(parent, depth + 1, trace);
        }
    }
}

/// Resolved properties of one entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Inference {
    pub entity: String,
    pub direct: Vec<Property>,
    pub inherited: Vec<InheritedProperty>,
    /// Ancestors in discovery order
    pub ancestors: Vec<String>,
}

impl Inference {
    pub fn total(&self) -> usize {
        self.direct.len() + self.inherited.len()
    }

    /// Targets grouped by relation, relations in first-seen order.
    pub fn by_relation(&self) -> Vec<(String, Vec<String>)> {
        let pairs = self
            .direct
            .iter()
            .map(|p| (&p.relation, &p.target))
            .chain(self.inherited.iter().map(|p| (&p.relation, &p.target)));
        let mut groups: Vec<(String, Vec<String>)> = Vec::new();
        for (relation, target) in pairs {
            match groups.iter_mut().find(|(r, _)| r == relation) {
                Some((_, targets)) => targets.push(target.clone()),
                None => groups.push((relation.clone(), vec![target.clone()])),
            }
        }
        groups
    }
}

pub fn solve(kb: &KnowledgeBase, entity: &str, trace: &mut Trace) -> Result<Inference> {
    trace.info(format!(
        "Semantic network with {} entities and {} relations",
        kb.entities().len(),
        kb.fact_count()
    ));
    kb.infer(entity, trace)
}

pub fn run(kb: &KnowledgeBase, entity: &str) -> Run<Inference> {
    Trace::new().run(|trace| solve(kb, entity, trace))
}
