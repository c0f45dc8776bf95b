use algoviz::{
    Error,
    input::{parse_facts, parse_names},
    semantic::{self, KnowledgeBase},
};

const ANIMALS_ENTITIES: &str = "Animal, Bird, Penguin, Canary";
const ANIMALS_FACTS: &str = "\
Bird-is-a-Animal
Penguin-is a-Bird
Canary-is-a-Bird
Animal-has-Skin
Animal-can-Breathe
Bird-has-Feathers
Bird-can-Fly
Penguin-can-Swim
Penguin-can-Fly
Canary-color-Yellow
";

fn animals() -> KnowledgeBase {
    KnowledgeBase::new(
        parse_names(ANIMALS_ENTITIES),
        parse_facts(ANIMALS_FACTS).unwrap(),
    )
    .unwrap()
}

#[test]
fn properties_flow_down_the_hierarchy_with_depth() {
    let run = semantic::run(&animals(), "Canary");
    let inference = run.result.unwrap();

    assert_eq!(inference.ancestors, ["Bird", "Animal"]);
    let inherited: Vec<(&str, &str, &str, usize)> = inference
        .inherited
        .iter()
        .map(|p| {
            (
                p.relation.as_str(),
                p.target.as_str(),
                p.inherited_from.as_str(),
                p.depth,
            )
        })
        .collect();
    assert_eq!(
        inherited,
        [
            ("has", "Feathers", "Bird", 1),
            ("can", "Fly", "Bird", 1),
            ("has", "Skin", "Animal", 2),
            ("can", "Breathe", "Animal", 2),
        ]
    );
    assert_eq!(inference.total(), 5);
    assert!(run.trace.iter().any(|e| e.message == "Canary inherits from Bird (via is-a)"));
}

#[test]
fn spaced_inheritance_relation_is_followed() {
    let inference = semantic::run(&animals(), "Penguin").result.unwrap();
    assert_eq!(inference.ancestors, ["Bird", "Animal"]);
    assert!(
        inference
            .inherited
            .iter()
            .all(|p| !(p.relation == "can" && p.target == "Fly")),
        "Penguin states 'can Fly' directly, so Bird's copy is not repeated"
    );
    let can = inference
        .by_relation()
        .into_iter()
        .find(|(relation, _)| relation == "can")
        .map(|(_, targets)| targets)
        .unwrap();
    assert_eq!(can, ["Swim", "Fly", "Breathe"]);
}

#[test]
fn cyclic_hierarchies_terminate() {
    let kb = KnowledgeBase::new(
        parse_names("A, B, C"),
        parse_facts("A-is-a-B\nB-is-a-C\nC-is-a-A\nB-has-Wings\nC-has-Tail").unwrap(),
    )
    .unwrap();

    for entity in ["A", "B", "C"] {
        let inference = semantic::run(&kb, entity).result.unwrap();
        assert_eq!(inference.ancestors.len(), 2, "{entity} sees both other nodes once");
        assert!(!inference.ancestors.iter().any(|a| a == entity));
    }
    let a = semantic::run(&kb, "A").result.unwrap();
    assert_eq!(a.inherited.len(), 2);
}

#[test]
fn unknown_subjects_and_queries_are_rejected() {
    let err = KnowledgeBase::new(parse_names("A"), parse_facts("B-has-C").unwrap()).unwrap_err();
    assert!(matches!(err, Error::UnknownEntity { entity } if entity == "B"));

    let run = semantic::run(&animals(), "Fish");
    assert!(matches!(run.result, Err(Error::UnknownEntity { .. })));
    assert_eq!(run.trace.len(), 2, "summary line plus the error");
}
