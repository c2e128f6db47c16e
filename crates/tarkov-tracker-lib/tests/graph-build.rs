use tarkov_tracker::dataset::*;
use tarkov_tracker::dependency_graph::EdgeData;
use tarkov_tracker::{DependencyGraph, Error, GraphBuilder, MalformedDataError};

fn malformed(result: tarkov_tracker::Result<DependencyGraph>) -> MalformedDataError {
	match result {
		Err(Error::MalformedData(e)) => e,
		Err(e) => panic!("expected malformed data error, got {:?}", e),
		Ok(_) => panic!("expected malformed data error, graph built"),
	}
}

#[test]
fn valid_dataset_builds() {
	tarkov_tracker_test_utils::init_logging();

	let dataset = tarkov_tracker_test_utils::full_dataset();
	let graph = dataset.build_graph(79).expect("fixture dataset should build");

	assert_eq!(graph.node_count(), dataset.objectives.len() + 6);
	assert!(graph.get_node("o1").is_some());
	assert!(graph.get_node("med-2").is_some());
	assert!(graph.get_node("nope").is_none());
	assert_eq!(graph.max_player_level(), 79);
	assert_eq!(graph.item_name("ledx"), Some("LEDX Skin Transilluminator"));
}

#[test]
fn empty_dataset_builds() {
	let graph = DependencyGraph::build(&[], &[]).expect("empty graph should build");
	assert!(graph.is_empty());
}

#[test]
fn prerequisites_and_dependents_are_linked() {
	let graph = tarkov_tracker_test_utils::scenario_graph();

	let prerequisites: Vec<&str> = graph.get_prerequisites("o2").unwrap().map(|n| n.id.as_str()).collect();
	assert_eq!(prerequisites, vec!["o1"]);

	let dependents: Vec<&str> = graph.get_dependents("o1").unwrap().map(|n| n.id.as_str()).collect();
	assert_eq!(dependents, vec!["o2"]);

	assert_eq!(graph.get_prerequisites("o1").unwrap().count(), 0);
	assert!(graph.get_dependents("missing").is_none());
}

#[test]
fn station_levels_chain_in_level_order() {
	let graph = tarkov_tracker_test_utils::hideout_graph();

	let med_1 = graph.get_node("med-1").unwrap();
	assert!(med_1.prerequisites.is_empty());
	assert_eq!(med_1.group_tag(), "Medstation");
	assert_eq!(med_1.level_gate(), 0);

	let med_2 = graph.get_node("med-2").unwrap();
	assert_eq!(med_2.prerequisites, vec!["med-1".to_string(), "gen-1".to_string()]);
	assert_eq!(graph.edge_kind("med-2", "med-1"), Some(EdgeData::PreviousLevel));
	assert_eq!(graph.edge_kind("med-2", "gen-1"), Some(EdgeData::StationLevel));

	let med_3 = graph.get_node("med-3").unwrap();
	assert_eq!(med_3.prerequisites, vec!["med-2".to_string(), "gen-2".to_string()]);
	assert_eq!(med_3.name, "Medstation 3");
}

#[test]
fn objectives_and_stations_share_one_graph() {
	let objectives = vec![ObjectiveDef::new("gunsmith", "Gunsmith").prerequisite("workbench-1")];
	let stations = vec![
		StationDef::new("workbench", "Workbench")
			.level(StationLevelDef::new("workbench-1", 1).prerequisite("intro")),
	];
	let intro = ObjectiveDef::new("intro", "Introduction");

	let graph = GraphBuilder::new()
		.objectives(objectives.into_iter().chain([intro]))
		.stations(stations)
		.build()
		.expect("joint graph should build");

	let dependents: Vec<&str> = graph.get_dependents("workbench-1").unwrap().map(|n| n.id.as_str()).collect();
	assert_eq!(dependents, vec!["gunsmith"]);
	assert_eq!(graph.edge_kind("workbench-1", "intro"), Some(EdgeData::Prerequisite));
}

#[test]
fn duplicate_prerequisites_are_collapsed() {
	let objectives = vec![
		ObjectiveDef::new("a", "A"),
		ObjectiveDef::new("b", "B").prerequisite("a").prerequisite("a"),
	];
	let graph = DependencyGraph::build(&objectives, &[]).unwrap();
	assert_eq!(graph.get_node("b").unwrap().prerequisites, vec!["a".to_string()]);
	assert_eq!(graph.edge_count(), 1);
}

#[test]
fn derived_kinds_are_merged_with_declared() {
	let objectives = vec![
		ObjectiveDef::new("a", "A")
			.description("Eliminate 3 Scavs")
			.kind(ObjectiveKind::Survive),
	];
	let graph = DependencyGraph::build(&objectives, &[]).unwrap();
	let kinds: Vec<ObjectiveKind> = graph.get_node("a").unwrap().as_objective().unwrap().kinds.iter().copied().collect();
	assert_eq!(kinds, vec![ObjectiveKind::Kill, ObjectiveKind::Survive]);
}

#[test]
fn unknown_prerequisite_is_malformed() {
	let objectives = vec![ObjectiveDef::new("a", "A").prerequisite("ghost")];
	assert_eq!(
		malformed(DependencyGraph::build(&objectives, &[])),
		MalformedDataError::UnknownPrerequisite { node: "a".into(), prerequisite: "ghost".into() }
	);
}

#[test]
fn objective_cycle_is_malformed() {
	let objectives = vec![
		ObjectiveDef::new("a", "A").prerequisite("c"),
		ObjectiveDef::new("b", "B").prerequisite("a"),
		ObjectiveDef::new("c", "C").prerequisite("b"),
	];
	assert!(matches!(malformed(DependencyGraph::build(&objectives, &[])), MalformedDataError::Cycle { .. }));
}

#[test]
fn self_prerequisite_is_a_cycle() {
	let objectives = vec![ObjectiveDef::new("a", "A").prerequisite("a")];
	assert_eq!(malformed(DependencyGraph::build(&objectives, &[])), MalformedDataError::Cycle { node: "a".into() });
}

#[test]
fn cross_station_cycle_is_malformed() {
	let stations = vec![
		StationDef::new("x", "X")
			.level(StationLevelDef::new("x-1", 1))
			.level(StationLevelDef::new("x-2", 2).requires_station("y", 2)),
		StationDef::new("y", "Y")
			.level(StationLevelDef::new("y-1", 1).requires_station("x", 2))
			.level(StationLevelDef::new("y-2", 2)),
	];
	assert!(matches!(malformed(DependencyGraph::build(&[], &stations)), MalformedDataError::Cycle { .. }));
}

#[test]
fn unknown_station_is_malformed() {
	let stations = vec![StationDef::new("x", "X").level(StationLevelDef::new("x-1", 1).requires_station("lavatory", 1))];
	assert_eq!(
		malformed(DependencyGraph::build(&[], &stations)),
		MalformedDataError::UnknownStation { node: "x-1".into(), station: "lavatory".into() }
	);
}

#[test]
fn unknown_station_level_is_malformed() {
	let stations = tarkov_tracker_test_utils::hideout_stations()
		.into_iter()
		.chain([StationDef::new("x", "X").level(StationLevelDef::new("x-1", 1).requires_station("generator", 9))])
		.collect::<Vec<_>>();
	assert_eq!(
		malformed(DependencyGraph::build(&[], &stations)),
		MalformedDataError::UnknownStationLevel { node: "x-1".into(), station: "generator".into(), level: 9 }
	);
}

#[test]
fn duplicate_ids_are_malformed() {
	let objectives = vec![ObjectiveDef::new("a", "A"), ObjectiveDef::new("a", "Also A")];
	assert_eq!(malformed(DependencyGraph::build(&objectives, &[])), MalformedDataError::DuplicateId("a".into()));

	/* Objective and station level sharing an id */
	let objectives = vec![ObjectiveDef::new("gen-1", "Not a generator")];
	assert_eq!(
		malformed(DependencyGraph::build(&objectives, &tarkov_tracker_test_utils::hideout_stations())),
		MalformedDataError::DuplicateId("gen-1".into())
	);
}

#[test]
fn duplicate_station_level_is_malformed() {
	let stations = vec![
		StationDef::new("x", "X")
			.level(StationLevelDef::new("x-1", 1))
			.level(StationLevelDef::new("x-1b", 1)),
	];
	assert_eq!(malformed(DependencyGraph::build(&[], &stations)), MalformedDataError::DuplicateStationLevel { station: "x".into(), level: 1 });
}

#[test]
fn zero_quantity_is_malformed() {
	let objectives = vec![ObjectiveDef::new("a", "A").requirement(ItemRequirement::new("bolts", 0))];
	assert_eq!(malformed(DependencyGraph::build(&objectives, &[])), MalformedDataError::ZeroQuantity { node: "a".into(), item: "bolts".into() });
}

#[test]
fn dataset_loads_from_json() {
	let dataset = Dataset::from_json(tarkov_tracker_test_utils::sample_dataset_json()).expect("sample json should parse");
	let graph = dataset.build_graph(79).expect("sample dataset should build");

	let search = graph.get_node("search_mission").unwrap();
	assert_eq!(search.level_gate(), 2);
	assert!(search.as_objective().unwrap().kinds.contains(&ObjectiveKind::Survive));

	let vents = graph.get_node("vents-1").unwrap();
	assert_eq!(vents.prerequisites, vec!["debut".to_string()]);
	assert!(vents.requirements[0].found_in_raid);

	let debut = graph.get_node("debut").unwrap();
	assert!(!debut.requirements[0].found_in_raid);
	assert!(debut.as_objective().unwrap().kinds.contains(&ObjectiveKind::Kill));
}

#[test]
fn dataset_loads_from_file() {
	let dir = tarkov_tracker_test_utils::temp_data_dir();
	let path = dir.path().join("dataset.json");
	std::fs::write(&path, tarkov_tracker_test_utils::sample_dataset_json()).unwrap();

	let dataset = Dataset::load_from_file(&path).expect("dataset file should load");
	assert_eq!(dataset.objectives.len(), 2);
	assert_eq!(dataset.stations.len(), 1);

	assert!(matches!(Dataset::load_from_file(dir.path().join("missing.json")), Err(Error::IO(_))));
}

#[test]
fn graph_exports_as_json() {
	let graph = tarkov_tracker_test_utils::scenario_graph();
	let json = serde_json::to_value(&graph).expect("graph should serialize");
	assert_eq!(json["max_player_level"], 79);
}
