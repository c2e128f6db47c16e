//! Various helper functions for testing
//!
//! Fixture datasets are small hand-written slices of the game data shaped for specific tests.

use tarkov_tracker::dataset::*;
use tarkov_tracker::DependencyGraph;

/// Initialises `env_logger` once, later calls do nothing.
pub fn init_logging() {
	let _ = env_logger::builder().is_test(true).try_init();
}

/// A temporary data directory removed when dropped.
pub fn temp_data_dir() -> tempfile::TempDir {
	tempfile::tempdir().expect("failed to create temporary directory")
}

/// `o1` → `o2` → `o3` where `o3` needs level 10.
/// - `o1` needs 2 bandages.
/// - `o2` needs 1 bandage.
pub fn scenario_objectives() -> Vec<ObjectiveDef> {
	vec![
		ObjectiveDef::new("o1", "First Steps")
			.trader("Prapor")
			.min_player_level(1)
			.requirement(ItemRequirement::new("bandage", 2)),
		ObjectiveDef::new("o2", "Second Steps")
			.trader("Prapor")
			.min_player_level(1)
			.prerequisite("o1")
			.requirement(ItemRequirement::new("bandage", 1)),
		ObjectiveDef::new("o3", "Veteran")
			.trader("Prapor")
			.min_player_level(10)
			.prerequisite("o2"),
	]
}

pub fn scenario_graph() -> DependencyGraph {
	DependencyGraph::build(&scenario_objectives(), &[]).expect("scenario graph should be valid")
}

/// Generator and Medstation, three levels each.
/// - `med-2` requires `gen-1`, `med-3` requires `gen-2`.
pub fn hideout_stations() -> Vec<StationDef> {
	vec![
		StationDef::new("generator", "Generator")
			.level(StationLevelDef::new("gen-1", 1).requirement(ItemRequirement::new("spark_plug", 2)))
			.level(StationLevelDef::new("gen-2", 2).requirement(ItemRequirement::new("spark_plug", 4)).requirement(ItemRequirement::new("wires", 5)))
			.level(StationLevelDef::new("gen-3", 3).requirement(ItemRequirement::found_in_raid("tetriz", 1))),
		/* Levels deliberately out of order */
		StationDef::new("medstation", "Medstation")
			.level(StationLevelDef::new("med-3", 3).requires_station("generator", 2).requirement(ItemRequirement::found_in_raid("ledx", 1)))
			.level(StationLevelDef::new("med-1", 1).requirement(ItemRequirement::new("bandage", 3)))
			.level(StationLevelDef::new("med-2", 2).requires_station("generator", 1).requirement(ItemRequirement::found_in_raid("salewa", 2))),
	]
}

pub fn hideout_graph() -> DependencyGraph {
	DependencyGraph::build(&[], &hideout_stations()).expect("hideout graph should be valid")
}

/// Objectives spread over a few maps.
/// - `debut` and `checking` are unlocked on Customs.
/// - `bp_depot` is on Customs but locked behind `checking`.
/// - `shortage` and `shooter_born` are alone on their maps.
pub fn raid_objectives() -> Vec<ObjectiveDef> {
	vec![
		ObjectiveDef::new("debut", "Debut")
			.trader("Prapor")
			.location("Customs")
			.description("Eliminate 5 Scavs on Customs"),
		ObjectiveDef::new("checking", "Checking")
			.trader("Prapor")
			.location("Customs")
			.description("Find the pocket watch and hand over the item"),
		ObjectiveDef::new("bp_depot", "BP Depot")
			.trader("Prapor")
			.prerequisite("checking")
			.location("Customs")
			.description("Mark the first fuel tank with an MS2000 Marker"),
		ObjectiveDef::new("shortage", "Shortage")
			.trader("Therapist")
			.location("Interchange")
			.description("Hand over the found in raid Salewa")
			.requirement(ItemRequirement::found_in_raid("salewa", 3)),
		ObjectiveDef::new("shooter_born", "Shooter Born in Heaven")
			.trader("Jaeger")
			.min_player_level(1)
			.location("Woods")
			.description("Eliminate PMC operatives with headshots"),
	]
}

pub fn raid_graph() -> DependencyGraph {
	DependencyGraph::build(&raid_objectives(), &[]).expect("raid graph should be valid")
}

pub fn item_defs() -> Vec<ItemDef> {
	[
		("bandage", "Aseptic bandage"),
		("salewa", "Salewa first aid kit"),
		("spark_plug", "Spark plug"),
		("wires", "Bundle of wires"),
		("tetriz", "Tetriz portable game console"),
		("ledx", "LEDX Skin Transilluminator"),
	]
	.into_iter()
	.map(|(id, name)| ItemDef { id: id.to_string(), name: name.to_string() })
	.collect()
}

/// Every fixture in one dataset.
pub fn full_dataset() -> Dataset {
	let mut objectives = scenario_objectives();
	objectives.extend(raid_objectives());
	Dataset { objectives, stations: hideout_stations(), items: item_defs() }
}

/// A small dataset as the loader would receive it.
pub fn sample_dataset_json() -> &'static str {
	r#"{
	"objectives": [
		{
			"id": "debut",
			"name": "Debut",
			"trader": "Prapor",
			"locations": ["Customs"],
			"descriptions": ["Eliminate 5 Scavs on Customs"],
			"requirements": [{ "item": "bandage", "count": 2 }]
		},
		{
			"id": "search_mission",
			"name": "Search Mission",
			"trader": "Prapor",
			"min_player_level": 2,
			"prerequisites": ["debut"],
			"locations": ["Woods"],
			"kinds": ["survive"]
		}
	],
	"stations": [
		{
			"id": "vents",
			"name": "Vents",
			"levels": [
				{ "id": "vents-1", "level": 1, "requirements": [{ "item": "wires", "count": 1, "found_in_raid": true }], "prerequisites": ["debut"] }
			]
		}
	],
	"items": [{ "id": "wires", "name": "Bundle of wires" }]
}"#
}
