use tarkov_tracker::dataset::{ItemRequirement, ObjectiveDef};
use tarkov_tracker::priority::{classify_with_thresholds, dependency_depths, TierThresholds};
use tarkov_tracker::{aggregate, classify, compute_status, AggregatedRequirement, CompletionState, DependencyGraph, PriorityTier, ScopeMode};

fn classified(graph: &DependencyGraph, state: &CompletionState, scope: ScopeMode) -> Vec<AggregatedRequirement> {
	let statuses = compute_status(graph, state).unwrap();
	classify(graph, &statuses, aggregate(graph, &statuses, scope))
}

fn find<'a>(requirements: &'a [AggregatedRequirement], item: &str) -> &'a AggregatedRequirement {
	requirements.iter().find(|r| r.item == item).unwrap_or_else(|| panic!("`{}` missing from requirements", item))
}

/// `c0` → `c1` → ... → `c5`, node `cN` needs one `itemN`.
fn chain_graph() -> DependencyGraph {
	let objectives: Vec<ObjectiveDef> = (0..6)
		.map(|i| {
			let def = ObjectiveDef::new(format!("c{}", i), format!("Chain {}", i))
				.requirement(ItemRequirement::new(format!("item{}", i), 1));
			if i == 0 { def } else { def.prerequisite(format!("c{}", i - 1)) }
		})
		.collect();
	DependencyGraph::build(&objectives, &[]).unwrap()
}

#[test]
fn unlocked_need_is_now() {
	tarkov_tracker_test_utils::init_logging();
	let graph = tarkov_tracker_test_utils::scenario_graph();

	let requirements = classified(&graph, &CompletionState::default(), ScopeMode::ActiveOnly);
	let bandage = find(&requirements, "bandage");
	assert_eq!(bandage.priority_tier, Some(PriorityTier::NeedNow));
	assert_eq!(bandage.priority_depth, Some(0));
	assert!(!bandage.already_satisfied);
}

#[test]
fn shallowest_source_wins() {
	let graph = tarkov_tracker_test_utils::scenario_graph();

	/* `o2` is at depth 1 but `o1` needs bandages right now */
	let requirements = classified(&graph, &CompletionState::default(), ScopeMode::AllIncomplete);
	assert_eq!(find(&requirements, "bandage").priority_depth, Some(0));
}

#[test]
fn depth_grows_along_chain() {
	let graph = chain_graph();
	let statuses = compute_status(&graph, &CompletionState::default()).unwrap();
	let depths = dependency_depths(&graph, &statuses);

	for i in 0..6u32 {
		assert_eq!(depths.get(&format!("c{}", i)), Some(i));
	}

	let requirements = classify(&graph, &statuses, aggregate(&graph, &statuses, ScopeMode::AllIncomplete));
	assert_eq!(find(&requirements, "item0").priority_tier, Some(PriorityTier::NeedNow));
	assert_eq!(find(&requirements, "item1").priority_tier, Some(PriorityTier::NeedSoon));
	assert_eq!(find(&requirements, "item2").priority_tier, Some(PriorityTier::NeedSoon));
	assert_eq!(find(&requirements, "item3").priority_tier, Some(PriorityTier::NeedLater));
	assert_eq!(find(&requirements, "item5").priority_depth, Some(5));
}

#[test]
fn depths_shift_as_progress_is_made() {
	let graph = chain_graph();
	let state = CompletionState::default().with_completed(["c0", "c1"]);
	let statuses = compute_status(&graph, &state).unwrap();
	let depths = dependency_depths(&graph, &statuses);

	assert_eq!(depths.get("c0"), None);
	assert_eq!(depths.get("c2"), Some(0));
	assert_eq!(depths.get("c5"), Some(3));
	assert_eq!(depths.len(), 4);
}

#[test]
fn level_gated_node_is_one_deep() {
	let graph = tarkov_tracker_test_utils::scenario_graph();
	let state = CompletionState::new(5).unwrap().with_completed(["o1", "o2"]);
	let statuses = compute_status(&graph, &state).unwrap();

	assert_eq!(dependency_depths(&graph, &statuses).get("o3"), Some(1));
}

#[test]
fn deepest_prerequisite_decides_depth() {
	let graph = tarkov_tracker_test_utils::hideout_graph();
	let statuses = compute_status(&graph, &CompletionState::default()).unwrap();
	let depths = dependency_depths(&graph, &statuses);

	assert_eq!(depths.get("med-1"), Some(0));
	assert_eq!(depths.get("gen-1"), Some(0));
	assert_eq!(depths.get("med-2"), Some(1));
	assert_eq!(depths.get("gen-3"), Some(2));
	assert_eq!(depths.get("med-3"), Some(2));
}

#[test]
fn completed_only_items_are_satisfied() {
	let objectives = vec![
		ObjectiveDef::new("a", "A").requirement(ItemRequirement::new("flash_drive", 1)),
		ObjectiveDef::new("b", "B").prerequisite("a").requirement(ItemRequirement::new("gas_analyzer", 1)),
	];
	let graph = DependencyGraph::build(&objectives, &[]).unwrap();
	let state = CompletionState::default().with_completed(["a"]);

	let requirements = classified(&graph, &state, ScopeMode::IncludeCompleted);
	let flash_drive = find(&requirements, "flash_drive");
	assert!(flash_drive.already_satisfied);
	assert_eq!(flash_drive.priority_tier, Some(PriorityTier::NeedLater));
	assert_eq!(flash_drive.priority_depth, None);

	let gas_analyzer = find(&requirements, "gas_analyzer");
	assert!(!gas_analyzer.already_satisfied);
	assert_eq!(gas_analyzer.priority_tier, Some(PriorityTier::NeedNow));
}

#[test]
fn required_sources_beat_optional() {
	let objectives = vec![
		ObjectiveDef::new("a", "A").optional_requirement(ItemRequirement::new("vodka", 1)),
		ObjectiveDef::new("b", "B").prerequisite("a"),
		ObjectiveDef::new("c", "C").prerequisite("b").requirement(ItemRequirement::new("vodka", 2)),
		ObjectiveDef::new("d", "D").prerequisite("a").optional_requirement(ItemRequirement::new("whiskey", 1)),
	];
	let graph = DependencyGraph::build(&objectives, &[]).unwrap();

	let requirements = classified(&graph, &CompletionState::default(), ScopeMode::AllIncomplete);
	assert_eq!(find(&requirements, "vodka").priority_depth, Some(2));
	/* Only optional sources, those are used instead */
	assert_eq!(find(&requirements, "whiskey").priority_depth, Some(1));
	assert_eq!(find(&requirements, "whiskey").priority_tier, Some(PriorityTier::NeedSoon));
}

#[test]
fn thresholds_are_configurable() {
	let graph = chain_graph();
	let statuses = compute_status(&graph, &CompletionState::default()).unwrap();
	let requirements = aggregate(&graph, &statuses, ScopeMode::AllIncomplete);

	let requirements = classify_with_thresholds(&graph, &statuses, requirements, TierThresholds { soon_max_depth: 0 });
	assert_eq!(find(&requirements, "item0").priority_tier, Some(PriorityTier::NeedNow));
	assert_eq!(find(&requirements, "item1").priority_tier, Some(PriorityTier::NeedLater));
}

#[test]
fn every_item_gets_a_tier() {
	let graph = tarkov_tracker_test_utils::full_dataset().build_graph(79).unwrap();
	let state = CompletionState::default().with_completed(["o1", "med-1"]);

	for req in classified(&graph, &state, ScopeMode::IncludeCompleted) {
		assert!(req.priority_tier.is_some(), "`{}` has no tier", req.item);
		assert_eq!(req.priority_depth.is_none(), req.already_satisfied);
	}
}

#[test]
fn classification_is_repeatable() {
	let graph = tarkov_tracker_test_utils::full_dataset().build_graph(79).unwrap();
	let state = CompletionState::new(10).unwrap().with_completed(["o1", "med-1", "checking"]);
	let statuses = compute_status(&graph, &state).unwrap();

	for scope in [ScopeMode::ActiveOnly, ScopeMode::AllIncomplete, ScopeMode::IncludeCompleted] {
		let requirements = aggregate(&graph, &statuses, scope);
		let first = classify(&graph, &statuses, requirements.clone());
		let second = classify(&graph, &statuses, requirements);
		assert_eq!(first, second);
	}
	assert_eq!(dependency_depths(&graph, &statuses), dependency_depths(&graph, &statuses));
}

#[test]
fn empty_input_is_returned_as_is() {
	let graph = tarkov_tracker_test_utils::scenario_graph();
	let statuses = compute_status(&graph, &CompletionState::default()).unwrap();
	assert!(classify(&graph, &statuses, Vec::new()).is_empty());
}
