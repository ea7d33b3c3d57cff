//! Tests for the editing session: selection, edits and their effect on layout.
mod common;
use authflow_graph::prelude::*;
use authflow_graph::tree::collect_uids;
use common::*;

fn uid(value: &str) -> StepUid {
    StepUid::new(value)
}

#[test]
fn test_session_starts_on_first_signup_flow() {
    let session = create_session();

    assert_eq!(session.selection(), Selection::default());
    assert_eq!(
        session.current_flow().map(|f| f.name.as_str()),
        Some("default_signup_flow")
    );

    let graph = session.graph();
    assert_eq!(
        node_ids(&graph),
        vec!["step-0", "step-0-branch-0-step-0", "step-0-branch-0-step-1"]
    );
    let jumps: Vec<_> = graph.edges_of_kind(EdgeKind::Jump).collect();
    assert_eq!(jumps.len(), 2);
    assert!(jumps.iter().all(|e| e.target == "step-0"));
}

#[test]
fn test_steps_without_uid_are_given_one() {
    let mut config = create_nested_config();
    config.login_flows[0].steps.push(Step::new("verify"));
    let session = EditorSession::with_parts(config, IdentityAssigner::with_seed(1), LayoutEngine::new());

    let steps = &session.config().login_flows[0].steps;
    assert_eq!(steps[0].uid, Some(uid("n-root")));
    let assigned = steps[2].uid.as_ref().expect("uid assigned");
    assert_eq!(assigned.as_str().len(), 9);
}

#[test]
fn test_add_step_appends_named_step() {
    let mut session = create_session();
    let added = session.add_step("verify");

    let steps = session.current_steps();
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[1].uid.as_ref(), Some(&added));
    assert_eq!(steps[1].kind, "verify");
    assert_eq!(steps[1].name.as_deref(), Some("new_verify_step"));

    let graph = session.graph();
    assert_eq!(graph.nodes.len(), 4);
    // One edge already joins the two steps inside the email branch.
    assert_eq!(graph.edges_of_kind(EdgeKind::Sequential).count(), 2);
    let top: Vec<_> = graph
        .edges_of_kind(EdgeKind::Sequential)
        .filter(|e| e.target == "step-1")
        .collect();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].source, "step-0");
}

#[test]
fn test_added_uids_are_unique() {
    let mut session = create_session();
    let first = session.add_step("identify");
    let second = session.add_step("identify");
    assert_ne!(first, second);

    let all = collect_uids(session.current_steps());
    assert_eq!(all.len(), 3 + 2);
}

#[test]
fn test_add_step_to_empty_category_creates_default_flow() {
    let mut session = create_session();
    session.select_category(FlowCategory::Reauth);
    assert!(session.current_flow().is_none());
    assert!(session.graph().nodes.is_empty());

    session.add_step("authenticate");

    let flows = &session.config().reauth_flows;
    assert_eq!(flows.len(), 1);
    assert_eq!(flows[0].name, "default_flow");
    assert_eq!(flows[0].steps[0].name.as_deref(), Some("new_authenticate_step"));
    assert_eq!(session.selection().index, 0);
}

#[test]
fn test_update_step_is_reflected_in_preview() {
    let mut session = create_session();
    let mut step = find_step(session.current_steps(), &uid("s2")).unwrap().clone();
    step.optional = true;
    step.authentication = Some("primary_oob_otp_sms".to_string());

    session.update_step(step).expect("step exists");

    let preview = session.preview();
    assert!(preview.contains("optional: true"));
    assert!(preview.contains("authentication: primary_oob_otp_sms"));
    assert!(!preview.contains("primary_oob_otp_email"));
}

#[test]
fn test_update_gives_newly_nested_steps_uids() {
    let mut session = create_session();
    let added = session.add_step("identify");
    let step = find_step(session.current_steps(), &added).unwrap().clone();

    let edited = step.with_branch(
        Branch::identification("email").with_step(Step::new("verify").with_name("v")),
    );
    session.update_step(edited).expect("step exists");

    let nested = session.current_steps()[1].branches()[0].steps()[0].clone();
    let nested_uid = nested.uid.clone().expect("nested step is addressable");
    assert_ne!(nested_uid, added);
    assert_eq!(collect_uids(session.current_steps()).len(), 5);

    // The nested step can now be edited and deleted on its own.
    session.update_step(nested.optional()).expect("nested step exists");
    assert!(find_step(session.current_steps(), &nested_uid).unwrap().optional);
    session.delete_step(&nested_uid).expect("nested step exists");
    assert!(session.current_steps()[1].branches()[0].steps().is_empty());
}

#[test]
fn test_update_unknown_step_fails_and_changes_nothing() {
    let mut session = create_session();
    let before = session.config().clone();

    let result = session.update_step(Step::new("verify").with_uid("nope"));
    assert_eq!(
        result,
        Err(SessionError::Mutation(MutationError::StepNotFound(uid("nope"))))
    );

    let result = session.update_step(Step::new("verify"));
    assert_eq!(result, Err(SessionError::Mutation(MutationError::MissingUid)));
    assert_eq!(session.config(), &before);
}

#[test]
fn test_delete_step_clears_selection() {
    let mut session = create_session();
    assert!(session.select_node("step-0-branch-0-step-1"));
    assert_eq!(session.selected_step().and_then(|s| s.uid.clone()), Some(uid("s3")));

    session.delete_step(&uid("s3")).expect("step exists");

    assert_eq!(session.selected_node(), None);
    assert_eq!(session.graph().nodes.len(), 2);
    assert!(find_step(session.current_steps(), &uid("s3")).is_none());
}

#[test]
fn test_delete_unknown_step_fails() {
    let mut session = create_session();
    assert_eq!(
        session.delete_step(&uid("nope")),
        Err(SessionError::Mutation(MutationError::StepNotFound(uid("nope"))))
    );
    assert_eq!(session.graph().nodes.len(), 3);
}

#[test]
fn test_delete_handle_produces_delete_command() {
    let mut session = create_session();
    assert!(session.delete_handle(&uid("nope")).is_none());

    let handle = session.delete_handle(&uid("s2")).expect("step exists");
    assert_eq!(handle.uid(), &uid("s2"));
    assert_eq!(handle.command(), EditCommand::DeleteStep(uid("s2")));

    session.apply(handle.command()).expect("delete succeeds");
    assert!(find_step(session.current_steps(), &uid("s2")).is_none());
}

#[test]
fn test_connect_records_jump_and_relayout_shows_it() {
    let mut session = create_session();
    session.add_step("verify");
    let before = session.graph().edges_of_kind(EdgeKind::Jump).count();

    session.connect("step-1", "step-0").expect("both nodes exist");

    assert_eq!(
        session.current_steps()[1].target_step.as_deref(),
        Some("setup_identity")
    );
    let graph = session.graph();
    assert_eq!(graph.edges_of_kind(EdgeKind::Jump).count(), before + 1);
    assert!(graph.edges.iter().any(|e| e.id == "jump-step-1-step-0"));
}

#[test]
fn test_connect_rejects_unknown_and_unaddressable_nodes() {
    let mut session = create_session();
    assert_eq!(
        session.connect("bogus", "step-0"),
        Err(SessionError::Mutation(MutationError::NodeNotFound("bogus".to_string())))
    );

    session.select_category(FlowCategory::Login);
    assert_eq!(
        session.connect("step-1", "step-0"),
        Err(SessionError::Mutation(MutationError::UnaddressableTarget(
            "step-0".to_string()
        )))
    );
    assert!(session.current_steps()[1].target_step.is_none());
}

#[test]
fn test_load_recipe_replaces_selected_flow_with_fresh_uids() {
    let library = RecipeLibrary::builtin().unwrap();
    let recipe = library.get("google-style").unwrap();
    let mut session = create_session();

    session.load_recipe(recipe);

    let flow = session.current_flow().unwrap();
    assert_eq!(flow.name, "google-style");
    assert_eq!(flow.steps.len(), 3);
    assert_eq!(session.config().signup_flows.len(), 1);

    let loaded = collect_uids(&flow.steps);
    assert_eq!(loaded.len(), 3);
    let login = collect_uids(&session.config().login_flows[0].steps);
    assert!(loaded.is_disjoint(&login));

    // The template itself is left without identifiers.
    assert!(recipe.steps.iter().all(|s| s.uid.is_none()));
}

#[test]
fn test_loading_a_recipe_twice_gives_distinct_uids() {
    let library = RecipeLibrary::builtin().unwrap();
    let recipe = library.get("passwordless").unwrap();
    let mut session = create_session();

    session.load_recipe(recipe);
    let first = collect_uids(session.current_steps());

    session.new_flow("second");
    session.load_recipe(recipe);
    let second = collect_uids(session.current_steps());

    assert_eq!(session.config().signup_flows.len(), 2);
    assert_eq!(session.config().signup_flows[1].name, "passwordless");
    assert_eq!(first.len(), second.len());
    assert!(first.is_disjoint(&second));
}

#[test]
fn test_replace_current_past_end_appends_and_selects() {
    let mut session = create_session();
    session.select_category(FlowCategory::AccountRecovery);

    session.replace_current(Flow::with_steps("recovery", vec![Step::new("identify")]));

    assert_eq!(session.config().account_recovery_flows.len(), 1);
    assert_eq!(session.selection().index, 0);
    assert!(session.current_steps()[0].uid.is_some());
}

#[test]
fn test_new_flow_selects_empty_flow() {
    let mut session = create_session();
    let index = session.new_flow("another");
    assert_eq!(index, 1);
    assert_eq!(session.selection().index, 1);
    assert!(session.graph().nodes.is_empty());
    assert_eq!(session.preview().trim(), "[]");
}

#[test]
fn test_select_flow_out_of_range() {
    let mut session = create_session();
    assert_eq!(
        session.select_flow(FlowCategory::Signup, 5),
        Err(SessionError::NoCurrentFlow {
            category: FlowCategory::Signup,
            index: 5
        })
    );
    assert_eq!(session.selection(), Selection::default());

    session.select_flow(FlowCategory::Login, 0).unwrap();
    assert_eq!(session.current_flow().unwrap().name, "default_login_flow");
}

#[test]
fn test_reset_restores_initial_configuration() {
    let mut session = create_session();
    let initial = session.config().clone();

    session.add_step("verify");
    session.select_category(FlowCategory::Login);
    session.delete_step(&uid("l2")).unwrap();
    assert_ne!(session.config(), &initial);

    session.apply(EditCommand::Reset).unwrap();
    assert_eq!(session.config(), &initial);
    assert_eq!(session.selection(), Selection::default());
    assert_eq!(session.selected_node(), None);
}

#[test]
fn test_selection_survives_edits_that_keep_the_node() {
    let mut session = create_session();
    session.select_node("step-0-branch-0-step-1");

    let mut step = find_step(session.current_steps(), &uid("s2")).unwrap().clone();
    step.optional = true;
    session.update_step(step).unwrap();

    assert_eq!(session.selected_node(), Some("step-0-branch-0-step-1"));
}

#[test]
fn test_selection_is_dropped_when_node_disappears() {
    let mut session = create_session();
    session.select_node("step-0-branch-0-step-1");

    let mut root = find_step(session.current_steps(), &uid("s1")).unwrap().clone();
    root.one_of = None;
    session.update_step(root).unwrap();

    assert_eq!(session.selected_node(), None);
    assert_eq!(session.graph().nodes.len(), 1);
}

#[test]
fn test_select_node_commands() {
    let mut session = create_session();
    assert!(!session.select_node("step-7"));
    assert_eq!(session.selected_node(), None);

    session
        .apply(EditCommand::SelectNode("step-0".to_string()))
        .unwrap();
    assert_eq!(session.selected_node(), Some("step-0"));
    assert_eq!(session.selected_step().map(|s| s.kind.as_str()), Some("identify"));

    session.apply(EditCommand::ClearSelection).unwrap();
    assert_eq!(session.selected_node(), None);
}

#[test]
fn test_apply_routes_every_edit() {
    let mut session = create_session();
    session
        .apply(EditCommand::SelectCategory(FlowCategory::Login))
        .unwrap();
    session
        .apply(EditCommand::AddStep {
            kind: "verify".to_string(),
        })
        .unwrap();
    assert_eq!(session.current_steps().len(), 3);

    session
        .apply(EditCommand::NewFlow {
            name: "fresh".to_string(),
        })
        .unwrap();
    assert_eq!(session.current_flow().unwrap().name, "fresh");

    let recipe = RecipeLibrary::builtin().unwrap().get("latte").unwrap().clone();
    session.apply(EditCommand::LoadRecipe(recipe)).unwrap();
    assert_eq!(session.current_flow().unwrap().name, "latte");

    let result = session.apply(EditCommand::SelectFlow {
        category: FlowCategory::Reauth,
        index: 0,
    });
    assert!(result.is_err());
}

#[test]
fn test_export_config_covers_every_flow() {
    let mut session = create_session();
    session.select_category(FlowCategory::Reauth);
    session.add_step("authenticate");

    let yaml = session.export_config().unwrap();
    assert!(yaml.contains("signup_flows:"));
    assert!(yaml.contains("login_flows:"));
    assert!(yaml.contains("reauth_flows:"));
    assert!(!yaml.contains("_uuid"));
}
